//! Rule-based Prakriti assessment for the wellness platform backend.
//!
//! The crate is organized around one workflow: scoring a dosha questionnaire
//! and maintaining the derived constitutional profile. The scoring engine
//! itself is pure and side-effect free; persistence stays behind traits so
//! the workflow can run against any storage adapter.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
