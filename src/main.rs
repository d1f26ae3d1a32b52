use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::{Args, Parser, Subcommand};
use prakriti_ai::config::AppConfig;
use prakriti_ai::error::AppError;
use prakriti_ai::telemetry;
use prakriti_ai::workflows::assessment::{
    analyze, check_imbalance, AssessmentId, AssessmentRecord, AssessmentRepository,
    AssessmentService, AssessmentStatus, AssessmentType, Dosha, DoshaProfileRecord,
    DoshaProfileStore, DoshaScores, ImbalanceReport, PrakritiAnalysis, QuestionCategory,
    QuestionId, QuestionResponse, RepositoryError, SelectedOption, UserId,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Prakriti Assessment Engine",
    about = "Score dosha questionnaires and demo the assessment workflow from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a saved questionnaire export and print the full analysis
    Analyze(AnalyzeArgs),
    /// Run an end-to-end assessment demo against in-memory storage (default)
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Path to a JSON array of questionnaire responses
    #[arg(long)]
    responses: PathBuf,
    /// Optional baseline scores JSON to append a vikriti imbalance report
    #[arg(long)]
    baseline: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Print the raw JSON payloads alongside the rendered summary
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args),
        Command::Demo(args) => run_demo(args, config),
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let raw = std::fs::read(&args.responses)?;
    let responses: Vec<QuestionResponse> = serde_json::from_slice(&raw)?;
    info!(count = responses.len(), "scoring questionnaire export");

    let analysis = analyze(&responses);
    render_analysis(&analysis);

    if let Some(path) = args.baseline {
        let raw = std::fs::read(&path)?;
        let baseline: DoshaScores = serde_json::from_slice(&raw)?;
        let report = check_imbalance(&baseline, &analysis.scores());
        render_imbalance(&report);
    }

    Ok(())
}

fn run_demo(args: DemoArgs, config: AppConfig) -> Result<(), AppError> {
    println!("Prakriti assessment demo");

    let service = AssessmentService::new(
        Arc::new(InMemoryAssessments::default()),
        Arc::new(InMemoryProfiles::default()),
        config.assessment,
    );

    let respondent = UserId("demo-user".to_string());
    let started = service.start(&respondent, AssessmentType::Initial)?;
    println!(
        "- Started assessment {} for {}",
        started.record.assessment_id.0, respondent.0
    );

    let mut progress = None;
    for (index, (category, dosha, weightage)) in demo_answers().into_iter().enumerate() {
        let question_id = QuestionId(format!("demo-q{:02}", index + 1));
        let response = QuestionResponse {
            category: Some(category),
            option: Some(SelectedOption {
                dosha_type: dosha,
                weightage: Some(weightage),
            }),
        };
        progress = Some(service.record_response(
            &started.record.assessment_id,
            &respondent,
            question_id,
            response,
        )?);
    }

    if let Some(progress) = progress {
        println!(
            "- Recorded {} answers ({:.1}% of a {}-question bank)",
            progress.answered, progress.percentage, progress.total
        );
    }

    let completed = service.complete(&started.record.assessment_id, &respondent)?;
    render_analysis(&completed.analysis);

    // Drift the present state away from the fresh baseline so the vikriti
    // reading has something to flag.
    let profile = service.profile(&respondent)?;
    let current = DoshaScores {
        vata: (profile.prakriti.vata - 22.0).max(0.0),
        pitta: profile.prakriti.pitta + 17.0,
        kapha: profile.prakriti.kapha + 5.0,
    };
    let report = service.imbalance_report(&respondent, &current)?;
    render_imbalance(&report);

    if args.json {
        println!("\nPublic status payload:");
        println!(
            "{}",
            serde_json::to_string_pretty(&completed.record.status_view())?
        );
        println!("\nAnalysis payload:");
        println!("{}", serde_json::to_string_pretty(&completed.analysis)?);
    }

    Ok(())
}

fn demo_answers() -> Vec<(QuestionCategory, Option<Dosha>, f64)> {
    vec![
        (QuestionCategory::BodyStructure, Some(Dosha::Vata), 2.0),
        (QuestionCategory::BodyStructure, Some(Dosha::Vata), 1.0),
        (QuestionCategory::BodyStructure, Some(Dosha::Pitta), 1.0),
        (QuestionCategory::SkinHairNails, Some(Dosha::Vata), 1.0),
        (QuestionCategory::SkinHairNails, Some(Dosha::Kapha), 1.0),
        (QuestionCategory::MetabolismDigestion, Some(Dosha::Vata), 1.0),
        (QuestionCategory::MetabolismDigestion, Some(Dosha::Pitta), 2.0),
        (QuestionCategory::AppetiteTaste, Some(Dosha::Pitta), 1.0),
        (QuestionCategory::AppetiteTaste, Some(Dosha::Vata), 1.0),
        (QuestionCategory::SleepPatterns, Some(Dosha::Vata), 2.0),
        (QuestionCategory::SleepPatterns, None, 1.0),
        (QuestionCategory::MentalEmotional, Some(Dosha::Vata), 1.0),
        (QuestionCategory::MentalEmotional, Some(Dosha::Pitta), 1.0),
        (QuestionCategory::StressResponse, Some(Dosha::Vata), 2.0),
        (QuestionCategory::StressResponse, Some(Dosha::Kapha), 1.0),
        (QuestionCategory::EnergyStamina, Some(Dosha::Vata), 1.0),
        (QuestionCategory::EnergyStamina, Some(Dosha::Kapha), 1.0),
    ]
}

fn render_analysis(analysis: &PrakritiAnalysis) {
    println!("\nDosha scores");
    println!(
        "- Vata {:.2} | Pitta {:.2} | Kapha {:.2}",
        analysis.vata_score, analysis.pitta_score, analysis.kapha_score
    );

    println!("\nConstitution");
    println!(
        "- Type: {} (primary {}, secondary {})",
        analysis.prakriti_type,
        analysis.primary_dosha.display_name(),
        analysis.secondary_dosha.display_name()
    );
    println!(
        "- Agni: {} ({})",
        analysis.agni_type.label(),
        analysis.agni_type.description()
    );
    println!("- Dominant gunas: {}", analysis.dominant_gunas.join(", "));

    if analysis.sub_scores.is_empty() {
        println!("\nSection breakdown: no scored sections");
    } else {
        println!("\nSection breakdown");
        for (category, scores) in &analysis.sub_scores {
            println!(
                "- {}: V {:.2} / P {:.2} / K {:.2}",
                category.title(),
                scores.vata,
                scores.pitta,
                scores.kapha
            );
        }
    }

    println!("\nComposite averages");
    render_composite(
        "Physical",
        analysis.physical_vata,
        analysis.physical_pitta,
        analysis.physical_kapha,
    );
    render_composite(
        "Mental",
        analysis.mental_vata,
        analysis.mental_pitta,
        analysis.mental_kapha,
    );
    render_composite(
        "Digestive",
        analysis.digestive_vata,
        analysis.digestive_pitta,
        analysis.digestive_kapha,
    );
}

fn render_composite(label: &str, vata: Option<f64>, pitta: Option<f64>, kapha: Option<f64>) {
    match (vata, pitta, kapha) {
        (Some(vata), Some(pitta), Some(kapha)) => {
            println!("- {label}: V {vata:.2} / P {pitta:.2} / K {kapha:.2}")
        }
        _ => println!("- {label}: insufficient data"),
    }
}

fn render_imbalance(report: &ImbalanceReport) {
    if !report.is_imbalanced {
        println!("\nVikriti check: balanced, no dosha beyond the drift threshold");
        return;
    }

    println!("\nVikriti check: imbalance detected");
    for (entry, actions) in report.imbalances.iter().zip(&report.balancing_actions) {
        println!(
            "- {} {} by {:.2}",
            entry.dosha.display_name(),
            entry.direction.label(),
            entry.deviation
        );
        if !actions.diet.is_empty() {
            println!("  Diet: {}", actions.diet.join("; "));
        }
        if !actions.lifestyle.is_empty() {
            println!("  Lifestyle: {}", actions.lifestyle.join("; "));
        }
        if !actions.herbs.is_empty() {
            println!("  Herbs: {}", actions.herbs.join("; "));
        }
    }
}

#[derive(Default, Clone)]
struct InMemoryAssessments {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessments {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: AssessmentRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.assessment_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn in_progress_for(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| {
                record.user_id == *user_id && record.status == AssessmentStatus::InProgress
            })
            .cloned())
    }
}

#[derive(Default, Clone)]
struct InMemoryProfiles {
    profiles: Arc<Mutex<HashMap<UserId, DoshaProfileRecord>>>,
}

impl DoshaProfileStore for InMemoryProfiles {
    fn upsert(&self, profile: DoshaProfileRecord) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.user_id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, user_id: &UserId) -> Result<Option<DoshaProfileRecord>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned())
    }
}
