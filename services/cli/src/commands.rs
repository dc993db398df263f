use alignment_audit::assessment::scoring::{compute_progress, compute_scores, section_status};
use alignment_audit::assessment::{MetaValidation, INDUSTRIES, INITIATIVES};
use alignment_audit::report::schema::decode_insights;
use alignment_audit::submission::FinalizePayload;
use alignment_audit::{
    AiInsights, AppConfig, AppError, AssessmentSession, GeminiInsightEngine, JsonFileStore,
    MetaField, QuestionBank, ReqwestWebhookSink, ResponseStore, WebhookSink,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct StatusArgs {
    /// Emit the raw session state as JSON instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MetaArgs {
    /// Which intake field to set
    pub(crate) field: MetaFieldArg,
    /// The value to record
    pub(crate) value: String,
}

#[derive(Args, Debug)]
pub(crate) struct AnswerArgs {
    /// Question id, e.g. q1
    pub(crate) question_id: String,
    /// Rating from 1 (strongly disagree) to 5 (strongly agree)
    pub(crate) rating: u8,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Emit the briefing as JSON instead of the rendered summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FinalizeArgs {
    /// Attach a previously saved briefing (JSON file) to the archive payload
    #[arg(long)]
    pub(crate) insights_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum MetaFieldArg {
    Company,
    Industry,
    Initiative,
    Role,
    Email,
    Mobile,
}

impl From<MetaFieldArg> for MetaField {
    fn from(value: MetaFieldArg) -> Self {
        match value {
            MetaFieldArg::Company => MetaField::CompanyName,
            MetaFieldArg::Industry => MetaField::Industry,
            MetaFieldArg::Initiative => MetaField::Initiative,
            MetaFieldArg::Role => MetaField::RespondentRole,
            MetaFieldArg::Email => MetaField::Email,
            MetaFieldArg::Mobile => MetaField::Mobile,
        }
    }
}

fn open_store(config: &AppConfig) -> ResponseStore<JsonFileStore> {
    ResponseStore::load_or_init(JsonFileStore::new(&config.storage.state_path))
}

pub(crate) fn run_status(config: &AppConfig, args: StatusArgs) -> Result<(), AppError> {
    let bank = QuestionBank::standard();
    let store = open_store(config);
    let state = store.state();

    if args.json {
        match serde_json::to_string_pretty(state) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Session state unavailable: {err}"),
        }
        return Ok(());
    }

    println!("Strategic alignment audit - {}", state.meta.date);
    for field in MetaField::ordered() {
        let value = state.meta.field(field);
        let shown = if value.trim().is_empty() { "(unset)" } else { value };
        println!("  {}: {}", field.label(), shown);
    }

    let progress = compute_progress(state, &bank);
    println!(
        "\nDiagnostic input: {} of {} questions ({}%)",
        state.answers.len(),
        bank.total_questions(),
        progress
    );

    let scores = compute_scores(state, &bank);
    let statuses = section_status(state, &bank);
    for (score, status) in scores.iter().zip(statuses.iter()) {
        if status.answered == 0 {
            println!("  - {}: no data ({}/{})", score.title, status.answered, status.total);
        } else {
            println!(
                "  - {}: {:.1} {} ({}/{})",
                score.title,
                score.score,
                score.risk_level.label(),
                status.answered,
                status.total
            );
        }
    }

    let validation = MetaValidation::evaluate(&state.meta);
    if validation.is_valid() {
        println!("\nIntake: complete");
    } else {
        let missing: Vec<&str> = validation
            .failed_fields()
            .into_iter()
            .map(|field| field.label())
            .collect();
        println!("\nIntake: incomplete - {}", missing.join(", "));
    }

    Ok(())
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let bank = QuestionBank::standard();
    for section in bank.sections() {
        println!("[{}] {}", section.badge, section.title);
        println!("  {}", section.description);
        for question in &section.questions {
            println!("  {:>4}  {}", question.id, question.text);
        }
        println!();
    }
    Ok(())
}

pub(crate) fn run_meta(config: &AppConfig, args: MetaArgs) -> Result<(), AppError> {
    let field = MetaField::from(args.field);
    let mut store = open_store(config);
    store.set_meta_field(field, args.value.clone());
    println!("{} recorded.", field.label());

    // The intake surface offers fixed option lists for these two; a free-form
    // value still validates but is worth flagging.
    let published: Option<&[&str]> = match field {
        MetaField::Industry => Some(&INDUSTRIES),
        MetaField::Initiative => Some(&INITIATIVES),
        _ => None,
    };
    if let Some(options) = published {
        if !options.contains(&args.value.as_str()) {
            println!("  note: '{}' is not one of the published options:", args.value);
            for option in options {
                println!("    - {option}");
            }
        }
    }

    Ok(())
}

pub(crate) fn run_answer(config: &AppConfig, args: AnswerArgs) -> Result<(), AppError> {
    let bank = QuestionBank::standard();
    let mut store = open_store(config);
    store.set_answer(&bank, &args.question_id, args.rating)?;
    println!("Recorded {} = {}.", args.question_id, args.rating);
    Ok(())
}

pub(crate) async fn run_report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let engine = GeminiInsightEngine::from_config(&config.insight)?;
    let sink = ReqwestWebhookSink::from_config(&config.archive)?;
    let mut session = AssessmentSession::new(
        QuestionBank::standard(),
        JsonFileStore::new(&config.storage.state_path),
        engine,
        sink,
    );

    info!(model = %config.insight.model, "generating executive briefing");
    let insights = match session.generate_report().await {
        Ok(insights) => insights.clone(),
        Err(err) => {
            println!("{}", err.user_message());
            return Ok(());
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&insights) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Briefing unavailable: {err}"),
        }
    } else {
        render_briefing(&insights);
    }

    // The archive dispatch runs detached; give it a moment before the
    // runtime is torn down with the process.
    tokio::time::sleep(Duration::from_secs(2)).await;
    Ok(())
}

pub(crate) async fn run_finalize(config: &AppConfig, args: FinalizeArgs) -> Result<(), AppError> {
    let insights = match args.insights_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Some(decode_insights(&raw)?)
        }
        None => None,
    };

    let store = open_store(config);
    let payload = FinalizePayload {
        state: store.state().clone(),
        insights,
    };

    let sink = ReqwestWebhookSink::from_config(&config.archive)?;
    sink.finalize(payload).await?;
    println!("Strategic audit archived.");
    Ok(())
}

pub(crate) fn run_reset(config: &AppConfig) -> Result<(), AppError> {
    let mut store = open_store(config);
    store.reset();
    println!("Session cleared.");
    Ok(())
}

fn render_briefing(insights: &AiInsights) {
    let snapshot = &insights.executive_snapshot;
    println!("Executive snapshot");
    println!("  Condition: {}", snapshot.organizational_condition);
    println!("  In practice: {}", snapshot.practical_meaning);
    println!("  Leadership risk: {}", snapshot.leadership_risk);
    println!("  Primary focus: {}", snapshot.primary_focus);

    let summary = &insights.client_summary;
    println!("\nClient summary");
    println!("  Readiness index: {:.0}", summary.readiness_index);
    println!("  Dominant pattern: {}", summary.dominant_pattern);
    println!("  Technology position: {}", summary.technology_position.label());
    println!("  Impact: {}", summary.impact_statement);
    println!("  For discussion: {}", summary.discussion_message);

    if !insights.symptoms.is_empty() {
        println!("\nObserved symptoms");
        for symptom in &insights.symptoms {
            println!("  - {symptom}");
        }
    }

    println!("\nFuture state");
    println!("  {}", insights.future_state.outcome);
    for change in &insights.future_state.observable_changes {
        println!("  - {change}");
    }

    let report = &insights.consultant_report;
    println!("\nConsultant view (risk: {})", report.risk_level.label());
    println!("  Execution dependency: {}", report.execution_dependency);
    println!("  Behavior vs. system gap: {}", report.behavior_vs_system_gap);
    println!("  Interpretation: {}", report.behavioral_interpretation);
    for hypothesis in &report.root_cause_hypothesis {
        println!("  - {hypothesis}");
    }
    if let Some(focus) = &report.intervention_focus {
        println!("  Intervention focus: {focus}");
    }
    if let Some(layers) = &report.layer_scores {
        println!("  Layer scores:");
        println!("    corporate strategy {:.1}", layers.corporate_strategy);
        println!("    business strategy {:.1}", layers.business_strategy);
        println!("    operating model {:.1}", layers.operating_model);
        println!("    execution behavior {:.1}", layers.execution_behavior);
        println!("    technology integration {:.1}", layers.technology_integration);
    }
    println!("  Structure vs. effort: {}", report.structure_vs_effort);
    println!("  Scaling stall risk: {}", report.scaling_stall_risk);

    println!("\nStrategic roadmap");
    for initiative in insights.roadmap_by_rank() {
        println!(
            "  {}. [{}] {} - {}",
            initiative.rank,
            initiative.priority.label(),
            initiative.title,
            initiative.impact_area
        );
        println!("     {}", initiative.executive_summary);
        for requirement in &initiative.success_requirements {
            println!("     - {requirement}");
        }
    }
}
