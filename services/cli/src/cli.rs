use crate::commands::{
    run_answer, run_finalize, run_meta, run_questions, run_report, run_reset, run_status,
    AnswerArgs, FinalizeArgs, MetaArgs, ReportArgs, StatusArgs,
};
use alignment_audit::{telemetry, AppConfig, AppError};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Strategic Alignment Audit",
    about = "Run the strategic alignment diagnostic from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show progress, section scores, and intake validation (default command)
    Status(StatusArgs),
    /// List the assessment sections and their questions
    Questions,
    /// Record one engagement intake field
    Meta(MetaArgs),
    /// Record a 1-5 rating for a question
    Answer(AnswerArgs),
    /// Generate the executive briefing from the recorded ratings
    Report(ReportArgs),
    /// Archive the full session state to the configured endpoint
    Finalize(FinalizeArgs),
    /// Discard all recorded data and start over
    Reset,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Status(StatusArgs::default()));

    match command {
        Command::Status(args) => run_status(&config, args),
        Command::Questions => run_questions(),
        Command::Meta(args) => run_meta(&config, args),
        Command::Answer(args) => run_answer(&config, args),
        Command::Report(args) => run_report(&config, args).await,
        Command::Finalize(args) => run_finalize(&config, args).await,
        Command::Reset => run_reset(&config),
    }
}
