mod cli;
mod commands;

use alignment_audit::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
