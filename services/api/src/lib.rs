mod cli;
mod decisions;
mod demo;
mod infra;
mod routes;
mod server;

use recrutement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
