mod cli;
mod demo;
mod infra;
mod quote;
mod routes;
mod server;

use lease_pricing::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
