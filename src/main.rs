//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/students
//!   curl -X POST http://localhost:3000/students \
//!        -H 'content-type: application/json' -d '{"name":"Zoya"}'
//!   curl -X PUT http://localhost:3000/students/2 \
//!        -H 'content-type: application/json' -d '{"name":"Aarav K."}'
//!   curl -X DELETE http://localhost:3000/students/1

use std::process::ExitCode;
use std::sync::Arc;

use roster::{Config, Server, StudentService, api, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), roster::Error> {
    let config = Config::from_env()?;
    info!(id_policy = %config.id_policy, seed = config.seed, "starting roster");

    let service = Arc::new(StudentService::new(config.store()));
    Server::bind(config.addr).await?.serve(api::router(service)).await
}
