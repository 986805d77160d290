use std::process::ExitCode;

use chunab::{configuration::get_configuration, services::SyncOutcome, startup::build_job};
use env_logger::Env;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match try_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Always reaches stderr, whatever RUST_LOG filters.
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main() -> anyhow::Result<()> {
    let settings = get_configuration()?;
    let job = build_job(&settings)?;

    match job.run().await? {
        SyncOutcome::Skipped { hash } => log::info!("Up to date at {}", hash),
        SyncOutcome::Published { hash, post_id } => log::info!(
            "Published post {} and stored hash {}",
            post_id.as_deref().unwrap_or("<unknown>"),
            hash
        ),
    }

    Ok(())
}
