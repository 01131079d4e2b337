//! Script replay command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::warn;

use mockloc::provider::{CallbackRef, DeliveryContext, FixedProvider, LocationProvider, UpdateRequest};
use mockloc::replay::{ReplayConfig, ReplayDriver, ReplayScript};
use mockloc::router::OverrideRouter;

use crate::error::CliError;

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the replay script (JSON)
    pub script: PathBuf,

    /// Restart the script from the beginning when it ends
    #[arg(long = "loop")]
    pub looping: bool,

    /// Suppress per-fix output
    #[arg(long, short)]
    pub quiet: bool,
}

/// Run a script through an override router, printing delivered fixes.
pub async fn run(args: ReplayArgs) -> Result<(), CliError> {
    let script = ReplayScript::from_path(&args.script)?;
    if script.is_empty() {
        return Err(CliError::EmptyScript(args.script.display().to_string()));
    }

    // The first scripted fix doubles as the fallback position, so output
    // after the replay ends stays plausible.
    let fallback_fix = script.fixes()[0].position.clone();
    let fallback = Arc::new(FixedProvider::new(fallback_fix));
    let router = Arc::new(OverrideRouter::new(
        fallback as Arc<dyn LocationProvider>,
    ));

    let quiet = args.quiet;
    router.request_updates(
        &UpdateRequest::default(),
        CallbackRef::from_fn(move |update| {
            if quiet {
                return;
            }
            if let Some(position) = update.last() {
                println!(
                    "{:.6},{:.6}{}",
                    position.latitude,
                    position.longitude,
                    position
                        .speed
                        .map(|s| format!(",{:.1}", s))
                        .unwrap_or_default()
                );
            }
        }),
        DeliveryContext::default(),
    );

    let driver = ReplayDriver::new(
        script,
        Arc::clone(&router),
        ReplayConfig {
            looping: args.looping,
        },
    );

    let token = driver.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            warn!("Failed to install Ctrl-C handler");
            return;
        }
        token.cancel();
    });

    driver.run().await;
    Ok(())
}
