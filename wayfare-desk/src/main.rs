use wayfare_desk::{app_config::Config, session, AppState, DeskError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_desk=debug,wayfare_booking=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        let code = e
            .downcast_ref::<DeskError>()
            .map(DeskError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load().map_err(DeskError::from)?;
    let draft_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.session.draft_path.clone());

    tracing::info!("Starting booking session from {}", draft_path);

    let state = AppState::from_config(&config)?;
    let draft = session::load_draft(&draft_path)?;
    let report = session::run_session(&state, draft).await?;

    tracing::info!(
        "Session {} finished on step {} with total {} {}",
        report.session_id,
        report.final_step,
        report.total_price,
        report.breakdown.currency
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
