use roster_app::AppError;
use roster_core::RosterConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    roster_core::init_tracing();

    let config = RosterConfig::load("dev")?;
    tracing::info!(profile = config.profile(), "configuration loaded");

    let state = roster_app::build_state(config).await?;
    let addr = state.server.addr.clone();
    roster_app::builder(state).serve(&addr).await?;
    Ok(())
}
