pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod leads;
pub mod listing;
pub mod state;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

pub async fn run() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("INKWELL_LOG"))
        .init();

    let config = Config::from_env()?;

    let items = content::load_dir(&config.content_dir)?;
    let store = content::ContentStore::new(items)?;
    tracing::info!(
        dir = %config.content_dir.display(),
        items = store.all_items().len(),
        "content store loaded"
    );

    let app = AppState::new(store, &config);

    api::run_server(app, &config.listen_addr).await?;
    Ok(())
}
