//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; menu queries and cart rules live in the services.

use dotenv::dotenv;
use indicatif::ProgressBar;
use qrmenu::adapters::http::{CachedMenuSource, HttpMenuSource};
use qrmenu::adapters::messaging::WhatsAppMessenger;
use qrmenu::adapters::persistence::CartJson;
use qrmenu::adapters::ui::tui::Tui;
use qrmenu::ports::{CartStore, InputPort, MenuSource, MessengerPort};
use qrmenu::usecases::{CartService, MenuService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }

    qrmenu::adapters::ui::init_ui();

    let cfg = qrmenu::shared::config::AppConfig::load().unwrap_or_default();
    let menu_url = cfg.menu_url.clone().unwrap_or_default();
    if menu_url.is_empty() {
        anyhow::bail!("Set QRMENU_MENU_URL (env or .env) to the hosted menu.json URL");
    }

    let data_dir = PathBuf::from(cfg.data_dir_or_default());
    let cart_path = data_dir.join("cart.json");
    let snapshot_path = data_dir.join("menu.cache.json");

    // --- Menu source: HTTP, wrapped by the offline snapshot when enabled ---
    let http_source: Arc<dyn MenuSource> = Arc::new(
        HttpMenuSource::new(
            &menu_url,
            Duration::from_secs(cfg.http_timeout_secs_or_default()),
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    let source: Arc<dyn MenuSource> = if cfg.offline_cache_enabled() {
        let cached = CachedMenuSource::new(Arc::clone(&http_source), &snapshot_path);
        cached.register().await;
        Arc::new(cached)
    } else {
        http_source
    };

    // --- Cart: storage adapter + service, restore the persisted cart ---
    let store: Arc<dyn CartStore> = Arc::new(CartJson::new(&cart_path));
    let cart_service = Arc::new(CartService::new(store));
    cart_service.restore().await;

    // --- Menu: single load attempt; failure is terminal for the session ---
    let menu_service = Arc::new(MenuService::new(source));
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Fetching menu…");
    let loaded = menu_service.load().await;
    spinner.finish_and_clear();
    if let Err(e) = loaded {
        eprintln!("Error loading menu: {}", e);
        anyhow::bail!("{}", e);
    }

    let messenger: Arc<dyn MessengerPort> = Arc::new(WhatsAppMessenger);

    // --- Run (main menu -> browse / cart / checkout) ---
    let input_port: Arc<dyn InputPort> = Arc::new(Tui::new(
        Arc::clone(&menu_service),
        Arc::clone(&cart_service),
        messenger,
        menu_url,
    ));
    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
