use std::sync::Arc;
use terminal::services::{ApiClient, ClientConfig};
use terminal::ui::theme::Theme;
use terminal::App;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ClientConfig::from_env();
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout.as_secs(),
        authenticated = config.token.is_some(),
        "Starting chat terminal"
    );

    let token = config.token.clone();
    let service = match ApiClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!(error = %e, "Could not build the HTTP client");
            return Err(e.into());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chat")
            .with_inner_size([520.0, 720.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Chat",
        options,
        Box::new(move |cc| {
            Theme::default().apply(&cc.egui_ctx);
            Ok(Box::new(App::new(service, token)))
        }),
    )?;
    Ok(())
}
