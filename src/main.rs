//! Staff Admin - desktop admin for employee records.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eframe::egui;
use staff_admin as app;

use app::config::{AppConfig, ConfigLoadResult};
use app::notify::Notifier;
use app::service::HttpEmployeeService;
use app::ui::App;

/// Desktop admin for employee records.
#[derive(Parser)]
#[command(name = "staff-admin")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the API base URL for this run
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Staff Admin starting...");

    // Determine config path based on mode
    let config_path = match cli.config {
        Some(path) => path,
        None if cli.dev => {
            tracing::info!("Dev mode: loading config from current directory");
            PathBuf::from("config.toml")
        }
        None => AppConfig::default_path(),
    };
    tracing::info!("Config path: {:?}", config_path);

    // Shown as the first toasts once the window opens
    let mut notices = Notifier::new();

    let mut config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults");
            let config = AppConfig::default();
            match config.save(&config_path) {
                Ok(()) => {
                    notices.info(format!("Created default config at {}", config_path.display()));
                }
                Err(e) => tracing::warn!("Failed to save default config: {}", e),
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid: {}", e);
            notices.error(e.to_string());
            AppConfig::default()
        }
    };

    if let Some(url) = cli.api_url {
        let mut overridden = config.clone();
        overridden.api.base_url = url;
        match overridden.validate() {
            Ok(()) => config = overridden,
            Err(e) => {
                tracing::warn!("Ignoring --api-url: {}", e);
                notices.error(e.to_string());
            }
        }
    }
    tracing::info!("API: {}", config.api.base_url);

    run_main_app(config, notices)
}

/// Build the backend client, falling back to the default API settings.
fn connect(config: AppConfig, notices: &mut Notifier) -> (AppConfig, HttpEmployeeService) {
    match HttpEmployeeService::new(&config.api) {
        Ok(service) => (config, service),
        Err(e) => {
            tracing::warn!("Falling back to default API settings: {}", e);
            notices.report(&e);
            let fallback = AppConfig {
                api: Default::default(),
                ..config
            };
            let service = HttpEmployeeService::new(&fallback.api).expect("Failed to build HTTP client");
            (fallback, service)
        }
    }
}

/// Run the main application.
fn run_main_app(config: AppConfig, mut notices: Notifier) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Staff Admin")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let (config, service) = connect(config, &mut notices);

    eframe::run_native(
        "Staff Admin",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(config, Arc::new(service), rt, notices)))
        }),
    )
}
