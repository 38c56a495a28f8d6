pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod controller;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let serving = matches!(cli.command, Some(Commands::Serve));
    init_tracing(&config, serving)?;

    let Some(command) = cli.command else {
        print_help();
        return Ok(());
    };

    match command {
        Commands::Serve => {
            let prometheus_handle = if config.observability.metrics_enabled {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("Failed to install Prometheus recorder")?;
                info!("Prometheus metrics recorder initialized");
                Some(handle)
            } else {
                None
            };
            run_server(config, prometheus_handle).await
        }
        Commands::List => cli::cmd_list_listings(&config).await,
        Commands::Search { query } => cli::cmd_search_listings(&config, &query.join(" ")).await,
        Commands::Add { fields } => cli::cmd_add_listing(&config, &fields).await,
        Commands::Browse => cli::cmd_browse(&config).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("Created config.toml");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }
    }
}

/// Log lines go to stderr so command output on stdout stays clean. Loki is
/// only attached for the server.
fn init_tracing(config: &Config, serving: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if serving {
        config.general.log_level.clone()
    } else {
        "warn".to_string()
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if serving && config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "mobilestore")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    Ok(())
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("mobilestore v{} starting...", env!("CARGO_PKG_VERSION"));

    let port = config.server.port;
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    info!(
        "Catalog ready with {} listings",
        state.store().product_count().await?
    );

    let app = api::router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server running at http://0.0.0.0:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

fn print_help() {
    println!(
        r#"mobilestore v{} - Mobile phone catalog

USAGE:
    mobilestore <COMMAND> [ARGS]

COMMANDS:
    serve                   Start the catalog API server
    list                    List every listing
    search <query>          Search listings (max 5 results)
    add <field=value>...    Add a listing
    browse                  Interactive search with live suggestions
    init                    Create default config.toml
    help                    Show this help

ENVIRONMENT:
    PORT                    Server port (default 5000)
    MOBILESTORE_API_URL     Server URL used by list, search, add and browse
    RUST_LOG                Log filter

EXAMPLES:
    mobilestore serve
    mobilestore search galaxy
    mobilestore add brand=Apple "model=iPhone 15" storage=128 price=79900
"#,
        env!("CARGO_PKG_VERSION")
    );
}
