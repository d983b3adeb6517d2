//! site-router
//!
//! Serves and inspects locale-partitioned route tables.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌───────────────────────────────────────────────────────┐
//!                  │                     SITE ROUTER                        │
//!                  │                                                        │
//!  site-router.toml│  ┌─────────┐    ┌─────────────┐    ┌───────────────┐  │
//!  ────────────────┼─▶│ config  │───▶│ partitioner │───▶│ per-locale    │  │
//!                  │  │ +watcher│    │ (aliases)   │    │ matchers      │  │
//!                  │  └─────────┘    └─────────────┘    └───────┬───────┘  │
//!                  │                                            │ ArcSwap  │
//!   Request        │  ┌─────────┐    ┌─────────────┐    ┌───────▼───────┐  │
//!  ────────────────┼─▶│  http   │───▶│ site (path  │───▶│ SiteAware     │  │
//!   JSON / 404     │  │ server  │◀───│ → locale)   │◀───│ Router        │  │
//!  ◀───────────────┼──└─────────┘    └─────────────┘    └───────────────┘  │
//!                  │                                                        │
//!                  │  admin API · observability · lifecycle                 │
//!                  └───────────────────────────────────────────────────────┘
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use site_router::config::{SiteRouterConfig, load_config};
use site_router::config::watcher::ConfigWatcher;
use site_router::http::HttpServer;
use site_router::lifecycle::{Shutdown, signals};
use site_router::observability::{logging, metrics};
use site_router::routing::{LOCALE_PARAM, Parameters, ReferenceType, SiteAwareRouter, SiteResolver};

#[derive(Parser)]
#[command(name = "site-router")]
#[command(about = "Locale-aware route partitioning and matching for multisite web applications", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "site-router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve route resolution over HTTP (default)
    Serve,
    /// Print locales, aliases and per-locale collections
    Routes,
    /// Generate a URL for a route
    Generate {
        /// Base or fully-qualified route name
        route: String,
        /// Target locale; defaults to the default site
        #[arg(short, long)]
        locale: Option<String>,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Emit an absolute URL using the site's base_url
        #[arg(long)]
        absolute: bool,
    },
    /// Resolve a request path
    Match {
        path: String,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init_logging(&config.observability);

    tracing::debug!(
        path = ?cli.config,
        routes = config.routes.len(),
        sites = config.sites.len(),
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve(cli.config, config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes => {
            let router = SiteAwareRouter::from_config(&config)?;
            print_routes(&router);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Generate { route, locale, params, absolute } => {
            let router = SiteAwareRouter::from_config(&config)?;
            let mut params: Parameters = params.into_iter().collect();
            if let Some(locale) = locale {
                params.insert(LOCALE_PARAM.to_string(), locale);
            }
            let reference = if absolute {
                ReferenceType::AbsoluteUrl
            } else {
                ReferenceType::AbsolutePath
            };
            let url = router.generate_for(router.sites(), &route, &params, reference)?;
            println!("{url}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { path } => {
            let router = SiteAwareRouter::from_config(&config)?;
            match router.match_path(&path) {
                Some(matched) => {
                    println!("{}", serde_json::to_string_pretty(&matched)?);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!(
                        "No route matches {} (locale {})",
                        path,
                        router.sites().locale_for_path(&path)
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn serve(config_path: PathBuf, config: SiteRouterConfig) -> Result<(), Box<dyn Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_locale = %config.i18n.default_locale,
        request_timeout_secs = config.timeouts.request_secs,
        "site-router v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let (watcher, config_updates) = ConfigWatcher::new(&config_path);
    let _watcher = match watcher.run() {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "Config hot reload disabled");
            None
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(router: &SiteAwareRouter) {
    let partitioner = router.partitioner();

    println!("default locale: {}", router.sites().default_locale());
    println!("locales: {}", partitioner.locales().join(", "));

    println!("\nneutral:");
    for route in partitioner.neutral_collection() {
        println!("  {:<40} {}", route.name(), route.path());
    }

    for locale in partitioner.locales() {
        let Some(collection) = partitioner.locale_collection(locale) else {
            continue;
        };
        println!("\n[{locale}] ({} routes)", collection.len());
        for route in collection {
            println!("  {:<40} {}", route.name(), route.path());
        }
    }

    println!("\naliases:");
    for (base, locale, full) in partitioner.aliases() {
        println!("  {base} ({locale}) -> {full}");
    }
}
