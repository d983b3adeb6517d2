//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use site_router::config::{AdminConfig, RouteConfig, SiteConfig, SiteRouterConfig};
use site_router::http::HttpServer;
use site_router::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

pub const ADMIN_KEY: &str = "test-admin-key";

/// The two-site shop setup: Finnish unprefixed, English under `/en`.
pub fn shop_config() -> SiteRouterConfig {
    let mut config = SiteRouterConfig::default();
    config.i18n.default_locale = "fi".into();
    config.i18n.allowed_locales = Some(vec!["fi".into(), "en".into()]);
    config.sites = vec![
        SiteConfig {
            locale: "fi".into(),
            path_prefix: String::new(),
            base_url: Some("https://entropy.fi".into()),
        },
        SiteConfig {
            locale: "en".into(),
            path_prefix: "/en".into(),
            base_url: Some("https://entropy.fi".into()),
        },
    ];
    config.routes = vec![
        route("entropy_event_shop.fi", "/{year}/{slug}/kauppa"),
        route("entropy_event_shop.en", "/en/{year}/{slug}/shop"),
        route("events.fi", "/tapahtumat"),
        route("events.en", "/en/events"),
        route("alpha.internal", "/internal/alpha"),
    ];
    config.admin = AdminConfig {
        enabled: true,
        api_key: ADMIN_KEY.into(),
    };
    config
}

pub fn route(name: &str, path: &str) -> RouteConfig {
    RouteConfig {
        name: name.into(),
        path: path.into(),
        defaults: Default::default(),
    }
}

/// Boot the server on `addr`. Returns the config update sender and the
/// shutdown handle; dropping the sender just disables reloads.
pub async fn start_server(
    addr: SocketAddr,
    mut config: SiteRouterConfig,
) -> (mpsc::UnboundedSender<SiteRouterConfig>, Shutdown) {
    config.listener.bind_address = addr.to_string();
    let listener = TcpListener::bind(addr).await.unwrap();
    let server = HttpServer::new(config).unwrap();

    let (tx, rx) = mpsc::unbounded_channel();
    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx, shutdown_rx).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (tx, shutdown)
}

/// Client that never follows redirects, so a 3xx would be visible.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
