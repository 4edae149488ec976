use service::routes::create_app;
use service::settings::Settings;
use service::state::ServiceCollection;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), &'static str> {
    let subscriber = tracing_subscriber::fmt().json().finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|_| "Could not init tracing.")?;

    let settings = Settings::from_env();
    info!(
        "navigation waits for {} up to {}s, at most {} concurrent browsers",
        settings.browser.wait_until.lifecycle_event(),
        settings.browser.navigation_timeout.as_secs(),
        settings.browser.max_concurrent_browsers
    );

    let services = ServiceCollection::build(settings.browser.clone());
    let app = create_app(services, settings.request_timeout, settings.max_body_bytes);

    let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)), settings.port);
    info!("listening on {}", &addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|_| "Server stopped unexpectedly.")
}
