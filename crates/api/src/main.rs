use anyhow::Context;

use contactbook_api::{app, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    contactbook_observability::init_with(config.log_format);

    let services = app::build_services(&config)
        .await
        .context("failed to initialize contact store")?;
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        timeout_secs = config.store_timeout.as_secs(),
        id_policy = ?config.id_policy,
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, router).await?;
    Ok(())
}
