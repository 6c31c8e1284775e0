use anyhow::Context;
use contact_relay::{router, AppState, ContactConfig, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server = ServerConfig::from_env()?;
    let contact = ContactConfig::from_env();
    log::info!(
        "[relay] site root {}, key {}, to {}, from {}",
        server.site_root.display(),
        if contact.api_key.is_some() { "configured" } else { "MISSING" },
        contact.contact_to,
        contact.contact_from
    );
    if contact.api_key.is_none() {
        log::warn!("[relay] contact submissions will fail until RESEND_API_KEY is set");
    }

    let state = AppState::new(contact)?;
    log::info!("[relay] forwarding to {}", state.resend.endpoint());
    let app = router(state, &server.site_root);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server.port))
        .await
        .with_context(|| format!("binding port {}", server.port))?;
    log::info!("[relay] listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("[relay] ctrl-c handler failed: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("[relay] shutting down");
}
