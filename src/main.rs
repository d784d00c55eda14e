use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use eps_tracker::{AppState, build_router, config::Config, portal::EpsPortal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置，缺失项全部退回默认值
    let config = Config::load();
    if config.username.is_empty() {
        tracing::warn!("No portal username configured, upstream login will fail");
    }

    // 建立上游会话，整个进程共享一份 cookie jar
    let portal =
        EpsPortal::new(&config.username, &config.password).expect("Failed to create HTTP client");

    let state = AppState::new(config, Arc::new(portal));
    let app = build_router(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
