// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use acc_4d_server::{config::Config, router, AppState};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,tower_http=debug,acc_4d_server=debug".into()),
        )
        .pretty()
        .init();

    let config = Config::from_env();

    tracing::info!(
        port = config.port,
        aps_base_url = %config.aps_base_url,
        has_credentials = config.has_credentials(),
        has_ai_key = config.stability_api_key.is_some(),
        "Starting ACC-4D Server"
    );

    if !config.has_credentials() {
        tracing::warn!(
            "APS credentials not configured; set APS_CLIENT_ID and APS_CLIENT_SECRET"
        );
    }

    let port = config.port;
    let app = router(AppState::new(config));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
