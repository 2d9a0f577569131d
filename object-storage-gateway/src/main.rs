/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use object_storage_gateway::error::BoxError;
use object_storage_gateway::server::{self, AppState};
use object_storage_gateway::Session;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn env_port() -> Result<u16, BoxError> {
    match std::env::var("GATEWAY_PORT") {
        Ok(raw) => Ok(raw.parse()?),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

fn env_request_timeout() -> Result<Duration, BoxError> {
    match std::env::var("GATEWAY_REQUEST_TIMEOUT") {
        Ok(raw) => Ok(Duration::from_secs(raw.parse()?)),
        Err(_) => Ok(DEFAULT_REQUEST_TIMEOUT),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let port = env_port()?;
    let request_timeout = env_request_timeout()?;

    let config = object_storage_gateway::from_env().load().await?;
    let session = Session::new(config);
    tracing::info!(bucket = session.config().bucket(), "session established");

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    server::serve(listener, AppState::new(session, request_timeout)).await
}
