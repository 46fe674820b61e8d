//! A small user directory served over HTTP.
//!
//! ```text
//! cargo run -p rou --example users
//! curl -H 'Authorization: x' localhost:8080/users/1/friends/melony?age=48
//! ```
//!
//! Configuration comes from `rou.toml` (optional) and `ROU__SECTION__KEY`
//! environment variables.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::Context as _;
use http::header::AUTHORIZATION;
use http::StatusCode;
use rou::prelude::*;
use rou::telemetry::{init_telemetry, render_metrics};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
}

type Store = Arc<RwLock<HashMap<String, User>>>;

fn build_router(store: &Store) -> Router {
    let mut router = Router::new();
    router.use_middleware(RequestId::new());
    router.use_middleware(RequestLog::new());

    router.get("/metrics", |ctx| {
        let body = render_metrics().unwrap_or_default();
        ctx.response_writer().write_str(&body);
        Ok(())
    });

    let users = Arc::clone(store);
    router.get("/users/:id", move |ctx| {
        let id = ctx.route_params().get("id").unwrap_or_default();
        let user = users
            .read()
            .map_err(|_| RouError::internal("user store poisoned"))?
            .get(id)
            .cloned();
        match user {
            Some(user) => ctx.success_json(&user),
            None => ctx.error_json(StatusCode::NOT_FOUND, "User not found"),
        }
    });

    let users = Arc::clone(store);
    router
        .post("/users/:id", move |ctx| {
            let id = ctx.route_params().get("id").unwrap_or_default().to_string();
            let user: User = ctx.parse_json()?;
            users
                .write()
                .map_err(|_| RouError::internal("user store poisoned"))?
                .insert(id, user.clone());
            ctx.response_writer().write_header(StatusCode::CREATED);
            ctx.success_json(&user)
        })
        .middleware(
            RequireHeader::new(AUTHORIZATION, "Authorization header should be provided")
                .with_status(StatusCode::UNAUTHORIZED),
        );

    router
        .get("/users/:id/friends/:name", |ctx| {
            let friend = ctx.route_params().get("name").unwrap_or_default().to_string();
            let age = ctx.query().get("age").map(str::to_string);
            ctx.success_json(&serde_json::json!({ "friend": friend, "age": age }))
        })
        .middleware(
            RequireHeader::new(AUTHORIZATION, "Authorization header should be provided")
                .with_status(StatusCode::UNAUTHORIZED),
        );

    router
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_development()
        .with_optional_file("rou.toml")?
        .with_env_prefix("ROU")
        .load()
        .context("loading configuration")?;

    init_telemetry(&TelemetryConfig::from(&config)).context("initializing telemetry")?;

    let store: Store = Arc::default();
    let router = build_router(&store);
    tracing::info!(routes = router.table().len(), "routes registered");

    Server::new(ServerConfig::from(&config.server), Arc::new(router))
        .run()
        .await
        .context("serving")?;
    Ok(())
}
