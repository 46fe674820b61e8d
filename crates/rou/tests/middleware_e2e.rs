//! Global and per-route middleware through the in-process test client.

use std::sync::{Arc, Mutex};

use http::header::AUTHORIZATION;
use http::{HeaderName, StatusCode};
use rou::middleware::stages::REQUEST_ID_HEADER;
use rou::middleware::FnMiddleware;
use rou::prelude::*;
use rou_test::TestClient;
use serde_json::json;

const AUTH_ERROR: &str = "Authorization header should be provided";
const REQUEST_DATA_ERROR: &str = "X-Request-Data header should be provided";

fn require_text(header: &'static str, message: &'static str) -> impl Middleware {
    let name = HeaderName::from_static(header);
    FnMiddleware::new(
        "require_text",
        move |writer: &mut ResponseWriter, request: &Request| {
            if request.headers().contains_key(&name) {
                return true;
            }
            writer.write_header(StatusCode::UNAUTHORIZED);
            writer.write_str(message);
            false
        },
    )
}

fn guarded_router() -> Router {
    let mut router = Router::new();
    router.use_middleware(require_text("authorization", AUTH_ERROR));

    router
        .get("/users/:id", |ctx| {
            let id = ctx.route_params().get("id").unwrap_or_default().to_string();
            ctx.success_json(&id)
        })
        .middleware(require_text("x-request-data", REQUEST_DATA_ERROR));

    router.get("/public", |ctx| ctx.success_json(&"open"));
    router
}

#[test]
fn test_global_middleware_halts_before_route() {
    let client = TestClient::new(guarded_router());

    client
        .get("/users/1")
        .header("X-Request-Data", "x")
        .send()
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_body_eq(AUTH_ERROR)
        .assert_outcome(DispatchOutcome::HaltedGlobal);
}

#[test]
fn test_global_middleware_runs_for_unknown_paths() {
    let client = TestClient::new(guarded_router());

    client.get("/nowhere").send().assert_body_eq(AUTH_ERROR);
    client
        .get("/nowhere")
        .header("Authorization", "token")
        .send()
        .assert_error(StatusCode::NOT_FOUND, "Page not found");
}

#[test]
fn test_route_middleware_halts() {
    let client = TestClient::new(guarded_router());

    client
        .get("/users/1")
        .header("Authorization", "token")
        .send()
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_body_eq(REQUEST_DATA_ERROR)
        .assert_outcome(DispatchOutcome::HaltedRoute);
}

#[test]
fn test_route_middleware_is_scoped_to_its_route() {
    let client = TestClient::new(guarded_router());

    client
        .get("/public")
        .header("Authorization", "token")
        .send()
        .assert_success_body(&json!("open"));
}

#[test]
fn test_all_middleware_pass() {
    let client = TestClient::new(guarded_router())
        .with_default_header("Authorization", "token")
        .with_default_header("X-Request-Data", "x");

    client
        .get("/users/42")
        .send()
        .assert_status(StatusCode::OK)
        .assert_success_body(&json!("42"))
        .assert_outcome(DispatchOutcome::Handled);
}

#[test]
fn test_execution_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut router = Router::new();

    for label in ["global-1", "global-2"] {
        let log = Arc::clone(&log);
        router.use_middleware(from_fn(move |_w, _r| {
            log.lock().unwrap().push(label);
            true
        }));
    }

    let handler_log = Arc::clone(&log);
    let first = Arc::clone(&log);
    let second = Arc::clone(&log);
    router
        .get("/ordered", move |ctx| {
            handler_log.lock().unwrap().push("handler");
            ctx.success_json(&"done")
        })
        .middleware(from_fn(move |_w, _r| {
            first.lock().unwrap().push("route-1");
            true
        }))
        .middleware(from_fn(move |_w, _r| {
            second.lock().unwrap().push("route-2");
            true
        }));

    TestClient::new(router).get("/ordered").send().assert_status(StatusCode::OK);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["global-1", "global-2", "route-1", "route-2", "handler"]
    );
}

#[test]
fn test_builtin_stages() {
    let mut router = Router::new();
    router.use_middleware(RequestLog::new());
    router.use_middleware(RequestId::new());
    router
        .get("/me", |ctx| ctx.success_json(&"me"))
        .middleware(
            RequireHeader::new(AUTHORIZATION, AUTH_ERROR).with_status(StatusCode::UNAUTHORIZED),
        );

    let client = TestClient::new(router);

    let denied = client.get("/me").send();
    denied
        .assert_error(StatusCode::UNAUTHORIZED, AUTH_ERROR)
        .assert_outcome(DispatchOutcome::HaltedRoute);
    assert!(denied.header(REQUEST_ID_HEADER).is_some());

    let allowed = client.get("/me").bearer_token("abc").send();
    allowed.assert_success_body(&json!("me"));
    let id = allowed.header_str(REQUEST_ID_HEADER).unwrap();
    assert_eq!(id.len(), 36);
}
