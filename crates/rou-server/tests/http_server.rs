//! End-to-end tests over a real TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use rou_core::RouError;
use rou_server::{Router, Server, ServerConfig, ServerError, ShutdownSignal};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

struct Running {
    addr: SocketAddr,
    shutdown: ShutdownSignal,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl Running {
    async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server should stop")
            .expect("server task should not panic")
            .expect("server should exit cleanly");
    }
}

async fn start(router: Router, config: ServerConfig) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownSignal::new();

    let server = Server::new(config, Arc::new(router));
    let handle = tokio::spawn(server.serve(listener, shutdown.clone()));

    Running {
        addr,
        shutdown,
        handle,
    }
}

fn test_config() -> ServerConfig {
    ServerConfig::builder()
        .shutdown_timeout(Duration::from_millis(500))
        .request_timeout(Duration::from_millis(200))
        .build()
}

fn users_router() -> Router {
    let mut router = Router::new();
    router.get("/users/:id/friends/:name", |ctx| {
        let params = ctx.route_params();
        let body = serde_json::json!({
            "id": params.get("id"),
            "name": params.get("name"),
            "age": ctx.query().get("age"),
        });
        ctx.success_json(&body)
    });
    router.post("/users", |ctx| {
        let user: Value = ctx.parse_json()?;
        ctx.success_json(&user)
    });
    router.delete("/users/:id", |_ctx| {
        Err(RouError::status(StatusCode::FORBIDDEN, "Not allowed"))
    });
    router
}

async fn send(addr: SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf))
        .await
        .expect("response should arrive")
        .unwrap();
    String::from_utf8(buf).unwrap()
}

fn split(response: &str) -> (&str, &str) {
    let (head, body) = response.split_once("\r\n\r\n").unwrap();
    (head, body)
}

#[tokio::test]
async fn test_get_with_params_and_query() {
    let running = start(users_router(), test_config()).await;

    let response = send(
        running.addr,
        "GET /users/10/friends/melony?name=Joe&age=48 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    let (head, body) = split(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    assert!(head.to_ascii_lowercase().contains("content-type: application/json"));
    let json: Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["error"], Value::Null);
    assert_eq!(json["body"]["id"], "10");
    assert_eq!(json["body"]["name"], "melony");
    assert_eq!(json["body"]["age"], "48");

    running.stop().await;
}

#[tokio::test]
async fn test_post_body_reaches_handler() {
    let running = start(users_router(), test_config()).await;

    let payload = r#"{"name":"Joe"}"#;
    let raw = format!(
        "POST /users HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        payload.len()
    );
    let response = send(running.addr, &raw).await;
    let (head, body) = split(&response);

    assert!(head.starts_with("HTTP/1.1 200 OK"), "{head}");
    assert_eq!(body, r#"{"error":null,"body":{"name":"Joe"}}"#);

    running.stop().await;
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let running = start(users_router(), test_config()).await;

    let raw = "POST /users HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\nConnection: close\r\n\r\n{oops";
    let response = send(running.addr, raw).await;
    let (head, body) = split(&response);

    assert!(head.starts_with("HTTP/1.1 400"), "{head}");
    assert_eq!(
        body,
        r#"{"error":{"message":"Request body is not valid","code":400},"body":null}"#
    );

    running.stop().await;
}

#[tokio::test]
async fn test_not_found_and_method_not_allowed() {
    let running = start(users_router(), test_config()).await;

    let response = send(
        running.addr,
        "GET /nothing HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    let (head, body) = split(&response);
    assert!(head.starts_with("HTTP/1.1 404"), "{head}");
    assert_eq!(
        body,
        r#"{"error":{"message":"Page not found","code":404},"body":null}"#
    );

    let response = send(
        running.addr,
        "PUT /users HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;
    let (head, body) = split(&response);
    assert!(head.starts_with("HTTP/1.1 405"), "{head}");
    assert_eq!(
        body,
        r#"{"error":{"message":"Method not allowed","code":405},"body":null}"#
    );

    running.stop().await;
}

#[tokio::test]
async fn test_handler_error_status() {
    let running = start(users_router(), test_config()).await;

    let response = send(
        running.addr,
        "DELETE /users/3 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;
    let (head, body) = split(&response);

    assert!(head.starts_with("HTTP/1.1 403"), "{head}");
    assert_eq!(
        body,
        r#"{"error":{"message":"Not allowed","code":403},"body":null}"#
    );

    running.stop().await;
}

#[tokio::test]
async fn test_slow_body_times_out() {
    let running = start(users_router(), test_config()).await;

    // Promises ten bytes, sends three, keeps the socket open.
    let raw = "POST /users HTTP/1.1\r\nHost: localhost\r\nContent-Length: 10\r\nConnection: close\r\n\r\n{\"a";
    let response = send(running.addr, raw).await;
    let (head, body) = split(&response);

    assert!(head.starts_with("HTTP/1.1 408"), "{head}");
    assert_eq!(
        body,
        r#"{"error":{"message":"Request timeout","code":408},"body":null}"#
    );

    running.stop().await;
}

#[tokio::test]
async fn test_keep_alive_serves_sequential_requests() {
    let running = start(users_router(), test_config()).await;

    let mut stream = TcpStream::connect(running.addr).await.unwrap();
    stream
        .write_all(b"GET /users/1/friends/a HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    stream
        .write_all(b"GET /users/2/friends/b HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut buf = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut buf))
        .await
        .expect("responses should arrive")
        .unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(text.matches("HTTP/1.1 200 OK").count(), 2);
    assert!(text.contains(r#""id":"1""#));
    assert!(text.contains(r#""id":"2""#));

    running.stop().await;
}

#[tokio::test]
async fn test_shutdown_with_idle_server() {
    let running = start(Router::new(), test_config()).await;
    assert!(!running.handle.is_finished());
    running.stop().await;
}
