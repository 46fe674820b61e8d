//! Chain integration tests combining the built-in stages.

use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::{HeaderName, StatusCode};
use rou_core::{Request, ResponseWriter};
use rou_middleware::stages::{RequestId, RequestLog, RequireHeader, REQUEST_ID_HEADER};
use rou_middleware::{from_fn, Chain};

const AUTH_ERROR: &str = "Authorization header should be provided";
const REQUEST_DATA_ERROR: &str = "X-Request-Data header should be provided";

fn guarded_chain() -> Chain {
    let mut chain = Chain::new();
    chain.push(RequestLog::new());
    chain.push(RequestId::new());
    chain.push(RequireHeader::new(AUTHORIZATION, AUTH_ERROR).with_status(StatusCode::UNAUTHORIZED));
    chain.push(RequireHeader::new(
        HeaderName::from_static("x-request-data"),
        REQUEST_DATA_ERROR,
    ));
    chain
}

fn make_request(headers: &[(&str, &str)]) -> Request {
    let mut builder = http::Request::builder().uri("/users");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Bytes::new()).unwrap()
}

fn error_message(writer: &ResponseWriter) -> String {
    let body: serde_json::Value = serde_json::from_slice(writer.body()).unwrap();
    body["error"]["message"].as_str().unwrap().to_string()
}

#[test]
fn test_first_guard_rejects() {
    let chain = guarded_chain();
    let mut writer = ResponseWriter::new();

    assert!(!chain.run(&mut writer, &make_request(&[])));
    assert_eq!(writer.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&writer), AUTH_ERROR);
    // Stages before the halt still ran.
    assert!(writer.headers().contains_key(REQUEST_ID_HEADER));
}

#[test]
fn test_second_guard_rejects() {
    let chain = guarded_chain();
    let mut writer = ResponseWriter::new();

    assert!(!chain.run(&mut writer, &make_request(&[("Authorization", "secret key")])));
    assert_eq!(writer.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&writer), REQUEST_DATA_ERROR);
}

#[test]
fn test_all_guards_pass() {
    let chain = guarded_chain();
    let mut writer = ResponseWriter::new();
    let request = make_request(&[
        ("Authorization", "secret key"),
        ("X-Request-Data", "request data"),
    ]);

    assert!(chain.run(&mut writer, &request));
    assert!(!writer.is_committed());
    assert!(writer.body().is_empty());
}

#[test]
fn test_closure_middleware_writes_plain_text() {
    let mut chain = Chain::new();
    chain.push(from_fn(|w, r| {
        if r.headers().get("authorization").is_some() {
            return true;
        }
        w.write_str(AUTH_ERROR);
        false
    }));

    let mut writer = ResponseWriter::new();
    assert!(!chain.run(&mut writer, &make_request(&[])));
    assert_eq!(writer.body(), AUTH_ERROR.as_bytes());
    assert_eq!(writer.status(), StatusCode::OK);
}
