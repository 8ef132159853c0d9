use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes;
use server::state::AppState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn build_app() -> Router {
    routes::build_router(AppState::demo(), cors(), "target/no-assets")
}

async fn send(app: Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let res = app.oneshot(req).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

fn json_request(method: Method, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

#[tokio::test]
async fn get_seeded_person() -> anyhow::Result<()> {
    let req = Request::builder().uri("/api/persons/1").body(Body::empty())?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body)?;
    assert_eq!(v, json!({"id": 1, "name": "Arto Hellas", "number": "040-123456"}));
    Ok(())
}

#[tokio::test]
async fn unknown_id_is_404_with_empty_body() -> anyhow::Result<()> {
    let req = Request::builder().uri("/api/persons/999").body(Body::empty())?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn create_is_case_insensitive_on_duplicates() -> anyhow::Result<()> {
    let req = json_request(Method::POST, "/api/persons", json!({"name": "ada LOVELACE", "number": "1"}))?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"error": "name must be unique"}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Value = serde_json::from_slice(&body)?;
    assert!(v["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn empty_json_body_on_post_is_no_content() -> anyhow::Result<()> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"error": "no content specified"}));
    Ok(())
}

#[tokio::test]
async fn empty_json_body_on_put_unknown_id_is_empty_array() -> anyhow::Result<()> {
    let req = Request::builder()
        .method(Method::PUT)
        .uri("/api/persons/999")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn logged_body_still_reaches_handler() -> anyhow::Result<()> {
    let payload = json!({"name": "Grace Hopper", "number": "555"}).to_string();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/persons")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body)?;
    assert_eq!(v["name"], "Grace Hopper");
    assert_eq!(v["number"], "555");
    Ok(())
}

#[tokio::test]
async fn put_without_body_keeps_record() -> anyhow::Result<()> {
    let req = Request::builder().method(Method::PUT).uri("/api/persons/2").body(Body::empty())?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_slice(&body)?;
    assert_eq!(v, json!({"id": 2, "name": "Ada Lovelace", "number": "39-44-5323523"}));
    Ok(())
}

#[tokio::test]
async fn rename_onto_existing_name_is_rejected() -> anyhow::Result<()> {
    let req = json_request(Method::PUT, "/api/persons/2", json!({"name": "Dan Abramov"}))?;
    let (status, body) = send(build_app(), req).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"error": "name must be unique"}));
    Ok(())
}

#[tokio::test]
async fn cors_headers_present() -> anyhow::Result<()> {
    let req = Request::builder()
        .uri("/api/persons")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())?;
    let res = build_app().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    Ok(())
}
