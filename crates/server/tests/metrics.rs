// Metrics live in the process-wide registry, so this file keeps a single test
// and no other test in this binary touches the counters.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use server::startup::build_app;

async fn scrape(app: &Router) -> anyhow::Result<String> {
    let req = Request::builder().method("GET").uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn sample(text: &str, name: &str) -> Option<f64> {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .find_map(|l| {
            let (metric, value) = l.split_once(' ')?;
            (metric == name).then(|| value.trim().parse().ok()).flatten()
        })
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> anyhow::Result<StatusCode> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    Ok(app.clone().oneshot(req).await?.status())
}

#[tokio::test]
async fn metrics_track_creates_deletes_and_stored_count() -> anyhow::Result<()> {
    let app = build_app();

    let before = scrape(&app).await?;
    let created_0 = sample(&before, "message_api_messages_created_total").unwrap_or(f64::NAN);
    let deleted_0 = sample(&before, "message_api_messages_deleted_total").unwrap_or(f64::NAN);
    assert_eq!(created_0, 0.0);
    assert_eq!(deleted_0, 0.0);
    assert_eq!(sample(&before, "message_api_messages_stored"), Some(0.0));

    for text in ["one", "two", "three"] {
        assert_eq!(call(&app, "POST", "/messages", Some(json!({"message": text}))).await?, StatusCode::OK);
    }
    let after_posts = scrape(&app).await?;
    assert_eq!(sample(&after_posts, "message_api_messages_created_total"), Some(3.0));
    assert_eq!(sample(&after_posts, "message_api_messages_stored"), Some(3.0));

    assert_eq!(call(&app, "DELETE", "/messages/2", None).await?, StatusCode::OK);
    // failed operations leave every metric alone
    assert_eq!(call(&app, "DELETE", "/messages/2", None).await?, StatusCode::NOT_FOUND);
    assert_eq!(
        call(&app, "POST", "/messages", Some(json!({}))).await?,
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let after_delete = scrape(&app).await?;
    assert_eq!(sample(&after_delete, "message_api_messages_created_total"), Some(3.0));
    assert_eq!(sample(&after_delete, "message_api_messages_deleted_total"), Some(1.0));
    assert_eq!(sample(&after_delete, "message_api_messages_stored"), Some(2.0));
    Ok(())
}
