mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server(&[]).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK, "unexpected status: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    assert!(
        body.get("success").and_then(|v| v.as_bool()).unwrap_or(false),
        "success flag false or missing: {}",
        body
    );
    assert_eq!(body["data"]["status"], "ok", "unexpected health payload: {}", body);

    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = common::ensure_server(&[]).await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["data"]["endpoints"].is_object(), "missing endpoint map: {}", body);
    assert_eq!(body["data"]["name"], "Aviary API");

    Ok(())
}
