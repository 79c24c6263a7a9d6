mod common;

use anyhow::Result;
use reqwest::StatusCode;

// Generous ceilings: these tests are about the CRUD surface, not throttling
const ENV: &[(&str, &str)] = &[
    ("API_RATE_LIMIT_REQUESTS", "100"),
    ("STRICT_RATE_LIMIT_REQUESTS", "100"),
];

#[tokio::test]
async fn agent_crud_flow() -> Result<()> {
    let server = common::ensure_server(ENV).await?;
    let client = reqwest::Client::new();
    let base = format!("{}/api/agents", server.base_url);
    let fwd = ("x-forwarded-for", "198.51.100.10");

    // Create
    let res = client
        .post(&base)
        .header(fwd.0, fwd.1)
        .json(&serde_json::json!({
            "name": "support",
            "model": "gpt-4o",
            "instructions": "Answer politely"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<serde_json::Value>().await?;
    let id = body["data"]["id"].as_str().expect("created agent has id").to_string();

    // Fetch
    let res = client
        .get(format!("{}/{}", base, id))
        .header(fwd.0, fwd.1)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["name"], "support");
    assert_eq!(body["data"]["instructions"], "Answer politely");

    // Update one field
    let res = client
        .put(format!("{}/{}", base, id))
        .header(fwd.0, fwd.1)
        .json(&serde_json::json!({ "name": "sales" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["name"], "sales");
    assert_eq!(body["data"]["model"], "gpt-4o", "untouched field must survive: {}", body);

    // Listed
    let res = client.get(&base).header(fwd.0, fwd.1).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let listed = body["data"].as_array().expect("data should be an array");
    assert!(listed.iter().any(|a| a["id"] == id.as_str()), "agent missing from list: {}", body);

    // Delete, then gone
    let res = client
        .delete(format!("{}/{}", base, id))
        .header(fwd.0, fwd.1)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/{}", base, id))
        .header(fwd.0, fwd.1)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_requires_name_and_model() -> Result<()> {
    let server = common::ensure_server(ENV).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/agents", server.base_url))
        .header("x-forwarded-for", "198.51.100.11")
        .json(&serde_json::json!({ "name": "", "model": "  " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["name"].is_string(), "missing name error: {}", body);
    assert!(body["field_errors"]["model"].is_string(), "missing model error: {}", body);

    Ok(())
}

#[tokio::test]
async fn unknown_agent_returns_404() -> Result<()> {
    let server = common::ensure_server(ENV).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/api/agents/00000000-0000-4000-8000-000000000000",
            server.base_url
        ))
        .header("x-forwarded-for", "198.51.100.12")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "NOT_FOUND");

    Ok(())
}
