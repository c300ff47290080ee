use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_memory().await?;
    let app: Router = routes::build_router(AppState { db }, CorsLayer::very_permissive());

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

async fn list_users(c: &reqwest::Client, app: &TestApp) -> anyhow::Result<Vec<Value>> {
    let res = c.get(format!("{}/api/user", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Users fetched successfully");
    Ok(body["data"]["users"].as_array().cloned().unwrap_or_default())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_list_update_delete_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // Create
    let res = c.post(format!("{}/api/user", app.base_url))
        .json(&json!({"name": "Ada", "designation": "Engineer"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_i64().expect("generated id");

    // List contains exactly the new record
    let users = list_users(&c, &app).await?;
    assert_eq!(users, vec![json!({"id": id, "name": "Ada", "designation": "Engineer"})]);

    // Update
    let res = c.put(format!("{}/api/user/{}", app.base_url, id))
        .json(&json!({"name": "Ada", "designation": "Lead Engineer"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["data"]["designation"], "Lead Engineer");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(list_users(&c, &app).await?.len(), 1);

    // Delete
    let res = c.delete(format!("{}/api/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"success": true, "message": "User deleted successfully"}));

    let users = list_users(&c, &app).await?;
    assert!(users.iter().all(|u| u["id"] != id));
    Ok(())
}

#[tokio::test]
async fn e2e_validation_failures_persist_nothing() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    for payload in [
        json!({"name": "", "designation": "Engineer"}),
        json!({"name": "Ada", "designation": ""}),
        json!({"designation": "Engineer"}),
        json!({"name": null, "designation": "Engineer"}),
    ] {
        let res = c.post(format!("{}/api/user", app.base_url)).json(&payload).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        let body = res.json::<Value>().await?;
        assert_eq!(body, json!({"success": false, "message": "Name and designation are required"}));
    }
    assert!(list_users(&c, &app).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_update_only_touches_target_record() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut ids = vec![];
    for (name, designation) in [("Ada", "Engineer"), ("Grace", "Admiral")] {
        let body = c.post(format!("{}/api/user", app.base_url))
            .json(&json!({"name": name, "designation": designation}))
            .send().await?
            .json::<Value>().await?;
        ids.push(body["data"]["id"].as_i64().expect("id"));
    }

    let res = c.put(format!("{}/api/user/{}", app.base_url, ids[1]))
        .json(&json!({"name": "Grace Hopper", "designation": "Rear Admiral"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let users = list_users(&c, &app).await?;
    assert_eq!(users.len(), 2);
    let ada = users.iter().find(|u| u["id"] == ids[0]).expect("ada kept");
    assert_eq!(ada["designation"], "Engineer");
    let grace = users.iter().find(|u| u["id"] == ids[1]).expect("grace kept");
    assert_eq!(grace["name"], "Grace Hopper");
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_and_malformed_ids() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.put(format!("{}/api/user/12345", app.base_url))
        .json(&json!({"name": "Ghost", "designation": "None"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"success": false, "message": "User not found"}));

    let res = c.delete(format!("{}/api/user/12345", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/api/user/not-a-number", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Invalid user id");

    assert!(list_users(&c, &app).await?.is_empty());
    Ok(())
}
