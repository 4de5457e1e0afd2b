//! Dashboard HTTP API end to end, with a mock gateway behind it.

use std::net::SocketAddr;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use gateway_dashboard::config::DashboardConfig;
use gateway_dashboard::http::HttpServer;
use gateway_dashboard::lifecycle::Shutdown;
use gateway_dashboard::templates::TemplateCatalog;

mod common;
use common::MockAdmin;

struct Dashboard {
    addr: SocketAddr,
    http: reqwest::Client,
    _shutdown: Shutdown,
}

impl Dashboard {
    async fn start() -> Self {
        let config = DashboardConfig::default();
        let server = HttpServer::new(config, TemplateCatalog::builtin()).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let (_, config_updates) = mpsc::unbounded_channel();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, config_updates, server_shutdown).await;
        });

        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .no_proxy()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        Self {
            addr,
            http,
            _shutdown: shutdown,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}/api{}", self.addr, path)
    }

    fn to(&self, method: reqwest::Method, path: &str, gateway: &MockAdmin) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("x-apisix-url", gateway.base_url())
            .header("x-apisix-key", "edd1c9f034335f136f87ad84b625c8f1")
    }
}

#[tokio::test]
async fn test_proxy_relays_status_and_body() {
    let gateway = common::start_mock_admin(|req| match req.path.as_str() {
        "routes/r1" => (200, r#"{"key":"/apisix/routes/r1","value":{"id":"r1"}}"#.into()),
        _ => (404, r#"{"message":"Not Found"}"#.into()),
    })
    .await;
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .to(reqwest::Method::GET, "/proxy/routes/r1", &gateway)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["value"]["id"], "r1");

    let res = dashboard
        .to(reqwest::Method::GET, "/proxy/routes/nope", &gateway)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"message": "Not Found"}));

    let seen = gateway.requests();
    assert_eq!(
        seen[0].headers.get("x-api-key").map(String::as_str),
        Some("edd1c9f034335f136f87ad84b625c8f1")
    );
}

#[tokio::test]
async fn test_proxy_forwards_body_and_query() {
    let gateway = common::start_mock_admin(|_| (201, r#"{"value":{"id":"r9"}}"#.into())).await;
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .to(reqwest::Method::PUT, "/proxy/routes/r9?ttl=30", &gateway)
        .json(&json!({"uri": "/nine"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let seen = &gateway.requests()[0];
    assert_eq!(seen.method, "PUT");
    assert_eq!(seen.path, "routes/r9?ttl=30");
    assert_eq!(serde_json::from_str::<Value>(&seen.body).unwrap(), json!({"uri": "/nine"}));
}

#[tokio::test]
async fn test_proxy_without_credentials() {
    let gateway = common::start_mock_admin(|_| (200, "{}".into())).await;
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .http
        .get(dashboard.url("/proxy/routes"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Missing APISIX configuration"})
    );
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_proxy_unreachable_gateway() {
    let addr = common::closed_addr().await;
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .http
        .get(dashboard.url("/proxy/routes"))
        .header("x-apisix-url", format!("http://{}/apisix/admin", addr))
        .header("x-apisix-key", "k")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("failed to reach"));
}

#[tokio::test]
async fn test_template_endpoints() {
    let dashboard = Dashboard::start().await;

    let names: Vec<String> = dashboard
        .http
        .get(dashboard.url("/templates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(names.iter().any(|n| n == "limit-count"));

    let res = dashboard
        .http
        .get(dashboard.url("/templates/limit-count"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let template: Value = res.json().await.unwrap();
    assert!(template.get("count").is_some());

    let res = dashboard
        .http
        .get(dashboard.url("/templates/no-such-plugin"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_endpoints() {
    let dashboard = Dashboard::start().await;

    let recipes: Vec<Value> = dashboard
        .http
        .get(dashboard.url("/recipes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!recipes.is_empty());

    let id = recipes[0]["id"].as_str().unwrap().to_string();
    let one: Value = dashboard
        .http
        .get(dashboard.url(&format!("/recipes/{}", id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(one, recipes[0]);
}

#[tokio::test]
async fn test_offline_diff() {
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .http
        .post(dashboard.url("/config/diff"))
        .json(&json!({
            "format": "yaml",
            "current": "routes:\n  - id: r1\n    uri: /a\n",
            "candidate": "routes:\n  - id: r1\n    uri: /b\n  - id: r2\n    uri: /c\n"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let summary: Value = res.json().await.unwrap();
    assert_eq!(summary["added"], 1);
    assert_eq!(summary["updated"], 1);
    assert_eq!(summary["deleted"], 0);
    assert_eq!(summary["details"], json!(["[UPDATE] routes: r1", "[ADD] routes: r2"]));
}

#[tokio::test]
async fn test_offline_diff_rejects_non_mapping() {
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .http
        .post(dashboard.url("/config/diff"))
        .json(&json!({"format": "json", "current": "[]", "candidate": "{}"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_export_plan_apply() {
    let gateway = common::start_mock_admin(|req| match (req.method.as_str(), req.path.as_str()) {
        ("GET", "routes") => (200, r#"{"list":[{"value":{"id":"r1","uri":"/a","create_time":1}}]}"#.into()),
        ("GET", _) => (200, r#"{"list":[]}"#.into()),
        _ => (200, "{}".into()),
    })
    .await;
    let dashboard = Dashboard::start().await;

    let res = dashboard
        .to(reqwest::Method::GET, "/config/export?format=yaml", &gateway)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap().to_str().unwrap(),
        "application/yaml"
    );
    let exported = res.text().await.unwrap();
    assert!(exported.contains("id: r1"));
    assert!(!exported.contains("create_time"));

    let candidate = json!({"format": "json", "candidate": r#"{"routes":[{"id":"r2","uri":"/b"}]}"#});
    let plan: Value = dashboard
        .to(reqwest::Method::POST, "/config/plan", &gateway)
        .json(&candidate)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(plan["details"], json!(["[ADD] routes: r2", "[DELETE] routes: r1"]));

    let applied: Value = dashboard
        .to(reqwest::Method::POST, "/config/apply", &gateway)
        .json(&candidate)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(applied["report"]["applied"], 2);
    assert_eq!(gateway.writes(), vec!["PUT routes/r2", "DELETE routes/r1"]);
}

#[tokio::test]
async fn test_health_endpoint() {
    let gateway = common::start_mock_admin(|_| (200, r#"{"list":[]}"#.into())).await;
    let dashboard = Dashboard::start().await;

    let up: Value = dashboard
        .to(reqwest::Method::GET, "/health", &gateway)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(up, json!({"reachable": true}));

    let down: Value = dashboard
        .http
        .get(dashboard.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(down, json!({"reachable": false}));
}
