use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use campaign_api::{app, AppState, MemoryCampaignStore, Settings};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router_with(settings: Settings) -> Router {
    let state = AppState::new(Arc::new(MemoryCampaignStore::new()), &settings);
    app(state, &settings).unwrap()
}

fn router() -> Router {
    router_with(Settings::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, Method::POST, "/api/campaigns/", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", created);
    created
}

async fn seed_three(app: &Router) {
    create(app, json!({"name": "Test Campaign", "budget": "1000.00", "spend": "500.00", "status": "active"})).await;
    create(app, json!({"name": "Paused Campaign", "budget": "2000.00", "spend": "1000.00", "status": "paused"})).await;
    create(app, json!({"name": "Completed Campaign", "budget": "3000.00", "spend": "3000.00", "status": "completed"})).await;
}

fn names(page: &Value) -> Vec<String> {
    page["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_echoes_values() {
    let app = router();
    let created = create(
        &app,
        json!({"name": "Test Campaign", "budget": "1000.00", "spend": "500.00", "status": "paused"}),
    )
    .await;
    assert_eq!(created["name"], "Test Campaign");
    assert_eq!(created["budget"], "1000.00");
    assert_eq!(created["spend"], "500.00");
    assert_eq!(created["status"], "paused");
    assert!(uuid::Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());
    assert_eq!(created["created_at"], created["updated_at"]);
}

#[tokio::test]
async fn create_without_status_is_active() {
    let app = router();
    let created = create(&app, json!({"name": "Plain", "budget": 10, "spend": 0})).await;
    assert_eq!(created["status"], "active");
    assert_eq!(created["budget"], "10.00");
    assert_eq!(created["spend"], "0.00");
}

#[tokio::test]
async fn negative_amounts_name_each_field() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/campaigns/",
        Some(json!({"name": "Bad", "budget": "-1.00", "spend": "-5"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"]["budget"], json!(["Budget cannot be negative"]));
    assert_eq!(body["error"]["details"]["spend"], json!(["Spend cannot be negative"]));
    assert!(body["error"]["details"].get("name").is_none());
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/campaigns/",
        Some(json!({"name": "X", "budget": "1", "spend": "0", "status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["status"], json!(["\"archived\" is not a valid choice."]));

    let id = create(&app, json!({"name": "Y", "budget": "1", "spend": "0"})).await["id"]
        .as_str()
        .unwrap()
        .to_string();
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/campaigns/{}/", id),
        Some(json!({"status": "deleted"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["details"].get("status").is_some());
}

#[tokio::test]
async fn missing_fields_are_reported_together() {
    let app = router();
    let (status, body) = send(&app, Method::POST, "/api/campaigns/", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["error"]["details"].as_object().unwrap();
    assert!(details.contains_key("name"));
    assert!(details.contains_key("budget"));
    assert!(details.contains_key("spend"));
    assert!(!details.contains_key("status"));
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/campaigns/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::POST, "/api/campaigns/", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn get_is_repeatable() {
    let app = router();
    let created = create(&app, json!({"name": "Stable", "budget": "5", "spend": "1"})).await;
    let uri = format!("/api/campaigns/{}/", created["id"].as_str().unwrap());
    let (s1, first) = send(&app, Method::GET, &uri, None).await;
    let (s2, second) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(first, created);
}

#[tokio::test]
async fn scenario_filter_and_ordering() {
    let app = router();
    seed_three(&app).await;

    let (status, active) = send(&app, Method::GET, "/api/campaigns/?status=active", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&active), vec!["Test Campaign"]);
    assert_eq!(active["count"], 1);

    let (_, by_budget) = send(&app, Method::GET, "/api/campaigns/?ordering=budget", None).await;
    assert_eq!(
        names(&by_budget),
        vec!["Test Campaign", "Paused Campaign", "Completed Campaign"]
    );

    let (_, reversed) = send(&app, Method::GET, "/api/campaigns/?ordering=-budget", None).await;
    assert_eq!(
        names(&reversed),
        vec!["Completed Campaign", "Paused Campaign", "Test Campaign"]
    );
}

#[tokio::test]
async fn search_matches_name_substring() {
    let app = router();
    seed_three(&app).await;
    let (_, found) = send(&app, Method::GET, "/api/campaigns?search=Paused", None).await;
    assert_eq!(names(&found), vec!["Paused Campaign"]);

    let (_, both) = send(&app, Method::GET, "/api/campaigns?search=campaign&status=completed", None).await;
    assert_eq!(names(&both), vec!["Completed Campaign"]);

    let (_, none) = send(&app, Method::GET, "/api/campaigns?search=nothing-like-this", None).await;
    assert_eq!(none["count"], 0);
    assert!(names(&none).is_empty());
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let app = router();
    seed_three(&app).await;
    let (status, body) = send(&app, Method::GET, "/api/campaigns/?status=archived", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(
        body["error"]["details"]["status"],
        json!(["Select a valid choice. archived is not one of the available choices."])
    );
}

#[tokio::test]
async fn over_precise_budget_is_rejected_not_rounded() {
    let app = router();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/campaigns/",
        Some(json!({"name": "Precise", "budget": "1.00000000000000000000000000001", "spend": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["details"]["budget"],
        json!(["Ensure that there are no more than 2 decimal places."])
    );

    let (_, page) = send(&app, Method::GET, "/api/campaigns/", None).await;
    assert_eq!(page["count"], 0);
}

#[tokio::test]
async fn unknown_ordering_falls_back_to_newest_first() {
    let app = router();
    seed_three(&app).await;
    let (_, default) = send(&app, Method::GET, "/api/campaigns/", None).await;
    let (_, unknown) = send(&app, Method::GET, "/api/campaigns/?ordering=password", None).await;
    assert_eq!(names(&default), names(&unknown));
    let created: Vec<chrono::DateTime<chrono::FixedOffset>> = default["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| chrono::DateTime::parse_from_rfc3339(c["created_at"].as_str().unwrap()).unwrap())
        .collect();
    let mut sorted = created.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(created, sorted);
}

#[tokio::test]
async fn pagination_envelope_and_links() {
    let settings = Settings {
        page_size: 2,
        ..Settings::default()
    };
    let app = router_with(settings);
    for i in 0..5 {
        create(&app, json!({"name": format!("C{}", i), "budget": "1", "spend": "0"})).await;
    }

    let (_, first) = send(&app, Method::GET, "/api/campaigns/?ordering=name", None).await;
    assert_eq!(first["count"], 5);
    assert_eq!(names(&first), vec!["C0", "C1"]);
    assert_eq!(first["next"], "/api/campaigns/?ordering=name&page=2");
    assert_eq!(first["previous"], Value::Null);

    let (_, second) = send(&app, Method::GET, "/api/campaigns/?ordering=name&page=2", None).await;
    assert_eq!(names(&second), vec!["C2", "C3"]);
    assert_eq!(second["previous"], "/api/campaigns/?ordering=name&page=1");

    let (_, last) = send(&app, Method::GET, "/api/campaigns/?ordering=name&page=3", None).await;
    assert_eq!(names(&last), vec!["C4"]);
    assert_eq!(last["next"], Value::Null);

    let (status, beyond) = send(&app, Method::GET, "/api/campaigns/?page=9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(beyond["count"], 5);
    assert!(names(&beyond).is_empty());

    let (status, _) = send(&app, Method::GET, "/api/campaigns/?page=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::GET, "/api/campaigns/?page=two", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn replace_and_patch() {
    let app = router();
    let created = create(
        &app,
        json!({"name": "Original", "budget": "100", "spend": "10", "status": "paused"}),
    )
    .await;
    let uri = format!("/api/campaigns/{}/", created["id"].as_str().unwrap());

    let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({"spend": "20.5"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["spend"], "20.50");
    assert_eq!(patched["name"], "Original");
    assert_eq!(patched["created_at"], created["created_at"]);

    let (status, replaced) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Renamed", "budget": "200", "spend": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Renamed");
    assert_eq!(replaced["status"], "paused");
    assert_eq!(replaced["id"], created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"name": "Only name"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["details"].get("budget").is_some());
}

#[tokio::test]
async fn update_unknown_id_creates_nothing() {
    let app = router();
    let uri = format!("/api/campaigns/{}/", uuid::Uuid::new_v4());
    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"name": "Ghost", "budget": "1", "spend": "0"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({"name": "Ghost"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, page) = send(&app, Method::GET, "/api/campaigns/", None).await;
    assert_eq!(page["count"], 0);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = router();
    let created = create(&app, json!({"name": "Doomed", "budget": "1", "spend": "0"})).await;
    let uri = format!("/api/campaigns/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_uuid_id_is_not_found() {
    let app = router();
    let (status, _) = send(&app, Method::GET, "/api/campaigns/42/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = router();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/campaigns/")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_respects_allow_list() {
    let settings = Settings {
        cors_allowed_origins: vec!["http://app.example".into()],
        ..Settings::default()
    };
    let app = router_with(settings);
    let allowed = Request::builder()
        .uri("/api/campaigns/")
        .header(header::ORIGIN, "http://app.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://app.example"
    );

    let other = Request::builder()
        .uri("/api/campaigns/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(other).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn probes_respond() {
    let app = router();
    let (status, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, ready) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["store"], "ok");

    let (_, version) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(version["name"], "campaign-api");
}
