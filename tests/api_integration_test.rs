use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use wellness_booking::api;
use wellness_booking::db;
use wellness_booking::infrastructure::AppState;

// Helper to build the API router over a fresh in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    api::api_router(AppState::new(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

// Creates partner, company, client and a class; returns (partner_id, company_id, client_id, class_id)
async fn seed(app: &Router, lots: i32) -> (String, String, String, String) {
    let (status, partner) = send(
        app,
        "POST",
        "/partners/create",
        Some(json!({ "name": "Ana", "email": "ana@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let partner_id = partner["id"].as_str().unwrap().to_string();

    let (status, company) = send(
        app,
        "POST",
        "/companies/create",
        Some(json!({
            "name": "Studio Zen",
            "bannerImage": "banner.png",
            "logoImage": "logo.png",
            "partnerId": partner_id,
            "address": "Av. Paulista 1000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let company_id = company["id"].as_str().unwrap().to_string();

    let (status, client) = send(
        app,
        "POST",
        "/clients/create",
        Some(json!({ "identification": "123.456.789-00", "name": "Bruno" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = client["id"].as_str().unwrap().to_string();

    let (status, class) = send(
        app,
        "POST",
        "/classes/create",
        Some(json!({
            "companyId": company_id,
            "name": "Morning yoga",
            "date": "2024-03-01",
            "dateTimestamp": "1709280000000",
            "lots": lots
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let class_id = class["id"].as_str().unwrap().to_string();

    (partner_id, company_id, client_id, class_id)
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_services_controller() {
    let app = setup_test_app().await;
    let (partner_id, _, _, _) = seed(&app, 5).await;

    let (status, created) = send(
        &app,
        "POST",
        "/services/create",
        Some(json!({
            "partnerId": partner_id,
            "name": "Massage",
            "price": 90.0,
            "durationMinutes": 60
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["partnerId"], partner_id);
    let service_id = created["id"].as_str().unwrap().to_string();

    // No body at all lists everything
    let (status, all) = send(&app, "GET", "/services/findAll", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, filtered) = send(
        &app,
        "GET",
        "/services/findAll",
        Some(json!({ "name": "Pilates" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(filtered.as_array().unwrap().is_empty());

    // A filter of the wrong shape is rejected rather than ignored
    let (status, err) = send(
        &app,
        "GET",
        "/services/findAll",
        Some(json!({ "partnerId": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (status, by_partner) = send(
        &app,
        "POST",
        "/services/findByPartnerId",
        Some(json!({ "partnerId": partner_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_partner[0]["id"], service_id);

    let (status, updated) = send(
        &app,
        "POST",
        "/services/update",
        Some(json!({ "id": service_id, "name": "Relaxing massage" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Relaxing massage");
    assert_eq!(updated["price"], 90.0);

    let (status, _) = send(
        &app,
        "POST",
        "/services/update",
        Some(json!({ "id": "missing", "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_twice_is_conflict() {
    let app = setup_test_app().await;
    let (_, _, client_id, class_id) = seed(&app, 5).await;

    let body = json!({ "classId": class_id, "clientId": client_id });

    let (status, booked) = send(&app, "POST", "/classes/book", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(booked["lots"], 4);

    let (status, err) = send(&app, "POST", "/classes/book", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["error"], "Class already booked");

    let (_, class) = send(&app, "GET", &format!("/classes/{}", class_id), None).await;
    assert_eq!(class["lots"], 4);
}

#[tokio::test]
async fn test_cancel_then_list_clients() {
    let app = setup_test_app().await;
    let (_, _, client_id, class_id) = seed(&app, 2).await;
    let body = json!({ "classId": class_id, "clientId": client_id });

    send(&app, "POST", "/classes/book", Some(body.clone())).await;

    let (status, clients) =
        send(&app, "GET", &format!("/classes/{}/clients", class_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(clients.as_array().unwrap().len(), 1);

    let (status, cancelled) = send(&app, "POST", "/classes/cancel", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["message"], "Class cancelled successfully");
    assert_eq!(cancelled["class"]["lots"], 2);

    let (_, clients) = send(&app, "GET", &format!("/classes/{}/clients", class_id), None).await;
    assert!(clients.as_array().unwrap().is_empty());

    let (status, _) = send(&app, "POST", "/classes/cancel", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_resources_are_404() {
    let app = setup_test_app().await;

    let (status, body) = send(&app, "GET", "/classes/nope/clients", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "GET", "/classes/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/companies/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/classes/delete",
        Some(json!({ "classId": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_next_class_is_null_without_bookings() {
    let app = setup_test_app().await;
    let (_, _, client_id, class_id) = seed(&app, 5).await;

    let (status, next) = send(
        &app,
        "POST",
        "/classes/findNext",
        Some(json!({ "clientId": client_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(next.is_null());

    send(
        &app,
        "POST",
        "/classes/book",
        Some(json!({ "classId": class_id, "clientId": client_id })),
    )
    .await;

    let (_, next) = send(
        &app,
        "POST",
        "/classes/findNext",
        Some(json!({ "clientId": client_id })),
    )
    .await;
    assert_eq!(next["id"], class_id);
}

#[tokio::test]
async fn test_find_all_booked_and_by_date() {
    let app = setup_test_app().await;
    let (_, company_id, client_id, class_id) = seed(&app, 5).await;

    let (status, _) = send(
        &app,
        "POST",
        "/classes/create",
        Some(json!({
            "companyId": company_id,
            "name": "Evening spin",
            "date": "2024-03-10",
            "dateTimestamp": "1710090000000",
            "lots": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        "POST",
        "/classes/book",
        Some(json!({ "classId": class_id, "clientId": client_id })),
    )
    .await;

    let (_, all) = send(
        &app,
        "POST",
        "/classes/findAll",
        Some(json!({ "companyId": company_id })),
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, booked) = send(
        &app,
        "POST",
        "/classes/findAll",
        Some(json!({ "companyId": company_id, "bookedClasses": true })),
    )
    .await;
    let booked = booked.as_array().unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0]["id"], class_id);
    assert_eq!(booked[0]["clients"][0]["id"], client_id);

    let (status, ranged) = send(
        &app,
        "POST",
        "/classes/findAllByDate",
        Some(json!({
            "companyId": company_id,
            "startDate": "2024-03-01",
            "endDate": "2024-03-09"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ranged.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/classes/findAllByDate",
        Some(json!({
            "companyId": company_id,
            "startDate": "2024-03-09",
            "endDate": "2024-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scheduled_with_consults_lists_services_first() {
    let app = setup_test_app().await;
    let (partner_id, _, client_id, class_id) = seed(&app, 5).await;

    let (_, service) = send(
        &app,
        "POST",
        "/services/create",
        Some(json!({ "partnerId": partner_id, "name": "Physio" })),
    )
    .await;

    let (status, _) = send(
        &app,
        "POST",
        "/consults/create",
        Some(json!({
            "clientId": client_id,
            "serviceId": service["id"],
            "date": "2024-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    send(
        &app,
        "POST",
        "/classes/book",
        Some(json!({ "classId": class_id, "clientId": client_id })),
    )
    .await;

    let (status, items) = send(
        &app,
        "POST",
        "/classes/scheduledWithConsults",
        Some(json!({ "clientId": client_id, "date": "2024-03-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "service");
    assert_eq!(items[0]["name"], "Physio");
    assert_eq!(items[1]["type"], "class");
    assert_eq!(items[1]["company"]["name"], "Studio Zen");

    let (_, other_day) = send(
        &app,
        "POST",
        "/classes/scheduledWithConsults",
        Some(json!({ "clientId": client_id, "date": "2024-04-01" })),
    )
    .await;
    assert!(other_day.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_find_all_services_with_broken_json() {
    let app = setup_test_app().await;
    let req = Request::builder()
        .uri("/services/findAll")
        .method("GET")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_class() {
    let app = setup_test_app().await;
    let (_, _, _, class_id) = seed(&app, 5).await;

    let (status, updated) = send(
        &app,
        "POST",
        "/classes/update",
        Some(json!({ "classId": class_id, "lots": 8, "date": "2024-3-2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], class_id);
    assert_eq!(updated["lots"], 8);
    assert_eq!(updated["date"], "2024-03-02");
    assert_eq!(updated["name"], "Morning yoga");
    assert_eq!(updated["dateTimestamp"], "1709280000000");

    let (status, _) = send(
        &app,
        "POST",
        "/classes/update",
        Some(json!({ "classId": class_id, "lots": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, class) = send(&app, "GET", &format!("/classes/{}", class_id), None).await;
    assert_eq!(class["lots"], 8);

    let (status, body) = send(
        &app,
        "POST",
        "/classes/update",
        Some(json!({ "classId": "nope", "name": "Stretch" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
