mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::TestApp;
use serde_json::json;

fn room_request(item_id: &str, start: &str, end: &str, purpose: &str) -> serde_json::Value {
    json!({
        "type": "room",
        "item_id": item_id,
        "start_date": start,
        "end_date": end,
        "purpose": purpose,
    })
}

#[tokio::test]
async fn test_create_booking_is_pending_with_resolved_name() {
    let app = TestApp::new().await;
    let budi = app.login("budi@sipinjam.id").await;

    let before = Utc::now();
    let (status, body) = app.send(
        "POST",
        "/api/v1/bookings",
        Some(&budi),
        Some(room_request("room-1", "2024-01-01T09:00", "2024-01-01T11:00", "Meeting")),
    ).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["type"], "room");
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["user_name"], "Budi Santoso");
    assert_eq!(body["item_name"], "Ruang Rapat Utama");
    assert_eq!(body["purpose"], "Meeting");
    assert!(body["approved_by"].is_null());
    assert!(body["rejection_reason"].is_null());

    let created_at: DateTime<Utc> = body["created_at"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= before - chrono::Duration::seconds(1));
    assert!(created_at <= Utc::now() + chrono::Duration::seconds(1));

    let (status, mine) = app.send("GET", "/api/v1/bookings", Some(&budi), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["bookings"].as_array().unwrap().len(), 1);
    assert_eq!(mine["stats"]["pending"], 1);
}

#[tokio::test]
async fn test_create_equipment_booking() {
    let app = TestApp::new().await;
    let siti = app.login("siti@sipinjam.id").await;

    let (status, body) = app.send(
        "POST",
        "/api/v1/bookings",
        Some(&siti),
        Some(json!({
            "type": "equipment",
            "item_id": "equipment-2",
            "start_date": "2030-05-01T08:00:00Z",
            "end_date": "2030-05-02T08:00:00Z",
            "purpose": "Dokumentasi acara",
            "notes": "Butuh baterai cadangan",
        })),
    ).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item_name"], "Kamera DSLR Canon");
    assert_eq!(body["notes"], "Butuh baterai cadangan");
}

#[tokio::test]
async fn test_create_booking_validation_leaves_no_trace() {
    let app = TestApp::new().await;
    let budi = app.login("budi@sipinjam.id").await;

    let cases = [
        (room_request("room-1", "2024-01-01T11:00", "2024-01-01T11:00", "Meeting"), StatusCode::BAD_REQUEST),
        (room_request("room-1", "2024-01-01T11:00", "2024-01-01T09:00", "Meeting"), StatusCode::BAD_REQUEST),
        (room_request("room-1", "next monday", "2024-01-01T09:00", "Meeting"), StatusCode::BAD_REQUEST),
        (room_request("room-1", "2024-01-01T09:00", "2024-01-01T11:00", "   "), StatusCode::BAD_REQUEST),
        (room_request("room-99", "2024-01-01T09:00", "2024-01-01T11:00", "Meeting"), StatusCode::NOT_FOUND),
    ];

    for (payload, expected) in cases {
        let (status, body) = app.send("POST", "/api/v1/bookings", Some(&budi), Some(payload.clone())).await;
        assert_eq!(status, expected, "payload {}", payload);
        assert!(body["error"].is_string());
    }

    let all = app.state.booking_repo.list().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_malformed_date_names_the_field() {
    let app = TestApp::new().await;
    let budi = app.login("budi@sipinjam.id").await;

    let (status, body) = app.send(
        "POST",
        "/api/v1/bookings",
        Some(&budi),
        Some(room_request("room-1", "2024-01-01T09:00", "later", "Meeting")),
    ).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("end_date"));
}

#[tokio::test]
async fn test_session_and_csrf_are_required() {
    let app = TestApp::new().await;
    let payload = room_request("room-1", "2024-01-01T09:00", "2024-01-01T11:00", "Meeting");

    let (status, _) = app.send("POST", "/api/v1/bookings", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut budi = app.login("budi@sipinjam.id").await;
    budi.csrf_token = "not-the-token".into();
    let (status, _) = app.send("POST", "/api/v1/bookings", Some(&budi), Some(payload)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reads do not need the CSRF header.
    let (status, _) = app.send("GET", "/api/v1/bookings", Some(&budi), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_email_cannot_log_in() {
    let app = TestApp::new().await;
    let (status, _) = app.send("POST", "/api/v1/auth/login", None, Some(json!({ "email": "nobody@sipinjam.id" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_and_logout() {
    let app = TestApp::new().await;
    let andi = app.login("ANDI@sipinjam.id").await;

    let (status, me) = app.send("GET", "/api/v1/auth/me", Some(&andi), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], "u3");
    assert_eq!(me["role"], "user");

    let (status, _) = app.send("POST", "/api/v1/auth/logout", Some(&andi), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("GET", "/api/v1/auth/me", Some(&andi), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_visible_to_owner_and_admin_only() {
    let app = TestApp::new().await;
    let budi = app.login("budi@sipinjam.id").await;
    let siti = app.login("siti@sipinjam.id").await;
    let admin = app.login("admin@sipinjam.id").await;

    let (_, created) = app.send(
        "POST",
        "/api/v1/bookings",
        Some(&budi),
        Some(room_request("room-3", "2030-02-01T09:00", "2030-02-01T12:00", "Seminar")),
    ).await;
    let uri = format!("/api/v1/bookings/{}", created["id"].as_str().unwrap());

    let (status, _) = app.send("GET", &uri, Some(&budi), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send("GET", &uri, Some(&siti), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("GET", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = app.send("GET", "/api/v1/bookings/missing", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, siti_list) = app.send("GET", "/api/v1/bookings", Some(&siti), None).await;
    assert!(siti_list["bookings"].as_array().unwrap().is_empty());
}
