mod common;

use axum::http::StatusCode;
use chrono::{Duration, DurationRound, Utc};
use common::TestApp;
use serde_json::json;
use sipinjam::background::{run_sweep, SweepReport};
use sipinjam::domain::models::{
    booking::{Booking, BookingStatus, NewBookingParams, ResourceType},
    user::UserDeactivation,
};

fn booking_between(user_id: &str, item_id: &str, start_offset_hours: i64, end_offset_hours: i64) -> Booking {
    let now = Utc::now();
    Booking::new(NewBookingParams {
        user_id: user_id.into(),
        user_name: "Budi Santoso".into(),
        resource_type: ResourceType::Room,
        item_id: item_id.into(),
        item_name: "Ruang Rapat Utama".into(),
        start: now + Duration::hours(start_offset_hours),
        end: now + Duration::hours(end_offset_hours),
        purpose: "Rapat".into(),
        notes: None,
    })
}

async fn store_with_status(app: &TestApp, booking: Booking, status: BookingStatus) -> Booking {
    let stored = app.state.booking_repo.create(&booking).await.unwrap();
    let moved = Booking { status, approved_by: Some("admin-1".into()), approved_at: Some(Utc::now()), ..stored.clone() };
    app.state.booking_repo.update_if_status(&moved, BookingStatus::Pending).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_sweep_advances_bookings_by_wall_clock() {
    let app = TestApp::new().await;

    let running = store_with_status(&app, booking_between("u1", "room-1", -1, 2), BookingStatus::Approved).await;
    let finished = store_with_status(&app, booking_between("u1", "room-3", -5, -2), BookingStatus::Approved).await;
    let ending = store_with_status(&app, booking_between("u2", "room-5", -5, -1), BookingStatus::Active).await;
    let future = store_with_status(&app, booking_between("u2", "room-1", 24, 26), BookingStatus::Approved).await;
    let waiting = app.state.booking_repo.create(&booking_between("u3", "room-3", -1, 1)).await.unwrap();

    let report = run_sweep(&app.state).await.unwrap();
    assert_eq!(report.activated, 1);
    assert_eq!(report.completed, 2);

    let status_of = |id: String| {
        let repo = app.state.booking_repo.clone();
        async move { repo.find_by_id(&id).await.unwrap().unwrap().status }
    };
    assert_eq!(status_of(running.id).await, BookingStatus::Active);
    assert_eq!(status_of(finished.id).await, BookingStatus::Completed);
    assert_eq!(status_of(ending.id).await, BookingStatus::Completed);
    assert_eq!(status_of(future.id).await, BookingStatus::Approved);
    assert_eq!(status_of(waiting.id).await, BookingStatus::Pending);

    // A second pass finds nothing left to do.
    let report = run_sweep(&app.state).await.unwrap();
    assert_eq!(report, SweepReport::default());
}

#[tokio::test]
async fn test_sweep_lifts_expired_deactivations() {
    let app = TestApp::new().await;
    let admin = app.login("admin@sipinjam.id").await;

    let past = Utc::now() - Duration::days(10);
    let expired = UserDeactivation {
        id: "deact-1".into(),
        user_id: "u1".into(),
        reason: "Terlambat mengembalikan kamera".into(),
        deactivated_by: "admin-1".into(),
        deactivated_at: past,
        duration_days: Some(3),
        reactivate_at: Some(past + Duration::days(3)),
    };
    app.state.deactivation_repo.deactivate(&expired).await.unwrap();

    let (status, _) = app.send(
        "POST",
        "/api/v1/admin/users/u2/deactivate",
        Some(&admin),
        Some(json!({ "reason": "Pelanggaran berat" })),
    ).await;
    assert_eq!(status, StatusCode::OK);

    let report = run_sweep(&app.state).await.unwrap();
    assert_eq!(report.reactivated_users, 1);

    assert!(app.state.user_repo.find_by_id("u1").await.unwrap().unwrap().is_active);
    assert!(!app.state.user_repo.find_by_id("u2").await.unwrap().unwrap().is_active);
}

#[tokio::test]
async fn test_dashboards_reflect_bookings() {
    let app = TestApp::new().await;
    let budi = app.login("budi@sipinjam.id").await;
    let admin = app.login("admin@sipinjam.id").await;

    store_with_status(&app, booking_between("u1", "room-1", -1, 2), BookingStatus::Active).await;
    store_with_status(&app, booking_between("u1", "room-3", 10, 12), BookingStatus::Approved).await;
    app.state.booking_repo.create(&booking_between("u1", "room-5", 10, 12)).await.unwrap();
    app.state.booking_repo.create(&booking_between("u2", "room-5", 20, 22)).await.unwrap();

    let (status, mine) = app.send("GET", "/api/v1/dashboard", Some(&budi), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["total"], 3);
    assert_eq!(mine["pending"], 1);
    assert_eq!(mine["ongoing"], 2);

    let (status, overview) = app.send("GET", "/api/v1/admin/dashboard", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["bookings"]["total"], 4);
    assert_eq!(overview["bookings"]["pending"], 2);
    assert_eq!(overview["users"]["total"], 4);
    assert_eq!(overview["rooms"]["total"], 5);
    assert_eq!(overview["rooms"]["available"], 3);
    assert_eq!(overview["equipment"]["booked"], 1);

    let (status, _) = app.send("GET", "/api/v1/admin/dashboard", Some(&budi), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_booking_survives_storage_round_trip() {
    let app = TestApp::new().await;

    let mut booking = booking_between("u1", "room-1", 3, 5);
    booking.created_at = Utc::now().duration_trunc(Duration::seconds(1)).unwrap();
    booking.notes = Some("Kursi tambahan".into());

    let created = app.state.booking_repo.create(&booking).await.unwrap();
    let loaded = app.state.booking_repo.find_by_id(&booking.id).await.unwrap().unwrap();
    assert_eq!(created, booking);
    assert_eq!(loaded, booking);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reviews_have_one_winner() {
    let app = TestApp::new().await;
    let booking = app.state.booking_repo.create(&booking_between("u1", "room-1", 48, 50)).await.unwrap();
    let admin = app.state.user_repo.find_by_id("admin-1").await.unwrap().unwrap();

    let mut handles = Vec::new();
    for i in 0..6 {
        let service = app.state.booking_service.clone();
        let admin = admin.clone();
        let id = booking.id.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                service.approve(&id, &admin, None).await
            } else {
                service.reject(&id, "Bentrok jadwal").await
            }
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let stored = app.state.booking_repo.find_by_id(&booking.id).await.unwrap().unwrap();
    assert_ne!(stored.status, BookingStatus::Pending);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approvals_of_overlapping_requests_book_the_slot_once() {
    let app = TestApp::new().await;
    let admin = app.state.user_repo.find_by_id("admin-1").await.unwrap().unwrap();

    for round in 0..5 {
        let day = 24 * (round + 1);
        let mut ids = Vec::new();
        for (user_id, shift) in [("u1", 0), ("u2", 1), ("u3", 0), ("u1", 1)] {
            let booking = booking_between(user_id, "room-1", day + 10 + shift, day + 12 + shift);
            ids.push(app.state.booking_repo.create(&booking).await.unwrap().id);
        }

        let mut handles = Vec::new();
        for id in ids.clone() {
            let service = app.state.booking_service.clone();
            let admin = admin.clone();
            handles.push(tokio::spawn(async move { service.approve(&id, &admin, None).await }));
        }

        let mut winners = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(e) => assert!(matches!(e, sipinjam::error::AppError::Conflict(_)), "unexpected error {:?}", e),
            }
        }
        assert_eq!(winners, 1, "round {}", round);

        let mut approved = 0;
        for id in &ids {
            if app.state.booking_repo.find_by_id(id).await.unwrap().unwrap().status == BookingStatus::Approved {
                approved += 1;
            }
        }
        assert_eq!(approved, 1, "round {}", round);
    }
}
