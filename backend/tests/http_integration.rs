#![cfg(feature = "http-server")]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use meeus_astronomy::http::{create_router, AppState};
use meeus_astronomy::models::{CalendarReading, ObserverLocation, SiderealReading};
use meeus_astronomy::services::{
    calendar_reading, sidereal_reading, snapshot_channel, Readings, SnapshotWriter,
};
use meeus_core::CalendarReform;

struct TestApp {
    router: Router,
    sidereal: SnapshotWriter<SiderealReading>,
    calendar: SnapshotWriter<CalendarReading>,
}

fn test_app(reform: CalendarReform) -> TestApp {
    let (sidereal_writer, sidereal) = snapshot_channel();
    let (calendar_writer, calendar) = snapshot_channel();
    let router = create_router(AppState::new(Readings { sidereal, calendar }, reform));
    TestApp {
        router,
        sidereal: sidereal_writer,
        calendar: calendar_writer,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_readiness() {
    let app = test_app(CalendarReform::default());

    let (status, body) = send(&app.router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["calendar_reform"], "gregorian_1582");
    assert_eq!(body["sidereal_ready"], false);

    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    app.sidereal.publish(
        sidereal_reading(j2000, &ObserverLocation::greenwich(), CalendarReform::default())
            .unwrap(),
    );
    let (_, body) = send(&app.router, get("/health")).await;
    assert_eq!(body["sidereal_ready"], true);
    assert_eq!(body["calendar_ready"], false);
}

#[tokio::test]
async fn test_convert_to_julian_day() {
    let app = test_app(CalendarReform::default());
    let request = json!({
        "year": 1957, "month": 10, "day": 4,
        "hour": 19, "minute": 26, "second": 24.0
    });

    let (status, body) = send(&app.router, post_json("/v1/convert/julian-day", request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["julian_day"], 2_436_116.31);
    assert_eq!(body["input_date"], "1957-10-04 19:26:24.00");
}

#[tokio::test]
async fn test_convert_to_julian_day_defaults_time_of_day() {
    let app = test_app(CalendarReform::default());
    let request = json!({ "year": 2000, "month": 1, "day": 1 });

    let (status, body) = send(&app.router, post_json("/v1/convert/julian-day", request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["julian_day"], 2_451_544.5);
    assert_eq!(body["input_date"], "2000-01-01 00:00:00.00");
}

#[tokio::test]
async fn test_convert_to_julian_day_uses_configured_reform() {
    let request = json!({ "year": 333, "month": 1, "day": 27, "hour": 12 });

    let historical = test_app(CalendarReform::Gregorian1582);
    let (_, body) = send(
        &historical.router,
        post_json("/v1/convert/julian-day", request.clone()),
    )
    .await;
    assert_eq!(body["julian_day"], 1_842_713.0);

    let proleptic = test_app(CalendarReform::ProlepticGregorian);
    let (_, body) = send(&proleptic.router, post_json("/v1/convert/julian-day", request)).await;
    assert_eq!(body["julian_day"], 1_842_712.0);
}

#[tokio::test]
async fn test_out_of_range_field_is_validation_error() {
    let app = test_app(CalendarReform::default());
    let request = json!({ "year": 2024, "month": 13, "day": 1 });

    let (status, body) = send(&app.router, post_json("/v1/convert/julian-day", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"], "month");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let app = test_app(CalendarReform::default());
    let request = json!({ "month": 6, "day": 1 });

    let (status, body) = send(&app.router, post_json("/v1/convert/julian-day", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("year"));
}

#[tokio::test]
async fn test_convert_to_gregorian() {
    let app = test_app(CalendarReform::default());
    let request = json!({ "julian_day": 2_436_116.31 });

    let (status, body) = send(&app.router, post_json("/v1/convert/gregorian", request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 1957);
    assert_eq!(body["month"], 10);
    assert_eq!(body["day"], 4);
    assert_eq!(body["hour"], 19);
    assert_eq!(body["minute"], 26);
    assert_eq!(body["formatted"], "1957-10-04 19:26:24.00");
}

#[tokio::test]
async fn test_convert_to_gregorian_rejects_wrong_type() {
    let app = test_app(CalendarReform::default());
    let request = json!({ "julian_day": "yesterday" });

    let (status, body) = send(&app.router, post_json("/v1/convert/gregorian", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_convert_to_gregorian_rejects_far_julian_day() {
    let app = test_app(CalendarReform::default());

    for jd in [1e15, -1e15] {
        let request = json!({ "julian_day": jd });
        let (status, body) = send(&app.router, post_json("/v1/convert/gregorian", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{jd}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"], "julian_day");
    }
}

#[tokio::test]
async fn test_readings_not_ready_before_first_tick() {
    let app = test_app(CalendarReform::default());

    for uri in ["/v1/sidereal", "/v1/calendar"] {
        let (status, body) = send(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{uri}");
        assert_eq!(body["code"], "NOT_READY");
    }
}

#[tokio::test]
async fn test_readings_served_from_snapshot() {
    let app = test_app(CalendarReform::default());
    let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
    let site = ObserverLocation::new("Cherbourg", 49.6337, -1.62, None).unwrap();
    app.sidereal
        .publish(sidereal_reading(j2000, &site, CalendarReform::default()).unwrap());
    app.calendar
        .publish(calendar_reading(j2000, CalendarReform::default()).unwrap());

    let (status, body) = send(&app.router, get("/v1/sidereal")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["julian_day"], 2_451_545.0);
    assert_eq!(body["gmst_degrees"], 280.4606);
    assert_eq!(body["gmst_hms"], "18:41:50");
    assert_eq!(body["location_name"], "Cherbourg");
    assert_eq!(body["longitude_used"], -1.62);

    let (status, body) = send(&app.router, get("/v1/calendar")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modified_julian_day"], 51_544.5);
    assert_eq!(body["day_of_week"], "Saturday");
    assert_eq!(body["day_of_year"], 1);
}

#[tokio::test]
async fn test_sidereal_stream_is_event_stream() {
    let app = test_app(CalendarReform::default());

    let response = app
        .router
        .clone()
        .oneshot(get("/v1/sidereal/stream"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));
}
