use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use tradebook_booking::{routes, AvailabilityResolver, BookingState, JobDurationTable};
use tradebook_common::{
    external_service_error, BoxFuture, BusyInterval, BusyIntervalSource, InfallibleFuture, TradebookError,
    TravelTimeEstimator,
};

// Deterministic collaborators that count how often they were called
struct CountingTravel {
    minutes: f64,
    calls: AtomicUsize,
}

impl TravelTimeEstimator for CountingTravel {
    fn travel_minutes<'a>(
        &'a self,
        _origin: &'a str,
        _destination: &'a str,
    ) -> InfallibleFuture<'a, f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let minutes = self.minutes;
        Box::pin(async move { minutes })
    }
}

struct CountingCalendar {
    busy: Vec<BusyInterval>,
    fail: bool,
    calls: AtomicUsize,
}

impl BusyIntervalSource for CountingCalendar {
    fn busy_intervals(
        &self,
        _range_start: DateTime<Utc>,
        _range_end: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, TradebookError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = if self.fail {
            Err(external_service_error("Google Calendar", "quota exceeded"))
        } else {
            Ok(self.busy.clone())
        };
        Box::pin(async move { result })
    }
}

struct TestApp {
    router: Router,
    travel: Arc<CountingTravel>,
    calendar: Arc<CountingCalendar>,
}

fn test_app(travel_minutes: f64, busy: Vec<BusyInterval>, calendar_fails: bool) -> TestApp {
    let travel = Arc::new(CountingTravel {
        minutes: travel_minutes,
        calls: AtomicUsize::new(0),
    });
    let calendar = Arc::new(CountingCalendar {
        busy,
        fail: calendar_fails,
        calls: AtomicUsize::new(0),
    });
    let resolver = AvailabilityResolver::new(
        Arc::new(JobDurationTable::builtin()),
        travel.clone(),
        calendar.clone(),
        "Depot, Leeds",
    );
    let state = Arc::new(BookingState::new(resolver, Tz::UTC));

    TestApp {
        router: routes(state),
        travel,
        calendar,
    }
}

fn utc(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
}

async fn post_json(router: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/get_open_slots")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn leak_request() -> String {
    json!({
        "job_type": "leak",
        "requested_time": "2024-01-01T09:00:00Z",
        "job_address": "1 High Street, Leeds"
    })
    .to_string()
}

#[tokio::test]
async fn test_free_calendar_returns_slot() {
    let app = test_app(10.0, Vec::new(), false);

    let (status, body) = post_json(app.router, leak_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "available": true,
            "slot": {
                "engineer": "Tom",
                "start": "2024-01-01T09:00:00Z",
                "end": "2024-01-01T10:10:00Z",
                "travel_time_minutes": 10.0,
                "duration_minutes": 60
            }
        })
    );
    assert_eq!(app.travel.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.calendar.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_conflicting_event_returns_no_slots() {
    let app = test_app(10.0, vec![BusyInterval::new(utc(9, 30), utc(9, 45))], false);

    let (status, body) = post_json(app.router, leak_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "available": false, "message": "No slots available" })
    );
}

#[tokio::test]
async fn test_missing_address_is_rejected_without_lookups() {
    let app = test_app(10.0, Vec::new(), false);
    let body = json!({
        "job_type": "leak",
        "requested_time": "2024-01-01T09:00:00Z"
    })
    .to_string();

    let (status, body) = post_json(app.router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Invalid input:"), "got {message}");
    assert!(message.contains("job_address"), "got {message}");
    assert_eq!(app.travel.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.calendar.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bad_timestamp_is_rejected_without_lookups() {
    let app = test_app(10.0, Vec::new(), false);
    let body = json!({
        "job_type": "leak",
        "requested_time": "tomorrow morning",
        "job_address": "1 High Street, Leeds"
    })
    .to_string();

    let (status, _) = post_json(app.router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.travel.calls.load(Ordering::SeqCst), 0);
    assert_eq!(app.calendar.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = test_app(10.0, Vec::new(), false);

    let (status, body) = post_json(app.router, "{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 400);
    assert_eq!(app.calendar.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_calendar_failure_is_bad_gateway() {
    let app = test_app(10.0, Vec::new(), true);

    let (status, body) = post_json(app.router, leak_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], 502);
    assert_eq!(
        body["error"]["message"],
        "External service error: Google Calendar - quota exceeded"
    );
}

#[tokio::test]
async fn test_naive_time_uses_state_time_zone() {
    let travel = Arc::new(CountingTravel {
        minutes: 0.0,
        calls: AtomicUsize::new(0),
    });
    let calendar = Arc::new(CountingCalendar {
        busy: Vec::new(),
        fail: false,
        calls: AtomicUsize::new(0),
    });
    let resolver = AvailabilityResolver::new(
        Arc::new(JobDurationTable::builtin()),
        travel,
        calendar,
        "Depot, Leeds",
    );
    let router = routes(Arc::new(BookingState::new(resolver, Tz::Europe__London)));
    let body = json!({
        "job_type": "Fuse Replacement",
        "requested_time": "2024-06-01T10:00:00",
        "job_address": "1 High Street, Leeds"
    })
    .to_string();

    let (status, body) = post_json(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slot"]["start"], "2024-06-01T10:00:00+01:00");
    assert_eq!(body["slot"]["end"], "2024-06-01T10:30:00+01:00");
}

#[tokio::test]
async fn test_minute_precision_utc_time_is_accepted() {
    let app = test_app(10.0, Vec::new(), false);
    let body = json!({
        "job_type": "leak",
        "requested_time": "2024-01-01T09:00Z",
        "job_address": "1 High Street, Leeds"
    })
    .to_string();

    let (status, body) = post_json(app.router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slot"]["start"], "2024-01-01T09:00:00Z");
    assert_eq!(body["slot"]["end"], "2024-01-01T10:10:00Z");
}
