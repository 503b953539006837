use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gauss_nullables::{NullClock, NullStore};
use gauss_rpc::{router, AppState, IdentityHeaders};
use gauss_service::{PollService, SeasonData, ServiceConfig, ServiceMetrics, Stores};
use gauss_types::{Amount, MatchId, MatchRecord, PollType, SettlementRecord, Timestamp};
use serde_json::{json, Value};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const EMAIL: &str = "x-auth-request-email";
const NAME: &str = "x-auth-request-user";

struct Harness {
    app: Router,
    store: Arc<NullStore>,
    clock: Arc<NullClock>,
}

fn harness_with(metrics: bool) -> Harness {
    let store = Arc::new(NullStore::new());
    let clock = Arc::new(NullClock::new(Timestamp::from_secs(0)));
    let mut service = PollService::new(Stores::from_shared(store.clone()), clock.clone());
    if metrics {
        service = service.with_metrics(Arc::new(ServiceMetrics::new()));
    }
    service
        .import(&SeasonData {
            matches: vec![MatchRecord {
                match_id: MatchId::from("25"),
                team_1: "RCB".into(),
                team_2: "KKR".into(),
                date: Timestamp::from_secs(7200),
                poll_close_time: Timestamp::from_secs(3600),
            }],
            settlements: vec![
                SettlementRecord {
                    user_name: "u1".into(),
                    match_id: MatchId::from("25"),
                    poll_type: PollType::Winner,
                    amount: Amount::from_units(10),
                },
                SettlementRecord {
                    user_name: "u2".into(),
                    match_id: MatchId::from("25"),
                    poll_type: PollType::Winner,
                    amount: "-2.5".parse().unwrap(),
                },
            ],
            ..SeasonData::default()
        })
        .unwrap();

    let state = AppState {
        service: Arc::new(service),
        identity: IdentityHeaders::from_config(&ServiceConfig::default()),
    };
    Harness {
        app: router(state, true),
        store,
        clock,
    }
}

fn harness() -> Harness {
    harness_with(true)
}

fn get(uri: &str, signed_in: bool) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if signed_in {
        builder = builder.header(EMAIL, "alice@example.com").header(NAME, "Alice");
    }
    builder.body(Body::empty()).unwrap()
}

fn post_vote(body: Value, signed_in: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/votes")
        .header("content-type", "application/json");
    if signed_in {
        builder = builder.header(EMAIL, "alice@example.com");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_is_public() {
    let h = harness();
    let (status, body) = send(&h.app, get("/health", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn polls_require_identity_headers() {
    let h = harness();
    let (status, body) = send(&h.app, get("/polls", false)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, body) = send(&h.app, get("/polls", true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["polls"][0]["match_id"], "25");
    assert_eq!(body["polls"][0]["margin_options"][0]["key"], "A");
}

#[tokio::test]
async fn submitted_vote_shows_in_tally() {
    let h = harness();
    let (status, body) = send(
        &h.app,
        post_vote(json!({ "match_id": "25", "poll_type": "winner", "option": "KKR" }), true),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["vote"]["user_name"], "Empty");

    let (status, body) = send(&h.app, get("/votes", true)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"]["25"]["winner"]["KKR"], 1);
    assert_eq!(body["user_choices"]["25"]["winner"], "KKR");
    assert_eq!(body["percentages"]["25"]["winner"]["KKR"], 100.0);
    assert_eq!(body["next_refresh"], "1970-01-01T01:00:00.000Z");
}

#[tokio::test]
async fn closed_poll_is_conflict() {
    let h = harness();
    h.clock.set(Timestamp::from_secs(3600));
    let (status, body) = send(
        &h.app,
        post_vote(json!({ "match_id": "25", "poll_type": "winner", "option": "KKR" }), true),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("closed"));
}

#[tokio::test]
async fn vote_errors_map_to_statuses() {
    let h = harness();
    let cases = [
        (json!({ "match_id": "25", "poll_type": "winner", "option": "CSK" }), StatusCode::UNPROCESSABLE_ENTITY),
        (json!({ "match_id": "99", "poll_type": "winner", "option": "CSK" }), StatusCode::NOT_FOUND),
        (json!({ "match_id": "25", "poll_type": "", "option": "KKR" }), StatusCode::BAD_REQUEST),
        (json!({ "match_id": "25" }), StatusCode::BAD_REQUEST),
    ];
    for (body, expected) in cases {
        let (status, _) = send(&h.app, post_vote(body, true)).await;
        assert_eq!(status, expected);
    }

    let (status, _) = send(
        &h.app,
        post_vote(json!({ "match_id": "25", "poll_type": "winner", "option": "KKR" }), false),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn store_outage_is_bad_gateway() {
    let h = harness();
    h.store.fail_all(true);
    let (status, body) = send(&h.app, get("/leaderboard", false)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn leaderboard_is_public_with_chart() {
    let h = harness();
    let (status, body) = send(&h.app, get("/leaderboard", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["standings"][0]["user_name"], "u1");
    assert_eq!(body["standings"][1]["total"], "-2.5");
    assert_eq!(body["chart"]["u2"], json!([0.0, -2.5]));
    assert_eq!(body["matches"], json!(["25"]));
}

#[tokio::test]
async fn margin_options_by_match() {
    let h = harness();
    let (status, body) = send(&h.app, get("/margin-options/5", false)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"].as_array().unwrap().len(), 4);
    let (_, wide) = send(&h.app, get("/margin-options/25", false)).await;
    assert_ne!(body["options"][0]["description"], wide["options"][0]["description"]);
}

#[tokio::test]
async fn metrics_endpoint_follows_config() {
    let h = harness();
    let response = h.app.clone().oneshot(get("/metrics", false)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("gauss_votes_accepted_total"));

    let disabled = harness_with(false);
    let (status, _) = send(&disabled.app, get("/metrics", false)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
