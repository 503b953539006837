//! HTTP request handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gauss_gate::Ballot;
use gauss_leaderboard::Leaderboard;
use gauss_registry::MarginTier;
use gauss_service::{AdhocPollView, PollService, PollSummary, ServiceError, VotesView};
use gauss_types::{MatchId, PollType, Principal, Vote};
use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::server::AppState;

/// Run a blocking service call off the async runtime.
async fn call<T, F>(service: &Arc<PollService>, f: F) -> Result<T, RpcError>
where
    T: Send + 'static,
    F: FnOnce(&PollService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| RpcError::Server(e.to_string()))?
        .map_err(RpcError::from)
}

fn principal(state: &AppState, headers: &HeaderMap) -> Option<Principal> {
    let read = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    Principal::from_parts(
        read(state.identity.email.as_str()),
        read(state.identity.name.as_str()),
    )
}

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ── Polls ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PollsResponse {
    pub polls: Vec<PollSummary>,
}

pub async fn upcoming_polls(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PollsResponse>, RpcError> {
    let principal = principal(&state, &headers);
    let polls = call(&state.service, move |s| s.upcoming_matches(principal.as_ref())).await?;
    Ok(Json(PollsResponse { polls }))
}

#[derive(Serialize)]
pub struct AdhocPollsResponse {
    pub polls: Vec<AdhocPollView>,
}

pub async fn adhoc_polls(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdhocPollsResponse>, RpcError> {
    let principal = principal(&state, &headers);
    let polls = call(&state.service, move |s| s.adhoc_polls(principal.as_ref())).await?;
    Ok(Json(AdhocPollsResponse { polls }))
}

#[derive(Serialize)]
pub struct MarginOptionsResponse {
    pub match_id: MatchId,
    pub options: &'static [MarginTier],
}

pub async fn margin_options(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MarginOptionsResponse>, RpcError> {
    let match_id = match_id
        .parse::<MatchId>()
        .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
    let options = state.service.margin_options(&match_id);
    Ok(Json(MarginOptionsResponse { match_id, options }))
}

// ── Votes ────────────────────────────────────────────────────────────────

pub async fn all_votes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VotesView>, RpcError> {
    let principal = principal(&state, &headers);
    let view = call(&state.service, move |s| s.all_votes(principal.as_ref())).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct SubmitVoteRequest {
    pub match_id: String,
    pub poll_type: String,
    pub option: String,
}

impl SubmitVoteRequest {
    fn into_ballot(self) -> Result<Ballot, RpcError> {
        let match_id = self
            .match_id
            .parse::<MatchId>()
            .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
        let poll_type = self
            .poll_type
            .parse::<PollType>()
            .map_err(|e| RpcError::InvalidRequest(e.to_string()))?;
        Ok(Ballot {
            match_id,
            poll_type,
            option: self.option,
        })
    }
}

#[derive(Serialize)]
pub struct SubmitVoteResponse {
    pub accepted: bool,
    pub vote: Vote,
}

pub async fn submit_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitVoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitVoteResponse>), RpcError> {
    let principal = principal(&state, &headers);
    if principal.is_none() {
        return Err(ServiceError::Unauthorized.into());
    }
    let Json(request) = payload.map_err(|e| RpcError::InvalidRequest(e.body_text()))?;
    let ballot = request.into_ballot()?;
    let vote = call(&state.service, move |s| s.submit_vote(principal.as_ref(), &ballot)).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitVoteResponse {
            accepted: true,
            vote,
        }),
    ))
}

// ── Leaderboard ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LeaderboardResponse {
    #[serde(flatten)]
    pub board: Leaderboard,
    /// Cumulative series as plain numbers for charting.
    pub chart: BTreeMap<String, Vec<f64>>,
}

pub async fn leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, RpcError> {
    let board = call(&state.service, |s| s.leaderboard()).await?;
    let chart = board
        .cumulative
        .iter()
        .map(|(user, series)| (user.clone(), series.iter().map(|a| a.to_f64()).collect()))
        .collect();
    Ok(Json(LeaderboardResponse { board, chart }))
}

// ── Picks ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PicksResponse {
    pub picks: BTreeMap<MatchId, String>,
}

pub async fn ai_picks(State(state): State<AppState>) -> Result<Json<PicksResponse>, RpcError> {
    let picks = call(&state.service, |s| s.ai_picks()).await?;
    Ok(Json(PicksResponse { picks }))
}

// ── Metrics ──────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<AppState>) -> Result<Response, RpcError> {
    let metrics = state
        .service
        .metrics()
        .ok_or_else(|| RpcError::NotFound("metrics are disabled".into()))?;
    let body = metrics
        .encode()
        .map_err(|e| RpcError::Server(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
