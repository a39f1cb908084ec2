use axum::{
    extract::{Json as ExtractJson, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::BookingApi;
use crate::models::common::AvailabilityParams;
use crate::models::session::{
    AvailabilityResponse, BlurRequest, CreateSessionResponse, FieldUpdate, SessionSummary,
    SessionView, SubmitResponse,
};
use crate::services::form_state::{SubmitAttempt, SubmitResult};
use crate::services::sessions::SessionStore;

// AppState struct containing shared resources
pub struct AppState {
    pub api: Arc<dyn BookingApi>,
    pub sessions: Arc<SessionStore>,
}

// Fetch slots for a date, degrading any backend failure to an empty list.
// A fetch failure is never fatal; the user just sees no available times.
async fn load_slots(api: &dyn BookingApi, date: NaiveDate) -> Vec<String> {
    match api.fetch_slots(date).await {
        Ok(slots) => slots,
        Err(err) => {
            error!("Failed to fetch slots for {}: {}", date, err);
            Vec::new()
        }
    }
}

// Availability endpoint: direct provider access for a given date
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityParams>,
) -> Json<AvailabilityResponse> {
    info!("Received availability request for {}", params.date);

    let available_times = load_slots(state.api.as_ref(), params.date).await;
    Json(AvailabilityResponse {
        date: params.date.to_string(),
        available_times,
    })
}

// Create a new form session and load initial availability for today
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreateSessionResponse>, StatusCode> {
    let session_id = state.sessions.create();

    // Populate the time selector before any date is chosen
    let today = Local::now().date_naive();
    let token = state
        .sessions
        .with_session(&session_id, |session| session.next_refresh_token())
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    let slots = load_slots(state.api.as_ref(), today).await;
    state
        .sessions
        .with_session(&session_id, |session| session.apply_slots(token, slots));

    let session = state
        .sessions
        .with_session(&session_id, |session| session.view())
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(CreateSessionResponse {
        session_id,
        session,
    }))
}

// Return the current view of a session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, StatusCode> {
    state
        .sessions
        .with_session(&session_id, |session| Json(session.view()))
        .ok_or(StatusCode::NOT_FOUND)
}

// Update a single field and run the slot refresh a date change issues
pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    ExtractJson(update): ExtractJson<FieldUpdate>,
) -> Result<Json<SessionView>, StatusCode> {
    let outcome = state
        .sessions
        .with_session(&session_id, |session| {
            session.set_field(update.field, &update.value)
        })
        .ok_or(StatusCode::NOT_FOUND)?;

    let refresh = match outcome {
        Ok(refresh) => refresh,
        Err(err) => {
            warn!("Rejected field update for session {}: {}", session_id, err);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    if let Some(refresh) = refresh {
        // The lock is not held while the fetch runs; the token decides
        // whether this response still applies once it lands.
        let slots = match refresh.date.parse::<NaiveDate>() {
            Ok(date) => load_slots(state.api.as_ref(), date).await,
            Err(_) => {
                warn!(
                    "Date {:?} is not a valid ISO date, treating as no availability",
                    refresh.date
                );
                Vec::new()
            }
        };

        state.sessions.with_session(&session_id, |session| {
            session.apply_slots(refresh.token, slots)
        });
    }

    state
        .sessions
        .with_session(&session_id, |session| Json(session.view()))
        .ok_or(StatusCode::NOT_FOUND)
}

// Mark a field touched when the user leaves it
pub async fn blur_field(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    ExtractJson(blur): ExtractJson<BlurRequest>,
) -> Result<Json<SessionView>, StatusCode> {
    state
        .sessions
        .with_session(&session_id, |session| {
            session.touch(blur.field);
            Json(session.view())
        })
        .ok_or(StatusCode::NOT_FOUND)
}

// Run the submission flow for a session
pub async fn submit_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SubmitResponse>, StatusCode> {
    let attempt = state
        .sessions
        .with_session(&session_id, |session| session.begin_submit())
        .ok_or(StatusCode::NOT_FOUND)?;

    let draft = match attempt {
        SubmitAttempt::Ready(draft) => draft,
        SubmitAttempt::Invalid => {
            info!(
                "Submit attempt for session {} refused by validation",
                session_id
            );
            return finish_submit_response(&state, &session_id, false);
        }
        SubmitAttempt::AlreadyPending => {
            warn!("Session {} already has a submission in flight", session_id);
            return Err(StatusCode::CONFLICT);
        }
        SubmitAttempt::AlreadyConfirmed => {
            info!("Session {} is already confirmed", session_id);
            return finish_submit_response(&state, &session_id, true);
        }
    };

    info!(
        "Submitting reservation for session {}: {} on {} at {}",
        session_id, draft.first_name, draft.date, draft.time
    );

    let result = match state.api.submit_reservation(&draft).await {
        Ok(true) => {
            info!("Reservation confirmed for session {}", session_id);
            SubmitResult::Confirmed
        }
        Ok(false) => {
            warn!("Booking declined for session {}", session_id);
            SubmitResult::Declined
        }
        Err(err) => {
            error!("Submission failed for session {}: {}", session_id, err);
            SubmitResult::Failed
        }
    };

    state
        .sessions
        .with_session(&session_id, |session| session.complete_submit(result))
        .ok_or(StatusCode::NOT_FOUND)?;

    finish_submit_response(&state, &session_id, result == SubmitResult::Confirmed)
}

fn finish_submit_response(
    state: &Arc<AppState>,
    session_id: &str,
    confirmed: bool,
) -> Result<Json<SubmitResponse>, StatusCode> {
    state
        .sessions
        .with_session(session_id, |session| {
            Json(SubmitResponse {
                confirmed,
                session: session.view(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

// Return a session to its pristine state
pub async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, StatusCode> {
    state
        .sessions
        .with_session(&session_id, |session| {
            session.reset();
            Json(session.view())
        })
        .ok_or(StatusCode::NOT_FOUND)
}

// Drop a session entirely
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> StatusCode {
    if state.sessions.remove(&session_id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// List live sessions (management endpoint, not exposed in production)
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummary>> {
    let summaries = state.sessions.summaries();
    info!("Listing {} live sessions", summaries.len());
    Json(summaries)
}
