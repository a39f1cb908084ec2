use serde::{Deserialize, Serialize};

use crate::models::reservation::{ReservationDraft, ReservationField, SubmissionState};
use crate::services::validation::ValidationErrors;

// Snapshot of a form session handed to the presentation layer: the draft,
// the currently visible errors, the slot list, the derived validity used to
// enable the submit control, and the submission lifecycle state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub draft: ReservationDraft,
    pub errors: ValidationErrors,
    pub available_slots: Vec<String>,
    pub form_is_valid: bool,
    pub submission_state: SubmissionState,
    pub notice: Option<String>,
}

// Response for session creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub session: SessionView,
}

// Request body for a single field mutation
#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: ReservationField,
    pub value: String,
}

// Request body for marking a field touched on blur
#[derive(Debug, Deserialize)]
pub struct BlurRequest {
    pub field: ReservationField,
}

// Response for a submit attempt
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub confirmed: bool,
    pub session: SessionView,
}

// Response for the availability endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub date: String,
    pub available_times: Vec<String>,
}

// Compact session listing for the management endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub submission_state: SubmissionState,
    pub form_is_valid: bool,
}
