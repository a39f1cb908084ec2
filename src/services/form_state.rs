use tracing::debug;

use crate::models::reservation::{ReservationDraft, ReservationField, SubmissionState};
use crate::models::session::SessionView;
use crate::services::validation::{
    compute_errors, draft_is_valid, FieldTouchedSet, ValidationErrors, VALIDATED_FIELDS,
};

// Notices surfaced to the user when a submission does not confirm
pub const BOOKING_DECLINED_NOTICE: &str = "Booking failed. Please try again.";
pub const BOOKING_ERROR_NOTICE: &str = "An error occurred during booking. Please try again.";

// A slot refresh issued by a date change (or the initial load). The token is
// compared against the session's latest issued token when the response
// arrives, so slower responses for superseded requests are discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRefresh {
    pub token: u64,
    pub date: String,
}

// Outcome of asking a session to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// The draft passed full validation; submit this clone of it.
    Ready(ReservationDraft),
    /// Validation failed; errors are now visible and no call is made.
    Invalid,
    /// A submission is already in flight.
    AlreadyPending,
    /// The session already holds a confirmed booking.
    AlreadyConfirmed,
}

// Outcome of a finished submission call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResult {
    /// The backend accepted the booking.
    Confirmed,
    /// The backend answered but declined the booking.
    Declined,
    /// The call itself failed; treated like a declined booking.
    Failed,
}

/// State machine for one reservation form session.
///
/// Owns the draft, the touched set, the recomputed errors, the slot list and
/// the submission lifecycle. All mutation goes through the methods below so
/// errors are never stale and Confirmed is only reachable from a draft that
/// passed full validation.
pub struct FormSession {
    draft: ReservationDraft,
    touched: FieldTouchedSet,
    errors: ValidationErrors,
    available_slots: Vec<String>,
    submission_state: SubmissionState,
    slot_request_seq: u64,
    notice: Option<String>,
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            draft: ReservationDraft::default(),
            touched: FieldTouchedSet::new(),
            errors: ValidationErrors::new(),
            available_slots: Vec::new(),
            submission_state: SubmissionState::Idle,
            slot_request_seq: 0,
            notice: None,
        }
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn available_slots(&self) -> &[String] {
        &self.available_slots
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission_state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn refresh_errors(&mut self) {
        self.errors = compute_errors(&self.draft, &self.touched);
    }

    /// Replace one field's value and recompute errors.
    ///
    /// A change to a non-empty date additionally issues a slot refresh for
    /// the caller to run. An unknown occasion label is a caller error and
    /// leaves the draft untouched.
    pub fn set_field(
        &mut self,
        field: ReservationField,
        value: &str,
    ) -> Result<Option<SlotRefresh>, String> {
        match field {
            ReservationField::Date => self.draft.date = value.to_string(),
            ReservationField::Time => self.draft.time = value.to_string(),
            ReservationField::PartySize => self.draft.party_size = value.to_string(),
            ReservationField::Occasion => self.draft.occasion = value.parse()?,
            ReservationField::FirstName => self.draft.first_name = value.to_string(),
            ReservationField::LastName => self.draft.last_name = value.to_string(),
            ReservationField::Email => self.draft.email = value.to_string(),
            ReservationField::SpecialRequests => self.draft.special_requests = value.to_string(),
        }

        self.refresh_errors();

        // The previously loaded slots stay visible while the fetch runs, and
        // an already-selected time is left alone even if the refreshed list
        // no longer offers it.
        if field == ReservationField::Date && !self.draft.date.is_empty() {
            let token = self.next_refresh_token();
            return Ok(Some(SlotRefresh {
                token,
                date: self.draft.date.clone(),
            }));
        }

        Ok(None)
    }

    /// Mark a field touched (first blur) and recompute errors. The touched
    /// set only grows here; reset() is the one way back.
    pub fn touch(&mut self, field: ReservationField) {
        self.touched.insert(field);
        self.refresh_errors();
    }

    /// Issue a refresh token outside of a date change, for the initial
    /// availability load of a fresh session.
    pub fn next_refresh_token(&mut self) -> u64 {
        self.slot_request_seq += 1;
        self.slot_request_seq
    }

    /// Apply a finished slot fetch. Returns false (and changes nothing) when
    /// a later refresh has superseded the request that produced it.
    pub fn apply_slots(&mut self, token: u64, slots: Vec<String>) -> bool {
        if token != self.slot_request_seq {
            debug!(
                "Discarding stale slot response (token {} superseded by {})",
                token, self.slot_request_seq
            );
            return false;
        }
        self.available_slots = slots;
        true
    }

    /// Start a submission attempt.
    ///
    /// Forces all validated fields into the touched set so every error
    /// becomes visible, then either refuses or enters Submitting and hands
    /// back a clone of the draft for the collaborator call.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        match self.submission_state {
            SubmissionState::Submitting => return SubmitAttempt::AlreadyPending,
            SubmissionState::Confirmed => return SubmitAttempt::AlreadyConfirmed,
            SubmissionState::Idle => {}
        }

        for field in VALIDATED_FIELDS {
            self.touched.insert(field);
        }
        self.refresh_errors();

        if !draft_is_valid(&self.draft) {
            debug!("Submit attempt refused: draft failed validation");
            return SubmitAttempt::Invalid;
        }

        self.notice = None;
        self.submission_state = SubmissionState::Submitting;
        SubmitAttempt::Ready(self.draft.clone())
    }

    /// Finish a submission. Always leaves Submitting: either the session is
    /// Confirmed, or it returns to Idle with a notice and the draft intact
    /// so the user can retry without re-entering anything.
    pub fn complete_submit(&mut self, result: SubmitResult) {
        match result {
            SubmitResult::Confirmed => {
                self.submission_state = SubmissionState::Confirmed;
                self.notice = None;
            }
            SubmitResult::Declined => {
                self.submission_state = SubmissionState::Idle;
                self.notice = Some(BOOKING_DECLINED_NOTICE.to_string());
            }
            SubmitResult::Failed => {
                self.submission_state = SubmissionState::Idle;
                self.notice = Some(BOOKING_ERROR_NOTICE.to_string());
            }
        }
    }

    /// Return the session to its pristine state. The only operation that
    /// shrinks the touched set.
    pub fn reset(&mut self) {
        *self = FormSession::new();
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            available_slots: self.available_slots.clone(),
            form_is_valid: draft_is_valid(&self.draft),
            submission_state: self.submission_state,
            notice: self.notice.clone(),
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}
