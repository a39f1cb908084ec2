use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::models::reservation::{ReservationDraft, ReservationField};

// Error messages surfaced next to each field
pub const DATE_REQUIRED: &str = "Date is required.";
pub const TIME_REQUIRED: &str = "Time is required.";
pub const PARTY_SIZE_RANGE: &str = "Must be between 1 and 10 guests.";
pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email address is invalid.";

// The five fields that carry validation rules. Everything else (last name,
// occasion, special requests) is never validated and never blocks submission.
pub const VALIDATED_FIELDS: [ReservationField; 5] = [
    ReservationField::Date,
    ReservationField::Time,
    ReservationField::PartySize,
    ReservationField::FirstName,
    ReservationField::Email,
];

/// Fields the user has focused and left at least once. Error visibility is
/// gated on membership; the set only shrinks on a form reset.
pub type FieldTouchedSet = HashSet<ReservationField>;

/// Field name -> human-readable message, recomputed wholesale after every
/// draft or touched-set change.
pub type ValidationErrors = HashMap<ReservationField, String>;

// Unanchored on purpose: the check is a substring search for
// non-space "@" non-space "." non-space, not a full RFC address parse.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

fn email_looks_valid(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

// A party size counts as in range only when it parses to an integer between
// 1 and 10. Empty or non-numeric entry is out of range.
fn party_size_in_range(raw: &str) -> bool {
    raw.trim()
        .parse::<i64>()
        .map(|guests| (1..=10).contains(&guests))
        .unwrap_or(false)
}

/// Compute the visible validation errors for a draft.
///
/// Every rule is evaluated independently; a field only reports an error once
/// it has been touched. The returned map completely replaces any previous
/// error state.
pub fn compute_errors(draft: &ReservationDraft, touched: &FieldTouchedSet) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if touched.contains(&ReservationField::Date) && draft.date.is_empty() {
        errors.insert(ReservationField::Date, DATE_REQUIRED.to_string());
    }

    if touched.contains(&ReservationField::Time) && draft.time.is_empty() {
        errors.insert(ReservationField::Time, TIME_REQUIRED.to_string());
    }

    if touched.contains(&ReservationField::PartySize) && !party_size_in_range(&draft.party_size) {
        errors.insert(ReservationField::PartySize, PARTY_SIZE_RANGE.to_string());
    }

    if touched.contains(&ReservationField::FirstName) && draft.first_name.trim().is_empty() {
        errors.insert(
            ReservationField::FirstName,
            FIRST_NAME_REQUIRED.to_string(),
        );
    }

    if touched.contains(&ReservationField::Email) {
        if draft.email.is_empty() {
            errors.insert(ReservationField::Email, EMAIL_REQUIRED.to_string());
        } else if !email_looks_valid(&draft.email) {
            errors.insert(ReservationField::Email, EMAIL_INVALID.to_string());
        }
    }

    errors
}

/// Overall validity of a draft, independent of touched state.
///
/// The submit control is enabled only while this holds and no submission is
/// in flight.
pub fn draft_is_valid(draft: &ReservationDraft) -> bool {
    !draft.date.is_empty()
        && !draft.time.is_empty()
        && party_size_in_range(&draft.party_size)
        && !draft.first_name.trim().is_empty()
        && !draft.email.is_empty()
        && email_looks_valid(&draft.email)
}
