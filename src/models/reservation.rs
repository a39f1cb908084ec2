use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// The in-progress reservation owned by a form session until submission.
// Numeric entry is kept as typed text until validation parses it, and the
// date stays in ISO YYYY-MM-DD form as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationDraft {
    pub date: String,
    pub time: String,
    pub party_size: String,
    pub occasion: Occasion,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub special_requests: String,
}

impl Default for ReservationDraft {
    fn default() -> Self {
        Self {
            date: String::new(),
            time: String::new(),
            party_size: "1".to_string(),
            occasion: Occasion::Birthday,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            special_requests: String::new(),
        }
    }
}

// Occasion is informational only and never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Occasion {
    #[default]
    Birthday,
    Anniversary,
    Business,
    Other,
}

impl Occasion {
    pub fn label(&self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Anniversary => "Anniversary",
            Occasion::Business => "Business",
            Occasion::Other => "Other",
        }
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Occasion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Birthday" => Ok(Occasion::Birthday),
            "Anniversary" => Ok(Occasion::Anniversary),
            "Business" => Ok(Occasion::Business),
            "Other" => Ok(Occasion::Other),
            other => Err(format!("Unknown occasion: {}", other)),
        }
    }
}

// Field names as exchanged with the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReservationField {
    Date,
    Time,
    PartySize,
    Occasion,
    FirstName,
    LastName,
    Email,
    SpecialRequests,
}

// Lifecycle of a form session's submission.
// Idle -> Submitting on a valid submit attempt, Submitting -> Confirmed on
// success, Submitting -> Idle on failure. Confirmed is only reachable from a
// draft that passed full validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Confirmed,
}
