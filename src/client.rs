use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use dotenv::dotenv;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::reservation::ReservationDraft;
use crate::services::availability::{generate_slots, SeededRandom};

// Artificial latency window of the simulated backend, roughly 600-1000ms
// per call so callers exercise their loading states.
const DEFAULT_BASE_DELAY_MS: u64 = 600;
const DEFAULT_DELAY_JITTER_MS: u64 = 400;
const DEFAULT_SUCCESS_RATE: f64 = 0.9;

/// Errors from a booking backend call.
///
/// Neither variant is fatal to the service: a failed slot fetch degrades to
/// an empty slot list and a failed submission returns the form to an
/// editable state with a notice.
#[derive(Debug, Error)]
pub enum BookingApiError {
    #[error("booking backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("booking backend error: {0}")]
    Backend(String),
}

/// The external booking collaborator consumed by the form service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Fetch the bookable time labels for a date.
    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingApiError>;

    /// Submit a finished reservation draft. Ok(false) means the backend
    /// answered but declined the booking.
    async fn submit_reservation(&self, draft: &ReservationDraft)
        -> Result<bool, BookingApiError>;
}

/// Simulated booking backend.
///
/// Availability is derived from a generator seeded by the requested date's
/// day of month, so the same date always yields the same slots, and each
/// call carries artificial latency so callers exercise their loading states.
/// Submissions sleep the same window and then succeed with a configurable
/// probability.
pub struct SimulatedBookingApi {
    base_delay_ms: u64,
    delay_jitter_ms: u64,
    success_rate: f64,
}

impl SimulatedBookingApi {
    /// Create a simulated backend with the stock latency window and a 90%
    /// submission success rate, overridable via SIMULATED_SUCCESS_RATE.
    pub fn new() -> Self {
        dotenv().ok();

        let success_rate = env::var("SIMULATED_SUCCESS_RATE")
            .ok()
            .and_then(|val| val.parse::<f64>().ok())
            .unwrap_or(DEFAULT_SUCCESS_RATE);

        Self {
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            delay_jitter_ms: DEFAULT_DELAY_JITTER_MS,
            success_rate,
        }
    }

    /// Simulated backend with no latency, for tests.
    pub fn instant() -> Self {
        Self {
            base_delay_ms: 0,
            delay_jitter_ms: 0,
            success_rate: DEFAULT_SUCCESS_RATE,
        }
    }

    /// Force the submission outcome: 1.0 always confirms, 0.0 always
    /// declines.
    pub fn with_success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate;
        self
    }

    async fn simulate_latency(&self, fraction: f64) {
        let delay_ms = self.base_delay_ms + (fraction * self.delay_jitter_ms as f64) as u64;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }
    }
}

impl Default for SimulatedBookingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingApi for SimulatedBookingApi {
    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingApiError> {
        // One generator per call; the delay draw comes from the same
        // generator after the slot draws, as the backend it simulates does.
        let mut random = SeededRandom::new(u64::from(date.day()));
        let slots = generate_slots(&mut random);

        debug!("Simulated availability for {}: {} slots", date, slots.len());
        self.simulate_latency(random.next_f64()).await;

        Ok(slots)
    }

    async fn submit_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<bool, BookingApiError> {
        info!(
            "Simulated submission for {} {} on {} at {}",
            draft.first_name, draft.last_name, draft.date, draft.time
        );

        let (delay_fraction, outcome_draw) = {
            let mut rng = rand::thread_rng();
            (rng.gen::<f64>(), rng.gen::<f64>())
        };
        self.simulate_latency(delay_fraction).await;

        Ok(outcome_draw < self.success_rate)
    }
}

// Wire shapes of the remote booking backend
#[derive(Debug, Deserialize)]
struct RemoteAvailabilityResponse {
    available_times: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteSubmissionResponse {
    success: bool,
}

/// Client for a real booking backend over HTTP.
///
/// Selected at startup by setting BOOKING_API_ENDPOINT; without it the
/// service runs against the simulated backend.
pub struct RemoteBookingClient {
    client: Client,
    endpoint: String,
}

impl RemoteBookingClient {
    /// Create a client from environment variables.
    pub fn from_env() -> Self {
        dotenv().ok();

        Self::new(
            &env::var("BOOKING_API_ENDPOINT")
                .expect("BOOKING_API_ENDPOINT must be set in environment"),
        )
    }

    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingApi for RemoteBookingClient {
    async fn fetch_slots(&self, date: NaiveDate) -> Result<Vec<String>, BookingApiError> {
        let url = format!("{}/availability", self.endpoint);

        info!("Fetching availability for {} from booking backend", date);
        debug!("API URL: {}", url);

        let res = self
            .client
            .get(&url)
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        debug!("Availability response status: {}", res.status());

        let response = res
            .error_for_status()?
            .json::<RemoteAvailabilityResponse>()
            .await?;
        Ok(response.available_times)
    }

    async fn submit_reservation(
        &self,
        draft: &ReservationDraft,
    ) -> Result<bool, BookingApiError> {
        let url = format!("{}/reservations", self.endpoint);

        info!("Submitting reservation for {} to booking backend", draft.date);
        debug!("API URL: {}", url);

        let res = self.client.post(&url).json(draft).send().await?;
        debug!("Submission response status: {}", res.status());

        let response = res
            .error_for_status()?
            .json::<RemoteSubmissionResponse>()
            .await?;
        Ok(response.success)
    }
}
