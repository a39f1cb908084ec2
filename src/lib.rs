//! Restaurant Reservation Form Service
//!
//! This library implements a small reservation-form service: per-session
//! booking drafts with field validation and touch tracking, mock time-slot
//! availability derived from a seeded generator, and a submission flow
//! against a simulated (or remote) booking backend.
//!
//! # Modules
//!
//! - `client`: the `BookingApi` collaborator seam with simulated and remote
//!   implementations
//! - `services`: availability derivation, validation rules, the form-state
//!   machine and the in-memory session store
//! - `handlers` / `routes`: the HTTP surface exposed to a presentation layer
//!
//! # Validation
//!
//! Validation is a pure function over the draft and the touched-field set;
//! error visibility is gated on a field having been touched, while overall
//! validity is touch-independent and gates the submit flow.

pub mod client;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
mod client_test;

// Re-export the main types for ease of use
pub use client::{BookingApi, BookingApiError, RemoteBookingClient, SimulatedBookingApi};
pub use handlers::api::AppState;
pub use models::reservation::{Occasion, ReservationDraft, ReservationField, SubmissionState};
pub use routes::create_router;
pub use services::form_state::FormSession;
pub use services::sessions::SessionStore;
