use axum::response::Json;

use crate::models::reservation::{Occasion, ReservationDraft};

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// Test endpoint that returns a filled-in reservation draft for exercising
// the form endpoints by hand
pub async fn test_reservation() -> Json<ReservationDraft> {
    Json(ReservationDraft {
        date: "2025-06-10".to_string(),
        time: "19:00".to_string(),
        party_size: "4".to_string(),
        occasion: Occasion::Anniversary,
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        special_requests: "Window seat".to_string(),
    })
}
