#[cfg(test)]
mod client_tests {
    use chrono::NaiveDate;

    use crate::client::{BookingApi, RemoteBookingClient, SimulatedBookingApi};
    use crate::models::reservation::ReservationDraft;
    use crate::services::availability::slots_for_date;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_draft() -> ReservationDraft {
        ReservationDraft {
            date: "2025-06-10".to_string(),
            time: "19:00".to_string(),
            party_size: "4".to_string(),
            first_name: "Jane".to_string(),
            email: "jane.doe@example.com".to_string(),
            ..ReservationDraft::default()
        }
    }

    #[tokio::test]
    async fn test_simulated_fetch_matches_pure_derivation() {
        let api = SimulatedBookingApi::instant();
        let d = date(2025, 6, 10);

        let slots = api.fetch_slots(d).await.unwrap();
        assert_eq!(slots, slots_for_date(d));
    }

    #[tokio::test]
    async fn test_simulated_fetch_is_deterministic() {
        let api = SimulatedBookingApi::instant();
        let d = date(2025, 9, 3);

        let first = api.fetch_slots(d).await.unwrap();
        let second = api.fetch_slots(d).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_simulated_submission_with_forced_success() {
        let api = SimulatedBookingApi::instant().with_success_rate(1.0);
        assert!(api.submit_reservation(&sample_draft()).await.unwrap());
    }

    #[tokio::test]
    async fn test_simulated_submission_with_forced_decline() {
        let api = SimulatedBookingApi::instant().with_success_rate(0.0);
        assert!(!api.submit_reservation(&sample_draft()).await.unwrap());
    }

    #[test]
    fn test_remote_client_normalizes_endpoint() {
        // Trailing slashes must not produce double-slash request paths
        let client = RemoteBookingClient::new("http://localhost:8080/");
        assert_eq!(client.endpoint(), "http://localhost:8080");

        let client = RemoteBookingClient::new("http://localhost:8080");
        assert_eq!(client.endpoint(), "http://localhost:8080");
    }
}
