#[cfg(test)]
mod form_state_tests {
    use crate::models::reservation::{Occasion, ReservationField, SubmissionState};
    use crate::services::form_state::{
        FormSession, SubmitAttempt, SubmitResult, BOOKING_DECLINED_NOTICE, BOOKING_ERROR_NOTICE,
    };
    use crate::services::validation::{
        DATE_REQUIRED, EMAIL_INVALID, EMAIL_REQUIRED, FIRST_NAME_REQUIRED, TIME_REQUIRED,
    };

    // Fill in every field required for a submittable draft
    fn fill_valid(session: &mut FormSession) {
        session.set_field(ReservationField::Date, "2025-06-10").unwrap();
        session.set_field(ReservationField::Time, "19:00").unwrap();
        session.set_field(ReservationField::PartySize, "4").unwrap();
        session
            .set_field(ReservationField::FirstName, "Jane")
            .unwrap();
        session
            .set_field(ReservationField::Email, "jane.doe@example.com")
            .unwrap();
    }

    #[test]
    fn test_new_session_defaults() {
        let session = FormSession::new();
        assert_eq!(session.draft().party_size, "1");
        assert_eq!(session.draft().occasion, Occasion::Birthday);
        assert!(session.draft().date.is_empty());
        assert!(session.errors().is_empty());
        assert!(session.available_slots().is_empty());
        assert_eq!(session.submission_state(), SubmissionState::Idle);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_date_change_issues_refresh_with_increasing_tokens() {
        let mut session = FormSession::new();

        let first = session
            .set_field(ReservationField::Date, "2025-06-10")
            .unwrap()
            .expect("date change issues a refresh");
        let second = session
            .set_field(ReservationField::Date, "2025-06-11")
            .unwrap()
            .expect("date change issues a refresh");

        assert_eq!(first.date, "2025-06-10");
        assert_eq!(second.date, "2025-06-11");
        assert!(second.token > first.token);
    }

    #[test]
    fn test_clearing_date_issues_no_refresh() {
        let mut session = FormSession::new();
        session.set_field(ReservationField::Date, "2025-06-10").unwrap();
        let refresh = session.set_field(ReservationField::Date, "").unwrap();
        assert!(refresh.is_none());
    }

    #[test]
    fn test_non_date_fields_issue_no_refresh() {
        let mut session = FormSession::new();
        assert!(session
            .set_field(ReservationField::Time, "19:00")
            .unwrap()
            .is_none());
        assert!(session
            .set_field(ReservationField::Email, "jane@example.com")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_stale_slot_response_is_discarded() {
        let mut session = FormSession::new();

        let first = session
            .set_field(ReservationField::Date, "2025-06-10")
            .unwrap()
            .unwrap();
        let second = session
            .set_field(ReservationField::Date, "2025-06-11")
            .unwrap()
            .unwrap();

        // The newer request's response lands first
        assert!(session.apply_slots(second.token, vec!["18:00".to_string()]));
        assert_eq!(session.available_slots(), ["18:00".to_string()]);

        // The slower, superseded response must not overwrite it
        assert!(!session.apply_slots(first.token, vec!["21:30".to_string()]));
        assert_eq!(session.available_slots(), ["18:00".to_string()]);
    }

    #[test]
    fn test_selected_time_survives_slot_refresh() {
        let mut session = FormSession::new();
        session.set_field(ReservationField::Time, "19:00").unwrap();

        let refresh = session
            .set_field(ReservationField::Date, "2025-06-10")
            .unwrap()
            .unwrap();
        // The refreshed list no longer offers 19:00; the selection stays
        session.apply_slots(refresh.token, vec!["17:30".to_string(), "22:00".to_string()]);

        assert_eq!(session.draft().time, "19:00");
        assert_eq!(
            session.available_slots(),
            ["17:30".to_string(), "22:00".to_string()]
        );
    }

    #[test]
    fn test_previous_slots_remain_until_refresh_applies() {
        let mut session = FormSession::new();
        let refresh = session
            .set_field(ReservationField::Date, "2025-06-10")
            .unwrap()
            .unwrap();
        session.apply_slots(refresh.token, vec!["17:00".to_string()]);

        // A new date change leaves the old list visible while pending
        session.set_field(ReservationField::Date, "2025-06-11").unwrap();
        assert_eq!(session.available_slots(), ["17:00".to_string()]);
    }

    #[test]
    fn test_unknown_occasion_is_rejected_without_mutation() {
        let mut session = FormSession::new();
        let result = session.set_field(ReservationField::Occasion, "Graduation");
        assert!(result.is_err());
        assert_eq!(session.draft().occasion, Occasion::Birthday);

        session
            .set_field(ReservationField::Occasion, "Anniversary")
            .unwrap();
        assert_eq!(session.draft().occasion, Occasion::Anniversary);
    }

    #[test]
    fn test_touch_gates_error_visibility() {
        let mut session = FormSession::new();
        session.set_field(ReservationField::Email, "invalid-email").unwrap();
        assert!(session.errors().is_empty());

        session.touch(ReservationField::Email);
        assert_eq!(
            session.errors().get(&ReservationField::Email).unwrap(),
            EMAIL_INVALID
        );

        // Correcting the field clears the error on the next recomputation
        session
            .set_field(ReservationField::Email, "valid@email.com")
            .unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_submit_on_empty_form_touches_all_and_surfaces_errors() {
        let mut session = FormSession::new();

        let attempt = session.begin_submit();
        assert_eq!(attempt, SubmitAttempt::Invalid);
        assert_eq!(session.submission_state(), SubmissionState::Idle);

        // All four applicable required-field errors appear at once; the
        // default party size of 1 is valid so it does not error
        let errors = session.errors();
        assert_eq!(errors.get(&ReservationField::Date).unwrap(), DATE_REQUIRED);
        assert_eq!(errors.get(&ReservationField::Time).unwrap(), TIME_REQUIRED);
        assert_eq!(
            errors.get(&ReservationField::FirstName).unwrap(),
            FIRST_NAME_REQUIRED
        );
        assert_eq!(errors.get(&ReservationField::Email).unwrap(), EMAIL_REQUIRED);
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_valid_submit_hands_back_the_exact_draft() {
        let mut session = FormSession::new();
        fill_valid(&mut session);
        session
            .set_field(ReservationField::Occasion, "Anniversary")
            .unwrap();
        session.set_field(ReservationField::LastName, "Doe").unwrap();
        session
            .set_field(ReservationField::SpecialRequests, "Window seat")
            .unwrap();

        let attempt = session.begin_submit();
        let draft = match attempt {
            SubmitAttempt::Ready(draft) => draft,
            other => panic!("Expected Ready, got {:?}", other),
        };

        assert_eq!(draft, *session.draft());
        assert_eq!(draft.date, "2025-06-10");
        assert_eq!(draft.occasion, Occasion::Anniversary);
        assert_eq!(session.submission_state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_no_second_submission_while_one_is_in_flight() {
        let mut session = FormSession::new();
        fill_valid(&mut session);

        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
        assert_eq!(session.begin_submit(), SubmitAttempt::AlreadyPending);
    }

    #[test]
    fn test_confirmed_submission() {
        let mut session = FormSession::new();
        fill_valid(&mut session);

        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
        session.complete_submit(SubmitResult::Confirmed);

        assert_eq!(session.submission_state(), SubmissionState::Confirmed);
        assert!(session.notice().is_none());
        assert_eq!(session.begin_submit(), SubmitAttempt::AlreadyConfirmed);
    }

    #[test]
    fn test_declined_submission_returns_to_idle_with_notice() {
        let mut session = FormSession::new();
        fill_valid(&mut session);
        let draft_before = session.draft().clone();

        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
        session.complete_submit(SubmitResult::Declined);

        assert_eq!(session.submission_state(), SubmissionState::Idle);
        assert_eq!(session.notice().unwrap(), BOOKING_DECLINED_NOTICE);
        // The draft is preserved so the user can retry without re-entering
        assert_eq!(*session.draft(), draft_before);
    }

    #[test]
    fn test_failed_submission_returns_to_idle_with_notice() {
        let mut session = FormSession::new();
        fill_valid(&mut session);
        let draft_before = session.draft().clone();

        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
        session.complete_submit(SubmitResult::Failed);

        assert_eq!(session.submission_state(), SubmissionState::Idle);
        assert_eq!(session.notice().unwrap(), BOOKING_ERROR_NOTICE);
        assert_eq!(*session.draft(), draft_before);

        // The session stays editable and can retry
        assert!(matches!(session.begin_submit(), SubmitAttempt::Ready(_)));
    }

    #[test]
    fn test_reset_restores_pristine_state() {
        let mut session = FormSession::new();
        fill_valid(&mut session);
        session.touch(ReservationField::Email);
        let refresh = session
            .set_field(ReservationField::Date, "2025-06-12")
            .unwrap()
            .unwrap();
        session.apply_slots(refresh.token, vec!["20:00".to_string()]);

        session.reset();

        assert!(session.draft().date.is_empty());
        assert_eq!(session.draft().party_size, "1");
        assert!(session.errors().is_empty());
        assert!(session.available_slots().is_empty());
        assert_eq!(session.submission_state(), SubmissionState::Idle);
    }

    #[test]
    fn test_view_reflects_current_state() {
        let mut session = FormSession::new();
        let view = session.view();
        assert!(!view.form_is_valid);
        assert_eq!(view.submission_state, SubmissionState::Idle);

        fill_valid(&mut session);
        let view = session.view();
        assert!(view.form_is_valid);
        assert_eq!(view.draft.first_name, "Jane");
    }
}
