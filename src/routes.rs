use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{
    blur_field, create_session, delete_session, get_availability, get_session, list_sessions,
    reset_session, submit_session, update_field, AppState,
};
use crate::handlers::test::{health_check, test_reservation};

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // The session listing is a management endpoint and stays out of
    // production deployments
    let mut sessions_methods = post(create_session);
    if !is_production {
        sessions_methods = sessions_methods.get(list_sessions);
    }

    // The reservation form surface is the product; always exposed
    let form_routes = Router::new()
        .route("/availability", get(get_availability))
        .route("/reservations/sessions", sessions_methods)
        .route(
            "/reservations/sessions/:session_id",
            get(get_session).delete(delete_session),
        )
        .route(
            "/reservations/sessions/:session_id/fields",
            put(update_field),
        )
        .route("/reservations/sessions/:session_id/blur", post(blur_field))
        .route(
            "/reservations/sessions/:session_id/submit",
            post(submit_session),
        )
        .route(
            "/reservations/sessions/:session_id/reset",
            post(reset_session),
        );
    router = router.merge(form_routes);

    if !is_production {
        let debug_routes = Router::new().route("/test/reservation", get(test_reservation));
        router = router.merge(debug_routes);

        info!("Debug routes enabled - server running in development mode");
    } else {
        info!("Running in production mode - only form and health endpoints exposed");
    }

    router.with_state(app_state)
}
