mod errors;
mod handlers;
mod middleware;
mod state;
mod tracking;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

pub use errors::HttpError;
pub use middleware::NONCE_HEADER;
pub use state::{HttpState, generate_token};
pub use tracking::{TrackerHandle, is_admin_page, track_requests};

pub fn router(state: HttpState) -> Router<()> {
    let guarded = Router::new()
        .route("/unused-options", get(handlers::unused_options))
        .route(
            "/used-not-autoloaded-options",
            get(handlers::used_not_autoloaded_options),
        )
        .route(
            "/options-that-do-not-exist",
            get(handlers::options_that_do_not_exist),
        )
        .route("/all-options", get(handlers::all_options))
        .route("/usage", get(handlers::usage))
        .route("/update-autoload", post(handlers::update_autoload))
        .route("/delete-option", post(handlers::delete_option))
        .route("/delete-options", post(handlers::delete_options))
        .route("/set-autoload-options", post(handlers::set_autoload_options))
        .route("/create-option-false", post(handlers::create_option_false))
        .route("/reset", post(handlers::reset))
        .route_layer(axum_middleware::from_fn_with_state(
            state.context.app_state.clone(),
            tracking::track_requests,
        ))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_nonce,
        ));

    let api = Router::new()
        .route("/nonce", get(handlers::nonce))
        .merge(guarded)
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests;
