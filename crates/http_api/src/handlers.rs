use std::collections::HashMap;

use axum::{
    extract::{Extension, Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{
    NonceResponse, OptionNameRequest, OptionNamesRequest, SetAutoloadOptionsRequest,
    UpdateAutoloadRequest,
};

use crate::{errors::HttpError, state::HttpState, tracking::TrackerHandle};

pub async fn unused_options(
    State(state): State<HttpState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::unused_options(&state.context, &params)?;
    Ok(Json(response))
}

pub async fn used_not_autoloaded_options(
    State(state): State<HttpState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::used_not_autoloaded_options(&state.context, &params)?;
    Ok(Json(response))
}

pub async fn options_that_do_not_exist(
    State(state): State<HttpState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::options_that_do_not_exist(&state.context, &params)?;
    Ok(Json(response))
}

pub async fn all_options(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::all_options(&state.context)?;
    Ok(Json(response))
}

pub async fn usage(State(state): State<HttpState>) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::usage_status(&state.context)?;
    Ok(Json(response))
}

pub async fn nonce(State(state): State<HttpState>) -> impl IntoResponse {
    Json(NonceResponse { nonce: state.nonce })
}

pub async fn update_autoload(
    State(state): State<HttpState>,
    Json(req): Json<UpdateAutoloadRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::update_autoload(&state.context, req)?;
    Ok(Json(response))
}

pub async fn delete_option(
    State(state): State<HttpState>,
    Json(req): Json<OptionNameRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::delete_option(&state.context, req)?;
    Ok(Json(response))
}

pub async fn delete_options(
    State(state): State<HttpState>,
    Json(req): Json<OptionNamesRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::delete_options(&state.context, req)?;
    Ok(Json(response))
}

pub async fn set_autoload_options(
    State(state): State<HttpState>,
    Json(req): Json<SetAutoloadOptionsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::set_autoload_options(&state.context, req)?;
    Ok(Json(response))
}

pub async fn create_option_false(
    State(state): State<HttpState>,
    Json(req): Json<OptionNameRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::create_option_false(&state.context, req)?;
    Ok(Json(response))
}

/// The reset is applied when the request's tracking scope finishes, so reads
/// made later in the same request cannot resurrect old counts.
pub async fn reset(
    State(state): State<HttpState>,
    tracker: Option<Extension<TrackerHandle>>,
) -> Result<impl IntoResponse, HttpError> {
    match tracker {
        Some(Extension(handle)) => {
            handle.request_reset();
            Ok(Json(app_api::success()))
        }
        None => Ok(Json(app_api::reset_now(&state.context)?)),
    }
}

pub async fn not_found() -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        "no route was found matching the URL and request method",
        Some("rest_no_route"),
    )
}
