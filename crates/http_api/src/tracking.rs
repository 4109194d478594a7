//! Per-request option usage tracking.
//!
//! [`track_requests`] opens a [`RequestScope`] before the inner service runs
//! and persists it once the response is ready. Handlers reach the scope
//! through the [`TrackerHandle`] request extension.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use optimizer_app::{AppError, AppState, RequestScope, Result};
use optimizer_core::OptionEntry;

const ADMIN_PAGE_QUERY: &str = "page=option-optimizer";

#[derive(Clone)]
pub struct TrackerHandle {
    scope: Arc<Mutex<Option<RequestScope>>>,
}

impl TrackerHandle {
    pub fn new(scope: RequestScope) -> Self {
        Self {
            scope: Arc::new(Mutex::new(Some(scope))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<RequestScope>> {
        self.scope
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reads an option and records the access for this request.
    pub fn get_option(&self, name: &str) -> Result<Option<OptionEntry>> {
        match self.lock().as_mut() {
            Some(scope) => scope.get_option(name),
            None => Err(AppError::Message("request scope already finished".to_string())),
        }
    }

    pub fn request_reset(&self) {
        if let Some(scope) = self.lock().as_mut() {
            scope.request_reset();
        }
    }

    pub fn skip_persistence(&self) {
        if let Some(scope) = self.lock().as_mut() {
            scope.skip_persistence();
        }
    }

    /// Persists the scope. Later calls are no-ops.
    pub fn finish(&self) -> Result<bool> {
        match self.lock().take() {
            Some(scope) => scope.finish(),
            None => Ok(false),
        }
    }
}

pub fn is_admin_page(req: &Request<Body>) -> bool {
    req.uri()
        .query()
        .is_some_and(|query| query.split('&').any(|pair| pair == ADMIN_PAGE_QUERY))
}

pub async fn track_requests(
    State(app_state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let scope = match app_state.begin_request() {
        Ok(scope) => scope,
        Err(err) => {
            tracing::warn!(error = %err, "usage tracking unavailable for request");
            return next.run(req).await;
        }
    };
    let handle = TrackerHandle::new(scope);
    if is_admin_page(&req) {
        handle.skip_persistence();
    }
    req.extensions_mut().insert(handle.clone());

    let response = next.run(req).await;
    if let Err(err) = handle.finish() {
        tracing::error!(error = %err, "failed to persist usage record");
    }
    response
}
