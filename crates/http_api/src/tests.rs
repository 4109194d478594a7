use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use app_api::AppContext;
use optimizer_app::{AppConfig, AppPaths, AppState, ensure_app_data_dir};

use crate::{HttpState, is_admin_page};

#[test]
fn detects_admin_page_views() {
    let admin = Request::builder()
        .uri("/wp-admin/tools.php?page=option-optimizer&tab=unused")
        .body(Body::empty())
        .expect("request");
    assert!(is_admin_page(&admin));

    let similar = Request::builder()
        .uri("/wp-admin/tools.php?page=option-optimizer-extra")
        .body(Body::empty())
        .expect("request");
    assert!(!is_admin_page(&similar));

    let plain = Request::builder()
        .uri("/")
        .body(Body::empty())
        .expect("request");
    assert!(!is_admin_page(&plain));
}

#[test]
fn generated_tokens_are_distinct_hex() {
    let first = crate::generate_token();
    let second = crate::generate_token();
    assert_eq!(first.len(), 32);
    assert!(first.chars().all(|ch| ch.is_ascii_hexdigit()));
    assert_ne!(first, second);
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let paths = AppPaths::new(temp_dir.path().to_path_buf());
    ensure_app_data_dir(&paths).expect("ensure app data dir");
    let app_state = AppState::new(AppConfig::new(paths.db_path)).expect("app state");
    app_state.setup_db().expect("setup db");

    let context = AppContext { app_state };
    let state = HttpState::new(context, "admin".to_string(), "nonce".to_string());
    let app = crate::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nowhere")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
