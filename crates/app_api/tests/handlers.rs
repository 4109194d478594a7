use std::collections::HashMap;

use app_api::{AppContext, OptionNameRequest, UpdateAutoloadRequest};
use optimizer_app::{AppConfig, AppError, AppState};
use optimizer_core::UsageRecord;
use serde_json::json;

fn build_context() -> (tempfile::TempDir, AppContext) {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_state = AppState::new(AppConfig::new(dir.path().join("api.sqlite"))).expect("state");
    app_state.setup_db().expect("setup db");
    let context = AppContext { app_state };
    (dir, context)
}

#[test]
fn autoload_accepts_strings_booleans_and_numbers() {
    let req: UpdateAutoloadRequest =
        serde_json::from_value(json!({"option_name": "a", "autoload": "yes"})).expect("text");
    assert_eq!(req.autoload.as_raw(), "yes");
    let req: UpdateAutoloadRequest =
        serde_json::from_value(json!({"option_name": "a", "autoload": false})).expect("bool");
    assert_eq!(req.autoload.as_raw(), "false");
    let req: UpdateAutoloadRequest =
        serde_json::from_value(json!({"option_name": "a", "autoload": 1})).expect("number");
    assert_eq!(req.autoload.as_raw(), "1");
}

#[test]
fn grid_params_flow_into_reports() {
    let (_dir, ctx) = build_context();
    let db = ctx.app_state.open_db().expect("db");
    db.add_option("b_unused", &json!(1), true).expect("add");
    db.add_option("a_unused", &json!(1), true).expect("add");
    let mut record = UsageRecord::new("2024-01-01 00:00:00");
    record.used_options.insert("elsewhere".to_string(), 1);
    db.save_usage_record(&record, true).expect("save");

    let params: HashMap<String, String> = [
        ("draw", "2"),
        ("order[0][column]", "0"),
        ("order[0][dir]", "desc"),
        ("columns[0][data]", "name"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();
    let page = app_api::unused_options(&ctx, &params).expect("page");
    assert_eq!(page.draw, 2);
    let names: Vec<_> = page.data.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["b_unused", "a_unused"]);
}

#[test]
fn create_then_delete_round_trip() {
    let (_dir, ctx) = build_context();
    let created = app_api::create_option_false(
        &ctx,
        OptionNameRequest {
            option_name: "baz".to_string(),
        },
    )
    .expect("create");
    assert!(created.success);

    app_api::delete_option(
        &ctx,
        OptionNameRequest {
            option_name: "baz".to_string(),
        },
    )
    .expect("delete");
    let err = app_api::delete_option(
        &ctx,
        OptionNameRequest {
            option_name: "baz".to_string(),
        },
    )
    .err()
    .expect("second delete fails");
    assert!(matches!(err, AppError::NotFound(_)));
}
