use std::collections::HashMap;

use optimizer_app::Result;
use optimizer_core::{GridPage, MissingOptionRow, OptionRow, OptionsDump};

use crate::{
    AppContext, DeletedResponse, OptionNameRequest, OptionNamesRequest,
    SetAutoloadOptionsRequest, SuccessResponse, UpdateAutoloadRequest, UpdatedResponse,
    UsageStatusResponse, parse_grid_query,
};

pub fn unused_options(
    ctx: &AppContext,
    params: &HashMap<String, String>,
) -> Result<GridPage<OptionRow>> {
    let query = parse_grid_query(params)?;
    ctx.app_state.services.reports.unused_options(&query)
}

pub fn used_not_autoloaded_options(
    ctx: &AppContext,
    params: &HashMap<String, String>,
) -> Result<GridPage<OptionRow>> {
    let query = parse_grid_query(params)?;
    ctx.app_state.services.reports.used_not_autoloaded(&query)
}

pub fn options_that_do_not_exist(
    ctx: &AppContext,
    params: &HashMap<String, String>,
) -> Result<GridPage<MissingOptionRow>> {
    let query = parse_grid_query(params)?;
    ctx.app_state
        .services
        .reports
        .options_that_do_not_exist(&query)
}

pub fn all_options(ctx: &AppContext) -> Result<OptionsDump> {
    ctx.app_state.services.reports.all_options()
}

pub fn update_autoload(ctx: &AppContext, req: UpdateAutoloadRequest) -> Result<SuccessResponse> {
    ctx.app_state
        .services
        .options
        .update_autoload(&req.option_name, &req.autoload.as_raw())?;
    Ok(success())
}

pub fn delete_option(ctx: &AppContext, req: OptionNameRequest) -> Result<SuccessResponse> {
    ctx.app_state.services.options.delete(&req.option_name)?;
    Ok(success())
}

pub fn delete_options(ctx: &AppContext, req: OptionNamesRequest) -> Result<DeletedResponse> {
    let deleted = ctx
        .app_state
        .services
        .options
        .delete_many(&req.option_names)?;
    Ok(DeletedResponse {
        success: true,
        deleted,
    })
}

pub fn set_autoload_options(
    ctx: &AppContext,
    req: SetAutoloadOptionsRequest,
) -> Result<UpdatedResponse> {
    let updated = ctx
        .app_state
        .services
        .options
        .set_autoload_many(&req.option_names, &req.autoload.as_raw())?;
    Ok(UpdatedResponse {
        success: true,
        updated,
    })
}

pub fn create_option_false(ctx: &AppContext, req: OptionNameRequest) -> Result<SuccessResponse> {
    ctx.app_state
        .services
        .options
        .create_false(&req.option_name)?;
    Ok(success())
}

/// Clears the usage record right away.
pub fn reset_now(ctx: &AppContext) -> Result<SuccessResponse> {
    ctx.app_state.services.usage.reset()?;
    Ok(success())
}

pub fn usage_status(ctx: &AppContext) -> Result<UsageStatusResponse> {
    let record = ctx.app_state.services.usage.record()?;
    Ok(UsageStatusResponse {
        tracked_options: record.used_options.len(),
        starting_point_date: record.starting_point_date,
    })
}

pub fn success() -> SuccessResponse {
    SuccessResponse { success: true }
}
