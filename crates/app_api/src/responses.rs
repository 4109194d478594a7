use serde::Serialize;

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: usize,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
    pub updated: usize,
}

#[derive(Serialize)]
pub struct UsageStatusResponse {
    pub starting_point_date: String,
    pub tracked_options: usize,
}

#[derive(Serialize)]
pub struct NonceResponse {
    pub nonce: String,
}
