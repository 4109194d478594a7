use rand::RngCore;

use app_api::AppContext;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    /// Bearer token that grants the administrative capability.
    pub admin_token: String,
    /// Anti-forgery value expected in the `x-optimizer-nonce` header.
    pub nonce: String,
}

impl HttpState {
    pub fn new(context: AppContext, admin_token: String, nonce: String) -> Self {
        Self {
            context,
            admin_token,
            nonce,
        }
    }
}

pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
