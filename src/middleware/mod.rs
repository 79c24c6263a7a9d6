pub mod admin_auth;
pub mod rate_limit;
pub mod response;

pub use admin_auth::admin_auth;
pub use rate_limit::{client_key, throttle_api, throttle_auth, FALLBACK_CLIENT_KEY};
pub use response::{ApiResponse, ApiResult};
