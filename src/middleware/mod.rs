pub mod auth;
pub mod response;

pub use auth::{caller_middleware, require_admin, CallerIdentity, AUTH_COOKIE};
pub use response::{ApiResponse, ApiResult};
