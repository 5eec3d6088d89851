// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_SIGNUP: &str = "auth.signup";
pub const AUTH_SIGNIN: &str = "auth.signin";
pub const AUTH_SIGNIN_FAILED: &str = "auth.signin_failed";
pub const AUTH_REJECTED: &str = "auth.rejected";
pub const FAVORITE_ADDED: &str = "favorite.added";
pub const FAVORITE_REMOVED: &str = "favorite.removed";
pub const CATALOG_SEARCH: &str = "catalog.search";
