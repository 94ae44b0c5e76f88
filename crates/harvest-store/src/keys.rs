//! Well-known store keys.
//!
//! These are the exact storage keys the web storefront uses, so state written
//! by one client stays legible to another.

/// Short-lived JWT sent as the bearer token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Long-lived JWT exchanged for fresh access tokens.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// The signed-in user's username, kept for display.
pub const AUTH_USERNAME: &str = "auth_username";

/// The locally generated cart code.
pub const CART_CODE: &str = "cartCode";
