//! Application constants
//!
//! Centralized location for the storage keys, endpoint paths and defaults
//! shared by the client crates.

// Configuration defaults
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "Sigma.Finance";

// Credential storage keys
pub const ACCESS_TOKEN_KEY: &str = "jwt_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USER_DATA_KEY: &str = "user_data";

/// Every key owned by a signed-in session, cleared together on logout.
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY, USER_DATA_KEY];

// Auth endpoints
pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const REFRESH_PATH: &str = "/auth/refresh";

// Resource endpoints
pub const ACCOUNTS_PATH: &str = "/accounts";
pub const PROFILE_PATH: &str = "/users/profile";
pub const AVATAR_PATH: &str = "/users/profile/avatar";
pub const CHECK_PHONE_PATH: &str = "/users/check-phone";
pub const PHONE_TRANSFER_PATH: &str = "/transactions/phone";
pub const SELF_TRANSFER_PATH: &str = "/transactions/self-transfer";
pub const TRANSACTION_HISTORY_PATH: &str = "/transactions/history";
pub const TRANSACTIONS_PATH: &str = "/transactions";
pub const STATEMENT_DOWNLOAD_PATH: &str = "/transactions/download";
