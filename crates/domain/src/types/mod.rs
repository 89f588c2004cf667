//! Request and response types exchanged with the banking backend
//!
//! Field names follow the backend's camelCase JSON. Responses other than the
//! authentication payload are passed through as `serde_json::Value`.

pub mod auth;
pub mod profile;
pub mod statement;
pub mod transaction;
pub mod transfer;

pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest};
pub use profile::{AvatarUpdate, ProfileUpdate};
pub use statement::{StatementFormat, StatementRequest};
pub use transaction::TransactionFilters;
pub use transfer::{InternalTransferRequest, PhoneLookupRequest, PhoneTransferRequest};
