//! Transfer payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /users/check-phone`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneLookupRequest {
    pub phone: String,
}

/// Body of `POST /transactions/phone`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneTransferRequest {
    pub source_account_id: String,
    pub destination_account_id: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_bonuses: Option<bool>,
}

/// Body of `POST /transactions/self-transfer`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTransferRequest {
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount: f64,
}
