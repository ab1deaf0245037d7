use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "validation")]
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "validation", derive(Validate))]
#[serde(deny_unknown_fields)]
pub struct CreateApiKeyRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(
            min = 2,
            max = 64,
            message = "name must be between 2 and 64 characters"
        ))
    )]
    pub name: String,
}

// The secret is shown to the caller exactly once. No Debug/Display so it
// can't end up in logs by accident.
#[derive(Serialize, Deserialize)]
pub struct CreateApiKeyResponse {
    pub key: String,
}

#[derive(Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
