use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

/// Read a string field, treating `null` and non-string values as empty
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        _ => String::new(),
    })
}

/// Body of `POST /send-otp`
///
/// Missing, null or non-string fields deserialize as empty so the input
/// reaches the service and is reported like any other invalid input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Address the passcode is mailed to
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(email)]
    pub email: String,

    /// Optional text placed before the passcode line
    #[serde(default, rename = "customMessage")]
    #[validate(length(max = 1000))]
    pub custom_message: Option<String>,
}

/// Body of `POST /verify-otp`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,

    /// Candidate passcode
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(max = 32))]
    pub otp: String,
}

/// Payload added to a successful send response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}
