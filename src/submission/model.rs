use serde::{Deserialize, Deserializer, Serialize};

/// Service value that makes the free-text detail field mandatory
pub const OTHER_SERVICE: &str = "Other";

/// A hire request as it travels from the form to the handler.
///
/// Every field is client supplied and untrusted. Missing or `null` fields
/// decode as empty strings so the handler never rejects a payload for an
/// absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HireRequest {
    #[serde(deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(deserialize_with = "nullable_string")]
    pub service: String,
    #[serde(deserialize_with = "nullable_string")]
    pub message: String,
    #[serde(deserialize_with = "nullable_string")]
    pub other_detail: String,
}

impl HireRequest {
    /// Decode a request body. An empty body is an empty submission.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// Whether the submitter picked the "Other" service
    pub fn is_other_service(&self) -> bool {
        self.service == OTHER_SERVICE
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
