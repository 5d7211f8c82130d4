use serde::{Deserialize, Deserializer, Serialize};

/// Missing or `null` fields decode as empty strings and fail the credential
/// checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub username: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_fields_become_empty() {
        let req: CredentialsRequest =
            serde_json::from_str(r#"{"username":null}"#).expect("decode");
        assert_eq!(req.username, "");
        assert_eq!(req.password, "");
    }

    #[test]
    fn non_string_username_is_rejected() {
        assert!(serde_json::from_str::<CredentialsRequest>(r#"{"username":42}"#).is_err());
    }
}
