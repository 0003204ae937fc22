//! Request/response types for auth endpoints.

use crate::remote::UserRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(alias = "fullname")]
    pub full_name: String,
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(ToSchema, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub account_id: String,
    /// The emailed one-time code.
    pub password: String,
}

impl std::fmt::Debug for VerifyRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyRequest")
            .field("account_id", &self.account_id)
            .field("password", &"***")
            .finish()
    }
}

/// `accountId` is `null` when sign-in found no user.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "$id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub avatar: String,
    pub account_id: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            avatar: user.avatar,
            account_id: user.account_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn sign_up_request_accepts_both_name_spellings() -> Result<()> {
        let camel: SignUpRequest =
            serde_json::from_str(r#"{"fullName":"Ann Lee","email":"ann@example.com"}"#)?;
        let lower: SignUpRequest =
            serde_json::from_str(r#"{"fullname":"Ann Lee","email":"ann@example.com"}"#)?;
        assert_eq!(camel.full_name, "Ann Lee");
        assert_eq!(lower.full_name, "Ann Lee");
        Ok(())
    }

    #[test]
    fn not_found_account_response_shape() -> Result<()> {
        let response = AccountResponse {
            account_id: None,
            error: Some("user not found".to_string()),
        };
        let value = serde_json::to_value(&response)?;
        assert!(value.get("accountId").context("missing accountId")?.is_null());
        assert_eq!(
            value.get("error").and_then(serde_json::Value::as_str),
            Some("user not found")
        );

        let found = AccountResponse {
            account_id: Some("abc".to_string()),
            error: None,
        };
        let value = serde_json::to_value(&found)?;
        assert!(value.get("error").is_none());
        Ok(())
    }

    #[test]
    fn verify_request_debug_hides_code() -> Result<()> {
        let request: VerifyRequest =
            serde_json::from_str(r#"{"accountId":"abc","password":"123456"}"#)?;
        let debug = format!("{request:?}");
        assert!(debug.contains("abc"));
        assert!(!debug.contains("123456"));
        Ok(())
    }

    #[test]
    fn user_response_uses_provider_id_key() -> Result<()> {
        let response = UserResponse::from(UserRecord {
            id: "doc1".to_string(),
            full_name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            avatar: "https://img/a.png".to_string(),
            account_id: "acc1".to_string(),
        });
        let value = serde_json::to_value(&response)?;
        assert_eq!(value.get("$id").and_then(serde_json::Value::as_str), Some("doc1"));
        assert_eq!(
            value.get("fullName").and_then(serde_json::Value::as_str),
            Some("Ann Lee")
        );
        Ok(())
    }
}
