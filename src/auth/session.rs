//! Session state broadcast to the header, guards and account pages

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Role granted to administrators
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Which kind of profile is linked to the account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    #[default]
    None,
    Designer,
    Company,
}

/// Identity returned by `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub user_id: String,

    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub account_type: AccountType,

    #[serde(default)]
    pub designer_id: Option<String>,

    #[serde(default)]
    pub company_id: Option<String>,
}

/// The client's view of the current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_logged: bool,
    pub is_admin: bool,
    pub user_id: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub account_type: AccountType,
    pub designer_id: Option<String>,
    pub company_id: Option<String>,
}

impl SessionState {
    /// Canonical logged-out state
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn is_designer(&self) -> bool {
        self.account_type == AccountType::Designer
    }

    pub fn is_company(&self) -> bool {
        self.account_type == AccountType::Company
    }
}

impl From<SessionInfo> for SessionState {
    fn from(info: SessionInfo) -> Self {
        Self {
            is_logged: true,
            is_admin: info.roles.iter().any(|role| role == ADMIN_ROLE),
            user_id: Some(info.user_id),
            firstname: info.firstname,
            lastname: info.lastname,
            account_type: info.account_type,
            designer_id: info.designer_id,
            company_id: info.company_id,
        }
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Whether a JWT has expired; tokens that cannot be read count as expired
pub fn jwt_expired(token: &str) -> bool {
    let exp = token
        .split('.')
        .nth(1)
        .and_then(|payload| BASE64.decode(payload.trim_end_matches('=')).ok())
        .and_then(|bytes| serde_json::from_slice::<Claims>(&bytes).ok())
        .and_then(|claims| claims.exp);

    match exp {
        Some(exp) => {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or(Duration::from_secs(0))
                .as_secs() as i64;
            now >= exp
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_exp(exp: i64) -> String {
        let header = BASE64.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = BASE64.encode(format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn state_from_session_info() {
        let info = SessionInfo {
            user_id: "u1".to_string(),
            firstname: Some("Ada".to_string()),
            lastname: None,
            roles: vec!["ROLE_USER".to_string(), ADMIN_ROLE.to_string()],
            account_type: AccountType::Designer,
            designer_id: Some("d1".to_string()),
            company_id: None,
        };
        let state = SessionState::from(info);
        assert!(state.is_logged);
        assert!(state.is_admin);
        assert!(state.is_designer());
        assert_eq!(state.designer_id.as_deref(), Some("d1"));
    }

    #[test]
    fn account_type_wire_format() {
        let info: SessionInfo = serde_json::from_str(
            r#"{"userId":"u","roles":[],"accountType":"COMPANY","companyId":"c"}"#,
        )
        .unwrap();
        assert_eq!(info.account_type, AccountType::Company);
    }

    #[test]
    fn jwt_expiry() {
        assert!(!jwt_expired(&token_with_exp(i64::MAX / 2)));
        assert!(jwt_expired(&token_with_exp(1)));
        assert!(jwt_expired("not-a-token"));
    }
}
