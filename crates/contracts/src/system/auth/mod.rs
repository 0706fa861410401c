use crate::domain::a002_member::aggregate::MemberRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    /// Role inside the current organization; `None` before onboarding finishes.
    pub role: Option<MemberRole>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }

    pub fn can_manage_members(&self) -> bool {
        self.role.map(|r| r.can_manage_members()).unwrap_or(false)
    }

    pub fn has_role(&self, allowed: &[MemberRole]) -> bool {
        self.role.map(|r| allowed.contains(&r)).unwrap_or(false)
    }
}
