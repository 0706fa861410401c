use crate::shared::validation::{is_valid_email, FieldErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Manager,
    Staff,
}

impl MemberRole {
    pub const ALL: [MemberRole; 4] = [
        MemberRole::Owner,
        MemberRole::Admin,
        MemberRole::Manager,
        MemberRole::Staff,
    ];

    /// Roles that may be handed out through an invite.
    pub const ASSIGNABLE: [MemberRole; 3] =
        [MemberRole::Admin, MemberRole::Manager, MemberRole::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Owner => "owner",
            MemberRole::Admin => "admin",
            MemberRole::Manager => "manager",
            MemberRole::Staff => "staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberRole::Owner => "Owner",
            MemberRole::Admin => "Admin",
            MemberRole::Manager => "Manager",
            MemberRole::Staff => "Staff",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == value)
    }

    /// Owners and admins manage members.
    pub fn can_manage_members(&self) -> bool {
        matches!(self, MemberRole::Owner | MemberRole::Admin)
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Invited,
    Suspended,
}

impl MemberStatus {
    pub const ALL: [MemberStatus; 3] = [
        MemberStatus::Active,
        MemberStatus::Invited,
        MemberStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Invited => "invited",
            MemberStatus::Suspended => "suspended",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Invited => "Invited",
            MemberStatus::Suspended => "Suspended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDto {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub joined_at: Option<String>,
    pub last_active_at: Option<String>,
}

impl MemberDto {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteMemberDto {
    pub email: String,
    pub role: MemberRole,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl InviteMemberDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("email", &self.email, "Email");
        errors.check("email", is_valid_email(&self.email), "Enter a valid email address");
        errors.check(
            "role",
            self.role != MemberRole::Owner,
            "Ownership cannot be granted through an invite",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberDto {
    pub role: MemberRole,
    pub status: MemberStatus,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&MemberRole::Manager).unwrap(), "\"manager\"");
        assert_eq!(MemberRole::parse("staff"), Some(MemberRole::Staff));
        assert_eq!(MemberStatus::parse("gone"), None);
    }

    #[test]
    fn test_invite_rejects_owner() {
        let dto = InviteMemberDto {
            email: "new@team.io".into(),
            role: MemberRole::Owner,
            full_name: None,
        };
        assert!(dto.validate().unwrap_err().has("role"));
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let member = MemberDto {
            id: "m1".into(),
            email: "ana@team.io".into(),
            full_name: Some(" ".into()),
            role: MemberRole::Staff,
            status: MemberStatus::Active,
            joined_at: None,
            last_active_at: None,
        };
        assert_eq!(member.display_name(), "ana@team.io");
    }
}
