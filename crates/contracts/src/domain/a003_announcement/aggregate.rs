use crate::shared::validation::{length_between, FieldErrors};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Delivery lifecycle of an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    Draft,
    Scheduled,
    Pending,
    Processing,
    Sent,
    Failed,
}

impl AnnouncementStatus {
    pub const ALL: [AnnouncementStatus; 6] = [
        AnnouncementStatus::Draft,
        AnnouncementStatus::Scheduled,
        AnnouncementStatus::Pending,
        AnnouncementStatus::Processing,
        AnnouncementStatus::Sent,
        AnnouncementStatus::Failed,
    ];

    /// Delivery is underway; the list keeps refreshing while any row is in this state.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            AnnouncementStatus::Pending | AnnouncementStatus::Processing
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "draft",
            AnnouncementStatus::Scheduled => "scheduled",
            AnnouncementStatus::Pending => "pending",
            AnnouncementStatus::Processing => "processing",
            AnnouncementStatus::Sent => "sent",
            AnnouncementStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnnouncementStatus::Draft => "Draft",
            AnnouncementStatus::Scheduled => "Scheduled",
            AnnouncementStatus::Pending => "Queued",
            AnnouncementStatus::Processing => "Sending",
            AnnouncementStatus::Sent => "Sent",
            AnnouncementStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    AllAttendees,
    CheckedIn,
    NotCheckedIn,
    Staff,
}

impl Audience {
    pub const ALL: [Audience; 4] = [
        Audience::AllAttendees,
        Audience::CheckedIn,
        Audience::NotCheckedIn,
        Audience::Staff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::AllAttendees => "all_attendees",
            Audience::CheckedIn => "checked_in",
            Audience::NotCheckedIn => "not_checked_in",
            Audience::Staff => "staff",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Audience::AllAttendees => "All attendees",
            Audience::CheckedIn => "Checked-in attendees",
            Audience::NotCheckedIn => "Not yet checked in",
            Audience::Staff => "Staff only",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementDto {
    pub id: String,
    pub title: String,
    pub body: String,
    pub audience: Audience,
    pub status: AnnouncementStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub recipients: u32,
    pub created_at: DateTime<Utc>,
}

/// Earliest a scheduled announcement may go out, relative to submission.
pub const MIN_SCHEDULE_LEAD_MINUTES: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAnnouncementDto {
    pub title: String,
    pub body: String,
    pub audience: Audience,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl CreateAnnouncementDto {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title");
        errors.check(
            "title",
            length_between(&self.title, 3, 120),
            "Title must be between 3 and 120 characters",
        );
        errors.require("body", &self.body, "Message");
        errors.check(
            "body",
            length_between(&self.body, 10, 5000),
            "Message must be between 10 and 5000 characters",
        );
        if let Some(at) = self.scheduled_at {
            errors.check(
                "scheduled_at",
                at >= now + Duration::minutes(MIN_SCHEDULE_LEAD_MINUTES),
                format!(
                    "Schedule at least {} minutes in the future",
                    MIN_SCHEDULE_LEAD_MINUTES
                ),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> CreateAnnouncementDto {
        CreateAnnouncementDto {
            title: "Doors open".into(),
            body: "Registration desk opens at 8:30 in hall B.".into(),
            audience: Audience::AllAttendees,
            scheduled_at: None,
        }
    }

    #[test]
    fn test_in_progress_set() {
        let in_progress: Vec<_> = AnnouncementStatus::ALL
            .iter()
            .filter(|s| s.is_in_progress())
            .collect();
        assert_eq!(
            in_progress,
            vec![&AnnouncementStatus::Pending, &AnnouncementStatus::Processing]
        );
    }

    #[test]
    fn test_schedule_must_be_ahead() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let mut dto = draft();
        assert!(dto.validate(now).is_ok());

        dto.scheduled_at = Some(now + Duration::minutes(1));
        assert!(dto.validate(now).unwrap_err().has("scheduled_at"));

        dto.scheduled_at = Some(now + Duration::hours(2));
        assert!(dto.validate(now).is_ok());
    }

    #[test]
    fn test_short_body_rejected() {
        let now = Utc::now();
        let mut dto = draft();
        dto.body = "Hi".into();
        let errors = dto.validate(now).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["body"]);
    }

    #[test]
    fn test_status_wire_format() {
        let status: AnnouncementStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, AnnouncementStatus::Processing);
        assert_eq!(Audience::parse("checked_in"), Some(Audience::CheckedIn));
    }
}
