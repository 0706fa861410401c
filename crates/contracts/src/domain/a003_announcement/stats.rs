use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementStats {
    pub total: u32,
    pub sent: u32,
    pub scheduled: u32,
    pub failed: u32,
    pub recipients_reached: u64,
}

/// Sending quota for the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementLimits {
    pub daily_limit: u32,
    pub daily_used: u32,
    pub monthly_limit: u32,
    pub monthly_used: u32,
}

impl AnnouncementLimits {
    pub fn remaining_today(&self) -> u32 {
        self.daily_limit
            .saturating_sub(self.daily_used)
            .min(self.remaining_this_month())
    }

    pub fn remaining_this_month(&self) -> u32 {
        self.monthly_limit.saturating_sub(self.monthly_used)
    }

    pub fn can_send(&self) -> bool {
        self.remaining_today() > 0
    }

    /// Share of the daily quota already used, `0.0..=1.0`.
    pub fn daily_usage_ratio(&self) -> f64 {
        if self.daily_limit == 0 {
            return 1.0;
        }
        (self.daily_used as f64 / self.daily_limit as f64).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntiSpamLevel {
    Ok,
    Throttled,
    Blocked,
}

/// Auxiliary anti-spam state; failures to load it never block the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiSpamStatus {
    pub level: AntiSpamLevel,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cooldown_seconds: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_respects_monthly_cap() {
        let limits = AnnouncementLimits {
            daily_limit: 10,
            daily_used: 2,
            monthly_limit: 100,
            monthly_used: 97,
        };
        assert_eq!(limits.remaining_today(), 3);
        assert!(limits.can_send());
    }

    #[test]
    fn test_exhausted_quota() {
        let limits = AnnouncementLimits {
            daily_limit: 5,
            daily_used: 7,
            monthly_limit: 100,
            monthly_used: 7,
        };
        assert_eq!(limits.remaining_today(), 0);
        assert!(!limits.can_send());
        assert_eq!(limits.daily_usage_ratio(), 1.0);
    }
}
