use crate::shared::validation::{is_valid_coupon_code, FieldErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percent,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "percent" => Some(DiscountType::Percent),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponDto {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub amount: f64,
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub active: bool,
}

impl CouponDto {
    pub fn is_exhausted(&self) -> bool {
        self.max_uses.map(|m| self.used_count >= m).unwrap_or(false)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until.map(|until| now > until).unwrap_or(false)
    }

    /// Active, inside its validity window and not used up.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        let started = self.valid_from.map(|from| now >= from).unwrap_or(true);
        self.active && started && !self.is_expired(now) && !self.is_exhausted()
    }

    pub fn display_value(&self) -> String {
        match self.discount_type {
            DiscountType::Percent => format!("{}%", self.amount),
            DiscountType::Fixed => format!("{:.2}", self.amount),
        }
    }

    pub fn usage_label(&self) -> String {
        match self.max_uses {
            Some(max) => format!("{} / {}", self.used_count, max),
            None => format!("{} / ∞", self.used_count),
        }
    }
}

/// Body of coupon create (`POST`) and update (`PUT`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponFormDto {
    pub code: String,
    pub discount_type: DiscountType,
    pub amount: f64,
    #[serde(default)]
    pub max_uses: Option<u32>,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

impl Default for CouponFormDto {
    fn default() -> Self {
        Self {
            code: String::new(),
            discount_type: DiscountType::Percent,
            amount: 10.0,
            max_uses: None,
            valid_from: None,
            valid_until: None,
        }
    }
}

impl From<&CouponDto> for CouponFormDto {
    fn from(c: &CouponDto) -> Self {
        Self {
            code: c.code.clone(),
            discount_type: c.discount_type,
            amount: c.amount,
            max_uses: c.max_uses,
            valid_from: c.valid_from,
            valid_until: c.valid_until,
        }
    }
}

impl CouponFormDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("code", &self.code, "Code");
        errors.check(
            "code",
            is_valid_coupon_code(&self.code),
            "Use 3-32 uppercase letters, digits, '-' or '_'",
        );
        match self.discount_type {
            DiscountType::Percent => errors.check(
                "amount",
                self.amount >= 1.0 && self.amount <= 100.0,
                "Percentage must be between 1 and 100",
            ),
            DiscountType::Fixed => errors.check(
                "amount",
                self.amount.is_finite() && self.amount > 0.0,
                "Amount must be greater than zero",
            ),
        }
        if let Some(max) = self.max_uses {
            errors.check("max_uses", max > 0, "Maximum uses must be at least 1");
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            errors.check(
                "valid_until",
                from < until,
                "End of validity must be after its start",
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn coupon() -> CouponDto {
        CouponDto {
            id: "c1".into(),
            code: "EARLY10".into(),
            discount_type: DiscountType::Percent,
            amount: 10.0,
            max_uses: Some(3),
            used_count: 1,
            valid_from: None,
            valid_until: None,
            active: true,
        }
    }

    #[test]
    fn test_redeemable_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut c = coupon();
        assert!(c.is_redeemable(now));

        c.valid_until = Some(now - Duration::seconds(1));
        assert!(c.is_expired(now));
        assert!(!c.is_redeemable(now));

        c.valid_until = None;
        c.used_count = 3;
        assert!(c.is_exhausted());
        assert!(!c.is_redeemable(now));
    }

    #[test]
    fn test_display_value() {
        let mut c = coupon();
        assert_eq!(c.display_value(), "10%");
        c.discount_type = DiscountType::Fixed;
        c.amount = 7.5;
        assert_eq!(c.display_value(), "7.50");
        c.max_uses = None;
        assert_eq!(c.usage_label(), "1 / ∞");
    }

    #[test]
    fn test_form_validation() {
        let mut form = CouponFormDto {
            code: "VIP".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());

        form.amount = 150.0;
        assert!(form.validate().unwrap_err().has("amount"));

        form.discount_type = DiscountType::Fixed;
        assert!(form.validate().is_ok());

        let t = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        form.valid_from = Some(t);
        form.valid_until = Some(t);
        assert!(form.validate().unwrap_err().has("valid_until"));
    }
}
