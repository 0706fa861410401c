//! Payloads for each onboarding step (`GET`/`POST /org/register/{step}`).

use crate::shared::validation::{
    is_valid_email, is_valid_iban, is_valid_phone, is_valid_postal_code, is_valid_slug,
    is_valid_url, length_between, FieldErrors,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfoDto {
    pub name: String,
    pub slug: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl BasicInfoDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Organization name");
        errors.check(
            "name",
            length_between(&self.name, 2, 120),
            "Name must be between 2 and 120 characters",
        );
        errors.require("slug", &self.slug, "Slug");
        errors.check(
            "slug",
            is_valid_slug(&self.slug),
            "Slug may contain lowercase letters, digits and single hyphens",
        );
        errors.require("category", &self.category, "Category");
        if let Some(description) = &self.description {
            errors.check(
                "description",
                description.chars().count() <= 2000,
                "Description must be at most 2000 characters",
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDto {
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2.
    pub country: String,
}

impl AddressDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("line1", &self.line1, "Address");
        errors.require("city", &self.city, "City");
        errors.require("postal_code", &self.postal_code, "Postal code");
        errors.check(
            "postal_code",
            is_valid_postal_code(&self.postal_code),
            "Postal code is not valid",
        );
        errors.check(
            "country",
            self.country.len() == 2 && self.country.chars().all(|c| c.is_ascii_uppercase()),
            "Choose a country",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDto {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub website: Option<String>,
}

impl ContactDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("email", &self.email, "Email");
        errors.check("email", is_valid_email(&self.email), "Enter a valid email address");
        errors.require("phone", &self.phone, "Phone");
        errors.check("phone", is_valid_phone(&self.phone), "Enter a valid phone number");
        if let Some(website) = self.website.as_deref().filter(|w| !w.trim().is_empty()) {
            errors.check(
                "website",
                is_valid_url(website),
                "Website must start with http:// or https://",
            );
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutDto {
    pub account_holder: String,
    pub iban: String,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl PayoutDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("account_holder", &self.account_holder, "Account holder");
        errors.require("iban", &self.iban, "IBAN");
        errors.check("iban", is_valid_iban(&self.iban), "IBAN is not valid");
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_info_reports_each_field() {
        let dto = BasicInfoDto {
            name: "A".into(),
            slug: "Bad Slug".into(),
            category: String::new(),
            description: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("slug"));
        assert!(errors.has("category"));
    }

    #[test]
    fn test_contact_website_optional() {
        let mut dto = ContactDto {
            email: "hello@rustconf.org".into(),
            phone: "+1 555 010 9999".into(),
            website: Some("   ".into()),
        };
        assert!(dto.validate().is_ok());

        dto.website = Some("rustconf.org".into());
        assert_eq!(
            dto.validate().unwrap_err().get("website"),
            Some("Website must start with http:// or https://")
        );
    }

    #[test]
    fn test_address_country_code() {
        let dto = AddressDto {
            line1: "1 Main St".into(),
            line2: None,
            city: "Lisbon".into(),
            postal_code: "1000-001".into(),
            country: "pt".into(),
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["country"]);
    }

    #[test]
    fn test_payout_iban_checked() {
        let dto = PayoutDto {
            account_holder: "Rust Events Ltd".into(),
            iban: "GB82 WEST 1234 5698 7654 32".into(),
            tax_id: None,
        };
        assert!(dto.validate().is_ok());
    }
}
