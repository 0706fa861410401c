pub mod a001_organization;
pub mod a002_member;
pub mod a003_announcement;
pub mod a004_coupon;
pub mod a005_registration_timeline;
