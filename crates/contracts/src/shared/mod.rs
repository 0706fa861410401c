pub mod api;
pub mod pagination;
pub mod validation;
