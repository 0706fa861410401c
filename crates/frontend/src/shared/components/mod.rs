pub mod field_error;
pub mod form_field;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;

pub use field_error::FieldError;
pub use form_field::{optional_text, TextAreaField, TextField};
pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
pub use stat_card::{CardTone, StatCard};
