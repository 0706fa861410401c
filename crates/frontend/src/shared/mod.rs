pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod notify;
pub mod page_frame;
pub mod pagination;
pub mod polling;
pub mod timer;
pub mod wizard;
