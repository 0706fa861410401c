pub mod aggregate;
pub mod stats;
