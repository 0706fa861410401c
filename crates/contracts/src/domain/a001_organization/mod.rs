pub mod aggregate;
pub mod steps;
