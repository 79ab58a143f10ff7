/// Maps booking errors to HTTP responses
pub mod error_handling;
