pub mod schedule;
pub mod session;
