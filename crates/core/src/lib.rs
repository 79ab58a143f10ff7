//! # SlotSync Core
//!
//! Domain models and the availability engine for SlotSync: schedule rules,
//! interval expansion, time zone translation, month resolution and the
//! booking flow. Persistence is reached only through the [`store::BookingStore`]
//! trait, implemented by `slotsync-db`.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod errors;
pub mod interval;
pub mod models;
pub mod schedule;
pub mod store;
pub mod timezone;
