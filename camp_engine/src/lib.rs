//! Camp Engine library crate.
//!
//! This crate exposes the calendar and financial computation core of
//! the camp management backend as reusable modules: Gregorian/Jalali
//! conversion, Jalali date rules, precision-safe money arithmetic,
//! time-slot classification, coach payouts and monthly accounting.
//! External applications may call into `engine::run_payouts` directly
//! or embed the API via `api::build_router`.

pub mod api;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod jalali;
pub mod models;
pub mod money;
pub mod payout;
pub mod time_slot;

pub use error::EngineError;
