//! Ledger ownership, validation services, and supporting utilities.

pub mod services;
pub mod store;
pub mod time;
pub mod utils;

pub use store::Store;
pub use time::{Clock, FixedClock, SystemClock};
