//! Preference banking.
//!
//! A soft preference that goes unmet is banked: carried forward to later
//! days with a weight that grows with age, up to a cap, until it is redeemed
//! (met on a later day), expires, or is canceled.
//!
//! - [`BankedPreference`]: one banked record and its one-way lifecycle
//! - [`BankLedger`]: a store-level collection with bulk operations and
//!   fairness analytics

mod error;
mod ledger;
mod record;

pub use error::{BankingError, Result};
pub use ledger::BankLedger;
pub use record::{BankState, BankStatus, BankedPreference};
