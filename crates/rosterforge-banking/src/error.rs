//! Error types for preference banking.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::record::BankStatus;

#[derive(Debug, Error, PartialEq)]
pub enum BankingError {
    #[error("Banked preference not found: {0}")]
    NotFound(Uuid),

    /// Only ACTIVE records can move, and only forward.
    #[error("Banked preference {id}: cannot move from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: BankStatus,
        to: BankStatus,
    },

    #[error("Banked preference {id} expired on {expires_at}")]
    PastExpiry { id: Uuid, expires_at: NaiveDate },
}

pub type Result<T> = std::result::Result<T, BankingError>;
