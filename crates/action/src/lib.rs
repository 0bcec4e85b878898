//! Token operations driven through a shared state machine.
//!
//! The four write operations (transfer, approve, delegated transfer, burn)
//! share one machine rather than four copies: validate the raw inputs,
//! convert the display amount to base units, submit exactly one
//! transaction, then await one confirmation. Validation never touches the
//! network.

pub mod driver;
pub mod validate;

use alloy_primitives::{TxHash, U256};
use std::time::{Duration, Instant};
use thiserror::Error;

pub use driver::Driver;
pub use validate::validate;

/// How long a settled notice stays live before the shell drops it.
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Raw, user-entered inputs for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Transfer { to: String, amount: String },
    Approve { spender: String, amount: String },
    TransferFrom { from: String, to: String, amount: String },
    Burn { amount: String },
}

/// Input validation failures, reported before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid address in field: {0}")]
    InvalidAddress(&'static str),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount {requested} exceeds balance {available}")]
    InsufficientBalance { requested: U256, available: U256 },
}

/// Progress of one operation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Validating,
    Submitting,
    /// Transaction submitted; the hash is known, the confirmation is
    /// outstanding.
    Confirming { hash: TxHash },
    Settled(Outcome),
}

/// Terminal result of one operation attempt.
///
/// On failure the entered inputs are left untouched for correction; on
/// success the shell clears them and refreshes the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { hash: TxHash },
    Failure { message: String },
}

impl Outcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Notice for the shell to display, timed from now.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Success { hash } => Notice::now(format!("transaction {hash} confirmed")),
            Self::Failure { message } => Notice::now(message.clone()),
        }
    }
}

/// A status message with a fixed display lifetime.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    created: Instant,
}

impl Notice {
    pub fn now(message: String) -> Self {
        Self {
            message,
            created: Instant::now(),
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.created + NOTICE_TTL
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
