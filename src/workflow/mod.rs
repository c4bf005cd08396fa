//! Pure booking and service-request rules. Nothing in here touches the
//! database; services load rows, ask these types what should happen and
//! persist the outcome inside their own transaction.

pub mod booking;
pub mod request;
pub mod stay;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{0}")]
    InvalidState(String),

    #[error("Action not permitted for this user")]
    NotPermitted,
}
