use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::session::PersonNumber;

/// Business-rule refusals of a vote. Checked in declaration order.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum VoteRejection {
    #[error("Voting is not active")]
    NotActive,
    #[error("Participant numbers start at 1, got {0}")]
    NoSuchCandidate(PersonNumber),
    #[error("Cannot vote for future participants. Current number: {current}")]
    FutureCandidate { current: PersonNumber },
    #[error("Rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(i64),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}
