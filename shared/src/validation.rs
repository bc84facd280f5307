use crate::session::{PersonNumber, Rating};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("personnum must be a positive integer, got {0}")]
    InvalidPersonNumber(i64),
    #[error("rating must be an integer between {min} and {max}, got {0}", min = Rating::MIN, max = Rating::MAX)]
    InvalidRating(i64),
    #[error("description must not be empty")]
    EmptyDescription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteRequest {
    pub personnum: PersonNumber,
    pub rating: i64,
}

pub fn validate_vote(personnum: i64, rating: i64) -> Result<VoteRequest, ValidationError> {
    let personnum = PersonNumber::try_from(personnum)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(ValidationError::InvalidPersonNumber(personnum))?;
    Rating::try_from(rating).map_err(ValidationError::InvalidRating)?;
    Ok(VoteRequest { personnum, rating })
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() { return Err(ValidationError::EmptyDescription); }
    Ok(())
}
