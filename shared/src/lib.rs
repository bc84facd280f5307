pub mod error;
pub mod models;
pub mod validation;
pub mod session;

pub use error::{ErrorResponse, VoteRejection};
pub use models::*;
pub use validation::*;
pub use session::{AdminCommand, PersonNumber, PersonRecord, Rating, Session, Transition, VotingStatus};
