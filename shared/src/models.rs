use serde::{Serialize, Deserialize};
use crate::session::{PersonNumber, Transition, VotingStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: VotingStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub personnum: Option<PersonNumber>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteResult {
    pub personnum: PersonNumber,
    pub description: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
}

impl VoteResponse {
    pub fn accepted() -> Self {
        Self { success: true, message: "Vote accepted".into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<VotingStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub personnum: Option<PersonNumber>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

impl From<Transition> for AdminResponse {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Advanced { personnum, description } => Self {
                success: true,
                message: format!("Voting opened for participant #{}", personnum),
                status: None,
                personnum: Some(personnum),
                description: Some(description),
            },
            Transition::Finished => Self {
                success: true,
                message: "Voting finished".into(),
                status: Some(VotingStatus::Finished),
                personnum: None,
                description: None,
            },
            Transition::Restarted => Self {
                success: true,
                message: "Voting reset to initial state".into(),
                status: Some(VotingStatus::NotStarted),
                personnum: None,
                description: None,
            },
        }
    }
}
