use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::error::VoteRejection;
use crate::models::{StatusResponse, VoteResult};

pub type PersonNumber = u32;

pub const FINISH_SENTINEL: &str = "VOTING_FINISHED";
pub const RESTART_SENTINEL: &str = "VOTING_RESTART";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VotingStatus {
    #[default]
    #[serde(rename = "VOTING_NOT_STARTED")]
    NotStarted,
    #[serde(rename = "VOTING")]
    Voting,
    #[serde(rename = "VOTING_FINISHED")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = i64;

    fn try_from(v: i64) -> Result<Self, i64> {
        match v {
            Rating::MIN..=Rating::MAX => Ok(Rating(v as u8)),
            n => Err(n),
        }
    }
}

/// An admin action, decoded once at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    Advance(String),
    Finish,
    Restart,
}

impl AdminCommand {
    /// Decodes the legacy single-string channel, where two reserved labels
    /// double as control commands. Any other label activates a candidate.
    pub fn from_label(label: &str) -> Self {
        match label {
            FINISH_SENTINEL => AdminCommand::Finish,
            RESTART_SENTINEL => AdminCommand::Restart,
            other => AdminCommand::Advance(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { personnum: PersonNumber, description: String },
    Finished,
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    description: String,
    votes: Vec<Rating>,
}

impl PersonRecord {
    fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), votes: Vec::new() }
    }

    pub fn description(&self) -> &str { &self.description }
    pub fn votes(&self) -> &[Rating] { &self.votes }

    /// Mean rating in hundredths, rounded half-up. `None` without votes.
    pub fn average_hundredths(&self) -> Option<u64> {
        if self.votes.is_empty() {
            return None;
        }
        let n = self.votes.len() as u64;
        let sum: u64 = self.votes.iter().map(|r| u64::from(r.value())).sum();
        Some((200 * sum + n) / (2 * n))
    }
}

/// The state of one voting round. Callers serialize access to it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    status: VotingStatus,
    current_person: PersonNumber,
    current_description: String,
    records: BTreeMap<PersonNumber, PersonRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn at_person(current_person: PersonNumber) -> Self {
        Self { status: VotingStatus::Voting, current_person, ..Self::default() }
    }

    pub fn voting_status(&self) -> VotingStatus { self.status }
    pub fn current_person(&self) -> PersonNumber { self.current_person }
    pub fn current_description(&self) -> &str { &self.current_description }
    pub fn record(&self, personnum: PersonNumber) -> Option<&PersonRecord> { self.records.get(&personnum) }

    pub fn apply(&mut self, command: AdminCommand) -> Transition {
        match command {
            AdminCommand::Advance(description) => self.advance(description),
            AdminCommand::Finish => self.finish(),
            AdminCommand::Restart => self.restart(),
        }
    }

    pub fn advance(&mut self, description: impl Into<String>) -> Transition {
        let description = description.into();
        self.status = VotingStatus::Voting;
        self.current_person = self.current_person.saturating_add(1);
        self.current_description = description.clone();
        self.records
            .entry(self.current_person)
            .or_insert_with(|| PersonRecord::new(description.clone()));

        Transition::Advanced { personnum: self.current_person, description }
    }

    pub fn finish(&mut self) -> Transition {
        self.status = VotingStatus::Finished;
        self.current_person = 0;
        self.current_description.clear();
        Transition::Finished
    }

    pub fn restart(&mut self) -> Transition {
        self.status = VotingStatus::NotStarted;
        self.current_person = 0;
        self.current_description.clear();
        self.records.clear();
        Transition::Restarted
    }

    pub fn submit_vote(&mut self, personnum: PersonNumber, rating: i64) -> Result<(), VoteRejection> {
        if self.status != VotingStatus::Voting {
            return Err(VoteRejection::NotActive);
        }
        if personnum == 0 {
            return Err(VoteRejection::NoSuchCandidate(personnum));
        }
        if personnum > self.current_person {
            return Err(VoteRejection::FutureCandidate { current: self.current_person });
        }
        let rating = Rating::try_from(rating).map_err(VoteRejection::RatingOutOfRange)?;

        self.records
            .entry(personnum)
            .or_insert_with(|| PersonRecord::new(format!("Candidate #{}", personnum)))
            .votes
            .push(rating);
        Ok(())
    }

    pub fn status(&self) -> StatusResponse {
        match self.status {
            VotingStatus::Voting => StatusResponse {
                status: self.status,
                personnum: Some(self.current_person),
                description: Some(self.current_description.clone()),
            },
            status => StatusResponse { status, personnum: None, description: None },
        }
    }

    /// Rated candidates, best average first; equal averages keep ascending
    /// person number.
    pub fn results(&self) -> Vec<VoteResult> {
        let mut ranked: Vec<_> = self.records.iter()
            .filter_map(|(&personnum, record)| {
                record.average_hundredths().map(|avg| (personnum, record, avg))
            })
            .collect();

        ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

        ranked.into_iter()
            .map(|(personnum, record, avg)| VoteResult {
                personnum,
                description: record.description.clone(),
                rating: avg as f64 / 100.0,
            })
            .collect()
    }
}
