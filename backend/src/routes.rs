use rocket::{State, get, post, http::Status, serde::json::Json};
use rocket::form::{self, FromForm};
use tracing::{debug, info, warn, instrument};
use shared::{
    AdminCommand, AdminResponse, StatusResponse, Transition, VoteResponse, VoteResult,
    validate_description, validate_vote,
};
use crate::{error::ApiError, store::SessionStore};

#[derive(Debug, Default)]
pub struct AppState {
    pub session: SessionStore,
}

impl AppState {
    pub fn new() -> Self {
        Self { session: SessionStore::new() }
    }
}

#[derive(Debug, FromForm)]
pub struct VoteQuery {
    personnum: i64,
    rating: i64,
}

#[derive(Debug, FromForm)]
pub struct DescriptionQuery {
    description: String,
}

fn form_error(errors: form::Errors<'_>) -> ApiError {
    let detail = errors.iter()
        .map(|e| match &e.name {
            Some(name) => format!("{}: {}", name, e.kind),
            None => e.kind.to_string(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    warn!("Rejected malformed query: {}", detail);
    ApiError::Unprocessable(detail)
}

fn apply_command(state: &AppState, command: AdminCommand) -> Result<Json<AdminResponse>, ApiError> {
    let transition = state.session.with(|session| session.apply(command))?;
    match &transition {
        Transition::Advanced { personnum, description } => {
            info!("Voting opened for participant #{} ({})", personnum, description)
        }
        Transition::Finished => info!("Voting finished"),
        Transition::Restarted => info!("Voting reset, all results discarded"),
    }
    Ok(Json(AdminResponse::from(transition)))
}

#[instrument]
#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[instrument(skip(state))]
#[get("/status")]
pub fn get_status(state: &State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    Ok(Json(state.session.with(|session| session.status())?))
}

#[instrument(skip(state, query))]
#[post("/vote?<query..>")]
pub fn submit_vote(
    state: &State<AppState>,
    query: form::Result<'_, VoteQuery>,
) -> Result<Json<VoteResponse>, ApiError> {
    let query = query.map_err(form_error)?;
    let request = validate_vote(query.personnum, query.rating)?;

    state.session
        .with(|session| session.submit_vote(request.personnum, request.rating))?
        .map_err(|rejection| {
            warn!("Vote for #{} rejected: {}", request.personnum, rejection);
            rejection
        })?;

    debug!("Vote {} accepted for #{}", request.rating, request.personnum);
    Ok(Json(VoteResponse::accepted()))
}

/// Legacy admin channel: `VOTING_FINISHED` and `VOTING_RESTART` are commands,
/// anything else names the next candidate.
#[instrument(skip(state, query))]
#[post("/setcurrentperson?<query..>")]
pub fn set_current_person(
    state: &State<AppState>,
    query: form::Result<'_, DescriptionQuery>,
) -> Result<Json<AdminResponse>, ApiError> {
    let query = query.map_err(form_error)?;
    validate_description(&query.description)?;
    apply_command(state, AdminCommand::from_label(&query.description))
}

#[instrument(skip(state, query))]
#[post("/admin/next?<query..>")]
pub fn advance_candidate(
    state: &State<AppState>,
    query: form::Result<'_, DescriptionQuery>,
) -> Result<Json<AdminResponse>, ApiError> {
    let query = query.map_err(form_error)?;
    validate_description(&query.description)?;
    apply_command(state, AdminCommand::Advance(query.description))
}

#[instrument(skip(state))]
#[post("/admin/finish")]
pub fn finish_voting(state: &State<AppState>) -> Result<Json<AdminResponse>, ApiError> {
    apply_command(state, AdminCommand::Finish)
}

#[instrument(skip(state))]
#[post("/admin/restart")]
pub fn restart_voting(state: &State<AppState>) -> Result<Json<AdminResponse>, ApiError> {
    apply_command(state, AdminCommand::Restart)
}

#[instrument(skip(state))]
#[get("/getresults")]
pub fn get_results(state: &State<AppState>) -> Result<Json<Vec<VoteResult>>, ApiError> {
    Ok(Json(state.session.with(|session| session.results())?))
}
