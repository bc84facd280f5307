use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorResponse, ValidationError, VoteRejection};
use thiserror::Error;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Rejected(#[from] VoteRejection),
    #[error("{0}")]
    Unprocessable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Unprocessable(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Rejected(_) => Status::BadRequest,
            ApiError::Unprocessable(_) => Status::UnprocessableEntity,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        rocket::Response::build_from(Json(ErrorResponse::new(self.to_string())).respond_to(req)?)
            .status(status)
            .ok()
    }
}
