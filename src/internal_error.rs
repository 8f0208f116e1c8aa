use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rusqlite::ErrorCode;
use thiserror::Error;
use tracing::{error, warn};

use std::sync::PoisonError;

#[derive(Error, Debug)]
pub enum InternalError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database connection failure: {0}")]
    ConnectionFailure(String),

    #[error("{entity} is already saved with id {id}")]
    AlreadySaved { entity: &'static str, id: i64 },

    #[error("{entity} has not been saved yet")]
    NotSaved { entity: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(rusqlite::Error),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::NotFound { .. } => Status::NotFound,
            InternalError::ConstraintViolation(_) => Status::Conflict,
            InternalError::ConnectionFailure(_) => Status::ServiceUnavailable,
            InternalError::InvalidInput(_) => Status::BadRequest,
            InternalError::AlreadySaved { .. }
            | InternalError::NotSaved { .. }
            | InternalError::Storage(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::ConnectionFailure(e.to_string())
    }
}

impl From<rusqlite::Error> for InternalError {
    fn from(e: rusqlite::Error) -> InternalError {
        match e.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => InternalError::ConstraintViolation(e.to_string()),
            Some(ErrorCode::CannotOpen)
            | Some(ErrorCode::DatabaseBusy)
            | Some(ErrorCode::DatabaseLocked)
            | Some(ErrorCode::NotADatabase)
            | Some(ErrorCode::DatabaseCorrupt)
            | Some(ErrorCode::PermissionDenied) => InternalError::ConnectionFailure(e.to_string()),
            _ => InternalError::Storage(e),
        }
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        if status.code >= 500 {
            error!("{} {}: {}", request.method(), request.uri(), self);
        } else {
            warn!("{} {}: {}", request.method(), request.uri(), self);
        }

        (status, self.to_string()).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
