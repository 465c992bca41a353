use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::models::room::lifecycle::LifecycleError;

pub const ROOM_NOT_FOUND: &str = "Room not found!";
pub const USER_NOT_FOUND: &str = "User not found!";

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Session(String),
    Unauthenticated,
    Forbidden(&'static str),
    NotFound(&'static str),
    Validation(String),
    Lifecycle(LifecycleError),
    Conflict(&'static str),
    Hash(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Unauthenticated => write!(f, "Not authenticated"),
            AppError::Forbidden(msg) => write!(f, "{msg}"),
            AppError::NotFound(what) => write!(f, "{what}"),
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::Lifecycle(e) => write!(f, "{e}"),
            AppError::Conflict(msg) => write!(f, "{msg}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = |msg: &str| serde_json::json!({ "error": msg });
        match self {
            AppError::Unauthenticated | AppError::Session(_) => {
                HttpResponse::Unauthorized().json(body("Authentication required"))
            }
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(body(msg)),
            AppError::NotFound(what) => HttpResponse::NotFound().json(body(what)),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(body(msg)),
            AppError::Lifecycle(e) => HttpResponse::BadRequest().json(body(&e.to_string())),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(body(msg)),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().json(body("Internal Server Error"))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<LifecycleError> for AppError {
    fn from(e: LifecycleError) -> Self {
        AppError::Lifecycle(e)
    }
}
