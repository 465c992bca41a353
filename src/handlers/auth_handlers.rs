use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::{password, session, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::user;
use crate::models::user::NewUser;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/auth/register - Create an account and log it in.
pub async fn register(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_username(&body.username));
    errors.extend(validate::validate_password(&body.password));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let username = body.username.trim().to_string();
    let conn = pool.get()?;

    if user::find_by_username(&conn, &username)?.is_some() {
        return Err(AppError::Validation("Username is already taken".to_string()));
    }

    let hashed = password::hash_password(&body.password).map_err(AppError::Hash)?;
    let id = user::create(
        &conn,
        &NewUser {
            username: username.clone(),
            password: hashed,
        },
    )?;

    let _ = crate::audit::log(
        &conn,
        id,
        "user.registered",
        "user",
        id,
        serde_json::json!({ "username": username }),
    );

    session::log_in(&session, id, &username);

    let view = user::find_view_by_id(&conn, id)?.ok_or(AppError::NotFound(crate::errors::USER_NOT_FOUND))?;
    Ok(HttpResponse::Created().json(view))
}

/// POST /api/v1/auth/login - Start a session.
///
/// Failure is a uniform message: the response never reveals whether the
/// username exists.
pub async fn login(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let found = user::find_by_username(&conn, body.username.trim())?;

    match found {
        Some(u) if password::verify_password(&body.password, &u.password) == Ok(true) => {
            session::log_in(&session, u.id, &u.username);
            let view = user::find_view_by_id(&conn, u.id)?
                .ok_or(AppError::NotFound(crate::errors::USER_NOT_FOUND))?;
            Ok(HttpResponse::Ok().json(view))
        }
        _ => Err(AppError::Validation("Invalid username or password".to_string())),
    }
}

/// POST /api/v1/auth/logout - End the session.
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })))
}
