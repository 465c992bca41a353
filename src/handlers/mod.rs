pub mod auth_handlers;
pub mod room_handlers;

use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};
use serde::Serialize;

use crate::auth;

/// Generic paginated response wrapper for API endpoints.
#[derive(Serialize, Debug, Clone)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

/// CSRF protection for REST API mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON with cookies via simple form POST —
/// the Content-Type check acts as a CSRF guard without requiring tokens.
/// GET requests are exempt (read-only, no state changes).
pub async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure the `/api/v1` surface. Shared between `main` and the
/// handler-level tests so both drive the same route table.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth_handlers::register))
                    .route("/login", web::post().to(auth_handlers::login))
                    .route("/logout", web::post().to(auth_handlers::logout)),
            )
            .service(
                web::scope("/rooms")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .route("", web::get().to(room_handlers::list::list))
                    .route("", web::post().to(room_handlers::crud::create))
                    .route("/{id}", web::get().to(room_handlers::crud::read))
                    .route("/{id}", web::put().to(room_handlers::crud::update))
                    .route("/{id}", web::delete().to(room_handlers::crud::delete))
                    .route("/{id}/join", web::post().to(room_handlers::members::join))
                    .route("/{id}/leave", web::post().to(room_handlers::members::leave))
                    .route(
                        "/{id}/members/{username}",
                        web::delete().to(room_handlers::members::remove),
                    ),
            ),
    );
}
