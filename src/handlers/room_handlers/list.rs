use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::PaginatedResponse;
use crate::models::room;

/// GET /api/v1/rooms - List rooms with pagination, newest first.
/// Query params: page (default 1), per_page (default 25, capped at 100).
pub async fn list(
    pool: web::Data<DbPool>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    let per_page = query
        .get("per_page")
        .and_then(|p| p.parse::<i64>().ok())
        .unwrap_or(25)
        .clamp(1, 100);

    let conn = pool.get()?;
    let room_page = room::find_paginated(&conn, page, per_page)?;

    let response = PaginatedResponse {
        items: room_page.rooms,
        page: room_page.page,
        per_page: room_page.per_page,
        total: room_page.total_count,
    };

    Ok(HttpResponse::Ok().json(response))
}
