use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use crate::auth::session::current_user_id;
use crate::auth::validate;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::{AppError, ROOM_NOT_FOUND};
use crate::models::interests;
use crate::models::room;
use crate::models::room::lifecycle::{self, LifecycleError};
use crate::models::room::{CreateRoomRequest, NewRoom, RoomUpdate, RoomView, UpdateRoomRequest};

/// POST /api/v1/rooms - Create a room with the requester as creator.
pub async fn create(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    session: Session,
    body: web::Json<CreateRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;

    let mut errors = Vec::new();
    errors.extend(validate::validate_room_name(&body.name));
    errors.extend(validate::validate_description(&body.description));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let now = Utc::now();
    let (start_date, end_date) = lifecycle::resolve_create_schedule(
        now,
        body.start_date,
        body.end_date,
        config.default_expiration_hours,
    )?;

    if !interests::is_valid_room_interests(&body.interests) {
        return Err(LifecycleError::InvalidInterestFormat.into());
    }
    let interests = interests::normalize(&body.interests);

    let mut conn = pool.get()?;
    let id = room::create(
        &mut conn,
        &NewRoom {
            name: body.name.trim().to_string(),
            description: body.description.trim().to_string(),
            start_date,
            end_date,
            creator_id: user_id,
            interests,
        },
    )?;

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.created",
        "room",
        id,
        serde_json::json!({ "name": body.name.trim() }),
    );

    let detail = room::find_detail_by_id(&conn, id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    Ok(HttpResponse::Created().json(RoomView::from(detail)))
}

/// GET /api/v1/rooms/{id} - Fetch a single room. Read-only, any
/// authenticated caller.
pub async fn read(
    pool: web::Data<DbPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let room_id = path.into_inner();
    let conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(RoomView::from(detail)))
}

/// PUT /api/v1/rooms/{id} - Partial update by the creator.
///
/// Absent (or blank) name/description keep their stored values; dates go
/// through the lifecycle rules; the interest set is replaced wholesale
/// when provided. The write is revision-checked.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<UpdateRoomRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;
    let room_id = path.into_inner();
    let mut conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    if detail.room.creator_id != user_id {
        return Err(AppError::Forbidden("Only the creator can update the room!"));
    }

    let now = Utc::now();
    let (start_date, end_date) = lifecycle::resolve_update_schedule(
        now,
        detail.room.start_date,
        detail.room.end_date,
        body.start_date,
        body.end_date,
    )?;

    let name = match body.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => {
            if let Some(err) = validate::validate_room_name(n) {
                return Err(AppError::Validation(err));
            }
            n.to_string()
        }
        _ => detail.room.name.clone(),
    };
    let description = match body.description.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => {
            if let Some(err) = validate::validate_description(d) {
                return Err(AppError::Validation(err));
            }
            d.to_string()
        }
        _ => detail.room.description.clone(),
    };

    let new_interests = match &body.interests {
        Some(tags) => {
            if !interests::is_valid_room_interests(tags) {
                return Err(LifecycleError::InvalidInterestFormat.into());
            }
            Some(interests::normalize(tags))
        }
        None => None,
    };

    let update = RoomUpdate {
        name,
        description,
        start_date,
        end_date,
        interests: new_interests,
    };
    let applied = room::update_with_revision(&mut conn, room_id, detail.room.revision, &update)?;
    if !applied {
        // Zero rows matched: the room vanished or a concurrent writer
        // bumped the revision between our read and this write.
        return match room::find_detail_by_id(&conn, room_id)? {
            Some(_) => Err(AppError::Conflict("Room was modified by another request")),
            None => Err(AppError::NotFound(ROOM_NOT_FOUND)),
        };
    }

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.updated",
        "room",
        room_id,
        serde_json::json!({ "revision": detail.room.revision + 1 }),
    );

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(RoomView::from(detail)))
}

/// DELETE /api/v1/rooms/{id} - Remove a room. Creator only.
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;
    let room_id = path.into_inner();
    let conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    if detail.room.creator_id != user_id {
        return Err(AppError::Forbidden("Only the creator can delete the room!"));
    }

    room::delete(&conn, room_id)?;

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.deleted",
        "room",
        room_id,
        serde_json::json!({ "name": detail.room.name }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Room is deleted!" })))
}
