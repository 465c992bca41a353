use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::current_user_id;
use crate::db::DbPool;
use crate::errors::{AppError, ROOM_NOT_FOUND, USER_NOT_FOUND};
use crate::models::room;
use crate::models::room::RoomView;
use crate::models::room::lifecycle;
use crate::models::user;

/// POST /api/v1/rooms/{id}/join - Join as the requester. Returns the
/// requester's user view with its updated joined-room set.
pub async fn join(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;
    let room_id = path.into_inner();
    let conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    lifecycle::check_join(&detail, user_id)?;

    room::add_member(&conn, room_id, user_id)?;

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.member_joined",
        "room",
        room_id,
        serde_json::json!({ "user_id": user_id }),
    );

    let view =
        user::find_view_by_id(&conn, user_id)?.ok_or(AppError::NotFound(USER_NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/v1/rooms/{id}/leave - Leave as the requester.
///
/// Membership is one relation, so deleting the row updates the room's
/// member set and the requester's joined set together.
pub async fn leave(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;
    let room_id = path.into_inner();
    let conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    lifecycle::check_leave(&detail, user_id)?;

    room::remove_member(&conn, room_id, user_id)?;

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.member_left",
        "room",
        room_id,
        serde_json::json!({ "user_id": user_id }),
    );

    let view =
        user::find_view_by_id(&conn, user_id)?.ok_or(AppError::NotFound(USER_NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(view))
}

/// DELETE /api/v1/rooms/{id}/members/{username} - Remove a member.
/// Creator only; the creator itself can never be the target.
pub async fn remove(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, String)>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user_id(&session).ok_or(AppError::Unauthenticated)?;
    let (room_id, username) = path.into_inner();
    let conn = pool.get()?;

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    if detail.room.creator_id != user_id {
        return Err(AppError::Forbidden(
            "The user is not allowed to do it for this room!",
        ));
    }

    let target =
        user::find_by_username(&conn, &username)?.ok_or(AppError::NotFound(USER_NOT_FOUND))?;
    lifecycle::check_remove_member(&detail, target.id)?;

    room::remove_member(&conn, room_id, target.id)?;

    let _ = crate::audit::log(
        &conn,
        user_id,
        "room.member_removed",
        "room",
        room_id,
        serde_json::json!({ "user_id": target.id, "username": target.username }),
    );

    let detail =
        room::find_detail_by_id(&conn, room_id)?.ok_or(AppError::NotFound(ROOM_NOT_FOUND))?;
    Ok(HttpResponse::Ok().json(RoomView::from(detail)))
}
