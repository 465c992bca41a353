//! Room lifecycle rules: effective date-range resolution and membership
//! transition guards.
//!
//! Everything here is a pure decision over already-loaded state — handlers
//! load, call in, and only then persist, so a rejected operation never
//! leaves a partial write behind. A room is active within
//! `[start_date, end_date)`; once `end_date` passes it is implicitly
//! expired, enforced only by rejecting creates and updates that would
//! produce an already-expired range. The creator sits outside the member
//! state space entirely.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::types::RoomDetail;

/// A rejected lifecycle transition. All variants map to 400 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    InvalidDateRange,
    AlreadyExpired,
    InvalidInterestFormat,
    AlreadyMember,
    CreatorCannotJoin,
    NotAMember,
    CreatorCannotLeave,
    CannotRemoveCreator,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LifecycleError::InvalidDateRange => "End date must be after start date!",
            LifecycleError::AlreadyExpired => "Room date has been expired!",
            LifecycleError::InvalidInterestFormat => "Interests format is not valid!",
            LifecycleError::AlreadyMember => "User is already a member of the room!",
            LifecycleError::CreatorCannotJoin => "User is the creator of the room!",
            LifecycleError::NotAMember => "The user is not a member of this room!",
            LifecycleError::CreatorCannotLeave => "Creator can not leave the room!",
            LifecycleError::CannotRemoveCreator => "Creator can not be removed!",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for LifecycleError {}

/// Resolve the effective date range for a new room.
///
/// Missing start defaults to `now`; missing end defaults to start plus the
/// configured expiration period. The range check runs on the dates as
/// given; a start in the past is clamped to `now` only after both checks
/// pass.
pub fn resolve_create_schedule(
    now: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    default_expiration_hours: i64,
) -> Result<(DateTime<Utc>, DateTime<Utc>), LifecycleError> {
    let start = start.unwrap_or(now);
    let end = end.unwrap_or(start + Duration::hours(default_expiration_hours));

    if start >= end {
        return Err(LifecycleError::InvalidDateRange);
    }
    if now >= end {
        return Err(LifecycleError::AlreadyExpired);
    }

    let start = if start < now { now } else { start };
    Ok((start, end))
}

/// Resolve the effective date range for an update.
///
/// A new start is only applied alongside a new end; on its own it is
/// ignored and the stored range stands. When an end is given it must be in
/// the future, and the range invariant is checked against whichever start
/// will be in effect. An explicitly-supplied past start clamps to `now`;
/// a kept stored start is left alone.
pub fn resolve_update_schedule(
    now: DateTime<Utc>,
    current_start: DateTime<Utc>,
    current_end: DateTime<Utc>,
    new_start: Option<DateTime<Utc>>,
    new_end: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), LifecycleError> {
    let Some(end) = new_end else {
        return Ok((current_start, current_end));
    };

    if now >= end {
        return Err(LifecycleError::AlreadyExpired);
    }

    let start = new_start.unwrap_or(current_start);
    if start >= end {
        return Err(LifecycleError::InvalidDateRange);
    }

    let start = match new_start {
        Some(s) if s < now => now,
        _ => start,
    };
    Ok((start, end))
}

/// Guard a join: members cannot join twice, the creator cannot join at all.
pub fn check_join(room: &RoomDetail, user_id: i64) -> Result<(), LifecycleError> {
    if room.is_member(user_id) {
        return Err(LifecycleError::AlreadyMember);
    }
    if room.room.creator_id == user_id {
        return Err(LifecycleError::CreatorCannotJoin);
    }
    Ok(())
}

/// Guard a leave: only current members can leave, and never the creator.
pub fn check_leave(room: &RoomDetail, user_id: i64) -> Result<(), LifecycleError> {
    if room.room.creator_id == user_id {
        return Err(LifecycleError::CreatorCannotLeave);
    }
    if !room.is_member(user_id) {
        return Err(LifecycleError::NotAMember);
    }
    Ok(())
}

/// Guard a member removal. The caller has already established that the
/// requester is the creator.
pub fn check_remove_member(room: &RoomDetail, target_id: i64) -> Result<(), LifecycleError> {
    if target_id == room.room.creator_id {
        return Err(LifecycleError::CannotRemoveCreator);
    }
    if !room.is_member(target_id) {
        return Err(LifecycleError::NotAMember);
    }
    Ok(())
}
