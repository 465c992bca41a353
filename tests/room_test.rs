//! Tests for room lifecycle date resolution and room persistence:
//! schedule defaults, clamping, rejection paths, revision-checked
//! updates, and delete cascade.

use chrono::{Duration, Utc};

use parlor::models::room::lifecycle::{
    LifecycleError, resolve_create_schedule, resolve_update_schedule,
};
use parlor::models::room::{self, NewRoom, RoomUpdate};

mod common;
use common::{create_room, create_user, setup_test_db};

// ---------------------------------------------------------------------------
// Create schedule resolution
// ---------------------------------------------------------------------------

#[test]
fn test_create_schedule_defaults() {
    let now = Utc::now();
    let (start, end) = resolve_create_schedule(now, None, None, 24).expect("schedule");
    assert_eq!(start, now);
    assert_eq!(end, now + Duration::hours(24));
}

#[test]
fn test_create_schedule_default_end_follows_given_start() {
    let now = Utc::now();
    let start = now + Duration::hours(2);
    let (s, e) = resolve_create_schedule(now, Some(start), None, 24).expect("schedule");
    assert_eq!(s, start);
    assert_eq!(e, start + Duration::hours(24));
}

#[test]
fn test_create_schedule_clamps_past_start() {
    let now = Utc::now();
    let (start, end) =
        resolve_create_schedule(now, Some(now - Duration::hours(2)), Some(now + Duration::hours(1)), 24)
            .expect("schedule");
    assert_eq!(start, now);
    assert_eq!(end, now + Duration::hours(1));
}

#[test]
fn test_create_schedule_rejects_inverted_range() {
    let now = Utc::now();
    let result = resolve_create_schedule(
        now,
        Some(now + Duration::hours(10)),
        Some(now + Duration::hours(5)),
        24,
    );
    assert_eq!(result, Err(LifecycleError::InvalidDateRange));
}

#[test]
fn test_create_schedule_rejects_expired_end() {
    let now = Utc::now();
    // valid range, but the whole window is already in the past
    let result = resolve_create_schedule(
        now,
        Some(now - Duration::hours(3)),
        Some(now - Duration::hours(1)),
        24,
    );
    assert_eq!(result, Err(LifecycleError::AlreadyExpired));
}

// ---------------------------------------------------------------------------
// Update schedule resolution
// ---------------------------------------------------------------------------

#[test]
fn test_update_schedule_keeps_range_without_end() {
    let now = Utc::now();
    let cur_start = now - Duration::hours(1);
    let cur_end = now + Duration::hours(5);
    // a lone start date is ignored
    let (s, e) =
        resolve_update_schedule(now, cur_start, cur_end, Some(now + Duration::hours(2)), None)
            .expect("schedule");
    assert_eq!(s, cur_start);
    assert_eq!(e, cur_end);
}

#[test]
fn test_update_schedule_end_only() {
    let now = Utc::now();
    let cur_start = now - Duration::hours(1);
    let cur_end = now + Duration::hours(5);
    let new_end = now + Duration::hours(10);
    let (s, e) = resolve_update_schedule(now, cur_start, cur_end, None, Some(new_end))
        .expect("schedule");
    assert_eq!(s, cur_start);
    assert_eq!(e, new_end);
}

#[test]
fn test_update_schedule_rejects_inverted_range() {
    let now = Utc::now();
    let result = resolve_update_schedule(
        now,
        now,
        now + Duration::hours(5),
        Some(now + Duration::hours(10)),
        Some(now + Duration::hours(5)),
    );
    assert_eq!(result, Err(LifecycleError::InvalidDateRange));
}

#[test]
fn test_update_schedule_rejects_expired_end() {
    let now = Utc::now();
    let result = resolve_update_schedule(
        now,
        now - Duration::hours(2),
        now + Duration::hours(5),
        None,
        Some(now - Duration::minutes(1)),
    );
    assert_eq!(result, Err(LifecycleError::AlreadyExpired));
}

#[test]
fn test_update_schedule_rejects_end_before_stored_start() {
    let now = Utc::now();
    // room starts in the future; pulling the end below that start would
    // break the range invariant even though the end itself is future
    let cur_start = now + Duration::hours(8);
    let result = resolve_update_schedule(
        now,
        cur_start,
        now + Duration::hours(12),
        None,
        Some(now + Duration::hours(4)),
    );
    assert_eq!(result, Err(LifecycleError::InvalidDateRange));
}

#[test]
fn test_update_schedule_clamps_supplied_past_start() {
    let now = Utc::now();
    let (s, e) = resolve_update_schedule(
        now,
        now + Duration::hours(1),
        now + Duration::hours(5),
        Some(now - Duration::hours(2)),
        Some(now + Duration::hours(6)),
    )
    .expect("schedule");
    assert_eq!(s, now);
    assert_eq!(e, now + Duration::hours(6));
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn test_create_room_persists_invariants() {
    let (_dir, mut conn) = setup_test_db();
    let alice = create_user(&conn, "alice");

    let now = Utc::now();
    let id = room::create(
        &mut conn,
        &NewRoom {
            name: "Weekend hikes".to_string(),
            description: "Trails nearby".to_string(),
            start_date: now,
            end_date: now + Duration::hours(24),
            creator_id: alice,
            interests: vec!["sports".to_string(), "travel".to_string()],
        },
    )
    .expect("create room");

    let detail = room::find_detail_by_id(&conn, id)
        .expect("query")
        .expect("room missing");
    assert_eq!(detail.room.name, "Weekend hikes");
    assert_eq!(detail.creator_username, "alice");
    assert!(detail.room.start_date < detail.room.end_date);
    assert!(detail.members.is_empty(), "creator must not be a member");
    assert_eq!(detail.interests, vec!["sports", "travel"]);
    assert_eq!(detail.room.revision, 0);
}

#[test]
fn test_find_detail_missing_room() {
    let (_dir, conn) = setup_test_db();
    let found = room::find_detail_by_id(&conn, 999_999).expect("query");
    assert!(found.is_none());
}

#[test]
fn test_update_with_matching_revision_applies() {
    let (_dir, mut conn) = setup_test_db();
    let alice = create_user(&conn, "alice");
    let id = create_room(&mut conn, alice, "Original");

    let detail = room::find_detail_by_id(&conn, id).expect("query").expect("room");
    let now = Utc::now();
    let applied = room::update_with_revision(
        &mut conn,
        id,
        detail.room.revision,
        &RoomUpdate {
            name: "Renamed".to_string(),
            description: "New description".to_string(),
            start_date: detail.room.start_date,
            end_date: now + Duration::hours(48),
            interests: Some(vec!["music".to_string()]),
        },
    )
    .expect("update");
    assert!(applied);

    let updated = room::find_detail_by_id(&conn, id).expect("query").expect("room");
    assert_eq!(updated.room.name, "Renamed");
    assert_eq!(updated.room.revision, 1);
    assert_eq!(updated.interests, vec!["music"]);
}

#[test]
fn test_update_with_stale_revision_writes_nothing() {
    let (_dir, mut conn) = setup_test_db();
    let alice = create_user(&conn, "alice");
    let id = create_room(&mut conn, alice, "Original");

    let detail = room::find_detail_by_id(&conn, id).expect("query").expect("room");
    let update = RoomUpdate {
        name: "First writer".to_string(),
        description: String::new(),
        start_date: detail.room.start_date,
        end_date: detail.room.end_date,
        interests: None,
    };
    assert!(room::update_with_revision(&mut conn, id, detail.room.revision, &update).expect("update"));

    // Second writer still holds revision 0 — its write must be refused
    // and must not touch the row.
    let stale = RoomUpdate {
        name: "Second writer".to_string(),
        description: String::new(),
        start_date: detail.room.start_date,
        end_date: detail.room.end_date,
        interests: Some(vec!["games".to_string()]),
    };
    let applied =
        room::update_with_revision(&mut conn, id, detail.room.revision, &stale).expect("update");
    assert!(!applied);

    let current = room::find_detail_by_id(&conn, id).expect("query").expect("room");
    assert_eq!(current.room.name, "First writer");
    assert_eq!(current.room.revision, 1);
    assert!(current.interests.is_empty());
}

#[test]
fn test_delete_room_cascades_membership_and_interests() {
    let (_dir, mut conn) = setup_test_db();
    let alice = create_user(&conn, "alice");
    let bob = create_user(&conn, "bob");
    let now = Utc::now();
    let id = room::create(
        &mut conn,
        &NewRoom {
            name: "Short lived".to_string(),
            description: String::new(),
            start_date: now,
            end_date: now + Duration::hours(24),
            creator_id: alice,
            interests: vec!["games".to_string()],
        },
    )
    .expect("create room");
    room::add_member(&conn, id, bob).expect("join");

    assert_eq!(room::delete(&conn, id).expect("delete"), 1);
    assert!(room::find_detail_by_id(&conn, id).expect("query").is_none());

    let members: i64 = conn
        .query_row("SELECT COUNT(*) FROM room_members WHERE room_id = ?1", [id], |r| r.get(0))
        .expect("count members");
    let interests: i64 = conn
        .query_row("SELECT COUNT(*) FROM room_interests WHERE room_id = ?1", [id], |r| r.get(0))
        .expect("count interests");
    assert_eq!(members, 0);
    assert_eq!(interests, 0);
}

#[test]
fn test_find_paginated() {
    let (_dir, mut conn) = setup_test_db();
    let alice = create_user(&conn, "alice");
    for i in 0..5 {
        create_room(&mut conn, alice, &format!("Room {i}"));
    }

    let page1 = room::find_paginated(&conn, 1, 2).expect("paginate");
    assert_eq!(page1.page, 1);
    assert_eq!(page1.per_page, 2);
    assert_eq!(page1.total_count, 5);
    assert_eq!(page1.total_pages, 3);
    assert_eq!(page1.rooms.len(), 2);
    // newest first
    assert_eq!(page1.rooms[0].name, "Room 4");

    let page3 = room::find_paginated(&conn, 3, 2).expect("paginate p3");
    assert_eq!(page3.rooms.len(), 1);
}
