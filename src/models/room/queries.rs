use rusqlite::{Connection, params};

use super::types::{Member, NewRoom, RoomDetail, RoomListItem, RoomPage, RoomRow, RoomUpdate};

const SELECT_ROOM: &str = "\
    SELECT r.id, r.name, r.description, r.start_date, r.end_date, \
           r.creator_id, r.revision, r.created_at, r.updated_at, \
           u.username AS creator_username \
    FROM rooms r \
    JOIN users u ON u.id = r.creator_id";

fn row_to_room(row: &rusqlite::Row) -> rusqlite::Result<(RoomRow, String)> {
    Ok((
        RoomRow {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            start_date: row.get("start_date")?,
            end_date: row.get("end_date")?,
            creator_id: row.get("creator_id")?,
            revision: row.get("revision")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        },
        row.get("creator_username")?,
    ))
}

/// Insert a new room with its interest set. Returns the assigned id.
pub fn create(conn: &mut Connection, room: &NewRoom) -> rusqlite::Result<i64> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO rooms (name, description, start_date, end_date, creator_id) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            room.name,
            room.description,
            room.start_date,
            room.end_date,
            room.creator_id
        ],
    )?;
    let id = tx.last_insert_rowid();
    for interest in &room.interests {
        tx.execute(
            "INSERT INTO room_interests (room_id, interest) VALUES (?1, ?2)",
            params![id, interest],
        )?;
    }
    tx.commit()?;
    Ok(id)
}

/// Load a room with creator username, member set, and interest set.
pub fn find_detail_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<RoomDetail>> {
    let sql = format!("{SELECT_ROOM} WHERE r.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_room)?;
    let Some((room, creator_username)) = rows.next().transpose()? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT m.user_id, u.username \
         FROM room_members m \
         JOIN users u ON u.id = m.user_id \
         WHERE m.room_id = ?1 \
         ORDER BY u.username",
    )?;
    let members = stmt
        .query_map(params![id], |row| {
            Ok(Member {
                id: row.get("user_id")?,
                username: row.get("username")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT interest FROM room_interests WHERE room_id = ?1 ORDER BY interest",
    )?;
    let interests = stmt
        .query_map(params![id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(RoomDetail {
        room,
        creator_username,
        members,
        interests,
    }))
}

/// Find rooms with pagination, newest first.
pub fn find_paginated(conn: &Connection, page: i64, per_page: i64) -> rusqlite::Result<RoomPage> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, 100);
    let offset = (page - 1) * per_page;

    let total_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?;

    let mut stmt = conn.prepare(
        "SELECT r.id, r.name, r.description, r.start_date, r.end_date, \
                u.username AS creator, \
                (SELECT COUNT(*) FROM room_members m WHERE m.room_id = r.id) AS member_count \
         FROM rooms r \
         JOIN users u ON u.id = r.creator_id \
         ORDER BY r.id DESC \
         LIMIT ?1 OFFSET ?2",
    )?;
    let rooms = stmt
        .query_map(params![per_page, offset], |row| {
            Ok(RoomListItem {
                id: row.get("id")?,
                name: row.get("name")?,
                description: row.get("description")?,
                start_date: row.get("start_date")?,
                end_date: row.get("end_date")?,
                creator: row.get("creator")?,
                member_count: row.get("member_count")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let total_pages = ((total_count as f64) / (per_page as f64)).ceil() as i64;

    Ok(RoomPage {
        rooms,
        page,
        per_page,
        total_count,
        total_pages,
    })
}

/// Revision-checked full-row update. Returns false if no row matched the
/// expected revision — either the room is gone or a concurrent writer got
/// there first; the caller distinguishes the two. Nothing is written in
/// that case, the interest rewrite included.
pub fn update_with_revision(
    conn: &mut Connection,
    id: i64,
    expected_revision: i64,
    update: &RoomUpdate,
) -> rusqlite::Result<bool> {
    let tx = conn.transaction()?;
    let updated = tx.execute(
        "UPDATE rooms \
         SET name = ?1, description = ?2, start_date = ?3, end_date = ?4, \
             revision = revision + 1, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
         WHERE id = ?5 AND revision = ?6",
        params![
            update.name,
            update.description,
            update.start_date,
            update.end_date,
            id,
            expected_revision
        ],
    )?;
    if updated == 0 {
        return Ok(false);
    }
    if let Some(interests) = &update.interests {
        tx.execute("DELETE FROM room_interests WHERE room_id = ?1", params![id])?;
        for interest in interests {
            tx.execute(
                "INSERT INTO room_interests (room_id, interest) VALUES (?1, ?2)",
                params![id, interest],
            )?;
        }
    }
    tx.commit()?;
    Ok(true)
}

pub fn add_member(conn: &Connection, room_id: i64, user_id: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO room_members (room_id, user_id) VALUES (?1, ?2)",
        params![room_id, user_id],
    )?;
    Ok(())
}

pub fn remove_member(conn: &Connection, room_id: i64, user_id: i64) -> rusqlite::Result<usize> {
    conn.execute(
        "DELETE FROM room_members WHERE room_id = ?1 AND user_id = ?2",
        params![room_id, user_id],
    )
}

/// Delete a room. Membership and interest rows go with it via FK cascade.
pub fn delete(conn: &Connection, room_id: i64) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM rooms WHERE id = ?1", params![room_id])
}
