use rusqlite::{Connection, OptionalExtension, params};

use super::types::{JoinedRoom, NewUser, User, UserView};

pub fn create(conn: &Connection, user: &NewUser) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        params![user.username, user.password],
    )?;
    Ok(conn.last_insert_rowid())
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        created_at: row.get("created_at")?,
    })
}

pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, password, created_at FROM users WHERE username = ?1",
        params![username],
        row_to_user,
    )
    .optional()
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, password, created_at FROM users WHERE id = ?1",
        params![id],
        row_to_user,
    )
    .optional()
}

/// Load the API view of a user: identity plus joined rooms.
pub fn find_view_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<UserView>> {
    let Some(user) = find_by_id(conn, id)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT r.id, r.name \
         FROM room_members m \
         JOIN rooms r ON r.id = m.room_id \
         WHERE m.user_id = ?1 \
         ORDER BY r.id",
    )?;
    let rooms = stmt
        .query_map(params![id], |row| {
            Ok(JoinedRoom {
                id: row.get("id")?,
                name: row.get("name")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(UserView {
        id: user.id,
        username: user.username,
        rooms,
    }))
}
