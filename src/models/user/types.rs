use serde::Serialize;

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

/// New user data for registration.
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// A room in a user's joined set.
#[derive(Debug, Clone, Serialize)]
pub struct JoinedRoom {
    pub id: i64,
    pub name: String,
}

/// User response for the API — no password hash, includes the joined-room
/// set (the same membership rows the room's member set is read from).
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub rooms: Vec<JoinedRoom>,
}
