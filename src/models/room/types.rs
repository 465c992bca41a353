use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row from the `rooms` table.
#[derive(Debug, Clone)]
pub struct RoomRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
    /// Optimistic version counter, bumped on every full-row update.
    pub revision: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub username: String,
}

/// A room with its creator, member set, and interest set resolved.
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub room: RoomRow,
    pub creator_username: String,
    pub members: Vec<Member>,
    pub interests: Vec<String>,
}

impl RoomDetail {
    pub fn is_member(&self, user_id: i64) -> bool {
        self.members.iter().any(|m| m.id == user_id)
    }
}

/// New room data for creation. Interests must already be normalized.
pub struct NewRoom {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator_id: i64,
    pub interests: Vec<String>,
}

/// The full target state of a room row for a revision-checked update.
/// `interests: None` leaves the stored interest set untouched.
pub struct RoomUpdate {
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub interests: Option<Vec<String>>,
}

/// For the room list endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RoomListItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator: String,
    pub member_count: i64,
}

/// Pagination metadata for the room list.
pub struct RoomPage {
    pub rooms: Vec<RoomListItem>,
    pub page: i64,
    pub per_page: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

/// Room response for the API.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub creator: String,
    pub members: Vec<String>,
    pub interests: Vec<String>,
    pub revision: i64,
}

impl From<RoomDetail> for RoomView {
    fn from(d: RoomDetail) -> Self {
        RoomView {
            id: d.room.id,
            name: d.room.name,
            description: d.room.description,
            start_date: d.room.start_date,
            end_date: d.room.end_date,
            creator: d.creator_username,
            members: d.members.into_iter().map(|m| m.username).collect(),
            interests: d.interests,
            revision: d.room.revision,
        }
    }
}

/// Create room request.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Update room request. Absent fields mean "no change"; a blank name or
/// description is indistinguishable from absence. A `start_date` without
/// an `end_date` is ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub interests: Option<Vec<String>>,
}
