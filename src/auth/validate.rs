/// Validate a username: 2-50 chars, alphanumeric and underscore only.
pub fn validate_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Some("Username is required".to_string());
    }
    if trimmed.len() < 2 {
        return Some("Username must be at least 2 characters".to_string());
    }
    if trimmed.len() > 50 {
        return Some("Username must be at most 50 characters".to_string());
    }
    if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some("Username may only contain letters, numbers, and underscores".to_string());
    }
    None
}

/// Validate a password: min 8 chars on registration.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.len() < 8 {
        return Some("Password must be at least 8 characters".to_string());
    }
    None
}

/// Validate a room name: required, max 100 chars.
pub fn validate_room_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("Room name is required".to_string());
    }
    if trimmed.len() > 100 {
        return Some("Room name must be at most 100 characters".to_string());
    }
    None
}

/// Validate a room description: optional, max 500 chars.
pub fn validate_description(description: &str) -> Option<String> {
    if description.trim().len() > 500 {
        return Some("Description must be at most 500 characters".to_string());
    }
    None
}
