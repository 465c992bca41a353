use actix_session::Session;

/// Id of the logged-in user, if any. The session cookie is the only
/// credential this API accepts.
pub fn current_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn log_in(session: &Session, user_id: i64, username: &str) {
    let _ = session.insert("user_id", user_id);
    let _ = session.insert("username", username);
}
