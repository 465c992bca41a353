pub mod interests;
pub mod room;
pub mod user;
