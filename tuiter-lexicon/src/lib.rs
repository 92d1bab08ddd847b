pub mod auth;
pub mod dislikes;
pub mod tuits;
pub mod users;
