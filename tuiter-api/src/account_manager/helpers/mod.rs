pub mod account;
pub mod password;
pub mod session;
