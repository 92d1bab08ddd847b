pub mod dislike;
pub mod error_code;
pub mod error_message_response;
pub mod server_version;
pub mod session;
pub mod tuit;
pub mod user;

pub use self::dislike::Dislike;
pub use self::error_code::ErrorCode;
pub use self::error_message_response::ErrorMessageResponse;
pub use self::server_version::ServerVersion;
pub use self::session::Session;
pub use self::tuit::Tuit;
pub use self::user::User;
