use crate::account_manager::AccountManager;
use crate::apis::ApiError;
use crate::config::ServerConfig;
use crate::db::DbConn;
use crate::models::User;
use rocket::http::Status;
use rocket::request::{FromParam, FromRequest, Outcome, Request};
use std::convert::Infallible;
use thiserror::Error;

/// Path segment standing for the logged-in user.
pub const ME: &str = "me";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("AuthMissing: no session token was provided")]
    AuthMissing,
    #[error("InvalidSession: session is unknown or expired")]
    InvalidSession,
    #[error("Internal: `{0}`")]
    Internal(String),
}

/// The raw session token carried by the request. Does not touch the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionToken {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cookie_name = match req.rocket().state::<ServerConfig>() {
            Some(cfg) => cfg.session.cookie_name.clone(),
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    AuthError::Internal("server config is not managed".to_string()),
                ))
            }
        };
        match session_token_from_req(req, &cookie_name) {
            Some(token) => Outcome::Success(SessionToken(token)),
            None => Outcome::Error((Status::Unauthorized, AuthError::AuthMissing)),
        }
    }
}

/// The user behind the request's session cookie or bearer token.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user: User,
    pub token: String,
}

impl SessionUser {
    pub async fn lookup(db: &DbConn, token: SessionToken) -> Result<SessionUser, AuthError> {
        let SessionToken(token) = token;
        match AccountManager::get_session_user(db, token.clone()).await {
            Ok(Some(user)) => Ok(SessionUser { user, token }),
            Ok(None) => Err(AuthError::InvalidSession),
            Err(error) => {
                tracing::error!("@LOG: failed to look up session: {error}");
                Err(AuthError::Internal(error.to_string()))
            }
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match req.guard::<SessionToken>().await {
            Outcome::Success(token) => token,
            Outcome::Error(error) => return Outcome::Error(error),
            Outcome::Forward(status) => return Outcome::Forward(status),
        };
        let db = match req.guard::<DbConn>().await {
            Outcome::Success(db) => db,
            _ => {
                return Outcome::Error((
                    Status::ServiceUnavailable,
                    AuthError::Internal("no database connection available".to_string()),
                ))
            }
        };
        match SessionUser::lookup(&db, token).await {
            Ok(session) => Outcome::Success(session),
            Err(AuthError::Internal(error)) => Outcome::Error((
                Status::InternalServerError,
                AuthError::Internal(error),
            )),
            Err(error) => Outcome::Error((Status::Unauthorized, error)),
        }
    }
}

/// The cookie wins over an `Authorization: Bearer` header.
pub fn session_token_from_req(request: &Request, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = request.cookies().get(cookie_name) {
        return Some(cookie.value().to_string());
    }
    bearer_token_from_req(request)
}

pub fn bearer_token_from_req(request: &Request) -> Option<String> {
    match request.headers().get_one("authorization") {
        Some(header) if !header.starts_with("Bearer ") => None,
        Some(header) => {
            let slice = &header["Bearer ".len()..];
            Some(slice.to_string())
        }
        None => None,
    }
}

/// A user id path segment, or `me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Me,
    Id(String),
}

impl UserRef {
    /// An explicit id is taken as is. `me` needs a live session, looked up on
    /// the handler's own connection.
    pub async fn resolve(
        self,
        db: &DbConn,
        token: Result<SessionToken, AuthError>,
    ) -> Result<String, ApiError> {
        match self {
            UserRef::Id(id) => Ok(id),
            UserRef::Me => {
                let session = SessionUser::lookup(db, token?).await?;
                Ok(session.user.id)
            }
        }
    }
}

impl<'a> FromParam<'a> for UserRef {
    type Error = Infallible;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        if param == ME {
            Ok(UserRef::Me)
        } else {
            Ok(UserRef::Id(param.to_string()))
        }
    }
}
