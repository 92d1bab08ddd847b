use crate::db::DbConn;
use crate::models::{Session, User};
use anyhow::Result;
use helpers::{account, password, session};

/// Helps with readability when calling create_account()
pub struct CreateAccountOpts {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

pub struct AccountManager {}

impl AccountManager {
    /// Returns `None` when the username is already registered.
    #[tracing::instrument(skip_all)]
    pub async fn create_account(db: &DbConn, opts: CreateAccountOpts) -> Result<Option<User>> {
        let CreateAccountOpts {
            username,
            password,
            email,
        } = opts;
        let password_encrypted = password::gen_salt_and_hash(&password)?;
        db.run(move |conn| account::register_user(conn, username, password_encrypted, email))
            .await
    }

    /// Returns the user only if the password matches.
    #[tracing::instrument(skip_all)]
    pub async fn login(db: &DbConn, username: String, password: String) -> Result<Option<User>> {
        let found = db
            .run(move |conn| account::get_user_by_username(conn, &username))
            .await?;
        match found {
            Some(user) if password::verify(&password, &user.password)? => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    pub async fn create_session(db: &DbConn, user_id: String, ttl_ms: i64) -> Result<Session> {
        db.run(move |conn| session::create_session(conn, user_id, ttl_ms))
            .await
    }

    pub async fn get_session_user(db: &DbConn, token: String) -> Result<Option<User>> {
        db.run(move |conn| session::get_session_user(conn, &token))
            .await
    }

    pub async fn delete_session(db: &DbConn, token: String) -> Result<()> {
        db.run(move |conn| session::delete_session(conn, &token))
            .await
    }
}

pub mod helpers;
