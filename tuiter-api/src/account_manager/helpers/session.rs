use crate::common::time::{is_expired, ms_from_now};
use crate::common::{get_random_str, now};
use crate::models::{Session, User};
use anyhow::Result;
use diesel::{delete, insert_into};
use diesel::pg::PgConnection;
use diesel::prelude::*;

pub fn create_session(conn: &mut PgConnection, user_id: String, ttl_ms: i64) -> Result<Session> {
    use crate::schema::session::dsl as SessionSchema;

    let session = Session {
        token: get_random_str(),
        user_id,
        created_at: now(),
        expires_at: ms_from_now(ttl_ms),
    };
    insert_into(SessionSchema::session)
        .values(&session)
        .execute(conn)?;
    Ok(session)
}

/// Resolves a token to its user. Expired sessions are deleted and treated as absent.
pub fn get_session_user(conn: &mut PgConnection, token: &str) -> Result<Option<User>> {
    use crate::schema::session::dsl as SessionSchema;
    use crate::schema::user::dsl as UserSchema;

    let found = SessionSchema::session
        .inner_join(UserSchema::user)
        .filter(SessionSchema::token.eq(token))
        .select((Session::as_select(), User::as_select()))
        .first::<(Session, User)>(conn)
        .optional()?;
    match found {
        None => Ok(None),
        Some((session, user)) => {
            if is_expired(&session.expires_at)? {
                delete_session(conn, token)?;
                Ok(None)
            } else {
                Ok(Some(user))
            }
        }
    }
}

pub fn delete_session(conn: &mut PgConnection, token: &str) -> Result<()> {
    use crate::schema::session::dsl as SessionSchema;

    delete(SessionSchema::session)
        .filter(SessionSchema::token.eq(token))
        .execute(conn)?;
    Ok(())
}
