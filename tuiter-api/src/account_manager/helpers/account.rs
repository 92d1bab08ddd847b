use crate::common::{new_id, now};
use crate::models::User;
use anyhow::Result;
use diesel::insert_into;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// Returns `None` when the username is taken.
pub fn register_user(
    conn: &mut PgConnection,
    username: String,
    password_encrypted: String,
    email: Option<String>,
) -> Result<Option<User>> {
    use crate::schema::user::dsl as UserSchema;

    let user = User {
        id: new_id(),
        username,
        password: password_encrypted,
        email,
        created_at: now(),
    };
    let created = insert_into(UserSchema::user)
        .values(&user)
        .on_conflict(UserSchema::username)
        .do_nothing()
        .returning(User::as_returning())
        .get_result(conn)
        .optional()?;
    Ok(created)
}

pub fn get_user_by_username(conn: &mut PgConnection, username: &str) -> Result<Option<User>> {
    use crate::schema::user::dsl as UserSchema;

    let found = UserSchema::user
        .filter(UserSchema::username.eq(username))
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(found)
}
