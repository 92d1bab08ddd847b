use crate::common::{new_id, now};
use crate::db::DbConn;
use crate::models::Tuit;
use anyhow::Result;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::{delete, insert_into};

/// Returns `None` when the author does not exist.
pub fn create_tuit(
    conn: &mut PgConnection,
    posted_by: String,
    text: String,
) -> Result<Option<Tuit>> {
    use crate::schema::tuit::dsl as TuitSchema;

    let tuit = Tuit {
        id: new_id(),
        tuit: text,
        posted_by,
        posted_on: now(),
        replies: 0,
        retuits: 0,
        likes: 0,
        dislikes: 0,
    };
    let created = insert_into(TuitSchema::tuit)
        .values(&tuit)
        .returning(Tuit::as_returning())
        .get_result(conn);
    match created {
        Ok(tuit) => Ok(Some(tuit)),
        Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

pub fn find_tuit_by_id(conn: &mut PgConnection, tuit_id: &str) -> Result<Option<Tuit>> {
    use crate::schema::tuit::dsl as TuitSchema;

    let found = TuitSchema::tuit
        .filter(TuitSchema::id.eq(tuit_id))
        .select(Tuit::as_select())
        .first(conn)
        .optional()?;
    Ok(found)
}

/// Dislike rows pointing at the tuit are left in place.
pub fn delete_tuit(conn: &mut PgConnection, tuit_id: &str) -> Result<bool> {
    use crate::schema::tuit::dsl as TuitSchema;

    let deleted = delete(TuitSchema::tuit)
        .filter(TuitSchema::id.eq(tuit_id))
        .execute(conn)?;
    Ok(deleted > 0)
}

pub struct TuitManager {}

impl TuitManager {
    #[tracing::instrument(skip_all)]
    pub async fn create_tuit(
        db: &DbConn,
        posted_by: String,
        text: String,
    ) -> Result<Option<Tuit>> {
        db.run(move |conn| create_tuit(conn, posted_by, text)).await
    }

    pub async fn find_tuit_by_id(db: &DbConn, tuit_id: String) -> Result<Option<Tuit>> {
        db.run(move |conn| find_tuit_by_id(conn, &tuit_id)).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn delete_tuit(db: &DbConn, tuit_id: String) -> Result<bool> {
        db.run(move |conn| delete_tuit(conn, &tuit_id)).await
    }
}
