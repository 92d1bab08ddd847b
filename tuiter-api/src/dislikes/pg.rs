use super::{DislikeError, InteractionStore};
use crate::models::{Dislike, Tuit, User};
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

pub struct PgInteractionStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgInteractionStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        PgInteractionStore { conn }
    }
}

impl InteractionStore for PgInteractionStore<'_> {
    fn tuit_exists(&mut self, tuit_id: &str) -> Result<bool, DislikeError> {
        use crate::schema::tuit::dsl as TuitSchema;

        let found = diesel::select(exists(
            TuitSchema::tuit.filter(TuitSchema::id.eq(tuit_id)),
        ))
        .get_result::<bool>(self.conn)?;
        Ok(found)
    }

    fn user_exists(&mut self, user_id: &str) -> Result<bool, DislikeError> {
        use crate::schema::user::dsl as UserSchema;

        let found = diesel::select(exists(
            UserSchema::user.filter(UserSchema::id.eq(user_id)),
        ))
        .get_result::<bool>(self.conn)?;
        Ok(found)
    }

    fn find_dislike(
        &mut self,
        tuit_id: &str,
        user_id: &str,
    ) -> Result<Option<Dislike>, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let result = DislikeSchema::dislike
            .filter(DislikeSchema::tuit.eq(tuit_id))
            .filter(DislikeSchema::dislikedBy.eq(user_id))
            .select(Dislike::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }

    fn find_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let result = DislikeSchema::dislike
            .filter(DislikeSchema::id.eq(dislike_id))
            .select(Dislike::as_select())
            .first(self.conn)
            .optional()?;
        Ok(result)
    }

    fn remove_dislike(&mut self, tuit_id: &str, user_id: &str) -> Result<bool, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let deleted = diesel::delete(DislikeSchema::dislike)
            .filter(DislikeSchema::tuit.eq(tuit_id))
            .filter(DislikeSchema::dislikedBy.eq(user_id))
            .execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn remove_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let deleted = diesel::delete(DislikeSchema::dislike)
            .filter(DislikeSchema::id.eq(dislike_id))
            .returning(Dislike::as_returning())
            .get_result(self.conn)
            .optional()?;
        Ok(deleted)
    }

    fn insert_dislike(&mut self, dislike: &Dislike) -> Result<bool, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let inserted = diesel::insert_into(DislikeSchema::dislike)
            .values(dislike)
            .on_conflict((DislikeSchema::tuit, DislikeSchema::dislikedBy))
            .do_nothing()
            .execute(self.conn);
        match inserted {
            Ok(rows) => Ok(rows == 1),
            // The user row went away between the existence check and the insert.
            Err(DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)) => Err(
                DislikeError::UserNotFound(dislike.disliked_by.clone()),
            ),
            Err(error) => Err(error.into()),
        }
    }

    fn adjust_dislike_count(
        &mut self,
        tuit_id: &str,
        delta: i64,
    ) -> Result<Option<i64>, DislikeError> {
        use crate::schema::tuit::dsl as TuitSchema;

        let dislikes = diesel::update(TuitSchema::tuit)
            .filter(TuitSchema::id.eq(tuit_id))
            .set(TuitSchema::dislikes.eq(TuitSchema::dislikes + delta))
            .returning(TuitSchema::dislikes)
            .get_result::<i64>(self.conn)
            .optional()?;
        Ok(dislikes)
    }

    fn count_dislikes(&mut self, tuit_id: &str) -> Result<i64, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;

        let count = DislikeSchema::dislike
            .filter(DislikeSchema::tuit.eq(tuit_id))
            .count()
            .get_result::<i64>(self.conn)?;
        Ok(count)
    }

    fn users_that_disliked_tuit(&mut self, tuit_id: &str) -> Result<Vec<User>, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;
        use crate::schema::user::dsl as UserSchema;

        let users = DislikeSchema::dislike
            .inner_join(UserSchema::user)
            .filter(DislikeSchema::tuit.eq(tuit_id))
            .order(DislikeSchema::createdAt.asc())
            .select(User::as_select())
            .load(self.conn)?;
        Ok(users)
    }

    fn tuits_disliked_by_user(&mut self, user_id: &str) -> Result<Vec<Tuit>, DislikeError> {
        use crate::schema::dislike::dsl as DislikeSchema;
        use crate::schema::tuit::dsl as TuitSchema;

        let tuits = DislikeSchema::dislike
            .inner_join(TuitSchema::tuit)
            .filter(DislikeSchema::dislikedBy.eq(user_id))
            .order(DislikeSchema::createdAt.asc())
            .select(Tuit::as_select())
            .load(self.conn)?;
        Ok(tuits)
    }
}
