//! Dislike toggling.
//!
//! A dislike is a `(tuit, user)` row plus a denormalized `dislikes` counter on
//! the tuit. Every mutation of the row set and the matching counter delta go
//! through one [`InteractionStore`] transaction, so at any quiescent point the
//! stored counter moves in lockstep with the rows.

use crate::common::{new_id, now};
use crate::db::DbConn;
use crate::models::{Dislike, Tuit, User};
use diesel::Connection;
use thiserror::Error;

pub mod memory;
pub mod pg;

pub use self::memory::{MemoryInteractionStore, MemoryState};
pub use self::pg::PgInteractionStore;

#[derive(Error, Debug)]
pub enum DislikeError {
    #[error("TuitNotFound: `{0}`")]
    TuitNotFound(String),
    #[error("UserNotFound: `{0}`")]
    UserNotFound(String),
    #[error("DislikeNotFound: `{0}`")]
    DislikeNotFound(String),
    #[error("Conflict: dislike of `{tuit}` by `{user}` was changed by a concurrent request")]
    Conflict { tuit: String, user: String },
    #[error("Database: {0}")]
    Database(#[from] diesel::result::Error),
}

/// State after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub disliked: bool,
    pub dislikes: i64,
}

/// Storage for dislike rows and the per-tuit counter.
///
/// Implementations are used inside a single transaction; callers never mix
/// calls across transactions.
pub trait InteractionStore {
    fn tuit_exists(&mut self, tuit_id: &str) -> Result<bool, DislikeError>;
    fn user_exists(&mut self, user_id: &str) -> Result<bool, DislikeError>;
    fn find_dislike(&mut self, tuit_id: &str, user_id: &str)
        -> Result<Option<Dislike>, DislikeError>;
    fn find_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError>;
    /// Returns whether a row was removed.
    fn remove_dislike(&mut self, tuit_id: &str, user_id: &str) -> Result<bool, DislikeError>;
    fn remove_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError>;
    /// Inserts unless a row for the same `(tuit, user)` exists. Returns whether it was inserted.
    fn insert_dislike(&mut self, dislike: &Dislike) -> Result<bool, DislikeError>;
    /// Adds `delta` to the tuit's stored counter and returns the new value,
    /// or `None` if the tuit does not exist. The counter is never clamped.
    fn adjust_dislike_count(&mut self, tuit_id: &str, delta: i64)
        -> Result<Option<i64>, DislikeError>;
    fn count_dislikes(&mut self, tuit_id: &str) -> Result<i64, DislikeError>;
    fn users_that_disliked_tuit(&mut self, tuit_id: &str) -> Result<Vec<User>, DislikeError>;
    /// Tuits that no longer exist are left out.
    fn tuits_disliked_by_user(&mut self, user_id: &str) -> Result<Vec<Tuit>, DislikeError>;
}

pub fn toggle_dislike<S: InteractionStore + ?Sized>(
    store: &mut S,
    user_id: &str,
    tuit_id: &str,
) -> Result<ToggleOutcome, DislikeError> {
    if !store.tuit_exists(tuit_id)? {
        return Err(DislikeError::TuitNotFound(tuit_id.to_string()));
    }
    if !store.user_exists(user_id)? {
        return Err(DislikeError::UserNotFound(user_id.to_string()));
    }

    let seen = store.find_dislike(tuit_id, user_id)?.is_some();
    if store.remove_dislike(tuit_id, user_id)? {
        let dislikes = store
            .adjust_dislike_count(tuit_id, -1)?
            .ok_or_else(|| DislikeError::TuitNotFound(tuit_id.to_string()))?;
        return Ok(ToggleOutcome {
            disliked: false,
            dislikes,
        });
    }
    // The row we saw was removed by a concurrent toggle before our delete ran.
    if seen {
        return Err(DislikeError::Conflict {
            tuit: tuit_id.to_string(),
            user: user_id.to_string(),
        });
    }

    let dislike = Dislike {
        id: new_id(),
        tuit: tuit_id.to_string(),
        disliked_by: user_id.to_string(),
        created_at: now(),
    };
    // A concurrent toggle inserted the same pair after our delete found nothing.
    if !store.insert_dislike(&dislike)? {
        return Err(DislikeError::Conflict {
            tuit: tuit_id.to_string(),
            user: user_id.to_string(),
        });
    }
    let dislikes = store
        .adjust_dislike_count(tuit_id, 1)?
        .ok_or_else(|| DislikeError::TuitNotFound(tuit_id.to_string()))?;
    Ok(ToggleOutcome {
        disliked: true,
        dislikes,
    })
}

/// Removes a raw dislike by id and gives its dislike back to the tuit, if the tuit still exists.
pub fn delete_dislike<S: InteractionStore + ?Sized>(
    store: &mut S,
    dislike_id: &str,
) -> Result<Dislike, DislikeError> {
    match store.remove_dislike_by_id(dislike_id)? {
        None => Err(DislikeError::DislikeNotFound(dislike_id.to_string())),
        Some(dislike) => {
            store.adjust_dislike_count(&dislike.tuit, -1)?;
            Ok(dislike)
        }
    }
}

pub struct DislikeManager {}

impl DislikeManager {
    #[tracing::instrument(skip_all)]
    pub async fn toggle_dislike(
        db: &DbConn,
        user_id: String,
        tuit_id: String,
    ) -> Result<ToggleOutcome, DislikeError> {
        db.run(move |conn| {
            conn.transaction(|conn| {
                toggle_dislike(&mut PgInteractionStore::new(conn), &user_id, &tuit_id)
            })
        })
        .await
    }

    #[tracing::instrument(skip_all)]
    pub async fn delete_dislike(db: &DbConn, dislike_id: String) -> Result<Dislike, DislikeError> {
        db.run(move |conn| {
            conn.transaction(|conn| delete_dislike(&mut PgInteractionStore::new(conn), &dislike_id))
        })
        .await
    }

    pub async fn find_users_that_disliked_tuit(
        db: &DbConn,
        tuit_id: String,
    ) -> Result<Vec<User>, DislikeError> {
        db.run(move |conn| PgInteractionStore::new(conn).users_that_disliked_tuit(&tuit_id))
            .await
    }

    pub async fn find_tuits_disliked_by_user(
        db: &DbConn,
        user_id: String,
    ) -> Result<Vec<Tuit>, DislikeError> {
        db.run(move |conn| PgInteractionStore::new(conn).tuits_disliked_by_user(&user_id))
            .await
    }

    pub async fn find_user_dislikes_tuit(
        db: &DbConn,
        user_id: String,
        tuit_id: String,
    ) -> Result<Option<Dislike>, DislikeError> {
        db.run(move |conn| PgInteractionStore::new(conn).find_dislike(&tuit_id, &user_id))
            .await
    }

    pub async fn count_dislikes(db: &DbConn, tuit_id: String) -> Result<i64, DislikeError> {
        db.run(move |conn| PgInteractionStore::new(conn).count_dislikes(&tuit_id))
            .await
    }

    pub async fn find_dislike_by_id(
        db: &DbConn,
        dislike_id: String,
    ) -> Result<Option<Dislike>, DislikeError> {
        db.run(move |conn| PgInteractionStore::new(conn).find_dislike_by_id(&dislike_id))
            .await
    }
}
