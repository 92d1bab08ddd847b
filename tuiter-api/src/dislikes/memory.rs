use super::{DislikeError, InteractionStore};
use crate::common::now;
use crate::models::{Dislike, Tuit, User};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// Tables held in memory. Dislikes are keyed by `(tuit, user)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub users: HashMap<String, User>,
    pub tuits: HashMap<String, Tuit>,
    pub dislikes: BTreeMap<(String, String), Dislike>,
}

impl MemoryState {
    pub fn insert_user(&mut self, id: &str) {
        self.users.insert(
            id.to_string(),
            User {
                id: id.to_string(),
                username: id.to_string(),
                password: String::new(),
                email: None,
                created_at: now(),
            },
        );
    }

    pub fn insert_tuit(&mut self, id: &str, posted_by: &str, dislikes: i64) {
        self.tuits.insert(
            id.to_string(),
            Tuit {
                id: id.to_string(),
                tuit: format!("tuit {id}"),
                posted_by: posted_by.to_string(),
                posted_on: now(),
                replies: 0,
                retuits: 0,
                likes: 0,
                dislikes,
            },
        );
    }
}

/// An [`InteractionStore`] over process memory.
///
/// [`MemoryInteractionStore::transaction`] holds the lock for the whole closure,
/// so transactions are serialized. A closure returning an error leaves the
/// state as it was before the closure ran.
#[derive(Debug, Clone, Default)]
pub struct MemoryInteractionStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryInteractionStore {
    pub fn transaction<T, F>(&self, f: F) -> Result<T, DislikeError>
    where
        F: FnOnce(&mut MemoryState) -> Result<T, DislikeError>,
    {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let snapshot = guard.clone();
        let result = f(&mut guard);
        if result.is_err() {
            *guard = snapshot;
        }
        result
    }
}

impl InteractionStore for MemoryState {
    fn tuit_exists(&mut self, tuit_id: &str) -> Result<bool, DislikeError> {
        Ok(self.tuits.contains_key(tuit_id))
    }

    fn user_exists(&mut self, user_id: &str) -> Result<bool, DislikeError> {
        Ok(self.users.contains_key(user_id))
    }

    fn find_dislike(
        &mut self,
        tuit_id: &str,
        user_id: &str,
    ) -> Result<Option<Dislike>, DislikeError> {
        Ok(self
            .dislikes
            .get(&(tuit_id.to_string(), user_id.to_string()))
            .cloned())
    }

    fn find_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError> {
        Ok(self
            .dislikes
            .values()
            .find(|dislike| dislike.id == dislike_id)
            .cloned())
    }

    fn remove_dislike(&mut self, tuit_id: &str, user_id: &str) -> Result<bool, DislikeError> {
        Ok(self
            .dislikes
            .remove(&(tuit_id.to_string(), user_id.to_string()))
            .is_some())
    }

    fn remove_dislike_by_id(&mut self, dislike_id: &str) -> Result<Option<Dislike>, DislikeError> {
        let key = self
            .dislikes
            .iter()
            .find(|(_, dislike)| dislike.id == dislike_id)
            .map(|(key, _)| key.clone());
        Ok(key.and_then(|key| self.dislikes.remove(&key)))
    }

    fn insert_dislike(&mut self, dislike: &Dislike) -> Result<bool, DislikeError> {
        let key = (dislike.tuit.clone(), dislike.disliked_by.clone());
        if self.dislikes.contains_key(&key) {
            return Ok(false);
        }
        self.dislikes.insert(key, dislike.clone());
        Ok(true)
    }

    fn adjust_dislike_count(
        &mut self,
        tuit_id: &str,
        delta: i64,
    ) -> Result<Option<i64>, DislikeError> {
        Ok(self.tuits.get_mut(tuit_id).map(|tuit| {
            tuit.dislikes += delta;
            tuit.dislikes
        }))
    }

    fn count_dislikes(&mut self, tuit_id: &str) -> Result<i64, DislikeError> {
        Ok(self
            .dislikes
            .keys()
            .filter(|(tuit, _)| tuit == tuit_id)
            .count() as i64)
    }

    fn users_that_disliked_tuit(&mut self, tuit_id: &str) -> Result<Vec<User>, DislikeError> {
        let mut dislikes: Vec<&Dislike> = self
            .dislikes
            .values()
            .filter(|dislike| dislike.tuit == tuit_id)
            .collect();
        dislikes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(dislikes
            .into_iter()
            .filter_map(|dislike| self.users.get(&dislike.disliked_by).cloned())
            .collect())
    }

    fn tuits_disliked_by_user(&mut self, user_id: &str) -> Result<Vec<Tuit>, DislikeError> {
        let mut dislikes: Vec<&Dislike> = self
            .dislikes
            .values()
            .filter(|dislike| dislike.disliked_by == user_id)
            .collect();
        dislikes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(dislikes
            .into_iter()
            .filter_map(|dislike| self.tuits.get(&dislike.tuit).cloned())
            .collect())
    }
}
