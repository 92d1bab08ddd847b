use serde::{Deserialize, Serialize};

/// Denormalized counters stored alongside a tuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TuitStats {
    pub replies: i64,
    pub retuits: i64,
    pub likes: i64,
    pub dislikes: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TuitView {
    pub id: String,
    pub tuit: String,
    #[serde(rename(deserialize = "postedBy", serialize = "postedBy"))]
    pub posted_by: String,
    #[serde(rename(deserialize = "postedOn", serialize = "postedOn"))]
    pub posted_on: String,
    pub stats: TuitStats,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTuitInput {
    pub tuit: String,
}
