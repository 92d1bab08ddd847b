use serde::{Deserialize, Serialize};

/// One user's dislike of one tuit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DislikeView {
    pub id: String,
    pub tuit: String,
    #[serde(rename(deserialize = "dislikedBy", serialize = "dislikedBy"))]
    pub disliked_by: String,
    #[serde(rename(deserialize = "createdAt", serialize = "createdAt"))]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DislikeCountOutput {
    pub count: i64,
}
