use diesel::prelude::*;
use tuiter_lexicon::dislikes::DislikeView;

#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::dislike)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dislike {
    #[serde(rename = "id")]
    pub id: String,
    #[serde(rename = "tuit")]
    pub tuit: String,
    #[serde(rename = "dislikedBy")]
    #[diesel(column_name = dislikedBy)]
    pub disliked_by: String,
    #[serde(rename = "createdAt")]
    #[diesel(column_name = createdAt)]
    pub created_at: String,
}

impl From<Dislike> for DislikeView {
    fn from(dislike: Dislike) -> Self {
        DislikeView {
            id: dislike.id,
            tuit: dislike.tuit,
            disliked_by: dislike.disliked_by,
            created_at: dislike.created_at,
        }
    }
}
