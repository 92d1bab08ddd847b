use diesel::prelude::*;
use tuiter_lexicon::tuits::{TuitStats, TuitView};

#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::tuit)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tuit {
    pub id: String,
    #[diesel(column_name = content)]
    pub tuit: String,
    #[diesel(column_name = postedBy)]
    pub posted_by: String,
    #[diesel(column_name = postedOn)]
    pub posted_on: String,
    pub replies: i64,
    pub retuits: i64,
    pub likes: i64,
    pub dislikes: i64,
}

impl Tuit {
    pub fn stats(&self) -> TuitStats {
        TuitStats {
            replies: self.replies,
            retuits: self.retuits,
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}

impl From<Tuit> for TuitView {
    fn from(tuit: Tuit) -> Self {
        let stats = tuit.stats();
        TuitView {
            id: tuit.id,
            tuit: tuit.tuit,
            posted_by: tuit.posted_by,
            posted_on: tuit.posted_on,
            stats,
        }
    }
}
