use diesel::prelude::*;

#[derive(Queryable, Selectable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = crate::schema::session)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Session {
    pub token: String,
    #[diesel(column_name = userId)]
    pub user_id: String,
    #[diesel(column_name = createdAt)]
    pub created_at: String,
    #[diesel(column_name = expiresAt)]
    pub expires_at: String,
}
