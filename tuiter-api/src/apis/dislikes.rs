use crate::apis::ApiError;
use crate::auth_verifier::{AuthError, SessionToken, UserRef};
use crate::db::DbConn;
use crate::dislikes::DislikeManager;
use rocket::serde::json::Json;
use tuiter_lexicon::dislikes::{DislikeCountOutput, DislikeView};
use tuiter_lexicon::tuits::TuitView;
use tuiter_lexicon::users::UserView;

/// Dislikes the tuit on behalf of the user, or takes the dislike back if it exists.
#[tracing::instrument(skip_all)]
#[rocket::put("/api/users/<uid>/dislikes/<tid>")]
pub async fn user_toggles_tuit_dislikes(
    uid: UserRef,
    tid: &str,
    token: Result<SessionToken, AuthError>,
    db: DbConn,
) -> Result<(), ApiError> {
    let user_id = uid.resolve(&db, token).await?;
    let outcome = DislikeManager::toggle_dislike(&db, user_id.clone(), tid.to_string()).await?;
    tracing::debug!(
        user = %user_id,
        tuit = %tid,
        disliked = outcome.disliked,
        dislikes = outcome.dislikes,
        "toggled dislike"
    );
    Ok(())
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/tuits/<tid>/dislikes")]
pub async fn find_all_users_that_disliked_tuit(
    tid: &str,
    db: DbConn,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = DislikeManager::find_users_that_disliked_tuit(&db, tid.to_string()).await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/users/<uid>/dislikes")]
pub async fn find_all_tuits_disliked_by_user(
    uid: UserRef,
    token: Result<SessionToken, AuthError>,
    db: DbConn,
) -> Result<Json<Vec<TuitView>>, ApiError> {
    let user_id = uid.resolve(&db, token).await?;
    let tuits = DislikeManager::find_tuits_disliked_by_user(&db, user_id).await?;
    Ok(Json(tuits.into_iter().map(TuitView::from).collect()))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/users/<uid>/dislikes/<tid>")]
pub async fn find_user_dislikes_tuit(
    uid: UserRef,
    tid: &str,
    token: Result<SessionToken, AuthError>,
    db: DbConn,
) -> Result<Json<DislikeView>, ApiError> {
    let user_id = uid.resolve(&db, token).await?;
    match DislikeManager::find_user_dislikes_tuit(&db, user_id.clone(), tid.to_string()).await? {
        Some(dislike) => Ok(Json(dislike.into())),
        None => Err(ApiError::NotFound(format!(
            "User `{user_id}` has not disliked tuit `{tid}`"
        ))),
    }
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/tuits/<tid>/dislikes/count")]
pub async fn count_how_many_disliked_tuit(
    tid: &str,
    db: DbConn,
) -> Result<Json<DislikeCountOutput>, ApiError> {
    let count = DislikeManager::count_dislikes(&db, tid.to_string()).await?;
    Ok(Json(DislikeCountOutput { count }))
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/dislikes/<did>")]
pub async fn find_dislike_by_id(did: &str, db: DbConn) -> Result<Json<DislikeView>, ApiError> {
    match DislikeManager::find_dislike_by_id(&db, did.to_string()).await? {
        Some(dislike) => Ok(Json(dislike.into())),
        None => Err(ApiError::NotFound(format!("Dislike `{did}` not found"))),
    }
}

#[tracing::instrument(skip_all)]
#[rocket::delete("/api/dislikes/<did>")]
pub async fn delete_dislike(did: &str, db: DbConn) -> Result<Json<DislikeView>, ApiError> {
    let dislike = DislikeManager::delete_dislike(&db, did.to_string()).await?;
    tracing::info!(dislike = %dislike.id, tuit = %dislike.tuit, "deleted dislike");
    Ok(Json(dislike.into()))
}
