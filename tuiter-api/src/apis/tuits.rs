use crate::apis::ApiError;
use crate::auth_verifier::{AuthError, SessionToken, UserRef};
use crate::db::DbConn;
use crate::tuits::TuitManager;
use rocket::serde::json::Json;
use tuiter_lexicon::tuits::{CreateTuitInput, TuitView};

#[tracing::instrument(skip_all)]
#[rocket::post("/api/users/<uid>/tuits", format = "json", data = "<body>")]
pub async fn create_tuit(
    uid: UserRef,
    body: Json<CreateTuitInput>,
    token: Result<SessionToken, AuthError>,
    db: DbConn,
) -> Result<Json<TuitView>, ApiError> {
    let user_id = uid.resolve(&db, token).await?;
    let CreateTuitInput { tuit } = body.into_inner();
    if tuit.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Tuit text is required".to_string()));
    }
    match TuitManager::create_tuit(&db, user_id.clone(), tuit).await {
        Ok(Some(created)) => Ok(Json(created.into())),
        Ok(None) => Err(ApiError::NotFound(format!("User `{user_id}` not found"))),
        Err(error) => {
            tracing::error!("@LOG: failed to create tuit: {error}");
            Err(ApiError::RuntimeError)
        }
    }
}

#[tracing::instrument(skip_all)]
#[rocket::get("/api/tuits/<tid>")]
pub async fn find_tuit_by_id(tid: &str, db: DbConn) -> Result<Json<TuitView>, ApiError> {
    match TuitManager::find_tuit_by_id(&db, tid.to_string()).await {
        Ok(Some(tuit)) => Ok(Json(tuit.into())),
        Ok(None) => Err(ApiError::NotFound(format!("Tuit `{tid}` not found"))),
        Err(error) => {
            tracing::error!("@LOG: failed to find tuit: {error}");
            Err(ApiError::RuntimeError)
        }
    }
}

#[tracing::instrument(skip_all)]
#[rocket::delete("/api/tuits/<tid>")]
pub async fn delete_tuit(tid: &str, db: DbConn) -> Result<(), ApiError> {
    match TuitManager::delete_tuit(&db, tid.to_string()).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(ApiError::NotFound(format!("Tuit `{tid}` not found"))),
        Err(error) => {
            tracing::error!("@LOG: failed to delete tuit: {error}");
            Err(ApiError::RuntimeError)
        }
    }
}
