use crate::account_manager::{AccountManager, CreateAccountOpts};
use crate::apis::ApiError;
use crate::auth_verifier::{SessionToken, SessionUser};
use crate::config::ServerConfig;
use crate::db::DbConn;
use crate::models::User;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::State;
use tuiter_lexicon::auth::{CreateSessionOutput, LoginInput, RegisterInput};
use tuiter_lexicon::users::UserView;

async fn start_session(
    db: &DbConn,
    cfg: &ServerConfig,
    cookies: &CookieJar<'_>,
    user: User,
) -> Result<CreateSessionOutput, ApiError> {
    let session = match AccountManager::create_session(db, user.id.clone(), cfg.session.ttl_ms)
        .await
    {
        Ok(session) => session,
        Err(error) => {
            tracing::error!("@LOG: failed to create session: {error}");
            return Err(ApiError::RuntimeError);
        }
    };
    cookies.add(
        Cookie::build((cfg.session.cookie_name.clone(), session.token.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(!cfg.service.dev_mode && cfg.service.hostname != "localhost"),
    );
    Ok(CreateSessionOutput {
        token: session.token,
        user: user.into(),
    })
}

fn validate_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(ApiError::InvalidRequest("Password is required".to_string()));
    }
    Ok(())
}

#[tracing::instrument(skip_all)]
#[rocket::post("/api/auth/register", format = "json", data = "<body>")]
pub async fn register(
    body: Json<RegisterInput>,
    cfg: &State<ServerConfig>,
    cookies: &CookieJar<'_>,
    db: DbConn,
) -> Result<Json<CreateSessionOutput>, ApiError> {
    let RegisterInput {
        username,
        password,
        email,
    } = body.into_inner();
    validate_credentials(&username, &password)?;

    let created = AccountManager::create_account(
        &db,
        CreateAccountOpts {
            username,
            password,
            email,
        },
    )
    .await;
    match created {
        Ok(Some(user)) => {
            tracing::info!(user = %user.id, "registered user");
            Ok(Json(start_session(&db, cfg, cookies, user).await?))
        }
        Ok(None) => Err(ApiError::UsernameNotAvailable),
        Err(error) => {
            tracing::error!("@LOG: failed to register user: {error}");
            Err(ApiError::RuntimeError)
        }
    }
}

#[tracing::instrument(skip_all)]
#[rocket::post("/api/auth/login", format = "json", data = "<body>")]
pub async fn login(
    body: Json<LoginInput>,
    cfg: &State<ServerConfig>,
    cookies: &CookieJar<'_>,
    db: DbConn,
) -> Result<Json<CreateSessionOutput>, ApiError> {
    let LoginInput { username, password } = body.into_inner();
    validate_credentials(&username, &password)?;

    match AccountManager::login(&db, username, password).await {
        Ok(Some(user)) => Ok(Json(start_session(&db, cfg, cookies, user).await?)),
        Ok(None) => Err(ApiError::InvalidLogin),
        Err(error) => {
            tracing::error!("@LOG: failed to log in: {error}");
            Err(ApiError::RuntimeError)
        }
    }
}

/// Always succeeds; an absent or stale session just clears the cookie.
#[tracing::instrument(skip_all)]
#[rocket::post("/api/auth/logout")]
pub async fn logout(
    token: Option<SessionToken>,
    cfg: &State<ServerConfig>,
    cookies: &CookieJar<'_>,
    db: DbConn,
) -> Result<(), ApiError> {
    if let Some(SessionToken(token)) = token {
        if let Err(error) = AccountManager::delete_session(&db, token).await {
            tracing::error!("@LOG: failed to delete session: {error}");
            return Err(ApiError::RuntimeError);
        }
    }
    cookies.remove(Cookie::new(cfg.session.cookie_name.clone(), ""));
    Ok(())
}

#[tracing::instrument(skip_all)]
#[rocket::post("/api/auth/profile")]
pub async fn profile(session: SessionUser) -> Json<UserView> {
    Json(session.user.into())
}
