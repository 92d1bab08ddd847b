#[macro_use]
extern crate serde_derive;
extern crate rocket;
extern crate serde;
pub mod account_manager;
pub mod apis;
pub mod auth_verifier;
pub mod common;
pub mod config;
pub mod db;
pub mod dislikes;
pub mod models;
pub mod schema;
pub mod tuits;
use crate::config::{env_to_cfg, ServerConfig};
use crate::models::{ErrorCode, ErrorMessageResponse, ServerVersion};
use diesel::prelude::*;
use diesel::sql_types::Int4;
use dotenvy::dotenv;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::{
    util::map,
    value::{Map, Value},
};
use rocket::http::Header;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, options, routes, Build, Request, Response, Rocket};
use tracing_subscriber::EnvFilter;

pub use crate::db::DbConn;

pub struct CORS;

/// Overrides applied on top of the environment, used by tests.
#[derive(Debug, Clone, Default)]
pub struct RocketConfig {
    pub db_url: String,
}

#[get("/")]
pub async fn index() -> &'static str {
    r#"
    tuiter: tuits, sessions and dislikes.

    All API routes are under /api/
    "#
}

#[tracing::instrument(skip_all)]
#[get("/api/_health")]
pub async fn health(
    cfg: &rocket::State<ServerConfig>,
    connection: DbConn,
) -> Result<Json<ServerVersion>, status::Custom<Json<ErrorMessageResponse>>> {
    let result = connection
        .run(move |conn| {
            diesel::select(diesel::dsl::sql::<Int4>("1")) // SELECT 1;
                .get_result::<i32>(conn)
        })
        .await;
    match result {
        Ok(_) => Ok(Json(ServerVersion {
            version: cfg.service.version.clone(),
        })),
        Err(error) => {
            tracing::error!("Internal Error: {error}");
            let internal_error = ErrorMessageResponse {
                code: Some(ErrorCode::ServiceUnavailable),
                message: Some(error.to_string()),
            };
            Err(status::Custom(
                Status::ServiceUnavailable,
                Json(internal_error),
            ))
        }
    }
}

#[catch(400)]
async fn bad_request() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse::new(
        ErrorCode::BadRequest,
        "Malformed request.",
    ))
}

#[catch(401)]
async fn unauthorized() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse::new(
        ErrorCode::Unauthorized,
        "A valid session is required.",
    ))
}

#[catch(404)]
async fn not_found(req: &Request<'_>) -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse::new(
        ErrorCode::NotFound,
        &format!("No route for `{} {}`.", req.method(), req.uri()),
    ))
}

#[catch(422)]
async fn unprocessable_entity() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse::new(
        ErrorCode::UnprocessableEntity,
        "Request body could not be parsed.",
    ))
}

#[catch(default)]
async fn default_catcher() -> Json<ErrorMessageResponse> {
    Json(ErrorMessageResponse::new(
        ErrorCode::InternalServerError,
        "Internal error.",
    ))
}

/// Catches all OPTION requests in order to get the CORS related Fairing triggered.
#[options("/<_..>")]
async fn all_options() {
    /* Intentionally left empty */
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, OPTIONS, DELETE",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

pub async fn build_rocket(overrides: Option<RocketConfig>) -> Rocket<Build> {
    dotenv().ok();

    // A subscriber may already be installed when several rockets are built in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let mut cfg = env_to_cfg();
    if let Some(overrides) = overrides {
        cfg.db.url = overrides.db_url;
    }

    let db: Map<_, Value> = map! {
        "url" => cfg.db.url.clone().into(),
        "pool_size" => (cfg.db.pool_size as u32).into(),
        "timeout" => (cfg.db.timeout as u32).into(),
    };

    let figment = rocket::Config::figment()
        .merge(("port", cfg.service.port as u16))
        .merge(("databases", map!["pg_db" => db]));

    tracing::info!(
        "starting tuiter {} at {}",
        cfg.service.version,
        cfg.service.public_url
    );

    rocket::custom(figment)
        .mount(
            "/",
            routes![
                index,
                health,
                crate::apis::auth::register,
                crate::apis::auth::login,
                crate::apis::auth::logout,
                crate::apis::auth::profile,
                crate::apis::tuits::create_tuit,
                crate::apis::tuits::find_tuit_by_id,
                crate::apis::tuits::delete_tuit,
                crate::apis::dislikes::user_toggles_tuit_dislikes,
                crate::apis::dislikes::find_all_users_that_disliked_tuit,
                crate::apis::dislikes::find_all_tuits_disliked_by_user,
                crate::apis::dislikes::find_user_dislikes_tuit,
                crate::apis::dislikes::count_how_many_disliked_tuit,
                crate::apis::dislikes::find_dislike_by_id,
                crate::apis::dislikes::delete_dislike,
                all_options
            ],
        )
        .register(
            "/",
            catchers![
                bad_request,
                unauthorized,
                not_found,
                unprocessable_entity,
                default_catcher
            ],
        )
        .attach(CORS)
        .attach(DbConn::fairing())
        .manage(cfg)
}
