use tuiter_api::build_rocket;

#[rocket::launch]
async fn rocket() -> _ {
    build_rocket(None).await
}
