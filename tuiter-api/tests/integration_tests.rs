use crate::common::{bearer, create_tuit, get_tuit, register, set_dislike_counter, toggle};
use rocket::http::{ContentType, Cookie, Status};
use serde_json::json;
use tuiter_api::apis::ErrorBody;
use tuiter_api::dislikes::{DislikeError, ToggleOutcome};
use tuiter_lexicon::dislikes::{DislikeCountOutput, DislikeView};
use tuiter_lexicon::tuits::TuitView;
use tuiter_lexicon::users::UserView;

mod common;

#[tokio::test]
async fn test_index() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[tokio::test]
async fn test_health() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let response = client.get("/api/_health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains("version"));
}

#[tokio::test]
async fn test_register_login_profile_logout() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;

    let registered = register(&client, "alice").await;
    assert_eq!(registered.user.username, "alice");

    let response = client
        .post("/api/auth/register")
        .header(ContentType::JSON)
        .body(json!({"username": "alice", "password": "other"}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Conflict);
    let error = response.into_json::<ErrorBody>().await.unwrap();
    assert_eq!(error.error, "UsernameNotAvailable");

    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(json!({"username": "alice", "password": "wrong"}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);

    let response = client
        .post("/api/auth/login")
        .header(ContentType::JSON)
        .body(json!({"username": "alice", "password": "password"}).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let cookie = response
        .cookies()
        .get("tuiter_session")
        .map(|cookie| cookie.value().to_string())
        .expect("session cookie");

    let response = client
        .post("/api/auth/profile")
        .cookie(Cookie::new("tuiter_session", cookie.clone()))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let profile = response.into_json::<UserView>().await.unwrap();
    assert_eq!(profile.id, registered.user.id);

    let response = client
        .post("/api/auth/logout")
        .cookie(Cookie::new("tuiter_session", cookie.clone()))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = client
        .post("/api/auth/profile")
        .cookie(Cookie::new("tuiter_session", cookie))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_toggle_from_seeded_count() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;
    set_dislike_counter(&postgres, &tuit.id, 3).await;

    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, 4);
    let response = client
        .get(format!("/api/users/me/dislikes/{}", tuit.id))
        .header(bearer(&alice.token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let dislike = response.into_json::<DislikeView>().await.unwrap();
    assert_eq!(dislike.disliked_by, alice.user.id);
    assert_eq!(dislike.tuit, tuit.id);

    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, 3);
    let response = client
        .get(format!("/api/users/me/dislikes/{}", tuit.id))
        .header(bearer(&alice.token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn test_counter_goes_negative_when_seeded_inconsistently() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;

    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);
    set_dislike_counter(&postgres, &tuit.id, 0).await;
    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, -1);
}

#[tokio::test]
async fn test_listings_and_count_agree() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let bob = register(&client, "bob").await;
    let carol = register(&client, "carol").await;
    let first = create_tuit(&client, &alice.token, "first").await;
    let second = create_tuit(&client, &alice.token, "second").await;

    for session in [&alice, &bob, &carol] {
        assert_eq!(toggle(&client, &session.token, &first.id).await, Status::Ok);
    }
    assert_eq!(toggle(&client, &bob.token, &first.id).await, Status::Ok);
    assert_eq!(toggle(&client, &bob.token, &second.id).await, Status::Ok);

    let users = client
        .get(format!("/api/tuits/{}/dislikes", first.id))
        .dispatch()
        .await
        .into_json::<Vec<UserView>>()
        .await
        .unwrap();
    let mut names: Vec<_> = users.iter().map(|user| user.username.clone()).collect();
    names.sort();
    assert_eq!(names, vec!["alice".to_string(), "carol".to_string()]);

    let count = client
        .get(format!("/api/tuits/{}/dislikes/count", first.id))
        .dispatch()
        .await
        .into_json::<DislikeCountOutput>()
        .await
        .unwrap();
    assert_eq!(count.count, users.len() as i64);
    assert_eq!(get_tuit(&client, &first.id).await.stats.dislikes, count.count);

    let tuits = client
        .get(format!("/api/users/{}/dislikes", bob.user.id))
        .dispatch()
        .await
        .into_json::<Vec<TuitView>>()
        .await
        .unwrap();
    let ids: Vec<_> = tuits.into_iter().map(|tuit| tuit.id).collect();
    assert_eq!(ids, vec![second.id.clone()]);
}

#[tokio::test]
async fn test_removed_tuits_are_not_listed() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let kept = create_tuit(&client, &alice.token, "kept").await;
    let removed = create_tuit(&client, &alice.token, "removed").await;
    assert_eq!(toggle(&client, &alice.token, &kept.id).await, Status::Ok);
    assert_eq!(toggle(&client, &alice.token, &removed.id).await, Status::Ok);

    let response = client
        .delete(format!("/api/tuits/{}", removed.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let tuits = client
        .get("/api/users/me/dislikes")
        .header(bearer(&alice.token))
        .dispatch()
        .await
        .into_json::<Vec<TuitView>>()
        .await
        .unwrap();
    let ids: Vec<_> = tuits.into_iter().map(|tuit| tuit.id).collect();
    assert_eq!(ids, vec![kept.id]);
}

#[tokio::test]
async fn test_me_without_session_is_unauthorized() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;

    let response = client.get("/api/users/me/dislikes").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
    let error = response.into_json::<ErrorBody>().await.unwrap();
    assert_eq!(error.error, "AuthRequired");

    let response = client.put("/api/users/me/dislikes/anything").dispatch().await;
    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_me_with_stale_token_is_unauthorized() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;

    let response = client
        .get("/api/users/me/dislikes")
        .header(bearer("no-such-session"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Unauthorized);
    let error = response.into_json::<ErrorBody>().await.unwrap();
    assert_eq!(error.error, "AuthRequired");
}

#[tokio::test]
async fn test_explicit_user_ignores_stale_token() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;

    let response = client
        .put(format!("/api/users/{}/dislikes/{}", alice.user.id, tuit.id))
        .cookie(Cookie::new("tuiter_session", "no-such-session"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let response = client
        .get(format!("/api/users/{}/dislikes", alice.user.id))
        .header(bearer("no-such-session"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let tuits = response.into_json::<Vec<TuitView>>().await.unwrap();
    assert_eq!(tuits.len(), 1);
}

#[tokio::test]
async fn test_toggle_missing_tuit_or_user() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;

    assert_eq!(
        toggle(&client, &alice.token, "no-such-tuit").await,
        Status::NotFound
    );
    let response = client
        .put(format!("/api/users/no-such-user/dislikes/{}", tuit.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, 0);
}

#[tokio::test]
async fn test_toggle_on_behalf_of_explicit_user() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;

    let response = client
        .put(format!("/api/users/{}/dislikes/{}", alice.user.id, tuit.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, 1);
}

#[tokio::test]
async fn test_diagnostic_find_and_delete_by_id() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;
    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);

    let dislike = client
        .get(format!("/api/users/me/dislikes/{}", tuit.id))
        .header(bearer(&alice.token))
        .dispatch()
        .await
        .into_json::<DislikeView>()
        .await
        .unwrap();

    let response = client
        .get(format!("/api/dislikes/{}", dislike.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_json::<DislikeView>().await.unwrap(), dislike);

    let response = client
        .delete(format!("/api/dislikes/{}", dislike.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, 0);

    let response = client
        .get(format!("/api/dislikes/{}", dislike.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
    let response = client
        .delete(format!("/api/dislikes/{}", dislike.id))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}

#[tokio::test]
async fn test_concurrent_toggles_keep_counter_consistent() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;

    let statuses = toggle_concurrently(&client, &alice.token, &tuit.id).await;
    for status in &statuses {
        assert!(*status == Status::Ok || *status == Status::Conflict);
    }

    let count = client
        .get(format!("/api/tuits/{}/dislikes/count", tuit.id))
        .dispatch()
        .await
        .into_json::<DislikeCountOutput>()
        .await
        .unwrap();
    // Every 200 flips the state once; every 409 leaves it alone.
    let flips = statuses.iter().filter(|status| **status == Status::Ok).count() as i64;
    assert!(flips >= 1);
    assert_eq!(count.count, flips % 2);
    assert_eq!(get_tuit(&client, &tuit.id).await.stats.dislikes, count.count);
}

#[tokio::test]
async fn test_overlapping_toggle_on_loses_with_conflict() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;
    let url = common::database_url(&postgres).await;

    let (user_id, tuit_id) = (alice.user.id.clone(), tuit.id.clone());
    let (first, second) = tokio::task::spawn_blocking(move || {
        common::overlapping_toggles(&url, &user_id, &tuit_id)
    })
    .await
    .unwrap();
    assert_eq!(
        first.unwrap(),
        ToggleOutcome {
            disliked: true,
            dislikes: 1
        }
    );
    assert!(matches!(second, Err(DislikeError::Conflict { .. })));

    let url = common::database_url(&postgres).await;
    let (rows, counter) = common::dislike_state(&url, &alice.user.id, &tuit.id);
    assert_eq!((rows, counter), (1, 1));
}

#[tokio::test]
async fn test_overlapping_toggle_off_loses_with_conflict() {
    let postgres = common::get_postgres().await;
    let client = common::get_client(&postgres).await;
    let alice = register(&client, "alice").await;
    let tuit = create_tuit(&client, &alice.token, "hello tuiter").await;
    assert_eq!(toggle(&client, &alice.token, &tuit.id).await, Status::Ok);
    let url = common::database_url(&postgres).await;

    let (user_id, tuit_id) = (alice.user.id.clone(), tuit.id.clone());
    let (first, second) = tokio::task::spawn_blocking(move || {
        common::overlapping_toggles(&url, &user_id, &tuit_id)
    })
    .await
    .unwrap();
    assert_eq!(
        first.unwrap(),
        ToggleOutcome {
            disliked: false,
            dislikes: 0
        }
    );
    assert!(matches!(second, Err(DislikeError::Conflict { .. })));

    let url = common::database_url(&postgres).await;
    let (rows, counter) = common::dislike_state(&url, &alice.user.id, &tuit.id);
    assert_eq!((rows, counter), (0, 0));
}

async fn toggle_concurrently(
    client: &rocket::local::asynchronous::Client,
    token: &str,
    tuit_id: &str,
) -> Vec<Status> {
    let (a, b, c, d) = tokio::join!(
        toggle(client, token, tuit_id),
        toggle(client, token, tuit_id),
        toggle(client, token, tuit_id),
        toggle(client, token, tuit_id),
    );
    vec![a, b, c, d]
}
