mod support;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use support::{app_with_user, character, delete, episode, get, seed, send, with_json};

async fn seed_pilot(pool: &PgPool) {
    seed(
        pool,
        &[episode(1, &[1, 2]), episode(2, &[2])],
        &[character(1, "Alive", &[1, 2]), character(2, "Alive", &[1, 2])],
    )
    .await;
}

fn comment(text: &str) -> serde_json::Value {
    json!({"comment": text})
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn membership_decides_episode_character_comments(pool: PgPool) {
    seed(&pool, &[episode(1, &[1, 2])], &[character(1, "Alive", &[1, 2])]).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let request = with_json("POST", "/comments/episodes/1/1", &token, comment("Wubba lubba"));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1}));

    let request = with_json("POST", "/comments/episodes/1/999", &token, comment("Who?"));
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Character id 999 is not in episode id 1.");
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn author_is_the_authenticated_user(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "morty").await;

    let request = with_json("POST", "/comments/characters/2", &token, comment("Aw geez"));
    let (_, created) = send(&app, request).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/comments/{}", id), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": id,
            "username": "morty",
            "episode_id": null,
            "character_id": 2,
            "comment": "Aw geez"
        })
    );
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn missing_targets_are_not_found(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let cases = [
        ("/comments/episodes/5", "Episode id 5 not found."),
        ("/comments/characters/7", "Character id 7 not found."),
        ("/comments/episodes/9/1", "Episode id 9 not found."),
    ];
    for (uri, detail) in cases {
        let (status, body) = send(&app, with_json("POST", uri, &token, comment("hi"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["detail"], detail);
    }

    let (_, page) = send(&app, get("/comments", &token)).await;
    assert_eq!(page["total"], 0);
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn empty_comment_text_is_rejected(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let blank = with_json("POST", "/comments/episodes/1", &token, comment("  "));
    let (status, _) = send(&app, blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = with_json("POST", "/comments/episodes/1", &token, json!({}));
    let (status, _) = send(&app, missing).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn update_replaces_text_only(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let request = with_json("POST", "/comments/episodes/2", &token, comment("first"));
    let (_, created) = send(&app, request).await;
    let uri = format!("/comments/{}", created["id"]);

    let (status, body) = send(&app, with_json("PUT", &uri, &token, comment("second"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"], "second");
    assert_eq!(body["episode_id"], 2);
    assert_eq!(body["username"], "rick");

    let (status, body) = send(&app, with_json("PUT", "/comments/404", &token, comment("x"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Comment id 404 not found.");

    let (status, _) = send(&app, with_json("PUT", &uri, &token, comment(""))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn deleting_twice_succeeds_both_times(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let request = with_json("POST", "/comments/episodes/1", &token, comment("bye"));
    let (_, created) = send(&app, request).await;
    let uri = format!("/comments/{}", created["id"]);

    let (first, _) = send(&app, delete(&uri, &token)).await;
    let (second, _) = send(&app, delete(&uri, &token)).await;
    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&uri, &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn listings_filter_by_scope_and_username(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, state, rick) = app_with_user(pool, "rick").await;
    let (_, _, morty) = app_with_user(state.db_pool.clone(), "morty").await;

    for (token, uri) in [
        (&rick, "/comments/episodes/1"),
        (&rick, "/comments/episodes/1/2"),
        (&morty, "/comments/episodes/1/2"),
        (&morty, "/comments/characters/2"),
    ] {
        let (status, _) = send(&app, with_json("POST", uri, token, comment("text"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, page) = send(&app, get("/comments", &rick)).await;
    assert_eq!(page["total"], 4);

    let (_, page) = send(&app, get("/comments?username=morty", &rick)).await;
    assert_eq!(page["total"], 2);

    let (_, page) = send(&app, get("/comments/episodes/1", &rick)).await;
    assert_eq!(page["total"], 3);

    let (_, page) = send(&app, get("/comments/episodes/1?username=rick", &rick)).await;
    assert_eq!(page["total"], 2);

    let (_, page) = send(&app, get("/comments/characters/2", &rick)).await;
    assert_eq!(page["total"], 3);

    let (_, page) = send(&app, get("/comments/episodes/1/2?size=1", &rick)).await;
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrator = "support::MIGRATIONS")]
async fn scoped_listings_check_scope_first(pool: PgPool) {
    seed_pilot(&pool).await;
    let (app, _, token) = app_with_user(pool, "rick").await;

    let (status, body) = send(&app, get("/comments/episodes/8", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Episode id 8 not found.");

    let (status, _) = send(&app, get("/comments/characters/8", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, get("/comments/episodes/2/1", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Character id 1 is not in episode id 2.");
}
