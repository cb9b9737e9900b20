/// Movie catalogue, favourites and ranking tests

mod common;

use axum::http::StatusCode;
use common::{body_json, TestContext};
use serde_json::json;

#[tokio::test]
async fn test_movie_crud() {
    let ctx = TestContext::new();

    let response = ctx
        .post_json(
            "/api/movies",
            json!({ "title": "Heat", "director": "Michael Mann", "year": 1995, "genre": "Crime" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let heat = body_json(response).await["id"].as_i64().unwrap();

    let response = ctx
        .post_json("/api/movies", json!({ "title": "Alien" }), None)
        .await;
    let alien = body_json(response).await["id"].as_i64().unwrap();
    assert!(alien > heat);

    let body = body_json(ctx.get("/api/movies", None).await).await;
    assert_eq!(
        body,
        json!([
            { "id": alien, "title": "Alien", "director": null, "year": null, "genre": null },
            { "id": heat, "title": "Heat", "director": "Michael Mann", "year": 1995, "genre": "Crime" },
        ])
    );

    let response = ctx.delete(&format!("/api/movies/{}", heat), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let body = body_json(ctx.get("/api/movies", None).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], alien);
}

#[tokio::test]
async fn test_delete_unknown_movie_succeeds() {
    let ctx = TestContext::new();

    let response = ctx.delete("/api/movies/999", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn test_storage_failure_exposes_message() {
    let ctx = TestContext::new();
    ctx.store.set_offline(true);

    let response = ctx
        .post_json("/api/movies", json!({ "title": "Heat" }), None)
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("offline"));

    let response = ctx.get("/api/movies", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_storage_failure_outside_crud_is_generic() {
    let ctx = TestContext::new();
    ctx.store.set_offline(true);

    let response = ctx.get("/api/stats", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "internal_error");
}

#[tokio::test]
async fn test_favorites_per_user() {
    let ctx = TestContext::new();
    ctx.register("alice", "pw1").await;
    ctx.register("bob", "pw2").await;
    let alice = ctx.login("alice", "pw1").await;
    let bob = ctx.login("bob", "pw2").await;

    let response = ctx
        .post_json("/api/movies", json!({ "title": "Heat" }), None)
        .await;
    let heat = body_json(response).await["id"].as_i64().unwrap();

    let response = ctx
        .post_json("/api/my-movies", json!({ "movieId": heat }), Some(&alice))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    // Adding the same favourite again is a no-op.
    let response = ctx
        .post_json("/api/my-movies", json!({ "movieId": heat }), Some(&alice))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(ctx.get("/api/my-movies", Some(&alice)).await).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Heat");

    let body = body_json(ctx.get("/api/my-movies", Some(&bob)).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_favorite_of_unknown_movie_is_ignored() {
    let ctx = TestContext::new();
    ctx.register("alice", "pw1").await;
    let cookie = ctx.login("alice", "pw1").await;

    let response = ctx
        .post_json("/api/my-movies", json!({ "movieId": 42 }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let body = body_json(ctx.get("/api/my-movies", Some(&cookie)).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_deleting_movie_removes_favorite() {
    let ctx = TestContext::new();
    ctx.register("alice", "pw1").await;
    let cookie = ctx.login("alice", "pw1").await;

    let response = ctx
        .post_json("/api/movies", json!({ "title": "Heat" }), None)
        .await;
    let heat = body_json(response).await["id"].as_i64().unwrap();
    ctx.post_json("/api/my-movies", json!({ "movieId": heat }), Some(&cookie))
        .await;

    ctx.delete(&format!("/api/movies/{}", heat), None).await;

    let body = body_json(ctx.get("/api/my-movies", Some(&cookie)).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_stats_are_in_descending_order() {
    let ctx = TestContext::new();
    let users = [("alice", 1), ("bob", 4), ("carol", 2)];

    for (name, requests) in users {
        ctx.register(name, "pw").await;
        let cookie = ctx.login(name, "pw").await;
        for _ in 0..requests {
            ctx.get("/api/movies", Some(&cookie)).await;
        }
    }
    ctx.settle().await;

    let body = body_json(ctx.get("/api/stats", None).await).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let counts: Vec<i64> = rows.iter().map(|row| row["acessos"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![4, 2, 1]);
    assert_eq!(rows[0]["username"], "bob");
    assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
}
