//! End-to-end scenarios for the posts API.
//!
//! Each case builds a fresh in-process app over its own exclusively-owned
//! in-memory store, seeds it with randomized fixtures, drives one HTTP
//! interaction black-box, then re-reads the persisted state directly
//! through the storage port to cross-check what the API reported.
//! Per-case stores make state leaks between cases impossible, even when
//! an assertion fails mid-scenario.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use api_server::handlers;
use api_server::state::AppState;
use quill_core::domain::BlogPost;
use quill_core::ports::PostStore;
use quill_infra::MemoryPostStore;
use quill_testkit::assertions::{assert_matches_stored, assert_post_shape, normalized_created};
use quill_testkit::{FixtureGenerator, seed};

const SEED_COUNT: usize = 5;

/// Fresh app over a fresh store, seeded with `SEED_COUNT` fixtures.
/// Each case passes a distinct seed so failures replay deterministically.
async fn spawn_seeded(
    seed_value: u64,
) -> (
    impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>,
    Arc<dyn PostStore>,
    Vec<BlogPost>,
) {
    let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
    let mut generator = FixtureGenerator::with_seed(seed_value);

    let seeded = seed(store.as_ref(), &mut generator, SEED_COUNT)
        .await
        .expect("seeding must succeed before a scenario can run");

    let app = spawn_app(store.clone()).await;
    (app, store, seeded)
}

async fn spawn_app(
    store: Arc<dyn PostStore>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(AppState::with_store(store)))
            .configure(handlers::configure_routes),
    )
    .await
}

// GET endpoint

#[actix_rt::test]
async fn test_list_returns_all_existing_posts() {
    let (app, store, _) = spawn_seeded(101).await;

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().expect("list response must be a JSON array");

    let stored = store.count().await.unwrap();
    assert_eq!(posts.len() as u64, stored);
    assert_eq!(posts.len(), SEED_COUNT);
}

#[actix_rt::test]
async fn test_list_posts_match_storage_field_for_field() {
    let (app, store, _) = spawn_seeded(102).await;

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().expect("list response must be a JSON array");
    assert!(!posts.is_empty(), "seeded list must not be empty");
    for post in posts {
        assert_post_shape(post);
    }

    // Cross-check one element against a direct storage lookup.
    let sample = &posts[0];
    let id: Uuid = sample["id"]
        .as_str()
        .expect("id must be a string")
        .parse()
        .expect("id must be a uuid");

    let stored = store
        .find_by_id(id)
        .await
        .unwrap()
        .expect("listed post must exist in storage");
    assert_matches_stored(sample, &stored);
}

#[actix_rt::test]
async fn test_list_on_empty_store_returns_empty_array() {
    let store: Arc<dyn PostStore> = Arc::new(MemoryPostStore::new());
    let app = spawn_app(store).await;

    let req = test::TestRequest::get().uri("/posts").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(0));
}

// POST endpoint

#[actix_rt::test]
async fn test_create_adds_a_new_post() {
    let (app, store, _) = spawn_seeded(103).await;

    let mut generator = FixtureGenerator::with_seed(104);
    let fixture = generator.post();
    let payload = json!({
        "author": fixture.author.display(),
        "content": fixture.content,
        "title": fixture.title,
        "created": fixture.created,
    });

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_post_shape(&body);
    assert!(!body["author"].is_null());
    assert_eq!(body["author"].as_str(), Some(fixture.author.display().as_str()));
    assert_eq!(body["content"].as_str(), Some(fixture.content.as_str()));
    assert_eq!(body["title"].as_str(), Some(fixture.title.as_str()));
    assert_eq!(normalized_created(&body), fixture.created);

    // The record the API reported must be the one storage now holds.
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    let stored = store
        .find_by_id(id)
        .await
        .unwrap()
        .expect("created post must be persisted");
    assert_matches_stored(&body, &stored);
    assert_eq!(store.count().await.unwrap(), SEED_COUNT as u64 + 1);
}

#[actix_rt::test]
async fn test_create_with_literal_payload() {
    let (app, _, _) = spawn_seeded(105).await;

    let payload = json!({
        "author": "Jane Doe",
        "content": "hello world",
        "title": "My Post",
        "created": "2023-06-15T08:30:00Z",
    });

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["content"].as_str(), Some("hello world"));
    assert_eq!(body["title"].as_str(), Some("My Post"));
}

#[actix_rt::test]
async fn test_create_rejects_empty_required_field() {
    let (app, store, _) = spawn_seeded(106).await;

    let payload = json!({"author": "Jane Doe", "content": "", "title": "My Post"});

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Nothing may have been persisted.
    assert_eq!(store.count().await.unwrap(), SEED_COUNT as u64);
}

#[actix_rt::test]
async fn test_create_rejects_missing_required_field() {
    let (app, _, _) = spawn_seeded(107).await;

    let payload = json!({"author": "Jane Doe", "content": "hello world"});

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// PUT endpoint

#[actix_rt::test]
async fn test_update_changes_only_submitted_fields() {
    let (app, store, _) = spawn_seeded(108).await;

    let target = store
        .find_one()
        .await
        .unwrap()
        .expect("seeded store must yield a record");

    let payload = json!({
        "id": target.id,
        "author": "Stellinator",
        "content": "This is test data",
    });

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", target.id))
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let body = test::read_body(res).await;
    assert!(body.is_empty(), "204 response must carry no body");

    let updated = store
        .find_by_id(target.id)
        .await
        .unwrap()
        .expect("updated post must still exist");
    assert_eq!(updated.author.display(), "Stellinator");
    assert_eq!(updated.content, "This is test data");
    // Everything not submitted is untouched.
    assert_eq!(updated.id, target.id);
    assert_eq!(updated.title, target.title);
    assert_eq!(updated.created, target.created);
}

#[actix_rt::test]
async fn test_update_unknown_id_is_not_found() {
    let (app, _, _) = spawn_seeded(109).await;

    let missing = Uuid::new_v4();
    let payload = json!({"id": missing, "author": "Nobody"});

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{missing}"))
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_update_rejects_mismatched_body_id() {
    let (app, store, _) = spawn_seeded(110).await;

    let target = store.find_one().await.unwrap().unwrap();
    let payload = json!({"id": Uuid::new_v4(), "content": "should not land"});

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{}", target.id))
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let unchanged = store.find_by_id(target.id).await.unwrap().unwrap();
    assert_eq!(unchanged.content, target.content);
}

// DELETE endpoint

#[actix_rt::test]
async fn test_delete_removes_post_by_id() {
    let (app, store, _) = spawn_seeded(111).await;

    let target = store
        .find_one()
        .await
        .unwrap()
        .expect("seeded store must yield a record");

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", target.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let body = test::read_body(res).await;
    assert!(body.is_empty(), "204 response must carry no body");

    // Deletion is terminal: the direct lookup now misses.
    let gone = store.find_by_id(target.id).await.unwrap();
    assert!(gone.is_none());
    assert_eq!(store.count().await.unwrap(), SEED_COUNT as u64 - 1);
}

#[actix_rt::test]
async fn test_delete_unknown_id_is_not_found() {
    let (app, store, _) = spawn_seeded(112).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{}", Uuid::new_v4()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(store.count().await.unwrap(), SEED_COUNT as u64);
}

// Teardown

#[actix_rt::test]
async fn test_drop_all_leaves_no_state_behind() {
    let (_, store, seeded) = spawn_seeded(113).await;

    store.drop_all().await.unwrap();

    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(store.find_one().await.unwrap(), None);
    for post in seeded {
        assert!(store.find_by_id(post.id).await.unwrap().is_none());
    }
}
