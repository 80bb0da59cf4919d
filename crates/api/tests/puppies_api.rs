//! HTTP-level integration tests for the puppy catalog.
//!
//! Covers multipart create/update with image uploads, ownership checks, the
//! public catalog filters and delete semantics.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_puppy, delete_auth, get, get_auth, puppy_form, send_form, MultipartForm,
};
use sqlx::SqlitePool;

fn error_fields(body: &serde_json::Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["field"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_puppy_as_owner(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    let puppy = create_puppy(&test, &token, "  Bella  ").await;

    assert_eq!(puppy["name"], "Bella");
    assert_eq!(puppy["breed"], "Maltipoo");
    assert_eq!(puppy["age"], 3);
    assert_eq!(puppy["gender"], "female");
    assert_eq!(puppy["price"], 85000.0);
    assert_eq!(puppy["is_available"], true);
    assert_eq!(puppy["is_featured"], false);
    assert_eq!(puppy["owner_id"], owner.id);
    assert_eq!(puppy["owner_phone"], "+79160000001");
    assert_eq!(puppy["images"].as_array().unwrap().len(), 1);
    assert_eq!(test.stored_uploads(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_without_images_fails_on_images_field(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    let response = send_form(
        test.app(),
        Method::POST,
        "/api/puppies",
        Some(&token),
        puppy_form("Bella"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(error_fields(&json), vec!["images"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_reports_field_and_image_errors_together(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    let form = MultipartForm::new()
        .text("name", "Bo")
        .text("age", "30")
        .text("gender", "other")
        .text("price", "-1");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let fields = error_fields(&body_json(response).await);
    for field in ["age", "breed", "color", "description", "gender", "images", "name", "price"] {
        assert!(fields.iter().any(|f| f == field), "missing error for {field}: {fields:?}");
    }
    assert_eq!(test.stored_uploads(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn image_order_is_preserved(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    let form = puppy_form("Bella")
        .file("images", "a.png", "image/png", b"first-image")
        .file("images", "b.jpg", "image/jpeg", b"second-image");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let fetched = body_json(get(test.app(), &format!("/api/puppies/{id}")).await).await;
    let images: Vec<&str> = fetched["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(images.len(), 2);
    assert!(images[0].ends_with(".png"));
    assert!(images[1].ends_with(".jpg"));

    let first = std::fs::read(test.uploads.path().join(images[0].trim_start_matches("/uploads/")))
        .unwrap();
    assert_eq!(first, b"first-image");

    // Stored files are served back under their public path.
    let served = get(test.app(), images[1]).await;
    assert_eq!(served.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_image_and_too_many_files_are_rejected(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    let form = puppy_form("Bella").file("images", "notes.txt", "text/plain", b"hello");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_fields(&body_json(response).await).contains(&"images".to_string()));

    let mut form = puppy_form("Bella");
    for i in 0..6 {
        form = form.jpeg("images", &format!("{i}.jpg"));
    }
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(test.stored_uploads(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_owner_role(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_user, token) = common::user_with_token(&test, &pool, "+79160000002").await;

    let form = puppy_form("Bella").jpeg("images", "a.jpg");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let form = puppy_form("Bella").jpeg("images", "a.jpg");
    let response = send_form(test.app(), Method::POST, "/api/puppies", None, form).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_hides_unavailable_unless_asked(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    create_puppy(&test, &token, "Available one").await;
    let form = puppy_form("Sold one")
        .text("is_available", "false")
        .jpeg("images", "a.jpg");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(test.app(), "/api/puppies").await).await;
    let names: Vec<_> = json["data"].as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, vec!["Available one"]);

    let json = body_json(get(test.app(), "/api/puppies?available=false").await).await;
    let names: Vec<_> = json["data"].as_array().unwrap().iter().map(|p| p["name"].clone()).collect();
    assert_eq!(names, vec!["Sold one"]);

    let json = body_json(get_auth(test.app(), "/api/puppies/owner/my", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_filters_by_price_and_gender(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;

    create_puppy(&test, &token, "Female pup").await;
    let form = MultipartForm::new()
        .text("name", "Male pup")
        .text("breed", "Maltipoo")
        .text("age", "2")
        .text("gender", "male")
        .text("color", "Black")
        .text("price", "40000")
        .text("description", "Calm boy, loves long walks.")
        .jpeg("images", "m.jpg");
    let response = send_form(test.app(), Method::POST, "/api/puppies", Some(&token), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get(test.app(), "/api/puppies?gender=male").await).await;
    assert_eq!(json["data"][0]["name"], "Male pup");
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(get(test.app(), "/api/puppies?minPrice=50000").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Female pup");

    let response = get(test.app(), "/api/puppies?gender=unknown").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_catalog_filter_is_a_validation_error(pool: SqlitePool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/api/puppies?minPrice=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_puppy_id_is_a_validation_error(pool: SqlitePool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/api/puppies/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["errors"][0]["field"], "id");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_puppy_is_404(pool: SqlitePool) {
    let test = common::build_test_app(pool);
    let response = get(test.app(), "/api/puppies/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn partial_update_keeps_other_fields_and_images(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;
    let puppy = create_puppy(&test, &token, "Bella").await;
    let id = puppy["id"].as_i64().unwrap();

    let form = MultipartForm::new().text("price", "90000");
    let response = send_form(
        test.app(),
        Method::PUT,
        &format!("/api/puppies/{id}"),
        Some(&token),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["price"], 90000.0);
    assert_eq!(updated["name"], "Bella");
    assert_eq!(updated["images"], puppy["images"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn new_images_replace_the_set(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;
    let puppy = create_puppy(&test, &token, "Bella").await;
    let id = puppy["id"].as_i64().unwrap();

    let form = MultipartForm::new()
        .file("images", "x.webp", "image/webp", b"x")
        .file("images", "y.webp", "image/webp", b"y");
    let response = send_form(
        test.app(),
        Method::PUT,
        &format!("/api/puppies/{id}"),
        Some(&token),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let images = body_json(response).await["data"]["images"].clone();
    assert_eq!(images.as_array().unwrap().len(), 2);
    assert_ne!(images, puppy["images"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_by_another_owner_is_forbidden_and_changes_nothing(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;
    let (_other, other_token) = common::owner_with_token(&test, &pool, "+79160000002").await;
    let puppy = create_puppy(&test, &token, "Bella").await;
    let id = puppy["id"].as_i64().unwrap();
    let uploads_before = test.stored_uploads();

    let form = MultipartForm::new()
        .text("name", "Stolen")
        .jpeg("images", "new.jpg");
    let response = send_form(
        test.app(),
        Method::PUT,
        &format!("/api/puppies/{id}"),
        Some(&other_token),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(test.stored_uploads(), uploads_before);

    let fetched = body_json(get(test.app(), &format!("/api/puppies/{id}")).await).await;
    assert_eq!(fetched["data"]["name"], "Bella");
    assert_eq!(fetched["data"]["updated_at"], puppy["updated_at"]);

    let response = delete_auth(test.app(), &format!("/api/puppies/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        get(test.app(), &format!("/api/puppies/{id}")).await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_update_is_rejected(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;
    let id = create_puppy(&test, &token, "Bella").await["id"].as_i64().unwrap();

    let form = MultipartForm::new().text("age", "25");
    let response = send_form(
        test.app(),
        Method::PUT,
        &format!("/api/puppies/{id}"),
        Some(&token),
        form,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&body_json(response).await), vec!["age"]);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_twice_yields_404_the_second_time(pool: SqlitePool) {
    let test = common::build_test_app(pool.clone());
    let (_owner, token) = common::owner_with_token(&test, &pool, "+79160000001").await;
    let id = create_puppy(&test, &token, "Bella").await["id"].as_i64().unwrap();

    let response = delete_auth(test.app(), &format!("/api/puppies/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(test.app(), &format!("/api/puppies/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(test.app(), "/api/puppies/4242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
