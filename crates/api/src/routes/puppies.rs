//! Route definitions for the `/puppies` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use kennel_core::uploads::UploadKind;

use crate::handlers::puppies;
use crate::state::AppState;

/// Routes mounted at `/puppies`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create (multipart)
/// GET    /owner/my  -> my_puppies
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (multipart)
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(puppies::list).post(puppies::create))
        .route("/owner/my", get(puppies::my_puppies))
        .route(
            "/{id}",
            get(puppies::get_by_id)
                .put(puppies::update)
                .delete(puppies::delete),
        )
        .layer(DefaultBodyLimit::max(UploadKind::PuppyImage.body_limit()))
}
