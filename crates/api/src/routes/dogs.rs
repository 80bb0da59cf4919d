//! Route definitions for the `/dogs` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use kennel_core::uploads::UploadKind;

use crate::handlers::dogs;
use crate::state::AppState;

/// Routes mounted at `/dogs`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (multipart)
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (multipart)
/// DELETE /{id}  -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dogs::list).post(dogs::create))
        .route(
            "/{id}",
            get(dogs::get_by_id).put(dogs::update).delete(dogs::delete),
        )
        .layer(DefaultBodyLimit::max(UploadKind::DogPhoto.body_limit()))
}
