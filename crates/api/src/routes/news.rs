//! Route definitions for the `/news` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use kennel_core::uploads::UploadKind;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// GET    /          -> list (published, paginated)
/// POST   /          -> create (multipart)
/// GET    /owner/my  -> my_news
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update (multipart)
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list).post(news::create))
        .route("/owner/my", get(news::my_news))
        .route(
            "/{id}",
            get(news::get_by_id).put(news::update).delete(news::delete),
        )
        .layer(DefaultBodyLimit::max(UploadKind::NewsImage.body_limit()))
}
