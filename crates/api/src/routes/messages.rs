//! Route definitions for the `/messages` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// POST /                        -> send
/// GET  /puppy/{puppy_id}        -> for_puppy
/// GET  /owner/all               -> owner_inbox
/// GET  /user/sent               -> user_sent
/// POST /reply/{message_id}      -> reply
/// PUT  /{message_id}/read       -> mark_read
/// GET  /unread/count            -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(messages::send))
        .route("/puppy/{puppy_id}", get(messages::for_puppy))
        .route("/owner/all", get(messages::owner_inbox))
        .route("/user/sent", get(messages::user_sent))
        .route("/reply/{message_id}", post(messages::reply))
        .route("/{message_id}/read", put(messages::mark_read))
        .route("/unread/count", get(messages::unread_count))
}
