pub mod auth;
pub mod dogs;
pub mod health;
pub mod messages;
pub mod news;
pub mod puppies;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current account (auth)
///
/// /puppies                           list (public), create (owner)
/// /puppies/owner/my                  caller's listings (owner)
/// /puppies/{id}                      get (public), update, delete (owner)
///
/// /news                              list published (public), create (owner)
/// /news/owner/my                     caller's posts (owner)
/// /news/{id}                         get (public), update, delete (owner)
///
/// /dogs                              list (public), create (owner)
/// /dogs/{id}                         get (public), update, delete (owner)
///
/// /messages                          send (auth)
/// /messages/puppy/{puppy_id}         messages about a puppy (owner)
/// /messages/owner/all                inbox (owner)
/// /messages/user/sent                sent messages (auth)
/// /messages/reply/{message_id}       reply (receiver)
/// /messages/{message_id}/read        mark read (receiver)
/// /messages/unread/count             unread count (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/puppies", puppies::router())
        .nest("/news", news::router())
        .nest("/dogs", dogs::router())
        .nest("/messages", messages::router())
}
