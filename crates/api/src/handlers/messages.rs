//! Handlers for the `/messages` resource (buyer enquiries about puppies and
//! the owner's replies).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kennel_core::error::CoreError;
use kennel_core::messages::{
    ensure_puppy_available, ensure_receiver, ReplyInput, SendMessageInput, DEFAULT_PAGE_SIZE,
};
use kennel_core::ownership::ensure_owner;
use kennel_core::pagination::{PageRequest, Paginated};
use kennel_core::types::DbId;
use kennel_db::models::message::{CreateMessage, Message};
use kennel_db::repositories::{MessageRepo, PuppyRepo};
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::middleware::rbac::{RequireAuth, RequireOwner};
use crate::query::{InboxParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Message";

/// Response for `GET /messages/unread/count`.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// POST /api/messages
///
/// Send an enquiry about a puppy. The puppy's owner is the receiver.
pub async fn send(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(input): JsonBody<SendMessageInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let puppy = PuppyRepo::find_by_id(&state.pool, input.puppy_id)
        .await?
        .ok_or(AppError::not_found("Puppy", input.puppy_id))?;
    ensure_puppy_available(puppy.is_available)?;

    let message = MessageRepo::create(
        &state.pool,
        &CreateMessage {
            sender_id: user.user_id,
            receiver_id: puppy.owner_id,
            puppy_id: Some(puppy.id),
            content: input.content,
        },
    )
    .await?;

    tracing::info!(
        id = message.id,
        puppy_id = puppy.id,
        sender_id = user.user_id,
        receiver_id = puppy.owner_id,
        "Message sent"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/messages/puppy/{puppy_id}
pub async fn for_puppy(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(puppy_id): PathParam<DbId>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    let puppy = PuppyRepo::find_by_id(&state.pool, puppy_id)
        .await?
        .ok_or(AppError::not_found("Puppy", puppy_id))?;
    ensure_owner("puppy", puppy.owner_id, user.user_id)?;

    let messages = MessageRepo::list_for_puppy(&state.pool, puppy_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/messages/owner/all
///
/// The owner's inbox, newest first. `unread=true` limits it to unread
/// messages.
pub async fn owner_inbox(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    QueryParams(params): QueryParams<InboxParams>,
) -> AppResult<Json<DataResponse<Paginated<Message>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_PAGE_SIZE);
    let items = MessageRepo::list_received(
        &state.pool,
        user.user_id,
        params.unread,
        page.limit,
        page.offset(),
    )
    .await?;
    let total = MessageRepo::count_received(&state.pool, user.user_id, params.unread).await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, page),
    }))
}

/// GET /api/messages/user/sent
pub async fn user_sent(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<DataResponse<Paginated<Message>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_PAGE_SIZE);
    let items = MessageRepo::list_sent(&state.pool, user.user_id, page.limit, page.offset()).await?;
    let total = MessageRepo::count_sent(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, page),
    }))
}

/// POST /api/messages/reply/{message_id}
///
/// Answer a received message. The original is marked read in the same
/// transaction.
pub async fn reply(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    PathParam(message_id): PathParam<DbId>,
    JsonBody(input): JsonBody<ReplyInput>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    let original = MessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, message_id))?;
    ensure_receiver(original.receiver_id, user.user_id)?;

    let input = input.normalized();
    input.validate().map_err(CoreError::from)?;

    let message = MessageRepo::create_reply(&state.pool, &original, &input.content).await?;

    tracing::info!(
        id = message.id,
        original_id = original.id,
        sender_id = user.user_id,
        "Message reply sent"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// PUT /api/messages/{message_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    PathParam(message_id): PathParam<DbId>,
) -> AppResult<Json<DataResponse<Message>>> {
    let message = MessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, message_id))?;
    ensure_receiver(message.receiver_id, user.user_id)?;

    if !message.is_read {
        MessageRepo::mark_read(&state.pool, message_id).await?;
        tracing::debug!(id = message_id, user_id = user.user_id, "Message marked read");
    }

    let message = MessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or(AppError::not_found(ENTITY, message_id))?;
    Ok(Json(DataResponse { data: message }))
}

/// GET /api/messages/unread/count
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<UnreadCount>> {
    let count = MessageRepo::unread_count(&state.pool, user.user_id).await?;
    Ok(Json(UnreadCount { count }))
}
