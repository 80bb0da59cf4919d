//! Handlers for the `/news` resource.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::forms::merge_sorted;
use kennel_core::news::{NewsInput, DEFAULT_PAGE_SIZE};
use kennel_core::ownership::ensure_owner_or_orphan;
use kennel_core::pagination::{PageRequest, Paginated};
use kennel_core::types::DbId;
use kennel_core::uploads::UploadKind;
use kennel_db::models::news::{CreateNews, News, UpdateNews};
use kennel_db::repositories::NewsRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOwner;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{read_form, store_files};

const ENTITY: &str = "News";

/// GET /api/news
///
/// Published posts, newest first, paginated.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<DataResponse<Paginated<News>>>> {
    let page = PageRequest::new(params.page, params.limit, DEFAULT_PAGE_SIZE);
    let items = NewsRepo::list_published(&state.pool, page.limit, page.offset()).await?;
    let total = NewsRepo::count_published(&state.pool).await?;
    Ok(Json(DataResponse {
        data: Paginated::new(items, total, page),
    }))
}

/// GET /api/news/{id}
///
/// Drafts are only visible to their author.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<DataResponse<News>>> {
    let news = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|n| {
            n.is_published
                || matches!((n.author_id, &user), (Some(author), Some(u)) if author == u.user_id)
        })
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(DataResponse { data: news }))
}

/// GET /api/news/owner/my
pub async fn my_news(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> AppResult<Json<DataResponse<Vec<News>>>> {
    let news = NewsRepo::list_by_author(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: news }))
}

/// POST /api/news
///
/// Multipart form with `title`, `content`, optional `is_published` and an
/// optional single `image`.
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<News>>)> {
    let form = read_form(multipart, UploadKind::NewsImage).await?;
    let (input, parse_errors) = NewsInput::from_form(&form.fields);
    let new = input.into_new(merge_sorted(parse_errors, form.errors))?;

    let image = store_files(&state.config.upload_dir, UploadKind::NewsImage, form.files)
        .await?
        .into_iter()
        .next();

    let news = NewsRepo::create(
        &state.pool,
        &CreateNews {
            author_id: user.user_id,
            title: new.title,
            content: new.content,
            image,
            is_published: new.is_published,
        },
    )
    .await?;

    tracing::info!(id = news.id, user_id = user.user_id, "News post created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: news })))
}

/// PUT /api/news/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<News>>> {
    let existing = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    ensure_owner_or_orphan("news post", existing.author_id, user.user_id)?;

    let form = read_form(multipart, UploadKind::NewsImage).await?;
    let (input, parse_errors) = NewsInput::from_form(&form.fields);
    let changes = input.into_changes(merge_sorted(parse_errors, form.errors))?;

    let image = store_files(&state.config.upload_dir, UploadKind::NewsImage, form.files)
        .await?
        .into_iter()
        .next();

    let news = NewsRepo::update(
        &state.pool,
        id,
        &UpdateNews {
            title: changes.title,
            content: changes.content,
            image,
            is_published: changes.is_published,
        },
    )
    .await?
    .ok_or(AppError::not_found(ENTITY, id))?;

    tracing::info!(id, user_id = user.user_id, "News post updated");
    Ok(Json(DataResponse { data: news }))
}

/// DELETE /api/news/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    let existing = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    ensure_owner_or_orphan("news post", existing.author_id, user.user_id)?;

    if NewsRepo::delete(&state.pool, id).await? {
        tracing::info!(id, user_id = user.user_id, "News post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}
