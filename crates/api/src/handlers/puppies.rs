//! Handlers for the `/puppies` resource (the sale catalog).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::forms::merge_sorted;
use kennel_core::listing::{PuppyFilter, PuppyInput};
use kennel_core::ownership::ensure_owner;
use kennel_core::types::DbId;
use kennel_core::uploads::UploadKind;
use kennel_db::models::puppy::{CreatePuppy, Puppy, PuppyListFilter, UpdatePuppy};
use kennel_db::repositories::PuppyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, QueryParams};
use crate::middleware::rbac::RequireOwner;
use crate::query::PuppyListParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{read_form, store_files};

const ENTITY: &str = "Puppy";

/// GET /api/puppies
///
/// Public catalog, newest first. Only available puppies unless
/// `available=false` is passed.
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PuppyListParams>,
) -> AppResult<Json<DataResponse<Vec<Puppy>>>> {
    let filter = PuppyFilter::new(
        params.gender.as_deref(),
        params.breed.as_deref(),
        params.min_price,
        params.max_price,
        params.available,
    )?;

    let puppies = PuppyRepo::list(
        &state.pool,
        &PuppyListFilter {
            gender: filter.gender.map(|g| g.as_str().to_string()),
            breed: filter.breed,
            min_price: filter.min_price,
            max_price: filter.max_price,
            is_available: filter.available,
        },
    )
    .await?;
    Ok(Json(DataResponse { data: puppies }))
}

/// GET /api/puppies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<DataResponse<Puppy>>> {
    let puppy = PuppyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(DataResponse { data: puppy }))
}

/// GET /api/puppies/owner/my
///
/// The caller's listings, including those no longer available.
pub async fn my_puppies(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> AppResult<Json<DataResponse<Vec<Puppy>>>> {
    let puppies = PuppyRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: puppies }))
}

/// POST /api/puppies
///
/// Multipart form with the listing fields and 1 to 5 `images`.
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Puppy>>)> {
    let form = read_form(multipart, UploadKind::PuppyImage).await?;
    let (input, parse_errors) = PuppyInput::from_form(&form.fields);
    let new = input.into_new(form.files.len(), merge_sorted(parse_errors, form.errors))?;

    let images = store_files(&state.config.upload_dir, UploadKind::PuppyImage, form.files).await?;

    let puppy = PuppyRepo::create(
        &state.pool,
        &CreatePuppy {
            owner_id: user.user_id,
            name: new.name,
            breed: new.breed,
            age: new.age,
            gender: new.gender.as_str().to_string(),
            color: new.color,
            price: new.price,
            description: new.description,
            images,
            is_available: new.is_available,
            is_featured: new.is_featured,
        },
    )
    .await?;

    tracing::info!(id = puppy.id, user_id = user.user_id, images = puppy.images.0.len(), "Puppy created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: puppy })))
}

/// PUT /api/puppies/{id}
///
/// Partial update. New `images`, when sent, replace the existing set.
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Puppy>>> {
    let existing = PuppyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    ensure_owner("puppy", existing.owner_id, user.user_id)?;

    let form = read_form(multipart, UploadKind::PuppyImage).await?;
    let (input, parse_errors) = PuppyInput::from_form(&form.fields);
    let changes = input.into_changes(form.files.len(), merge_sorted(parse_errors, form.errors))?;

    let images = store_files(&state.config.upload_dir, UploadKind::PuppyImage, form.files).await?;

    let puppy = PuppyRepo::update(
        &state.pool,
        id,
        &UpdatePuppy {
            name: changes.name,
            breed: changes.breed,
            age: changes.age,
            gender: changes.gender,
            color: changes.color,
            price: changes.price,
            description: changes.description,
            images: (!images.is_empty()).then_some(images),
            is_available: changes.is_available,
            is_featured: changes.is_featured,
        },
    )
    .await?
    .ok_or(AppError::not_found(ENTITY, id))?;

    tracing::info!(id, user_id = user.user_id, "Puppy updated");
    Ok(Json(DataResponse { data: puppy }))
}

/// DELETE /api/puppies/{id}
///
/// Messages about the puppy are kept.
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    let existing = PuppyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    ensure_owner("puppy", existing.owner_id, user.user_id)?;

    if PuppyRepo::delete(&state.pool, id).await? {
        tracing::info!(id, user_id = user.user_id, "Puppy deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}
