//! Handlers for the `/dogs` resource (the nursery's own dogs).
//!
//! The roster belongs to the nursery as a whole, so any owner-role account
//! may manage any entry.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use kennel_core::forms::merge_sorted;
use kennel_core::dogs::DogInput;
use kennel_core::types::DbId;
use kennel_core::uploads::UploadKind;
use kennel_db::models::dog::{CreateDog, Dog, UpdateDog};
use kennel_db::repositories::DogRepo;

use crate::error::{AppError, AppResult};
use crate::extract::PathParam;
use crate::middleware::rbac::RequireOwner;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::{read_form, store_files};

const ENTITY: &str = "Dog";

/// GET /api/dogs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Dog>>>> {
    let dogs = DogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: dogs }))
}

/// GET /api/dogs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<DataResponse<Dog>>> {
    let dog = DogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ENTITY, id))?;
    Ok(Json(DataResponse { data: dog }))
}

/// POST /api/dogs
pub async fn create(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Dog>>)> {
    let form = read_form(multipart, UploadKind::DogPhoto).await?;
    let (input, parse_errors) = DogInput::from_form(&form.fields);
    let new = input.into_new(merge_sorted(parse_errors, form.errors))?;

    let photo = store_files(&state.config.upload_dir, UploadKind::DogPhoto, form.files)
        .await?
        .into_iter()
        .next();

    let dog = DogRepo::create(
        &state.pool,
        &CreateDog {
            name: new.name,
            photo,
            achievements: new.achievements,
            description: new.description,
        },
    )
    .await?;

    tracing::info!(id = dog.id, user_id = user.user_id, "Dog created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: dog })))
}

/// PUT /api/dogs/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Dog>>> {
    if DogRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found(ENTITY, id));
    }

    let form = read_form(multipart, UploadKind::DogPhoto).await?;
    let (input, parse_errors) = DogInput::from_form(&form.fields);
    let changes = input.into_changes(merge_sorted(parse_errors, form.errors))?;

    let photo = store_files(&state.config.upload_dir, UploadKind::DogPhoto, form.files)
        .await?
        .into_iter()
        .next();

    let dog = DogRepo::update(
        &state.pool,
        id,
        &UpdateDog {
            name: changes.name,
            photo,
            achievements: changes.achievements,
            description: changes.description,
        },
    )
    .await?
    .ok_or(AppError::not_found(ENTITY, id))?;

    tracing::info!(id, user_id = user.user_id, "Dog updated");
    Ok(Json(DataResponse { data: dog }))
}

/// DELETE /api/dogs/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    PathParam(id): PathParam<DbId>,
) -> AppResult<StatusCode> {
    if DogRepo::delete(&state.pool, id).await? {
        tracing::info!(id, user_id = user.user_id, "Dog deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(ENTITY, id))
    }
}
