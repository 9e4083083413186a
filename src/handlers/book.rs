//! Book handlers: list, get, create, delete.

use crate::error::AppError;
use crate::extractors::{EntityId, JsonBody};
use crate::model::{Book, NewBook, Person};
use crate::response::{created, many, ok};
use crate::service::CrudService;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books: Vec<Book> = CrudService::list(&state.db).await?;
    Ok(many(books))
}

/// GET /book/:id
pub async fn get_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let book = CrudService::read::<Book>(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
    Ok(ok(book))
}

/// POST /create/book. A `personId` must name a live person.
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewBook>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(owner) = body.person_id {
        if CrudService::read::<Person>(&state.db, owner).await?.is_none() {
            return Err(AppError::Validation(format!("person {} does not exist", owner)));
        }
    }
    let book = CrudService::create(&state.db, body).await?;
    Ok(created(book))
}

/// DELETE /delete/book/:id
pub async fn delete_book(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let book = CrudService::delete::<Book>(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {}", id)))?;
    Ok(ok(book))
}
