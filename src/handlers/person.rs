//! Person handlers: list, get, create, delete. Every returned person carries its live books.

use crate::error::AppError;
use crate::extractors::{EntityId, JsonBody};
use crate::model::{NewPerson, Person};
use crate::response::{created, many, ok};
use crate::service::{attach_books, CrudService};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

/// GET /people
pub async fn list_people(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut people: Vec<Person> = CrudService::list(&state.db).await?;
    attach_books(&state.db, &mut people).await?;
    Ok(many(people))
}

/// GET /person/:id
pub async fn get_person(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let mut person = CrudService::read::<Person>(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("person {}", id)))?;
    attach_books(&state.db, std::slice::from_mut(&mut person)).await?;
    Ok(ok(person))
}

/// POST /create/person
pub async fn create_person(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewPerson>,
) -> Result<impl IntoResponse, AppError> {
    let person = CrudService::create(&state.db, body).await?;
    Ok(created(person))
}

/// DELETE /delete/person/:id
pub async fn delete_person(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<impl IntoResponse, AppError> {
    let mut person = CrudService::delete::<Person>(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("person {}", id)))?;
    attach_books(&state.db, std::slice::from_mut(&mut person)).await?;
    Ok(ok(person))
}
