//! Person and book routes. Paths are fixed per entity.

use crate::handlers::{
    create_book, create_person, delete_book, delete_person, get_book, get_person, list_books, list_people,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/people", get(list_people))
        .route("/person/:id", get(get_person))
        .route("/delete/person/:id", delete(delete_person))
        .route("/create/person", post(create_person))
        .route("/books", get(list_books))
        .route("/book/:id", get(get_book))
        .route("/delete/book/:id", delete(delete_book))
        .route("/create/book", post(create_book))
        .with_state(state)
}
