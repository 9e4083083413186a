//! Store operations behind the HTTP handlers.

pub mod crud;
pub mod relations;
pub use crud::CrudService;
pub use relations::attach_books;
