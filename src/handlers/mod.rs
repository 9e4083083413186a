//! HTTP handlers for people and books.

pub mod book;
pub mod person;
pub use book::*;
pub use person::*;
