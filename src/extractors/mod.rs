//! Request extractors whose rejections use the shared error body.

pub mod id;
pub mod json;
pub use id::EntityId;
pub use json::JsonBody;
