//! Classification of entities and synthesis of the REST surface derived from them.

pub mod category;
pub mod endpoint;
pub mod entity;

pub use category::Category;
pub use endpoint::{group_by_category, synthesize, RestEndpoint, RestSurface};
pub use entity::Entity;
