//! Bookable resource entities.

pub mod kind;
pub mod model;

pub use kind::ResourceKind;
pub use model::{CreateResource, Resource, UpdateResource};
