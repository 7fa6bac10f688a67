//! Domain entities.

pub mod link;
pub mod visit;

pub use link::{Link, LinkMetadata, NewLink};
pub use visit::VisitDimensions;
