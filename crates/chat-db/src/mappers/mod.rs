//! Entity to model mappers
//!
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `From<&Entity> for Model`: Prepare entity data for insertion

mod message;
mod user;
