//! Resource modules for Zai endpoints.
//!
//! Each resource maps logical operations to paths under the API endpoint
//! and sends them through the client's authenticated request pipeline.

mod companies;
mod resource;
mod users;

pub use companies::Companies;
pub use resource::{
    Creatable, ListQuery, Listable, Resource, ResourceKind, Showable, Updatable,
};
pub use users::Users;
