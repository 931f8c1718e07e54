//! Companies resource.

use super::resource::{Creatable, Listable, ResourceKind, Showable, Updatable};

/// The `companies` collection.
///
/// Supports the standard list, show, create and update operations.
#[derive(Debug)]
pub enum Companies {}

impl ResourceKind for Companies {
    const BASE_PATH: &'static str = "companies";
}

impl Listable for Companies {}
impl Showable for Companies {}
impl Creatable for Companies {}
impl Updatable for Companies {}
