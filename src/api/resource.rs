//! Generic resource client and the capability traits that enable its
//! operations.
//!
//! A resource kind is a marker type naming a collection (`users`,
//! `companies`, ...). Which standard operations a kind supports is declared
//! by implementing [`Listable`], [`Showable`], [`Creatable`] and
//! [`Updatable`] for it; [`Resource<K>`] only exposes the matching methods.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Response;
use serde::Serialize;
use url::form_urlencoded;

use crate::client::ClientInner;
use crate::Result;

/// A named API collection.
pub trait ResourceKind {
    /// Path segment of the collection, relative to the API endpoint.
    const BASE_PATH: &'static str;
}

/// Kinds supporting `GET base_path?query`.
pub trait Listable: ResourceKind {}

/// Kinds supporting `GET base_path/id`.
pub trait Showable: ResourceKind {}

/// Kinds supporting `POST base_path`.
pub trait Creatable: ResourceKind {}

/// Kinds supporting `PATCH base_path/id`.
pub trait Updatable: ResourceKind {}

/// Ordered list filters, appended to the list path as a form-urlencoded
/// query string.
///
/// # Example
///
/// ```
/// use zai_rs::ListQuery;
///
/// let query = ListQuery::new().limit(10).offset(20).search("smith & co");
/// assert_eq!(query.to_query_string(), "limit=10&offset=20&search=smith+%26+co");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(String, String)>,
}

impl ListQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arbitrary filter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Maximum number of records to return.
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    /// Number of records to skip.
    pub fn offset(self, offset: u32) -> Self {
        self.param("offset", offset)
    }

    /// Free-text search filter.
    pub fn search(self, text: impl ToString) -> Self {
        self.param("search", text)
    }

    /// Returns `true` if no filters have been added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encode the filters, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish()
    }
}

/// Build `base`, `base/id`, and append `?query` when there are filters.
///
/// An empty id counts as no id.
pub(crate) fn build_path(base: &str, id: Option<&str>, query: Option<&ListQuery>) -> String {
    let mut path = match id {
        Some(id) if !id.is_empty() => format!("{}/{}", base, id),
        _ => base.to_string(),
    };

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        path.push('?');
        path.push_str(&query.to_query_string());
    }

    path
}

/// Client for one resource collection.
///
/// Obtained from [`ZaiClient`](crate::ZaiClient), e.g.
/// [`users()`](crate::ZaiClient::users). All operations return the raw HTTP
/// response; inspecting the status is up to the caller.
///
/// # Example
///
/// ```no_run
/// use zai_rs::ListQuery;
///
/// # async fn example(client: zai_rs::ZaiClient) -> zai_rs::Result<()> {
/// let companies = client.companies();
///
/// let page = companies.list(Some(&ListQuery::new().limit(50))).await?;
/// let created = companies
///     .create(&serde_json::json!({ "name": "Acme", "user_id": "42" }))
///     .await?;
/// println!("{} / {}", page.status(), created.status());
/// # Ok(())
/// # }
/// ```
pub struct Resource<K> {
    pub(crate) inner: Arc<ClientInner>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Resource<K> {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self {
            inner,
            _kind: PhantomData,
        }
    }

    /// Path of the collection, or of one record when `id` is given.
    pub fn path(&self, id: Option<&str>, query: Option<&ListQuery>) -> String {
        build_path(K::BASE_PATH, id, query)
    }

    /// Path of a nested collection or action under one record.
    pub(crate) fn sub_path(&self, id: &str, segment: &str) -> String {
        format!("{}/{}", self.path(Some(id), None), segment)
    }
}

impl<K: Listable> Resource<K> {
    /// List records, optionally filtered.
    pub async fn list(&self, query: Option<&ListQuery>) -> Result<Response> {
        self.inner.get(&self.path(None, query)).await
    }
}

impl<K: Showable> Resource<K> {
    /// Get one record.
    pub async fn show(&self, id: &str) -> Result<Response> {
        self.inner.get(&self.path(Some(id), None)).await
    }
}

impl<K: Creatable> Resource<K> {
    /// Create a record.
    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<Response> {
        self.inner.post(&self.path(None, None), body).await
    }
}

impl<K: Updatable> Resource<K> {
    /// Update one record.
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Response> {
        self.inner.patch(&self.path(Some(id), None), body).await
    }
}

impl<K> Clone for Resource<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> fmt::Debug for Resource<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("base_path", &K::BASE_PATH)
            .finish()
    }
}
