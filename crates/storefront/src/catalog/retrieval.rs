//! Catalog endpoints and the strategies used to reach them.

use url::Url;

use super::CatalogError;
use crate::storage::keys;

/// A remote catalog collection and the storage key its snapshot lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    /// Every product.
    Products,
    /// Distinct category names.
    Categories,
    /// Products in one category.
    Category(&'a str),
}

impl Resource<'_> {
    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Products => "products".to_string(),
            Self::Categories => "products/categories".to_string(),
            Self::Category(name) => format!("products/category/{}", urlencoding::encode(name)),
        }
    }

    /// Storage key for this resource's cached snapshot.
    #[must_use]
    pub fn cache_key(&self) -> String {
        match self {
            Self::Products => keys::CACHED_PRODUCTS.to_string(),
            Self::Categories => keys::CACHED_CATEGORIES.to_string(),
            Self::Category(name) => keys::category(name),
        }
    }

    /// Absolute URL of this resource under `base`.
    ///
    /// URL parsing resolves `.` and `..` segments (percent-encoded or not),
    /// so such category names would address a different endpoint. They are
    /// rejected, as is the empty name.
    ///
    /// # Errors
    ///
    /// Returns an error if the category name cannot be a path segment or the
    /// joined URL is invalid.
    pub fn url(&self, base: &Url) -> Result<Url, CatalogError> {
        if let Self::Category(name) = self
            && matches!(*name, "" | "." | "..")
        {
            return Err(CatalogError::InvalidCategory((*name).to_string()));
        }

        Ok(base.join(&self.path())?)
    }
}

/// One way of retrieving a resource URL.
///
/// Methods are tried in list order and the first usable response wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalMethod {
    /// Request the API URL as-is.
    Direct,
    /// Request through a relay that takes the percent-encoded target URL
    /// appended to `prefix` (e.g. `https://relay.example/raw?url=`).
    Relay { prefix: String },
}

impl RetrievalMethod {
    /// Build the URL actually requested for `target`.
    #[must_use]
    pub fn request_url(&self, target: &Url) -> String {
        match self {
            Self::Direct => target.to_string(),
            Self::Relay { prefix } => {
                format!("{prefix}{}", urlencoding::encode(target.as_str()))
            }
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Relay { .. } => "relay",
        }
    }
}

/// Direct first, then one relay per prefix in the given order.
#[must_use]
pub fn default_methods<I, P>(relay_prefixes: I) -> Vec<RetrievalMethod>
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    std::iter::once(RetrievalMethod::Direct)
        .chain(relay_prefixes.into_iter().map(|prefix| RetrievalMethod::Relay {
            prefix: prefix.into(),
        }))
        .collect()
}
