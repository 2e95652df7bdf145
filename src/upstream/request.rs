//! Per-request description of an upstream call.

use url::Url;

/// What to ask the upstream for: a sub-API and, optionally, a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardRequest {
    query_type: String,
    credential: Option<String>,
}

impl ForwardRequest {
    /// Build a request. An empty credential is treated as absent.
    pub fn new(query_type: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            query_type: query_type.into(),
            credential: credential.filter(|key| !key.is_empty()),
        }
    }

    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// `<origin>/?api=<type>[&key=<credential>]`, with both values
    /// query-encoded.
    pub fn target_url(&self, origin: &str) -> Result<Url, url::ParseError> {
        build_query_url(origin, &self.query_type, self.credential())
    }
}

/// Append the `api` (and optional `key`) parameters to `origin`.
pub fn build_query_url(
    origin: &str,
    query_type: &str,
    key: Option<&str>,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(origin)?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("api", query_type);
        if let Some(key) = key {
            pairs.append_pair("key", key);
        }
    }
    Ok(url)
}
