//! Parameter resolution shared by every resource handler.
//!
//! Check order is fixed so the reported error is deterministic: the
//! credential first, then the field that identifies the resource.

use crate::config::CredentialMode;
use crate::proxy::error::ProxyError;

/// Category attached to every search; callers cannot change it.
pub const SEARCH_CATEGORY: &str = "hotels";

pub const DEFAULT_LANGUAGE: Language = Language::En;

/// Languages the upstream is asked to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Pl,
    Ru,
}

impl Language {
    pub const SUPPORTED: [Language; 3] = [Language::En, Language::Pl, Language::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pl => "pl",
            Language::Ru => "ru",
        }
    }

    /// Exact, case-sensitive match against the supported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|lang| lang.code() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Clamp a caller-supplied language to the supported set.
pub fn normalize_language(raw: Option<&str>) -> Language {
    raw.and_then(Language::from_code).unwrap_or(DEFAULT_LANGUAGE)
}

/// The upstream resources this proxy exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Search,
    Photos,
    Details,
    Reviews,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Search => "search",
            ResourceKind::Photos => "photos",
            ResourceKind::Details => "details",
            ResourceKind::Reviews => "reviews",
        }
    }
}

/// Query parameters as the caller sent them.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    pub search_query: Option<String>,
    pub location_id: Option<String>,
    pub language: Option<String>,
    pub key: Option<String>,
}

impl RawParams {
    /// Collect from query pairs in arrival order. Unknown names are ignored.
    ///
    /// The first occurrence of a name wins, except `language`: a repeated
    /// language is ambiguous and falls back to the default like any other
    /// unrecognized value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut raw = Self::default();
        let mut language_seen = false;
        for (name, value) in pairs {
            match name.as_str() {
                "searchQuery" => {
                    raw.search_query.get_or_insert(value);
                }
                "locationId" => {
                    raw.location_id.get_or_insert(value);
                }
                "key" => {
                    raw.key.get_or_insert(value);
                }
                "language" => {
                    raw.language = if language_seen { None } else { Some(value) };
                    language_seen = true;
                }
                _ => {}
            }
        }
        raw
    }
}

/// A validated request, ready to be turned into an upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub key: String,
    pub resource: Resource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Search { search_query: String, language: Language },
    Photos { location_id: String },
    Details { location_id: String, language: Language },
    Reviews { location_id: String, language: Language },
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Search { .. } => ResourceKind::Search,
            Resource::Photos { .. } => ResourceKind::Photos,
            Resource::Details { .. } => ResourceKind::Details,
            Resource::Reviews { .. } => ResourceKind::Reviews,
        }
    }
}

/// Absent and empty both count as missing.
pub fn require(field: &'static str, value: Option<String>) -> Result<String, ProxyError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ProxyError::MissingParameter(field))
}

/// Location ids become one upstream path segment; dot segments would be
/// dropped by URL normalization and change the upstream path.
fn require_location(value: Option<String>) -> Result<String, ProxyError> {
    let location_id = require("locationId", value)?;
    if location_id == "." || location_id == ".." {
        return Err(ProxyError::InvalidParameter("locationId"));
    }
    Ok(location_id)
}

/// Validate and normalize `raw` for `kind`.
///
/// `server_key` is only consulted in [`CredentialMode::Server`].
pub fn resolve(
    kind: ResourceKind,
    raw: RawParams,
    mode: CredentialMode,
    server_key: &str,
) -> Result<ResolvedRequest, ProxyError> {
    let key = match mode {
        CredentialMode::Server => require("key", Some(server_key.to_string()))?,
        CredentialMode::Caller => require("key", raw.key)?,
    };

    let language = normalize_language(raw.language.as_deref());
    let resource = match kind {
        ResourceKind::Search => Resource::Search {
            search_query: require("searchQuery", raw.search_query)?,
            language,
        },
        ResourceKind::Photos => Resource::Photos {
            location_id: require_location(raw.location_id)?,
        },
        ResourceKind::Details => Resource::Details {
            location_id: require_location(raw.location_id)?,
            language,
        },
        ResourceKind::Reviews => Resource::Reviews {
            location_id: require_location(raw.location_id)?,
            language,
        },
    };

    Ok(ResolvedRequest { key, resource })
}
