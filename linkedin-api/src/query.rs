//! Query-string construction.
//!
//! Voyager's search endpoints take Rest.li "List" expressions such as
//!
//! ```text
//! filters=List(geoRegion-%3Ede%3A0|fr%3A0,network-%3EF,resultType-%3EPEOPLE)
//! ```
//!
//! The structural characters `(`, `)`, `,` and `|` must reach the server
//! verbatim and `->` is sent as `-%3E`, so a generic form encoder cannot
//! be used. [`QueryString`] keeps pre-built expressions raw and
//! percent-encodes everything that comes from the caller.

use std::fmt;

/// Encoded form of the Rest.li `->` operator.
const ARROW: &str = "-%3E";

/// Ordered `key=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, percent-encoding the value.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.pairs
            .push((key.to_owned(), urlencoding::encode(value.as_ref()).into_owned()));
        self
    }

    /// Append a pair whose value is already encoded.
    #[must_use]
    pub fn raw(mut self, key: &str, value: impl Into<String>) -> Self {
        self.pairs.push((key.to_owned(), value.into()));
        self
    }

    /// Replace the value of `key` (encoded), appending if absent.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl AsRef<str>) -> Self {
        let encoded = urlencoding::encode(value.as_ref()).into_owned();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = encoded,
            None => self.pairs.push((key.to_owned(), encoded)),
        }
        self
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

/// Builds a `List(...)` expression entry by entry.
#[derive(Debug, Clone, Default)]
pub struct ListExpr {
    entries: Vec<String>,
}

impl ListExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key->v1|v2|...`; skipped when `values` is empty.
    pub fn any_of<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        if !values.is_empty() {
            let joined = values
                .iter()
                .map(|v| urlencoding::encode(v.as_ref()).into_owned())
                .collect::<Vec<_>>()
                .join("|");
            self.entries.push(format!("{key}{ARROW}{joined}"));
        }
        self
    }

    /// `key->value`; skipped when `value` is `None` or empty.
    pub fn one(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.entries
                .push(format!("{key}{ARROW}{}", urlencoding::encode(v)));
        }
        self
    }

    /// `key->value` with a value that must not be encoded (e.g. `true`).
    pub fn literal(&mut self, key: &str, value: &str) -> &mut Self {
        self.entries.push(format!("{key}{ARROW}{value}"));
        self
    }
}

impl fmt::Display for ListExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "List({})", self.entries.join(","))
    }
}

/// Connection degree relative to the logged-in member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkDepth {
    /// 1st-degree connections.
    First,
    /// 2nd-degree connections.
    Second,
    /// 3rd degree and everyone else.
    Out,
}

impl NetworkDepth {
    pub fn code(self) -> &'static str {
        match self {
            Self::First => "F",
            Self::Second => "S",
            Self::Out => "O",
        }
    }
}

/// Search origin sent when no facet is set.
pub const ORIGIN_PLAIN: &str = "CLUSTER_EXPANSION";
/// Search origin sent once any facet is set.
pub const ORIGIN_FACETED: &str = "FACETED_SEARCH";

/// Facets of a people search. Every field is optional; an all-default value
/// searches everyone.
///
/// ```
/// use linkedin_api::query::{NetworkDepth, PeopleSearch};
///
/// let search = PeopleSearch {
///     keywords: Some("rust engineer".into()),
///     network_depths: vec![NetworkDepth::Second],
///     regions: vec!["de:0".into()],
///     ..PeopleSearch::default()
/// };
/// assert!(search.is_faceted());
/// assert_eq!(
///     search.filters().to_string(),
///     "List(geoRegion-%3Ede%3A0,network-%3ES,resultType-%3EPEOPLE)",
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct PeopleSearch {
    /// Free-text keywords.
    pub keywords: Option<String>,
    /// Only connections of this member (URN id).
    pub connection_of: Option<String>,
    pub network_depths: Vec<NetworkDepth>,
    /// Current employer company ids.
    pub current_companies: Vec<String>,
    /// Past employer company ids.
    pub past_companies: Vec<String>,
    /// Free-text company name.
    pub company: Option<String>,
    /// School ids.
    pub schools: Vec<String>,
    /// Geo region codes, e.g. `de:0`.
    pub regions: Vec<String>,
    /// Industry ids.
    pub industries: Vec<String>,
    /// Profile language codes, e.g. `en`.
    pub profile_languages: Vec<String>,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Keep "LinkedIn Member" results that have no public identifier.
    pub include_private_profiles: bool,
    /// Offset of the first hit to fetch, to resume an earlier search.
    pub start: usize,
}

impl PeopleSearch {
    /// Whether any facet (keywords included) is set.
    pub fn is_faceted(&self) -> bool {
        let present = |o: &Option<String>| o.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.keywords)
            || present(&self.connection_of)
            || present(&self.company)
            || present(&self.title)
            || present(&self.first_name)
            || present(&self.last_name)
            || !self.network_depths.is_empty()
            || !self.current_companies.is_empty()
            || !self.past_companies.is_empty()
            || !self.schools.is_empty()
            || !self.regions.is_empty()
            || !self.industries.is_empty()
            || !self.profile_languages.is_empty()
    }

    pub fn origin(&self) -> &'static str {
        if self.is_faceted() {
            ORIGIN_FACETED
        } else {
            ORIGIN_PLAIN
        }
    }

    /// The composite `filters` expression.
    pub fn filters(&self) -> ListExpr {
        let depths: Vec<&str> = self.network_depths.iter().map(|d| d.code()).collect();
        let mut list = ListExpr::new();
        list.one("connectionOf", self.connection_of.as_deref())
            .any_of("pastCompany", &self.past_companies)
            .any_of("geoRegion", &self.regions)
            .any_of("industry", &self.industries)
            .any_of("network", &depths)
            .any_of("profileLanguage", &self.profile_languages)
            .literal("resultType", "PEOPLE")
            .one("company", self.company.as_deref())
            .one("firstName", self.first_name.as_deref())
            .one("lastName", self.last_name.as_deref())
            .one("title", self.title.as_deref())
            .any_of("currentCompany", &self.current_companies)
            .any_of("school", &self.schools);
        list
    }

    /// Query string for one page starting at `start`.
    pub fn page_query(&self, start: usize, count: usize) -> QueryString {
        let mut q = QueryString::new()
            .raw("count", count.to_string())
            .raw("filters", self.filters().to_string());
        if let Some(keywords) = self.keywords.as_deref().filter(|k| !k.is_empty()) {
            q = q.param("keywords", keywords);
        }
        q.raw("origin", self.origin())
            .raw("q", "all")
            .raw("queryContext", query_context(false))
            .raw("start", start.to_string())
    }
}

/// `queryContext` expression shared by blended searches.
pub fn query_context(with_kcards: bool) -> String {
    let mut ctx = ListExpr::new();
    ctx.literal("spellCorrectionEnabled", "true")
        .literal("relatedSearchesEnabled", "true");
    if with_kcards {
        ctx.literal("kcardTypes", "PROFILE|COMPANY");
    }
    ctx.to_string()
}
