//! Search APIs.
//!
//! Endpoint: `GET /search/blended` (normalized)
//!
//! Query parameters:
//! - `count` — page size (the server serves at most 49)
//! - `start` — pagination offset (0-based)
//! - `filters` — Rest.li list of facets, see [`PeopleSearch`]
//! - `keywords`, `origin`, `q=all`, `queryContext`
//!
//! Response JSON:
//! ```json
//! {
//!   "data": {
//!     "metadata": { "totalResultCount": 2178 },
//!     "elements": [{                       // result clusters
//!       "elements": [{                     // hits
//!         "targetUrn": "urn:li:fs_miniProfile:ACoAAB",
//!         "headline": { "text": "Engineer at Example" },
//!         "subline": { "text": "Berlin" },
//!         "secondaryTitle": { "text": "2nd" },
//!         "snippetText": { "text": "..." },
//!         "navigationUrl": "https://www.linkedin.com/in/ada"
//!       }]
//!     }]
//!   },
//!   "included": [{
//!     "entityUrn": "urn:li:fs_miniProfile:ACoAAB",
//!     "publicIdentifier": "ada", "firstName": "Ada", "lastName": "L",
//!     "picture": { "rootUrl": "...", "artifacts": [...] }
//!   }]
//! }
//! ```
//!
//! Hits only reference members by URN; names and pictures live in the
//! `included` side table and are joined in by `targetUrn == entityUrn`.

use crate::client::{LinkedinClient, NORMALIZED_JSON};
use crate::error::Result;
use crate::normalize::{
    Normalize, array, id_from_urn, node, normalize_all, number, opt_text, text, vector_image_url,
};
use crate::paginate::{Page, Paginator};
use crate::query::{NetworkDepth, PeopleSearch, QueryString, query_context};
use crate::types::{PeopleSearchOutcome, PeopleSearchResult, TypeaheadHit, TypeaheadKind};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Largest page `/search/blended` serves.
pub const MAX_SEARCH_COUNT: usize = 49;
/// The server never returns more results than this for one query.
pub const MAX_SEARCH_RETURNED: usize = 1000;

impl LinkedinClient {
    /// Blended search returning raw hits.
    ///
    /// `params` override the defaults (`filters=List()`,
    /// `origin=GLOBAL_SEARCH_HEADER`, ...); values are percent-encoded.
    /// `limit = None` collects up to [`MAX_SEARCH_RETURNED`] hits.
    pub fn search(&self, params: &[(&str, &str)], limit: Option<usize>) -> Result<Vec<Value>> {
        let mut base = QueryString::new()
            .raw("count", MAX_SEARCH_COUNT.to_string())
            .raw("filters", "List()")
            .raw("origin", "GLOBAL_SEARCH_HEADER")
            .raw("q", "all")
            .raw("queryContext", query_context(true))
            .raw("start", "0");
        for (key, value) in params {
            base = base.set(key, value);
        }

        let limit = limit.unwrap_or(MAX_SEARCH_RETURNED);
        let paginator = Paginator::new(Some(limit), MAX_SEARCH_COUNT, self.config().max_repeated_requests);
        paginator.run(|start, count| {
            let query = base
                .clone()
                .set("count", count.to_string())
                .set("start", start.to_string());
            let data = self.fetch_json(&format!("/search/blended?{query}"), Some(NORMALIZED_JSON))?;
            Ok(Page::full(search_hits(&data)))
        })
    }

    /// People search.
    ///
    /// Pages through `/search/blended` until `limit` results are joined
    /// (default and maximum [`MAX_SEARCH_RETURNED`]). Hits without a
    /// matching `included` profile are dropped.
    ///
    /// ```no_run
    /// # use linkedin_api::{ClientConfig, LinkedinClient};
    /// use linkedin_api::query::{NetworkDepth, PeopleSearch};
    ///
    /// # let client = LinkedinClient::new("me@example.com", "pw", ClientConfig::default()).unwrap();
    /// let search = PeopleSearch {
    ///     keywords: Some("site reliability".into()),
    ///     network_depths: vec![NetworkDepth::Second],
    ///     ..PeopleSearch::default()
    /// };
    /// let outcome = client.search_people(&search, Some(20)).unwrap();
    /// println!("{} matches", outcome.total);
    /// ```
    pub fn search_people(
        &self,
        search: &PeopleSearch,
        limit: Option<usize>,
    ) -> Result<PeopleSearchOutcome> {
        let limit = limit.unwrap_or(MAX_SEARCH_RETURNED).min(MAX_SEARCH_RETURNED);
        let paginator = Paginator::new(Some(limit), MAX_SEARCH_COUNT, self.config().max_repeated_requests)
            .starting_at(search.start);

        let mut total = None;
        let results = paginator.run(|start, count| {
            let query = search.page_query(start, count);
            let data = self.fetch_json(&format!("/search/blended?{query}"), Some(NORMALIZED_JSON))?;
            if total.is_none() {
                total = Some(number(&data, "/data/metadata/totalResultCount"));
            }
            let hits = search_hits(&data);
            let items = join_people(&hits, array(&data, "/included"), search.include_private_profiles);
            debug!(hits = hits.len(), joined = items.len(), start, "people search page");
            Ok(Page {
                raw_len: hits.len(),
                items,
            })
        })?;

        Ok(PeopleSearchOutcome {
            total: total.unwrap_or(0).min(MAX_SEARCH_RETURNED as u64),
            results,
        })
    }

    /// 1st-degree connections of the member with URN id `urn_id`.
    pub fn profile_connections(&self, urn_id: &str) -> Result<Vec<PeopleSearchResult>> {
        let search = PeopleSearch {
            connection_of: Some(urn_id.to_owned()),
            network_depths: vec![NetworkDepth::First],
            ..PeopleSearch::default()
        };
        Ok(self.search_people(&search, None)?.results)
    }

    /// The logged-in member's own connections, skipping the first `start`.
    pub fn current_profile_connections(
        &self,
        start: usize,
        limit: Option<usize>,
    ) -> Result<Vec<PeopleSearchResult>> {
        let search = PeopleSearch {
            start,
            ..first_degree()
        };
        Ok(self.search_people(&search, limit)?.results)
    }

    /// Number of 1st-degree connections of the logged-in member.
    ///
    /// Unlike search totals this is not capped at [`MAX_SEARCH_RETURNED`].
    pub fn connection_count(&self) -> Result<u64> {
        let query = first_degree().page_query(0, 1);
        let data = self.fetch_json(&format!("/search/blended?{query}"), Some(NORMALIZED_JSON))?;
        Ok(number(&data, "/data/metadata/totalResultCount"))
    }

    /// Autocomplete entity names into URN ids usable as search facets.
    ///
    /// Endpoint: `GET /typeahead/hitsV2?keywords=..&origin=OTHER&q=type&type=COMPANY`
    pub fn typeahead(&self, keywords: &str, kind: TypeaheadKind) -> Result<Vec<TypeaheadHit>> {
        let query = QueryString::new()
            .param("keywords", keywords)
            .raw("origin", "OTHER")
            .raw("q", "type")
            .raw("type", kind.as_str());
        let data = self.fetch_json(&format!("/typeahead/hitsV2?{query}"), Some(NORMALIZED_JSON))?;
        Ok(normalize_all(&data, "/data/elements"))
    }
}

fn first_degree() -> PeopleSearch {
    PeopleSearch {
        network_depths: vec![NetworkDepth::First],
        ..PeopleSearch::default()
    }
}

/// All hits of all result clusters, in order.
fn search_hits(data: &Value) -> Vec<Value> {
    array(data, "/data/elements")
        .iter()
        .flat_map(|cluster| array(cluster, "/elements").iter().cloned())
        .collect()
}

/// Pair each hit with the `included` record sharing its URN.
fn join_people(hits: &[Value], included: &[Value], include_private: bool) -> Vec<PeopleSearchResult> {
    let by_urn: HashMap<&str, &Value> = included
        .iter()
        .filter(|inc| include_private || inc.get("publicIdentifier").is_some())
        .filter_map(|inc| Some((inc.get("entityUrn")?.as_str()?, inc)))
        .collect();

    hits.iter()
        .filter_map(|hit| {
            let urn = hit.get("targetUrn")?.as_str()?;
            let profile = by_urn.get(urn)?;
            Some(people_result(hit, profile))
        })
        .collect()
}

fn people_result(hit: &Value, profile: &Value) -> PeopleSearchResult {
    PeopleSearchResult {
        urn_id: id_from_urn(&text(hit, "/targetUrn")).to_owned(),
        public_id: opt_text(hit, "/publicIdentifier")
            .unwrap_or_else(|| text(profile, "/publicIdentifier")),
        first_name: text(profile, "/firstName"),
        last_name: text(profile, "/lastName"),
        headline: text(hit, "/headline/text"),
        snippet: text(hit, "/snippetText/text"),
        location: text(hit, "/subline/text"),
        network_depth: text(hit, "/secondaryTitle/text"),
        display_picture_url: vector_image_url(node(profile, "/picture"), 0).unwrap_or_default(),
        navigation_url: text(hit, "/navigationUrl"),
    }
}

impl Normalize for TypeaheadHit {
    fn normalize(doc: &Value) -> Self {
        Self {
            text: text(doc, "/text/text"),
            urn_id: id_from_urn(&text(doc, "/targetUrn")).to_owned(),
            kind: text(doc, "/type"),
        }
    }
}
