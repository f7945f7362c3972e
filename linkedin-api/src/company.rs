//! Company, school and feed APIs.
//!
//! # Endpoints
//!
//! ## `company` / `school` — `GET /organization/companies`
//!
//! Request: `?decorationId=...WebFullCompanyMain-12&q=universalName&universalName=<id>`
//!
//! Response:
//! ```json
//! {
//!   "elements": [{
//!     "entityUrn": "urn:li:fs_normalized_company:1441",
//!     "name": "Google", "universalName": "google",
//!     "description": "...", "companyPageUrl": "https://goo.gl",
//!     "staffCount": 250000,
//!     "companyIndustries": [{ "localizedName": "Internet" }],
//!     "headquarter": { "city": "Mountain View", "geographicArea": "CA", "country": "US" },
//!     "logo": { "image": { "com.linkedin.common.VectorImage": { "rootUrl": "...", "artifacts": [...] } } }
//!   }]
//! }
//! ```
//!
//! Schools are organizations too and share the endpoint and record shape.
//!
//! ## `company_updates` / `profile_updates` — `GET /feed/updates`
//!
//! Paged with `count` (max 100) and `start`; posts come back raw in
//! `elements`.

use crate::client::{LinkedinClient, body_status};
use crate::error::Result;
use crate::normalize::{Normalize, array, id_from_urn, node, normalize, number, opt_text, text};
use crate::paginate::{Page, Paginator};
use crate::profile::logo_url;
use crate::query::QueryString;
use crate::types::Company;
use serde_json::Value;

/// Largest page `/feed/updates` serves.
pub const MAX_UPDATE_COUNT: usize = 100;

const COMPANY_DECORATION: &str = "com.linkedin.voyager.deco.organization.web.WebFullCompanyMain-12";

impl LinkedinClient {
    /// Get a company page by its universal name (e.g. `google`).
    ///
    /// Returns `None` when the API reports a failure or no match.
    pub fn company(&self, universal_name: &str) -> Result<Option<Company>> {
        self.organization(universal_name)
    }

    /// Get a school page by its universal name (e.g. `uq`).
    pub fn school(&self, universal_name: &str) -> Result<Option<Company>> {
        self.organization(universal_name)
    }

    fn organization(&self, universal_name: &str) -> Result<Option<Company>> {
        let query = QueryString::new()
            .param("decorationId", COMPANY_DECORATION)
            .raw("q", "universalName")
            .param("universalName", universal_name);
        let data = self.fetch_json(&format!("/organization/companies?{query}"), None)?;
        if body_status(&data).is_some() {
            return Ok(None);
        }
        Ok(array(&data, "/elements").first().map(normalize))
    }

    /// Posts published by a company, newest first.
    ///
    /// `max_results = None` pages until the feed runs out.
    pub fn company_updates(&self, universal_name: &str, max_results: Option<usize>) -> Result<Vec<Value>> {
        let base = QueryString::new()
            .param("companyUniversalName", universal_name)
            .raw("q", "companyFeedByUniversalName")
            .raw("moduleKey", "member-share");
        self.feed_updates(&base, max_results)
    }

    /// Posts published by a member (public id or URN id), newest first.
    pub fn profile_updates(&self, id: &str, max_results: Option<usize>) -> Result<Vec<Value>> {
        let base = QueryString::new()
            .param("profileId", id)
            .raw("q", "memberShareFeed")
            .raw("moduleKey", "member-share");
        self.feed_updates(&base, max_results)
    }

    fn feed_updates(&self, base: &QueryString, max_results: Option<usize>) -> Result<Vec<Value>> {
        let paginator = Paginator::new(max_results, MAX_UPDATE_COUNT, self.config().max_repeated_requests);
        paginator.run(|start, count| {
            let query = base
                .clone()
                .raw("count", count.to_string())
                .raw("start", start.to_string());
            let data = self.fetch_json(&format!("/feed/updates?{query}"), None)?;
            Ok(Page::full(array(&data, "/elements").to_vec()))
        })
    }
}

impl Normalize for Company {
    fn normalize(doc: &Value) -> Self {
        let hq = node(doc, "/headquarter");
        let headquarters = ["/city", "/geographicArea", "/country"]
            .iter()
            .filter_map(|p| opt_text(hq, p))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            urn_id: id_from_urn(&text(doc, "/entityUrn")).to_owned(),
            name: text(doc, "/name"),
            universal_name: text(doc, "/universalName"),
            description: text(doc, "/description"),
            website: opt_text(doc, "/companyPageUrl"),
            industries: array(doc, "/companyIndustries")
                .iter()
                .map(|i| text(i, "/localizedName"))
                .collect(),
            staff_count: number(doc, "/staffCount"),
            headquarters: (!headquarters.is_empty()).then_some(headquarters),
            logo_url: logo_url(node(doc, "/logo/image/com.linkedin.common.VectorImage")),
        }
    }
}
