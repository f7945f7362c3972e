//! Profile APIs.
//!
//! # Endpoints
//!
//! ## `current_profile` — `GET /me` (normalized)
//!
//! ```json
//! {
//!   "data": { "premiumSubscriber": false, "*miniProfile": "urn:li:fs_miniProfile:ACoAAB" },
//!   "included": [{
//!     "entityUrn": "urn:li:fs_miniProfile:ACoAAB",
//!     "firstName": "Ada", "lastName": "Lovelace",
//!     "publicIdentifier": "ada-lovelace", "occupation": "Engineer",
//!     "picture": { "rootUrl": "https://media.licdn.com/...", "artifacts": [...] }
//!   }]
//! }
//! ```
//!
//! ## `profile` — `GET /identity/profiles/{id}/profileView`
//!
//! `{id}` is either the public id (`ada-lovelace`) or the URN id
//! (`ACoAAB...`). The response carries `profile`, `positionView`,
//! `educationView` and more. Unknown or private profiles answer
//! `{"status": 403, ...}` or similar in the body.
//!
//! ## `profile_contact_info` — `GET /identity/profiles/{id}/profileContactInfo`
//!
//! ## `profile_skills` — `GET /identity/profiles/{id}/skills?count=100&start=0`
//!
//! ## `current_profile_views` — `GET /identity/wvmpCards`

use crate::client::{LinkedinClient, NORMALIZED_JSON, body_status};
use crate::error::Result;
use crate::normalize::{
    Normalize, array, flag, id_from_urn, node, normalize, normalize_all, number, opt_i64,
    opt_text, text, vector_image_url,
};
use crate::types::{
    BirthDate, ContactInfo, CurrentProfile, Education, Experience, InstantMessenger, PhoneNumber,
    Profile, Skill, TimePeriod, Website, YearMonth,
};
use serde_json::Value;

const VECTOR_IMAGE: &str = "com.linkedin.common.VectorImage";
const STANDARD_WEBSITE: &str = "com.linkedin.voyager.identity.profile.StandardWebsite";
const CUSTOM_WEBSITE: &str = "com.linkedin.voyager.identity.profile.CustomWebsite";

impl LinkedinClient {
    /// Get the logged-in member.
    pub fn current_profile(&self) -> Result<CurrentProfile> {
        let data = self.fetch_json("/me", Some(NORMALIZED_JSON))?;
        Ok(normalize(&data))
    }

    /// Raw `/me` payload (plain Rest.li JSON).
    pub fn user_profile(&self) -> Result<Value> {
        self.fetch_json("/me", None)
    }

    /// Get a profile with experience, education and skills.
    ///
    /// `id` is a public id or a URN id. Returns `None` when the API reports
    /// a failure in the body (private, deleted or unknown profile).
    pub fn profile(&self, id: &str) -> Result<Option<Profile>> {
        let data = self.fetch_json(
            &format!("/identity/profiles/{}/profileView", urlencoding::encode(id)),
            None,
        )?;
        if body_status(&data).is_some() {
            return Ok(None);
        }
        let mut profile: Profile = normalize(&data);
        profile.skills = self.profile_skills(id)?;
        Ok(Some(profile))
    }

    /// Get e-mail, websites, phone numbers and other contact details.
    pub fn profile_contact_info(&self, id: &str) -> Result<ContactInfo> {
        let data = self.fetch_json(
            &format!("/identity/profiles/{}/profileContactInfo", urlencoding::encode(id)),
            None,
        )?;
        Ok(normalize(&data))
    }

    /// Get the skills listed on a profile.
    pub fn profile_skills(&self, id: &str) -> Result<Vec<Skill>> {
        let data = self.fetch_json(
            &format!("/identity/profiles/{}/skills?count=100&start=0", urlencoding::encode(id)),
            None,
        )?;
        Ok(normalize_all(&data, "/elements"))
    }

    /// Number of profile views shown on the "who viewed your profile" card.
    pub fn current_profile_views(&self) -> Result<u64> {
        let data = self.fetch_json("/identity/wvmpCards", None)?;
        Ok(number(
            &data,
            "/elements/0/value/com.linkedin.voyager.identity.me.wvmpOverview.WvmpViewersCard\
             /insightCards/0/value/com.linkedin.voyager.identity.me.wvmpOverview.WvmpSummaryInsightCard\
             /numViews",
        ))
    }
}

impl Normalize for CurrentProfile {
    fn normalize(doc: &Value) -> Self {
        let me = node(doc, "/included/0");
        Self {
            first_name: text(me, "/firstName"),
            last_name: text(me, "/lastName"),
            public_id: text(me, "/publicIdentifier"),
            occupation: text(me, "/occupation"),
            message_id: id_from_urn(&text(me, "/entityUrn")).to_owned(),
            is_premium: flag(doc, "/data/premiumSubscriber"),
            avatar_url: vector_image_url(node(me, "/picture"), 2),
        }
    }
}

impl Normalize for Profile {
    fn normalize(doc: &Value) -> Self {
        let p = node(doc, "/profile");
        let mini = node(p, "/miniProfile");
        let picture = node(mini, &format!("/picture/{VECTOR_IMAGE}"));
        Self {
            profile_id: id_from_urn(&text(mini, "/entityUrn")).to_owned(),
            public_id: text(mini, "/publicIdentifier"),
            first_name: text(p, "/firstName"),
            last_name: text(p, "/lastName"),
            headline: text(p, "/headline"),
            summary: text(p, "/summary"),
            location_name: text(p, "/locationName"),
            industry_name: text(p, "/industryName"),
            display_picture_url: vector_image_url(picture, 0),
            experience: normalize_all(doc, "/positionView/elements"),
            education: normalize_all(doc, "/educationView/elements"),
            skills: Vec::new(),
        }
    }
}

impl Normalize for Experience {
    fn normalize(doc: &Value) -> Self {
        let logo = node(doc, &format!("/company/miniCompany/logo/{VECTOR_IMAGE}"));
        Self {
            title: text(doc, "/title"),
            company_name: text(doc, "/companyName"),
            company_urn: opt_text(doc, "/companyUrn"),
            location_name: text(doc, "/locationName"),
            description: text(doc, "/description"),
            company_logo_url: logo_url(logo),
            time_period: time_period(node(doc, "/timePeriod")),
        }
    }
}

impl Normalize for Education {
    fn normalize(doc: &Value) -> Self {
        let logo = node(doc, &format!("/school/logo/{VECTOR_IMAGE}"));
        Self {
            school_name: text(doc, "/schoolName"),
            degree_name: text(doc, "/degreeName"),
            field_of_study: text(doc, "/fieldOfStudy"),
            school_logo_url: logo_url(logo),
            time_period: time_period(node(doc, "/timePeriod")),
        }
    }
}

impl Normalize for Skill {
    fn normalize(doc: &Value) -> Self {
        Self {
            name: text(doc, "/name"),
        }
    }
}

impl Normalize for ContactInfo {
    fn normalize(doc: &Value) -> Self {
        let websites = array(doc, "/websites")
            .iter()
            .map(|w| Website {
                url: text(w, "/url"),
                label: opt_text(w, &format!("/type/{STANDARD_WEBSITE}/category"))
                    .or_else(|| opt_text(w, &format!("/type/{CUSTOM_WEBSITE}/label")))
                    .unwrap_or_default(),
            })
            .collect();
        let birthdate = doc.get("birthDateOn").filter(|v| v.is_object()).map(|b| BirthDate {
            month: number(b, "/month"),
            day: number(b, "/day"),
        });
        Self {
            email_address: opt_text(doc, "/emailAddress"),
            websites,
            twitter: array(doc, "/twitterHandles")
                .iter()
                .map(|t| text(t, "/name"))
                .collect(),
            birthdate,
            ims: array(doc, "/ims")
                .iter()
                .map(|im| InstantMessenger {
                    provider: text(im, "/provider"),
                    id: text(im, "/id"),
                })
                .collect(),
            phone_numbers: array(doc, "/phoneNumbers")
                .iter()
                .map(|p| PhoneNumber {
                    number: text(p, "/number"),
                    kind: text(p, "/type"),
                })
                .collect(),
        }
    }
}

/// Logo URL: a full artifact URL when available, else the bare root.
pub(crate) fn logo_url(image: &Value) -> Option<String> {
    vector_image_url(image, 0).or_else(|| opt_text(image, "/rootUrl"))
}

fn time_period(v: &Value) -> TimePeriod {
    let date = |pointer: &str| {
        let d = node(v, pointer);
        opt_i64(d, "/year").map(|year| YearMonth {
            year,
            month: opt_i64(d, "/month"),
        })
    };
    TimePeriod {
        start: date("/startDate"),
        end: date("/endDate"),
    }
}
