//! Flattened records extracted from Voyager responses.
//!
//! Field names follow Rust conventions (`snake_case`) rather than the
//! original API naming (camelCase). Every field has a default; see
//! [`normalize`](crate::normalize) for how missing data is handled.

use serde::{Deserialize, Serialize};

/// The logged-in member.
///
/// Returned by [`LinkedinClient::current_profile`](crate::LinkedinClient::current_profile).
///
/// API JSON path: `included[0]` of `/me` (normalized), plus
/// `data.premiumSubscriber`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentProfile {
    pub first_name: String,
    pub last_name: String,
    /// Vanity name, as in `linkedin.com/in/<public_id>`.
    pub public_id: String,
    /// Headline.
    pub occupation: String,
    /// Id of the member's `miniProfile` URN, used as a message recipient.
    pub message_id: String,
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Year + optional month, as Voyager dates come.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
}

/// Start/end of a position or school. `end: None` means ongoing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<YearMonth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<YearMonth>,
}

/// One position of a profile's experience section.
///
/// API JSON path: `positionView.elements[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company_name: String,
    /// URN of the company page, when the position links one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_urn: Option<String>,
    pub location_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo_url: Option<String>,
    pub time_period: TimePeriod,
}

/// One entry of a profile's education section.
///
/// API JSON path: `educationView.elements[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school_name: String,
    pub degree_name: String,
    pub field_of_study: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_logo_url: Option<String>,
    pub time_period: TimePeriod,
}

/// A skill listed on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
}

/// A member profile.
///
/// Returned by [`LinkedinClient::profile`](crate::LinkedinClient::profile).
///
/// API JSON path: `profile`, `positionView`, `educationView` of
/// `/identity/profiles/{id}/profileView`; skills come from a second call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Id of the `miniProfile` URN.
    pub profile_id: String,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub summary: String,
    pub location_name: String,
    pub industry_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_picture_url: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

/// A website listed in contact info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
    /// `PERSONAL`, `COMPANY`, `BLOG`, ... or the custom label.
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    /// `MOBILE`, `WORK`, `HOME`.
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantMessenger {
    pub provider: String,
    pub id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub month: u64,
    pub day: u64,
}

/// Contact details of a profile.
///
/// Returned by [`LinkedinClient::profile_contact_info`](crate::LinkedinClient::profile_contact_info).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    pub websites: Vec<Website>,
    /// Twitter handles.
    pub twitter: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<BirthDate>,
    pub ims: Vec<InstantMessenger>,
    pub phone_numbers: Vec<PhoneNumber>,
}

/// A company or school page.
///
/// Returned by [`LinkedinClient::company`](crate::LinkedinClient::company) and
/// [`LinkedinClient::school`](crate::LinkedinClient::school).
///
/// API JSON path: `elements[0]` of `/organization/companies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Id of the `fs_normalized_company` URN.
    pub urn_id: String,
    pub name: String,
    /// Vanity name, as in `linkedin.com/company/<universal_name>`.
    pub universal_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub industries: Vec<String>,
    pub staff_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// A member taking part in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub urn_id: String,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// A message thread.
///
/// API JSON path: `elements[]` of `/messaging/conversations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Id of the conversation URN, accepted by every messaging call.
    pub id: String,
    pub entity_urn: String,
    pub participants: Vec<Participant>,
    pub read: bool,
    pub unread_count: u64,
    /// Epoch milliseconds.
    pub last_activity_at: i64,
}

/// A single message in a conversation.
///
/// API JSON path: `elements[]` of `/messaging/conversations/{id}/events`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub entity_urn: String,
    /// Public id of the sender.
    pub sender_public_id: String,
    pub body: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// A received connection invitation.
///
/// API JSON path: `elements[].invitation` of `/relationships/invitationViews`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub entity_urn: String,
    /// Id of `entity_urn`.
    pub id: String,
    /// Needed to accept or ignore the invitation.
    pub shared_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub from_public_id: String,
    pub from_first_name: String,
    pub from_last_name: String,
    /// Epoch milliseconds.
    pub sent_time: i64,
}

/// How to answer a received invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationAction {
    Accept,
    Ignore,
}

impl InvitationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Ignore => "ignore",
        }
    }
}

/// Where [`send_message`](crate::LinkedinClient::send_message) delivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    /// An existing conversation, by URN id.
    Conversation(String),
    /// Start a new conversation with these profile URN ids.
    Recipients(Vec<String>),
}

/// One people-search hit joined with its profile record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleSearchResult {
    /// Id of the member's `miniProfile` URN.
    pub urn_id: String,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub snippet: String,
    pub location: String,
    /// Connection degree label, e.g. `2nd`.
    pub network_depth: String,
    pub display_picture_url: String,
    pub navigation_url: String,
}

/// Result of a people search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleSearchOutcome {
    /// Matches reported by the server, capped at the 1000 it will serve.
    pub total: u64,
    pub results: Vec<PeopleSearchResult>,
}

/// Entity kind for [`typeahead`](crate::LinkedinClient::typeahead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeaheadKind {
    Company,
    School,
    Region,
    Industry,
    People,
}

impl TypeaheadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "COMPANY",
            Self::School => "SCHOOL",
            Self::Region => "GEO",
            Self::Industry => "INDUSTRY",
            Self::People => "PEOPLE",
        }
    }
}

/// A typeahead suggestion; its `urn_id` feeds search facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeaheadHit {
    pub text: String,
    pub urn_id: String,
    /// Entity type as reported by the server (`COMPANY`, ...).
    pub kind: String,
}
