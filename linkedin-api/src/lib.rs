//! Unofficial LinkedIn Voyager API client library.
//!
//! Logs in with a member's credentials (or reuses cached session cookies)
//! and exposes profile, company, search, messaging and invitation
//! endpoints of the private API the LinkedIn web app talks to.
//!
//! # Authentication
//!
//! [`LinkedinClient::new`] first looks for cached cookies under
//! `~/.cache/linkedin-api/<username>.json`. If they are present and the
//! `JSESSIONID` cookie has not expired, no login request is made. Otherwise
//! the client fetches seed cookies from `/uas/authenticate`, posts the
//! credentials and persists the resulting jar.
//!
//! ```no_run
//! use linkedin_api::{ClientConfig, LinkedinClient};
//!
//! let client = LinkedinClient::new("me@example.com", "hunter2", ClientConfig::default())?;
//! let me = client.current_profile()?;
//! println!("{} {}", me.first_name, me.last_name);
//! # Ok::<(), linkedin_api::LinkedinError>(())
//! ```
//!
//! # API endpoint mapping
//!
//! | Method                                          | Voyager endpoint                                 | Description              |
//! |-------------------------------------------------|--------------------------------------------------|--------------------------|
//! | [`LinkedinClient::current_profile`]             | `/me`                                            | Logged-in member         |
//! | [`LinkedinClient::profile`]                     | `/identity/profiles/{id}/profileView`            | Full profile             |
//! | [`LinkedinClient::profile_contact_info`]        | `/identity/profiles/{id}/profileContactInfo`     | Email, phones, sites     |
//! | [`LinkedinClient::profile_skills`]              | `/identity/profiles/{id}/skills`                 | Skills                   |
//! | [`LinkedinClient::current_profile_views`]       | `/identity/wvmpCards`                            | Profile view count       |
//! | [`LinkedinClient::company`]                     | `/organization/companies`                        | Company page             |
//! | [`LinkedinClient::school`]                      | `/organization/companies`                        | School page              |
//! | [`LinkedinClient::company_updates`]             | `/feed/updates`                                  | Company posts            |
//! | [`LinkedinClient::profile_updates`]             | `/feed/updates`                                  | Member posts             |
//! | [`LinkedinClient::search`]                      | `/search/blended`                                | Raw paged search         |
//! | [`LinkedinClient::search_people`]               | `/search/blended`                                | Faceted people search    |
//! | [`LinkedinClient::typeahead`]                   | `/typeahead/hitsV2`                              | Facet id lookup          |
//! | [`LinkedinClient::conversations`]               | `/messaging/conversations`                       | Inbox                    |
//! | [`LinkedinClient::conversation`]                | `/messaging/conversations/{id}/events`           | Messages of a thread     |
//! | [`LinkedinClient::send_message`]                | `/messaging/conversations?action=create`         | Send a message           |
//! | [`LinkedinClient::mark_conversation_as_seen`]   | `/messaging/conversations/{id}`                  | Mark read                |
//! | [`LinkedinClient::invitations`]                 | `/relationships/invitationViews`                 | Received invitations     |
//! | [`LinkedinClient::reply_invitation`]            | `/relationships/invitations/{id}`                | Accept / ignore          |
//! | [`LinkedinClient::add_connection`]              | `/growth/normInvitations`                        | Invite to connect        |
//! | [`LinkedinClient::remove_connection`]           | `/identity/profiles/{id}/profileActions`         | Disconnect               |
//! | [`LinkedinClient::withdraw_invitation`]         | `/relationships/invitations?action=closeInvitations` | Withdraw sent invite |
//!
//! # Rate limiting
//!
//! LinkedIn suspends accounts that fire requests back to back, so every
//! request first sleeps for a random [`Evade`] delay (2-10 s by default).
//! Use [`Evade::disabled`] only against fixtures.

pub mod auth;
pub mod client;
mod company;
pub mod config;
pub mod cookies;
pub mod error;
pub mod evade;
mod invitation;
mod messaging;
pub mod normalize;
pub mod paginate;
mod profile;
pub mod query;
mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::Session;
pub use client::LinkedinClient;
pub use company::MAX_UPDATE_COUNT;
pub use config::ClientConfig;
pub use error::{LinkedinError, Result};
pub use evade::Evade;
pub use search::{MAX_SEARCH_COUNT, MAX_SEARCH_RETURNED};
