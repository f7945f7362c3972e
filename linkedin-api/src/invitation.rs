//! Connection and invitation APIs.
//!
//! # Endpoints
//!
//! ## `invitations` — `GET /relationships/invitationViews`
//!
//! Request: `?start=0&count=3&includeInsights=true&q=receivedInvitation`
//!
//! Response:
//! ```json
//! {
//!   "elements": [{
//!     "invitation": {
//!       "entityUrn": "urn:li:fs_relInvitation:6543",
//!       "sharedSecret": "AbCd",
//!       "message": "Let's connect",
//!       "sentTime": 1700000000000,
//!       "fromMember": { "publicIdentifier": "ada", "firstName": "Ada", "lastName": "L" }
//!     }
//!   }]
//! }
//! ```
//!
//! ## `add_connection` — `POST /growth/normInvitations`
//!
//! ```json
//! {
//!   "trackingId": "<16 random bytes, base64>",
//!   "invitations": [], "excludeInvitations": [],
//!   "invitee": { "com.linkedin.voyager.growth.invitation.InviteeProfile": { "profileId": "<urn id>" } },
//!   "message": "optional note"
//! }
//! ```
//!
//! ## Sent invitations — `GET /relationships/sentInvitationViewsV2`
//!
//! Normalized envelope; each `included[]` invitation carries `toMemberId`
//! and `entityUrn`, which `withdraw_invitation` takes.

use crate::client::{LinkedinClient, NORMALIZED_JSON};
use crate::error::Result;
use crate::normalize::{Normalize, array, id_from_urn, node, normalize, opt_i64, opt_text, text};
use crate::types::{Invitation, InvitationAction};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use tracing::{info, warn};

const INVITEE_PROFILE: &str = "com.linkedin.voyager.growth.invitation.InviteeProfile";

impl LinkedinClient {
    /// Received invitations, `limit` per page starting at `start`.
    ///
    /// Any non-200 answer yields an empty list.
    pub fn invitations(&self, start: usize, limit: usize) -> Result<Vec<Invitation>> {
        let resp = self.fetch(
            &format!(
                "/relationships/invitationViews?start={start}&count={limit}\
                 &includeInsights=true&q=receivedInvitation"
            ),
            None,
        )?;
        if resp.status != 200 {
            warn!(status = resp.status, "could not list invitations");
            return Ok(Vec::new());
        }
        let data = resp.json()?;
        Ok(array(&data, "/elements")
            .iter()
            .map(|e| normalize(node(e, "/invitation")))
            .collect())
    }

    /// Accept or ignore a received invitation. Returns `true` on `200`.
    pub fn reply_invitation(
        &self,
        entity_urn: &str,
        shared_secret: &str,
        action: InvitationAction,
    ) -> Result<bool> {
        let id = id_from_urn(entity_urn);
        let payload = json!({
            "invitationId": id,
            "invitationSharedSecret": shared_secret,
            "isGenericInvitation": false,
        });
        let resp = self.post(
            &format!(
                "/relationships/invitations/{}?action={}",
                urlencoding::encode(id),
                action.as_str()
            ),
            Some(&payload),
            None,
        )?;
        Ok(resp.status == 200)
    }

    /// Invite a member to connect, optionally with a note.
    ///
    /// Returns `true` on any 2xx answer.
    pub fn add_connection(&self, profile_urn_id: &str, message: Option<&str>) -> Result<bool> {
        let mut payload = json!({
            "trackingId": tracking_id(),
            "invitations": [],
            "excludeInvitations": [],
            "invitee": { INVITEE_PROFILE: { "profileId": profile_urn_id } },
        });
        if let Some(message) = message {
            payload["message"] = json!(message);
        }
        let resp = self.post("/growth/normInvitations", Some(&payload), Some(NORMALIZED_JSON))?;
        info!(profile = profile_urn_id, status = resp.status, "connection invite sent");
        Ok(resp.is_success())
    }

    /// Remove a first-degree connection. Returns `true` on `200`.
    pub fn remove_connection(&self, public_id: &str) -> Result<bool> {
        let resp = self.post(
            &format!(
                "/identity/profiles/{}/profileActions?action=disconnect",
                urlencoding::encode(public_id)
            ),
            None,
            None,
        )?;
        Ok(resp.status == 200)
    }

    /// Pending invitations you sent, as the raw normalized envelope.
    pub fn sent_invitations(&self, start: usize) -> Result<Value> {
        self.fetch_json(
            &format!(
                "/relationships/sentInvitationViewsV2?count=100&invitationType=CONNECTION\
                 &q=invitationType&start={start}"
            ),
            Some(NORMALIZED_JSON),
        )
    }

    /// Entity URN of the pending invitation you sent to `profile_urn`,
    /// searched in the first page of sent invitations.
    pub fn invitation_entity_urn(&self, profile_urn: &str) -> Result<Option<String>> {
        let data = self.sent_invitations(0)?;
        Ok(array(&data, "/included")
            .iter()
            .find(|i| opt_text(i, "/toMemberId").as_deref() == Some(profile_urn))
            .and_then(|i| opt_text(i, "/entityUrn")))
    }

    /// Withdraw an invitation you sent. Returns `true` on `200`.
    pub fn withdraw_invitation(&self, entity_urn: &str) -> Result<bool> {
        let payload = json!({
            "entityUrn": entity_urn,
            "genericInvitation": false,
            "genericInvitationType": "CONNECTION",
            "inviteActionType": "ACTOR_WITHDRAW",
        });
        let resp = self.post(
            "/relationships/invitations?action=closeInvitations",
            Some(&payload),
            None,
        )?;
        Ok(resp.status == 200)
    }
}

/// Fresh base64 tracking id, 16 random bytes like the web client sends.
fn tracking_id() -> String {
    let bytes: [u8; 16] = rand::random();
    STANDARD.encode(bytes)
}

impl Normalize for Invitation {
    fn normalize(doc: &Value) -> Self {
        let from = node(doc, "/fromMember");
        let entity_urn = text(doc, "/entityUrn");
        Self {
            id: id_from_urn(&entity_urn).to_owned(),
            shared_secret: text(doc, "/sharedSecret"),
            message: opt_text(doc, "/message"),
            from_public_id: text(from, "/publicIdentifier"),
            from_first_name: text(from, "/firstName"),
            from_last_name: text(from, "/lastName"),
            sent_time: opt_i64(doc, "/sentTime").unwrap_or_default(),
            entity_urn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, path_of};
    use crate::transport::{HttpResponse, Method};

    fn body_of(req: &crate::transport::HttpRequest) -> Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn invitations_unwrap_elements() {
        let (client, log) = client_with(|_| {
            let body = json!({ "elements": [
                { "invitation": {
                    "entityUrn": "urn:li:fs_relInvitation:6543",
                    "sharedSecret": "AbCd",
                    "sentTime": 42,
                    "fromMember": { "publicIdentifier": "ada", "firstName": "Ada" }
                }},
                { "invitation": { "entityUrn": "urn:li:fs_relInvitation:7", "message": "hi" } }
            ]});
            HttpResponse::new(200, body.to_string())
        });
        let invites = client.invitations(0, 3).unwrap();
        assert_eq!(invites.len(), 2);
        assert_eq!(invites[0].id, "6543");
        assert_eq!(invites[0].shared_secret, "AbCd");
        assert_eq!(invites[0].from_public_id, "ada");
        assert_eq!(invites[0].from_last_name, "");
        assert_eq!(invites[0].message, None);
        assert_eq!(invites[0].sent_time, 42);
        assert_eq!(invites[1].message.as_deref(), Some("hi"));
        assert_eq!(
            path_of(&log.borrow()[0]),
            "/relationships/invitationViews?start=0&count=3&includeInsights=true&q=receivedInvitation"
        );
    }

    #[test]
    fn invitations_empty_on_error_status() {
        let (client, _) = client_with(|_| HttpResponse::new(403, "forbidden"));
        assert!(client.invitations(0, 10).unwrap().is_empty());
    }

    #[test]
    fn reply_posts_id_and_secret() {
        let (client, log) = client_with(|_| HttpResponse::new(200, ""));
        let ok = client
            .reply_invitation("urn:li:fs_relInvitation:6543", "AbCd", InvitationAction::Ignore)
            .unwrap();
        assert!(ok);

        let log = log.borrow();
        assert_eq!(log[0].method, Method::Post);
        assert_eq!(path_of(&log[0]), "/relationships/invitations/6543?action=ignore");
        assert_eq!(
            body_of(&log[0]),
            json!({ "invitationId": "6543", "invitationSharedSecret": "AbCd", "isGenericInvitation": false })
        );
    }

    #[test]
    fn add_connection_builds_payload() {
        let (client, log) = client_with(|_| HttpResponse::new(201, ""));
        assert!(client.add_connection("ACoAA1", Some("Hi \"Ada\"")).unwrap());
        assert!(client.add_connection("ACoAA1", None).unwrap());

        let log = log.borrow();
        assert_eq!(path_of(&log[0]), "/growth/normInvitations");
        assert_eq!(log[0].header_value("accept"), Some(NORMALIZED_JSON));

        let with_note = body_of(&log[0]);
        assert_eq!(with_note["invitee"][INVITEE_PROFILE]["profileId"], "ACoAA1");
        assert_eq!(with_note["message"], "Hi \"Ada\"");
        let tracking = STANDARD.decode(with_note["trackingId"].as_str().unwrap()).unwrap();
        assert_eq!(tracking.len(), 16);

        assert!(body_of(&log[1]).get("message").is_none());
    }

    #[test]
    fn add_connection_failure() {
        let (client, _) = client_with(|_| HttpResponse::new(429, ""));
        assert!(!client.add_connection("ACoAA1", None).unwrap());
    }

    #[test]
    fn remove_connection_status() {
        let (client, log) = client_with(|_| HttpResponse::new(200, ""));
        assert!(client.remove_connection("ada").unwrap());
        let log = log.borrow();
        assert_eq!(path_of(&log[0]), "/identity/profiles/ada/profileActions?action=disconnect");
        assert_eq!(log[0].body, None);

        let (client, log) = client_with(|_| HttpResponse::new(400, ""));
        assert!(!client.remove_connection("ada lovelace/x").unwrap());
        assert_eq!(
            path_of(&log.borrow()[0]),
            "/identity/profiles/ada%20lovelace%2Fx/profileActions?action=disconnect"
        );
    }

    #[test]
    fn finds_and_withdraws_sent_invitation() {
        let (client, log) = client_with(|req| {
            if req.url.contains("sentInvitationViewsV2") {
                let body = json!({ "data": {}, "included": [
                    { "toMemberId": "ACoAA0", "entityUrn": "urn:li:fs_relInvitation:1" },
                    { "toMemberId": "ACoAA1", "entityUrn": "urn:li:fs_relInvitation:2" }
                ]});
                HttpResponse::new(200, body.to_string())
            } else {
                HttpResponse::new(200, "")
            }
        });
        let urn = client.invitation_entity_urn("ACoAA1").unwrap().unwrap();
        assert_eq!(urn, "urn:li:fs_relInvitation:2");
        assert_eq!(client.invitation_entity_urn("ACoAA9").unwrap(), None);

        assert!(client.withdraw_invitation(&urn).unwrap());
        let log = log.borrow();
        assert!(path_of(&log[0]).ends_with("&q=invitationType&start=0"));
        assert_eq!(path_of(&log[2]), "/relationships/invitations?action=closeInvitations");
        assert_eq!(body_of(&log[2])["inviteActionType"], "ACTOR_WITHDRAW");
        assert_eq!(body_of(&log[2])["entityUrn"], "urn:li:fs_relInvitation:2");
    }
}
