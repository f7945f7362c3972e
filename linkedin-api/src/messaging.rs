//! Messaging APIs.
//!
//! # Endpoints
//!
//! | Method | Path | Used by |
//! |--------|------|---------|
//! | GET  | `/messaging/conversations?keyVersion=LEGACY_INBOX` | `conversations`, `conversation_id` |
//! | GET  | `/messaging/conversations?...&q=participants&recipients=List(<urn id>)` | `conversation_details` |
//! | GET  | `/messaging/conversations/{id}/events` | `conversation`, `is_replied` |
//! | POST | `/messaging/conversations/{id}/events?action=create` | `send_message` (existing thread) |
//! | POST | `/messaging/conversations?action=create` | `send_message` (new thread) |
//! | POST | `/messaging/conversations/{id}` | `mark_conversation_as_seen` |
//!
//! Members inside messaging payloads are wrapped in a typed union:
//!
//! ```json
//! { "com.linkedin.voyager.messaging.MessagingMember": {
//!     "miniProfile": { "entityUrn": "...", "publicIdentifier": "ada", "firstName": "Ada", "lastName": "L" }
//! } }
//! ```

use crate::client::LinkedinClient;
use crate::error::Result;
use crate::normalize::{
    Normalize, array, flag, id_from_urn, node, normalize, normalize_all, number, opt_i64,
    opt_text, text,
};
use crate::types::{Conversation, ConversationEvent, MessageTarget, Participant};
use serde_json::{Value, json};
use tracing::warn;

const MESSAGING_MEMBER: &str = "com.linkedin.voyager.messaging.MessagingMember";
const MESSAGE_EVENT: &str = "com.linkedin.voyager.messaging.event.MessageEvent";
const MESSAGE_CREATE: &str = "com.linkedin.voyager.messaging.create.MessageCreate";

impl LinkedinClient {
    /// Conversations in the logged-in member's inbox.
    pub fn conversations(&self) -> Result<Vec<Conversation>> {
        let data = self.fetch_json("/messaging/conversations?keyVersion=LEGACY_INBOX", None)?;
        Ok(normalize_all(&data, "/elements"))
    }

    /// The conversation with the member whose profile URN id is given.
    pub fn conversation_details(&self, profile_urn_id: &str) -> Result<Option<Conversation>> {
        let data = self.fetch_json(
            &format!(
                "/messaging/conversations?keyVersion=LEGACY_INBOX&q=participants&recipients=List({})",
                urlencoding::encode(profile_urn_id)
            ),
            None,
        )?;
        Ok(array(&data, "/elements").first().map(normalize))
    }

    /// Messages of a conversation, oldest first.
    pub fn conversation(&self, conversation_urn_id: &str) -> Result<Vec<ConversationEvent>> {
        let data = self.fetch_json(
            &format!(
                "/messaging/conversations/{}/events",
                urlencoding::encode(conversation_urn_id)
            ),
            None,
        )?;
        Ok(normalize_all(&data, "/elements"))
    }

    /// Id of the one-to-one conversation with `public_id`, if any.
    pub fn conversation_id(&self, public_id: &str) -> Result<Option<String>> {
        Ok(self
            .conversations()?
            .into_iter()
            .find(|c| c.participants.len() == 1 && c.participants[0].public_id == public_id)
            .map(|c| c.id))
    }

    /// Whether `public_id` sent the last message of your conversation with
    /// them.
    pub fn is_replied(&self, public_id: &str) -> Result<bool> {
        let Some(id) = self.conversation_id(public_id)? else {
            return Ok(false);
        };
        let events = self.conversation(&id)?;
        Ok(events
            .last()
            .is_some_and(|e| e.sender_public_id == public_id))
    }

    /// Send `body` to a conversation or to new recipients.
    ///
    /// Returns `true` when the server answers `201 Created`. An empty body
    /// sends nothing and returns `false`.
    pub fn send_message(&self, target: &MessageTarget, body: &str) -> Result<bool> {
        if body.is_empty() {
            warn!("refusing to send an empty message");
            return Ok(false);
        }
        let mut event = json!({
            "eventCreate": {
                "value": {
                    MESSAGE_CREATE: {
                        "body": body,
                        "attachments": [],
                        "attributedBody": { "text": body, "attributes": [] },
                        "mediaAttachments": [],
                    }
                }
            }
        });

        let resp = match target {
            MessageTarget::Conversation(id) => self.post(
                &format!(
                    "/messaging/conversations/{}/events?action=create",
                    urlencoding::encode(id)
                ),
                Some(&event),
                None,
            )?,
            MessageTarget::Recipients(recipients) => {
                if recipients.is_empty() {
                    warn!("message has no recipients");
                    return Ok(false);
                }
                event["recipients"] = json!(recipients);
                event["subtype"] = json!("MEMBER_TO_MEMBER");
                let payload = json!({
                    "keyVersion": "LEGACY_INBOX",
                    "conversationCreate": event,
                });
                self.post("/messaging/conversations?action=create", Some(&payload), None)?
            }
        };
        Ok(resp.status == 201)
    }

    /// Mark a conversation as read. Returns `true` on `200`.
    pub fn mark_conversation_as_seen(&self, conversation_urn_id: &str) -> Result<bool> {
        let payload = json!({ "patch": { "$set": { "read": true } } });
        let resp = self.post(
            &format!(
                "/messaging/conversations/{}",
                urlencoding::encode(conversation_urn_id)
            ),
            Some(&payload),
            None,
        )?;
        Ok(resp.status == 200)
    }
}

impl Normalize for Participant {
    fn normalize(doc: &Value) -> Self {
        let mini = node(doc, &format!("/{MESSAGING_MEMBER}/miniProfile"));
        Self {
            urn_id: id_from_urn(&text(mini, "/entityUrn")).to_owned(),
            public_id: text(mini, "/publicIdentifier"),
            first_name: text(mini, "/firstName"),
            last_name: text(mini, "/lastName"),
        }
    }
}

impl Normalize for Conversation {
    fn normalize(doc: &Value) -> Self {
        let entity_urn = text(doc, "/entityUrn");
        Self {
            id: id_from_urn(&entity_urn).to_owned(),
            participants: normalize_all(doc, "/participants"),
            read: flag(doc, "/read"),
            unread_count: number(doc, "/unreadCount"),
            last_activity_at: opt_i64(doc, "/lastActivityAt").unwrap_or_default(),
            entity_urn,
        }
    }
}

impl Normalize for ConversationEvent {
    fn normalize(doc: &Value) -> Self {
        let content = node(doc, &format!("/eventContent/{MESSAGE_EVENT}"));
        Self {
            entity_urn: text(doc, "/entityUrn"),
            sender_public_id: text(
                doc,
                &format!("/from/{MESSAGING_MEMBER}/miniProfile/publicIdentifier"),
            ),
            body: opt_text(content, "/attributedBody/text").unwrap_or_else(|| text(content, "/body")),
            created_at: opt_i64(doc, "/createdAt").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, path_of};
    use crate::transport::{HttpResponse, Method};

    fn member(public_id: &str) -> Value {
        json!({ MESSAGING_MEMBER: { "miniProfile": {
            "entityUrn": format!("urn:li:fs_miniProfile:{public_id}-urn"),
            "publicIdentifier": public_id,
            "firstName": "F",
            "lastName": "L"
        }}})
    }

    fn inbox() -> Value {
        json!({ "elements": [
            {
                "entityUrn": "urn:li:fs_conversation:2-group",
                "participants": [member("ada"), member("bob")],
                "read": true
            },
            {
                "entityUrn": "urn:li:fs_conversation:2-ada",
                "participants": [member("ada")],
                "unreadCount": 2,
                "lastActivityAt": 1_700_000_000_000_i64
            }
        ]})
    }

    fn event(from: &str, text: &str) -> Value {
        json!({
            "entityUrn": "urn:li:fs_event:1",
            "createdAt": 1,
            "from": member(from),
            "eventContent": { MESSAGE_EVENT: { "attributedBody": { "text": text } } }
        })
    }

    #[test]
    fn conversations_normalize() {
        let convs: Vec<Conversation> = normalize_all(&inbox(), "/elements");
        assert_eq!(convs.len(), 2);
        assert_eq!(convs[0].id, "2-group");
        assert!(convs[0].read);
        assert_eq!(convs[1].participants[0].public_id, "ada");
        assert_eq!(convs[1].participants[0].urn_id, "ada-urn");
        assert_eq!(convs[1].unread_count, 2);
        assert_eq!(convs[1].last_activity_at, 1_700_000_000_000);
    }

    #[test]
    fn conversation_id_needs_one_to_one() {
        let (client, _) = client_with(|_| HttpResponse::new(200, inbox().to_string()));
        assert_eq!(client.conversation_id("ada").unwrap().as_deref(), Some("2-ada"));
        assert_eq!(client.conversation_id("bob").unwrap(), None);
    }

    #[test]
    fn is_replied_checks_last_sender() {
        let (client, log) = client_with(|req| {
            if req.url.ends_with("/events") {
                let body = json!({ "elements": [event("me", "hi"), event("ada", "hello!")] });
                HttpResponse::new(200, body.to_string())
            } else {
                HttpResponse::new(200, inbox().to_string())
            }
        });
        assert!(client.is_replied("ada").unwrap());
        assert_eq!(path_of(&log.borrow()[1]), "/messaging/conversations/2-ada/events");

        // No one-to-one conversation with bob: only the inbox is read.
        assert!(!client.is_replied("bob").unwrap());
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn event_body_falls_back() {
        let doc = json!({ "eventContent": { MESSAGE_EVENT: { "body": "plain" } } });
        let e: ConversationEvent = normalize(&doc);
        assert_eq!(e.body, "plain");
        assert_eq!(e.sender_public_id, "");
        assert_eq!(e.created_at, 0);
    }

    #[test]
    fn send_to_conversation() {
        let (client, log) = client_with(|_| HttpResponse::new(201, ""));
        let sent = client
            .send_message(&MessageTarget::Conversation("2-ada".into()), "hey \"you\"")
            .unwrap();
        assert!(sent);

        let log = log.borrow();
        assert_eq!(log[0].method, Method::Post);
        assert_eq!(path_of(&log[0]), "/messaging/conversations/2-ada/events?action=create");
        let body: Value = serde_json::from_str(log[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["eventCreate"]["value"][MESSAGE_CREATE]["attributedBody"]["text"],
            "hey \"you\""
        );
        assert!(body.get("recipients").is_none());
    }

    #[test]
    fn send_to_recipients_creates_conversation() {
        let (client, log) = client_with(|_| HttpResponse::new(201, ""));
        let target = MessageTarget::Recipients(vec!["ACoAA1".into(), "ACoAA2".into()]);
        assert!(client.send_message(&target, "hello").unwrap());

        let log = log.borrow();
        assert_eq!(path_of(&log[0]), "/messaging/conversations?action=create");
        let body: Value = serde_json::from_str(log[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["keyVersion"], "LEGACY_INBOX");
        assert_eq!(body["conversationCreate"]["recipients"], json!(["ACoAA1", "ACoAA2"]));
        assert_eq!(body["conversationCreate"]["subtype"], "MEMBER_TO_MEMBER");
    }

    #[test]
    fn send_reports_failure_status() {
        let (client, _) = client_with(|_| HttpResponse::new(400, ""));
        assert!(!client
            .send_message(&MessageTarget::Conversation("x".into()), "hi")
            .unwrap());
    }

    #[test]
    fn nothing_to_send() {
        let (client, log) = client_with(|_| HttpResponse::new(201, ""));
        assert!(!client.send_message(&MessageTarget::Conversation("x".into()), "").unwrap());
        assert!(!client.send_message(&MessageTarget::Recipients(vec![]), "hi").unwrap());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn conversation_ids_are_path_encoded() {
        let (client, log) = client_with(|_| HttpResponse::new(201, r#"{"elements":[]}"#));
        client.conversation("2-a/b==").unwrap();
        client
            .send_message(&MessageTarget::Conversation("2-a/b==".into()), "hi")
            .unwrap();
        client.mark_conversation_as_seen("2-a/b==").unwrap();

        let log = log.borrow();
        assert_eq!(path_of(&log[0]), "/messaging/conversations/2-a%2Fb%3D%3D/events");
        assert_eq!(
            path_of(&log[1]),
            "/messaging/conversations/2-a%2Fb%3D%3D/events?action=create"
        );
        assert_eq!(path_of(&log[2]), "/messaging/conversations/2-a%2Fb%3D%3D");
    }

    #[test]
    fn mark_seen() {
        let (client, log) = client_with(|_| HttpResponse::new(200, ""));
        assert!(client.mark_conversation_as_seen("2-ada").unwrap());
        let log = log.borrow();
        assert_eq!(log[0].body.as_deref(), Some(r#"{"patch":{"$set":{"read":true}}}"#));
    }
}
