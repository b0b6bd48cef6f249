//! Internal staff chat client.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for chat operations.
pub const TRACING_TARGET: &str = "dentis_client::chat";

/// A message in an internal conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Conversation the message belongs to.
    pub conversation_id: Uuid,
    /// Sending account.
    pub sender_id: Uuid,
    /// Display name of the sender.
    pub sender_name: String,
    /// Message text.
    pub body: String,
    /// When the message was sent.
    pub sent_at: Timestamp,
}

/// Payload for sending a message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    /// Message text.
    #[validate(length(min = 1, max = 4000))]
    pub body: String,
}

/// Client for internal staff chat.
#[derive(Clone, Debug)]
pub struct ChatClient {
    transport: HttpTransport,
}

impl ChatClient {
    /// Creates a new chat client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists one page of messages in a conversation, newest first.
    pub async fn list_messages(
        &self,
        conversation_id: Uuid,
        query: &PageQuery,
    ) -> ApiResult<Page<ChatMessage>> {
        self.transport
            .get(
                Service::Auth,
                &format!("chat/{conversation_id}/messages"),
                Some(query),
            )
            .await
    }

    /// Sends a message to a conversation.
    pub async fn send_message(
        &self,
        conversation_id: Uuid,
        message: &SendMessage,
    ) -> ApiResult<ChatMessage> {
        message.validate()?;

        let sent: ChatMessage = self
            .transport
            .post(
                Service::Auth,
                &format!("chat/{conversation_id}/messages"),
                message,
            )
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            conversation_id = %conversation_id,
            message_id = %sent.id,
            "Chat message sent"
        );

        Ok(sent)
    }

    /// Returns a page fetcher bound to one conversation.
    ///
    /// This is what a chat view hands to its `ListController`; the
    /// conversation identifier is fixed while limit and cursor come from
    /// the controller's query.
    pub fn conversation(&self, conversation_id: Uuid) -> ConversationMessages {
        ConversationMessages {
            client: self.clone(),
            conversation_id,
        }
    }
}

/// Page fetcher for the messages of one conversation.
#[derive(Clone, Debug)]
pub struct ConversationMessages {
    client: ChatClient,
    conversation_id: Uuid,
}

#[async_trait::async_trait]
impl PageFetcher for ConversationMessages {
    type Item = ChatMessage;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<ChatMessage>> {
        Ok(self
            .client
            .list_messages(self.conversation_id, query)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use dentis_paging::ListController;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::testing;

    use super::*;

    fn message_json(conversation_id: Uuid, body: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "conversationId": conversation_id,
            "senderId": Uuid::new_v4(),
            "senderName": "Dana Front",
            "body": body,
            "sentAt": "2026-08-06T16:20:00Z",
        })
    }

    #[tokio::test]
    async fn conversation_fetcher_pages_messages() {
        let server = MockServer::start().await;
        let conversation_id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path(format!("/api/auth/chat/{conversation_id}/messages")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "items": [message_json(conversation_id, "Lab order 114 arrived.")],
                "hasNextPage": false,
            })))
            .mount(&server)
            .await;

        let client = ChatClient::new(testing::transport(&server.uri()));
        let mut controller = ListController::new(client.conversation(conversation_id));

        assert!(controller.refresh().await);
        let page = controller.current_page().expect("page");
        assert_eq!(page.items[0].body, "Lab order 114 arrived.");
    }

    #[tokio::test]
    async fn send_message_posts_body() {
        let server = MockServer::start().await;
        let conversation_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path(format!("/api/auth/chat/{conversation_id}/messages")))
            .and(body_json(json!({ "body": "On my way." })))
            .respond_with(ResponseTemplate::new(201).set_body_json(message_json(
                conversation_id,
                "On my way.",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = ChatClient::new(testing::transport(&server.uri()));
        let sent = client
            .send_message(
                conversation_id,
                &SendMessage {
                    body: "On my way.".into(),
                },
            )
            .await
            .expect("send");

        assert_eq!(sent.conversation_id, conversation_id);
    }

    #[tokio::test]
    async fn send_message_rejects_empty_body() {
        let server = MockServer::start().await;
        let client = ChatClient::new(testing::transport(&server.uri()));

        let result = client
            .send_message(Uuid::new_v4(), &SendMessage { body: String::new() })
            .await;

        assert!(matches!(result, Err(crate::error::ApiError::Validation(_))));
    }
}
