//! General Chat Session
//!
//! Controller behind the chat page. It follows the conversation id of the
//! current route, sends prompts to the completion endpoint and persists the
//! exchange: appended to an existing conversation, or stored as a new one
//! whose id then replaces the blank `/chat` location.

use std::sync::{Arc, Mutex};

use futures_util::future::{AbortHandle, Abortable};

use crate::api::{ApiError, ConversationBackend};
use crate::models::{
    clock_label, date_label, title_snippet, ChatRequest, ConversationMessage, NewConversation,
    Reaction,
};
use crate::nav::{Navigator, Route};
use crate::session::transcript::CHAT_FALLBACK;

/// Page state, keyed by the route's conversation id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    /// Blank chat; the first exchange creates a conversation
    NoConversation,
    Loading,
    Ready,
}

/// What a call to [`ChatSession::send`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was sent
    Ignored,
    /// The model answered and the reply was appended
    Replied,
    /// The request failed and the fallback line was appended
    Fallback,
    /// The user stopped the request; nothing was appended
    Cancelled,
}

/// Stops the completion a session is waiting on.
///
/// Cloneable so another task (a Ctrl-C handler, a stop button) can hold it
/// while the session is busy in `send`.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    slot: Arc<Mutex<Option<AbortHandle>>>,
}

impl CancelHandle {
    /// Abort the pending completion; returns false when nothing was pending
    pub fn cancel(&self) -> bool {
        match self.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn arm(&self) -> futures_util::future::AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(handle);
        }
        registration
    }

    fn take(&self) -> Option<AbortHandle> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Chat page controller
pub struct ChatSession<B: ConversationBackend> {
    backend: Arc<B>,
    navigator: Navigator,
    model: String,
    state: ChatState,
    conversation_id: Option<i64>,
    messages: Vec<ConversationMessage>,
    cancel: CancelHandle,
    last_message_id: i64,
}

impl<B: ConversationBackend> ChatSession<B> {
    pub fn new(backend: Arc<B>, navigator: Navigator, model: impl Into<String>) -> Self {
        Self {
            backend,
            navigator,
            model: model.into(),
            state: ChatState::NoConversation,
            conversation_id: None,
            messages: Vec::new(),
            cancel: CancelHandle::default(),
            last_message_id: 0,
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Show a conversation, or a blank chat for `None`.
    ///
    /// A conversation that cannot be fetched is treated as a blank chat.
    pub async fn load(&mut self, id: Option<i64>) {
        self.conversation_id = None;
        self.messages.clear();

        let Some(id) = id else {
            self.state = ChatState::NoConversation;
            return;
        };

        self.state = ChatState::Loading;
        match self.backend.get_conversation(id).await {
            Ok(conversation) => {
                self.conversation_id = Some(conversation.id);
                self.messages = conversation.messages;
                self.state = ChatState::Ready;
            }
            Err(e) => {
                tracing::warn!(conversation_id = id, error = %e, "Opening blank chat instead");
                self.state = ChatState::NoConversation;
            }
        }
    }

    /// Reload when the route points at a different conversation than the one shown.
    /// Returns true when a load happened.
    pub async fn sync_with_route(&mut self) -> bool {
        let target = self.navigator.current_conversation();
        if target == self.conversation_id && self.state != ChatState::Loading {
            return false;
        }
        self.load(target).await;
        true
    }

    /// Send one prompt and wait for the reply.
    ///
    /// The user message is shown immediately. Blank input is ignored; a
    /// second send cannot start while this one holds the session.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let prompt = text.trim();
        if prompt.is_empty() {
            return SendOutcome::Ignored;
        }

        let now = chrono::Local::now();
        let user_message = ConversationMessage::sent(self.next_message_id(), prompt, clock_label(now));
        self.messages.push(user_message.clone());

        let request = ChatRequest::new(prompt, self.model.clone());
        let registration = self.cancel.arm();
        let backend = Arc::clone(&self.backend);
        let conv_id = self.conversation_id;
        let result = Abortable::new(
            async move { backend.send_chat(&request, conv_id).await },
            registration,
        )
        .await;
        self.cancel.take();

        let reply = match result {
            Err(_) | Ok(Err(ApiError::Cancelled)) => {
                tracing::debug!("Chat request cancelled");
                return SendOutcome::Cancelled;
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Chat request failed, showing fallback");
                let fallback = ConversationMessage::received(
                    self.next_message_id(),
                    CHAT_FALLBACK,
                    clock_label(chrono::Local::now()),
                );
                self.messages.push(fallback);
                return SendOutcome::Fallback;
            }
            Ok(Ok(reply)) => reply,
        };

        let reply_message = ConversationMessage::received(
            self.next_message_id(),
            reply.response,
            clock_label(chrono::Local::now()),
        )
        .with_tool_action(reply.tool_action);
        self.messages.push(reply_message.clone());

        match self.conversation_id {
            Some(id) => self.persist_to_existing(id, &user_message, &reply_message).await,
            None => self.persist_as_new(prompt, user_message, reply_message).await,
        }

        SendOutcome::Replied
    }

    async fn persist_to_existing(
        &mut self,
        id: i64,
        user_message: &ConversationMessage,
        reply_message: &ConversationMessage,
    ) {
        for message in [user_message, reply_message] {
            if let Err(e) = self.backend.append_message(id, message).await {
                tracing::warn!(conversation_id = id, error = %e, "Message not saved");
                return;
            }
        }

        match self.backend.get_conversation(id).await {
            Ok(conversation) => self.messages = conversation.messages,
            Err(e) => tracing::warn!(conversation_id = id, error = %e, "Keeping local messages"),
        }
    }

    async fn persist_as_new(
        &mut self,
        prompt: &str,
        user_message: ConversationMessage,
        reply_message: ConversationMessage,
    ) {
        let conversation = NewConversation {
            title: title_snippet(prompt),
            smart_tags: Vec::new(),
            is_active: true,
            last_updated: date_label(chrono::Local::now()),
            messages: vec![user_message, reply_message],
        };

        match self.backend.create_conversation(&conversation).await {
            Ok(created) => {
                tracing::info!(conversation_id = created.id, "Conversation created");
                self.conversation_id = Some(created.id);
                self.state = ChatState::Ready;
                self.navigator.replace(Route::Chat(Some(created.id)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Conversation not saved");
            }
        }
    }

    /// Toggle a reaction on a shown message. Reactions are not sent to the backend.
    pub fn react(&mut self, message_id: i64, reaction: Reaction) -> bool {
        match self.messages.iter_mut().find(|m| m.id == message_id) {
            Some(message) => {
                message.reactions.toggle(reaction);
                true
            }
            None => false,
        }
    }

    /// Millisecond timestamps, bumped when two messages land in the same millisecond
    fn next_message_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_message_id = now.max(self.last_message_id + 1);
        self.last_message_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatCompletion, Result};
    use crate::models::{Ack, ChatReply, Conversation, Created, MessageKind};
    use async_trait::async_trait;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeBackend {
        reply: Option<String>,
        delay: Duration,
        conversations: Mutex<Vec<Conversation>>,
        created: Mutex<Vec<NewConversation>>,
        appended: Mutex<Vec<(i64, ConversationMessage)>>,
    }

    impl FakeBackend {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for FakeBackend {
        async fn send_chat(&self, _request: &ChatRequest, _conv_id: Option<i64>) -> Result<ChatReply> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            match &self.reply {
                Some(text) => Ok(ChatReply {
                    response: text.clone(),
                    tool_action: None,
                }),
                None => Err(ApiError::Status {
                    context: crate::api::endpoints::CHAT_FAILED,
                    status: 500,
                }),
            }
        }
    }

    #[async_trait]
    impl ConversationBackend for FakeBackend {
        async fn get_conversation(&self, id: i64) -> Result<Conversation> {
            let conversations = self.conversations.lock().unwrap();
            conversations
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or(ApiError::Status {
                    context: crate::api::endpoints::FETCH_CONVERSATION,
                    status: 404,
                })
        }

        async fn create_conversation(&self, conversation: &NewConversation) -> Result<Created> {
            self.created.lock().unwrap().push(conversation.clone());
            Ok(Created { id: 77 })
        }

        async fn append_message(&self, id: i64, message: &ConversationMessage) -> Result<Ack> {
            self.appended.lock().unwrap().push((id, message.clone()));
            let mut conversations = self.conversations.lock().unwrap();
            if let Some(conv) = conversations.iter_mut().find(|c| c.id == id) {
                conv.messages.push(message.clone());
            }
            Ok(Ack { success: true })
        }
    }

    fn stored(id: i64) -> Conversation {
        Conversation {
            id,
            title: "Existing".into(),
            smart_tags: vec![],
            is_active: true,
            last_updated: "2024-05-01".into(),
            messages: vec![ConversationMessage::sent(1, "earlier", "09:00")],
        }
    }

    #[tokio::test]
    async fn test_first_exchange_creates_conversation() {
        let backend = Arc::new(FakeBackend::replying("hello"));
        let nav = Navigator::default();
        let mut session = ChatSession::new(Arc::clone(&backend), nav.clone(), "m");

        assert_eq!(session.send("hi").await, SendOutcome::Replied);

        let created = backend.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        let contents: Vec<&str> = created[0].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["hi", "hello"]);
        assert_eq!(created[0].title, "hi");
        assert!(created[0].is_active);

        assert_eq!(nav.current(), Route::Chat(Some(77)));
        assert_eq!(session.conversation_id(), Some(77));
        assert_eq!(session.state(), ChatState::Ready);
        assert!(!session.sync_with_route().await);
    }

    #[tokio::test]
    async fn test_existing_conversation_appends_and_refetches() {
        let backend = Arc::new(FakeBackend::replying("sure"));
        backend.conversations.lock().unwrap().push(stored(5));
        let nav = Navigator::new(Route::Chat(Some(5)));
        let mut session = ChatSession::new(Arc::clone(&backend), nav, "m");

        assert!(session.sync_with_route().await);
        assert_eq!(session.messages().len(), 1);

        session.send("again").await;

        let appended = backend.appended.lock().unwrap();
        assert_eq!(appended.len(), 2);
        assert_eq!(appended[0].1.kind, MessageKind::Sent);
        assert_eq!(appended[1].1.content, "sure");
        assert!(backend.created.lock().unwrap().is_empty());
        assert_eq!(session.messages().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_conversation_opens_blank() {
        let backend = Arc::new(FakeBackend::replying("x"));
        let mut session = ChatSession::new(backend, Navigator::default(), "m");

        session.load(Some(404)).await;
        assert_eq!(session.state(), ChatState::NoConversation);
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let backend = Arc::new(FakeBackend::default());
        let mut session = ChatSession::new(Arc::clone(&backend), Navigator::default(), "m");

        assert_eq!(session.send("hi").await, SendOutcome::Fallback);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].content, CHAT_FALLBACK);
        assert!(backend.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let backend = Arc::new(FakeBackend::replying("x"));
        let mut session = ChatSession::new(backend, Navigator::default(), "m");
        assert_eq!(session.send("   ").await, SendOutcome::Ignored);
        assert!(session.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_appends_nothing() {
        let backend = Arc::new(FakeBackend {
            reply: Some("too late".into()),
            delay: Duration::from_secs(5),
            ..Default::default()
        });
        let mut session = ChatSession::new(Arc::clone(&backend), Navigator::default(), "m");
        let cancel = session.cancel_handle();

        let (outcome, cancelled) = tokio::join!(session.send("hi"), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel()
        });

        assert!(cancelled);
        assert_eq!(outcome, SendOutcome::Cancelled);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].kind, MessageKind::Sent);
        assert!(backend.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reactions_toggle_locally() {
        let backend = Arc::new(FakeBackend::replying("hello"));
        let mut session = ChatSession::new(backend, Navigator::default(), "m");
        session.send("hi").await;

        let id = session.messages()[1].id;
        assert!(session.react(id, Reaction::Like));
        assert_eq!(session.messages()[1].reactions.likes, 1);
        assert!(!session.react(-1, Reaction::Like));
    }
}
