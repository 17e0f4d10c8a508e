//! Character Chat Session
//!
//! Controller behind the character chat page: one persona, one transcript.
//! Every transcript change schedules a debounced save of the whole
//! transcript; replies are held back for a minimum typing time.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiError, CharacterBackend};
use crate::config::SessionConfig;
use crate::models::{clock_label, CharacterPersona, CharacterTurn, ChatRequest};
use crate::session::chat::SendOutcome;
use crate::session::debounce::Debouncer;
use crate::session::prompt::{build_prompt, HISTORY_TURNS};
use crate::session::transcript::{
    greeting_turns, opening_turns, should_save, user_turns, CHARACTER_FALLBACK,
};

/// Timing knobs of a character chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterTiming {
    /// Quiet period before the transcript is saved
    pub save_debounce: Duration,
    /// Minimum time between a send and its reply appearing
    pub min_typing: Duration,
    /// Transcript turns carried into each prompt
    pub history_turns: usize,
}

impl Default for CharacterTiming {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(1000),
            min_typing: Duration::from_millis(600),
            history_turns: HISTORY_TURNS,
        }
    }
}

impl From<&SessionConfig> for CharacterTiming {
    fn from(config: &SessionConfig) -> Self {
        Self {
            save_debounce: config.save_debounce(),
            min_typing: config.min_typing(),
            history_turns: config.history_turns,
        }
    }
}

/// Character chat controller
pub struct CharacterChatSession<B: CharacterBackend + 'static> {
    backend: Arc<B>,
    persona: CharacterPersona,
    turns: Vec<CharacterTurn>,
    model: String,
    timing: CharacterTiming,
    saver: Debouncer,
}

impl<B: CharacterBackend + 'static> CharacterChatSession<B> {
    /// Load a persona and its transcript.
    ///
    /// Fails only when the persona itself cannot be fetched; a missing or
    /// unreadable transcript starts from the greeting.
    pub async fn open(
        backend: Arc<B>,
        character_id: &str,
        model: impl Into<String>,
        timing: CharacterTiming,
    ) -> Result<Self, ApiError> {
        let persona = backend.get_character(character_id).await?;
        let now = clock_label(chrono::Local::now());

        let turns = match backend.get_character_conversation(character_id).await {
            Ok(saved) => opening_turns(&persona, &saved, &now),
            Err(e) => {
                tracing::warn!(character_id, error = %e, "Starting from greeting");
                greeting_turns(&persona, &now)
            }
        };

        tracing::info!(character_id, turns = turns.len(), "Character chat opened");
        Ok(Self {
            backend,
            persona,
            turns,
            model: model.into(),
            timing,
            saver: Debouncer::new(timing.save_debounce),
        })
    }

    pub fn persona(&self) -> &CharacterPersona {
        &self.persona
    }

    pub fn turns(&self) -> &[CharacterTurn] {
        &self.turns
    }

    /// Messages the user has written in this transcript
    pub fn user_turn_count(&self) -> usize {
        user_turns(&self.turns)
    }

    pub fn save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    /// Send one line in character and wait for the reply
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        let message = text.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }

        let prompt = build_prompt(&self.persona, &self.turns, message, self.timing.history_turns);
        let started = tokio::time::Instant::now();

        self.turns
            .push(CharacterTurn::user(message, clock_label(chrono::Local::now())));
        self.schedule_save();

        let request = ChatRequest::new(prompt, self.model.clone());
        let result = self.backend.send_chat(&request, None).await;
        tokio::time::sleep_until(started + self.timing.min_typing).await;

        let now = clock_label(chrono::Local::now());
        let outcome = match result {
            Ok(reply) => {
                self.turns.push(CharacterTurn::character(reply.response, now));
                SendOutcome::Replied
            }
            Err(e) => {
                tracing::warn!(character_id = %self.persona.character_id, error = %e, "Character reply failed");
                self.turns.push(CharacterTurn::character(CHARACTER_FALLBACK, now));
                SendOutcome::Fallback
            }
        };
        self.schedule_save();
        outcome
    }

    /// Delete the saved transcript and start again from the greeting
    pub async fn reset(&mut self) -> Result<(), ApiError> {
        self.saver.cancel();
        self.backend
            .delete_character_conversation(&self.persona.character_id)
            .await?;
        self.turns = greeting_turns(&self.persona, &clock_label(chrono::Local::now()));
        tracing::info!(character_id = %self.persona.character_id, "Transcript reset");
        Ok(())
    }

    /// Delete the saved transcript and leave the chat empty
    pub async fn delete(&mut self) -> Result<(), ApiError> {
        self.saver.cancel();
        self.backend
            .delete_character_conversation(&self.persona.character_id)
            .await?;
        self.turns.clear();
        tracing::info!(character_id = %self.persona.character_id, "Transcript deleted");
        Ok(())
    }

    /// Save now instead of waiting for the debounce, e.g. before exiting
    pub async fn flush(&mut self) -> Result<(), ApiError> {
        self.saver.cancel();
        if should_save(&self.turns) {
            self.backend
                .save_character_conversation(&self.persona.character_id, &self.turns)
                .await?;
        }
        Ok(())
    }

    fn schedule_save(&mut self) {
        if !should_save(&self.turns) {
            self.saver.cancel();
            return;
        }

        let backend = Arc::clone(&self.backend);
        let character_id = self.persona.character_id.clone();
        let turns = self.turns.clone();
        self.saver.schedule(async move {
            match backend.save_character_conversation(&character_id, &turns).await {
                Ok(_) => tracing::debug!(%character_id, turns = turns.len(), "Transcript saved"),
                Err(e) => tracing::warn!(%character_id, error = %e, "Transcript not saved"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::{ChatCompletion, Result};
    use crate::models::{Ack, CharacterTranscript, ChatReply, Speaker};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeBackend {
        persona: Option<CharacterPersona>,
        saved: CharacterTranscript,
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
        saves: Mutex<Vec<Vec<CharacterTurn>>>,
        deletes: Mutex<usize>,
    }

    impl FakeBackend {
        fn new(greeting: &str) -> Self {
            let persona = serde_json::from_value(serde_json::json!({
                "character_id": "abc",
                "name": "Luna",
                "greeting": greeting,
            }))
            .unwrap();
            Self {
                persona: Some(persona),
                saved: CharacterTranscript::default(),
                reply: Some("hai juga".into()),
                prompts: Mutex::new(Vec::new()),
                saves: Mutex::new(Vec::new()),
                deletes: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ChatCompletion for FakeBackend {
        async fn send_chat(&self, request: &ChatRequest, _conv_id: Option<i64>) -> Result<ChatReply> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            match &self.reply {
                Some(text) => Ok(ChatReply {
                    response: text.clone(),
                    tool_action: None,
                }),
                None => Err(ApiError::Status {
                    context: endpoints::CHAT_FAILED,
                    status: 502,
                }),
            }
        }
    }

    #[async_trait]
    impl CharacterBackend for FakeBackend {
        async fn get_character(&self, _id: &str) -> Result<CharacterPersona> {
            self.persona.clone().ok_or(ApiError::Status {
                context: endpoints::FETCH_CHARACTER,
                status: 404,
            })
        }

        async fn get_character_conversation(&self, _id: &str) -> Result<CharacterTranscript> {
            Ok(self.saved.clone())
        }

        async fn save_character_conversation(&self, _id: &str, turns: &[CharacterTurn]) -> Result<Ack> {
            self.saves.lock().unwrap().push(turns.to_vec());
            Ok(Ack { success: true })
        }

        async fn delete_character_conversation(&self, _id: &str) -> Result<Ack> {
            *self.deletes.lock().unwrap() += 1;
            Ok(Ack { success: true })
        }
    }

    async fn open(backend: &Arc<FakeBackend>) -> CharacterChatSession<FakeBackend> {
        CharacterChatSession::open(Arc::clone(backend), "abc", "m", CharacterTiming::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_greeting_seeds_new_transcript() {
        let backend = Arc::new(FakeBackend::new("Hi there"));
        let session = open(&backend).await;

        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].speaker, Speaker::Character);
        assert_eq!(session.turns()[0].content, "Hi there");
        assert_eq!(session.user_turn_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_persona_fails_open() {
        let mut backend = FakeBackend::new("Hi");
        backend.persona = None;
        let result =
            CharacterChatSession::open(Arc::new(backend), "abc", "m", CharacterTiming::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_save_once() {
        let backend = Arc::new(FakeBackend::new("Hi there"));
        let mut session = open(&backend).await;

        session.send("satu").await;
        session.send("dua").await;
        assert!(backend.saves.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let saves = backend.saves.lock().unwrap();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0], session.turns().to_vec());
        assert_eq!(saves[0].len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_greeting_only_is_never_saved() {
        let backend = Arc::new(FakeBackend::new("Hi there"));
        let _session = open(&backend).await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(backend.saves.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_min_typing() {
        let backend = Arc::new(FakeBackend::new(""));
        let mut session = open(&backend).await;

        let started = tokio::time::Instant::now();
        assert_eq!(session.send("halo").await, SendOutcome::Replied);
        assert!(started.elapsed() >= Duration::from_millis(600));

        let prompts = backend.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("User: halo\n\nLuna:"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reply_uses_in_character_fallback() {
        let mut backend = FakeBackend::new("Hi");
        backend.reply = None;
        let backend = Arc::new(backend);
        let mut session = open(&backend).await;

        assert_eq!(session.send("halo").await, SendOutcome::Fallback);
        assert_eq!(session.turns().last().unwrap().content, CHARACTER_FALLBACK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_and_delete() {
        let backend = Arc::new(FakeBackend::new("Hi there"));
        let mut session = open(&backend).await;
        session.send("halo").await;

        session.reset().await.unwrap();
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].content, "Hi there");

        session.delete().await.unwrap();
        assert!(session.turns().is_empty());
        assert_eq!(*backend.deletes.lock().unwrap(), 2);

        // the save scheduled by the send was cancelled by the reset
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(backend.saves.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_saves_immediately() {
        let backend = Arc::new(FakeBackend::new("Hi"));
        let mut session = open(&backend).await;
        session.send("halo").await;
        session.flush().await.unwrap();

        assert_eq!(backend.saves.lock().unwrap().len(), 1);
        assert!(!session.save_pending());
    }
}
