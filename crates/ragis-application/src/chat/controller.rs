//! The chat session controller.
//!
//! Owns the active transcript and its lifecycle: the guarded send path, the
//! in-place placeholder resolution, the one-shot debounced autosave, and
//! the explicit history operations (new chat, load, delete) that bypass the
//! debounce with a synchronous save.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use ragis_core::chat::{Sender, Transcript};
use ragis_core::error::{RagisError, Result};
use ragis_core::history::{HistoryEntry, HistoryRepository};
use ragis_core::markdown;
use ragis_core::remote::RagService;

use super::autosave::{Debouncer, SAVE_DEBOUNCE};

const STATUS_SENDING: &str = "Invio richiesta...";
const STATUS_RECEIVED: &str = "Risposta ricevuta.";
const REQUEST_ERROR: &str = "Errore nella richiesta.";
const MISSING_ANSWER: &str = "Errore nella risposta";
const REINDEX_FALLBACK: &str = "Il sistema sta aggiornando il database. Riprova tra qualche minuto.";

/// Lifecycle of the pending durable write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Nothing to save.
    Idle,
    /// A save is scheduled behind the debounce window.
    PendingSave,
    /// The last armed exchange has been written.
    Saved,
}

/// Retrieval scope checkboxes. Client-side state only; the service decides
/// its own scope until the request carries these flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchMode {
    pub local: bool,
    pub online: bool,
}

/// One message bubble ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub html: String,
}

struct ChatState {
    session_id: i64,
    transcript: Transcript,
    in_flight: bool,
    /// One-shot flag armed by a user-initiated send; only an armed
    /// transcript is autosaved, so streaming or partial updates never
    /// reach durable storage.
    autosave_armed: bool,
    save_state: SaveState,
    status: Option<String>,
    search_mode: SearchMode,
}

impl ChatState {
    fn new() -> Self {
        Self {
            session_id: Utc::now().timestamp_millis(),
            transcript: Transcript::new(),
            in_flight: false,
            autosave_armed: false,
            save_state: SaveState::Idle,
            status: None,
            search_mode: SearchMode::default(),
        }
    }

    /// Fresh session ids are epoch millis, kept strictly increasing so two
    /// resets inside one millisecond cannot collide.
    fn next_session_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.session_id + 1)
    }
}

/// The single authoritative owner of the active conversation.
pub struct ChatController {
    state: Arc<Mutex<ChatState>>,
    history: Arc<dyn HistoryRepository>,
    service: Arc<dyn RagService>,
    autosave: Debouncer,
}

impl ChatController {
    pub fn new(service: Arc<dyn RagService>, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ChatState::new())),
            history,
            service,
            autosave: Debouncer::new(),
        }
    }

    /// Submits a prompt to the remote service.
    ///
    /// Blank prompts and sends while a request is outstanding are ignored.
    /// The user turn and its pending placeholder are appended together; the
    /// placeholder is resolved in place when the answer (or an error)
    /// arrives, so ordering stays monotonic by submission time.
    pub async fn send_prompt(&self, prompt: &str) -> Result<()> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Ok(());
        }

        {
            let mut state = self.state.lock().await;
            if state.in_flight {
                tracing::debug!("Ignoring send while a request is outstanding");
                return Ok(());
            }
            state.in_flight = true;
            state.autosave_armed = true;
            state.status = Some(STATUS_SENDING.to_string());
            state.transcript.push_exchange(prompt);
        }
        self.after_mutation().await;

        let outcome = self.service.chat(prompt).await;

        {
            let mut state = self.state.lock().await;
            state.in_flight = false;
            match outcome {
                Ok(response) => {
                    let text = if response.reindex {
                        response
                            .testo
                            .unwrap_or_else(|| REINDEX_FALLBACK.to_string())
                    } else {
                        response
                            .answer
                            .unwrap_or_else(|| MISSING_ANSWER.to_string())
                    };
                    state.transcript.resolve_pending(text);
                    state.status = Some(STATUS_RECEIVED.to_string());
                }
                Err(e) => {
                    tracing::warn!("Chat request failed: {}", e);
                    state.transcript.resolve_pending(REQUEST_ERROR);
                    state.status = Some(REQUEST_ERROR.to_string());
                }
            }
        }
        self.after_mutation().await;

        Ok(())
    }

    /// Persists the current conversation and starts a fresh session.
    pub async fn new_chat(&self) {
        self.flush_current().await;

        let mut state = self.state.lock().await;
        state.session_id = state.next_session_id();
        state.transcript = Transcript::new();
        state.in_flight = false;
        state.autosave_armed = false;
        state.save_state = SaveState::Idle;
        state.status = None;
    }

    /// Replaces the active session with a saved conversation, persisting
    /// the previous one first.
    pub async fn load_history_entry(&self, id: i64) -> Result<()> {
        self.flush_current().await;

        let store = self.history.load().await;
        let entry = store
            .get(id)
            .cloned()
            .ok_or_else(|| RagisError::not_found("HistoryEntry", id.to_string()))?;

        let mut state = self.state.lock().await;
        state.session_id = entry.id;
        state.transcript = entry.messages;
        state.in_flight = false;
        state.autosave_armed = false;
        state.save_state = SaveState::Idle;
        state.status = None;
        Ok(())
    }

    /// Removes a saved conversation. An unknown id is a no-op.
    pub async fn delete_history_entry(&self, id: i64) {
        let mut store = self.history.load().await;
        store.remove(id);
        if let Err(e) = self.history.persist(&store).await {
            tracing::warn!("Failed to persist history deletion: {}", e);
        }
    }

    /// Saved conversations, most recently saved first.
    pub async fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history
            .load()
            .await
            .sorted_for_display()
            .into_iter()
            .cloned()
            .collect()
    }

    /// A snapshot of the active transcript.
    pub async fn transcript(&self) -> Transcript {
        self.state.lock().await.transcript.clone()
    }

    /// Display HTML per message. Assistant text goes through the
    /// highlighter; everything else is escaped.
    pub async fn rendered_messages(&self) -> Vec<RenderedMessage> {
        let state = self.state.lock().await;
        state
            .transcript
            .messages()
            .iter()
            .map(|m| RenderedMessage {
                sender: m.sender,
                html: markdown::render_message(m.sender, &m.text),
            })
            .collect()
    }

    /// Outcome line of the last action, if any.
    pub async fn status(&self) -> Option<String> {
        self.state.lock().await.status.clone()
    }

    /// True while a chat request is outstanding.
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.in_flight
    }

    pub async fn save_state(&self) -> SaveState {
        self.state.lock().await.save_state
    }

    pub async fn session_id(&self) -> i64 {
        self.state.lock().await.session_id
    }

    pub async fn search_mode(&self) -> SearchMode {
        self.state.lock().await.search_mode
    }

    /// Toggling the retrieval scope is independent of an in-flight send.
    pub async fn set_search_mode(&self, mode: SearchMode) {
        self.state.lock().await.search_mode = mode;
    }

    /// Reacts to a transcript mutation: schedules (or resets) the debounce
    /// timer when an armed, settled transcript changed; otherwise drops any
    /// pending timer, since it would capture a transcript mid-exchange.
    async fn after_mutation(&self) {
        let mut state = self.state.lock().await;
        if state.in_flight || !state.autosave_armed {
            self.autosave.cancel();
            if state.save_state == SaveState::PendingSave {
                state.save_state = SaveState::Idle;
            }
            return;
        }
        state.save_state = SaveState::PendingSave;
        drop(state);

        let state = Arc::clone(&self.state);
        let history = Arc::clone(&self.history);
        self.autosave.schedule(SAVE_DEBOUNCE, async move {
            Self::debounced_save(state, history).await;
        });
    }

    /// The timer body: read the latest persisted store, upsert the snapshot
    /// of the current transcript, write back. Disarms the one-shot flag so
    /// only the next user-initiated send re-arms it.
    async fn debounced_save(state: Arc<Mutex<ChatState>>, history: Arc<dyn HistoryRepository>) {
        let entry = {
            let mut state = state.lock().await;
            if !state.autosave_armed || state.in_flight {
                return;
            }
            state.autosave_armed = false;
            state.save_state = SaveState::Saved;
            HistoryEntry::from_transcript(&state.transcript, state.session_id)
        };

        let mut store = history.load().await;
        store.upsert(entry);
        if let Err(e) = history.persist(&store).await {
            tracing::warn!("Failed to persist chat history: {}", e);
        }
    }

    /// Synchronous save that bypasses the debounce: used by session reset
    /// and history load. Transcripts without a conversation are not worth
    /// an entry.
    async fn flush_current(&self) {
        self.autosave.cancel();

        let entry = {
            let mut state = self.state.lock().await;
            state.autosave_armed = false;
            if !state.transcript.has_conversation() {
                state.save_state = SaveState::Idle;
                return;
            }
            state.save_state = SaveState::Saved;
            HistoryEntry::from_transcript(&state.transcript, state.session_id)
        };

        let mut store = self.history.load().await;
        store.upsert(entry);
        if let Err(e) = self.history.persist(&store).await {
            tracing::warn!("Failed to persist chat history: {}", e);
        }
    }
}
