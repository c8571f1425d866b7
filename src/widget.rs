use std::time::Duration;

use history_store::{HistoryStore, Sender, StoredMessage};
use search_state::{SearchField, SearchFields};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::identity::{resolve_identity, IdentityKey};
use crate::transcript::{
    history_cleared_text, ChatMessage, AUTH_FALLBACK_TEXT, CONNECTIVITY_FALLBACK_TEXT,
    WELCOME_TEXT,
};
use crate::window::{ChatWindow, PointerPosition, Viewport};

pub type SendId = u64;

/// Delay between a quick action filling the composer and the send firing,
/// so the input control observes the buffer update first.
pub const QUICK_ACTION_DELAY: Duration = Duration::from_millis(100);

/// One in-flight remote call. Carries the identity and credential captured
/// at dispatch time so a late reply lands under the conversation that sent
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub send_id: SendId,
    pub identity: IdentityKey,
    pub text: String,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendFailureKind {
    Unauthorized,
    Transport,
}

/// Terminal result of one remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Reply { text: String },
    Failed { kind: SendFailureKind, detail: String },
}

/// Host side-effect seam for the widget state machine.
///
/// The widget never performs I/O or timing itself; hosts dispatch the
/// remote call, schedule the delayed quick-action send, and repaint.
pub trait WidgetHost {
    fn dispatch_send(&mut self, request: SendRequest) -> Result<(), String>;
    fn schedule_quick_send(&mut self, delay: Duration);
    fn request_render(&mut self);
}

/// The floating assistant widget: window lifecycle, live transcript,
/// optimistic send/receive protocol, and per-identity persistence.
pub struct AssistantWidget {
    window: ChatWindow,
    transcript: Vec<ChatMessage>,
    store: HistoryStore,
    session_token: Option<String>,
    identity: IdentityKey,
    pending_send: Option<SendId>,
    next_send_id: SendId,
    next_message_id: u64,
}

impl AssistantWidget {
    #[must_use]
    pub fn new(store: HistoryStore) -> Self {
        Self {
            window: ChatWindow::new(),
            transcript: Vec::new(),
            store,
            session_token: None,
            identity: resolve_identity(None),
            pending_send: None,
            next_send_id: 1,
            next_message_id: 1,
        }
    }

    /// The widget (floating button included) renders only while a session
    /// token is present.
    #[must_use]
    pub fn widget_visible(&self) -> bool {
        self.session_token.is_some()
    }

    #[must_use]
    pub fn floating_button_visible(&self) -> bool {
        self.widget_visible() && !self.window.is_open()
    }

    #[must_use]
    pub fn window(&self) -> &ChatWindow {
        &self.window
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    /// True while a send awaits its remote outcome; the send control is
    /// inert and the typing indicator shows.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_send.is_some()
    }

    /// Quick actions are offered while the expanded window shows only the
    /// seed message.
    #[must_use]
    pub fn quick_actions_visible(&self) -> bool {
        self.window.is_expanded() && self.transcript.len() == 1
    }

    /// Applies a login/logout/account switch. Becoming unauthenticated
    /// force-closes the window; an identity change swaps in that identity's
    /// stored conversation.
    pub fn set_session_token(&mut self, session_token: Option<String>) {
        let identity = resolve_identity(session_token.as_deref());
        let token_present = session_token.is_some();
        self.session_token = session_token;

        if !token_present {
            self.window.close();
        }

        if identity != self.identity {
            self.identity = identity;
            self.pending_send = None;
            self.transcript.clear();
            self.next_message_id = 1;
            if self.window.is_open() {
                self.ensure_history_loaded();
            }
        }
    }

    pub fn open(&mut self, host: &mut dyn WidgetHost) {
        if !self.widget_visible() {
            return;
        }

        self.window.open();
        self.ensure_history_loaded();
        host.request_render();
    }

    pub fn close(&mut self, host: &mut dyn WidgetHost) {
        self.window.close();
        host.request_render();
    }

    /// Header click or the explicit minimize/maximize control. From closed
    /// this opens expanded and loads history like [`AssistantWidget::open`].
    pub fn toggle_minimize(&mut self, host: &mut dyn WidgetHost) {
        if !self.widget_visible() {
            return;
        }

        if !self.window.is_open() {
            self.open(host);
            return;
        }

        self.window.toggle_minimize();
        host.request_render();
    }

    pub fn begin_resize(&mut self, host: &mut dyn WidgetHost) -> bool {
        let entered = self.window.begin_resize();
        if entered {
            host.request_render();
        }
        entered
    }

    pub fn resize_to(
        &mut self,
        pointer: PointerPosition,
        viewport: Viewport,
        host: &mut dyn WidgetHost,
    ) {
        if !self.window.is_resizing() {
            return;
        }

        self.window.resize_to(pointer, viewport);
        host.request_render();
    }

    pub fn end_resize(&mut self, host: &mut dyn WidgetHost) {
        self.window.end_resize();
        host.request_render();
    }

    /// Sends the composer buffer.
    ///
    /// The user bubble is appended and the composer cleared before the
    /// remote call starts, so the transcript reflects the attempt even if
    /// the call later fails. Empty input and sends while one is pending are
    /// no-ops.
    pub fn on_send(&mut self, fields: &mut SearchFields, host: &mut dyn WidgetHost) {
        if self.pending_send.is_some() {
            return;
        }

        let raw = fields.chat_input().to_string();
        if raw.trim().is_empty() {
            return;
        }

        self.append_message(raw.clone(), Sender::User);
        fields.clear_field(SearchField::Chat);
        self.persist();

        let send_id = self.next_send_id;
        self.next_send_id += 1;
        self.pending_send = Some(send_id);

        let request = SendRequest {
            send_id,
            identity: self.identity.clone(),
            text: raw,
            bearer_token: self.session_token.clone(),
        };

        if let Err(error) = host.dispatch_send(request) {
            log::warn!("failed to dispatch chat send: {error}");
            self.append_message(CONNECTIVITY_FALLBACK_TEXT, Sender::Assistant);
            self.persist();
            self.pending_send = None;
        }

        host.request_render();
    }

    /// Applies the terminal outcome of a send: exactly one assistant bubble
    /// per send, with the fallback text selected by failure class. A late
    /// outcome for a previous identity is appended to that identity's
    /// stored conversation instead of the live transcript.
    pub fn on_send_result(
        &mut self,
        request: &SendRequest,
        outcome: SendOutcome,
        host: &mut dyn WidgetHost,
    ) {
        let text = match outcome {
            SendOutcome::Reply { text } => text,
            SendOutcome::Failed {
                kind: SendFailureKind::Unauthorized,
                detail,
            } => {
                log::warn!("chat send rejected: {detail}");
                AUTH_FALLBACK_TEXT.to_string()
            }
            SendOutcome::Failed {
                kind: SendFailureKind::Transport,
                detail,
            } => {
                log::warn!("chat send failed: {detail}");
                CONNECTIVITY_FALLBACK_TEXT.to_string()
            }
        };

        if request.identity == self.identity {
            self.append_message(text, Sender::Assistant);
            self.persist();
        } else {
            self.append_to_stored(&request.identity, &text);
        }

        if self.pending_send == Some(request.send_id) {
            self.pending_send = None;
        }

        host.request_render();
    }

    /// Fills the composer with a canned prompt and schedules the send after
    /// [`QUICK_ACTION_DELAY`]. Invoked from closed, this opens the window
    /// first.
    pub fn on_quick_action(
        &mut self,
        action: &str,
        fields: &mut SearchFields,
        host: &mut dyn WidgetHost,
    ) {
        if !self.widget_visible() {
            return;
        }

        if !self.window.is_open() {
            self.window.open();
            self.ensure_history_loaded();
        }

        fields.set_chat_input(action);
        host.schedule_quick_send(QUICK_ACTION_DELAY);
        host.request_render();
    }

    /// Deletes the stored conversation for the active identity and reseeds
    /// the live transcript with the history-cleared notice. The notice is
    /// not persisted; the store stays absent until the next real append.
    pub fn clear_history(&mut self, host: &mut dyn WidgetHost) {
        if let Err(error) = self.store.clear(self.identity.as_str()) {
            log::warn!(
                "failed to clear chat history for {}: {error}",
                self.identity
            );
        }

        self.seed(history_cleared_text());
        host.request_render();
    }

    fn ensure_history_loaded(&mut self) {
        if !self.transcript.is_empty() {
            return;
        }

        match self.store.load(self.identity.as_str()) {
            Some(stored) if !stored.is_empty() => {
                self.transcript = stored.iter().filter_map(ChatMessage::from_stored).collect();
                self.next_message_id = self
                    .transcript
                    .iter()
                    .map(|message| message.id)
                    .max()
                    .unwrap_or(0)
                    + 1;
                if self.transcript.is_empty() {
                    self.seed(WELCOME_TEXT);
                }
            }
            _ => self.seed(WELCOME_TEXT),
        }
    }

    fn seed(&mut self, text: impl Into<String>) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.transcript = vec![ChatMessage::new(id, text, Sender::Assistant)];
    }

    fn append_message(&mut self, text: impl Into<String>, sender: Sender) {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.transcript.push(ChatMessage::new(id, text, sender));
    }

    fn persist(&self) {
        let mut stored = Vec::with_capacity(self.transcript.len());
        for message in &self.transcript {
            match message.to_stored() {
                Ok(record) => stored.push(record),
                Err(error) => {
                    log::warn!("skipping unserializable chat message {}: {error}", message.id);
                }
            }
        }

        if let Err(error) = self.store.save(self.identity.as_str(), &stored) {
            log::warn!("failed to save chat history for {}: {error}", self.identity);
        }
    }

    fn append_to_stored(&self, identity: &IdentityKey, text: &str) {
        let timestamp = match OffsetDateTime::now_utc().format(&Rfc3339) {
            Ok(timestamp) => timestamp,
            Err(error) => {
                log::warn!("failed to format reply timestamp for {identity}: {error}");
                return;
            }
        };

        let mut stored = self.store.load(identity.as_str()).unwrap_or_default();
        let next_id = stored.iter().map(|message| message.id).max().unwrap_or(0) + 1;
        stored.push(StoredMessage::new(next_id, text, Sender::Assistant, timestamp));

        if let Err(error) = self.store.save(identity.as_str(), &stored) {
            log::warn!("failed to save late reply for {identity}: {error}");
        }
    }
}
