//! Main orchestrator: the per-message conversation state machine.

use std::sync::Arc;

use tracing::{debug, info, warn};

use database::{message, user, ConversationState, Database, DatabaseError, NewMessage};
use engine_core::{CompletionEngine, EngineError};
use sms_gateway::SmsSender;

use crate::error::OrchestratorError;
use crate::history::{messages_from_turns, turns_from_messages};
use crate::phone;

/// Opt-in prompt sent on a new user's first message.
pub const OPT_IN_PROMPT: &str =
    "Hi! I'm your personal assistant. Before we start, please reply START to \
     confirm you want to receive messages from me.";

/// Confirmation sent once the user opts in.
pub const OPT_IN_CONFIRMATION: &str =
    "You're all set! Text me anytime to schedule events or ask about your \
     plans, and I'll remind you before anything comes up.";

/// Case-insensitive keyword that completes the opt-in handshake.
pub const OPT_IN_KEYWORD: &str = "start";

/// How many recent messages are replayed as prompt context.
pub const HISTORY_LIMIT: i64 = 20;

/// Coordinates inbound SMS handling.
///
/// Each inbound message is validated, matched to a user, and dispatched on
/// the user's persisted onboarding state: new users get the opt-in prompt,
/// pending users are checked for the confirmation keyword, onboarded users
/// go to the completion engine. Every user-visible exchange is persisted
/// before delivery; delivery itself is fire-and-forget.
pub struct Orchestrator {
    db: Database,
    engine: Arc<dyn CompletionEngine>,
    sender: Arc<dyn SmsSender>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        db: Database,
        engine: Arc<dyn CompletionEngine>,
        sender: Arc<dyn SmsSender>,
    ) -> Self {
        Self { db, engine, sender }
    }

    /// Handle one inbound message end-to-end and return the reply body.
    pub async fn handle_inbound(
        &self,
        from: &str,
        body: &str,
    ) -> Result<String, OrchestratorError> {
        let national = phone::normalize_address(from)
            .ok_or_else(|| OrchestratorError::InvalidAddress(from.to_string()))?;

        let user = match user::get_user_by_phone(self.db.pool(), &national).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound { .. }) => {
                return Err(OrchestratorError::UnknownUser(national));
            }
            Err(e) => return Err(e.into()),
        };

        debug!(
            "Inbound message from user {} in state {}",
            user.id, user.conversation_state
        );

        match user.state() {
            ConversationState::New => self.begin_opt_in(&user).await,
            ConversationState::PendingOptIn => self.check_opt_in(&user, body).await,
            ConversationState::Onboarded => self.converse(&user, body).await,
        }
    }

    /// First contact: persist and send the opt-in prompt, no engine call.
    async fn begin_opt_in(&self, user: &database::User) -> Result<String, OrchestratorError> {
        info!("Starting opt-in handshake for user {}", user.id);

        message::append_messages(
            self.db.pool(),
            &[NewMessage::text(user.id, "system", OPT_IN_PROMPT)],
        )
        .await?;
        user::update_conversation_state(self.db.pool(), user.id, ConversationState::PendingOptIn)
            .await?;

        self.deliver(&user.phone_number, OPT_IN_PROMPT).await;
        Ok(OPT_IN_PROMPT.to_string())
    }

    /// Second contact: look for the opt-in keyword in the inbound body.
    /// A miss persists nothing, so repeated failures stay idempotent.
    async fn check_opt_in(
        &self,
        user: &database::User,
        body: &str,
    ) -> Result<String, OrchestratorError> {
        if !body.to_lowercase().contains(OPT_IN_KEYWORD) {
            debug!("User {} has not opted in yet", user.id);
            return Err(OrchestratorError::OptInRequired);
        }

        info!("User {} opted in", user.id);

        message::append_messages(
            self.db.pool(),
            &[NewMessage::text(user.id, "system", OPT_IN_CONFIRMATION)],
        )
        .await?;
        user::update_conversation_state(self.db.pool(), user.id, ConversationState::Onboarded)
            .await?;

        self.deliver(&user.phone_number, OPT_IN_CONFIRMATION).await;
        Ok(OPT_IN_CONFIRMATION.to_string())
    }

    /// Onboarded: run the completion engine over the recent conversation.
    async fn converse(
        &self,
        user: &database::User,
        body: &str,
    ) -> Result<String, OrchestratorError> {
        let recent = message::recent_messages(self.db.pool(), user.id, HISTORY_LIMIT).await?;
        let prior = turns_from_messages(recent);

        let completion = match self.engine.complete(user.id, &prior, body).await {
            Ok(completion) => completion,
            Err(EngineError::ToolRoundLimit { rounds, turns }) => {
                // Tools in earlier rounds already ran; record their turns so
                // the conversation log matches the store before failing.
                let mut new_messages = vec![NewMessage::text(user.id, "user", body)];
                new_messages.extend(messages_from_turns(user.id, &turns));
                message::append_messages(self.db.pool(), &new_messages).await?;
                return Err(EngineError::ToolRoundLimit { rounds, turns }.into());
            }
            Err(e) => return Err(e.into()),
        };

        // The user's turn plus everything the engine emitted, in order.
        let mut new_messages = vec![NewMessage::text(user.id, "user", body)];
        new_messages.extend(messages_from_turns(user.id, &completion.turns));
        message::append_messages(self.db.pool(), &new_messages).await?;

        self.deliver(&user.phone_number, &completion.reply).await;
        Ok(completion.reply)
    }

    /// Send an outbound SMS. Failures are logged, never propagated: the
    /// stored conversation is the source of truth.
    async fn deliver(&self, national: &str, body: &str) {
        let to = phone::to_address(national);
        if let Err(e) = self.sender.send(&to, body).await {
            warn!("Failed to deliver SMS to {}: {}", to, e);
        }
    }
}
