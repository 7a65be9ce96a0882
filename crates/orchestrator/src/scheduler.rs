//! Reminder scheduler: a supervised polling loop over due reminders.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use database::{event, message, reminder, user, Database, DatabaseError, Reminder};
use engine_core::CompletionEngine;
use sms_gateway::SmsSender;

use crate::error::OrchestratorError;
use crate::history::{messages_from_turns, turns_from_messages};
use crate::orchestrator::HISTORY_LIMIT;
use crate::phone;

/// How often the scheduler scans for due reminders.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(300);

/// How many reminders are processed concurrently within one tick.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Display format for the raw reminder line.
const FIRE_AT_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Polls for due reminders and delivers them as friendly messages.
///
/// Runs as a single supervised task. Each tick scans for reminders that are
/// due, unclaimed, and unsent, then processes them with bounded concurrency.
/// A conditional claim update makes each reminder processable by exactly one
/// task, so overlapping schedulers (or a slow previous tick) cannot
/// double-send. Tick failures are logged and the loop continues on schedule.
pub struct ReminderScheduler {
    db: Database,
    engine: Arc<dyn CompletionEngine>,
    sender: Arc<dyn SmsSender>,
    poll_interval: Duration,
    concurrency: usize,
}

impl ReminderScheduler {
    /// Create a scheduler with the default interval and concurrency.
    pub fn new(
        db: Database,
        engine: Arc<dyn CompletionEngine>,
        sender: Arc<dyn SmsSender>,
    ) -> Self {
        Self {
            db,
            engine,
            sender,
            poll_interval: DEFAULT_POLL_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the per-tick concurrency bound.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the scheduler loop. Never returns.
    pub async fn run(&self) {
        let mut ticker = interval(self.poll_interval);
        info!(
            poll_interval = ?self.poll_interval,
            concurrency = self.concurrency,
            "Starting reminder scheduler"
        );

        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                error!("Reminder tick failed: {}", e);
            }
        }
    }

    /// Process one scheduler tick: find due reminders and deliver them.
    pub async fn tick(&self) -> Result<(), OrchestratorError> {
        let due = reminder::due_reminders(self.db.pool(), Utc::now()).await?;
        if due.is_empty() {
            return Ok(());
        }

        debug!("Processing {} due reminder(s)", due.len());

        stream::iter(due)
            .for_each_concurrent(self.concurrency, |rem| async move {
                if let Err(e) = self.process_reminder(&rem).await {
                    warn!("Reminder {} failed: {}", rem.id, e);
                }
            })
            .await;

        Ok(())
    }

    /// Process a single due reminder: claim, soften, persist, deliver, mark.
    async fn process_reminder(&self, rem: &Reminder) -> Result<(), OrchestratorError> {
        if !reminder::claim_reminder(self.db.pool(), rem.id).await? {
            debug!("Reminder {} already claimed, skipping", rem.id);
            return Ok(());
        }

        // A failure before the send is transient: release the claim so the
        // next tick rediscovers the reminder. Once a send is attempted the
        // claim stands, whatever the outcome.
        let (to, reply) = match self.prepare_delivery(rem).await {
            Ok(Some(prepared)) => prepared,
            Ok(None) => return Ok(()),
            Err(e) => {
                if let Err(release_err) = reminder::release_reminder(self.db.pool(), rem.id).await {
                    error!(
                        "Failed to release claim on reminder {}: {}",
                        rem.id, release_err
                    );
                }
                return Err(e);
            }
        };

        if let Err(e) = self.sender.send(&to, &reply).await {
            // The claim keeps this reminder from being retried; the stored
            // message remains the record of what was attempted.
            warn!("Failed to deliver reminder {} to {}: {}", rem.id, to, e);
            return Ok(());
        }

        reminder::mark_reminder_sent(self.db.pool(), rem.id).await?;
        info!("Delivered reminder {} to user {}", rem.id, rem.user_id);

        Ok(())
    }

    /// Soften the reminder text and persist it. Returns the destination
    /// address and message body, or `None` when the owning user is gone.
    async fn prepare_delivery(
        &self,
        rem: &Reminder,
    ) -> Result<Option<(String, String)>, OrchestratorError> {
        let user = match user::get_user(self.db.pool(), rem.user_id).await {
            Ok(user) => user,
            Err(DatabaseError::NotFound { .. }) => {
                warn!("Reminder {} has no user, skipping", rem.id);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let event = event::get_event(self.db.pool(), rem.event_id).await?;

        let raw = format!(
            "Reminder: {} - {}",
            rem.fire_at.format(FIRE_AT_FORMAT),
            event.name
        );

        let recent = message::recent_messages(self.db.pool(), user.id, HISTORY_LIMIT).await?;
        let prior = turns_from_messages(recent);

        let prompt = format!(
            "Improve this message to be more readable and friendly, keep it \
             short and concise though: {}",
            raw
        );
        let completion = self.engine.complete(user.id, &prior, &prompt).await?;

        message::append_messages(
            self.db.pool(),
            &messages_from_turns(user.id, &completion.turns),
        )
        .await?;

        let to = phone::to_address(&user.phone_number);
        Ok(Some((to, completion.reply)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;
    use mock_engine::ScriptedEngine;
    use sms_gateway::RecordingSender;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn scheduler(
        db: Database,
        engine: Arc<ScriptedEngine>,
    ) -> (ReminderScheduler, Arc<RecordingSender>) {
        let sender = Arc::new(RecordingSender::new());
        let sched = ReminderScheduler::new(db, engine, sender.clone());
        (sched, sender)
    }

    async fn seed_due_reminder(db: &Database, phone: &str, event_name: &str) -> i64 {
        let owner = user::create_user(db.pool(), phone).await.unwrap();
        let date = Utc::now() + ChronoDuration::minutes(30);
        let (_, rem) = event::create_event_with_reminder(
            db.pool(),
            owner.id,
            event_name,
            date,
            Utc::now() - ChronoDuration::minutes(5),
        )
        .await
        .unwrap();
        rem.id
    }

    #[tokio::test]
    async fn test_tick_delivers_due_reminder() {
        let db = test_db().await;
        let engine = Arc::new(ScriptedEngine::new());
        engine.push_reply("Heads up, dentist at 10!").await;
        let (sched, sender) = scheduler(db.clone(), engine.clone());

        let rem_id = seed_due_reminder(&db, "5551234567", "dentist").await;
        sched.tick().await.unwrap();

        let sent = sender.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15551234567");
        assert_eq!(sent[0].1, "Heads up, dentist at 10!");

        let rem = reminder::get_reminder(db.pool(), rem_id).await.unwrap();
        assert!(rem.claimed);
        assert!(rem.sent);

        // The softening prompt embeds the raw reminder line.
        let calls = engine.calls().await;
        assert_eq!(calls.len(), 1);
        assert!(calls[0].utterance.contains("Reminder:"));
        assert!(calls[0].utterance.contains("dentist"));
    }

    #[tokio::test]
    async fn test_softened_text_is_persisted() {
        let db = test_db().await;
        let engine = Arc::new(ScriptedEngine::new());
        engine.push_reply("Friendly nudge!").await;
        let (sched, _) = scheduler(db.clone(), engine);

        seed_due_reminder(&db, "5551234567", "standup").await;
        sched.tick().await.unwrap();

        let owner = user::get_user_by_phone(db.pool(), "5551234567")
            .await
            .unwrap();
        let messages = message::recent_messages(db.pool(), owner.id, 10)
            .await
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content.as_deref(), Some("Friendly nudge!"));
    }

    #[tokio::test]
    async fn test_sent_reminder_is_not_redelivered() {
        let db = test_db().await;
        let engine = Arc::new(ScriptedEngine::new());
        engine.push_reply("Once only").await;
        let (sched, sender) = scheduler(db.clone(), engine);

        seed_due_reminder(&db, "5551234567", "dentist").await;
        sched.tick().await.unwrap();
        sched.tick().await.unwrap();

        assert_eq!(sender.sent_count().await, 1);
    }

    #[tokio::test]
    async fn test_future_reminder_is_left_alone() {
        let db = test_db().await;
        let (sched, sender) = scheduler(db.clone(), Arc::new(ScriptedEngine::new()));

        let owner = user::create_user(db.pool(), "5551234567").await.unwrap();
        let date = Utc::now() + ChronoDuration::hours(8);
        let (_, rem) = event::create_event_with_reminder(
            db.pool(),
            owner.id,
            "later",
            date,
            date - ChronoDuration::hours(1),
        )
        .await
        .unwrap();

        sched.tick().await.unwrap();

        assert_eq!(sender.sent_count().await, 0);
        let rem = reminder::get_reminder(db.pool(), rem.id).await.unwrap();
        assert!(!rem.claimed);
        assert!(!rem.sent);
    }

    #[tokio::test]
    async fn test_claimed_reminder_is_skipped() {
        let db = test_db().await;
        let engine = Arc::new(ScriptedEngine::new());
        let (sched, sender) = scheduler(db.clone(), engine);

        let rem_id = seed_due_reminder(&db, "5551234567", "dentist").await;
        // Another task already holds the claim.
        assert!(reminder::claim_reminder(db.pool(), rem_id).await.unwrap());

        sched.tick().await.unwrap();
        assert_eq!(sender.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_engine_failure_releases_claim_for_next_tick() {
        use engine_core::{ChatTurn, Completion, EngineError};

        struct FailingEngine;

        #[engine_core::async_trait]
        impl CompletionEngine for FailingEngine {
            async fn complete(
                &self,
                _user_id: i64,
                _prior: &[ChatTurn],
                _utterance: &str,
            ) -> Result<Completion, EngineError> {
                Err(EngineError::Network("backend unreachable".to_string()))
            }

            fn name(&self) -> &str {
                "FailingEngine"
            }
        }

        let db = test_db().await;
        let sender = Arc::new(RecordingSender::new());
        let rem_id = seed_due_reminder(&db, "5551234567", "dentist").await;

        let failing = ReminderScheduler::new(db.clone(), Arc::new(FailingEngine), sender.clone());
        failing.tick().await.unwrap();

        // Nothing went out and the claim was handed back.
        assert_eq!(sender.sent_count().await, 0);
        let rem = reminder::get_reminder(db.pool(), rem_id).await.unwrap();
        assert!(!rem.claimed);
        assert!(!rem.sent);

        // The next tick rediscovers it and delivers.
        let engine = Arc::new(ScriptedEngine::new());
        engine.push_reply("Dentist soon!").await;
        let healthy = ReminderScheduler::new(db.clone(), engine, sender.clone());
        healthy.tick().await.unwrap();

        assert_eq!(sender.sent_count().await, 1);
        let rem = reminder::get_reminder(db.pool(), rem_id).await.unwrap();
        assert!(rem.claimed);
        assert!(rem.sent);
    }

    #[tokio::test]
    async fn test_delivery_failure_leaves_reminder_unsent() {
        struct FailingSender;

        #[engine_core::async_trait]
        impl SmsSender for FailingSender {
            async fn send(&self, _to: &str, _body: &str) -> Result<(), sms_gateway::SmsError> {
                Err(sms_gateway::SmsError::SendFailed("carrier down".to_string()))
            }
        }

        let db = test_db().await;
        let engine = Arc::new(ScriptedEngine::new());
        engine.push_reply("Nudge").await;
        let sched = ReminderScheduler::new(db.clone(), engine, Arc::new(FailingSender));

        let rem_id = seed_due_reminder(&db, "5551234567", "dentist").await;
        sched.tick().await.unwrap();

        let rem = reminder::get_reminder(db.pool(), rem_id).await.unwrap();
        assert!(rem.claimed);
        assert!(!rem.sent);
    }
}
