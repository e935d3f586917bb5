//! The seeding orchestrator and its collaborator seams.
//!
//! [`SeedPipeline::run`] is the single entry point the platform
//! invokes. It walks the fixed step sequence
//! `START → QUEST_READY → PARTICIPANT_READY → CONTENT_VALIDATED → DONE`
//! with an absorbing failure state reachable from every non-terminal
//! step, and mirrors the terminal outcome to the notifier. There is no
//! internal retry loop and no compensation on failure: retry policy
//! belongs to the external caller, which is safe because every step is
//! individually idempotent.

use std::future::Future;
use std::time::Duration;

use asraya_content::DayDefinition;
use asraya_core::types::{QuestId, UserId};
use asraya_events::FlameEvent;
use async_trait::async_trait;

use crate::error::{FailureReason, SeedError, Step};

/// The ritual day validated before a run is declared done.
const FIRST_DAY: u32 = 1;

/// Default upper bound on any single remote step.
const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Ensures the singleton quest row exists and yields its id.
#[async_trait]
pub trait QuestRegistry: Send + Sync {
    /// Idempotent upsert; the returned id is always the row for the
    /// configured slug, under any concurrency.
    async fn ensure_quest(&self) -> Result<QuestId, SeedError>;
}

/// Seeds the per-user membership and progress rows.
#[async_trait]
pub trait ParticipantSeeder: Send + Sync {
    /// Idempotent; converges to the same row set however many times it
    /// runs, and never regresses progress advanced elsewhere.
    async fn ensure_participant_state(
        &self,
        quest_id: QuestId,
        user_id: UserId,
    ) -> Result<(), SeedError>;
}

/// Loads and structurally validates a day's content definition.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn load_day(&self, day: u32) -> Result<DayDefinition, SeedError>;
}

/// Announces a run's terminal outcome to the live client.
///
/// Infallible by contract: implementations log and swallow their own
/// failures so a notification problem can never change the run's
/// outcome or trigger a retry of completed writes.
#[async_trait]
pub trait StatusNotifier: Send + Sync {
    async fn notify(&self, event: FlameEvent);
}

/// Orchestrates one idempotent seeding run per invocation.
pub struct SeedPipeline<R, P, C, N> {
    registry: R,
    participants: P,
    content: C,
    notifier: N,
    step_timeout: Duration,
}

impl<R, P, C, N> SeedPipeline<R, P, C, N>
where
    R: QuestRegistry,
    P: ParticipantSeeder,
    C: ContentSource,
    N: StatusNotifier,
{
    pub fn new(registry: R, participants: P, content: C, notifier: N) -> Self {
        Self {
            registry,
            participants,
            content,
            notifier,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    /// Override the per-step time budget.
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    /// Seed or repair the First-Flame state for one user.
    ///
    /// Returns the quest id on success. On failure the original error
    /// is returned after a best-effort error broadcast; the already
    /// committed writes of earlier steps are left in place, valid for
    /// a later successful run.
    pub async fn run(&self, user_id: UserId) -> Result<QuestId, SeedError> {
        tracing::info!(%user_id, "Seeding First-Flame state");

        match self.execute(user_id).await {
            Ok(quest_id) => {
                self.notifier.notify(FlameEvent::ready(user_id)).await;
                tracing::info!(%user_id, %quest_id, "Seeding run done");
                Ok(quest_id)
            }
            Err(err) => {
                let reason = FailureReason::from(&err);
                tracing::error!(%user_id, reason = reason.as_str(), error = %err, "Seeding run failed");
                self.notifier
                    .notify(FlameEvent::error(user_id, reason.as_str()))
                    .await;
                Err(err)
            }
        }
    }

    /// The step sequence proper; short-circuits on the first failure.
    async fn execute(&self, user_id: UserId) -> Result<QuestId, SeedError> {
        let quest_id = self
            .step(Step::Registry, self.registry.ensure_quest())
            .await?;
        tracing::debug!(%quest_id, "Quest row ensured");

        self.step(
            Step::StateWrite,
            self.participants.ensure_participant_state(quest_id, user_id),
        )
        .await?;
        tracing::debug!(%user_id, "Participant state ensured");

        let daydef = self
            .step(Step::Content, self.content.load_day(FIRST_DAY))
            .await?;
        tracing::debug!(prompts = daydef.prompts.len(), "Day-1 content validated");

        Ok(quest_id)
    }

    /// Bound one remote step so no run can block indefinitely.
    async fn step<T>(
        &self,
        step: Step,
        fut: impl Future<Output = Result<T, SeedError>>,
    ) -> Result<T, SeedError> {
        match tokio::time::timeout(self.step_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(SeedError::Timeout {
                step,
                timeout_secs: self.step_timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use assert_matches::assert_matches;
    use asraya_content::ContentError;
    use asraya_events::FlameEventKind;
    use uuid::Uuid;

    use super::*;

    // -----------------------------------------------------------------
    // In-memory fakes modelling the store's upsert semantics
    // -----------------------------------------------------------------

    /// Quest table keyed by slug, like the unique constraint.
    #[derive(Default)]
    struct MemoryRegistry {
        quests: Arc<Mutex<HashMap<String, QuestId>>>,
        calls: AtomicUsize,
        fail: bool,
    }

    impl MemoryRegistry {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn quest_count(&self) -> usize {
            self.quests.lock().unwrap().len()
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuestRegistry for MemoryRegistry {
        async fn ensure_quest(&self) -> Result<QuestId, SeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SeedError::Registry(sqlx::Error::PoolTimedOut));
            }
            let mut quests = self.quests.lock().unwrap();
            let id = *quests
                .entry("first-flame-ritual".to_string())
                .or_insert_with(Uuid::new_v4);
            Ok(id)
        }
    }

    /// Membership + progress rows keyed by (quest_id, user_id).
    #[derive(Default)]
    struct MemoryParticipants {
        rows: Arc<Mutex<HashMap<(QuestId, UserId), (i32, bool)>>>,
        fail: bool,
    }

    impl MemoryParticipants {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        fn progress_for(&self, quest_id: QuestId, user_id: UserId) -> Option<(i32, bool)> {
            self.rows.lock().unwrap().get(&(quest_id, user_id)).copied()
        }

        fn advance(&self, quest_id: QuestId, user_id: UserId, day: i32) {
            self.rows
                .lock()
                .unwrap()
                .insert((quest_id, user_id), (day, false));
        }
    }

    #[async_trait]
    impl ParticipantSeeder for MemoryParticipants {
        async fn ensure_participant_state(
            &self,
            quest_id: QuestId,
            user_id: UserId,
        ) -> Result<(), SeedError> {
            if self.fail {
                return Err(SeedError::StateWrite(sqlx::Error::PoolTimedOut));
            }
            // Insert-only-if-missing, like ON CONFLICT DO NOTHING.
            self.rows
                .lock()
                .unwrap()
                .entry((quest_id, user_id))
                .or_insert((1, false));
            Ok(())
        }
    }

    enum ContentBehavior {
        Ok,
        Missing,
        Empty,
        Hang,
    }

    struct StaticContent {
        behavior: ContentBehavior,
        calls: AtomicUsize,
    }

    impl StaticContent {
        fn new(behavior: ContentBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentSource for StaticContent {
        async fn load_day(&self, day: u32) -> Result<DayDefinition, SeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                ContentBehavior::Ok => Ok(DayDefinition::from_slice(
                    br#"{"prompts": [{"text": "Light the flame."}]}"#,
                )
                .unwrap()),
                ContentBehavior::Missing => Err(SeedError::Content(ContentError::Missing {
                    key: format!("5-day/day-{day}.json"),
                })),
                ContentBehavior::Empty => {
                    Err(DayDefinition::from_slice(br#"{"prompts": []}"#).unwrap_err().into())
                }
                ContentBehavior::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    /// Records every notification instead of broadcasting.
    #[derive(Default)]
    struct RecordingNotifier {
        events: Arc<Mutex<Vec<FlameEvent>>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<FlameEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusNotifier for RecordingNotifier {
        async fn notify(&self, event: FlameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    /// A notifier whose underlying publish always fails; failures are
    /// swallowed the way the broadcast adapter swallows them.
    struct BrokenNotifier;

    #[async_trait]
    impl StatusNotifier for BrokenNotifier {
        async fn notify(&self, _event: FlameEvent) {
            // Publish failed; logged and discarded.
        }
    }

    fn pipeline(
        registry: MemoryRegistry,
        participants: MemoryParticipants,
        content: StaticContent,
    ) -> SeedPipeline<MemoryRegistry, MemoryParticipants, StaticContent, RecordingNotifier> {
        SeedPipeline::new(registry, participants, content, RecordingNotifier::default())
    }

    // -----------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------

    #[tokio::test]
    async fn fresh_user_seeds_rows_and_broadcasts_ready() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let quest_id = p.run(user_id).await.unwrap();

        assert_eq!(p.registry.quest_count(), 1);
        assert_eq!(
            p.participants.progress_for(quest_id, user_id),
            Some((1, false))
        );

        let events = p.notifier.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, FlameEventKind::Ready);
        assert_eq!(events[0].user_id, user_id);
        assert!(events[0].detail.is_none());
    }

    #[tokio::test]
    async fn rerun_is_idempotent() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let first = p.run(user_id).await.unwrap();
        let second = p.run(user_id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(p.registry.quest_count(), 1);
        assert_eq!(p.registry.call_count(), 2);
        assert_eq!(p.participants.row_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_runs_converge_to_one_row_set() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let outcomes = futures::future::join_all((0..8).map(|_| p.run(user_id))).await;

        let quest_ids: Vec<QuestId> = outcomes.into_iter().map(|r| r.unwrap()).collect();
        assert!(quest_ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(p.registry.quest_count(), 1);
        assert_eq!(p.participants.row_count(), 1);
    }

    #[tokio::test]
    async fn rerun_does_not_regress_advanced_progress() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let quest_id = p.run(user_id).await.unwrap();
        // Another process advanced this user to day 3.
        p.participants.advance(quest_id, user_id, 3);

        p.run(user_id).await.unwrap();

        assert_eq!(
            p.participants.progress_for(quest_id, user_id),
            Some((3, false))
        );
    }

    #[tokio::test]
    async fn registry_failure_stops_before_participant_writes() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::failing(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let err = p.run(user_id).await.unwrap_err();

        assert_matches!(err, SeedError::Registry(_));
        assert_eq!(p.participants.row_count(), 0);
        assert_eq!(p.content.call_count(), 0);

        let events = p.notifier.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, FlameEventKind::Error);
        assert_eq!(events[0].detail.as_deref(), Some("registry"));
    }

    #[tokio::test]
    async fn state_write_failure_stops_before_content_fetch() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::failing(),
            StaticContent::new(ContentBehavior::Ok),
        );

        let err = p.run(user_id).await.unwrap_err();

        assert_matches!(err, SeedError::StateWrite(_));
        assert_eq!(p.content.call_count(), 0);
        assert_eq!(p.notifier.events()[0].detail.as_deref(), Some("state_write"));
    }

    #[tokio::test]
    async fn content_failure_leaves_committed_rows_intact() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Missing),
        );

        let err = p.run(user_id).await.unwrap_err();

        assert_matches!(err, SeedError::Content(ContentError::Missing { .. }));
        // The upserts landed and stay valid for a later successful run.
        assert_eq!(p.registry.quest_count(), 1);
        assert_eq!(p.participants.row_count(), 1);

        let events = p.notifier.events();
        assert_eq!(events[0].kind, FlameEventKind::Error);
        assert_eq!(events[0].detail.as_deref(), Some("content"));
    }

    #[tokio::test]
    async fn empty_prompts_fail_the_run_as_content() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Empty),
        );

        let err = p.run(user_id).await.unwrap_err();
        assert_matches!(err, SeedError::Content(ContentError::Malformed(_)));
        assert_eq!(FailureReason::from(&err), FailureReason::Content);
    }

    #[tokio::test]
    async fn deleted_content_on_rerun_keeps_prior_rows() {
        let user_id = Uuid::new_v4();
        let registry = MemoryRegistry::default();
        let participants = MemoryParticipants::default();
        let quests = Arc::clone(&registry.quests);
        let rows = Arc::clone(&participants.rows);

        let quest_id = pipeline(registry, participants, StaticContent::new(ContentBehavior::Ok))
            .run(user_id)
            .await
            .unwrap();

        // Same store, but the day-1 object has since been deleted.
        let p = pipeline(
            MemoryRegistry {
                quests,
                ..MemoryRegistry::default()
            },
            MemoryParticipants {
                rows,
                ..MemoryParticipants::default()
            },
            StaticContent::new(ContentBehavior::Missing),
        );

        let err = p.run(user_id).await.unwrap_err();

        assert_matches!(err, SeedError::Content(_));
        assert_eq!(p.registry.quest_count(), 1);
        assert_eq!(
            p.participants.progress_for(quest_id, user_id),
            Some((1, false))
        );
        assert_eq!(p.notifier.events()[0].kind, FlameEventKind::Error);
    }

    #[tokio::test]
    async fn hanging_step_times_out_under_its_reason() {
        let user_id = Uuid::new_v4();
        let p = pipeline(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Hang),
        )
        .with_step_timeout(Duration::from_millis(20));

        let err = p.run(user_id).await.unwrap_err();

        assert_matches!(err, SeedError::Timeout { step: Step::Content, .. });
        assert_eq!(p.notifier.events()[0].detail.as_deref(), Some("content"));
    }

    #[tokio::test]
    async fn broken_notifier_does_not_change_the_outcome() {
        let user_id = Uuid::new_v4();
        let p = SeedPipeline::new(
            MemoryRegistry::default(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
            BrokenNotifier,
        );

        // The run is still DONE even though no notification went out.
        p.run(user_id).await.unwrap();

        let failing = SeedPipeline::new(
            MemoryRegistry::failing(),
            MemoryParticipants::default(),
            StaticContent::new(ContentBehavior::Ok),
            BrokenNotifier,
        );

        // And a failed run still surfaces its true failure.
        let err = failing.run(user_id).await.unwrap_err();
        assert_matches!(err, SeedError::Registry(_));
    }
}
