use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::error::JobError;
use super::events::TranscriptionTask;
use super::model::{Job, JobState, TranscriptionResult};
use super::quota::QuotaPolicy;
use super::repository::JobStore;
use super::title::{TitleResolver, FALLBACK_TITLE};
use crate::infrastructure::queue::QueuePublisher;
use crate::modules::account::repository::AccountStore;
use crate::modules::notification::model::NotificationKind;
use crate::modules::notification::service::NotificationEmitter;

/// Owns the job state machine. Every state transition in the system goes
/// through this service; handlers and workers never touch the store
/// directly. All collaborators arrive through the constructor so the
/// machine is testable without a database or broker.
pub struct JobService {
    store: Arc<dyn JobStore>,
    accounts: Arc<dyn AccountStore>,
    publisher: Arc<dyn QueuePublisher>,
    titles: Arc<dyn TitleResolver>,
    notifier: Arc<dyn NotificationEmitter>,
    public_base_url: String,
}

impl JobService {
    pub fn new(
        store: Arc<dyn JobStore>,
        accounts: Arc<dyn AccountStore>,
        publisher: Arc<dyn QueuePublisher>,
        titles: Arc<dyn TitleResolver>,
        notifier: Arc<dyn NotificationEmitter>,
        public_base_url: String,
    ) -> Self {
        Self {
            store,
            accounts,
            publisher,
            titles,
            notifier,
            public_base_url,
        }
    }

    /// The webhook address handed to the worker pool for a given job.
    fn callback_url(&self, job_id: Uuid) -> String {
        format!(
            "{}/api/v1/jobs/{}/webhook",
            self.public_base_url.trim_end_matches('/'),
            job_id
        )
    }

    /// Validates the URL, applies the quota gate for owned jobs, resolves a
    /// best-effort title, and persists the job in `pending`. The only place
    /// a job id is minted.
    pub async fn create(&self, owner_id: Option<Uuid>, source_url: &str) -> Result<Job, JobError> {
        validate_source_url(source_url)?;

        if let Some(owner) = owner_id {
            // Unknown accounts fail closed.
            let allowed = self
                .accounts
                .find_usage(owner)
                .await?
                .map(|u| QuotaPolicy::can_create(&u))
                .unwrap_or(false);
            if !allowed {
                return Err(JobError::QuotaExceeded);
            }
        }

        let title = self.titles.resolve(source_url).await;
        let job = Job::new(owner_id, source_url, title);
        self.store.insert(&job).await?;
        info!("job {} created for {:?}", job.id, job.owner_id);
        Ok(job)
    }

    /// Hands a pending job to the worker pool. Not idempotent: submitting a
    /// job that already left `pending` is a caller bug and surfaces as
    /// `InvalidState`. An enqueue failure drives the job to `failed` (a job
    /// that cannot be queued will never complete, so it must not sit in
    /// `processing` limbo) and the publish error is still re-raised.
    pub async fn submit(&self, job_id: Uuid) -> Result<(), JobError> {
        let job = self
            .store
            .find(job_id)
            .await?
            .ok_or(JobError::NotFound(job_id))?;
        if job.state != JobState::Pending {
            return Err(JobError::InvalidState {
                expected: JobState::Pending,
                actual: job.state,
            });
        }

        let Some(job) = self.store.mark_processing(job_id).await? else {
            // Lost a race with another caller between the read and the CAS.
            let actual = self
                .store
                .find(job_id)
                .await?
                .map(|j| j.state)
                .unwrap_or(JobState::Failed);
            return Err(JobError::InvalidState {
                expected: JobState::Pending,
                actual,
            });
        };

        let task = TranscriptionTask {
            job_id: job.id,
            source_url: job.source_url.clone(),
            callback_url: self.callback_url(job.id),
        };

        if let Err(publish_err) = self.publisher.enqueue(&task).await {
            error!("enqueue failed for job {}: {}", job.id, publish_err);
            if let Err(e) = self
                .fail(job.id, Some(&format!("queue publish failed: {}", publish_err)))
                .await
            {
                error!("could not mark job {} failed after publish error: {}", job.id, e);
            }
            return Err(JobError::Publish(publish_err));
        }

        info!("job {} queued for transcription", job.id);
        Ok(())
    }

    /// Terminal transition to `completed`. Idempotent: a duplicate delivery
    /// for an already-settled job is logged and answered with the stored row,
    /// with no side effects. The winning transition increments the owner's
    /// usage counter (anonymous jobs skip accounting) and emits a
    /// notification. Completion from `pending` is accepted; the webhook may
    /// arrive before submit's own bookkeeping finishes.
    pub async fn complete(
        &self,
        job_id: Uuid,
        result: TranscriptionResult,
    ) -> Result<Job, JobError> {
        match self.store.mark_completed(job_id, &result).await? {
            Some(job) => {
                if let Some(owner) = job.owner_id {
                    if let Err(e) = self.accounts.increment_usage(owner).await {
                        warn!("usage increment failed for account {}: {}", owner, e);
                    }
                    self.notifier
                        .emit(
                            owner,
                            NotificationKind::Completed,
                            job.id,
                            job.title.as_deref().unwrap_or(FALLBACK_TITLE),
                            None,
                        )
                        .await;
                }
                info!("job {} completed", job.id);
                Ok(job)
            }
            None => self.already_settled(job_id, "complete").await,
        }
    }

    /// Terminal transition to `failed`, from any non-terminal state. Same
    /// idempotency guard as `complete`; never touches usage counters.
    pub async fn fail(&self, job_id: Uuid, reason: Option<&str>) -> Result<Job, JobError> {
        match self.store.mark_failed(job_id, reason).await? {
            Some(job) => {
                if let Some(owner) = job.owner_id {
                    self.notifier
                        .emit(
                            owner,
                            NotificationKind::Failed,
                            job.id,
                            job.title.as_deref().unwrap_or(FALLBACK_TITLE),
                            reason,
                        )
                        .await;
                }
                info!("job {} failed: {}", job.id, reason.unwrap_or("unspecified"));
                Ok(job)
            }
            None => self.already_settled(job_id, "fail").await,
        }
    }

    pub async fn get(&self, job_id: Uuid) -> Result<Job, JobError> {
        self.store
            .find(job_id)
            .await?
            .ok_or(JobError::NotFound(job_id))
    }

    pub async fn list_for_owner(&self, owner_id: Uuid, limit: i64) -> Result<Vec<Job>, JobError> {
        Ok(self.store.list_for_owner(owner_id, limit).await?)
    }

    /// Sweeps jobs stuck in `processing` longer than `max_age` to `failed`.
    /// The external worker owes us a webhook per job; when it never arrives
    /// this is the only way a job leaves `processing`.
    pub async fn reap_stale(&self, max_age: Duration) -> Result<u64, JobError> {
        let cutoff = OffsetDateTime::now_utc() - max_age;
        let stale = self.store.stale_processing(cutoff).await?;
        let mut reaped = 0u64;
        for job in stale {
            match self.fail(job.id, Some("transcription timed out")).await {
                Ok(j) if j.state == JobState::Failed => reaped += 1,
                Ok(_) => {} // settled by a late webhook in the meantime
                Err(e) => warn!("reaper could not fail job {}: {}", job.id, e),
            }
        }
        if reaped > 0 {
            info!("reaper failed {} stale jobs", reaped);
        }
        Ok(reaped)
    }

    /// Post-CAS disambiguation: absent row is `NotFound`; a terminal row is
    /// a duplicate delivery answered with the stored job.
    async fn already_settled(&self, job_id: Uuid, op: &str) -> Result<Job, JobError> {
        let job = self
            .store
            .find(job_id)
            .await?
            .ok_or(JobError::NotFound(job_id))?;
        if job.state.is_terminal() {
            info!(
                "duplicate {} delivery for job {} ignored (already {})",
                op,
                job_id,
                job.state.as_str()
            );
            Ok(job)
        } else {
            Err(JobError::InvalidState {
                expected: JobState::Processing,
                actual: job.state,
            })
        }
    }
}

fn validate_source_url(raw: &str) -> Result<(), JobError> {
    let parsed = url::Url::parse(raw).map_err(|e| JobError::InvalidInput(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(JobError::InvalidInput(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(JobError::InvalidInput("URL has no host".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::queue::PublishError;
    use crate::modules::account::model::{AccountUsage, SubscriptionTier};
    use anyhow::Result as AnyResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    struct MemoryJobStore {
        jobs: Mutex<HashMap<Uuid, Job>>,
    }

    impl MemoryJobStore {
        fn new() -> Self {
            Self {
                jobs: Mutex::new(HashMap::new()),
            }
        }

        async fn backdate(&self, id: Uuid, by: Duration) {
            let mut jobs = self.jobs.lock().await;
            if let Some(job) = jobs.get_mut(&id) {
                job.updated_at -= by;
            }
        }
    }

    #[async_trait]
    impl JobStore for MemoryJobStore {
        async fn insert(&self, job: &Job) -> AnyResult<()> {
            self.jobs.lock().await.insert(job.id, job.clone());
            Ok(())
        }

        async fn find(&self, id: Uuid) -> AnyResult<Option<Job>> {
            Ok(self.jobs.lock().await.get(&id).cloned())
        }

        async fn list_for_owner(&self, owner_id: Uuid, limit: i64) -> AnyResult<Vec<Job>> {
            let jobs = self.jobs.lock().await;
            let mut owned: Vec<Job> = jobs
                .values()
                .filter(|j| j.owner_id == Some(owner_id))
                .cloned()
                .collect();
            owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            owned.truncate(limit as usize);
            Ok(owned)
        }

        async fn mark_processing(&self, id: Uuid) -> AnyResult<Option<Job>> {
            let mut jobs = self.jobs.lock().await;
            match jobs.get_mut(&id) {
                Some(job) if job.state == JobState::Pending => {
                    job.state = JobState::Processing;
                    job.updated_at = OffsetDateTime::now_utc();
                    Ok(Some(job.clone()))
                }
                _ => Ok(None),
            }
        }

        async fn mark_completed(
            &self,
            id: Uuid,
            result: &TranscriptionResult,
        ) -> AnyResult<Option<Job>> {
            let mut jobs = self.jobs.lock().await;
            match jobs.get_mut(&id) {
                Some(job) if !job.state.is_terminal() => {
                    job.state = JobState::Completed;
                    job.transcript_text = Some(result.transcript.clone());
                    job.duration_seconds = result.duration_seconds;
                    job.word_count = result.word_count;
                    job.accuracy_percent = result.accuracy_percent;
                    job.processing_time_seconds = result.processing_time_seconds;
                    job.updated_at = OffsetDateTime::now_utc();
                    Ok(Some(job.clone()))
                }
                _ => Ok(None),
            }
        }

        async fn mark_failed(&self, id: Uuid, reason: Option<&str>) -> AnyResult<Option<Job>> {
            let mut jobs = self.jobs.lock().await;
            match jobs.get_mut(&id) {
                Some(job) if !job.state.is_terminal() => {
                    job.state = JobState::Failed;
                    job.failure_reason = reason.map(|r| r.to_string());
                    job.updated_at = OffsetDateTime::now_utc();
                    Ok(Some(job.clone()))
                }
                _ => Ok(None),
            }
        }

        async fn stale_processing(&self, cutoff: OffsetDateTime) -> AnyResult<Vec<Job>> {
            let jobs = self.jobs.lock().await;
            Ok(jobs
                .values()
                .filter(|j| j.state == JobState::Processing && j.updated_at < cutoff)
                .cloned()
                .collect())
        }
    }

    struct MemoryAccountStore {
        accounts: Mutex<HashMap<Uuid, AccountUsage>>,
    }

    impl MemoryAccountStore {
        fn new() -> Self {
            Self {
                accounts: Mutex::new(HashMap::new()),
            }
        }

        async fn put(&self, id: Uuid, tier: SubscriptionTier, used: i64) {
            self.accounts.lock().await.insert(
                id,
                AccountUsage {
                    subscription_tier: tier,
                    jobs_used: used,
                },
            );
        }

        async fn used(&self, id: Uuid) -> i64 {
            self.accounts.lock().await.get(&id).map(|u| u.jobs_used).unwrap_or(0)
        }
    }

    #[async_trait]
    impl AccountStore for MemoryAccountStore {
        async fn find_usage(&self, id: Uuid) -> AnyResult<Option<AccountUsage>> {
            Ok(self.accounts.lock().await.get(&id).copied())
        }

        async fn increment_usage(&self, id: Uuid) -> AnyResult<()> {
            if let Some(usage) = self.accounts.lock().await.get_mut(&id) {
                usage.jobs_used += 1;
            }
            Ok(())
        }
    }

    struct StubPublisher {
        fail: bool,
        sent: Mutex<Vec<TranscriptionTask>>,
    }

    impl StubPublisher {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QueuePublisher for StubPublisher {
        async fn enqueue(&self, task: &TranscriptionTask) -> Result<(), PublishError> {
            if self.fail {
                return Err(PublishError::Transport("broker unreachable".to_string()));
            }
            self.sent.lock().await.push(task.clone());
            Ok(())
        }
    }

    struct StaticTitles;

    #[async_trait]
    impl TitleResolver for StaticTitles {
        async fn resolve(&self, _source_url: &str) -> String {
            "Stub Title".to_string()
        }
    }

    struct RecordingNotifier {
        events: Mutex<Vec<(Uuid, NotificationKind, Uuid)>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NotificationEmitter for RecordingNotifier {
        async fn emit(
            &self,
            account_id: Uuid,
            kind: NotificationKind,
            job_id: Uuid,
            _title: &str,
            _detail: Option<&str>,
        ) {
            self.events.lock().await.push((account_id, kind, job_id));
        }
    }

    struct Harness {
        service: JobService,
        store: Arc<MemoryJobStore>,
        accounts: Arc<MemoryAccountStore>,
        publisher: Arc<StubPublisher>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness(publisher_fails: bool) -> Harness {
        let store = Arc::new(MemoryJobStore::new());
        let accounts = Arc::new(MemoryAccountStore::new());
        let publisher = Arc::new(StubPublisher::new(publisher_fails));
        let notifier = Arc::new(RecordingNotifier::new());
        let service = JobService::new(
            store.clone(),
            accounts.clone(),
            publisher.clone(),
            Arc::new(StaticTitles),
            notifier.clone(),
            "http://localhost:3000".to_string(),
        );
        Harness {
            service,
            store,
            accounts,
            publisher,
            notifier,
        }
    }

    fn result_with(transcript: &str, words: i32) -> TranscriptionResult {
        TranscriptionResult {
            transcript: transcript.to_string(),
            word_count: Some(words),
            ..Default::default()
        }
    }

    const URL: &str = "https://video.example/abc";

    #[tokio::test]
    async fn test_create_rejects_malformed_url() {
        let h = harness(false);
        for bad in ["not a url", "ftp://video.example/abc", "https://"] {
            let err = h.service.create(None, bad).await.unwrap_err();
            assert!(matches!(err, JobError::InvalidInput(_)), "{bad}");
        }
        assert!(h.store.jobs.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_anonymous_job_bypasses_quota_and_accounting() {
        let h = harness(false);
        let job = h.service.create(None, URL).await.unwrap();
        assert_eq!(job.state, JobState::Pending);

        h.service.submit(job.id).await.unwrap();
        h.service.complete(job.id, result_with("hi", 1)).await.unwrap();

        // No account was ever touched and nobody was notified.
        assert!(h.accounts.accounts.lock().await.is_empty());
        assert!(h.notifier.events.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_quota_blocks_free_tier_at_ceiling() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 3).await;

        let err = h.service.create(Some(owner), URL).await.unwrap_err();
        assert!(matches!(err, JobError::QuotaExceeded));
        assert!(h.store.jobs.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_quota_allows_pro_tier_at_same_usage() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Pro, 3).await;

        let job = h.service.create(Some(owner), URL).await.unwrap();
        assert_eq!(job.owner_id, Some(owner));
    }

    #[tokio::test]
    async fn test_unknown_account_fails_closed() {
        let h = harness(false);
        let err = h.service.create(Some(Uuid::new_v4()), URL).await.unwrap_err();
        assert!(matches!(err, JobError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_submit_transitions_and_enqueues_once() {
        let h = harness(false);
        let job = h.service.create(None, URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        assert_eq!(h.service.get(job.id).await.unwrap().state, JobState::Processing);
        let sent = h.publisher.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].job_id, job.id);
        assert_eq!(sent[0].source_url, URL);
        assert_eq!(
            sent[0].callback_url,
            format!("http://localhost:3000/api/v1/jobs/{}/webhook", job.id)
        );
    }

    #[tokio::test]
    async fn test_submit_twice_is_an_error() {
        let h = harness(false);
        let job = h.service.create(None, URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        let err = h.service.submit(job.id).await.unwrap_err();
        assert!(matches!(
            err,
            JobError::InvalidState {
                expected: JobState::Pending,
                actual: JobState::Processing
            }
        ));
    }

    #[tokio::test]
    async fn test_submit_unknown_job_is_not_found() {
        let h = harness(false);
        let err = h.service.submit(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, JobError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_publish_failure_fails_job_and_reraises() {
        let h = harness(true);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 0).await;
        let job = h.service.create(Some(owner), URL).await.unwrap();

        let err = h.service.submit(job.id).await.unwrap_err();
        assert!(matches!(err, JobError::Publish(_)));

        // Never left in processing limbo.
        let stored = h.service.get(job.id).await.unwrap();
        assert_eq!(stored.state, JobState::Failed);
        assert!(stored.failure_reason.unwrap().contains("queue publish failed"));

        // Failure notified, nothing counted against the quota.
        let events = h.notifier.events.lock().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].1, NotificationKind::Failed);
        assert_eq!(h.accounts.used(owner).await, 0);
    }

    #[tokio::test]
    async fn test_complete_stores_result_counts_usage_and_notifies() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 0).await;
        let job = h.service.create(Some(owner), URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        let completed = h
            .service
            .complete(job.id, result_with("hello world", 2))
            .await
            .unwrap();

        assert_eq!(completed.state, JobState::Completed);
        assert_eq!(completed.transcript_text.as_deref(), Some("hello world"));
        assert_eq!(completed.word_count, Some(2));
        assert_eq!(h.accounts.used(owner).await, 1);

        let events = h.notifier.events.lock().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], (owner, NotificationKind::Completed, job.id));
    }

    #[tokio::test]
    async fn test_complete_accepted_straight_from_pending() {
        // The webhook can beat submit's own bookkeeping; completion from
        // pending is valid.
        let h = harness(false);
        let job = h.service.create(None, URL).await.unwrap();

        let completed = h.service.complete(job.id, result_with("early", 1)).await.unwrap();
        assert_eq!(completed.state, JobState::Completed);
    }

    #[tokio::test]
    async fn test_duplicate_complete_is_a_no_op() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 0).await;
        let job = h.service.create(Some(owner), URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        h.service.complete(job.id, result_with("first", 1)).await.unwrap();
        let second = h
            .service
            .complete(job.id, result_with("second delivery", 99))
            .await
            .unwrap();

        // State, transcript fields and the counter all keep the first result.
        assert_eq!(second.transcript_text.as_deref(), Some("first"));
        assert_eq!(second.word_count, Some(1));
        assert_eq!(h.accounts.used(owner).await, 1);
        assert_eq!(h.notifier.events.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_after_complete_does_not_unsettle() {
        let h = harness(false);
        let job = h.service.create(None, URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();
        h.service.complete(job.id, result_with("done", 1)).await.unwrap();

        let still_completed = h.service.fail(job.id, Some("late failure report")).await.unwrap();
        assert_eq!(still_completed.state, JobState::Completed);
        assert!(still_completed.failure_reason.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_completes_count_usage_once() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Pro, 0).await;
        let job = h.service.create(Some(owner), URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        let (a, b) = tokio::join!(
            h.service.complete(job.id, result_with("one", 1)),
            h.service.complete(job.id, result_with("two", 2)),
        );
        assert!(a.is_ok() && b.is_ok());

        assert_eq!(h.accounts.used(owner).await, 1);
        assert_eq!(h.notifier.events.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_fail_records_reason_and_notifies() {
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 1).await;
        let job = h.service.create(Some(owner), URL).await.unwrap();
        h.service.submit(job.id).await.unwrap();

        let failed = h.service.fail(job.id, Some("download timed out")).await.unwrap();
        assert_eq!(failed.state, JobState::Failed);
        assert_eq!(failed.failure_reason.as_deref(), Some("download timed out"));

        // Failures never count against the quota.
        assert_eq!(h.accounts.used(owner).await, 1);
        let events = h.notifier.events.lock().await;
        assert_eq!(events[0].1, NotificationKind::Failed);
    }

    #[tokio::test]
    async fn test_free_tier_walkthrough_with_duplicate_webhook() {
        // Owner at 2/3 free usage: create, submit, complete, then a
        // duplicate delivery of the same payload.
        let h = harness(false);
        let owner = Uuid::new_v4();
        h.accounts.put(owner, SubscriptionTier::Free, 2).await;

        let job = h.service.create(Some(owner), URL).await.unwrap();
        assert_eq!(job.state, JobState::Pending);

        h.service.submit(job.id).await.unwrap();
        assert_eq!(h.service.get(job.id).await.unwrap().state, JobState::Processing);
        assert_eq!(h.publisher.sent.lock().await.len(), 1);

        h.service.complete(job.id, result_with("hello", 1)).await.unwrap();
        assert_eq!(h.accounts.used(owner).await, 3);

        h.service.complete(job.id, result_with("hello", 1)).await.unwrap();
        assert_eq!(h.service.get(job.id).await.unwrap().state, JobState::Completed);
        assert_eq!(h.accounts.used(owner).await, 3);

        // And now the account is at its ceiling.
        let err = h.service.create(Some(owner), URL).await.unwrap_err();
        assert!(matches!(err, JobError::QuotaExceeded));
    }

    #[tokio::test]
    async fn test_reap_stale_fails_only_old_processing_jobs() {
        let h = harness(false);
        let stale = h.service.create(None, URL).await.unwrap();
        h.service.submit(stale.id).await.unwrap();
        h.store.backdate(stale.id, Duration::hours(7)).await;

        let fresh = h.service.create(None, "https://video.example/def").await.unwrap();
        h.service.submit(fresh.id).await.unwrap();

        let pending = h.service.create(None, "https://video.example/ghi").await.unwrap();

        let reaped = h.service.reap_stale(Duration::hours(6)).await.unwrap();
        assert_eq!(reaped, 1);
        assert_eq!(h.service.get(stale.id).await.unwrap().state, JobState::Failed);
        assert_eq!(h.service.get(fresh.id).await.unwrap().state, JobState::Processing);
        assert_eq!(h.service.get(pending.id).await.unwrap().state, JobState::Pending);
    }

    #[test]
    fn test_validate_source_url() {
        assert!(validate_source_url("https://video.example/abc").is_ok());
        assert!(validate_source_url("http://video.example/abc").is_ok());
        assert!(validate_source_url("ftp://video.example/abc").is_err());
        assert!(validate_source_url("video.example/abc").is_err());
        assert!(validate_source_url("").is_err());
    }
}
