//! Workflow submission and polling.
//!
//! A discovery request maps to exactly one engine job: submit once, poll
//! until the job is terminal or the deadline passes, then classify the
//! final state. Nothing is retried; a failed poll abandons the job.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::kernel::{BaseWorkflowEngine, JobHandle, JobState, JobStatus};

use super::error::DiscoveryError;
use super::models::{DiscoveryInput, DiscoveryResult};
use super::output::normalize_output;

/// Polling cadence and overall deadline for a single discovery job.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            deadline: Duration::from_secs(600),
        }
    }
}

/// Drives one workflow execution per call to [`DiscoveryService::discover`].
pub struct DiscoveryService {
    engine: Arc<dyn BaseWorkflowEngine>,
    poll: PollConfig,
}

impl DiscoveryService {
    pub fn new(engine: Arc<dyn BaseWorkflowEngine>, poll: PollConfig) -> Self {
        Self { engine, poll }
    }

    /// Run a discovery workflow to completion.
    ///
    /// The deadline clock starts once submission has returned a handle;
    /// submission time itself is not counted. The status is read once
    /// immediately and then once per interval, so a job that finishes fast
    /// is observed without waiting out a full interval.
    pub async fn discover(
        &self,
        input: DiscoveryInput,
    ) -> Result<DiscoveryResult, DiscoveryError> {
        tracing::info!(
            min_score = input.min_score,
            num_stories = input.num_stories,
            preferences = input.user_preferences.len(),
            "Submitting discovery workflow"
        );

        let handle = self
            .engine
            .submit(input.to_engine_input())
            .await
            .map_err(DiscoveryError::SubmitFailed)?;
        tracing::info!(handle = %handle, "Workflow submitted");

        let started = Instant::now();
        let mut state = self.fetch(&handle, started).await?;

        while !state.status.is_terminal() && started.elapsed() < self.poll.deadline {
            sleep(self.poll.interval).await;
            state = self.fetch(&handle, started).await?;
        }

        if state.status == JobStatus::Failed {
            tracing::error!(
                handle = %handle,
                reason = ?state.error,
                "Workflow execution reported failure"
            );
            return Err(DiscoveryError::WorkflowFailed);
        }
        if state.status != JobStatus::Succeeded {
            tracing::warn!(
                handle = %handle,
                status = ?state.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Workflow still not terminal at deadline"
            );
            return Err(DiscoveryError::WorkflowTimeout);
        }

        tracing::info!(
            handle = %handle,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Workflow execution succeeded"
        );
        normalize_output(state.output)
    }

    async fn fetch(
        &self,
        handle: &JobHandle,
        started: Instant,
    ) -> Result<JobState, DiscoveryError> {
        let state = self
            .engine
            .fetch_status(handle)
            .await
            .map_err(DiscoveryError::FetchFailed)?;
        tracing::debug!(
            handle = %handle,
            status = ?state.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Polled execution status"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Engine double that replays a scripted sequence of states; the last
    /// entry repeats once the script runs out.
    struct ScriptedEngine {
        states: Vec<JobState>,
        submitted: Mutex<Option<Value>>,
        submissions: AtomicUsize,
        fetches: AtomicUsize,
        fail_submit: bool,
        fail_fetch: bool,
    }

    impl ScriptedEngine {
        fn new(states: Vec<JobState>) -> Self {
            Self {
                states,
                submitted: Mutex::new(None),
                submissions: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
                fail_submit: false,
                fail_fetch: false,
            }
        }

        fn failing_submit() -> Self {
            Self {
                fail_submit: true,
                ..Self::new(Vec::new())
            }
        }

        fn failing_fetch() -> Self {
            Self {
                fail_fetch: true,
                ..Self::new(Vec::new())
            }
        }

        fn submission_count(&self) -> usize {
            self.submissions.load(Ordering::SeqCst)
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BaseWorkflowEngine for ScriptedEngine {
        async fn submit(&self, input: Value) -> anyhow::Result<JobHandle> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            if self.fail_submit {
                anyhow::bail!("Failed to create Julep execution: connection refused");
            }
            *self.submitted.lock().unwrap() = Some(input);
            Ok(JobHandle("exec-1".to_string()))
        }

        async fn fetch_status(&self, _handle: &JobHandle) -> anyhow::Result<JobState> {
            let n = self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail_fetch {
                anyhow::bail!("Failed to fetch Julep execution: connection reset");
            }
            Ok(self.states[n.min(self.states.len() - 1)].clone())
        }
    }

    fn pending() -> JobState {
        JobState {
            status: JobStatus::Pending,
            output: None,
            error: None,
        }
    }

    fn running() -> JobState {
        JobState {
            status: JobStatus::Running,
            output: None,
            error: None,
        }
    }

    fn succeeded(output: Value) -> JobState {
        JobState {
            status: JobStatus::Succeeded,
            output: Some(output),
            error: None,
        }
    }

    fn failed(reason: &str) -> JobState {
        JobState {
            status: JobStatus::Failed,
            output: None,
            error: Some(reason.to_string()),
        }
    }

    fn sample_output() -> Value {
        json!({
            "final_output": [{
                "url": "https://example.com/post",
                "title": "A story",
                "hn_url": "https://news.ycombinator.com/item?id=1",
                "summary": "A short summary.",
                "comments_count": 12
            }]
        })
    }

    fn sample_input() -> DiscoveryInput {
        DiscoveryInput {
            min_score: 50,
            num_stories: 10,
            user_preferences: vec!["Rust".to_string()],
        }
    }

    fn service(engine: &Arc<ScriptedEngine>, poll: PollConfig) -> DiscoveryService {
        DiscoveryService::new(engine.clone(), poll)
    }

    #[tokio::test]
    async fn immediate_success_polls_exactly_once() {
        let engine = Arc::new(ScriptedEngine::new(vec![succeeded(sample_output())]));

        let result = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap();

        assert_eq!(result.final_output.len(), 1);
        assert_eq!(engine.submission_count(), 1);
        assert_eq!(engine.fetch_count(), 1);
    }

    #[tokio::test]
    async fn submission_carries_the_validated_parameters() {
        let engine = Arc::new(ScriptedEngine::new(vec![succeeded(sample_output())]));

        service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap();

        assert_eq!(
            engine.submitted.lock().unwrap().clone().unwrap(),
            json!({
                "min_score": 50,
                "num_stories": 10,
                "user_preferences": ["Rust"]
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn polling_continues_through_non_terminal_states() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            pending(),
            running(),
            running(),
            succeeded(sample_output()),
        ]));

        let result = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap();

        assert_eq!(result.final_output.len(), 1);
        assert_eq!(engine.fetch_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_stops_polling_immediately() {
        let engine = Arc::new(ScriptedEngine::new(vec![
            running(),
            failed("workflow step exploded"),
        ]));

        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::WorkflowFailed));
        assert_eq!(engine.fetch_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_on_the_first_poll_never_sleeps() {
        let engine = Arc::new(ScriptedEngine::new(vec![failed("bad input template")]));

        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::WorkflowFailed));
        assert_eq!(engine.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn never_terminal_job_times_out_at_the_deadline() {
        let engine = Arc::new(ScriptedEngine::new(vec![running()]));

        let started = Instant::now();
        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::WorkflowTimeout));
        // One immediate poll plus one per 2s interval across the 600s deadline.
        assert_eq!(engine.fetch_count(), 301);
        assert_eq!(started.elapsed(), Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_poll_config_bounds_the_poll_count() {
        let engine = Arc::new(ScriptedEngine::new(vec![pending()]));
        let poll = PollConfig {
            interval: Duration::from_secs(2),
            deadline: Duration::from_secs(10),
        };

        let err = service(&engine, poll)
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::WorkflowTimeout));
        assert_eq!(engine.fetch_count(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn success_on_the_final_poll_is_still_a_success() {
        let mut states = vec![running(); 300];
        states.push(succeeded(sample_output()));
        let engine = Arc::new(ScriptedEngine::new(states));

        let result = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap();

        assert_eq!(result.final_output.len(), 1);
        assert_eq!(engine.fetch_count(), 301);
    }

    #[tokio::test]
    async fn poll_errors_abort_without_retry() {
        let engine = Arc::new(ScriptedEngine::failing_fetch());

        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::FetchFailed(_)));
        assert_eq!(engine.fetch_count(), 1);
    }

    #[tokio::test]
    async fn submit_errors_skip_polling_entirely() {
        let engine = Arc::new(ScriptedEngine::failing_submit());

        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::SubmitFailed(_)));
        assert_eq!(engine.submission_count(), 1);
        assert_eq!(engine.fetch_count(), 0);
    }

    #[tokio::test]
    async fn succeeded_job_with_unusable_output_is_malformed() {
        let engine = Arc::new(ScriptedEngine::new(vec![succeeded(json!({
            "unexpected": true
        }))]));

        let err = service(&engine, PollConfig::default())
            .discover(sample_input())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::MalformedOutput(_)));
    }
}
