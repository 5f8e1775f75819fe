//! The Aggregator: load, merge and render the feed; submit posts.
//!
//! One load cycle walks `Idle -> LoadingIdentity -> LoadingLogs -> Merging ->
//! Rendering -> Done`. The identity and logs requests are in flight together
//! and merging waits for both. A submission walks `Idle -> Submitting ->
//! Reloading` and only reloads if the node accepted the post.

use tokio::time::timeout;
use tracing::{debug, info, warn};

use feedloom_client::Backend;
use feedloom_core::{merge_feed, Identity, LogCollection, Operation, ParsedLogs, Rejected};

use crate::config::FeedConfig;
use crate::error::{FeedError, Result};
use crate::record::{build_view, FeedView};
use crate::surface::Surface;

/// States of one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    LoadingIdentity,
    LoadingLogs,
    Merging,
    Rendering,
    Done,
    Failed,
}

/// States of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Reloading,
    Failed,
}

/// Result of a completed load cycle.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Every state the cycle passed through, in order.
    pub phases: Vec<LoadPhase>,
    /// The presentation handed to the surface.
    pub view: FeedView,
    /// Operations skipped because they failed validation.
    pub rejected: Vec<Rejected>,
}

impl LoadReport {
    /// Number of entries rendered.
    pub fn rendered(&self) -> usize {
        self.view.records.len()
    }
}

/// Result of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub phases: Vec<SubmitPhase>,
    /// The reload that followed the submission.
    pub reload: LoadReport,
}

/// Phase tracker for one cycle.
#[derive(Debug)]
struct Cycle<P> {
    phases: Vec<P>,
}

impl<P: Copy + std::fmt::Debug> Cycle<P> {
    fn start(idle: P) -> Self {
        Self { phases: vec![idle] }
    }

    fn advance(&mut self, phase: P) {
        debug!(?phase, "feed cycle");
        self.phases.push(phase);
    }
}

/// The feed aggregator.
///
/// Holds no feed state between cycles: every load fetches, merges and
/// renders from scratch.
pub struct Aggregator<B: Backend, S: Surface> {
    backend: B,
    surface: S,
    config: FeedConfig,
}

impl<B: Backend, S: Surface> Aggregator<B, S> {
    /// Create a new aggregator.
    pub fn new(backend: B, surface: S, config: FeedConfig) -> Self {
        Self {
            backend,
            surface,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Steps
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the viewer's identity.
    pub async fn load_identity(&self) -> Result<Identity> {
        Ok(self.backend.whoami().await?)
    }

    /// Fetch the multi-log snapshot. Malformed operations are logged and
    /// skipped.
    pub async fn load_logs(&self) -> Result<ParsedLogs> {
        let parsed = self.backend.list_posts().await?;
        for rejected in &parsed.rejected {
            warn!(
                log_id = %rejected.log_id,
                index = rejected.index,
                reason = %rejected.reason,
                "skipping malformed operation"
            );
        }
        Ok(parsed)
    }

    /// Merge a snapshot into one time-ordered feed.
    pub fn merge_feed(&self, logs: &LogCollection) -> Vec<Operation> {
        merge_feed(logs)
    }

    /// Build the presentation for `feed` and hand it to the surface,
    /// replacing whatever it showed.
    pub fn render(&self, feed: &[Operation], identity: &Identity) -> Result<FeedView> {
        let view = build_view(feed, identity, &self.config);
        self.surface.replace_feed(&view)?;
        Ok(view)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cycles
    // ─────────────────────────────────────────────────────────────────────────

    /// Run a full load cycle.
    ///
    /// On failure the surface shows the error and the error is returned.
    pub async fn load(&self) -> Result<LoadReport> {
        match self.run_load().await {
            Ok(report) => Ok(report),
            Err(e) => {
                debug!(phase = ?LoadPhase::Failed, "feed cycle");
                warn!(error = %e, kind = ?e.kind(), "load failed");
                self.surface.show_error(&e)?;
                Err(e)
            }
        }
    }

    async fn run_load(&self) -> Result<LoadReport> {
        let mut cycle = Cycle::start(LoadPhase::Idle);

        // Both requests are issued before either is awaited.
        cycle.advance(LoadPhase::LoadingIdentity);
        cycle.advance(LoadPhase::LoadingLogs);
        let fetch = async { tokio::join!(self.load_identity(), self.load_logs()) };
        let (identity, parsed) = timeout(self.config.load_timeout, fetch)
            .await
            .map_err(|_| FeedError::Timeout(self.config.load_timeout))?;
        let identity = identity?;
        let parsed = parsed?;

        cycle.advance(LoadPhase::Merging);
        let feed = self.merge_feed(&parsed.logs);

        cycle.advance(LoadPhase::Rendering);
        let view = self.render(&feed, &identity)?;

        cycle.advance(LoadPhase::Done);
        info!(
            identity = %identity.public_key.short(),
            logs = parsed.logs.log_count(),
            rendered = view.records.len(),
            self_authored = view.self_authored(),
            rejected = parsed.rejected.len(),
            "feed loaded"
        );

        Ok(LoadReport {
            phases: cycle.phases,
            view,
            rejected: parsed.rejected,
        })
    }

    /// Publish a post, then reload the feed.
    ///
    /// If the node does not accept the post, the error is shown and the feed
    /// is left alone.
    pub async fn submit_post(&self, body: &str) -> Result<SubmitReport> {
        let mut cycle = Cycle::start(SubmitPhase::Idle);

        cycle.advance(SubmitPhase::Submitting);
        let submitted = timeout(self.config.request_timeout, self.backend.create_post(body))
            .await
            .unwrap_or(Err(feedloom_client::ClientError::Timeout {
                endpoint: feedloom_client::Endpoint::CreatePost,
            }));

        if let Err(e) = submitted {
            cycle.advance(SubmitPhase::Failed);
            let err = FeedError::SubmissionFailed(e);
            warn!(error = %err, "submission failed, not reloading");
            self.surface.show_error(&err)?;
            return Err(err);
        }

        cycle.advance(SubmitPhase::Reloading);
        let reload = self.load().await?;

        Ok(SubmitReport {
            phases: cycle.phases,
            reload,
        })
    }
}
