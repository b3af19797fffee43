//! Alert engine and tracking session
//!
//! [`AlertEngine`] ties the pipeline together: fetch reports, select
//! candidates, run the debounce decision, and invoke the announce
//! capability exactly once per firing decision. [`AlertSession`] runs the
//! engine for the lifetime of one tracking session, processing position
//! updates strictly one at a time.

use crate::alert::announce::Announcer;
use crate::alert::debounce::{self, AnnouncementState, Decision};
use crate::alert::selector;
use crate::config::EngineConfig;
use crate::error::HazardwatchError;
use crate::models::{HazardReport, Position};
use crate::reports::ReportProvider;
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Position updates queued beyond this depth are dropped, newest first.
/// Updates arrive at coarse intervals; a deep queue would only replay
/// stale positions after a slow fetch.
const POSITION_QUEUE_DEPTH: usize = 8;

/// The surrounding application's answer to the platform permission
/// prompts. Both capabilities must be granted before tracking starts.
#[derive(Debug, Clone, Copy)]
pub struct Permissions {
    pub location: bool,
    pub notifications: bool,
}

impl Permissions {
    /// Both capabilities granted
    #[must_use]
    pub fn granted() -> Self {
        Self {
            location: true,
            notifications: true,
        }
    }
}

/// The proximity alerting engine for one tracking session.
///
/// Owns the announcement state exclusively; it is never shared across
/// sessions. A fresh engine starts in the "never announced" state.
pub struct AlertEngine<P, A> {
    provider: P,
    announcer: A,
    config: EngineConfig,
    state: AnnouncementState,
}

impl<P, A> AlertEngine<P, A>
where
    P: ReportProvider,
    A: Announcer,
{
    pub fn new(provider: P, announcer: A, config: EngineConfig) -> Self {
        Self {
            provider,
            announcer,
            config,
            state: AnnouncementState::default(),
        }
    }

    /// Current announcement state (for inspection in tests)
    #[must_use]
    pub fn state(&self) -> &AnnouncementState {
        &self.state
    }

    /// Fetch all reports, tolerating backend unavailability.
    ///
    /// A failed or malformed fetch is logged and treated as "no candidates
    /// this cycle"; it is never propagated to the position-stream caller.
    pub async fn fetch_reports_tolerant(&self) -> Vec<HazardReport> {
        match self.provider.fetch_reports().await {
            Ok(reports) => reports,
            Err(error) => {
                warn!(%error, "report fetch failed, skipping this cycle");
                Vec::new()
            }
        }
    }

    /// Run one evaluation cycle over an already-fetched report list.
    ///
    /// Deterministic in `now`, so the full decision path is unit-testable
    /// without a clock. Returns the announced message when one fired.
    pub fn process(
        &mut self,
        position: &Position,
        reports: Vec<HazardReport>,
        force: bool,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let candidates = selector::nearby_candidates(position, reports, &self.config, now);
        debug!(
            candidates = candidates.len(),
            position = %position.format_coordinates(),
            "evaluating position update"
        );

        match debounce::decide(position, &candidates, &self.state, force, now, &self.config) {
            Decision::Announce { message, report_id } => {
                self.announcer.announce(&message);
                self.state.record(now, *position, report_id);
                info!(alert = %message, "announcement fired");
                Some(message)
            }
            Decision::Suppress => None,
        }
    }

    /// Fetch and evaluate a single position update.
    pub async fn handle_update(&mut self, position: &Position, force: bool) -> Option<String> {
        let reports = self.fetch_reports_tolerant().await;
        self.process(position, reports, force, Utc::now())
    }
}

/// Handle to a running tracking session.
///
/// Position updates submitted through the handle are processed serially by
/// a single task: the fetch for one update completes (or fails) before the
/// next update is evaluated, so two announcements can never fire on
/// overlapping state.
pub struct AlertSession {
    positions: mpsc::Sender<Position>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl AlertSession {
    /// Start tracking with the given engine.
    ///
    /// Fails with `PermissionDenied` when location or notification
    /// permission is absent; the engine performs no tracking until both
    /// are granted.
    pub fn start<P, A>(
        engine: AlertEngine<P, A>,
        permissions: Permissions,
    ) -> crate::Result<Self>
    where
        P: ReportProvider + 'static,
        A: Announcer + 'static,
    {
        if !permissions.location {
            return Err(HazardwatchError::permission_denied("location"));
        }
        if !permissions.notifications {
            return Err(HazardwatchError::permission_denied("notifications"));
        }

        let (positions, mut position_rx) = mpsc::channel::<Position>(POSITION_QUEUE_DEPTH);
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut engine = engine;
            let mut force = true;
            loop {
                let position = tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    maybe_position = position_rx.recv() => {
                        match maybe_position {
                            Some(position) => position,
                            None => break,
                        }
                    }
                };
                // Shutdown must not wait out a slow or hung fetch; dropping
                // the fetch future cancels it.
                let reports = tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    reports = engine.fetch_reports_tolerant() => reports,
                };
                if *shutdown_rx.borrow() {
                    break;
                }
                engine.process(&position, reports, force, Utc::now());
                force = false;
            }
            debug!("tracking session loop ended");
        });

        Ok(Self {
            positions,
            shutdown,
            task,
        })
    }

    /// Submit a position update from the location stream.
    ///
    /// Returns `false` when the update was dropped because evaluation is
    /// still catching up or the session has stopped.
    pub fn submit_position(&self, position: Position) -> bool {
        match self.positions.try_send(position) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("evaluation backlog full, dropping newest position update");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Whether the session loop is still running
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the session and wait for the loop to wind down.
    ///
    /// An in-flight fetch is cancelled; its result never reaches the
    /// debounce state or the announcer.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}
