//! Job poller
//!
//! Polls the backend for the status of one job until it settles.
//! Every `start` opens a new session with its own task. A session only
//! writes to the published state while it is still the current one, so a
//! request that was in flight when the watch moved on cannot leak its
//! result into the new session.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vidmeta_client::{JobFetcher, TokenProvider};
use vidmeta_core::validation::is_valid_job_id;

use crate::config::PollConfig;
use crate::scheduler::backoff::Backoff;
use crate::state::{PollError, PollState};

/// Job poller that watches one job at a time
///
/// Independent pollers share nothing, so a front end can watch a freshly
/// submitted job and a historical one side by side.
pub struct JobPoller {
    config: PollConfig,
    fetcher: Arc<dyn JobFetcher>,
    tokens: Arc<dyn TokenProvider>,
    state: Arc<watch::Sender<PollState>>,
    session: u64,
    task: Option<JoinHandle<()>>,
}

impl JobPoller {
    /// Creates a new, idle job poller
    pub fn new(
        config: PollConfig,
        fetcher: Arc<dyn JobFetcher>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        let (state, _) = watch::channel(PollState::default());
        Self {
            config,
            fetcher,
            tokens,
            state: Arc::new(state),
            session: 0,
            task: None,
        }
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// Latest published state
    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// True while the current session is still polling
    pub fn is_polling(&self) -> bool {
        self.state.borrow().polling
    }

    /// Start watching `job_id`, replacing any previous watch
    ///
    /// Empty, malformed and all-zero ids never reach the network: the poller
    /// publishes an empty, idle state and returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, job_id: &str) {
        self.cancel();
        self.session += 1;

        if !is_valid_job_id(job_id) {
            debug!("Not polling invalid job id {:?}", job_id);
            self.state.send_replace(PollState::idle(self.session));
            return;
        }

        info!(
            "Watching job {} (initial delay: {:?}, max delay: {:?})",
            job_id, self.config.initial_delay, self.config.max_delay
        );
        self.state
            .send_replace(PollState::started(self.session, job_id));

        let session = Session {
            id: self.session,
            job_id: job_id.to_string(),
            config: self.config.clone(),
            fetcher: Arc::clone(&self.fetcher),
            tokens: Arc::clone(&self.tokens),
            state: Arc::clone(&self.state),
        };
        self.task = Some(tokio::spawn(session.run()));
    }

    /// Stop the current watch
    ///
    /// Any scheduled fetch is dropped and an in-flight one is discarded.
    /// The last record and error stay visible.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let session = self.session;
        let stopped = self.state.send_if_modified(|state| {
            if state.session != session || !state.polling {
                return false;
            }
            state.polling = false;
            state.next_delay = None;
            true
        });
        if stopped {
            debug!("Cancelled poll session {}", session);
        }
    }

    /// Wait until the current session stops polling and return its final state
    pub async fn wait_until_idle(&self) -> PollState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.polling).await {
            Ok(state) => (*state).clone(),
            Err(_) => self.state(),
        }
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One watch of one job
struct Session {
    id: u64,
    job_id: String,
    config: PollConfig,
    fetcher: Arc<dyn JobFetcher>,
    tokens: Arc<dyn TokenProvider>,
    state: Arc<watch::Sender<PollState>>,
}

impl Session {
    fn is_current(&self, state: &PollState) -> bool {
        state.session == self.id && state.polling
    }

    /// Apply `update` only if this session is still the current one
    ///
    /// The check and the write happen under the channel's write lock, so a
    /// concurrent `start` or `cancel` is either fully before or fully after.
    fn apply(&self, update: impl FnOnce(&mut PollState)) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(state) {
                return false;
            }
            update(state);
            true
        })
    }

    async fn run(self) {
        let mut backoff = Backoff::new(&self.config);
        let mut consecutive_errors: u32 = 0;

        loop {
            let current = self.is_current(&self.state.borrow());
            if !current {
                debug!("Poll session {} for job {} superseded", self.id, self.job_id);
                return;
            }

            let token = self.tokens.token().await;
            let outcome = self
                .fetcher
                .fetch_job(&self.job_id, token.as_deref())
                .await;

            let stop = match outcome {
                Ok(job) => {
                    consecutive_errors = 0;
                    let finished = job.is_finished();
                    let status = job.status.clone();

                    let applied = self.apply(|state| {
                        state.job = Some(job);
                        state.error = None;
                        state.attempts += 1;
                        state.consecutive_errors = 0;
                        if finished {
                            state.polling = false;
                            state.next_delay = None;
                        }
                    });
                    if !applied {
                        debug!("Discarding stale result for job {}", self.job_id);
                        return;
                    }

                    if finished {
                        info!("Job {} settled with status {}", self.job_id, status);
                    } else {
                        debug!("Job {} is {}", self.job_id, status);
                    }
                    finished
                }
                Err(err) => {
                    consecutive_errors += 1;
                    let error = PollError::from(&err);
                    let fatal = error.is_fatal()
                        || consecutive_errors >= self.config.max_consecutive_errors;

                    let applied = self.apply(|state| {
                        state.error = Some(error);
                        state.attempts += 1;
                        state.consecutive_errors = consecutive_errors;
                        if fatal {
                            state.polling = false;
                            state.next_delay = None;
                        }
                    });
                    if !applied {
                        debug!("Discarding stale error for job {}", self.job_id);
                        return;
                    }

                    if fatal {
                        warn!(
                            "Stopped polling job {} after {} consecutive error(s): {}",
                            self.job_id, consecutive_errors, err
                        );
                    } else {
                        debug!(
                            "Fetch for job {} failed ({}/{}): {}",
                            self.job_id, consecutive_errors, self.config.max_consecutive_errors, err
                        );
                    }
                    fatal
                }
            };

            if stop {
                return;
            }

            let delay = backoff.advance();
            if !self.apply(|state| state.next_delay = Some(delay)) {
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }
}
