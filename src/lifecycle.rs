/// Shared UI state and the load/retry/poll bookkeeping around it
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use yew::functional::Reducible;

use crate::record::ExtractionRecord;

/// Progress of the on-mount load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    NotStarted,
    Loading,
    Succeeded,
    Exhausted,
}

/// What the header badge knows about the backend
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Online { version: String },
    Offline,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    pub records: Vec<ExtractionRecord>,
    pub is_submitting: bool,
    pub initial_load: LoadPhase,
    pub error: Option<String>,
    pub success_message: Option<String>,
    pub backend: BackendStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    InitialLoadStarted,
    InitialLoadFinished { succeeded: bool },
    RecordsLoaded(Vec<ExtractionRecord>),
    LoadFailed(String),
    SubmitStarted,
    SubmitSucceeded(String),
    SubmitFailed(String),
    SubmitFinished,
    Dismiss,
    BackendChecked(BackendStatus),
}

impl UiState {
    /// The table shows its loading placeholder until the first load settles
    pub fn is_initial_loading(&self) -> bool {
        matches!(self.initial_load, LoadPhase::NotStarted | LoadPhase::Loading)
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::InitialLoadStarted => {
                self.initial_load = LoadPhase::Loading;
            }
            Action::InitialLoadFinished { succeeded } => {
                self.initial_load = if succeeded {
                    LoadPhase::Succeeded
                } else {
                    LoadPhase::Exhausted
                };
            }
            Action::RecordsLoaded(records) => {
                // The server's list is authoritative; no merge
                self.records = records;
                self.error = None;
            }
            Action::LoadFailed(message) | Action::SubmitFailed(message) => {
                self.error = Some(message);
            }
            Action::SubmitStarted => {
                self.is_submitting = true;
                self.error = None;
                self.success_message = None;
            }
            Action::SubmitSucceeded(message) => {
                self.success_message = Some(message);
            }
            Action::SubmitFinished => {
                self.is_submitting = false;
            }
            Action::Dismiss => {
                self.error = None;
                self.success_message = None;
            }
            Action::BackendChecked(status) => {
                self.backend = status;
            }
        }
    }
}

impl Reducible for UiState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Exponential backoff for the on-mount load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            base_delay_ms: 1_000,
        }
    }
}

impl RetryPolicy {
    /// Delay after the failed 0-indexed `attempt`, or `None` when it was the last one
    pub fn backoff_after(&self, attempt: u32) -> Option<u32> {
        if attempt.saturating_add(1) >= self.max_attempts {
            return None;
        }
        Some(
            self.base_delay_ms
                .saturating_mul(2u32.saturating_pow(attempt)),
        )
    }
}

/// Run `attempt` until it succeeds, the policy is exhausted, or `cancel` is set
///
/// `sleep` is handed each backoff delay in milliseconds. The last error is
/// returned when no attempt succeeds.
pub async fn load_with_retry<T, E, F, Fut, S, SFut>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut attempt: F,
    mut sleep: S,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    S: FnMut(u32) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut index = 0;
    loop {
        let err = match attempt(index).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let Some(delay) = policy.backoff_after(index) else {
            return Err(err);
        };

        log::info!("Load attempt {} failed, retrying in {}ms", index + 1, delay);
        sleep(delay).await;

        if cancel.is_cancelled() {
            return Err(err);
        }
        index += 1;
    }
}

/// Set once when the owning component is torn down
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Orders fetch results: one older than an already-applied result is dropped
///
/// Results may land out of order when a response takes longer than the poll
/// interval; any result newer than the last applied one still writes state.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    issued: Cell<u64>,
    applied: Cell<u64>,
    applied_ok: Cell<bool>,
}

impl FetchSequencer {
    pub fn issue(&self) -> FetchTicket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        FetchTicket(next)
    }

    /// Claim the state for `ticket`; false when a newer result already landed
    pub fn try_apply(&self, ticket: FetchTicket, succeeded: bool) -> bool {
        if ticket.0 <= self.applied.get() {
            return false;
        }
        self.applied.set(ticket.0);
        self.applied_ok.set(succeeded);
        true
    }

    /// Whether the result currently shown came from a successful fetch
    pub fn last_applied_ok(&self) -> bool {
        self.applied.get() > 0 && self.applied_ok.get()
    }
}
