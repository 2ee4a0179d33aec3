/// Drives loads, polls and submissions against the extraction API
///
/// Every async chain shares one `CancelToken` and one `FetchSequencer`:
/// nothing is dispatched after teardown, and a fetch result is dropped when a
/// newer one has already been applied.
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;

use crate::api::ExtractionApi;
use crate::display::success_message;
use crate::error::ApiError;
use crate::lifecycle::{
    load_with_retry, Action, BackendStatus, CancelToken, FetchSequencer, RetryPolicy,
};

enum Fetched {
    Applied(Result<(), ApiError>),
    Superseded,
}

#[derive(Debug)]
enum AttemptFailure {
    Failed(ApiError),
    Superseded,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Failed(err) => write!(f, "{}", err),
            AttemptFailure::Superseded => f.write_str("overtaken by a newer failed fetch"),
        }
    }
}

/// Trimmed URL if it is worth sending
pub fn submission_url(raw: &str) -> Option<&str> {
    let url = raw.trim();
    (!url.is_empty()).then_some(url)
}

pub struct Coordinator<A> {
    api: Rc<A>,
    sink: Rc<dyn Fn(Action)>,
    sequencer: Rc<FetchSequencer>,
    cancel: CancelToken,
    submitting: Rc<Cell<bool>>,
    retry: RetryPolicy,
}

impl<A> Clone for Coordinator<A> {
    fn clone(&self) -> Self {
        Coordinator {
            api: self.api.clone(),
            sink: self.sink.clone(),
            sequencer: self.sequencer.clone(),
            cancel: self.cancel.clone(),
            submitting: self.submitting.clone(),
            retry: self.retry,
        }
    }
}

impl<A: ExtractionApi> Coordinator<A> {
    pub fn new(api: A, retry: RetryPolicy, dispatch: impl Fn(Action) + 'static) -> Self {
        Coordinator {
            api: Rc::new(api),
            sink: Rc::new(dispatch),
            sequencer: Rc::new(FetchSequencer::default()),
            cancel: CancelToken::new(),
            submitting: Rc::new(Cell::new(false)),
            retry,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Stop all further state updates; called on unmount
    pub fn shutdown(&self) {
        log::debug!("Coordinator shut down");
        self.cancel.cancel();
    }

    fn dispatch(&self, action: Action) -> bool {
        if self.cancel.is_cancelled() {
            log::debug!("Dropping {:?} after teardown", action);
            return false;
        }
        (self.sink)(action);
        true
    }

    async fn fetch_once(&self) -> Fetched {
        let ticket = self.sequencer.issue();
        let result = self.api.fetch_records().await;

        if !self.sequencer.try_apply(ticket, result.is_ok()) {
            log::debug!("Discarding stale fetch result {:?}", ticket);
            return Fetched::Superseded;
        }

        match result {
            Ok(records) => {
                self.dispatch(Action::RecordsLoaded(records));
                Fetched::Applied(Ok(()))
            }
            Err(err) => {
                log::warn!("Error fetching data: {}", err);
                self.dispatch(Action::LoadFailed(err.load_message()));
                Fetched::Applied(Err(err))
            }
        }
    }

    /// Fetch the record list once, without touching the loading indicator
    ///
    /// Returns the failure so callers can decide whether to retry; the error
    /// banner has already been updated by then. A result overtaken by a newer
    /// one is dropped and reported as `Ok`.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        match self.fetch_once().await {
            Fetched::Applied(result) => result,
            Fetched::Superseded => Ok(()),
        }
    }

    // A superseded attempt takes the outcome of the result actually shown
    async fn load_attempt(&self) -> Result<(), AttemptFailure> {
        match self.fetch_once().await {
            Fetched::Applied(result) => result.map_err(AttemptFailure::Failed),
            Fetched::Superseded if self.sequencer.last_applied_ok() => Ok(()),
            Fetched::Superseded => Err(AttemptFailure::Superseded),
        }
    }

    /// On-mount load with exponential backoff; the loading flag always clears
    pub async fn initial_load<S, SFut>(&self, sleep: S)
    where
        S: FnMut(u32) -> SFut,
        SFut: Future<Output = ()>,
    {
        if !self.dispatch(Action::InitialLoadStarted) {
            return;
        }

        let outcome =
            load_with_retry(&self.retry, &self.cancel, move |_| self.load_attempt(), sleep).await;
        if let Err(err) = &outcome {
            log::warn!("Initial load gave up: {}", err);
        }

        self.dispatch(Action::InitialLoadFinished {
            succeeded: outcome.is_ok(),
        });
    }

    /// Send `raw_url` for extraction, then refresh the list silently
    ///
    /// Blank input and a second submit while one is in flight are ignored
    /// without any network call.
    pub async fn submit(&self, raw_url: &str) {
        let Some(url) = submission_url(raw_url) else {
            return;
        };
        if self.submitting.replace(true) {
            log::debug!("Extraction already in flight, ignoring {}", url);
            return;
        }

        if self.dispatch(Action::SubmitStarted) {
            match self.api.submit_extraction(url).await {
                Ok(_) => {
                    log::info!("Extracted {}", url);
                    if self.dispatch(Action::SubmitSucceeded(success_message(url))) {
                        // A failed refresh has already surfaced its own error
                        let _ = self.refresh().await;
                    }
                }
                Err(err) => {
                    log::warn!("Extraction error: {}", err);
                    self.dispatch(Action::SubmitFailed(err.extract_message()));
                }
            }
            self.dispatch(Action::SubmitFinished);
        }

        self.submitting.set(false);
    }

    /// Probe `GET /` for the header badge; failures never reach the error banner
    pub async fn check_backend(&self) {
        let status = match self.api.health().await {
            Ok(health) => BackendStatus::Online {
                version: health.version,
            },
            Err(err) => {
                log::warn!("Health check failed: {}", err);
                BackendStatus::Offline
            }
        };
        self.dispatch(Action::BackendChecked(status));
    }

    pub fn dismiss(&self) {
        self.dispatch(Action::Dismiss);
    }
}

impl<A: ExtractionApi + 'static> Coordinator<A> {
    /// Silent refresh every `interval_ms`; dropping the returned handle stops it
    pub fn start_polling(&self, interval_ms: u32) -> Interval {
        let poller = self.clone();
        Interval::new(interval_ms, move || {
            if poller.cancel.is_cancelled() {
                return;
            }
            let poller = poller.clone();
            spawn_local(async move {
                // Not retried; the next tick supersedes a failure
                let _ = poller.refresh().await;
            });
        })
    }
}
