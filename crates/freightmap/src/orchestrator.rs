//! Request sequencing between the UI and the route source.
//!
//! Every submitted query gets an increasing [`RequestId`]. Only the response to
//! the most recently issued request is committed; older responses are dropped
//! when they arrive, whatever order they resolve in. A commit replaces the whole
//! [`ViewModel`], so fields from two responses never mix.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::client::{FetchError, RouteQuery, RouteSource};
use crate::model::RawRouteResponse;
use crate::normalize::{EndpointSelection, ViewModel, normalize};

pub type RequestId = u64;

type Waker = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading { request: RequestId },
    Success,
    Failed { message: String },
}

struct Completion {
    id: RequestId,
    result: Result<RawRouteResponse, FetchError>,
}

pub struct FetchOrchestrator {
    source: Arc<dyn RouteSource>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    latest: RequestId,
    state: FetchState,
    view: ViewModel,
    selection: EndpointSelection,
    /// Bumped on every commit so derived state knows to rebuild.
    revision: u64,
    alive: Arc<AtomicBool>,
    waker: Option<Waker>,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn RouteSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            latest: 0,
            state: FetchState::Idle,
            view: ViewModel::default(),
            selection: EndpointSelection::default(),
            revision: 0,
            alive: Arc::new(AtomicBool::new(true)),
            waker: None,
        }
    }

    /// Called from the worker thread after a response is queued.
    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn with_selection(mut self, selection: EndpointSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading { .. })
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn selection(&self) -> &EndpointSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut EndpointSelection {
        &mut self.selection
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// The error message, if the last committed request failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Dismiss a displayed error.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FetchState::Failed { .. }) {
            self.state = FetchState::Idle;
        }
    }

    /// Issue a new request id and enter `Loading`. Any earlier request becomes
    /// stale.
    pub fn begin(&mut self) -> RequestId {
        self.latest += 1;
        self.state = FetchState::Loading {
            request: self.latest,
        };
        self.latest
    }

    /// Run `query` against the source on a worker thread.
    pub fn submit(&mut self, query: RouteQuery) -> RequestId {
        let id = self.begin();
        debug!(id, ?query, "submitting route request");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let alive = Arc::clone(&self.alive);
        let waker = self.waker.clone();

        std::thread::spawn(move || {
            let result = source.fetch(&query);
            deliver(&alive, &tx, Completion { id, result }, waker.as_ref());
        });

        id
    }

    /// Commit every completed response without blocking. Returns whether the
    /// view model changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.commit(completion.id, completion.result);
        }
        changed
    }

    /// Block until the latest request is committed or `timeout` elapses.
    /// Returns false on timeout.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.commit(completion.id, completion.result);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false;
                }
            }
        }
        true
    }

    /// Apply the outcome of request `id`. Stale or already-settled requests
    /// are ignored. Returns whether the view model changed.
    pub fn commit(
        &mut self,
        id: RequestId,
        result: Result<RawRouteResponse, FetchError>,
    ) -> bool {
        if self.state != (FetchState::Loading { request: id }) {
            debug!(id, latest = self.latest, "discarding stale route response");
            return false;
        }

        match result {
            Ok(raw) => {
                self.view = normalize(raw);
                let known: Vec<&str> = self.view.location_ids().collect();
                self.selection.retain_known(known.iter().copied());
                if self.selection.seed_from_path(self.view.path()) {
                    debug!(selection = ?self.selection, "seeded endpoints from route");
                }
                self.state = FetchState::Success;
            }
            Err(err) => {
                debug!(id, error = %err, "route request failed");
                self.view.clear_route();
                self.state = FetchState::Failed {
                    message: err.to_string(),
                };
            }
        }
        self.revision += 1;
        true
    }
}

/// Queue a finished request for the owner and wake it. Nothing is sent once
/// the owner has been dropped. Returns whether the completion was queued.
fn deliver(
    alive: &AtomicBool,
    tx: &Sender<Completion>,
    completion: Completion,
    waker: Option<&Waker>,
) -> bool {
    if !alive.load(Ordering::Acquire) {
        debug!(id = completion.id, "orchestrator gone, dropping response");
        return false;
    }
    if tx.send(completion).is_err() {
        return false;
    }
    if let Some(wake) = waker {
        wake();
    }
    true
}

impl Drop for FetchOrchestrator {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}
