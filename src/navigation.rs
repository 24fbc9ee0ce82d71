use tracing::{debug, info};

use crate::state::{Direction, NavigationState, TransitionRequest, wrap};

/// Receives accepted requests. The controller calls `run` after it has already
/// marked itself busy, so a runner may never observe an idle controller mid-run.
pub trait TransitionRunner {
    fn run(&mut self, request: TransitionRequest);
}

pub type Listener = Box<dyn FnMut(NavigationState)>;

/// Single writer of the index/busy state machine.
pub struct NavigationController {
    state: NavigationState,
    len: usize,
    pending: Option<TransitionRequest>,
    torn_down: bool,
    listeners: Vec<Listener>,
}

impl NavigationController {
    pub fn new(len: usize) -> Self {
        Self {
            state: NavigationState::default(),
            len,
            pending: None,
            torn_down: false,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn is_busy(&self) -> bool {
        self.state.busy
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn subscribe(&mut self, listener: impl FnMut(NavigationState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns whether the request was accepted. Rejections are silent no-ops.
    pub fn navigate(&mut self, direction: Direction, runner: &mut dyn TransitionRunner) -> bool {
        if self.torn_down || self.len < 2 {
            return false;
        }
        if self.state.busy {
            debug!(?direction, index = self.state.current_index, "navigation rejected, transition in flight");
            return false;
        }

        let request = TransitionRequest {
            from_index: self.state.current_index,
            to_index: wrap(self.state.current_index, direction.step(), self.len),
            direction,
        };

        // Busy before anything else runs
        self.state.busy = true;
        self.pending = Some(request);
        debug!(?request, "navigation accepted");
        self.notify();

        runner.run(request);
        true
    }

    /// Commits a finished transition. Anything but the outstanding request is ignored.
    pub fn commit(&mut self, request: TransitionRequest) -> bool {
        if self.torn_down || self.pending != Some(request) {
            debug!(?request, "stale commit ignored");
            return false;
        }

        self.pending = None;
        self.state = NavigationState {
            current_index: request.to_index,
            busy: false,
        };
        info!(index = request.to_index, "slide committed");
        self.notify();
        true
    }

    /// Drops the outstanding request; nothing is committed from here on.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(request) = self.pending.take() {
            debug!(?request, "in-flight transition cancelled");
        }
        self.listeners.clear();
    }

    fn notify(&mut self) {
        let state = self.state;
        for listener in self.listeners.iter_mut() {
            listener(state);
        }
    }
}
