//! Pending-message queue and readiness gate.
//!
//! The page's script runtime initializes asynchronously after navigation
//! completes, so messages sent right after "load finished" can be missed.
//! The gate buffers host→page messages until the page is both loaded and has
//! signaled readiness, then flushes them in insertion order, exactly once.
//!
//! Every navigation carries a sequence number. Completion and readiness
//! reports from an earlier navigation (a slow prior load finishing after a
//! re-navigation) carry a stale sequence and are ignored, so they cannot
//! corrupt the state of the newer navigation.

use std::collections::VecDeque;

/// Identifies one navigation. Obtained from [`DeliveryGate::begin_navigation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavSeq(pub u64);

/// Where the current navigation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No navigation in flight and the last one did not succeed.
    NotLoaded,
    /// A navigation has been issued; neither completion nor readiness yet.
    Loading,
    /// The load succeeded but the page script has not reported in.
    LoadedAwaitingScript,
    /// Loaded and the page script is ready: messages deliver immediately.
    Ready,
}

/// Readiness gate plus pending host→page message queue.
#[derive(Debug)]
pub struct DeliveryGate {
    phase: LoadPhase,
    seq: u64,
    load_succeeded: bool,
    page_ready: bool,
    pending: VecDeque<String>,
}

impl DeliveryGate {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::NotLoaded,
            seq: 0,
            load_succeeded: false,
            page_ready: false,
            pending: VecDeque::new(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn current_seq(&self) -> NavSeq {
        NavSeq(self.seq)
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Start a new navigation. Readiness is discarded; the pending queue is
    /// NOT: messages enqueued before a reload stay queued for the next
    /// successful load.
    pub fn begin_navigation(&mut self) -> NavSeq {
        self.seq += 1;
        self.phase = LoadPhase::Loading;
        self.load_succeeded = false;
        self.page_ready = false;
        NavSeq(self.seq)
    }

    /// Report navigation completion. Stale sequences are ignored.
    ///
    /// Returns the messages to deliver now, in insertion order (empty unless
    /// this report completes the readiness handshake).
    pub fn load_finished(&mut self, seq: NavSeq, ok: bool) -> Vec<String> {
        if seq.0 != self.seq {
            tracing::debug!(
                reported = seq.0,
                current = self.seq,
                "ignoring load-finished from a stale navigation"
            );
            return Vec::new();
        }
        self.load_succeeded = ok;
        if !ok {
            self.phase = LoadPhase::NotLoaded;
            return Vec::new();
        }
        if self.page_ready {
            self.enter_ready()
        } else {
            self.phase = LoadPhase::LoadedAwaitingScript;
            Vec::new()
        }
    }

    /// Report the page-ready handshake. Stale sequences are ignored.
    ///
    /// Ready may arrive before or after load completion; both orders reach
    /// [`LoadPhase::Ready`]. A repeated report in `Ready` finds the queue
    /// already empty and is a no-op.
    pub fn page_ready(&mut self, seq: NavSeq) -> Vec<String> {
        if seq.0 != self.seq {
            tracing::debug!(
                reported = seq.0,
                current = self.seq,
                "ignoring page-ready from a stale navigation"
            );
            return Vec::new();
        }
        self.page_ready = true;
        if self.load_succeeded {
            self.enter_ready()
        } else {
            Vec::new()
        }
    }

    /// Route a host→page message: `Some` means deliver immediately, `None`
    /// means it was queued for the next ready transition.
    pub fn send(&mut self, payload: impl Into<String>) -> Option<String> {
        let payload = payload.into();
        if self.phase == LoadPhase::Ready {
            Some(payload)
        } else {
            self.pending.push_back(payload);
            None
        }
    }

    fn enter_ready(&mut self) -> Vec<String> {
        self.phase = LoadPhase::Ready;
        self.pending.drain(..).collect()
    }
}

impl Default for DeliveryGate {
    fn default() -> Self {
        Self::new()
    }
}
