//! Single in-flight page request gate.
//!
//! Every page request has to be admitted here first. While a request is in
//! flight, or during the optional cooldown that follows it, further load
//! signals are refused without touching the network.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

/// Scroll threshold used by the infinite scroll component.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 0.8;

/// Identifies one admitted page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Coordinator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No request in flight.
    #[default]
    Idle,
    /// One request in flight.
    Fetching(FetchTicket),
    /// Request finished; new ones are refused until the deadline.
    Cooldown {
        /// End of the cooldown window.
        until: Instant,
    },
}

/// Answer to a load signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Go ahead and request a page.
    Admitted(FetchTicket),
    /// A request is already in flight.
    Busy,
    /// The previous request finished too recently.
    CoolingDown,
    /// The scroll position is not close enough to the end.
    NotNeeded,
}

impl Admission {
    #[must_use]
    pub const fn ticket(self) -> Option<FetchTicket> {
        match self {
            Self::Admitted(ticket) => Some(ticket),
            _ => None,
        }
    }
}

/// Viewport signal from the rendering layer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Visible height.
    pub viewport: f64,
    /// Total height of the rendered feed.
    pub content: f64,
}

impl ScrollPosition {
    #[must_use]
    pub const fn new(offset: f64, viewport: f64, content: f64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Returns true once the bottom of the viewport reaches
    /// `threshold` of the content height.
    #[must_use]
    pub fn reached(&self, threshold: f64) -> bool {
        if self.content <= 0.0 {
            return true;
        }
        self.offset + self.viewport >= self.content * threshold
    }
}

/// Backpressure state machine for page requests.
#[derive(Debug, Clone)]
pub struct FetchCoordinator {
    phase: FetchPhase,
    next_ticket: u64,
    cooldown: Duration,
    scroll_threshold: f64,
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        Self::new(Duration::ZERO, DEFAULT_SCROLL_THRESHOLD)
    }
}

impl FetchCoordinator {
    /// Creates coordinator. A zero `cooldown` disables the cooldown state.
    #[must_use]
    pub fn new(cooldown: Duration, scroll_threshold: f64) -> Self {
        Self {
            phase: FetchPhase::Idle,
            next_ticket: 0,
            cooldown,
            scroll_threshold: scroll_threshold.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        matches!(self.phase, FetchPhase::Fetching(_))
    }

    /// The random endpoint never runs dry, so there is always another page.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        true
    }

    /// Handles a mount or "load more" signal.
    pub fn try_begin(&mut self, now: Instant) -> Admission {
        match self.phase {
            FetchPhase::Fetching(ticket) => {
                trace!(ticket = ticket.0, "Load signal ignored, request in flight");
                Admission::Busy
            }
            FetchPhase::Cooldown { until } if now < until => {
                trace!("Load signal ignored, cooling down");
                Admission::CoolingDown
            }
            FetchPhase::Idle | FetchPhase::Cooldown { .. } => {
                let ticket = FetchTicket(self.next_ticket);
                self.next_ticket += 1;
                self.phase = FetchPhase::Fetching(ticket);
                debug!(ticket = ticket.0, "Page request admitted");
                Admission::Admitted(ticket)
            }
        }
    }

    /// Handles a scroll signal, admitting a request near the end of the feed.
    pub fn on_scroll(&mut self, position: ScrollPosition, now: Instant) -> Admission {
        if !self.has_more() || !position.reached(self.scroll_threshold) {
            return Admission::NotNeeded;
        }
        self.try_begin(now)
    }

    /// Marks the request identified by `ticket` as finished, whether it
    /// succeeded or failed.
    ///
    /// Returns false for a ticket that is not the one in flight; its result
    /// must be dropped.
    pub fn finish(&mut self, ticket: FetchTicket, now: Instant) -> bool {
        if self.phase != FetchPhase::Fetching(ticket) {
            debug!(ticket = ticket.0, "Ignoring stale page completion");
            return false;
        }

        self.phase = if self.cooldown.is_zero() {
            FetchPhase::Idle
        } else {
            FetchPhase::Cooldown {
                until: now + self.cooldown,
            }
        };
        true
    }
}
