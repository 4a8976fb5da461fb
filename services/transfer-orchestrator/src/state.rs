use pix_types::report::ScamCatalog;
use pix_types::score::SecurityScore;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tokio::sync::OnceCell;

/// Session state shared by the transfer and report flows
#[derive(Debug)]
pub struct AppState {
    security_score: AtomicU8,
    transfer_in_flight: AtomicBool,
    pub(crate) scam_catalog: OnceCell<ScamCatalog>,
}

impl AppState {
    pub fn new(initial_score: SecurityScore) -> Self {
        Self {
            security_score: AtomicU8::new(initial_score.value()),
            transfer_in_flight: AtomicBool::new(false),
            scam_catalog: OnceCell::new(),
        }
    }

    pub fn security_score(&self) -> SecurityScore {
        SecurityScore::new(self.security_score.load(Ordering::SeqCst) as i64)
    }

    pub fn set_security_score(&self, score: SecurityScore) {
        self.security_score.store(score.value(), Ordering::SeqCst);
    }

    /// Remove `points` from the score, floored at zero. Returns the new score.
    pub fn apply_report_penalty(&self, points: u8) -> SecurityScore {
        let previous = self
            .security_score
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(points))
            })
            .unwrap_or_else(|v| v);
        SecurityScore::new(previous.saturating_sub(points) as i64)
    }

    /// Claim the single transfer slot. `None` while another transfer runs.
    pub fn try_begin_transfer(&self) -> Option<InFlightGuard<'_>> {
        self.transfer_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { state: self })
    }

    pub fn transfer_in_flight(&self) -> bool {
        self.transfer_in_flight.load(Ordering::Acquire)
    }

    /// Catalog if it has already been loaded
    pub fn cached_catalog(&self) -> Option<&ScamCatalog> {
        self.scam_catalog.get()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SecurityScore::default())
    }
}

/// Releases the transfer slot on drop
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    state: &'a AppState,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.transfer_in_flight.store(false, Ordering::Release);
    }
}
