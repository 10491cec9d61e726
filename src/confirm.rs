//! Two-step delete confirmation
//!
//! Each delete control runs its own small state machine:
//!
//! ```text
//! Idle --press--> Armed --press within window--> Confirmed (delete runs, back to Idle)
//!                   |
//!                   +--window elapses--> Idle
//! ```
//!
//! The caller schedules a timer for every `Press::Armed` and reports it back
//! through [`ConfirmBoard::expire`]. A press that arrives after the window
//! re-arms even if that timer has not fired yet.

use std::collections::HashMap;

use crate::report::ReportId;

pub const IDLE_LABEL: &str = "🗑️";
pub const ARMED_LABEL: &str = "⚠️ Confirm?";

/// Result of pressing a delete control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// First press: schedule `expire(id, generation)` after the window
    Armed { generation: u64 },
    /// Second press inside the window: perform the delete
    Confirmed,
}

/// State of one delete control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    Armed { generation: u64, armed_at_ms: i64 },
}

impl ConfirmState {
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmState::Idle => IDLE_LABEL,
            ConfirmState::Armed { .. } => ARMED_LABEL,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, ConfirmState::Armed { .. })
    }
}

/// Confirmation state for every delete control on the dashboard
#[derive(Debug)]
pub struct ConfirmBoard {
    window_ms: i64,
    armed: HashMap<ReportId, (u64, i64)>,
    next_generation: u64,
}

impl ConfirmBoard {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: window_ms as i64,
            armed: HashMap::new(),
            next_generation: 0,
        }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms as u32
    }

    pub fn state(&self, id: &ReportId) -> ConfirmState {
        match self.armed.get(id) {
            Some(&(generation, armed_at_ms)) => ConfirmState::Armed {
                generation,
                armed_at_ms,
            },
            None => ConfirmState::Idle,
        }
    }

    /// Handle a click on the delete control of `id`
    pub fn press(&mut self, id: &ReportId, now_ms: i64) -> Press {
        if let Some(&(_, armed_at_ms)) = self.armed.get(id) {
            // A clock that went backwards never confirms
            if (0..=self.window_ms).contains(&(now_ms - armed_at_ms)) {
                self.armed.remove(id);
                return Press::Confirmed;
            }
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.armed.insert(id.clone(), (generation, now_ms));
        Press::Armed { generation }
    }

    /// Timer callback: disarm `id` if it is still armed by `generation`
    ///
    /// Returns true if the control went back to idle.
    pub fn expire(&mut self, id: &ReportId, generation: u64) -> bool {
        match self.armed.get(id) {
            Some(&(current, _)) if current == generation => {
                self.armed.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Drop state for reports no longer in the snapshot
    pub fn retain<'a>(&mut self, ids: impl IntoIterator<Item = &'a ReportId>) {
        let keep: std::collections::HashSet<&ReportId> = ids.into_iter().collect();
        self.armed.retain(|id, _| keep.contains(id));
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_press_within_window_confirms() {
        let mut board = ConfirmBoard::new(3000);
        let id = ReportId::from(1);

        assert!(matches!(board.press(&id, 0), Press::Armed { .. }));
        assert_eq!(board.state(&id).label(), ARMED_LABEL);

        assert_eq!(board.press(&id, 2500), Press::Confirmed);
        assert_eq!(board.state(&id), ConfirmState::Idle);
    }

    #[test]
    fn test_timer_reverts_to_idle() {
        let mut board = ConfirmBoard::new(3000);
        let id = ReportId::from(1);

        let Press::Armed { generation } = board.press(&id, 0) else {
            panic!("first press must arm");
        };
        assert!(board.expire(&id, generation));
        assert_eq!(board.state(&id).label(), IDLE_LABEL);

        // A press after expiry only arms again
        assert!(matches!(board.press(&id, 4000), Press::Armed { .. }));
    }

    #[test]
    fn test_late_press_rearms_without_timer() {
        let mut board = ConfirmBoard::new(3000);
        let id = ReportId::from(1);

        board.press(&id, 0);
        assert!(matches!(board.press(&id, 4000), Press::Armed { .. }));
        assert!(board.state(&id).is_armed());
    }

    #[test]
    fn test_backwards_clock_rearms() {
        let mut board = ConfirmBoard::new(3000);
        let id = ReportId::from(1);

        board.press(&id, 10_000);
        assert!(matches!(board.press(&id, -1_000_000), Press::Armed { .. }));
        assert!(matches!(board.press(&id, 9_999), Press::Armed { .. }));
        assert!(board.state(&id).is_armed());
    }

    #[test]
    fn test_stale_timer_ignored() {
        let mut board = ConfirmBoard::new(3000);
        let id = ReportId::from(1);

        let Press::Armed { generation: first } = board.press(&id, 0) else {
            panic!("first press must arm");
        };
        // Re-armed after the window; the first timer must not disarm it
        let Press::Armed { generation: second } = board.press(&id, 5000) else {
            panic!("late press must re-arm");
        };
        assert!(!board.expire(&id, first));
        assert!(board.state(&id).is_armed());
        assert!(board.expire(&id, second));
    }

    #[test]
    fn test_controls_are_independent() {
        let mut board = ConfirmBoard::new(3000);
        let a = ReportId::from(1);
        let b = ReportId::from(2);

        let Press::Armed { generation: gen_a } = board.press(&a, 0) else {
            panic!("must arm");
        };
        board.press(&b, 100);
        assert_eq!(board.armed_count(), 2);

        board.expire(&a, gen_a);
        assert!(!board.state(&a).is_armed());
        assert_eq!(board.press(&b, 200), Press::Confirmed);
    }

    #[test]
    fn test_retain_drops_deleted_reports() {
        let mut board = ConfirmBoard::new(3000);
        let a = ReportId::from(1);
        let b = ReportId::from(2);
        board.press(&a, 0);
        board.press(&b, 0);

        board.retain([&b]);
        assert!(!board.state(&a).is_armed());
        assert!(board.state(&b).is_armed());
    }
}
