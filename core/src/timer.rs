use crate::constants::TICK_MS;

/// Periodic one-second tick source for the active round.
///
/// The core never reads a wall clock: the host reports elapsed milliseconds
/// through [`RoundTimer::advance`] and gets back the number of ticks that
/// became due. Arming starts a fresh period; cancelling drops any partial one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundTimer {
    armed: bool,
    carry_ms: u64,
}

impl RoundTimer {
    pub fn arm(&mut self) {
        self.armed = true;
        self.carry_ms = 0;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.carry_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds accumulated toward the next tick
    pub fn pending_ms(&self) -> u64 {
        self.carry_ms
    }

    /// Feed elapsed time; returns how many ticks are due.
    pub fn advance(&mut self, elapsed_ms: u64) -> u32 {
        if !self.armed {
            return 0;
        }
        let total = self.carry_ms.saturating_add(elapsed_ms);
        self.carry_ms = total % TICK_MS;
        u32::try_from(total / TICK_MS).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timer_never_ticks() {
        let mut t = RoundTimer::default();
        assert_eq!(t.advance(10_000), 0);
        assert!(!t.is_armed());
    }

    #[test]
    fn partial_periods_carry_over() {
        let mut t = RoundTimer::default();
        t.arm();
        assert_eq!(t.advance(400), 0);
        assert_eq!(t.advance(700), 1);
        assert_eq!(t.pending_ms(), 100);
        assert_eq!(t.advance(2_900), 3);
        assert_eq!(t.pending_ms(), 0);
    }

    #[test]
    fn cancel_drops_partial_period() {
        let mut t = RoundTimer::default();
        t.arm();
        t.advance(900);
        t.cancel();
        assert_eq!(t.advance(5_000), 0);
        t.arm();
        assert_eq!(t.advance(200), 0);
        assert_eq!(t.advance(800), 1);
    }
}
