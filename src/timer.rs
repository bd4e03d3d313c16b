use std::sync::Arc;

use tracing::trace;

use crate::channel::{Channel, Side, SimTime};

/// Single-shot retransmission countdown for one entity.
///
/// The actual expiry event is owned by the scheduler; this type tracks
///  whether an expiry is currently armed and translates protocol decisions
///  into arm/cancel calls on the [`Channel`] seam. It carries no duration
///  state of its own - every (re)start is given a fresh timeout.
pub struct RetransmissionTimer {
    side: Side,
    scheduler: Arc<dyn Channel>,
    running: bool,
}

impl RetransmissionTimer {
    pub fn new(side: Side, scheduler: Arc<dyn Channel>) -> RetransmissionTimer {
        RetransmissionTimer {
            side,
            scheduler,
            running: false,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Arms an expiry `delay` time units from now. Only valid while stopped.
    pub fn start(&mut self, delay: SimTime) {
        debug_assert!(!self.running, "timer on side {} started while running", self.side);

        trace!("arming timer on side {} for {} time units", self.side, delay);
        self.scheduler.arm_timer(self.side, delay);
        self.running = true;
    }

    /// Stop-then-start, valid in any state. Always leaves the timer running.
    pub fn restart(&mut self, delay: SimTime) {
        if self.running {
            self.stop();
        }
        self.start(delay);
    }

    /// Cancels the pending expiry, if any. Idempotent.
    pub fn stop(&mut self) {
        if self.running {
            trace!("cancelling timer on side {}", self.side);
            self.scheduler.cancel_timer(self.side);
            self.running = false;
        }
    }

    /// Records that the armed expiry has fired. The scheduler no longer holds
    ///  a pending event, so this transitions to stopped without a cancel
    ///  call; the owning entity decides whether to re-arm.
    pub fn mark_expired(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use mockall::Sequence;

    use crate::channel::MockChannel;

    #[test]
    fn test_start_arms_scheduler() {
        let mut scheduler = MockChannel::new();
        scheduler.expect_arm_timer()
            .once()
            .with(eq(Side::A), eq(75.0))
            .return_const(());

        let mut timer = RetransmissionTimer::new(Side::A, Arc::new(scheduler));
        assert!(!timer.running());

        timer.start(75.0);
        assert!(timer.running());
    }

    #[test]
    fn test_stop_cancels_once() {
        let mut scheduler = MockChannel::new();
        scheduler.expect_arm_timer().once().return_const(());
        scheduler.expect_cancel_timer()
            .once()
            .with(eq(Side::B))
            .return_const(());

        let mut timer = RetransmissionTimer::new(Side::B, Arc::new(scheduler));
        timer.start(10.0);

        timer.stop();
        assert!(!timer.running());

        // idempotent: no second cancel call reaches the scheduler
        timer.stop();
        assert!(!timer.running());
    }

    #[test]
    fn test_restart_while_running_cancels_then_arms() {
        let mut scheduler = MockChannel::new();
        let mut seq = Sequence::new();
        scheduler.expect_arm_timer()
            .once()
            .with(eq(Side::A), eq(30.0))
            .in_sequence(&mut seq)
            .return_const(());
        scheduler.expect_cancel_timer()
            .once()
            .with(eq(Side::A))
            .in_sequence(&mut seq)
            .return_const(());
        scheduler.expect_arm_timer()
            .once()
            .with(eq(Side::A), eq(45.0))
            .in_sequence(&mut seq)
            .return_const(());

        let mut timer = RetransmissionTimer::new(Side::A, Arc::new(scheduler));
        timer.start(30.0);
        timer.restart(45.0);
        assert!(timer.running());
    }

    #[test]
    fn test_restart_while_stopped_skips_cancel() {
        let mut scheduler = MockChannel::new();
        scheduler.expect_arm_timer()
            .once()
            .with(eq(Side::A), eq(20.0))
            .return_const(());

        let mut timer = RetransmissionTimer::new(Side::A, Arc::new(scheduler));
        timer.restart(20.0);
        assert!(timer.running());
    }

    #[test]
    fn test_mark_expired_allows_fresh_start() {
        let mut scheduler = MockChannel::new();
        scheduler.expect_arm_timer().times(2).return_const(());

        let mut timer = RetransmissionTimer::new(Side::A, Arc::new(scheduler));
        timer.start(15.0);

        timer.mark_expired();
        assert!(!timer.running());

        // no cancel call was issued, and a fresh start is legal again
        timer.start(22.5);
        assert!(timer.running());
    }
}
