use std::fmt::{Display, Formatter};

#[cfg(test)] use mockall::automock;

use crate::packet::{Message, Packet};

/// Simulated clock value as reported by the scheduler. Monotonically
///  non-decreasing; the protocol core never reads wall-clock time.
pub type SimTime = f64;

/// Identifies one of the two protocol entities. Timers and transmissions are
///  tagged with the side they belong to so the scheduler can route expiry and
///  delivery events back to the right entity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    A,
    B,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Result of handing a message to an entity for transmission. There is no
///  internal queueing: a refused message is the caller's to resubmit.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SendOutcome {
    Accepted,
    Refused,
}

/// This is an abstraction for the unreliable channel and the event scheduler
///  driving the protocol, introduced to keep all I/O and time handling out of
///  the core and to facilitate mocking for testing.
///
/// The channel may drop, corrupt, delay or reorder packets in transit, but it
///  never duplicates or fabricates them. At most one timer per side is armed
///  at any given time; arming is single-shot, and a pending expiry can be
///  cancelled.
#[cfg_attr(test, automock)]
pub trait Channel: Send + Sync + 'static {
    /// Put a packet on the channel towards the peer of `from`.
    fn send_packet(&self, from: Side, packet: &Packet);

    /// Arm a single expiry event for `side`, `delay` time units from now.
    fn arm_timer(&self, side: Side, delay: SimTime);

    /// Cancel the pending expiry event for `side`, if any.
    fn cancel_timer(&self, side: Side);

    /// Current simulated clock value.
    fn now(&self) -> SimTime;
}

/// Upward delivery seam: the receiver hands successfully sequenced payloads
///  to the application layer through this trait.
#[cfg_attr(test, automock)]
pub trait MessageDispatcher: Send + Sync + 'static {
    fn on_message(&self, side: Side, message: &Message);
}
