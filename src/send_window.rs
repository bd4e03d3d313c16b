use tracing::trace;

use crate::channel::SimTime;
use crate::config::ArqConfig;
use crate::packet::Packet;
use crate::seq::SeqNr;

/// Weight of the previous estimate when folding a new RTT sample into the
///  moving average.
const RTT_SMOOTHING: f64 = 0.125;

/// Safety factor between the smoothed RTT and the retransmission timeout.
const RTO_FACTOR: f64 = 1.5;

struct Slot {
    packet: Packet,
    sent_at: SimTime,
}

/// Sender-side sliding window: a bounded circular buffer of in-flight
///  packets plus the RTT estimator that prices their retransmission timeout.
///
/// ```ascii
///  base_seq           next_seq
///      |                  |
///  ----+------------------+--------------------> seq space
///      | <-- in flight -->| <-- vacancy -->
/// ```
///
/// Slots are owned values addressed by `seq mod N`; a slot is valid only
///  while its sequence number lies in `[base_seq, next_seq)` and is simply
///  overwritten in place once the window has moved past it.
pub struct SendWindow {
    base_seq: SeqNr,
    next_seq: SeqNr,
    est_rtt: SimTime,
    min_rtt: SimTime,
    max_rtt: SimTime,
    slots: Vec<Option<Slot>>,
}

impl SendWindow {
    pub fn new(config: &ArqConfig) -> SendWindow {
        let mut slots = Vec::new();
        slots.resize_with(config.window_size, || None);

        SendWindow {
            base_seq: SeqNr::FIRST,
            next_seq: SeqNr::FIRST,
            est_rtt: config.initial_rtt,
            min_rtt: config.min_rtt,
            max_rtt: config.max_rtt,
            slots,
        }
    }

    pub fn base_seq(&self) -> SeqNr {
        self.base_seq
    }

    /// Sequence number the next accepted packet will carry.
    pub fn next_seq(&self) -> SeqNr {
        self.next_seq
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn in_flight(&self) -> usize {
        (self.next_seq.to_raw() - self.base_seq.to_raw()) as usize
    }

    /// Number of additional packets that may be buffered.
    pub fn vacancy(&self) -> usize {
        self.capacity() - self.in_flight()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight() == 0
    }

    /// Buffers a packet in the slot for `next_seq` and advances `next_seq`.
    ///  The caller must have checked [`Self::vacancy`] before framing the
    ///  packet.
    pub fn accept(&mut self, packet: Packet, now: SimTime) {
        debug_assert!(self.vacancy() > 0, "accept on a full send window");

        let slot = self.next_seq.slot_in(self.capacity());
        self.slots[slot] = Some(Slot { packet, sent_at: now });
        self.next_seq = self.next_seq.next();
    }

    /// Processes a cumulative acknowledgment for everything up to and
    ///  including `seq`.
    ///
    /// For a non-stale ack this folds the round-trip sample of `seq` into the
    ///  smoothed estimate and moves `base_seq` past it, pulling `next_seq`
    ///  along if the ack overshot the assigned range. A stale ack
    ///  (`seq < base_seq`) leaves all state untouched and returns false.
    pub fn on_ack(&mut self, seq: SeqNr, now: SimTime) -> bool {
        if seq < self.base_seq {
            trace!("stale ack {} below window base {}", seq, self.base_seq);
            return false;
        }

        if seq < self.next_seq {
            let slot = seq.slot_in(self.capacity());
            if let Some(slot) = &self.slots[slot] {
                let sample = now - slot.sent_at;
                self.est_rtt = (RTT_SMOOTHING * self.est_rtt + (1.0 - RTT_SMOOTHING) * sample)
                    .clamp(self.min_rtt, self.max_rtt);
                trace!("RTT sample {} for seq {}, smoothed estimate now {}", sample, seq, self.est_rtt);
            }
        }

        self.base_seq = seq.next();
        if self.next_seq < self.base_seq {
            self.next_seq = self.base_seq;
        }
        true
    }

    /// The buffered packet for `seq` if it is still in flight, refreshing its
    ///  send timestamp to `now` so the retransmission is what the next RTT
    ///  sample measures.
    pub fn get(&mut self, seq: SeqNr, now: SimTime) -> Option<&Packet> {
        if seq < self.base_seq || seq >= self.next_seq {
            return None;
        }

        let slot = seq.slot_in(self.capacity());
        let slot = self.slots[slot].as_mut()?;
        slot.sent_at = now;
        Some(&slot.packet)
    }

    /// Current retransmission timeout, derived from the smoothed estimate.
    pub fn rto(&self) -> SimTime {
        self.est_rtt * RTO_FACTOR
    }
}
