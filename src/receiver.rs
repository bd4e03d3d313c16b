use std::sync::Arc;

use tracing::debug;

use crate::channel::{Channel, MessageDispatcher, SendOutcome, Side};
use crate::packet::{Message, Packet};
use crate::seq::SeqNr;

/// Receive-side protocol entity: enforces strict in-order delivery and
///  answers every arrival with a cumulative ack. Anything unexpected -
///  corruption, a duplicate, an out-of-order arrival - gets a repeat of the
///  last good cumulative ack instead, and the sender's timeout does the rest.
///
/// The receiver keeps no reordering buffer and arms no timer.
pub struct ReceiverEntity {
    side: Side,
    /// highest in-order sequence number delivered to the application so far
    rx_seq: SeqNr,
    channel: Arc<dyn Channel>,
    dispatcher: Arc<dyn MessageDispatcher>,
}

impl ReceiverEntity {
    /// Called exactly once per side, before any other event for that side.
    pub fn new(side: Side, channel: Arc<dyn Channel>, dispatcher: Arc<dyn MessageDispatcher>) -> ReceiverEntity {
        ReceiverEntity {
            side,
            rx_seq: SeqNr::ZERO,
            channel,
            dispatcher,
        }
    }

    /// This entity never originates data in this topology.
    pub fn on_application_send(&mut self, _message: Message) -> SendOutcome {
        debug!("side {} does not originate data, refusing message", self.side);
        SendOutcome::Refused
    }

    pub fn on_packet_arrival(&mut self, packet: Packet) {
        if !packet.verify() || packet.ack() != self.rx_seq.next() {
            debug!("side {} repeating cumulative ack {}", self.side, self.rx_seq);
            self.channel.send_packet(self.side, &Packet::ack_only(self.rx_seq));
            return;
        }

        self.rx_seq = self.rx_seq.next();
        debug!("side {} accepted in-order arrival, cumulative ack now {}", self.side, self.rx_seq);
        self.channel.send_packet(self.side, &Packet::ack_only(self.rx_seq));

        self.dispatcher.on_message(self.side, &Message { data: *packet.payload() });
    }
}
