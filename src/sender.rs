use std::sync::Arc;

use tracing::{debug, trace};

use crate::channel::{Channel, SendOutcome, Side};
use crate::config::ArqConfig;
use crate::packet::{Message, Packet};
use crate::send_window::SendWindow;
use crate::seq::SeqNr;
use crate::timer::RetransmissionTimer;

/// Send-side protocol entity: owns the sliding window and the single
///  retransmission timer for its side, and reacts to the three events that
///  can reach a sender - an outbound application message, an arriving
///  acknowledgment, and a timer expiry.
pub struct SenderEntity {
    side: Side,
    window: SendWindow,
    timer: RetransmissionTimer,
    channel: Arc<dyn Channel>,
}

impl SenderEntity {
    /// Called exactly once per side, before any other event for that side.
    pub fn new(side: Side, config: &ArqConfig, channel: Arc<dyn Channel>) -> anyhow::Result<SenderEntity> {
        config.validate()?;

        Ok(SenderEntity {
            side,
            window: SendWindow::new(config),
            timer: RetransmissionTimer::new(side, channel.clone()),
            channel,
        })
    }

    /// Accepts an application message into the window and transmits it, or
    ///  refuses it while the window is exhausted. A refused message is not
    ///  queued - resubmission is the application's responsibility.
    pub fn on_application_send(&mut self, message: Message) -> SendOutcome {
        if self.window.vacancy() == 0 {
            debug!("send window on side {} is full, refusing message", self.side);
            return SendOutcome::Refused;
        }

        let packet = Packet::build(self.window.next_seq(), SeqNr::ZERO, Some(&message));
        debug!("side {} transmitting seq {}", self.side, packet.seq());

        self.window.accept(packet.clone(), self.channel.now());
        self.channel.send_packet(self.side, &packet);

        if !self.timer.running() {
            self.timer.start(self.window.rto());
        }

        SendOutcome::Accepted
    }

    /// Processes an arriving acknowledgment. Corrupted frames are dropped
    ///  silently - recovery is timeout-driven, never an error path.
    pub fn on_packet_arrival(&mut self, packet: Packet) {
        if !packet.verify() {
            debug!("side {} dropping corrupted packet", self.side);
            return;
        }

        let advanced = self.window.on_ack(packet.ack(), self.channel.now());
        trace!("side {} processed ack {}, window advanced: {}", self.side, packet.ack(), advanced);

        if self.window.vacancy() == self.window.capacity() {
            self.timer.stop();
        } else {
            // re-armed over the remaining outstanding range even when this
            //  particular ack did not advance the window
            self.timer.restart(self.window.rto());
        }
    }

    /// Whole-window batch retransmission: every packet in
    ///  `[base_seq, next_seq)` goes out again in ascending sequence order,
    ///  and the timer is re-armed with a fresh timeout while anything is
    ///  still outstanding.
    pub fn on_timer_expiry(&mut self) {
        self.timer.mark_expired();

        let now = self.channel.now();
        debug!("timeout on side {}: retransmitting seqs [{}, {})",
            self.side, self.window.base_seq(), self.window.next_seq());

        let mut seq = self.window.base_seq();
        while seq < self.window.next_seq() {
            if let Some(packet) = self.window.get(seq, now) {
                self.channel.send_packet(self.side, packet);
            }
            seq = seq.next();
        }

        if !self.window.is_empty() {
            self.timer.start(self.window.rto());
        }
    }
}
