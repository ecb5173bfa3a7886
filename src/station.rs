// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Per-station state: association identity plus the 4-way-handshake state
//! machine (spec.md §4). Modeled on the authenticator-side states the
//! predecessor RSNA module distinguishes between (`Idle`, handshake
//! message tracking, `PtkInitDone`), generalized to the subset of
//! transitions this single-PSK access point actually drives.

use crate::crypto::prf::Ptk;
use crate::mac::MacAddr;
use std::time::Instant;

/// The 4-way handshake's progress for one station. Authenticator states
/// per 802.11-2016 §12.7.6.1, collapsed onto the messages actually
/// exchanged.
pub enum HandshakeState {
    /// 802.11 authenticated, not yet associated and no handshake started.
    Authenticated,
    /// Associated; message 1 sent, awaiting message 2.
    Message1Sent { anonce: [u8; 32], sent_at: Instant },
    /// Message 2 verified, message 3 sent with the PTK and wrapped GTK.
    /// Per spec.md §4.3, the station is considered associated and its
    /// PTK/GTK installed from this point: message 4 is optional to
    /// consume, and the authenticator may instead treat the first
    /// protected data frame it decrypts as evidence of a successful
    /// install (see [`Station::accept_rx_pn`] callers).
    Associated { ptk: Ptk, sent_at: Instant },
}

pub struct Station {
    pub addr: MacAddr,
    pub aid: u16,
    pub snonce: Option<[u8; 32]>,
    pub handshake: HandshakeState,
    pub replay_counter: u64,
    /// Packet number for frames this access point sends to the station
    /// under its pairwise key.
    pub tx_pn: u64,
    /// Highest packet number accepted from the station, for replay
    /// rejection (spec.md SUPPLEMENTED FEATURES).
    pub rx_pn: Option<u64>,
}

impl Station {
    pub fn new(addr: MacAddr, aid: u16) -> Self {
        Station {
            addr,
            aid,
            snonce: None,
            handshake: HandshakeState::Authenticated,
            replay_counter: 0,
            tx_pn: 0,
            rx_pn: None,
        }
    }

    pub fn is_ptk_installed(&self) -> bool {
        matches!(self.handshake, HandshakeState::Associated { .. })
    }

    pub fn ptk(&self) -> Option<&Ptk> {
        match &self.handshake {
            HandshakeState::Associated { ptk, .. } => Some(ptk),
            _ => None,
        }
    }

    pub fn next_tx_pn(&mut self) -> u64 {
        let pn = self.tx_pn;
        self.tx_pn += 1;
        pn
    }

    /// Returns `true` if `pn` has not been seen before and records it as
    /// the new high-water mark. 802.11 data PNs must be strictly
    /// increasing per transmitter; anything else is a replay.
    pub fn accept_rx_pn(&mut self, pn: u64) -> bool {
        match self.rx_pn {
            Some(last) if pn <= last => false,
            _ => {
                self.rx_pn = Some(pn);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_increasing_pn() {
        let mut sta = Station::new([0; 6], 1);
        assert!(sta.accept_rx_pn(5));
        assert!(!sta.accept_rx_pn(5));
        assert!(!sta.accept_rx_pn(3));
        assert!(sta.accept_rx_pn(6));
    }

    #[test]
    fn tx_pn_increments_from_zero() {
        let mut sta = Station::new([0; 6], 1);
        assert_eq!(sta.next_tx_pn(), 0);
        assert_eq!(sta.next_tx_pn(), 1);
    }
}
