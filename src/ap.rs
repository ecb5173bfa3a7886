// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The access point root: the set of BSSes it serves, keyed by BSSID, each
//! paired with the upper-network collaborator that carries its decrypted
//! traffic onward. One process can run several BSSes concurrently
//! (spec.md §3, `--bss` may repeat); each BSS is independently lockable so
//! one station's handshake never blocks another BSS's beacon or data path.

use crate::bss::Bss;
use crate::mac::MacAddr;
use crate::net::UpperNetwork;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

pub struct Ap {
    bsses: HashMap<MacAddr, Arc<Mutex<Bss>>>,
    uppers: HashMap<MacAddr, Arc<dyn UpperNetwork>>,
    /// BSSID insertion order, so "the primary BSS" (spec.md §4.3: the
    /// wildcard-SSID probe-request target) is well-defined even though the
    /// lookup table itself is unordered.
    order: Vec<MacAddr>,
    start: Instant,
}

impl Ap {
    pub fn new(bsses: Vec<(Bss, Arc<dyn UpperNetwork>)>) -> Self {
        let mut map = HashMap::new();
        let mut uppers = HashMap::new();
        let mut order = Vec::new();
        for (bss, upper) in bsses {
            order.push(bss.bssid);
            uppers.insert(bss.bssid, upper);
            map.insert(bss.bssid, Arc::new(Mutex::new(bss)));
        }
        Ap { bsses: map, uppers, order, start: Instant::now() }
    }

    pub fn bss(&self, bssid: &MacAddr) -> Option<Arc<Mutex<Bss>>> {
        self.bsses.get(bssid).cloned()
    }

    pub fn upper(&self, bssid: &MacAddr) -> Option<Arc<dyn UpperNetwork>> {
        self.uppers.get(bssid).cloned()
    }

    pub fn bsses(&self) -> impl Iterator<Item = (&MacAddr, &Arc<Mutex<Bss>>)> {
        self.bsses.iter()
    }

    /// The BSSIDs this access point serves, in configuration order. Owned
    /// rather than borrowed so callers (the beacon loop) can iterate it
    /// while separately locking individual BSSes.
    pub fn bssids(&self) -> Vec<MacAddr> {
        self.order.clone()
    }

    pub fn primary_bssid(&self) -> Option<MacAddr> {
        self.order.first().copied()
    }

    /// Finds the BSSID whose SSID exactly matches `ssid` (spec.md §4.3:
    /// "respond only from the BSS whose SSID matches exactly").
    pub fn find_by_ssid(&self, ssid: &[u8]) -> Option<MacAddr> {
        self.order.iter().copied().find(|bssid| {
            self.bsses.get(bssid).map(|b| b.lock().expect("bss lock poisoned").ssid == ssid).unwrap_or(false)
        })
    }

    /// Microseconds since this access point started, used as the beacon
    /// timestamp field (spec.md §4.5 permits a wall-clock delta in place
    /// of a hardware TSF counter).
    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::synthetic::SyntheticNetwork;
    use crate::net::stubs::StubIdentity;

    fn upper() -> Arc<dyn UpperNetwork> {
        Arc::new(SyntheticNetwork::new(StubIdentity { mac: [0xaa; 6], ipv4: [10, 0, 0, 1] }))
    }

    #[test]
    fn looks_up_bss_by_bssid() {
        let bss = Bss::new([0xaa; 6], b"net".to_vec(), "password123", 1);
        let ap = Ap::new(vec![(bss, upper())]);
        assert!(ap.bss(&[0xaa; 6]).is_some());
        assert!(ap.bss(&[0xbb; 6]).is_none());
    }

    #[test]
    fn finds_primary_and_by_ssid() {
        let bss1 = Bss::new([0xaa; 6], b"first".to_vec(), "password123", 1);
        let bss2 = Bss::new([0xbb; 6], b"second".to_vec(), "password123", 6);
        let ap = Ap::new(vec![(bss1, upper()), (bss2, upper())]);
        assert_eq!(ap.primary_bssid(), Some([0xaa; 6]));
        assert_eq!(ap.find_by_ssid(b"second"), Some([0xbb; 6]));
        assert_eq!(ap.find_by_ssid(b"no-such-network"), None);
    }
}
