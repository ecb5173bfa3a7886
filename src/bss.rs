// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A single Basic Service Set: the SSID/BSSID/channel it beacons, its PSK
//! credential and derived PMK/GTK, and the table of associated stations.
//! Mirrors the shape `ap::Config`/`ServingApInfo` take in the predecessor
//! AP state machine, minus the SME plumbing this access point has no use
//! for (it drives the handshake itself rather than handing frames off to a
//! separate policy layer).

use crate::crypto::gtk::Gtk;
use crate::crypto::pmk;
use crate::mac::seq::SequenceManager;
use crate::mac::MacAddr;
use crate::station::Station;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const BACKOFF: Duration = Duration::from_millis(250);
const MAX_AID: u16 = 2007;

pub struct Bss {
    pub bssid: MacAddr,
    pub ssid: Vec<u8>,
    pub channel: u8,
    pub pmk: [u8; 32],
    pub gtk: Gtk,
    pub beacon_interval_tu: u16,
    pub seq: SequenceManager,
    stations: HashMap<MacAddr, Station>,
    next_aid: u16,
    last_handshake_attempt: HashMap<MacAddr, Instant>,
}

impl Bss {
    pub fn new(bssid: MacAddr, ssid: Vec<u8>, passphrase: &str, channel: u8) -> Self {
        let pmk = pmk::derive(passphrase, &ssid);
        Bss {
            bssid,
            ssid,
            channel,
            pmk,
            gtk: Gtk::generate(1),
            beacon_interval_tu: 100,
            seq: SequenceManager::new(),
            stations: HashMap::new(),
            next_aid: 1,
            last_handshake_attempt: HashMap::new(),
        }
    }

    pub fn station(&self, addr: &MacAddr) -> Option<&Station> {
        self.stations.get(addr)
    }

    pub fn station_mut(&mut self, addr: &MacAddr) -> Option<&mut Station> {
        self.stations.get_mut(addr)
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Associates a station, allocating the next free AID. Re-association
    /// from an already-known address reuses its existing AID and resets
    /// its handshake state, matching the reference implementation's
    /// tolerance for a station restarting the handshake from association.
    pub fn associate(&mut self, addr: MacAddr) -> Result<u16, AssociateError> {
        if let Some(existing) = self.stations.get(&addr) {
            let aid = existing.aid;
            self.stations.insert(addr, Station::new(addr, aid));
            return Ok(aid);
        }
        if self.next_aid > MAX_AID {
            return Err(AssociateError::NoFreeAid);
        }
        let aid = self.next_aid;
        self.next_aid += 1;
        self.stations.insert(addr, Station::new(addr, aid));
        Ok(aid)
    }

    pub fn deauthenticate(&mut self, addr: &MacAddr) {
        self.stations.remove(addr);
        self.last_handshake_attempt.remove(addr);
    }

    /// Removes and returns a station's entry so its handshake state can be
    /// advanced without holding a borrow of the rest of the `Bss` (the
    /// handshake functions in [`crate::handshake`] take `&Bss` and `&mut
    /// Station` as separate arguments). Callers that want to keep the
    /// station must [`Self::put_station`] it back; not doing so (e.g. on a
    /// MIC failure) deletes it, matching spec.md §4.3's "delete Station"
    /// action.
    pub fn take_station(&mut self, addr: &MacAddr) -> Option<Station> {
        self.stations.remove(addr)
    }

    pub fn put_station(&mut self, sta: Station) {
        self.stations.insert(sta.addr, sta);
    }

    /// Enforces the minimum spacing between handshake-message retries
    /// (spec.md §4.3). Returns `true` if enough time has elapsed since the
    /// last attempt for `addr` (or none was recorded), recording `now` as
    /// the new attempt time as a side effect.
    pub fn check_and_record_backoff(&mut self, addr: MacAddr, now: Instant) -> bool {
        let ok = match self.last_handshake_attempt.get(&addr) {
            Some(last) => now.duration_since(*last) >= BACKOFF,
            None => true,
        };
        if ok {
            self.last_handshake_attempt.insert(addr, now);
        }
        ok
    }

    /// Forces a GTK rotation. Not scheduled automatically; an operator or
    /// an outer control loop decides when group-key freshness matters
    /// enough to pay the brief multicast blackout a rotation causes.
    pub fn rotate_gtk(&mut self) {
        self.gtk.rotate();
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum AssociateError {
    NoFreeAid,
}
