// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Thread orchestration (spec.md §5): one receiver thread per radio
//! transport, one beacon thread per radio transport, and one upper-network
//! reader thread per BSS. Each BSS's state lives behind its own
//! `Arc<Mutex<Bss>>` (the teacher's `Arc<Mutex<..>>` idiom for state shared
//! between SME and MLME, seen in `get_gtk_provider`) so one station's
//! handshake never blocks another BSS's beacon or data path; the beacon and
//! upper-network threads only ever hold one BSS's lock at a time.

use crate::ap::Ap;
use crate::dataplane;
use crate::dispatch;
use crate::mgmt;
use crate::radio::{self, Transport};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Beacon transmission period (spec.md §4.5: "one beacon frame per BSS
/// every 50 ms").
pub const BEACON_INTERVAL: Duration = Duration::from_millis(50);

/// Spawns the thread that blocks on `transport.recv()` and feeds every
/// frame it reads into [`dispatch::handle_received_frame`]. Per spec.md §7,
/// a single frame's processing error never kills this loop: it is logged
/// and the thread moves on to the next `recv()`.
pub fn spawn_receiver(ap: Arc<Ap>, transport: Arc<dyn Transport>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("wlan-softap-rx".into())
        .spawn(move || loop {
            let frame = match transport.recv() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("radio receive error, stopping receiver: {}", e);
                    return;
                }
            };
            if let Err(e) = dispatch::handle_received_frame(&ap, &frame, transport.as_ref()) {
                log::debug!("dropping frame: {}", e);
            }
        })
        .expect("failed to spawn receiver thread")
}

/// Spawns the thread that sends a beacon for every BSS on `transport` every
/// [`BEACON_INTERVAL`] (spec.md §4.5). One thread serves every BSS sharing
/// a radio, since they share the medium anyway.
pub fn spawn_beacon(ap: Arc<Ap>, transport: Arc<dyn Transport>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("wlan-softap-beacon".into())
        .spawn(move || loop {
            for bssid in ap.bssids() {
                let bss = match ap.bss(&bssid) {
                    Some(bss) => bss,
                    None => continue,
                };
                let frame = {
                    let bss = bss.lock().expect("bss lock poisoned");
                    mgmt::build_beacon(&bss, ap.elapsed_us())
                };
                if let Err(e) = transport.send(&radio::wrap_radiotap(&frame)) {
                    log::warn!("failed to send beacon for {:02x?}: {}", bssid, e);
                }
            }
            thread::sleep(BEACON_INTERVAL);
        })
        .expect("failed to spawn beacon thread")
}

/// Spawns the per-BSS thread that blocks on the upper network's `recv()`
/// and encrypts/transmits whatever Ethernet frame it returns (spec.md §5's
/// per-BSS upper-network reader thread). The destination station is the
/// frame's own Ethernet destination address; frames for stations this BSS
/// has no record of, or whose handshake has not completed, are dropped
/// rather than queued, matching spec.md §7 (no internal error reaches a
/// station except as a protocol action, and there is no station to signal
/// here).
pub fn spawn_upper_network(ap: Arc<Ap>, bssid: crate::mac::MacAddr, transport: Arc<dyn Transport>) -> JoinHandle<()> {
    thread::Builder::new()
        .name(format!("wlan-softap-upper-{:02x}{:02x}", bssid[4], bssid[5]))
        .spawn(move || loop {
            let upper = match ap.upper(&bssid) {
                Some(upper) => upper,
                None => return,
            };
            let ethernet = match upper.recv() {
                Ok(frame) => frame,
                Err(e) => {
                    log::error!("upper network recv error for {:02x?}, stopping reader: {}", bssid, e);
                    return;
                }
            };
            if let Err(e) = forward_to_station(&ap, bssid, transport.as_ref(), &ethernet) {
                log::debug!("dropping frame to {:02x?}: {}", bssid, e);
            }
        })
        .expect("failed to spawn upper-network reader thread")
}

const ETH_HDR_LEN: usize = 14;

/// Encrypts and transmits one Ethernet frame handed up from a BSS's upper
/// network. Splits the 14-byte Ethernet header off, looks up (or accepts
/// the broadcast/multicast destination of) the target station, and calls
/// [`dataplane::encrypt_to_station`].
fn forward_to_station(
    ap: &Ap,
    bssid: crate::mac::MacAddr,
    transport: &dyn Transport,
    ethernet: &[u8],
) -> Result<(), crate::error::ApError> {
    if ethernet.len() < ETH_HDR_LEN {
        return Err(crate::error::ApError::Codec(crate::error::CodecError::TooShort(
            "Ethernet header",
            ethernet.len(),
            ETH_HDR_LEN,
        )));
    }
    let mut dst = [0u8; 6];
    dst.copy_from_slice(&ethernet[0..6]);
    let mut src = [0u8; 6];
    src.copy_from_slice(&ethernet[6..12]);
    let ethertype = u16::from_be_bytes([ethernet[12], ethernet[13]]);
    let payload = &ethernet[ETH_HDR_LEN..];

    let bss = ap.bss(&bssid).ok_or_else(|| {
        crate::error::ApError::Handshake(crate::error::HandshakeError::UnknownStation(dst))
    })?;
    let frame = {
        let mut bss = bss.lock().expect("bss lock poisoned");
        dataplane::encrypt_to_station(&mut bss, bssid, src, dst, ethertype, payload)?
    };
    transport.send(&radio::wrap_radiotap(&frame)).map_err(crate::error::ApError::RadioIo)
}
