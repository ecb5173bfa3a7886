// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The receive dispatcher (spec.md §4.6): classifies one radiotap-wrapped
//! frame off the air and routes it to the management handlers, the
//! handshake authenticator, or the data-plane decryptor, sending whatever
//! reply each of those produces back out over the same transport. This is
//! the one module that is allowed to know about all of the others; it owns
//! no state of its own beyond the per-frame locals needed to do the
//! routing.

use crate::ap::Ap;
use crate::dataplane;
use crate::eapol::{self, KeyFrame};
use crate::error::{ApError, HandshakeError};
use crate::handshake;
use crate::mac::data::CcmpHdr;
use crate::mac::llc::{ETHERTYPE_EAPOL, LlcHdr};
use crate::mac::mgmt as mac_mgmt;
use crate::mac::{data_subtype, is_multicast, mgmt_subtype, Dot11Hdr, FrameControl, FrameType, MacAddr, SequenceControl};
use crate::mgmt;
use crate::net::DeliveredFrame;
use crate::radio::{self, Transport};
use crate::station::Station;
use std::time::Instant;
use zerocopy::{AsBytes, LayoutVerified};

/// Handles one radiotap-wrapped frame read off `transport`. Never returns
/// an error for a condition spec.md §7 classifies as "drop and log"; the
/// `Result` here only ever carries transport I/O failures writing a
/// response, which the receiver loop logs and otherwise ignores.
pub fn handle_received_frame(ap: &Ap, raw: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    let radiotap = match crate::mac::radiotap::parse(raw) {
        Ok(r) => r,
        Err(e) => {
            log::debug!("dropping frame: bad radiotap header: {}", e);
            return Ok(());
        }
    };
    if radiotap.bad_fcs {
        log::debug!("dropping frame: bad FCS");
        return Ok(());
    }
    let mac_frame = &raw[radiotap.header_len..];
    if mac_frame.len() < Dot11Hdr::LEN {
        log::debug!("dropping frame: shorter than an 802.11 header");
        return Ok(());
    }
    let hdr = LayoutVerified::<_, Dot11Hdr>::new_unaligned(&mac_frame[..Dot11Hdr::LEN])
        .expect("slice is exactly Dot11Hdr::LEN")
        .into_ref()
        .clone();

    // Self-loop protection (spec.md §4.3): a frame this access point itself
    // transmitted, or one spoofing one of our BSSIDs as its transmitter,
    // is never something to act on.
    if ap.bss(&hdr.addr2).is_some() {
        return Ok(());
    }
    // Frames destined to some other unicast receiver are not ours to
    // process; broadcast/multicast-destined frames (probe requests,
    // beacons) pass through to the type dispatch below (spec.md §4.6).
    if !is_multicast(&hdr.addr1) && ap.bss(&hdr.addr1).is_none() {
        return Ok(());
    }

    let body = &mac_frame[Dot11Hdr::LEN..];
    match hdr.fc().frame_type() {
        FrameType::Mgmt => handle_mgmt(ap, &hdr, body, transport),
        FrameType::Data => handle_data(ap, &hdr, body, transport),
        FrameType::Ctrl | FrameType::Ext => Ok(()),
    }
}

fn handle_mgmt(ap: &Ap, hdr: &Dot11Hdr, body: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    match hdr.fc().subtype() {
        mgmt_subtype::PROBE_REQ => handle_probe_request(ap, hdr, body, transport),
        mgmt_subtype::AUTH => handle_auth(ap, hdr, transport),
        mgmt_subtype::ASSOC_REQ => handle_assoc(ap, hdr, transport, false),
        mgmt_subtype::REASSOC_REQ => handle_assoc(ap, hdr, transport, true),
        mgmt_subtype::DEAUTH | mgmt_subtype::DISASSOC => {
            if let Some(bss) = ap.bss(&hdr.addr1) {
                bss.lock().expect("bss lock poisoned").deauthenticate(&hdr.addr2);
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn handle_probe_request(ap: &Ap, hdr: &Dot11Hdr, body: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    let ssid = match mgmt::parse_probe_request_ssid(body) {
        Some(ssid) => ssid,
        None => return Ok(()),
    };
    let bssid = if ssid.is_empty() { ap.primary_bssid() } else { ap.find_by_ssid(&ssid) };
    let bssid = match bssid {
        Some(b) => b,
        None => return Ok(()),
    };
    let bss = ap.bss(&bssid).expect("bssid came from Ap's own tables");
    let frame = {
        let bss = bss.lock().expect("bss lock poisoned");
        mgmt::build_probe_response(&bss, hdr.addr2, ap.elapsed_us())
    };
    send(transport, &frame)
}

fn handle_auth(ap: &Ap, hdr: &Dot11Hdr, transport: &dyn Transport) -> Result<(), ApError> {
    let bss = match ap.bss(&hdr.addr1) {
        Some(b) => b,
        None => return Ok(()),
    };
    let frame = {
        let mut bss = bss.lock().expect("bss lock poisoned");
        if !bss.check_and_record_backoff(hdr.addr2, Instant::now()) {
            return Ok(());
        }
        mgmt::build_auth_response(&bss, hdr.addr2)
    };
    send(transport, &frame)
}

fn handle_assoc(ap: &Ap, hdr: &Dot11Hdr, transport: &dyn Transport, reassoc: bool) -> Result<(), ApError> {
    let bss = match ap.bss(&hdr.addr1) {
        Some(b) => b,
        None => return Ok(()),
    };
    let mut bss = bss.lock().expect("bss lock poisoned");
    if !bss.check_and_record_backoff(hdr.addr2, Instant::now()) {
        return Ok(());
    }
    let aid = bss.associate(hdr.addr2)?;
    let assoc_resp = mgmt::build_assoc_response(&bss, hdr.addr2, aid, reassoc);

    let mut sta = bss.take_station(&hdr.addr2).expect("associate() just inserted this station");
    let msg1 = handshake::build_message1(&mut sta);
    let seq = bss.seq.next();
    let eapol_frame = build_eapol_data_frame(bss.bssid, hdr.addr2, seq, &msg1);
    bss.put_station(sta);
    drop(bss);

    send(transport, &assoc_resp)?;
    send(transport, &eapol_frame)
}

fn handle_data(ap: &Ap, hdr: &Dot11Hdr, body: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    let fc = hdr.fc();
    if fc.subtype() != data_subtype::DATA {
        return Ok(());
    }
    if fc.protected() {
        handle_protected_data(ap, hdr, body, transport)
    } else {
        handle_eapol_data(ap, hdr, body, transport)
    }
}

fn handle_protected_data(ap: &Ap, hdr: &Dot11Hdr, body: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    if !hdr.fc().to_ds() {
        // This access point only ever decrypts station -> AP traffic; its
        // own from-DS frames are never looped back through this path.
        return Ok(());
    }
    let bssid = hdr.addr1;
    let bss = match ap.bss(&bssid) {
        Some(b) => b,
        None => return Ok(()),
    };
    if body.len() < CcmpHdr::LEN {
        log::debug!("dropping data frame: shorter than a CCMP header");
        return Ok(());
    }
    let (ccmp_bytes, rest) = body.split_at(CcmpHdr::LEN);
    let ccmp_hdr = LayoutVerified::<_, CcmpHdr>::new_unaligned(ccmp_bytes)
        .expect("slice is exactly CcmpHdr::LEN")
        .into_ref();

    let mut bss_guard = bss.lock().expect("bss lock poisoned");
    match dataplane::decrypt_from_station(&mut bss_guard, hdr, ccmp_hdr, rest) {
        Ok(decrypted) => {
            drop(bss_guard);
            if let Some(upper) = ap.upper(&bssid) {
                upper.deliver(DeliveredFrame { station: decrypted.src, ethernet: decrypted.to_ethernet() });
            }
            Ok(())
        }
        Err(ApError::Handshake(HandshakeError::UnknownStation(sta))) => {
            let frame = mgmt::build_deauth(&bss_guard, sta, mac_mgmt::REASON_UNKNOWN_STA);
            drop(bss_guard);
            send(transport, &frame)
        }
        Err(e) => {
            log::debug!("dropping protected data frame from {:02x?}: {}", hdr.addr2, e);
            Ok(())
        }
    }
}

fn handle_eapol_data(ap: &Ap, hdr: &Dot11Hdr, body: &[u8], transport: &dyn Transport) -> Result<(), ApError> {
    if body.len() < LlcHdr::LEN {
        return Ok(());
    }
    let (llc_bytes, rest) = body.split_at(LlcHdr::LEN);
    let llc = LayoutVerified::<_, LlcHdr>::new_unaligned(llc_bytes).expect("slice is exactly LlcHdr::LEN").into_ref();
    if llc.ethertype() != ETHERTYPE_EAPOL {
        return Ok(());
    }
    let key_frame = match handshake::parse_eapol(rest) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("dropping malformed EAPOL-Key frame from {:02x?}: {}", hdr.addr2, e);
            return Ok(());
        }
    };

    let bssid = hdr.addr1;
    let sta_addr = hdr.addr2;
    let bss = match ap.bss(&bssid) {
        Some(b) => b,
        None => return Ok(()),
    };
    let mut bss_guard = bss.lock().expect("bss lock poisoned");

    if bss_guard.station(&sta_addr).map(Station::is_ptk_installed).unwrap_or(false) {
        // Already associated: the only EAPOL-Key frame a station still
        // sends is message 4, which spec.md §4.3 treats as optional to
        // validate.
        if let Some(sta) = bss_guard.station(&sta_addr) {
            if let Err(e) = handshake::on_message4(sta, &key_frame) {
                log::debug!("message 4 from {:02x?} did not verify (ignored): {}", sta_addr, e);
            }
        }
        return Ok(());
    }

    let mut sta = match bss_guard.take_station(&sta_addr) {
        Some(s) => s,
        None => return Ok(()),
    };
    let aa = bss_guard.bssid;
    match handshake::on_message2(&bss_guard, &aa, &mut sta, &key_frame) {
        Ok(msg3) => {
            let seq = bss_guard.seq.next();
            bss_guard.put_station(sta);
            let frame = build_eapol_data_frame(bss_guard.bssid, sta_addr, seq, &msg3);
            drop(bss_guard);
            send(transport, &frame)
        }
        Err(HandshakeError::InvalidMessage2Mic) => {
            // Station is dropped by not putting it back (spec.md §4.3 S2).
            let frame = mgmt::build_deauth(&bss_guard, sta_addr, mac_mgmt::REASON_MIC_FAILURE);
            drop(bss_guard);
            send(transport, &frame)
        }
        Err(e) => {
            // Unexpected key-info or state: leave the station as it was
            // and drop the frame silently.
            bss_guard.put_station(sta);
            log::debug!("dropping EAPOL-Key frame from {:02x?}: {}", sta_addr, e);
            Ok(())
        }
    }
}

/// Builds an unencrypted Data frame carrying an EAPOL-Key message (message
/// 1 or message 3; spec.md §4.3 sends both unprotected).
fn build_eapol_data_frame(bssid: MacAddr, dst: MacAddr, seq: u16, key_frame: &KeyFrame) -> Vec<u8> {
    let fc = FrameControl(0).with_frame_type(FrameType::Data).with_subtype(data_subtype::DATA).with_from_ds(true);
    let hdr = Dot11Hdr::new(fc, dst, bssid, bssid, SequenceControl(0).with_seq_num(seq));
    let llc = LlcHdr::new(ETHERTYPE_EAPOL);
    let key_bytes = key_frame.to_bytes();

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + LlcHdr::LEN + key_bytes.len());
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(llc.as_bytes());
    out.extend_from_slice(&key_bytes);
    out
}

fn send(transport: &dyn Transport, mac_frame: &[u8]) -> Result<(), ApError> {
    transport.send(&radio::wrap_radiotap(mac_frame)).map_err(ApError::RadioIo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{mic, nonce, prf};
    use crate::eapol::KeyInfo;
    use crate::ie::rsne;
    use crate::mac::llc::ETHERTYPE_IPV4;
    use crate::net::stubs::StubIdentity;
    use crate::net::synthetic::SyntheticNetwork;
    use crate::radio::FramedTransport;
    use std::io::Cursor;
    use std::sync::Arc;

    fn ap_with_one_bss() -> (Ap, MacAddr) {
        let bssid = [0xaa; 6];
        let bss = crate::bss::Bss::new(bssid, b"test-network".to_vec(), "password123", 6);
        let upper: Arc<dyn crate::net::UpperNetwork> =
            Arc::new(SyntheticNetwork::new(StubIdentity { mac: bssid, ipv4: [10, 0, 0, 1] }));
        (Ap::new(vec![(bss, upper)]), bssid)
    }

    fn loopback_transport() -> FramedTransport<Cursor<Vec<u8>>, Vec<u8>> {
        FramedTransport::new(Cursor::new(Vec::new()), Vec::new())
    }

    fn mgmt_frame(subtype: u8, addr1: MacAddr, addr2: MacAddr, addr3: MacAddr) -> Vec<u8> {
        let fc = FrameControl(0).with_frame_type(FrameType::Mgmt).with_subtype(subtype);
        let hdr = Dot11Hdr::new(fc, addr1, addr2, addr3, SequenceControl(0));
        let mut out = Vec::new();
        out.extend_from_slice(hdr.as_bytes());
        out
    }

    #[test]
    fn wildcard_probe_request_gets_response() {
        let (ap, bssid) = ap_with_one_bss();
        let transport = loopback_transport();
        let mut frame = mgmt_frame(mgmt_subtype::PROBE_REQ, crate::mac::BROADCAST_ADDR, [0x02; 6], crate::mac::BROADCAST_ADDR);
        frame.extend_from_slice(&[crate::ie::ID_SSID, 0]); // empty (wildcard) SSID IE

        handle_received_frame(&ap, &radio::wrap_radiotap(&frame), &transport).unwrap();
        assert!(!transport.written().is_empty());
        let _ = bssid;
    }

    #[test]
    fn auth_then_assoc_yields_message1() {
        let (ap, bssid) = ap_with_one_bss();
        let transport = loopback_transport();
        let sta = [0x02; 6];

        let auth_req = mgmt_frame(mgmt_subtype::AUTH, bssid, sta, bssid);
        handle_received_frame(&ap, &radio::wrap_radiotap(&auth_req), &transport).unwrap();

        let assoc_req = mgmt_frame(mgmt_subtype::ASSOC_REQ, bssid, sta, bssid);
        handle_received_frame(&ap, &radio::wrap_radiotap(&assoc_req), &transport).unwrap();

        let written = transport.written();
        // auth-response, assoc-response, and EAPOL message 1: three framed
        // writes, each length-prefixed.
        let mut cursor = Cursor::new(written);
        let mut frames = Vec::new();
        loop {
            use byteorder::{LittleEndian, ReadBytesExt};
            let len = match cursor.read_u32::<LittleEndian>() {
                Ok(l) => l,
                Err(_) => break,
            };
            let mut buf = vec![0u8; len as usize];
            std::io::Read::read_exact(&mut cursor, &mut buf).unwrap();
            frames.push(buf);
        }
        assert_eq!(frames.len(), 3);

        let bss = ap.bss(&bssid).unwrap();
        assert!(bss.lock().unwrap().station(&sta).is_some());
    }

    #[test]
    fn full_handshake_then_data_round_trip() {
        let (ap, bssid) = ap_with_one_bss();
        let transport = loopback_transport();
        let sta_addr = [0x02; 6];

        let assoc_req = mgmt_frame(mgmt_subtype::ASSOC_REQ, bssid, sta_addr, bssid);
        handle_received_frame(&ap, &radio::wrap_radiotap(&assoc_req), &transport).unwrap();

        let (anonce, pmk) = {
            let bss = ap.bss(&bssid).unwrap();
            let bss = bss.lock().unwrap();
            let anonce = match bss.station(&sta_addr).unwrap().handshake {
                crate::station::HandshakeState::Message1Sent { anonce, .. } => anonce,
                _ => panic!("expected Message1Sent"),
            };
            (anonce, bss.pmk)
        };

        let snonce = nonce::random_nonce();
        let ptk = prf::derive_ptk(&pmk, &bssid, &sta_addr, &anonce, &snonce);
        let key_info = KeyInfo::default()
            .with_key_descriptor_version(2)
            .with_key_type_pairwise(true)
            .with_key_mic(true);
        let mut msg2 = eapol::KeyFrame::new(key_info, 0, 1, snonce, rsne::build());
        let mic_val = mic::compute(ptk.kck(), &msg2.to_bytes_zeroed_mic());
        msg2.set_mic(mic_val);

        let fc = FrameControl(0).with_frame_type(FrameType::Data).with_subtype(data_subtype::DATA).with_to_ds(true);
        let hdr = Dot11Hdr::new(fc, bssid, sta_addr, bssid, SequenceControl(0).with_seq_num(1));
        let llc = LlcHdr::new(ETHERTYPE_EAPOL);
        let mut data_frame = Vec::new();
        data_frame.extend_from_slice(hdr.as_bytes());
        data_frame.extend_from_slice(llc.as_bytes());
        data_frame.extend_from_slice(&msg2.to_bytes());
        handle_received_frame(&ap, &radio::wrap_radiotap(&data_frame), &transport).unwrap();

        let bss = ap.bss(&bssid).unwrap();
        assert!(bss.lock().unwrap().station(&sta_addr).unwrap().is_ptk_installed());

        // Now send a protected data frame and confirm it decrypts and
        // reaches the upper network's stub responders.
        let tk = bss.lock().unwrap().station(&sta_addr).unwrap().ptk().unwrap().tk().to_vec();
        let data_fc =
            FrameControl(0).with_frame_type(FrameType::Data).with_subtype(data_subtype::DATA).with_to_ds(true).with_protected(true);
        let data_hdr = Dot11Hdr::new(data_fc, bssid, sta_addr, bssid, SequenceControl(0).with_seq_num(2));
        let llc2 = LlcHdr::new(ETHERTYPE_IPV4);
        let mut plaintext = Vec::new();
        plaintext.extend_from_slice(llc2.as_bytes());
        plaintext.extend_from_slice(b"hello");
        let ciphertext = crate::crypto::ccmp::encrypt(&tk, &data_hdr, &sta_addr, 0, &plaintext).unwrap();
        let ccmp_hdr = CcmpHdr::new(0, 0);
        let mut protected_frame = Vec::new();
        protected_frame.extend_from_slice(data_hdr.as_bytes());
        protected_frame.extend_from_slice(ccmp_hdr.as_bytes());
        protected_frame.extend_from_slice(&ciphertext);

        handle_received_frame(&ap, &radio::wrap_radiotap(&protected_frame), &transport).unwrap();
    }

    #[test]
    fn frames_from_our_own_bssid_are_ignored() {
        let (ap, bssid) = ap_with_one_bss();
        let transport = loopback_transport();
        // A frame whose transmitter address is our own BSSID must never
        // be processed (self-loop guard).
        let frame = mgmt_frame(mgmt_subtype::AUTH, bssid, bssid, bssid);
        handle_received_frame(&ap, &radio::wrap_radiotap(&frame), &transport).unwrap();
        assert!(transport.written().is_empty());
    }
}
