// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The WPA2-PSK 4-way handshake, authenticator side (802.11-2016 §12.7.6.3).
//! Builds and verifies the four EAPOL-Key messages; everything it needs —
//! PMK, per-station nonces, PTK derivation, MIC, GTK key-wrap — lives in
//! [`crate::crypto`] and [`crate::bss`]. This module only sequences them.

use crate::bss::Bss;
use crate::crypto::{keywrap, mic, nonce, prf};
use crate::eapol::{self, KeyFrame, KeyInfo};
use crate::error::HandshakeError;
use crate::ie::rsne;
use crate::mac::MacAddr;
use crate::station::{HandshakeState, Station};
use std::time::Instant;

const KEY_DESCRIPTOR_VERSION_HMAC_SHA1_AES: u16 = 2;

/// Builds EAPOL-Key message 1: ANonce, no MIC. Transitions the station
/// into [`HandshakeState::Message1Sent`].
pub fn build_message1(sta: &mut Station) -> KeyFrame {
    let anonce = nonce::random_nonce();
    sta.replay_counter += 1;
    let key_info = KeyInfo::default()
        .with_key_descriptor_version(KEY_DESCRIPTOR_VERSION_HMAC_SHA1_AES)
        .with_key_type_pairwise(true)
        .with_key_ack(true);
    sta.handshake = HandshakeState::Message1Sent { anonce, sent_at: Instant::now() };
    KeyFrame::new(key_info, 0, sta.replay_counter, anonce, Vec::new())
}

/// Verifies message 2 (SNonce + MIC over the station's RSNE) against the
/// ANonce this access point sent, derives the PTK, and builds message 3
/// (RSNE + wrapped GTK, MIC'd with the new KCK).
pub fn on_message2(
    bss: &Bss,
    aa: &MacAddr,
    sta: &mut Station,
    frame: &KeyFrame,
) -> Result<KeyFrame, HandshakeError> {
    let anonce = match sta.handshake {
        HandshakeState::Message1Sent { anonce, .. } => anonce,
        _ => return Err(HandshakeError::UnexpectedState),
    };
    if !frame.key_info.key_mic() || frame.key_info.key_ack() {
        return Err(HandshakeError::UnexpectedKeyInfo(frame.key_info));
    }

    let ptk = prf::derive_ptk(&bss.pmk, aa, &sta.addr, &anonce, &frame.key_nonce);
    let zeroed = frame.to_bytes_zeroed_mic();
    if !mic::verify(ptk.kck(), &zeroed, &frame.key_mic) {
        return Err(HandshakeError::InvalidMessage2Mic);
    }

    sta.snonce = Some(frame.key_nonce);
    sta.replay_counter = frame.replay_counter;

    let rsne_body = rsne::build();
    let mut gtk_kde = Vec::new();
    rsne::write_gtk_kde(&mut gtk_kde, bss.gtk.key_id, true, &bss.gtk.key);
    let padded = keywrap::pad_key_data(gtk_kde);
    let wrapped = keywrap::wrap(ptk.kek(), &padded)?;

    let mut key_data = Vec::new();
    key_data.push(crate::ie::ID_RSNE);
    key_data.push(rsne_body.len() as u8);
    key_data.extend_from_slice(&rsne_body);
    key_data.extend_from_slice(&wrapped);

    sta.replay_counter += 1;
    let key_info = KeyInfo::default()
        .with_key_descriptor_version(KEY_DESCRIPTOR_VERSION_HMAC_SHA1_AES)
        .with_key_type_pairwise(true)
        .with_install(true)
        .with_key_ack(true)
        .with_key_mic(true)
        .with_secure(true)
        .with_encrypted_key_data(true);
    let mut msg3 = KeyFrame::new(key_info, 16, sta.replay_counter, anonce, key_data);
    let mic_val = mic::compute(ptk.kck(), &msg3.to_bytes_zeroed_mic());
    msg3.set_mic(mic_val);

    // PTK and GTK are considered installed as soon as message 3 is sent
    // (spec.md §4.3): the data plane may decrypt/encrypt for this station
    // immediately. Message 4 is optional to consume; see `on_message4`.
    sta.handshake = HandshakeState::Associated { ptk, sent_at: Instant::now() };
    Ok(msg3)
}

/// Verifies an (optional) message 4 MIC against the installed PTK. Per
/// spec.md §4.3 this is a deliberate simplification the authenticator may
/// skip entirely: association already happened at message 3, so a
/// mismatch here is logged, not treated as a handshake failure requiring
/// the station to be torn down.
pub fn on_message4(sta: &Station, frame: &KeyFrame) -> Result<(), HandshakeError> {
    let ptk = sta.ptk().ok_or(HandshakeError::UnexpectedState)?;
    if !frame.key_info.key_mic() {
        return Err(HandshakeError::UnexpectedKeyInfo(frame.key_info));
    }
    let zeroed = frame.to_bytes_zeroed_mic();
    if !mic::verify(ptk.kck(), &zeroed, &frame.key_mic) {
        return Err(HandshakeError::InvalidMessage2Mic);
    }
    Ok(())
}

pub fn parse_eapol(buf: &[u8]) -> Result<KeyFrame, eapol::Error> {
    KeyFrame::parse(buf)
}
