// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! RSN information element (802.11-2016 §9.4.2.25) and the GTK key data
//! encapsulation (KDE, §12.7.2) carried in EAPOL-Key message 3. This access
//! point advertises exactly one configuration — CCMP-128 pairwise and group
//! cipher, PSK AKM — so building the element is a fixed byte sequence
//! rather than a general-purpose cipher-suite negotiator.

use crate::error::CodecError;
use byteorder::{ByteOrder, LittleEndian};

const OUI: [u8; 3] = [0x00, 0x0f, 0xac];
const SUITE_CCMP: u8 = 4;
const SUITE_PSK: u8 = 2;
const RSNE_VERSION: u16 = 1;

/// Builds the fixed RSNE body this access point advertises: CCMP-128
/// group/pairwise cipher, PSK AKM, no capabilities set (no PMF, no
/// pre-authentication). Returns the IE body, i.e. without the
/// element-ID/length header.
pub fn build() -> Vec<u8> {
    let mut out = Vec::with_capacity(20);
    push_u16(&mut out, RSNE_VERSION);
    out.extend_from_slice(&OUI);
    out.push(SUITE_CCMP); // group cipher
    push_u16(&mut out, 1); // pairwise cipher count
    out.extend_from_slice(&OUI);
    out.push(SUITE_CCMP);
    push_u16(&mut out, 1); // AKM count
    out.extend_from_slice(&OUI);
    out.push(SUITE_PSK);
    push_u16(&mut out, 0); // RSN capabilities
    out
}

/// Parses an RSNE body far enough to confirm it names CCMP-128/PSK, the
/// only configuration this access point accepts (spec.md §3: association
/// requests naming anything else are rejected).
pub fn is_ccmp_psk(body: &[u8]) -> Result<bool, CodecError> {
    if body.len() < 8 {
        return Err(CodecError::MalformedIe);
    }
    let group_cipher_oui = &body[2..5];
    let group_cipher_type = body[5];
    if group_cipher_oui != OUI || group_cipher_type != SUITE_CCMP {
        return Ok(false);
    }
    let pairwise_count = LittleEndian::read_u16(&body[6..8]) as usize;
    let mut off = 8;
    let mut pairwise_ok = false;
    for _ in 0..pairwise_count {
        if off + 4 > body.len() {
            return Err(CodecError::MalformedIe);
        }
        if &body[off..off + 3] == &OUI[..] && body[off + 3] == SUITE_CCMP {
            pairwise_ok = true;
        }
        off += 4;
    }
    if off + 2 > body.len() {
        return Err(CodecError::MalformedIe);
    }
    let akm_count = LittleEndian::read_u16(&body[off..off + 2]) as usize;
    off += 2;
    let mut akm_ok = false;
    for _ in 0..akm_count {
        if off + 4 > body.len() {
            return Err(CodecError::MalformedIe);
        }
        if &body[off..off + 3] == &OUI[..] && body[off + 3] == SUITE_PSK {
            akm_ok = true;
        }
        off += 4;
    }
    Ok(pairwise_ok && akm_ok)
}

fn push_u16(out: &mut Vec<u8>, v: u16) {
    let mut buf = [0u8; 2];
    LittleEndian::write_u16(&mut buf, v);
    out.extend_from_slice(&buf);
}

const KDE_TYPE_VENDOR_SPECIFIC: u8 = 0xdd;
const KDE_DATA_TYPE_GTK: u8 = 1;

/// Wraps a GTK in its KDE envelope (802.11-2016 §12.7.2, Figure 12-35):
/// vendor-specific element header, OUI 00-0F-AC, data type 1, then a
/// 2-byte GTK-KDE fixed field (key id in bits 0-1, Tx bit in bit 2) and the
/// raw GTK bytes.
pub fn write_gtk_kde(out: &mut Vec<u8>, key_id: u8, tx: bool, gtk: &[u8]) {
    let body_len = 3 + 1 + 2 + gtk.len();
    out.push(KDE_TYPE_VENDOR_SPECIFIC);
    out.push(body_len as u8);
    out.extend_from_slice(&OUI);
    out.push(KDE_DATA_TYPE_GTK);
    let flags = (key_id & 0b11) | if tx { 1 << 2 } else { 0 };
    out.push(flags);
    out.push(0); // reserved
    out.extend_from_slice(gtk);
}

pub struct ParsedGtkKde {
    pub key_id: u8,
    pub tx: bool,
    pub gtk: Vec<u8>,
}

/// Scans a key-data blob (already AES-unwrapped) for a GTK KDE.
pub fn find_gtk_kde(key_data: &[u8]) -> Option<ParsedGtkKde> {
    let mut buf = key_data;
    while buf.len() >= 2 {
        let id = buf[0];
        let len = buf[1] as usize;
        if buf.len() < 2 + len {
            return None;
        }
        let body = &buf[2..2 + len];
        if id == KDE_TYPE_VENDOR_SPECIFIC
            && body.len() >= 6
            && body[0..3] == OUI
            && body[3] == KDE_DATA_TYPE_GTK
        {
            return Some(ParsedGtkKde {
                key_id: body[4] & 0b11,
                tx: body[4] & (1 << 2) != 0,
                gtk: body[6..].to_vec(),
            });
        }
        buf = &buf[2 + len..];
    }
    None
}
