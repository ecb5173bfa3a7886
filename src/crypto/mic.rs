// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! EAPOL-Key MIC computation and verification (802.11-2016 §12.7.2): for
//! the HMAC-SHA1-128 key descriptor version this access point negotiates,
//! the MIC is the first 16 bytes of HMAC-SHA1 over the frame with the MIC
//! field itself zeroed.

use hmac::{Hmac, Mac, NewMac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

pub const MIC_LEN: usize = 16;

/// Computes the EAPOL-Key MIC over `frame_with_zeroed_mic` (the wire
/// encoding of the frame with its `key_mic` field set to all zero bytes).
pub fn compute(kck: &[u8], frame_with_zeroed_mic: &[u8]) -> [u8; MIC_LEN] {
    let mut mac = HmacSha1::new_from_slice(kck).expect("HMAC accepts any key length");
    mac.update(frame_with_zeroed_mic);
    let digest = mac.finalize().into_bytes();
    let mut mic = [0u8; MIC_LEN];
    mic.copy_from_slice(&digest[..MIC_LEN]);
    mic
}

/// Verifies a claimed MIC against a freshly recomputed one in constant
/// time, guarding against timing side channels on handshake verification.
pub fn verify(kck: &[u8], frame_with_zeroed_mic: &[u8], claimed: &[u8; MIC_LEN]) -> bool {
    let expected = compute(kck, frame_with_zeroed_mic);
    constant_time_eq(&expected, claimed)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
