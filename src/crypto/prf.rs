// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The 802.11 pseudo-random function and the pairwise transient key it
//! derives (802.11-2016 §12.7.1.2, §12.7.1.6). PRF-512 always produces 64
//! bytes regardless of cipher suite; CCMP only consumes the first 48 (KCK,
//! KEK, TK) but the remaining 16 are kept so the PTK buffer has the same
//! shape the 4-way handshake negotiates before the cipher suite is known.

use hmac::{Hmac, Mac, NewMac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const PTK_LEN: usize = 64;
pub const KCK_LEN: usize = 16;
pub const KEK_LEN: usize = 16;
pub const TK_LEN: usize = 16;

const LABEL_PAIRWISE: &[u8] = b"Pairwise key expansion";

/// 802.11-2016 §12.7.1.2 `PRF(K, A, B, Len)`: repeated HMAC-SHA1 over
/// `A || 0x00 || B || counter`, truncated to `len` bytes.
pub fn prf(key: &[u8], label: &[u8], data: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 20);
    let mut counter: u8 = 0;
    while out.len() < len {
        let mut mac = HmacSha1::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(label);
        mac.update(&[0u8]);
        mac.update(data);
        mac.update(&[counter]);
        out.extend_from_slice(&mac.finalize().into_bytes());
        counter += 1;
    }
    out.truncate(len);
    out
}

/// The derived pairwise transient key, split into its constituent keys.
#[derive(Clone)]
pub struct Ptk {
    bytes: [u8; PTK_LEN],
}

impl Ptk {
    pub fn kck(&self) -> &[u8] {
        &self.bytes[0..KCK_LEN]
    }

    pub fn kek(&self) -> &[u8] {
        &self.bytes[KCK_LEN..KCK_LEN + KEK_LEN]
    }

    pub fn tk(&self) -> &[u8] {
        &self.bytes[KCK_LEN + KEK_LEN..KCK_LEN + KEK_LEN + TK_LEN]
    }
}

/// Derives the PTK from the PMK and the handshake nonces/addresses.
/// `PRF-512(PMK, "Pairwise key expansion", Min(AA,SPA) || Max(AA,SPA) ||
/// Min(ANonce,SNonce) || Max(ANonce,SNonce))`.
pub fn derive_ptk(pmk: &[u8], aa: &[u8; 6], spa: &[u8; 6], anonce: &[u8; 32], snonce: &[u8; 32]) -> Ptk {
    let (addr_lo, addr_hi) = order(aa, spa);
    let (nonce_lo, nonce_hi) = order(anonce, snonce);
    let mut data = Vec::with_capacity(12 + 64);
    data.extend_from_slice(addr_lo);
    data.extend_from_slice(addr_hi);
    data.extend_from_slice(nonce_lo);
    data.extend_from_slice(nonce_hi);

    let raw = prf(pmk, LABEL_PAIRWISE, &data, PTK_LEN);
    let mut bytes = [0u8; PTK_LEN];
    bytes.copy_from_slice(&raw);
    Ptk { bytes }
}

fn order<'a, T: AsRef<[u8]> + ?Sized>(a: &'a T, b: &'a T) -> (&'a [u8], &'a [u8]) {
    if a.as_ref() <= b.as_ref() {
        (a.as_ref(), b.as_ref())
    } else {
        (b.as_ref(), a.as_ref())
    }
}
