// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Randomness for ANonce/GTK generation, sourced from the OS CSPRNG
//! (matching the reference implementation's use of `/dev/urandom` rather
//! than a seeded PRNG: handshake security depends on these values being
//! unpredictable to the station).

use rand::rngs::OsRng;
use rand::RngCore;

pub fn random_nonce() -> [u8; 32] {
    let mut buf = [0u8; 32];
    OsRng.fill_bytes(&mut buf);
    buf
}

pub fn random_gtk() -> [u8; super::GTK_LEN] {
    let mut buf = [0u8; super::GTK_LEN];
    OsRng.fill_bytes(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonces_are_not_trivially_repeated() {
        let a = random_nonce();
        let b = random_nonce();
        assert_ne!(a, b);
    }

    #[test]
    fn gtks_are_not_trivially_repeated() {
        let a = random_gtk();
        let b = random_gtk();
        assert_ne!(a, b);
    }
}
