// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Pairwise Master Key derivation from a passphrase (802.11-2016 §J.4.1 /
//! RFC 2898): PBKDF2-HMAC-SHA1 over the passphrase, salted with the SSID,
//! 4096 iterations, 256-bit output.

use super::PMK_LEN;
use hmac::Hmac;
use sha1::Sha1;

const ITERATIONS: u32 = 4096;

/// Derives the PMK for a given passphrase/SSID pair. The passphrase must
/// already be known to satisfy the 8-63 ASCII-printable character
/// constraint (802.11-2016 §J.4); this function does not re-validate it.
pub fn derive(passphrase: &str, ssid: &[u8]) -> [u8; PMK_LEN] {
    let mut pmk = [0u8; PMK_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha1>>(passphrase.as_bytes(), ssid, ITERATIONS, &mut pmk);
    pmk
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known WPA2 PMK test vector (IEEE 802.11-2016 Annex J.4.3 / the
    // `wpa_passphrase` reference vector): SSID "IEEE", passphrase
    // "password".
    #[test]
    fn matches_ieee_reference_vector() {
        let pmk = derive("password", b"IEEE");
        let expected =
            hex::decode("f42c6fc52df0ebef9ebb4b90b38a5f902e83fe1b135a70e23aed762e9710a12e")
                .unwrap();
        assert_eq!(&pmk[..], &expected[..]);
    }

    #[test]
    fn different_ssid_yields_different_pmk() {
        let a = derive("password", b"IEEE");
        let b = derive("password", b"other");
        assert_ne!(a, b);
    }
}
