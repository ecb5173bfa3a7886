// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! AES Key Wrap (RFC 3394) as used to encrypt the GTK KDE carried in
//! EAPOL-Key message 3's key data field (802.11-2016 §12.7.2). The KEK half
//! of the PTK is the wrapping key; plaintext must be a multiple of 8 bytes,
//! which the caller satisfies by padding the GTK KDE per §12.7.2 note.

use crate::error::CryptoError;
use aes_kw::KekAes128;
use generic_array::GenericArray;

/// Wraps `plaintext` (a multiple of 8 bytes) under the 128-bit `kek`,
/// producing `plaintext.len() + 8` bytes. The PTK's KEK half is always 128
/// bits for the CCMP-128/PSK configuration this access point speaks.
pub fn wrap(kek: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if plaintext.len() % 8 != 0 {
        return Err(CryptoError::KeyWrapAlignment(plaintext.len()));
    }
    let wrapper = KekAes128::new(GenericArray::from_slice(kek));
    wrapper.wrap_vec(plaintext).map_err(|_| CryptoError::KeyUnwrapInvalid)
}

/// Unwraps `ciphertext`, verifying the RFC 3394 integrity check value.
pub fn unwrap(kek: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.len() % 8 != 0 || ciphertext.len() < 16 {
        return Err(CryptoError::KeyWrapAlignment(ciphertext.len()));
    }
    let wrapper = KekAes128::new(GenericArray::from_slice(kek));
    wrapper.unwrap_vec(ciphertext).map_err(|_| CryptoError::KeyUnwrapInvalid)
}

/// Pads a GTK KDE TLV up to a multiple of 8 bytes per §12.7.2: if it is
/// already aligned, an extra all-`0xdd` padding element of length 0 is
/// appended only when strictly required to reach the boundary (if the
/// unpadded length is already a multiple of 8 and at least 16 bytes, no
/// padding element is added).
pub fn pad_key_data(mut data: Vec<u8>) -> Vec<u8> {
    let min_len = if data.len() < 16 { 16 } else { data.len() };
    let padded_len = ((min_len + 7) / 8) * 8;
    if padded_len > data.len() {
        if padded_len - data.len() >= 2 {
            data.push(0xdd);
            data.push((padded_len - data.len() - 2) as u8);
        } else {
            data.push(0xdd);
        }
        data.resize(padded_len, 0);
    }
    data
}
