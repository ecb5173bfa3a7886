// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! CCMP-128 (802.11-2016 §12.5.3): AES-CCM with a 128-bit temporal key, a
//! 13-byte nonce built from the priority octet, transmitter address, and
//! 48-bit packet number, and an 8-byte MIC. The additional authenticated
//! data is the 802.11 MAC header with the mutable fields masked out per
//! §12.5.3.3.3, so replayed/forged headers are caught along with the
//! payload.

use crate::error::CryptoError;
use crate::mac::{Dot11Hdr, FrameControl};
use aes::Aes128;
use ccm::aead::{AeadInPlace, NewAead};
use ccm::consts::{U13, U8};
use ccm::Ccm;
use generic_array::GenericArray;

type Ccmp128 = Ccm<Aes128, U8, U13>;

const NONCE_LEN: usize = 13;
pub const MIC_LEN: usize = 8;

/// Builds the CCMP nonce: priority (always 0, no QoS support), transmitter
/// address, packet number (big-endian, most significant octet first).
fn build_nonce(ta: &[u8; 6], pn: u64) -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    nonce[0] = 0; // priority octet; this access point does not do QoS/EDCA
    nonce[1..7].copy_from_slice(ta);
    let pn_bytes = pn.to_be_bytes();
    nonce[7..13].copy_from_slice(&pn_bytes[2..8]);
    nonce
}

/// Builds the AAD from the (unprotected) MAC header, masking mutable
/// fields to all-zero/one per 802.11-2016 §12.5.3.3.3: Duration is zeroed,
/// Retry/PwrMgmt/MoreData bits of Frame Control are cleared, and the
/// Address 4 / QoS Control fields (unused by this access point) are
/// omitted entirely since non-QoS, 3-address frames are all it sends.
fn build_aad(hdr: &Dot11Hdr) -> Vec<u8> {
    let mut fc = FrameControl::from_bytes(hdr.frame_ctrl);
    fc = fc.with_to_ds(fc.to_ds()).with_from_ds(fc.from_ds());
    let masked_fc = mask_frame_control(fc);

    let mut aad = Vec::with_capacity(22);
    aad.extend_from_slice(&masked_fc.to_bytes());
    aad.extend_from_slice(&[0u8; 2]); // Duration, masked to zero
    aad.extend_from_slice(&hdr.addr1);
    aad.extend_from_slice(&hdr.addr2);
    aad.extend_from_slice(&hdr.addr3);
    // Sequence Control's fragment-number bits are masked to zero; the
    // sequence-number bits are retained (802.11-2016 Table 12-5).
    let sc = u16::from_le_bytes(hdr.seq_ctrl) & 0xfff0;
    aad.extend_from_slice(&sc.to_le_bytes());
    aad
}

fn mask_frame_control(fc: FrameControl) -> FrameControl {
    let mut masked = fc;
    masked = masked.with_protected(true); // Protected is always set when CCMP applies
    // Retry, PwrMgmt, MoreData are set to 0 for AAD purposes.
    let mut bits = masked.0;
    bits &= !((1 << 11) | (1 << 12) | (1 << 13));
    FrameControl(bits)
}

/// Encrypts `plaintext` (the LLC/SNAP header plus payload of a data frame)
/// in place under `tk`, returning `ciphertext || mic`.
pub fn encrypt(tk: &[u8], hdr: &Dot11Hdr, ta: &[u8; 6], pn: u64, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = Ccmp128::new(GenericArray::from_slice(tk));
    let nonce = build_nonce(ta, pn);
    let aad = build_aad(hdr);
    let mut buf = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), &aad, &mut buf)
        .map_err(|_| CryptoError::CcmpTagInvalid)?;
    buf.extend_from_slice(&tag);
    Ok(buf)
}

/// Decrypts and authenticates `ciphertext_and_mic` (including its trailing
/// 8-byte MIC), returning the recovered plaintext.
pub fn decrypt(
    tk: &[u8],
    hdr: &Dot11Hdr,
    ta: &[u8; 6],
    pn: u64,
    ciphertext_and_mic: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext_and_mic.len() < MIC_LEN {
        return Err(CryptoError::CcmpTagInvalid);
    }
    let split = ciphertext_and_mic.len() - MIC_LEN;
    let (ciphertext, tag) = ciphertext_and_mic.split_at(split);
    let cipher = Ccmp128::new(GenericArray::from_slice(tk));
    let nonce = build_nonce(ta, pn);
    let aad = build_aad(hdr);
    let mut buf = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(GenericArray::from_slice(&nonce), &aad, &mut buf, GenericArray::from_slice(tag))
        .map_err(|_| CryptoError::CcmpTagInvalid)?;
    Ok(buf)
}
