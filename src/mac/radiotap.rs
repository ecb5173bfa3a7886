// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Minimal radiotap header walk used on the receive path to locate the
//! start of the 802.11 frame and to read the "bad FCS" flag, which the
//! dispatcher uses to drop corrupt captures before they ever reach the MAC
//! parser. spec.md §9 flags the fixed-offset approach taken by some
//! reference implementations as fragile; this walks the present-bitmap
//! chain instead of assuming a fixed header length.

use crate::error::CodecError;

const RADIOTAP_MIN_LEN: usize = 8;
const PRESENT_EXT_BIT: u32 = 1 << 31;

/// Bit positions within the radiotap "Flags" field (present-bitmap bit 1).
const FLAGS_FIELD_INDEX: u32 = 1;
const FLAG_BAD_FCS: u8 = 1 << 6;

pub struct RadiotapInfo {
    /// Total length of the radiotap header, i.e. the offset at which the
    /// 802.11 MAC frame begins.
    pub header_len: usize,
    pub bad_fcs: bool,
}

/// Walks a radiotap header's present-bitmap chain far enough to compute its
/// total length and to extract the Flags field if present. Does not decode
/// every field; this access point only needs the frame offset and the FCS
/// validity flag.
pub fn parse(buf: &[u8]) -> Result<RadiotapInfo, CodecError> {
    if buf.len() < RADIOTAP_MIN_LEN {
        return Err(CodecError::TooShort("radiotap header", buf.len(), RADIOTAP_MIN_LEN));
    }
    let total_len = u16::from_le_bytes([buf[2], buf[3]]) as usize;
    if buf.len() < total_len {
        return Err(CodecError::TooShort("radiotap header", buf.len(), total_len));
    }

    // Walk the chain of present-bitmap words (each with bit 31 set if
    // another bitmap word follows) to find how many fields precede Flags
    // and whether Flags is present at all.
    let mut bitmaps = Vec::new();
    let mut offset = 4;
    loop {
        if offset + 4 > buf.len() {
            return Err(CodecError::RadiotapPresentOverflow);
        }
        let word = u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]]);
        bitmaps.push(word);
        offset += 4;
        if word & PRESENT_EXT_BIT == 0 {
            break;
        }
        if bitmaps.len() > 8 {
            return Err(CodecError::RadiotapPresentOverflow);
        }
    }

    let mut bad_fcs = false;
    if let Some(&first) = bitmaps.first() {
        if first & (1 << FLAGS_FIELD_INDEX) != 0 {
            // TSFT (field 0) is an 8-byte, 8-byte-aligned field that
            // precedes Flags whenever present; Flags itself is a single
            // byte with no alignment padding.
            let mut field_offset = offset;
            if first & 1 != 0 {
                field_offset = align(field_offset, 8) + 8;
            }
            if field_offset < buf.len() {
                bad_fcs = buf[field_offset] & FLAG_BAD_FCS != 0;
            }
        }
    }

    Ok(RadiotapInfo { header_len: total_len, bad_fcs })
}

fn align(offset: usize, to: usize) -> usize {
    (offset + to - 1) / to * to
}
