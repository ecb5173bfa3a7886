// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Information element framing: a 1-byte element ID, a 1-byte length, then
//! `length` bytes of body. Covers only the elements this access point needs
//! to emit in its beacons/probe responses and to parse out of association
//! requests (spec.md §3): SSID, supported rates, DS parameter set, and RSN
//! (see [`rsne`]).

pub mod rsne;

use crate::error::CodecError;

pub const ID_SSID: u8 = 0;
pub const ID_SUPPORTED_RATES: u8 = 1;
pub const ID_DS_PARAM_SET: u8 = 3;
pub const ID_COUNTRY: u8 = 7;
pub const ID_EXT_SUPPORTED_RATES: u8 = 50;
pub const ID_RSNE: u8 = 48;

#[derive(Debug, Clone, Copy)]
pub struct IeHeader {
    pub id: u8,
    pub len: u8,
}

impl IeHeader {
    pub const LEN: usize = 2;
}

/// A single parsed `(id, body)` pair, borrowed from the source buffer.
#[derive(Debug, Clone, Copy)]
pub struct Ie<'a> {
    pub id: u8,
    pub body: &'a [u8],
}

/// Iterates the IE chain in a frame body, yielding one IE at a time.
pub fn iter(buf: &[u8]) -> IeIter<'_> {
    IeIter { buf }
}

pub struct IeIter<'a> {
    buf: &'a [u8],
}

impl<'a> Iterator for IeIter<'a> {
    type Item = Result<Ie<'a>, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        if self.buf.len() < IeHeader::LEN {
            self.buf = &[];
            return Some(Err(CodecError::MalformedIe));
        }
        let id = self.buf[0];
        let len = self.buf[1] as usize;
        if self.buf.len() < IeHeader::LEN + len {
            self.buf = &[];
            return Some(Err(CodecError::MalformedIe));
        }
        let body = &self.buf[IeHeader::LEN..IeHeader::LEN + len];
        self.buf = &self.buf[IeHeader::LEN + len..];
        Some(Ok(Ie { id, body }))
    }
}

/// Appends a single IE (header + body) to `out`.
pub fn write_ie(out: &mut Vec<u8>, id: u8, body: &[u8]) {
    out.push(id);
    out.push(body.len() as u8);
    out.extend_from_slice(body);
}

pub fn write_ssid(out: &mut Vec<u8>, ssid: &[u8]) {
    write_ie(out, ID_SSID, ssid);
}

/// 802.11b/g rate set in units of 500 kb/s with the basic-rate bit (bit 7)
/// set on the mandatory rates, matching the fixed rate set barebones
/// access points advertise (1, 2, 5.5, 11 Mb/s basic; 6, 9, 12, 18 Mb/s
/// extended, 24/36/48/54 in the extended-rates IE).
pub const SUPPORTED_RATES: [u8; 8] = [0x82, 0x84, 0x8b, 0x96, 0x0c, 0x12, 0x18, 0x24];
pub const EXT_SUPPORTED_RATES: [u8; 4] = [0x30, 0x48, 0x60, 0x6c];

pub fn write_supported_rates(out: &mut Vec<u8>) {
    write_ie(out, ID_SUPPORTED_RATES, &SUPPORTED_RATES);
    write_ie(out, ID_EXT_SUPPORTED_RATES, &EXT_SUPPORTED_RATES);
}

pub fn write_ds_param_set(out: &mut Vec<u8>, channel: u8) {
    write_ie(out, ID_DS_PARAM_SET, &[channel]);
}
