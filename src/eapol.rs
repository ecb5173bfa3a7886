// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! EAPOL-Key frame codec (802.11-2016 §12.7.2, IEEE 802.1X-2010 §11.3.2).
//! Covers only the Key frame type; this access point never speaks full
//! 802.1X/EAP (spec.md Non-goals), so EAPOL-Start/Logoff/etc. are unneeded.

use byteorder::{BigEndian, ByteOrder};
use failure::Fail;

pub const EAPOL_PROTOCOL_VERSION: u8 = 2;
pub const PACKET_TYPE_KEY: u8 = 3;
pub const DESCRIPTOR_TYPE_RSN: u8 = 2;

const FIXED_LEN: usize = 1 + 1 + 2 + 1 + 2 + 32 + 16 + 8 + 16 + 8 + 2 + 2;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "EAPOL frame too short: have {}, need at least {}", _0, _1)]
    TooShort(usize, usize),
    #[fail(display = "unsupported EAPOL packet type: {}", _0)]
    UnsupportedPacketType(u8),
    #[fail(display = "key data length {} overruns frame of length {}", _0, _1)]
    KeyDataOverrun(usize, usize),
}

/// Key Information field, 802.11-2016 Figure 12-34. Stored host-endian;
/// on the wire this is big-endian per 802.1X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInfo(pub u16);

impl KeyInfo {
    const KEY_DESCRIPTOR_VERSION: u16 = 0b111;
    const KEY_TYPE: u16 = 1 << 3;
    const INSTALL: u16 = 1 << 6;
    const KEY_ACK: u16 = 1 << 7;
    const KEY_MIC: u16 = 1 << 8;
    const SECURE: u16 = 1 << 9;
    const ERROR: u16 = 1 << 10;
    const REQUEST: u16 = 1 << 11;
    const ENCRYPTED_KEY_DATA: u16 = 1 << 12;

    pub fn key_descriptor_version(&self) -> u16 {
        self.0 & Self::KEY_DESCRIPTOR_VERSION
    }

    pub fn key_type_pairwise(&self) -> bool {
        self.0 & Self::KEY_TYPE != 0
    }

    pub fn install(&self) -> bool {
        self.0 & Self::INSTALL != 0
    }

    pub fn key_ack(&self) -> bool {
        self.0 & Self::KEY_ACK != 0
    }

    pub fn key_mic(&self) -> bool {
        self.0 & Self::KEY_MIC != 0
    }

    pub fn secure(&self) -> bool {
        self.0 & Self::SECURE != 0
    }

    pub fn error(&self) -> bool {
        self.0 & Self::ERROR != 0
    }

    pub fn request(&self) -> bool {
        self.0 & Self::REQUEST != 0
    }

    pub fn encrypted_key_data(&self) -> bool {
        self.0 & Self::ENCRYPTED_KEY_DATA != 0
    }

    fn with_flag(mut self, mask: u16, v: bool) -> Self {
        if v {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
        self
    }

    pub fn with_key_descriptor_version(mut self, v: u16) -> Self {
        self.0 = (self.0 & !Self::KEY_DESCRIPTOR_VERSION) | (v & Self::KEY_DESCRIPTOR_VERSION);
        self
    }

    pub fn with_key_type_pairwise(self, v: bool) -> Self {
        self.with_flag(Self::KEY_TYPE, v)
    }

    pub fn with_install(self, v: bool) -> Self {
        self.with_flag(Self::INSTALL, v)
    }

    pub fn with_key_ack(self, v: bool) -> Self {
        self.with_flag(Self::KEY_ACK, v)
    }

    pub fn with_key_mic(self, v: bool) -> Self {
        self.with_flag(Self::KEY_MIC, v)
    }

    pub fn with_secure(self, v: bool) -> Self {
        self.with_flag(Self::SECURE, v)
    }

    pub fn with_encrypted_key_data(self, v: bool) -> Self {
        self.with_flag(Self::ENCRYPTED_KEY_DATA, v)
    }
}

/// A parsed or to-be-serialized EAPOL-Key frame (the 4-way-handshake
/// message carried inside an 802.1X frame). Variable-length `key_data` is
/// owned; everything else is fixed-size per the RSN descriptor.
#[derive(Debug, Clone)]
pub struct KeyFrame {
    pub descriptor_type: u8,
    pub key_info: KeyInfo,
    pub key_len: u16,
    pub replay_counter: u64,
    pub key_nonce: [u8; 32],
    pub key_iv: [u8; 16],
    pub key_rsc: u64,
    pub key_mic: [u8; 16],
    pub key_data: Vec<u8>,
}

impl KeyFrame {
    pub fn new(key_info: KeyInfo, key_len: u16, replay_counter: u64, nonce: [u8; 32], key_data: Vec<u8>) -> Self {
        KeyFrame {
            descriptor_type: DESCRIPTOR_TYPE_RSN,
            key_info,
            key_len,
            replay_counter,
            key_nonce: nonce,
            key_iv: [0; 16],
            key_rsc: 0,
            key_mic: [0; 16],
            key_data,
        }
    }

    /// Parses an EAPOL-Key frame starting at the 802.1X protocol version
    /// octet (i.e. including the 4-byte 802.1X header).
    pub fn parse(buf: &[u8]) -> Result<Self, Error> {
        if buf.len() < 4 + FIXED_LEN {
            return Err(Error::TooShort(buf.len(), 4 + FIXED_LEN));
        }
        let packet_type = buf[1];
        if packet_type != PACKET_TYPE_KEY {
            return Err(Error::UnsupportedPacketType(packet_type));
        }
        let packet_body_len = BigEndian::read_u16(&buf[2..4]) as usize;
        let mut off = 4;
        let descriptor_type = buf[off];
        off += 1;
        let key_info = KeyInfo(BigEndian::read_u16(&buf[off..off + 2]));
        off += 2;
        let key_len = BigEndian::read_u16(&buf[off..off + 2]);
        off += 2;
        let replay_counter = BigEndian::read_u64(&buf[off..off + 8]);
        off += 8;
        let mut key_nonce = [0u8; 32];
        key_nonce.copy_from_slice(&buf[off..off + 32]);
        off += 32;
        let mut key_iv = [0u8; 16];
        key_iv.copy_from_slice(&buf[off..off + 16]);
        off += 16;
        let key_rsc = BigEndian::read_u64(&buf[off..off + 8]);
        off += 8;
        off += 8; // reserved
        let mut key_mic = [0u8; 16];
        key_mic.copy_from_slice(&buf[off..off + 16]);
        off += 16;
        let key_data_len = BigEndian::read_u16(&buf[off..off + 2]) as usize;
        off += 2;
        let frame_end = 4 + packet_body_len.max(off - 4);
        if off + key_data_len > buf.len() || off + key_data_len > frame_end {
            return Err(Error::KeyDataOverrun(key_data_len, buf.len() - off));
        }
        let key_data = buf[off..off + key_data_len].to_vec();

        Ok(KeyFrame {
            descriptor_type,
            key_info,
            key_len,
            replay_counter,
            key_nonce,
            key_iv,
            key_rsc,
            key_mic,
            key_data,
        })
    }

    /// Serializes the frame, including the leading 802.1X header. `key_mic`
    /// is written as-is (zeroed unless the caller has already computed and
    /// set it via [`Self::set_mic`]).
    pub fn to_bytes(&self) -> Vec<u8> {
        let body_len = FIXED_LEN - 4 + self.key_data.len();
        let mut out = Vec::with_capacity(4 + body_len);
        out.push(EAPOL_PROTOCOL_VERSION);
        out.push(PACKET_TYPE_KEY);
        let mut len_buf = [0u8; 2];
        BigEndian::write_u16(&mut len_buf, body_len as u16);
        out.extend_from_slice(&len_buf);

        out.push(self.descriptor_type);
        let mut buf2 = [0u8; 2];
        BigEndian::write_u16(&mut buf2, self.key_info.0);
        out.extend_from_slice(&buf2);
        BigEndian::write_u16(&mut buf2, self.key_len);
        out.extend_from_slice(&buf2);
        let mut buf8 = [0u8; 8];
        BigEndian::write_u64(&mut buf8, self.replay_counter);
        out.extend_from_slice(&buf8);
        out.extend_from_slice(&self.key_nonce);
        out.extend_from_slice(&self.key_iv);
        BigEndian::write_u64(&mut buf8, self.key_rsc);
        out.extend_from_slice(&buf8);
        out.extend_from_slice(&[0u8; 8]); // reserved
        out.extend_from_slice(&self.key_mic);
        BigEndian::write_u16(&mut buf2, self.key_data.len() as u16);
        out.extend_from_slice(&buf2);
        out.extend_from_slice(&self.key_data);
        out
    }

    /// Serializes the frame with its MIC field zeroed, the form the MIC
    /// itself is computed over (802.11-2016 §12.7.2).
    pub fn to_bytes_zeroed_mic(&self) -> Vec<u8> {
        let mut zeroed = self.clone();
        zeroed.key_mic = [0; 16];
        zeroed.to_bytes()
    }

    pub fn set_mic(&mut self, mic: [u8; 16]) {
        self.key_mic = mic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_info_round_trips_message1_flags() {
        let ki = KeyInfo::default()
            .with_key_descriptor_version(2)
            .with_key_type_pairwise(true)
            .with_key_ack(true);
        assert_eq!(ki.key_descriptor_version(), 2);
        assert!(ki.key_type_pairwise());
        assert!(ki.key_ack());
        assert!(!ki.key_mic());
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let key_info = KeyInfo::default().with_key_descriptor_version(2).with_key_ack(true);
        let frame = KeyFrame::new(key_info, 16, 1, [0x11; 32], vec![0xde, 0xad, 0xbe, 0xef]);
        let bytes = frame.to_bytes();
        let parsed = KeyFrame::parse(&bytes).unwrap();
        assert_eq!(parsed.key_info, key_info);
        assert_eq!(parsed.replay_counter, 1);
        assert_eq!(parsed.key_nonce, [0x11; 32]);
        assert_eq!(parsed.key_data, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_truncated_frame() {
        let buf = [2u8, 3, 0, 1];
        assert!(KeyFrame::parse(&buf).is_err());
    }
}
