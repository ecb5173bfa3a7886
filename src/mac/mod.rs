// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! 802.11 MAC-layer constants, the Frame Control / Sequence Control bit
//! layouts, and the fixed-size header structs shared by the management and
//! data paths. Mirrors the split `wlan_common::mac` takes in the teacher
//! lineage: one small module per concern, headers as `#[repr(C, packed)]`
//! structs decoded with `zerocopy`.

pub mod data;
pub mod llc;
pub mod mgmt;
pub mod radiotap;
pub mod seq;

use zerocopy::{AsBytes, FromBytes, Unaligned};

pub type MacAddr = [u8; 6];

pub const BROADCAST_ADDR: MacAddr = [0xff; 6];

pub fn is_multicast(addr: &MacAddr) -> bool {
    addr[0] & 0x01 != 0
}

/// Frame `type` field (802.11-2016, 9.2.4.1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FrameType {
    Mgmt = 0b00,
    Data = 0b10,
    Ctrl = 0b01,
    Ext = 0b11,
}

impl FrameType {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0b00 => FrameType::Mgmt,
            0b10 => FrameType::Data,
            0b01 => FrameType::Ctrl,
            _ => FrameType::Ext,
        }
    }
}

pub mod mgmt_subtype {
    pub const ASSOC_REQ: u8 = 0b0000;
    pub const ASSOC_RESP: u8 = 0b0001;
    pub const REASSOC_REQ: u8 = 0b0010;
    pub const REASSOC_RESP: u8 = 0b0011;
    pub const PROBE_REQ: u8 = 0b0100;
    pub const PROBE_RESP: u8 = 0b0101;
    pub const BEACON: u8 = 0b1000;
    pub const DEAUTH: u8 = 0b1100;
    pub const AUTH: u8 = 0b1011;
    pub const DISASSOC: u8 = 0b1010;
}

pub mod data_subtype {
    pub const DATA: u8 = 0b0000;
    pub const NULL: u8 = 0b0100;
}

/// Frame Control field: 2 bits protocol version, 2 bits type, 4 bits
/// subtype, then 8 flag bits (to-DS .. order). Serialized little-endian,
/// so the subtype/type/version occupy the first (low) octet and the flags
/// occupy the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameControl(pub u16);

impl FrameControl {
    const TYPE_SHIFT: u16 = 2;
    const TYPE_MASK: u16 = 0b11 << Self::TYPE_SHIFT;
    const SUBTYPE_SHIFT: u16 = 4;
    const SUBTYPE_MASK: u16 = 0b1111 << Self::SUBTYPE_SHIFT;
    const TO_DS: u16 = 1 << 8;
    const FROM_DS: u16 = 1 << 9;
    const MORE_FRAG: u16 = 1 << 10;
    const RETRY: u16 = 1 << 11;
    const PWR_MGMT: u16 = 1 << 12;
    const MORE_DATA: u16 = 1 << 13;
    const PROTECTED: u16 = 1 << 14;
    const ORDER: u16 = 1 << 15;

    pub fn frame_type(&self) -> FrameType {
        FrameType::from_bits(((self.0 & Self::TYPE_MASK) >> Self::TYPE_SHIFT) as u8)
    }

    pub fn with_frame_type(mut self, t: FrameType) -> Self {
        self.0 = (self.0 & !Self::TYPE_MASK) | ((t as u16) << Self::TYPE_SHIFT);
        self
    }

    pub fn subtype(&self) -> u8 {
        ((self.0 & Self::SUBTYPE_MASK) >> Self::SUBTYPE_SHIFT) as u8
    }

    pub fn with_subtype(mut self, subtype: u8) -> Self {
        self.0 = (self.0 & !Self::SUBTYPE_MASK) | ((subtype as u16) << Self::SUBTYPE_SHIFT);
        self
    }

    pub fn to_ds(&self) -> bool {
        self.0 & Self::TO_DS != 0
    }

    pub fn with_to_ds(mut self, v: bool) -> Self {
        self.set_flag(Self::TO_DS, v);
        self
    }

    pub fn from_ds(&self) -> bool {
        self.0 & Self::FROM_DS != 0
    }

    pub fn with_from_ds(mut self, v: bool) -> Self {
        self.set_flag(Self::FROM_DS, v);
        self
    }

    pub fn retry(&self) -> bool {
        self.0 & Self::RETRY != 0
    }

    pub fn pwr_mgmt(&self) -> bool {
        self.0 & Self::PWR_MGMT != 0
    }

    pub fn more_data(&self) -> bool {
        self.0 & Self::MORE_DATA != 0
    }

    pub fn order(&self) -> bool {
        self.0 & Self::ORDER != 0
    }

    pub fn protected(&self) -> bool {
        self.0 & Self::PROTECTED != 0
    }

    pub fn with_protected(mut self, v: bool) -> Self {
        self.set_flag(Self::PROTECTED, v);
        self
    }

    fn set_flag(&mut self, mask: u16, v: bool) {
        if v {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn from_bytes(b: [u8; 2]) -> Self {
        FrameControl(u16::from_le_bytes(b))
    }
}

/// Sequence Control field: 4-bit fragment number (always 0, per spec.md §3
/// invariants), 12-bit sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceControl(pub u16);

impl SequenceControl {
    pub fn with_seq_num(mut self, seq_num: u16) -> Self {
        self.0 = (seq_num & 0x0fff) << 4;
        self
    }

    pub fn seq_num(&self) -> u16 {
        self.0 >> 4
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn from_bytes(b: [u8; 2]) -> Self {
        SequenceControl(u16::from_le_bytes(b))
    }
}

/// Generic 24-byte 802.11 header shared by management and (non-QoS, non-4-
/// address) data frames: FC, duration, addr1/2/3, sequence control.
#[repr(C, packed)]
#[derive(AsBytes, FromBytes, Unaligned, Debug, Clone, Copy)]
pub struct Dot11Hdr {
    pub frame_ctrl: [u8; 2],
    pub duration: [u8; 2],
    pub addr1: MacAddr,
    pub addr2: MacAddr,
    pub addr3: MacAddr,
    pub seq_ctrl: [u8; 2],
}

impl Dot11Hdr {
    pub const LEN: usize = 24;

    pub fn new(fc: FrameControl, addr1: MacAddr, addr2: MacAddr, addr3: MacAddr, sc: SequenceControl) -> Self {
        Dot11Hdr {
            frame_ctrl: fc.to_bytes(),
            duration: [0; 2],
            addr1,
            addr2,
            addr3,
            seq_ctrl: sc.to_bytes(),
        }
    }

    pub fn fc(&self) -> FrameControl {
        FrameControl::from_bytes(self.frame_ctrl)
    }

    pub fn sc(&self) -> SequenceControl {
        SequenceControl::from_bytes(self.seq_ctrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_control_auth() {
        let fc = FrameControl(0).with_frame_type(FrameType::Mgmt).with_subtype(mgmt_subtype::AUTH);
        assert_eq!(fc.to_bytes(), [0b10110000, 0]);
    }

    #[test]
    fn frame_control_deauth() {
        let fc = FrameControl(0).with_frame_type(FrameType::Mgmt).with_subtype(mgmt_subtype::DEAUTH);
        assert_eq!(fc.to_bytes(), [0b11000000, 0]);
    }

    #[test]
    fn frame_control_protected_data_to_ds() {
        let fc = FrameControl(0)
            .with_frame_type(FrameType::Data)
            .with_subtype(data_subtype::DATA)
            .with_to_ds(true)
            .with_protected(true);
        assert_eq!(fc.to_bytes(), [0b00001000, 0b01000001]);
    }

    #[test]
    fn sequence_control_fragment_always_zero() {
        let sc = SequenceControl(0).with_seq_num(1);
        assert_eq!(sc.to_bytes(), [0x10, 0]);
        assert_eq!(sc.seq_num(), 1);
    }

    #[test]
    fn sequence_control_wraps_mod_4096() {
        let sc = SequenceControl(0).with_seq_num(4096);
        assert_eq!(sc.seq_num(), 0);
    }
}
