// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! LLC/SNAP encapsulation used to carry Ethernet payloads inside 802.11
//! data frames (802.11-2016, Annex G). A fixed 8-byte header: DSAP/SSAP
//! 0xAA, control 0x03, OUI 00:00:00, then the big-endian EtherType.

use zerocopy::{AsBytes, FromBytes, Unaligned};

pub const DSAP_SNAP: u8 = 0xaa;
pub const SSAP_SNAP: u8 = 0xaa;
pub const CONTROL_UNNUMBERED: u8 = 0x03;

#[repr(C, packed)]
#[derive(AsBytes, FromBytes, Unaligned, Debug, Clone, Copy)]
pub struct LlcHdr {
    pub dsap: u8,
    pub ssap: u8,
    pub control: u8,
    pub oui: [u8; 3],
    pub protocol_id: [u8; 2],
}

impl LlcHdr {
    pub const LEN: usize = 8;

    pub fn new(ethertype: u16) -> Self {
        LlcHdr {
            dsap: DSAP_SNAP,
            ssap: SSAP_SNAP,
            control: CONTROL_UNNUMBERED,
            oui: [0, 0, 0],
            protocol_id: ethertype.to_be_bytes(),
        }
    }

    pub fn ethertype(&self) -> u16 {
        u16::from_be_bytes(self.protocol_id)
    }

    pub fn is_snap(&self) -> bool {
        self.dsap == DSAP_SNAP && self.ssap == SSAP_SNAP && self.oui == [0, 0, 0]
    }
}

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_EAPOL: u16 = 0x888e;

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::AsBytes;

    #[test]
    fn snap_header_bytes() {
        let hdr = LlcHdr::new(ETHERTYPE_IPV4);
        assert_eq!(hdr.as_bytes(), &[0xaa, 0xaa, 0x03, 0, 0, 0, 0x08, 0x00]);
    }
}
