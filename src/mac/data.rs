// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Data-frame specific framing: the (non-QoS) data header is just
//! [`super::Dot11Hdr`] with `to_ds`/`from_ds` set appropriately, so the only
//! new layout here is the 8-byte CCMP header that sits between the MAC
//! header and the encrypted MSDU.

use zerocopy::{AsBytes, FromBytes, Unaligned};

/// CCMP header, 802.11-2016 §12.5.3.2. The packet number is split across
/// non-contiguous octets for historical WEP-compatibility reasons: PN0/PN1
/// occupy the first two bytes, then a reserved+ExtIV+KeyId octet, then
/// PN2..PN5.
#[repr(C, packed)]
#[derive(AsBytes, FromBytes, Unaligned, Debug, Clone, Copy)]
pub struct CcmpHdr {
    pub pn0: u8,
    pub pn1: u8,
    pub rsvd_extiv_keyid: u8,
    pub pn2: u8,
    pub pn3: u8,
    pub pn4: u8,
    pub pn5: u8,
}

impl CcmpHdr {
    pub const LEN: usize = 8;
    const EXT_IV_BIT: u8 = 1 << 5;

    pub fn new(pn: u64, key_id: u8) -> Self {
        let b = pn.to_le_bytes();
        CcmpHdr {
            pn0: b[0],
            pn1: b[1],
            rsvd_extiv_keyid: Self::EXT_IV_BIT | ((key_id & 0b11) << 6),
            pn2: b[2],
            pn3: b[3],
            pn4: b[4],
            pn5: b[5],
        }
    }

    /// Reassembles the 48-bit packet number from its scattered octets.
    pub fn pn(&self) -> u64 {
        u64::from_le_bytes([
            self.pn0, self.pn1, self.pn2, self.pn3, self.pn4, self.pn5, 0, 0,
        ])
    }

    pub fn key_id(&self) -> u8 {
        (self.rsvd_extiv_keyid >> 6) & 0b11
    }

    pub fn has_ext_iv(&self) -> bool {
        self.rsvd_extiv_keyid & Self::EXT_IV_BIT != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zerocopy::LayoutVerified;

    #[test]
    fn round_trips_packet_number() {
        let hdr = CcmpHdr::new(0x0000_0102_0304_0506, 1);
        assert_eq!(hdr.pn(), 0x0000_0102_0304_0506);
        assert_eq!(hdr.key_id(), 1);
        assert!(hdr.has_ext_iv());
    }

    #[test]
    fn byte_layout_matches_spec() {
        // PN=1, key_id=0: pn0=1, everything else (besides ExtIV) zero.
        let hdr = CcmpHdr::new(1, 0);
        let bytes = zerocopy::AsBytes::as_bytes(&hdr);
        assert_eq!(bytes, &[0x01, 0x00, 0b0010_0000, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn parses_from_bytes() {
        let raw: [u8; CcmpHdr::LEN] = [0x06, 0x05, 0b0110_0000, 0x04, 0x03, 0x02, 0x01];
        let hdr = LayoutVerified::<_, CcmpHdr>::new_unaligned(&raw[..]).unwrap().into_ref();
        assert_eq!(hdr.pn(), 0x0001_0203_0405_0506);
        assert_eq!(hdr.key_id(), 1);
    }
}
