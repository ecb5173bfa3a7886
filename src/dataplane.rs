// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The per-BSS data path: wraps outgoing Ethernet frames from the upper
//! network into encrypted 802.11 data frames, and unwraps incoming 802.11
//! data frames back into Ethernet frames for the upper network. Unicast
//! frames use the destination station's PTK; group-addressed frames use
//! the BSS GTK.

use crate::bss::Bss;
use crate::crypto::ccmp;
use crate::error::{ApError, CryptoError, HandshakeError};
use crate::mac::llc::{LlcHdr, ETHERTYPE_ARP, ETHERTYPE_IPV4};
use crate::mac::{data_subtype, is_multicast, Dot11Hdr, FrameControl, FrameType, MacAddr, SequenceControl};

/// Builds and encrypts a data frame carrying `eth_payload` (the Ethernet
/// payload after the 14-byte Ethernet header, i.e. the IP/ARP packet) from
/// `eth_src` to `dst` over `bss`. `eth_src` is the Ethernet source address
/// of the frame handed up by the upper network (spec.md §4.4 step 3:
/// "addr3 = SA, source of the Ethernet frame") — the access point's own
/// address for traffic it originates (ARP/ICMP stub replies), or the
/// originating station's address when forwarding between two associated
/// stations. Returns the full over-the-air bytes: MAC header + CCMP header
/// + ciphertext + MIC.
pub fn encrypt_to_station(
    bss: &mut Bss,
    bssid: MacAddr,
    eth_src: MacAddr,
    dst: MacAddr,
    ethertype: u16,
    eth_payload: &[u8],
) -> Result<Vec<u8>, ApError> {
    let seq = bss.seq.next();
    let fc = FrameControl(0)
        .with_frame_type(FrameType::Data)
        .with_subtype(data_subtype::DATA)
        .with_from_ds(true)
        .with_protected(true);
    let hdr = Dot11Hdr::new(fc, dst, bssid, eth_src, SequenceControl(0).with_seq_num(seq));

    let llc = LlcHdr::new(ethertype);
    let mut plaintext = Vec::with_capacity(LlcHdr::LEN + eth_payload.len());
    plaintext.extend_from_slice(zerocopy::AsBytes::as_bytes(&llc));
    plaintext.extend_from_slice(eth_payload);

    let (tk, pn, key_id): (Vec<u8>, u64, u8) = if is_multicast(&dst) {
        let key_id = bss.gtk.key_id;
        let pn = bss.gtk.next_pn();
        (bss.gtk.key.to_vec(), pn, key_id)
    } else {
        let sta = bss
            .station_mut(&dst)
            .ok_or_else(|| ApError::Handshake(HandshakeError::UnknownStation(dst)))?;
        if !sta.is_ptk_installed() {
            return Err(ApError::Handshake(HandshakeError::UnexpectedState));
        }
        let pn = sta.next_tx_pn();
        (sta.ptk().unwrap().tk().to_vec(), pn, 0)
    };

    // The transmitter address in the CCMP nonce is always this access
    // point's BSSID (addr2), regardless of the Ethernet-level source.
    let ciphertext = ccmp::encrypt(&tk, &hdr, &bssid, pn, &plaintext)?;

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + crate::mac::data::CcmpHdr::LEN + ciphertext.len());
    out.extend_from_slice(zerocopy::AsBytes::as_bytes(&hdr));
    let ccmp_hdr = crate::mac::data::CcmpHdr::new(pn, key_id);
    out.extend_from_slice(zerocopy::AsBytes::as_bytes(&ccmp_hdr));
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypted upper-layer payload recovered from a protected data frame,
/// with enough addressing recovered to rebuild an Ethernet frame
/// (spec.md §4.4 step 6: DA = addr3, SA = addr2 for to-DS frames).
pub struct DecryptedFrame {
    pub src: MacAddr,
    pub dst: MacAddr,
    pub ethertype: u16,
    pub payload: Vec<u8>,
}

impl DecryptedFrame {
    /// Serializes as a standard 14-byte-header Ethernet II frame.
    pub fn to_ethernet(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(14 + self.payload.len());
        out.extend_from_slice(&self.dst);
        out.extend_from_slice(&self.src);
        out.extend_from_slice(&self.ethertype.to_be_bytes());
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Decrypts and replay-checks an incoming protected data frame. `hdr` and
/// `ccmp_hdr` have already been parsed out by the dispatcher; `body` is
/// everything after the CCMP header (ciphertext + MIC). Only to-DS frames
/// (station -> access point) are expected here; `hdr.addr1` must already
/// have been checked against the BSSID by the caller.
pub fn decrypt_from_station(
    bss: &mut Bss,
    hdr: &Dot11Hdr,
    ccmp_hdr: &crate::mac::data::CcmpHdr,
    body: &[u8],
) -> Result<DecryptedFrame, ApError> {
    let src = hdr.addr2;
    let dst = hdr.addr3;
    let pn = ccmp_hdr.pn();

    // spec.md §4.4 step 3: key_id=0 selects the station's pairwise TK,
    // key_id=1 selects the BSS's GTK, anything else is dropped.
    let tk = match ccmp_hdr.key_id() {
        0 => {
            let sta = bss
                .station_mut(&src)
                .ok_or_else(|| ApError::Handshake(HandshakeError::UnknownStation(src)))?;
            if !sta.is_ptk_installed() {
                return Err(ApError::Handshake(HandshakeError::UnexpectedState));
            }
            if !sta.accept_rx_pn(pn) {
                return Err(CryptoError::CcmpTagInvalid.into());
            }
            sta.ptk().unwrap().tk().to_vec()
        }
        1 => {
            let sta = bss
                .station(&src)
                .ok_or_else(|| ApError::Handshake(HandshakeError::UnknownStation(src)))?;
            if !sta.is_ptk_installed() {
                return Err(ApError::Handshake(HandshakeError::UnexpectedState));
            }
            bss.gtk.key.to_vec()
        }
        other => return Err(CryptoError::InvalidKeyId(other).into()),
    };

    let plaintext = ccmp::decrypt(&tk, hdr, &src, pn, body)?;
    if plaintext.len() < LlcHdr::LEN {
        return Err(ApError::Codec(crate::error::CodecError::TooShort("LLC header", plaintext.len(), LlcHdr::LEN)));
    }
    let (llc_bytes, payload) = plaintext.split_at(LlcHdr::LEN);
    let llc =
        zerocopy::LayoutVerified::<_, LlcHdr>::new_unaligned(llc_bytes).unwrap().into_ref();
    // Anti-spoofing (spec.md §4.4 step 7): the station this frame was
    // decrypted under (looked up by `addr2`, the transmitter address) is
    // definitionally the Ethernet source, so this holds by construction;
    // stated explicitly here because a future 4-address/mesh extension
    // could decouple addr2 from the logical Ethernet SA.
    debug_assert_eq!(src, hdr.addr2);
    Ok(DecryptedFrame { src, dst, ethertype: llc.ethertype(), payload: payload.to_vec() })
}

pub const SUPPORTED_ETHERTYPES: [u16; 2] = [ETHERTYPE_IPV4, ETHERTYPE_ARP];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::prf::Ptk;
    use crate::station::{HandshakeState, Station};

    fn installed_station(addr: MacAddr, aid: u16) -> Station {
        let mut sta = Station::new(addr, aid);
        // Any PTK works for a loopback-style encrypt/decrypt test; only
        // the TK half is exercised here.
        let ptk = crate::crypto::prf::derive_ptk(&[0x11; 32], &[0x01; 6], &addr, &[0x22; 32], &[0x33; 32]);
        sta.handshake = HandshakeState::Associated { ptk, sent_at: std::time::Instant::now() };
        sta
    }

    #[test]
    fn encrypt_to_station_produces_well_formed_frame() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let dst = [0x02; 6];
        bss.associate(dst).unwrap();
        *bss.station_mut(&dst).unwrap() = installed_station(dst, 1);

        let eth_payload = b"hello upper network";
        let bssid = bss.bssid;
        let frame = encrypt_to_station(&mut bss, bssid, bssid, dst, ETHERTYPE_IPV4, eth_payload).unwrap();
        assert_eq!(
            frame.len(),
            Dot11Hdr::LEN + crate::mac::data::CcmpHdr::LEN + LlcHdr::LEN + eth_payload.len() + ccmp::MIC_LEN
        );
        let hdr = zerocopy::LayoutVerified::<_, Dot11Hdr>::new_unaligned(&frame[..Dot11Hdr::LEN])
            .unwrap()
            .into_ref()
            .clone();
        assert!(hdr.fc().from_ds());
        assert!(hdr.fc().protected());
        assert_eq!(hdr.addr1, dst);
    }

    #[test]
    fn encrypt_to_group_address_uses_gtk_key_id() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let bssid = bss.bssid;
        let gtk_key_id = bss.gtk.key_id;
        let dst = crate::mac::BROADCAST_ADDR;

        let frame = encrypt_to_station(&mut bss, bssid, bssid, dst, ETHERTYPE_ARP, b"broadcast payload").unwrap();
        let ccmp_hdr = zerocopy::LayoutVerified::<_, crate::mac::data::CcmpHdr>::new_unaligned(
            &frame[Dot11Hdr::LEN..Dot11Hdr::LEN + crate::mac::data::CcmpHdr::LEN],
        )
        .unwrap()
        .into_ref();
        // Group-addressed traffic must carry the GTK's key id on the wire
        // (spec.md §4.4 step 1/4), never the pairwise key id 0.
        assert_eq!(ccmp_hdr.key_id(), gtk_key_id);
        assert_ne!(ccmp_hdr.key_id(), 0);
    }

    #[test]
    fn decrypt_from_station_recovers_ethernet_payload() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let src = [0x02; 6];
        bss.associate(src).unwrap();
        *bss.station_mut(&src).unwrap() = installed_station(src, 1);

        // Craft a to-DS data frame as if `src` sent it to the AP.
        let fc = FrameControl(0)
            .with_frame_type(FrameType::Data)
            .with_subtype(data_subtype::DATA)
            .with_to_ds(true)
            .with_protected(true);
        let hdr = Dot11Hdr::new(fc, bss.bssid, src, bss.bssid, SequenceControl(0).with_seq_num(1));
        let tk = bss.station(&src).unwrap().ptk().unwrap().tk().to_vec();
        let llc = LlcHdr::new(ETHERTYPE_IPV4);
        let eth_payload = b"hello access point";
        let mut plaintext = Vec::new();
        plaintext.extend_from_slice(zerocopy::AsBytes::as_bytes(&llc));
        plaintext.extend_from_slice(eth_payload);
        let ciphertext = ccmp::encrypt(&tk, &hdr, &src, 0, &plaintext).unwrap();
        let ccmp_hdr = crate::mac::data::CcmpHdr::new(0, 0);

        let decrypted = decrypt_from_station(&mut bss, &hdr, &ccmp_hdr, &ciphertext).unwrap();
        assert_eq!(decrypted.src, src);
        assert_eq!(decrypted.ethertype, ETHERTYPE_IPV4);
        assert_eq!(decrypted.payload, eth_payload);
    }

    #[test]
    fn decrypt_from_station_rejects_replayed_pn() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let src = [0x02; 6];
        bss.associate(src).unwrap();
        *bss.station_mut(&src).unwrap() = installed_station(src, 1);

        let fc = FrameControl(0)
            .with_frame_type(FrameType::Data)
            .with_subtype(data_subtype::DATA)
            .with_to_ds(true)
            .with_protected(true);
        let hdr = Dot11Hdr::new(fc, bss.bssid, src, bss.bssid, SequenceControl(0).with_seq_num(1));
        let tk = bss.station(&src).unwrap().ptk().unwrap().tk().to_vec();
        let plaintext = vec![0u8; LlcHdr::LEN + 4];
        let ciphertext = ccmp::encrypt(&tk, &hdr, &src, 5, &plaintext).unwrap();
        let ccmp_hdr = crate::mac::data::CcmpHdr::new(5, 0);

        decrypt_from_station(&mut bss, &hdr, &ccmp_hdr, &ciphertext).unwrap();
        assert!(decrypt_from_station(&mut bss, &hdr, &ccmp_hdr, &ciphertext).is_err());
    }

    #[test]
    fn decrypt_from_station_accepts_group_key_id() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let src = [0x02; 6];
        bss.associate(src).unwrap();
        *bss.station_mut(&src).unwrap() = installed_station(src, 1);

        let fc = FrameControl(0)
            .with_frame_type(FrameType::Data)
            .with_subtype(data_subtype::DATA)
            .with_to_ds(true)
            .with_protected(true);
        let hdr = Dot11Hdr::new(fc, bss.bssid, src, bss.bssid, SequenceControl(0).with_seq_num(1));
        let gtk_key = bss.gtk.key;
        let gtk_key_id = bss.gtk.key_id;
        let llc = LlcHdr::new(ETHERTYPE_IPV4);
        let eth_payload = b"group-keyed payload";
        let mut plaintext = Vec::new();
        plaintext.extend_from_slice(zerocopy::AsBytes::as_bytes(&llc));
        plaintext.extend_from_slice(eth_payload);
        let ciphertext = ccmp::encrypt(&gtk_key, &hdr, &src, 0, &plaintext).unwrap();
        let ccmp_hdr = crate::mac::data::CcmpHdr::new(0, gtk_key_id);

        let decrypted = decrypt_from_station(&mut bss, &hdr, &ccmp_hdr, &ciphertext).unwrap();
        assert_eq!(decrypted.payload, eth_payload);
    }

    #[test]
    fn decrypt_from_station_rejects_invalid_key_id() {
        let mut bss = Bss::new([0x01; 6], b"net".to_vec(), "password123", 6);
        let src = [0x02; 6];
        bss.associate(src).unwrap();
        *bss.station_mut(&src).unwrap() = installed_station(src, 1);

        let fc = FrameControl(0)
            .with_frame_type(FrameType::Data)
            .with_subtype(data_subtype::DATA)
            .with_to_ds(true)
            .with_protected(true);
        let hdr = Dot11Hdr::new(fc, bss.bssid, src, bss.bssid, SequenceControl(0).with_seq_num(1));
        let tk = bss.station(&src).unwrap().ptk().unwrap().tk().to_vec();
        let plaintext = vec![0u8; LlcHdr::LEN + 4];
        let ciphertext = ccmp::encrypt(&tk, &hdr, &src, 0, &plaintext).unwrap();
        // key_id is a 2-bit field; 2 and 3 are never assigned by this
        // access point and must be dropped, not decrypted under the TK.
        let ccmp_hdr = crate::mac::data::CcmpHdr::new(0, 2);

        assert!(decrypt_from_station(&mut bss, &hdr, &ccmp_hdr, &ciphertext).is_err());
    }
}
