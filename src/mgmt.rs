// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Builds the management frames this access point emits (beacon, probe
//! response, authentication response, (re)association response,
//! deauthentication) and parses the one management IE the receive path
//! actually needs out of a station's frame: the SSID carried in a probe
//! request. Ties [`crate::mac::mgmt`]'s fixed fields and [`crate::ie`]'s
//! element writers to a concrete [`crate::bss::Bss`], the way the reference
//! implementation's `dot11_*` methods do, minus the packet-library object
//! graph.

use crate::bss::Bss;
use crate::ie::{self, rsne};
use crate::mac::mgmt::{AssocRespFields, AuthFields, BeaconFields, ReasonCode};
use crate::mac::{mgmt_subtype, Dot11Hdr, FrameControl, FrameType, MacAddr, SequenceControl};
use zerocopy::AsBytes;

/// Capability Information bits this access point sets (802.11-2016 §9.4.1.4).
const CAP_ESS: u16 = 1 << 0;
const CAP_PRIVACY: u16 = 1 << 4;
const CAP_SHORT_PREAMBLE: u16 = 1 << 5;

fn capability_info() -> u16 {
    CAP_ESS | CAP_PRIVACY | CAP_SHORT_PREAMBLE
}

/// Appends the body IEs common to beacons and probe responses: SSID, rate
/// sets, DS parameter set, country, and RSNE.
fn write_common_ies(out: &mut Vec<u8>, bss: &Bss) {
    ie::write_ssid(out, &bss.ssid);
    ie::write_supported_rates(out);
    ie::write_ds_param_set(out, bss.channel);
    write_country_ie(out, bss.channel);
    let rsne_body = rsne::build();
    ie::write_ie(out, ie::ID_RSNE, &rsne_body);
}

const COUNTRY_CODE: &[u8; 2] = b"US";
const COUNTRY_ENV_ALL: u8 = 0x20;
const COUNTRY_MAX_POWER_DBM: u8 = 0x17;

/// Country element (802.11-2016 §9.4.2.9): country code, environment byte,
/// then one (first channel, number of channels, max power) triplet covering
/// just this BSS's channel, matching the single-triplet country IE the
/// reference implementation advertises.
fn write_country_ie(out: &mut Vec<u8>, channel: u8) {
    let mut body = Vec::with_capacity(5);
    body.extend_from_slice(COUNTRY_CODE);
    body.push(COUNTRY_ENV_ALL);
    body.push(channel);
    body.push(1);
    body.push(COUNTRY_MAX_POWER_DBM);
    ie::write_ie(out, ie::ID_COUNTRY, &body);
}

fn mgmt_frame(fc_subtype: u8, addr1: MacAddr, addr2: MacAddr, addr3: MacAddr, seq: u16) -> Dot11Hdr {
    let fc = FrameControl(0).with_frame_type(FrameType::Mgmt).with_subtype(fc_subtype);
    Dot11Hdr::new(fc, addr1, addr2, addr3, SequenceControl(0).with_seq_num(seq))
}

/// Builds one beacon frame for `bss`. `timestamp_us` is microseconds since
/// this access point started (spec.md §4.5 permits a wall-clock delta).
pub fn build_beacon(bss: &Bss, timestamp_us: u64) -> Vec<u8> {
    let seq = bss.seq.next();
    let hdr = mgmt_frame(mgmt_subtype::BEACON, crate::mac::BROADCAST_ADDR, bss.bssid, bss.bssid, seq);
    let fields = BeaconFields::new(timestamp_us, bss.beacon_interval_tu, capability_info());

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + BeaconFields::LEN + 64);
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(fields.as_bytes());
    write_common_ies(&mut out, bss);
    out
}

/// Builds a probe response addressed to `dst`.
pub fn build_probe_response(bss: &Bss, dst: MacAddr, timestamp_us: u64) -> Vec<u8> {
    let seq = bss.seq.next();
    let hdr = mgmt_frame(mgmt_subtype::PROBE_RESP, dst, bss.bssid, bss.bssid, seq);
    let fields = BeaconFields::new(timestamp_us, bss.beacon_interval_tu, capability_info());

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + BeaconFields::LEN + 64);
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(fields.as_bytes());
    write_common_ies(&mut out, bss);
    out
}

/// Parses a probe request body for its SSID element. Returns `Some(ssid)`;
/// an empty `Vec` means a wildcard probe (spec.md §4.3: "if a probe-request
/// carries an empty SSID element, respond with the primary BSS").
pub fn parse_probe_request_ssid(body: &[u8]) -> Option<Vec<u8>> {
    for ie in ie::iter(body) {
        let ie = ie.ok()?;
        if ie.id == ie::ID_SSID {
            return Some(ie.body.to_vec());
        }
    }
    None
}

/// Builds an Open System authentication response (sequence number 2,
/// success) addressed to `dst`.
pub fn build_auth_response(bss: &Bss, dst: MacAddr) -> Vec<u8> {
    let seq = bss.seq.next();
    let hdr = mgmt_frame(mgmt_subtype::AUTH, dst, bss.bssid, bss.bssid, seq);
    let fields = AuthFields::open(2, crate::mac::mgmt::STATUS_SUCCESS);

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + AuthFields::LEN);
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(fields.as_bytes());
    out
}

/// Builds an association (or reassociation) response, status success, with
/// the allocated `aid`. `reassoc` selects the reassociation-response
/// subtype per spec.md §4.3.
pub fn build_assoc_response(bss: &Bss, dst: MacAddr, aid: u16, reassoc: bool) -> Vec<u8> {
    let subtype = if reassoc { mgmt_subtype::REASSOC_RESP } else { mgmt_subtype::ASSOC_RESP };
    let seq = bss.seq.next();
    let hdr = mgmt_frame(subtype, dst, bss.bssid, bss.bssid, seq);
    let fields = AssocRespFields::new(capability_info(), crate::mac::mgmt::STATUS_SUCCESS, aid);

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + AssocRespFields::LEN);
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(fields.as_bytes());
    out
}

/// Builds a deauthentication frame with the given reason code.
pub fn build_deauth(bss: &Bss, dst: MacAddr, reason: u16) -> Vec<u8> {
    let seq = bss.seq.next();
    let hdr = mgmt_frame(mgmt_subtype::DEAUTH, dst, bss.bssid, bss.bssid, seq);
    let fields = ReasonCode::new(reason);

    let mut out = Vec::with_capacity(Dot11Hdr::LEN + ReasonCode::LEN);
    out.extend_from_slice(hdr.as_bytes());
    out.extend_from_slice(fields.as_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bss() -> Bss {
        Bss::new([0xaa; 6], b"test-network".to_vec(), "password123", 6)
    }

    #[test]
    fn beacon_carries_configured_ssid_and_privacy_bit() {
        let bss = bss();
        let frame = build_beacon(&bss, 0);
        let body = &frame[Dot11Hdr::LEN + BeaconFields::LEN..];
        let ssid_ie = ie::iter(body).find_map(|ie| ie.ok().filter(|ie| ie.id == ie::ID_SSID));
        assert_eq!(ssid_ie.unwrap().body, b"test-network");
        let fields = zerocopy::LayoutVerified::<_, BeaconFields>::new_unaligned(
            &frame[Dot11Hdr::LEN..Dot11Hdr::LEN + BeaconFields::LEN],
        )
        .unwrap()
        .into_ref();
        let cap = u16::from_le_bytes(fields.capability_info);
        assert_ne!(cap & CAP_PRIVACY, 0);
        assert_ne!(cap & CAP_ESS, 0);
    }

    #[test]
    fn probe_response_echoes_configured_ssid() {
        let bss = bss();
        let frame = build_probe_response(&bss, [0x01; 6], 1234);
        let body = &frame[Dot11Hdr::LEN + BeaconFields::LEN..];
        let ssid_ie = ie::iter(body).find_map(|ie| ie.ok().filter(|ie| ie.id == ie::ID_SSID));
        assert_eq!(ssid_ie.unwrap().body, b"test-network");
    }

    #[test]
    fn empty_probe_request_ssid_parses_as_wildcard() {
        let buf = [ie::ID_SSID, 0];
        assert_eq!(parse_probe_request_ssid(&buf), Some(Vec::new()));
    }

    #[test]
    fn assoc_response_sets_aid_reserved_bits() {
        let bss = bss();
        let frame = build_assoc_response(&bss, [0x01; 6], 5, false);
        let fields = zerocopy::LayoutVerified::<_, AssocRespFields>::new_unaligned(
            &frame[Dot11Hdr::LEN..Dot11Hdr::LEN + AssocRespFields::LEN],
        )
        .unwrap()
        .into_ref();
        assert_eq!(u16::from_le_bytes(fields.association_id), 0xc005);
    }
}
