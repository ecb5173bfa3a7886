// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Application-layer stub responders: ARP, ICMP echo, DHCP/BOOTP, and a
//! single-record DNS responder. Each function takes a decrypted Ethernet
//! frame and, if it recognizes and wants to answer the protocol, returns a
//! complete reply Ethernet frame. These are "frame in, frame out"
//! collaborators behind the upper-network bridge (spec.md §1 Non-goals);
//! none of them touch 802.11/CCMP state. Grounded on the reference
//! implementation's `handle_arp`/`handle_icmp`/`handle_dns`/`handle_bootp`,
//! reimplemented over raw bytes instead of a packet-construction library.

use crate::mac::llc::{ETHERTYPE_ARP, ETHERTYPE_IPV4};
use crate::mac::MacAddr;

const ETH_HDR_LEN: usize = 14;
const ARP_LEN: usize = 28;
const ARP_OP_REQUEST: u16 = 1;
const ARP_OP_REPLY: u16 = 2;

const IP_PROTO_ICMP: u8 = 1;
const IP_PROTO_UDP: u8 = 17;

const ICMP_ECHO_REQUEST: u8 = 8;
const ICMP_ECHO_REPLY: u8 = 0;

const UDP_PORT_DNS: u16 = 53;
const UDP_PORT_DHCP_SERVER: u16 = 67;
const UDP_PORT_DHCP_CLIENT: u16 = 68;

const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];
const DHCP_OPT_MESSAGE_TYPE: u8 = 53;
const DHCP_OPT_END: u8 = 255;
const DHCPDISCOVER: u8 = 1;
const DHCPREQUEST: u8 = 3;

/// Fixed identity this access point answers bootstrap traffic as: its own
/// IPv4 address and the MAC address it puts in the Ethernet source field
/// of replies it originates (normally the BSS's own BSSID).
#[derive(Debug, Clone, Copy)]
pub struct StubIdentity {
    pub mac: MacAddr,
    pub ipv4: [u8; 4],
}

/// Runs every stub in the reference implementation's `handle_data_packet`
/// priority order (BOOTP, then ARP, then DNS, then ICMP) and returns the
/// first reply produced, or `None` if nothing recognized the frame.
pub fn handle(id: &StubIdentity, eth_frame: &[u8]) -> Option<Vec<u8>> {
    handle_bootp(id, eth_frame)
        .or_else(|| handle_arp(id, eth_frame))
        .or_else(|| handle_dns(id, eth_frame))
        .or_else(|| handle_icmp(id, eth_frame))
}

fn ethertype(eth_frame: &[u8]) -> Option<u16> {
    if eth_frame.len() < ETH_HDR_LEN {
        return None;
    }
    Some(u16::from_be_bytes([eth_frame[12], eth_frame[13]]))
}

fn eth_src(eth_frame: &[u8]) -> MacAddr {
    let mut m = [0u8; 6];
    m.copy_from_slice(&eth_frame[6..12]);
    m
}

fn build_ethernet(dst: MacAddr, src: MacAddr, ethertype: u16, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(ETH_HDR_LEN + payload.len());
    out.extend_from_slice(&dst);
    out.extend_from_slice(&src);
    out.extend_from_slice(&ethertype.to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// Replies to an ARP request asking "who has `ap_ip`" with this access
/// point's own MAC, matching `handle_arp`'s unconditional is-at reply (the
/// reference implementation does not check the target IP; neither do we,
/// since the synthetic network only ever serves one address).
fn handle_arp(id: &StubIdentity, eth_frame: &[u8]) -> Option<Vec<u8>> {
    if ethertype(eth_frame)? != ETHERTYPE_ARP {
        return None;
    }
    let body = &eth_frame[ETH_HDR_LEN..];
    if body.len() < ARP_LEN {
        return None;
    }
    let oper = u16::from_be_bytes([body[6], body[7]]);
    if oper != ARP_OP_REQUEST {
        return None;
    }
    let mut sender_mac = [0u8; 6];
    sender_mac.copy_from_slice(&body[8..14]);
    let mut sender_ip = [0u8; 4];
    sender_ip.copy_from_slice(&body[14..18]);

    let mut reply = Vec::with_capacity(ARP_LEN);
    reply.extend_from_slice(&[0x00, 0x01]); // htype: Ethernet
    reply.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes()); // ptype
    reply.push(6); // hlen
    reply.push(4); // plen
    reply.extend_from_slice(&ARP_OP_REPLY.to_be_bytes());
    reply.extend_from_slice(&id.mac);
    reply.extend_from_slice(&id.ipv4);
    reply.extend_from_slice(&sender_mac);
    reply.extend_from_slice(&sender_ip);

    Some(build_ethernet(sender_mac, id.mac, ETHERTYPE_ARP, &reply))
}

struct Ipv4View<'a> {
    protocol: u8,
    src: [u8; 4],
    dst: [u8; 4],
    header_len: usize,
    payload: &'a [u8],
}

fn parse_ipv4(body: &[u8]) -> Option<Ipv4View<'_>> {
    if body.len() < 20 {
        return None;
    }
    if body[0] >> 4 != 4 {
        return None;
    }
    let header_len = ((body[0] & 0x0f) as usize) * 4;
    if body.len() < header_len {
        return None;
    }
    let mut src = [0u8; 4];
    src.copy_from_slice(&body[12..16]);
    let mut dst = [0u8; 4];
    dst.copy_from_slice(&body[16..20]);
    Some(Ipv4View { protocol: body[9], src, dst, header_len, payload: &body[header_len..] })
}

/// Internet checksum (RFC 1071): one's-complement sum of 16-bit words.
fn checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut iter = data.chunks_exact(2);
    for word in &mut iter {
        sum += u16::from_be_bytes([word[0], word[1]]) as u32;
    }
    if let [last] = iter.remainder() {
        sum += (*last as u32) << 8;
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}

fn build_ipv4_udp(src: [u8; 4], dst: [u8; 4], sport: u16, dport: u16, payload: &[u8]) -> Vec<u8> {
    let udp_len = 8 + payload.len();
    let mut udp = Vec::with_capacity(udp_len);
    udp.extend_from_slice(&sport.to_be_bytes());
    udp.extend_from_slice(&dport.to_be_bytes());
    udp.extend_from_slice(&(udp_len as u16).to_be_bytes());
    udp.extend_from_slice(&[0, 0]); // checksum left at 0: optional for IPv4
    udp.extend_from_slice(payload);

    build_ipv4(src, dst, IP_PROTO_UDP, &udp)
}

fn build_ipv4(src: [u8; 4], dst: [u8; 4], protocol: u8, payload: &[u8]) -> Vec<u8> {
    let total_len = 20 + payload.len();
    let mut hdr = Vec::with_capacity(20);
    hdr.push(0x45); // version 4, IHL 5
    hdr.push(0); // DSCP/ECN
    hdr.extend_from_slice(&(total_len as u16).to_be_bytes());
    hdr.extend_from_slice(&[0, 0]); // identification
    hdr.extend_from_slice(&[0, 0]); // flags/fragment offset
    hdr.push(64); // TTL
    hdr.push(protocol);
    hdr.extend_from_slice(&[0, 0]); // checksum placeholder
    hdr.extend_from_slice(&src);
    hdr.extend_from_slice(&dst);
    let csum = checksum(&hdr);
    hdr[10..12].copy_from_slice(&csum.to_be_bytes());

    let mut out = Vec::with_capacity(total_len);
    out.extend_from_slice(&hdr);
    out.extend_from_slice(payload);
    out
}

/// Replies to an ICMP echo request with an echo reply carrying the same
/// identifier, sequence number, and payload, matching `handle_icmp`.
fn handle_icmp(id: &StubIdentity, eth_frame: &[u8]) -> Option<Vec<u8>> {
    if ethertype(eth_frame)? != ETHERTYPE_IPV4 {
        return None;
    }
    let ip = parse_ipv4(&eth_frame[ETH_HDR_LEN..])?;
    if ip.protocol != IP_PROTO_ICMP || ip.payload.len() < 8 {
        return None;
    }
    if ip.payload[0] != ICMP_ECHO_REQUEST {
        return None;
    }

    let mut reply = Vec::with_capacity(ip.payload.len());
    reply.push(ICMP_ECHO_REPLY);
    reply.push(0); // code
    reply.extend_from_slice(&[0, 0]); // checksum placeholder
    reply.extend_from_slice(&ip.payload[4..]); // id, seq, and echoed data
    let csum = checksum(&reply);
    reply[2..4].copy_from_slice(&csum.to_be_bytes());

    let ip_packet = build_ipv4(id.ipv4, ip.src, IP_PROTO_ICMP, &reply);
    Some(build_ethernet(eth_src(eth_frame), id.mac, ETHERTYPE_IPV4, &ip_packet))
}

/// A DNS question, borrowed from the query, including its raw encoded
/// name so the answer can reuse it verbatim (matching `handle_dns`'s
/// `rrname=packet[DNS].qd.qname`).
struct DnsQuestion<'a> {
    raw_name: &'a [u8],
}

fn parse_dns_question(buf: &[u8]) -> Option<DnsQuestion<'_>> {
    if buf.len() < 12 {
        return None;
    }
    let qdcount = u16::from_be_bytes([buf[4], buf[5]]);
    if qdcount == 0 {
        return None;
    }
    let mut off = 12;
    let name_start = off;
    loop {
        if off >= buf.len() {
            return None;
        }
        let len = buf[off] as usize;
        if len == 0 {
            off += 1;
            break;
        }
        off += 1 + len;
    }
    if off + 4 > buf.len() {
        return None;
    }
    Some(DnsQuestion { raw_name: &buf[name_start..off] })
}

/// Answers a DNS A-record query for any name with this access point's own
/// IPv4 address, skipping mDNS (224.0.0.0/24 destination) the way
/// `handle_dns` does.
fn handle_dns(id: &StubIdentity, eth_frame: &[u8]) -> Option<Vec<u8>> {
    if ethertype(eth_frame)? != ETHERTYPE_IPV4 {
        return None;
    }
    let ip = parse_ipv4(&eth_frame[ETH_HDR_LEN..])?;
    if ip.protocol != IP_PROTO_UDP || ip.dst[0..3] == [224, 0, 0] {
        return None;
    }
    if ip.payload.len() < 8 {
        return None;
    }
    let sport = u16::from_be_bytes([ip.payload[0], ip.payload[1]]);
    let dport = u16::from_be_bytes([ip.payload[2], ip.payload[3]]);
    if dport != UDP_PORT_DNS {
        return None;
    }
    let dns = &ip.payload[8..];
    let question = parse_dns_question(dns)?;

    let mut answer = Vec::new();
    answer.extend_from_slice(&dns[0..2]); // id
    answer.extend_from_slice(&[0x85, 0x00]); // flags: response, authoritative, no recursion
    answer.extend_from_slice(&[0, 1]); // qdcount
    answer.extend_from_slice(&[0, 1]); // ancount
    answer.extend_from_slice(&[0, 0]); // nscount
    answer.extend_from_slice(&[0, 0]); // arcount
    answer.extend_from_slice(&dns[12..12 + question.raw_name.len() + 4]); // echoed question
    answer.extend_from_slice(question.raw_name);
    answer.extend_from_slice(&[0, 1]); // type A
    answer.extend_from_slice(&[0, 1]); // class IN
    answer.extend_from_slice(&600u32.to_be_bytes()); // ttl
    answer.extend_from_slice(&[0, 4]); // rdlength
    answer.extend_from_slice(&id.ipv4);

    let ip_packet = build_ipv4_udp(id.ipv4, ip.src, UDP_PORT_DNS, sport, &answer);
    Some(build_ethernet(eth_src(eth_frame), id.mac, ETHERTYPE_IPV4, &ip_packet))
}

fn find_dhcp_option(options: &[u8], want: u8) -> Option<&[u8]> {
    let mut off = 0;
    while off < options.len() {
        let code = options[off];
        if code == DHCP_OPT_END || code == 0 {
            break;
        }
        if off + 1 >= options.len() {
            break;
        }
        let len = options[off + 1] as usize;
        if off + 2 + len > options.len() {
            break;
        }
        let value = &options[off + 2..off + 2 + len];
        if code == want {
            return Some(value);
        }
        off += 2 + len;
    }
    None
}

/// One address beyond this access point's own, the single lease the
/// reference implementation's `handle_bootp` ever hands out.
fn next_ip(ap_ip: [u8; 4]) -> [u8; 4] {
    let mut client = ap_ip;
    client[3] = client[3].wrapping_add(1);
    client
}

/// Minimal DHCP/BOOTP server: answers DHCPDISCOVER with an OFFER and
/// DHCPREQUEST with an ACK, both leasing the single address
/// [`next_ip`] computes. Matches `handle_bootp`'s fixed single-client
/// behavior; DHCPRELEASE/DHCPDECLINE and multi-client leasing are out of
/// scope (spec.md §1 Non-goals: this is a stub, not a DHCP server).
fn handle_bootp(id: &StubIdentity, eth_frame: &[u8]) -> Option<Vec<u8>> {
    if ethertype(eth_frame)? != ETHERTYPE_IPV4 {
        return None;
    }
    let ip = parse_ipv4(&eth_frame[ETH_HDR_LEN..])?;
    if ip.protocol != IP_PROTO_UDP || ip.payload.len() < 240 {
        return None;
    }
    let sport = u16::from_be_bytes([ip.payload[0], ip.payload[1]]);
    let dport = u16::from_be_bytes([ip.payload[2], ip.payload[3]]);
    if dport != UDP_PORT_DHCP_SERVER || sport != UDP_PORT_DHCP_CLIENT {
        return None;
    }
    let bootp = &ip.payload[8..];
    if bootp[0] != 1 {
        return None; // not BOOTREQUEST
    }
    let mut xid = [0u8; 4];
    xid.copy_from_slice(&bootp[4..8]);
    let mut chaddr = [0u8; 6];
    chaddr.copy_from_slice(&bootp[28..34]);
    if bootp[236..240] != DHCP_MAGIC_COOKIE {
        return None;
    }
    let msg_type = *find_dhcp_option(&bootp[240..], DHCP_OPT_MESSAGE_TYPE)?.first()?;

    let client_ip = next_ip(id.ipv4);
    let mut options = Vec::new();
    match msg_type {
        DHCPDISCOVER => {
            options.extend_from_slice(&[DHCP_OPT_MESSAGE_TYPE, 1, 2]); // OFFER
            push_dhcp_option(&mut options, 1, &[255, 255, 255, 0]); // subnet mask
            push_dhcp_option(&mut options, 54, &id.ipv4); // server id
        }
        DHCPREQUEST => {
            options.extend_from_slice(&[DHCP_OPT_MESSAGE_TYPE, 1, 5]); // ACK
            push_dhcp_option(&mut options, 54, &id.ipv4);
            push_dhcp_option(&mut options, 51, &43200u32.to_be_bytes()); // lease time
            push_dhcp_option(&mut options, 1, &[255, 255, 255, 0]);
            push_dhcp_option(&mut options, 3, &id.ipv4); // router
            push_dhcp_option(&mut options, 6, &id.ipv4); // name server
            options.push(15); // domain name
            options.push(b"localdomain".len() as u8);
            options.extend_from_slice(b"localdomain");
        }
        _ => return None,
    }
    options.push(DHCP_OPT_END);

    let mut reply = Vec::with_capacity(240 + options.len());
    reply.push(2); // BOOTREPLY
    reply.push(1); // htype Ethernet
    reply.push(6); // hlen
    reply.push(0); // hops
    reply.extend_from_slice(&xid);
    reply.extend_from_slice(&[0, 0]); // secs
    reply.extend_from_slice(&[0, 0]); // flags
    reply.extend_from_slice(&[0, 0, 0, 0]); // ciaddr
    reply.extend_from_slice(&client_ip); // yiaddr
    reply.extend_from_slice(&id.ipv4); // siaddr
    reply.extend_from_slice(&id.ipv4); // giaddr
    reply.extend_from_slice(&chaddr);
    reply.extend_from_slice(&[0u8; 10]); // chaddr padding
    reply.extend_from_slice(&[0u8; 64]); // sname
    reply.extend_from_slice(&[0u8; 128]); // file
    reply.extend_from_slice(&DHCP_MAGIC_COOKIE);
    reply.extend_from_slice(&options);

    let ip_packet = build_ipv4_udp(id.ipv4, client_ip, UDP_PORT_DHCP_SERVER, UDP_PORT_DHCP_CLIENT, &reply);
    Some(build_ethernet(chaddr, id.mac, ETHERTYPE_IPV4, &ip_packet))
}

fn push_dhcp_option(out: &mut Vec<u8>, code: u8, value: &[u8]) {
    out.push(code);
    out.push(value.len() as u8);
    out.extend_from_slice(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> StubIdentity {
        StubIdentity { mac: [0xaa; 6], ipv4: [10, 0, 0, 1] }
    }

    fn arp_request(sender_mac: MacAddr, sender_ip: [u8; 4], target_ip: [u8; 4]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(&[0, 1]);
        body.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
        body.push(6);
        body.push(4);
        body.extend_from_slice(&ARP_OP_REQUEST.to_be_bytes());
        body.extend_from_slice(&sender_mac);
        body.extend_from_slice(&sender_ip);
        body.extend_from_slice(&[0; 6]);
        body.extend_from_slice(&target_ip);
        build_ethernet([0xff; 6], sender_mac, ETHERTYPE_ARP, &body)
    }

    #[test]
    fn arp_request_gets_is_at_reply() {
        let frame = arp_request([0x02; 6], [10, 0, 0, 5], [10, 0, 0, 1]);
        let reply = handle(&id(), &frame).unwrap();
        assert_eq!(ethertype(&reply), Some(ETHERTYPE_ARP));
        assert_eq!(&reply[0..6], &[0x02; 6]); // eth dst = original sender
        let arp_body = &reply[ETH_HDR_LEN..];
        assert_eq!(u16::from_be_bytes([arp_body[6], arp_body[7]]), ARP_OP_REPLY);
        assert_eq!(&arp_body[8..14], &id().mac);
        assert_eq!(&arp_body[14..18], &id().ipv4);
    }

    fn icmp_echo_request(src_ip: [u8; 4], dst_ip: [u8; 4], id_field: u16, seq: u16) -> Vec<u8> {
        let mut icmp = Vec::new();
        icmp.push(ICMP_ECHO_REQUEST);
        icmp.push(0);
        icmp.extend_from_slice(&[0, 0]);
        icmp.extend_from_slice(&id_field.to_be_bytes());
        icmp.extend_from_slice(&seq.to_be_bytes());
        icmp.extend_from_slice(b"ping");
        let ip_packet = build_ipv4(src_ip, dst_ip, IP_PROTO_ICMP, &icmp);
        build_ethernet([0xaa; 6], [0x02; 6], ETHERTYPE_IPV4, &ip_packet)
    }

    #[test]
    fn icmp_echo_request_gets_matching_reply() {
        let frame = icmp_echo_request([10, 0, 0, 5], [10, 0, 0, 1], 0x1234, 1);
        let reply = handle(&id(), &frame).unwrap();
        let ip = parse_ipv4(&reply[ETH_HDR_LEN..]).unwrap();
        assert_eq!(ip.protocol, IP_PROTO_ICMP);
        assert_eq!(ip.payload[0], ICMP_ECHO_REPLY);
        assert_eq!(&ip.payload[4..6], &0x1234u16.to_be_bytes());
        assert_eq!(&ip.payload[8..], b"ping");
    }

    #[test]
    fn non_echo_request_icmp_is_ignored() {
        let mut frame = icmp_echo_request([10, 0, 0, 5], [10, 0, 0, 1], 1, 1);
        frame[ETH_HDR_LEN + 20] = 3; // destination unreachable, not echo-request
        assert!(handle_icmp(&id(), &frame).is_none());
    }

    fn dns_query(name_labels: &[&[u8]]) -> Vec<u8> {
        let mut qname = Vec::new();
        for label in name_labels {
            qname.push(label.len() as u8);
            qname.extend_from_slice(label);
        }
        qname.push(0);

        let mut dns = Vec::new();
        dns.extend_from_slice(&[0x00, 0x42]); // id
        dns.extend_from_slice(&[0x01, 0x00]); // flags: recursion desired
        dns.extend_from_slice(&[0, 1]);
        dns.extend_from_slice(&[0, 0]);
        dns.extend_from_slice(&[0, 0]);
        dns.extend_from_slice(&[0, 0]);
        dns.extend_from_slice(&qname);
        dns.extend_from_slice(&[0, 1]); // type A
        dns.extend_from_slice(&[0, 1]); // class IN

        let mut udp = Vec::new();
        udp.extend_from_slice(&12345u16.to_be_bytes());
        udp.extend_from_slice(&UDP_PORT_DNS.to_be_bytes());
        udp.extend_from_slice(&((8 + dns.len()) as u16).to_be_bytes());
        udp.extend_from_slice(&[0, 0]);
        udp.extend_from_slice(&dns);

        let ip_packet = build_ipv4([10, 0, 0, 5], [10, 0, 0, 1], IP_PROTO_UDP, &udp);
        build_ethernet([0xaa; 6], [0x02; 6], ETHERTYPE_IPV4, &ip_packet)
    }

    #[test]
    fn dns_a_query_answers_with_own_address() {
        let frame = dns_query(&[b"example", b"com"]);
        let reply = handle(&id(), &frame).unwrap();
        let ip = parse_ipv4(&reply[ETH_HDR_LEN..]).unwrap();
        let dns = &ip.payload[8..];
        assert_eq!(u16::from_be_bytes([dns[6], dns[7]]), 1); // ancount
        assert_eq!(&dns[dns.len() - 4..], &id().ipv4);
    }

    #[test]
    fn mdns_destination_is_ignored() {
        let mut frame = dns_query(&[b"local"]);
        // Overwrite the IPv4 destination with an mDNS multicast address.
        frame[ETH_HDR_LEN + 16..ETH_HDR_LEN + 20].copy_from_slice(&[224, 0, 0, 251]);
        assert!(handle_dns(&id(), &frame).is_none());
    }

    fn dhcp_request(msg_type: u8, chaddr: MacAddr, xid: [u8; 4]) -> Vec<u8> {
        let mut bootp = vec![0u8; 240];
        bootp[0] = 1; // BOOTREQUEST
        bootp[1] = 1;
        bootp[2] = 6;
        bootp[4..8].copy_from_slice(&xid);
        bootp[28..34].copy_from_slice(&chaddr);
        bootp[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);
        bootp.extend_from_slice(&[DHCP_OPT_MESSAGE_TYPE, 1, msg_type, DHCP_OPT_END]);

        let ip_packet = build_ipv4_udp([0, 0, 0, 0], [255, 255, 255, 255], UDP_PORT_DHCP_CLIENT, UDP_PORT_DHCP_SERVER, &bootp);
        build_ethernet([0xaa; 6], chaddr, ETHERTYPE_IPV4, &ip_packet)
    }

    #[test]
    fn dhcp_discover_gets_offer() {
        let frame = dhcp_request(DHCPDISCOVER, [0x02; 6], [0x11, 0x22, 0x33, 0x44]);
        let reply = handle(&id(), &frame).unwrap();
        let ip = parse_ipv4(&reply[ETH_HDR_LEN..]).unwrap();
        let bootp = &ip.payload[8..];
        assert_eq!(bootp[0], 2); // BOOTREPLY
        assert_eq!(&bootp[4..8], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&bootp[16..20], &next_ip(id().ipv4));
        let msg_type = find_dhcp_option(&bootp[240..], DHCP_OPT_MESSAGE_TYPE).unwrap();
        assert_eq!(msg_type, &[2]); // OFFER
    }

    #[test]
    fn dhcp_request_gets_ack() {
        let frame = dhcp_request(DHCPREQUEST, [0x02; 6], [0x55, 0x66, 0x77, 0x88]);
        let reply = handle(&id(), &frame).unwrap();
        let ip = parse_ipv4(&reply[ETH_HDR_LEN..]).unwrap();
        let bootp = &ip.payload[8..];
        let msg_type = find_dhcp_option(&bootp[240..], DHCP_OPT_MESSAGE_TYPE).unwrap();
        assert_eq!(msg_type, &[5]); // ACK
    }
}
