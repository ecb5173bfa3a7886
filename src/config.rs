// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Command-line configuration (spec.md §6), modeled on `ap::Config` in
//! `lib/sme/src/ap/mod.rs`: SSID/passphrase/BSSID/channel per BSS, plus the
//! choice of radio transport and upper-network bridge this single-process
//! access point uses. `--bss` may repeat to serve several networks off one
//! radio, each independently keyed.

use crate::mac::MacAddr;
use std::fmt;
use std::str::FromStr;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "wlan-softap", about = "A user-space WPA2-PSK/CCMP-128 access point")]
pub struct Config {
    /// Increases log verbosity; repeat for more (info, debug, trace).
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Radio transport: a real monitor-mode interface, or a length-prefixed
    /// byte stream over stdin/stdout for deterministic replay.
    #[structopt(long, default_value = "live")]
    pub radio: RadioMode,

    /// Monitor-mode interface name, required when `--radio live` is used.
    #[structopt(long)]
    pub interface: Option<String>,

    /// Upper-network bridge: a Linux TAP device, or an in-process responder
    /// with no real upstream network.
    #[structopt(long, default_value = "synthetic")]
    pub network: NetworkMode,

    /// TAP device name, required when `--network tap` is used.
    #[structopt(long)]
    pub tap_name: Option<String>,

    /// IPv4 address this access point answers as on the synthetic network
    /// (ARP/ICMP/DHCP/DNS stubs). Ignored in `tap` mode.
    #[structopt(long, default_value = "10.0.0.1")]
    pub synthetic_ipv4: Ipv4Addr,

    /// One BSS to serve: `bssid,ssid,passphrase,channel`, e.g.
    /// `02:00:00:00:00:01,guest-net,correcthorsebattery,6`. Repeatable.
    #[structopt(long = "bss", required = true)]
    pub bsses: Vec<BssConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioMode {
    Live,
    Framed,
}

impl FromStr for RadioMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live" => Ok(RadioMode::Live),
            "framed" => Ok(RadioMode::Framed),
            other => Err(ConfigError(format!("unknown radio mode {:?}, expected live or framed", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    Tap,
    Synthetic,
}

impl FromStr for NetworkMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tap" => Ok(NetworkMode::Tap),
            "synthetic" => Ok(NetworkMode::Synthetic),
            other => Err(ConfigError(format!("unknown network mode {:?}, expected tap or synthetic", other))),
        }
    }
}

/// A dotted-quad IPv4 address, parsed without pulling in `std::net`'s own
/// (perfectly fine, but heavier) resolver machinery for four octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Addr(pub [u8; 4]);

impl FromStr for Ipv4Addr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 4];
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 4 {
            return Err(ConfigError(format!("{:?} is not a dotted-quad IPv4 address", s)));
        }
        for (octet, part) in octets.iter_mut().zip(parts.iter()) {
            *octet = part
                .parse()
                .map_err(|_| ConfigError(format!("{:?} is not a dotted-quad IPv4 address", s)))?;
        }
        Ok(Ipv4Addr(octets))
    }
}

#[derive(Debug, Clone)]
pub struct BssConfig {
    pub bssid: MacAddr,
    pub ssid: Vec<u8>,
    pub passphrase: String,
    pub channel: u8,
}

impl FromStr for BssConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(4, ',').collect();
        let [bssid, ssid, passphrase, channel] = match parts.as_slice() {
            [a, b, c, d] => [*a, *b, *c, *d],
            _ => {
                return Err(ConfigError(format!(
                    "expected bssid,ssid,passphrase,channel, got {:?}",
                    s
                )))
            }
        };
        let bssid = parse_mac_addr(bssid)?;
        if passphrase.len() < 8 || passphrase.len() > 63 {
            return Err(ConfigError("passphrase must be 8-63 characters (802.11-2016 §9.4.2.3)".into()));
        }
        let channel: u8 = channel.parse().map_err(|_| ConfigError(format!("{:?} is not a channel number", channel)))?;
        Ok(BssConfig { bssid, ssid: ssid.as_bytes().to_vec(), passphrase: passphrase.to_string(), channel })
    }
}

fn parse_mac_addr(s: &str) -> Result<MacAddr, ConfigError> {
    let mut addr = [0u8; 6];
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 6 {
        return Err(ConfigError(format!("{:?} is not a MAC address", s)));
    }
    for (octet, part) in addr.iter_mut().zip(parts.iter()) {
        *octet = u8::from_str_radix(part, 16).map_err(|_| ConfigError(format!("{:?} is not a MAC address", s)))?;
    }
    Ok(addr)
}

#[derive(Debug, Clone)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_bss() {
        let cfg: BssConfig = "02:00:00:00:00:01,guest-net,correcthorsebattery,6".parse().unwrap();
        assert_eq!(cfg.bssid, [0x02, 0, 0, 0, 0, 0x01]);
        assert_eq!(cfg.ssid, b"guest-net");
        assert_eq!(cfg.passphrase, "correcthorsebattery");
        assert_eq!(cfg.channel, 6);
    }

    #[test]
    fn rejects_short_passphrase() {
        assert!("02:00:00:00:00:01,guest-net,short,6".parse::<BssConfig>().is_err());
    }

    #[test]
    fn rejects_malformed_mac() {
        assert!("not-a-mac,guest-net,correcthorsebattery,6".parse::<BssConfig>().is_err());
    }

    #[test]
    fn parses_radio_and_network_modes() {
        assert_eq!("live".parse::<RadioMode>().unwrap(), RadioMode::Live);
        assert_eq!("framed".parse::<RadioMode>().unwrap(), RadioMode::Framed);
        assert!("bogus".parse::<RadioMode>().is_err());
        assert_eq!("tap".parse::<NetworkMode>().unwrap(), NetworkMode::Tap);
        assert_eq!("synthetic".parse::<NetworkMode>().unwrap(), NetworkMode::Synthetic);
    }

    #[test]
    fn parses_ipv4() {
        assert_eq!("10.0.0.1".parse::<Ipv4Addr>().unwrap(), Ipv4Addr([10, 0, 0, 1]));
        assert!("10.0.0".parse::<Ipv4Addr>().is_err());
        assert!("10.0.0.256".parse::<Ipv4Addr>().is_err());
    }
}
