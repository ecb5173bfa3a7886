// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Entry point: parses the CLI configuration, builds the access point's
//! BSSes and their collaborators, spawns the receiver/beacon/upper-network
//! threads (spec.md §5), and waits for one of them to exit.

use std::sync::Arc;
use structopt::StructOpt;
use wlan_softap::ap::Ap;
use wlan_softap::bss::Bss;
use wlan_softap::config::{BssConfig, Config, NetworkMode, RadioMode};
use wlan_softap::net::stubs::StubIdentity;
use wlan_softap::net::synthetic::SyntheticNetwork;
use wlan_softap::net::UpperNetwork;
use wlan_softap::radio::{FramedTransport, Transport};
use wlan_softap::run;

#[cfg(target_os = "linux")]
use wlan_softap::net::tap::TapNetwork;
#[cfg(target_os = "linux")]
use wlan_softap::radio::LiveTransport;

fn main() {
    let cfg = Config::from_args();
    wlan_softap::logging::init(cfg.verbose);

    if let Err(e) = run(cfg) {
        log::error!("fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(cfg: Config) -> Result<(), String> {
    let transport = build_transport(&cfg)?;
    let (bsses, network_threads) = build_bsses(&cfg, &transport)?;

    log::info!("serving {} BSS(es) on radio {:?}", bsses.len(), cfg.radio);
    let ap = Arc::new(Ap::new(bsses));

    let receiver = run::spawn_receiver(ap.clone(), transport.clone());
    let beacon = run::spawn_beacon(ap.clone(), transport.clone());
    let upper_threads: Vec<_> = network_threads
        .into_iter()
        .map(|bssid| run::spawn_upper_network(ap.clone(), bssid, transport.clone()))
        .collect();

    receiver.join().map_err(|_| "receiver thread panicked".to_string())?;
    beacon.join().map_err(|_| "beacon thread panicked".to_string())?;
    for t in upper_threads {
        t.join().map_err(|_| "upper-network thread panicked".to_string())?;
    }
    Ok(())
}

fn build_transport(cfg: &Config) -> Result<Arc<dyn Transport>, String> {
    match cfg.radio {
        RadioMode::Live => {
            #[cfg(target_os = "linux")]
            {
                let ifname = cfg
                    .interface
                    .as_ref()
                    .ok_or_else(|| "`--radio live` requires `--interface <name>`".to_string())?;
                let live = LiveTransport::open(ifname)
                    .map_err(|e| format!("failed to open monitor-mode interface {:?}: {}", ifname, e))?;
                Ok(Arc::new(live))
            }
            #[cfg(not(target_os = "linux"))]
            {
                Err("`--radio live` is only supported on Linux".to_string())
            }
        }
        RadioMode::Framed => {
            let transport = FramedTransport::new(std::io::stdin(), std::io::stdout());
            Ok(Arc::new(transport))
        }
    }
}

/// Builds every configured BSS and its upper-network collaborator, and
/// returns the BSSIDs that need a dedicated upper-network reader thread.
fn build_bsses(
    cfg: &Config,
    _transport: &Arc<dyn Transport>,
) -> Result<(Vec<(Bss, Arc<dyn UpperNetwork>)>, Vec<wlan_softap::mac::MacAddr>), String> {
    if cfg.network == NetworkMode::Tap && cfg.bsses.len() > 1 {
        return Err("`--network tap` only supports a single `--bss`".to_string());
    }

    let mut bsses = Vec::with_capacity(cfg.bsses.len());
    let mut bssids = Vec::with_capacity(cfg.bsses.len());
    for bss_cfg in &cfg.bsses {
        let BssConfig { bssid, ssid, passphrase, channel } = bss_cfg.clone();
        let upper: Arc<dyn UpperNetwork> = match cfg.network {
            NetworkMode::Synthetic => {
                Arc::new(SyntheticNetwork::new(StubIdentity { mac: bssid, ipv4: cfg.synthetic_ipv4.0 }))
            }
            NetworkMode::Tap => {
                #[cfg(target_os = "linux")]
                {
                    let name = cfg
                        .tap_name
                        .as_ref()
                        .ok_or_else(|| "`--network tap` requires `--tap-name <name>`".to_string())?;
                    Arc::new(
                        TapNetwork::open(name)
                            .map_err(|e| format!("failed to open TAP device {:?}: {}", name, e))?,
                    )
                }
                #[cfg(not(target_os = "linux"))]
                {
                    return Err("`--network tap` is only supported on Linux".to_string());
                }
            }
        };
        bssids.push(bssid);
        bsses.push((Bss::new(bssid, ssid, &passphrase, channel), upper));
    }
    Ok((bsses, bssids))
}
