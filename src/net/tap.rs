// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A Linux TUN/TAP-backed upper network: decrypted Ethernet frames are
//! written straight to a TAP device, and the kernel's own IP stack (routed
//! through whatever the operator configured with `ip addr`/`ip route`)
//! produces the frames this access point reads back and sends to
//! stations. Grounded on the reference implementation's `TunInterface`,
//! which opens `/dev/net/tun` with `IFF_TAP | IFF_NO_PI` via the same
//! `TUNSETIFF` ioctl.

use super::{DeliveredFrame, UpperNetwork};
use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::mem;
use std::os::unix::io::AsRawFd;
use std::sync::Mutex;

const IFF_TAP: i16 = 0x0002;
const IFF_NO_PI: i16 = 0x1000;
const TUNSETIFF: u64 = 0x4004_54ca;
const IFNAMSIZ: usize = 16;

#[repr(C)]
struct IfReq {
    ifr_name: [libc::c_char; IFNAMSIZ],
    ifr_flags: i16,
    _padding: [u8; 22],
}

pub struct TapNetwork {
    file: Mutex<File>,
    name: String,
}

impl TapNetwork {
    /// Opens (creating if necessary) the TAP device `name`. The caller is
    /// responsible for assigning it an address and bringing it up (the
    /// reference implementation shells out to `ip addr add`/`ip link set
    /// up`; this crate treats that as external configuration, same as the
    /// monitor-mode interface [`crate::radio::LiveTransport`] expects).
    pub fn open(name: &str) -> io::Result<Self> {
        if name.len() >= IFNAMSIZ {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("TAP interface name must be shorter than {} bytes", IFNAMSIZ),
            ));
        }
        let file = OpenOptions::new().read(true).write(true).open("/dev/net/tun")?;

        let c_name = CString::new(name)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "interface name contains NUL"))?;
        let mut ifr: IfReq = unsafe { mem::zeroed() };
        for (dst, src) in ifr.ifr_name.iter_mut().zip(c_name.as_bytes_with_nul()) {
            *dst = *src as libc::c_char;
        }
        ifr.ifr_flags = IFF_TAP | IFF_NO_PI;

        let ret = unsafe { libc::ioctl(file.as_raw_fd(), TUNSETIFF, &mut ifr) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(TapNetwork { file: Mutex::new(file), name: name.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl UpperNetwork for TapNetwork {
    fn deliver(&self, frame: DeliveredFrame) {
        let mut file = self.file.lock().expect("tap file lock poisoned");
        if let Err(e) = file.write_all(&frame.ethernet) {
            log::warn!("dropping frame from {:02x?} on tap write error: {}", frame.station, e);
        }
    }

    fn recv(&self) -> io::Result<Vec<u8>> {
        // Tun/tap devices deliver one complete frame per read(); the
        // kernel never coalesces or fragments across read() calls.
        let mut buf = vec![0u8; crate::radio::MAX_FRAME_LEN];
        let n = {
            let mut file = self.file.lock().expect("tap file lock poisoned");
            file.read(&mut buf)?
        };
        buf.truncate(n);
        Ok(buf)
    }
}
