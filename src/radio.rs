// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The radio transport boundary (spec.md §6): the core only ever sees
//! radiotap-wrapped 802.11 frames in and out. Two implementations are
//! provided: [`LiveTransport`], a raw `AF_PACKET` socket bound to a
//! monitor-mode interface, and [`FramedTransport`], a length-prefixed
//! byte stream over arbitrary `Read`/`Write` handles used to replay
//! recorded traffic deterministically against a simulator (the reference
//! source's `config_mon`/`sendp` pairing, generalized so tests never need
//! a real NIC).

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use std::sync::Mutex;

/// A minimal radiotap header with no optional fields: version 0, pad 0,
/// length 8, empty present-bitmap. Sufficient for injecting frames on
/// interfaces that don't require specific rate/channel fields to be set.
const MINIMAL_RADIOTAP_HEADER: [u8; 8] = [0, 0, 8, 0, 0, 0, 0, 0];

/// Largest frame this access point will read off the wire in one go:
/// radiotap prefix + 802.11 header + CCMP header + a generously-sized MSDU.
/// 802.11 does not define fragmentation/reassembly in this crate's scope
/// (spec.md §1 Non-goals), so one `read()` must carry one full frame.
pub const MAX_FRAME_LEN: usize = 4096;

/// Reads and writes whole radiotap-wrapped 802.11 frames. Implementations
/// must be safe to call `recv` from one thread while `send` is called from
/// others (the receiver thread blocks in `recv`; the beacon and
/// upper-network threads call `send` independently).
pub trait Transport: Send + Sync {
    /// Blocks until one frame (radiotap header + 802.11 MAC frame) is
    /// available and returns it.
    fn recv(&self) -> io::Result<Vec<u8>>;
    /// Transmits one radiotap-wrapped 802.11 frame.
    fn send(&self, frame: &[u8]) -> io::Result<()>;
}

/// Length-prefixed byte-stream transport (spec.md §6 transport 2): each
/// frame is a 32-bit little-endian length followed by that many bytes.
/// Used by the test harness and by `--radio framed` to replay or drive
/// this access point without a monitor-mode NIC.
pub struct FramedTransport<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
}

impl<R: Read + Send, W: Write + Send> FramedTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        FramedTransport { reader: Mutex::new(reader), writer: Mutex::new(writer) }
    }
}

impl<R: Read + Send, W: Write + Send + Clone> FramedTransport<R, W> {
    /// Snapshots everything written so far. Used by tests driving this
    /// transport as a loopback sink to inspect the frames a handler sent.
    pub fn written(&self) -> W {
        self.writer.lock().expect("writer lock poisoned").clone()
    }
}

impl<R: Read + Send, W: Write + Send> Transport for FramedTransport<R, W> {
    fn recv(&self) -> io::Result<Vec<u8>> {
        let mut reader = self.reader.lock().expect("reader lock poisoned");
        let len = reader.read_u32::<LittleEndian>()? as usize;
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn send(&self, frame: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().expect("writer lock poisoned");
        writer.write_u32::<LittleEndian>(frame.len() as u32)?;
        writer.write_all(frame)?;
        writer.flush()
    }
}

/// Prepends [`MINIMAL_RADIOTAP_HEADER`] to a bare 802.11 frame, for
/// transports (or test fixtures) that hand the core bare MAC frames and
/// expect a radiotap prefix to be added before transmission.
pub fn wrap_radiotap(mac_frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(MINIMAL_RADIOTAP_HEADER.len() + mac_frame.len());
    out.extend_from_slice(&MINIMAL_RADIOTAP_HEADER);
    out.extend_from_slice(mac_frame);
    out
}

#[cfg(target_os = "linux")]
pub use live::LiveTransport;

#[cfg(target_os = "linux")]
mod live {
    use super::Transport;
    use std::ffi::CString;
    use std::io;
    use std::mem;
    use std::os::unix::io::RawFd;
    use std::sync::Mutex;

    const ETH_P_ALL: u16 = 0x0003;

    /// A raw `AF_PACKET`/`SOCK_RAW` socket bound to a monitor-mode
    /// interface. Frames read and written through this socket already
    /// carry (or expect) the radiotap prefix the driver adds in monitor
    /// mode; this type is a thin wrapper over the three syscalls needed
    /// (`socket`, `bind`, blocking `read`/`write`), matching the level the
    /// reference implementation's scapy `L2socket` operates at.
    pub struct LiveTransport {
        fd: RawFd,
        // recvfrom/sendto on a bound AF_PACKET SOCK_RAW socket are each
        // individually atomic at the syscall level; the mutex only
        // serializes our own send() callers against each other, matching
        // spec.md §5's requirement that transmission to a given STA is
        // serialized by the call site.
        send_lock: Mutex<()>,
    }

    impl LiveTransport {
        /// Opens a monitor-mode socket on `ifname`. The interface must
        /// already be in monitor mode and up; spec.md §1 treats that
        /// configuration as an external collaborator this crate does not
        /// perform.
        pub fn open(ifname: &str) -> io::Result<Self> {
            unsafe {
                let fd = libc::socket(
                    libc::AF_PACKET,
                    libc::SOCK_RAW,
                    (ETH_P_ALL as u16).to_be() as i32,
                );
                if fd < 0 {
                    return Err(io::Error::last_os_error());
                }

                let c_ifname = CString::new(ifname)
                    .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "interface name contains NUL"))?;
                let mut ifreq: libc::ifreq = mem::zeroed();
                let name_bytes = c_ifname.as_bytes_with_nul();
                for (dst, src) in ifreq.ifr_name.iter_mut().zip(name_bytes.iter()) {
                    *dst = *src as libc::c_char;
                }
                if libc::ioctl(fd, libc::SIOCGIFINDEX, &mut ifreq) < 0 {
                    let err = io::Error::last_os_error();
                    libc::close(fd);
                    return Err(err);
                }
                let ifindex = ifreq.ifr_ifru.ifru_ifindex;

                let mut sll: libc::sockaddr_ll = mem::zeroed();
                sll.sll_family = libc::AF_PACKET as u16;
                sll.sll_protocol = (ETH_P_ALL as u16).to_be();
                sll.sll_ifindex = ifindex;
                let sll_ptr = &sll as *const libc::sockaddr_ll as *const libc::sockaddr;
                if libc::bind(fd, sll_ptr, mem::size_of::<libc::sockaddr_ll>() as u32) < 0 {
                    let err = io::Error::last_os_error();
                    libc::close(fd);
                    return Err(err);
                }

                Ok(LiveTransport { fd, send_lock: Mutex::new(()) })
            }
        }
    }

    impl Drop for LiveTransport {
        fn drop(&mut self) {
            unsafe {
                libc::close(self.fd);
            }
        }
    }

    // SAFETY: the raw fd is only ever used through read()/write() syscalls
    // guarded by the kernel's own per-fd synchronization; `send_lock` adds
    // the additional serialization this crate's own callers need.
    unsafe impl Send for LiveTransport {}
    unsafe impl Sync for LiveTransport {}

    impl Transport for LiveTransport {
        fn recv(&self) -> io::Result<Vec<u8>> {
            let mut buf = vec![0u8; super::MAX_FRAME_LEN];
            let n = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };
            if n < 0 {
                return Err(io::Error::last_os_error());
            }
            buf.truncate(n as usize);
            Ok(buf)
        }

        fn send(&self, frame: &[u8]) -> io::Result<()> {
            let _guard = self.send_lock.lock().expect("send lock poisoned");
            let n = unsafe { libc::write(self.fd, frame.as_ptr() as *const libc::c_void, frame.len()) };
            if n < 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn framed_transport_round_trips_one_frame() {
        let frame = vec![0xde, 0xad, 0xbe, 0xef, 0x01];
        let mut encoded = Vec::new();
        encoded.write_u32::<LittleEndian>(frame.len() as u32).unwrap();
        encoded.extend_from_slice(&frame);

        let transport = FramedTransport::new(Cursor::new(encoded), Vec::new());
        let received = transport.recv().unwrap();
        assert_eq!(received, frame);
    }

    #[test]
    fn framed_transport_send_length_prefixes() {
        let transport = FramedTransport::new(Cursor::new(Vec::new()), Vec::new());
        transport.send(&[1, 2, 3]).unwrap();
        let written = transport.writer.lock().unwrap().clone();
        assert_eq!(&written[..4], &3u32.to_le_bytes());
        assert_eq!(&written[4..], &[1, 2, 3]);
    }

    #[test]
    fn wrap_radiotap_prepends_minimal_header() {
        let wrapped = wrap_radiotap(&[0xaa, 0xbb]);
        assert_eq!(wrapped[..8], MINIMAL_RADIOTAP_HEADER);
        assert_eq!(&wrapped[8..], &[0xaa, 0xbb]);
    }
}
