// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! A user-space IEEE 802.11 access point implementing WPA2-Personal
//! (PSK) with CCMP-128: the 802.11 management/association state machine,
//! the WPA2 four-way handshake authenticator, CCMP-128 frame encryption and
//! decryption, and the per-BSS transmit/receive pipeline tying them
//! together with a beacon source and an upper-network bridge.

pub mod ap;
pub mod bss;
pub mod config;
pub mod crypto;
pub mod dataplane;
pub mod dispatch;
pub mod eapol;
pub mod error;
pub mod handshake;
pub mod ie;
pub mod logging;
pub mod mac;
pub mod mgmt;
pub mod net;
pub mod radio;
pub mod run;
pub mod station;
