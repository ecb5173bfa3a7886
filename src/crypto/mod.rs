// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! WPA2-Personal cryptographic primitives: PMK derivation, the pairwise
//! transient key hierarchy, EAPOL-Key MIC, AES key wrap for GTK delivery,
//! CCMP-128 data encryption, and GTK/nonce generation. Each concern gets
//! its own small module, mirroring how the predecessor wlan-rsn crate
//! splits `key::exchange`, `key::gtk`, and the PRF out of the main
//! handshake state machine.

pub mod ccmp;
pub mod gtk;
pub mod keywrap;
pub mod mic;
pub mod nonce;
pub mod pmk;
pub mod prf;

pub const PMK_LEN: usize = 32;
pub const GTK_LEN: usize = 16;
pub const TK_LEN: usize = 16;
