// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! The group temporal key shared by every station associated to a BSS, and
//! its rotation bookkeeping (spec.md SUPPLEMENTED FEATURES: `rotate_gtk`
//! lets an operator force a rotation; nothing schedules one automatically).

use super::nonce::random_gtk;
use super::GTK_LEN;

#[derive(Clone)]
pub struct Gtk {
    pub key_id: u8,
    pub key: [u8; GTK_LEN],
    /// Packet number for group-addressed frames sent under this GTK.
    pub tx_pn: u64,
}

impl Gtk {
    pub fn generate(key_id: u8) -> Self {
        Gtk { key_id, key: random_gtk(), tx_pn: 0 }
    }

    /// Replaces the key material in place, bumping the key id between 0
    /// and 1 (802.11-2016 §12.7.2 Key ID is a 2-bit field for the group
    /// key, conventionally alternated on rotation) and resetting the
    /// packet number for the new key.
    pub fn rotate(&mut self) {
        self.key_id = (self.key_id + 1) % 4;
        self.key = random_gtk();
        self.tx_pn = 0;
    }

    pub fn next_pn(&mut self) -> u64 {
        let pn = self.tx_pn;
        self.tx_pn += 1;
        pn
    }
}
