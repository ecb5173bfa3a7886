// Copyright 2026 The wlan-softap Authors.
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::eapol;
use failure::Fail;

/// Errors raised while decoding bytes received from the air or the upper
/// network into structured frames.
#[derive(Debug, Fail)]
pub enum CodecError {
    #[fail(display = "buffer too short for {}: have {} bytes, need {}", _0, _1, _2)]
    TooShort(&'static str, usize, usize),
    #[fail(display = "unsupported radiotap present-bitmap extension")]
    RadiotapPresentOverflow,
    #[fail(display = "malformed information element")]
    MalformedIe,
    #[fail(display = "unsupported frame type/subtype: {}/{}", _0, _1)]
    UnsupportedFrameType(u8, u8),
    #[fail(display = "EAPOL-Key frame error: {}", _0)]
    Eapol(#[cause] eapol::Error),
}

impl From<eapol::Error> for CodecError {
    fn from(e: eapol::Error) -> Self {
        CodecError::Eapol(e)
    }
}

/// Errors raised by the CCMP / key-derivation primitives.
#[derive(Debug, Fail)]
pub enum CryptoError {
    #[fail(display = "CCMP tag verification failed")]
    CcmpTagInvalid,
    #[fail(display = "AES key unwrap integrity check failed")]
    KeyUnwrapInvalid,
    #[fail(display = "key-wrap input is not a multiple of 8 bytes: {}", _0)]
    KeyWrapAlignment(usize),
    #[fail(display = "EAPOL-Key MIC verification failed")]
    MicInvalid,
    #[fail(display = "CCMP header carries unsupported key id {}", _0)]
    InvalidKeyId(u8),
}

/// Errors raised by the per-(BSS, STA) handshake state machine.
#[derive(Debug, Fail)]
pub enum HandshakeError {
    #[fail(display = "message-2 MIC did not verify")]
    InvalidMessage2Mic,
    #[fail(display = "EAPOL-Key frame arrived with unexpected key-info flags: {:?}", _0)]
    UnexpectedKeyInfo(eapol::KeyInfo),
    #[fail(display = "EAPOL-Key frame arrived in unexpected handshake state")]
    UnexpectedState,
    #[fail(display = "no station found for {:02x?}", _0)]
    UnknownStation([u8; 6]),
    #[fail(display = "{}", _0)]
    Crypto(#[cause] CryptoError),
}

impl From<CryptoError> for HandshakeError {
    fn from(e: CryptoError) -> Self {
        HandshakeError::Crypto(e)
    }
}

/// Top level error type. Every fallible path the receiver/beacon/upper-network
/// threads can hit funnels into this type so call sites can log-and-drop
/// uniformly per spec.md §7: no internal error ever reaches a station except
/// as a protocol action.
#[derive(Debug, Fail)]
pub enum ApError {
    #[fail(display = "{}", _0)]
    Codec(#[cause] CodecError),
    #[fail(display = "{}", _0)]
    Crypto(#[cause] CryptoError),
    #[fail(display = "{}", _0)]
    Handshake(#[cause] HandshakeError),
    #[fail(display = "radio I/O error: {}", _0)]
    RadioIo(#[cause] std::io::Error),
    #[fail(display = "upper-network I/O error: {}", _0)]
    NetworkIo(#[cause] std::io::Error),
    #[fail(display = "configuration error: {}", _0)]
    Config(String),
    #[fail(display = "no free association ID in this BSS")]
    NoFreeAid,
}

impl From<crate::bss::AssociateError> for ApError {
    fn from(e: crate::bss::AssociateError) -> Self {
        match e {
            crate::bss::AssociateError::NoFreeAid => ApError::NoFreeAid,
        }
    }
}

impl From<CodecError> for ApError {
    fn from(e: CodecError) -> Self {
        ApError::Codec(e)
    }
}

impl From<CryptoError> for ApError {
    fn from(e: CryptoError) -> Self {
        ApError::Crypto(e)
    }
}

impl From<HandshakeError> for ApError {
    fn from(e: HandshakeError) -> Self {
        ApError::Handshake(e)
    }
}
