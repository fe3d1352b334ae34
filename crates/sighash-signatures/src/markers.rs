//! Structural boundary markers.
//!
//! Every structural boundary in the token stream is marked with a fixed byte
//! sequence containing bytes outside the printable ASCII range, so no
//! identifier or type text can forge a boundary. Combined with the sink's
//! length prefixes this keeps structurally different streams byte-distinct.

pub(crate) const OPEN_CLASS: &[u8] = &[0xFF, 0xF3, 0xE2];
pub(crate) const CLOSE_CLASS: &[u8] = &[0xFE, 0xF2, 0xE1];
pub(crate) const CLASS_DELIM: &[u8] = &[0x00, 0xFD, 0x0A];
pub(crate) const CLASS_DELIM_1: &[u8] = &[0x01, 0xFC, 0x0B];
pub(crate) const CLASS_DELIM_2: &[u8] = &[0x00, 0xFB];
pub(crate) const CLASS_DELIM_3: &[u8] = &[0xD2, 0xDA];

pub(crate) const OPEN_FIELD: &[u8] = &[0x23, 0x08, 0xD7, 0xD0, 0x11];
pub(crate) const CLOSE_FIELD: &[u8] = &[0xD6, 0x10];
pub(crate) const FIELD_DELIM_1: &[u8] = &[0xFD, 0x06, 0x01];
pub(crate) const FIELD_DELIM_2: &[u8] = &[0xEA, 0x14, 0xBD];

pub(crate) const OPEN_METHOD: &[u8] = &[0xE4, 0xC3, 0x03];
pub(crate) const CLOSE_METHOD: &[u8] = &[0xE3, 0xC2, 0x04, 0x06, 0xE0];
pub(crate) const METHOD_DELIM_1: &[u8] = &[0xE2, 0xC1, 0x05];
pub(crate) const METHOD_DELIM_2: &[u8] = &[0xC1, 0xE1, 0x06, 0x31, 0xFF];
pub(crate) const METHOD_DELIM_3: &[u8] = &[0xF0, 0x09, 0xCF];
pub(crate) const METHOD_DELIM_4: &[u8] = &[0xF9, 0xB9, 0xF1];
