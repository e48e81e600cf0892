//! Host byte order detection and multi-byte decoding
//!
//! The host order is read off the memory layout of a reference pattern
//! rather than taken from a target cfg, so the same decode path runs on
//! every architecture. Wire values are decoded by reinterpreting the raw
//! bytes in native order and swapping only when the wire order and the
//! host order disagree.

use once_cell::sync::Lazy;

/// Reference bytes `00 01 02 03` as laid out in memory.
const REFERENCE_BYTES: [u8; 4] = [0, 1, 2, 3];

const LITTLE_ENDIAN_PATTERN: u32 = 0x0302_0100;
const BIG_ENDIAN_PATTERN: u32 = 0x0001_0203;
const PDP_ENDIAN_PATTERN: u32 = 0x0100_0302;
const HONEYWELL_ENDIAN_PATTERN: u32 = 0x0203_0001;

static HOST_ORDER: Lazy<HostByteOrder> =
    Lazy::new(|| HostByteOrder::from_pattern(u32::from_ne_bytes(REFERENCE_BYTES)));

/// Byte orders a 32-bit host may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostByteOrder {
    Little,
    Big,
    /// DEC PDP-11 word order
    Pdp,
    /// Honeywell 316 word order
    Honeywell,
    Unknown(u32),
}

impl HostByteOrder {
    /// Classify the native interpretation of [`REFERENCE_BYTES`].
    pub fn from_pattern(pattern: u32) -> Self {
        match pattern {
            LITTLE_ENDIAN_PATTERN => HostByteOrder::Little,
            BIG_ENDIAN_PATTERN => HostByteOrder::Big,
            PDP_ENDIAN_PATTERN => HostByteOrder::Pdp,
            HONEYWELL_ENDIAN_PATTERN => HostByteOrder::Honeywell,
            other => HostByteOrder::Unknown(other),
        }
    }

    pub fn is_big_endian(self) -> bool {
        self == HostByteOrder::Big
    }

    /// Whether a value stored with `msb_first` must be byte-swapped after a
    /// native reinterpretation on this host.
    pub fn needs_swap(self, msb_first: bool) -> bool {
        msb_first ^ self.is_big_endian()
    }
}

/// Byte order of the running host, detected once.
pub fn host_byte_order() -> HostByteOrder {
    *HOST_ORDER
}

/// Decode a 16-bit wire value on a host with the given byte order.
pub fn decode_u16_on(host: HostByteOrder, bytes: [u8; 2], msb_first: bool) -> u16 {
    let word = u16::from_ne_bytes(bytes);
    if host.needs_swap(msb_first) {
        word.swap_bytes()
    } else {
        word
    }
}

/// Decode a 32-bit wire value on a host with the given byte order.
pub fn decode_u32_on(host: HostByteOrder, bytes: [u8; 4], msb_first: bool) -> u32 {
    let dword = u32::from_ne_bytes(bytes);
    if host.needs_swap(msb_first) {
        dword.swap_bytes()
    } else {
        dword
    }
}

pub fn decode_u16(bytes: [u8; 2], msb_first: bool) -> u16 {
    decode_u16_on(host_byte_order(), bytes, msb_first)
}

pub fn decode_u32(bytes: [u8; 4], msb_first: bool) -> u32 {
    decode_u32_on(host_byte_order(), bytes, msb_first)
}
