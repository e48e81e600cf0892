//! Integration tests for borrowed file handles
//!
//! These tests drive the host layer the way the engine core does:
//! - A driver opens an asset and hands over a locator
//! - The engine reads bytes, words and double words in either byte order
//! - Seeks and position queries move a single cursor
//! - Closing a borrowed handle leaves the driver's file usable

use std::io::Write;

use tempfile::NamedTempFile;
use wavetable_host::{FileLocator, HostConfig, HostContext, HostError, ReadStatus};

fn ten_byte_asset() -> NamedTempFile {
    let mut named = NamedTempFile::new().expect("create temp asset");
    named
        .write_all(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9])
        .expect("write temp asset");
    named
}

fn context() -> HostContext {
    HostContext::init(HostConfig::default()).expect("init host context")
}

/// Reference scenario: both byte orders over the same four bytes, then the
/// byte that follows them.
#[test]
fn test_dword_byte_order_scenario() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();
    let mut handle = host.open_file(&locator).unwrap();

    assert_eq!(handle.read_dword(true).unwrap(), 0x0001_0203);
    handle.seek(0).unwrap();
    assert_eq!(handle.read_dword(false).unwrap(), 0x0302_0100);
    assert_eq!(handle.read_byte().unwrap(), 0x04);

    host.close_file(handle).unwrap();
}

/// Word reads decode identically to the reference decoders.
#[test]
fn test_word_reads_match_reference_decoders() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();
    let mut handle = host.open_file(&locator).unwrap();

    handle.seek(4).unwrap();
    assert_eq!(handle.read_word(true).unwrap(), u16::from_be_bytes([4, 5]));
    assert_eq!(handle.read_word(false).unwrap(), u16::from_le_bytes([6, 7]));
    assert_eq!(handle.position().unwrap(), 8);
}

/// Exactly the remaining bytes complete the read; the next read reports
/// end-of-file with nothing transferred.
#[test]
fn test_read_bytes_exhaustion_policy() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();
    let mut handle = host.open_file(&locator).unwrap();

    handle.seek(6).unwrap();
    let mut buf = [0u8; 4];
    let outcome = handle.read_bytes(&mut buf).unwrap();
    assert_eq!(outcome.bytes_read, 4);
    assert_eq!(outcome.status, ReadStatus::Complete);
    assert_eq!(buf, [6, 7, 8, 9]);

    let outcome = handle.read_bytes(&mut buf).unwrap();
    assert_eq!(outcome.bytes_read, 0);
    assert_eq!(outcome.status, ReadStatus::EndOfFile);
}

/// Seeking past the end is accepted; the following read is end-of-file.
#[test]
fn test_seek_beyond_end() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();
    let mut handle = host.open_file(&locator).unwrap();

    assert!(handle.seek(1_000).is_ok());
    let mut buf = [0u8; 1];
    let outcome = handle.read_bytes(&mut buf).unwrap();
    assert_eq!(outcome.bytes_read, 0);
    assert!(outcome.is_eof());
    assert_eq!(handle.read_byte(), Err(HostError::EndOfFile));
}

/// Closing a borrowed handle must not close the driver's file.
#[test]
fn test_close_borrowed_leaves_locator_usable() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();

    let mut handle = host.open_file(&locator).unwrap();
    assert!(!handle.is_owned());
    handle.seek(2).unwrap();
    host.close_file(handle).unwrap();

    let mut buf = [0u8; 3];
    assert_eq!(locator.read_at(5, &mut buf), 3);
    assert_eq!(buf, [5, 6, 7]);
    assert_eq!(locator.size().unwrap(), 10);

    // A second handle on the same locator still works.
    let mut again = host.open_file(&locator).unwrap();
    again.seek(9).unwrap();
    assert_eq!(again.read_byte().unwrap(), 9);
}

/// Relative seeks compose with absolute ones and reject negative results.
#[test]
fn test_relative_seek() {
    let asset = ten_byte_asset();
    let locator = FileLocator::open(asset.path()).unwrap();
    let host = context();
    let mut handle = host.open_file(&locator).unwrap();

    handle.seek_relative(7).unwrap();
    handle.seek_relative(-2).unwrap();
    assert_eq!(handle.read_byte().unwrap(), 5);
    assert!(matches!(
        handle.seek_relative(-100),
        Err(HostError::SeekFailed { .. })
    ));
}
