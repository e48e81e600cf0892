//! Raw memory services for the engine core
//!
//! Sizes arrive as signed 32-bit values, as the engine passes them. Negative
//! sizes, and sizes larger than the regions they apply to, are rejected with
//! `InvalidParameter` rather than reaching the copy.

use std::cmp::Ordering;

use crate::error::HostError;

/// Heap block returned by [`allocate`]; released by dropping it.
pub type HostBlock = Box<[u8]>;

fn checked_amount(amount: i32, regions: &[usize]) -> Result<usize, HostError> {
    let amount = usize::try_from(amount).map_err(|_| HostError::InvalidParameter {
        reason: format!("negative size {}", amount),
    })?;

    if let Some(len) = regions.iter().copied().find(|len| amount > *len) {
        return Err(HostError::InvalidParameter {
            reason: format!("size {} exceeds region of {} bytes", amount, len),
        });
    }

    Ok(amount)
}

/// Allocate a zero-initialised block of `size` bytes.
///
/// Returns `None` for a negative size or when the allocation cannot be
/// reserved.
pub fn allocate(size: i32) -> Option<HostBlock> {
    let size = usize::try_from(size).ok()?;
    let mut block = Vec::new();
    block.try_reserve_exact(size).ok()?;
    block.resize(size, 0);
    Some(block.into_boxed_slice())
}

pub fn release(block: HostBlock) {
    drop(block);
}

/// Copy `amount` bytes from `src` into `dest`.
pub fn copy(dest: &mut [u8], src: &[u8], amount: i32) -> Result<(), HostError> {
    let amount = checked_amount(amount, &[dest.len(), src.len()])?;
    dest[..amount].copy_from_slice(&src[..amount]);
    Ok(())
}

/// Set the first `amount` bytes of `dest` to `value`.
pub fn fill(dest: &mut [u8], value: u8, amount: i32) -> Result<(), HostError> {
    let amount = checked_amount(amount, &[dest.len()])?;
    dest[..amount].fill(value);
    Ok(())
}

/// Compare the first `amount` bytes of two regions.
///
/// Returns a negative, zero or positive value as the first differing byte of
/// `a` is less than, equal to, or greater than that of `b`.
pub fn compare(a: &[u8], b: &[u8], amount: i32) -> Result<i32, HostError> {
    let amount = checked_amount(amount, &[a.len(), b.len()])?;
    let ordering = a[..amount]
        .iter()
        .zip(&b[..amount])
        .find(|(left, right)| left != right)
        .map(|(left, right)| left.cmp(right))
        .unwrap_or(Ordering::Equal);

    Ok(match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}
