//! Big-endian packing between byte buffers and 64-bit blocks.
//!
//! The wire convention of the CFB64 stream: byte 0 of a block maps to the
//! most significant byte of the 64-bit value. A partial block (fewer than
//! 8 bytes) is left-aligned into the high-order end, with the unused
//! low-order bytes zero-filled.

/// Cipher block size in bytes.
pub(crate) const BLOCK_SIZE: usize = 8;

/// Packs 1 to 8 bytes into a 64-bit value, big-endian, left-aligned.
///
/// A full 8-byte block occupies the whole value; a shorter slice is
/// shifted so its first byte is the most significant byte and the
/// low-order remainder is zero.
///
/// # Parameters
/// - `bytes`: Slice of length 1 to 8.
#[inline]
pub(crate) fn pack_block(bytes: &[u8]) -> u64 {
    debug_assert!(!bytes.is_empty() && bytes.len() <= BLOCK_SIZE);
    let mut value: u64 = 0;
    for &byte in bytes {
        value = (value << 8) | u64::from(byte);
    }
    value << (8 * (BLOCK_SIZE - bytes.len()))
}

/// Unpacks the high-order `out.len()` bytes of `value` into `out`,
/// big-endian.
///
/// The low-order bytes of a partial block are zero padding and are never
/// written out.
///
/// # Parameters
/// - `value`: Packed 64-bit block.
/// - `out`: Destination slice of length 1 to 8.
#[inline]
pub(crate) fn unpack_block(value: u64, out: &mut [u8]) {
    debug_assert!(!out.is_empty() && out.len() <= BLOCK_SIZE);
    for (offset, byte) in out.iter_mut().enumerate() {
        *byte = (value >> (8 * (BLOCK_SIZE - 1 - offset))) as u8;
    }
}
