//! Blowfish block cipher engine.
//!
//! Implements the 16-round Feistel cipher over 64-bit blocks with the
//! standard self-referential key expansion: the key is XORed cyclically
//! into the P-array, then the cipher repeatedly encrypts an all-zero
//! running block, writing each output into the next two schedule slots so
//! every table entry depends on all previous ones.
//!
//! The schedule (P-array plus four S-boxes) lives inline in the struct;
//! constructing or cloning an engine never allocates. The schedule is
//! treated as key material: `clear()` and `Drop` overwrite it through the
//! `zeroize` crate so the compiler cannot elide the pass.

use zeroize::Zeroize;

use crate::consts::{P_INIT, S_INIT};
use crate::error::BlowfishError;

/// Number of P-array (round key) entries: 16 rounds plus 2 whitening words.
const P_ENTRIES: usize = 18;

/// Number of S-boxes.
const S_BOXES: usize = 4;

/// Entries per S-box.
const S_BOX_ENTRIES: usize = 256;

/// Number of Feistel rounds.
const ROUNDS: usize = 16;

/// Blowfish block cipher engine operating on 64-bit blocks.
///
/// A freshly constructed engine carries the cipher's publicly-known
/// default schedule; call [`set_key`](Self::set_key) before encrypting.
/// The single-block transforms take `&self`, so one keyed engine can back
/// any number of [`BlowfishCfb64`](crate::BlowfishCfb64) streams in
/// parallel.
///
/// # Examples
///
/// ```
/// use blowfish_cfb64::Blowfish;
///
/// let mut cipher = Blowfish::new();
/// cipher.set_key(b"TESTKEY!").unwrap();
///
/// let block = 0x1122_3344_5566_7788;
/// let encrypted = cipher.encrypt64(block);
/// assert_ne!(encrypted, block);
/// assert_eq!(cipher.decrypt64(encrypted), block);
/// ```
#[derive(Clone)]
pub struct Blowfish {
    p: [u32; P_ENTRIES],
    s: [[u32; S_BOX_ENTRIES]; S_BOXES],
    is_clear: bool,
}

impl Default for Blowfish {
    fn default() -> Self {
        Self::new()
    }
}

impl Blowfish {
    /// Creates a new engine holding the default schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use blowfish_cfb64::Blowfish;
    ///
    /// let mut cipher = Blowfish::new();
    /// cipher.set_key(b"secret").unwrap();
    /// ```
    pub fn new() -> Self {
        Blowfish {
            p: P_INIT,
            s: S_INIT,
            is_clear: false,
        }
    }

    /// Creates an engine with the schedule already derived from `key`.
    ///
    /// Convenience for the common construct-then-key sequence.
    ///
    /// # Errors
    /// Returns [`BlowfishError::EmptyKey`] if `key` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blowfish_cfb64::Blowfish;
    ///
    /// let cipher = Blowfish::with_key(b"TESTKEY!").unwrap();
    /// let block = cipher.encrypt64(0);
    /// assert_eq!(cipher.decrypt64(block), 0);
    /// ```
    pub fn with_key(key: &[u8]) -> Result<Self, BlowfishError> {
        let mut cipher = Self::new();
        cipher.set_key(key)?;
        Ok(cipher)
    }

    /// Derives the key schedule from `key`.
    ///
    /// Always restarts from the default schedule, so rekeying an engine is
    /// equivalent to keying a fresh one. Keys of any non-zero length are
    /// accepted: the bytes are consumed cyclically across all 18 P-array
    /// entries, so keys longer than 72 bytes wrap and keys shorter than
    /// 4 bytes repeat within a single entry. No strength validation is
    /// performed on degenerate keys.
    ///
    /// # Parameters
    /// - `key`: Key material, at least one byte.
    ///
    /// # Errors
    /// Returns [`BlowfishError::EmptyKey`] if `key` is empty.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), BlowfishError> {
        if key.is_empty() {
            return Err(BlowfishError::EmptyKey);
        }
        self.reinitialize();

        // Fold the key into the P-array, four bytes per entry.
        let mut key_index = 0;
        for entry in self.p.iter_mut() {
            let mut data: u32 = 0;
            for _ in 0..4 {
                data = (data << 8) | u32::from(key[key_index]);
                key_index = (key_index + 1) % key.len();
            }
            *entry ^= data;
        }

        // Replace the schedule with the cipher's own output: encrypt an
        // all-zero block, store the result in the next two slots, feed it
        // back in, and walk the P-array and then each S-box in order.
        let mut data_l: u32 = 0;
        let mut data_r: u32 = 0;
        for i in (0..P_ENTRIES).step_by(2) {
            self.encrypt(&mut data_l, &mut data_r);
            self.p[i] = data_l;
            self.p[i + 1] = data_r;
        }
        // Indexing keeps the borrow of `self` short; iterating `self.s`
        // would hold it across the `encrypt` calls.
        #[allow(clippy::needless_range_loop)]
        for s_box in 0..S_BOXES {
            for i in (0..S_BOX_ENTRIES).step_by(2) {
                self.encrypt(&mut data_l, &mut data_r);
                self.s[s_box][i] = data_l;
                self.s[s_box][i + 1] = data_r;
            }
        }
        Ok(())
    }

    /// Encrypts a single 64-bit block.
    ///
    /// # Parameters
    /// - `data`: Plain text block; the first buffer byte of a big-endian
    ///   packing occupies the most significant bits.
    ///
    /// # Returns
    /// The cipher text block.
    pub fn encrypt64(&self, data: u64) -> u64 {
        let mut data_l = (data >> 32) as u32;
        let mut data_r = data as u32;
        self.encrypt(&mut data_l, &mut data_r);
        (u64::from(data_l) << 32) | u64::from(data_r)
    }

    /// Decrypts a single 64-bit block.
    ///
    /// Exact inverse of [`encrypt64`](Self::encrypt64) under the same
    /// schedule.
    pub fn decrypt64(&self, data: u64) -> u64 {
        let mut data_l = (data >> 32) as u32;
        let mut data_r = data as u32;
        self.decrypt(&mut data_l, &mut data_r);
        (u64::from(data_l) << 32) | u64::from(data_r)
    }

    /// Encrypts the two 32-bit halves of a block in place.
    ///
    /// # Parameters
    /// - `data_l`: High-order (first, big-endian) half.
    /// - `data_r`: Low-order (second) half.
    pub fn encrypt(&self, data_l: &mut u32, data_r: &mut u32) {
        let mut xl = *data_l;
        let mut xr = *data_r;
        for &round_key in &self.p[..ROUNDS] {
            xl ^= round_key;
            xr ^= self.round_f(xl);
            std::mem::swap(&mut xl, &mut xr);
        }
        // Undo the final swap, then whiten with the last two round keys.
        std::mem::swap(&mut xl, &mut xr);
        xr ^= self.p[ROUNDS];
        xl ^= self.p[ROUNDS + 1];
        *data_l = xl;
        *data_r = xr;
    }

    /// Decrypts the two 32-bit halves of a block in place.
    ///
    /// Identical round structure to [`encrypt`](Self::encrypt) with the
    /// P-array consumed in reverse order.
    pub fn decrypt(&self, data_l: &mut u32, data_r: &mut u32) {
        let mut xl = *data_l;
        let mut xr = *data_r;
        for &round_key in self.p[2..].iter().rev() {
            xl ^= round_key;
            xr ^= self.round_f(xl);
            std::mem::swap(&mut xl, &mut xr);
        }
        std::mem::swap(&mut xl, &mut xr);
        xr ^= self.p[1];
        xl ^= self.p[0];
        *data_l = xl;
        *data_r = xr;
    }

    /// Restores the default schedule so a new key can be set.
    ///
    /// Does not zero memory; use [`clear`](Self::clear) for that.
    pub fn reinitialize(&mut self) {
        self.p = P_INIT;
        self.s = S_INIT;
        self.is_clear = false;
    }

    /// Zeroes every schedule entry and marks the engine cleared.
    ///
    /// The overwrite goes through [`zeroize`] and is not elided by the
    /// optimizer. A cleared engine still computes well-defined (all-zero
    /// schedule) transforms, but [`BlowfishCfb64`](crate::BlowfishCfb64)
    /// refuses to operate on it until [`set_key`](Self::set_key) or
    /// [`reinitialize`](Self::reinitialize) is called.
    pub fn clear(&mut self) {
        self.zeroize();
    }

    /// Returns `true` once [`clear`](Self::clear) has zeroed the schedule.
    pub fn is_cleared(&self) -> bool {
        self.is_clear
    }

    /// The Feistel round function.
    ///
    /// Splits `value` into four bytes indexing the four S-boxes:
    /// `((S0[a] + S1[b]) ^ S2[c]) + S3[d]` with wrapping 32-bit addition.
    #[inline]
    fn round_f(&self, value: u32) -> u32 {
        let a = (value >> 24) as usize;
        let b = ((value >> 16) & 0xFF) as usize;
        let c = ((value >> 8) & 0xFF) as usize;
        let d = (value & 0xFF) as usize;
        (self.s[0][a].wrapping_add(self.s[1][b]) ^ self.s[2][c]).wrapping_add(self.s[3][d])
    }
}

impl Zeroize for Blowfish {
    fn zeroize(&mut self) {
        self.p.zeroize();
        for s_box in self.s.iter_mut() {
            s_box.zeroize();
        }
        self.is_clear = true;
    }
}

impl Drop for Blowfish {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Published single-block vector: all-zero 64-bit key and block.
    #[test]
    fn test_known_vector_zero_key() {
        let cipher = Blowfish::with_key(&[0u8; 8]).unwrap();
        assert_eq!(cipher.encrypt64(0), 0x4EF9_9745_6198_DD78);
    }

    /// Published single-block vector with an 8-byte key.
    #[test]
    fn test_known_vector_basic_key() {
        let key = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        let cipher = Blowfish::with_key(&key).unwrap();
        assert_eq!(
            cipher.encrypt64(0x1111_1111_1111_1111),
            0x61F9_C380_2281_B096
        );
    }

    /// Published vector with a 26-byte key, exercising cyclic consumption
    /// across more than one P-array pass.
    #[test]
    fn test_known_vector_long_key() {
        let cipher = Blowfish::with_key(b"abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(
            cipher.encrypt64(0x424C_4F57_4649_5348),
            0x324E_D0FE_F413_A203
        );
    }

    /// Published vector with a 17-byte key (not a multiple of 4, so the
    /// key wraps mid-entry).
    #[test]
    fn test_known_vector_odd_length_key() {
        let cipher = Blowfish::with_key(b"Who is John Galt?").unwrap();
        assert_eq!(
            cipher.encrypt64(0xFEDC_BA98_7654_3210),
            0xCC91_732B_8022_F684
        );
    }

    #[test]
    fn test_encrypt64_decrypt64_inverse() {
        let cipher = Blowfish::with_key(b"inverse law key").unwrap();
        let samples = [
            0u64,
            1,
            u64::MAX,
            0x0123_4567_89AB_CDEF,
            0xDEAD_BEEF_CAFE_F00D,
        ];
        for &block in &samples {
            assert_eq!(cipher.decrypt64(cipher.encrypt64(block)), block);
            assert_eq!(cipher.encrypt64(cipher.decrypt64(block)), block);
        }
    }

    #[test]
    fn test_half_word_entry_points_match_encrypt64() {
        let cipher = Blowfish::with_key(b"halves").unwrap();
        let block = 0x0123_4567_89AB_CDEFu64;
        let mut data_l = (block >> 32) as u32;
        let mut data_r = block as u32;
        cipher.encrypt(&mut data_l, &mut data_r);
        let expected = cipher.encrypt64(block);
        assert_eq!((u64::from(data_l) << 32) | u64::from(data_r), expected);

        cipher.decrypt(&mut data_l, &mut data_r);
        assert_eq!((u64::from(data_l) << 32) | u64::from(data_r), block);
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut cipher = Blowfish::new();
        assert_eq!(cipher.set_key(&[]), Err(BlowfishError::EmptyKey));
        assert!(Blowfish::with_key(&[]).is_err());
    }

    /// Rekeying must re-derive from the default schedule, not compose
    /// with the previous key.
    #[test]
    fn test_rekey_matches_fresh_engine() {
        let mut rekeyed = Blowfish::with_key(b"first key").unwrap();
        rekeyed.set_key(b"second key").unwrap();
        let fresh = Blowfish::with_key(b"second key").unwrap();
        let block = 0x5555_AAAA_5555_AAAAu64;
        assert_eq!(rekeyed.encrypt64(block), fresh.encrypt64(block));
    }

    #[test]
    fn test_different_keys_produce_different_schedules() {
        let cipher_a = Blowfish::with_key(b"key A").unwrap();
        let cipher_b = Blowfish::with_key(b"key B").unwrap();
        let block = 0x0000_0000_0000_0001u64;
        assert_ne!(cipher_a.encrypt64(block), cipher_b.encrypt64(block));
    }

    #[test]
    fn test_clone_duplicates_schedule() {
        let cipher = Blowfish::with_key(b"clone me").unwrap();
        let copy = cipher.clone();
        let block = 0x1020_3040_5060_7080u64;
        assert_eq!(cipher.encrypt64(block), copy.encrypt64(block));
    }

    #[test]
    fn test_clear_zeroes_schedule() {
        let mut cipher = Blowfish::with_key(b"to be cleared").unwrap();
        cipher.clear();
        assert!(cipher.is_cleared());
        assert_eq!(cipher.p, [0u32; P_ENTRIES]);
        for s_box in &cipher.s {
            assert_eq!(s_box, &[0u32; S_BOX_ENTRIES]);
        }
        // The zero schedule stays a well-defined, self-consistent pair of
        // transforms.
        let block = 0x1122_3344_5566_7788u64;
        assert_eq!(cipher.decrypt64(cipher.encrypt64(block)), block);
    }

    #[test]
    fn test_reinitialize_restores_default_schedule() {
        let mut cipher = Blowfish::with_key(b"old key").unwrap();
        cipher.clear();
        cipher.reinitialize();
        assert!(!cipher.is_cleared());
        let fresh = Blowfish::new();
        let block = 0xABCD_EF01_2345_6789u64;
        assert_eq!(cipher.encrypt64(block), fresh.encrypt64(block));
        // And the engine is reusable for a new key.
        cipher.set_key(b"new key").unwrap();
        let keyed = Blowfish::with_key(b"new key").unwrap();
        assert_eq!(cipher.encrypt64(block), keyed.encrypt64(block));
    }

    /// An unkeyed engine must hold exactly the default constants.
    #[test]
    fn test_default_schedule_constants() {
        let cipher = Blowfish::new();
        assert_eq!(cipher.p[0], 0x243F_6A88);
        assert_eq!(cipher.p[17], 0x8979_FB1B);
        assert_eq!(cipher.s[0][0], 0xD131_0BA6);
        assert_eq!(cipher.s[3][255], 0x3AC3_72E6);
    }
}
