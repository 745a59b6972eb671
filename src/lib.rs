//! Blowfish block cipher with CFB64 streaming.
//!
//! A from-scratch implementation of the Blowfish cipher (64-bit blocks,
//! 16 Feistel rounds, key-derived P-array and S-boxes) together with a
//! cipher feedback mode wrapper that encrypts and decrypts byte buffers
//! of arbitrary length in place, including lengths that are not a
//! multiple of the block size.
//!
//! Byte-for-byte compatible with OpenSSL's `bf-cfb64`: big-endian block
//! packing, true cipher feedback (the register carries the last cipher
//! text block), and left-aligned partial-block handling.
//!
//! # Architecture
//!
//! ```text
//! Blowfish      (block engine — key schedule, encrypt64 / decrypt64)
//!     ↑ borrowed, read-only during transforms
//! BlowfishCfb64 (stream wrapper — 64-bit feedback register,
//!                in-place encrypt / decrypt over any buffer length)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a buffer:
//!
//! ```
//! use blowfish_cfb64::{Blowfish, BlowfishCfb64};
//!
//! let cipher = Blowfish::with_key(b"my secret key").unwrap();
//!
//! let mut data = *b"attack at dawn";
//! let mut encryptor = BlowfishCfb64::new(&cipher);
//! encryptor.set_init_vector(0x0123_4567_89AB_CDEF);
//! encryptor.encrypt(&mut data).unwrap();
//!
//! let mut decryptor = BlowfishCfb64::new(&cipher);
//! decryptor.set_init_vector(0x0123_4567_89AB_CDEF);
//! decryptor.decrypt(&mut data).unwrap();
//! assert_eq!(&data, b"attack at dawn");
//! ```
//!
//! Single-block transforms on the engine directly:
//!
//! ```
//! use blowfish_cfb64::Blowfish;
//!
//! let cipher = Blowfish::with_key(b"TESTKEY!").unwrap();
//! let block = cipher.encrypt64(0x1122_3344_5566_7788);
//! assert_eq!(cipher.decrypt64(block), 0x1122_3344_5566_7788);
//! ```

#![deny(clippy::all)]

pub mod error;

mod blowfish;
mod cfb64;
mod consts;
pub(crate) mod utils;

pub use blowfish::Blowfish;
pub use cfb64::BlowfishCfb64;
pub use error::BlowfishError;
