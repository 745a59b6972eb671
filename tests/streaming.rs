//! Streaming-behavior tests for the CFB64 wrapper.
//!
//! Verifies the stream-continuity contract: chunked calls at block
//! boundaries match a single call, independently keyed engines
//! interoperate, and output is deterministic across runs and clones.

use blowfish_cfb64::{Blowfish, BlowfishCfb64};
use rand::{rngs::StdRng, Rng, SeedableRng};

// ═══════════════════════════════════════════════════════════════════════
// Streaming equivalence at block-aligned chunk boundaries
// ═══════════════════════════════════════════════════════════════════════

/// One 20-byte call must equal calls of 8 + 12 bytes on the same stream.
#[test]
fn split_8_12_matches_single_call() {
    let cipher = Blowfish::with_key(b"streaming key").unwrap();
    let plain: Vec<u8> = (0u8..20).collect();

    let mut whole = plain.clone();
    let mut one_call = BlowfishCfb64::new(&cipher);
    one_call.set_init_vector(5);
    one_call.encrypt(&mut whole).unwrap();

    let mut parts = plain.clone();
    let mut two_calls = BlowfishCfb64::new(&cipher);
    two_calls.set_init_vector(5);
    let (head, tail) = parts.split_at_mut(8);
    two_calls.encrypt(head).unwrap();
    two_calls.encrypt(tail).unwrap();

    assert_eq!(parts, whole);
    assert_eq!(two_calls.feedback_register(), one_call.feedback_register());
}

/// Every block-aligned split of a 40-byte buffer produces the same
/// ciphertext and final register.
#[test]
fn all_block_aligned_splits_match() {
    let cipher = Blowfish::with_key(b"streaming key").unwrap();
    let plain: Vec<u8> = (0u8..40).map(|b| b.wrapping_mul(11)).collect();

    let mut whole = plain.clone();
    let mut one_call = BlowfishCfb64::new(&cipher);
    one_call.set_init_vector(0x1234);
    one_call.encrypt(&mut whole).unwrap();

    for split in (8..40).step_by(8) {
        let mut parts = plain.clone();
        let mut stream = BlowfishCfb64::new(&cipher);
        stream.set_init_vector(0x1234);
        let (head, tail) = parts.split_at_mut(split);
        stream.encrypt(head).unwrap();
        stream.encrypt(tail).unwrap();
        assert_eq!(parts, whole, "split at {}", split);
        assert_eq!(
            stream.feedback_register(),
            one_call.feedback_register(),
            "register after split at {}",
            split
        );
    }
}

/// A decryptor fed the ciphertext in block-aligned chunks recovers the
/// plaintext, including a trailing partial block in the last chunk.
#[test]
fn chunked_decrypt_matches_chunked_encrypt() {
    let cipher = Blowfish::with_key(b"chunked decrypt").unwrap();
    let plain: Vec<u8> = (0u8..30).collect();

    let mut data = plain.clone();
    let mut encryptor = BlowfishCfb64::new(&cipher);
    encryptor.set_init_vector(77);
    encryptor.encrypt(&mut data).unwrap();

    let mut decryptor = BlowfishCfb64::new(&cipher);
    decryptor.set_init_vector(77);
    let (head, tail) = data.split_at_mut(16);
    decryptor.decrypt(head).unwrap();
    decryptor.decrypt(tail).unwrap();

    assert_eq!(data, plain);
    assert_eq!(
        decryptor.feedback_register(),
        encryptor.feedback_register()
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Cross-engine round trips and determinism
// ═══════════════════════════════════════════════════════════════════════

/// Engine A encrypts, a separately constructed engine B with the same
/// key decrypts, both from the same IV.
#[test]
fn round_trip_across_engines() {
    let engine_a = Blowfish::with_key(b"shared secret").unwrap();
    let engine_b = Blowfish::with_key(b"shared secret").unwrap();

    let plain = b"The quick brown fox jumps over the lazy dog".to_vec();
    let mut data = plain.clone();

    let mut encryptor = BlowfishCfb64::new(&engine_a);
    encryptor.set_init_vector(0xFEED_FACE);
    encryptor.encrypt(&mut data).unwrap();

    let mut decryptor = BlowfishCfb64::new(&engine_b);
    decryptor.set_init_vector(0xFEED_FACE);
    decryptor.decrypt(&mut data).unwrap();

    assert_eq!(data, plain);
}

/// Random buffers of every length 0..=64 round-trip across independent
/// engines.
#[test]
fn round_trip_random_buffers() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let engine_a = Blowfish::with_key(b"random buffers").unwrap();
    let engine_b = Blowfish::with_key(b"random buffers").unwrap();

    for length in 0..=64usize {
        let plain: Vec<u8> = (0..length).map(|_| rng.gen()).collect();
        let iv: u64 = rng.gen();
        let mut data = plain.clone();

        let mut encryptor = BlowfishCfb64::new(&engine_a);
        encryptor.set_init_vector(iv);
        encryptor.encrypt(&mut data).unwrap();

        let mut decryptor = BlowfishCfb64::new(&engine_b);
        decryptor.set_init_vector(iv);
        decryptor.decrypt(&mut data).unwrap();

        assert_eq!(data, plain, "length {}", length);
    }
}

/// Identical key, IV and input always yield identical output, including
/// across a cloned engine.
#[test]
fn deterministic_across_runs_and_clones() {
    let cipher = Blowfish::with_key(b"determinism").unwrap();
    let copy = cipher.clone();
    let plain: Vec<u8> = (0u8..23).collect();

    let encrypt_with = |engine: &Blowfish| {
        let mut data = plain.clone();
        let mut stream = BlowfishCfb64::new(engine);
        stream.set_init_vector(31337);
        stream.encrypt(&mut data).unwrap();
        (data, stream.feedback_register())
    };

    let (first, register_first) = encrypt_with(&cipher);
    let (second, register_second) = encrypt_with(&cipher);
    let (cloned, register_cloned) = encrypt_with(&copy);

    assert_eq!(first, second);
    assert_eq!(first, cloned);
    assert_eq!(register_first, register_second);
    assert_eq!(register_first, register_cloned);
}

/// Different keys must diverge on at least the first sampled block.
#[test]
fn schedule_isolation_between_keys() {
    let mut cipher = Blowfish::with_key(b"first").unwrap();
    let before = cipher.encrypt64(0x0123_4567_89AB_CDEF);
    cipher.set_key(b"second").unwrap();
    let after = cipher.encrypt64(0x0123_4567_89AB_CDEF);
    assert_ne!(before, after);
}
