//! Cryptographic primitives for hostvault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Master key generation and the raw key file (`keys`)

pub mod encryption;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, load_master_key, ...};
pub use encryption::{decrypt, encrypt};
pub use keys::{
    generate_master_key, load_master_key, load_or_create_master_key, save_master_key, MasterKey,
};
