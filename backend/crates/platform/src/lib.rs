//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic randomness and URL-safe Base64
//! - Adaptive hashing (Argon2id) for passwords and session fingerprints
//! - Cookie building and parsing
//! - HTML entity escaping for untrusted text

pub mod cookie;
pub mod crypto;
pub mod escape;
pub mod password;
