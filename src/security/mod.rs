//! Account secrets: per-account data keys, field encryption, password
//! hashing and the security audit trail.

pub mod audit;
pub mod cipher;
pub mod keys;
pub mod password;
