// ABOUTME: Credential module - key-value secret stores and typed credentials.
// ABOUTME: Tools resolve their secrets through the CredentialStore trait.

mod env;
mod file;
mod store;
mod types;

pub use env::*;
pub use file::*;
pub use store::*;
pub use types::*;

#[cfg(test)]
mod store_test;
