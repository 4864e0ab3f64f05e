//! Cryptographically secure passcode generation

use rand::{rngs::OsRng, Rng};

use super::traits::CodeGenerator;

/// Generates passcodes from the operating system CSPRNG
///
/// Values are drawn uniformly from `[0, 10^length)` and zero-padded, so every
/// printed code of the given width is equally likely, leading zeros included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl SecureCodeGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self, length: usize) -> String {
        let upper = 10u64.pow(length as u32);
        // gen_range samples by rejection, so there is no modulo bias
        let value: u64 = OsRng.gen_range(0..upper);
        format!("{:0width$}", value, width = length)
    }
}
