use crate::Generator;
use std::iter;
use tinylink_core::shortcode::{MAX_LENGTH, MIN_LENGTH};
use tinylink_core::ShortCode;

/// The 62 symbols a code is drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length used when none is configured.
pub const DEFAULT_LENGTH: usize = 6;

/// Draws `length` uniformly random symbols from [`ALPHABET`].
///
/// `length` is clamped into `[6, 8]`, so the result is always a valid code.
pub fn random_code(length: usize) -> ShortCode {
    let length = length.clamp(MIN_LENGTH, MAX_LENGTH);
    let code: String = iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
        .take(length)
        .collect();
    ShortCode::new_unchecked(code)
}

/// A generator of uniformly random fixed-length codes.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing codes of `length` symbols, clamped into `[6, 8]`.
    pub fn with_length(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_LENGTH, MAX_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        random_code(self.length)
    }
}
