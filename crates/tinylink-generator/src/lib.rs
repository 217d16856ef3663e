pub mod random;

pub use random::{random_code, RandomGenerator};

use tinylink_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage,
/// so they do not guarantee uniqueness. The store rejects duplicates and the
/// registry decides whether to try again.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Produces a candidate code that satisfies the code format rule.
    fn generate(&self) -> Self::Output;
}
