//! Visual encoding of semantic attributes.
//!
//! - `constants` - Palette, state colors, sizing
//! - `style` - Node and edge styling rules

mod constants;
mod style;

pub use constants::*;
pub use style::{module_color, VisualEncoder};

/// Polynomial rolling hash over the UTF-8 bytes of `value`.
///
/// `h = h * 31 + byte` with wrapping 32-bit arithmetic. Independent of the
/// platform's string hasher, so palette assignment never changes between runs
/// or builds.
pub fn rolling_hash(value: &str) -> u32 {
    value
        .bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(b as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_hash_known_values() {
        assert_eq!(rolling_hash(""), 0);
        assert_eq!(rolling_hash("a"), 97);
        assert_eq!(rolling_hash("ab"), 97 * 31 + 98);
        // Matches Java's String.hashCode for ASCII input
        assert_eq!(rolling_hash("hello") as i32, 99_162_322);
    }

    #[test]
    fn test_rolling_hash_wraps_instead_of_overflowing() {
        let long = "services/data_processor.py".repeat(20);
        assert_eq!(rolling_hash(&long), rolling_hash(&long));
    }
}
