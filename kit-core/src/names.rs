//! Name generation for objects created with `metadata.generateName`.
use crate::capability::NameGenerator;
use rand::Rng;

// 63 is the DNS label limit most resource names are validated against
const MAX_NAME_LENGTH: usize = 63;
const RANDOM_LENGTH: usize = 5;
const MAX_GENERATED_NAME_LENGTH: usize = MAX_NAME_LENGTH - RANDOM_LENGTH;

// no vowels, no confusable characters
const ALPHANUMS: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";

/// Appends five random characters to the base, truncating the base to keep the result valid
///
/// ```
/// use apiserver_kit_core::{capability::NameGenerator, names::SimpleNameGenerator};
///
/// let name = SimpleNameGenerator.generate_name("web-");
/// assert!(name.starts_with("web-"));
/// assert_eq!(name.len(), "web-".len() + 5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleNameGenerator;

impl NameGenerator for SimpleNameGenerator {
    fn generate_name(&self, base: &str) -> String {
        let mut name = truncate(base, MAX_GENERATED_NAME_LENGTH).to_string();
        let mut rng = rand::rng();
        name.extend((0..RANDOM_LENGTH).map(|_| char::from(ALPHANUMS[rng.random_range(0..ALPHANUMS.len())])));
        name
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_random_suffix() {
        let a = SimpleNameGenerator.generate_name("base-");
        assert!(a.starts_with("base-"));
        assert_eq!(a.len(), 10);
        assert!(a["base-".len()..].bytes().all(|c| ALPHANUMS.contains(&c)));
    }

    #[test]
    fn truncates_long_bases() {
        let base = "x".repeat(100);
        let name = SimpleNameGenerator.generate_name(&base);
        assert_eq!(name.len(), MAX_NAME_LENGTH);
        assert!(name.starts_with(&"x".repeat(MAX_GENERATED_NAME_LENGTH)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate("äöü", 2), "äö");
        assert_eq!(truncate("ab", 5), "ab");
    }
}
