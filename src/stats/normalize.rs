//! Team-name canonicalization.
//!
//! Comparison keys must be lenient on casing, accents, and surrounding
//! whitespace while still separating genuinely different clubs. Display
//! strings are never rewritten; keys are derived copies.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::TeamKey;

/// Organizational prefixes stripped from the front of club names when the
/// policy is enabled. Checked in order, each at most once.
const CLUB_PREFIXES: &[&str] = &["as ", "ssc ", "fc "];

/// Canonicalizes display names into comparison keys.
///
/// The policy is fixed at construction and owned by the dataset snapshot, so
/// keys cached at load time and keys derived from query input always agree.
#[derive(Debug, Clone)]
pub struct Normalizer {
    strip_prefixes: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            strip_prefixes: true,
        }
    }
}

impl Normalizer {
    pub fn new(strip_prefixes: bool) -> Self {
        Self { strip_prefixes }
    }

    /// Derive the comparison key for a display name.
    ///
    /// Pipeline: trim, lowercase, NFD-decompose and drop combining marks,
    /// collapse whitespace, then optionally strip club prefixes. Blank input
    /// yields the empty key; this never fails.
    pub fn key(&self, name: &str) -> TeamKey {
        let folded: String = name
            .trim()
            .to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if !self.strip_prefixes {
            return TeamKey::new(folded);
        }

        let mut rest = folded.as_str();
        for prefix in CLUB_PREFIXES {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped.trim_start();
            }
        }
        TeamKey::new(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_case_fold() {
        let norm = Normalizer::default();
        assert_eq!(norm.key("  Juventus "), norm.key("juventus"));
        assert_eq!(norm.key("INTER"), norm.key("inter"));
    }

    #[test]
    fn test_diacritics_collapse() {
        let norm = Normalizer::default();
        assert_eq!(norm.key("São Paulo"), norm.key("sao paulo"));
        assert_eq!(norm.key("Atlético Madrid"), norm.key("atletico madrid"));
        assert_eq!(norm.key("Alavés"), norm.key("alaves"));
    }

    #[test]
    fn test_prefix_stripping() {
        let norm = Normalizer::default();
        assert_eq!(norm.key("AS Roma"), norm.key("roma"));
        assert_eq!(norm.key("FC Roma"), norm.key("Roma"));
        assert_eq!(norm.key("SSC Napoli"), norm.key("napoli"));
    }

    #[test]
    fn test_prefix_stripping_disabled() {
        let norm = Normalizer::new(false);
        assert_ne!(norm.key("AS Roma"), norm.key("roma"));
        assert_eq!(norm.key("AS Roma").as_str(), "as roma");
    }

    #[test]
    fn test_prefix_only_at_start() {
        let norm = Normalizer::default();
        // "as" embedded in a name must survive
        assert_eq!(norm.key("Monza AS").as_str(), "monza as");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let norm = Normalizer::default();
        let once = norm.key("  AS Récanati  ");
        let twice = norm.key(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_blank_input_yields_empty_key() {
        let norm = Normalizer::default();
        assert!(norm.key("").is_empty());
        assert!(norm.key("   ").is_empty());
    }

    #[test]
    fn test_internal_whitespace_collapsed() {
        let norm = Normalizer::default();
        assert_eq!(norm.key("Real   Madrid"), norm.key("Real Madrid"));
    }
}
