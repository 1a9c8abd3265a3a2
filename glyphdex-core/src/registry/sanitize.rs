//! Name and locator sanitization
//!
//! Applied to every raw entry before storage. Injected so registry tests can
//! substitute a no-op or fault-simulating implementation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Strips markup from user-supplied emoji names and locators. Total by
/// construction: implementations return their input (possibly unchanged)
/// rather than failing.
pub trait Sanitize {
    fn sanitize(&self, input: &str) -> String;
}

/// Removes `<...>` tag spans.
pub struct StripMarkup;

static TAG_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

impl Sanitize for StripMarkup {
    fn sanitize(&self, input: &str) -> String {
        TAG_SPAN.replace_all(input, "").into_owned()
    }
}

/// Keeps input unchanged.
pub struct Passthrough;

impl Sanitize for Passthrough {
    fn sanitize(&self, input: &str) -> String {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tag_spans() {
        let s = StripMarkup;

        assert_eq!(s.sanitize("<b>party</b>_parrot"), "party_parrot");
        assert_eq!(s.sanitize("<script>x</script>"), "x");
        assert_eq!(s.sanitize("plain"), "plain");
    }

    #[test]
    fn test_unclosed_tag_is_kept() {
        let s = StripMarkup;

        assert_eq!(s.sanitize("a<b"), "a<b");
    }

    #[test]
    fn test_passthrough_keeps_input() {
        let s = Passthrough;

        assert_eq!(s.sanitize("<b>kept</b>"), "<b>kept</b>");
    }
}
