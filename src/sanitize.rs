//! Filename sanitization

/// Characters rejected by common filesystems (Windows being the strictest)
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Base name used when nothing usable is left after cleaning
pub const FALLBACK_BASE_NAME: &str = "qrcode";

/// Strip reserved characters and surrounding whitespace from a user-supplied name.
///
/// Always returns a usable name; an empty result becomes [`FALLBACK_BASE_NAME`].
pub fn sanitize_file_name(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_only_falls_back() {
        for raw in ["", "   ", "<>:\"/\\|?*", " ? * ", "////", "::"] {
            assert_eq!(sanitize_file_name(raw), FALLBACK_BASE_NAME, "input {raw:?}");
        }
    }

    #[test]
    fn test_clean_names_are_only_trimmed() {
        for raw in ["site", "  my code ", "résumé-2024", "a.b.c", "logo.jpg", "tab\tname"] {
            assert_eq!(sanitize_file_name(raw), raw.trim(), "input {raw:?}");
        }
    }

    #[test]
    fn test_reserved_characters_are_removed() {
        assert_eq!(sanitize_file_name("a/b:c"), "abc");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_file_name("C:\\temp\\qr"), "Ctempqr");
        assert_eq!(sanitize_file_name("what? <this> | \"that\"*"), "what this  that");
    }

    #[test]
    fn test_trim_happens_after_removal() {
        assert_eq!(sanitize_file_name("/ name /"), "name");
    }
}
