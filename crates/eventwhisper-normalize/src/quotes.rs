/// Opening -> closing delimiter pairs that get peeled off
const QUOTE_PAIRS: [(char, char); 7] = [
    ('"', '"'),
    ('\'', '\''),
    ('`', '`'),
    ('\u{201C}', '\u{201D}'), // “ ”
    ('\u{2018}', '\u{2019}'), // ‘ ’
    ('\u{00AB}', '\u{00BB}'), // « »
    ('\u{2039}', '\u{203A}'), // ‹ ›
];

/// Strip any number of wrapping quote/backtick layers.
///
/// Whitespace is trimmed before each layer is inspected, so `` ` "x" ` ``
/// unwraps fully. Unquoted input comes back trimmed and otherwise unchanged.
pub fn strip_wrapping_quotes(input: &str) -> &str {
    let mut s = input.trim();
    loop {
        let mut chars = s.chars();
        let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
            // Fewer than two characters left
            return s;
        };

        let Some(&(_, closer)) = QUOTE_PAIRS.iter().find(|(open, _)| *open == first) else {
            return s;
        };
        if last != closer {
            return s;
        }

        s = s[first.len_utf8()..s.len() - last.len_utf8()].trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("  padded  ", "padded")]
    #[case("\"double\"", "double")]
    #[case("'single'", "single")]
    #[case("`tick`", "tick")]
    #[case("```triple```", "triple")]
    #[case("`\"'nested'\"`", "nested")]
    #[case("` \" spaced \" `", "spaced")]
    #[case("\u{201C}curly\u{201D}", "curly")]
    #[case("\u{2018}curly\u{2019}", "curly")]
    #[case("\u{00AB}guillemet\u{00BB}", "guillemet")]
    #[case("\u{2039}angle\u{203A}", "angle")]
    fn test_strip_wrapping_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_wrapping_quotes(input), expected);
    }

    #[test]
    fn test_mismatched_pair_is_kept() {
        assert_eq!(strip_wrapping_quotes("\"half'"), "\"half'");
        assert_eq!(strip_wrapping_quotes("\u{201D}reversed\u{201C}"), "\u{201D}reversed\u{201C}");
    }

    #[test]
    fn test_short_inputs() {
        assert_eq!(strip_wrapping_quotes(""), "");
        assert_eq!(strip_wrapping_quotes("\""), "\"");
        assert_eq!(strip_wrapping_quotes("\"\""), "");
        assert_eq!(strip_wrapping_quotes("'\"\"'"), "");
    }

    #[test]
    fn test_windows_path_survives() {
        assert_eq!(
            strip_wrapping_quotes("`C:\\Logs\\Security.evtx`"),
            "C:\\Logs\\Security.evtx"
        );
    }
}
