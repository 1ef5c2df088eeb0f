/// Measures rendered text width in pixels
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

/// Greedy first-fit word wrap
///
/// Words are separated by single spaces and keep their trailing space; the
/// renderer trims it. A word that alone exceeds `max_width` gets a line of
/// its own and is never split. Newlines in `text` start a new paragraph.
pub fn wrap_text(text: &str, measure: &impl TextMeasure, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();

        for word in paragraph.split(' ') {
            let candidate = format!("{line}{word} ");
            if measure.text_width(&candidate) < max_width || line.is_empty() {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line = format!("{word} ");
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is the same width
    struct Monospace(f32);

    impl TextMeasure for Monospace {
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * self.0
        }
    }

    fn trimmed(lines: Vec<String>) -> Vec<String> {
        lines.into_iter().map(|l| l.trim_end().to_string()).collect()
    }

    #[test]
    fn one_word_per_line_when_pairs_overflow() {
        // "AAAA " is 50px, "AAAA BBBB " is 100px
        let lines = wrap_text("AAAA BBBB CCCC", &Monospace(10.0), 80.0);
        assert_eq!(trimmed(lines), vec!["AAAA", "BBBB", "CCCC"]);
    }

    #[test]
    fn words_share_a_line_while_they_fit() {
        let lines = wrap_text("the quick brown fox jumps", &Monospace(10.0), 165.0);
        assert_eq!(trimmed(lines), vec!["the quick brown", "fox jumps"]);
    }

    #[test]
    fn wrapping_is_first_fit_not_balanced() {
        let lines = wrap_text("aa bb cc dd e", &Monospace(1.0), 10.0);
        assert_eq!(trimmed(lines), vec!["aa bb cc", "dd e"]);
    }

    #[test]
    fn oversized_word_is_kept_whole() {
        let lines = wrap_text("a extraordinarily b", &Monospace(10.0), 50.0);
        assert_eq!(trimmed(lines), vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn trailing_space_is_left_for_the_renderer() {
        let lines = wrap_text("AAAA BBBB", &Monospace(10.0), 80.0);
        assert_eq!(lines, vec!["AAAA ", "BBBB "]);
    }

    #[test]
    fn newlines_start_new_lines() {
        let lines = wrap_text("first\nsecond", &Monospace(1.0), 100.0);
        assert_eq!(trimmed(lines), vec!["first", "second"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap_text("", &Monospace(1.0), 100.0).is_empty());
    }
}
