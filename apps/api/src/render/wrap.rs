use super::font_metrics::Font;

/// Greedy word wrap by measured width.
///
/// Words are appended to the current line while the candidate line fits within
/// `max_width` points. A word that is wider than `max_width` on its own is
/// placed on a line by itself rather than split.
pub fn wrap_text(text: &str, max_width: f32, size: f32, font: Font) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if font.width_of_text_at_size(&candidate, size) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("", 100.0, 10.0, Font::Helvetica).is_empty());
        assert!(wrap_text("   ", 100.0, 10.0, Font::Helvetica).is_empty());
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        let lines = wrap_text("Built a thing", 497.0, 10.0, Font::Helvetica);
        assert_eq!(lines, vec!["Built a thing"]);
    }

    #[test]
    fn test_long_bullet_wraps() {
        let bullet = "Architected a distributed caching layer using Redis and consistent hashing, \
                      reducing p99 latency by 40% under 50k RPS peak load across three regions";
        let lines = wrap_text(bullet, 497.0, 10.0, Font::Helvetica);
        assert_eq!(lines.len(), 2, "got {lines:?}");
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let lines = wrap_text(
            "see https://example.com/a/very/long/path/that/never/fits here",
            60.0,
            10.0,
            Font::Helvetica,
        );
        assert_eq!(lines[0], "see");
        assert_eq!(lines[1], "https://example.com/a/very/long/path/that/never/fits");
        assert_eq!(lines[2], "here");
    }

    #[test]
    fn test_collapses_repeated_whitespace() {
        let lines = wrap_text("a  b\n c", 497.0, 10.0, Font::Helvetica);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn test_wide_latin1_glyphs_wrap_by_their_own_widths() {
        // "ÆÆÆÆ" is 40pt at 10pt size, so eleven words plus spaces fill 497pt.
        let text = vec!["ÆÆÆÆ"; 20].join(" ");
        let lines = wrap_text(&text, 497.0, 10.0, Font::Helvetica);
        assert_eq!(lines[0].split(' ').count(), 11);
        assert!(lines
            .iter()
            .all(|l| Font::Helvetica.width_of_text_at_size(l, 10.0) <= 497.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn wrapped_lines_fit_unless_single_word(
            text in "[A-Za-z0-9,%]{1,18}( [A-Za-z0-9,%]{1,18}){0,60}",
            max_width in 40.0f32..520.0,
            size in 8.0f32..14.0,
        ) {
            for line in wrap_text(&text, max_width, size, Font::Helvetica) {
                let width = Font::Helvetica.width_of_text_at_size(&line, size);
                prop_assert!(
                    width <= max_width || !line.contains(' '),
                    "line {line:?} is {width}pt wide, max {max_width}"
                );
            }
        }

        #[test]
        fn wrapping_preserves_words_in_order(
            text in "[a-z]{1,12}( [a-z]{1,12}){0,40}",
            max_width in 30.0f32..400.0,
        ) {
            let lines = wrap_text(&text, max_width, 10.0, Font::HelveticaBold);
            prop_assert_eq!(lines.join(" "), text);
        }
    }
}
