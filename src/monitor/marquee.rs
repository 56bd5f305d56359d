//! Marquee scroll timing.
//!
//! The marquee joins all active notice texts into one line and scrolls it
//! across the bottom of the monitor. The animation duration grows with the
//! text so the apparent scroll speed stays roughly constant.

/// Wide-space run between adjacent notices so they don't visually run
/// together.
pub const NOTICE_SEPARATOR: &str = "\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}\u{3000}";

/// Seconds of scroll per character of joined text.
const SECS_PER_CHAR: f64 = 0.3;

/// Base duration added to every non-empty marquee.
const BASE_SECS: f64 = 5.0;

/// Duration used when there is nothing to scroll, so an empty marquee still
/// animates at a sane rate.
pub const DEFAULT_DURATION_SECS: f64 = 10.0;

/// Join notice texts with the wide-space separator.
pub fn join_notices(texts: &[String]) -> String {
    texts.join(NOTICE_SEPARATOR)
}

/// Scroll duration for an already-joined marquee line. Empty text gets the
/// default duration; the check is an explicit length test, not a zero-value
/// coercion, so a legitimate short line keeps its computed duration.
pub fn duration_for(joined: &str) -> f64 {
    let len = joined.chars().count();
    if len == 0 {
        DEFAULT_DURATION_SECS
    } else {
        len as f64 * SECS_PER_CHAR + BASE_SECS
    }
}

/// Scroll duration for a list of notice texts.
pub fn duration_secs(texts: &[String]) -> f64 {
    duration_for(&join_notices(texts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_marquee_uses_default_duration() {
        assert_eq!(duration_secs(&[]), 10.0);
        assert_eq!(duration_for(""), 10.0);
        // A single empty notice joins to an empty line.
        assert_eq!(duration_secs(&[String::new()]), 10.0);
    }

    #[test]
    fn duration_scales_with_text_length() {
        let fifty = "x".repeat(50);
        assert_close(duration_for(&fifty), 20.0);
        assert_close(duration_for("x"), 5.3);
    }

    #[test]
    fn duration_counts_chars_not_bytes() {
        // 10 ideographic spaces: 30 bytes but 10 chars.
        let wide = "\u{3000}".repeat(10);
        assert_close(duration_for(&wide), 8.0);
    }

    #[test]
    fn duration_is_monotonically_non_decreasing() {
        let mut last = duration_for("");
        for len in 1..200 {
            let duration = duration_for(&"a".repeat(len));
            assert!(duration >= last, "regressed at len={len}");
            last = duration;
        }
    }

    #[test]
    fn separator_keeps_adjacent_notices_apart() {
        let joined = join_notices(&["first".into(), "second".into()]);
        assert!(joined.starts_with("first"));
        assert!(joined.ends_with("second"));
        assert!(joined.contains(NOTICE_SEPARATOR));
        assert_eq!(
            joined.chars().count(),
            5 + NOTICE_SEPARATOR.chars().count() + 6
        );
    }
}
