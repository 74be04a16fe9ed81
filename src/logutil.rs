//! Log sanitizing for names that arrive from persisted payloads or scripts.
//! Keeps warnings single-line even when a payload key embeds control bytes.

/// Render an untrusted label safe for one-line logging. Control characters
/// become `\xNN` escapes and anything past the cap is cut with an ellipsis.
pub fn clean_label(raw: &str) -> String {
    const MAX_LABEL: usize = 64;
    let mut out = String::with_capacity(raw.len().min(MAX_LABEL) + 4);
    for (n, ch) in raw.chars().enumerate() {
        if n >= MAX_LABEL {
            out.push('…');
            break;
        }
        if ch.is_control() {
            use std::fmt::Write;
            let _ = write!(&mut out, "\\x{:02X}", ch as u32);
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::clean_label;

    #[test]
    fn escapes_control_chars() {
        assert_eq!(clean_label("quest\nlog"), "quest\\x0Alog");
    }

    #[test]
    fn truncates_long_labels() {
        let long = "x".repeat(100);
        let cleaned = clean_label(&long);
        assert_eq!(cleaned.chars().count(), 65);
        assert!(cleaned.ends_with('…'));
    }

    #[test]
    fn plain_names_untouched() {
        assert_eq!(clean_label("quest_log"), "quest_log");
    }
}
