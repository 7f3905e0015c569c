//! Removal of code-fence wrapping from generated replies.
//!
//! The endpoint sometimes wraps a whole reply in a fenced block
//! (```` ```json ... ``` ````). Only the outer markers are removed; the inner
//! content is kept byte-for-byte.

const FENCE: &str = "```";

/// Strip a leading fence (with optional language tag and newline) and a
/// trailing fence (with optional preceding newline).
///
/// Trailing whitespace after the closing marker is ignored when looking for
/// it. A trailing marker that closes a block opened inside the reply is kept,
/// so the reply never ends up with a dangling opener. Text without
/// surrounding fences is returned unchanged.
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text;

    if let Some(rest) = body.strip_prefix(FENCE) {
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
            .unwrap_or(rest.len());
        let rest = &rest[tag_len..];
        body = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest);
    }

    if let Some(rest) = body.trim_end().strip_suffix(FENCE) {
        if !opens_inner_block(rest) {
            body = rest
                .strip_suffix("\r\n")
                .or_else(|| rest.strip_suffix('\n'))
                .unwrap_or(rest);
        }
    }

    body.to_string()
}

/// Whether `body` leaves a fenced block open, in which case a closing marker
/// after it belongs to that block rather than to an outer wrapper.
fn opens_inner_block(body: &str) -> bool {
    body.lines()
        .filter(|line| line.trim_start().starts_with(FENCE))
        .count()
        % 2
        == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_untagged_fence() {
        assert_eq!(strip_code_fences("```\nplain\n```"), "plain");
    }

    #[test]
    fn leaves_unfenced_text_untouched() {
        let text = "  Hello there!\nGeneral Kenobi.  \n";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn preserves_inner_content_verbatim() {
        let inner = "line one\n\n  indented `code`\nline ```three```";
        let wrapped = format!("```markdown\n{inner}\n```");
        assert_eq!(strip_code_fences(&wrapped), inner);
    }

    #[test]
    fn strips_only_leading_fence_when_unclosed() {
        assert_eq!(strip_code_fences("```python\nprint(1)"), "print(1)");
    }

    #[test]
    fn strips_only_trailing_fence() {
        assert_eq!(strip_code_fences("done\n```"), "done");
    }

    #[test]
    fn ignores_whitespace_after_closing_fence() {
        assert_eq!(strip_code_fences("```\nhi\n```\n"), "hi");
    }

    #[test]
    fn bare_fence_becomes_empty() {
        assert_eq!(strip_code_fences("```"), "");
    }

    #[test]
    fn keeps_closing_fence_of_inner_block() {
        let text = "Here:\n```rust\nfn x(){}\n```";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn strips_wrapper_around_nested_block() {
        let text = "```markdown\nSee:\n```sh\nls\n```\n```";
        assert_eq!(strip_code_fences(text), "See:\n```sh\nls\n```");
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(strip_code_fences("```json\r\n{}\r\n```"), "{}");
    }
}
