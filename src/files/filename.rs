//! Output filename derivation: sanitization plus a small template language
//! with `{stem}`, `{conversation}`, `{date}` and `{time}` tags.
//!
//! Conversation identifiers come straight from exports (phone numbers,
//! Matrix room ids, email addresses) and need aggressive cleaning before
//! they can appear in a filename.

use deunicode::deunicode;

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Default fallback name when sanitization produces an empty result.
const FALLBACK_NAME: &str = "examples";

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

/// Sanitizes a string for use in filenames.
///
/// Transliterates Unicode to ASCII, turns whitespace into hyphens, strips
/// invalid filesystem characters, collapses hyphen runs, trims leading and
/// trailing dots/hyphens, prefixes Windows reserved device names with `_`,
/// and falls back to "examples" if nothing is left.
pub fn sanitize(input: &str) -> String {
    let ascii = deunicode(input);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;

    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if INVALID_CHARS.contains(&c) {
            continue;
        } else {
            result.push(c);
            last_was_hyphen = false;
        }
    }

    let trimmed = result.trim_matches(|c| c == '-' || c == '.' || c == ' ');
    let mut name = if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    };

    if WINDOWS_RESERVED
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
    {
        name.insert(0, '_');
    }

    if name.len() > MAX_FILENAME_LENGTH {
        name.truncate(MAX_FILENAME_LENGTH);
    }

    name
}

/// Values available to a filename template.
pub struct TemplateContext<'a> {
    /// Input file stem ("messages" for messages.jsonl)
    pub stem: &'a str,
    /// Conversation filter, if one was given
    pub conversation: Option<&'a str>,
    /// Timestamp rendered by {date} and {time}
    pub now: chrono::NaiveDateTime,
}

/// Renders a filename template.
///
/// `{stem}` and `{conversation}` are sanitized; `{conversation}` renders as
/// "all" when no filter is set (matching how the original exporter named
/// unfiltered dumps).
pub fn render_template(template: &str, ctx: &TemplateContext) -> String {
    let conversation = ctx
        .conversation
        .map(sanitize)
        .unwrap_or_else(|| "all".to_string());

    template
        .replace("{stem}", &sanitize(ctx.stem))
        .replace("{conversation}", &conversation)
        .replace("{date}", &ctx.now.format("%Y-%m-%d").to_string())
        .replace("{time}", &ctx.now.format("%H%M%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn sanitize_replaces_whitespace_with_hyphens() {
        assert_eq!(sanitize("my  chat log"), "my-chat-log");
    }

    #[test]
    fn sanitize_strips_invalid_characters() {
        assert_eq!(sanitize("a/b\\c:d*e"), "abcde");
    }

    #[test]
    fn sanitize_keeps_phone_number_plus() {
        assert_eq!(sanitize("+15551234567"), "+15551234567");
    }

    #[test]
    fn sanitize_transliterates_unicode() {
        assert_eq!(sanitize("café"), "cafe");
    }

    #[test]
    fn sanitize_prefixes_windows_reserved_names() {
        assert_eq!(sanitize("CON"), "_CON");
        assert_eq!(sanitize("aux"), "_aux");
        assert_eq!(sanitize("console"), "console");
    }

    #[test]
    fn sanitize_empty_falls_back() {
        assert_eq!(sanitize(""), "examples");
        assert_eq!(sanitize("///"), "examples");
    }

    #[test]
    fn renders_all_tags() {
        let ctx = TemplateContext {
            stem: "messages",
            conversation: Some("+1555 123"),
            now: fixed_time(),
        };

        assert_eq!(
            render_template("{stem}-{conversation}-{date}-{time}.json", &ctx),
            "messages-+1555-123-2026-01-02-030405.json"
        );
    }

    #[test]
    fn missing_conversation_renders_all() {
        let ctx = TemplateContext {
            stem: "messages",
            conversation: None,
            now: fixed_time(),
        };

        assert_eq!(render_template("{conversation}.json", &ctx), "all.json");
    }
}
