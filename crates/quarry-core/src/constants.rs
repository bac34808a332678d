/// Sentinel a model uses when the context does not contain the answer.
pub const NOT_APPLICABLE: &str = "N/A";

/// Final answer reported when the model reply carries no usable answer.
pub const NOT_FOUND_ANSWER: &str = "No relevant information was found in the context.";

/// Placeholder for a well-formed reply that omitted its analysis.
pub const MISSING_ANALYSIS: &str = "no step-by-step analysis found";

/// Placeholder for a well-formed reply that omitted its summary.
pub const MISSING_SUMMARY: &str = "no reasoning summary found";

/// Prefix of the diagnostic analysis written when a reply could not be parsed.
pub const PARSE_FAILURE_PREFIX: &str = "unable to parse response format; raw content: ";

/// Summary marker written when a reply could not be parsed.
pub const FORMAT_ANOMALY: &str = "response format anomaly";

/// Characters of raw reply quoted in the parse diagnostic.
pub const DIAGNOSTIC_EXCERPT_CHARS: usize = 200;

/// Characters of candidate content exposed in a source preview.
pub const SOURCE_PREVIEW_CHARS: usize = 200;

/// Separator placed between candidate contents in the model context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Truncate `text` to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
