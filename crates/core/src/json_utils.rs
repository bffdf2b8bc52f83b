//! Helpers for pulling JSON out of free-form model output.

/// Strip a fenced code block (```` ```json ... ``` ````) around model output.
///
/// Any language tag after the opening fence is dropped with the first line.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```").and_then(|s| s.strip_suffix("```")) else {
        return trimmed;
    };
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}

/// Locate the outermost JSON object in `content`.
///
/// Models sometimes wrap the object in prose ("Here is the result: {...}").
/// Falls back to the fence-stripped text when no braces are found.
#[must_use]
pub fn extract_json_object(content: &str) -> &str {
    let stripped = strip_markdown_json(content);
    match (stripped.find('{'), stripped.rfind('}')) {
        (Some(start), Some(end)) if start < end => stripped.get(start..=end).unwrap_or(stripped),
        _ => stripped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let input = "```json\n{\"tags\": [\"login\"]}\n```";
        assert_eq!(strip_markdown_json(input), "{\"tags\": [\"login\"]}");
    }

    #[test]
    fn strips_bare_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(strip_markdown_json(input), "{\"a\": 1}");
    }

    #[test]
    fn leaves_plain_json_alone() {
        assert_eq!(strip_markdown_json("  {\"a\": 1} "), "{\"a\": 1}");
    }

    #[test]
    fn extracts_object_from_prose() {
        let input = "Sure! Here you go: {\"is_search\": true} hope that helps";
        assert_eq!(extract_json_object(input), "{\"is_search\": true}");
    }

    #[test]
    fn extract_keeps_nested_braces() {
        let input = "```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_object(input), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn extract_without_object_returns_text() {
        assert_eq!(extract_json_object("no json here"), "no json here");
    }
}
