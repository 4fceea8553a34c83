/// Extract JSON content from a model response.
///
/// Handles three formats:
/// 1. JSON in a ```json code fence
/// 2. JSON in a generic ``` code fence
/// 3. Raw JSON starting with `{`
///
/// Returns the extracted JSON string slice, or None if no JSON found.
pub fn extract_json_str(response: &str) -> Option<&str> {
    if let Some(start) = response.find("```json") {
        let content_start = start + 7;
        let end = response[content_start..]
            .find("```")
            .map(|e| content_start + e)?;
        return Some(response[content_start..end].trim());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // skip a language tag on the fence line
        let line_end = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);
        let end = response[line_end..].find("```").map(|e| line_end + e)?;
        return Some(response[line_end..end].trim());
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if start <= end {
        Some(response[start..=end].trim())
    } else {
        None
    }
}

/// Cut `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}\n... (truncated)", &text[..byte_idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_str_code_fence() {
        let response = r#"Here is the assessment:
```json
{"categories": {}}
```
Done."#;
        assert_eq!(extract_json_str(response), Some(r#"{"categories": {}}"#));
    }

    #[test]
    fn extract_json_str_generic_fence() {
        let response = "```\n{\"key\": 1}\n```";
        assert_eq!(extract_json_str(response), Some(r#"{"key": 1}"#));
    }

    #[test]
    fn extract_json_str_raw() {
        let response = r#"Result: {"key": "value"} end"#;
        assert_eq!(extract_json_str(response), Some(r#"{"key": "value"}"#));
    }

    #[test]
    fn extract_json_str_none() {
        assert_eq!(extract_json_str("no json here"), None);
    }

    #[test]
    fn extract_json_str_with_banner() {
        let response = "Running node v24.8.0\n{\"key\": \"value\"}";
        assert_eq!(extract_json_str(response), Some(r#"{"key": "value"}"#));
    }

    #[test]
    fn truncate_short_text_untouched() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcde", 5), "abcde");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let out = truncate_chars("ééééé", 2);
        assert!(out.starts_with("éé\n"));
        assert!(out.ends_with("(truncated)"));
    }
}
