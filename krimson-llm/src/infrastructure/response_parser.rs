//! JSON extraction from free-form model replies
//!
//! Models are asked for bare JSON but routinely wrap it in markdown fences or
//! prose. Extraction is best-effort; a failure here is what sends the tracker
//! to its synthetic fallback.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::LlmError;

/// Utilities for extracting and parsing JSON from LLM responses.
pub struct ResponseParser;

impl ResponseParser {
    /// Parse a `T` out of an LLM response.
    ///
    /// Strategy order:
    /// 1) The full trimmed content.
    /// 2) A ```json fenced block.
    /// 3) Any fenced block.
    /// 4) The first embedded JSON object/array that deserializes as `T`.
    pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, LlmError> {
        let trimmed = content.trim();
        if let Ok(parsed) = serde_json::from_str::<T>(trimmed) {
            return Ok(parsed);
        }

        let fenced = [
            Self::extract_fenced_json(trimmed),
            Self::extract_any_fenced_code(trimmed),
        ];
        for block in fenced.into_iter().flatten() {
            if let Ok(parsed) = serde_json::from_str::<T>(&block) {
                return Ok(parsed);
            }
        }

        Self::embedded_values::<T>(trimmed).next().ok_or_else(|| {
            LlmError::InvalidResponse("Failed to extract valid JSON from LLM response".to_string())
        })
    }

    /// Parse the first JSON object found in the response
    pub fn parse_object(content: &str) -> Result<Map<String, Value>, LlmError> {
        Self::parse_json::<Map<String, Value>>(content)
    }

    /// Extract a ```json fenced code block.
    pub fn extract_fenced_json(content: &str) -> Option<String> {
        Self::extract_fenced_block(content, Some("json"))
    }

    /// Extract any fenced code block.
    pub fn extract_any_fenced_code(content: &str) -> Option<String> {
        Self::extract_fenced_block(content, None)
    }

    /// Values of type `T` starting at each `{` or `[`, in text order.
    ///
    /// `serde_json::Deserializer` stops at the end of the first complete value,
    /// so trailing prose after the JSON is ignored.
    fn embedded_values<T: DeserializeOwned>(content: &str) -> impl Iterator<Item = T> + '_ {
        content
            .char_indices()
            .filter(|(_, ch)| *ch == '{' || *ch == '[')
            .filter_map(move |(idx, _)| {
                serde_json::Deserializer::from_str(&content[idx..])
                    .into_iter::<T>()
                    .next()
                    .and_then(Result::ok)
            })
    }

    fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
        let fence = "```";
        let mut search = content;

        loop {
            let start = search.find(fence)?;
            let after_start = &search[start + fence.len()..];

            let line_end = after_start.find('\n')?;
            let lang_tag = after_start[..line_end].trim();
            let rest = &after_start[line_end + 1..];

            if let Some(expected) = language
                && !lang_tag.eq_ignore_ascii_case(expected)
            {
                search = after_start;
                continue;
            }

            let end = rest.find(fence)?;
            return Some(rest[..end].trim().to_string());
        }
    }
}
