// ********* Configuration **********

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_CHUNK_CHARS: usize = 90_000;
pub const DEFAULT_BOUNDARY_WINDOW: usize = 1_000;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingOptions {
    #[serde(rename = "maxChunkChars")]
    pub max_chunk_chars: usize,
    /// How far back from the hard limit to look for a paragraph or sentence break.
    #[serde(rename = "boundaryWindow")]
    pub boundary_window: usize,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        ChunkingOptions {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            boundary_window: DEFAULT_BOUNDARY_WINDOW,
        }
    }
}

/// Settings of the completion service.
///
/// The API key itself is never part of the file: `api_key_env` names the
/// environment variable that holds it.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    #[serde(rename = "apiKeyEnv")]
    pub api_key_env: String,
    #[serde(rename = "timeoutSecs")]
    pub timeout_secs: u64,
    /// Number of chunks sent to the service at the same time. 1 processes the
    /// chunks one after the other.
    #[serde(rename = "maxConcurrency")]
    pub max_concurrency: usize,
}

impl CompletionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for CompletionSettings {
    fn default() -> Self {
        CompletionSettings {
            endpoint: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.3,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 120,
            max_concurrency: 1,
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub completion: CompletionSettings,
    pub chunking: ChunkingOptions,
}

/// Who the document is about. Embedded in every request.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    #[serde(rename = "candidateName")]
    pub candidate_name: String,
    #[serde(rename = "partyName")]
    pub party_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let js = r#"{"completion": {"model": "local-model", "maxConcurrency": 4}}"#;
        let config: ExtractConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.completion.model, "local-model");
        assert_eq!(config.completion.max_concurrency, 4);
        assert_eq!(config.completion.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.chunking, ChunkingOptions::default());
    }

    #[test]
    fn empty_config() {
        let config: ExtractConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ExtractConfig::default());
        assert_eq!(config.completion.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn zero_timeout_is_one_second() {
        let js = r#"{"completion": {"timeoutSecs": 0}}"#;
        let config: ExtractConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.completion.timeout(), Duration::from_secs(1));
    }
}
