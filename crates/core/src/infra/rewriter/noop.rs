use async_trait::async_trait;

use super::{RewriteError, Rewriter};
use crate::domain::catalog::{Catalog, Mode, Tone};
use crate::domain::request::RewriteRequest;

/// NoopRewriter: ネットワークなしで動くモック実装。
/// テキストにプレフィックスを付けて返し、固定カタログを提供する。
pub struct NoopRewriter;

fn mode(id: &str, name: &str, description: &str) -> Mode {
    Mode {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn tone(id: &str, name: &str, description: &str) -> Tone {
    Tone {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

/// リモートサービスが公開しているものと同じモード/トーンの組
pub fn builtin_catalog() -> Catalog {
    Catalog {
        modes: vec![
            mode(
                "humanize",
                "Humanize Mode",
                "Light, natural adjustments while keeping meaning intact",
            ),
            mode(
                "extreme",
                "Extreme Mode",
                "Deep paraphrasing with sentence restructuring and stylistic shifts",
            ),
            mode(
                "manual",
                "Manual % Mode",
                "User-defined percentage of text to be rewritten",
            ),
        ],
        tones: vec![
            tone("business", "Business", "Professional, formal language"),
            tone("casual", "Casual", "Relaxed, conversational language"),
            tone("humorous", "Humorous", "Light humor and wit"),
            tone("academic", "Academic", "Scholarly, precise language"),
        ],
    }
}

#[async_trait]
impl Rewriter for NoopRewriter {
    async fn fetch_catalog(&self) -> Result<Catalog, RewriteError> {
        Ok(builtin_catalog())
    }

    async fn rewrite(&self, request: &RewriteRequest) -> Result<String, RewriteError> {
        Ok(format!("[rewritten] {}", request.input_text))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::RewriteConfiguration;

    #[tokio::test]
    async fn test_noop_rewrite() {
        let rewriter = NoopRewriter;
        let request = RewriteRequest {
            request_id: "req-1".to_string(),
            input_text: "Hello world".to_string(),
            configuration: RewriteConfiguration::new("humanize", "business", 50),
        };
        let result = rewriter.rewrite(&request).await.unwrap();
        assert_eq!(result, "[rewritten] Hello world");
    }

    #[tokio::test]
    async fn test_noop_catalog() {
        let catalog = NoopRewriter.fetch_catalog().await.unwrap();
        assert_eq!(catalog.modes.len(), 3);
        assert_eq!(catalog.tones.len(), 4);
        assert!(catalog.has_mode("manual"));
    }

    #[test]
    fn test_noop_name() {
        assert_eq!(NoopRewriter.name(), "noop");
    }
}
