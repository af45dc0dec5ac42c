pub mod http;
mod noop;

pub use http::HttpRewriter;
pub use noop::NoopRewriter;

use async_trait::async_trait;

use crate::domain::catalog::Catalog;
use crate::domain::request::RewriteRequest;

/// リライトサービス呼び出しエラー
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    #[error("Rewrite failed: {0}")]
    Failed(String),
    #[error("Rewrite timeout")]
    Timeout,
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// リモートのリライトサービスとの境界。HTTP実装とテスト用モックが実装する。
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// 利用可能なモード/トーンの一覧を取得する
    async fn fetch_catalog(&self) -> Result<Catalog, RewriteError>;

    /// リライトを実行し、書き換え済みテキストを返す
    async fn rewrite(&self, request: &RewriteRequest) -> Result<String, RewriteError>;

    fn name(&self) -> &str;
}
