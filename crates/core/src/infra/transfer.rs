use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::AppError;

/// エクスポート形式。
/// Docx は選択肢としては残すが、実体がプレーンテキストのままでは
/// 正しいコンテナにならないため実行時に拒否する（DESIGN.md 参照）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Txt,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &str {
        match self {
            Self::Txt => "txt",
            Self::Docx => "docx",
        }
    }
}

/// ローカルファイルの取り込み/書き出しアダプター
pub struct FileTransfer;

impl FileTransfer {
    /// パスがプレーンテキストファイルかどうか（拡張子ベース）
    fn is_plain_text(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false)
    }

    /// テキストファイルを読み込む。プレーンテキスト以外は黙って無視し
    /// None を返す（エラーにしない）。読み込み自体の失敗はエラー。
    pub async fn import(path: &Path) -> Result<Option<String>, AppError> {
        if !Self::is_plain_text(path) {
            log::debug!("プレーンテキスト以外のファイルを無視: {}", path.display());
            return Ok(None);
        }

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file(format!("ファイル読み込み失敗 {}: {e}", path.display())))?;

        log::info!(
            "ファイル取り込み: {} ({} 文字)",
            path.display(),
            text.chars().count()
        );
        Ok(Some(text))
    }

    /// 出力バッファを `{dir}/{basename}.{ext}` に書き出す。
    pub async fn export(
        dir: &Path,
        basename: &str,
        format: ExportFormat,
        text: &str,
    ) -> Result<PathBuf, AppError> {
        if format == ExportFormat::Docx {
            // プレーンテキストに .docx を付けても有効な文書ファイルにならない
            return Err(AppError::file(
                "docx export is not supported: output would not be a valid document container",
            ));
        }

        let path = dir.join(format!("{basename}.{}", format.extension()));
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| AppError::file(format!("ファイル書き出し失敗 {}: {e}", path.display())))?;

        log::info!("ファイル書き出し: {}", path.display());
        Ok(path)
    }
}
