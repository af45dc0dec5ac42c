use serde::{Deserialize, Serialize};

/// アプリケーション設定（セッション内メモリのみ、永続化しない）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// リライトAPIのベースURL
    pub api_base_url: String,
    /// デフォルトモードID（カタログ取得失敗時もこのまま使う）
    pub default_mode: String,
    /// デフォルトトーンID
    pub default_tone: String,
    /// manual モードの初期 percentage
    pub default_percentage: u32,
    /// コピー確認フラグを戻すまでの遅延（ms）
    pub copy_ack_ms: u64,
    /// エクスポートファイルのベース名
    pub export_basename: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".to_string(),
            default_mode: "humanize".to_string(),
            default_tone: "business".to_string(),
            default_percentage: 50,
            copy_ack_ms: 2000,
            export_basename: "rewritten-content".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::validate_percentage;

    #[test]
    fn test_defaults() {
        let s = AppSettings::default();
        assert_eq!(s.default_mode, "humanize");
        assert_eq!(s.default_tone, "business");
        assert_eq!(s.copy_ack_ms, 2000);
        assert!(validate_percentage(s.default_percentage).is_ok());
    }
}
