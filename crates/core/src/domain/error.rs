use serde::Serialize;

/// アプリケーション共通エラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "E_CATALOG")]
    Catalog,
    #[serde(rename = "E_REWRITE")]
    Rewrite,
    #[serde(rename = "E_CLIPBOARD")]
    Clipboard,
    #[serde(rename = "E_FILE")]
    File,
    #[serde(rename = "E_INVALID_STATE")]
    InvalidState,
    #[serde(rename = "E_INTERNAL")]
    Internal,
}

/// アプリケーションエラー（UIイベントペイロード兼用）
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub recoverable: bool,
}

impl AppError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidState,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: msg.into(),
            recoverable: false,
        }
    }

    pub fn rewrite(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Rewrite,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Clipboard,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn file(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::File,
            message: msg.into(),
            recoverable: true,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
