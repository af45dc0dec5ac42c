use std::sync::Mutex;

use super::OutputTarget;
use crate::domain::error::AppError;

/// MemoryOutput: 配信内容をメモリに溜めるだけの出力先。
/// クリップボードが使えない環境（CI・ヘッドレス）でのテストに使う。
pub struct MemoryOutput {
    delivered: Mutex<Vec<String>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

impl Default for MemoryOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputTarget for MemoryOutput {
    fn deliver(&self, text: &str) -> Result<(), AppError> {
        self.delivered.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
