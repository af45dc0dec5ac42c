mod clipboard;
mod memory;

pub use clipboard::ClipboardOutput;
pub use memory::MemoryOutput;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::error::AppError;

/// 出力先 trait
pub trait OutputTarget: Send + Sync {
    fn deliver(&self, text: &str) -> Result<(), AppError>;
    fn name(&self) -> &str;
}

/// 出力ルーター: コピー配信と確認フラグの管理。
/// 確認フラグはコピー成功で true になり、一定時間後に false へ戻る。
/// 戻しタイマーはコピーごとに張り直す（古いタイマーは破棄）。
pub struct OutputRouter {
    target: Arc<dyn OutputTarget>,
    copied: Arc<AtomicBool>,
    revert: Mutex<Option<JoinHandle<()>>>,
    ack_delay: Duration,
}

impl OutputRouter {
    pub fn new(ack_ms: u64) -> Self {
        Self::with_target(Arc::new(ClipboardOutput::new()), ack_ms)
    }

    pub fn with_target(target: Arc<dyn OutputTarget>, ack_ms: u64) -> Self {
        Self {
            target,
            copied: Arc::new(AtomicBool::new(false)),
            revert: Mutex::new(None),
            ack_delay: Duration::from_millis(ack_ms),
        }
    }

    /// テキストを出力先に配信する。空テキストは no-op で false を返す。
    /// 成功したら確認フラグを立て、戻しタイマーを張り直す。
    pub fn copy(&self, text: &str) -> Result<bool, AppError> {
        if text.is_empty() {
            return Ok(false);
        }
        self.target.deliver(text)?;
        self.copied.store(true, Ordering::SeqCst);
        self.arm_revert();
        Ok(true)
    }

    pub fn copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    fn arm_revert(&self) {
        let mut revert = self.revert.lock().unwrap();
        // 直前のコピーのタイマーが残っていれば破棄してから張り直す
        if let Some(handle) = revert.take() {
            handle.abort();
        }
        let copied = Arc::clone(&self.copied);
        let delay = self.ack_delay;
        let deadline = tokio::time::Instant::now() + delay;
        *revert = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            copied.store(false, Ordering::SeqCst);
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(ack_ms: u64) -> (Arc<MemoryOutput>, OutputRouter) {
        let target = Arc::new(MemoryOutput::new());
        let router = OutputRouter::with_target(target.clone(), ack_ms);
        (target, router)
    }

    #[tokio::test]
    async fn test_empty_copy_is_noop() {
        let (target, router) = router(2000);
        assert!(!router.copy("").unwrap());
        assert!(!router.copied());
        assert!(target.delivered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ack_reverts_after_delay() {
        let (target, router) = router(2000);
        assert!(router.copy("rewritten").unwrap());
        assert!(router.copied());
        assert_eq!(target.delivered(), vec!["rewritten".to_string()]);

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert!(router.copied());

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert!(!router.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recopy_rearms_timer() {
        let (_target, router) = router(2000);
        router.copy("first").unwrap();

        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        router.copy("second").unwrap();

        // 1回目のタイマー分の時刻を過ぎてもフラグは立ったまま
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert!(router.copied());

        tokio::time::advance(Duration::from_millis(500)).await;
        tokio::task::yield_now().await;
        assert!(!router.copied());
    }
}
