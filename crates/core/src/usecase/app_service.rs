use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::domain::catalog::Catalog;
use crate::domain::editor::{EditorState, TextMetrics};
use crate::domain::error::AppError;
use crate::domain::request::{
    validate_percentage, Rejection, RequestState, RequestTracker, RewriteConfiguration,
    StateTransition, REWRITE_FAILED_MESSAGE,
};
use crate::domain::settings::AppSettings;
use crate::infra::metrics::{Metrics, MetricsSummary};
use crate::infra::output::{OutputRouter, OutputTarget};
use crate::infra::rewriter::{HttpRewriter, Rewriter};
use crate::infra::transfer::{ExportFormat, FileTransfer};

/// 現在のモード/トーン/percentage の選択状態
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub mode_id: String,
    pub tone_id: String,
    pub percentage: u32,
}

/// rewrite の呼び出し結果。Rejected はエラーではなく黙殺された呼び出し。
#[derive(Debug, Clone)]
pub enum RewriteOutcome {
    Succeeded(StateTransition),
    Failed(StateTransition),
    Rejected(Rejection),
}

/// アプリケーションサービス（フロントエンドから State として使われる想定）
pub struct AppService {
    editor: Mutex<EditorState>,
    tracker: Mutex<RequestTracker>,
    selection: Mutex<Selection>,
    catalog: Mutex<Catalog>,
    rewriter: Arc<dyn Rewriter>,
    output: OutputRouter,
    metrics: Metrics,
    settings: AppSettings,
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl AppService {
    pub fn new(rewriter: Arc<dyn Rewriter>, settings: AppSettings) -> Self {
        let output = OutputRouter::new(settings.copy_ack_ms);
        Self::assemble(rewriter, output, settings)
    }

    /// 出力先を差し替えるコンストラクタ（テスト・ヘッドレス環境用）
    pub fn with_output_target(
        rewriter: Arc<dyn Rewriter>,
        target: Arc<dyn OutputTarget>,
        settings: AppSettings,
    ) -> Self {
        let output = OutputRouter::with_target(target, settings.copy_ack_ms);
        Self::assemble(rewriter, output, settings)
    }

    /// 設定のベースURLに向けたHTTPクライアント構成
    pub fn over_http(settings: AppSettings) -> Self {
        let rewriter = Arc::new(HttpRewriter::new(settings.api_base_url.clone()));
        Self::new(rewriter, settings)
    }

    fn assemble(rewriter: Arc<dyn Rewriter>, output: OutputRouter, settings: AppSettings) -> Self {
        let selection = Selection {
            mode_id: settings.default_mode.clone(),
            tone_id: settings.default_tone.clone(),
            percentage: settings.default_percentage,
        };
        Self {
            editor: Mutex::new(EditorState::new()),
            tracker: Mutex::new(RequestTracker::new()),
            selection: Mutex::new(selection),
            catalog: Mutex::new(Catalog::default()),
            rewriter,
            output,
            metrics: Metrics::new(),
            settings,
        }
    }

    // ==================== Catalog ====================

    /// 起動時に一度だけ呼ぶ。失敗してもエラーにせず、空カタログのまま
    /// デフォルト選択で運用を続ける（ログのみ）。
    pub async fn load_catalog(&self) {
        {
            let catalog = self.catalog.lock().unwrap();
            if !catalog.is_empty() {
                log::debug!("カタログは取得済み、再取得しない");
                return;
            }
        }

        let start = std::time::Instant::now();
        match self.rewriter.fetch_catalog().await {
            Ok(fetched) => {
                self.metrics.inc_catalog_loads();
                self.metrics
                    .record_latency("catalog", start.elapsed().as_millis() as u64);
                log::info!(
                    "カタログ取得: {} モード / {} トーン",
                    fetched.modes.len(),
                    fetched.tones.len()
                );
                self.reconcile_selection(&fetched);
                *self.catalog.lock().unwrap() = fetched;
            }
            Err(e) => {
                self.metrics.inc_catalog_failures();
                log::warn!("カタログ取得失敗、デフォルト選択のまま続行: {e}");
            }
        }
    }

    /// 取得したカタログにデフォルト選択IDが存在するか検証し、
    /// 無ければ先頭エントリにフォールバックする。
    fn reconcile_selection(&self, catalog: &Catalog) {
        let mut sel = self.selection.lock().unwrap();
        if !catalog.has_mode(&sel.mode_id) {
            if let Some(first) = catalog.first_mode_id() {
                log::warn!(
                    "デフォルトモード '{}' がカタログに無いため '{}' を選択",
                    sel.mode_id,
                    first
                );
                sel.mode_id = first.to_string();
            }
        }
        if !catalog.has_tone(&sel.tone_id) {
            if let Some(first) = catalog.first_tone_id() {
                log::warn!(
                    "デフォルトトーン '{}' がカタログに無いため '{}' を選択",
                    sel.tone_id,
                    first
                );
                sel.tone_id = first.to_string();
            }
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog.lock().unwrap().clone()
    }

    // ==================== Selection ====================

    pub fn select_mode(&self, mode_id: &str) -> Result<(), AppError> {
        let catalog = self.catalog.lock().unwrap();
        if !catalog.is_empty() && !catalog.has_mode(mode_id) {
            return Err(AppError::invalid_state(format!(
                "unknown mode id: {mode_id}"
            )));
        }
        drop(catalog);
        self.selection.lock().unwrap().mode_id = mode_id.to_string();
        Ok(())
    }

    pub fn select_tone(&self, tone_id: &str) -> Result<(), AppError> {
        let catalog = self.catalog.lock().unwrap();
        if !catalog.is_empty() && !catalog.has_tone(tone_id) {
            return Err(AppError::invalid_state(format!(
                "unknown tone id: {tone_id}"
            )));
        }
        drop(catalog);
        self.selection.lock().unwrap().tone_id = tone_id.to_string();
        Ok(())
    }

    pub fn set_percentage(&self, percentage: u32) -> Result<(), AppError> {
        validate_percentage(percentage)?;
        self.selection.lock().unwrap().percentage = percentage;
        Ok(())
    }

    pub fn selection(&self) -> Selection {
        self.selection.lock().unwrap().clone()
    }

    // ==================== Editor ====================

    pub fn set_input(&self, text: impl Into<String>) {
        self.editor.lock().unwrap().set_input(text);
    }

    pub fn input(&self) -> String {
        self.editor.lock().unwrap().input().to_string()
    }

    pub fn output(&self) -> String {
        self.editor.lock().unwrap().output().to_string()
    }

    pub fn clear_output(&self) {
        self.editor.lock().unwrap().clear_output();
    }

    /// 表示チャネル用のテキスト。失敗時はエラー文言、それ以外は出力バッファ。
    /// 出力バッファ自体にエラー文字列が混ざることはない。
    pub fn display_output(&self) -> String {
        if let RequestState::Failed { message } = self.tracker.lock().unwrap().state() {
            return message.clone();
        }
        self.output()
    }

    pub fn input_metrics(&self) -> TextMetrics {
        self.editor.lock().unwrap().input_metrics()
    }

    pub fn output_metrics(&self) -> TextMetrics {
        self.editor.lock().unwrap().output_metrics()
    }

    // ==================== Rewrite ====================

    pub fn request_state(&self) -> RequestState {
        self.tracker.lock().unwrap().state().clone()
    }

    /// リライト実行。空入力・Loading 中は黙って Rejected を返す。
    /// 失敗時は固定文言を Failed 状態に載せ、原因はログにのみ残す。
    /// どちらの結末でも次の呼び出しが可能な状態に戻る。
    pub async fn rewrite(&self) -> Result<RewriteOutcome, AppError> {
        let input = self.input();
        let configuration = {
            let sel = self.selection.lock().unwrap();
            RewriteConfiguration::new(sel.mode_id.clone(), sel.tone_id.clone(), sel.percentage)
        };
        configuration.validate()?;

        // ガードは同期セクションで評価し、ロックを持ったまま await しない
        let request = {
            let mut tracker = self.tracker.lock().unwrap();
            match tracker.begin(&input, configuration, now()) {
                Ok((request, _)) => request,
                Err(rejection) => return Ok(RewriteOutcome::Rejected(rejection)),
            }
        };

        self.metrics.inc_rewrites_requested();
        log::info!(
            "リライト開始: request={} mode={} tone={}",
            request.request_id,
            request.configuration.mode_id,
            request.configuration.tone_id
        );

        let start = std::time::Instant::now();
        match self.rewriter.rewrite(&request).await {
            Ok(text) => {
                self.metrics
                    .record_latency("rewrite", start.elapsed().as_millis() as u64);
                self.metrics.inc_rewrites_succeeded();
                self.editor.lock().unwrap().set_output(text);
                let transition = self.tracker.lock().unwrap().succeed(now())?;
                Ok(RewriteOutcome::Succeeded(transition))
            }
            Err(e) => {
                self.metrics.inc_rewrites_failed();
                log::error!("リライト失敗: request={} cause={e}", request.request_id);
                self.editor.lock().unwrap().clear_output();
                let transition = self
                    .tracker
                    .lock()
                    .unwrap()
                    .fail(REWRITE_FAILED_MESSAGE, now())?;
                Ok(RewriteOutcome::Failed(transition))
            }
        }
    }

    // ==================== Clipboard ====================

    /// 出力バッファをクリップボードへコピー。空なら no-op で false。
    pub fn copy_output(&self) -> Result<bool, AppError> {
        let text = self.output();
        let delivered = self.output.copy(&text)?;
        if delivered {
            self.metrics.inc_copies_delivered();
        }
        Ok(delivered)
    }

    pub fn copied(&self) -> bool {
        self.output.copied()
    }

    // ==================== File Transfer ====================

    /// テキストファイルの取り込み。受理したら input を全置換して true。
    pub async fn import_file(&self, path: &Path) -> Result<bool, AppError> {
        match FileTransfer::import(path).await? {
            Some(text) => {
                self.editor.lock().unwrap().set_input(text);
                self.metrics.inc_files_imported();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 出力バッファの書き出し。出力が空なら no-op で None。
    pub async fn export_output(
        &self,
        dir: &Path,
        format: ExportFormat,
    ) -> Result<Option<PathBuf>, AppError> {
        let text = self.output();
        if text.is_empty() {
            return Ok(None);
        }
        let path =
            FileTransfer::export(dir, &self.settings.export_basename, format, &text).await?;
        self.metrics.inc_files_exported();
        Ok(Some(path))
    }

    // ==================== Metrics ====================

    pub fn metrics_summary(&self) -> MetricsSummary {
        self.metrics.summary()
    }
}
