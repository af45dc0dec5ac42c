use serde::Serialize;

use super::error::AppError;

/// 手動モードのID。percentage はこのモードのときだけリクエストに乗る。
pub const MANUAL_MODE_ID: &str = "manual";

/// リライト失敗時にユーザーへ表示する固定文言
pub const REWRITE_FAILED_MESSAGE: &str = "Error: Failed to rewrite text. Please try again.";

/// リライト呼び出しのライフサイクル状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Idle,
    Loading,
    Succeeded,
    Failed { message: String },
}

impl RequestState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// 1回のリライト呼び出しに使う設定。
/// percentage は mode_id == "manual" のときに限り Some になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteConfiguration {
    pub mode_id: String,
    pub tone_id: String,
    pub percentage: Option<u32>,
}

impl RewriteConfiguration {
    /// 選択状態から設定を組み立てる。manual 以外では percentage を落とす。
    pub fn new(mode_id: impl Into<String>, tone_id: impl Into<String>, percentage: u32) -> Self {
        let mode_id = mode_id.into();
        let percentage = (mode_id == MANUAL_MODE_ID).then_some(percentage);
        Self {
            mode_id,
            tone_id: tone_id.into(),
            percentage,
        }
    }

    /// 不変条件の検査: percentage の有無と値域（[10,100]、10刻み）
    pub fn validate(&self) -> Result<(), AppError> {
        match (self.mode_id.as_str(), self.percentage) {
            (MANUAL_MODE_ID, Some(p)) => validate_percentage(p),
            (MANUAL_MODE_ID, None) => Err(AppError::invalid_state(
                "manual mode requires a percentage",
            )),
            (_, Some(_)) => Err(AppError::invalid_state(
                "percentage is only valid for manual mode",
            )),
            (_, None) => Ok(()),
        }
    }
}

/// percentage の値域検査（[10,100]、10刻み）
pub fn validate_percentage(p: u32) -> Result<(), AppError> {
    if !(10..=100).contains(&p) || p % 10 != 0 {
        return Err(AppError::invalid_state(format!(
            "percentage must be a multiple of 10 in [10,100], got {p}"
        )));
    }
    Ok(())
}

/// 1回の呼び出しごとに生成される一時リクエスト
#[derive(Debug, Clone)]
pub struct RewriteRequest {
    pub request_id: String,
    pub input_text: String,
    pub configuration: RewriteConfiguration,
}

/// invoke が黙って弾かれる理由。エラーではなく no-op（ログも出さない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// trim後の入力が空
    EmptyInput,
    /// 既に Loading 中（同時実行ガード）
    Busy,
}

/// 状態遷移イベントペイロード
#[derive(Debug, Clone, Serialize)]
pub struct StateTransition {
    pub request_id: String,
    pub prev_state: String,
    pub new_state: RequestState,
    pub timestamp: String,
}

/// リライト呼び出しの状態機械。同時に生きるリクエストは最大1つで、
/// Succeeded / Failed は次の begin で暗黙に上書きされる表示用状態。
pub struct RequestTracker {
    state: RequestState,
    current_request_id: Option<String>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            current_request_id: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn current_request_id(&self) -> Option<&str> {
        self.current_request_id.as_deref()
    }

    /// 呼び出し受理。空入力と Loading 中は Rejection を返すだけで副作用なし。
    /// 受理したら Loading に遷移し、新しいリクエストを発行する。
    pub fn begin(
        &mut self,
        input_text: &str,
        configuration: RewriteConfiguration,
        now: String,
    ) -> Result<(RewriteRequest, StateTransition), Rejection> {
        if input_text.trim().is_empty() {
            return Err(Rejection::EmptyInput);
        }
        if self.state.is_loading() {
            return Err(Rejection::Busy);
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        let prev = self.state.as_str().to_string();
        self.state = RequestState::Loading;
        self.current_request_id = Some(request_id.clone());

        let request = RewriteRequest {
            request_id: request_id.clone(),
            input_text: input_text.to_string(),
            configuration,
        };
        let transition = StateTransition {
            request_id,
            prev_state: prev,
            new_state: RequestState::Loading,
            timestamp: now,
        };
        Ok((request, transition))
    }

    /// 成功完了: Loading→Succeeded
    pub fn succeed(&mut self, now: String) -> Result<StateTransition, AppError> {
        self.settle(RequestState::Succeeded, now)
    }

    /// 失敗完了: Loading→Failed。message はユーザー表示用の文言。
    pub fn fail(&mut self, message: impl Into<String>, now: String) -> Result<StateTransition, AppError> {
        self.settle(
            RequestState::Failed {
                message: message.into(),
            },
            now,
        )
    }

    fn settle(&mut self, new_state: RequestState, now: String) -> Result<StateTransition, AppError> {
        if !self.state.is_loading() {
            return Err(AppError::invalid_state(format!(
                "request cannot settle from {} state",
                self.state.as_str()
            )));
        }
        let prev = self.state.as_str().to_string();
        self.state = new_state.clone();
        Ok(StateTransition {
            request_id: self.current_request_id.clone().unwrap_or_default(),
            prev_state: prev,
            new_state,
            timestamp: now,
        })
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}
