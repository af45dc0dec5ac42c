use serde::Serialize;

/// テキストバッファの派生メトリクス（読み取り時に都度再計算する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextMetrics {
    pub chars: usize,
    pub words: usize,
}

impl TextMetrics {
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
        }
    }
}

/// 入出力バッファ。`output` はリライト結果の書き込みと明示的クリアのみが
/// 変更経路で、ユーザー編集は `input` にしか届かない。
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    input: String,
    output: String,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// ユーザー編集・ファイル取り込みによる入力の全置換
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// リライト完了時の出力書き込み
    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn input_metrics(&self) -> TextMetrics {
        TextMetrics::of(&self.input)
    }

    pub fn output_metrics(&self) -> TextMetrics {
        TextMetrics::of(&self.output)
    }
}
