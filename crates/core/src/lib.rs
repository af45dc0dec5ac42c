//! ContentCraft クライアントコア。
//!
//! リモートのリライトサービスに対するクライアント側オーケストレーション:
//! カタログ取得、テキストバッファ、リクエストのライフサイクル管理、
//! ファイル取り込み/書き出し、クリップボード出力。

pub mod domain;
pub mod infra;
pub mod usecase;
