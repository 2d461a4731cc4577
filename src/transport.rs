//! サーバーとの通信境界

use crate::error::Result;
use async_trait::async_trait;

/// 生のJSONテキストを返すGETのみのトランスポート
///
/// ボディが空なら`Ok(None)`。接続失敗やHTTPステータスのエラーは`Err`で返す。
/// リトライはしない。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Option<String>>;
}
