//! サーバーがページ単位で返すコレクションの取得
//!
//! 各ページはサーバー側の`total`を申告する。取得済み件数が`total`に達するまで、
//! 取得済み件数を次の`startAt`として要求を繰り返す。ページサイズはサーバーが決め、
//! ページごとに変わってもよい。

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::{debug, warn};

/// 1ページ分の結果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// 負の`total`は0として扱う
    pub fn new(total: i64, items: Vec<T>) -> Self {
        Self {
            total: usize::try_from(total).unwrap_or(0),
            items,
        }
    }
}

#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// `start_at`から始まるページを取得する（ペイロードがなければ`None`）
    async fn fetch_page(&self, start_at: usize) -> Result<Option<Page<Self::Item>>>;
}

/// すべてのページを順に取得して連結する
///
/// 最初のページにペイロードがなければ`Ok(None)`（未取得）を返し、それ以上要求しない。
/// 途中のページの失敗は取得済みの結果を捨ててそのまま返す。
pub async fn collect_pages<S>(source: &S) -> Result<Option<Vec<S::Item>>>
where
    S: PageSource + ?Sized,
{
    let mut items: Vec<S::Item> = Vec::new();
    let mut pages = 0usize;

    loop {
        let start_at = items.len();
        let page = match source.fetch_page(start_at).await? {
            Some(page) => page,
            None if pages == 0 => {
                debug!("No payload for first page, nothing retrieved");
                return Ok(None);
            }
            None => {
                return Err(Error::MalformedPayload(format!(
                    "page at startAt {} has no payload",
                    start_at
                )));
            }
        };
        pages += 1;

        let received = page.items.len();
        items.extend(page.items);
        debug!(
            "Fetched page {} at startAt {}: {} records ({} of {})",
            pages,
            start_at,
            received,
            items.len(),
            page.total
        );

        if items.len() >= page.total {
            return Ok(Some(items));
        }

        if received == 0 {
            warn!("Pagination stalled after {} of {} records", items.len(), page.total);
            return Err(Error::PaginationStalled {
                retrieved: items.len(),
                total: page.total,
            });
        }
    }
}
