//! Full-listing helper for the page-by-page ticket API.
//!
//! Pages are fetched strictly one after another: whether page `n + 1` is
//! requested depends on the size of page `n`.

use std::future::Future;

use crate::error::ZammadError;
use crate::models::Ticket;

/// A source of ticket pages.
///
/// Implemented by [`ZammadClient`](crate::zammad_client::ZammadClient).
pub trait TicketLister {
    /// Returns page `page` (1-based) holding at most `per_page` tickets.
    fn list_tickets(
        &self,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<Ticket>, ZammadError>> + Send;
}

/// Fetches every ticket by walking pages `1..=max_pages`.
///
/// Batches are concatenated in the order received. The walk stops early as
/// soon as a page holds fewer than `per_page` items. No deduplication is
/// done, so tickets that move between pages while the walk runs may be
/// duplicated or skipped. The first error aborts the walk and is returned
/// unchanged.
pub async fn fetch_all_tickets<L>(
    lister: &L,
    per_page: u32,
    max_pages: u32,
) -> Result<Vec<Ticket>, ZammadError>
where
    L: TicketLister,
{
    let mut all = Vec::new();

    for page in 1..=max_pages {
        let batch = lister.list_tickets(page, per_page).await?;
        let batch_len = batch.len();
        all.extend(batch);

        tracing::debug!(page, batch_len, total = all.len(), "Fetched ticket page");

        if batch_len < per_page as usize {
            break;
        }
    }

    Ok(all)
}
