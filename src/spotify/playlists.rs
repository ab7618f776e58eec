use serde_json::Value;

use super::{SpotifyClient, ensure_success};
use crate::{error::RelayError, types::PlaylistPage};

/// Largest page size `GET /me/playlists` accepts.
pub const PAGE_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Collects every playlist of the current user into one ordered list.
    ///
    /// Pages are fetched one after another starting from the first page and
    /// following the provider's `next` pointer until it is null. Items keep
    /// page order and, within a page, provider order.
    ///
    /// # Errors
    ///
    /// The first failing page aborts the whole operation; items gathered so
    /// far are dropped and the failing page's error is returned. If the
    /// provider still reports a next page after `max_playlist_pages` pages,
    /// [`RelayError::PageLimitExceeded`] is returned.
    pub async fn list_all_playlists(&self, token: &str) -> Result<Vec<Value>, RelayError> {
        let mut items = Vec::new();
        let mut next = Some(format!("{}?limit={PAGE_LIMIT}", self.api("/me/playlists")));
        let mut pages = 0;

        while let Some(url) = next {
            if pages == self.max_playlist_pages {
                return Err(RelayError::PageLimitExceeded(self.max_playlist_pages));
            }

            let page = self.playlist_page(&url, token).await?;
            pages += 1;

            items.extend(page.items);
            next = page.next;
        }

        tracing::debug!(pages, items = items.len(), "collected playlists");
        Ok(items)
    }

    async fn playlist_page(&self, url: &str, token: &str) -> Result<PlaylistPage, RelayError> {
        let response = self.http.get(url).bearer_auth(token).send().await?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| RelayError::InvalidUpstream(format!("playlist page: {e}")))
    }
}
