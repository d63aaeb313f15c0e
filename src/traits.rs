//! Seams between the orchestrator and its remote catalog and local backend

use async_trait::async_trait;
use tracing::{error, info};

use crate::catalog::{next_page_cursor, parse_url};
use crate::error::{CatalogError, StoreError};
use crate::models::{CatalogDetail, CatalogEntry, Page, SpriteSet};

/// A read-only remote catalog of creatures
///
/// Implementors provide the typed `fetch_*` methods. The provided
/// `list_page`, `get_detail` and `get_sprite_set` methods are the
/// best-effort surface the UI consumes: errors are logged and collapse to an
/// empty page or `None`, so an empty result may mean either "no more data" or
/// "the request failed".
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fixed listing endpoint used when no page URL is given
    fn base_url(&self) -> &str;

    /// Fetch one listing page, entries in server order
    async fn fetch_page(&self, page_url: &str) -> Result<Vec<CatalogEntry>, CatalogError>;

    async fn fetch_detail(&self, detail_url: &str) -> Result<CatalogDetail, CatalogError>;

    async fn fetch_sprites(&self, detail_url: &str) -> Result<SpriteSet, CatalogError>;

    /// Fetch a page and rebuild the next cursor from the page URL
    ///
    /// The cursor ignores the server's `next` link and is always
    /// `<url before '?'>?offset=<entries returned>`, even after a failed
    /// fetch. A page of zero entries therefore yields `?offset=0`.
    async fn list_page(&self, page_url: Option<&str>) -> Page {
        let url = page_url.unwrap_or_else(|| self.base_url());

        if let Err(e) = parse_url(url) {
            error!("Refusing to fetch catalog page: {}", e);
            return Page::default();
        }

        let entries = match self.fetch_page(url).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error fetching catalog page {}: {}", url, e);
                Vec::new()
            }
        };

        info!("Fetched {} catalog entries from {}", entries.len(), url);
        let next_page_url = Some(next_page_cursor(url, entries.len()));

        Page {
            entries,
            next_page_url,
        }
    }

    async fn get_detail(&self, detail_url: &str) -> Option<CatalogDetail> {
        self.fetch_detail(detail_url)
            .await
            .map_err(|e| error!("Error fetching detail from {}: {}", detail_url, e))
            .ok()
    }

    async fn get_sprite_set(&self, detail_url: &str) -> Option<SpriteSet> {
        self.fetch_sprites(detail_url)
            .await
            .map_err(|e| error!("Error fetching sprites from {}: {}", detail_url, e))
            .ok()
    }
}

/// A key-value preference store holding opaque byte blobs
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the blob stored under `key`
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}
