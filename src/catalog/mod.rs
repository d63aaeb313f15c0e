//! PokeAPI-backed catalog client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CatalogError, DomainError};
use crate::models::{
    CatalogDetail, CatalogEntry, DetailResponse, ListingResponse, SpriteOnlyResponse, SpriteSet,
};
use crate::traits::CatalogSource;

/// Build the cursor for the page after `page_url`
///
/// Everything from the first `?` on is dropped and replaced with
/// `?offset=<returned>`. The offset is the size of the page just returned,
/// not a running total.
pub fn next_page_cursor(page_url: &str, returned: usize) -> String {
    let path = page_url.split_once('?').map_or(page_url, |(path, _)| path);
    format!("{path}?offset={returned}")
}

pub fn parse_url(url: &str) -> Result<Url, DomainError> {
    Url::parse(url).map_err(|e| DomainError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// HTTP client for the PokeAPI listing and detail endpoints
#[derive(Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.catalog_base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let url = parse_url(url)?;
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, page_url: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let listing: ListingResponse = self.get_json(page_url).await?;

        debug!(
            "Listing reports {} total, server next={:?}, previous={:?}",
            listing.count, listing.next, listing.previous
        );

        Ok(listing
            .results
            .into_iter()
            .map(|result| CatalogEntry::new(result.name, result.url))
            .collect())
    }

    async fn fetch_detail(&self, detail_url: &str) -> Result<CatalogDetail, CatalogError> {
        let detail: DetailResponse = self.get_json(detail_url).await?;
        info!(
            "Fetched detail for {} ({} moves, {} types)",
            detail.name,
            detail.moves.len(),
            detail.types.len()
        );
        Ok(detail.into())
    }

    async fn fetch_sprites(&self, detail_url: &str) -> Result<SpriteSet, CatalogError> {
        let sprites: SpriteOnlyResponse = self.get_json(detail_url).await?;
        Ok(sprites.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_replaces_query_with_returned_count() {
        assert_eq!(
            next_page_cursor("https://pokeapi.co/api/v2/pokemon", 20),
            "https://pokeapi.co/api/v2/pokemon?offset=20"
        );
        assert_eq!(
            next_page_cursor("https://pokeapi.co/api/v2/pokemon?offset=20&limit=20", 20),
            "https://pokeapi.co/api/v2/pokemon?offset=20"
        );
    }

    #[test]
    fn empty_page_still_yields_offset_zero() {
        assert_eq!(
            next_page_cursor("https://pokeapi.co/api/v2/pokemon?offset=1300", 0),
            "https://pokeapi.co/api/v2/pokemon?offset=0"
        );
    }

    #[test]
    fn parse_url_rejects_relative_paths() {
        let err = parse_url("/api/v2/pokemon").unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl { .. }));
        assert!(parse_url("https://pokeapi.co/api/v2/pokemon/25/").is_ok());
    }
}
