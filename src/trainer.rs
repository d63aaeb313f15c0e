use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use crate::catalog::PokeApiClient;
use crate::collection::CollectionStore;
use crate::config::Config;
use crate::database::SqlitePreferences;
use crate::models::{CatalogDetail, CatalogEntry, CaughtItem, Page, SpriteSet};
use crate::rules;
use crate::traits::{CatalogSource, PreferenceStore};

/// Drives the catalog and the collection on behalf of a UI
pub struct Trainer<C, P> {
    catalog: C,
    collection: CollectionStore<P>,
}

impl Trainer<PokeApiClient, SqlitePreferences> {
    pub async fn new(config: &Config) -> Result<Self> {
        let catalog = PokeApiClient::new(config)?;
        let prefs = SqlitePreferences::connect(&config.database_url).await?;
        let collection = CollectionStore::new(prefs, config.store_key.clone());

        Ok(Self::with_parts(catalog, collection))
    }
}

impl<C: CatalogSource, P: PreferenceStore> Trainer<C, P> {
    pub fn with_parts(catalog: C, collection: CollectionStore<P>) -> Self {
        Self {
            catalog,
            collection,
        }
    }

    pub fn collection(&self) -> &CollectionStore<P> {
        &self.collection
    }

    pub async fn browse(&self, page_url: Option<&str>) -> Page {
        self.catalog.list_page(page_url).await
    }

    pub async fn inspect(&self, detail_url: &str) -> Option<CatalogDetail> {
        self.catalog.get_detail(detail_url).await
    }

    pub async fn sprites(&self, detail_url: &str) -> Option<SpriteSet> {
        self.catalog.get_sprite_set(detail_url).await
    }

    /// Roll for a catch and keep the creature on success
    pub async fn throw_ball(
        &self,
        entry: &CatalogEntry,
        detail: &CatalogDetail,
        nickname: &str,
    ) -> Result<Option<CaughtItem>> {
        if !rules::attempt_catch() {
            info!("{} broke free", entry.name);
            return Ok(None);
        }

        Ok(Some(self.keep(entry, detail, nickname).await?))
    }

    /// Record a caught creature, replacing any earlier catch of the same entry
    pub async fn keep(
        &self,
        entry: &CatalogEntry,
        detail: &CatalogDetail,
        nickname: &str,
    ) -> Result<CaughtItem> {
        let sprite = detail.sprite_shiny_url.clone().unwrap_or_default();
        let item = CaughtItem::new(entry.clone(), nickname, sprite);

        self.collection.upsert(item.clone()).await?;
        info!("Caught {} as {}", entry.name, item.nickname);
        Ok(item)
    }

    pub async fn party(&self) -> Vec<CaughtItem> {
        self.collection.get_all().await
    }

    /// Append the next Fibonacci suffix to a caught creature's nickname
    ///
    /// Returns the new nickname, or `None` when `id` is not in the collection.
    pub async fn rename(&self, id: Uuid) -> Result<Option<String>> {
        let Some(item) = self.collection.get(id).await else {
            return Ok(None);
        };

        let nickname = rules::next_rename_suffix(&item.nickname)?;
        if !self.collection.rename(id, &nickname).await? {
            return Ok(None);
        }

        Ok(Some(nickname))
    }

    /// Roll for a release and drop the creature on success
    pub async fn release(&self, id: Uuid) -> Result<bool> {
        if !rules::attempt_release() {
            info!("Release of {} failed", id);
            return Ok(false);
        }

        Ok(self.collection.remove(id).await?)
    }
}
