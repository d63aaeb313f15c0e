//! The user's caught creatures, persisted as one JSON blob under one key
//!
//! Every operation reads the whole blob, edits the decoded list and writes
//! the whole list back. There is no locking: two writers racing on the same
//! key lose one update, last write wins.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::CaughtItem;
use crate::traits::PreferenceStore;

pub struct CollectionStore<P> {
    prefs: P,
    key: String,
}

impl<P: PreferenceStore> CollectionStore<P> {
    pub fn new(prefs: P, key: impl Into<String>) -> Self {
        Self {
            prefs,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strict read: distinguishes an empty collection from a corrupt one
    pub async fn load(&self) -> Result<Vec<CaughtItem>, StoreError> {
        match self.prefs.get(&self.key).await? {
            Some(blob) => decode(&blob),
            None => Ok(Vec::new()),
        }
    }

    /// All caught items in insertion order
    ///
    /// Fails open: a backend error or an undecodable blob is reported on the
    /// `poke_keeper::collection` target and yields an empty list.
    pub async fn get_all(&self) -> Vec<CaughtItem> {
        match self.load().await {
            Ok(items) => items,
            Err(e) => {
                warn!(target: "poke_keeper::collection", key = %self.key, "Discarding unreadable collection: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Option<CaughtItem> {
        self.get_all().await.into_iter().find(|item| item.id == id)
    }

    /// Insert `item`, or replace the record for the same catalog entry in place
    pub async fn upsert(&self, item: CaughtItem) -> Result<(), StoreError> {
        let mut items = self.get_all().await;

        if let Some(existing) = items
            .iter_mut()
            .find(|existing| existing.catalog_ref.same_ref(&item.catalog_ref))
        {
            debug!("Replacing caught {} ({})", existing.catalog_ref.name, existing.nickname);
            *existing = item;
        } else {
            info!("Adding {} to the collection as {}", item.catalog_ref.name, item.nickname);
            items.push(item);
        }

        self.save(&items).await
    }

    /// Set the nickname of the record sharing `id`'s catalog entry
    ///
    /// Returns `false` without writing when `id` is unknown.
    pub async fn rename(&self, id: Uuid, nickname: &str) -> Result<bool, StoreError> {
        let mut items = self.get_all().await;

        let Some(catalog_ref) = items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.catalog_ref.clone())
        else {
            return Ok(false);
        };

        let Some(target) = items
            .iter_mut()
            .find(|item| item.catalog_ref.same_ref(&catalog_ref))
        else {
            return Ok(false);
        };

        info!("Renaming {} from {} to {}", target.catalog_ref.name, target.nickname, nickname);
        target.nickname = nickname.to_string();

        self.save(&items).await?;
        Ok(true)
    }

    /// Delete the record with `id`; unknown ids are a no-op
    pub async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut items = self.get_all().await;

        let Some(index) = items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        let removed = items.remove(index);
        info!("Released {} ({})", removed.catalog_ref.name, removed.nickname);

        self.save(&items).await?;
        Ok(true)
    }

    async fn save(&self, items: &[CaughtItem]) -> Result<(), StoreError> {
        let blob = encode(items)?;
        self.prefs.set(&self.key, &blob).await
    }
}

pub fn encode(items: &[CaughtItem]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(items).map_err(StoreError::Encode)
}

pub fn decode(blob: &[u8]) -> Result<Vec<CaughtItem>, StoreError> {
    serde_json::from_slice(blob).map_err(StoreError::Decode)
}

impl<P: Clone> Clone for CollectionStore<P> {
    fn clone(&self) -> Self {
        Self {
            prefs: self.prefs.clone(),
            key: self.key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    #[test]
    fn blob_round_trip_keeps_order_and_nicknames() {
        let items: Vec<CaughtItem> = ["bulbasaur", "ivysaur", "venusaur"]
            .iter()
            .enumerate()
            .map(|(i, name)| {
                CaughtItem::new(
                    CatalogEntry::new(*name, format!("https://pokeapi.co/api/v2/pokemon/{}/", i + 1)),
                    format!("{name} - {i}"),
                    "",
                )
            })
            .collect();

        let decoded = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn decodes_blob_without_timestamps() {
        let blob = br#"[{
            "id": "E621E1F8-C36C-495A-93FC-0C247A3E6E5F",
            "pokemon": {
                "id": "0D8B7B64-3C4A-4E0E-9C4F-6C1D2B7F1A11",
                "name": "pikachu",
                "url": "https://pokeapi.co/api/v2/pokemon/25/"
            },
            "nickname": "Sparky",
            "sprite": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/shiny/25.png"
        }]"#;

        let items = decode(blob).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].nickname, "Sparky");
        assert_eq!(items[0].catalog_ref.detail_url, "https://pokeapi.co/api/v2/pokemon/25/");
        assert_eq!(items[0].caught_at, None);
    }

    #[test]
    fn corrupt_blob_is_a_decode_error() {
        assert!(matches!(decode(b"{not json"), Err(StoreError::Decode(_))));
    }
}
