//! Data models for catalog listings, detail documents and caught creatures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A creature summary from one page of the remote listing.
///
/// The listing carries no identity of its own, so `id` is minted on every
/// fetch and changes when the same page is fetched again. Compare entries
/// with [`CatalogEntry::same_ref`], never by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "url")]
    pub detail_url: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            detail_url: detail_url.into(),
        }
    }

    /// Stable `(name, detail_url)` key for this entry
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.detail_url)
    }

    pub fn same_ref(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// A `{name, url}` pair as the catalog nests it for moves and types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Full detail for one creature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDetail {
    pub name: String,
    pub moves: Vec<NamedResource>,
    pub types: Vec<NamedResource>,
    pub sprite_default_url: Option<String>,
    pub sprite_shiny_url: Option<String>,
}

/// Sprite record for a creature whose default sprite is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSet {
    pub default_url: String,
}

/// A creature the user has caught, as persisted in the collection blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtItem {
    pub id: Uuid,
    #[serde(rename = "pokemon")]
    pub catalog_ref: CatalogEntry,
    pub nickname: String,
    #[serde(rename = "sprite")]
    pub sprite_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caught_at: Option<DateTime<Utc>>,
}

impl CaughtItem {
    pub fn new(catalog_ref: CatalogEntry, nickname: impl Into<String>, sprite_url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            catalog_ref,
            nickname: nickname.into(),
            sprite_url: sprite_url.into(),
            caught_at: Some(Utc::now()),
        }
    }
}

/// One page of catalog entries plus the cursor for the following page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub entries: Vec<CatalogEntry>,
    pub next_page_url: Option<String>,
}

/// Listing payload: `{count, next, previous, results}`
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<ListingResult>,
}

#[derive(Debug, Deserialize)]
pub struct ListingResult {
    pub name: String,
    pub url: String,
}

/// Per-creature document as served by the catalog
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub name: String,
    pub moves: Vec<MoveSlot>,
    pub types: Vec<TypeSlot>,
    pub sprites: SpritesResponse,
}

#[derive(Debug, Deserialize)]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub move_: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct SpritesResponse {
    pub front_shiny: Option<String>,
    pub front_default: Option<String>,
}

/// Sprite-only view of the detail document; `front_default` must be present
#[derive(Debug, Deserialize)]
pub struct SpriteOnlyResponse {
    pub sprites: SpriteUrls,
}

#[derive(Debug, Deserialize)]
pub struct SpriteUrls {
    pub front_default: String,
}

impl From<DetailResponse> for CatalogDetail {
    fn from(detail: DetailResponse) -> Self {
        Self {
            name: detail.name,
            moves: detail.moves.into_iter().map(|slot| slot.move_).collect(),
            types: detail.types.into_iter().map(|slot| slot.type_).collect(),
            sprite_default_url: detail.sprites.front_default,
            sprite_shiny_url: detail.sprites.front_shiny,
        }
    }
}

impl From<SpriteOnlyResponse> for SpriteSet {
    fn from(response: SpriteOnlyResponse) -> Self {
        Self {
            default_url: response.sprites.front_default,
        }
    }
}
