#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use tokio::net::TcpListener;

use poke_keeper::catalog::PokeApiClient;
use poke_keeper::collection::CollectionStore;
use poke_keeper::config::Config;
use poke_keeper::database::MemoryPreferences;
use poke_keeper::trainer::Trainer;

pub const NAMES: [&str; 25] = [
    "bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard", "squirtle",
    "wartortle", "blastoise", "caterpie", "metapod", "butterfree", "weedle", "kakuna", "beedrill",
    "pidgey", "pidgeotto", "pidgeot", "rattata", "raticate", "spearow", "fearow", "ekans", "arbok",
    "pikachu",
];

pub const PAGE_SIZE: usize = 20;

/// Shape of the fixture listing: `{offset}` in, up to `PAGE_SIZE` names out
async fn listing(State(base): State<String>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let offset: usize = params
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);

    let results: Vec<Value> = NAMES
        .iter()
        .enumerate()
        .skip(offset)
        .take(PAGE_SIZE)
        .map(|(i, name)| json!({ "name": name, "url": format!("{base}/api/v2/pokemon/{}/", i + 1) }))
        .collect();

    let next = (offset + PAGE_SIZE < NAMES.len())
        .then(|| format!("{base}/api/v2/pokemon?offset={}&limit={PAGE_SIZE}", offset + PAGE_SIZE));

    Json(json!({
        "count": NAMES.len(),
        "next": next,
        "previous": null,
        "results": results,
    }))
}

async fn pikachu() -> Json<Value> {
    Json(json!({
        "id": 25,
        "name": "pikachu",
        "moves": [
            { "move": { "name": "mega-punch", "url": "https://pokeapi.co/api/v2/move/5/" } },
            { "move": { "name": "pay-day", "url": "https://pokeapi.co/api/v2/move/6/" } },
            { "move": { "name": "thunder-punch", "url": "https://pokeapi.co/api/v2/move/9/" } }
        ],
        "types": [
            { "slot": 1, "type": { "name": "electric", "url": "https://pokeapi.co/api/v2/type/13/" } }
        ],
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png",
            "front_shiny": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/shiny/25.png",
            "back_default": null
        }
    }))
}

/// Detail document with no sprites at all
async fn spriteless() -> Json<Value> {
    Json(json!({
        "name": "missingno",
        "moves": [],
        "types": [],
        "sprites": { "front_default": null, "front_shiny": null }
    }))
}

/// Starts the fixture catalog and returns its base URL
pub async fn start_catalog() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/api/v2/pokemon", get(listing))
        .route("/api/v2/pokemon/25/", get(pikachu))
        .route("/api/v2/pokemon/0/", get(spriteless))
        .route("/broken", get(|| async { "<html>not json</html>" }))
        .route("/empty", get(|| async { Json(json!({ "count": 0, "next": null, "previous": null, "results": [] })) }))
        .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
        .with_state(base.clone());

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("serve error: {e}");
        }
    });

    (base, handle)
}

pub fn test_config(base: &str) -> Config {
    Config {
        catalog_base_url: format!("{base}/api/v2/pokemon"),
        database_url: "sqlite::memory:".to_string(),
        ..Config::default()
    }
}

pub fn test_client(base: &str) -> PokeApiClient {
    PokeApiClient::new(&test_config(base)).unwrap()
}

pub fn memory_store() -> CollectionStore<MemoryPreferences> {
    CollectionStore::new(MemoryPreferences::new(), Config::default().store_key)
}

pub fn test_trainer(base: &str) -> Trainer<PokeApiClient, MemoryPreferences> {
    Trainer::with_parts(test_client(base), memory_store())
}
