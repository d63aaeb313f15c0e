use anyhow::{Context, Result, bail};
use tracing::info;
use uuid::Uuid;

use poke_keeper::config::Config;
use poke_keeper::models::CatalogEntry;
use poke_keeper::rules::{self, FEATURED_MOVE_SLOTS};
use poke_keeper::trainer::Trainer;

const USAGE: &str = "usage: poke-keeper <command>

commands:
  list [page-url]               list one page of the catalog
  show <detail-url>             show detail for one creature
  catch <detail-url> <nickname> throw a ball
  mine                          list caught creatures
  rename <id>                   append the next suffix to a nickname
  release <id>                  try to release a caught creature";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = Config::from_env();
    let trainer = Trainer::new(&config).await?;
    info!("Running {}", command);

    match (command.as_str(), &args[1..]) {
        ("list", [rest @ ..]) if rest.len() <= 1 => {
            let page = trainer.browse(rest.first().map(String::as_str)).await;
            if page.entries.is_empty() {
                println!("No Pokémon on this page");
            }
            for entry in &page.entries {
                println!("{:<16} {}", entry.name, entry.detail_url);
            }
            if let Some(next) = page.next_page_url {
                println!("\nnext: {next}");
            }
        }
        ("show", [url]) => {
            let Some(detail) = trainer.inspect(url).await else {
                bail!("could not load {url}");
            };
            println!("{}", detail.name);
            let types: Vec<&str> = detail.types.iter().map(|t| t.name.as_str()).collect();
            println!("types: {}", types.join(", "));
            let moves = rules::featured_moves(&detail, FEATURED_MOVE_SLOTS, &mut rand::thread_rng());
            let moves: Vec<&str> = moves.iter().map(|m| m.name.as_str()).collect();
            println!("moves: {}", moves.join(", "));
            if let Some(sprite) = trainer.sprites(url).await {
                println!("sprite: {}", sprite.default_url);
            }
        }
        ("catch", [url, nickname]) => {
            let Some(detail) = trainer.inspect(url).await else {
                bail!("could not load {url}");
            };
            let entry = CatalogEntry::new(detail.name.clone(), url.clone());
            match trainer.throw_ball(&entry, &detail, nickname).await? {
                Some(item) => println!("Gotcha! {} was caught ({})", item.nickname, item.id),
                None => println!("The Pokémon broke free!"),
            }
        }
        ("mine", []) => {
            let party = trainer.party().await;
            if party.is_empty() {
                println!("No Pokémon caught before");
            }
            for item in party {
                println!("{}  {:<24} {}", item.id, item.nickname, item.catalog_ref.name);
            }
        }
        ("rename", [id]) => {
            let id = parse_id(id)?;
            match trainer.rename(id).await? {
                Some(nickname) => println!("Renamed to {nickname}"),
                None => println!("No caught Pokémon with id {id}"),
            }
        }
        ("release", [id]) => {
            let id = parse_id(id)?;
            if trainer.release(id).await? {
                println!("Pokémon has been released successfully");
            } else {
                println!("Failed to release Pokémon");
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("{raw:?} is not a caught Pokémon id"))
}
