use anyhow::{bail, Context};
use clap::Subcommand;
use serde_json::{json, Value};

use crate::cli::{utils, OutputFormat};
use crate::config::{AppConfig, StoreBackend};
use crate::store::{self, Collection, Document};

#[derive(Subcommand)]
pub enum StoreCommands {
    #[command(about = "Open the configured store and check connectivity")]
    Ping,

    #[command(about = "Insert every object of a JSON array file into a collection")]
    Seed {
        #[arg(help = "Collection name (books, users, cart, news, events, members)")]
        collection: String,
        #[arg(help = "JSON file containing an array of objects, or - for stdin")]
        input: String,
    },
}

pub async fn handle(cmd: StoreCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        StoreCommands::Ping => {
            let store = store::open(&config.store).await.context("failed to open store")?;
            store.ping().await?;
            utils::output_success(
                output_format,
                &format!("{:?} store is reachable", config.store.backend),
                None,
            )
        }
        StoreCommands::Seed { collection, input } => {
            if config.store.backend == StoreBackend::Memory {
                bail!("seeding requires a persistent store; set STORE_BACKEND=postgres");
            }

            let collection: Collection = collection.parse()?;
            let documents = seed_documents(utils::read_json_input(&input)?, &input)?;

            let store = store::open(&config.store).await.context("failed to open store")?;
            let mut inserted = 0usize;
            for document in documents {
                store.insert_one(collection, document).await?;
                inserted += 1;
            }

            tracing::info!("Seeded {} documents into {}", inserted, collection);
            utils::output_success(
                output_format,
                &format!("inserted {} documents into {}", inserted, collection),
                Some(json!({ "collection": collection.name(), "inserted": inserted })),
            )
        }
    }
}

/// Validate a seed file: a JSON array whose every element is an object
fn seed_documents(value: Value, source: &str) -> anyhow::Result<Vec<Document>> {
    let Value::Array(items) = value else {
        bail!("{} must contain a JSON array", source);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(document) => Ok(document),
            _ => bail!("element {} is not a JSON object", index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_accepts_array_of_objects() {
        let documents = seed_documents(json!([{ "title": "a" }, { "title": "b" }]), "news.json").unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1]["title"], json!("b"));
    }

    #[test]
    fn seed_rejects_non_array() {
        let err = seed_documents(json!({ "title": "a" }), "news.json").unwrap_err();
        assert_eq!(err.to_string(), "news.json must contain a JSON array");
    }

    #[test]
    fn seed_rejects_non_object_element() {
        let err = seed_documents(json!([{ "title": "a" }, "b"]), "-").unwrap_err();
        assert_eq!(err.to_string(), "element 1 is not a JSON object");
    }

    #[tokio::test]
    async fn ping_succeeds_on_memory_store() {
        let config = AppConfig::development();
        assert!(handle(StoreCommands::Ping, &config, OutputFormat::Json).await.is_ok());
    }

    #[tokio::test]
    async fn seed_refuses_memory_store() {
        let config = AppConfig::development();
        let cmd = StoreCommands::Seed {
            collection: "news".to_string(),
            input: "-".to_string(),
        };
        let err = handle(cmd, &config, OutputFormat::Text).await.unwrap_err();
        assert!(err.to_string().contains("STORE_BACKEND=postgres"));
    }
}
