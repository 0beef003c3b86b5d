use anyhow::Result;
use serde_json::{Map, Value};

use crate::config::ConfigStore;
use crate::render;

/// Store a config value and echo the assignment.
pub fn set(store: &ConfigStore, key: &str, value: &str) -> Result<()> {
    let mut settings = store.load();
    settings.set(key, value);
    store.save(&settings)?;
    println!("Config set: {key} = {value}");
    Ok(())
}

/// Print one config value as a single-key JSON object.
pub fn get(store: &ConfigStore, key: &str) -> Result<()> {
    let settings = store.load();
    let mut record = Map::new();
    record.insert(key.to_owned(), settings.get(key));
    render::print_json(&Value::Object(record))
}
