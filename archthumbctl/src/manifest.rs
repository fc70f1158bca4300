//! JSON manifests of already-parsed metadata records.
//!
//! Both manifests are plain JSON arrays of the record shapes in
//! `archthumb-model`.

use anyhow::Context;
use archthumb_model::{LegacyVodRecord, TowerCardRecord};
use serde::de::DeserializeOwned;
use std::{fs, path::Path};

fn read_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid manifest {}", path.display()))
}

/// Load tower cards; relative thumbnail paths are resolved against the
/// manifest's own directory.
pub fn load_tower_cards(path: &Path) -> anyhow::Result<Vec<TowerCardRecord>> {
    let mut cards: Vec<TowerCardRecord> = read_records(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    for card in &mut cards {
        if let Some(thumbnail) = card.thumbnail.as_mut()
            && thumbnail.is_relative()
        {
            *thumbnail = base.join(&*thumbnail);
        }
    }

    Ok(cards)
}

pub fn load_legacy_records(path: &Path) -> anyhow::Result<Vec<LegacyVodRecord>> {
    read_records(path)
}
