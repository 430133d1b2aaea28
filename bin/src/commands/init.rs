//! Init command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tickstore_lib::prelude::*;

/// Create the database file and tick table if they do not exist.
pub(crate) fn init(db: &Path) -> Result<()> {
    TickStore::open(StoreConfig::new(db))
        .with_context(|| format!("Failed to initialize {}", db.display()))?;
    println!("Tick store ready at {}", db.display());
    Ok(())
}
