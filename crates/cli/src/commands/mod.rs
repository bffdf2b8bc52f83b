pub(crate) mod ai;
pub(crate) mod favorite;
pub(crate) mod model;
pub(crate) mod project;
pub(crate) mod screen;
pub(crate) mod taxonomy;

use anyhow::Result;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `Ok(None)` from a lookup becomes a not-found error.
pub(crate) fn found<T>(value: Option<T>, entity: &str, id: &str) -> Result<T> {
    value.ok_or_else(|| anyhow::anyhow!("{entity} not found: {id}"))
}

pub(crate) fn print_deleted(entity: &str, id: &str, deleted: bool) -> Result<()> {
    if !deleted {
        anyhow::bail!("{entity} not found: {id}");
    }
    print_json(&serde_json::json!({ "deleted": id }))
}
