use std::path::Path;

use anyhow::{Context, Result};
use inspira_core::{EnvSettings, TaxonomySet};

use super::print_json;
use crate::app::taxonomy_path;

/// Print the active taxonomy without touching storage.
pub(crate) fn run_taxonomy(flag: Option<&Path>) -> Result<()> {
    let path = taxonomy_path(flag, &EnvSettings::from_env());
    let taxonomies =
        TaxonomySet::load_or_builtin(path.as_deref()).context("failed to load taxonomy")?;
    print_json(&taxonomies)
}
