//! Load `.photo-organizer.toml` from the destination directory (CLI only). The lib takes
//! everything through [`OrganizeOpts`](crate::OrganizeOpts).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OrganizerToml {
    #[serde(default)]
    pub(crate) settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SettingsSection {
    pub(crate) num_workers: Option<usize>,
    pub(crate) extensions: Option<Vec<String>>,
    pub(crate) max_collision_index: Option<u32>,
    pub(crate) follow_links: Option<bool>,
    pub(crate) verbose: Option<bool>,
    pub(crate) progress: Option<bool>,
}

/// Load the settings file from `dir`. `Ok(None)` when absent; a malformed file is a configuration error.
pub(crate) fn load_organizer_toml(dir: &Path) -> Result<Option<OrganizerToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    if !path.is_file() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(&path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let parsed = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(parsed))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $($opts_field:ident).+) => {
        if let Some(v) = $idx.$idx_field.clone() {
            $opts.$($opts_field).+ = v;
        }
    };
}

/// Apply file settings to opts (only fields present in the file). Call before applying CLI flags.
pub(crate) fn apply_file_to_opts(file: &OrganizerToml, opts: &mut Opts) {
    let s = &file.settings;
    apply_file_opt!(s, opts, num_workers => organize.num_workers);
    apply_file_opt!(s, opts, extensions => organize.extensions);
    apply_file_opt!(s, opts, max_collision_index => organize.max_collision_index);
    apply_file_opt!(s, opts, follow_links => organize.follow_links);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, progress => progress);
}
