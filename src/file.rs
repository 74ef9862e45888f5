//! TOML file source and config file discovery.
//!
//! # Resolution
//!
//! A parsed TOML table is read through the same walk as every other source:
//! each leaf field looks up its key (the `name` metadata, or the field name)
//! in the table reached by following the path chain, so `[database]` /
//! `pool_size = 10` feeds `database.pool_size`. Keys absent from the file
//! leave the field untouched. Scalars are handed to the coercer as text, so
//! a TOML integer written as `0x110` arrives as `272`.
//!
//! # Discovery
//!
//! Each [`SearchPath`] resolves to one directory, which is checked for
//! `{dir}/{file_name}`. Missing files are silently skipped; any other I/O
//! error is reported as [`OnefigError::SourceUnavailable`]. An explicitly
//! configured file, by contrast, must exist.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::OnefigError;
use crate::schema::{Field, Settings};
use crate::types::SearchPath;
use crate::walk::{self, Resolve};

/// Resolves fields from a parsed TOML table.
pub struct TomlResolver<'a> {
    table: &'a Table,
}

impl<'a> TomlResolver<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }
}

impl Resolve for TomlResolver<'_> {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        let mut section = self.table;
        for name in field.chain {
            section = section.get(*name)?.as_table()?;
        }
        let raw = match section.get(field.key())? {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Datetime(dt) => dt.to_string(),
            Value::Array(_) | Value::Table(_) => {
                tracing::warn!(field = %field.dotted(), "expected a scalar in config file, ignoring");
                return None;
            }
        };
        tracing::trace!(field = %field.dotted(), "resolved from file");
        Some(raw)
    }
}

/// Parse TOML `content` (read from `path`, used for diagnostics) into a table.
pub fn parse_toml(content: &str, path: &Path) -> Result<Table, OnefigError> {
    toml::from_str(content).map_err(|e| OnefigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Assign fields from already-read TOML content.
pub fn load_toml_str<C: Settings + ?Sized>(
    config: &mut C,
    content: &str,
    path: &Path,
) -> Result<(), OnefigError> {
    let table = parse_toml(content, path)?;
    tracing::debug!(path = %path.display(), "applying config file");
    walk::walk(config, &mut TomlResolver::new(&table))
}

/// Read `path` and assign fields from it. The file must exist.
pub fn load_file<C: Settings + ?Sized>(config: &mut C, path: &Path) -> Result<(), OnefigError> {
    let content = read_required(path)?;
    load_toml_str(config, &content, path)
}

pub(crate) fn read_required(path: &Path) -> Result<String, OnefigError> {
    std::fs::read_to_string(path).map_err(|e| OnefigError::SourceUnavailable {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

/// Load every config file found along `search_paths`, in priority order.
///
/// Directories are checked in order for `{dir}/{file_name}`. Missing files are
/// silently skipped; I/O errors are propagated.
pub fn find_config_files(
    search_paths: &[SearchPath],
    file_name: &str,
    app_name: &str,
) -> Result<Vec<(PathBuf, String)>, OnefigError> {
    let dirs: Vec<PathBuf> = search_paths
        .iter()
        .filter_map(|sp| resolve_search_path(sp, app_name))
        .collect();
    load_all(&dirs, file_name)
}

fn load_all(dirs: &[PathBuf], file_name: &str) -> Result<Vec<(PathBuf, String)>, OnefigError> {
    let mut results = Vec::new();
    for dir in dirs {
        let file_path = dir.join(file_name);
        match std::fs::read_to_string(&file_path) {
            Ok(content) => {
                tracing::debug!(path = %file_path.display(), "found config file");
                results.push((file_path, content));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(OnefigError::SourceUnavailable {
                    path: file_path,
                    source: e,
                });
            }
        }
    }
    Ok(results)
}
