//! Strict-mode validation: detect unknown keys in config files.
//!
//! The set of keys the schema consumes is collected with a dry walk; every
//! leaf of the TOML table outside that set is reported with its file path and
//! best-effort line number. A table nobody consumes is reported as a whole.

use std::collections::BTreeSet;
use std::path::Path;

use toml::{Table, Value};

use crate::error::OnefigError;
use crate::file::parse_toml;
use crate::schema::{Field, Settings};
use crate::walk;

/// Collect the dotted file keys consumed by `config`'s schema.
///
/// The instance is not modified.
pub fn known_keys<C: Settings + ?Sized>(config: &mut C) -> Result<BTreeSet<String>, OnefigError> {
    let mut keys = BTreeSet::new();
    let mut recorder = |field: &Field<'_>| -> Option<String> {
        keys.insert(field.dotted());
        None
    };
    walk::walk(config, &mut recorder)?;
    Ok(keys)
}

/// Validate that TOML `content` contains no keys unknown to `config`'s schema.
pub fn validate_unknown_keys<C: Settings + ?Sized>(
    config: &mut C,
    content: &str,
    path: &Path,
) -> Result<(), OnefigError> {
    let table = parse_toml(content, path)?;
    let known = known_keys(config)?;
    check_table(&table, content, path, &known)
}

pub(crate) fn check_table(
    table: &Table,
    content: &str,
    path: &Path,
    known: &BTreeSet<String>,
) -> Result<(), OnefigError> {
    let mut unknown = Vec::new();
    collect_unknown(table, "", known, &mut unknown);

    if unknown.is_empty() {
        return Ok(());
    }

    let errors = unknown
        .into_iter()
        .map(|key| {
            let line = find_key_line(content, &key);
            OnefigError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(OnefigError::UnknownKeys(errors))
}

fn collect_unknown(table: &Table, prefix: &str, known: &BTreeSet<String>, out: &mut Vec<String>) {
    for (key, value) in table {
        let dotted = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if known.contains(&dotted) {
            continue;
        }
        match value {
            Value::Table(sub) if is_section(known, &dotted) => {
                collect_unknown(sub, &dotted, known, out);
            }
            _ => out.push(dotted),
        }
    }
}

fn is_section(known: &BTreeSet<String>, dotted: &str) -> bool {
    let prefix = format!("{dotted}.");
    known.iter().any(|k| k.starts_with(&prefix))
}

/// Find the 1-indexed line number for a dotted key in TOML content.
///
/// Tracks `[section]` headers while scanning and only matches the leaf key
/// inside the matching section. Handles bare keys and standard headers only;
/// returns 0 when the key cannot be located.
fn find_key_line(content: &str, dotted_key: &str) -> usize {
    let (section, leaf) = match dotted_key.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", dotted_key),
    };

    let mut current = String::new();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(header) = trimmed.strip_prefix('[')
            && !header.starts_with('[')
        {
            let header = header.trim_end_matches(']');
            current = header.split('.').map(str::trim).collect::<Vec<_>>().join(".");
            // An unknown table is reported at its header.
            if current == dotted_key {
                return i + 1;
            }
            continue;
        }

        if current == section
            && let Some(rest) = trimmed.strip_prefix(leaf)
            && rest.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}
