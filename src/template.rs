//! Commented TOML template generated from the schema.
//!
//! Help texts become `#` comments and defaults become values, so the template
//! stays in sync with the code. Keys without a default are written commented
//! out. Top-level keys come first, then one `[section]` per nested record in
//! the order the walk first reaches it.

use std::fmt::Write as _;

use crate::coerce;
use crate::error::OnefigError;
use crate::schema::{Field, Settings};
use crate::walk::{self, Resolve};

struct TemplateEntry {
    key: &'static str,
    value: Option<String>,
    help: Option<&'static str>,
}

#[derive(Default)]
struct TemplateCollector {
    sections: Vec<(Vec<&'static str>, Vec<TemplateEntry>)>,
    error: Option<OnefigError>,
}

impl TemplateCollector {
    fn section(&mut self, chain: &[&'static str]) -> &mut Vec<TemplateEntry> {
        let idx = match self.sections.iter().position(|(c, _)| c == chain) {
            Some(idx) => idx,
            None => {
                self.sections.push((chain.to_vec(), Vec::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].1
    }
}

impl Resolve for TemplateCollector {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        let value = match field.meta.default.filter(|d| !d.is_empty()) {
            Some(raw) => match coerce::to_toml(field.kind, raw) {
                Ok(v) => Some(v.to_string()),
                Err(reason) => {
                    self.error.get_or_insert(OnefigError::MalformedValue {
                        field: field.dotted(),
                        value: raw.to_string(),
                        kind: field.kind,
                        reason,
                    });
                    None
                }
            },
            None => None,
        };
        let entry = TemplateEntry {
            key: field.key(),
            value,
            help: field.meta.help.filter(|h| !h.is_empty()),
        };
        self.section(field.chain).push(entry);
        None
    }
}

/// Render a commented TOML template for `config`'s schema.
///
/// The instance is not modified. A default that does not parse as its
/// field's kind is reported as [`OnefigError::MalformedValue`].
pub fn generate_template<C: Settings + ?Sized>(config: &mut C) -> Result<String, OnefigError> {
    let mut collector = TemplateCollector::default();
    walk::walk(config, &mut collector)?;
    if let Some(err) = collector.error {
        return Err(err);
    }

    // Root keys must precede every table header.
    let mut sections = collector.sections;
    sections.sort_by_key(|(chain, _)| !chain.is_empty());

    let mut out = String::new();
    for (chain, entries) in &sections {
        if !chain.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            let _ = writeln!(out, "[{}]", chain.join("."));
        }
        for (i, entry) in entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if let Some(help) = entry.help {
                for line in help.lines() {
                    let _ = writeln!(out, "# {line}");
                }
            }
            match &entry.value {
                Some(value) => {
                    let _ = writeln!(out, "{} = {value}", entry.key);
                }
                None => {
                    let _ = writeln!(out, "# {} =", entry.key);
                }
            }
        }
    }
    Ok(out)
}
