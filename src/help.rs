//! Usage listing generated from the schema.
//!
//! A dry walk collects one [`HelpEntry`] per field that can actually be set
//! from the command line or the environment; fields with no visible name are
//! left out, which is how internal fields stay undocumented.

use std::fmt;

use crate::env::env_var_name;
use crate::error::OnefigError;
use crate::schema::{Field, Kind, Naming, Settings};
use crate::walk::{self, Resolve};

/// What to show in generated help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOptions {
    /// Env var prefix, exactly as passed to the env loader.
    pub prefix: String,
    /// Show names derived from field paths when none is declared.
    pub use_names: bool,
    pub show_short: bool,
    pub show_long: bool,
    pub show_env: bool,
}

impl HelpOptions {
    pub fn new(prefix: &str, use_names: bool) -> Self {
        Self {
            prefix: prefix.to_string(),
            use_names,
            show_short: true,
            show_long: true,
            show_env: true,
        }
    }
}

impl Default for HelpOptions {
    fn default() -> Self {
        Self::new("", false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub short: Option<char>,
    pub long: Option<String>,
    pub env: Option<String>,
    pub kind: Kind,
    pub default: Option<String>,
    pub help: Option<String>,
}

impl HelpEntry {
    fn from_field(field: &Field<'_>, options: &HelpOptions) -> Option<Self> {
        let meta = field.meta;
        let short = meta.short.filter(|_| options.show_short);

        let long = match meta.long_naming() {
            Naming::Suppressed => None,
            _ if !options.show_long => None,
            Naming::Explicit(name) => Some(name.to_string()),
            Naming::Derived if options.use_names && short.is_none() => {
                Some(field.derived_long())
            }
            Naming::Derived => None,
        };

        let env = if options.show_env {
            env_var_name(field, &options.prefix, options.use_names)
        } else {
            None
        };

        if short.is_none() && long.is_none() && env.is_none() {
            return None;
        }

        Some(Self {
            short,
            long,
            env,
            kind: field.kind,
            default: meta.default.filter(|d| !d.is_empty()).map(str::to_string),
            help: meta.help.filter(|h| !h.is_empty()).map(str::to_string),
        })
    }

    fn forms(&self) -> Vec<String> {
        let placeholder = if self.kind == Kind::Bool { "" } else { " <value>" };
        let mut forms = Vec::new();
        if let Some(c) = self.short {
            forms.push(format!("-{c}{placeholder}"));
        }
        if let Some(long) = &self.long {
            forms.push(format!("--{long}{placeholder}"));
        }
        if let Some(env) = &self.env {
            forms.push(format!("{env}=<value>"));
        }
        forms
    }
}

impl fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}  ({}", self.forms().join(", "), self.kind)?;
        if let Some(default) = &self.default {
            write!(f, ", default: {default}")?;
        }
        write!(f, ")")?;
        if let Some(help) = &self.help {
            write!(f, "\n      {help}")?;
        }
        Ok(())
    }
}

/// Generated usage listing, one entry per documented field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    pub entries: Vec<HelpEntry>,
}

impl fmt::Display for Help {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

struct HelpCollector<'a> {
    options: &'a HelpOptions,
    entries: Vec<HelpEntry>,
}

impl Resolve for HelpCollector<'_> {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        self.entries
            .extend(HelpEntry::from_field(field, self.options));
        None
    }
}

/// Collect help for `config`'s schema. The instance is not modified.
pub fn generate_help<C: Settings + ?Sized>(
    config: &mut C,
    options: &HelpOptions,
) -> Result<Help, OnefigError> {
    let mut collector = HelpCollector {
        options,
        entries: Vec::new(),
    };
    walk::walk(config, &mut collector)?;
    Ok(Help {
        entries: collector.entries,
    })
}
