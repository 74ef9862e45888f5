//! Schema declaration: field kinds, per-field metadata, and the [`Settings`]
//! trait that lets the walker visit a record's fields.
//!
//! A config record declares its schema once, at compile time, by implementing
//! [`Settings::walk`]. Each leaf is handed to the walker together with its
//! [`Meta`]; each nested record is handed over by name and recursed into.
//!
//! ```ignore
//! impl Settings for ServerConfig {
//!     fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
//!         w.leaf("host", Meta::new().default("localhost").short('H'), &mut self.host)?;
//!         w.leaf("port", Meta::new().default("8080").env("PORT"), &mut self.port)?;
//!         w.nested("database", &mut self.database)
//!     }
//! }
//! ```

use std::fmt;

use crate::error::OnefigError;
use crate::walk::Walker;

/// Reserved metadata value on `env`/`long` meaning "never resolve by this source".
pub const SUPPRESSED: &str = "-";

/// A config record whose fields can be visited by a [`Walker`].
///
/// Implementations call [`Walker::leaf`] for every primitive field and
/// [`Walker::nested`] for every nested record, in declaration order. Fields of
/// any other type are simply not declared and are never touched.
pub trait Settings {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), OnefigError>;
}

/// Leaf field kinds. Every kind has exactly one coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Uint,
    Float,
    Bool,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Declarative metadata attached to a leaf field.
///
/// Every key is optional; an empty string is the same as an absent key. Build
/// it with the `const` setters:
///
/// ```ignore
/// const PORT: Meta = Meta::new().default("8080").short('p').long("port").help("Port to bind");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meta {
    /// Raw default value, coerced like any other source.
    pub default: Option<&'static str>,
    /// Explicit env var name (without prefix), or `"-"` to suppress env lookup.
    pub env: Option<&'static str>,
    /// Single-character option. Never derived.
    pub short: Option<char>,
    /// Explicit long option name, or `"-"` to suppress long options.
    pub long: Option<&'static str>,
    /// Replaces the field name in every derived name and in file keys.
    pub name: Option<&'static str>,
    /// One-line description for help output and templates.
    pub help: Option<&'static str>,
}

impl Meta {
    pub const fn new() -> Self {
        Self {
            default: None,
            env: None,
            short: None,
            long: None,
            name: None,
            help: None,
        }
    }

    pub const fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub const fn env(mut self, name: &'static str) -> Self {
        self.env = Some(name);
        self
    }

    pub const fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    pub const fn long(mut self, name: &'static str) -> Self {
        self.long = Some(name);
        self
    }

    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub const fn help(mut self, text: &'static str) -> Self {
        self.help = Some(text);
        self
    }

    /// How the env source should name this field.
    pub fn env_naming(&self) -> Naming {
        Naming::from_meta(self.env)
    }

    /// How the flags source should name this field's long option.
    pub fn long_naming(&self) -> Naming {
        Naming::from_meta(self.long)
    }
}

/// Naming rule for sources that support both explicit and derived names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// No name declared; derive one from the path if fallback is enabled.
    Derived,
    Explicit(&'static str),
    /// Declared as `"-"`: never resolve, not even by derivation.
    Suppressed,
}

impl Naming {
    fn from_meta(value: Option<&'static str>) -> Self {
        match value {
            None | Some("") => Naming::Derived,
            Some(SUPPRESSED) => Naming::Suppressed,
            Some(name) => Naming::Explicit(name),
        }
    }
}

/// Transient descriptor for the leaf field currently being visited.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    /// Field name as declared in the schema.
    pub name: &'static str,
    pub kind: Kind,
    pub meta: &'a Meta,
    /// Names of the enclosing nested records, outermost first.
    pub chain: &'a [&'static str],
}

impl Field<'_> {
    /// Name used for derivation and file keys: `meta.name` if set, else the field name.
    pub fn key(&self) -> &'static str {
        match self.meta.name {
            Some(name) if !name.is_empty() => name,
            _ => self.name,
        }
    }

    /// Dotted path of the field, e.g. `database.pool_size`.
    pub fn dotted(&self) -> String {
        self.joined(".")
    }

    /// Env var name derived from the path: `PREFIX` + `D_F`, uppercased.
    pub fn derived_env(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.joined("_")).to_uppercase()
    }

    /// Long option derived from the path: `d-f`, lowercased, `_` mapped to `-`.
    pub fn derived_long(&self) -> String {
        self.joined("-").replace('_', "-").to_lowercase()
    }

    fn joined(&self, sep: &str) -> String {
        let mut parts: Vec<&str> = self.chain.to_vec();
        parts.push(self.key());
        parts.join(sep)
    }
}
