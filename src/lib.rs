//! Layered configuration driven by one schema declaration. Define a struct,
//! describe its fields once, and load it from every source.
//!
//! Onefig fills a config record from compiled defaults, TOML files,
//! environment variables, and command-line flags, in that order. Every source
//! is one walk over the same schema, so adding a field to the struct makes it
//! available everywhere at once.
//!
//! ```ignore
//! let config: AppConfig = Onefig::builder()
//!     .app_name("myapp")
//!     .load()?;
//! ```
//!
//! That single call assigns the declared defaults, searches the platform
//! config directory for `myapp.toml`, reads `MYAPP_*` environment variables,
//! tokenizes the process arguments, and hands you a typed struct.
//!
//! # Declaring a schema
//!
//! A record implements [`Settings`] by handing each field to the [`Walker`]
//! together with its [`Meta`]:
//!
//! ```ignore
//! impl Settings for AppConfig {
//!     fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
//!         w.leaf("host", Meta::new().default("localhost").short('H').long("host"), &mut self.host)?;
//!         w.leaf("port", Meta::new().default("8080").env("PORT").help("Port to bind"), &mut self.port)?;
//!         w.nested("database", &mut self.database)
//!     }
//! }
//! ```
//!
//! Leaf fields are strings, booleans, signed and unsigned integers of every
//! width, and floats (see [`Value`]). Fields that are not declared are never
//! touched. `Meta` keys:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `default` | Raw value assigned first; coerced like any other source |
//! | `env` | Env var name without prefix; `"-"` disables env for the field |
//! | `short` | Single-character option, e.g. `-p` |
//! | `long` | Long option name; `"-"` disables long options for the field |
//! | `name` | Replaces the field name in derived names and file keys |
//! | `help` | Description used by help output and templates |
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults     Meta::default
//!        ↑ overridden by
//! Config files          search paths in order, then explicit files
//!        ↑ overridden by
//! Environment vars      PREFIX + env name
//!        ↑ overridden by
//! Command-line flags    -s, --long, --long=value
//! ```
//!
//! Every layer is sparse: a source that has nothing for a field leaves it
//! alone, so the final value comes from the last source that supplied one.
//! An env var set to the empty string supplies an empty value to string
//! fields and is treated as unset for every other kind.
//!
//! # Names derived from paths
//!
//! With [`use_names(true)`](OnefigBuilder::use_names), fields that declare no
//! env or long name get one from their path. A field `f` inside section `d`
//! reads `PREFIX_D_F` and `--d-f`. A declared `"-"` opts a field out even
//! then, which keeps internal fields off the command line and out of help.
//!
//! # Coercion
//!
//! Every raw value is text until the walker coerces it into the field's kind.
//! Unsigned integers accept `0x`, `0o`, and `0b` prefixes; booleans accept
//! `1 t T TRUE true True` and their false counterparts. A value that does not
//! fit the field's type is a [`OnefigError::MalformedValue`] naming the field.
//!
//! # Strict mode
//!
//! Off by default. With [`.strict(true)`](OnefigBuilder::strict), a config
//! file key that no field consumes fails loading with path and line:
//!
//! ```text
//! Unknown key 'typo_key' in /home/user/.config/myapp/myapp.toml (line 5)
//! ```
//!
//! # Help and templates
//!
//! [`generate_help`] lists every field reachable from the command line or the
//! environment; [`generate_template`] renders a commented TOML file from the
//! same metadata.
//!
//! # Error handling
//!
//! All fallible operations return [`OnefigError`]. Command-line tools that
//! treat bad configuration as fatal call [`or_exit()`](OrExit::or_exit) on the
//! result.

pub mod error;
pub mod types;

mod args;
mod builder;
mod coerce;
mod defaults;
mod env;
mod file;
mod flags;
mod help;
mod resolve;
mod schema;
mod template;
mod validate;
mod walk;

#[cfg(test)]
mod fixtures;

pub use args::ParsedArgs;
pub use builder::{Onefig, OnefigBuilder};
pub use coerce::Value;
pub use defaults::{Defaults, load_defaults};
pub use env::{EnvResolver, EnvVars, load_env};
pub use error::{OnefigError, OrExit};
pub use file::{TomlResolver, find_config_files, load_file, load_toml_str};
pub use flags::{FlagResolver, load_flags};
pub use help::{Help, HelpEntry, HelpOptions, generate_help};
pub use resolve::{ResolveInput, resolve, resolve_into};
pub use schema::{Field, Kind, Meta, Naming, SUPPRESSED, Settings};
pub use template::generate_template;
pub use types::SearchPath;
pub use validate::validate_unknown_keys;
pub use walk::{Resolve, Walker, walk};
