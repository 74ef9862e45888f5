//! Core resolution pipeline: layer every source onto one instance.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Each source is one walk over the
//! instance, applied in ascending priority:
//!
//! 1. Compiled defaults
//! 2. Config files, in the order given (validated first if strict)
//! 3. Environment variables, if a prefix is set
//! 4. Command-line flags, if arguments were given
//!
//! A source that has nothing for a field leaves it untouched, so the final
//! value of every field comes from the last source that supplied one.

use std::path::PathBuf;

use crate::args::ParsedArgs;
use crate::defaults;
use crate::env::{self, EnvVars};
use crate::error::OnefigError;
use crate::file::{self, TomlResolver};
use crate::flags;
use crate::schema::Settings;
use crate::validate;
use crate::walk;

/// All pre-loaded data needed to resolve a config. No I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    /// File contents in precedence order: first = lowest priority, last = highest.
    pub files: Vec<(PathBuf, String)>,
    /// Environment snapshot (use `EnvVars::from_process()` or synthetic data).
    pub env: EnvVars,
    /// Env var prefix (e.g. `"MYAPP_"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Tokenized command line. `None` means flags disabled.
    pub args: Option<ParsedArgs>,
    /// Derive env and long option names from field paths when none is declared.
    pub use_names: bool,
    /// Whether to reject unknown keys in config files.
    pub strict: bool,
}

/// Layer every source in `input` onto `config`.
///
/// Stops at the first error; fields assigned before it keep their values.
pub fn resolve_into<C: Settings + ?Sized>(
    config: &mut C,
    input: &ResolveInput,
) -> Result<(), OnefigError> {
    defaults::load_defaults(config)?;

    if !input.files.is_empty() {
        let known = if input.strict {
            Some(validate::known_keys(config)?)
        } else {
            None
        };
        for (path, content) in &input.files {
            let table = file::parse_toml(content, path)?;
            if let Some(known) = &known {
                validate::check_table(&table, content, path, known)?;
            }
            tracing::debug!(path = %path.display(), "applying config file");
            walk::walk(config, &mut TomlResolver::new(&table))?;
        }
    }

    if let Some(prefix) = &input.env_prefix {
        env::load_env(config, &input.env, prefix, input.use_names)?;
    }

    if let Some(args) = &input.args {
        flags::load_flags(config, args, input.use_names)?;
    }

    Ok(())
}

/// Resolve a fresh `C` from pre-loaded inputs.
pub fn resolve<C: Settings + Default>(input: &ResolveInput) -> Result<C, OnefigError> {
    let mut config = C::default();
    resolve_into(&mut config, input)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{BareConfig, TestConfig};

    fn empty_input() -> ResolveInput {
        ResolveInput::default()
    }

    fn args(tokens: &[&str]) -> Option<ParsedArgs> {
        Some(ParsedArgs::parse(tokens.iter().copied()))
    }

    #[test]
    fn defaults_only() {
        let config: TestConfig = resolve(&empty_input()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.offset, -5);
        assert_eq!(config.database.pool_size, 5);
        assert_eq!(config.database.url, "");
    }

    #[test]
    fn file_overrides_default() {
        let input = ResolveInput {
            files: vec![("test.toml".into(), "port = 3000\n".into())],
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn later_file_overrides_earlier() {
        let input = ResolveInput {
            files: vec![
                ("first.toml".into(), "port = 1000\nhost = \"first\"\n".into()),
                ("second.toml".into(), "port = 2000\n".into()),
            ],
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 2000);
        assert_eq!(config.host, "first");
    }

    #[test]
    fn env_overrides_file() {
        let input = ResolveInput {
            files: vec![("test.toml".into(), "port = 3000\n".into())],
            env: EnvVars::from_pairs([("APP_PORT", "4000")]),
            env_prefix: Some("APP_".into()),
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn env_ignored_without_prefix() {
        let input = ResolveInput {
            env: EnvVars::from_pairs([("PORT", "4000")]),
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn flags_override_env() {
        let input = ResolveInput {
            env: EnvVars::from_pairs([("APP_PORT", "4000")]),
            env_prefix: Some("APP_".into()),
            args: args(&["-p", "5000"]),
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn flag_wins_over_default_with_env_unset() {
        let input = ResolveInput {
            env: EnvVars::default(),
            env_prefix: Some("PREFIX_".into()),
            args: args(&["--x=7"]),
            use_names: true,
            ..empty_input()
        };
        let config: BareConfig = resolve(&input).unwrap();
        assert_eq!(config.x, 7);
    }

    #[test]
    fn nested_field_from_every_layer() {
        let base = ResolveInput {
            env_prefix: Some("PREFIX_".into()),
            use_names: true,
            ..empty_input()
        };

        let from_file = ResolveInput {
            files: vec![("a.toml".into(), "[d]\nf = \"file\"\n".into())],
            ..base.clone()
        };
        assert_eq!(resolve::<BareConfig>(&from_file).unwrap().d.f, "file");

        let from_env = ResolveInput {
            env: EnvVars::from_pairs([("PREFIX_D_F", "env")]),
            ..from_file.clone()
        };
        assert_eq!(resolve::<BareConfig>(&from_env).unwrap().d.f, "env");

        let from_flag = ResolveInput {
            args: args(&["--d-f", "flag"]),
            ..from_env
        };
        assert_eq!(resolve::<BareConfig>(&from_flag).unwrap().d.f, "flag");
    }

    #[test]
    fn strict_rejects_unknown_key() {
        let input = ResolveInput {
            files: vec![("test.toml".into(), "port = 1\ntypo = true\n".into())],
            strict: true,
            ..empty_input()
        };
        let err = resolve::<TestConfig>(&input).unwrap_err();
        assert!(matches!(err, OnefigError::UnknownKeys(_)));
        assert!(err.to_string().contains("typo"));
    }

    #[test]
    fn lenient_ignores_unknown_key() {
        let input = ResolveInput {
            files: vec![("test.toml".into(), "port = 1\ntypo = true\n".into())],
            ..empty_input()
        };
        let config: TestConfig = resolve(&input).unwrap();
        assert_eq!(config.port, 1);
    }

    #[test]
    fn malformed_file_value_stops_resolution() {
        let input = ResolveInput {
            files: vec![("test.toml".into(), "debug = \"maybe\"\n".into())],
            ..empty_input()
        };
        let err = resolve::<TestConfig>(&input).unwrap_err();
        assert!(err.to_string().contains("debug"));
    }

    #[test]
    fn resolve_into_keeps_undeclared_fields() {
        let mut config = TestConfig {
            tags: vec!["kept".into()],
            ..TestConfig::default()
        };
        resolve_into(&mut config, &empty_input()).unwrap();
        assert_eq!(config.tags, vec!["kept"]);
        assert_eq!(config.host, "localhost");
    }
}
