use std::collections::HashMap;
use std::ffi::OsString;

use crate::error::OnefigError;
use crate::schema::{Field, Kind, Naming, Settings};
use crate::walk::{self, Resolve};

/// A snapshot of environment variables.
///
/// Built from an iterator so tests can pass synthetic data instead of the
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self::from_os_pairs(std::env::vars_os())
    }

    /// Build from raw OS pairs. Variables whose name or value is not valid
    /// UTF-8 are skipped.
    pub fn from_os_pairs(pairs: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self::from_pairs(pairs.into_iter().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (k, _) => {
                    let name = k.unwrap_or_else(|os| os.to_string_lossy().into_owned());
                    tracing::warn!(var = %name, "skipping non-UTF-8 environment variable");
                    None
                }
            }
        }))
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Resolves fields from environment variables named `PREFIX` + env name.
///
/// An explicit `env` name is always used as-is (uppercased, prefixed) and
/// never falls back. Without one, and only when `use_names` is set, the name
/// is derived from the field path: `PREFIX_SECTION_FIELD`. `env = "-"`
/// disables the lookup entirely.
pub struct EnvResolver<'a> {
    vars: &'a EnvVars,
    prefix: &'a str,
    use_names: bool,
}

impl<'a> EnvResolver<'a> {
    pub fn new(vars: &'a EnvVars, prefix: &'a str, use_names: bool) -> Self {
        Self {
            vars,
            prefix,
            use_names,
        }
    }

    /// The variable name this resolver would read for `field`, if any.
    pub fn var_name(&self, field: &Field<'_>) -> Option<String> {
        env_var_name(field, self.prefix, self.use_names)
    }
}

impl Resolve for EnvResolver<'_> {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        let name = self.var_name(field)?;
        let value = self.vars.get(&name)?;
        // `FOO=` only counts as a value for string fields.
        if value.is_empty() && field.kind != Kind::String {
            tracing::trace!(field = %field.dotted(), var = %name, "empty env value, ignoring");
            return None;
        }
        tracing::trace!(field = %field.dotted(), var = %name, "resolved from env");
        Some(value.to_string())
    }
}

pub(crate) fn env_var_name(field: &Field<'_>, prefix: &str, use_names: bool) -> Option<String> {
    match field.meta.env_naming() {
        Naming::Explicit(name) => Some(format!("{prefix}{name}").to_uppercase()),
        Naming::Derived if use_names => Some(field.derived_env(prefix)),
        Naming::Derived | Naming::Suppressed => None,
    }
}

/// Assign fields from environment variables.
pub fn load_env<C: Settings + ?Sized>(
    config: &mut C,
    vars: &EnvVars,
    prefix: &str,
    use_names: bool,
) -> Result<(), OnefigError> {
    tracing::debug!(prefix, use_names, "applying environment variables");
    walk::walk(config, &mut EnvResolver::new(vars, prefix, use_names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{BareConfig, TestConfig};

    fn vars(pairs: &[(&str, &str)]) -> EnvVars {
        EnvVars::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn explicit_names_only_without_fallback() {
        let env = vars(&[
            ("APP_PORT", "9000"),
            ("APP_DATABASE_URL", "pg://db"),
            ("APP_HOST", "ignored"),
        ]);
        let mut config = TestConfig::default();
        load_env(&mut config, &env, "APP_", false).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.database.url, "pg://db");
        assert_eq!(config.host, "");
    }

    #[test]
    fn derived_names_with_fallback() {
        let env = vars(&[
            ("APP_HOST", "0.0.0.0"),
            ("APP_DEBUG", "T"),
            ("APP_OFFSET", "-8"),
            ("APP_DATABASE_POOL_SIZE", "0x10"),
        ]);
        let mut config = TestConfig::default();
        load_env(&mut config, &env, "APP_", true).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.debug);
        assert_eq!(config.offset, -8);
        assert_eq!(config.database.pool_size, 16);
    }

    #[test]
    fn explicit_name_never_falls_back() {
        struct Named {
            j: u32,
        }
        impl Settings for Named {
            fn walk(&mut self, w: &mut crate::walk::Walker<'_>) -> Result<(), OnefigError> {
                w.leaf("j", crate::schema::Meta::new().env("THREE"), &mut self.j)
            }
        }

        let env = vars(&[("PRE_J", "0o110")]);
        let mut config = Named { j: 1 };
        load_env(&mut config, &env, "PRE_", true).unwrap();
        assert_eq!(config.j, 1);

        let env = vars(&[("PRE_THREE", "0x77"), ("PRE_J", "0o110")]);
        load_env(&mut config, &env, "PRE_", true).unwrap();
        assert_eq!(config.j, 0x77);
    }

    #[test]
    fn dash_suppresses_explicit_and_derived() {
        let env = vars(&[("APP_RATIO", "0.9"), ("APP_SECRET", "leak"), ("APP_-", "x")]);
        let mut config = TestConfig::default();
        load_env(&mut config, &env, "APP_", true).unwrap();
        assert_eq!(config.ratio, 0.0);
        assert_eq!(config.secret, "");
    }

    #[test]
    fn nested_derived_name() {
        let env = vars(&[("PREFIX_D_F", "nested"), ("PREFIX_X", "3")]);
        let mut config = BareConfig::default();
        load_env(&mut config, &env, "PREFIX_", true).unwrap();
        assert_eq!(config.d.f, "nested");
        assert_eq!(config.x, 3);
    }

    #[test]
    fn prefix_and_name_are_uppercased() {
        let env = vars(&[("MYAPP_D_F", "up")]);
        let mut config = BareConfig::default();
        load_env(&mut config, &env, "myapp_", true).unwrap();
        assert_eq!(config.d.f, "up");
    }

    #[test]
    fn empty_value_is_explicit() {
        let env = vars(&[("APP_D_F", "")]);
        let mut config = BareConfig {
            d: crate::fixtures::test::BareSection { f: "set".into() },
            ..BareConfig::default()
        };
        load_env(&mut config, &env, "APP_", true).unwrap();
        assert_eq!(config.d.f, "");
    }

    #[test]
    fn empty_value_is_absent_for_non_strings() {
        let env = vars(&[("APP_PORT", ""), ("APP_DEBUG", ""), ("APP_HOST", "")]);
        let mut config = TestConfig {
            port: 8080,
            debug: true,
            host: "set".into(),
            ..TestConfig::default()
        };
        load_env(&mut config, &env, "APP_", true).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.debug);
        assert_eq!(config.host, "");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let env = EnvVars::from_os_pairs([
            (OsString::from("JUNK"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("x")),
            (OsString::from("APP_PORT"), OsString::from("9000")),
        ]);
        assert_eq!(env.get("JUNK"), None);
        assert_eq!(env.get("APP_PORT"), Some("9000"));

        let mut config = TestConfig::default();
        load_env(&mut config, &env, "APP_", false).unwrap();
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn process_snapshot_does_not_panic() {
        EnvVars::from_process();
    }

    #[test]
    fn malformed_env_value_is_an_error() {
        let env = vars(&[("APP_PORT", "eighty")]);
        let mut config = TestConfig::default();
        let err = load_env(&mut config, &env, "APP_", false).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn var_name_reports_resolution_target() {
        let env = EnvVars::default();
        let resolver = EnvResolver::new(&env, "APP_", true);
        let meta = crate::schema::Meta::new();
        let field = Field {
            name: "f",
            kind: crate::schema::Kind::String,
            meta: &meta,
            chain: &["d"],
        };
        assert_eq!(resolver.var_name(&field).as_deref(), Some("APP_D_F"));
    }
}
