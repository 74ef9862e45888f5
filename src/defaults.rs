//! Compiled defaults: the `default` metadata of every field.

use crate::error::OnefigError;
use crate::schema::{Field, Settings};
use crate::walk::{self, Resolve};

pub struct Defaults;

impl Resolve for Defaults {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        field
            .meta
            .default
            .filter(|d| !d.is_empty())
            .map(str::to_string)
    }
}

/// Assign every declared default. Fields without one are left untouched.
pub fn load_defaults<C: Settings + ?Sized>(config: &mut C) -> Result<(), OnefigError> {
    tracing::debug!("applying compiled defaults");
    walk::walk(config, &mut Defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{BareConfig, TestConfig};

    #[test]
    fn fields_without_default_keep_their_value() {
        let mut config = TestConfig {
            secret: "s3cr3t".into(),
            ..TestConfig::default()
        };
        load_defaults(&mut config).unwrap();
        assert_eq!(config.secret, "s3cr3t");
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn defaults_overwrite_existing_values() {
        let mut config = BareConfig {
            x: 99,
            ..BareConfig::default()
        };
        load_defaults(&mut config).unwrap();
        assert_eq!(config.x, 12);
    }

    #[test]
    fn malformed_default_is_an_error() {
        use crate::error::OnefigError;
        use crate::schema::Meta;
        use crate::walk::Walker;

        struct Broken {
            level: u8,
        }

        impl Settings for Broken {
            fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), OnefigError> {
                w.leaf("level", Meta::new().default("0x1ff"), &mut self.level)
            }
        }

        let err = load_defaults(&mut Broken { level: 0 }).unwrap_err();
        assert!(matches!(err, OnefigError::MalformedValue { .. }));
    }
}
