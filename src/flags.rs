use crate::args::ParsedArgs;
use crate::error::OnefigError;
use crate::schema::{Field, Kind, Naming, Settings};
use crate::walk::{self, Resolve};

/// Resolves fields from parsed command-line options.
///
/// Lookup order per field: the declared `short` option, then the declared
/// `long` option, then (with `use_names`) the long option derived from the
/// field path. `long = "-"` rules out both long forms.
pub struct FlagResolver<'a> {
    args: &'a ParsedArgs,
    use_names: bool,
}

impl<'a> FlagResolver<'a> {
    pub fn new(args: &'a ParsedArgs, use_names: bool) -> Self {
        Self { args, use_names }
    }

    fn lookup_short(&self, field: &Field<'_>, c: char) -> Option<String> {
        if let Some(value) = self.args.short_value(c) {
            return Some(value.to_string());
        }
        if self.args.short_flag(c) {
            return bare_flag(field, &format!("-{c}"));
        }
        None
    }

    fn lookup_long(&self, field: &Field<'_>, name: &str) -> Option<String> {
        if let Some(value) = self.args.long_value(name) {
            return Some(value.to_string());
        }
        if self.args.long_flag(name) {
            return bare_flag(field, &format!("--{name}"));
        }
        None
    }

    fn derived(&self, field: &Field<'_>) -> Option<String> {
        if !self.use_names {
            return None;
        }
        self.lookup_long(field, &field.derived_long())
    }
}

/// A bare option means `true` for booleans and nothing for other kinds.
fn bare_flag(field: &Field<'_>, option: &str) -> Option<String> {
    if field.kind == Kind::Bool {
        return Some("true".to_string());
    }
    tracing::warn!(field = %field.dotted(), option, "option given without a value, ignoring");
    None
}

impl Resolve for FlagResolver<'_> {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        let value = field
            .meta
            .short
            .and_then(|c| self.lookup_short(field, c))
            .or_else(|| match field.meta.long_naming() {
                Naming::Suppressed => None,
                Naming::Explicit(name) => self
                    .lookup_long(field, name)
                    .or_else(|| self.derived(field)),
                Naming::Derived => self.derived(field),
            })?;
        tracing::trace!(field = %field.dotted(), "resolved from flags");
        Some(value)
    }
}

/// Assign fields from parsed command-line options.
pub fn load_flags<C: Settings + ?Sized>(
    config: &mut C,
    args: &ParsedArgs,
    use_names: bool,
) -> Result<(), OnefigError> {
    tracing::debug!(use_names, "applying command-line flags");
    walk::walk(config, &mut FlagResolver::new(args, use_names))
}
