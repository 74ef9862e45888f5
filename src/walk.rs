//! The single traversal shared by every source.
//!
//! A [`Walker`] carries the path chain and a [`Resolve`] implementation. The
//! schema's [`Settings::walk`] drives it field by field; for each leaf the
//! resolver is asked for a raw value, which is coerced and assigned. Sources
//! that have nothing to say return `None` and the field keeps its value, so
//! running several walks in sequence layers the sources (last write wins).

use crate::coerce::Value;
use crate::error::OnefigError;
use crate::schema::{Field, Meta, Settings};

/// A per-source callback turning a field descriptor into a raw value.
pub trait Resolve {
    fn resolve(&mut self, field: &Field<'_>) -> Option<String>;
}

impl<F> Resolve for F
where
    F: FnMut(&Field<'_>) -> Option<String>,
{
    fn resolve(&mut self, field: &Field<'_>) -> Option<String> {
        self(field)
    }
}

pub struct Walker<'r> {
    chain: Vec<&'static str>,
    resolver: &'r mut dyn Resolve,
}

impl<'r> Walker<'r> {
    pub fn new(resolver: &'r mut dyn Resolve) -> Self {
        Self {
            chain: Vec::new(),
            resolver,
        }
    }

    /// Visit a leaf field: resolve, coerce, assign.
    ///
    /// Coercion failures stop the walk; fields visited before keep the values
    /// already assigned by this pass.
    pub fn leaf<T: Value>(
        &mut self,
        name: &'static str,
        meta: Meta,
        slot: &mut T,
    ) -> Result<(), OnefigError> {
        let field = Field {
            name,
            kind: T::KIND,
            meta: &meta,
            chain: &self.chain,
        };
        let Some(raw) = self.resolver.resolve(&field) else {
            return Ok(());
        };
        match T::coerce(&raw) {
            Ok(value) => {
                *slot = value;
                Ok(())
            }
            Err(reason) => Err(OnefigError::MalformedValue {
                field: field.dotted(),
                value: raw,
                kind: T::KIND,
                reason,
            }),
        }
    }

    /// Recurse into a nested record with `name` appended to the chain.
    pub fn nested<S: Settings + ?Sized>(
        &mut self,
        name: &'static str,
        section: &mut S,
    ) -> Result<(), OnefigError> {
        self.chain.push(name);
        let result = section.walk(self);
        self.chain.pop();
        result
    }
}

/// Run one full pass of `resolver` over `config`.
pub fn walk<C: Settings + ?Sized>(
    config: &mut C,
    resolver: &mut dyn Resolve,
) -> Result<(), OnefigError> {
    let mut walker = Walker::new(resolver);
    config.walk(&mut walker)
}
