//! Lookup table from axiom kind to its translator.

use crate::error::TranslationError;
use crate::factory::ReadContext;
use crate::model::{Axiom, AxiomKind};
use crate::object::ONTObject;
use crate::translate::{translator_for, AxiomTranslator, Statement};

/// One translator per kind, indexed by `AxiomKind::index`.
pub struct TranslatorRegistry {
    translators: Vec<Box<dyn AxiomTranslator>>,
}

impl TranslatorRegistry {
    pub fn new() -> Self {
        Self {
            translators: AxiomKind::ALL.iter().map(|kind| translator_for(*kind)).collect(),
        }
    }

    pub fn get(&self, kind: AxiomKind) -> &dyn AxiomTranslator {
        self.translators[kind.index()].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn AxiomTranslator> {
        self.translators.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }

    /// Kinds whose shape test accepts `statement`.
    pub fn recognizing(&self, ctx: &ReadContext<'_>, statement: &Statement) -> Vec<AxiomKind> {
        self.iter()
            .filter(|t| t.recognize(ctx, statement))
            .map(|t| t.kind())
            .collect()
    }

    /// Read `statement` as an axiom of `kind`.
    pub fn translate_as(
        &self,
        kind: AxiomKind,
        ctx: &ReadContext<'_>,
        statement: &Statement,
    ) -> Result<ONTObject<Axiom>, TranslationError> {
        let translator = self.get(kind);
        if !translator.recognize(ctx, statement) {
            return Err(TranslationError::UnsupportedEncoding {
                kind,
                triple: statement.triple.clone(),
            });
        }
        translator.read(ctx, statement)
    }
}

impl Default for TranslatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|t| t.kind().name())).finish()
    }
}
