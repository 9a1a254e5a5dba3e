mod arguments;
mod fragments;
mod operations;
mod selection;

use itertools::{Either, Itertools};
use serde::{Serialize, Serializer, ser::SerializeStruct};
use smol_str::SmolStr;
use strum::{EnumDiscriminants, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, instrument};

pub use arguments::{validate_arguments, validate_directives};
pub use fragments::{
    FragmentReferences, FragmentResolver, ResolvedFragments, validate_fragment_definitions,
};
use fragments::check_fragment_spreads;
pub use operations::validate_operations;
pub use selection::{
    validate_fragment_definition, validate_operation, validate_selection, validate_selection_set,
};

use crate::{Document, Operations, Validation, ast};

#[derive(Error, Clone, Debug, PartialEq, Eq, Hash, EnumDiscriminants)]
#[strum_discriminants(name(ValidationErrorKind), derive(Hash, IntoStaticStr, strum::Display))]
pub enum ValidationError {
    #[error("Non-unique operation name: `{0}`")]
    DuplicateOperation(SmolStr),
    #[error(
        "Anonymous operation must be only operation (found {anonymous_count} anonymous, named: [{}])",
        quoted(.names)
    )]
    MixedAnonymousOperations {
        anonymous_count: usize,
        names: Vec<SmolStr>,
    },
    #[error("Duplicate argument: `{0}`")]
    DuplicateArgument(SmolStr),
    #[error("Non-unique fragment name: `{0}`")]
    DuplicateFragmentDefinition(SmolStr),
    #[error("Non-existent fragment: `{0}`")]
    NoSuchFragment(SmolStr),
    #[error("Directive `@{0}` can't be used more than once")]
    DuplicateDirective(SmolStr),
    #[error("Circular fragment spread: `{0}`")]
    CircularFragmentSpread(SmolStr),
}

fn quoted(names: &[SmolStr]) -> String {
    names.iter().map(|name| format!("`{name}`")).join(", ")
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        self.into()
    }

    /// The name the error is about, if it is about a single one.
    pub fn name(&self) -> Option<&SmolStr> {
        match self {
            Self::DuplicateOperation(name)
            | Self::DuplicateArgument(name)
            | Self::DuplicateFragmentDefinition(name)
            | Self::NoSuchFragment(name)
            | Self::DuplicateDirective(name)
            | Self::CircularFragmentSpread(name) => Some(name),
            Self::MixedAnonymousOperations { .. } => None,
        }
    }
}

impl Serialize for ValidationError {
    fn serialize<TSerializer: Serializer>(
        &self,
        serializer: TSerializer,
    ) -> Result<TSerializer::Ok, TSerializer::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field::<&'static str>("kind", &self.kind().into())?;
        state.end()
    }
}

/// Validates a parsed document, reporting every independent defect at once.
#[instrument(level = "trace", skip(document))]
pub fn validate(document: &ast::Document) -> Validation<Document> {
    let (operation_definitions, fragment_definitions): (Vec<_>, Vec<_>) = document
        .definitions
        .iter()
        .partition_map(|definition| match definition {
            ast::ExecutableDefinition::Operation(operation_definition) => {
                Either::Left(operation_definition)
            }
            ast::ExecutableDefinition::Fragment(fragment_definition) => {
                Either::Right(fragment_definition)
            }
        });

    let fragments = validate_fragment_definitions(fragment_definitions.iter().copied())
        .zip_left(check_fragment_spreads(
            &fragment_definitions,
            &operation_definitions,
        ));
    let operations = validate_operations(operation_definitions);

    let ret = fragments
        .zip(operations)
        .and_then(|(fragments, operations)| {
            let mut resolver = FragmentResolver::new(&fragments);
            resolver
                .resolve_all()
                .zip_with(resolver.resolve_operations(&operations), assemble)
        });

    match &ret {
        Validation::Success(document) => {
            debug!(
                operations = document.operations.len(),
                fragments = document.fragments.len(),
                "document is valid"
            );
        }
        Validation::Failure(errors) => {
            debug!(errors = errors.len(), "document is invalid");
        }
    }
    ret
}

fn assemble(
    (fragments, fragment_references): (ResolvedFragments, FragmentReferences),
    operations: Operations,
) -> Document {
    Document::new(operations, fragments, fragment_references)
}

/// Just the diagnostics of [`validate`]: empty if the document is valid.
pub fn validation_errors(document: &ast::Document) -> Vec<ValidationError> {
    validate(document).into_errors()
}
