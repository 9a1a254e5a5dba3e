use itertools::Itertools;
use squalid::_d;
use tracing::instrument;

use crate::{
    DuplicateName, Operation, OperationType, Operations, UnresolvedSpread, Validation,
    ValidationError, ast, check_unique,
    validator::selection::{validate_operation, validate_selection_set},
};

/// Decides the operation shape of a document and validates each operation.
///
/// Either every operation is named (names must be unique), or there is exactly one
/// anonymous operation and nothing else.
#[instrument(level = "trace", skip(operation_definitions))]
pub fn validate_operations<'a>(
    operation_definitions: impl IntoIterator<Item = &'a ast::OperationDefinition>,
) -> Validation<Operations<UnresolvedSpread>> {
    let (anonymous, named): (Vec<_>, Vec<_>) = operation_definitions
        .into_iter()
        .partition(|operation_definition| operation_definition.name.is_none());

    match (anonymous.as_slice(), named.is_empty()) {
        ([], _) => validate_named_operations(&named),
        ([operation_definition], true) => validate_lone_anonymous_operation(operation_definition),
        _ => Validation::error(ValidationError::MixedAnonymousOperations {
            anonymous_count: anonymous.len(),
            names: named
                .iter()
                .filter_map(|operation_definition| operation_definition.name.clone())
                .collect(),
        }),
    }
}

fn validate_named_operations(
    operation_definitions: &[&ast::OperationDefinition],
) -> Validation<Operations<UnresolvedSpread>> {
    let named = operation_definitions
        .iter()
        .filter_map(|operation_definition| {
            operation_definition
                .name
                .clone()
                .map(|name| (name, *operation_definition))
        })
        .collect_vec();

    check_unique(named.iter().map(|(name, _)| (name.clone(), ())))
        .map_err(|DuplicateName(name)| ValidationError::DuplicateOperation(name))
        .zip_with(
            named
                .iter()
                .map(|(name, operation_definition)| {
                    validate_operation(operation_definition).map(|operation| (name.clone(), operation))
                })
                .collect::<Validation<Vec<_>>>(),
            |_, operations| Operations::Named(operations.into_iter().collect()),
        )
}

/// The lone anonymous operation is taken as a plain query: its variable definitions
/// and directives are not carried over.
fn validate_lone_anonymous_operation(
    operation_definition: &ast::OperationDefinition,
) -> Validation<Operations<UnresolvedSpread>> {
    validate_selection_set(&operation_definition.selection_set).map(|selection_set| {
        Operations::LoneAnonymous(Operation {
            operation_type: OperationType::Query,
            name: None,
            variable_definitions: _d(),
            directives: _d(),
            selection_set,
        })
    })
}
