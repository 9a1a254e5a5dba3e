use tracing::instrument;

use crate::{
    Field, FragmentDefinition, InlineFragment, Operation, Selection, UnresolvedSpread, Validation,
    ast,
    validator::arguments::{validate_directives, validate_maybe_arguments},
};

#[instrument(level = "trace", skip(selection))]
pub fn validate_selection(selection: &ast::Selection) -> Validation<Selection<UnresolvedSpread>> {
    match selection {
        ast::Selection::Field(field) => validate_field(field).map(Selection::Field),
        ast::Selection::FragmentSpread(fragment_spread) => {
            validate_directives(&fragment_spread.directives).map(|directives| {
                Selection::FragmentSpread(UnresolvedSpread::new(
                    fragment_spread.name.clone(),
                    directives,
                ))
            })
        }
        ast::Selection::InlineFragment(inline_fragment) => {
            validate_inline_fragment(inline_fragment).map(Selection::InlineFragment)
        }
    }
}

pub fn validate_selection_set(
    selection_set: &[ast::Selection],
) -> Validation<Vec<Selection<UnresolvedSpread>>> {
    selection_set.iter().map(validate_selection).collect()
}

fn validate_field(field: &ast::Field) -> Validation<Field<UnresolvedSpread>> {
    let selection_set = match field.selection_set.as_deref() {
        None => Validation::Success(None),
        Some(selection_set) => validate_selection_set(selection_set).map(Some),
    };

    validate_maybe_arguments(field.arguments.as_deref())
        .zip(validate_directives(&field.directives))
        .zip_with(selection_set, |(arguments, directives), selection_set| Field {
            alias: field.alias.clone(),
            name: field.name.clone(),
            arguments,
            directives,
            selection_set,
        })
}

fn validate_inline_fragment(
    inline_fragment: &ast::InlineFragment,
) -> Validation<InlineFragment<UnresolvedSpread>> {
    validate_directives(&inline_fragment.directives).zip_with(
        validate_selection_set(&inline_fragment.selection_set),
        |directives, selection_set| InlineFragment {
            on: inline_fragment.on.clone(),
            directives,
            selection_set,
        },
    )
}

#[instrument(level = "trace", skip(fragment_definition), fields(name = %fragment_definition.name))]
pub fn validate_fragment_definition(
    fragment_definition: &ast::FragmentDefinition,
) -> Validation<FragmentDefinition<UnresolvedSpread>> {
    validate_directives(&fragment_definition.directives).zip_with(
        validate_selection_set(&fragment_definition.selection_set),
        |directives, selection_set| FragmentDefinition {
            name: fragment_definition.name.clone(),
            on: fragment_definition.on.clone(),
            directives,
            selection_set,
        },
    )
}

#[instrument(level = "trace", skip(operation_definition), fields(name = ?operation_definition.name))]
pub fn validate_operation(
    operation_definition: &ast::OperationDefinition,
) -> Validation<Operation<UnresolvedSpread>> {
    validate_directives(&operation_definition.directives).zip_with(
        validate_selection_set(&operation_definition.selection_set),
        |directives, selection_set| Operation {
            operation_type: operation_definition.operation_type,
            name: operation_definition.name.clone(),
            variable_definitions: operation_definition.variable_definitions.clone(),
            directives,
            selection_set,
        },
    )
}
