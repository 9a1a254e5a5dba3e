#![allow(dead_code)]

use std::collections::HashSet;

use semillon::{
    OperationType, ValidationError, ValidationErrorKind,
    ast::{
        Argument, Directive, Document, ExecutableDefinition, FieldBuilder, FragmentDefinition,
        FragmentSpread, InlineFragment, OperationDefinitionBuilder, Selection, Value,
    },
};

pub fn document(definitions: impl IntoIterator<Item = ExecutableDefinition>) -> Document {
    definitions.into_iter().collect()
}

pub fn query(name: Option<&str>, selection_set: Vec<Selection>) -> ExecutableDefinition {
    operation(OperationType::Query, name, vec![], selection_set)
}

pub fn operation(
    operation_type: OperationType,
    name: Option<&str>,
    directives: Vec<Directive>,
    selection_set: Vec<Selection>,
) -> ExecutableDefinition {
    let builder = OperationDefinitionBuilder::default()
        .operation_type(operation_type)
        .directives(directives)
        .selection_set(selection_set);
    match name {
        Some(name) => builder.name(name),
        None => builder,
    }
    .build()
    .unwrap()
    .into()
}

pub fn fragment(name: &str, on: &str, selection_set: Vec<Selection>) -> ExecutableDefinition {
    FragmentDefinition::new(name, on, vec![], selection_set).into()
}

pub fn field(name: &str) -> Selection {
    FieldBuilder::default().name(name).build().unwrap().into()
}

pub fn field_with_selections(name: &str, selection_set: Vec<Selection>) -> Selection {
    FieldBuilder::default()
        .name(name)
        .selection_set(selection_set)
        .build()
        .unwrap()
        .into()
}

pub fn field_with_arguments(name: &str, arguments: Vec<Argument>) -> Selection {
    FieldBuilder::default()
        .name(name)
        .arguments(arguments)
        .build()
        .unwrap()
        .into()
}

pub fn spread(name: &str) -> Selection {
    FragmentSpread::new(name, vec![]).into()
}

pub fn inline_fragment(on: Option<&str>, selection_set: Vec<Selection>) -> Selection {
    InlineFragment::new(on.map(Into::into), vec![], selection_set).into()
}

pub fn argument(name: &str, value: i32) -> Argument {
    Argument::new(name, Value::Int(value))
}

pub fn directive(name: &str, arguments: Vec<Argument>) -> Directive {
    Directive::new(name, Some(arguments))
}

pub fn names_of_kind(errors: &[ValidationError], kind: ValidationErrorKind) -> HashSet<String> {
    errors
        .iter()
        .filter(|error| error.kind() == kind)
        .filter_map(|error| error.name())
        .map(ToString::to_string)
        .collect()
}

pub fn name_set<'a>(names: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    names.into_iter().map(ToOwned::to_owned).collect()
}
