use semillon::{
    Error, OperationType, Operations, Validation, ValidationError,
    ast::{OperationDefinitionBuilder, TypeReference, VariableDefinition},
    validate,
};

mod shared;

use shared::{argument, directive, document, field, operation, query};

#[test]
fn test_lone_anonymous_operation() {
    let Validation::Success(document) = validate(&document(vec![query(None, vec![field("me")])]))
    else {
        panic!("expected success");
    };
    assert!(matches!(document.operations, Operations::LoneAnonymous(_)));

    let operation = document.operation(None).unwrap();
    assert_eq!(operation.operation_type, OperationType::Query);
    assert_eq!(operation.name, None);
    assert_eq!(
        operation.selection_set[0].maybe_as_field().unwrap().name,
        "me"
    );

    assert_eq!(
        document.operation(Some("Me")),
        Err(Error::NoOperationFound(Some("Me".into())))
    );
}

#[test]
fn test_lone_anonymous_operation_is_taken_as_plain_query() {
    let definition = OperationDefinitionBuilder::default()
        .operation_type(OperationType::Mutation)
        .variable_definitions(vec![VariableDefinition::new(
            "id",
            TypeReference::NonNull(Box::new(TypeReference::Named("ID".into()))),
            None,
        )])
        .directives(vec![directive("traced", vec![])])
        .selection_set(vec![field("logout")])
        .build()
        .unwrap();
    let Validation::Success(document) = validate(&document(vec![definition.into()])) else {
        panic!("expected success");
    };

    let operation = document.operation(None).unwrap();
    assert_eq!(operation.operation_type, OperationType::Query);
    assert!(operation.variable_definitions.is_empty());
    assert!(operation.directives.is_empty());
}

#[test]
fn test_anonymous_alongside_named_operation() {
    assert_eq!(
        validate(&document(vec![
            query(None, vec![field("me")]),
            query(Some("Foo"), vec![field("me")]),
        ]))
        .into_errors(),
        vec![ValidationError::MixedAnonymousOperations {
            anonymous_count: 1,
            names: vec!["Foo".into()],
        }]
    );
}

#[test]
fn test_several_anonymous_operations() {
    assert_eq!(
        validate(&document(vec![
            query(None, vec![field("me")]),
            query(None, vec![field("you")]),
            query(Some("Foo"), vec![field("me")]),
            query(Some("Bar"), vec![field("me")]),
        ]))
        .into_errors(),
        vec![ValidationError::MixedAnonymousOperations {
            anonymous_count: 2,
            names: vec!["Foo".into(), "Bar".into()],
        }]
    );

    assert_eq!(
        validate(&document(vec![
            query(None, vec![field("me")]),
            query(None, vec![field("you")]),
        ]))
        .into_errors(),
        vec![ValidationError::MixedAnonymousOperations {
            anonymous_count: 2,
            names: vec![],
        }]
    );
}

#[test]
fn test_duplicate_operation_names() {
    assert_eq!(
        validate(&document(vec![
            query(Some("Foo"), vec![field("me")]),
            query(Some("Foo"), vec![field("you")]),
        ]))
        .into_errors(),
        vec![ValidationError::DuplicateOperation("Foo".into())]
    );
}

#[test]
fn test_duplicate_operation_names_and_operation_defects_are_reported_together() {
    assert_eq!(
        validate(&document(vec![
            query(Some("Foo"), vec![field("me")]),
            operation(
                OperationType::Mutation,
                Some("Foo"),
                vec![directive("traced", vec![]), directive("traced", vec![])],
                vec![field("logout")],
            ),
        ]))
        .into_errors(),
        vec![
            ValidationError::DuplicateOperation("Foo".into()),
            ValidationError::DuplicateDirective("traced".into()),
        ]
    );
}

#[test]
fn test_named_operations() {
    let Validation::Success(document) = validate(&document(vec![
        query(Some("Foo"), vec![field("me")]),
        operation(
            OperationType::Mutation,
            Some("Bar"),
            vec![directive("traced", vec![argument("level", 2)])],
            vec![field("logout")],
        ),
    ])) else {
        panic!("expected success");
    };
    assert_eq!(document.operations.len(), 2);
    assert_eq!(
        document
            .operations
            .iter()
            .filter_map(|operation| operation.name.as_deref())
            .collect::<Vec<_>>(),
        ["Foo", "Bar"]
    );

    let foo = document.operation(Some("Foo")).unwrap();
    assert_eq!(foo.name.as_deref(), Some("Foo"));
    assert_eq!(foo.operation_type, OperationType::Query);

    let bar = document.operation(Some("Bar")).unwrap();
    assert_eq!(bar.operation_type, OperationType::Mutation);
    assert!(bar.directives["traced"].contains_key("level"));

    assert_eq!(
        document.operation(Some("Baz")),
        Err(Error::NoOperationFound(Some("Baz".into())))
    );
    assert_eq!(
        document.operation(None),
        Err(Error::NoOperationFound(None))
    );
}

#[test]
fn test_single_named_operation_can_be_picked_without_name() {
    let Validation::Success(document) =
        validate(&document(vec![query(Some("Foo"), vec![field("me")])]))
    else {
        panic!("expected success");
    };
    assert_eq!(
        document.operation(None).unwrap().name.as_deref(),
        Some("Foo")
    );
}

#[test]
fn test_named_operation_keeps_variable_definitions() {
    let variable_definition = VariableDefinition::new(
        "first",
        TypeReference::Named("Int".into()),
        Some(semillon::ast::Value::Int(10)),
    );
    let definition = OperationDefinitionBuilder::default()
        .name("Friends")
        .variable_definitions(vec![variable_definition.clone()])
        .selection_set(vec![field("friends")])
        .build()
        .unwrap();
    let Validation::Success(document) = validate(&document(vec![definition.into()])) else {
        panic!("expected success");
    };
    let friends = document.operation(Some("Friends")).unwrap();
    assert_eq!(friends.variable_definitions, vec![variable_definition]);
    assert_eq!(friends.variable_definitions[0].type_.name(), "Int");
    assert_eq!(
        TypeReference::NonNull(Box::new(TypeReference::List(Box::new(TypeReference::Named(
            "ID".into()
        )))))
        .name(),
        "ID"
    );
}

#[test]
fn test_document_without_operations() {
    let Validation::Success(document) = validate(&document(vec![])) else {
        panic!("expected success");
    };
    assert!(document.operations.is_empty());
    assert_eq!(document.operation(None), Err(Error::NoOperationFound(None)));
}

#[test]
fn test_no_operation_found_message() {
    assert_eq!(
        Error::NoOperationFound(Some("Baz".into())).to_string(),
        "no operation found: `Baz`"
    );
    assert_eq!(
        Error::NoOperationFound(None).to_string(),
        "no operation found"
    );
}
