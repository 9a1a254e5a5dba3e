use semillon::{
    OperationType, Validation,
    ast::{
        Argument, Document, ExecutableDefinition, FieldBuilder, FragmentDefinition, FragmentSpread,
        OperationDefinitionBuilder, Selection, Value,
    },
    validate,
};
use tracing_chrome::ChromeLayerBuilder;
use tracing_subscriber::prelude::*;

fn friends_fragment(depth: usize) -> FragmentDefinition {
    let mut selection_set: Vec<Selection> = vec![FieldBuilder::default()
        .name("name")
        .build()
        .unwrap()
        .into()];
    if depth > 0 {
        selection_set.push(
            FieldBuilder::default()
                .name("friends")
                .arguments([Argument::new("first", Value::Int(10))])
                .selection_set(vec![
                    FragmentSpread::new(format!("Friends{}", depth - 1), vec![]).into(),
                ])
                .build()
                .unwrap()
                .into(),
        );
    }
    FragmentDefinition::new(format!("Friends{depth}"), "User", vec![], selection_set)
}

fn main() {
    let (chrome_layer, _guard) = ChromeLayerBuilder::new().build();
    tracing_subscriber::registry().with(chrome_layer).init();

    let network = OperationDefinitionBuilder::default()
        .operation_type(OperationType::Query)
        .name("Network")
        .selection_set(vec![
            FieldBuilder::default()
                .name("me")
                .selection_set(vec![FragmentSpread::new("Friends8", vec![]).into()])
                .build()
                .unwrap()
                .into(),
        ])
        .build()
        .unwrap();
    let document = [ExecutableDefinition::from(network)]
        .into_iter()
        .chain((0..=8).map(|depth| ExecutableDefinition::from(friends_fragment(depth))))
        .collect::<Document>();

    match validate(&document) {
        Validation::Success(validated) => {
            println!(
                "valid: {} operation(s), {} fragment(s) ({} fragment definitions in source)",
                validated.operations.len(),
                validated.fragments.len(),
                document.fragment_definitions().count(),
            );
        }
        Validation::Failure(errors) => {
            for error in errors {
                println!("{error}");
            }
        }
    }
}
