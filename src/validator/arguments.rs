use tracing::instrument;

use crate::{
    ArgumentSet, DirectiveSet, DuplicateName, Validation, ValidationError,
    ast::{Argument, Directive},
    check_unique,
};

#[instrument(level = "trace", skip(arguments))]
pub fn validate_arguments(arguments: &[Argument]) -> Validation<ArgumentSet> {
    check_unique(
        arguments
            .iter()
            .map(|argument| (argument.name.clone(), argument.value.clone())),
    )
    .map_err(|DuplicateName(name)| ValidationError::DuplicateArgument(name))
    .map(ArgumentSet::new)
}

pub(crate) fn validate_maybe_arguments(arguments: Option<&[Argument]>) -> Validation<ArgumentSet> {
    validate_arguments(arguments.unwrap_or_default())
}

/// Checks each directive's arguments, then the directive names themselves.
///
/// Argument errors from every directive are reported together; directive name
/// duplicates are only looked for once all of them passed.
#[instrument(level = "trace", skip(directives))]
pub fn validate_directives(directives: &[Directive]) -> Validation<DirectiveSet> {
    directives
        .iter()
        .map(|directive| {
            validate_maybe_arguments(directive.arguments.as_deref())
                .map(|arguments| (directive.name.clone(), arguments))
        })
        .collect::<Validation<Vec<_>>>()
        .and_then(|directives| {
            check_unique(directives)
                .map_err(|DuplicateName(name)| ValidationError::DuplicateDirective(name))
        })
        .map(DirectiveSet::new)
}
