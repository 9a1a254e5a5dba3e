pub mod ast;
mod document;
mod error;
mod operation;
mod unique;
mod validation;
mod validator;

pub use indexmap::{IndexMap, IndexSet};

pub use crate::document::{
    ArgumentSet, DirectiveSet, Document, Field, FragmentDefinition, InlineFragment, Operation,
    Operations, ResolvedSpread, Selection, Spread, UnresolvedSpread,
};
pub use crate::error::{Error, Result};
pub use crate::operation::OperationType;
pub use crate::unique::{DuplicateName, check_unique, find_duplicates};
pub use crate::validation::{Errors, Validation};
pub use crate::validator::{
    FragmentReferences, FragmentResolver, ResolvedFragments, ValidationError, ValidationErrorKind,
    validate, validate_arguments, validate_directives, validate_fragment_definition,
    validate_fragment_definitions, validate_operation, validate_operations, validate_selection,
    validate_selection_set, validation_errors,
};
