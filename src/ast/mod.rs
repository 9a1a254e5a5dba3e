use derive_builder::Builder;
use smol_str::SmolStr;

use crate::OperationType;

/// A parsed (not yet validated) executable document, as handed over by the parser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<ExecutableDefinition>,
}

impl Document {
    pub fn new(definitions: Vec<ExecutableDefinition>) -> Self {
        Self { definitions }
    }

    pub fn operation_definitions(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.maybe_as_operation_definition())
    }

    pub fn fragment_definitions(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.maybe_as_fragment_definition())
    }
}

impl FromIterator<ExecutableDefinition> for Document {
    fn from_iter<TIterator: IntoIterator<Item = ExecutableDefinition>>(iter: TIterator) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExecutableDefinition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

impl ExecutableDefinition {
    pub fn maybe_as_operation_definition(&self) -> Option<&OperationDefinition> {
        match self {
            Self::Operation(operation_definition) => Some(operation_definition),
            _ => None,
        }
    }

    pub fn maybe_as_fragment_definition(&self) -> Option<&FragmentDefinition> {
        match self {
            Self::Fragment(fragment_definition) => Some(fragment_definition),
            _ => None,
        }
    }
}

impl From<OperationDefinition> for ExecutableDefinition {
    fn from(value: OperationDefinition) -> Self {
        Self::Operation(value)
    }
}

impl From<FragmentDefinition> for ExecutableDefinition {
    fn from(value: FragmentDefinition) -> Self {
        Self::Fragment(value)
    }
}

#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
pub struct OperationDefinition {
    #[builder(default = "OperationType::Query")]
    pub operation_type: OperationType,
    #[builder(setter(into, strip_option), default)]
    pub name: Option<SmolStr>,
    #[builder(default)]
    pub variable_definitions: Vec<VariableDefinition>,
    #[builder(default)]
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: SmolStr,
    pub on: SmolStr,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl FragmentDefinition {
    pub fn new(
        name: impl Into<SmolStr>,
        on: impl Into<SmolStr>,
        directives: Vec<Directive>,
        selection_set: Vec<Selection>,
    ) -> Self {
        Self {
            name: name.into(),
            on: on.into(),
            directives,
            selection_set,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: SmolStr,
    pub type_: TypeReference,
    pub default_value: Option<Value>,
}

impl VariableDefinition {
    pub fn new(name: impl Into<SmolStr>, type_: TypeReference, default_value: Option<Value>) -> Self {
        Self {
            name: name.into(),
            type_,
            default_value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeReference {
    Named(SmolStr),
    List(Box<TypeReference>),
    NonNull(Box<TypeReference>),
}

impl TypeReference {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(type_) => type_.name(),
            Self::NonNull(type_) => type_.name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    /// Every fragment spread under this selection, depth first.
    pub fn spreads(&self) -> Vec<&FragmentSpread> {
        match self {
            Self::Field(field) => field
                .selection_set
                .iter()
                .flatten()
                .flat_map(Selection::spreads)
                .collect(),
            Self::FragmentSpread(fragment_spread) => vec![fragment_spread],
            Self::InlineFragment(inline_fragment) => inline_fragment
                .selection_set
                .iter()
                .flat_map(Selection::spreads)
                .collect(),
        }
    }
}

impl From<Field> for Selection {
    fn from(value: Field) -> Self {
        Self::Field(value)
    }
}

impl From<FragmentSpread> for Selection {
    fn from(value: FragmentSpread) -> Self {
        Self::FragmentSpread(value)
    }
}

impl From<InlineFragment> for Selection {
    fn from(value: InlineFragment) -> Self {
        Self::InlineFragment(value)
    }
}

#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(pattern = "owned")]
pub struct Field {
    #[builder(setter(into, strip_option), default)]
    pub alias: Option<SmolStr>,
    #[builder(setter(into))]
    pub name: SmolStr,
    #[builder(setter(strip_option), default)]
    pub selection_set: Option<Vec<Selection>>,
    #[builder(setter(custom), default)]
    pub arguments: Option<Vec<Argument>>,
    #[builder(default)]
    pub directives: Vec<Directive>,
}

impl FieldBuilder {
    pub fn arguments(self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        let mut new = self;
        new.arguments = Some(Some(arguments.into_iter().collect()));
        new
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: SmolStr,
    pub directives: Vec<Directive>,
}

impl FragmentSpread {
    pub fn new(name: impl Into<SmolStr>, directives: Vec<Directive>) -> Self {
        Self {
            name: name.into(),
            directives,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub on: Option<SmolStr>,
    pub directives: Vec<Directive>,
    pub selection_set: Vec<Selection>,
}

impl InlineFragment {
    pub fn new(
        on: Option<SmolStr>,
        directives: Vec<Directive>,
        selection_set: Vec<Selection>,
    ) -> Self {
        Self {
            on,
            directives,
            selection_set,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: SmolStr,
    pub value: Value,
}

impl Argument {
    pub fn new(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(SmolStr),
    Int(i32),
    Float(f64),
    String(SmolStr),
    Bool(bool),
    Null,
    EnumVariant(SmolStr),
    List(Vec<Value>),
    Object(Vec<(SmolStr, Value)>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub name: SmolStr,
    pub arguments: Option<Vec<Argument>>,
}

impl Directive {
    pub fn new(name: impl Into<SmolStr>, arguments: Option<Vec<Argument>>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
