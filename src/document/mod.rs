use std::{ops::Deref, sync::Arc};

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::{
    ast::{Value, VariableDefinition},
    Error, OperationType, Result, Validation,
};

/// Arguments keyed by name. Built only through argument validation, so names are unique.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentSet(IndexMap<SmolStr, Value>);

impl ArgumentSet {
    pub(crate) fn new(arguments: IndexMap<SmolStr, Value>) -> Self {
        Self(arguments)
    }
}

impl Deref for ArgumentSet {
    type Target = IndexMap<SmolStr, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Directives keyed by name, each with its own [`ArgumentSet`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectiveSet(IndexMap<SmolStr, ArgumentSet>);

impl DirectiveSet {
    pub(crate) fn new(directives: IndexMap<SmolStr, ArgumentSet>) -> Self {
        Self(directives)
    }
}

impl Deref for DirectiveSet {
    type Target = IndexMap<SmolStr, ArgumentSet>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// What a fragment spread leaf looks like in a given phase.
pub trait Spread {
    fn name(&self) -> &SmolStr;
    fn directives(&self) -> &DirectiveSet;
}

/// A spread whose target has not been looked up yet.
#[derive(Clone, Debug, PartialEq)]
pub struct UnresolvedSpread {
    pub name: SmolStr,
    pub directives: DirectiveSet,
}

impl UnresolvedSpread {
    pub fn new(name: SmolStr, directives: DirectiveSet) -> Self {
        Self { name, directives }
    }
}

impl Spread for UnresolvedSpread {
    fn name(&self) -> &SmolStr {
        &self.name
    }

    fn directives(&self) -> &DirectiveSet {
        &self.directives
    }
}

/// A spread carrying its fully-resolved target definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpread {
    pub name: SmolStr,
    pub directives: DirectiveSet,
    pub definition: Arc<FragmentDefinition<ResolvedSpread>>,
}

impl ResolvedSpread {
    pub fn new(
        name: SmolStr,
        directives: DirectiveSet,
        definition: Arc<FragmentDefinition<ResolvedSpread>>,
    ) -> Self {
        Self {
            name,
            directives,
            definition,
        }
    }
}

impl Spread for ResolvedSpread {
    fn name(&self) -> &SmolStr {
        &self.name
    }

    fn directives(&self) -> &DirectiveSet {
        &self.directives
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection<TSpread> {
    Field(Field<TSpread>),
    FragmentSpread(TSpread),
    InlineFragment(InlineFragment<TSpread>),
}

impl<TSpread> Selection<TSpread> {
    /// Rebuilds this selection with every spread leaf replaced by `mapper`'s result.
    ///
    /// Fields and inline fragments are copied as they are. Failures from every leaf
    /// are accumulated.
    pub fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<Selection<TMapped>, TError> {
        match self {
            Self::Field(field) => field.try_map_spreads(mapper).map(Selection::Field),
            Self::FragmentSpread(spread) => mapper(spread).map(Selection::FragmentSpread),
            Self::InlineFragment(inline_fragment) => inline_fragment
                .try_map_spreads(mapper)
                .map(Selection::InlineFragment),
        }
    }

    /// Every spread leaf under this selection, depth first.
    pub fn spreads(&self) -> Vec<&TSpread> {
        match self {
            Self::Field(field) => field
                .selection_set
                .iter()
                .flatten()
                .flat_map(Selection::spreads)
                .collect(),
            Self::FragmentSpread(spread) => vec![spread],
            Self::InlineFragment(inline_fragment) => inline_fragment
                .selection_set
                .iter()
                .flat_map(Selection::spreads)
                .collect(),
        }
    }

    pub fn maybe_as_field(&self) -> Option<&Field<TSpread>> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn maybe_as_fragment_spread(&self) -> Option<&TSpread> {
        match self {
            Self::FragmentSpread(spread) => Some(spread),
            _ => None,
        }
    }

    pub fn maybe_as_inline_fragment(&self) -> Option<&InlineFragment<TSpread>> {
        match self {
            Self::InlineFragment(inline_fragment) => Some(inline_fragment),
            _ => None,
        }
    }
}

fn try_map_selection_set<TSpread, TMapped, TError>(
    selection_set: &[Selection<TSpread>],
    mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
) -> Validation<Vec<Selection<TMapped>>, TError> {
    selection_set
        .iter()
        .map(|selection| selection.try_map_spreads(mapper))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field<TSpread> {
    pub alias: Option<SmolStr>,
    pub name: SmolStr,
    pub arguments: ArgumentSet,
    pub directives: DirectiveSet,
    pub selection_set: Option<Vec<Selection<TSpread>>>,
}

impl<TSpread> Field<TSpread> {
    pub fn response_key(&self) -> &SmolStr {
        self.alias.as_ref().unwrap_or(&self.name)
    }

    fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<Field<TMapped>, TError> {
        let selection_set = match self.selection_set.as_deref() {
            None => Validation::Success(None),
            Some(selection_set) => try_map_selection_set(selection_set, mapper).map(Some),
        };
        selection_set.map(|selection_set| Field {
            alias: self.alias.clone(),
            name: self.name.clone(),
            arguments: self.arguments.clone(),
            directives: self.directives.clone(),
            selection_set,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<TSpread> {
    pub on: Option<SmolStr>,
    pub directives: DirectiveSet,
    pub selection_set: Vec<Selection<TSpread>>,
}

impl<TSpread> InlineFragment<TSpread> {
    fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<InlineFragment<TMapped>, TError> {
        try_map_selection_set(&self.selection_set, mapper).map(|selection_set| InlineFragment {
            on: self.on.clone(),
            directives: self.directives.clone(),
            selection_set,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition<TSpread> {
    pub name: SmolStr,
    pub on: SmolStr,
    pub directives: DirectiveSet,
    pub selection_set: Vec<Selection<TSpread>>,
}

impl<TSpread> FragmentDefinition<TSpread> {
    pub fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<FragmentDefinition<TMapped>, TError> {
        try_map_selection_set(&self.selection_set, mapper).map(|selection_set| {
            FragmentDefinition {
                name: self.name.clone(),
                on: self.on.clone(),
                directives: self.directives.clone(),
                selection_set,
            }
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Operation<TSpread = ResolvedSpread> {
    pub operation_type: OperationType,
    pub name: Option<SmolStr>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: DirectiveSet,
    pub selection_set: Vec<Selection<TSpread>>,
}

impl<TSpread> Operation<TSpread> {
    pub fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<Operation<TMapped>, TError> {
        try_map_selection_set(&self.selection_set, mapper).map(|selection_set| Operation {
            operation_type: self.operation_type,
            name: self.name.clone(),
            variable_definitions: self.variable_definitions.clone(),
            directives: self.directives.clone(),
            selection_set,
        })
    }
}

/// The operations of a document. A lone anonymous operation can't coexist with others.
#[derive(Clone, Debug, PartialEq)]
pub enum Operations<TSpread = ResolvedSpread> {
    LoneAnonymous(Operation<TSpread>),
    Named(IndexMap<SmolStr, Operation<TSpread>>),
}

impl<TSpread> Operations<TSpread> {
    pub fn len(&self) -> usize {
        match self {
            Self::LoneAnonymous(_) => 1,
            Self::Named(operations) => operations.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation<TSpread>> {
        let (lone, named) = match self {
            Self::LoneAnonymous(operation) => (Some(operation), None),
            Self::Named(operations) => (None, Some(operations.values())),
        };
        lone.into_iter().chain(named.into_iter().flatten())
    }

    pub fn try_map_spreads<TMapped, TError>(
        &self,
        mapper: &mut impl FnMut(&TSpread) -> Validation<TMapped, TError>,
    ) -> Validation<Operations<TMapped>, TError> {
        match self {
            Self::LoneAnonymous(operation) => operation
                .try_map_spreads(mapper)
                .map(Operations::LoneAnonymous),
            Self::Named(operations) => operations
                .iter()
                .map(|(name, operation)| {
                    operation
                        .try_map_spreads(mapper)
                        .map(|operation| (name.clone(), operation))
                })
                .collect::<Validation<IndexMap<_, _>, _>>()
                .map(Operations::Named),
        }
    }
}

/// A document that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub operations: Operations,
    pub fragments: IndexMap<SmolStr, Arc<FragmentDefinition<ResolvedSpread>>>,
    /// For each fragment definition, every other fragment reachable from its spreads.
    pub fragment_references: IndexMap<SmolStr, IndexSet<SmolStr>>,
}

impl Document {
    pub fn new(
        operations: Operations,
        fragments: IndexMap<SmolStr, Arc<FragmentDefinition<ResolvedSpread>>>,
        fragment_references: IndexMap<SmolStr, IndexSet<SmolStr>>,
    ) -> Self {
        Self {
            operations,
            fragments,
            fragment_references,
        }
    }

    /// Picks the operation to execute.
    ///
    /// With no name, succeeds only if the document has exactly one operation.
    pub fn operation(&self, name: Option<&str>) -> Result<&Operation> {
        let operation = match (&self.operations, name) {
            (Operations::LoneAnonymous(operation), None) => Some(operation),
            (Operations::Named(operations), Some(name)) => operations.get(name),
            (Operations::Named(operations), None) if operations.len() == 1 => {
                operations.values().next()
            }
            _ => None,
        };
        operation.ok_or_else(|| Error::NoOperationFound(name.map(Into::into)))
    }

    pub fn fragment(&self, name: &str) -> Option<&FragmentDefinition<ResolvedSpread>> {
        self.fragments.get(name).map(Deref::deref)
    }
}
