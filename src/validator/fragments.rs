use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;
use squalid::_d;
use tracing::{instrument, trace};

use crate::{
    DuplicateName, FragmentDefinition, Operations, ResolvedSpread, Spread, UnresolvedSpread,
    Validation, ValidationError, ast, check_unique, find_duplicates,
    validator::selection::validate_fragment_definition,
};

pub type ResolvedFragments = IndexMap<SmolStr, Arc<FragmentDefinition<ResolvedSpread>>>;
pub type FragmentReferences = IndexMap<SmolStr, IndexSet<SmolStr>>;

/// Shape-checks every fragment definition and makes sure their names are unique.
#[instrument(level = "trace", skip(fragment_definitions))]
pub fn validate_fragment_definitions<'a>(
    fragment_definitions: impl IntoIterator<Item = &'a ast::FragmentDefinition>,
) -> Validation<IndexMap<SmolStr, FragmentDefinition<UnresolvedSpread>>> {
    let fragment_definitions = fragment_definitions.into_iter().collect::<Vec<_>>();

    check_unique(
        fragment_definitions
            .iter()
            .map(|fragment_definition| (fragment_definition.name.clone(), ())),
    )
    .map_err(|DuplicateName(name)| ValidationError::DuplicateFragmentDefinition(name))
    .zip_with(
        fragment_definitions
            .iter()
            .map(|fragment_definition| validate_fragment_definition(fragment_definition))
            .collect::<Validation<Vec<_>>>(),
        |_, fragment_definitions| {
            fragment_definitions
                .into_iter()
                .map(|fragment_definition| (fragment_definition.name.clone(), fragment_definition))
                .collect()
        },
    )
}

/// Looks for missing and circular fragment spreads straight from the parsed document.
///
/// Only needs fragment names to be unique, so spread defects are found even when some
/// definitions or operations are malformed. Fragment bodies are checked first, then each
/// operation body.
#[instrument(level = "trace", skip(fragment_definitions, operation_definitions))]
pub(crate) fn check_fragment_spreads(
    fragment_definitions: &[&ast::FragmentDefinition],
    operation_definitions: &[&ast::OperationDefinition],
) -> Validation<()> {
    let names = fragment_definitions
        .iter()
        .map(|fragment_definition| &fragment_definition.name);
    if !find_duplicates(names).is_empty() {
        return Validation::Success(());
    }

    let graph = SpreadGraph::new(
        fragment_definitions
            .iter()
            .map(|fragment_definition| {
                (
                    fragment_definition.name.clone(),
                    ast_spread_names(&fragment_definition.selection_set),
                )
            })
            .collect(),
    );
    graph
        .check_fragments()
        .zip_left(
            operation_definitions
                .iter()
                .map(|operation_definition| {
                    graph.check_body(&ast_spread_names(&operation_definition.selection_set))
                })
                .collect::<Validation<()>>(),
        )
        .dedup_errors()
}

fn ast_spread_names(selection_set: &[ast::Selection]) -> Vec<SmolStr> {
    selection_set
        .iter()
        .flat_map(ast::Selection::spreads)
        .map(|fragment_spread| fragment_spread.name.clone())
        .collect()
}

fn spread_names<TSpread: Spread>(selection_set: &[crate::Selection<TSpread>]) -> Vec<SmolStr> {
    selection_set
        .iter()
        .flat_map(crate::Selection::spreads)
        .map(|spread| spread.name().clone())
        .collect()
}

/// Fragment names mapped to the names their bodies spread, in body order.
struct SpreadGraph {
    spreads: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl SpreadGraph {
    fn new(spreads: IndexMap<SmolStr, Vec<SmolStr>>) -> Self {
        Self { spreads }
    }

    fn check_fragments(&self) -> Validation<()> {
        self.spreads
            .values()
            .map(|spreads| self.check_body(spreads))
            .collect()
    }

    /// Walks the spreads reachable from one body with a fresh path.
    ///
    /// Each fragment is expanded at most once per walk, so a walk is linear in the size
    /// of the graph.
    fn check_body(&self, spreads: &[SmolStr]) -> Validation<()> {
        self.visit(spreads, &mut _d(), &mut _d())
    }

    fn visit(
        &self,
        spreads: &[SmolStr],
        path: &mut IndexSet<SmolStr>,
        expanded: &mut IndexSet<SmolStr>,
    ) -> Validation<()> {
        spreads
            .iter()
            .map(|name| {
                if path.contains(name) {
                    trace!(%name, ?path, "circular fragment spread");
                    return Validation::error(ValidationError::CircularFragmentSpread(
                        name.clone(),
                    ));
                }
                let Some(target_spreads) = self.spreads.get(name) else {
                    trace!(%name, "no such fragment");
                    return Validation::error(ValidationError::NoSuchFragment(name.clone()));
                };
                if !expanded.insert(name.clone()) {
                    return Validation::Success(());
                }

                path.insert(name.clone());
                let visited = self.visit(target_spreads, path, expanded);
                path.pop();
                visited
            })
            .collect()
    }
}

/// Replaces spreads-by-name with the definitions they point at.
///
/// Works over any spread representation, so resolving already-resolved definitions
/// again gives back the same tree. Trees are only built once the spread graph is known
/// to be free of missing and circular spreads.
pub struct FragmentResolver<'a, TSpread> {
    definitions: &'a IndexMap<SmolStr, FragmentDefinition<TSpread>>,
    graph: SpreadGraph,
    resolved: ResolvedFragments,
    references: FragmentReferences,
}

impl<'a, TSpread: Spread> FragmentResolver<'a, TSpread> {
    pub fn new(definitions: &'a IndexMap<SmolStr, FragmentDefinition<TSpread>>) -> Self {
        Self {
            definitions,
            graph: SpreadGraph::new(
                definitions
                    .iter()
                    .map(|(name, definition)| {
                        (name.clone(), spread_names(&definition.selection_set))
                    })
                    .collect(),
            ),
            resolved: _d(),
            references: _d(),
        }
    }

    /// Resolves every definition independently, collecting the errors of all of them.
    #[instrument(level = "trace", skip(self))]
    pub fn resolve_all(&mut self) -> Validation<(ResolvedFragments, FragmentReferences)> {
        self.graph.check_fragments().dedup_errors().and_then(|()| {
            let definitions = self.definitions;
            definitions
                .values()
                .map(|definition| {
                    self.resolve_definition(definition, &mut _d())
                        .map(|resolved| (definition.name.clone(), resolved))
                })
                .collect::<Validation<ResolvedFragments>>()
                .map(|resolved| {
                    let references = resolved
                        .keys()
                        .map(|name| {
                            (
                                name.clone(),
                                self.references.get(name).cloned().unwrap_or_default(),
                            )
                        })
                        .collect();
                    (resolved, references)
                })
        })
    }

    /// Resolves the spreads of every operation, each with its own path.
    #[instrument(level = "trace", skip(self, operations))]
    pub fn resolve_operations(
        &mut self,
        operations: &Operations<TSpread>,
    ) -> Validation<Operations<ResolvedSpread>> {
        operations
            .iter()
            .map(|operation| self.graph.check_body(&spread_names(&operation.selection_set)))
            .collect::<Validation<()>>()
            .dedup_errors()
            .and_then(|()| {
                operations.try_map_spreads(&mut |spread| {
                    self.resolve_spread(spread, &mut _d(), &mut _d())
                })
            })
    }

    fn resolve_definition(
        &mut self,
        definition: &FragmentDefinition<TSpread>,
        path: &mut IndexSet<SmolStr>,
    ) -> Validation<Arc<FragmentDefinition<ResolvedSpread>>> {
        if let Some(resolved) = self.resolved.get(&definition.name) {
            return Validation::Success(resolved.clone());
        }

        let mut reached: IndexSet<SmolStr> = _d();
        let resolved = definition
            .try_map_spreads(&mut |spread| self.resolve_spread(spread, path, &mut reached));
        resolved.map(|resolved| {
            let resolved = Arc::new(resolved);
            self.resolved
                .insert(definition.name.clone(), resolved.clone());
            self.references.insert(definition.name.clone(), reached);
            resolved
        })
    }

    fn resolve_spread(
        &mut self,
        spread: &TSpread,
        path: &mut IndexSet<SmolStr>,
        reached: &mut IndexSet<SmolStr>,
    ) -> Validation<ResolvedSpread> {
        let name = spread.name();
        if path.contains(name) {
            return Validation::error(ValidationError::CircularFragmentSpread(name.clone()));
        }
        let definitions = self.definitions;
        let Some(definition) = definitions.get(name) else {
            return Validation::error(ValidationError::NoSuchFragment(name.clone()));
        };

        reached.insert(name.clone());
        path.insert(name.clone());
        let resolved = self.resolve_definition(definition, path);
        path.pop();

        resolved.map(|definition| {
            if let Some(references) = self.references.get(name) {
                reached.extend(references.iter().cloned());
            }
            ResolvedSpread::new(name.clone(), spread.directives().clone(), definition)
        })
    }
}
