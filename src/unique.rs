use indexmap::IndexMap;
use itertools::Itertools;
use smol_str::SmolStr;
use tracing::instrument;

use crate::Validation;

/// A name that occurred more than once where names must be unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DuplicateName(pub SmolStr);

/// Every name occurring at least twice, each reported once, in sorted order.
pub fn find_duplicates<'a>(names: impl IntoIterator<Item = &'a SmolStr>) -> Vec<SmolStr> {
    names
        .into_iter()
        .sorted()
        .dedup_with_count()
        .filter(|(count, _)| *count > 1)
        .map(|(_, name)| name.clone())
        .collect()
}

/// Builds a name-keyed map, failing with one [`DuplicateName`] per repeated name.
#[instrument(level = "trace", skip(pairs))]
pub fn check_unique<TValue>(
    pairs: impl IntoIterator<Item = (SmolStr, TValue)>,
) -> Validation<IndexMap<SmolStr, TValue>, DuplicateName> {
    let pairs = pairs.into_iter().collect::<Vec<_>>();
    let mut duplicates = find_duplicates(pairs.iter().map(|(name, _)| name)).into_iter();
    match duplicates.next() {
        None => Validation::Success(pairs.into_iter().collect()),
        Some(first) => Validation::errors(DuplicateName(first), duplicates.map(DuplicateName)),
    }
}
