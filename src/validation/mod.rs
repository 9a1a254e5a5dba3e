use std::hash::Hash;

use itertools::Itertools;

use crate::ValidationError;

/// Either a successful value or a non-empty, ordered list of errors.
///
/// Independent validations are combined with [`Validation::zip`] (and friends), which
/// keeps the errors of both sides. Dependent steps use [`Validation::and_then`], which
/// stops at the first failure.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Validation<TSuccess, TError = ValidationError> {
    Success(TSuccess),
    Failure(Errors<TError>),
}

impl<TSuccess, TError> Validation<TSuccess, TError> {
    pub fn error(error: TError) -> Self {
        Self::Failure(Errors::new(error))
    }

    pub fn errors(first: TError, rest: impl IntoIterator<Item = TError>) -> Self {
        Self::Failure(Errors::from_parts(first, rest))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn map<TMapped>(self, mapper: impl FnOnce(TSuccess) -> TMapped) -> Validation<TMapped, TError> {
        match self {
            Self::Success(value) => Validation::Success(mapper(value)),
            Self::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Rewrites every error, leaving a success untouched.
    pub fn map_err<TMappedError>(
        self,
        mapper: impl FnMut(TError) -> TMappedError,
    ) -> Validation<TSuccess, TMappedError> {
        match self {
            Self::Success(value) => Validation::Success(value),
            Self::Failure(errors) => Validation::Failure(errors.map(mapper)),
        }
    }

    /// Sequences a dependent step. `next` is never called if `self` failed.
    pub fn and_then<TNext>(
        self,
        next: impl FnOnce(TSuccess) -> Validation<TNext, TError>,
    ) -> Validation<TNext, TError> {
        match self {
            Self::Success(value) => next(value),
            Self::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Combines two independent validations, keeping the errors of both (left first).
    pub fn zip<TOther>(
        self,
        other: Validation<TOther, TError>,
    ) -> Validation<(TSuccess, TOther), TError> {
        self.zip_with(other, |left, right| (left, right))
    }

    pub fn zip_with<TOther, TCombined>(
        self,
        other: Validation<TOther, TError>,
        combine: impl FnOnce(TSuccess, TOther) -> TCombined,
    ) -> Validation<TCombined, TError> {
        match (self, other) {
            (Self::Success(left), Validation::Success(right)) => {
                Validation::Success(combine(left, right))
            }
            (Self::Failure(errors), Validation::Success(_))
            | (Self::Success(_), Validation::Failure(errors)) => Validation::Failure(errors),
            (Self::Failure(mut errors), Validation::Failure(other_errors)) => {
                errors.extend(other_errors);
                Validation::Failure(errors)
            }
        }
    }

    /// Like [`Validation::zip`] but keeps only the left value.
    pub fn zip_left<TOther>(self, other: Validation<TOther, TError>) -> Self {
        self.zip_with(other, |left, _| left)
    }

    pub fn into_result(self) -> Result<TSuccess, Errors<TError>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }

    pub fn into_errors(self) -> Vec<TError> {
        match self {
            Self::Success(_) => vec![],
            Self::Failure(errors) => errors.into_vec(),
        }
    }

    pub fn dedup_errors(self) -> Self
    where
        TError: Clone + Eq + Hash,
    {
        match self {
            Self::Failure(errors) => Self::Failure(errors.dedup()),
            success => success,
        }
    }
}

impl<TSuccess, TError> From<Result<TSuccess, TError>> for Validation<TSuccess, TError> {
    fn from(value: Result<TSuccess, TError>) -> Self {
        match value {
            Ok(value) => Self::Success(value),
            Err(error) => Self::error(error),
        }
    }
}

/// Applicative collection: succeeds with every value if all items succeeded, otherwise
/// fails with the errors of every failed item in iteration order.
impl<TSuccess, TError, TCollection> FromIterator<Validation<TSuccess, TError>>
    for Validation<TCollection, TError>
where
    TCollection: FromIterator<TSuccess>,
{
    fn from_iter<TIterator: IntoIterator<Item = Validation<TSuccess, TError>>>(
        iter: TIterator,
    ) -> Self {
        let mut values: Vec<TSuccess> = vec![];
        let mut errors: Option<Errors<TError>> = None;
        for validation in iter {
            match (validation, errors.as_mut()) {
                (Validation::Success(value), None) => values.push(value),
                (Validation::Success(_), Some(_)) => {}
                (Validation::Failure(new_errors), None) => errors = Some(new_errors),
                (Validation::Failure(new_errors), Some(errors)) => errors.extend(new_errors),
            }
        }
        match errors {
            None => Self::Success(values.into_iter().collect()),
            Some(errors) => Self::Failure(errors),
        }
    }
}

/// An ordered list of errors that is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Errors<TError> {
    first: TError,
    rest: Vec<TError>,
}

impl<TError> Errors<TError> {
    pub fn new(error: TError) -> Self {
        Self {
            first: error,
            rest: vec![],
        }
    }

    pub fn from_parts(first: TError, rest: impl IntoIterator<Item = TError>) -> Self {
        Self {
            first,
            rest: rest.into_iter().collect(),
        }
    }

    pub fn first(&self) -> &TError {
        &self.first
    }

    pub fn len(&self) -> usize {
        self.rest.len() + 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &TError> {
        std::iter::once(&self.first).chain(&self.rest)
    }

    pub fn extend(&mut self, other: Errors<TError>) {
        self.rest.push(other.first);
        self.rest.extend(other.rest);
    }

    pub fn map<TMappedError>(self, mut mapper: impl FnMut(TError) -> TMappedError) -> Errors<TMappedError> {
        Errors {
            first: mapper(self.first),
            rest: self.rest.into_iter().map(mapper).collect(),
        }
    }

    pub fn into_vec(self) -> Vec<TError> {
        let mut ret = Vec::with_capacity(self.len());
        ret.push(self.first);
        ret.extend(self.rest);
        ret
    }

    fn dedup(self) -> Self
    where
        TError: Clone + Eq + Hash,
    {
        let Self { first, rest } = self;
        let rest = rest.into_iter().filter(|error| *error != first).unique().collect();
        Self { first, rest }
    }
}

impl<TError> IntoIterator for Errors<TError> {
    type Item = TError;
    type IntoIter = std::vec::IntoIter<TError>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
