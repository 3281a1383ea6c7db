//! Set-algebra operations: union, intersection, difference, subset,
//! equality, and duplication.
//!
//! Every operation that builds a new set derives the result's behavior
//! bundle from its first (left-most) operand and fills the result with
//! independently-owned copies produced by that bundle's copier. A bundle
//! without a copier refuses the operation up front with
//! [`SetError::CopyUnavailable`] rather than aliasing payloads across sets
//! with independent lifetimes.
//!
//! Output order is deterministic: operands are processed left to right,
//! each in its own insertion order, and the first occurrence of each
//! distinct element (per the result's matcher) is the occurrence retained.
//!
//! On any mid-operation failure the partially built result is torn down
//! before the error is returned, releaser applied to every payload it had
//! copied so far. No partial result is ever observable.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity                                   |
//! |-------------------|----------------------------------------------|
//! | `union_of`        | O(t·u) for t enumerated, u distinct elements |
//! | `intersection_of` | O(n·m) across the membership probes          |
//! | `difference`      | O(n·m)                                       |
//! | `is_subset`       | O(n·m)                                       |
//! | `are_equal`       | O(k·n·m) over k operands                     |
//! | `duplicate`       | O(n²) (duplicate checks while rebuilding)    |
//!
//! The quadratic flavor is inherited from the container's linear membership
//! scan and is part of the contract.

use crate::chain_set::ChainSet;
use crate::error::SetError;

impl<T> ChainSet<T>
where
    T: 'static,
{
    /// Builds the union of `operands`: every element present in at least
    /// one operand, deduplicated by the result's matcher.
    ///
    /// The result inherits the behavior bundle of the first operand.
    /// Operands are processed left to right, each in insertion order, and
    /// the first occurrence of each distinct element is the one copied into
    /// the result. The duplicate check runs before the copy, so elements
    /// already present are never copied at all.
    ///
    /// At least one operand is required; a single operand degenerates to
    /// [`duplicate`](Self::duplicate).
    ///
    /// # Errors
    ///
    /// - [`SetError::InvalidArgument`] if `operands` is empty.
    /// - [`SetError::CopyUnavailable`] if the first operand's bundle has no
    ///   copier (checked up front, even when every operand is empty).
    /// - [`SetError::AllocationFailure`] if the copier fails; the partial
    ///   result is torn down first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut left: ChainSet<i32> = ChainSet::standard();
    /// let mut right: ChainSet<i32> = ChainSet::standard();
    /// for value in [0, 1, 2] {
    ///     assert!(left.insert(value).is_inserted());
    /// }
    /// for value in [2, 4, 6] {
    ///     assert!(right.insert(value).is_inserted());
    /// }
    ///
    /// let union = ChainSet::union_of(&[&left, &right]).unwrap();
    /// let elements: Vec<i32> = union.iter().copied().collect();
    /// assert_eq!(elements, vec![0, 1, 2, 4, 6]);
    /// ```
    pub fn union_of(operands: &[&Self]) -> Result<Self, SetError> {
        let first = Self::leading_operand(operands, 1)?;
        first.ops().require_copier()?;

        let mut result = Self::new(first.ops().clone());
        for set in operands {
            for element in set.iter() {
                if result.contains(element) {
                    continue;
                }
                let copy = result.ops().copy_element(element)?;
                let insertion = result.insert(copy);
                debug_assert!(insertion.is_inserted());
            }
        }
        Ok(result)
    }

    /// Builds the intersection of `operands`: every element of the first
    /// operand that is a member of all later operands.
    ///
    /// Only the first operand is enumerated; later operands are queried
    /// through their own [`contains`](Self::contains) (their own matchers),
    /// never enumerated for new candidates. The result inherits the first
    /// operand's bundle and keeps the first operand's insertion order.
    ///
    /// # Errors
    ///
    /// - [`SetError::InvalidArgument`] if `operands` is empty.
    /// - [`SetError::PreconditionViolated`] if only one operand was given;
    ///   the operation requires at least two.
    /// - [`SetError::CopyUnavailable`] if the first operand's bundle has no
    ///   copier.
    /// - [`SetError::AllocationFailure`] if the copier fails; the partial
    ///   result is torn down first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut left: ChainSet<i32> = ChainSet::standard();
    /// let mut right: ChainSet<i32> = ChainSet::standard();
    /// for value in [0, 1, 2] {
    ///     assert!(left.insert(value).is_inserted());
    /// }
    /// for value in [2, 4, 6] {
    ///     assert!(right.insert(value).is_inserted());
    /// }
    ///
    /// let intersection = ChainSet::intersection_of(&[&left, &right]).unwrap();
    /// let elements: Vec<i32> = intersection.iter().copied().collect();
    /// assert_eq!(elements, vec![2]);
    /// ```
    pub fn intersection_of(operands: &[&Self]) -> Result<Self, SetError> {
        let first = Self::leading_operand(operands, 2)?;
        first.ops().require_copier()?;

        let mut result = Self::new(first.ops().clone());
        for element in first.iter() {
            if !operands[1..].iter().all(|set| set.contains(element)) {
                continue;
            }
            let copy = result.ops().copy_element(element)?;
            let insertion = result.insert(copy);
            debug_assert!(insertion.is_inserted());
        }
        Ok(result)
    }

    /// Builds the difference `self − subtrahend`: every element of `self`
    /// not a member of `subtrahend`, in `self`'s insertion order.
    ///
    /// The result inherits `self`'s bundle; membership in the subtrahend is
    /// decided by the subtrahend's own matcher.
    ///
    /// # Errors
    ///
    /// - [`SetError::CopyUnavailable`] if `self`'s bundle has no copier.
    /// - [`SetError::AllocationFailure`] if the copier fails; the partial
    ///   result is torn down first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut left: ChainSet<i32> = ChainSet::standard();
    /// let mut right: ChainSet<i32> = ChainSet::standard();
    /// for value in [0, 1, 2] {
    ///     assert!(left.insert(value).is_inserted());
    /// }
    /// for value in [2, 4, 6] {
    ///     assert!(right.insert(value).is_inserted());
    /// }
    ///
    /// let difference = left.difference(&right).unwrap();
    /// let elements: Vec<i32> = difference.iter().copied().collect();
    /// assert_eq!(elements, vec![0, 1]);
    /// ```
    pub fn difference(&self, subtrahend: &Self) -> Result<Self, SetError> {
        self.ops().require_copier()?;

        let mut result = Self::new(self.ops().clone());
        for element in self.iter() {
            if subtrahend.contains(element) {
                continue;
            }
            let copy = result.ops().copy_element(element)?;
            let insertion = result.insert(copy);
            debug_assert!(insertion.is_inserted());
        }
        Ok(result)
    }

    /// Returns `true` if every element of `self` is a member of `other`.
    ///
    /// An empty `self` against a non-empty `other` is vacuously a subset
    /// through a dedicated early return; empty against empty falls through
    /// to the general scan, which is vacuously `true` as well.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let empty: ChainSet<i32> = ChainSet::standard();
    /// let mut other: ChainSet<i32> = ChainSet::standard();
    /// assert!(other.insert(1).is_inserted());
    ///
    /// assert!(empty.is_subset(&other));
    /// assert!(!other.is_subset(&empty));
    /// ```
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        if self.is_empty() && !other.is_empty() {
            return true;
        }
        self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if all operands hold exactly the same members.
    ///
    /// Fewer than two operands compare as `false`: there is no meaningful
    /// equality with a single set. Each operand's size is checked against
    /// the first's before any membership probe, short-circuiting on the
    /// first mismatch; membership of the first operand's elements is then
    /// decided by each other operand's own matcher.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut left: ChainSet<i32> = ChainSet::standard();
    /// let mut right: ChainSet<i32> = ChainSet::standard();
    /// for value in [1, 2] {
    ///     assert!(left.insert(value).is_inserted());
    ///     assert!(right.insert(3 - value).is_inserted());
    /// }
    ///
    /// // Same members, different insertion order.
    /// assert!(ChainSet::are_equal(&[&left, &right]));
    /// assert!(!ChainSet::are_equal(&[&left]));
    /// ```
    #[must_use]
    pub fn are_equal(operands: &[&Self]) -> bool {
        if operands.len() < 2 {
            return false;
        }
        let first = operands[0];
        operands[1..].iter().all(|other| {
            other.len() == first.len()
                && first.iter().all(|element| other.contains(element))
        })
    }

    /// Builds a new set with the same bundle, containing independently-owned
    /// copies of every element in insertion order.
    ///
    /// # Errors
    ///
    /// - [`SetError::CopyUnavailable`] if the bundle has no copier, even
    ///   when the set is empty.
    /// - [`SetError::AllocationFailure`] if the copier fails for any
    ///   element; the partial result is torn down first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(1).is_inserted());
    ///
    /// let copy = set.duplicate().unwrap();
    /// assert_eq!(copy, set);
    /// ```
    pub fn duplicate(&self) -> Result<Self, SetError> {
        self.ops().require_copier()?;

        let mut result = Self::new(self.ops().clone());
        for element in self.iter() {
            let copy = result.ops().copy_element(element)?;
            let insertion = result.insert(copy);
            debug_assert!(insertion.is_inserted());
        }
        Ok(result)
    }

    /// Validates operand arity and returns the first operand.
    ///
    /// An empty slice is an absent input (`InvalidArgument`); a non-empty
    /// slice below `minimum` violates the operation's precondition.
    fn leading_operand<'a>(
        operands: &[&'a Self],
        minimum: usize,
    ) -> Result<&'a Self, SetError> {
        match operands.first().copied() {
            None => Err(SetError::InvalidArgument),
            Some(_) if operands.len() < minimum => Err(SetError::PreconditionViolated),
            Some(first) => Ok(first),
        }
    }
}

/// Set equality in the two-operand form of [`ChainSet::are_equal`]: equal
/// sizes and every element of `self` a member of `other` by `other`'s
/// matcher. Insertion order does not participate.
impl<T> PartialEq for ChainSet<T>
where
    T: 'static,
{
    fn eq(&self, other: &Self) -> bool {
        Self::are_equal(&[self, other])
    }
}

// =============================================================================
// Tests
// =============================================================================
