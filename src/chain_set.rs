//! Insertion-ordered set over an arena-backed member chain.
//!
//! This module provides [`ChainSet`], a mutable set that stores its members
//! as a singly-linked chain inside an arena of indexed slots. The chain
//! preserves insertion order for traversal, iteration, and every derived
//! set built by the algebra operations; the arena keeps the classic
//! head/tail linked-list layout (O(1) append, O(n) search) without raw
//! pointers.
//!
//! # Overview
//!
//! Membership is defined by the set's [`ElementOps`] bundle rather than a
//! trait bound on `T`: the matcher decides equality, the optional copier
//! powers the copying algebra layer, and the optional releaser is applied to
//! payloads the set tears down itself. Ownership follows the container: an
//! inserted payload belongs to the set until it is handed back by
//! [`remove`](ChainSet::remove) or [`pop_first`](ChainSet::pop_first), or
//! released during [`clear`](ChainSet::clear)/drop.
//!
//! # Time Complexity
//!
//! | Operation    | Complexity                      |
//! |--------------|---------------------------------|
//! | `insert`     | O(n) duplicate check, O(1) link |
//! | `contains`   | O(n)                            |
//! | `remove`     | O(n)                            |
//! | `pop_first`  | O(1)                            |
//! | `traverse`   | O(n)                            |
//! | `iter`       | O(1) + O(n)                     |
//! | `clear`      | O(n)                            |
//! | `len`        | O(1)                            |
//!
//! The linear costs are part of the contract: this container deliberately
//! has no ordering or hashing acceleration, and derived sets must observe
//! the same deterministic insertion-order behavior.
//!
//! # Examples
//!
//! ```rust
//! use chainset::ChainSet;
//!
//! let mut set: ChainSet<i32> = ChainSet::standard();
//! assert!(set.insert(2).is_inserted());
//! assert!(set.insert(0).is_inserted());
//! assert!(set.insert(2).is_duplicate());
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&0));
//!
//! // Insertion order is preserved.
//! let elements: Vec<i32> = set.iter().copied().collect();
//! assert_eq!(elements, vec![2, 0]);
//! ```

use smallvec::SmallVec;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use crate::error::SetError;
use crate::ops::ElementOps;

/// Number of member slots stored inline before the arena spills to the heap.
const INLINE_MEMBERS: usize = 8;

/// One stored payload plus the arena index of the next member in the chain.
struct Member<T> {
    element: T,
    next: Option<usize>,
}

/// An arena slot: either a live member or a vacancy threaded onto the
/// free list for reuse.
enum Slot<T> {
    Occupied(Member<T>),
    Vacant { next_free: Option<usize> },
}

// =============================================================================
// Insertion
// =============================================================================

/// The outcome of [`ChainSet::insert`].
///
/// Ownership is part of the contract: on `Inserted` the payload now belongs
/// to the set; on `Duplicate` the set is unchanged and the rejected payload
/// is handed back inside the variant.
///
/// # Examples
///
/// ```rust
/// use chainset::ChainSet;
///
/// let mut set: ChainSet<String> = ChainSet::standard();
/// assert!(set.insert("a".to_string()).is_inserted());
///
/// let rejected = set.insert("a".to_string()).into_duplicate();
/// assert_eq!(rejected, Some("a".to_string()));
/// ```
#[must_use = "the duplicate case returns ownership of the rejected payload"]
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<T> {
    /// The payload was appended at the tail of the chain.
    Inserted,
    /// A matching member already exists; the payload is returned unchanged.
    Duplicate(T),
}

impl<T> Insertion<T> {
    /// Returns `true` if the payload was inserted.
    #[inline]
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }

    /// Returns `true` if the payload was rejected as a duplicate.
    #[inline]
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }

    /// Recovers the rejected payload, if any.
    #[must_use]
    pub fn into_duplicate(self) -> Option<T> {
        match self {
            Self::Inserted => None,
            Self::Duplicate(element) => Some(element),
        }
    }
}

// =============================================================================
// ChainSet
// =============================================================================

/// A mutable, insertion-ordered set with per-set behavior.
///
/// Equality between elements is decided by the matcher of the
/// [`ElementOps`] bundle supplied at construction, so `T` needs no trait
/// bounds for the container surface. The bundle is bound for the set's whole
/// lifetime and inherited by sets the algebra layer derives from it.
///
/// A `ChainSet` is single-threaded by design (the bundle holds `Rc`
/// closures); it is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```rust
/// use chainset::{ChainSet, ElementOps};
///
/// // Membership modulo 10: 12 and 42 are the same member.
/// let mut set = ChainSet::new(ElementOps::new(|a: &i32, b: &i32| a % 10 == b % 10));
/// assert!(set.insert(12).is_inserted());
/// assert!(set.insert(42).is_duplicate());
/// assert!(set.contains(&2));
/// ```
pub struct ChainSet<T>
where
    T: 'static,
{
    ops: ElementOps<T>,
    slots: SmallVec<[Slot<T>; INLINE_MEMBERS]>,
    free_head: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

static_assertions::assert_not_impl_any!(ChainSet<i32>: Send, Sync);
static_assertions::assert_not_impl_any!(ChainSet<String>: Send, Sync);

impl<T> ChainSet<T>
where
    T: 'static,
{
    /// Creates an empty set with the given behavior bundle.
    ///
    /// The bundle is bound for the lifetime of the set and of every set
    /// derived from it by the algebra operations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::{ChainSet, ElementOps};
    ///
    /// let set: ChainSet<i32> = ChainSet::new(ElementOps::matching());
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new(ops: ElementOps<T>) -> Self {
        Self {
            ops,
            slots: SmallVec::new(),
            free_head: None,
            head: None,
            tail: None,
            length: 0,
        }
    }

    /// Creates an empty set matching by [`PartialEq`] and copying by
    /// [`Clone`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.ops().has_copier());
    /// ```
    #[must_use]
    pub fn standard() -> Self
    where
        T: PartialEq + Clone,
    {
        Self::new(ElementOps::standard())
    }

    /// Returns the number of members.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert_eq!(set.len(), 0);
    /// assert!(set.insert(7).is_inserted());
    /// assert_eq!(set.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the set has no members.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the behavior bundle bound to this set.
    #[inline]
    #[must_use]
    pub const fn ops(&self) -> &ElementOps<T> {
        &self.ops
    }

    /// Returns `true` if a member matches `element`.
    ///
    /// The scan runs in insertion order and stops at the first match, with
    /// the stored element as the matcher's first operand. An empty set
    /// reports `false`; emptiness is not an error here.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(!set.contains(&4));
    /// assert!(set.insert(4).is_inserted());
    /// assert!(set.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.iter()
            .any(|candidate| self.ops.matches(candidate, element))
    }

    /// Appends `element` at the tail unless a matching member exists.
    ///
    /// On success ownership of the payload moves into the set. On a
    /// duplicate the set is unchanged and the payload comes back in
    /// [`Insertion::Duplicate`].
    ///
    /// # Complexity
    ///
    /// O(n) for the duplicate check, O(1) for the append itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(1).is_inserted());
    /// assert!(set.insert(1).is_duplicate());
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> Insertion<T> {
        if self.contains(&element) {
            return Insertion::Duplicate(element);
        }
        let index = self.allocate_slot(Member {
            element,
            next: None,
        });
        match self.tail {
            Some(tail_index) => self.member_mut(tail_index).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.length += 1;
        debug_assert!(
            self.chain_is_consistent(),
            "member chain out of sync after insert"
        );
        Insertion::Inserted
    }

    /// Unlinks the first member matching `element` and returns its payload.
    ///
    /// Ownership of the payload moves back to the caller; the releaser is
    /// deliberately not applied (it only runs during whole-set teardown).
    ///
    /// # Errors
    ///
    /// Returns [`SetError::NotFound`] if no member matches, including when
    /// the set is empty.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::{ChainSet, SetError};
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(3).is_inserted());
    ///
    /// assert_eq!(set.remove(&3), Ok(3));
    /// assert_eq!(set.remove(&3), Err(SetError::NotFound));
    /// ```
    pub fn remove(&mut self, element: &T) -> Result<T, SetError> {
        match self.find_with_previous(element) {
            Some((previous, index)) => Ok(self.unlink(previous, index)),
            None => Err(SetError::NotFound),
        }
    }

    /// Unlinks the head member and returns its payload, or `None` if the
    /// set is empty.
    ///
    /// The head is always the earliest surviving insertion, so repeated
    /// calls drain the set in FIFO order. As with [`remove`](Self::remove),
    /// ownership moves to the caller and the releaser is not applied.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(1).is_inserted());
    /// assert!(set.insert(2).is_inserted());
    ///
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let index = self.head?;
        Some(self.unlink(None, index))
    }

    /// Applies `visitor` to every element in insertion order.
    ///
    /// The set cannot be mutated while the traversal runs; `visitor` only
    /// receives shared references.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::PreconditionViolated`] if the set is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// for value in [10, 20, 30] {
    ///     assert!(set.insert(value).is_inserted());
    /// }
    ///
    /// let mut sum = 0;
    /// set.traverse(|element| sum += element).unwrap();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn traverse<F>(&self, mut visitor: F) -> Result<(), SetError>
    where
        F: FnMut(&T),
    {
        if self.is_empty() {
            return Err(SetError::PreconditionViolated);
        }
        for element in self.iter() {
            visitor(element);
        }
        Ok(())
    }

    /// Tears down every member in chain order, applying the releaser to
    /// each payload, and resets the arena.
    ///
    /// Idempotent: clearing an empty set is a no-op. Dropping the set calls
    /// this automatically.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(1).is_inserted());
    ///
    /// set.clear();
    /// assert!(set.is_empty());
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let mut current = self.head;
        while let Some(index) = current {
            let member = self.release_slot(index);
            current = member.next;
            self.ops.release(member.element);
        }
        self.slots.clear();
        self.free_head = None;
        self.head = None;
        self.tail = None;
        self.length = 0;
    }

    /// Returns a borrowing iterator over the elements in insertion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ChainSet;
    ///
    /// let mut set: ChainSet<i32> = ChainSet::standard();
    /// assert!(set.insert(5).is_inserted());
    /// assert!(set.insert(6).is_inserted());
    ///
    /// let elements: Vec<i32> = set.iter().copied().collect();
    /// assert_eq!(elements, vec![5, 6]);
    /// ```
    pub fn iter(&self) -> ChainSetIterator<'_, T> {
        ChainSetIterator {
            slots: &self.slots,
            current: self.head,
            remaining: self.length,
        }
    }

    // ---- internal arena plumbing ----

    fn member(&self, index: usize) -> &Member<T> {
        match &self.slots[index] {
            Slot::Occupied(member) => member,
            Slot::Vacant { .. } => unreachable!("chain index references a vacant slot"),
        }
    }

    fn member_mut(&mut self, index: usize) -> &mut Member<T> {
        match &mut self.slots[index] {
            Slot::Occupied(member) => member,
            Slot::Vacant { .. } => unreachable!("chain index references a vacant slot"),
        }
    }

    /// Stores `member` in a vacant slot (reusing the free list when it has
    /// one) and returns the slot index.
    fn allocate_slot(&mut self, member: Member<T>) -> usize {
        match self.free_head {
            Some(index) => {
                let next_free = match &self.slots[index] {
                    Slot::Vacant { next_free } => *next_free,
                    Slot::Occupied(_) => unreachable!("free list references an occupied slot"),
                };
                self.free_head = next_free;
                self.slots[index] = Slot::Occupied(member);
                index
            }
            None => {
                self.slots.push(Slot::Occupied(member));
                self.slots.len() - 1
            }
        }
    }

    /// Vacates `index`, threads it onto the free list, and returns the
    /// member that occupied it.
    fn release_slot(&mut self, index: usize) -> Member<T> {
        let vacancy = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[index], vacancy) {
            Slot::Occupied(member) => {
                self.free_head = Some(index);
                member
            }
            Slot::Vacant { .. } => unreachable!("chain index references a vacant slot"),
        }
    }

    /// Finds the first member matching `element`, returning the indices of
    /// its predecessor (if any) and of the member itself.
    fn find_with_previous(&self, element: &T) -> Option<(Option<usize>, usize)> {
        let mut previous = None;
        let mut current = self.head;
        while let Some(index) = current {
            let member = self.member(index);
            if self.ops.matches(&member.element, element) {
                return Some((previous, index));
            }
            previous = Some(index);
            current = member.next;
        }
        None
    }

    /// Unlinks the member at `index`, whose predecessor is `previous`, and
    /// returns its payload. Handles head, tail, interior, and singleton
    /// positions.
    fn unlink(&mut self, previous: Option<usize>, index: usize) -> T {
        let member = self.release_slot(index);
        match previous {
            Some(previous_index) => self.member_mut(previous_index).next = member.next,
            None => self.head = member.next,
        }
        if self.tail == Some(index) {
            self.tail = previous;
        }
        self.length -= 1;
        debug_assert!(
            self.chain_is_consistent(),
            "member chain out of sync after unlink"
        );
        member.element
    }

    /// Walks the chain and checks it against `length`, `head`, and `tail`.
    /// Used from debug assertions after every structural mutation.
    fn chain_is_consistent(&self) -> bool {
        if (self.length == 0) != (self.head.is_none() && self.tail.is_none()) {
            return false;
        }
        let mut reachable = 0;
        let mut previous = None;
        let mut current = self.head;
        while let Some(index) = current {
            match self.slots.get(index) {
                Some(Slot::Occupied(member)) => {
                    reachable += 1;
                    // Bails out on a (buggy) cyclic chain.
                    if reachable > self.length {
                        return false;
                    }
                    previous = Some(index);
                    current = member.next;
                }
                _ => return false,
            }
        }
        reachable == self.length && previous == self.tail
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// A borrowing iterator over the elements of a [`ChainSet`] in insertion
/// order.
pub struct ChainSetIterator<'a, T> {
    slots: &'a [Slot<T>],
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for ChainSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        match &self.slots[index] {
            Slot::Occupied(member) => {
                self.current = member.next;
                self.remaining -= 1;
                Some(&member.element)
            }
            Slot::Vacant { .. } => unreachable!("chain index references a vacant slot"),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for ChainSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for ChainSetIterator<'_, T> {}

/// An owning iterator over the elements of a [`ChainSet`].
///
/// Yields payloads in FIFO order by popping the head; each yielded payload
/// leaves the set unreleased (the caller now owns it). Whatever is not
/// consumed is released by the set's own teardown when the iterator drops.
pub struct ChainSetIntoIterator<T>
where
    T: 'static,
{
    set: ChainSet<T>,
}

impl<T> Iterator for ChainSetIntoIterator<T>
where
    T: 'static,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.set.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.set.len(), Some(self.set.len()))
    }
}

impl<T> ExactSizeIterator for ChainSetIntoIterator<T>
where
    T: 'static,
{
    fn len(&self) -> usize {
        self.set.len()
    }
}

impl<T> FusedIterator for ChainSetIntoIterator<T> where T: 'static {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Drop for ChainSet<T>
where
    T: 'static,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> IntoIterator for ChainSet<T>
where
    T: 'static,
{
    type Item = T;
    type IntoIter = ChainSetIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        ChainSetIntoIterator { set: self }
    }
}

impl<'a, T> IntoIterator for &'a ChainSet<T>
where
    T: 'static,
{
    type Item = &'a T;
    type IntoIter = ChainSetIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for ChainSet<T>
where
    T: fmt::Debug + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T> fmt::Display for ChainSet<T>
where
    T: fmt::Display + 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================
