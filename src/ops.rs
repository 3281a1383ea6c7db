//! Per-set behavior bundle: matcher, copier, and releaser.
//!
//! Every [`ChainSet`](crate::ChainSet) is created with an [`ElementOps`]
//! bundle and keeps it for its whole lifetime. Sets derived by the algebra
//! operations inherit the bundle of their first (left-most) operand. The
//! bundle has three capabilities:
//!
//! - **matcher** (required): the equality predicate that defines membership
//!   and deduplication. It must be deterministic, symmetric, and reflexive.
//! - **copier** (optional): produces an independently-owned copy of an
//!   element, or reports failure. Algebra operations that build a new set
//!   refuse to run without one rather than alias elements across sets.
//! - **releaser** (optional): a release hook the set applies to each payload
//!   it tears down itself (on [`clear`](crate::ChainSet::clear) or drop).
//!   Payloads handed back to the caller by `remove`/`pop_first` are never
//!   passed to it.
//!
//! The closures live behind `Rc`, so cloning a bundle into a derived set is
//! cheap and both sets observe the same behaviors.

use std::fmt;
use std::rc::Rc;

use crate::error::SetError;

/// The matcher/copier/releaser triple bound to a set at construction.
///
/// A bundle cannot exist without a matcher; the other two capabilities are
/// optional and attached builder-style. For element types that already carry
/// the standard traits, [`matching`](Self::matching) and
/// [`standard`](Self::standard) build the common bundles directly.
///
/// # Examples
///
/// ```rust
/// use chainset::ElementOps;
///
/// // Case-insensitive matching over owned strings.
/// let ops: ElementOps<String> =
///     ElementOps::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b))
///         .with_copier(|value: &String| Some(value.clone()));
///
/// assert!(ops.matches(&"Apple".to_string(), &"APPLE".to_string()));
/// assert!(ops.has_copier());
/// assert!(!ops.has_releaser());
/// ```
pub struct ElementOps<T>
where
    T: 'static,
{
    /// The equality predicate. Uses `Rc` so derived sets share it.
    matcher: Rc<dyn Fn(&T, &T) -> bool>,
    copier: Option<Rc<dyn Fn(&T) -> Option<T>>>,
    releaser: Option<Rc<dyn Fn(T)>>,
}

impl<T> ElementOps<T>
where
    T: 'static,
{
    /// Creates a bundle from an equality predicate, with no copier and no
    /// releaser.
    ///
    /// # Arguments
    ///
    /// * `matcher` - The equality predicate defining membership. Must be
    ///   deterministic, symmetric, and reflexive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ElementOps;
    ///
    /// // Match i32 payloads by their value modulo 10.
    /// let ops: ElementOps<i32> = ElementOps::new(|a, b| a % 10 == b % 10);
    /// assert!(ops.matches(&3, &13));
    /// assert!(!ops.matches(&3, &14));
    /// ```
    pub fn new<M>(matcher: M) -> Self
    where
        M: Fn(&T, &T) -> bool + 'static,
    {
        Self {
            matcher: Rc::new(matcher),
            copier: None,
            releaser: None,
        }
    }

    /// Attaches a copier to the bundle.
    ///
    /// The copier must produce a new element that the matcher considers
    /// equal to its input, or return `None` to report failure. Copier
    /// failure surfaces as [`SetError::AllocationFailure`] from the
    /// operation that requested the copy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ElementOps;
    ///
    /// let ops: ElementOps<i32> = ElementOps::new(|a, b| a == b)
    ///     .with_copier(|value| Some(*value));
    /// assert!(ops.has_copier());
    /// ```
    #[must_use]
    pub fn with_copier<C>(mut self, copier: C) -> Self
    where
        C: Fn(&T) -> Option<T> + 'static,
    {
        self.copier = Some(Rc::new(copier));
        self
    }

    /// Attaches a releaser to the bundle.
    ///
    /// The releaser is applied to each payload the owning set tears down
    /// itself. Explicit removal hands payloads back to the caller unreleased.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ElementOps;
    ///
    /// let ops: ElementOps<String> = ElementOps::new(|a: &String, b: &String| a == b)
    ///     .with_releaser(|value: String| drop(value));
    /// assert!(ops.has_releaser());
    /// ```
    #[must_use]
    pub fn with_releaser<R>(mut self, releaser: R) -> Self
    where
        R: Fn(T) + 'static,
    {
        self.releaser = Some(Rc::new(releaser));
        self
    }

    /// Creates a bundle whose matcher is [`PartialEq`], with no copier.
    ///
    /// Sets built from this bundle support the full container surface but
    /// refuse copying algebra with [`SetError::CopyUnavailable`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ElementOps;
    ///
    /// let ops: ElementOps<i32> = ElementOps::matching();
    /// assert!(ops.matches(&7, &7));
    /// assert!(!ops.has_copier());
    /// ```
    #[must_use]
    pub fn matching() -> Self
    where
        T: PartialEq,
    {
        Self::new(|a: &T, b: &T| a == b)
    }

    /// Creates a bundle whose matcher is [`PartialEq`] and whose copier is
    /// [`Clone`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainset::ElementOps;
    ///
    /// let ops: ElementOps<i32> = ElementOps::standard();
    /// assert!(ops.has_copier());
    /// ```
    #[must_use]
    pub fn standard() -> Self
    where
        T: PartialEq + Clone,
    {
        Self::matching().with_copier(|value: &T| Some(value.clone()))
    }

    /// Applies the matcher to two elements.
    #[inline]
    #[must_use]
    pub fn matches(&self, left: &T, right: &T) -> bool {
        (self.matcher)(left, right)
    }

    /// Returns `true` if a copier is configured.
    #[inline]
    #[must_use]
    pub fn has_copier(&self) -> bool {
        self.copier.is_some()
    }

    /// Returns `true` if a releaser is configured.
    #[inline]
    #[must_use]
    pub fn has_releaser(&self) -> bool {
        self.releaser.is_some()
    }

    /// Fails with `CopyUnavailable` unless a copier is configured.
    pub(crate) fn require_copier(&self) -> Result<(), SetError> {
        if self.copier.is_some() {
            Ok(())
        } else {
            Err(SetError::CopyUnavailable)
        }
    }

    /// Produces an independently-owned copy of `element` via the copier.
    pub(crate) fn copy_element(&self, element: &T) -> Result<T, SetError> {
        match &self.copier {
            None => Err(SetError::CopyUnavailable),
            Some(copier) => copier(element).ok_or(SetError::AllocationFailure),
        }
    }

    /// Releases a payload the set is tearing down. Without a releaser the
    /// payload is simply dropped.
    pub(crate) fn release(&self, element: T) {
        if let Some(releaser) = &self.releaser {
            releaser(element);
        }
    }
}

impl<T> Clone for ElementOps<T>
where
    T: 'static,
{
    fn clone(&self) -> Self {
        Self {
            matcher: Rc::clone(&self.matcher),
            copier: self.copier.clone(),
            releaser: self.releaser.clone(),
        }
    }
}

impl<T> fmt::Debug for ElementOps<T>
where
    T: 'static,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ElementOps")
            .field("copier", &self.copier.is_some())
            .field("releaser", &self.releaser.is_some())
            .finish_non_exhaustive()
    }
}
