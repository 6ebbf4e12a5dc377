use std::fmt::Debug;

use derive_more::{Display, IsVariant};

/// A runtime mirror of the category tags, for reporting and for callers that prefer to match once
/// per call rather than dispatch through trait impls.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, IsVariant)]
pub enum CategoryKind {
    Input,
    Output,
    Forward,
    Bidirectional,
    RandomAccess,
}

impl CategoryKind {
    /// Returns true if a cursor of category `self` may be used wherever `other` is required.
    ///
    /// # Examples
    /// ```
    /// # use raw_vector::cursor::CategoryKind;
    /// assert!(CategoryKind::RandomAccess.refines(CategoryKind::Input));
    /// assert!(!CategoryKind::Forward.refines(CategoryKind::Bidirectional));
    /// assert!(!CategoryKind::Output.refines(CategoryKind::Input));
    /// ```
    pub const fn refines(self, other: CategoryKind) -> bool {
        match (self, other) {
            (CategoryKind::Output, CategoryKind::Output) => true,
            (CategoryKind::Output, _) | (_, CategoryKind::Output) => false,
            _ => self.rank() >= other.rank(),
        }
    }

    const fn rank(self) -> u8 {
        match self {
            CategoryKind::Input | CategoryKind::Output => 0,
            CategoryKind::Forward => 1,
            CategoryKind::Bidirectional => 2,
            CategoryKind::RandomAccess => 3,
        }
    }
}

/// A zero-sized marker naming what a cursor is able to do. Algorithms are implemented per tag and
/// selected through the cursor's associated `Category` type, so the choice costs nothing at
/// runtime.
pub trait Category: Debug + Default + Copy + Eq + 'static {
    const KIND: CategoryKind;
}

/// Single pass, read only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Input;

/// Single pass, write only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Output;

/// Multi pass, moves forwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Forward;

/// Multi pass, moves both ways.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bidirectional;

/// Moves by any offset in constant time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomAccess;

impl Category for Input {
    const KIND: CategoryKind = CategoryKind::Input;
}

impl Category for Output {
    const KIND: CategoryKind = CategoryKind::Output;
}

impl Category for Forward {
    const KIND: CategoryKind = CategoryKind::Forward;
}

impl Category for Bidirectional {
    const KIND: CategoryKind = CategoryKind::Bidirectional;
}

impl Category for RandomAccess {
    const KIND: CategoryKind = CategoryKind::RandomAccess;
}

/// The capability lattice: `A: Refines<B>` holds when a cursor of category `A` can stand in for
/// one of category `B`. Every category refines itself.
pub trait Refines<C: Category>: Category {}

impl Refines<Input> for Input {}
impl Refines<Input> for Forward {}
impl Refines<Input> for Bidirectional {}
impl Refines<Input> for RandomAccess {}

impl Refines<Forward> for Forward {}
impl Refines<Forward> for Bidirectional {}
impl Refines<Forward> for RandomAccess {}

impl Refines<Bidirectional> for Bidirectional {}
impl Refines<Bidirectional> for RandomAccess {}

impl Refines<RandomAccess> for RandomAccess {}

impl Refines<Output> for Output {}

impl<C: Category> From<C> for CategoryKind {
    fn from(_: C) -> Self {
        C::KIND
    }
}
