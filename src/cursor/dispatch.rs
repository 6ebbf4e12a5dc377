use super::category::{Bidirectional, Category, CategoryKind, Forward, Input, RandomAccess};
use super::cursor::{BidirectionalCursor, Categorized, Cursor, ForwardCursor, RandomAccessCursor};
use crate::traits::{Probe, TriviallyCopyable};

/// The per-category implementations of the cursor algorithms. Each category tag implements this
/// for the cursors that declare it, and the free functions ([`distance`], [`advance`], [`measure`],
/// [`copy`]) forward to `C::Category`'s implementation, so the strategy is fixed at compile time.
pub trait Walk<C: Cursor>: Category {
    /// See [`distance`].
    fn distance(first: C, last: &C) -> usize;

    /// See [`advance`].
    fn advance(cursor: &mut C, n: isize);

    /// See [`measure`].
    fn measure(first: &C, last: &C) -> Option<usize>;

    /// See [`copy`].
    fn copy<'a, T>(mut first: C, last: &C, dest: &mut [T]) -> usize
    where
        C: Cursor<Item = &'a T>,
        T: Clone + 'a,
    {
        let mut count = 0;
        while first != *last {
            dest[count].clone_from(first.get());
            first.step();
            count += 1;
        }
        count
    }
}

fn walk_forwards<C: Cursor>(mut first: C, last: &C) -> usize {
    let mut count = 0;
    while first != *last {
        first.step();
        count += 1;
    }
    count
}

fn step_forwards<C: Cursor>(cursor: &mut C, n: isize) {
    assert!(n >= 0, "Can't move a {} cursor backwards!", C::Category::KIND);
    for _ in 0..n {
        cursor.step();
    }
}

impl<C: Cursor<Category = Input>> Walk<C> for Input {
    fn distance(first: C, last: &C) -> usize {
        walk_forwards(first, last)
    }

    fn advance(cursor: &mut C, n: isize) {
        step_forwards(cursor, n)
    }

    fn measure(_first: &C, _last: &C) -> Option<usize> {
        // Counting would consume the only pass.
        None
    }
}

impl<C: ForwardCursor<Category = Forward>> Walk<C> for Forward {
    fn distance(first: C, last: &C) -> usize {
        walk_forwards(first, last)
    }

    fn advance(cursor: &mut C, n: isize) {
        step_forwards(cursor, n)
    }

    fn measure(first: &C, last: &C) -> Option<usize> {
        Some(walk_forwards(first.clone(), last))
    }
}

impl<C: BidirectionalCursor<Category = Bidirectional>> Walk<C> for Bidirectional {
    fn distance(first: C, last: &C) -> usize {
        walk_forwards(first, last)
    }

    fn advance(cursor: &mut C, n: isize) {
        if n >= 0 {
            for _ in 0..n {
                cursor.step();
            }
        } else {
            for _ in 0..n.unsigned_abs() {
                cursor.step_back();
            }
        }
    }

    fn measure(first: &C, last: &C) -> Option<usize> {
        Some(walk_forwards(first.clone(), last))
    }
}

impl<C: RandomAccessCursor<Category = RandomAccess>> Walk<C> for RandomAccess {
    fn distance(first: C, last: &C) -> usize {
        let offset = last.offset_from(&first);
        assert!(offset >= 0, "The end of a range must be reachable from its start!");
        offset as usize
    }

    fn advance(cursor: &mut C, n: isize) {
        cursor.jump(n)
    }

    fn measure(first: &C, last: &C) -> Option<usize> {
        Some(<Self as Walk<C>>::distance(first.clone(), last))
    }

    fn copy<'a, T>(mut first: C, last: &C, dest: &mut [T]) -> usize
    where
        C: Cursor<Item = &'a T>,
        T: Clone + 'a,
    {
        // The count is known up front, so the loop compares an integer rather than two cursors.
        let count = <Self as Walk<C>>::distance(first.clone(), last);
        for slot in &mut dest[..count] {
            slot.clone_from(first.get());
            first.step();
        }
        count
    }
}

/// Returns the number of steps from `first` to `last`. Constant time for random access cursors and
/// a linear walk for everything else.
///
/// # Panics
/// Panics if `last` is behind `first` for a random access cursor. For other categories, `last`
/// must be reachable from `first` or this never returns.
///
/// # Examples
/// ```
/// # use raw_vector::cursor::{self, SliceCursor};
/// let data = [1, 2, 3, 4];
/// let (first, last) = SliceCursor::range(&data);
/// assert_eq!(cursor::distance(first, &last), 4);
/// ```
pub fn distance<C>(first: C, last: &C) -> usize
where
    C: Cursor,
    C::Category: Walk<C>,
{
    <C::Category as Walk<C>>::distance(first, last)
}

/// Moves `cursor` by `n` positions: a single jump for random access cursors, stepping in either
/// direction for bidirectional cursors and stepping forwards for everything else.
///
/// # Panics
/// Panics if `n` is negative and the cursor can't move backwards.
pub fn advance<C>(cursor: &mut C, n: isize)
where
    C: Cursor,
    C::Category: Walk<C>,
{
    <C::Category as Walk<C>>::advance(cursor, n)
}

/// Returns the length of `[first, last)` if it can be found without consuming the range, which is
/// the case for every multi-pass cursor. Single-pass cursors return [`None`].
pub fn measure<C>(first: &C, last: &C) -> Option<usize>
where
    C: Cursor,
    C::Category: Walk<C>,
{
    <C::Category as Walk<C>>::measure(first, last)
}

/// Assigns the values in `[first, last)` over the already initialized elements at the start of
/// `dest`, returning how many were written.
///
/// This always clones element by element, even for a random access range of [`TriviallyCopyable`]
/// values, since picking an implementation from a trait bound that the caller doesn't state would
/// need specialization. Callers that know their values are trivially copyable should use
/// [`copy_trivial`], which does a single block copy.
///
/// # Panics
/// Panics if `dest` is shorter than the source range.
pub fn copy<'a, T, C>(first: C, last: &C, dest: &mut [T]) -> usize
where
    T: Clone + 'a,
    C: Cursor<Item = &'a T>,
    C::Category: Walk<C>,
{
    <C::Category as Walk<C>>::copy(first, last, dest)
}

/// Block copies `src` over the start of `dest`, returning how many elements were written. This is
/// the strategy for contiguous sources of [`TriviallyCopyable`] values.
///
/// # Panics
/// Panics if `dest` is shorter than `src`.
///
/// # Examples
/// ```
/// # use raw_vector::cursor;
/// let mut dest = [0_u8; 4];
/// assert_eq!(cursor::copy_trivial(&[1, 2, 3], &mut dest), 3);
/// assert_eq!(dest, [1, 2, 3, 0]);
/// ```
pub fn copy_trivial<T: TriviallyCopyable>(src: &[T], dest: &mut [T]) -> usize {
    dest[..src.len()].copy_from_slice(src);
    src.len()
}

#[doc(hidden)]
pub trait DeclaredCategory {
    fn declared_category(&self) -> Option<CategoryKind>;
}

impl<T: Categorized> DeclaredCategory for Probe<T> {
    fn declared_category(&self) -> Option<CategoryKind> {
        Some(<T::Category as Category>::KIND)
    }
}

#[doc(hidden)]
pub trait UndeclaredCategory {
    fn declared_category(&self) -> Option<CategoryKind> {
        None
    }
}

impl<T: ?Sized> UndeclaredCategory for &Probe<T> {}

/// Evaluates to the [`CategoryKind`] declared by a type, or [`None`] if it doesn't declare one.
/// Probing a type without a category isn't an error.
///
/// # Examples
/// ```
/// # use raw_vector::category_of;
/// # use raw_vector::cursor::{CategoryKind, SliceCursor};
/// assert_eq!(category_of!(SliceCursor<'static, u8>), Some(CategoryKind::RandomAccess));
/// assert_eq!(category_of!(String), None);
/// ```
#[macro_export]
macro_rules! category_of {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::cursor::{DeclaredCategory as _, UndeclaredCategory as _};
        (&$crate::traits::Probe::<$t>::new()).declared_category()
    }};
}
