use std::marker::PhantomData;
use std::mem;

/// Facts about how values of a type behave in raw memory, resolved at compile time for every type.
///
/// Algorithms branch on these constants. Because they are associated consts, the untaken branch is
/// removed entirely, so for example destroying a range of a trivially destructible type generates no
/// code at all.
pub trait Capabilities: Sized {
    /// Dropping a value has no effect beyond releasing its bytes.
    const TRIVIALLY_DESTRUCTIBLE: bool = is_trivially_destructible::<Self>();
    /// Moving a value is a bitwise copy which can't fail. This holds for every Rust type.
    const TRIVIALLY_MOVABLE: bool = is_trivially_movable::<Self>();
    /// Values occupy no memory, so storage for them never needs to be allocated.
    const ZERO_SIZED: bool = mem::size_of::<Self>() == 0;
}

impl<T> Capabilities for T {}

/// Types whose duplication is a plain bit copy. Code bounded by this trait may replace clone loops
/// with a single block copy.
pub trait TriviallyCopyable: Copy {}

impl<T: Copy> TriviallyCopyable for T {}

/// Types which can be constructed without arguments.
pub trait DefaultConstructible: Default {}

impl<T: Default> DefaultConstructible for T {}

/// Types which can be constructed from a reference to another value of the same type.
pub trait CopyConstructible: Clone {}

impl<T: Clone> CopyConstructible for T {}

/// Returns true if dropping a `T` does nothing.
pub const fn is_trivially_destructible<T>() -> bool {
    !mem::needs_drop::<T>()
}

/// Returns true if a `T` can be relocated with a bitwise copy. Always true in Rust, where every
/// move is a `memcpy` that can't fail.
pub const fn is_trivially_movable<T>() -> bool {
    true
}

/// A zero-sized handle used to ask whether a concrete type implements a trait without requiring
/// that it does.
///
/// Each capability gets a pair of traits: one implemented for `Probe<T>` when `T` has the
/// capability, and a fallback implemented for `&Probe<T>` for every `T`. Method resolution on
/// `(&Probe::<T>::new())` tries the receiver `&Probe<T>` before auto-referencing, so the specific
/// implementation wins whenever it applies and the fallback answers otherwise. This only gives a
/// meaningful answer for concrete types; inside generic code without the relevant bound the
/// fallback is always chosen.
pub struct Probe<T: ?Sized>(PhantomData<fn() -> *const T>);

impl<T: ?Sized> Probe<T> {
    pub const fn new() -> Probe<T> {
        Probe(PhantomData)
    }
}

impl<T: ?Sized> Default for Probe<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[doc(hidden)]
pub trait CopyProbe {
    fn trivially_copyable(&self) -> bool {
        true
    }
}

impl<T: Copy> CopyProbe for Probe<T> {}

#[doc(hidden)]
pub trait CopyFallback {
    fn trivially_copyable(&self) -> bool {
        false
    }
}

impl<T: ?Sized> CopyFallback for &Probe<T> {}

#[doc(hidden)]
pub trait DefaultProbe {
    fn default_constructible(&self) -> bool {
        true
    }
}

impl<T: Default> DefaultProbe for Probe<T> {}

#[doc(hidden)]
pub trait DefaultFallback {
    fn default_constructible(&self) -> bool {
        false
    }
}

impl<T: ?Sized> DefaultFallback for &Probe<T> {}

#[doc(hidden)]
pub trait CloneProbe {
    fn copy_constructible(&self) -> bool {
        true
    }
}

impl<T: Clone> CloneProbe for Probe<T> {}

#[doc(hidden)]
pub trait CloneFallback {
    fn copy_constructible(&self) -> bool {
        false
    }
}

impl<T: ?Sized> CloneFallback for &Probe<T> {}

/// Evaluates to `true` if the given type is [`Copy`], and `false` otherwise, without failing to
/// compile for types that aren't.
///
/// # Examples
/// ```
/// # use raw_vector::is_trivially_copyable;
/// assert!(is_trivially_copyable!(u32));
/// assert!(!is_trivially_copyable!(String));
/// ```
#[macro_export]
macro_rules! is_trivially_copyable {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::traits::{CopyFallback as _, CopyProbe as _};
        (&$crate::traits::Probe::<$t>::new()).trivially_copyable()
    }};
}

/// Evaluates to `true` if the given type is [`Default`].
///
/// # Examples
/// ```
/// # use raw_vector::is_default_constructible;
/// assert!(is_default_constructible!(Vec<u8>));
/// assert!(!is_default_constructible!(&'static mut u8));
/// ```
#[macro_export]
macro_rules! is_default_constructible {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::traits::{DefaultFallback as _, DefaultProbe as _};
        (&$crate::traits::Probe::<$t>::new()).default_constructible()
    }};
}

/// Evaluates to `true` if the given type is [`Clone`].
///
/// # Examples
/// ```
/// # use raw_vector::is_copy_constructible;
/// assert!(is_copy_constructible!(String));
/// assert!(!is_copy_constructible!(std::sync::Mutex<u8>));
/// ```
#[macro_export]
macro_rules! is_copy_constructible {
    ($t:ty) => {{
        #[allow(unused_imports)]
        use $crate::traits::{CloneFallback as _, CloneProbe as _};
        (&$crate::traits::Probe::<$t>::new()).copy_constructible()
    }};
}
