use std::cmp;

use crate::util::error::CapacityExceeded;

/// The capacity of the first allocation made for a Vector that grows from nothing, and of the
/// Vectors built by the sized constructors.
pub const MIN_CAP: usize = 16;

/// Extra room added to growth requests close to the maximum capacity, where the usual half-again
/// growth would overshoot.
pub const GROWTH_SLACK: usize = 16;

/// Decides the capacity a Vector of length `len` should grow to in order to hold `additional` more
/// elements, without exceeding `max` elements.
///
/// Growth is geometric: the new capacity is at least one and a half times the old length, which
/// keeps the cost of repeated appends amortized constant. The first allocation takes
/// [`MIN_CAP`] elements unless more are requested. Close to `max`, where half-again would overflow,
/// the exact requirement plus [`GROWTH_SLACK`] is used instead, and only the exact requirement
/// once even that doesn't fit.
///
/// # Errors
/// Returns [`CapacityExceeded`] if `len + additional` is greater than `max`.
///
/// # Examples
/// ```
/// # use raw_vector::collections::contiguous::vector::plan;
/// assert_eq!(plan(0, 1, usize::MAX), Ok(16));
/// assert_eq!(plan(16, 1, usize::MAX), Ok(24));
/// assert_eq!(plan(16, 40, usize::MAX), Ok(56));
/// assert!(plan(10, 5, 12).is_err());
/// ```
pub fn plan(len: usize, additional: usize, max: usize) -> Result<usize, CapacityExceeded> {
    if additional > max || len > max - additional {
        return Err(CapacityExceeded {
            len,
            additional,
            max,
        });
    }

    let required = len + additional;

    if len > max - len / 2 {
        if required > max.saturating_sub(GROWTH_SLACK) {
            Ok(required)
        } else {
            Ok(required + GROWTH_SLACK)
        }
    } else if len == 0 {
        Ok(cmp::max(additional, MIN_CAP))
    } else {
        Ok(cmp::max(len + len / 2, required))
    }
}
