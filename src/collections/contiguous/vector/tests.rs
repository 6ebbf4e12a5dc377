#![cfg(test)]

use std::cell::Cell;
use std::hash::{BuildHasher, RandomState};
use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;

use super::*;
use crate::cursor::{self, IterCursor, OutputCursor, SliceCursor};
use crate::util::error::{CapacityExceeded, ConstructError};
use crate::util::panic::assert_panics;
use crate::util::tracked::{CloneBudget, CountedDrop, PanicOnClone, ZeroSizedType};

fn budgeted(values: usize, clones: usize) -> (std::rc::Rc<CloneBudget>, Vector<PanicOnClone>) {
    let budget = CloneBudget::new(clones);
    let vec = (0..values).map(|i| PanicOnClone::new(i, &budget)).collect();
    (budget, vec)
}

fn values(vec: &Vector<PanicOnClone>) -> Vector<usize> {
    vec.iter().map(|v| v.value).collect()
}

#[test]
fn test_lazy_allocation() {
    let mut vec: Vector<u32> = Vector::new();
    assert!(vec.storage().is_unallocated());
    assert_eq!(vec.cap(), 0);
    assert_eq!(&*vec, &[] as &[u32], "An unallocated Vector should read as empty.");

    vec.shrink_to_fit();
    assert!(vec.storage().is_unallocated());

    let moved = vec;
    assert_eq!(moved.len(), 0, "An unallocated Vector should be movable.");

    let vec: Vector<u32> = Vector::with_default_cap();
    assert!(vec.storage().is_allocated());
    assert_eq!(vec.cap(), 16);

    assert!(Vector::<u32>::with_cap(0).storage().is_unallocated());
    assert!(Vector::<u32>::default().storage().is_unallocated());
}

#[test]
fn test_growth_sequence() {
    let mut vec = Vector::new();
    let mut caps = Vector::new();

    for i in 0..17 {
        vec.push(i);
        if caps.last() != Some(&vec.cap()) {
            caps.push(vec.cap());
        }
    }

    assert_eq!(vec.len(), 17);
    assert_eq!(vec.cap(), 24);
    assert_eq!(&*caps, &[16, 24], "Should allocate once, then reallocate exactly once.");
    assert!(vec.iter().copied().eq(0..17));
}

#[test]
fn test_reallocations_are_logarithmic() {
    let mut vec = Vector::new();
    let mut reallocations = 0;
    let mut moved = 0;
    let mut cap = vec.cap();

    for i in 0..10_000 {
        let len = vec.len();
        vec.push(i);
        if vec.cap() != cap {
            reallocations += 1;
            // Every element present before the push was relocated into the new block.
            moved += len;
            cap = vec.cap();
        }
    }

    assert!(reallocations <= 20, "Got {} reallocations for 10000 pushes.", reallocations);
    assert!(moved <= 3 * 10_000, "Relocated {} elements for 10000 pushes.", moved);
}

#[test]
fn test_plan() {
    const MAX: usize = usize::MAX;

    assert_eq!(plan(16, 1, MAX), Ok(24));
    assert_eq!(plan(0, 1, MAX), Ok(MIN_CAP));
    assert_eq!(plan(0, 40, MAX), Ok(40));
    assert_eq!(plan(100, 1, MAX), Ok(150));
    assert_eq!(plan(100, 80, MAX), Ok(180));

    assert_eq!(plan(70, 1, 100), Ok(71 + GROWTH_SLACK), "Near the maximum, growth should be slack.");
    assert_eq!(plan(70, 20, 100), Ok(90), "Growth past max - 16 should be exact.");
    assert_eq!(plan(90, 1, 100), Ok(91));
    assert_eq!(plan(100, 0, 100), Ok(100));

    assert_eq!(plan(95, 6, 100), Err(CapacityExceeded { len: 95, additional: 6, max: 100 }));
    assert!(plan(0, 101, 100).is_err());
    assert!(plan(MAX, 1, MAX).is_err());
}

#[test]
fn test_push_pop() {
    let mut vec = Vector::new();
    for i in 0..5 {
        vec.push(i.to_string());
    }
    vec.push_with(|| String::from("built"));

    assert_eq!(vec.pop().as_deref(), Some("built"));
    assert_eq!(vec.pop().as_deref(), Some("4"));
    assert_eq!(vec.len(), 4);

    let mut empty: Vector<String> = Vector::new();
    assert_eq!(empty.pop(), None);
}

#[test]
fn test_push_with_failure_keeps_state() {
    let counter = CountedDrop::new(0);
    let mut vec = Vector::with_cap(3);
    for _ in 0..3 {
        vec.push(counter.clone());
    }
    let (ptr, cap) = (vec.as_ptr(), vec.cap());

    assert_panics!({
        vec.push_with(|| panic!("constructor failed"));
    });
    assert_eq!(vec.len(), 3);
    assert_eq!(vec.cap(), cap, "A failed emplace shouldn't change the capacity.");
    assert_eq!(vec.as_ptr(), ptr);
    assert_eq!(*counter.borrow(), 0, "No element should have been dropped.");

    let res: Result<(), ConstructError<&str>> = vec.try_push_with(|| Err("nope"));
    assert_eq!(res, Err(ConstructError::Element("nope")));
    assert_eq!((vec.len(), vec.cap(), vec.as_ptr()), (3, cap, ptr));

    vec.try_push_with(|| Ok::<_, ()>(counter.clone())).unwrap();
    assert_eq!(vec.len(), 4);

    drop(vec);
    assert_eq!(*counter.borrow(), 4);
}

#[test]
fn test_capacity_exceeded() {
    let mut vec: Vector<u64> = Vector::new();
    let err = vec.try_reserve(usize::MAX).unwrap_err();
    assert!(err.is_capacity_exceeded());
    assert!(vec.storage().is_unallocated(), "A failed reservation shouldn't allocate.");

    let err = Vector::<u64>::try_with_cap(usize::MAX).unwrap_err();
    assert!(err.is_capacity_exceeded());

    assert_panics!({
        let mut vec: Vector<u64> = Vector::new();
        vec.reserve(usize::MAX);
    });
}

#[test]
fn test_insert() {
    let mut vec = Vector::from([1, 2, 3]);
    vec.insert(0, 0);
    vec.insert(4, 4);
    vec.insert_with(2, || 10);
    assert_eq!(&*vec, &[0, 1, 10, 2, 3, 4]);

    vec.insert_n(1, 2, &7);
    assert_eq!(&*vec, &[0, 7, 7, 1, 10, 2, 3, 4]);

    vec.insert_slice(8, &[8, 9]);
    assert_eq!(&*vec, &[0, 7, 7, 1, 10, 2, 3, 4, 8, 9]);

    assert_panics!({
        let mut vec = Vector::from([1]);
        vec.insert(2, 0);
    });
    assert_panics!({
        let mut vec: Vector<i32> = Vector::new();
        vec.insert_n(1, 3, &0);
    });
}

#[test]
fn test_insert_growth() {
    let mut vec = Vector::from([0; 16]);
    assert_eq!(vec.cap(), 16);

    vec.insert_slice(8, &[1; 20]);
    assert_eq!(vec.len(), 36);
    assert_eq!(vec.cap(), 36, "Growth should cover the whole insertion.");
    assert!(vec[..8].iter().all(|v| *v == 0));
    assert!(vec[8..28].iter().all(|v| *v == 1));
    assert!(vec[28..].iter().all(|v| *v == 0));

    let mut vec = Vector::from([0; 16]);
    vec.insert(3, 5);
    assert_eq!(vec.cap(), 24);
    assert_eq!(vec[3], 5);
}

#[test]
fn test_insert_rollback_with_spare_cap() {
    let (budget, mut vec) = budgeted(4, 2);
    vec.reserve(10);
    let (ptr, cap) = (vec.as_ptr(), vec.cap());

    assert_panics!({
        let value = PanicOnClone::new(9, &budget);
        vec.insert_n(1, 5, &value);
    });
    assert_eq!(&*values(&vec), &[0, 1, 2, 3], "Elements should be unchanged in order.");
    assert_eq!((vec.as_ptr(), vec.cap()), (ptr, cap));
    assert_eq!(budget.live.get(), 4, "Every clone made should have been dropped.");
}

#[test]
fn test_insert_rollback_on_growth() {
    let (budget, mut vec) = budgeted(16, 3);
    let (ptr, cap) = (vec.as_ptr(), vec.cap());

    assert_panics!({
        let extra: Vector<_> = (0..4).map(|i| PanicOnClone::new(i, &budget)).collect();
        vec.insert_slice(3, &extra);
    });

    assert_eq!(vec.as_ptr(), ptr, "The original window should still be in place.");
    assert_eq!(vec.cap(), cap);
    assert!(values(&vec).iter().copied().eq(0..16));
    assert_eq!(budget.live.get(), 16, "The partial new window should have been destroyed.");
}

#[test]
fn test_insert_cursors() {
    let mut vec = Vector::from([1, 5]);
    let src = [2, 3, 4];

    let (first, last) = SliceCursor::range(&src);
    vec.insert_cursors(1, first, last);
    assert_eq!(&*vec, &[1, 2, 3, 4, 5]);

    vec.insert_cursors(0, IterCursor::new(src.iter()), IterCursor::end());
    assert_eq!(&*vec, &[2, 3, 4, 1, 2, 3, 4, 5]);

    let (first, last) = SliceCursor::range(&src[..2]);
    vec.insert_cursors(8, cursor::Reverse::new(last), cursor::Reverse::new(first));
    assert_eq!(&*vec, &[2, 3, 4, 1, 2, 3, 4, 5, 3, 2]);

    let (budget, mut vec) = budgeted(3, 1);
    let src = [PanicOnClone::new(7, &budget), PanicOnClone::new(8, &budget)];
    assert_panics!({
        vec.insert_cursors(1, IterCursor::new(src.iter()), IterCursor::end());
    });
    assert_eq!(&*values(&vec), &[0, 1, 2], "A failed single pass insertion should change nothing.");
    assert_eq!(budget.live.get(), 5);
}

#[test]
fn test_remove_erase() {
    let mut vec = Vector::from([1, 2, 3, 4, 5]);
    let (ptr, cap) = (vec.as_ptr(), vec.cap());

    vec.erase(2..3);
    assert_eq!(&*vec, &[1, 2, 4, 5]);
    assert_eq!((vec.as_ptr(), vec.cap()), (ptr, cap), "Erasing shouldn't reallocate.");

    assert_eq!(vec.remove(0), 1);
    assert_eq!(&*vec, &[2, 4, 5]);

    vec.erase(1..1);
    assert_eq!(&*vec, &[2, 4, 5]);
    vec.erase(1..);
    assert_eq!(&*vec, &[2]);

    assert_panics!({
        let mut vec = Vector::from([1, 2, 3]);
        vec.erase(2..4);
    });
    assert_panics!({
        let mut vec = Vector::from([1, 2, 3]);
        #[allow(clippy::reversed_empty_ranges)]
        vec.erase(2..1);
    });
    assert_panics!({
        let mut vec = Vector::from([1, 2, 3]);
        vec.remove(3);
    });
}

#[test]
fn test_erase_reversed_range_message() {
    let mut vec = Vector::from([1, 2, 3, 4, 5]);
    #[allow(clippy::reversed_empty_ranges)]
    let err = panic::catch_unwind(AssertUnwindSafe(|| vec.erase(3..1))).unwrap_err();
    let msg = err.downcast_ref::<String>().unwrap();

    assert!(msg.contains("start 3"), "{msg}");
    assert!(msg.contains("end 1"), "{msg}");
    assert!(msg.contains("length 5"), "The real length should be reported: {msg}");
    assert_eq!(&*vec, &[1, 2, 3, 4, 5]);
}

#[test]
fn test_erase_drops() {
    let counter = CountedDrop::new(0);
    let mut vec: Vector<_> = (0..6).map(|_| counter.clone()).collect();

    vec.erase(1..4);
    assert_eq!(*counter.borrow(), 3);
    assert_eq!(vec.len(), 3);

    vec.truncate(1);
    assert_eq!(*counter.borrow(), 5);
    vec.truncate(10);
    assert_eq!(vec.len(), 1);

    vec.clear();
    assert_eq!(*counter.borrow(), 6);
    assert!(vec.storage().is_allocated(), "Clearing should keep the block.");
}

#[derive(Debug)]
struct Bomb {
    id: u32,
    armed: bool,
    dropped: std::rc::Rc<Cell<u32>>,
}

impl Drop for Bomb {
    fn drop(&mut self) {
        self.dropped.set(self.dropped.get() + 1);
        if self.armed {
            panic!("bomb {} went off", self.id);
        }
    }
}

#[test]
fn test_erase_with_panicking_drop() {
    let dropped = std::rc::Rc::new(Cell::new(0));
    let mut vec: Vector<_> = (0..6)
        .map(|id| Bomb {
            id,
            armed: id == 2,
            dropped: dropped.clone(),
        })
        .collect();

    let res = panic::catch_unwind(AssertUnwindSafe(|| vec.erase(1..4)));
    assert!(res.is_err());
    assert_eq!(dropped.get(), 3, "The rest of the range should still be dropped.");

    let ids: Vector<_> = vec.iter().map(|bomb| bomb.id).collect();
    assert_eq!(&*ids, &[0, 4, 5], "The tail should still be moved forward.");
}

#[test]
fn test_replace_swap() {
    let mut a = Vector::from([1, 2, 3]);
    let mut b = Vector::from_elem(20, &0);

    assert_eq!(a.replace(1, 20), 2);
    assert_eq!(&*a, &[1, 20, 3]);

    a.swap(&mut b);
    assert_eq!(a.len(), 20);
    assert_eq!(&*b, &[1, 20, 3]);
    assert_eq!(b.cap(), 16);

    assert_panics!({
        let mut vec = Vector::from([1]);
        vec.replace(1, 0);
    });
}

#[test]
fn test_reserve_shrink() {
    let mut vec = Vector::from([1, 2, 3]);
    assert_eq!(vec.cap(), 16);

    vec.reserve(10);
    assert_eq!(vec.cap(), 16, "Reserving within capacity shouldn't reallocate.");
    vec.reserve(20);
    assert_eq!(vec.cap(), 23, "Reservations should be exact.");

    vec.shrink_to_fit();
    assert_eq!(vec.cap(), 3);
    assert_eq!(&*vec, &[1, 2, 3]);

    vec.clear();
    vec.shrink_to_fit();
    assert!(vec.storage().is_unallocated());
}

#[test]
fn test_resize() {
    let mut vec: Vector<u8> = Vector::new();
    vec.resize(3);
    assert_eq!(&*vec, &[0, 0, 0]);
    assert_eq!(vec.cap(), 16);

    vec.resize_value(5, &9);
    assert_eq!(&*vec, &[0, 0, 0, 9, 9]);

    let mut next = 0;
    vec.resize_with(7, || {
        next += 1;
        next
    });
    assert_eq!(&*vec, &[0, 0, 0, 9, 9, 1, 2]);

    vec.resize(2);
    assert_eq!(&*vec, &[0, 0]);

    let res = vec.try_resize_with(10, || "x".parse::<u8>());
    assert!(res.is_err_and(|err| err.is_element()));
    assert_eq!(&*vec, &[0, 0], "A failed resize should change nothing.");

    let mut calls = 0;
    let res = vec.try_resize_with(4, || {
        calls += 1;
        Ok::<_, ()>(calls)
    });
    assert_eq!(res, Ok(()));
    assert_eq!(&*vec, &[0, 0, 1, 2]);
}

#[test]
fn test_assign_fill() {
    let mut vec = Vector::from_slice(&['a'; 8]);
    let cap = vec.cap();

    vec.assign_fill(5, &'x');
    assert_eq!(&*vec, &['x'; 5]);
    assert_eq!(vec.cap(), cap);

    vec.assign_fill(12, &'y');
    assert_eq!(&*vec, &['y'; 12]);
    assert_eq!(vec.cap(), cap, "Assignment within capacity should reuse the block.");

    vec.assign_fill(40, &'z');
    assert_eq!(vec.len(), 40);
    assert_eq!(vec.cap(), 40);

    let counter = CountedDrop::new(0);
    let mut vec = Vector::from_elem(4, &counter);
    let elem = CountedDrop::new(100);
    vec.assign_fill(2, &elem);
    assert_eq!(*counter.borrow(), 4, "Both assigned and erased elements should drop the old values.");
    assert!(vec.iter().all(|v| *v.borrow() == 100));
}

#[test]
fn test_assign_fill_failure_keeps_storage() {
    let (budget, mut vec) = budgeted(4, 2);
    let ptr = vec.as_ptr();

    assert_panics!({
        let value = PanicOnClone::new(9, &budget);
        vec.assign_fill(30, &value);
    });
    assert_eq!(vec.as_ptr(), ptr, "The old storage should be untouched until the swap.");
    assert_eq!(&*values(&vec), &[0, 1, 2, 3]);
    assert_eq!(budget.live.get(), 4);
}

#[test]
fn test_assign_cursors() {
    let mut vec = Vector::from([1, 2, 3, 4]);
    let cap = vec.cap();

    vec.assign_slice(&[7, 8]);
    assert_eq!(&*vec, &[7, 8]);
    vec.assign_slice(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(&*vec, &[1, 2, 3, 4, 5, 6]);
    assert_eq!(vec.cap(), cap);

    let long: Vector<_> = (0..50).collect();
    vec.assign_slice(&long);
    assert_eq!(vec, long);

    vec.assign_cursors(IterCursor::new([5, 6].iter()), IterCursor::end());
    assert_eq!(&*vec, &[5, 6], "A shorter single pass source should truncate.");

    let src: Vector<_> = (0..30).collect();
    vec.assign_cursors(IterCursor::new(src.iter()), IterCursor::end());
    assert_eq!(vec, src, "A longer single pass source should append the rest.");

    let (first, last) = SliceCursor::range(&src[..3]);
    vec.assign_cursors(cursor::Reverse::new(last), cursor::Reverse::new(first));
    assert_eq!(&*vec, &[2, 1, 0]);
}

#[test]
fn test_construction() {
    let vec = Vector::from_elem(3, &String::from("s"));
    assert_eq!(&*vec, &["s", "s", "s"]);
    assert_eq!(vec.cap(), 16);

    let vec: Vector<u16> = Vector::with_len(20);
    assert_eq!(vec.len(), 20);
    assert_eq!(vec.cap(), 20);

    let vec = Vector::from_slice(&[1, 2, 3]);
    assert_eq!(&*vec, &[1, 2, 3]);

    let vec = Vector::from_trivial(&[1.5_f32, 2.5]);
    assert_eq!(&*vec, &[1.5, 2.5]);

    let vec = Vector::from(&[4, 5][..]);
    assert_eq!(&*vec, &[4, 5]);

    let data = [3, 1, 2];
    let (first, last) = SliceCursor::range(&data);
    assert_eq!(&*Vector::from_cursors(first, last), &data);
    assert_eq!(&*Vector::from_cursors(IterCursor::new(data.iter()), IterCursor::end()), &data);

    let (budget, _) = budgeted(0, 2);
    let src = [
        PanicOnClone::new(0, &budget),
        PanicOnClone::new(1, &budget),
        PanicOnClone::new(2, &budget),
    ];
    assert_panics!({
        Vector::from_slice(&src);
    });
    assert_eq!(budget.live.get(), 3, "A failed construction should drop every clone.");
}

#[test]
fn test_clone() {
    let a = Vector::from([String::from("a"), String::from("b")]);
    let mut b = a.clone();
    b[0].push('!');
    b.push(String::from("c"));

    assert_eq!(&*a, &["a", "b"], "A clone should own an independent block.");
    assert_eq!(&*b, &["a!", "b", "c"]);
    assert_ne!(a.as_ptr(), b.as_ptr());
}

#[test]
fn test_cursors() {
    let vec = Vector::from([1, 2, 3, 4]);
    assert_eq!(cursor::distance(vec.begin(), &vec.end()), 4);

    let reversed: Vector<_> = cursor::iter(vec.rbegin(), vec.rend()).copied().collect();
    assert_eq!(&*reversed, &[4, 3, 2, 1]);

    let mut out = Vector::new();
    let mut inserter = out.back_inserter();
    for value in cursor::iter(vec.begin(), vec.end()) {
        inserter.put(value * 2);
    }
    assert_eq!(&*out, &[2, 4, 6, 8]);
}

#[test]
fn test_into_iter() {
    let counter = CountedDrop::new(0);
    let vec: Vector<_> = (0..5).map(|_| counter.clone()).collect();

    let mut iter = vec.into_iter();
    assert_eq!(iter.len(), 5);
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(*counter.borrow(), 2);
    assert_eq!(iter.as_slice().len(), 3);

    drop(iter);
    assert_eq!(*counter.borrow(), 5, "Dropping the iterator should drop what remains.");

    let vec = Vector::from([1, 2, 3, 4]);
    let mut iter = vec.into_iter();
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.collect::<Vector<_>>(), Vector::from([2, 3]));

    let mut vec = Vector::from([1, 2]);
    for value in &mut vec {
        *value += 1;
    }
    assert_eq!((&vec).into_iter().sum::<i32>(), 5);
}

#[test]
fn test_zst_support() {
    let mut vec = Vector::new();
    for _ in 0..20 {
        vec.push(ZeroSizedType);
    }
    assert_eq!(vec.len(), 20);
    assert_eq!(vec.max_size(), isize::MAX as usize);

    vec.insert(5, ZeroSizedType);
    vec.erase(..10);
    assert_eq!(vec.len(), 11);
    assert_eq!(vec.pop(), Some(ZeroSizedType));
    assert_eq!(vec.into_iter().count(), 10);
}

#[test]
fn test_traits() {
    let a = Vector::from([1, 2, 3]);
    let b = Vector::from([1, 2, 4]);

    assert!(a < b);
    assert_eq!(a.cmp(&a.clone()), std::cmp::Ordering::Equal);
    assert_ne!(a, b);

    let state = RandomState::new();
    assert_eq!(state.hash_one(&a), state.hash_one([1, 2, 3].as_slice()));

    let mut extended = a.clone();
    extended.extend(4..=40);
    assert_eq!(extended.len(), 40);
    assert!(extended.iter().copied().eq(1..=40));

    assert_eq!(
        format!("{:?}", a),
        "Vector { contents: [1, 2, 3], len: 3, cap: 16 }"
    );

    fn is_send_sync<S: Send + Sync>() {}
    is_send_sync::<Vector<u32>>();
    is_send_sync::<IntoIter<String>>();
}

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    Pop,
    Insert(usize, u8),
    InsertN(usize, u8),
    Erase(usize, usize),
    Resize(u8),
    Reserve(u8),
    Assign(u8),
    Shrink,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        Just(Op::Pop),
        (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (any::<usize>(), 0..40_u8).prop_map(|(i, n)| Op::InsertN(i, n)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Erase(a, b)),
        (0..80_u8).prop_map(Op::Resize),
        (0..80_u8).prop_map(Op::Reserve),
        (0..80_u8).prop_map(Op::Assign),
        Just(Op::Shrink),
    ]
}

proptest! {
    #[test]
    fn prop_matches_std_vec(ops in prop::collection::vec(op(), 0..64)) {
        let mut vec: Vector<u8> = Vector::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            let cap = vec.cap();
            let len = model.len();
            let shrink = matches!(op, Op::Shrink);

            match op {
                Op::Push(v) => {
                    vec.push(v);
                    model.push(v);
                },
                Op::Pop => {
                    prop_assert_eq!(vec.pop(), model.pop());
                },
                Op::Insert(i, v) => {
                    let i = i % (len + 1);
                    vec.insert(i, v);
                    model.insert(i, v);
                },
                Op::InsertN(i, n) => {
                    let i = i % (len + 1);
                    vec.insert_n(i, n as usize, &7);
                    for _ in 0..n {
                        model.insert(i, 7);
                    }
                },
                Op::Erase(a, b) => {
                    let (a, b) = (a % (len + 1), b % (len + 1));
                    let (a, b) = (a.min(b), a.max(b));
                    vec.erase(a..b);
                    model.drain(a..b);
                },
                Op::Resize(n) => {
                    vec.resize_value(n as usize, &3);
                    model.resize(n as usize, 3);
                },
                Op::Reserve(n) => {
                    vec.reserve(n as usize);
                    prop_assert!(vec.cap() >= len + n as usize);
                },
                Op::Assign(n) => {
                    vec.assign_fill(n as usize, &1);
                    model.clear();
                    model.resize(n as usize, 1);
                },
                Op::Shrink => {
                    vec.shrink_to_fit();
                    prop_assert_eq!(vec.cap(), len);
                },
            }

            prop_assert!(vec.len() <= vec.cap());
            if !shrink {
                prop_assert!(vec.cap() >= cap, "Capacity should only shrink through shrink_to_fit.");
            }
            prop_assert_eq!(&*vec, model.as_slice());
        }
    }

    #[test]
    fn prop_plan_covers_request(len in 0..1_000_000_usize, additional in 0..1_000_000_usize) {
        let cap = plan(len, additional, usize::MAX / 2).unwrap();
        prop_assert!(cap >= len + additional);
        if len == 0 {
            prop_assert!(cap >= MIN_CAP);
        } else {
            prop_assert!(cap >= len + len / 2, "Growth should be at least half-again.");
        }
    }

    #[test]
    fn prop_plan_respects_max(len in 0..10_000_usize, additional in 0..10_000_usize, max in 0..10_000_usize) {
        match plan(len, additional, max) {
            Ok(cap) => {
                prop_assert!(len + additional <= max);
                prop_assert!(cap >= len + additional);
                prop_assert!(cap <= max || len == 0, "Only the first allocation may round up past max.");
            },
            Err(err) => {
                prop_assert!(len + additional > max);
                prop_assert_eq!(err, CapacityExceeded { len, additional, max });
            },
        }
    }
}
