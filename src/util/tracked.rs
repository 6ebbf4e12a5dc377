#![cfg(test)]

use std::cell::{Cell, RefCell};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// Shared state for a family of [`PanicOnClone`] values: how many live values exist and how many
/// clones are still allowed before one panics.
#[derive(Debug)]
pub struct CloneBudget {
    pub live: Cell<usize>,
    pub remaining: Cell<usize>,
}

impl CloneBudget {
    pub fn new(remaining: usize) -> Rc<CloneBudget> {
        Rc::new(CloneBudget {
            live: Cell::new(0),
            remaining: Cell::new(remaining),
        })
    }
}

/// A value whose [`Clone`] implementation panics once its shared budget runs out, while keeping
/// count of live instances so that leaks and double drops show up.
#[derive(Debug)]
pub struct PanicOnClone {
    pub value: usize,
    pub budget: Rc<CloneBudget>,
}

impl PanicOnClone {
    pub fn new(value: usize, budget: &Rc<CloneBudget>) -> PanicOnClone {
        budget.live.set(budget.live.get() + 1);
        PanicOnClone {
            value,
            budget: Rc::clone(budget),
        }
    }
}

impl Clone for PanicOnClone {
    fn clone(&self) -> Self {
        let remaining = self.budget.remaining.get();
        if remaining == 0 {
            panic!("clone budget exhausted");
        }
        self.budget.remaining.set(remaining - 1);
        PanicOnClone::new(self.value, &self.budget)
    }
}

impl PartialEq for PanicOnClone {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for PanicOnClone {
    fn drop(&mut self) {
        self.budget.live.set(self.budget.live.get() - 1);
    }
}
