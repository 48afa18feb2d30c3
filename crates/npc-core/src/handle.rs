//! Agent-handle traits.
//!
//! Navigation and trigger code never own the NPC.  They hold a handle that
//! can report (and, for followers, change) its position.  Everything runs on
//! one logical thread, so shared handles are `Rc<RefCell<T>>`; the blanket
//! impls below let such a handle be passed wherever a `Locatable`/`Movable`
//! is expected.

use std::cell::RefCell;
use std::rc::Rc;

use crate::Point;

/// Anything with a current world position.
pub trait Locatable {
    fn location(&self) -> Point;
}

/// A [`Locatable`] that a path follower can move.
pub trait Movable: Locatable {
    /// Attempt to place the agent at `to`.  Returns `false` if the move was
    /// rejected (blocked, despawned, ...), in which case the position is
    /// unchanged.
    fn move_to(&mut self, to: Point) -> bool;
}

impl<T: Locatable + ?Sized> Locatable for Rc<RefCell<T>> {
    #[inline]
    fn location(&self) -> Point {
        self.borrow().location()
    }
}

impl<T: Movable + ?Sized> Movable for Rc<RefCell<T>> {
    #[inline]
    fn move_to(&mut self, to: Point) -> bool {
        self.borrow_mut().move_to(to)
    }
}
