//! `npc-navigation`: moving one NPC toward one target, tick by tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`follower`] | `PathFollower` trait, `CancelReason`                            |
//! | [`params`]   | `NavigatorParameters` - arrival margin, speed, tick callbacks   |
//! | [`strategy`] | `NavigationStrategy<H, F>` - arrival authority + cancellation   |
//! | [`linear`]   | `LinearFollower<H>` - straight-segment follower                 |
//! | [`error`]    | `NavigationError`, `NavigationResult<T>`                        |
//!
//! # Two authorities
//!
//! The path follower decides whether the NPC *can still move* (it reports a
//! cancel reason when stuck or blocked).  The strategy decides whether the
//! NPC *has arrived*, using the block-centred box in
//! [`Point::within_arrival`][npc_core::Point::within_arrival].  The two are
//! checked independently every tick, because a follower may exhaust its path
//! short of the box, and the box may be entered before the path is
//! exhausted.
//!
//! Cancellation is terminal: once a strategy has a cancel reason, every
//! later `update()` returns `true` and the reason never changes.  A new
//! navigation request builds a new strategy.

pub mod error;
pub mod follower;
pub mod linear;
pub mod params;
pub mod strategy;


pub use error::{NavigationError, NavigationResult};
pub use follower::{CancelReason, PathFollower};
pub use linear::LinearFollower;
pub use params::{NavigatorParameters, TickCallback};
pub use strategy::NavigationStrategy;
