//! Flair Core
//!
//! The primitives every Flair effect is built on:
//!
//! - **Geometry**: points, sizes, and element bounds in logical pixels
//! - **Events**: pointer, scroll, layout, and lifecycle events delivered to effects
//! - **State Machines**: small flat FSMs for presentation states such as hidden/visible
//!
//! # Example
//!
//! ```rust
//! use flair_core::{Point, Rect};
//!
//! let card = Rect::new(100.0, 100.0, 200.0, 100.0);
//! assert_eq!(card.center(), Point::new(200.0, 150.0));
//! assert!(card.contains(Point::new(150.0, 120.0)));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{event_types, Event, EventData, EventHandler, EventType, ScrollMetrics};
pub use fsm::{EventId, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size};
