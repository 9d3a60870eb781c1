//! Keeps the route, its shareable locator, and the map marker layer in step.

pub mod driver;
pub mod markers;
pub mod orchestrator;
pub mod scheduler;
pub mod synchronizer;

pub use driver::run_until_idle;
pub use markers::{Bounds, Marker, MarkerLayer, MarkerSlot, Viewport};
pub use orchestrator::{ChangeEffect, ChangeOutcome, EditorError, RouteEditor};
pub use scheduler::TaskQueue;
pub use synchronizer::{Alert, Applied, LookupJob, MapSynchronizer};
