//! Admission control for the submission quota.

mod limiter;
mod ticker;
mod window;

pub use limiter::{SlotPermit, WindowLimiter};
pub use ticker::WindowTicker;
pub use window::TimeWindow;
