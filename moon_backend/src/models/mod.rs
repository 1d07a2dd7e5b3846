pub mod observer;
pub mod phase;
pub mod snapshot;
pub mod time;

pub use observer::*;
pub use phase::*;
pub use snapshot::*;
pub use time::*;
