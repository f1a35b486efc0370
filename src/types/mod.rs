//! Type definitions for tunefacts

mod error;
mod event;
mod extras;
mod file_bag;
mod metrics;

pub use error::*;
pub use event::*;
pub use extras::*;
pub use file_bag::FileBag;
pub use metrics::*;
