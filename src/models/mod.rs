//! Scheduling domain models.
//!
//! Value types for both engines. Every record is a plain value: runs
//! copy what they read and allocate what they return.
//!
//! # Domain Mappings
//!
//! | Engine | Work unit | Executor | Solution |
//! |--------|-----------|----------|----------|
//! | CPU | Process | single CPU | Timeline |
//! | HEFT | Task | Processor | Schedule |

mod process;
mod resource;
mod schedule;
mod task;
mod timeline;

pub use process::Process;
pub use resource::Processor;
pub use schedule::{Assignment, Schedule};
pub use task::Task;
pub use timeline::{Occupant, Slot, Timeline};
