//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! Provider handles are passed to the [`Scheduler`](crate::scheduler::Scheduler)
//! explicitly; nothing here is a process-wide client.

pub mod decision_log;
pub mod holidays;
pub mod providers;

pub use decision_log::DecisionLog;
pub use holidays::HolidaySource;
pub use providers::{Ec2Provider, LightsailProvider};
