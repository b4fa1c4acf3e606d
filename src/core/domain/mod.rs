//! Domain types.

mod project;
mod report;
mod variable;

pub use project::{ProjectId, RemoteProjectRef};
pub use report::{DeleteReport, PullReport, PushReport};
pub use variable::{Variable, VariableId};
