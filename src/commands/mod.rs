//! Host-facing commands: the intent table, the in-flight command state machine and the
//! orchestrator that ties them to the metadata layer.

pub mod intent;
pub mod orchestrator;
pub mod pending;
pub mod status;

pub use intent::{CheckoutMode, CommandIntent, Dispatch, Interaction, IntentSpec, Reply};
pub use orchestrator::Orchestrator;
pub use pending::{CommandState, PendingCommand};
pub use status::{execute_enabled, execute_status};
