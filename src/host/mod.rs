// ============================================================================
// src/host/mod.rs – minimal command host the Lightsail customizations plug into
// ============================================================================
pub mod arguments; // CliArgument trait, ArgumentTable, ModelArgument
pub mod commands; // CliCommand trait, CommandTable, ServiceOperation
pub mod driver;
pub mod events; // named event hooks
pub mod model; // service / operation models
pub mod session;
pub mod transport;

pub use arguments::CliArgument;
pub use commands::CliCommand;
pub use events::Event;
pub use model::OperationModel;
pub use session::Session;
