// ============================================================================
// src/cmd/mod.rs – command subsystem root
// ============================================================================
pub mod base; // plugin process execution (Cmd, OutputData)

// Re-export common types for convenience:
pub use base::Cmd;
