// ============================================================================
// src/util/mod.rs – re-exports for utility modules
// ============================================================================

pub mod jsonpath;
pub mod keyfile;
pub mod paths;
