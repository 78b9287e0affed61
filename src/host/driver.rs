// ============================================================================
// src/host/driver.rs – Build the command table and dispatch one invocation
// ============================================================================

use serde_json::Value;
use std::rc::Rc;
use tracing::debug;

use crate::error::CliError;
use crate::host::commands::{CliCommand, CommandTable, ServiceOperation};
use crate::host::events::Event;
use crate::host::model::ServiceModel;
use crate::host::session::Session;

pub struct Driver {
    session: Rc<Session>,
    service: Rc<ServiceModel>,
}

impl Driver {
    pub fn new(session: Rc<Session>, service: Rc<ServiceModel>) -> Self {
        Self { session, service }
    }

    /// One entry per model operation, then `building-command-table.<service>`.
    pub fn build_command_table(&self) -> Result<CommandTable, CliError> {
        let mut command_table = CommandTable::new();
        for name in self.service.operation_names() {
            if let Some(op) = self.service.operation_model(name) {
                let cmd = ServiceOperation::new(op, Rc::clone(&self.session));
                command_table.insert(cmd.name().to_string(), Box::new(cmd));
            }
        }

        let event_name = format!("building-command-table.{}", self.service.cli_name());
        self.session.emit(
            &event_name,
            &mut Event::BuildingCommandTable {
                command_table: &mut command_table,
                session: &self.session,
            },
        )?;
        Ok(command_table)
    }

    pub fn run(&self, command: &str, args: &[String]) -> Result<Option<Value>, CliError> {
        let command_table = self.build_command_table()?;
        let cmd = command_table
            .get(command)
            .ok_or_else(|| CliError::UnknownCommand(command.to_string()))?;
        debug!(command, "dispatch");
        cmd.run(args)
    }

    /// `name  description` lines for top-level help.
    pub fn command_summary(&self) -> Result<String, CliError> {
        let command_table = self.build_command_table()?;
        let width = command_table.keys().map(String::len).max().unwrap_or(0);
        Ok(command_table
            .values()
            .map(|cmd| format!("  {:<width$}  {}", cmd.name(), cmd.description()))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
