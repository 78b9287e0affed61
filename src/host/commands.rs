// ============================================================================
// src/host/commands.rs – Command table entries and API operation commands
// ============================================================================

use clap::Command;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

use crate::error::CliError;
use crate::host::arguments::{ArgumentTable, CliArgument, ModelArgument};
use crate::host::events::Event;
use crate::host::model::OperationModel;
use crate::host::session::Session;

/// An entry in the command table.
pub trait CliCommand {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Run with the arguments that followed the command name. Returns the
    /// document to print, if any.
    fn run(&self, args: &[String]) -> Result<Option<Value>, CliError>;
}

pub type CommandTable = BTreeMap<String, Box<dyn CliCommand>>;

/// Command that sends one API operation.
pub struct ServiceOperation {
    name: String,
    operation_model: Rc<OperationModel>,
    session: Rc<Session>,
}

impl ServiceOperation {
    pub fn new(operation_model: OperationModel, session: Rc<Session>) -> Self {
        Self {
            name: operation_model.cli_name(),
            operation_model: Rc::new(operation_model),
            session,
        }
    }

    /// Model arguments plus whatever the `building-argument-table` handlers add.
    pub fn build_argument_table(&self) -> Result<ArgumentTable, CliError> {
        let mut argument_table = ArgumentTable::new();
        for member in &self.operation_model.input {
            let arg = ModelArgument::new(member.clone());
            argument_table.insert(arg.name().to_string(), Box::new(arg));
        }

        let event_name = format!(
            "building-argument-table.{}.{}",
            self.operation_model.service_model.cli_name(),
            self.name
        );
        self.session.emit(
            &event_name,
            &mut Event::BuildingArgumentTable {
                argument_table: &mut argument_table,
                operation_model: &self.operation_model,
                session: &self.session,
            },
        )?;
        Ok(argument_table)
    }

    fn parser(&self, argument_table: &ArgumentTable) -> Command {
        let mut parser = Command::new(self.name.clone())
            .no_binary_name(true)
            .about(self.operation_model.documentation.clone());
        for arg in argument_table.values() {
            parser = arg.add_to_parser(parser);
        }
        parser
    }
}

impl CliCommand for ServiceOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.operation_model.documentation
    }

    fn run(&self, args: &[String]) -> Result<Option<Value>, CliError> {
        let mut argument_table = self.build_argument_table()?;
        let matches = self.parser(&argument_table).try_get_matches_from(args)?;

        let mut params = Map::new();
        for (name, arg) in argument_table.iter_mut() {
            let value = matches.get_one::<String>(name).map(String::as_str);
            arg.add_to_params(&mut params, value)?;
        }

        let operation = &self.operation_model;
        let mut parsed = self.session.transport().send(operation, &params)?;
        debug!(
            endpoint = %operation.service_model.endpoint_prefix,
            operation = %operation.name,
            "response received"
        );

        let event_name = format!(
            "after-call.{}.{}",
            operation.service_model.service_id.hyphenize(),
            operation.name
        );
        self.session.emit(
            &event_name,
            &mut Event::AfterCall {
                parsed: &mut parsed,
                operation_model: operation,
            },
        )?;
        Ok(Some(parsed))
    }
}
