// ============================================================================
// src/host/arguments.rs – Command-line arguments bound to operation parameters
// ============================================================================

use clap::{Arg, ArgAction, Command};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::HookError;
use crate::host::model::{xform_name, MemberModel};

/// One `--flag` of an operation command.
///
/// The driver calls `add_to_parser` while building the parser and
/// `add_to_params` once per argument after parsing, with `None` when the flag
/// was not given.
pub trait CliArgument {
    fn name(&self) -> &str;

    fn cli_name(&self) -> String {
        format!("--{}", self.name())
    }

    fn cli_type_name(&self) -> &str;

    fn required(&self) -> bool;

    fn set_required(&mut self, required: bool);

    fn documentation(&self) -> &str;

    fn add_to_parser(&self, parser: Command) -> Command {
        parser.arg(
            Arg::new(self.name().to_string())
                .long(self.name().to_string())
                .value_name(self.cli_type_name().to_uppercase())
                .action(ArgAction::Set)
                .required(self.required())
                .help(self.documentation().to_string()),
        )
    }

    fn add_to_params(
        &mut self,
        parameters: &mut Map<String, Value>,
        value: Option<&str>,
    ) -> Result<(), HookError>;
}

pub type ArgumentTable = BTreeMap<String, Box<dyn CliArgument>>;

/// Argument generated from an input member of the operation model.
#[derive(Debug)]
pub struct ModelArgument {
    name: String,
    member: MemberModel,
    required: bool,
}

impl ModelArgument {
    pub fn new(member: MemberModel) -> Self {
        Self {
            name: xform_name(&member.name, '-'),
            required: member.required,
            member,
        }
    }
}

impl CliArgument for ModelArgument {
    fn name(&self) -> &str {
        &self.name
    }

    fn cli_type_name(&self) -> &str {
        &self.member.shape_type
    }

    fn required(&self) -> bool {
        self.required
    }

    fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    fn documentation(&self) -> &str {
        &self.member.documentation
    }

    fn add_to_params(
        &mut self,
        parameters: &mut Map<String, Value>,
        value: Option<&str>,
    ) -> Result<(), HookError> {
        if let Some(value) = value {
            parameters.insert(self.member.name.clone(), Value::String(value.to_string()));
        }
        Ok(())
    }
}
