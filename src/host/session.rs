// ============================================================================
// src/host/session.rs – Per-invocation session: hooks, config, transport
// ============================================================================

use clap::Args;
use std::rc::Rc;

use crate::config::Config;
use crate::error::HookError;
use crate::host::events::{Event, EventHooks};
use crate::host::transport::Transport;

/// Options accepted before the command name.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Turn on debug logging
    #[arg(long)]
    pub debug: bool,

    /// Region to use; overrides the config file
    #[arg(long)]
    pub region: Option<String>,

    /// Override the service endpoint URL
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Do not verify SSL certificates
    #[arg(long)]
    pub no_verify_ssl: bool,
}

pub struct Session {
    hooks: EventHooks,
    config: Config,
    globals: GlobalOptions,
    transport: Rc<dyn Transport>,
}

impl Session {
    pub fn new(config: Config, globals: GlobalOptions, transport: Rc<dyn Transport>) -> Rc<Self> {
        Rc::new(Self {
            hooks: EventHooks::new(),
            config,
            globals,
            transport,
        })
    }

    pub fn register<F>(&self, event_name: &str, handler: F)
    where
        F: Fn(&mut Event<'_>) -> Result<(), HookError> + 'static,
    {
        self.hooks.register(event_name, handler);
    }

    pub fn emit(&self, event_name: &str, event: &mut Event<'_>) -> Result<(), HookError> {
        self.hooks.emit(event_name, event)
    }

    pub fn handler_count(&self, event_name: &str) -> usize {
        self.hooks.handler_count(event_name)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn globals(&self) -> &GlobalOptions {
        &self.globals
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Command line wins over the config file.
    pub fn region(&self) -> Option<&str> {
        self.globals
            .region
            .as_deref()
            .or(self.config.region.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::transport::ReplayTransport;

    #[test]
    fn command_line_region_overrides_config() {
        let config = Config {
            region: Some("us-east-1".into()),
            ..Config::default()
        };
        let transport = Rc::new(ReplayTransport::new(None));

        let session = Session::new(config.clone(), GlobalOptions::default(), transport.clone());
        assert_eq!(session.region(), Some("us-east-1"));

        let globals = GlobalOptions {
            region: Some("ap-south-1".into()),
            ..GlobalOptions::default()
        };
        let session = Session::new(config, globals, transport);
        assert_eq!(session.region(), Some("ap-south-1"));
    }
}
