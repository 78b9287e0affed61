// ============================================================================
// src/lightsail/push_container_image.rs – hand a local image to lightsailctl
// ============================================================================

use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

use crate::cmd::Cmd;
use crate::error::CliError;
use crate::host::{CliCommand, Session};

pub const NAME: &str = "push-container-image";
const DESCRIPTION: &str = "Push a container image to your Amazon Lightsail container service.";

pub const PLUGIN: &str = "lightsailctl";
const INPUT_VERSION: &str = "1";
const OPERATION: &str = "PushContainerImage";

const PLUGIN_MISSING: &str = "The Lightsail Control (lightsailctl) plugin was not found. \
To download and install it, see \
https://lightsail.aws.amazon.com/ls/docs/en_us/articles/amazon-lightsail-install-software";

#[derive(Debug, Parser)]
#[command(name = NAME, about = DESCRIPTION, no_binary_name = true)]
struct PushArgs {
    /// The name of the container service to push the image to
    #[arg(long)]
    service_name: String,

    /// The label for the container image when it's registered to the container service
    #[arg(long)]
    label: String,

    /// The local container image to push
    #[arg(long)]
    image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PluginRequest<'a> {
    input_version: &'a str,
    operation: &'a str,
    payload: Payload<'a>,
    configuration: PluginConfiguration,
}

#[derive(Debug, Serialize)]
struct Payload<'a> {
    service: &'a str,
    label: &'a str,
    image: &'a str,
}

#[derive(Debug, Default, Serialize)]
struct PluginConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
    #[serde(rename = "doNotVerifySSL", skip_serializing_if = "std::ops::Not::not")]
    do_not_verify_ssl: bool,
}

pub struct PushContainerImage {
    session: Rc<Session>,
}

impl PushContainerImage {
    pub fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    fn request_body(&self, args: &PushArgs) -> serde_json::Result<Vec<u8>> {
        let globals = self.session.globals();
        let request = PluginRequest {
            input_version: INPUT_VERSION,
            operation: OPERATION,
            payload: Payload {
                service: &args.service_name,
                label: &args.label,
                image: &args.image,
            },
            configuration: PluginConfiguration {
                region: self.session.region().map(str::to_string),
                endpoint: globals.endpoint_url.clone(),
                do_not_verify_ssl: globals.no_verify_ssl,
            },
        };
        serde_json::to_vec(&request)
    }
}

impl CliCommand for PushContainerImage {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn run(&self, args: &[String]) -> Result<Option<Value>, CliError> {
        let args = PushArgs::try_parse_from(args)?;
        let plugin_cfg = &self.session.config().plugin;

        let plugin = Cmd::locate(
            PLUGIN,
            plugin_cfg.lightsailctl_path.as_deref(),
            Duration::from_secs(plugin_cfg.timeout_secs),
        )
        .ok_or_else(|| anyhow!(PLUGIN_MISSING))?;

        let body = self.request_body(&args).context("encode plugin request")?;
        debug!(plugin = %plugin.path().display(), service = %args.service_name, "push");

        let out = plugin.run(&["--plugin", "--input-stdin"], Some(&body))?;
        std::io::stdout()
            .write_all(out.stdout.as_bytes())
            .context("relay plugin output")?;
        if out.status != 0 {
            return Err(anyhow!(
                "{PLUGIN} exited with status {}: {}",
                out.status,
                out.stderr.trim()
            )
            .into());
        }
        if !out.stderr.is_empty() {
            eprint!("{}", out.stderr);
        }
        Ok(None)
    }
}
