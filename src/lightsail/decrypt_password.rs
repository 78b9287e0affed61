// ============================================================================
// src/lightsail/decrypt_password.rs – --private-key: decrypt the returned
// password ciphertext after get-instance-access-details
// ============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::Pkcs1v15Encrypt;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

use crate::error::{DecryptFailure, HookError};
use crate::host::{CliArgument, Event, OperationModel, Session};
use crate::util::jsonpath;
use crate::util::keyfile::{load_rsa_private_key, read_key_material};
use crate::util::paths::expand_path;

pub const CIPHERTEXT_PATH: &str = "accessDetails.passwordData.ciphertext";
pub const PASSWORD_PATH: &str = "accessDetails.password";

const HELP: &str = "The file that contains the private key of the key pair used when the \
instance was created (e.g. windows-keypair.pem). When supplied, the password ciphertext \
returned in the response is decrypted and appears in the password field.";

const INVALID_PATH: &str = "private-key should be a path to the local SSH private key file \
of the keypair used to create the instance.";

pub struct PrivateKeyArgument {
    session: Rc<Session>,
    operation_model: Rc<OperationModel>,
    name: String,
    key_path: Option<PathBuf>,
    required: bool,
}

impl PrivateKeyArgument {
    pub fn new(session: Rc<Session>, operation_model: Rc<OperationModel>, name: &str) -> Self {
        Self {
            session,
            operation_model,
            name: name.to_string(),
            key_path: None,
            required: false,
        }
    }

    pub fn key_path(&self) -> Option<&Path> {
        self.key_path.as_deref()
    }

    /// `after-call.<service-id>.<OperationName>`
    fn after_call_event(&self) -> String {
        format!(
            "after-call.{}.{}",
            self.operation_model.service_model.service_id.hyphenize(),
            self.operation_model.name
        )
    }
}

impl CliArgument for PrivateKeyArgument {
    fn name(&self) -> &str {
        &self.name
    }

    fn cli_type_name(&self) -> &str {
        "string"
    }

    fn required(&self) -> bool {
        self.required
    }

    fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    fn documentation(&self) -> &str {
        HELP
    }

    fn add_to_parser(&self, parser: clap::Command) -> clap::Command {
        parser.arg(
            clap::Arg::new(self.name.clone())
                .long(self.name.clone())
                .value_name("PATH")
                .required(self.required)
                .help("SSH Private Key file")
                .long_help(HELP),
        )
    }

    /// Validates the path and, when it names a regular file, arranges for the
    /// response to be decrypted once the call completes.
    fn add_to_params(
        &mut self,
        _parameters: &mut Map<String, Value>,
        value: Option<&str>,
    ) -> Result<(), HookError> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(());
        };

        let path = expand_path(value);
        if !path.is_file() {
            return Err(HookError::ParamValidation(INVALID_PATH.to_string()));
        }

        let event_name = self.after_call_event();
        let key_path = self.key_path.insert(path).clone();
        debug!(event = %event_name, key = %key_path.display(), "private key accepted");
        self.session.register(&event_name, move |event| {
            decrypt_password_data(&key_path, event)
        });
        Ok(())
    }
}

/// After-call handler. A response without ciphertext passes through as is.
fn decrypt_password_data(key_path: &Path, event: &mut Event<'_>) -> Result<(), HookError> {
    let Event::AfterCall { parsed, .. } = event else {
        return Ok(());
    };
    debug!(key = %key_path.display(), "decrypting password data");

    let ciphertext = match jsonpath::search(parsed, CIPHERTEXT_PATH) {
        Some(v) if !jsonpath::is_empty(v) => v.clone(),
        _ => return Ok(()),
    };

    let result = decrypt_password(key_path, &ciphertext).and_then(|password| {
        jsonpath::set_value(parsed, PASSWORD_PATH, Value::String(password))
            .map_err(DecryptFailure::Response)
    });
    result.map_err(|err| {
        debug!(error = %err, key = %key_path.display(), "unable to decrypt password");
        HookError::Decrypt
    })
}

/// Decrypt a base64 PKCS#1 v1.5 ciphertext with the PEM key at `key_path`.
/// The key file is read on every call and its bytes are wiped afterwards.
pub fn decrypt_password(key_path: &Path, ciphertext: &Value) -> Result<String, DecryptFailure> {
    let pem = read_key_material(key_path)?;
    let key = load_rsa_private_key(&pem)?;

    let encoded: String = ciphertext
        .as_str()
        .ok_or(DecryptFailure::CiphertextType)?
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    let raw = STANDARD.decode(encoded)?;
    let plain = key.decrypt(Pkcs1v15Encrypt, &raw)?;
    Ok(String::from_utf8(plain)?)
}
