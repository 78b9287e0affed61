// ============================================================================
// src/host/model.rs – Service and operation models
// ============================================================================

use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Event-name form: lowercase, spaces become hyphens.
    pub fn hyphenize(&self) -> String {
        self.0.to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct MemberModel {
    pub name: String,
    pub shape_type: String,
    pub required: bool,
    pub documentation: String,
}

impl MemberModel {
    fn string(name: &str, required: bool, documentation: &str) -> Self {
        Self {
            name: name.to_string(),
            shape_type: "string".to_string(),
            required,
            documentation: documentation.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct OperationShape {
    name: String,
    documentation: String,
    input: Vec<MemberModel>,
}

#[derive(Debug)]
pub struct ServiceModel {
    pub service_id: ServiceId,
    pub endpoint_prefix: String,
    operations: Vec<OperationShape>,
}

impl ServiceModel {
    /// Command group name, e.g. `lightsail`.
    pub fn cli_name(&self) -> String {
        self.service_id.hyphenize()
    }

    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(|op| op.name.as_str())
    }

    pub fn operation_model(self: &Rc<Self>, name: &str) -> Option<OperationModel> {
        self.operations
            .iter()
            .find(|op| op.name == name)
            .map(|op| OperationModel {
                name: op.name.clone(),
                documentation: op.documentation.clone(),
                input: op.input.clone(),
                service_model: Rc::clone(self),
            })
    }
}

#[derive(Debug, Clone)]
pub struct OperationModel {
    pub name: String,
    pub documentation: String,
    pub input: Vec<MemberModel>,
    pub service_model: Rc<ServiceModel>,
}

impl OperationModel {
    pub fn cli_name(&self) -> String {
        xform_name(&self.name, '-')
    }
}

/// `GetInstanceAccessDetails` -> `get-instance-access-details`.
///
/// Runs of capitals are kept together, so `GetRelationalDBLogEvents` becomes
/// `get-relational-db-log-events`.
pub fn xform_name(name: &str, sep: char) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);
            if boundary && prev != sep {
                out.push(sep);
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// The slice of the Lightsail API model this tool exposes.
pub fn lightsail_model() -> Rc<ServiceModel> {
    Rc::new(ServiceModel {
        service_id: ServiceId::new("Lightsail"),
        endpoint_prefix: "lightsail".to_string(),
        operations: vec![OperationShape {
            name: "GetInstanceAccessDetails".to_string(),
            documentation: "Returns temporary SSH keys you can use to connect to a specific \
                virtual private server, or instance."
                .to_string(),
            input: vec![
                MemberModel::string(
                    "instanceName",
                    true,
                    "The name of the instance to access.",
                ),
                MemberModel::string(
                    "protocol",
                    false,
                    "The protocol to use to connect to your instance (ssh or rdp).",
                ),
            ],
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xform_name_handles_acronyms() {
        assert_eq!(
            xform_name("GetInstanceAccessDetails", '-'),
            "get-instance-access-details"
        );
        assert_eq!(
            xform_name("GetRelationalDBLogEvents", '-'),
            "get-relational-db-log-events"
        );
        assert_eq!(xform_name("instanceName", '-'), "instance-name");
        assert_eq!(xform_name("Get2FACode", '_'), "get2_fa_code");
    }

    #[test]
    fn service_id_hyphenizes_for_event_names() {
        assert_eq!(ServiceId::new("Lightsail").hyphenize(), "lightsail");
        assert_eq!(ServiceId::new("Elastic Beanstalk").hyphenize(), "elastic-beanstalk");
    }

    #[test]
    fn operation_model_links_back_to_service() {
        let service = lightsail_model();
        let op = service.operation_model("GetInstanceAccessDetails").unwrap();
        assert_eq!(op.cli_name(), "get-instance-access-details");
        assert_eq!(op.service_model.cli_name(), "lightsail");
        assert_eq!(op.input.iter().filter(|m| m.required).count(), 1);
        assert!(service.operation_model("DeleteEverything").is_none());
    }
}
