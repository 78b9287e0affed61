// ============================================================================
// src/lightsail/mod.rs – Lightsail customizations wired into the host hooks
// ============================================================================
pub mod decrypt_password; // --private-key on get-instance-access-details
pub mod push_container_image; // lightsail push-container-image

use std::rc::Rc;

use crate::error::HookError;
use crate::host::{Event, Session};
use decrypt_password::PrivateKeyArgument;
use push_container_image::PushContainerImage;

pub const PRIVATE_KEY_ARG: &str = "private-key";

/// Entry point for the Lightsail high level customizations.
pub fn initialize(session: &Session) {
    session.register("building-command-table.lightsail", inject_commands);
    session.register(
        "building-argument-table.lightsail.get-instance-access-details",
        giad_add_private_key,
    );
}

/// Adds the high level commands to the Lightsail command table.
pub fn inject_commands(event: &mut Event<'_>) -> Result<(), HookError> {
    if let Event::BuildingCommandTable {
        command_table,
        session,
    } = event
    {
        command_table.insert(
            push_container_image::NAME.to_string(),
            Box::new(PushContainerImage::new(Rc::clone(*session))),
        );
    }
    Ok(())
}

/// Adds `--private-key` to get-instance-access-details.
pub fn giad_add_private_key(event: &mut Event<'_>) -> Result<(), HookError> {
    if let Event::BuildingArgumentTable {
        argument_table,
        operation_model,
        session,
    } = event
    {
        argument_table.insert(
            PRIVATE_KEY_ARG.to_string(),
            Box::new(PrivateKeyArgument::new(
                Rc::clone(*session),
                Rc::clone(*operation_model),
                PRIVATE_KEY_ARG,
            )),
        );
    }
    Ok(())
}
