// ============================================================================
// src/host/events.rs – Named event hooks (build tables, after-call)
// ============================================================================

use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

use crate::error::HookError;
use crate::host::arguments::ArgumentTable;
use crate::host::commands::CommandTable;
use crate::host::model::OperationModel;
use crate::host::session::Session;

/// Payload handed to every handler registered for an event name.
pub enum Event<'a> {
    BuildingCommandTable {
        command_table: &'a mut CommandTable,
        session: &'a Rc<Session>,
    },
    BuildingArgumentTable {
        argument_table: &'a mut ArgumentTable,
        operation_model: &'a Rc<OperationModel>,
        session: &'a Rc<Session>,
    },
    AfterCall {
        parsed: &'a mut Value,
        operation_model: &'a OperationModel,
    },
}

pub type Handler = Rc<dyn Fn(&mut Event<'_>) -> Result<(), HookError>>;

/// Event name -> ordered handlers.
///
/// Names are dot separated. Emitting `a.b.c` runs the handlers registered for
/// `a.b.c`, then `a.b`, then `a`, each group in registration order.
#[derive(Default)]
pub struct EventHooks {
    handlers: RefCell<HashMap<String, Vec<Handler>>>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, event_name: &str, handler: F)
    where
        F: Fn(&mut Event<'_>) -> Result<(), HookError> + 'static,
    {
        trace!(event = event_name, "register handler");
        self.handlers
            .borrow_mut()
            .entry(event_name.to_string())
            .or_default()
            .push(Rc::new(handler));
    }

    /// Run every handler matching `event_name`. Stops at the first error.
    ///
    /// The handler list is snapshotted first, so a handler may register new
    /// handlers while running; those only see later emissions.
    pub fn emit(&self, event_name: &str, event: &mut Event<'_>) -> Result<(), HookError> {
        let snapshot = self.matching(event_name);
        trace!(event = event_name, handlers = snapshot.len(), "emit");
        for handler in snapshot {
            handler(event)?;
        }
        Ok(())
    }

    pub fn handler_count(&self, event_name: &str) -> usize {
        self.matching(event_name).len()
    }

    fn matching(&self, event_name: &str) -> Vec<Handler> {
        let handlers = self.handlers.borrow();
        let mut out = Vec::new();
        let mut prefix = event_name;
        loop {
            if let Some(list) = handlers.get(prefix) {
                out.extend(list.iter().cloned());
            }
            match prefix.rfind('.') {
                Some(idx) => prefix = &prefix[..idx],
                None => break,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::model::lightsail_model;
    use serde_json::json;
    use std::cell::RefCell;

    fn after_call<'a>(parsed: &'a mut Value, op: &'a OperationModel) -> Event<'a> {
        Event::AfterCall {
            parsed,
            operation_model: op,
        }
    }

    #[test]
    fn handlers_run_most_specific_first_in_registration_order() {
        let hooks = EventHooks::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for (name, tag) in [
            ("after-call", "root"),
            ("after-call.lightsail.GetInstanceAccessDetails", "op-1"),
            ("after-call.lightsail", "service"),
            ("after-call.lightsail.GetInstanceAccessDetails", "op-2"),
            ("after-call.other", "unrelated"),
        ] {
            let seen = Rc::clone(&seen);
            hooks.register(name, move |_| {
                seen.borrow_mut().push(tag);
                Ok(())
            });
        }

        let op = lightsail_model().operation_model("GetInstanceAccessDetails").unwrap();
        let mut parsed = json!({});
        hooks
            .emit(
                "after-call.lightsail.GetInstanceAccessDetails",
                &mut after_call(&mut parsed, &op),
            )
            .unwrap();

        assert_eq!(*seen.borrow(), vec!["op-1", "op-2", "service", "root"]);
    }

    #[test]
    fn first_error_stops_emission() {
        let hooks = EventHooks::new();
        let ran = Rc::new(RefCell::new(false));
        hooks.register("x", |_| Err(HookError::Decrypt));
        let flag = Rc::clone(&ran);
        hooks.register("x", move |_| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        let op = lightsail_model().operation_model("GetInstanceAccessDetails").unwrap();
        let mut parsed = json!({});
        let err = hooks.emit("x", &mut after_call(&mut parsed, &op)).unwrap_err();
        assert!(matches!(err, HookError::Decrypt));
        assert!(!*ran.borrow());
    }

    #[test]
    fn handler_may_register_during_emit() {
        let hooks = Rc::new(EventHooks::new());
        let inner = Rc::clone(&hooks);
        hooks.register("outer", move |_| {
            inner.register("later", |_| Ok(()));
            Ok(())
        });

        let op = lightsail_model().operation_model("GetInstanceAccessDetails").unwrap();
        let mut parsed = json!({});
        hooks.emit("outer", &mut after_call(&mut parsed, &op)).unwrap();
        assert_eq!(hooks.handler_count("later"), 1);
    }
}
