use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::MenuError;
use crate::host::Host;
use crate::menu::{MenuDescriptor, MenuLabel};
use crate::toolbar::{self, ToolbarView};

/// Holds the most recently installed menu descriptor.
///
/// There is exactly one slot and no history: `install` replaces it and the
/// previous descriptor is dropped. Readers always see a fully built
/// descriptor. Actions run after the slot lock is released, so an action
/// may itself call back into the registry.
pub struct ActiveMenuRegistry {
    host: Arc<dyn Host>,
    current: Mutex<Option<Arc<MenuDescriptor>>>,
}

impl ActiveMenuRegistry {
    pub fn new(host: Arc<dyn Host>) -> Self {
        ActiveMenuRegistry {
            host,
            current: Mutex::new(None),
        }
    }

    /// Replace the held descriptor and display it as the native menu.
    pub fn install(&self, descriptor: MenuDescriptor) {
        let descriptor = Arc::new(descriptor);
        *self.current.lock() = Some(Arc::clone(&descriptor));
        log::info!(
            "Installing application menu with {} top-level menus",
            descriptor.menus.len()
        );
        self.host.set_application_menu(&descriptor);
    }

    pub fn current(&self) -> Option<Arc<MenuDescriptor>> {
        self.current.lock().clone()
    }

    /// Invoke the entry `id` among the immediate children of `label`.
    ///
    /// Returns `Ok(false)` when nothing is installed yet or when `id` does not
    /// name an enabled leaf with behaviour. Fails only when `label` has no
    /// menu in the installed descriptor.
    pub fn dispatch(&self, label: MenuLabel, id: &str) -> Result<bool, MenuError> {
        let action = {
            let current = self.current.lock();
            let Some(descriptor) = current.as_ref() else {
                log::debug!("Dispatch of {}/{} before any menu was installed", label, id);
                return Ok(false);
            };
            let menu = descriptor
                .menu(label)
                .ok_or(MenuError::MenuNotFound(label))?;
            menu.item(id)
                .filter(|item| item.is_invokable())
                .and_then(|item| item.invoke.clone())
        };

        match action {
            Some(action) => {
                log::debug!("Dispatching {}/{}", label, id);
                action();
                Ok(true)
            }
            None => {
                log::debug!("No invokable entry {}/{}", label, id);
                Ok(false)
            }
        }
    }

    /// Toolbar view of the installed descriptor; empty before the first install.
    pub fn project_toolbar(&self) -> ToolbarView {
        self.current()
            .map(|descriptor| toolbar::project(&descriptor))
            .unwrap_or_default()
    }
}
