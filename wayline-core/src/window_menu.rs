use std::sync::Arc;

use parking_lot::Mutex;

use crate::actions::ActionContext;
use crate::builder::MenuTreeBuilder;
use crate::context::{ContextOverrides, ContextSnapshot, Platform};
use crate::error::MenuError;
use crate::host::WindowId;
use crate::menu::MenuLabel;
use crate::registry::ActiveMenuRegistry;
use crate::toolbar::ToolbarView;
use crate::trigger::RebuildTrigger;

/// The application menu of the browser shell.
///
/// Feeds host lifecycle signals through [`RebuildTrigger`], samples a fresh
/// [`ContextSnapshot`] for every rebuild and installs the result into the
/// [`ActiveMenuRegistry`]. All methods take `&self`; one instance is shared by
/// the host's event handlers, the popup renderer and the shortcut router.
///
/// The trigger lock is held from the rebuild decision through the install,
/// so the installed menu always reflects the last decision taken. The host
/// must not deliver lifecycle signals synchronously from
/// `set_application_menu`.
pub struct WindowMenu {
    actions: Arc<ActionContext>,
    builder: MenuTreeBuilder,
    registry: ActiveMenuRegistry,
    trigger: Mutex<RebuildTrigger>,
    platform: Platform,
}

impl WindowMenu {
    pub fn new(actions: Arc<ActionContext>) -> Self {
        WindowMenu::with_platform(actions, Platform::current())
    }

    pub fn with_platform(actions: Arc<ActionContext>, platform: Platform) -> Self {
        WindowMenu {
            builder: MenuTreeBuilder::new(Arc::clone(&actions)),
            registry: ActiveMenuRegistry::new(Arc::clone(&actions.host)),
            trigger: Mutex::new(RebuildTrigger::new()),
            actions,
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn registry(&self) -> &ActiveMenuRegistry {
        &self.registry
    }

    /// Install the startup menu. No window exists yet at this point.
    pub fn setup(&self) {
        self.set_application_menu(ContextOverrides::no_windows());
    }

    /// Read the current window/tab state from the host.
    pub fn sample_context(&self) -> ContextSnapshot {
        self.sample_window(self.actions.host.focused_window())
    }

    /// Every window-specific field comes from `win`.
    fn sample_window(&self, win: Option<WindowId>) -> ContextSnapshot {
        let host = &self.actions.host;
        let mut ctx = ContextSnapshot::new(self.platform);
        ctx.has_any_window = host.has_windows();

        if let Some(win) = win {
            let url = self.actions.tabs.active(win).map(|tab| tab.url);
            ctx = ctx
                .with_url(url, &self.actions.settings.drive_scheme)
                .with_app_window(host.is_app_window(win))
                .with_always_on_top(host.is_always_on_top(win));
        }
        ctx
    }

    /// Rebuild from a fresh sample with `overrides` merged on top, and install.
    pub fn set_application_menu(&self, overrides: ContextOverrides) {
        let _trigger = self.trigger.lock();
        self.rebuild(overrides, self.actions.host.focused_window());
    }

    pub fn on_window_focused(&self, win: WindowId) {
        let mut trigger = self.trigger.lock();
        let url = self.actions.tabs.active(win).map(|tab| tab.url);
        let decision = trigger.on_window_focus_changed(url);
        self.apply(decision, Some(win), "window focused");
    }

    pub fn on_window_created(&self) {
        let mut trigger = self.trigger.lock();
        let decision = trigger.on_window_created();
        self.apply(decision, self.actions.host.focused_window(), "window created");
    }

    pub fn on_all_windows_closed(&self) {
        let mut trigger = self.trigger.lock();
        let decision = trigger.on_all_windows_closed();
        self.apply(decision, None, "all windows closed");
    }

    /// The active tab of `win` navigated to `url`.
    pub fn on_set_current_location(&self, win: WindowId, url: Option<&str>) {
        let mut trigger = self.trigger.lock();
        let is_focused = self.actions.host.focused_window() == Some(win);
        let decision = trigger.on_active_location_changed(is_focused, url);
        self.apply(decision, Some(win), "location changed");
    }

    /// Behaviour-free view of the installed menu for the popup renderer.
    pub fn get_toolbar_menu(&self) -> ToolbarView {
        self.registry.project_toolbar()
    }

    /// Invoke the entry `id` of the top-level menu titled `label`.
    ///
    /// The application menu also answers to its displayed title, the
    /// configured app name, unless that name is itself a menu label.
    pub fn trigger_menu_item_by_id(&self, label: &str, id: &str) -> Result<bool, MenuError> {
        let label = match label.parse::<MenuLabel>() {
            Ok(label) => label,
            Err(_) if label == self.actions.settings.app_name => MenuLabel::App,
            Err(e) => {
                log::warn!("Menu item {} requested from unknown menu {:?}", id, label);
                return Err(e);
            }
        };
        self.registry.dispatch(label, id)
    }

    // Callers hold the trigger lock.
    fn apply(&self, decision: Option<ContextOverrides>, win: Option<WindowId>, reason: &str) {
        match decision {
            Some(overrides) => {
                log::debug!("Rebuilding application menu: {}", reason);
                self.rebuild(overrides, win);
            }
            None => log::debug!("Menu unchanged after {}", reason),
        }
    }

    fn rebuild(&self, overrides: ContextOverrides, win: Option<WindowId>) {
        let ctx = overrides.apply(self.sample_window(win), &self.actions.settings.drive_scheme);
        self.registry.install(self.builder.build(&ctx));
    }
}
