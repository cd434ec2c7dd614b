//! Leaf behaviours attached to menu entries.
//!
//! Every action looks up the focused window at the moment it runs, not when
//! the menu was built. Flow failures and cancelled dialogs end the action
//! quietly; nothing here reports back into the menu engine.

use std::future::Future;
use std::sync::Arc;

use url::Url;

use crate::error::FlowError;
use crate::host::{
    FlowRunner, Host, SidePanel, TabCommand, TabRegistry, WindowCommand, WindowId,
};
use crate::menu::{MenuAction, MenuRole};
use crate::settings::MenuSettings;

pub struct ActionContext {
    pub host: Arc<dyn Host>,
    pub tabs: Arc<dyn TabRegistry>,
    pub flows: Arc<dyn FlowRunner>,
    pub settings: Arc<MenuSettings>,
    runtime: tokio::runtime::Handle,
}

impl ActionContext {
    pub fn new(
        host: Arc<dyn Host>,
        tabs: Arc<dyn TabRegistry>,
        flows: Arc<dyn FlowRunner>,
        settings: Arc<MenuSettings>,
        runtime: tokio::runtime::Handle,
    ) -> Arc<Self> {
        Arc::new(ActionContext {
            host,
            tabs,
            flows,
            settings,
            runtime,
        })
    }

    /// Wrap `f` as a [`MenuAction`] bound to this context.
    pub fn bind(
        self: &Arc<Self>,
        f: impl Fn(&ActionContext) + Send + Sync + 'static,
    ) -> MenuAction {
        let ctx = Arc::clone(self);
        Arc::new(move || f(ctx.as_ref()))
    }

    fn focused(&self) -> Option<WindowId> {
        self.host.focused_window()
    }

    /// Run `f` against the focused window, opening a new shell window first
    /// when there is none.
    fn with_window_or_create(&self, f: impl FnOnce(WindowId)) {
        let win = match self.focused() {
            Some(win) => win,
            None => self.host.create_shell_window(Vec::new()),
        };
        f(win);
    }

    fn active_tab_command(&self, command: TabCommand) {
        if let Some(tab) = self.focused().and_then(|win| self.tabs.active(win)) {
            self.tabs.tab_command(tab.id, command);
        }
    }

    fn window_command(&self, command: WindowCommand) {
        if let Some(win) = self.focused() {
            self.host.window_command(win, command);
        }
    }

    fn spawn_flow<F>(&self, name: &'static str, flow: F)
    where
        F: Future<Output = Result<(), FlowError>> + Send + 'static,
    {
        self.runtime.spawn(async move {
            if let Err(e) = flow.await {
                log::debug!("{} ended without follow-up: {}", name, e);
            }
        });
    }

    // ── Pages ────────────────────────────────────────────────────────────

    /// Open `url` in the focused window, or in a new window if none exists.
    pub fn open_page(&self, url: &str) {
        match self.focused() {
            Some(win) => self.tabs.create(win, Some(url), false),
            None => {
                self.host.create_shell_window(vec![url.to_string()]);
            }
        }
    }

    /// Open `url` in the focused window; does nothing without one.
    pub fn open_in_focused(&self, url: &str) {
        if let Some(win) = self.focused() {
            self.tabs.create(win, Some(url), false);
        }
    }

    // ── File ─────────────────────────────────────────────────────────────

    pub fn new_tab(&self) {
        match self.focused() {
            Some(win) => self.tabs.create(win, None, true),
            None => {
                self.host.create_shell_window(Vec::new());
            }
        }
    }

    pub fn new_window(&self) {
        self.host.create_shell_window(Vec::new());
    }

    pub fn reopen_closed_tab(&self) {
        self.with_window_or_create(|win| self.tabs.reopen_last_removed(win));
    }

    pub fn save_page_as(&self) {
        let Some(win) = self.focused() else { return };
        let Some(tab) = self.tabs.active(win) else { return };
        let flows = Arc::clone(&self.flows);
        self.spawn_flow("save-page-as", async move {
            let save_as = flows
                .choose_save_path(format!("Save {} as...", tab.title))
                .await?;
            flows.download(win, tab.url, save_as).await
        });
    }

    pub fn close_tab(&self) {
        match self.focused() {
            Some(win) => {
                if let Some(tab) = self.tabs.active(win) {
                    if tab.sidebar_active {
                        self.tabs.tab_command(tab.id, TabCommand::CloseSidebar);
                    } else {
                        self.tabs.remove(win, tab.id);
                    }
                }
            }
            None => {
                self.host.close_focused_devtools();
            }
        }
    }

    pub fn close_window(&self) {
        self.window_command(WindowCommand::Close);
    }

    // ── Edit / View / History ────────────────────────────────────────────

    pub fn tab(&self, command: TabCommand) {
        self.active_tab_command(command);
    }

    pub fn hard_reload(&self) {
        // a hard reload must not be served from stale name records
        self.host.flush_name_cache();
        self.active_tab_command(TabCommand::ReloadIgnoringCache);
    }

    pub fn show_panel(&self, panel: SidePanel) {
        self.active_tab_command(TabCommand::ShowPanel(panel));
    }

    pub fn window(&self, command: WindowCommand) {
        self.window_command(command);
    }

    pub fn role(&self, role: MenuRole) {
        self.host.perform_role(role);
    }

    pub fn quit(&self) {
        self.host.quit();
    }

    // ── Drive ────────────────────────────────────────────────────────────

    pub fn new_drive(&self) {
        self.with_window_or_create(|win| {
            let flows = Arc::clone(&self.flows);
            let tabs = Arc::clone(&self.tabs);
            self.spawn_flow("new-drive", async move {
                let url = flows.new_drive(win).await?;
                tabs.create(win, Some(&url), false);
                Ok(())
            });
        });
    }

    pub fn new_drive_from_folder(&self) {
        self.with_window_or_create(|win| {
            let flows = Arc::clone(&self.flows);
            let tabs = Arc::clone(&self.tabs);
            self.spawn_flow("new-drive-from-folder", async move {
                let folder = flows.choose_folder().await?;
                let url = flows.new_drive_from_folder(folder).await?;
                tabs.create(win, Some(&url), false);
                Ok(())
            });
        });
    }

    pub fn clone_drive(&self, drive_url: &str) {
        let Some(win) = self.focused() else { return };
        let flows = Arc::clone(&self.flows);
        let tabs = Arc::clone(&self.tabs);
        let drive_url = drive_url.to_string();
        self.spawn_flow("clone-drive", async move {
            let url = flows.clone_drive(win, drive_url).await?;
            tabs.create(win, Some(&url), false);
            Ok(())
        });
    }

    pub fn fork_drive(&self, drive_url: &str) {
        let Some(win) = self.focused() else { return };
        let flows = Arc::clone(&self.flows);
        let tabs = Arc::clone(&self.tabs);
        let drive_url = drive_url.to_string();
        self.spawn_flow("fork-drive", async move {
            let url = flows.fork_drive(win, drive_url).await?;
            tabs.create(win, Some(&url), false);
            Ok(())
        });
    }

    pub fn diff_merge(&self, drive_url: &str) {
        let url = diff_page_url(&self.settings, drive_url);
        self.open_in_focused(&url);
    }

    pub fn drive_properties(&self, drive_url: &str) {
        let Some(win) = self.focused() else { return };
        let Some(key) = drive_key(drive_url) else {
            log::debug!("No drive key in {}", drive_url);
            return;
        };
        let flows = Arc::clone(&self.flows);
        self.spawn_flow("drive-properties", async move {
            flows.drive_properties(win, key).await
        });
    }

    // ── Window ───────────────────────────────────────────────────────────

    pub fn focus_location_bar(&self) {
        self.with_window_or_create(|win| {
            self.host.window_command(win, WindowCommand::FocusLocationBar)
        });
    }

    pub fn change_tab_by(&self, delta: i32) {
        if let Some(win) = self.focused() {
            self.tabs.change_active_by(win, delta);
        }
    }

    /// Activate the tab at 1-based `position`.
    pub fn goto_tab(&self, position: usize) {
        if let Some(win) = self.focused() {
            self.tabs.set_active_index(win, position.saturating_sub(1));
        }
    }

    pub fn goto_last_tab(&self) {
        if let Some(win) = self.focused() {
            if let Some(last) = self.tabs.all(win).last() {
                self.tabs.set_active(win, *last);
            }
        }
    }

    pub fn pop_out_tab(&self) {
        if let Some(tab) = self.focused().and_then(|win| self.tabs.active(win)) {
            self.tabs.pop_out(tab.id);
        }
    }
}

/// The drive key of an addressable URL is its host, e.g. `hyper://<key>/path`.
pub fn drive_key(drive_url: &str) -> Option<String> {
    Url::parse(drive_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .filter(|key| !key.is_empty())
}

/// `<internal>://diff/?base=<drive_url>` with the base properly encoded.
pub fn diff_page_url(settings: &MenuSettings, drive_url: &str) -> String {
    let base = settings.internal_url("diff/");
    match Url::parse_with_params(&base, &[("base", drive_url)]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{}?base={}", base, drive_url),
    }
}
