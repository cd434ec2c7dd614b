//! Window toolkit stand-ins that log what a real shell would do.
//!
//! One window at most. Dialogs and drive flows are unavailable, so every
//! flow resolves to an error and the leaf action drops it.

use std::path::PathBuf;

use parking_lot::Mutex;
use wayline_core::error::FlowError;
use wayline_core::host::{
    FlowFuture, FlowRunner, Host, TabCommand, TabHandle, TabId, TabRegistry, WindowCommand,
    WindowId,
};
use wayline_core::menu::{MenuDescriptor, MenuRole};

const MAIN_WINDOW: WindowId = 1;

struct WindowState {
    open: bool,
    app_window: bool,
    always_on_top: bool,
    installs: usize,
}

pub struct HeadlessHost {
    state: Mutex<WindowState>,
}

impl HeadlessHost {
    pub fn new(open: bool, app_window: bool, always_on_top: bool) -> Self {
        HeadlessHost {
            state: Mutex::new(WindowState {
                open,
                app_window,
                always_on_top,
                installs: 0,
            }),
        }
    }

    pub fn installs(&self) -> usize {
        self.state.lock().installs
    }

    pub fn main_window() -> WindowId {
        MAIN_WINDOW
    }
}

impl Host for HeadlessHost {
    fn focused_window(&self) -> Option<WindowId> {
        self.state.lock().open.then_some(MAIN_WINDOW)
    }

    fn has_windows(&self) -> bool {
        self.state.lock().open
    }

    fn is_app_window(&self, _win: WindowId) -> bool {
        self.state.lock().app_window
    }

    fn is_always_on_top(&self, _win: WindowId) -> bool {
        self.state.lock().always_on_top
    }

    fn set_application_menu(&self, descriptor: &MenuDescriptor) {
        self.state.lock().installs += 1;
        log::info!("menu installed: {:?}", descriptor.labels());
    }

    fn create_shell_window(&self, pages: Vec<String>) -> WindowId {
        self.state.lock().open = true;
        log::info!("window {} created with pages {:?}", MAIN_WINDOW, pages);
        MAIN_WINDOW
    }

    fn window_command(&self, win: WindowId, command: WindowCommand) {
        let mut state = self.state.lock();
        match command {
            WindowCommand::Close => state.open = false,
            WindowCommand::ToggleAlwaysOnTop => state.always_on_top = !state.always_on_top,
            _ => {}
        }
        log::info!("window {}: {:?}", win, command);
    }

    fn perform_role(&self, role: MenuRole) {
        log::info!("role: {:?}", role);
    }

    fn close_focused_devtools(&self) -> bool {
        log::info!("no devtools host to close");
        false
    }

    fn flush_name_cache(&self) {
        log::info!("name cache flushed");
    }

    fn quit(&self) {
        log::info!("quit requested");
    }
}

struct TabState {
    active: Option<TabHandle>,
    next_id: TabId,
}

pub struct HeadlessTabs {
    state: Mutex<TabState>,
}

impl HeadlessTabs {
    pub fn new(url: Option<&str>) -> Self {
        let tabs = HeadlessTabs {
            state: Mutex::new(TabState {
                active: None,
                next_id: 1,
            }),
        };
        if let Some(url) = url {
            tabs.navigate(url);
        }
        tabs
    }

    /// Point the active tab at `url`, opening one if needed.
    pub fn navigate(&self, url: &str) {
        let mut state = self.state.lock();
        match state.active.as_mut() {
            Some(tab) => tab.url = url.to_string(),
            None => {
                let id = state.next_id;
                state.next_id += 1;
                state.active = Some(TabHandle {
                    id,
                    url: url.to_string(),
                    title: url.to_string(),
                    sidebar_active: false,
                });
            }
        }
    }
}

impl TabRegistry for HeadlessTabs {
    fn active(&self, _win: WindowId) -> Option<TabHandle> {
        self.state.lock().active.clone()
    }

    fn all(&self, _win: WindowId) -> Vec<TabId> {
        self.state.lock().active.iter().map(|tab| tab.id).collect()
    }

    fn create(&self, win: WindowId, url: Option<&str>, focus_location_bar: bool) {
        log::info!(
            "window {}: new tab {} (focus location bar: {})",
            win,
            url.unwrap_or("<default page>"),
            focus_location_bar
        );
    }

    fn remove(&self, win: WindowId, tab: TabId) {
        log::info!("window {}: close tab {}", win, tab);
    }

    fn set_active(&self, win: WindowId, tab: TabId) {
        log::info!("window {}: activate tab {}", win, tab);
    }

    fn set_active_index(&self, win: WindowId, index: usize) {
        log::info!("window {}: activate tab at {}", win, index);
    }

    fn change_active_by(&self, win: WindowId, delta: i32) {
        log::info!("window {}: move active tab by {}", win, delta);
    }

    fn reopen_last_removed(&self, win: WindowId) {
        log::info!("window {}: reopen last closed tab", win);
    }

    fn pop_out(&self, tab: TabId) {
        log::info!("pop out tab {}", tab);
    }

    fn tab_command(&self, tab: TabId, command: TabCommand) {
        log::info!("tab {}: {:?}", tab, command);
    }
}

pub struct HeadlessFlows;

impl HeadlessFlows {
    fn unavailable<T: Send + 'static>(what: &str) -> FlowFuture<T> {
        let message = format!("{} is not available without a window toolkit", what);
        Box::pin(async move { Err(FlowError::Failed(message)) })
    }
}

impl FlowRunner for HeadlessFlows {
    fn new_drive(&self, _win: WindowId) -> FlowFuture<String> {
        HeadlessFlows::unavailable("the new drive flow")
    }

    fn new_drive_from_folder(&self, _folder: PathBuf) -> FlowFuture<String> {
        HeadlessFlows::unavailable("the new drive flow")
    }

    fn clone_drive(&self, _win: WindowId, _url: String) -> FlowFuture<String> {
        HeadlessFlows::unavailable("the clone flow")
    }

    fn fork_drive(&self, _win: WindowId, _url: String) -> FlowFuture<String> {
        HeadlessFlows::unavailable("the fork flow")
    }

    fn drive_properties(&self, _win: WindowId, _key: String) -> FlowFuture<()> {
        HeadlessFlows::unavailable("the properties dialog")
    }

    fn choose_folder(&self) -> FlowFuture<PathBuf> {
        Box::pin(async { Err(FlowError::Cancelled) })
    }

    fn choose_save_path(&self, _title: String) -> FlowFuture<PathBuf> {
        Box::pin(async { Err(FlowError::Cancelled) })
    }

    fn download(&self, _win: WindowId, _url: String, _save_as: PathBuf) -> FlowFuture<()> {
        HeadlessFlows::unavailable("downloading")
    }
}
