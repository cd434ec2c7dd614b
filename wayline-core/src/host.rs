//! Collaborator contracts consumed by the menu engine.
//!
//! The windowing toolkit, the tab registry and the flow runners are owned by
//! the embedding shell. The engine only calls through these traits; leaf
//! actions forward to them and never look at their internals.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::error::FlowError;
use crate::menu::{MenuDescriptor, MenuRole};

pub type WindowId = u64;
pub type TabId = u64;

/// Boxed future returned by flow runners and dialogs.
pub type FlowFuture<T> = Pin<Box<dyn Future<Output = Result<T, FlowError>> + Send + 'static>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHandle {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub sidebar_active: bool,
}

/// Side panels hosted next to a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidePanel {
    SiteInfo,
    Editor,
    FilesExplorer,
    Terminal,
}

impl SidePanel {
    pub fn as_str(self) -> &'static str {
        match self {
            SidePanel::SiteInfo => "site-info-app",
            SidePanel::Editor => "editor-app",
            SidePanel::FilesExplorer => "files-explorer-app",
            SidePanel::Terminal => "web-term",
        }
    }
}

/// Primitives applied to a shell window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    Close,
    ReloadShell,
    OpenShellDevTools,
    ToggleAlwaysOnTop,
    ToggleShellInterface,
    FocusLocationBar,
    CreateBookmark,
}

/// Primitives applied to the page hosted by a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabCommand {
    Reload,
    ReloadIgnoringCache,
    GoBack,
    GoForward,
    ToggleDevTools,
    Print,
    ShowFind,
    FindNext,
    FindPrevious,
    ShowPanel(SidePanel),
    CloseSidebar,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleLiveReloading,
}

pub trait Host: Send + Sync {
    fn focused_window(&self) -> Option<WindowId>;
    fn has_windows(&self) -> bool;
    fn is_app_window(&self, win: WindowId) -> bool;
    fn is_always_on_top(&self, win: WindowId) -> bool;

    /// Display `descriptor` as the native application menu.
    fn set_application_menu(&self, descriptor: &MenuDescriptor);

    /// Open a new shell window with the given pages (a blank tab if empty).
    /// Commands issued against the returned id must be queued by the host
    /// until the window is shown.
    fn create_shell_window(&self, pages: Vec<String>) -> WindowId;

    fn window_command(&self, win: WindowId, command: WindowCommand);
    fn perform_role(&self, role: MenuRole);

    /// Close the devtools of whatever devtools host currently has focus.
    /// Returns false when there is none.
    fn close_focused_devtools(&self) -> bool;

    fn flush_name_cache(&self);
    fn quit(&self);
}

pub trait TabRegistry: Send + Sync {
    fn active(&self, win: WindowId) -> Option<TabHandle>;
    fn all(&self, win: WindowId) -> Vec<TabId>;

    /// Create a tab and make it active. `url: None` opens the default page.
    fn create(&self, win: WindowId, url: Option<&str>, focus_location_bar: bool);
    fn remove(&self, win: WindowId, tab: TabId);
    fn set_active(&self, win: WindowId, tab: TabId);
    fn set_active_index(&self, win: WindowId, index: usize);
    fn change_active_by(&self, win: WindowId, delta: i32);
    fn reopen_last_removed(&self, win: WindowId);
    fn pop_out(&self, tab: TabId);
    fn tab_command(&self, tab: TabId, command: TabCommand);
}

/// Long-running user flows. Each resolves to the URL to open afterwards,
/// or fails with [`FlowError::Cancelled`] when the user backs out.
pub trait FlowRunner: Send + Sync {
    fn new_drive(&self, win: WindowId) -> FlowFuture<String>;
    fn new_drive_from_folder(&self, folder: PathBuf) -> FlowFuture<String>;
    fn clone_drive(&self, win: WindowId, url: String) -> FlowFuture<String>;
    fn fork_drive(&self, win: WindowId, url: String) -> FlowFuture<String>;
    fn drive_properties(&self, win: WindowId, key: String) -> FlowFuture<()>;

    fn choose_folder(&self) -> FlowFuture<PathBuf>;
    fn choose_save_path(&self, title: String) -> FlowFuture<PathBuf>;
    fn download(&self, win: WindowId, url: String, save_as: PathBuf) -> FlowFuture<()>;
}
