//! Recording fakes of the collaborator traits, shared by the unit tests.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::actions::ActionContext;
use crate::builder::MenuTreeBuilder;
use crate::error::FlowError;
use crate::host::{
    FlowFuture, FlowRunner, Host, TabCommand, TabHandle, TabId, TabRegistry, WindowCommand,
    WindowId,
};
use crate::menu::{MenuDescriptor, MenuLabel, MenuRole};
use crate::settings::MenuSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    SetMenu(Vec<MenuLabel>),
    CreateWindow(Vec<String>),
    Window(WindowId, WindowCommand),
    Role(MenuRole),
    CloseDevTools,
    FlushNameCache,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabCall {
    Create(WindowId, Option<String>, bool),
    Remove(WindowId, TabId),
    SetActive(WindowId, TabId),
    SetActiveIndex(WindowId, usize),
    ChangeActiveBy(WindowId, i32),
    ReopenLastRemoved(WindowId),
    PopOut(TabId),
    Command(TabId, TabCommand),
}

struct HostState {
    focused: Option<WindowId>,
    has_windows: bool,
    app_window: bool,
    app_windows: HashSet<WindowId>,
    always_on_top: bool,
    next_window: WindowId,
    calls: Vec<HostCall>,
}

pub struct RecordingHost {
    state: Mutex<HostState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        RecordingHost {
            state: Mutex::new(HostState {
                focused: None,
                has_windows: false,
                app_window: false,
                app_windows: HashSet::new(),
                always_on_top: false,
                next_window: 100,
                calls: Vec::new(),
            }),
        }
    }

    pub fn focus(&self, win: Option<WindowId>) {
        let mut state = self.state.lock();
        state.focused = win;
        if win.is_some() {
            state.has_windows = true;
        }
    }

    pub fn set_has_windows(&self, has_windows: bool) {
        self.state.lock().has_windows = has_windows;
    }

    pub fn set_app_window(&self, app_window: bool) {
        self.state.lock().app_window = app_window;
    }

    /// Mark only `win` as an app window.
    pub fn mark_app_window(&self, win: WindowId) {
        self.state.lock().app_windows.insert(win);
    }

    pub fn set_always_on_top(&self, always_on_top: bool) {
        self.state.lock().always_on_top = always_on_top;
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().calls.clone()
    }

    pub fn menu_installs(&self) -> Vec<Vec<MenuLabel>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::SetMenu(labels) => Some(labels),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.state.lock().calls.push(call);
    }
}

impl Host for RecordingHost {
    fn focused_window(&self) -> Option<WindowId> {
        self.state.lock().focused
    }

    fn has_windows(&self) -> bool {
        self.state.lock().has_windows
    }

    fn is_app_window(&self, win: WindowId) -> bool {
        let state = self.state.lock();
        state.app_window || state.app_windows.contains(&win)
    }

    fn is_always_on_top(&self, _win: WindowId) -> bool {
        self.state.lock().always_on_top
    }

    fn set_application_menu(&self, descriptor: &MenuDescriptor) {
        self.record(HostCall::SetMenu(descriptor.labels()));
    }

    fn create_shell_window(&self, pages: Vec<String>) -> WindowId {
        let mut state = self.state.lock();
        let win = state.next_window;
        state.next_window += 1;
        state.calls.push(HostCall::CreateWindow(pages));
        win
    }

    fn window_command(&self, win: WindowId, command: WindowCommand) {
        self.record(HostCall::Window(win, command));
    }

    fn perform_role(&self, role: MenuRole) {
        self.record(HostCall::Role(role));
    }

    fn close_focused_devtools(&self) -> bool {
        self.record(HostCall::CloseDevTools);
        true
    }

    fn flush_name_cache(&self) {
        self.record(HostCall::FlushNameCache);
    }

    fn quit(&self) {
        self.record(HostCall::Quit);
    }
}

struct TabState {
    active: Option<TabHandle>,
    all: Vec<TabId>,
    calls: Vec<TabCall>,
    pause: Option<(Sender<()>, Receiver<()>)>,
}

pub struct RecordingTabs {
    state: Mutex<TabState>,
}

impl RecordingTabs {
    pub fn new() -> Self {
        RecordingTabs {
            state: Mutex::new(TabState {
                active: None,
                all: Vec::new(),
                calls: Vec::new(),
                pause: None,
            }),
        }
    }

    pub fn set_active_tab(&self, id: TabId, url: &str, sidebar_active: bool) {
        self.state.lock().active = Some(TabHandle {
            id,
            url: url.to_string(),
            title: format!("Page {}", id),
            sidebar_active,
        });
    }

    pub fn set_all(&self, all: Vec<TabId>) {
        self.state.lock().all = all;
    }

    pub fn calls(&self) -> Vec<TabCall> {
        self.state.lock().calls.clone()
    }

    /// The next `active` lookup reports on the first channel, then blocks
    /// until the second one is signalled. It answers with the tab that was
    /// active when it was entered.
    pub fn pause_next_active(&self) -> (Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        self.state.lock().pause = Some((entered_tx, release_rx));
        (entered_rx, release_tx)
    }

    fn record(&self, call: TabCall) {
        self.state.lock().calls.push(call);
    }
}

impl TabRegistry for RecordingTabs {
    fn active(&self, _win: WindowId) -> Option<TabHandle> {
        let (active, pause) = {
            let mut state = self.state.lock();
            (state.active.clone(), state.pause.take())
        };
        if let Some((entered, release)) = pause {
            let _ = entered.send(());
            let _ = release.recv();
        }
        active
    }

    fn all(&self, _win: WindowId) -> Vec<TabId> {
        self.state.lock().all.clone()
    }

    fn create(&self, win: WindowId, url: Option<&str>, focus_location_bar: bool) {
        self.record(TabCall::Create(
            win,
            url.map(str::to_string),
            focus_location_bar,
        ));
    }

    fn remove(&self, win: WindowId, tab: TabId) {
        self.record(TabCall::Remove(win, tab));
    }

    fn set_active(&self, win: WindowId, tab: TabId) {
        self.record(TabCall::SetActive(win, tab));
    }

    fn set_active_index(&self, win: WindowId, index: usize) {
        self.record(TabCall::SetActiveIndex(win, index));
    }

    fn change_active_by(&self, win: WindowId, delta: i32) {
        self.record(TabCall::ChangeActiveBy(win, delta));
    }

    fn reopen_last_removed(&self, win: WindowId) {
        self.record(TabCall::ReopenLastRemoved(win));
    }

    fn pop_out(&self, tab: TabId) {
        self.record(TabCall::PopOut(tab));
    }

    fn tab_command(&self, tab: TabId, command: TabCommand) {
        self.record(TabCall::Command(tab, command));
    }
}

#[derive(Debug, Clone)]
pub enum FlowScript {
    /// URL-returning flows resolve to the given URL; dialogs pick fixed paths.
    Succeed(String),
    Cancel,
}

struct FlowState {
    script: FlowScript,
    requests: Vec<String>,
}

pub struct ScriptedFlows {
    state: Mutex<FlowState>,
}

impl ScriptedFlows {
    pub fn new() -> Self {
        ScriptedFlows {
            state: Mutex::new(FlowState {
                script: FlowScript::Cancel,
                requests: Vec::new(),
            }),
        }
    }

    pub fn script(&self, script: FlowScript) {
        self.state.lock().script = script;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    fn answer<T: Send + 'static>(
        &self,
        request: String,
        value: impl FnOnce(&str) -> T,
    ) -> FlowFuture<T> {
        let mut state = self.state.lock();
        state.requests.push(request);
        let result = match &state.script {
            FlowScript::Succeed(url) => Ok(value(url.as_str())),
            FlowScript::Cancel => Err(FlowError::Cancelled),
        };
        Box::pin(async move { result })
    }
}

impl FlowRunner for ScriptedFlows {
    fn new_drive(&self, _win: WindowId) -> FlowFuture<String> {
        self.answer("new-drive".to_string(), str::to_string)
    }

    fn new_drive_from_folder(&self, folder: PathBuf) -> FlowFuture<String> {
        self.answer(
            format!("from-folder {}", folder.display()),
            str::to_string,
        )
    }

    fn clone_drive(&self, _win: WindowId, url: String) -> FlowFuture<String> {
        self.answer(format!("clone {}", url), str::to_string)
    }

    fn fork_drive(&self, _win: WindowId, url: String) -> FlowFuture<String> {
        self.answer(format!("fork {}", url), str::to_string)
    }

    fn drive_properties(&self, _win: WindowId, key: String) -> FlowFuture<()> {
        self.answer(format!("properties {}", key), |_| ())
    }

    fn choose_folder(&self) -> FlowFuture<PathBuf> {
        self.answer("choose-folder".to_string(), |_| PathBuf::from("/tmp/site"))
    }

    fn choose_save_path(&self, title: String) -> FlowFuture<PathBuf> {
        self.answer(format!("save-path {}", title), |_| {
            PathBuf::from("/tmp/page.html")
        })
    }

    fn download(&self, _win: WindowId, url: String, _save_as: PathBuf) -> FlowFuture<()> {
        self.answer(format!("download {}", url), |_| ())
    }
}

pub struct Harness {
    pub host: Arc<RecordingHost>,
    pub tabs: Arc<RecordingTabs>,
    pub flows: Arc<ScriptedFlows>,
    pub actions: Arc<ActionContext>,
}

impl Harness {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Harness::with_settings(runtime, MenuSettings::default())
    }

    pub fn with_settings(runtime: tokio::runtime::Handle, settings: MenuSettings) -> Self {
        let host = Arc::new(RecordingHost::new());
        let tabs = Arc::new(RecordingTabs::new());
        let flows = Arc::new(ScriptedFlows::new());
        let actions = ActionContext::new(
            host.clone(),
            tabs.clone(),
            flows.clone(),
            Arc::new(settings),
            runtime,
        );
        Harness {
            host,
            tabs,
            flows,
            actions,
        }
    }

    pub fn builder(&self) -> MenuTreeBuilder {
        MenuTreeBuilder::new(self.actions.clone())
    }
}

/// A runtime for synchronous tests; spawned flows queue but never run.
pub fn idle_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
}

/// Let spawned flow tasks run to completion.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
