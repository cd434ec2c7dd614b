//! Context → menu tree rules.
//!
//! [`MenuTreeBuilder::build`] is a pure function of the [`ContextSnapshot`]:
//! enablement, labels, accelerators and ordering are all decided here, once,
//! at build time. Behaviour is attached as closures but never run while
//! building.
//!
//! Enablement gates:
//!
//! - `window`: at least one window exists. Anything that acts on a focused
//!   window or tab requires it.
//! - `ordinary`: a window exists and it is not an app window. Entries that
//!   only make sense in a full browsing context require it.
//! - `addressable`: the active URL is a drive URL. Drive-specific entries
//!   require it.
//!
//! Files Explorer is the one additive rule: `ordinary || addressable`.

use std::sync::Arc;

use crate::accel;
use crate::actions::ActionContext;
use crate::context::ContextSnapshot;
use crate::host::{SidePanel, TabCommand, WindowCommand};
use crate::menu::{MenuDescriptor, MenuItemSpec, MenuLabel, MenuRole, TopLevelMenu};

/// Number of positional "Tab N" shortcuts before "Last Tab".
pub const TAB_SHORTCUTS: usize = 8;

pub struct MenuTreeBuilder {
    actions: Arc<ActionContext>,
}

impl MenuTreeBuilder {
    pub fn new(actions: Arc<ActionContext>) -> Self {
        MenuTreeBuilder { actions }
    }

    pub fn build(&self, ctx: &ContextSnapshot) -> MenuDescriptor {
        let mut menus = Vec::with_capacity(9);
        if ctx.platform.is_mac() {
            menus.push(self.app_menu(ctx));
        }
        menus.push(self.file_menu(ctx));
        menus.push(self.edit_menu(ctx));
        menus.push(self.view_menu(ctx));
        menus.push(self.drive_menu(ctx));
        menus.push(self.history_menu(ctx));
        menus.push(self.developer_menu(ctx));
        menus.push(self.window_menu(ctx));
        menus.push(self.help_menu(ctx));

        log::debug!(
            "Built menu: platform={:?} windows={} app_window={} addressable={}",
            ctx.platform,
            ctx.has_any_window,
            ctx.app_window(),
            ctx.addressable()
        );
        MenuDescriptor { menus }
    }

    fn accel(&self, ctx: &ContextSnapshot, id: Option<&str>, default: Option<&str>) -> Option<String> {
        accel::get_accel(
            id,
            default,
            &self.actions.settings.accelerator_overrides,
            ctx.platform,
        )
    }

    /// An addressable leaf entry.
    fn item(
        &self,
        ctx: &ContextSnapshot,
        id: &str,
        label: &str,
        accelerator: Option<&str>,
        enabled: bool,
        f: impl Fn(&ActionContext) + Send + Sync + 'static,
    ) -> MenuItemSpec {
        MenuItemSpec::action(label, self.actions.bind(f))
            .with_id(id)
            .with_accelerator(self.accel(ctx, Some(id), accelerator))
            .enabled(enabled)
    }

    /// A leaf entry without an id.
    fn anon(
        &self,
        ctx: &ContextSnapshot,
        label: &str,
        accelerator: Option<&str>,
        enabled: bool,
        f: impl Fn(&ActionContext) + Send + Sync + 'static,
    ) -> MenuItemSpec {
        MenuItemSpec::action(label, self.actions.bind(f))
            .with_accelerator(self.accel(ctx, None, accelerator))
            .enabled(enabled)
    }

    /// A leaf entry whose behaviour is a native role.
    fn role(
        &self,
        ctx: &ContextSnapshot,
        id: Option<&str>,
        label: &str,
        accelerator: Option<&str>,
        enabled: bool,
        role: MenuRole,
    ) -> MenuItemSpec {
        let mut item = MenuItemSpec::action(label, self.actions.bind(move |a| a.role(role)))
            .with_accelerator(self.accel(ctx, id, accelerator))
            .with_role(role)
            .enabled(enabled);
        item.id = id.map(str::to_string);
        item
    }

    fn app_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let settings = &self.actions.settings;
        let prefs_url = settings.internal_url("settings");

        let mut menu = TopLevelMenu::new(
            MenuLabel::App,
            vec![
                self.anon(ctx, "Preferences", Some("Cmd+,"), true, move |a| {
                    a.open_page(&prefs_url)
                }),
                MenuItemSpec::separator(),
                MenuItemSpec::submenu("Services", Vec::new()).with_role(MenuRole::Services),
                MenuItemSpec::separator(),
                self.role(
                    ctx,
                    None,
                    &format!("Hide {}", settings.app_name),
                    Some("Cmd+H"),
                    true,
                    MenuRole::Hide,
                ),
                self.role(ctx, None, "Hide Others", Some("Cmd+Alt+H"), true, MenuRole::HideOthers),
                self.role(ctx, None, "Show All", None, true, MenuRole::Unhide),
                MenuItemSpec::separator(),
                self.anon(ctx, "Quit", Some("Cmd+Q"), true, |a| a.quit()),
            ],
        );
        menu.title = settings.app_name.clone();
        menu
    }

    fn file_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let ordinary = ctx.ordinary();

        TopLevelMenu::new(
            MenuLabel::File,
            vec![
                self.item(ctx, "newTab", "New Tab", Some("CmdOrCtrl+T"), true, |a| a.new_tab()),
                self.item(ctx, "newWindow", "New Window", Some("CmdOrCtrl+N"), true, |a| {
                    a.new_window()
                }),
                self.item(
                    ctx,
                    "reopenClosedTab",
                    "Reopen Closed Tab",
                    Some("CmdOrCtrl+Shift+T"),
                    true,
                    |a| a.reopen_closed_tab(),
                ),
                MenuItemSpec::separator(),
                self.item(
                    ctx,
                    "savePageAs",
                    "Save Page As...",
                    Some("CmdOrCtrl+S"),
                    ordinary,
                    |a| a.save_page_as(),
                ),
                self.item(ctx, "print", "Print...", Some("CmdOrCtrl+P"), window, |a| {
                    a.tab(TabCommand::Print)
                }),
                MenuItemSpec::separator(),
                self.item(ctx, "closeTab", "Close Tab", Some("CmdOrCtrl+W"), window, |a| {
                    a.close_tab()
                }),
                self.item(
                    ctx,
                    "closeWindow",
                    "Close Window",
                    Some("CmdOrCtrl+Shift+W"),
                    window,
                    |a| a.close_window(),
                ),
            ],
        )
    }

    fn edit_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let ordinary = ctx.ordinary();

        TopLevelMenu::new(
            MenuLabel::Edit,
            vec![
                self.role(ctx, Some("undo"), "Undo", Some("CmdOrCtrl+Z"), window, MenuRole::Undo),
                self.role(
                    ctx,
                    Some("redo"),
                    "Redo",
                    Some("Shift+CmdOrCtrl+Z"),
                    window,
                    MenuRole::Redo,
                ),
                MenuItemSpec::separator(),
                self.role(ctx, Some("cut"), "Cut", Some("CmdOrCtrl+X"), window, MenuRole::Cut),
                self.role(ctx, Some("copy"), "Copy", Some("CmdOrCtrl+C"), window, MenuRole::Copy),
                self.role(
                    ctx,
                    Some("paste"),
                    "Paste",
                    Some("CmdOrCtrl+V"),
                    window,
                    MenuRole::Paste,
                ),
                self.role(
                    ctx,
                    Some("selectAll"),
                    "Select All",
                    Some("CmdOrCtrl+A"),
                    window,
                    MenuRole::SelectAll,
                ),
                MenuItemSpec::separator(),
                self.item(ctx, "findInPage", "Find in Page", Some("CmdOrCtrl+F"), ordinary, |a| {
                    a.tab(TabCommand::ShowFind)
                }),
                self.item(ctx, "findNext", "Find Next", Some("CmdOrCtrl+G"), ordinary, |a| {
                    a.tab(TabCommand::FindNext)
                }),
                self.item(
                    ctx,
                    "findPrevious",
                    "Find Previous",
                    Some("Shift+CmdOrCtrl+G"),
                    ordinary,
                    |a| a.tab(TabCommand::FindPrevious),
                ),
            ],
        )
    }

    fn view_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let ordinary = ctx.ordinary();
        let files_explorer = ordinary || ctx.addressable();

        TopLevelMenu::new(
            MenuLabel::View,
            vec![
                self.item(ctx, "reload", "Reload", Some("CmdOrCtrl+R"), window, |a| {
                    a.tab(TabCommand::Reload)
                }),
                self.item(
                    ctx,
                    "hardReload",
                    "Hard Reload (Clear Cache)",
                    Some("CmdOrCtrl+Shift+R"),
                    window,
                    |a| a.hard_reload(),
                ),
                MenuItemSpec::separator(),
                self.item(ctx, "toggleSiteInfo", "Site Information", None, ordinary, |a| {
                    a.show_panel(SidePanel::SiteInfo)
                }),
                self.item(ctx, "toggleEditor", "Editor", Some("CmdOrCtrl+B"), ordinary, |a| {
                    a.show_panel(SidePanel::Editor)
                }),
                self.item(
                    ctx,
                    "toggleFilesExplorer",
                    "Files Explorer",
                    None,
                    files_explorer,
                    |a| a.show_panel(SidePanel::FilesExplorer),
                ),
                self.item(ctx, "toggleTerminal", "Terminal", Some("Ctrl+`"), ordinary, |a| {
                    a.show_panel(SidePanel::Terminal)
                }),
                MenuItemSpec::separator(),
                self.item(ctx, "zoomIn", "Zoom In", Some("CmdOrCtrl+Plus"), window, |a| {
                    a.tab(TabCommand::ZoomIn)
                }),
                self.item(ctx, "zoomOut", "Zoom Out", Some("CmdOrCtrl+-"), window, |a| {
                    a.tab(TabCommand::ZoomOut)
                }),
                self.item(ctx, "actualSize", "Actual Size", Some("CmdOrCtrl+0"), window, |a| {
                    a.tab(TabCommand::ZoomReset)
                }),
            ],
        )
    }

    fn drive_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let addressable = ctx.addressable();
        let url = ctx.active_url.clone().unwrap_or_default();
        let (clone_url, fork_url, diff_url, props_url) =
            (url.clone(), url.clone(), url.clone(), url);

        TopLevelMenu::new(
            MenuLabel::Drive,
            vec![
                self.item(ctx, "newDrive", "New Hyperdrive", None, true, |a| a.new_drive()),
                self.item(
                    ctx,
                    "newDriveFromFolder",
                    "New Drive from Folder...",
                    None,
                    true,
                    |a| a.new_drive_from_folder(),
                ),
                MenuItemSpec::separator(),
                self.item(ctx, "cloneDrive", "Clone Drive", None, addressable, move |a| {
                    a.clone_drive(&clone_url)
                }),
                self.item(ctx, "forkDrive", "Fork Drive", None, addressable, move |a| {
                    a.fork_drive(&fork_url)
                }),
                self.item(ctx, "diffMerge", "Diff / Merge", None, addressable, move |a| {
                    a.diff_merge(&diff_url)
                }),
                MenuItemSpec::separator(),
                self.item(
                    ctx,
                    "driveProperties",
                    "Drive Properties",
                    None,
                    addressable,
                    move |a| a.drive_properties(&props_url),
                ),
            ],
        )
    }

    fn history_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let history_url = self.actions.settings.internal_url("history");
        let history_accel = if ctx.platform.is_mac() {
            "Cmd+Y"
        } else {
            "Ctrl+H"
        };

        let mut menu = TopLevelMenu::new(
            MenuLabel::History,
            vec![
                self.item(ctx, "back", "Back", Some("CmdOrCtrl+Left"), window, |a| {
                    a.tab(TabCommand::GoBack)
                }),
                self.item(ctx, "forward", "Forward", Some("CmdOrCtrl+Right"), window, |a| {
                    a.tab(TabCommand::GoForward)
                }),
                self.item(
                    ctx,
                    "showFullHistory",
                    "Show Full History",
                    Some(history_accel),
                    true,
                    move |a| a.open_page(&history_url),
                ),
                MenuItemSpec::separator(),
                self.item(
                    ctx,
                    "bookmarkThisPage",
                    "Bookmark this Page",
                    Some("CmdOrCtrl+D"),
                    window,
                    |a| a.window(WindowCommand::CreateBookmark),
                ),
            ],
        );
        menu.role = Some(MenuRole::History);
        menu
    }

    fn developer_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let settings = &self.actions.settings;
        let debug_page = |label: &str, path: &str| {
            let url = settings.internal_url(path);
            self.anon(ctx, label, None, window, move |a| a.open_in_focused(&url))
        };
        let devtools_accel = if ctx.platform.is_mac() {
            "Alt+CmdOrCtrl+I"
        } else {
            "Shift+CmdOrCtrl+I"
        };

        let advanced = MenuItemSpec::submenu(
            "Advanced Tools",
            vec![
                self.anon(ctx, "Reload Shell-Window", None, window, |a| {
                    a.window(WindowCommand::ReloadShell)
                }),
                self.anon(ctx, "Toggle Shell-Window DevTools", None, window, |a| {
                    a.window(WindowCommand::OpenShellDevTools)
                }),
                MenuItemSpec::separator(),
                debug_page("Open Hyperdrives Debug Page", "active-drives/"),
                debug_page("Open Dat-DNS Cache Page", "hyper-dns-cache/"),
                debug_page("Open Debug Log Page", "debug-log/"),
            ],
        );

        TopLevelMenu::new(
            MenuLabel::Developer,
            vec![
                advanced,
                self.item(
                    ctx,
                    "toggleDevTools",
                    "Toggle DevTools",
                    Some(devtools_accel),
                    window,
                    |a| a.tab(TabCommand::ToggleDevTools),
                ),
                self.item(
                    ctx,
                    "toggleLiveReloading",
                    "Toggle Live Reloading",
                    None,
                    ctx.addressable(),
                    |a| a.tab(TabCommand::ToggleLiveReloading),
                ),
            ],
        )
    }

    fn tab_shortcut(&self, ctx: &ContextSnapshot, position: usize) -> MenuItemSpec {
        self.item(
            ctx,
            &format!("gotoTab{}", position),
            &format!("Tab {}", position),
            Some(format!("CmdOrCtrl+{}", position).as_str()),
            ctx.has_any_window,
            move |a| a.goto_tab(position),
        )
    }

    fn window_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let window = ctx.has_any_window;
        let ordinary = ctx.ordinary();
        let mac = ctx.platform.is_mac();

        let mut shortcuts: Vec<MenuItemSpec> = (1..=TAB_SHORTCUTS)
            .map(|position| self.tab_shortcut(ctx, position))
            .collect();
        shortcuts.push(self.item(
            ctx,
            "gotoLastTab",
            "Last Tab",
            Some("CmdOrCtrl+9"),
            window,
            |a| a.goto_last_tab(),
        ));

        let always_on_top = MenuItemSpec::checkable(
            "Always on Top",
            ctx.always_on_top,
            self.actions
                .bind(|a| a.window(WindowCommand::ToggleAlwaysOnTop)),
        )
        .enabled(window);

        let mut items = vec![
            always_on_top,
            self.role(ctx, None, "Minimize", Some("CmdOrCtrl+M"), window, MenuRole::Minimize),
            self.role(
                ctx,
                None,
                "Full Screen",
                Some(if mac { "Ctrl+Cmd+F" } else { "F11" }),
                window,
                MenuRole::ToggleFullScreen,
            ),
            self.anon(
                ctx,
                "Toggle Browser UI",
                Some("CmdOrCtrl+Shift+H"),
                ordinary,
                |a| a.window(WindowCommand::ToggleShellInterface),
            ),
            MenuItemSpec::separator(),
            self.anon(ctx, "Focus Location Bar", Some("CmdOrCtrl+L"), true, |a| {
                a.focus_location_bar()
            }),
            MenuItemSpec::separator(),
            self.anon(
                ctx,
                "Next Tab",
                Some(if mac {
                    "Alt+CmdOrCtrl+Right"
                } else {
                    "CmdOrCtrl+PageDown"
                }),
                window,
                |a| a.change_tab_by(1),
            ),
            self.anon(
                ctx,
                "Previous Tab",
                Some(if mac {
                    "Alt+CmdOrCtrl+Left"
                } else {
                    "CmdOrCtrl+PageUp"
                }),
                window,
                |a| a.change_tab_by(-1),
            ),
            MenuItemSpec::submenu("Tab Shortcuts", shortcuts),
            self.anon(ctx, "Pop Out Tab", Some("Shift+CmdOrCtrl+P"), ordinary, |a| {
                a.pop_out_tab()
            }),
        ];
        if mac {
            items.push(MenuItemSpec::separator());
            items.push(self.role(ctx, None, "Bring All to Front", None, true, MenuRole::Front));
        }

        let mut menu = TopLevelMenu::new(MenuLabel::Window, items);
        menu.role = Some(MenuRole::Window);
        menu
    }

    fn help_menu(&self, ctx: &ContextSnapshot) -> TopLevelMenu {
        let settings = &self.actions.settings;
        let help_url = settings.help_url.clone();
        let portal_url = settings.developer_portal_url.clone();
        let issue_url = settings.report_issue_url.clone();

        let mut items = vec![
            self.item(ctx, "beakerHelp", "Beaker Help", Some("F1"), true, move |a| {
                a.open_in_focused(&help_url)
            }),
            self.item(ctx, "developerPortal", "Developer Portal", None, true, move |a| {
                a.open_in_focused(&portal_url)
            }),
            MenuItemSpec::separator(),
            self.item(ctx, "reportIssue", "Report Issue", None, true, move |a| {
                a.open_in_focused(&issue_url)
            }),
        ];
        if !ctx.platform.is_mac() {
            let about_url = settings.internal_url("settings");
            items.push(MenuItemSpec::separator());
            items.push(
                self.anon(ctx, "About", None, true, move |a| a.open_in_focused(&about_url))
                    .with_role(MenuRole::About),
            );
        }

        let mut menu = TopLevelMenu::new(MenuLabel::Help, items);
        menu.role = Some(MenuRole::Help);
        menu
    }
}
