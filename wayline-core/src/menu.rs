use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// Behaviour attached to a leaf entry at build time.
pub type MenuAction = Arc<dyn Fn() + Send + Sync>;

/// The closed set of top-level menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuLabel {
    /// The application-identity menu; only present on mac.
    App,
    File,
    Edit,
    View,
    Drive,
    History,
    Developer,
    Window,
    Help,
}

impl MenuLabel {
    pub const ALL: [MenuLabel; 9] = [
        MenuLabel::App,
        MenuLabel::File,
        MenuLabel::Edit,
        MenuLabel::View,
        MenuLabel::Drive,
        MenuLabel::History,
        MenuLabel::Developer,
        MenuLabel::Window,
        MenuLabel::Help,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MenuLabel::App => "App",
            MenuLabel::File => "File",
            MenuLabel::Edit => "Edit",
            MenuLabel::View => "View",
            MenuLabel::Drive => "Drive",
            MenuLabel::History => "History",
            MenuLabel::Developer => "Developer",
            MenuLabel::Window => "Window",
            MenuLabel::Help => "Help",
        }
    }
}

impl fmt::Display for MenuLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuLabel {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| MenuError::UnknownMenu(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItemKind {
    Action,
    Separator,
    Submenu,
    CheckableAction,
}

/// Native behaviours the host toolkit implements itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRole {
    Services,
    Hide,
    HideOthers,
    Unhide,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Minimize,
    ToggleFullScreen,
    Front,
    About,
    Window,
    Help,
    History,
}

/// One node of the menu tree.
#[derive(Clone)]
pub struct MenuItemSpec {
    pub id: Option<String>,
    pub kind: MenuItemKind,
    pub label: String,
    pub accelerator: Option<String>,
    pub enabled: bool,
    pub checked: Option<bool>,
    pub role: Option<MenuRole>,
    pub children: Vec<MenuItemSpec>,
    pub invoke: Option<MenuAction>,
}

impl MenuItemSpec {
    pub fn action(label: impl Into<String>, invoke: MenuAction) -> Self {
        MenuItemSpec {
            id: None,
            kind: MenuItemKind::Action,
            label: label.into(),
            accelerator: None,
            enabled: true,
            checked: None,
            role: None,
            children: Vec::new(),
            invoke: Some(invoke),
        }
    }

    pub fn checkable(label: impl Into<String>, checked: bool, invoke: MenuAction) -> Self {
        MenuItemSpec {
            kind: MenuItemKind::CheckableAction,
            checked: Some(checked),
            ..MenuItemSpec::action(label, invoke)
        }
    }

    pub fn separator() -> Self {
        MenuItemSpec {
            id: None,
            kind: MenuItemKind::Separator,
            label: String::new(),
            accelerator: None,
            enabled: true,
            checked: None,
            role: None,
            children: Vec::new(),
            invoke: None,
        }
    }

    pub fn submenu(label: impl Into<String>, children: Vec<MenuItemSpec>) -> Self {
        MenuItemSpec {
            kind: MenuItemKind::Submenu,
            label: label.into(),
            children,
            ..MenuItemSpec::separator()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_accelerator(mut self, accelerator: Option<String>) -> Self {
        self.accelerator = accelerator;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_role(mut self, role: MenuRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn is_separator(&self) -> bool {
        self.kind == MenuItemKind::Separator
    }

    /// An enabled leaf with behaviour attached.
    pub fn is_invokable(&self) -> bool {
        matches!(
            self.kind,
            MenuItemKind::Action | MenuItemKind::CheckableAction
        ) && self.enabled
            && self.invoke.is_some()
    }
}

impl fmt::Debug for MenuItemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemSpec")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("accelerator", &self.accelerator)
            .field("enabled", &self.enabled)
            .field("checked", &self.checked)
            .field("role", &self.role)
            .field("children", &self.children)
            .field("invoke", &self.invoke.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct TopLevelMenu {
    pub label: MenuLabel,
    /// Text shown in the menu bar. Equals `label.as_str()` except for the
    /// application menu, which carries the application name.
    pub title: String,
    pub role: Option<MenuRole>,
    pub items: Vec<MenuItemSpec>,
}

impl TopLevelMenu {
    pub fn new(label: MenuLabel, items: Vec<MenuItemSpec>) -> Self {
        TopLevelMenu {
            label,
            title: label.as_str().to_string(),
            role: None,
            items,
        }
    }

    /// Searches the immediate children only; nested submenus are skipped.
    pub fn item(&self, id: &str) -> Option<&MenuItemSpec> {
        self.items.iter().find(|item| item.id.as_deref() == Some(id))
    }
}

/// The full, behaviour-attached menu tree in display order.
#[derive(Debug, Clone, Default)]
pub struct MenuDescriptor {
    pub menus: Vec<TopLevelMenu>,
}

impl MenuDescriptor {
    pub fn menu(&self, label: MenuLabel) -> Option<&TopLevelMenu> {
        self.menus.iter().find(|menu| menu.label == label)
    }

    pub fn labels(&self) -> Vec<MenuLabel> {
        self.menus.iter().map(|menu| menu.label).collect()
    }

    /// Depth-first visit of every item in the descriptor.
    pub fn walk(&self) -> Vec<(MenuLabel, &MenuItemSpec)> {
        fn visit<'a>(
            label: MenuLabel,
            items: &'a [MenuItemSpec],
            out: &mut Vec<(MenuLabel, &'a MenuItemSpec)>,
        ) {
            for item in items {
                out.push((label, item));
                visit(label, &item.children, out);
            }
        }

        let mut out = Vec::new();
        for menu in &self.menus {
            visit(menu.label, &menu.items, &mut out);
        }
        out
    }
}
