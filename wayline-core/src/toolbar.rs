//! Behaviour-free projection of the menu for the in-page popup renderer.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::menu::{MenuDescriptor, MenuItemSpec, MenuLabel};

/// Menus exposed to the popup, in display order. The application and
/// Window menus stay native-only.
pub const TOOLBAR_MENUS: [MenuLabel; 7] = [
    MenuLabel::File,
    MenuLabel::Edit,
    MenuLabel::View,
    MenuLabel::History,
    MenuLabel::Drive,
    MenuLabel::Developer,
    MenuLabel::Help,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ToolbarItem {
    Separator {
        separator: bool,
    },
    Action {
        id: String,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        accelerator: Option<String>,
        enabled: bool,
    },
}

impl ToolbarItem {
    pub fn separator() -> Self {
        ToolbarItem::Separator { separator: true }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ToolbarItem::Action { id, .. } => Some(id.as_str()),
            ToolbarItem::Separator { .. } => None,
        }
    }
}

/// Top-level label → flattened entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ToolbarView(pub IndexMap<String, Vec<ToolbarItem>>);

impl ToolbarView {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn menu(&self, label: MenuLabel) -> Option<&[ToolbarItem]> {
        self.0.get(label.as_str()).map(Vec::as_slice)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn to_toolbar_item(item: &MenuItemSpec) -> Option<ToolbarItem> {
    if item.is_separator() {
        return Some(ToolbarItem::separator());
    }
    let id = item.id.as_ref()?;
    Some(ToolbarItem::Action {
        id: id.clone(),
        label: item.label.clone(),
        accelerator: item.accelerator.clone(),
        enabled: item.enabled,
    })
}

/// Flattens the immediate children of each popup-facing menu. Entries
/// without an id are dropped unless they are separators.
pub fn project(descriptor: &MenuDescriptor) -> ToolbarView {
    let mut view = IndexMap::new();
    for label in TOOLBAR_MENUS {
        if let Some(menu) = descriptor.menu(label) {
            let items = menu.items.iter().filter_map(to_toolbar_item).collect();
            view.insert(label.as_str().to_string(), items);
        }
    }
    ToolbarView(view)
}

/// JSON schema of [`ToolbarView`], published for the popup renderer.
pub fn schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ToolbarView)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextSnapshot, Platform};
    use crate::testing::{idle_runtime, Harness};

    fn view_for(ctx: &ContextSnapshot) -> ToolbarView {
        let rt = idle_runtime();
        project(&Harness::new(rt.handle().clone()).builder().build(ctx))
    }

    #[test]
    fn empty_descriptor_projects_to_empty_view() {
        let view = project(&MenuDescriptor::default());
        assert!(view.is_empty());
        assert_eq!(view.to_json().unwrap(), "{}");
    }

    #[test]
    fn popup_menus_in_order_without_window_or_app() {
        let view = view_for(&ContextSnapshot::new(Platform::Mac));
        let keys: Vec<&str> = view.0.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["File", "Edit", "View", "History", "Drive", "Developer", "Help"]
        );
    }

    #[test]
    fn file_menu_projection_matches_descriptor() {
        let view = view_for(&ContextSnapshot::without_windows(Platform::Other));
        let file = view.menu(MenuLabel::File).unwrap();
        assert_eq!(file.len(), 9);
        assert_eq!(
            file[0],
            ToolbarItem::Action {
                id: "newTab".to_string(),
                label: "New Tab".to_string(),
                accelerator: Some("Ctrl+T".to_string()),
                enabled: true,
            }
        );
        assert_eq!(file[3], ToolbarItem::separator());
        assert_eq!(
            file[7],
            ToolbarItem::Action {
                id: "closeTab".to_string(),
                label: "Close Tab".to_string(),
                accelerator: Some("Ctrl+W".to_string()),
                enabled: false,
            }
        );
    }

    #[test]
    fn items_without_id_are_dropped() {
        let view = view_for(&ContextSnapshot::new(Platform::Other));
        let developer = view.menu(MenuLabel::Developer).unwrap();
        let ids: Vec<_> = developer.iter().filter_map(ToolbarItem::id).collect();
        assert_eq!(ids, vec!["toggleDevTools", "toggleLiveReloading"]);
        assert_eq!(developer.len(), 2);

        // the non-mac About entry has no id
        let help = view.menu(MenuLabel::Help).unwrap();
        assert!(help.iter().all(|item| item.id() != Some("about")));
        assert_eq!(help.len(), 5);
    }

    #[test]
    fn json_carries_no_behaviour() {
        let view = view_for(&ContextSnapshot::new(Platform::Other));
        let json: serde_json::Value = serde_json::from_str(&view.to_json().unwrap()).unwrap();
        for (_, items) in json.as_object().unwrap() {
            for item in items.as_array().unwrap() {
                let obj = item.as_object().unwrap();
                assert!(!obj.contains_key("invoke"));
                assert!(obj.contains_key("separator") || obj.contains_key("id"));
            }
        }
    }

    #[test]
    fn separators_serialize_as_flag() {
        let json = serde_json::to_string(&ToolbarItem::separator()).unwrap();
        assert_eq!(json, r#"{"separator":true}"#);
    }

    #[test]
    fn absent_accelerator_is_omitted() {
        let item = ToolbarItem::Action {
            id: "developerPortal".to_string(),
            label: "Developer Portal".to_string(),
            accelerator: None,
            enabled: true,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"developerPortal","label":"Developer Portal","enabled":true}"#
        );
    }

    #[test]
    fn projection_validates_against_published_schema() {
        let schema = serde_json::to_value(schema()).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema).expect("schema compiles");

        let view = view_for(&ContextSnapshot::new(Platform::Mac).with_url(
            Some("hyper://abc/".to_string()),
            "hyper",
        ));
        let instance = serde_json::to_value(&view).unwrap();
        assert!(compiled.is_valid(&instance));

        let bogus = serde_json::json!({ "File": [{ "label": "no id" }] });
        assert!(!compiled.is_valid(&bogus));
    }
}
