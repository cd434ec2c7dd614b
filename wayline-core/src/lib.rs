pub mod accel;
pub mod actions;
pub mod builder;
pub mod context;
pub mod error;
pub mod host;
pub mod menu;
pub mod registry;
pub mod settings;
pub mod toolbar;
pub mod trigger;
pub mod window_menu;

#[cfg(test)]
mod testing;

pub use actions::ActionContext;
pub use context::{ContextOverrides, ContextSnapshot, Platform};
pub use error::{FlowError, MenuError};
pub use host::{FlowRunner, Host, TabRegistry};
pub use menu::{MenuDescriptor, MenuLabel};
pub use settings::MenuSettings;
pub use toolbar::ToolbarView;
pub use window_menu::WindowMenu;
