use crate::context::{url_scheme, ContextOverrides};

/// Decides which lifecycle signals require the menu to be rebuilt.
///
/// The only retained state is the scheme seen by the previous
/// location-changed signal. It starts as "no scheme" and is replaced on
/// every such signal, whether or not that signal caused a rebuild.
#[derive(Debug, Default)]
pub struct RebuildTrigger {
    last_scheme: Option<String>,
}

impl RebuildTrigger {
    pub fn new() -> Self {
        RebuildTrigger::default()
    }

    pub fn last_scheme(&self) -> Option<&str> {
        self.last_scheme.as_deref()
    }

    /// Focus moved to another window; every context field may have changed.
    pub fn on_window_focus_changed(&mut self, new_active_url: Option<String>) -> Option<ContextOverrides> {
        Some(ContextOverrides::url(new_active_url))
    }

    pub fn on_window_created(&mut self) -> Option<ContextOverrides> {
        Some(ContextOverrides::none())
    }

    /// Forces the zero-window context regardless of any stale URL.
    pub fn on_all_windows_closed(&mut self) -> Option<ContextOverrides> {
        Some(ContextOverrides::no_windows())
    }

    /// Rebuild only when `is_focused` and the URL scheme differs from the
    /// one recorded by the previous call.
    pub fn on_active_location_changed(
        &mut self,
        is_focused: bool,
        url: Option<&str>,
    ) -> Option<ContextOverrides> {
        let scheme = url_scheme(url).map(str::to_string);
        let changed = scheme != self.last_scheme;
        self.last_scheme = scheme;

        if is_focused && changed {
            Some(ContextOverrides::url(url.map(str::to_string)))
        } else {
            None
        }
    }
}
