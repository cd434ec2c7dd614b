use serde::{Deserialize, Serialize};

/// Host platform, selecting label, accelerator and ordering variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    pub fn is_mac(self) -> bool {
        self == Platform::Mac
    }
}

/// Everything that matters for the shape of the menu at one instant.
///
/// Built fresh for every rebuild and dropped once the descriptor exists.
/// `is_app_window` and `is_addressable_resource` only count while an
/// `active_url` is present; use the gate helpers below instead of reading
/// the raw flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSnapshot {
    pub active_url: Option<String>,
    pub has_any_window: bool,
    pub platform: Platform,
    pub is_app_window: bool,
    pub is_addressable_resource: bool,
    pub always_on_top: bool,
}

impl ContextSnapshot {
    /// A context with at least one window and no focused tab.
    pub fn new(platform: Platform) -> Self {
        ContextSnapshot {
            active_url: None,
            has_any_window: true,
            platform,
            is_app_window: false,
            is_addressable_resource: false,
            always_on_top: false,
        }
    }

    /// The transient "all windows closed" context.
    pub fn without_windows(platform: Platform) -> Self {
        ContextSnapshot {
            has_any_window: false,
            ..ContextSnapshot::new(platform)
        }
    }

    /// Set the active URL and recompute whether it is an addressable resource.
    pub fn with_url(mut self, url: Option<String>, drive_scheme: &str) -> Self {
        self.is_addressable_resource = url
            .as_deref()
            .is_some_and(|u| is_addressable_url(u, drive_scheme));
        self.active_url = url;
        self
    }

    pub fn with_app_window(mut self, is_app_window: bool) -> Self {
        self.is_app_window = is_app_window;
        self
    }

    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }

    pub fn app_window(&self) -> bool {
        self.active_url.is_some() && self.is_app_window
    }

    pub fn addressable(&self) -> bool {
        self.active_url.is_some() && self.is_addressable_resource
    }

    /// A window exists and it is an app window.
    pub fn restricted(&self) -> bool {
        self.has_any_window && self.app_window()
    }

    /// A window exists and it is an ordinary browsing window.
    pub fn ordinary(&self) -> bool {
        self.has_any_window && !self.restricted()
    }
}

/// Explicit values merged onto a freshly sampled [`ContextSnapshot`].
///
/// `active_url: Some(None)` forces "no URL"; `None` keeps the sampled one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextOverrides {
    pub active_url: Option<Option<String>>,
    pub has_any_window: Option<bool>,
}

impl ContextOverrides {
    pub fn none() -> Self {
        ContextOverrides::default()
    }

    /// Forces the zero-window context, discarding any stale URL.
    pub fn no_windows() -> Self {
        ContextOverrides {
            active_url: Some(None),
            has_any_window: Some(false),
        }
    }

    pub fn url(url: Option<String>) -> Self {
        ContextOverrides {
            active_url: Some(url),
            has_any_window: None,
        }
    }

    pub fn apply(self, mut ctx: ContextSnapshot, drive_scheme: &str) -> ContextSnapshot {
        if let Some(url) = self.active_url {
            ctx = ctx.with_url(url, drive_scheme);
        }
        if let Some(has_any_window) = self.has_any_window {
            ctx.has_any_window = has_any_window;
        }
        if !ctx.has_any_window {
            ctx.is_app_window = false;
            ctx.always_on_top = false;
        }
        ctx
    }
}

/// The portion of `url` before its first `:`. `None` stands for "no scheme".
pub fn url_scheme(url: Option<&str>) -> Option<&str> {
    url.map(|u| u.find(':').map_or(u, |idx| &u[..idx]))
}

/// True when `url` uses the mutable-content scheme, e.g. `hyper://<key>/`.
pub fn is_addressable_url(url: &str, drive_scheme: &str) -> bool {
    url.strip_prefix(drive_scheme)
        .is_some_and(|rest| rest.starts_with("://"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_scheme_takes_text_before_first_colon() {
        assert_eq!(url_scheme(Some("https://a.example")), Some("https"));
        assert_eq!(url_scheme(Some("beaker://settings")), Some("beaker"));
        assert_eq!(url_scheme(Some("about:blank")), Some("about"));
    }

    #[test]
    fn url_scheme_without_colon_is_whole_string() {
        assert_eq!(url_scheme(Some("localhost")), Some("localhost"));
    }

    #[test]
    fn url_scheme_absent_url_is_none() {
        assert_eq!(url_scheme(None), None);
    }

    #[test]
    fn addressable_url_requires_drive_scheme_and_slashes() {
        assert!(is_addressable_url("hyper://abc123/index.html", "hyper"));
        assert!(!is_addressable_url("hyperx://abc123/", "hyper"));
        assert!(!is_addressable_url("hyper:abc", "hyper"));
        assert!(!is_addressable_url("https://hyper.example", "hyper"));
    }

    #[test]
    fn with_url_computes_addressable_flag() {
        let ctx = ContextSnapshot::new(Platform::Other)
            .with_url(Some("hyper://abc/".to_string()), "hyper");
        assert!(ctx.is_addressable_resource);
        assert!(ctx.addressable());

        let ctx = ctx.with_url(Some("https://example.com".to_string()), "hyper");
        assert!(!ctx.is_addressable_resource);
    }

    #[test]
    fn flags_without_url_count_as_false() {
        let ctx = ContextSnapshot {
            active_url: None,
            has_any_window: true,
            platform: Platform::Other,
            is_app_window: true,
            is_addressable_resource: true,
            always_on_top: false,
        };
        assert!(!ctx.app_window());
        assert!(!ctx.addressable());
        assert!(!ctx.restricted());
        assert!(ctx.ordinary());
    }

    #[test]
    fn restricted_requires_a_window() {
        let ctx = ContextSnapshot::new(Platform::Mac)
            .with_url(Some("https://a.example".to_string()), "hyper")
            .with_app_window(true);
        assert!(ctx.restricted());
        assert!(!ctx.ordinary());

        let closed = ContextOverrides {
            active_url: None,
            has_any_window: Some(false),
        }
        .apply(ctx, "hyper");
        assert!(!closed.restricted());
        assert!(!closed.ordinary());
    }

    #[test]
    fn no_windows_override_drops_stale_url() {
        let ctx = ContextSnapshot::new(Platform::Other)
            .with_url(Some("hyper://abc/".to_string()), "hyper")
            .with_always_on_top(true);
        let ctx = ContextOverrides::no_windows().apply(ctx, "hyper");
        assert_eq!(ctx.active_url, None);
        assert!(!ctx.has_any_window);
        assert!(!ctx.is_addressable_resource);
        assert!(!ctx.always_on_top);
    }

    #[test]
    fn empty_overrides_keep_sampled_values() {
        let ctx = ContextSnapshot::new(Platform::Other)
            .with_url(Some("https://a.example".to_string()), "hyper");
        let merged = ContextOverrides::none().apply(ctx.clone(), "hyper");
        assert_eq!(merged, ctx);
    }
}
