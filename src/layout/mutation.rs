use std::fmt;

use serde::Serialize;

use super::settings::LayoutSettings;

/// Page elements the dashboard template exposes for styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Body,
    MainHeader,
    MainSidebar,
    NavSidebar,
    BrandLink,
    MainFooter,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::Body,
        Target::MainHeader,
        Target::MainSidebar,
        Target::NavSidebar,
        Target::BrandLink,
        Target::MainFooter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Body => "body",
            Target::MainHeader => "main_header",
            Target::MainSidebar => "main_sidebar",
            Target::NavSidebar => "nav_sidebar",
            Target::BrandLink => "brand_link",
            Target::MainFooter => "main_footer",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Mutation {
    AddClass { target: Target, class: String },
    RemoveClass { target: Target, class: String },
    /// Layout-dependent widgets must re-measure.
    TriggerResize,
    SetThemeSwitch { checked: bool },
}

impl Mutation {
    pub fn add(target: Target, class: &str) -> Self {
        Mutation::AddClass {
            target,
            class: class.to_string(),
        }
    }

    pub fn remove(target: Target, class: &str) -> Self {
        Mutation::RemoveClass {
            target,
            class: class.to_string(),
        }
    }
}

pub const NAVBAR_DARK_SKINS: [&str; 15] = [
    "navbar-primary",
    "navbar-secondary",
    "navbar-info",
    "navbar-success",
    "navbar-danger",
    "navbar-indigo",
    "navbar-purple",
    "navbar-pink",
    "navbar-navy",
    "navbar-lightblue",
    "navbar-teal",
    "navbar-cyan",
    "navbar-dark",
    "navbar-gray-dark",
    "navbar-gray",
];

pub fn is_dark_skin(variant: &str) -> bool {
    NAVBAR_DARK_SKINS.contains(&variant)
}

/// Classes that put the body and header into dark mode.
pub fn dark_mode_mutations() -> Vec<Mutation> {
    vec![
        Mutation::add(Target::Body, "dark-mode"),
        Mutation::add(Target::MainHeader, "navbar-dark"),
        Mutation::remove(Target::MainHeader, "navbar-light"),
    ]
}

pub fn light_mode_mutations() -> Vec<Mutation> {
    vec![
        Mutation::remove(Target::Body, "dark-mode"),
        Mutation::add(Target::MainHeader, "navbar-light"),
        Mutation::remove(Target::MainHeader, "navbar-dark"),
    ]
}

/// Translate layout settings into the ordered class mutations a page applies
/// once at load.
pub fn settings_mutations(settings: &LayoutSettings) -> Vec<Mutation> {
    let mut mutations: Vec<Mutation> = vec![];

    if settings.dark_mode {
        mutations.extend(dark_mode_mutations());
    }
    // (enabled, target, class, triggers resize) in application order
    let flags = [
        (settings.header_fixed, Target::Body, "layout-navbar-fixed", false),
        (settings.dropdown_legacy_offset, Target::MainHeader, "dropdown-legacy", false),
        (settings.no_border, Target::MainHeader, "border-bottom-0", false),
        (settings.sidebar_collapsed, Target::Body, "sidebar-collapse", true),
        (settings.sidebar_fixed, Target::Body, "layout-fixed", true),
        (settings.sidebar_mini, Target::Body, "sidebar-mini", false),
        (settings.sidebar_mini_md, Target::Body, "sidebar-mini-md", false),
        (settings.sidebar_mini_xs, Target::Body, "sidebar-mini-xs", false),
        (settings.nav_flat_style, Target::NavSidebar, "nav-flat", false),
        (settings.nav_legacy_style, Target::NavSidebar, "nav-legacy", false),
        (settings.nav_compact, Target::NavSidebar, "nav-compact", false),
        (settings.nav_child_indent, Target::NavSidebar, "nav-child-indent", false),
        (settings.nav_child_hide_on_collapse, Target::NavSidebar, "nav-collapse-hide-child", false),
        (settings.disable_hover_expand, Target::MainSidebar, "sidebar-no-expand", false),
        (settings.footer_fixed, Target::Body, "layout-footer-fixed", false),
        (settings.small_text_body, Target::Body, "text-sm", false),
        (settings.small_text_navbar, Target::MainHeader, "text-sm", false),
        (settings.small_text_brand, Target::BrandLink, "text-sm", false),
        (settings.small_text_sidebar, Target::NavSidebar, "text-sm", false),
        (settings.small_text_footer, Target::MainFooter, "text-sm", false),
    ];
    for (enabled, target, class, resize) in flags {
        if enabled {
            mutations.push(Mutation::add(target, class));
            if resize {
                mutations.push(Mutation::TriggerResize);
            }
        }
    }

    if let Some(variant) = &settings.navbar_variant {
        mutations.push(Mutation::remove(Target::MainHeader, "navbar-dark"));
        mutations.push(Mutation::remove(Target::MainHeader, "navbar-light"));
        if is_dark_skin(variant) {
            mutations.push(Mutation::add(Target::MainHeader, "navbar-dark"));
            mutations.push(Mutation::add(Target::MainHeader, variant));
            mutations.push(Mutation::add(Target::MainHeader, "text-light"));
        } else {
            let scheme = if settings.dark_mode {
                "navbar-dark"
            } else {
                "navbar-light"
            };
            mutations.push(Mutation::add(Target::MainHeader, scheme));
            mutations.push(Mutation::add(Target::MainHeader, variant));
        }
    }

    let class_options = [
        (&settings.accent_color, Target::Body),
        (&settings.sidebar_dark_variant, Target::MainSidebar),
        (&settings.sidebar_light_variant, Target::MainSidebar),
        (&settings.brand_logo_variant, Target::BrandLink),
    ];
    for (value, target) in class_options {
        if let Some(class) = value {
            mutations.push(Mutation::add(target, class));
        }
    }

    mutations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_change_nothing() {
        assert!(settings_mutations(&LayoutSettings::default()).is_empty());
    }

    #[test]
    fn test_resize_follows_layout_flags() {
        let settings = LayoutSettings {
            sidebar_collapsed: true,
            sidebar_fixed: true,
            sidebar_mini: true,
            ..Default::default()
        };
        assert_eq!(
            settings_mutations(&settings),
            vec![
                Mutation::add(Target::Body, "sidebar-collapse"),
                Mutation::TriggerResize,
                Mutation::add(Target::Body, "layout-fixed"),
                Mutation::TriggerResize,
                Mutation::add(Target::Body, "sidebar-mini"),
            ]
        );
    }

    #[test]
    fn test_dark_skin_variant() {
        let settings = LayoutSettings {
            navbar_variant: Some("navbar-primary".to_string()),
            ..Default::default()
        };
        assert_eq!(
            settings_mutations(&settings),
            vec![
                Mutation::remove(Target::MainHeader, "navbar-dark"),
                Mutation::remove(Target::MainHeader, "navbar-light"),
                Mutation::add(Target::MainHeader, "navbar-dark"),
                Mutation::add(Target::MainHeader, "navbar-primary"),
                Mutation::add(Target::MainHeader, "text-light"),
            ]
        );
    }

    #[test]
    fn test_light_variant_follows_dark_mode() {
        let settings = LayoutSettings {
            dark_mode: true,
            navbar_variant: Some("navbar-white".to_string()),
            ..Default::default()
        };
        let mutations = settings_mutations(&settings);
        assert_eq!(
            mutations[mutations.len() - 2..],
            [
                Mutation::add(Target::MainHeader, "navbar-dark"),
                Mutation::add(Target::MainHeader, "navbar-white"),
            ]
        );
    }

    #[test]
    fn test_class_valued_options() {
        let settings = LayoutSettings {
            accent_color: Some("accent-teal".to_string()),
            sidebar_dark_variant: Some("sidebar-dark-primary".to_string()),
            brand_logo_variant: Some("navbar-navy".to_string()),
            small_text_footer: true,
            ..Default::default()
        };
        assert_eq!(
            settings_mutations(&settings),
            vec![
                Mutation::add(Target::MainFooter, "text-sm"),
                Mutation::add(Target::Body, "accent-teal"),
                Mutation::add(Target::MainSidebar, "sidebar-dark-primary"),
                Mutation::add(Target::BrandLink, "navbar-navy"),
            ]
        );
    }

    #[test]
    fn test_every_dark_skin_is_a_navbar_class() {
        assert!(NAVBAR_DARK_SKINS.iter().all(|x| x.starts_with("navbar-")));
        assert!(is_dark_skin("navbar-gray-dark"));
        assert!(!is_dark_skin("navbar-white"));
    }
}
