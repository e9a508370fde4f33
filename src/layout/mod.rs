//! View-layer state of the AdminLTE dashboard.
//!
//! Everything here is a pure translation into [`mutation::Mutation`]s; the
//! [`document::Document`] adapter is the only place they are applied.

pub mod document;
pub mod mutation;
pub mod nav;
pub mod settings;
pub mod theme;

use document::Document;
use mutation::settings_mutations;
use nav::{resolve_active, NavItem};
use settings::LayoutSettings;
use theme::{theme_on_load, PreferenceStore};

/// Final page state after the load-time scripts ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub document: Document,
    pub menu: Vec<NavItem>,
}

/// Run the page-load steps in order: active links, layout settings, then the
/// stored theme preference.
pub fn compose_page<S: PreferenceStore>(
    settings: &LayoutSettings,
    mut menu: Vec<NavItem>,
    current_path: &str,
    back_links: &[Option<String>],
    store: &mut S,
) -> PageLayout {
    resolve_active(&mut menu, current_path, back_links);
    let mut document = Document::page();
    document.apply(&settings_mutations(settings));
    document.apply(&theme_on_load(store));
    PageLayout { document, menu }
}
