//! Sidebar navigation active-state resolution.
//!
//! The current path is matched exactly against menu hrefs. When nothing
//! matches, the href recorded on the page's last back-link marker is tried
//! instead, so detail pages highlight the list they were opened from.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::menu::Menu;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub active: bool,
    /// `menu-is-opening menu-open` with the submenu shown.
    pub open: bool,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn new(name: &str, href: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            href: href.map(str::to_string),
            icon: None,
            active: false,
            open: false,
            children: vec![],
        }
    }

    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }

    /// Items with a submenu collapse into a tree view.
    pub fn is_treeview(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Build the menu tree from flat rows. Rows are expected in display order;
/// rows whose parent is not among them are dropped.
pub fn build_menu_tree(rows: &[Menu]) -> Vec<NavItem> {
    let mut children_of: HashMap<Option<i32>, Vec<&Menu>> = HashMap::new();
    for row in rows {
        children_of.entry(row.parent_id).or_default().push(row);
    }

    fn build(
        parent: Option<i32>,
        children_of: &HashMap<Option<i32>, Vec<&Menu>>,
    ) -> Vec<NavItem> {
        children_of
            .get(&parent)
            .map(|rows| {
                rows.iter()
                    .map(|row| NavItem {
                        name: row.name.clone(),
                        href: row.url.clone(),
                        icon: row.icon.clone(),
                        active: false,
                        open: false,
                        children: build(Some(row.id), children_of),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    build(None, &children_of)
}

fn mark_href(items: &mut [NavItem], href: &str) -> bool {
    let mut found = false;
    for item in items.iter_mut() {
        if item.href.as_deref() == Some(href) {
            item.active = true;
            found = true;
        }
        if mark_href(&mut item.children, href) {
            found = true;
        }
    }
    found
}

/// Open the nearest treeview item around every active link, starting with
/// the item that owns the link. Returns whether `items` contains an active
/// link not yet claimed by an opened item.
fn open_active(items: &mut [NavItem]) -> bool {
    let mut pending = false;
    for item in items.iter_mut() {
        let below = open_active(&mut item.children);
        if item.active || below {
            if item.is_treeview() {
                item.open = true;
            } else {
                pending = true;
            }
        }
    }
    pending
}

/// Mark the active links of `items` for `current_path`, falling back to the
/// last of `back_links` when no link matches. Returns whether any link was
/// marked.
pub fn resolve_active(
    items: &mut [NavItem],
    current_path: &str,
    back_links: &[Option<String>],
) -> bool {
    let mut found = mark_href(items, current_path);
    if !found {
        if let Some(Some(back_href)) = back_links.last() {
            found = mark_href(items, back_href);
        }
    }
    if found {
        open_active(items);
    }
    found
}
