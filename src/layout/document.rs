use std::collections::BTreeMap;

use serde::Serialize;

use super::mutation::{Mutation, Target};

/// Class state of the styled page elements, the side of the page that
/// mutations are applied to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    classes: BTreeMap<Target, Vec<String>>,
    pub theme_switch_checked: bool,
    pub resize_events: u32,
}

impl Document {
    /// Element classes the dashboard template renders before any script runs.
    pub fn page() -> Self {
        let mut document = Self::default();
        document.add_class(Target::MainHeader, "navbar-light");
        document
    }

    pub fn classes(&self, target: Target) -> &[String] {
        self.classes.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_class(&self, target: Target, class: &str) -> bool {
        self.classes(target).iter().any(|x| x == class)
    }

    pub fn add_class(&mut self, target: Target, class: &str) {
        let classes = self.classes.entry(target).or_default();
        if !classes.iter().any(|x| x == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, target: Target, class: &str) {
        if let Some(classes) = self.classes.get_mut(&target) {
            classes.retain(|x| x != class);
        }
    }

    pub fn apply(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            match mutation {
                Mutation::AddClass { target, class } => self.add_class(*target, class),
                Mutation::RemoveClass { target, class } => self.remove_class(*target, class),
                Mutation::TriggerResize => self.resize_events += 1,
                Mutation::SetThemeSwitch { checked } => self.theme_switch_checked = *checked,
            }
        }
    }
}
