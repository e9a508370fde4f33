use std::{collections::HashMap, fmt, str::FromStr};

use redis::ConnectionLike;

use super::mutation::{dark_mode_mutations, light_mode_mutations, Mutation};

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(anyhow::anyhow!("unknown theme {:?}", s)),
        }
    }
}

/// Durable string preferences of one user.
pub trait PreferenceStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in the Redis hash `preference:{user_id}`.
pub struct RedisPreferenceStore<'a, C: ConnectionLike> {
    redis_conn: &'a mut C,
    hash_key: String,
}

impl<'a, C: ConnectionLike> RedisPreferenceStore<'a, C> {
    pub fn new(redis_conn: &'a mut C, user_id: i32) -> Self {
        Self {
            redis_conn,
            hash_key: format!("preference:{}", user_id),
        }
    }
}

impl<C: ConnectionLike> PreferenceStore for RedisPreferenceStore<'_, C> {
    fn get(&mut self, key: &str) -> anyhow::Result<Option<String>> {
        let res: Option<String> = redis::cmd("hget")
            .arg(&self.hash_key)
            .arg(key)
            .query(&mut *self.redis_conn)?;
        Ok(res)
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        redis::cmd("hset")
            .arg(&self.hash_key)
            .arg(key)
            .arg(value)
            .exec(&mut *self.redis_conn)?;
        Ok(())
    }
}

/// Stored theme, `None` when unset, unreadable or unrecognised.
pub fn stored_theme<S: PreferenceStore>(store: &mut S) -> Option<Theme> {
    match store.get(THEME_KEY) {
        Ok(Some(val)) => val.parse().ok(),
        Ok(None) => None,
        Err(err) => {
            tracing::warn!("read theme preference: {}", err);
            None
        }
    }
}

/// Mutations for page load: a stored dark preference switches the page to
/// dark mode and checks the switch, anything else leaves the page untouched.
pub fn theme_on_load<S: PreferenceStore>(store: &mut S) -> Vec<Mutation> {
    match stored_theme(store) {
        Some(Theme::Dark) => {
            let mut mutations = dark_mode_mutations();
            mutations.push(Mutation::SetThemeSwitch { checked: true });
            mutations
        }
        _ => vec![],
    }
}

/// Mutations for the switch changing to `checked`; the new theme is persisted.
pub fn theme_on_toggle<S: PreferenceStore>(
    store: &mut S,
    checked: bool,
) -> anyhow::Result<Vec<Mutation>> {
    let theme = Theme::from_checked(checked);
    let mut mutations = match theme {
        Theme::Dark => dark_mode_mutations(),
        Theme::Light => light_mode_mutations(),
    };
    mutations.push(Mutation::SetThemeSwitch { checked });
    store.set(THEME_KEY, theme.as_str())?;
    tracing::debug!("theme switched to {}", theme);
    Ok(mutations)
}

#[cfg(test)]
mod tests {
    use crate::layout::{document::Document, mutation::Target};

    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&mut self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("storage disabled"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("storage disabled"))
        }
    }

    #[test]
    fn test_load_without_preference() {
        let mut store = MemoryPreferenceStore::default();
        assert!(theme_on_load(&mut store).is_empty());
    }

    #[test]
    fn test_load_dark_preference() {
        let mut store = MemoryPreferenceStore::default();
        store.set(THEME_KEY, "dark").unwrap();
        let mut document = Document::page();
        document.apply(&theme_on_load(&mut store));
        assert!(document.theme_switch_checked);
        assert!(document.has_class(Target::Body, "dark-mode"));
        assert!(document.has_class(Target::MainHeader, "navbar-dark"));
        assert!(!document.has_class(Target::MainHeader, "navbar-light"));
    }

    #[test]
    fn test_load_light_or_garbage_changes_nothing() {
        let mut store = MemoryPreferenceStore::default();
        store.set(THEME_KEY, "light").unwrap();
        assert!(theme_on_load(&mut store).is_empty());
        store.set(THEME_KEY, "purple").unwrap();
        assert!(theme_on_load(&mut store).is_empty());
    }

    #[test]
    fn test_failed_read_means_no_override() {
        assert!(theme_on_load(&mut BrokenStore).is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut store = MemoryPreferenceStore::default();
        let mut document = Document::page();

        document.apply(&theme_on_toggle(&mut store, true).unwrap());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert!(document.theme_switch_checked);
        assert!(document.has_class(Target::Body, "dark-mode"));
        assert!(document.has_class(Target::MainHeader, "navbar-dark"));

        document.apply(&theme_on_toggle(&mut store, false).unwrap());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(!document.theme_switch_checked);
        assert!(!document.has_class(Target::Body, "dark-mode"));
        assert!(!document.has_class(Target::MainHeader, "navbar-dark"));
        assert!(document.has_class(Target::MainHeader, "navbar-light"));
    }

    #[test]
    fn test_toggle_reports_store_failure() {
        assert!(theme_on_toggle(&mut BrokenStore, true).is_err());
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("Dark".parse::<Theme>().is_err());
        assert_eq!(Theme::from_checked(false).to_string(), "light");
    }
}
