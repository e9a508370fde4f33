use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any JSON value other than `true` leaves the option off.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Only non-empty strings count as a value.
fn lenient_class<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(val) if !val.trim().is_empty() => Some(val.trim().to_string()),
        _ => None,
    })
}

/// AdminLTE layout options. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    #[serde(deserialize_with = "lenient_bool")]
    pub dark_mode: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub header_fixed: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub dropdown_legacy_offset: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub no_border: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub sidebar_collapsed: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub sidebar_fixed: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub sidebar_mini: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub sidebar_mini_md: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub sidebar_mini_xs: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub nav_flat_style: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub nav_legacy_style: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub nav_compact: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub nav_child_indent: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub nav_child_hide_on_collapse: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub disable_hover_expand: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub footer_fixed: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub small_text_body: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub small_text_navbar: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub small_text_brand: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub small_text_sidebar: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub small_text_footer: bool,
    #[serde(deserialize_with = "lenient_class")]
    pub navbar_variant: Option<String>,
    #[serde(deserialize_with = "lenient_class")]
    pub accent_color: Option<String>,
    #[serde(deserialize_with = "lenient_class")]
    pub sidebar_dark_variant: Option<String>,
    #[serde(deserialize_with = "lenient_class")]
    pub sidebar_light_variant: Option<String>,
    #[serde(deserialize_with = "lenient_class")]
    pub brand_logo_variant: Option<String>,
}

impl LayoutSettings {
    /// Parse a settings object. A JSON value that is not an object yields the
    /// defaults; only unparseable text is an error.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(val) => val,
            Err(err) => {
                tracing::warn!("invalid layout settings, using defaults: {}", err);
                Self::default()
            }
        }
    }
}
