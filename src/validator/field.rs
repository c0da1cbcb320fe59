use crate::options::{OptionKind, OptionStore, OptionValue};

pub const ALLOW_EMPTY: &str = "AllowEmpty";
pub const REQUIRED: &str = "Required";
pub const DEFAULT_VALUE: &str = "DefaultValue";
pub const REQUIRED_VALUE: &str = "RequiredValue";
pub const DISPLAY_NAME: &str = "DisplayName";

pub(crate) fn declare(store: &mut OptionStore, display_name: &str) {
    store
        .declare(ALLOW_EMPTY, OptionKind::Bool, false, false)
        .declare(REQUIRED, OptionKind::Bool, true, false)
        .declare(DEFAULT_VALUE, OptionKind::Str, OptionValue::None, true)
        .declare(REQUIRED_VALUE, OptionKind::Str, OptionValue::None, true)
        .declare(DISPLAY_NAME, OptionKind::Str, display_name, false);
}

/// Typed snapshot of the lifecycle options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    pub allow_empty: bool,
    pub required: bool,
    pub default_value: Option<String>,
    pub required_value: Option<String>,
    pub display_name: String,
}

impl FieldOptions {
    pub fn from_store(store: &OptionStore) -> Self {
        Self {
            allow_empty: store.flag(ALLOW_EMPTY, false),
            required: store.flag(REQUIRED, true),
            default_value: store.text(DEFAULT_VALUE),
            required_value: store.text(REQUIRED_VALUE),
            display_name: store.text(DISPLAY_NAME).unwrap_or_default(),
        }
    }

    /// Per-call override, then the configured name, then the field key.
    pub fn effective_display_name(&self, override_name: Option<&str>, key: &str) -> String {
        override_name
            .filter(|name| !name.trim().is_empty())
            .or(Some(self.display_name.as_str()).filter(|name| !name.trim().is_empty()))
            .unwrap_or(key)
            .to_string()
    }
}
