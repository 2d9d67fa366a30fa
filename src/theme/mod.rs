use crate::storage::{StorageBackend, THEME_KEY};
use std::str::FromStr;

/// Light/dark preference. Independent of the note document: one value under
/// its own storage key, applied as `data-theme` on the root element.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Stored preference, else the OS color-scheme preference, else light.
pub(crate) fn load_theme(backend: &StorageBackend) -> Theme {
    if let Some(stored) = backend.read(THEME_KEY) {
        if let Ok(theme) = Theme::from_str(&stored) {
            return theme;
        }
    }

    if system_prefers_dark() {
        Theme::Dark
    } else {
        Theme::Light
    }
}

#[cfg(target_arch = "wasm32")]
fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|m| m.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn system_prefers_dark() -> bool {
    false
}

pub(crate) fn apply_theme(theme: Theme) {
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("data-theme", &theme.to_string());
    }
}

/// Flips the theme, persists it and re-applies the root attribute.
pub(crate) fn toggle_theme(backend: &StorageBackend, current: Theme) -> Theme {
    let next = current.toggled();
    backend.write(THEME_KEY, &next.to_string());
    apply_theme(next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_roundtrips_through_its_storage_string() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(Theme::Dark.to_string(), "dark");
        assert_eq!(Theme::from_str("light"), Ok(Theme::Light));
        assert_eq!(Theme::from_str("dark"), Ok(Theme::Dark));
        assert!(Theme::from_str("blue").is_err());
    }

    #[test]
    fn test_toggle_flips_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_stored_preference_wins_over_system_default() {
        let backend = StorageBackend::memory();
        backend.write(THEME_KEY, "dark");
        assert_eq!(load_theme(&backend), Theme::Dark);

        // Garbage falls back to the system/default path.
        backend.write(THEME_KEY, "sepia");
        assert_eq!(load_theme(&backend), Theme::Light);
    }
}
