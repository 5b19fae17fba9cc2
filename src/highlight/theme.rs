use crate::fail;
use once_cell::sync::Lazy;
use std::io::Cursor;
use syntect::highlighting::{Theme, ThemeSet};

const MONOKAI: &[u8] = include_bytes!("../../assets/monokai.tmTheme");

// Short names for bundled themes whose real names are awkward to type
const ALIASES: &[(&str, &str)] = &[
    ("github", "InspiredGitHub"),
    ("solarized-dark", "Solarized (dark)"),
    ("solarized-light", "Solarized (light)"),
];

static THEMES: Lazy<ThemeSet> = Lazy::new(|| {
    let mut set = ThemeSet::load_defaults();
    let monokai = ThemeSet::load_from_reader(&mut Cursor::new(MONOKAI))
        .unwrap_or_else(fail::bundled_theme_invalid);
    set.themes.insert("monokai".to_owned(), monokai);
    set
});

/// Looks up a theme by name.
///
/// Exact names win, then names that only differ in case, then aliases.
pub fn get(name: &str) -> Option<&'static Theme> {
    let themes = &Lazy::force(&THEMES).themes;

    themes
        .get(name)
        .or_else(|| {
            themes
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, theme)| theme)
        })
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
                .and_then(|(_, target)| themes.get(*target))
        })
}

/// Returns the names of all bundled themes.
pub fn names() -> impl Iterator<Item = &'static str> {
    Lazy::force(&THEMES).themes.keys().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monokai_is_bundled() {
        let theme = get("monokai").expect("monokai theme");
        assert_eq!(theme.name.as_deref(), Some("Monokai"));
        assert!(names().any(|name| name == "monokai"));
    }

    #[test]
    fn monokai_asset_parses() {
        let theme = ThemeSet::load_from_reader(&mut Cursor::new(MONOKAI)).unwrap();
        assert!(theme.settings.foreground.is_some());
        assert!(!theme.scopes.is_empty());
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(get("Monokai").is_some());
        assert!(get("inspiredgithub").is_some());
    }

    #[test]
    fn aliases_resolve() {
        let github = get("github").expect("github alias");
        let inspired = get("InspiredGitHub").expect("InspiredGitHub theme");
        assert!(std::ptr::eq(github, inspired));
        assert!(get("solarized-dark").is_some());
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(get("no-such-theme").is_none());
    }
}
