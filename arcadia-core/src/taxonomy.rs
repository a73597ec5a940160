//! Static mapping between zone display names and the short type codes used
//! by catalog items.

/// Display name of the landing view.  It heads the sidebar but is not a zone.
pub const HOME: &str = "Home";

/// Zones in sidebar order, as `(display name, type code)`.
pub const ZONES: &[(&str, &str)] = &[
    ("PC", "PC"),
    ("Mobile", "Mobile"),
    ("N64", "N64"),
    ("NDS", "NDS"),
    ("PS1", "PS1"),
    ("Game Boy", "GB"),
    ("Game Boy Advance", "GBA"),
    ("Game Boy Color", "GBC"),
    ("NES", "NES"),
    ("SNES", "SNES"),
    ("Sega Genesis", "SG"),
    ("Sega Saturn", "SS"),
    ("Neo Geo Pocket Color", "NGPC"),
    ("MS-DOS", "MSDOS"),
    ("Atari Jaguar", "AJ"),
    ("Arcade", "Arcade"),
    ("Sega Game Gear", "SGG"),
    ("Atari Lynx", "AL"),
    ("Atari 2600", "A2600"),
];

pub fn code_of(display_name: &str) -> Option<&'static str> {
    ZONES
        .iter()
        .find(|(name, _)| *name == display_name)
        .map(|(_, code)| *code)
}

/// Reverse lookup, case-insensitive on the code the same way catalog
/// filtering is.
pub fn display_name_of(code: &str) -> Option<&'static str> {
    ZONES
        .iter()
        .find(|(_, c)| c.eq_ignore_ascii_case(code))
        .map(|(name, _)| *name)
}

pub fn display_names() -> impl Iterator<Item = &'static str> {
    ZONES.iter().map(|(name, _)| *name)
}

/// Entries of the sidebar, `Home` first.
pub fn sidebar() -> impl Iterator<Item = &'static str> {
    std::iter::once(HOME).chain(display_names())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_codes_by_display_name() {
        assert_eq!(code_of("Game Boy Advance"), Some("GBA"));
        assert_eq!(code_of("Arcade"), Some("Arcade"));
        assert_eq!(code_of("Dreamcast"), None);
        assert_eq!(code_of("game boy"), None);
    }

    #[test]
    fn reverse_lookup_ignores_case() {
        assert_eq!(display_name_of("gb"), Some("Game Boy"));
        assert_eq!(display_name_of("MSDOS"), Some("MS-DOS"));
        assert_eq!(display_name_of("XBOX"), None);
    }

    #[test]
    fn sidebar_starts_with_home_and_keeps_order() {
        let entries: Vec<_> = sidebar().collect();
        assert_eq!(entries[0], HOME);
        assert_eq!(entries[1], "PC");
        assert_eq!(entries.last(), Some(&"Atari 2600"));
        assert_eq!(entries.len(), ZONES.len() + 1);
    }

    #[test]
    fn codes_are_unique_ignoring_case() {
        for (i, (_, a)) in ZONES.iter().enumerate() {
            for (_, b) in &ZONES[i + 1..] {
                assert!(!a.eq_ignore_ascii_case(b), "{a} collides with {b}");
            }
        }
    }
}
