/// A selectable paint or trim option: stable key, display name, swatch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub key: &'static str,
    pub name: &'static str,
    pub swatch: &'static str,
}

/// Which color field of the form a key applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Exterior,
    Interior,
}

const fn color(key: &'static str, name: &'static str, swatch: &'static str) -> ColorOption {
    ColorOption { key, name, swatch }
}

pub const EXTERIOR_COLORS: &[ColorOption] = &[
    color("alpine-white", "Alpine White", "#f4f4f2"),
    color("black-sapphire", "Black Sapphire Metallic", "#1c1d21"),
    color("mineral-grey", "Mineral Grey Metallic", "#5f6266"),
    color("portimao-blue", "Portimao Blue Metallic", "#1f5f9e"),
    color("melbourne-red", "Melbourne Red Metallic", "#7c1420"),
    color("sunset-orange", "Sunset Orange Metallic", "#c34f27"),
];

pub const INTERIOR_COLORS: &[ColorOption] = &[
    color("black-sensatec", "Black Sensatec", "#181818"),
    color("oyster", "Oyster Vernasca Leather", "#cfc8bd"),
    color("cognac", "Cognac Vernasca Leather", "#8a5a35"),
    color("mocha", "Mocha Vernasca Leather", "#4e3a2d"),
];

pub fn options(slot: ColorSlot) -> &'static [ColorOption] {
    match slot {
        ColorSlot::Exterior => EXTERIOR_COLORS,
        ColorSlot::Interior => INTERIOR_COLORS,
    }
}

/// Resolves a user-supplied key (case-insensitive) for the given slot.
pub fn find(slot: ColorSlot, key: &str) -> Option<&'static ColorOption> {
    let needle = key.trim();
    options(slot)
        .iter()
        .find(|option| option.key.eq_ignore_ascii_case(needle))
}

/// Display name for a stored key, falling back to the raw key for values
/// saved before a table change.
pub fn display_name(slot: ColorSlot, key: &str) -> String {
    find(slot, key)
        .map(|option| option.name.to_string())
        .unwrap_or_else(|| key.to_string())
}
