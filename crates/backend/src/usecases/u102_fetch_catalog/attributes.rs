//! Attribute name normalization.
//!
//! WooCommerce stores ship attribute names in whatever language the
//! shop owner picked. The alias tables below map the spellings seen in
//! Danish and English storefronts onto the three canonical slots the
//! catalog cares about.

/// Canonical attribute slot a remote attribute name maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeSlot {
    Color,
    Size,
    Brand,
}

const COLOR_ALIASES: &[&str] = &["color", "colour", "farve"];
const SIZE_ALIASES: &[&str] = &["size", "størrelse"];
const BRAND_ALIASES: &[&str] = &["brand", "mærke", "varemærke"];

/// Classify an attribute name, ignoring case and an optional `pa_`
/// taxonomy prefix. Unrecognized names map to nothing and the
/// attribute is dropped.
pub fn classify(name: &str) -> Option<AttributeSlot> {
    let normalized = name.trim().to_lowercase();
    let normalized = normalized.strip_prefix("pa_").unwrap_or(&normalized);

    if COLOR_ALIASES.contains(&normalized) {
        Some(AttributeSlot::Color)
    } else if SIZE_ALIASES.contains(&normalized) {
        Some(AttributeSlot::Size)
    } else if BRAND_ALIASES.contains(&normalized) {
        Some(AttributeSlot::Brand)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn danish_and_english_aliases_map_to_the_same_slot() {
        assert_eq!(classify("Color"), Some(AttributeSlot::Color));
        assert_eq!(classify("colour"), Some(AttributeSlot::Color));
        assert_eq!(classify("Farve"), Some(AttributeSlot::Color));
        assert_eq!(classify("Size"), Some(AttributeSlot::Size));
        assert_eq!(classify("Størrelse"), Some(AttributeSlot::Size));
        assert_eq!(classify("brand"), Some(AttributeSlot::Brand));
        assert_eq!(classify("Mærke"), Some(AttributeSlot::Brand));
        assert_eq!(classify("varemærke"), Some(AttributeSlot::Brand));
    }

    #[test]
    fn taxonomy_prefix_is_stripped() {
        assert_eq!(classify("pa_farve"), Some(AttributeSlot::Color));
        assert_eq!(classify("pa_size"), Some(AttributeSlot::Size));
    }

    #[test]
    fn unknown_attributes_are_dropped() {
        assert_eq!(classify("Material"), None);
        assert_eq!(classify(""), None);
    }
}
