//! Noise and classification rules.
//!
//! Rules are plain predicates over an element's tag and attributes, kept in
//! ordered tables so the policy can be read top to bottom.

use dom_query::Selection;

use crate::dom;
use crate::result::SectionType;

/// A rule that tests if a selection matches certain criteria.
pub type Rule = fn(&Selection) -> bool;

/// Candidates matching any of these are dropped before text is measured.
pub static NOISE_RULES: &[Rule] = &[is_modal_role, has_cookie_class, is_hidden];

/// Type classification table. First matching rule wins; no match means
/// [`SectionType::Section`].
pub static TYPE_RULES: &[(Rule, SectionType)] = &[
    (is_header_tag, SectionType::Nav),
    (is_footer_tag, SectionType::Footer),
    (has_hero_class, SectionType::Hero),
];

/// Whether any noise rule rejects the element.
#[must_use]
pub fn is_noise(sel: &Selection) -> bool {
    NOISE_RULES.iter().any(|rule| rule(sel))
}

/// Structural role of a candidate element.
#[must_use]
pub fn classify(sel: &Selection) -> SectionType {
    TYPE_RULES
        .iter()
        .find(|(rule, _)| rule(sel))
        .map_or(SectionType::Section, |(_, kind)| *kind)
}

// === Noise ===

/// `role="dialog"` or `role="alert"`
#[must_use]
pub fn is_modal_role(sel: &Selection) -> bool {
    dom::get_attribute(sel, "role").is_some_and(|role| {
        let role = role.trim();
        role.eq_ignore_ascii_case("dialog") || role.eq_ignore_ascii_case("alert")
    })
}

/// Class attribute containing `cookie`. Case-sensitive: `Cookie-Banner`
/// does not match.
#[must_use]
pub fn has_cookie_class(sel: &Selection) -> bool {
    dom::class_name(sel).is_some_and(|class| class.contains("cookie"))
}

/// `hidden` attribute (any value) or `aria-hidden="true"`
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    dom::has_attribute(sel, "hidden")
        || dom::get_attribute(sel, "aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

// === Classification ===

#[must_use]
pub fn is_header_tag(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("header")
}

#[must_use]
pub fn is_footer_tag(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("footer")
}

#[must_use]
pub fn has_hero_class(sel: &Selection) -> bool {
    dom::class_name(sel).is_some_and(|class| class.contains("hero"))
}
