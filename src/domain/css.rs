//! CSS class values and class-name derivation.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::debug;

use super::sanitize::SafeCss;

/// Used in place of any caller-supplied class name that fails validation.
pub const FALLBACK_CLASS_NAME: &str = "--weft-css-class-safe-name";

/// Hex characters of the rule-body digest kept in a derived class name.
const CSS_ID_HASH_LEN: usize = 4;

static SAFE_CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[_a-zA-Z]+[_a-zA-Z0-9-]*$").expect("valid class name regex"));

/// Derive a class identifier from a readable prefix and the rule body.
///
/// Identical bodies always produce the same identifier, wherever they are
/// declared, so the ledger deduplicates by content.
pub fn css_id(name: &str, css: &str) -> String {
    let digest = Sha256::digest(css.as_bytes());
    let hex = hex::encode(digest.as_slice());
    format!("{name}_{}", &hex[..CSS_ID_HASH_LEN])
}

/// A class defined by a component: derived identifier plus its rule body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentCssClass {
    pub id: String,
    pub class: SafeCss,
}

impl ComponentCssClass {
    /// Build a class whose identifier is derived from `body`.
    ///
    /// `body` holds the declarations only; it is wrapped in `.id{...}`.
    pub fn new(name: &str, body: &str) -> Self {
        let id = css_id(name, body);
        let class = SafeCss::from_trusted(format!(".{id}{{{body}}}"));
        Self { id, class }
    }

    /// Build a class from declarations that were each passed through
    /// [`sanitize_css`](super::sanitize::sanitize_css).
    pub fn from_declarations<'d>(
        name: &str,
        declarations: impl IntoIterator<Item = &'d SafeCss>,
    ) -> Self {
        let body: String = declarations.into_iter().map(SafeCss::as_str).collect();
        Self::new(name, &body)
    }

    pub fn class_name(&self) -> &str {
        &self.id
    }
}

/// A source of a class name, optionally carrying a rule body to emit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CssClass {
    /// Name only; nothing to emit.
    Constant(String),
    /// Name with a rule body that must reach the response once.
    Component(ComponentCssClass),
}

impl CssClass {
    pub fn class_name(&self) -> &str {
        match self {
            Self::Constant(name) => name,
            Self::Component(class) => class.class_name(),
        }
    }

    pub fn body(&self) -> Option<&SafeCss> {
        match self {
            Self::Constant(_) => None,
            Self::Component(class) => Some(&class.class),
        }
    }
}

impl From<ComponentCssClass> for CssClass {
    fn from(class: ComponentCssClass) -> Self {
        Self::Component(class)
    }
}

/// Validate a caller-supplied class name, replacing it with
/// [`FALLBACK_CLASS_NAME`] when it does not look like a plain identifier.
pub fn class(name: &str) -> CssClass {
    if !SAFE_CLASS_NAME.is_match(name) {
        debug!(class = %name, "replaced unsafe css class name");
        return CssClass::Constant(FALLBACK_CLASS_NAME.to_string());
    }
    safe_class(name)
}

/// Use `name` as a class without validation. Trusted call sites only.
pub fn safe_class(name: &str) -> CssClass {
    CssClass::Constant(name.to_string())
}

/// Class list rendered as space-separated names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssClasses(pub Vec<CssClass>);

impl CssClasses {
    pub fn iter(&self) -> impl Iterator<Item = &CssClass> {
        self.0.iter()
    }
}

impl fmt::Display for CssClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, class) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class.class_name())?;
        }
        Ok(())
    }
}

pub fn classes(classes: impl IntoIterator<Item = CssClass>) -> CssClasses {
    CssClasses(classes.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::sanitize::sanitize_css;

    #[test]
    fn css_id_is_deterministic() {
        let body = "color:red;";
        assert_eq!(css_id("card", body), css_id("card", body));
        let id = css_id("card", body);
        assert!(id.starts_with("card_"));
        assert_eq!(id.len(), "card_".len() + CSS_ID_HASH_LEN);
    }

    #[test]
    fn css_id_matches_known_digest_prefix() {
        // sha256("") = e3b0c442...
        assert_eq!(css_id("empty", ""), "empty_e3b0");
    }

    #[test]
    fn distinct_bodies_yield_distinct_ids() {
        let bodies = [
            "color:red;",
            "color:blue;",
            "padding:4px;",
            "margin:0 auto;",
            "display:flex;",
            "font-weight:bold;",
        ];
        let ids: HashSet<String> = bodies.iter().map(|body| css_id("c", body)).collect();
        assert_eq!(ids.len(), bodies.len());
    }

    #[test]
    fn identical_rules_from_different_sites_share_an_id() {
        let a = ComponentCssClass::new("button", "color:red;");
        let b = ComponentCssClass::new("button", "color:red;");
        assert_eq!(a.id, b.id);
        assert_eq!(a.class.as_str(), format!(".{}{{color:red;}}", a.id));
    }

    #[test]
    fn from_declarations_concatenates_sanitized_parts() {
        let parts = [sanitize_css("color", "red"), sanitize_css("padding", "4px")];
        let class = ComponentCssClass::from_declarations("box", &parts);
        assert_eq!(class, ComponentCssClass::new("box", "color:red;padding:4px;"));
    }

    #[test]
    fn unsafe_names_fall_back() {
        for name in ["", "1abc", "a b", "x\"><script>", "--", "a;b", "é"] {
            assert_eq!(class(name).class_name(), FALLBACK_CLASS_NAME, "name: {name:?}");
        }
    }

    #[test]
    fn safe_names_are_kept() {
        for name in ["card", "-card", "_x", "btn-primary", "col_12"] {
            assert_eq!(class(name).class_name(), name);
        }
    }

    #[test]
    fn only_component_classes_carry_a_body() {
        assert!(safe_class("x").body().is_none());
        let component: CssClass = ComponentCssClass::new("x", "color:red;").into();
        assert!(component.body().is_some());
    }

    #[test]
    fn class_list_joins_names_with_spaces() {
        let card = ComponentCssClass::new("card", "padding:1rem;");
        let list = classes([safe_class("a"), card.clone().into(), class("b")]);
        assert_eq!(list.to_string(), format!("a {} b", card.id));
        assert_eq!(CssClasses::default().to_string(), "");
    }
}
