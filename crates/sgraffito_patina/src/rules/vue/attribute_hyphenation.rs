//! vue/attribute-hyphenation
//!
//! Enforce attribute naming style on custom components in template.
//!
//! Only plain attributes and `v-bind` arguments are checked, and only on
//! elements that are not well-known HTML, SVG or MathML elements. `data-*`,
//! `aria-*`, `slot-scope` and the SVG attributes with mandated camelCase are
//! always accepted.
//!
//! ## Examples
//!
//! ### Invalid (default: always)
//! ```pug
//! MyComponent(myProp="value")
//! MyComponent(:myProp="value")
//! ```
//!
//! ### Valid
//! ```pug
//! MyComponent(my-prop="value" :my-prop="value")
//! div(myProp="value")
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sgraffito_carton::{
    is_html_well_known_element_name, is_math_ml_well_known_element_name,
    is_svg_well_known_element_name, CaseType, SVG_ATTRIBUTES_WEIRD_CASE,
};

use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity};
use crate::directive::Directive;
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::ElementKind;

static META: RuleMeta = RuleMeta {
    name: "vue/attribute-hyphenation",
    description: "Enforce attribute naming style on custom components in template",
    category: RuleCategory::StronglyRecommended,
    fixable: true,
    default_severity: Severity::Warning,
    messages: &[
        ("mustBeHyphenated", "Attribute '{{text}}' must be hyphenated."),
        ("cannotBeHyphenated", "Attribute '{{text}}' can't be hyphenated."),
    ],
};

const ALWAYS_IGNORED: &[&str] = &["data-", "aria-", "slot-scope"];

/// Attribute hyphenation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HyphenationOption {
    /// Require hyphenated attribute names: my-prop
    #[default]
    Always,
    /// Require camelCase: myProp
    Never,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ObjectOptions {
    ignore: Vec<String>,
}

/// Enforce attribute naming style on custom components
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHyphenation {
    pub option: HyphenationOption,
    /// Attribute names, or parts of names, never reported
    pub ignore: Vec<String>,
}

impl AttributeHyphenation {
    /// Build from the configuration form `["always" | "never", { "ignore": [...] }]`.
    pub fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        let option = match options.first() {
            Some(value) => HyphenationOption::deserialize(value)?,
            None => HyphenationOption::default(),
        };
        let ignore = match options.get(1) {
            Some(value) => ObjectOptions::deserialize(value)?.ignore,
            None => Vec::new(),
        };
        Ok(Self { option, ignore })
    }

    fn case_type(&self) -> CaseType {
        match self.option {
            HyphenationOption::Always => CaseType::KebabCase,
            HyphenationOption::Never => CaseType::CamelCase,
        }
    }

    fn is_ignored(&self, name: &str) -> bool {
        let listed = ALWAYS_IGNORED
            .iter()
            .chain(SVG_ATTRIBUTES_WEIRD_CASE)
            .copied()
            .chain(self.ignore.iter().map(String::as_str))
            .any(|ignored| name.contains(ignored));
        if listed {
            return true;
        }
        match self.option {
            HyphenationOption::Always => !name.chars().any(|c| c.is_ascii_uppercase()),
            HyphenationOption::Never => !name.contains('-'),
        }
    }
}

/// The checked name of an attribute and its offset within the raw name.
///
/// `None` for directives other than `v-bind` and for dynamic arguments.
fn checked_name(raw: &str) -> Option<(&str, usize)> {
    let Some(directive) = Directive::parse(raw) else {
        return Some((raw, 0));
    };
    if !directive.is("bind") {
        return None;
    }
    let argument = directive.static_argument()?;
    let offset = raw.find(argument)?;
    Some((argument, offset))
}

impl Rule for AttributeHyphenation {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    fn check_attribute(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.owner() else {
            return;
        };
        if element.kind == ElementKind::MixinCall
            || is_html_well_known_element_name(&element.name)
            || is_svg_well_known_element_name(&element.name)
            || is_math_ml_well_known_element_name(&element.name)
        {
            return;
        }

        let Some((raw, _)) = token.as_attribute() else {
            return;
        };
        let Some((name, offset)) = checked_name(raw) else {
            return;
        };
        if name.is_empty() || self.is_ignored(name) {
            return;
        }

        let (start, end) = token.name_range().unwrap_or((token.start, token.end));
        let message_id = match self.option {
            HyphenationOption::Always => "mustBeHyphenated",
            HyphenationOption::Never => "cannotBeHyphenated",
        };

        let name_start = start + offset as u32;
        let converted = self.case_type().convert_exact(name);
        let fix = ctx
            .token_edit(token, name_start, name_start + name.len() as u32, converted)
            .map(|edit| Fix::new(format!("Rename to {}", self.case_type()), edit));
        ctx.report_with_fix(message_id, &[("text", raw)], start, end, fix);
    }
}
