//! vue/component-name-in-template-casing
//!
//! Enforce specific casing for the component naming style in template.
//!
//! By default only components registered in the companion script are
//! checked, and only those registered under a PascalCase name (a PascalCase
//! registration may be used in either casing). With
//! `registeredComponentsOnly: false` every element that is not a well-known
//! HTML, SVG or MathML element is checked.
//!
//! ## Examples
//!
//! ### Invalid (default: PascalCase)
//! ```pug
//! cool-component
//! coolComponent
//! ```
//!
//! ### Valid
//! ```pug
//! CoolComponent
//! div
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use sgraffito_carton::{is_known_element_name, is_pascal_case, pascal_case, CaseType, NamePattern};

use crate::context::LintContext;
use crate::diagnostic::{Fix, Severity};
use crate::reconcile::ReconciledToken;
use crate::rule::{Rule, RuleCategory, RuleMeta, TokenCursor};
use crate::tree::ElementKind;

static META: RuleMeta = RuleMeta {
    name: "vue/component-name-in-template-casing",
    description: "Enforce specific casing for the component naming style in template",
    category: RuleCategory::StronglyRecommended,
    fixable: true,
    default_severity: Severity::Warning,
    messages: &[(
        "incorrectCase",
        "Component name \"{{name}}\" is not {{caseType}}.",
    )],
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ObjectOptions {
    ignores: Vec<String>,
    registered_components_only: bool,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            registered_components_only: true,
        }
    }
}

/// Enforce specific casing for component names in template
#[derive(Debug, Clone)]
pub struct ComponentNameInTemplateCasing {
    /// `PascalCase` or `kebab-case`
    pub case_type: CaseType,
    pub registered_components_only: bool,
    /// Names (or `/regex/` patterns) never checked
    pub ignores: Vec<NamePattern>,
    ignore_sources: Vec<String>,
}

impl Default for ComponentNameInTemplateCasing {
    fn default() -> Self {
        Self {
            case_type: CaseType::PascalCase,
            registered_components_only: true,
            ignores: Vec::new(),
            ignore_sources: Vec::new(),
        }
    }
}

impl ComponentNameInTemplateCasing {
    pub fn new(case_type: CaseType) -> Self {
        Self {
            case_type,
            ..Self::default()
        }
    }

    pub fn registered_components_only(mut self, only: bool) -> Self {
        self.registered_components_only = only;
        self
    }

    pub fn ignore(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.ignores.push(NamePattern::parse(pattern)?);
        self.ignore_sources.push(pattern.to_string());
        Ok(self)
    }

    /// Build from the configuration form
    /// `["PascalCase" | "kebab-case", { "ignores": [...], "registeredComponentsOnly": bool }]`.
    ///
    /// An unknown casing falls back to PascalCase.
    pub fn from_options(options: &[Value]) -> Result<Self, serde_json::Error> {
        let case_type = match options.first() {
            Some(value) => match String::deserialize(value)?.as_str() {
                "kebab-case" => CaseType::KebabCase,
                _ => CaseType::PascalCase,
            },
            None => CaseType::PascalCase,
        };
        let object = match options.get(1) {
            Some(value) => ObjectOptions::deserialize(value)?,
            None => ObjectOptions::default(),
        };

        let mut rule = Self::new(case_type).registered_components_only(object.registered_components_only);
        for pattern in &object.ignores {
            rule = rule.ignore(pattern).map_err(serde_json::Error::custom)?;
        }
        Ok(rule)
    }

    fn is_target(&self, ctx: &LintContext, name: &str) -> bool {
        if self.ignores.iter().any(|pattern| pattern.is_match(name)) {
            return false;
        }
        if !self.registered_components_only {
            return !is_known_element_name(name);
        }
        let pascal = pascal_case(name);
        ctx.script()
            .registered_components()
            .filter(|registered| is_pascal_case(registered))
            .any(|registered| registered == name || registered == pascal)
    }
}

impl Rule for ComponentNameInTemplateCasing {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn options(&self) -> Value {
        json!([
            self.case_type.as_str(),
            {
                "ignores": self.ignore_sources,
                "registeredComponentsOnly": self.registered_components_only,
            }
        ])
    }

    fn check_tag(&self, ctx: &mut LintContext, token: &ReconciledToken, cursor: &TokenCursor) {
        let Some((_, element)) = cursor.element() else {
            return;
        };
        if element.kind != ElementKind::Tag {
            return;
        }
        let name = element.name.as_str();
        if self.case_type.check(name) || !self.is_target(ctx, name) {
            return;
        }

        let converted = self.case_type.convert_exact(name);
        let fix = ctx
            .token_edit(token, token.start, token.end, converted.as_str())
            .map(|edit| Fix::new(format!("Rename to {converted}"), edit));
        ctx.report_with_fix(
            "incorrectCase",
            &[("name", name), ("caseType", self.case_type.as_str())],
            token.start,
            token.end,
            fix,
        );
    }
}

impl<'de> Deserialize<'de> for ComponentNameInTemplateCasing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let options = Vec::<Value>::deserialize(deserializer)?;
        Self::from_options(&options).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linter::{LintResult, Linter};
    use crate::rule::RuleRegistry;

    const SCRIPT: &str = "\n<script>\nexport default {\n  components: {\n    CoolComponent\n  }\n}\n</script>";

    fn lint(rule: ComponentNameInTemplateCasing, template: &str, script: &str) -> LintResult {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(rule));
        let source = format!("<template lang=\"pug\">{template}</template>{script}");
        Linter::with_registry(registry).lint_sfc(&source, "test.vue")
    }

    fn all_components(case_type: CaseType) -> ComponentNameInTemplateCasing {
        ComponentNameInTemplateCasing::new(case_type).registered_components_only(false)
    }

    fn fixed(result: &LintResult, source: &str) -> String {
        let mut out = source.to_string();
        let mut diagnostics = result.diagnostics.clone();
        diagnostics.sort_by(|a, b| b.start.cmp(&a.start));
        for diagnostic in diagnostics {
            out = diagnostic.fix.unwrap().apply(&out);
        }
        out
    }

    #[test]
    fn test_valid_registered_only() {
        let template = "\n//- good\nCoolComponent\nUnregisteredComponent\nunregistered-component\n";
        let result = lint(ComponentNameInTemplateCasing::default(), template, SCRIPT);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_valid_element_types() {
        for template in [
            "div",
            "img",
            "TheComponent",
            "svg: path",
            "math: mspace",
            "div: slot",
            "h1 Title",
            "h1(:is=\"customTitle\") Title",
            "svg: TheComponent",
            "text",
            "circle(cx=\"0\" cy=\"0\" :d=\"radius\")",
        ] {
            let result = lint(all_components(CaseType::PascalCase), template, "");
            assert!(result.diagnostics.is_empty(), "{template}");
        }
        for template in ["the-component", "div", "svg: path"] {
            let result = lint(all_components(CaseType::KebabCase), template, "");
            assert!(result.diagnostics.is_empty(), "{template}");
        }
    }

    #[test]
    fn test_valid_ignores() {
        let rule = all_components(CaseType::PascalCase)
            .ignore("custom-element")
            .unwrap();
        assert!(lint(rule, "custom-element: TheComponent", "").diagnostics.is_empty());

        let rule = all_components(CaseType::PascalCase).ignore("/^global/").unwrap();
        let template = "\nglobal-button\nglobalCard\nglobal-grid\n";
        assert!(lint(rule, template, "").diagnostics.is_empty());
    }

    #[test]
    fn test_invalid_pascal_case_with_fix() {
        let template = "\n//- bad\ncool-component\ncoolComponent\nCool-component\n";
        let source = format!("<template lang=\"pug\">{template}</template>{SCRIPT}");
        let result = lint(ComponentNameInTemplateCasing::default(), template, SCRIPT);

        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Component name \"cool-component\" is not PascalCase.",
                "Component name \"coolComponent\" is not PascalCase.",
                "Component name \"Cool-component\" is not PascalCase.",
            ]
        );
        let first = &result.diagnostics[0];
        assert_eq!((first.loc.line, first.loc.column, first.loc.end_column), (3, 0, 14));
        assert_eq!(
            fixed(&result, &source),
            format!("<template lang=\"pug\">\n//- bad\nCoolComponent\nCoolComponent\nCoolComponent\n</template>{SCRIPT}")
        );
    }

    #[test]
    fn test_invalid_kebab_case_with_fix() {
        let template = "\nCoolComponent(id=\"id\")\ncoolComponent\nCool-component\n";
        let source = format!("<template lang=\"pug\">{template}</template>{SCRIPT}");
        let result = lint(ComponentNameInTemplateCasing::new(CaseType::KebabCase), template, SCRIPT);
        assert_eq!(result.warning_count, 3);
        assert_eq!(
            fixed(&result, &source),
            format!("<template lang=\"pug\">\ncool-component(id=\"id\")\ncool-component\ncool-component\n</template>{SCRIPT}")
        );
    }

    #[test]
    fn test_invalid_nested_and_setup_bindings() {
        let script = "\n<script>\nexport default {\n  components: {TheComponent}\n}\n</script>";
        let result = lint(
            ComponentNameInTemplateCasing::default(),
            "\nsvg\n  the-component\n",
            script,
        );
        assert_eq!(result.diagnostics[0].message, "Component name \"the-component\" is not PascalCase.");

        let setup = "\n<script setup>\nimport TheComponent from './TheComponent.vue'\n</script>";
        let result = lint(ComponentNameInTemplateCasing::default(), "\nthe-component(id=\"id\")\n", setup);
        assert_eq!(result.warning_count, 1);
    }

    #[test]
    fn test_commented_out_registration_is_ignored() {
        let setup = "\n<script setup>\n/*\nimport CoolComponent from './Cool.vue'\n*/\n</script>";
        let result = lint(ComponentNameInTemplateCasing::default(), "\ncool-component\n", setup);
        assert!(result.diagnostics.is_empty());

        let script = "\n<script>\nexport default {\n  components: {\n    // OldThing\n    CoolComponent,\n  }\n}\n</script>";
        let result = lint(ComponentNameInTemplateCasing::default(), "\ncool-component\n", script);
        assert_eq!(result.warning_count, 1);
        assert_eq!(result.diagnostics[0].message, "Component name \"cool-component\" is not PascalCase.");
    }

    #[test]
    fn test_invalid_all_components() {
        let result = lint(all_components(CaseType::KebabCase), "\nThecomponent\n", "");
        assert_eq!(result.diagnostics[0].message, "Component name \"Thecomponent\" is not kebab-case.");
        let result = lint(all_components(CaseType::KebabCase), "\nTheComponent(id=\"id\")\n", "");
        assert_eq!(result.warning_count, 1);
    }

    #[test]
    fn test_from_options() {
        let rule: ComponentNameInTemplateCasing = serde_json::from_value(json!([
            "kebab-case",
            { "registeredComponentsOnly": false, "ignores": ["/^global/"] }
        ]))
        .unwrap();
        assert_eq!(rule.case_type, CaseType::KebabCase);
        assert!(!rule.registered_components_only);
        assert_eq!(rule.options()[1]["ignores"][0], "/^global/");

        let rule = ComponentNameInTemplateCasing::from_options(&[]).unwrap();
        assert_eq!(rule.case_type, CaseType::PascalCase);
        assert!(rule.registered_components_only);
        assert!(ComponentNameInTemplateCasing::from_options(&[json!("PascalCase"), json!({ "ignores": ["/(/"] })]).is_err());
    }
}
