//! Static analysis of a component's script blocks.
//!
//! Each block is parsed with OXC. The scan collects:
//!
//! - the keys of the `components` option of the default export (registered
//!   components);
//! - module-scope bindings: imports, `const`/`let`/`var` (destructuring
//!   included), `function` and `class` declarations.
//!
//! A block that fails to parse contributes nothing.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Argument, BindingPattern, Declaration, ExportDefaultDeclarationKind,
    Expression, ImportDeclarationSpecifier, ObjectExpression, ObjectPropertyKind, PropertyKey,
    Statement,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use sgraffito_carton::CompactString;

use crate::sfc::ScriptBlock;

/// A module-scope binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBinding {
    pub name: CompactString,
    /// Declared in `<script setup>`
    pub setup: bool,
}

/// What the template may refer to from the script blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptInfo {
    /// Keys of the `components` option, in source order
    pub components: Vec<CompactString>,
    pub bindings: Vec<ScriptBinding>,
}

impl ScriptInfo {
    /// Scan all script blocks of a component.
    pub fn scan(blocks: &[ScriptBlock]) -> Self {
        let mut info = Self::default();
        for block in blocks {
            info.scan_block(block);
        }
        info
    }

    fn scan_block(&mut self, block: &ScriptBlock) {
        let allocator = Allocator::default();
        let source_type = source_type(block.lang.as_deref());
        let ret = Parser::new(&allocator, &block.content, source_type).parse();

        if ret.panicked || !ret.errors.is_empty() {
            tracing::debug!(
                target: "sgraffito_patina::script",
                setup = block.setup,
                errors = ret.errors.len(),
                "script block could not be parsed"
            );
            return;
        }

        let mut names = Vec::new();
        for stmt in ret.program.body.iter() {
            self.process_statement(stmt, &mut names);
        }

        for name in names {
            if !self.bindings.iter().any(|b| b.name == name) {
                self.bindings.push(ScriptBinding {
                    name,
                    setup: block.setup,
                });
            }
        }
    }

    fn process_statement(&mut self, stmt: &Statement<'_>, names: &mut Vec<CompactString>) {
        match stmt {
            Statement::ImportDeclaration(import) => {
                if import.import_kind.is_type() {
                    return;
                }
                let Some(specifiers) = &import.specifiers else {
                    return;
                };
                for spec in specifiers.iter() {
                    let name = match spec {
                        ImportDeclarationSpecifier::ImportSpecifier(s) => {
                            if s.import_kind.is_type() {
                                continue;
                            }
                            s.local.name.as_str()
                        }
                        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => s.local.name.as_str(),
                        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                            s.local.name.as_str()
                        }
                    };
                    names.push(CompactString::new(name));
                }
            }
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    pattern_names(&declarator.id, names);
                }
            }
            Statement::FunctionDeclaration(func) => {
                if let Some(id) = &func.id {
                    names.push(CompactString::new(id.name.as_str()));
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    names.push(CompactString::new(id.name.as_str()));
                }
            }
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    declaration_names(decl, names);
                }
            }
            Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                ExportDefaultDeclarationKind::ObjectExpression(options) => {
                    self.collect_components(options);
                }
                // `export default defineComponent({ ... })`
                ExportDefaultDeclarationKind::CallExpression(call) => {
                    if let Some(Argument::ObjectExpression(options)) = call.arguments.first() {
                        self.collect_components(options);
                    }
                }
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    if let Some(id) = &func.id {
                        names.push(CompactString::new(id.name.as_str()));
                    }
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    if let Some(id) = &class.id {
                        names.push(CompactString::new(id.name.as_str()));
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Keys of the `components` property of a component options object.
    fn collect_components(&mut self, options: &ObjectExpression<'_>) {
        for prop in options.properties.iter() {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            if property_key(&prop.key) != Some("components") {
                continue;
            }
            let Expression::ObjectExpression(components) = &prop.value else {
                continue;
            };
            for entry in components.properties.iter() {
                // Spread entries have no static name
                let ObjectPropertyKind::ObjectProperty(entry) = entry else {
                    continue;
                };
                if let Some(key) = property_key(&entry.key) {
                    let key = CompactString::new(key);
                    if !self.components.contains(&key) {
                        self.components.push(key);
                    }
                }
            }
        }
    }

    /// Bindings declared in `<script setup>`.
    pub fn setup_bindings(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|b| b.setup)
            .map(|b| b.name.as_str())
    }

    /// Whether `name` is a module-scope binding of `<script setup>`.
    pub fn has_setup_binding(&self, name: &str) -> bool {
        self.setup_bindings().any(|b| b == name)
    }

    /// Components the template can use by name: the `components` option
    /// plus `<script setup>` bindings, which are registered implicitly.
    pub fn registered_components(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .map(CompactString::as_str)
            .chain(self.setup_bindings())
    }
}

/// Parse as TypeScript unless the block says otherwise; plain JS parses
/// either way.
fn source_type(lang: Option<&str>) -> SourceType {
    let path = match lang {
        Some("tsx") => "script.tsx",
        Some("jsx") => "script.jsx",
        _ => "script.ts",
    };
    SourceType::from_path(path).unwrap_or_default()
}

fn property_key<'a>(key: &'a PropertyKey<'_>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(id) => Some(id.name.as_str()),
        PropertyKey::StringLiteral(s) => Some(s.value.as_str()),
        _ => None,
    }
}

fn declaration_names(decl: &Declaration<'_>, names: &mut Vec<CompactString>) {
    match decl {
        Declaration::VariableDeclaration(decl) => {
            for declarator in decl.declarations.iter() {
                pattern_names(&declarator.id, names);
            }
        }
        Declaration::FunctionDeclaration(func) => {
            if let Some(id) = &func.id {
                names.push(CompactString::new(id.name.as_str()));
            }
        }
        Declaration::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                names.push(CompactString::new(id.name.as_str()));
            }
        }
        _ => {}
    }
}

/// Names bound by a declaration pattern, destructuring flattened.
fn pattern_names(pattern: &BindingPattern<'_>, names: &mut Vec<CompactString>) {
    match pattern {
        BindingPattern::BindingIdentifier(id) => {
            names.push(CompactString::new(id.name.as_str()));
        }
        BindingPattern::ObjectPattern(obj) => {
            for prop in obj.properties.iter() {
                pattern_names(&prop.value, names);
            }
            if let Some(rest) = &obj.rest {
                pattern_names(&rest.argument, names);
            }
        }
        BindingPattern::ArrayPattern(arr) => {
            for elem in arr.elements.iter().flatten() {
                pattern_names(elem, names);
            }
            if let Some(rest) = &arr.rest {
                pattern_names(&rest.argument, names);
            }
        }
        BindingPattern::AssignmentPattern(assign) => {
            pattern_names(&assign.left, names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str, setup: bool) -> ScriptInfo {
        ScriptInfo::scan(&[ScriptBlock {
            content: content.to_string(),
            setup,
            ..Default::default()
        }])
    }

    #[test]
    fn test_components_option() {
        let info = scan(
            "import CoolComponent from './Cool.vue'\nexport default {\n  components: {\n    CoolComponent,\n    'other-thing': Other,\n    Nested: { render() {} },\n    ...more\n  }\n}",
            false,
        );
        assert_eq!(info.components, vec!["CoolComponent", "other-thing", "Nested"]);
        assert!(!info.has_setup_binding("CoolComponent"));
    }

    #[test]
    fn test_components_option_in_define_component() {
        let info = scan(
            "import { defineComponent } from 'vue'\nexport default defineComponent({\n  components: { Panel },\n})",
            false,
        );
        assert_eq!(info.components, vec!["Panel"]);
    }

    #[test]
    fn test_comments_are_not_code() {
        let info = scan(
            "/*\nimport Removed from './Removed.vue'\n*/\n// const stale = 1\nexport default {\n  components: {\n    // OldThing,\n    CoolComponent,\n  },\n}",
            true,
        );
        assert_eq!(info.components, vec!["CoolComponent"]);
        assert!(!info.has_setup_binding("Removed"));
        assert!(!info.has_setup_binding("stale"));
    }

    #[test]
    fn test_setup_bindings() {
        let info = scan(
            "import Foo, { Bar, baz as Qux } from './x'\nimport * as Utils from './u'\nimport type { T } from './t'\nimport { type U, V } from './v'\nconst { a, b: renamed, ...rest } = useThing()\nlet [first, second = 2] = list\nexport function helper() {}\nclass Store {}\nfunction inner() {\n  const local = 1\n}",
            true,
        );
        let names: Vec<_> = info.setup_bindings().collect();
        assert_eq!(
            names,
            vec![
                "Foo", "Bar", "Qux", "Utils", "V", "a", "renamed", "rest", "first", "second",
                "helper", "Store", "inner"
            ]
        );
        assert!(!info.has_setup_binding("local"));
        assert!(!info.has_setup_binding("T"));
        assert!(info.registered_components().any(|c| c == "Foo"));
    }

    #[test]
    fn test_unparsable_block_is_empty() {
        let info = scan("const = {", true);
        assert_eq!(info, ScriptInfo::default());
    }
}
