//! Vue-specific lint rules.
//!
//! These rules are compatible with eslint-plugin-vue's rule sets, rewritten
//! for the Pug token stream. Every rule reads structure from the shared
//! trackers and the element tree; none of them tracks indentation itself.

// Base rules
mod script_setup_uses_vars;

// Essential rules
mod no_deprecated_dollar_scopedslots_api;
mod no_deprecated_filter;
mod no_dupe_v_else_if;
mod no_duplicate_attributes;
mod no_multiple_template_root;
mod no_template_key;
mod no_textarea_mustache;
mod no_use_v_if_with_v_for;
mod require_component_is;
mod require_v_for_key;
mod use_v_on_exact;
mod valid_template_root;
mod valid_v_else;
mod valid_v_else_if;
mod valid_v_for;
mod valid_v_if;
mod valid_v_on;

// Strongly recommended rules
mod attribute_hyphenation;
mod component_name_in_template_casing;

// Recommended rules
mod this_in_template;

// Base rules exports
pub use script_setup_uses_vars::ScriptSetupUsesVars;

// Essential rules exports
pub use no_deprecated_dollar_scopedslots_api::NoDeprecatedDollarScopedslotsApi;
pub use no_deprecated_filter::NoDeprecatedFilter;
pub use no_dupe_v_else_if::NoDupeVElseIf;
pub use no_duplicate_attributes::NoDuplicateAttributes;
pub use no_multiple_template_root::NoMultipleTemplateRoot;
pub use no_template_key::NoTemplateKey;
pub use no_textarea_mustache::NoTextareaMustache;
pub use no_use_v_if_with_v_for::NoUseVIfWithVFor;
pub use require_component_is::RequireComponentIs;
pub use require_v_for_key::RequireVForKey;
pub use use_v_on_exact::UseVOnExact;
pub use valid_template_root::ValidTemplateRoot;
pub use valid_v_else::ValidVElse;
pub use valid_v_else_if::ValidVElseIf;
pub use valid_v_for::ValidVFor;
pub use valid_v_if::ValidVIf;
pub use valid_v_on::ValidVOn;

// Strongly recommended rules exports
pub use attribute_hyphenation::{AttributeHyphenation, HyphenationOption};
pub use component_name_in_template_casing::ComponentNameInTemplateCasing;

// Recommended rules exports
pub use this_in_template::{ThisInTemplate, ThisInTemplateOption};
