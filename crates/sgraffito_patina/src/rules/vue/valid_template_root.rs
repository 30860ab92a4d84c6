//! vue/valid-template-root
//!
//! Enforce valid template root.
//!
//! An inline template needs content. A template loaded through `src` must
//! be empty.
//!
//! ## Examples
//!
//! ### Invalid
//! ```vue
//! <template lang="pug"></template>
//! <template lang="pug" src="foo.pug">div</template>
//! ```
//!
//! ### Valid
//! ```vue
//! <template lang="pug">div abc</template>
//! <template lang="pug" src="foo.pug"></template>
//! ```

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::sfc::TemplateBlock;

static META: RuleMeta = RuleMeta {
    name: "vue/valid-template-root",
    description: "Enforce valid template root",
    category: RuleCategory::Essential,
    fixable: false,
    default_severity: Severity::Error,
    messages: &[
        ("requireChild", "The template requires child element."),
        (
            "srcRequiresEmpty",
            "The template root with 'src' attribute is required to be empty.",
        ),
    ],
};

/// Enforce valid template root
pub struct ValidTemplateRoot;

impl Rule for ValidTemplateRoot {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_template_block(&self, ctx: &mut LintContext, block: &TemplateBlock) {
        // A bare template has no enclosing tags to check.
        if block.start_tag.is_empty() {
            return;
        }

        match (block.has_src, block.has_content()) {
            (false, false) => ctx.report_message(
                "requireChild",
                &[],
                block.start_tag.start,
                block.end_tag.end,
            ),
            (true, true) => ctx.report_message(
                "srcRequiresEmpty",
                &[],
                block.start_tag.end,
                block.end_tag.start,
            ),
            _ => {}
        }
    }
}
