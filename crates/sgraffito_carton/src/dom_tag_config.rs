//! Well-known element and attribute tables.
//!
//! Lookups are case-sensitive: `Button` is not the HTML `button` element,
//! it is a component. Uses compile-time perfect hash functions (phf).

use phf::phf_set;

// =============================================================================
// Compile-time Perfect Hash Sets
// =============================================================================

static HTML_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "html", "body", "base", "head", "link", "meta", "style", "title",
    "address", "article", "aside", "footer", "header", "h1", "h2", "h3",
    "h4", "h5", "h6", "hgroup", "nav", "section", "div", "dd", "dl", "dt",
    "figcaption", "figure", "hr", "img", "li", "main", "ol", "p", "pre",
    "ul", "a", "b", "abbr", "bdi", "bdo", "br", "cite", "code", "data",
    "dfn", "em", "i", "kbd", "mark", "q", "rp", "rt", "rtc", "ruby", "s",
    "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
    "wbr", "area", "audio", "map", "track", "video", "embed", "object",
    "param", "source", "canvas", "script", "noscript", "del", "ins",
    "caption", "col", "colgroup", "table", "thead", "tbody", "tfoot", "td",
    "th", "tr", "button", "datalist", "fieldset", "form", "input", "label",
    "legend", "meter", "optgroup", "option", "output", "progress", "select",
    "textarea", "details", "dialog", "menu", "menuitem", "summary",
    "content", "element", "shadow", "template", "blockquote", "iframe",
    "noframes", "picture", "search", "slot", "portal",
};

static SVG_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "a", "animate", "animateMotion", "animateTransform", "circle",
    "clipPath", "defs", "desc", "discard", "ellipse", "feBlend",
    "feColorMatrix", "feComponentTransfer", "feComposite",
    "feConvolveMatrix", "feDiffuseLighting", "feDisplacementMap",
    "feDistantLight", "feDropShadow", "feFlood", "feFuncA", "feFuncB",
    "feFuncG", "feFuncR", "feGaussianBlur", "feImage", "feMerge",
    "feMergeNode", "feMorphology", "feOffset", "fePointLight",
    "feSpecularLighting", "feSpotLight", "feTile", "feTurbulence", "filter",
    "foreignObject", "g", "image", "line", "linearGradient", "marker",
    "mask", "metadata", "mpath", "path", "pattern", "polygon", "polyline",
    "radialGradient", "rect", "script", "set", "stop", "style", "svg",
    "switch", "symbol", "text", "textPath", "title", "tspan", "unknown",
    "use", "view",
};

static MATH_ML_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "math", "maction", "annotation", "annotation-xml", "menclose",
    "merror", "mfenced", "mfrac", "mi", "mmultiscripts", "mn", "mo",
    "mover", "mpadded", "mphantom", "mprescripts", "mroot", "mrow", "ms",
    "semantics", "mspace", "msqrt", "mstyle", "msub", "msup", "msubsup",
    "mtable", "mtd", "mtext", "mtr", "munder", "munderover",
};

/// SVG attributes whose camelCase spelling is mandated by the SVG spec.
pub static SVG_ATTRIBUTES_WEIRD_CASE: &[&str] = &[
    "accent-height", "alignment-baseline", "arabic-form", "attributeName",
    "attributeType", "baseFrequency", "baseline-shift", "baseProfile",
    "calcMode", "cap-height", "clipPathUnits", "clip-path", "clip-rule",
    "color-interpolation", "color-interpolation-filters", "color-profile",
    "color-rendering", "contentScriptType", "contentStyleType",
    "diffuseConstant", "dominant-baseline", "edgeMode", "enable-background",
    "externalResourcesRequired", "fill-opacity", "fill-rule",
    "filterRes", "filterUnits", "flood-color", "flood-opacity", "font-family",
    "font-size", "font-size-adjust", "font-stretch", "font-style",
    "font-variant", "font-weight", "glyph-name",
    "glyph-orientation-horizontal", "glyph-orientation-vertical",
    "glyphRef", "gradientTransform", "gradientUnits", "horiz-adv-x",
    "horiz-origin-x", "image-rendering", "kernelMatrix", "kernelUnitLength",
    "keyPoints", "keySplines", "keyTimes", "lengthAdjust", "letter-spacing",
    "lighting-color", "limitingConeAngle", "marker-end", "marker-mid",
    "marker-start", "markerHeight", "markerUnits", "markerWidth",
    "maskContentUnits", "maskUnits", "numOctaves", "overline-position",
    "overline-thickness", "panose-1", "paint-order", "pathLength",
    "patternContentUnits", "patternTransform", "patternUnits",
    "pointer-events", "pointsAtX", "pointsAtY", "pointsAtZ",
    "preserveAlpha", "preserveAspectRatio", "primitiveUnits", "refX",
    "refY", "rendering-intent", "repeatCount", "repeatDur",
    "requiredExtensions", "requiredFeatures", "shape-rendering",
    "specularConstant", "specularExponent", "spreadMethod", "startOffset",
    "stdDeviation", "stitchTiles", "stop-color", "stop-opacity",
    "strikethrough-position", "strikethrough-thickness", "stroke-dasharray",
    "stroke-dashoffset", "stroke-linecap", "stroke-linejoin",
    "stroke-miterlimit", "stroke-opacity", "stroke-width", "surfaceScale",
    "systemLanguage", "tableValues", "targetX", "targetY", "text-anchor",
    "text-decoration", "text-rendering", "textLength", "underline-position",
    "underline-thickness", "unicode-bidi", "unicode-range", "units-per-em",
    "v-alphabetic", "v-hanging", "v-ideographic", "v-mathematical",
    "vector-effect", "vert-adv-y", "vert-origin-x", "vert-origin-y",
    "viewBox", "viewTarget", "word-spacing", "writing-mode", "x-height",
    "xChannelSelector", "yChannelSelector", "zoomAndPan",
];

/// Check if the name is a well-known HTML element.
#[inline]
pub fn is_html_well_known_element_name(name: &str) -> bool {
    HTML_ELEMENTS.contains(name)
}

/// Check if the name is a well-known SVG element.
#[inline]
pub fn is_svg_well_known_element_name(name: &str) -> bool {
    SVG_ELEMENTS.contains(name)
}

/// Check if the name is a well-known MathML element.
#[inline]
pub fn is_math_ml_well_known_element_name(name: &str) -> bool {
    MATH_ML_ELEMENTS.contains(name)
}

/// Check if the name is any well-known HTML, SVG or MathML element.
#[inline]
pub fn is_known_element_name(name: &str) -> bool {
    is_html_well_known_element_name(name)
        || is_svg_well_known_element_name(name)
        || is_math_ml_well_known_element_name(name)
}
