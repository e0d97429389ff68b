//! Builtin axs audit rules.

use script_bridge::RawSeverity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleInfo {
    /// Name the page-side library uses to select the rule.
    pub name: &'static str,
    /// Code reported back in audit results.
    pub code: &'static str,
    pub description: &'static str,
    pub severity: RawSeverity,
}

pub const BUILTIN_RULES: &[RuleInfo] = &[
    RuleInfo {
        name: "badAriaRole",
        code: "AX_ARIA_01",
        description: "Elements with ARIA roles must use a valid, non-abstract ARIA role",
        severity: RawSeverity::Error,
    },
    RuleInfo {
        name: "nonExistentAriaRelatedElement",
        code: "AX_ARIA_02",
        description: "ARIA attributes which refer to other elements by ID should refer to elements which exist in the DOM",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "requiredAriaAttributeMissing",
        code: "AX_ARIA_03",
        description: "Elements with ARIA roles must have all required attributes for that role",
        severity: RawSeverity::Error,
    },
    RuleInfo {
        name: "badAriaAttributeValue",
        code: "AX_ARIA_04",
        description: "ARIA state and property values must be valid",
        severity: RawSeverity::Error,
    },
    RuleInfo {
        name: "unsupportedAriaAttribute",
        code: "AX_ARIA_10",
        description: "This element has an unsupported ARIA attribute",
        severity: RawSeverity::Error,
    },
    RuleInfo {
        name: "audioWithoutControls",
        code: "AX_AUDIO_01",
        description: "Audio elements should have controls",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "lowContrastElements",
        code: "AX_COLOR_01",
        description: "Text elements should have a reasonable contrast ratio",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "focusableElementNotVisibleAndNotAriaHidden",
        code: "AX_FOCUS_01",
        description: "These elements are focusable but either invisible or obscured by another element",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "humanLangMissing",
        code: "AX_HTML_01",
        description: "The web page should have the content's human language indicated in the markup",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "imagesWithoutAltText",
        code: "AX_IMAGE_01",
        description: "Images should have a text alternative or presentational role",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "controlsWithoutLabel",
        code: "AX_TEXT_01",
        description: "Controls and media elements should have labels",
        severity: RawSeverity::Error,
    },
    RuleInfo {
        name: "linkWithUnclearPurpose",
        code: "AX_TEXT_04",
        description: "The purpose of each link should be clear from the link text",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "pageWithoutTitle",
        code: "AX_TITLE_01",
        description: "The web page should have a title that describes topic or purpose",
        severity: RawSeverity::Warning,
    },
    RuleInfo {
        name: "videoWithoutCaptions",
        code: "AX_VIDEO_01",
        description: "Video elements should use <track> elements to provide captions",
        severity: RawSeverity::Warning,
    },
];

pub fn lookup_by_name(name: &str) -> Option<&'static RuleInfo> {
    BUILTIN_RULES.iter().find(|rule| rule.name == name)
}

pub fn lookup_by_code(code: &str) -> Option<&'static RuleInfo> {
    BUILTIN_RULES.iter().find(|rule| rule.code == code)
}
