use serde::Serialize;

/// Severity tier of a task. Variant order is the severity order: `Red > Amber > Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Green,
    Amber,
    Red,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Green => "ON TRACK",
            Severity::Amber => "AMBER",
            Severity::Red => "RED",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Green => "chip-green",
            Severity::Amber => "chip-amber",
            Severity::Red => "chip-red",
        }
    }

    pub fn is_green(&self) -> bool {
        *self == Severity::Green
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Green => f.write_str("GREEN"),
            Severity::Amber => f.write_str("AMBER"),
            Severity::Red => f.write_str("RED"),
        }
    }
}

/// Classifies a free-text lifecycle state. Escalation wins over a reminder mention.
pub fn classify(state: Option<&str>) -> Severity {
    let state = state.unwrap_or_default().to_uppercase();
    if state.contains("ESCALATED") {
        Severity::Red
    } else if state.contains("REMINDER") {
        Severity::Amber
    } else {
        Severity::Green
    }
}
