//! In-memory presentation model.
//!
//! Mirrors the parts of a rendered questionnaire the runtime touches:
//! conditional blocks and the controls bound to question names.

use serde::{Deserialize, Serialize};

/// Visibility predicate declared on a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Shown iff the named question is truthy.
    VisibleWhen(String),
    /// Shown iff the named question is falsy.
    Else(String),
}

impl Condition {
    /// The question this predicate reads.
    pub fn key(&self) -> &str {
        match self {
            Self::VisibleWhen(key) | Self::Else(key) => key,
        }
    }

    /// Visibility this predicate yields for a question's truthiness.
    pub fn visible_for(&self, truthy: bool) -> bool {
        match self {
            Self::VisibleWhen(_) => truthy,
            Self::Else(_) => !truthy,
        }
    }
}

/// A conditional container block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub condition: Condition,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Block {
    pub fn new(id: impl Into<String>, condition: Condition) -> Self {
        Self {
            id: id.into(),
            condition,
            visible: true,
        }
    }

    /// CSS class the host applies for the current visibility.
    pub fn class_name(&self) -> &'static str {
        if self.visible {
            "visible"
        } else {
            "hidden"
        }
    }
}

/// Native kind of a presentation control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Checkbox,
    Number,
    Text,
    /// Output-only control showing a computed value.
    Display,
    /// Any kind the runtime has no mapping for (e.g. `"radio"`).
    Other(String),
}

impl ControlKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Text => "text",
            Self::Display => "display",
            Self::Other(kind) => kind,
        }
    }
}

/// A control bound to a question by `name`.
///
/// `checked` and `value` hold the control's native state: a checkbox uses
/// `checked`, every other kind shows `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub name: String,
    pub kind: ControlKind,
    /// Set for inputs scoped under a question marker; only these take edits.
    #[serde(default)]
    pub question: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub value: String,
}

impl Control {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            question: false,
            checked: false,
            value: String::new(),
        }
    }

    /// Mark this control as an edit-wired question input.
    pub fn question(mut self) -> Self {
        self.question = true;
        self
    }
}

/// The whole presentation surface of one questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn control_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Mirror a host-side edit into the control's native state.
    /// Returns `false` if no control has this id.
    pub fn sync_input(&mut self, id: &str, checked: bool, value: &str) -> bool {
        match self.control_mut(id) {
            Some(control) => {
                control.checked = checked;
                control.value = value.to_string();
                true
            }
            None => false,
        }
    }
}
