//! Single-row modal prompts: a fixed label followed by an editable field.

use crate::core::content::SharedContent;
use crate::core::controller::ControllerKind;
use crate::core::geometry::Rect;
use crate::core::text::width::visible_width;
use crate::runtime::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Find,
    Goto,
    Open,
    Quit,
    SaveAs,
}

impl PromptKind {
    pub const ALL: [PromptKind; 5] = [
        PromptKind::Find,
        PromptKind::Goto,
        PromptKind::Open,
        PromptKind::Quit,
        PromptKind::SaveAs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Find => "find: ",
            Self::Goto => "goto: ",
            Self::Open => "file: ",
            Self::Quit => "Save changes? (yes, no, or cancel): ",
            Self::SaveAs => "save as: ",
        }
    }

    pub fn controller_kind(self) -> ControllerKind {
        match self {
            Self::Find => ControllerKind::Find,
            Self::Goto => ControllerKind::Goto,
            Self::Open => ControllerKind::Open,
            Self::Quit => ControllerKind::Quit,
            Self::SaveAs => ControllerKind::SaveAs,
        }
    }
}

/// Prompt state carried by the field node. The label is a separate child node.
pub struct LabeledLine {
    kind: PromptKind,
    label: NodeId,
    file_listing: Option<SharedContent>,
}

impl LabeledLine {
    pub fn new(kind: PromptKind, label: NodeId, file_listing: Option<SharedContent>) -> Self {
        Self {
            kind,
            label,
            file_listing,
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn label_node(&self) -> NodeId {
        self.label
    }

    /// Directory listing shown alongside the file-open prompt.
    pub fn file_listing(&self) -> Option<&SharedContent> {
        self.file_listing.as_ref()
    }

    pub fn label_width(&self) -> usize {
        visible_width(self.kind.label())
    }

    /// Split an assigned rectangle into `(label, field)`.
    pub fn split(&self, rect: Rect) -> (Rect, Rect) {
        let width = self.label_width();
        let label = Rect::new(rect.top, rect.left, rect.rows, width);
        let field = Rect::new(
            rect.top,
            rect.left + width,
            rect.rows,
            rect.cols.saturating_sub(width),
        );
        (label, field)
    }
}
