use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// How [`TextCmd::position`] relates to the laid-out line box.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAlign {
    /// `position` is the top-left corner of the line box.
    #[default]
    TopLeft,
    /// `position` is the middle of the line box, horizontally and vertically.
    Center,
}

/// Text draw payload. Single line; no wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Anchor in logical pixels, interpreted per `align`.
    pub position: Vec2,
    pub align: TextAlign,
}

impl DrawList {
    /// Records a text draw command.
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        position: Vec2,
        align: TextAlign,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            position,
            align,
        }));
    }
}
