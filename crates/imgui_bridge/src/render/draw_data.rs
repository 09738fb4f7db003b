//! Backend-agnostic UI draw data
//!
//! A frame's output as produced by the UI library: one or more draw lists,
//! each with its own vertex and index buffers and an ordered command stream.
//! Draw data lives for a single tick and is consumed once by the translator.

use std::fmt;
use std::rc::Rc;

use crate::foundation::math::Vec2;
use crate::render::TextureId;

/// UI vertex as emitted by the library
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawVert {
    /// Position in display coordinates
    pub pos: [f32; 2],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Packed RGBA color: R in bits 0-7, G 8-15, B 16-23, A 24-31
    pub col: u32,
}

/// Clip rectangle in display coordinates, stored as two corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl ClipRect {
    /// Create from the library's `[x1, y1, x2, y2]` layout
    pub fn from_array(rect: [f32; 4]) -> Self {
        Self {
            min: Vec2::new(rect[0], rect[1]),
            max: Vec2::new(rect[2], rect[3]),
        }
    }

    /// Shift both corners by `-origin`
    pub fn relative_to(&self, origin: Vec2) -> Self {
        Self {
            min: self.min - origin,
            max: self.max - origin,
        }
    }
}

/// Custom rendering hook carried by a draw command
///
/// Invoked in place of normal translation with the owning list and the
/// [`DrawCommand::Callback`] that carries it.
#[derive(Clone)]
pub struct DrawCallback(Rc<dyn Fn(&DrawList, &DrawCommand)>);

impl DrawCallback {
    /// Wrap a closure
    pub fn new(callback: impl Fn(&DrawList, &DrawCommand) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Run the callback for `command`
    pub fn invoke(&self, list: &DrawList, command: &DrawCommand) {
        (self.0)(list, command);
    }
}

impl fmt::Debug for DrawCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawCallback(..)")
    }
}

/// One entry of a draw list's command stream
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Draw `count` indices starting at `idx_offset`
    Elements {
        /// Number of indices
        count: usize,
        /// First index in the list's index buffer
        idx_offset: usize,
        /// Clip rectangle in display coordinates
        clip_rect: ClipRect,
        /// Texture sampled by the triangles
        texture_id: TextureId,
    },
    /// Restore default render state; nothing to do for an immediate 2D renderer
    ResetRenderState,
    /// User-provided rendering in place of a normal draw
    Callback {
        /// Hook to invoke
        callback: DrawCallback,
        /// Clip rectangle active for the hook
        clip_rect: ClipRect,
    },
}

/// Vertex/index buffers plus the commands drawing from them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Vertex buffer
    pub vertices: Vec<DrawVert>,
    /// Index buffer (triangle list)
    pub indices: Vec<u16>,
    /// Commands in emission order
    pub commands: Vec<DrawCommand>,
}

/// All draw lists of one rendered frame
#[derive(Debug, Clone)]
pub struct DrawData {
    /// Top-left of the display area in display coordinates
    pub display_pos: Vec2,
    /// Size of the display area
    pub display_size: Vec2,
    /// Draw lists back to front
    pub lists: Vec<DrawList>,
}

impl DrawData {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Total vertices across lists
    pub fn total_vertex_count(&self) -> usize {
        self.lists.iter().map(|list| list.vertices.len()).sum()
    }

    /// Total indices across lists
    pub fn total_index_count(&self) -> usize {
        self.lists.iter().map(|list| list.indices.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clip_rect_relative_to_origin() {
        let clip = ClipRect::from_array([110.0, 60.0, 310.0, 160.0]);
        let local = clip.relative_to(Vec2::new(100.0, 50.0));
        assert_eq!(local.min, Vec2::new(10.0, 10.0));
        assert_eq!(local.max, Vec2::new(210.0, 110.0));
    }

    #[test]
    fn test_callback_receives_list_and_command() {
        let seen = Rc::new(Cell::new((0, 0.0)));
        let seen_in_callback = Rc::clone(&seen);
        let callback = DrawCallback::new(move |list, command| {
            if let DrawCommand::Callback { clip_rect, .. } = command {
                seen_in_callback.set((list.indices.len(), clip_rect.max.x));
            }
        });
        let command = DrawCommand::Callback {
            callback: callback.clone(),
            clip_rect: ClipRect::from_array([0.0, 0.0, 64.0, 32.0]),
        };

        let list = DrawList {
            indices: vec![0, 1, 2],
            commands: vec![command.clone()],
            ..DrawList::default()
        };
        callback.invoke(&list, &command);
        assert_eq!(seen.get(), (3, 64.0));
    }

    #[test]
    fn test_totals() {
        let list = DrawList {
            vertices: vec![DrawVert { pos: [0.0; 2], uv: [0.0; 2], col: 0 }; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
            commands: Vec::new(),
        };
        let data = DrawData {
            display_pos: Vec2::zeros(),
            display_size: Vec2::new(800.0, 600.0),
            lists: vec![list.clone(), list],
        };
        assert_eq!(data.total_vertex_count(), 8);
        assert_eq!(data.total_index_count(), 12);
        assert!(!data.is_empty());

        let nothing = DrawData { lists: Vec::new(), ..data };
        assert!(nothing.is_empty());
        assert_eq!(nothing.total_vertex_count(), 0);
    }
}
