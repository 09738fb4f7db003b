//! Draw list to 2D renderer translation
//!
//! Turns one frame of UI draw data into renderer submissions. Each list's
//! vertex buffer is converted once into parallel position / UV / color
//! sequences; each command then becomes a clip push, a draw of its index
//! sub-range and a clip pop, strictly in emission order. Nothing is batched
//! across commands since clipping and z-order depend on that order.

use super::draw_data::{DrawCommand, DrawData, DrawList};
use super::{RenderContext, Renderer2D};
use crate::foundation::math::{Rect, Vec2, Vec4};

/// Unpack a color from ImGui's `IM_COL32` layout into normalized RGBA
pub fn unpack_color(packed: u32) -> Vec4 {
    let channel = |shift: u32| f32::from(((packed >> shift) & 0xFF) as u8) / 255.0;
    Vec4::new(channel(0), channel(8), channel(16), channel(24))
}

/// Counters for one translated frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateStats {
    /// Draw lists walked
    pub lists: usize,
    /// Triangle submissions issued
    pub draws: usize,
    /// Commands skipped (degenerate clip, empty or out-of-range)
    pub skipped: usize,
    /// User callbacks invoked
    pub callbacks: usize,
}

/// Converts draw data into [`Renderer2D`] calls
///
/// Keeps its attribute buffers between frames so steady-state translation
/// does not allocate.
#[derive(Debug, Default)]
pub struct DrawTranslator {
    positions: Vec<Vec2>,
    uvs: Vec<Vec2>,
    colors: Vec<Vec4>,
}

impl DrawTranslator {
    /// Create a translator with empty scratch buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit `draw_data` to `renderer`
    ///
    /// Empty draw data issues no renderer calls at all, including
    /// `begin`/`end`.
    pub fn translate(
        &mut self,
        draw_data: &DrawData,
        renderer: &mut dyn Renderer2D,
        render_context: &RenderContext,
    ) -> TranslateStats {
        let mut stats = TranslateStats::default();
        if draw_data.is_empty() {
            return stats;
        }

        renderer.begin(render_context.output, render_context.viewport);
        for list in &draw_data.lists {
            self.load_vertices(list);
            self.translate_list(list, draw_data.display_pos, renderer, &mut stats);
            stats.lists += 1;
        }
        renderer.end();

        log::trace!(
            "Translated {} draw lists: {} draws, {} skipped, {} callbacks",
            stats.lists,
            stats.draws,
            stats.skipped,
            stats.callbacks
        );
        stats
    }

    fn load_vertices(&mut self, list: &DrawList) {
        self.positions.clear();
        self.uvs.clear();
        self.colors.clear();

        for vertex in &list.vertices {
            self.positions.push(Vec2::new(vertex.pos[0], vertex.pos[1]));
            self.uvs.push(Vec2::new(vertex.uv[0], vertex.uv[1]));
            self.colors.push(unpack_color(vertex.col));
        }
    }

    fn translate_list(
        &self,
        list: &DrawList,
        display_pos: Vec2,
        renderer: &mut dyn Renderer2D,
        stats: &mut TranslateStats,
    ) {
        for command in &list.commands {
            match command {
                DrawCommand::Callback { callback, .. } => {
                    callback.invoke(list, command);
                    stats.callbacks += 1;
                }
                DrawCommand::ResetRenderState => {}
                DrawCommand::Elements {
                    count,
                    idx_offset,
                    clip_rect,
                    texture_id,
                } => {
                    let local = clip_rect.relative_to(display_pos);
                    let clip = Rect::from_corners(local.min, local.max);
                    if clip.is_empty() || *count == 0 {
                        stats.skipped += 1;
                        continue;
                    }

                    let Some(indices) = list.indices.get(*idx_offset..idx_offset + count) else {
                        log::warn!(
                            "Skipping draw command with index range {}..{} outside buffer of {}",
                            idx_offset,
                            idx_offset + count,
                            list.indices.len()
                        );
                        stats.skipped += 1;
                        continue;
                    };

                    renderer.push_clip(clip);
                    renderer.draw_textured_triangles(
                        *texture_id,
                        indices,
                        &self.positions,
                        &self.uvs,
                        &self.colors,
                    );
                    renderer.pop_clip();
                    stats.draws += 1;
                }
            }
        }
    }
}
