//! In-memory stand-ins for a GPU device and a 2D renderer

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use imgui_bridge::foundation::math::{Rect, Vec2, Vec4};
use imgui_bridge::render::{
    GpuDevice, GpuError, GpuTexture, OutputViewId, Renderer2D, TextureDescription, TextureId,
    Viewport,
};

/// GPU device keeping texture memory on the heap
///
/// Uploads become resident at the next [`MemoryGpuDevice::flush`], one tick
/// after they were queued, like a real GPU timeline.
#[derive(Default)]
pub struct MemoryGpuDevice {
    next_id: u64,
    pending: Rc<RefCell<Vec<Rc<Cell<bool>>>>>,
    resident_bytes: Rc<Cell<usize>>,
}

impl MemoryGpuDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Complete every queued upload
    pub fn flush(&mut self) {
        let mut pending = self.pending.borrow_mut();
        if !pending.is_empty() {
            log::debug!("GPU flush: {} uploads now resident", pending.len());
        }
        for resident in pending.drain(..) {
            resident.set(true);
        }
    }

    /// Bytes held by live textures
    pub fn resident_bytes(&self) -> usize {
        self.resident_bytes.get()
    }
}

impl GpuDevice for MemoryGpuDevice {
    fn create_texture(
        &mut self,
        name: &str,
        description: &TextureDescription,
    ) -> Result<Box<dyn GpuTexture>, GpuError> {
        description.validate()?;
        self.next_id += 1;
        log::debug!(
            "Creating texture '{}' {}x{} ({} mips)",
            name,
            description.width,
            description.height,
            description.mip_levels
        );
        Ok(Box::new(MemoryTexture {
            id: TextureId(self.next_id),
            description: description.clone(),
            mips: vec![Vec::new(); description.mip_levels as usize],
            resident: Rc::new(Cell::new(false)),
            pending: Rc::clone(&self.pending),
            resident_bytes: Rc::clone(&self.resident_bytes),
        }))
    }
}

struct MemoryTexture {
    id: TextureId,
    description: TextureDescription,
    mips: Vec<Vec<u8>>,
    resident: Rc<Cell<bool>>,
    pending: Rc<RefCell<Vec<Rc<Cell<bool>>>>>,
    resident_bytes: Rc<Cell<usize>>,
}

impl GpuTexture for MemoryTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn description(&self) -> &TextureDescription {
        &self.description
    }

    fn upload_mip_async(&mut self, mip_index: u32, data: &[u8]) -> Result<(), GpuError> {
        let expected = self.description.mip_size_bytes(mip_index);
        let mip = self
            .mips
            .get_mut(mip_index as usize)
            .ok_or_else(|| GpuError::UploadFailed(format!("no mip level {mip_index}")))?;
        if data.len() != expected {
            return Err(GpuError::UploadFailed(format!(
                "mip {mip_index} expects {expected} bytes, got {}",
                data.len()
            )));
        }

        self.resident_bytes.set(self.resident_bytes.get() - mip.len() + data.len());
        mip.clear();
        mip.extend_from_slice(data);
        self.pending.borrow_mut().push(Rc::clone(&self.resident));
        Ok(())
    }

    fn has_resident_mip(&self) -> bool {
        self.resident.get()
    }
}

impl Drop for MemoryTexture {
    fn drop(&mut self) {
        let bytes: usize = self.mips.iter().map(Vec::len).sum();
        self.resident_bytes.set(self.resident_bytes.get() - bytes);
        log::debug!("Released texture {:?}", self.id);
    }
}

/// Per-pass counters kept by [`LoggingRenderer`]
#[derive(Debug, Default, Clone, Copy)]
pub struct RenderCounters {
    pub passes: usize,
    pub draws: usize,
    pub triangles: usize,
    pub max_clip_depth: usize,
}

/// 2D renderer that validates and counts submissions instead of drawing
#[derive(Default)]
pub struct LoggingRenderer {
    counters: RenderCounters,
    clip_stack: Vec<Rect>,
    viewport: Option<Viewport>,
}

impl LoggingRenderer {
    pub fn counters(&self) -> RenderCounters {
        self.counters
    }
}

impl Renderer2D for LoggingRenderer {
    fn begin(&mut self, output: OutputViewId, viewport: Viewport) {
        log::trace!("begin pass on {:?} ({}x{})", output, viewport.width, viewport.height);
        self.viewport = Some(viewport);
        self.counters.passes += 1;
    }

    fn push_clip(&mut self, rect: Rect) {
        match self.viewport {
            Some(viewport) if !overlaps(&rect, &viewport) => {
                log::debug!("clip {:?} misses the {}x{} viewport", rect, viewport.width, viewport.height);
            }
            Some(_) => {}
            None => log::warn!("push_clip outside a pass"),
        }
        self.clip_stack.push(rect);
        self.counters.max_clip_depth = self.counters.max_clip_depth.max(self.clip_stack.len());
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip on an empty clip stack");
        }
    }

    fn draw_textured_triangles(
        &mut self,
        texture: TextureId,
        indices: &[u16],
        positions: &[Vec2],
        _uvs: &[Vec2],
        _colors: &[Vec4],
    ) {
        if let Some(&bad) = indices.iter().find(|&&index| usize::from(index) >= positions.len()) {
            log::warn!("index {} out of {} vertices for {:?}", bad, positions.len(), texture);
        }
        self.counters.draws += 1;
        self.counters.triangles += indices.len() / 3;
    }

    fn end(&mut self) {
        if !self.clip_stack.is_empty() {
            log::warn!("pass ended with {} clip rects still pushed", self.clip_stack.len());
            self.clip_stack.clear();
        }
        self.viewport = None;
    }
}

fn overlaps(rect: &Rect, viewport: &Viewport) -> bool {
    let max = rect.max();
    rect.x < viewport.x + viewport.width
        && rect.y < viewport.y + viewport.height
        && max.x > viewport.x
        && max.y > viewport.y
}
