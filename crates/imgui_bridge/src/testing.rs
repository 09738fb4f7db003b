//! Recording fakes for the host and UI library seams

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::render::{
    DrawData, GpuDevice, GpuError, GpuTexture, OutputViewId, Renderer2D, TextureDescription,
    TextureId, Viewport,
};
use crate::ui::{FontAtlasPixels, InputEvent, UiBackend};

/// One call made on a [`RecordingBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    SetKeyboardNavigation(bool),
    SetIniFilename(Option<String>),
    FontAtlas,
    SetFontTexture(TextureId),
    SetDeltaTime(f32),
    SetDisplaySize(Vec2),
    Event(InputEvent),
    NewFrame,
    EndFrame,
    Render,
    TakeDrawData,
}

/// [`UiBackend`] that logs every call; clones share the log
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Rc<RefCell<Vec<BackendCall>>>,
    frame_output: Rc<RefCell<Option<DrawData>>>,
    rendered: Rc<RefCell<Option<DrawData>>>,
    atlas: (u32, u32, Vec<u8>),
}

impl RecordingBackend {
    /// Backend with a valid 64x8 atlas and empty frames
    pub fn new() -> Self {
        Self {
            calls: Rc::default(),
            frame_output: Rc::default(),
            rendered: Rc::default(),
            atlas: (64, 8, vec![0xFF; 64 * 8 * 4]),
        }
    }

    /// Replace the atlas pixels
    pub fn with_atlas(mut self, width: u32, height: u32, data: Vec<u8>) -> Self {
        self.atlas = (width, height, data);
        self
    }

    /// Draw data produced by every later `render`
    pub fn set_frame_output(&self, draw_data: DrawData) {
        *self.frame_output.borrow_mut() = Some(draw_data);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    /// Input events only, in push order
    pub fn events(&self) -> Vec<InputEvent> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                BackendCall::Event(event) => Some(*event),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &BackendCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: BackendCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl UiBackend for RecordingBackend {
    fn set_keyboard_navigation(&mut self, enabled: bool) {
        self.record(BackendCall::SetKeyboardNavigation(enabled));
    }

    fn set_ini_filename(&mut self, filename: Option<&str>) {
        self.record(BackendCall::SetIniFilename(filename.map(str::to_string)));
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasPixels<'_> {
        self.record(BackendCall::FontAtlas);
        FontAtlasPixels {
            width: self.atlas.0,
            height: self.atlas.1,
            data: &self.atlas.2,
        }
    }

    fn set_font_texture(&mut self, texture: TextureId) {
        self.record(BackendCall::SetFontTexture(texture));
    }

    fn set_delta_time(&mut self, seconds: f32) {
        self.record(BackendCall::SetDeltaTime(seconds));
    }

    fn set_display_size(&mut self, size: Vec2) {
        self.record(BackendCall::SetDisplaySize(size));
    }

    fn push_event(&mut self, event: InputEvent) {
        self.record(BackendCall::Event(event));
    }

    fn new_frame(&mut self) {
        self.record(BackendCall::NewFrame);
    }

    fn end_frame(&mut self) {
        self.record(BackendCall::EndFrame);
    }

    fn render(&mut self) {
        self.record(BackendCall::Render);
        *self.rendered.borrow_mut() = self.frame_output.borrow().clone();
    }

    fn take_draw_data(&mut self) -> Option<DrawData> {
        self.record(BackendCall::TakeDrawData);
        self.rendered.borrow_mut().take()
    }
}

/// One call made on a [`RecordingRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
    Begin { output: OutputViewId, viewport: Viewport },
    PushClip(Rect),
    PopClip,
    Draw { texture: TextureId, indices: Vec<u16>, vertex_count: usize },
    End,
}

#[derive(Debug, Default)]
struct RendererLog {
    calls: Vec<RendererCall>,
    last_colors: Vec<Vec4>,
}

/// [`Renderer2D`] that logs every call; clones share the log
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: Rc<RefCell<RendererLog>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RendererCall> {
        self.log.borrow().calls.clone()
    }

    /// Clip pushes, pops and draws
    pub fn submission_count(&self) -> usize {
        self.log
            .borrow()
            .calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    RendererCall::PushClip(_) | RendererCall::PopClip | RendererCall::Draw { .. }
                )
            })
            .count()
    }

    pub fn draw_count(&self) -> usize {
        self.log
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, RendererCall::Draw { .. }))
            .count()
    }

    /// Colors passed to the most recent draw
    pub fn last_colors(&self) -> Vec<Vec4> {
        self.log.borrow().last_colors.clone()
    }
}

impl Renderer2D for RecordingRenderer {
    fn begin(&mut self, output: OutputViewId, viewport: Viewport) {
        self.log.borrow_mut().calls.push(RendererCall::Begin { output, viewport });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.log.borrow_mut().calls.push(RendererCall::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.log.borrow_mut().calls.push(RendererCall::PopClip);
    }

    fn draw_textured_triangles(
        &mut self,
        texture: TextureId,
        indices: &[u16],
        positions: &[Vec2],
        uvs: &[Vec2],
        colors: &[Vec4],
    ) {
        assert_eq!(positions.len(), uvs.len());
        assert_eq!(positions.len(), colors.len());
        let mut log = self.log.borrow_mut();
        log.calls.push(RendererCall::Draw {
            texture,
            indices: indices.to_vec(),
            vertex_count: positions.len(),
        });
        log.last_colors = colors.to_vec();
    }

    fn end(&mut self) {
        self.log.borrow_mut().calls.push(RendererCall::End);
    }
}

#[derive(Debug, Default)]
struct GpuState {
    next_id: u64,
    created: Vec<(String, TextureDescription)>,
    uploads: Vec<(TextureId, u32, usize)>,
    queued: Vec<Rc<Cell<bool>>>,
    released: Vec<TextureId>,
    fail_creation: bool,
    fail_uploads: bool,
}

/// [`GpuDevice`] whose uploads complete only when the test says so
#[derive(Debug, Clone, Default)]
pub struct FakeGpuDevice {
    state: Rc<RefCell<GpuState>>,
}

impl FakeGpuDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_creation(self) -> Self {
        self.state.borrow_mut().fail_creation = true;
        self
    }

    pub fn failing_uploads(self) -> Self {
        self.state.borrow_mut().fail_uploads = true;
        self
    }

    /// Make every queued upload resident
    pub fn complete_uploads(&self) {
        for resident in self.state.borrow_mut().queued.drain(..) {
            resident.set(true);
        }
    }

    pub fn created(&self) -> Vec<(String, TextureDescription)> {
        self.state.borrow().created.clone()
    }

    /// (texture, mip, byte length) per queued upload
    pub fn uploads(&self) -> Vec<(TextureId, u32, usize)> {
        self.state.borrow().uploads.clone()
    }

    /// Textures created and not yet dropped
    pub fn live_textures(&self) -> usize {
        let state = self.state.borrow();
        state.created.len() - state.released.len()
    }
}

impl GpuDevice for FakeGpuDevice {
    fn create_texture(
        &mut self,
        name: &str,
        description: &TextureDescription,
    ) -> Result<Box<dyn GpuTexture>, GpuError> {
        let mut state = self.state.borrow_mut();
        if state.fail_creation {
            return Err(GpuError::CreationFailed(format!("'{name}' rejected by fake device")));
        }
        state.next_id += 1;
        state.created.push((name.to_string(), description.clone()));
        Ok(Box::new(FakeTexture {
            id: TextureId(state.next_id),
            description: description.clone(),
            resident: Rc::new(Cell::new(false)),
            device: Rc::clone(&self.state),
        }))
    }
}

struct FakeTexture {
    id: TextureId,
    description: TextureDescription,
    resident: Rc<Cell<bool>>,
    device: Rc<RefCell<GpuState>>,
}

impl GpuTexture for FakeTexture {
    fn id(&self) -> TextureId {
        self.id
    }

    fn description(&self) -> &TextureDescription {
        &self.description
    }

    fn upload_mip_async(&mut self, mip_index: u32, data: &[u8]) -> Result<(), GpuError> {
        let mut state = self.device.borrow_mut();
        if state.fail_uploads {
            return Err(GpuError::UploadFailed("fake device drops uploads".to_string()));
        }
        state.uploads.push((self.id, mip_index, data.len()));
        state.queued.push(Rc::clone(&self.resident));
        Ok(())
    }

    fn has_resident_mip(&self) -> bool {
        self.resident.get()
    }
}

impl Drop for FakeTexture {
    fn drop(&mut self) {
        self.device.borrow_mut().released.push(self.id);
    }
}
