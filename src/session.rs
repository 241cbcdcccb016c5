use kurbo::Vec2;

use crate::{
    assets::{FrameAsset, PhotoFile},
    command::EditorCommand,
    compositor::{RenderOptions, render},
    editor::EditorState,
    error::LunetteResult,
    export,
    surface::OutputSurface,
};

/// One editing session: editor state, the frame overlay, and the output
/// surface, kept in sync by re-rendering after every applied command.
///
/// Single-threaded by design: each command completes (state mutation plus
/// full re-render) before the next is accepted, so renders happen in command
/// order and none are skipped.
pub struct EditorSession {
    state: EditorState,
    frame: FrameAsset,
    surface: OutputSurface,
    options: RenderOptions,
}

impl EditorSession {
    /// Start a session around a loaded frame overlay. Renders the idle,
    /// background-only state immediately.
    pub fn new(frame: FrameAsset, options: RenderOptions) -> LunetteResult<Self> {
        let mut session = Self {
            state: EditorState::new(frame.geometry),
            frame,
            surface: OutputSurface::new(),
            options,
        };
        session.render()?;
        Ok(session)
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn surface(&self) -> &OutputSurface {
        &self.surface
    }

    /// Load a photo from an in-memory file and re-render. On error the
    /// surface keeps its previous content.
    pub fn load_photo(&mut self, file: &PhotoFile) -> LunetteResult<()> {
        self.state.load_photo(file)?;
        self.render()
    }

    /// Apply one editor command, then re-render.
    pub fn apply(&mut self, command: &EditorCommand) -> LunetteResult<()> {
        tracing::debug!(?command, "apply editor command");
        match command {
            EditorCommand::LoadPhoto { path } => {
                let file = PhotoFile::from_path(path)?;
                self.state.load_photo(&file)?;
            }
            EditorCommand::BeginDrag { x, y } => self.state.begin_drag(Vec2::new(*x, *y)),
            EditorCommand::UpdateDrag {
                x,
                y,
                display_scale,
            } => self.state.update_drag(Vec2::new(*x, *y), *display_scale),
            EditorCommand::EndDrag => self.state.end_drag(),
            EditorCommand::SetZoom { percent } => self.state.set_zoom(*percent),
            EditorCommand::Reset => self.state.reset(),
        }
        self.render()
    }

    /// PNG-encode the current surface content.
    pub fn export_png(&self) -> LunetteResult<Vec<u8>> {
        export::encode_png(&self.surface)
    }

    fn render(&mut self) -> LunetteResult<()> {
        render(&self.state, Some(&self.frame), &mut self.surface, &self.options)
    }
}
