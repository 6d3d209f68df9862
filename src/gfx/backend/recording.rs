//! # Recording Backend
//!
//! Test double implementing the backend command set by recording every call.
//! Orchestration tests assert on the recorded command stream; the program
//! builder can be told to reject builds to exercise the failure path.

use super::{
    BackendError, BufferId, MeshHandle, OffscreenTarget, ProgramDesc, ProgramId, RasterBackend,
    ShaderKind, TargetId, TextureDesc, TextureId, UniformValue,
};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateVertexBuffer { id: BufferId, len: usize },
    CreateIndexBuffer { id: BufferId, len: usize },
    CreateTexture { id: TextureId, desc: TextureDesc },
    CreateOffscreenTarget { target: TargetId, width: u32, height: u32 },
    CreateProgram { id: ProgramId, kind: ShaderKind },
    BindTarget { target: Option<TargetId> },
    Clear { color: Option<[f32; 4]>, depth: bool },
    SetUniform { program: ProgramId, name: String, value: UniformValue },
    BindTexture { unit: u32, texture: TextureId },
    DrawMesh { program: ProgramId, index_count: u32 },
    DrawFullscreenQuad { program: ProgramId },
}

/// Backend double that records issued commands instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<Command>,
    reject_programs: bool,
    next_id: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_program` fail, as a backend that
    /// rejects compilation or linking would.
    pub fn reject_program_builds(&mut self, reject: bool) {
        self.reject_programs = reject;
    }

    /// Drains the recorded commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded draw calls only (mesh and fullscreen-quad draws).
    pub fn draw_commands(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawMesh { .. } | Command::DrawFullscreenQuad { .. }))
            .collect()
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RasterBackend for RecordingBackend {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferId {
        let id = BufferId(self.fresh_id());
        self.commands.push(Command::CreateVertexBuffer {
            id,
            len: data.len(),
        });
        id
    }

    fn create_index_buffer(&mut self, data: &[u32]) -> BufferId {
        let id = BufferId(self.fresh_id());
        self.commands.push(Command::CreateIndexBuffer {
            id,
            len: data.len(),
        });
        id
    }

    fn create_texture(&mut self, desc: TextureDesc, _texels: &[u8]) -> TextureId {
        let id = TextureId(self.fresh_id());
        self.commands.push(Command::CreateTexture { id, desc });
        id
    }

    fn create_offscreen_target(&mut self, width: u32, height: u32) -> OffscreenTarget {
        let target = TargetId(self.fresh_id());
        let color = TextureId(self.fresh_id());
        self.commands.push(Command::CreateOffscreenTarget {
            target,
            width,
            height,
        });
        OffscreenTarget { target, color }
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId, BackendError> {
        if self.reject_programs {
            return Err(BackendError::Compile {
                label: desc.label.to_string(),
                message: "rejected by test backend".to_string(),
            });
        }
        let id = ProgramId(self.fresh_id());
        self.commands.push(Command::CreateProgram {
            id,
            kind: desc.kind,
        });
        Ok(id)
    }

    fn bind_target(&mut self, target: Option<TargetId>) {
        self.commands.push(Command::BindTarget { target });
    }

    fn clear(&mut self, color: Option<[f32; 4]>, depth: bool) {
        self.commands.push(Command::Clear { color, depth });
    }

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue) {
        self.commands.push(Command::SetUniform {
            program,
            name: name.to_string(),
            value,
        });
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.commands.push(Command::BindTexture { unit, texture });
    }

    fn draw_mesh(&mut self, program: ProgramId, mesh: &MeshHandle) {
        self.commands.push(Command::DrawMesh {
            program,
            index_count: mesh.index_count,
        });
    }

    fn draw_fullscreen_quad(&mut self, program: ProgramId) {
        self.commands.push(Command::DrawFullscreenQuad { program });
    }
}
