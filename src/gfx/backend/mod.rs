//! # Rasterization Backend Abstraction
//!
//! The pipeline drives the rasterization backend through a small explicit
//! command set (bind target, bind texture to unit, set uniform, draw) so the
//! pass logic stays backend-agnostic and can be tested by recording issued
//! commands instead of talking to a real GPU.
//!
//! The only failure contract: program builds either succeed with a handle or
//! fail with a [`BackendError`] the pipeline logs and treats as "no program
//! bound".

pub mod recording;
pub mod software;

use thiserror::Error;

pub use recording::RecordingBackend;
pub use software::SoftwareBackend;

/// Handle to a vertex or index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Handle to a sampleable texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Handle to an offscreen render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// Handle to a built program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// The built-in program families a backend must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Ambient + Lambertian diffuse + Blinn half-vector specular.
    BlinnPhong,
    /// Posterized 4-band intensity shading.
    CelShading,
    /// Linearized depth + world normal into an offscreen target.
    DepthNormal,
    /// Fullscreen paper-grain wash.
    PaperWash,
    /// Sobel edge detection over the depth+normal image combined with the
    /// pencil-stroke lookup.
    PencilComposite,
}

/// Request to build one program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramDesc {
    pub label: &'static str,
    pub kind: ShaderKind,
}

/// A uniform value set on a program before a draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat4([[f32; 4]; 4]),
}

/// Channel layout of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    R8,
    Rg8,
    Rgba8,
}

impl TextureFormat {
    pub fn channels(&self) -> usize {
        match self {
            TextureFormat::R8 => 1,
            TextureFormat::Rg8 => 2,
            TextureFormat::Rgba8 => 4,
        }
    }
}

/// Dimensions and layout of an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDesc {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// An offscreen target together with the texture that samples its color
/// attachment.
#[derive(Debug, Clone, Copy)]
pub struct OffscreenTarget {
    pub target: TargetId,
    pub color: TextureId,
}

/// Buffer handles for one uploaded mesh.
#[derive(Debug, Clone, Copy)]
pub struct MeshHandle {
    pub positions: BufferId,
    pub normals: BufferId,
    pub uvs: Option<BufferId>,
    pub indices: BufferId,
    pub index_count: u32,
}

/// Program build rejection reported by the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("shader compile rejected for `{label}`: {message}")]
    Compile { label: String, message: String },
    #[error("program link rejected for `{label}`: {message}")]
    Link { label: String, message: String },
}

/// The command set the frame-composition pipeline issues.
///
/// Implementations: [`SoftwareBackend`] (CPU reference rasterizer) and
/// [`RecordingBackend`] (test double).
pub trait RasterBackend {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferId;

    fn create_index_buffer(&mut self, data: &[u32]) -> BufferId;

    fn create_texture(&mut self, desc: TextureDesc, texels: &[u8]) -> TextureId;

    fn create_offscreen_target(&mut self, width: u32, height: u32) -> OffscreenTarget;

    /// Builds a program; on rejection the caller logs and continues with no
    /// program bound for that style.
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId, BackendError>;

    /// Binds an offscreen target, or the visible target for `None`.
    fn bind_target(&mut self, target: Option<TargetId>);

    /// Clears the bound target; `color: None` keeps the color layer.
    fn clear(&mut self, color: Option<[f32; 4]>, depth: bool);

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue);

    fn bind_texture(&mut self, unit: u32, texture: TextureId);

    fn draw_mesh(&mut self, program: ProgramId, mesh: &MeshHandle);

    fn draw_fullscreen_quad(&mut self, program: ProgramId);
}
