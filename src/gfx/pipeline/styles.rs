//! # Shading Styles
//!
//! One configuration object per shading style behind the [`StyleConfig`]
//! trait: it knows which programs to build and which passes to issue per
//! frame. The selector swaps the active object; everything style-independent
//! (offscreen target, noise textures) lives in [`SharedResources`].

use crate::gfx::backend::{
    MeshHandle, OffscreenTarget, ProgramDesc, ProgramId, RasterBackend, ShaderKind, TextureId,
    UniformValue,
};
use crate::gfx::scene::Material;

/// Uniform names shared between the styles and backend implementations.
pub mod uniform {
    pub const MODEL: &str = "u_model";
    pub const VIEW_PROJ: &str = "u_view_proj";
    pub const EYE_POSITION: &str = "u_eye_position";
    pub const AMBIENT: &str = "u_ambient";
    pub const DIFFUSE: &str = "u_diffuse";
    pub const SPECULAR: &str = "u_specular";
    pub const SHININESS: &str = "u_shininess";
    pub const USING_TEXTURE: &str = "u_using_texture";
    pub const PAPER_SHIFT: &str = "u_paper_shift";
    pub const JITTER: &str = "u_jitter";
}

/// Texture unit assignments per pass.
pub mod unit {
    /// Surface texture for the lit styles.
    pub const SURFACE: u32 = 0;
    /// Paper-grain field in the paper pass.
    pub const PAPER: u32 = 0;
    /// Depth+normal intermediate in the compositing pass.
    pub const INTERMEDIATE: u32 = 0;
    /// Pencil-stroke sheet in the compositing pass.
    pub const STROKE: u32 = 1;
    /// 2-channel drawing-offset field in the compositing pass.
    pub const JITTER: u32 = 2;
}

/// The selectable shading styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingStyle {
    BlinnPhong,
    CelShading,
    PencilSketch,
}

/// Style-independent resources created once at pipeline construction.
pub struct SharedResources {
    /// Offscreen 512x512 target for the geometry pass.
    pub intermediate: OffscreenTarget,
    pub paper_texture: TextureId,
    pub jitter_texture: TextureId,
    pub stroke_texture: TextureId,
}

/// Everything a style needs to compose one frame.
pub struct FrameContext<'a> {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub mesh: &'a MeshHandle,
    pub material: &'a Material,
    /// Per-period jitter scalars, both in `[0,1)`.
    pub jitter: [f32; 2],
}

/// A shading style's pipeline configuration.
pub trait StyleConfig {
    fn style(&self) -> ShadingStyle;

    /// (Re)builds the style's programs. Build rejections are logged and
    /// leave the style inert; the frame loop continues.
    fn bind_programs(&mut self, backend: &mut dyn RasterBackend);

    /// Issues this style's passes for one frame. Returns false when the
    /// style is inert (a program failed to build).
    fn render_frame(
        &mut self,
        backend: &mut dyn RasterBackend,
        shared: &SharedResources,
        frame: &FrameContext<'_>,
    ) -> bool;
}

fn build_program(backend: &mut dyn RasterBackend, desc: ProgramDesc) -> Option<ProgramId> {
    match backend.create_program(&desc) {
        Ok(id) => Some(id),
        Err(err) => {
            log::error!("program build failed, style left inert: {}", err);
            None
        }
    }
}

fn set_material_uniforms(
    backend: &mut dyn RasterBackend,
    program: ProgramId,
    material: &Material,
) {
    backend.set_uniform(program, uniform::AMBIENT, UniformValue::Vec3(material.ambient));
    backend.set_uniform(program, uniform::DIFFUSE, UniformValue::Vec3(material.diffuse));
    backend.set_uniform(
        program,
        uniform::SPECULAR,
        UniformValue::Vec3(material.specular),
    );
    backend.set_uniform(
        program,
        uniform::SHININESS,
        UniformValue::Float(material.shininess),
    );
    backend.set_uniform(
        program,
        uniform::USING_TEXTURE,
        UniformValue::Int(material.texture.is_some() as i32),
    );
}

/// Single-pass per-fragment lighting with the Blinn half-vector highlight.
#[derive(Default)]
pub struct BlinnPhongStyle {
    program: Option<ProgramId>,
}

impl StyleConfig for BlinnPhongStyle {
    fn style(&self) -> ShadingStyle {
        ShadingStyle::BlinnPhong
    }

    fn bind_programs(&mut self, backend: &mut dyn RasterBackend) {
        self.program = build_program(
            backend,
            ProgramDesc {
                label: "blinn-phong",
                kind: ShaderKind::BlinnPhong,
            },
        );
    }

    fn render_frame(
        &mut self,
        backend: &mut dyn RasterBackend,
        _shared: &SharedResources,
        frame: &FrameContext<'_>,
    ) -> bool {
        let Some(program) = self.program else {
            return false;
        };
        backend.bind_target(None);
        backend.clear(Some([0.0, 0.0, 0.0, 1.0]), true);
        backend.set_uniform(program, uniform::MODEL, UniformValue::Mat4(frame.model));
        backend.set_uniform(
            program,
            uniform::VIEW_PROJ,
            UniformValue::Mat4(frame.view_proj),
        );
        backend.set_uniform(
            program,
            uniform::EYE_POSITION,
            UniformValue::Vec3(frame.eye),
        );
        set_material_uniforms(backend, program, frame.material);
        if let Some(texture) = frame.material.texture {
            backend.bind_texture(unit::SURFACE, texture);
        }
        backend.draw_mesh(program, frame.mesh);
        true
    }
}

/// Single-pass posterized shading: Lambert intensity quantized into four
/// fixed bands.
#[derive(Default)]
pub struct CelShadingStyle {
    program: Option<ProgramId>,
}

impl StyleConfig for CelShadingStyle {
    fn style(&self) -> ShadingStyle {
        ShadingStyle::CelShading
    }

    fn bind_programs(&mut self, backend: &mut dyn RasterBackend) {
        self.program = build_program(
            backend,
            ProgramDesc {
                label: "cel-shading",
                kind: ShaderKind::CelShading,
            },
        );
    }

    fn render_frame(
        &mut self,
        backend: &mut dyn RasterBackend,
        _shared: &SharedResources,
        frame: &FrameContext<'_>,
    ) -> bool {
        let Some(program) = self.program else {
            return false;
        };
        backend.bind_target(None);
        backend.clear(Some([0.0, 0.0, 0.0, 1.0]), true);
        backend.set_uniform(program, uniform::MODEL, UniformValue::Mat4(frame.model));
        backend.set_uniform(
            program,
            uniform::VIEW_PROJ,
            UniformValue::Mat4(frame.view_proj),
        );
        backend.set_uniform(program, uniform::DIFFUSE, UniformValue::Vec3(frame.material.diffuse));
        backend.draw_mesh(program, frame.mesh);
        true
    }
}

/// Three-pass hand-drawn look: geometry pass to the depth+normal
/// intermediate, paper wash, then Sobel-edge pencil compositing.
#[derive(Default)]
pub struct PencilSketchStyle {
    geometry: Option<ProgramId>,
    paper: Option<ProgramId>,
    composite: Option<ProgramId>,
}

impl StyleConfig for PencilSketchStyle {
    fn style(&self) -> ShadingStyle {
        ShadingStyle::PencilSketch
    }

    fn bind_programs(&mut self, backend: &mut dyn RasterBackend) {
        self.geometry = build_program(
            backend,
            ProgramDesc {
                label: "pencil-geometry",
                kind: ShaderKind::DepthNormal,
            },
        );
        self.paper = build_program(
            backend,
            ProgramDesc {
                label: "pencil-paper",
                kind: ShaderKind::PaperWash,
            },
        );
        self.composite = build_program(
            backend,
            ProgramDesc {
                label: "pencil-composite",
                kind: ShaderKind::PencilComposite,
            },
        );
    }

    fn render_frame(
        &mut self,
        backend: &mut dyn RasterBackend,
        shared: &SharedResources,
        frame: &FrameContext<'_>,
    ) -> bool {
        let (Some(geometry), Some(paper), Some(composite)) =
            (self.geometry, self.paper, self.composite)
        else {
            return false;
        };

        // Geometry pass: linearized depth + world normal into the
        // intermediate. Cleared to far depth / zero normal.
        backend.bind_target(Some(shared.intermediate.target));
        backend.clear(Some([1.0, 0.0, 0.0, 0.0]), true);
        backend.set_uniform(geometry, uniform::MODEL, UniformValue::Mat4(frame.model));
        backend.set_uniform(
            geometry,
            uniform::VIEW_PROJ,
            UniformValue::Mat4(frame.view_proj),
        );
        backend.draw_mesh(geometry, frame.mesh);

        // Paper pass: background wash on the visible target, grain shifted
        // by the per-period scalars.
        backend.bind_target(None);
        backend.clear(Some([1.0, 1.0, 1.0, 1.0]), true);
        backend.bind_texture(unit::PAPER, shared.paper_texture);
        backend.set_uniform(
            paper,
            uniform::PAPER_SHIFT,
            UniformValue::Vec2(frame.jitter),
        );
        backend.draw_fullscreen_quad(paper);

        // Compositing pass: depth-clear only, paper wash stays underneath.
        backend.clear(None, true);
        backend.bind_texture(unit::INTERMEDIATE, shared.intermediate.color);
        backend.bind_texture(unit::STROKE, shared.stroke_texture);
        backend.bind_texture(unit::JITTER, shared.jitter_texture);
        backend.set_uniform(composite, uniform::MODEL, UniformValue::Mat4(frame.model));
        backend.set_uniform(
            composite,
            uniform::VIEW_PROJ,
            UniformValue::Mat4(frame.view_proj),
        );
        backend.set_uniform(
            composite,
            uniform::JITTER,
            UniformValue::Float(frame.jitter[0]),
        );
        backend.draw_mesh(composite, frame.mesh);
        true
    }
}

/// Builds the configuration object for a style.
pub fn config_for(style: ShadingStyle) -> Box<dyn StyleConfig> {
    match style {
        ShadingStyle::BlinnPhong => Box::<BlinnPhongStyle>::default(),
        ShadingStyle::CelShading => Box::<CelShadingStyle>::default(),
        ShadingStyle::PencilSketch => Box::<PencilSketchStyle>::default(),
    }
}
