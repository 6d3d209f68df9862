//! # Software Backend
//!
//! CPU reference implementation of the backend command set: an
//! edge-function triangle rasterizer with a depth buffer and
//! perspective-correct interpolation, executing the five built-in programs
//! against the same pure shading functions the unit tests exercise. Slow but
//! dependency-free; demos render through it and write the visible target to
//! an image.

use std::collections::HashMap;

use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};

use super::{
    BackendError, BufferId, MeshHandle, OffscreenTarget, ProgramDesc, ProgramId, RasterBackend,
    ShaderKind, TargetId, TextureDesc, TextureId, UniformValue,
};
use crate::gfx::pipeline::shading::{
    self, Reflectivity, EDGE_TINT, NO_EDGE_TINT,
};
use crate::gfx::pipeline::styles::{uniform, unit};

/// Texel offset amplitude applied from the 2-channel drawing-offset field
/// when the compositing pass samples the depth+normal intermediate.
pub const JITTER_OFFSET_TEXELS: f32 = 2.0;

enum BufferData {
    Vertex(Vec<f32>),
    Index(Vec<u32>),
}

enum TextureData {
    /// Uploaded image, channels normalized to `[0,1]`.
    Image {
        width: usize,
        height: usize,
        channels: usize,
        data: Vec<f32>,
    },
    /// Live view of an offscreen target's color attachment.
    TargetColor(TargetId),
}

struct RenderTarget {
    width: usize,
    height: usize,
    color: Vec<[f32; 4]>,
    depth: Vec<f32>,
}

impl RenderTarget {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![[0.0, 0.0, 0.0, 1.0]; width * height],
            depth: vec![1.0; width * height],
        }
    }
}

/// CPU rasterizer implementing [`RasterBackend`].
pub struct SoftwareBackend {
    visible: RenderTarget,
    offscreen: HashMap<TargetId, RenderTarget>,
    buffers: HashMap<BufferId, BufferData>,
    textures: HashMap<TextureId, TextureData>,
    programs: HashMap<ProgramId, ShaderKind>,
    uniforms: HashMap<(ProgramId, String), UniformValue>,
    bound_target: Option<TargetId>,
    bound_textures: [Option<TextureId>; 4],
    next_id: u32,
}

impl SoftwareBackend {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            visible: RenderTarget::new(width, height),
            offscreen: HashMap::new(),
            buffers: HashMap::new(),
            textures: HashMap::new(),
            programs: HashMap::new(),
            uniforms: HashMap::new(),
            bound_target: None,
            bound_textures: [None; 4],
            next_id: 0,
        }
    }

    /// Visible-target pixels, row-major `[r,g,b,a]` in `[0,1]`.
    pub fn visible_pixels(&self) -> &[[f32; 4]] {
        &self.visible.color
    }

    pub fn visible_size(&self) -> (usize, usize) {
        (self.visible.width, self.visible.height)
    }

    /// Color attachment of an offscreen target.
    pub fn target_pixels(&self, target: TargetId) -> Option<&[[f32; 4]]> {
        self.offscreen.get(&target).map(|t| t.color.as_slice())
    }

    /// Visible target packed as 8-bit RGB, for image output.
    pub fn visible_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.visible.color.len() * 3);
        for px in &self.visible.color {
            for c in &px[..3] {
                out.push((c.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
        out
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn uniform_mat4(&self, program: ProgramId, name: &str) -> Matrix4<f32> {
        match self.uniforms.get(&(program, name.to_string())) {
            Some(UniformValue::Mat4(m)) => Matrix4::from(*m),
            _ => Matrix4::identity(),
        }
    }

    fn uniform_vec3(&self, program: ProgramId, name: &str) -> [f32; 3] {
        match self.uniforms.get(&(program, name.to_string())) {
            Some(UniformValue::Vec3(v)) => *v,
            _ => [0.0; 3],
        }
    }

    fn uniform_vec2(&self, program: ProgramId, name: &str) -> [f32; 2] {
        match self.uniforms.get(&(program, name.to_string())) {
            Some(UniformValue::Vec2(v)) => *v,
            _ => [0.0; 2],
        }
    }

    fn uniform_float(&self, program: ProgramId, name: &str) -> f32 {
        match self.uniforms.get(&(program, name.to_string())) {
            Some(UniformValue::Float(f)) => *f,
            _ => 0.0,
        }
    }

    fn uniform_int(&self, program: ProgramId, name: &str) -> i32 {
        match self.uniforms.get(&(program, name.to_string())) {
            Some(UniformValue::Int(i)) => *i,
            _ => 0,
        }
    }

    fn reflectivity(&self, program: ProgramId) -> Reflectivity {
        Reflectivity {
            ambient: self.uniform_vec3(program, uniform::AMBIENT),
            diffuse: self.uniform_vec3(program, uniform::DIFFUSE),
            specular: self.uniform_vec3(program, uniform::SPECULAR),
            shininess: self.uniform_float(program, uniform::SHININESS).max(1.0),
        }
    }

    /// Nearest-neighbor sample of a bound unit; wraps in u/v when `wrap`.
    fn sample_unit(&self, unit_index: u32, u: f32, v: f32, wrap: bool) -> [f32; 4] {
        let Some(texture) = self.bound_textures[unit_index as usize] else {
            return [0.0; 4];
        };
        self.sample_texture(texture, u, v, wrap)
    }

    fn sample_texture(&self, texture: TextureId, u: f32, v: f32, wrap: bool) -> [f32; 4] {
        match self.textures.get(&texture) {
            Some(TextureData::Image {
                width,
                height,
                channels,
                data,
            }) => {
                let (tx, ty) = texel_coords(u, v, *width, *height, wrap);
                let base = (ty * width + tx) * channels;
                let mut out = [0.0; 4];
                for c in 0..*channels {
                    out[c] = data[base + c];
                }
                out
            }
            Some(TextureData::TargetColor(target)) => {
                let Some(rt) = self.offscreen.get(target) else {
                    return [0.0; 4];
                };
                let (tx, ty) = texel_coords(u, v, rt.width, rt.height, wrap);
                rt.color[ty * rt.width + tx]
            }
            None => [0.0; 4],
        }
    }

    /// Texel fetch from a target texture by integer coordinates, clamped.
    fn fetch_target_texel(&self, texture: TextureId, x: i32, y: i32) -> [f32; 4] {
        if let Some(TextureData::TargetColor(target)) = self.textures.get(&texture) {
            if let Some(rt) = self.offscreen.get(target) {
                let x = x.clamp(0, rt.width as i32 - 1) as usize;
                let y = y.clamp(0, rt.height as i32 - 1) as usize;
                return rt.color[y * rt.width + x];
            }
        }
        [0.0; 4]
    }

    fn vertex_buffer(&self, id: BufferId) -> &[f32] {
        match self.buffers.get(&id) {
            Some(BufferData::Vertex(data)) => data,
            _ => &[],
        }
    }

    fn target_size(&self) -> (usize, usize) {
        match self.bound_target {
            Some(id) => {
                let rt = &self.offscreen[&id];
                (rt.width, rt.height)
            }
            None => (self.visible.width, self.visible.height),
        }
    }

    fn rasterize_mesh(&mut self, program: ProgramId, mesh: &MeshHandle) {
        let kind = match self.programs.get(&program) {
            Some(kind) => *kind,
            None => return,
        };

        let model = self.uniform_mat4(program, uniform::MODEL);
        let view_proj = self.uniform_mat4(program, uniform::VIEW_PROJ);

        let positions = self.vertex_buffer(mesh.positions).to_vec();
        let normals = self.vertex_buffer(mesh.normals).to_vec();
        let uvs = mesh.uvs.map(|id| self.vertex_buffer(id).to_vec());
        let indices = match self.buffers.get(&mesh.indices) {
            Some(BufferData::Index(data)) => data.clone(),
            _ => return,
        };

        let (width, height) = self.target_size();

        for tri in indices.chunks_exact(3) {
            let mut clip = [Vector4::new(0.0, 0.0, 0.0, 1.0); 3];
            let mut world = [Vector3::new(0.0, 0.0, 0.0); 3];
            let mut normal = [Vector3::new(0.0, 0.0, 0.0); 3];
            let mut uv = [[0.0f32; 2]; 3];
            let mut behind = false;

            for (i, &index) in tri.iter().enumerate() {
                let base = index as usize * 3;
                if base + 2 >= positions.len() || base + 2 >= normals.len() {
                    return; // malformed mesh, drop the draw
                }
                let local = Vector4::new(positions[base], positions[base + 1], positions[base + 2], 1.0);
                let world4 = model * local;
                world[i] = world4.truncate();
                clip[i] = view_proj * world4;
                if clip[i].w <= 1e-4 {
                    behind = true;
                }
                let n4 = model * Vector4::new(normals[base], normals[base + 1], normals[base + 2], 0.0);
                normal[i] = n4.truncate();
                if let Some(uvs) = &uvs {
                    let ubase = index as usize * 2;
                    if ubase + 1 < uvs.len() {
                        uv[i] = [uvs[ubase], uvs[ubase + 1]];
                    }
                }
            }
            // No near-plane clipping; triangles crossing the eye plane are
            // dropped whole.
            if behind {
                continue;
            }

            let mut screen = [[0.0f32; 3]; 3];
            let mut inv_w = [0.0f32; 3];
            for i in 0..3 {
                let w = clip[i].w;
                inv_w[i] = 1.0 / w;
                let ndc = clip[i].truncate() * inv_w[i];
                screen[i] = [
                    (ndc.x + 1.0) * 0.5 * (width as f32 - 1.0),
                    (1.0 - ndc.y) * 0.5 * (height as f32 - 1.0),
                    ndc.z * 0.5 + 0.5,
                ];
            }

            self.rasterize_triangle(kind, program, &screen, &inv_w, &world, &normal, &uv, width, height);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn rasterize_triangle(
        &mut self,
        kind: ShaderKind,
        program: ProgramId,
        screen: &[[f32; 3]; 3],
        inv_w: &[f32; 3],
        world: &[Vector3<f32>; 3],
        normal: &[Vector3<f32>; 3],
        uv: &[[f32; 2]; 3],
        width: usize,
        height: usize,
    ) {
        let area = edge(screen[0], screen[1], [screen[2][0], screen[2][1]]);
        if area.abs() < 1e-8 {
            return;
        }

        let min_x = screen.iter().map(|v| v[0]).fold(f32::MAX, f32::min).floor().max(0.0) as usize;
        let max_x = (screen.iter().map(|v| v[0]).fold(f32::MIN, f32::max).ceil() as usize)
            .min(width - 1);
        let min_y = screen.iter().map(|v| v[1]).fold(f32::MAX, f32::min).floor().max(0.0) as usize;
        let max_y = (screen.iter().map(|v| v[1]).fold(f32::MIN, f32::max).ceil() as usize)
            .min(height - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let p = [px as f32 + 0.5, py as f32 + 0.5];
                let b0 = edge(screen[1], screen[2], p) / area;
                let b1 = edge(screen[2], screen[0], p) / area;
                let b2 = edge(screen[0], screen[1], p) / area;
                if b0 < 0.0 || b1 < 0.0 || b2 < 0.0 {
                    continue;
                }

                // Window-space depth interpolates linearly.
                let depth = b0 * screen[0][2] + b1 * screen[1][2] + b2 * screen[2][2];
                if !(0.0..=1.0).contains(&depth) {
                    continue;
                }
                let pixel = py * width + px;
                {
                    let target = self.bound_target_mut();
                    if depth >= target.depth[pixel] {
                        continue;
                    }
                }

                // Perspective-correct attribute weights.
                let w0 = b0 * inv_w[0];
                let w1 = b1 * inv_w[1];
                let w2 = b2 * inv_w[2];
                let denom = w0 + w1 + w2;
                let frag_world = (world[0] * w0 + world[1] * w1 + world[2] * w2) / denom;
                let frag_normal = (normal[0] * w0 + normal[1] * w1 + normal[2] * w2) / denom;
                let frag_uv = [
                    (uv[0][0] * w0 + uv[1][0] * w1 + uv[2][0] * w2) / denom,
                    (uv[0][1] * w0 + uv[1][1] * w1 + uv[2][1] * w2) / denom,
                ];

                let color = self.shade_fragment(
                    kind, program, depth, frag_world, frag_normal, frag_uv, px, py, width, height,
                );

                let target = self.bound_target_mut();
                target.depth[pixel] = depth;
                target.color[pixel] = color;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn shade_fragment(
        &self,
        kind: ShaderKind,
        program: ProgramId,
        depth: f32,
        world: Vector3<f32>,
        normal: Vector3<f32>,
        uv: [f32; 2],
        px: usize,
        py: usize,
        width: usize,
        height: usize,
    ) -> [f32; 4] {
        match kind {
            ShaderKind::BlinnPhong => {
                let eye = self.uniform_vec3(program, uniform::EYE_POSITION);
                let material = self.reflectivity(program);
                let lit = shading::blinn_phong(normal, world, Vector3::from(eye), &material);
                if self.uniform_int(program, uniform::USING_TEXTURE) != 0 {
                    let tex = self.sample_unit(unit::SURFACE, uv[0], uv[1], true);
                    [lit[0] * tex[0], lit[1] * tex[1], lit[2] * tex[2], 1.0]
                } else {
                    [lit[0], lit[1], lit[2], 1.0]
                }
            }
            ShaderKind::CelShading => {
                let material = self.reflectivity(program);
                let color = shading::cel_shade(normal, world, &material);
                [color[0], color[1], color[2], 1.0]
            }
            ShaderKind::DepthNormal => {
                let n = normal.normalize();
                [shading::linearize_depth(depth), n.x, n.y, n.z]
            }
            ShaderKind::PencilComposite => {
                self.shade_pencil_fragment(program, world, normal, uv, px, py, width, height)
            }
            // The paper wash never rasterizes mesh fragments.
            ShaderKind::PaperWash => [1.0, 1.0, 1.0, 1.0],
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn shade_pencil_fragment(
        &self,
        program: ProgramId,
        world: Vector3<f32>,
        normal: Vector3<f32>,
        uv: [f32; 2],
        px: usize,
        py: usize,
        width: usize,
        height: usize,
    ) -> [f32; 4] {
        let Some(intermediate) = self.bound_textures[unit::INTERMEDIATE as usize] else {
            return [1.0, 1.0, 1.0, 1.0];
        };

        // Map the fragment onto the intermediate's pixel grid, perturbed by
        // the drawing-offset field.
        let (iw, ih) = match self.textures.get(&intermediate) {
            Some(TextureData::TargetColor(target)) => {
                let rt = &self.offscreen[target];
                (rt.width, rt.height)
            }
            _ => (width, height),
        };
        let offsets = self.sample_unit(
            unit::JITTER,
            px as f32 / width as f32,
            py as f32 / height as f32,
            true,
        );
        let ix = (px as f32 * iw as f32 / width as f32
            + (offsets[0] * 2.0 - 1.0) * JITTER_OFFSET_TEXELS)
            .round() as i32;
        let iy = (py as f32 * ih as f32 / height as f32
            + (offsets[1] * 2.0 - 1.0) * JITTER_OFFSET_TEXELS)
            .round() as i32;

        let mut samples = [[0.0f32; 4]; 9];
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                let i = ((dy + 1) * 3 + (dx + 1)) as usize;
                samples[i] = self.fetch_target_texel(intermediate, ix + dx, iy + dy);
            }
        }
        let edge_flag = shading::is_edge(&samples);

        let intensity = shading::pencil_intensity(normal, world);
        let jitter = self.uniform_float(program, uniform::JITTER);
        let stroke_uv = shading::pencil_uv(uv[0], intensity, jitter);
        let stroke = self.sample_unit(unit::STROKE, stroke_uv[0], stroke_uv[1], false);

        let tint = if edge_flag { EDGE_TINT } else { NO_EDGE_TINT };
        let value = stroke[0] * tint;
        [value, value, value, 1.0]
    }

    fn bound_target_mut(&mut self) -> &mut RenderTarget {
        match self.bound_target {
            Some(id) => self.offscreen.get_mut(&id).unwrap_or(&mut self.visible),
            None => &mut self.visible,
        }
    }
}

impl RasterBackend for SoftwareBackend {
    fn create_vertex_buffer(&mut self, data: &[f32]) -> BufferId {
        let id = BufferId(self.fresh_id());
        self.buffers.insert(id, BufferData::Vertex(data.to_vec()));
        id
    }

    fn create_index_buffer(&mut self, data: &[u32]) -> BufferId {
        let id = BufferId(self.fresh_id());
        self.buffers.insert(id, BufferData::Index(data.to_vec()));
        id
    }

    fn create_texture(&mut self, desc: TextureDesc, texels: &[u8]) -> TextureId {
        let id = TextureId(self.fresh_id());
        let channels = desc.format.channels();
        self.textures.insert(
            id,
            TextureData::Image {
                width: desc.width as usize,
                height: desc.height as usize,
                channels,
                data: texels.iter().map(|&t| t as f32 / 255.0).collect(),
            },
        );
        id
    }

    fn create_offscreen_target(&mut self, width: u32, height: u32) -> OffscreenTarget {
        let target = TargetId(self.fresh_id());
        let color = TextureId(self.fresh_id());
        self.offscreen
            .insert(target, RenderTarget::new(width as usize, height as usize));
        self.textures.insert(color, TextureData::TargetColor(target));
        OffscreenTarget { target, color }
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId, BackendError> {
        let id = ProgramId(self.fresh_id());
        self.programs.insert(id, desc.kind);
        Ok(id)
    }

    fn bind_target(&mut self, target: Option<TargetId>) {
        self.bound_target = target;
    }

    fn clear(&mut self, color: Option<[f32; 4]>, depth: bool) {
        let target = self.bound_target_mut();
        if let Some(color) = color {
            target.color.fill(color);
        }
        if depth {
            target.depth.fill(1.0);
        }
    }

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue) {
        self.uniforms.insert((program, name.to_string()), value);
    }

    fn bind_texture(&mut self, unit_index: u32, texture: TextureId) {
        self.bound_textures[unit_index as usize] = Some(texture);
    }

    fn draw_mesh(&mut self, program: ProgramId, mesh: &MeshHandle) {
        self.rasterize_mesh(program, mesh);
    }

    fn draw_fullscreen_quad(&mut self, program: ProgramId) {
        let kind = match self.programs.get(&program) {
            Some(kind) => *kind,
            None => return,
        };
        if kind != ShaderKind::PaperWash {
            return;
        }
        let shift = self.uniform_vec2(program, uniform::PAPER_SHIFT);
        let (width, height) = self.target_size();

        let mut colors = Vec::with_capacity(width * height);
        for py in 0..height {
            for px in 0..width {
                let uv = shading::paper_uv(
                    px as f32 / (width - 1).max(1) as f32,
                    py as f32 / (height - 1).max(1) as f32,
                    shift,
                );
                let grain = self.sample_unit(unit::PAPER, uv[0], uv[1], true);
                colors.push([grain[0], grain[0], grain[0], 1.0]);
            }
        }

        let target = self.bound_target_mut();
        target.color.copy_from_slice(&colors);
    }
}

fn edge(a: [f32; 3], b: [f32; 3], p: [f32; 2]) -> f32 {
    (p[0] - a[0]) * (b[1] - a[1]) - (p[1] - a[1]) * (b[0] - a[0])
}

fn texel_coords(u: f32, v: f32, width: usize, height: usize, wrap: bool) -> (usize, usize) {
    let (u, v) = if wrap {
        (u.rem_euclid(1.0), v.rem_euclid(1.0))
    } else {
        (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
    };
    let x = ((u * width as f32) as usize).min(width - 1);
    let y = ((v * height as f32) as usize).min(height - 1);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, NavigationMode, ViewState};
    use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
    use crate::gfx::pipeline::{FrameOutcome, RenderPipeline, ShadingStyle};
    use crate::gfx::scene::primitives::cube;
    use crate::noise::NoiseSynthesizer;
    use std::time::Instant;

    fn camera() -> CameraManager {
        CameraManager::new(
            ViewState::default(),
            CameraController::new(NavigationMode::FreeRotate),
        )
    }

    fn render_style(style: ShadingStyle, backend: &mut SoftwareBackend) -> FrameOutcome {
        let now = Instant::now();
        let synth = NoiseSynthesizer::with_seed(99);
        let mut pipeline = RenderPipeline::new(backend, &synth, style, now);

        let buffers = cube();
        let handle = buffers.upload(backend);

        let camera = camera();
        let view_proj = convert_matrix4_to_array(camera.view_projection_matrix());
        let eye = camera.view.eye;
        pipeline.frame(
            backend,
            view_proj,
            [eye.x, eye.y, eye.z],
            Some((&handle, &buffers.material)),
            now,
        )
    }

    #[test]
    fn test_blinn_phong_lights_the_cube() {
        let mut backend = SoftwareBackend::new(64, 64);
        let outcome = render_style(ShadingStyle::BlinnPhong, &mut backend);
        assert_eq!(outcome, FrameOutcome::Rendered);

        // Center pixel shows the lit front face; a corner is background.
        let center = backend.visible_pixels()[32 * 64 + 32];
        assert!(center[0] > 0.3, "front face should exceed ambient floor");
        let corner = backend.visible_pixels()[0];
        assert_eq!(corner[..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_cel_shading_is_posterized() {
        let mut backend = SoftwareBackend::new(64, 64);
        let outcome = render_style(ShadingStyle::CelShading, &mut backend);
        assert_eq!(outcome, FrameOutcome::Rendered);

        // Every lit pixel is the diffuse color scaled by one of the four
        // fixed levels.
        let diffuse = 0.3f32;
        let levels = shading::CEL_LEVELS;
        for px in backend.visible_pixels() {
            if px[..3] == [0.0, 0.0, 0.0] {
                continue; // background
            }
            assert!(
                levels.iter().any(|&l| (px[0] - diffuse * l).abs() < 1e-4),
                "pixel {:?} not on a cel band",
                px
            );
        }
    }

    #[test]
    fn test_geometry_pass_writes_depth_and_normals() {
        let mut backend = SoftwareBackend::new(64, 64);
        let now = Instant::now();
        let synth = NoiseSynthesizer::with_seed(99);
        let mut pipeline =
            RenderPipeline::new(&mut backend, &synth, ShadingStyle::PencilSketch, now);

        let buffers = cube();
        let handle = buffers.upload(&mut backend);
        let camera = camera();
        let view_proj = convert_matrix4_to_array(camera.view_projection_matrix());
        pipeline.frame(
            &mut backend,
            view_proj,
            [0.0, 0.0, 6.0],
            Some((&handle, &buffers.material)),
            now,
        );

        // The offscreen intermediate holds covered texels with depth in
        // (0,1) and a unit-ish normal.
        let target = backend.offscreen.keys().copied().next().unwrap();
        let pixels = backend.target_pixels(target).unwrap();
        let covered: Vec<_> = pixels
            .iter()
            .filter(|p| p[1..4] != [0.0, 0.0, 0.0])
            .collect();
        assert!(!covered.is_empty());
        for p in covered {
            assert!(p[0] > 0.0 && p[0] < 1.0, "linearized depth {} out of range", p[0]);
            let len = (p[1] * p[1] + p[2] * p[2] + p[3] * p[3]).sqrt();
            assert!((len - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pencil_sketch_draws_edges_and_paper() {
        let mut backend = SoftwareBackend::new(128, 128);
        let outcome = render_style(ShadingStyle::PencilSketch, &mut backend);
        assert_eq!(outcome, FrameOutcome::Rendered);

        let pixels = backend.visible_pixels();
        // Paper background stays near-white.
        assert!(pixels[0][0] > 0.9);
        // Silhouette edges produce dark strokes somewhere in the image.
        let darkest = pixels.iter().map(|p| p[0]).fold(f32::MAX, f32::min);
        assert!(darkest < 0.5, "expected dark edge strokes, darkest {}", darkest);
    }

    #[test]
    fn test_depth_test_keeps_nearest_fragment() {
        let mut backend = SoftwareBackend::new(32, 32);
        let outcome = render_style(ShadingStyle::BlinnPhong, &mut backend);
        assert_eq!(outcome, FrameOutcome::Rendered);
        // Depth buffer was written under the cube.
        let center = 16 * 32 + 16;
        assert!(backend.visible.depth[center] < 1.0);
    }
}
