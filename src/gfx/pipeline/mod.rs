//! # Frame-Composition Pipeline
//!
//! Decides, per shading style, which passes to issue each frame and with
//! what parameters. Owns the style-independent resources (offscreen
//! depth+normal target, noise and stroke textures, all created once) and the
//! per-period jitter re-randomization.

pub mod shading;
pub mod styles;

use std::time::{Duration, Instant};

use crate::gfx::backend::{MeshHandle, RasterBackend, TextureDesc, TextureFormat};
use crate::gfx::scene::Material;
use crate::noise::{self, NoiseSynthesizer, FIELD_SIZE, STROKE_SIZE};

pub use styles::{FrameContext, ShadingStyle, SharedResources, StyleConfig};

/// Side length of the offscreen depth+normal intermediate.
pub const INTERMEDIATE_SIZE: u32 = 512;

/// Wall-clock period between jitter re-randomizations.
pub const RERANDOMIZE_PERIOD: Duration = Duration::from_millis(250);

/// What a call to [`RenderPipeline::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Passes were issued for the active style.
    Rendered,
    /// Re-randomization resync: fresh jitter drawn, nothing rendered.
    Skipped,
    /// Nothing to draw (no uploaded mesh, or the style is inert).
    Idle,
}

/// Fixed-period timer backing the jitter re-randomization flag.
#[derive(Debug)]
pub struct RerandomizeTimer {
    period: Duration,
    last: Instant,
}

impl RerandomizeTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            period: RERANDOMIZE_PERIOD,
            last: now,
        }
    }

    /// True once per elapsed period.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last) >= self.period {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Holds the active style configuration and swaps it on selection.
pub struct StyleSelector {
    active: Box<dyn StyleConfig>,
}

impl StyleSelector {
    pub fn new(style: ShadingStyle, backend: &mut dyn RasterBackend) -> Self {
        let mut active = styles::config_for(style);
        active.bind_programs(backend);
        Self { active }
    }

    pub fn active_style(&self) -> ShadingStyle {
        self.active.style()
    }

    /// Switches style, rebuilding that style's programs. Re-selecting the
    /// active style changes nothing.
    pub fn select(&mut self, style: ShadingStyle, backend: &mut dyn RasterBackend) {
        if style == self.active.style() {
            return;
        }
        log::debug!("shading style -> {:?}", style);
        let mut next = styles::config_for(style);
        next.bind_programs(backend);
        self.active = next;
    }
}

/// Per-frame pass orchestration over the active shading style.
pub struct RenderPipeline {
    shared: SharedResources,
    selector: StyleSelector,
    timer: RerandomizeTimer,
    jitter: [f32; 2],
}

impl RenderPipeline {
    /// Creates the pipeline, generating noise fields and uploading the
    /// style-independent resources. Runs once at startup; style switches
    /// never recreate these.
    pub fn new(
        backend: &mut dyn RasterBackend,
        synth: &NoiseSynthesizer,
        style: ShadingStyle,
        now: Instant,
    ) -> Self {
        let field_desc = TextureDesc {
            width: FIELD_SIZE as u32,
            height: FIELD_SIZE as u32,
            format: TextureFormat::R8,
        };
        let paper_texture = backend.create_texture(field_desc, &synth.generate_paper_field().to_r8());

        let offset_x = synth.generate_offset_field();
        let offset_y = synth.generate_offset_field();
        let jitter_texture = backend.create_texture(
            TextureDesc {
                width: FIELD_SIZE as u32,
                height: FIELD_SIZE as u32,
                format: TextureFormat::Rg8,
            },
            &noise::combine_offset_fields(&offset_x, &offset_y),
        );

        let stroke_texture = backend.create_texture(
            TextureDesc {
                width: STROKE_SIZE as u32,
                height: STROKE_SIZE as u32,
                format: TextureFormat::R8,
            },
            &noise::generate_stroke_texture(synth),
        );

        let intermediate = backend.create_offscreen_target(INTERMEDIATE_SIZE, INTERMEDIATE_SIZE);

        Self {
            shared: SharedResources {
                intermediate,
                paper_texture,
                jitter_texture,
                stroke_texture,
            },
            selector: StyleSelector::new(style, backend),
            timer: RerandomizeTimer::new(now),
            jitter: [rand::random::<f32>(), rand::random::<f32>()],
        }
    }

    pub fn active_style(&self) -> ShadingStyle {
        self.selector.active_style()
    }

    /// Switches the shading style (programs only; shared resources stay).
    pub fn set_style(&mut self, style: ShadingStyle, backend: &mut dyn RasterBackend) {
        self.selector.select(style, backend);
    }

    /// Current per-period jitter scalars.
    pub fn jitter(&self) -> [f32; 2] {
        self.jitter
    }

    /// Composes one frame.
    ///
    /// When the re-randomization period has elapsed, this frame draws two
    /// fresh jitter scalars and issues no commands at all; the following
    /// frame renders with the new values.
    pub fn frame(
        &mut self,
        backend: &mut dyn RasterBackend,
        view_proj: [[f32; 4]; 4],
        eye: [f32; 3],
        mesh: Option<(&MeshHandle, &Material)>,
        now: Instant,
    ) -> FrameOutcome {
        if self.timer.poll(now) {
            self.jitter = [rand::random::<f32>(), rand::random::<f32>()];
            return FrameOutcome::Skipped;
        }

        // Mesh buffers not populated yet: silently draw nothing.
        let Some((mesh, material)) = mesh else {
            return FrameOutcome::Idle;
        };

        let frame = FrameContext {
            model: IDENTITY,
            view_proj,
            eye,
            mesh,
            material,
            jitter: self.jitter,
        };
        if self.selector.active.render_frame(backend, &self.shared, &frame) {
            FrameOutcome::Rendered
        } else {
            FrameOutcome::Idle
        }
    }
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];
