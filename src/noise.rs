//! # Procedural Noise Synthesis
//!
//! Classic 2D gradient (Perlin-style) noise used for the pencil-sketch
//! style's paper grain and drawing jitter, plus the procedurally generated
//! pencil-stroke texture. Fields are generated once at startup and uploaded
//! to the backend as static textures.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Side length of every generated noise field, in texels.
pub const FIELD_SIZE: usize = 512;

/// Sample-coordinate scale applied to grid positions before noise lookup.
pub const SAMPLE_SCALE: f32 = 0.08;

/// Paper-grain value range (near-white, faintly textured).
pub const PAPER_RANGE: (f32, f32) = (249.0, 255.0);

/// Drawing-offset value range (full byte range).
pub const OFFSET_RANGE: (f32, f32) = (0.0, 255.0);

/// A pseudo-random permutation of the integers 0-255, duplicated to length
/// 512 so `table[x + 1]` and `table[p + y + 1]` never need a wraparound
/// check for byte-masked inputs.
pub struct PermutationTable {
    table: [u8; FIELD_SIZE],
}

impl PermutationTable {
    /// Builds a table from session entropy.
    pub fn new() -> Self {
        Self::from_rng(&mut rand::rng())
    }

    /// Builds a deterministic table from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut values: Vec<u8> = (0..=255u8).collect();
        values.shuffle(rng);

        let mut table = [0u8; FIELD_SIZE];
        table[..256].copy_from_slice(&values);
        table[256..].copy_from_slice(&values);
        Self { table }
    }

    #[inline]
    fn get(&self, index: usize) -> usize {
        self.table[index] as usize
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A square scalar field remapped into `[low, high]`.
pub struct NoiseField {
    values: Vec<f32>,
    low: f32,
    high: f32,
}

impl NoiseField {
    /// Side length of the field.
    pub fn size(&self) -> usize {
        FIELD_SIZE
    }

    /// Value range the field was remapped into.
    pub fn range(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    /// Scalar at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * FIELD_SIZE + x]
    }

    /// Raw values in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Packs the field into single-channel byte texels for upload.
    pub fn to_r8(&self) -> Vec<u8> {
        self.values
            .iter()
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .collect()
    }
}

/// Interleaves two scalar fields into one 2-channel byte buffer, the jitter
/// field sampled by the compositing pass.
pub fn combine_offset_fields(x_field: &NoiseField, y_field: &NoiseField) -> Vec<u8> {
    let mut texels = Vec::with_capacity(FIELD_SIZE * FIELD_SIZE * 2);
    for (x, y) in x_field.values.iter().zip(y_field.values.iter()) {
        texels.push(x.round().clamp(0.0, 255.0) as u8);
        texels.push(y.round().clamp(0.0, 255.0) as u8);
    }
    texels
}

/// Generator for the noise fields used by the pencil-sketch style.
///
/// Deterministic for a fixed permutation seed; the shuffle is the only
/// entropy source.
pub struct NoiseSynthesizer {
    perm: PermutationTable,
}

impl NoiseSynthesizer {
    pub fn new() -> Self {
        Self {
            perm: PermutationTable::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            perm: PermutationTable::from_seed(seed),
        }
    }

    /// Generates a `FIELD_SIZE` x `FIELD_SIZE` scalar field of gradient
    /// noise remapped to `[low, high]`.
    pub fn generate_field(&self, low: f32, high: f32) -> NoiseField {
        let mid = (high + low) / 2.0;
        let mut values = Vec::with_capacity(FIELD_SIZE * FIELD_SIZE);
        for y in 0..FIELD_SIZE {
            for x in 0..FIELD_SIZE {
                let n = self.sample(x as f32 * SAMPLE_SCALE, y as f32 * SAMPLE_SCALE);
                values.push((mid + n * (high - mid)).clamp(low, high));
            }
        }
        NoiseField { values, low, high }
    }

    /// Paper-grain field in the near-white range.
    pub fn generate_paper_field(&self) -> NoiseField {
        self.generate_field(PAPER_RANGE.0, PAPER_RANGE.1)
    }

    /// Full-range drawing-offset field.
    pub fn generate_offset_field(&self) -> NoiseField {
        self.generate_field(OFFSET_RANGE.0, OFFSET_RANGE.1)
    }

    /// Raw 2D gradient noise at `(x, y)`, in `[-1, 1]`.
    ///
    /// Corner gradients come from the permutation table; the four corner dot
    /// products are blended with the quintic fade applied per axis.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let xi = (x.floor() as i32 & 255) as usize;
        let yi = (y.floor() as i32 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();

        let p = &self.perm;
        let top_right = p.get(p.get(xi + 1) + yi + 1);
        let top_left = p.get(p.get(xi) + yi + 1);
        let bottom_right = p.get(p.get(xi + 1) + yi);
        let bottom_left = p.get(p.get(xi) + yi);

        let dot_tr = dot_gradient(top_right, xf - 1.0, yf - 1.0);
        let dot_tl = dot_gradient(top_left, xf, yf - 1.0);
        let dot_br = dot_gradient(bottom_right, xf - 1.0, yf);
        let dot_bl = dot_gradient(bottom_left, xf, yf);

        let u = fade(xf);
        let v = fade(yf);
        lerp(v, lerp(u, dot_bl, dot_br), lerp(u, dot_tl, dot_tr))
    }
}

impl Default for NoiseSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps the low 2 bits of a permutation value to one of the four unit
/// diagonals and dots it with the corner-to-sample offset.
#[inline]
fn dot_gradient(hash: usize, dx: f32, dy: f32) -> f32 {
    match hash & 3 {
        0 => dx + dy,   // ( 1,  1)
        1 => -dx + dy,  // (-1,  1)
        2 => -dx - dy,  // (-1, -1)
        _ => dx - dy,   // ( 1, -1)
    }
}

/// Quintic smoothstep-family fade: 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Side length of the procedural pencil-stroke texture.
pub const STROKE_SIZE: usize = 256;

/// Synthesizes the pencil-stroke texture sampled by the compositing pass.
///
/// Rows darken toward high `v` (low lighting intensity lands on dark
/// strokes), with noise streaks along `u` standing in for individual pencil
/// marks. Single-channel, `STROKE_SIZE` squared.
pub fn generate_stroke_texture(synth: &NoiseSynthesizer) -> Vec<u8> {
    let mut texels = Vec::with_capacity(STROKE_SIZE * STROKE_SIZE);
    for y in 0..STROKE_SIZE {
        let v = y as f32 / (STROKE_SIZE - 1) as f32;
        let base = 255.0 * (1.0 - 0.85 * v);
        for x in 0..STROKE_SIZE {
            // Stretched sampling keeps streaks long in u and tight in v.
            let streak = synth.sample(x as f32 * 0.3, y as f32 * 0.02) * 40.0;
            texels.push((base + streak).clamp(0.0, 255.0) as u8);
        }
    }
    texels
}
