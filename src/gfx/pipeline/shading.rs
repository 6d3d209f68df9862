//! # Fragment Shading Math
//!
//! The per-fragment formulas behind the three shading styles, kept as pure
//! functions so the software backend executes exactly what the tests check.
//!
//! Edge thresholds and the pencil UV constants are empirically tuned values
//! carried over from the viewer; they are configuration, not derived.

use cgmath::{InnerSpace, Vector3};

/// World-space light position.
pub const LIGHT_POSITION: Vector3<f32> = Vector3::new(2.0, 50.0, 20.0);

/// Light emission terms, all white.
pub const LIGHT_AMBIENT: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIGHT_DIFFUSE: [f32; 3] = [1.0, 1.0, 1.0];
pub const LIGHT_SPECULAR: [f32; 3] = [1.0, 1.0, 1.0];

/// Cel-shading band thresholds, compared with strict `>` from brightest to
/// darkest band.
pub const CEL_THRESHOLDS: [f32; 3] = [0.95, 0.5, 0.25];

/// Fixed brightness level per cel band.
pub const CEL_LEVELS: [f32; 4] = [1.0, 0.6, 0.35, 0.15];

/// Sobel gradient threshold on the linearized-depth channel.
pub const EDGE_DEPTH_THRESHOLD: f32 = 0.05;

/// Sobel gradient threshold on each normal channel.
pub const EDGE_NORMAL_THRESHOLD: f32 = 2.1;

/// Pencil-stroke lookup: vertical span covered by lighting intensity.
pub const PENCIL_V_SCALE: f32 = 0.89;

/// Pencil-stroke lookup: divisor applied to the per-period jitter scalar.
pub const PENCIL_JITTER_DIVISOR: f32 = 40.0;

/// Paper pass: divisor applied to the per-period shift scalars.
pub const PAPER_SHIFT_DIVISOR: f32 = 10.0;

/// Tint applied to edge fragments (dark gray) vs. non-edge (near-white).
pub const EDGE_TINT: f32 = 0.3;
pub const NO_EDGE_TINT: f32 = 1.0;

/// Depth-linearization planes for the geometry pass.
pub const DEPTH_NEAR: f32 = 0.1;
pub const DEPTH_FAR: f32 = 20.0;

/// Material reflectivity terms consumed by the lighting formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflectivity {
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

/// Unit direction from a surface point toward the light.
pub fn light_dir(world_pos: Vector3<f32>) -> Vector3<f32> {
    (LIGHT_POSITION - world_pos).normalize()
}

/// Lambertian intensity, clamped at zero.
pub fn lambert(normal: Vector3<f32>, light: Vector3<f32>) -> f32 {
    normal.dot(light).max(0.0)
}

/// Full blinn-phong combination: ambient + diffuse + half-vector specular.
pub fn blinn_phong(
    normal: Vector3<f32>,
    world_pos: Vector3<f32>,
    eye: Vector3<f32>,
    material: &Reflectivity,
) -> [f32; 3] {
    let n = normal.normalize();
    let light = light_dir(world_pos);
    let diffuse_intensity = lambert(n, light);

    let to_eye = (eye - world_pos).normalize();
    let half = (light + to_eye).normalize();
    let highlight = n.dot(half).max(0.0).powf(material.shininess);

    let mut color = [0.0f32; 3];
    for i in 0..3 {
        let ambient = material.ambient[i] * LIGHT_AMBIENT[i];
        let diffuse = material.diffuse[i] * LIGHT_DIFFUSE[i] * diffuse_intensity;
        let specular = material.specular[i] * LIGHT_SPECULAR[i] * highlight;
        color[i] = ambient + diffuse + specular;
    }
    color
}

/// Band index (0 = brightest) for a cel intensity, strict `>` per threshold.
pub fn cel_band(intensity: f32) -> usize {
    for (band, &threshold) in CEL_THRESHOLDS.iter().enumerate() {
        if intensity > threshold {
            return band;
        }
    }
    CEL_THRESHOLDS.len()
}

/// Posterized brightness for a cel intensity.
pub fn cel_brightness(intensity: f32) -> f32 {
    CEL_LEVELS[cel_band(intensity)]
}

/// Cel-shaded color: the fixed band brightness applied to the diffuse
/// reflectivity.
pub fn cel_shade(normal: Vector3<f32>, world_pos: Vector3<f32>, material: &Reflectivity) -> [f32; 3] {
    let intensity = lambert(normal.normalize(), light_dir(world_pos));
    let level = cel_brightness(intensity);
    [
        material.diffuse[0] * level,
        material.diffuse[1] * level,
        material.diffuse[2] * level,
    ]
}

/// Remaps a `[0,1]` perspective depth-buffer value back to a distance
/// proportional to camera-space depth, normalized by the far plane.
pub fn linearize_depth(depth: f32) -> f32 {
    let z = depth * 2.0 - 1.0;
    let linear =
        2.0 * DEPTH_NEAR * DEPTH_FAR / (DEPTH_FAR + DEPTH_NEAR - z * (DEPTH_FAR - DEPTH_NEAR));
    linear / DEPTH_FAR
}

/// Per-channel Sobel gradient magnitude over a 3x3 neighborhood.
///
/// `samples` is row-major with channel layout `[depth, nx, ny, nz]`.
pub fn sobel_gradient(samples: &[[f32; 4]; 9]) -> [f32; 4] {
    const H: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
    const V: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

    let mut gradient = [0.0f32; 4];
    for channel in 0..4 {
        let mut h = 0.0;
        let mut v = 0.0;
        for i in 0..9 {
            h += H[i] * samples[i][channel];
            v += V[i] * samples[i][channel];
        }
        gradient[channel] = (h * h + v * v).sqrt();
    }
    gradient
}

/// Edge flag: depth gradient past its threshold, or any normal gradient
/// past its.
pub fn is_edge(samples: &[[f32; 4]; 9]) -> bool {
    let g = sobel_gradient(samples);
    g[0] > EDGE_DEPTH_THRESHOLD
        || g[1] > EDGE_NORMAL_THRESHOLD
        || g[2] > EDGE_NORMAL_THRESHOLD
        || g[3] > EDGE_NORMAL_THRESHOLD
}

/// Pencil lighting intensity: square-rooted Lambert falloff.
pub fn pencil_intensity(normal: Vector3<f32>, world_pos: Vector3<f32>) -> f32 {
    lambert(normal.normalize(), light_dir(world_pos)).sqrt()
}

/// Stroke-texture coordinates for a fragment: `u` carried through, `v`
/// driven by inverted intensity plus the per-period jitter.
pub fn pencil_uv(u: f32, intensity: f32, jitter: f32) -> [f32; 2] {
    [
        u,
        (1.0 - intensity) * PENCIL_V_SCALE + jitter / PENCIL_JITTER_DIVISOR,
    ]
}

/// Paper-grain coordinates shifted by the per-period scalars.
pub fn paper_uv(u: f32, v: f32, shift: [f32; 2]) -> [f32; 2] {
    [
        u + shift[0] / PAPER_SHIFT_DIVISOR,
        v + shift[1] / PAPER_SHIFT_DIVISOR,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cel_band_boundaries() {
        // 0.96 clears the top threshold: band 1 (index 0).
        assert_eq!(cel_band(0.96), 0);
        assert_eq!(cel_brightness(0.96), CEL_LEVELS[0]);

        // 0.5 does not clear the strict `>` 0.5 threshold, so it falls
        // through to band 3 (index 2), not band 2.
        assert_eq!(cel_band(0.5), 2);
        assert_eq!(cel_brightness(0.5), CEL_LEVELS[2]);

        assert_eq!(cel_band(0.51), 1);
        assert_eq!(cel_band(0.25), 3);
        assert_eq!(cel_band(0.0), 3);
    }

    #[test]
    fn test_blinn_phong_floor_is_ambient() {
        let material = Reflectivity {
            ambient: [0.5, 0.5, 0.5],
            diffuse: [0.3, 0.3, 0.3],
            specular: [0.2, 0.2, 0.2],
            shininess: 2.0,
        };
        // Normal facing away from the light: no diffuse, no specular.
        let away = Vector3::new(0.0, -1.0, 0.0);
        let color = blinn_phong(away, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 6.0), &material);
        for i in 0..3 {
            assert!((color[i] - material.ambient[i]).abs() < 1e-4);
        }

        // Normal toward the light: strictly brighter than ambient.
        let toward = light_dir(Vector3::new(0.0, 0.0, 0.0));
        let lit = blinn_phong(toward, Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 6.0), &material);
        assert!(lit[0] > color[0]);
    }

    #[test]
    fn test_flat_neighborhood_is_never_an_edge() {
        let flat = [[0.42, 0.1, 0.9, 0.3]; 9];
        assert_eq!(sobel_gradient(&flat), [0.0; 4]);
        assert!(!is_edge(&flat));
    }

    #[test]
    fn test_depth_step_flags_edge() {
        let mut samples = [[0.1, 0.0, 0.0, 0.0]; 9];
        // Right column much deeper than the left: strong horizontal gradient.
        for row in 0..3 {
            samples[row * 3 + 2][0] = 0.9;
        }
        assert!(is_edge(&samples));
    }

    #[test]
    fn test_normal_flip_flags_edge() {
        let mut samples = [[0.5, 0.0, 1.0, 0.0]; 9];
        for row in 0..3 {
            samples[row * 3 + 2][2] = -1.0;
        }
        assert!(is_edge(&samples));
    }

    #[test]
    fn test_linearized_depth_monotonic_in_range() {
        let near = linearize_depth(0.0);
        let mid = linearize_depth(0.5);
        let far = linearize_depth(1.0);
        assert!(near < mid && mid < far);
        assert!(near >= 0.0 && far <= 1.0 + 1e-5);
    }

    #[test]
    fn test_pencil_uv_maps_intensity_to_v() {
        // Full intensity lands at the top of the stroke sheet plus jitter.
        let bright = pencil_uv(0.25, 1.0, 0.4);
        assert!((bright[1] - 0.4 / PENCIL_JITTER_DIVISOR).abs() < 1e-6);
        assert_eq!(bright[0], 0.25);

        // Zero intensity lands near the dark bottom band.
        let dark = pencil_uv(0.25, 0.0, 0.0);
        assert!((dark[1] - PENCIL_V_SCALE).abs() < 1e-6);
    }

    #[test]
    fn test_paper_uv_shift() {
        let uv = paper_uv(0.5, 0.5, [0.3, 0.7]);
        assert!((uv[0] - (0.5 + 0.03)).abs() < 1e-6);
        assert!((uv[1] - (0.5 + 0.07)).abs() < 1e-6);
    }

    #[test]
    fn test_pencil_intensity_softens_lambert() {
        let n = Vector3::new(0.0, 1.0, 0.0);
        let pos = Vector3::new(0.0, 0.0, 0.0);
        let raw = lambert(n, light_dir(pos));
        let soft = pencil_intensity(n, pos);
        assert!(soft >= raw);
        assert!((soft * soft - raw).abs() < 1e-5);
    }
}
