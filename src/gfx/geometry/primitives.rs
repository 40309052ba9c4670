//! # Primitive Shape Generation

use super::GeometryData;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // Counter-clockwise seen from outside
            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Starfield shape: how many stars and the shell they are scattered in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldParams {
    pub count: u32,
    /// Inner radius of the shell
    pub radius: f32,
    /// Shell thickness
    pub depth: f32,
    /// Half-size of each star
    pub star_size: f32,
    pub seed: u64,
}

impl Default for StarfieldParams {
    fn default() -> Self {
        Self {
            count: 5000,
            radius: 100.0,
            depth: 50.0,
            star_size: 0.15,
            seed: 0x5eed,
        }
    }
}

const OCTAHEDRON_CORNERS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

#[rustfmt::skip]
const OCTAHEDRON_FACES: [u32; 24] = [
    0, 2, 4,  4, 2, 1,  1, 2, 5,  5, 2, 0,
    4, 3, 0,  1, 3, 4,  5, 3, 1,  0, 3, 5,
];

/// Scatters small octahedra through a spherical shell and merges them into one mesh
///
/// Directions are uniform on the sphere; the distance is `radius + u * depth`. The same
/// seed always produces the same field.
pub fn generate_starfield(params: StarfieldParams) -> GeometryData {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut data = GeometryData::new();
    data.vertices.reserve(params.count as usize * OCTAHEDRON_CORNERS.len());
    data.indices.reserve(params.count as usize * OCTAHEDRON_FACES.len());

    for _ in 0..params.count {
        let z: f32 = rng.random_range(-1.0..=1.0);
        let phi: f32 = rng.random_range(0.0..2.0 * PI);
        let ring = (1.0 - z * z).max(0.0).sqrt();
        let direction = [ring * phi.cos(), z, ring * phi.sin()];
        let distance = params.radius + rng.random::<f32>() * params.depth;

        let base = data.vertices.len() as u32;
        for corner in OCTAHEDRON_CORNERS {
            data.vertices.push([
                direction[0] * distance + corner[0] * params.star_size,
                direction[1] * distance + corner[1] * params.star_size,
                direction[2] * distance + corner[2] * params.star_size,
            ]);
            data.normals.push(corner);
        }
        data.indices
            .extend(OCTAHEDRON_FACES.iter().map(|index| base + index));
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
    }

    #[test]
    fn test_sphere_vertices_are_unit_length() {
        let sphere = generate_sphere(12, 8);
        for [x, y, z] in &sphere.vertices {
            let length = (x * x + y * y + z * z).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = generate_sphere(16, 8);
        for triangle in sphere.indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|k| sphere.vertices[triangle[k] as usize]);
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let normal = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centroid = [a[0] + b[0] + c[0], a[1] + b[1] + c[1], a[2] + b[2] + c[2]];
            let facing = normal[0] * centroid[0] + normal[1] * centroid[1] + normal[2] * centroid[2];
            // Degenerate pole triangles have zero area
            assert!(facing >= -1e-6);
        }
    }

    #[test]
    fn test_starfield_stays_in_shell() {
        let params = StarfieldParams {
            count: 200,
            ..StarfieldParams::default()
        };
        let stars = generate_starfield(params);
        assert_eq!(stars.vertex_count(), 200 * 6);
        assert_eq!(stars.triangle_count(), 200 * 8);

        let outer = params.radius + params.depth + params.star_size;
        let inner = params.radius - params.star_size;
        for [x, y, z] in &stars.vertices {
            let distance = (x * x + y * y + z * z).sqrt();
            assert!(distance >= inner - 1e-3 && distance <= outer + 1e-3);
        }
        assert!(stars.indices.iter().all(|&i| (i as usize) < stars.vertex_count()));
    }

    #[test]
    fn test_starfield_is_deterministic_per_seed() {
        let params = StarfieldParams {
            count: 10,
            ..StarfieldParams::default()
        };
        assert_eq!(
            generate_starfield(params).vertices,
            generate_starfield(params).vertices
        );
        let other = generate_starfield(StarfieldParams { seed: 7, ..params });
        assert_ne!(generate_starfield(params).vertices, other.vertices);
    }
}
