use std::collections::{BTreeSet, HashMap};

use glam::Vec3;

const PHI: f32 = 1.618_034; // (1 + sqrt 5) / 2

const ICOSAHEDRON_VERTICES: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Indexed triangle mesh whose vertices all sit on a sphere.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl Polyhedron {
    /// Icosahedron with every face split into `(detail + 1)^2` triangles and
    /// all points pushed out to `radius`.
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let cols = detail + 1;
        let mut builder = MeshBuilder::new(radius, cols);

        for [a, b, c] in ICOSAHEDRON_FACES {
            // Triangular grid across the face, row i has cols - i + 1 points.
            // Point (i, j) weighs c by i, b by j and a by the rest.
            let grid: Vec<Vec<LatticePoint>> = (0..=cols)
                .map(|i| {
                    let rows = cols - i;
                    (0..=rows)
                        .map(|j| LatticePoint::new([(a, rows - j), (b, j), (c, i)]))
                        .collect()
                })
                .collect();

            for i in 0..cols as usize {
                let rows = cols as usize - i;
                for j in 0..(2 * rows - 1) {
                    let k = j / 2;
                    let tri = if j % 2 == 0 {
                        [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                    } else {
                        [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                    };
                    builder.push_triangle(tri);
                }
            }
        }

        builder.finish()
    }

    /// Every distinct edge once, as ascending index pairs.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }
}

/// Flattens edges into a line-list index buffer.
pub fn line_list(edges: &[[u32; 2]]) -> Vec<u32> {
    edges.iter().flatten().copied().collect()
}

/// A subdivision point named by its integer weights over the base vertices.
///
/// Faces sharing an edge produce the same key for the same point, so welding
/// is exact at any detail level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LatticePoint([(usize, u32); 3]);

impl LatticePoint {
    fn new(mut weights: [(usize, u32); 3]) -> Self {
        for entry in &mut weights {
            if entry.1 == 0 {
                *entry = (usize::MAX, 0);
            }
        }
        weights.sort_unstable();
        Self(weights)
    }

    fn position(&self, cols: u32) -> Vec3 {
        let sum = self
            .0
            .iter()
            .filter(|(_, weight)| *weight > 0)
            .fold(Vec3::ZERO, |acc, &(base, weight)| {
                acc + Vec3::from(ICOSAHEDRON_VERTICES[base]) * weight as f32
            });
        sum / cols as f32
    }
}

struct MeshBuilder {
    radius: f32,
    cols: u32,
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    lookup: HashMap<LatticePoint, u32>,
}

impl MeshBuilder {
    fn new(radius: f32, cols: u32) -> Self {
        Self {
            radius,
            cols,
            vertices: Vec::new(),
            faces: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    fn push_triangle(&mut self, points: [LatticePoint; 3]) {
        let face = points.map(|p| self.vertex(p));
        self.faces.push(face);
    }

    fn vertex(&mut self, point: LatticePoint) -> u32 {
        if let Some(&index) = self.lookup.get(&point) {
            return index;
        }

        let index = self.vertices.len() as u32;
        self.vertices.push(point.position(self.cols).normalize() * self.radius);
        self.lookup.insert(point, index);
        index
    }

    fn finish(self) -> Polyhedron {
        Polyhedron {
            vertices: self.vertices,
            faces: self.faces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_counts() {
        let ico = Polyhedron::icosahedron(1.0, 0);
        assert_eq!(ico.vertices.len(), 12);
        assert_eq!(ico.faces.len(), 20);
        assert_eq!(ico.edges().len(), 30);
    }

    #[test]
    fn detail_one_counts() {
        let ico = Polyhedron::icosahedron(2.8, 1);
        assert_eq!(ico.vertices.len(), 42);
        assert_eq!(ico.faces.len(), 80);
        assert_eq!(ico.edges().len(), 120);
    }

    #[test]
    fn vertices_sit_on_the_sphere() {
        let ico = Polyhedron::icosahedron(2.8, 1);
        for v in &ico.vertices {
            assert!((v.length() - 2.8).abs() < 1e-4, "vertex {v:?} off sphere");
        }
    }

    #[test]
    fn counts_hold_at_every_detail_level() {
        for detail in 0..12u32 {
            let n = (detail as usize + 1).pow(2);
            let ico = Polyhedron::icosahedron(2.8, detail);
            assert_eq!(ico.vertices.len(), 10 * n + 2, "vertices at detail {detail}");
            assert_eq!(ico.faces.len(), 20 * n, "faces at detail {detail}");
            assert_eq!(ico.edges().len(), 30 * n, "edges at detail {detail}");
        }
    }

    #[test]
    fn line_list_keeps_indices_past_u16() {
        let ico = Polyhedron::icosahedron(1.0, 81);
        let indices = line_list(&ico.edges());
        let max = indices.iter().copied().max().unwrap_or(0);
        assert!(max > u16::MAX as u32);
        assert_eq!(max as usize, ico.vertices.len() - 1);
        assert_eq!(indices.len(), 2 * 30 * 82 * 82);
    }

    #[test]
    fn faces_are_non_degenerate() {
        let ico = Polyhedron::icosahedron(2.8, 2);
        assert_eq!(ico.faces.len(), 20 * 9);
        for [a, b, c] in &ico.faces {
            assert!(a != b && b != c && a != c);
        }
    }
}
