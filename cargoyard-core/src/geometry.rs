/// Geometry primitives for 3D rendering
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a planar quad as two triangles. Corners wind counter-clockwise
    /// when seen from the side `normal` points to.
    pub fn add_quad(&mut self, corners: [Point3<f32>; 4], normal: Vector3<f32>) {
        let [a, b, c, d] = corners.map(|p| Vertex::new(p, normal));
        self.add_triangle(Triangle::new(a, b, c));
        self.add_triangle(Triangle::new(a, c, d));
    }

    /// Axis-aligned box of the given size, centred on the origin
    pub fn cuboid(size: Vector3<f32>) -> Self {
        let (x, y, z) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);
        let p = Point3::new;
        let mut mesh = Self::with_capacity(12);

        // Front face
        mesh.add_quad(
            [p(-x, -y, z), p(x, -y, z), p(x, y, z), p(-x, y, z)],
            Vector3::z(),
        );
        // Back face
        mesh.add_quad(
            [p(-x, -y, -z), p(-x, y, -z), p(x, y, -z), p(x, -y, -z)],
            -Vector3::z(),
        );
        // Top face
        mesh.add_quad(
            [p(-x, y, -z), p(-x, y, z), p(x, y, z), p(x, y, -z)],
            Vector3::y(),
        );
        // Bottom face
        mesh.add_quad(
            [p(-x, -y, -z), p(x, -y, -z), p(x, -y, z), p(-x, -y, z)],
            -Vector3::y(),
        );
        // Right face
        mesh.add_quad(
            [p(x, -y, -z), p(x, y, -z), p(x, y, z), p(x, -y, z)],
            Vector3::x(),
        );
        // Left face
        mesh.add_quad(
            [p(-x, -y, -z), p(-x, -y, z), p(-x, y, z), p(-x, y, -z)],
            -Vector3::x(),
        );

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
