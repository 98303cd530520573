/// Pointer rays, block hit tests and drag planes
use nalgebra::{Point3, Vector3};

use crate::block::{Block, BlockId};

const PARALLEL_EPSILON: f32 = 1e-6;

/// Half-line from `origin` along a unit `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// `direction` is normalized here
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn centered(center: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Distance along `ray` to the first surface hit, slab method.
    /// A ray starting inside the box hits at `t = 0`.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut t_near = 0.0f32;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let direction = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction.abs() < PARALLEL_EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - origin) / direction;
            let t1 = (hi - origin) / direction;
            let (t0, t1) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }

        Some(t_near)
    }
}

/// Plane a dragged block follows the pointer across
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl DragPlane {
    pub fn new(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Plane through `point` facing back along the view direction
    pub fn facing_camera(point: Point3<f32>, view_direction: Vector3<f32>) -> Self {
        Self::new(point, -view_direction)
    }

    /// Where `ray` crosses the plane, if in front of the ray origin
    pub fn intersect(&self, ray: &Ray) -> Option<Point3<f32>> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin).dot(&self.normal) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.at(t))
    }
}

/// A block under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub block: BlockId,
    pub point: Point3<f32>,
    pub distance: f32,
}

/// Nearest block along `ray`. On equal distance the earlier block wins.
pub fn pick_block<'a, I>(blocks: I, ray: &Ray) -> Option<Hit>
where
    I: IntoIterator<Item = &'a Block>,
{
    blocks
        .into_iter()
        .filter_map(|block| {
            let distance = block.bounds().intersect(ray)?;
            Some(Hit {
                block: block.id,
                point: ray.at(distance),
                distance,
            })
        })
        .fold(None, |best: Option<Hit>, hit| match best {
            Some(best) if best.distance <= hit.distance => Some(best),
            _ => Some(hit),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Extent, VisualTag};

    fn block(id: u32, position: Point3<f32>) -> Block {
        Block::new(
            BlockId(id),
            Extent::new(2).unwrap(),
            VisualTag::rgb(1, 2, 3),
            position,
        )
    }

    #[test]
    fn test_aabb_hit_and_miss() {
        let aabb = Aabb::centered(Point3::origin(), Vector3::new(0.5, 0.5, 0.5));

        let towards = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::z());
        assert_eq!(aabb.intersect(&towards), Some(4.5));

        let away = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::z());
        assert_eq!(aabb.intersect(&away), None);

        let beside = Ray::new(Point3::new(2.0, 0.0, 5.0), -Vector3::z());
        assert_eq!(aabb.intersect(&beside), None);

        let inside = Ray::new(Point3::new(0.1, 0.1, 0.1), Vector3::x());
        assert_eq!(aabb.intersect(&inside), Some(0.0));
    }

    #[test]
    fn test_pick_nearest_block() {
        let blocks = vec![
            block(0, Point3::new(0.0, 0.0, -6.0)),
            block(1, Point3::new(0.0, 0.0, -2.0)),
            block(2, Point3::new(5.0, 0.0, -2.0)),
        ];
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vector3::z());

        let hit = pick_block(&blocks, &ray).unwrap();
        assert_eq!(hit.block, BlockId(1));
        // extent 2 is one unit deep, so the front face sits at z = -1.5
        assert!((hit.point.z + 1.5).abs() < 1e-5);

        let miss = Ray::new(Point3::new(0.0, 10.0, 5.0), -Vector3::z());
        assert_eq!(pick_block(&blocks, &miss), None);
    }

    #[test]
    fn test_drag_plane_intersection() {
        let plane = DragPlane::facing_camera(Point3::new(0.0, 1.0, 0.0), -Vector3::z());
        let ray = Ray::new(Point3::new(2.0, 3.0, 10.0), -Vector3::z());
        assert_eq!(plane.intersect(&ray), Some(Point3::new(2.0, 3.0, 0.0)));

        let parallel = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::x());
        assert_eq!(plane.intersect(&parallel), None);

        let behind = Ray::new(Point3::new(0.0, 0.0, -10.0), -Vector3::z());
        assert_eq!(plane.intersect(&behind), None);
    }
}
