//! Spatial queries shared by enemy bullets, player bullets and enemy movement.
//!
//! Everything here is pure geometry over the [`WallSet`]: no ECS access, no allocation
//! in the hot paths. Walls are axis-aligned boxes (maze cells or thin partitions).
//!
//! Bullets are tested with a *swept* segment from their previous to their current
//! position. At 20 u/s and 30 ticks/s a bullet moves ~0.67 units per tick, which is
//! more than the thickness of a thin wall; a point test at the current position
//! would let it tunnel straight through.

use bevy::prelude::*;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Does a vertical cylinder of `radius` around `center` overlap this box
    /// on the ground plane (XZ)?
    pub fn overlaps_circle_xz(&self, center: Vec3, radius: f32) -> bool {
        let cx = center.x.clamp(self.min.x, self.max.x);
        let cz = center.z.clamp(self.min.z, self.max.z);
        let dx = center.x - cx;
        let dz = center.z - cz;
        dx * dx + dz * dz < radius * radius
    }

    /// Smallest ground-plane translation that moves a circle of `radius` around
    /// `center` clear of this box, plus `margin`. `None` when they do not overlap.
    pub fn circle_exit_xz(&self, center: Vec3, radius: f32, margin: f32) -> Option<Vec3> {
        let p = Vec2::new(center.x, center.z);
        let closest = Vec2::new(
            center.x.clamp(self.min.x, self.max.x),
            center.z.clamp(self.min.z, self.max.z),
        );
        let d = p - closest;
        let dist_sq = d.length_squared();
        if dist_sq >= radius * radius {
            return None;
        }

        let (normal, depth) = if dist_sq > 1e-12 {
            let dist = dist_sq.sqrt();
            (d / dist, radius - dist)
        } else {
            // Center inside the box: leave through the nearest face.
            [
                (Vec2::NEG_X, p.x - self.min.x),
                (Vec2::X, self.max.x - p.x),
                (Vec2::NEG_Y, p.y - self.min.z),
                (Vec2::Y, self.max.z - p.y),
            ]
            .into_iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, inside)| (n, inside + radius))?
        };

        let push = normal * (depth + margin);
        Some(Vec3::new(push.x, 0.0, push.y))
    }

    /// Slab test for the segment `from -> to`.
    ///
    /// Returns the entry parameter `t` in `[0, 1]` and the outward normal of the
    /// face that was crossed. A segment starting inside the box hits at `t = 0`
    /// with a normal opposing the travel direction.
    pub fn segment_entry(&self, from: Vec3, to: Vec3) -> Option<(f32, Vec3)> {
        let d = to - from;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = from[axis];
            let di = d[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if di.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / di;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            if t1 > t_min {
                t_min = t1;
                let mut n = Vec3::ZERO;
                n[axis] = -di.signum();
                normal = n;
            }
            t_max = t_max.min(t2);

            if t_min > t_max {
                return None;
            }
        }

        if normal == Vec3::ZERO {
            normal = -d.normalize_or(Vec3::Y);
        }
        Some((t_min, normal))
    }
}

/// Stable handle for a wall inside a [`WallSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub id: WallId,
    pub bounds: Aabb,
}

/// Static collidable surfaces for the current level.
///
/// Shared read-only by every bullet and enemy during a tick. Walls are added and
/// removed only while the scene is being built or torn down.
#[derive(Debug, Clone, Default)]
pub struct WallSet {
    walls: Vec<Wall>,
    next_id: u32,
}

impl WallSet {
    pub fn add(&mut self, bounds: Aabb) -> WallId {
        let id = WallId(self.next_id);
        self.next_id += 1;
        self.walls.push(Wall { id, bounds });
        id
    }

    /// Returns `false` if the wall was not in the set.
    pub fn remove(&mut self, id: WallId) -> bool {
        let before = self.walls.len();
        self.walls.retain(|w| w.id != id);
        self.walls.len() != before
    }

    pub fn clear(&mut self) {
        self.walls.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.walls.iter()
    }
}

/// First wall crossed by a swept segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub wall: WallId,
    /// Fraction of the segment travelled before contact.
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Earliest wall intersection along `from -> to`, if any.
pub fn sweep_walls(walls: &WallSet, from: Vec3, to: Vec3) -> Option<WallHit> {
    let mut best: Option<WallHit> = None;
    for wall in walls.iter() {
        let Some((t, normal)) = wall.bounds.segment_entry(from, to) else {
            continue;
        };
        if best.is_none_or(|b| t < b.t) {
            best = Some(WallHit {
                wall: wall.id,
                t,
                point: from.lerp(to, t),
                normal,
            });
        }
    }
    best
}

/// Squared distance from `p` to the segment `a -> b`.
pub fn segment_point_distance_sq(a: Vec3, b: Vec3, p: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

/// Sphere hit test over the path travelled this tick.
#[inline]
pub fn sphere_hit(from: Vec3, to: Vec3, center: Vec3, radius: f32) -> bool {
    segment_point_distance_sq(from, to, center) <= radius * radius
}

/// Horizontal distance on the ground plane.
#[inline]
pub fn distance_xz(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Push a body out of every wall it overlaps.
///
/// Positional correction, not a physical solve. Each overlapping wall moves the body
/// along the wall-to-body direction from the nearest point on the box (the face
/// normal, or a corner diagonal), far enough to clear it plus `epsilon`. Long merged
/// boxes therefore push straight out of their faces, never along their length.
pub fn push_out_of_walls(position: Vec3, radius: f32, walls: &WallSet, epsilon: f32) -> Vec3 {
    let mut out = position;
    for wall in walls.iter() {
        if let Some(push) = wall.bounds.circle_exit_xz(out, radius, epsilon) {
            out += push;
        }
    }
    out
}
