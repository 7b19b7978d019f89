//! Winding-corrected triangle primitive.

use carve_geom::{Cmp, Vec3, float_cmp, tri_midpoint, tri_normal};

/// A triangle whose winding has been corrected against a reference
/// center: the face normal points away from the side the center is on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tri {
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
    pub normal: Vec3,
    pub midpoint: Vec3,
}

impl Tri {
    /// Build `(p1, p2, p3)` and flip once to `(p3, p2, p1)` when the
    /// normal is 90 degrees or more off the center-to-midpoint ray.
    pub fn new(p1: Vec3, p2: Vec3, p3: Vec3, center: Vec3) -> Self {
        let t = Self::raw(p1, p2, p3);
        if t.faces_center(center) {
            Self::raw(p3, p2, p1)
        } else {
            t
        }
    }

    fn raw(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self {
            p1,
            p2,
            p3,
            normal: tri_normal(p1, p2, p3),
            midpoint: tri_midpoint(p1, p2, p3),
        }
    }

    fn faces_center(&self, center: Vec3) -> bool {
        let outward = self.midpoint - center;
        let deg = outward.angle_to(self.normal).to_degrees();
        float_cmp(deg, Cmp::Ge, 90.0, 1e-3)
    }

    #[inline]
    pub fn points(&self) -> [Vec3; 3] {
        [self.p1, self.p2, self.p3]
    }
}
