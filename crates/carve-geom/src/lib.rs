//! Minimal geometry types for the meshing crates (no renderer dependency).
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn normalized(self) -> Vec3 {
        let len = self.length();
        if len > 0.0 { self / len } else { self }
    }

    #[inline]
    pub fn distance_to(self, rhs: Vec3) -> f32 {
        (rhs - self).length()
    }

    /// Angle to `rhs` in radians, clamped acos of the normalized dot.
    /// Zero-length input yields 0 rather than NaN.
    #[inline]
    pub fn angle_to(self, rhs: Vec3) -> f32 {
        let denom = (self.dot(self) * rhs.dot(rhs)).sqrt();
        if denom <= 0.0 {
            return 0.0;
        }
        (self.dot(rhs) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Midpoint of the segment to `rhs`.
    #[inline]
    pub fn midpoint(self, rhs: Vec3) -> Vec3 {
        (self + rhs) * 0.5
    }

    /// Reflection of `self` through `pivot` (the point-symmetric image).
    #[inline]
    pub fn reflect_through(self, pivot: Vec3) -> Vec3 {
        pivot * 2.0 - self
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Comparison operator for tolerance-aware float checks. Equality always
/// takes an explicit epsilon; the compound operators are composed from
/// the strict ones plus equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cmp {
    Gt,
    Lt,
    Eq,
    Ge,
    Le,
    Ne,
}

/// Compare `a` against `b` under `op` with tolerance `eps`.
/// `Eq` holds when `|a - b| < eps`.
#[inline]
pub fn float_cmp(a: f32, op: Cmp, b: f32, eps: f32) -> bool {
    match op {
        Cmp::Gt => a > b,
        Cmp::Lt => a < b,
        Cmp::Eq => (a - b).abs() < eps,
        Cmp::Ge => a > b || float_cmp(a, Cmp::Eq, b, eps),
        Cmp::Le => a < b || float_cmp(a, Cmp::Eq, b, eps),
        Cmp::Ne => !float_cmp(a, Cmp::Eq, b, eps),
    }
}

/// Sort points ascending by x, then y, then z. Canonical order for
/// order-independent face and edge keys.
pub fn sort_points(pts: &mut [Vec3]) {
    pts.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
}

/// Face normal of the triangle `(a, b, c)`: normalized `(c-b) × (a-b)`.
#[inline]
pub fn tri_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - b).cross(a - b).normalized()
}

/// Centroid of the triangle `(a, b, c)`.
#[inline]
pub fn tri_midpoint(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a + b + c) / 3.0
}
