use carve_geom::{Cmp, Vec3, float_cmp, sort_points, tri_midpoint, tri_normal};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn bounded_nonzero_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded_nonzero", |v| {
        v.is_finite() && {
            let a = v.abs();
            a >= 1e-3 && a <= 1e3
        }
    })
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_nondegenerate_vec3() -> impl Strategy<Value = Vec3> {
    (
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
        bounded_nonzero_f32(),
    )
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Angle symmetry: a.angle_to(b) == b.angle_to(a)
    #[test]
    fn vec3_angle_symmetric(
        a in arb_nondegenerate_vec3(),
        b in arb_nondegenerate_vec3(),
    ) {
        prop_assert!(approx(a.angle_to(b), b.angle_to(a), 1e-3));
    }

    // Angle range: 0 <= angle <= pi
    #[test]
    fn vec3_angle_in_range(
        a in arb_nondegenerate_vec3(),
        b in arb_nondegenerate_vec3(),
    ) {
        let t = a.angle_to(b);
        prop_assert!(t >= 0.0 && t <= core::f32::consts::PI + 1e-6);
    }

    // Scaling by a positive factor preserves the angle
    #[test]
    fn vec3_angle_scale_invariant(
        a in arb_nondegenerate_vec3(),
        b in arb_nondegenerate_vec3(),
        k in bounded_nonzero_f32(),
    ) {
        prop_assume!(k > 0.0);
        // acos is ill-conditioned near parallel vectors
        prop_assert!(approx(a.angle_to(b), (a * k).angle_to(b), 1e-2));
    }

    // Distance symmetry and identity
    #[test]
    fn vec3_distance_metric(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        prop_assert!(approx(a.distance_to(b), b.distance_to(a), 1e-3));
        prop_assert!(approx(a.distance_to(a), 0.0, 1e-6));
    }

    // Reflection through a pivot is an involution
    #[test]
    fn vec3_reflect_involution(
        a in arb_vec3(),
        p in arb_vec3(),
    ) {
        let r = a.reflect_through(p).reflect_through(p);
        let tol = 1e-4 * (1.0 + a.length().max(p.length()));
        prop_assert!(vapprox(r, a, tol));
    }

    // The midpoint sits at equal distance from both endpoints
    #[test]
    fn vec3_midpoint_equidistant(
        a in arb_vec3(),
        b in arb_vec3(),
    ) {
        let m = a.midpoint(b);
        let d = a.distance_to(b);
        prop_assert!(approx(m.distance_to(a), m.distance_to(b), 1e-6 + 1e-4 * d));
    }

    // float_cmp trichotomy under a tolerance: exactly one of <, =, > holds
    #[test]
    fn float_cmp_trichotomy(
        a in bounded_f32(),
        b in bounded_f32(),
    ) {
        let eps = 1e-6;
        let eq = float_cmp(a, Cmp::Eq, b, eps);
        let gt = !eq && float_cmp(a, Cmp::Gt, b, eps);
        let lt = !eq && float_cmp(a, Cmp::Lt, b, eps);
        prop_assert_eq!(u8::from(eq) + u8::from(gt) + u8::from(lt), 1);
    }

    // sort_points output is ordered and permutation-invariant on the head
    #[test]
    fn sort_points_canonical(
        a in arb_vec3(),
        b in arb_vec3(),
        c in arb_vec3(),
    ) {
        let mut fwd = [a, b, c];
        let mut rev = [c, b, a];
        sort_points(&mut fwd);
        sort_points(&mut rev);
        prop_assert_eq!(fwd, rev);
    }

    // The triangle normal is orthogonal to both triangle edges
    #[test]
    fn tri_normal_orthogonal_to_edges(
        a in arb_nondegenerate_vec3(),
        b in arb_nondegenerate_vec3(),
        c in arb_nondegenerate_vec3(),
    ) {
        let n = tri_normal(a, b, c);
        prop_assume!(n.length() > 0.5);
        let e1 = (c - b).normalized();
        let e2 = (a - b).normalized();
        prop_assert!(approx(n.dot(e1), 0.0, 1e-2));
        prop_assert!(approx(n.dot(e2), 0.0, 1e-2));
    }

    // The centroid is the average of the corners
    #[test]
    fn tri_midpoint_is_average(
        a in arb_vec3(),
        b in arb_vec3(),
        c in arb_vec3(),
    ) {
        let m = tri_midpoint(a, b, c);
        let s = a + b + c;
        prop_assert!(vapprox(m * 3.0, s, 1e-2 + 1e-4 * s.length()));
    }
}
