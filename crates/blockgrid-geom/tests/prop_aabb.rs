use blockgrid_geom::{Aabb, Vec3};
use proptest::prelude::*;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn coord() -> impl Strategy<Value = f64> {
    -1.0e4f64..1.0e4
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn arb_box() -> impl Strategy<Value = Aabb> {
    (arb_vec3(), 0.01f64..4.0, 0.01f64..4.0, 0.01f64..4.0)
        .prop_map(|(min, w, h, d)| Aabb::new(min, min + Vec3::new(w, h, d)))
}

proptest! {
    // Midpoint translates with the box
    #[test]
    fn aabb_midpoint_translation(a in arb_box(), t in arb_vec3()) {
        let b = a.translated(t);
        let m = a.center() + t;
        let m2 = b.center();
        prop_assert!(approx(m.x, m2.x, 1e-6) && approx(m.y, m2.y, 1e-6) && approx(m.z, m2.z, 1e-6));
    }

    // Intersection is symmetric
    #[test]
    fn aabb_intersects_symmetric(a in arb_box(), b in arb_box()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    // Applying the push-out on a single axis separates overlapping boxes
    #[test]
    fn push_out_separates_on_x(
        x in -0.99f64..0.99,
        y in -0.5f64..0.5,
        z in -0.5f64..0.5,
    ) {
        let cell = Aabb::unit_cell(0, 0, 0);
        let body = Aabb::new(Vec3::new(x, y, z), Vec3::new(x + 0.8, y + 1.8, z + 0.8));
        prop_assume!(body.intersects(&cell));
        let side = if body.center().x < cell.center().x { 1 } else { -1 };
        let moved = body.translated(body.push_out(&cell, [side, 0, 0]));
        let overlap = moved.max.x.min(cell.max.x) - moved.min.x.max(cell.min.x);
        prop_assert!(overlap <= 1e-9);
    }
}
