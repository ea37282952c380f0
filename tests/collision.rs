use bhcollide::simulation::collision::{earliest_event, resolve_collisions, BoundaryHit, CollisionEvent, Wall};
use bhcollide::simulation::region::Region;
use bhcollide::simulation::states::{Body, DisplayTag, NVec2};

/// Build a moving disc
pub fn disc(x: [f64; 2], v: [f64; 2], m: f64, radius: f64) -> Body {
    Body::new(NVec2::new(x[0], x[1]), NVec2::new(v[0], v[1]), m, radius, DisplayTag::default())
}

fn momentum(bodies: &[&Body]) -> NVec2 {
    bodies.iter().map(|b| b.momentum()).sum()
}

fn energy(bodies: &[&Body]) -> f64 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

// ==================================================================================
// Body-body tests
// ==================================================================================

#[test]
fn touching_counts_as_colliding() {
    let a = disc([0.0, 0.0], [0.0, 0.0], 1.0, 1.0);
    let b = disc([2.0, 0.0], [0.0, 0.0], 1.0, 1.0);
    let c = disc([2.5, 0.0], [0.0, 0.0], 1.0, 1.0);

    assert!(a.collides_with_body(&b));
    assert!(!a.collides_with_body(&c));
}

#[test]
fn distance_and_relative_speed() {
    let a = disc([0.0, 0.0], [1.0, 1.0], 1.0, 0.0);
    let b = disc([3.0, 4.0], [4.0, 5.0], 1.0, 0.0);

    assert_eq!(a.distance_to(&b), 5.0);
    assert_eq!(a.relative_speed_to(&b), 5.0);
}

#[test]
fn elastic_bounce_conserves_momentum_and_energy() {
    let cases = [
        (disc([0.0, 0.0], [1.0, 0.0], 1.0, 1.0), disc([1.9, 0.0], [-1.0, 0.0], 1.0, 1.0)),
        (disc([0.0, 0.0], [2.0, 0.5], 3.0, 1.0), disc([1.2, 1.0], [-0.5, -1.0], 0.25, 0.8)),
        (disc([5.0, 5.0], [0.0, -3.0], 100.0, 2.0), disc([5.5, 2.0], [0.1, 4.0], 0.01, 1.5)),
        (disc([-1.0, 2.0], [0.3, 0.3], 7.5, 0.5), disc([-0.4, 2.3], [-2.0, 0.1], 2.5, 0.5)),
    ];

    for (mut a, mut b) in cases {
        let p0 = momentum(&[&a, &b]);
        let e0 = energy(&[&a, &b]);

        a.elastic_bounce(&mut b, 0.05);

        let p1 = momentum(&[&a, &b]);
        let e1 = energy(&[&a, &b]);
        assert!((p1 - p0).norm() <= 1e-12 * p0.norm().max(1.0), "momentum {:?} -> {:?}", p0, p1);
        assert!((e1 - e0).abs() <= 1e-12 * e0.max(1.0), "energy {} -> {}", e0, e1);
    }
}

#[test]
fn elastic_bounce_equal_masses_swap_velocities_head_on() {
    let mut a = disc([0.0, 0.0], [1.0, 0.0], 2.0, 1.0);
    let mut b = disc([2.0, 0.0], [-1.0, 0.0], 2.0, 1.0);

    a.elastic_bounce(&mut b, 0.5);

    assert_eq!(a.v, NVec2::new(-1.0, 0.0));
    assert_eq!(b.v, NVec2::new(1.0, 0.0));
    // moved forward with the new velocities
    assert_eq!(a.x, NVec2::new(-0.5, 0.0));
    assert_eq!(b.x, NVec2::new(2.5, 0.0));
}

#[test]
fn elastic_bounce_keeps_tangential_velocity() {
    let mut a = disc([0.0, 0.0], [1.0, 3.0], 1.0, 1.0);
    let mut b = disc([2.0, 0.0], [0.0, -2.0], 1.0, 1.0);

    a.elastic_bounce(&mut b, 0.0);

    assert_eq!(a.v, NVec2::new(0.0, 3.0));
    assert_eq!(b.v, NVec2::new(1.0, -2.0));
}

#[test]
fn contact_time_from_overlap() {
    let a = disc([0.0, 0.0], [1.0, 0.0], 1.0, 1.0);
    let b = disc([1.5, 0.0], [-1.0, 0.0], 1.0, 1.0);

    // overlap 0.5 at relative speed 2
    let t = a.time_since_contact(&b).unwrap();
    assert!((t - 0.25).abs() < 1e-15);
}

#[test]
fn zero_closing_speed_is_no_collision() {
    // overlapping but moving together
    let a = disc([0.0, 0.0], [1.0, 1.0], 1.0, 1.0);
    let b = disc([1.5, 0.0], [1.0, 1.0], 1.0, 1.0);
    assert!(a.collides_with_body(&b));
    assert_eq!(a.time_since_contact(&b), None);

    // overlapping and sliding sideways
    let c = disc([1.5, 0.0], [1.0, -4.0], 1.0, 1.0);
    assert_eq!(a.time_since_contact(&c), None);
}

#[test]
fn separating_overlap_is_left_alone() {
    let a = disc([0.0, 0.0], [-1.0, 0.0], 1.0, 1.0);
    let b = disc([1.5, 0.0], [1.0, 0.0], 1.0, 1.0);
    assert_eq!(a.time_since_contact(&b), None);
}

// ==================================================================================
// Boundary tests
// ==================================================================================

#[test]
fn wall_reflection_flips_one_component() {
    let mut a = disc([5.0, 5.0], [2.0, -3.0], 1.0, 1.0);
    a.reflect_off_vertical_wall(0.0);
    assert_eq!(a.v, NVec2::new(-2.0, -3.0));

    let mut b = disc([5.0, 5.0], [2.0, -3.0], 1.0, 1.0);
    b.reflect_off_horizontal_wall(0.0);
    assert_eq!(b.v, NVec2::new(2.0, 3.0));
}

#[test]
fn boundary_overlap_detection() {
    let region = Region::from_origin(10.0);

    assert!(!disc([5.0, 5.0], [0.0, 0.0], 1.0, 1.0).collides_with_boundary(&region));
    assert!(!disc([9.0, 1.0], [0.0, 0.0], 1.0, 1.0).collides_with_boundary(&region));
    assert!(disc([9.5, 5.0], [0.0, 0.0], 1.0, 1.0).collides_with_boundary(&region));
    assert!(disc([5.0, 0.5], [0.0, 0.0], 1.0, 1.0).collides_with_boundary(&region));
    assert!(disc([-3.0, 5.0], [0.0, 0.0], 1.0, 0.0).collides_with_boundary(&region));
}

#[test]
fn right_wall_hit_is_vertical() {
    let region = Region::from_origin(10.0);
    let mut a = disc([9.5, 5.0], [2.0, 0.0], 1.0, 1.0);

    let hit = a.time_to_boundary_collision(&region).unwrap();
    assert_eq!(hit.wall(), Wall::Vertical);
    assert!((hit.time() - 0.25).abs() < 1e-15);

    a.resolve_boundary_hit(&hit);
    assert_eq!(a.v, NVec2::new(-2.0, 0.0));
    assert!((a.x.x - 8.5).abs() < 1e-12);
    assert_eq!(a.x.y, 5.0);
}

#[test]
fn bottom_wall_hit_is_horizontal() {
    let region = Region::from_origin(10.0);
    let mut a = disc([4.0, 0.25], [1.0, -0.5], 1.0, 0.5);

    let hit = a.time_to_boundary_collision(&region).unwrap();
    assert_eq!(hit.wall(), Wall::Horizontal);
    assert!((hit.time() - 0.5).abs() < 1e-15);

    a.resolve_boundary_hit(&hit);
    assert_eq!(a.v, NVec2::new(1.0, 0.5));
    assert!((a.x.y - 0.75).abs() < 1e-12);
    assert!((a.x.x - 4.0).abs() < 1e-12);
}

#[test]
fn corner_hit_reflects_both_axes() {
    let region = Region::from_origin(10.0);
    let mut a = disc([9.8, 9.6], [1.0, 2.0], 1.0, 0.5);

    let hit = a.time_to_boundary_collision(&region).unwrap();
    assert_eq!(hit.wall(), Wall::Both);
    // x touched 0.3 ago, y touched 0.05 ago
    assert!((hit.time() - 0.3).abs() < 1e-12);

    a.resolve_boundary_hit(&hit);
    assert_eq!(a.v, NVec2::new(-1.0, -2.0));
    assert!((a.x.x - 9.2).abs() < 1e-12);
    assert!((a.x.y - 9.4).abs() < 1e-12);
}

#[test]
fn boundary_hit_needs_at_least_one_axis() {
    assert_eq!(BoundaryHit::from_axes(None, None), None);

    let v = BoundaryHit::from_axes(Some(0.2), None).unwrap();
    assert_eq!(v.wall(), Wall::Vertical);
    assert_eq!((v.vertical(), v.horizontal()), (Some(0.2), None));

    let h = BoundaryHit::from_axes(None, Some(0.4)).unwrap();
    assert_eq!(h.wall(), Wall::Horizontal);
    assert_eq!((h.vertical(), h.horizontal()), (None, Some(0.4)));

    let both = BoundaryHit::from_axes(Some(0.2), Some(0.4)).unwrap();
    assert_eq!(both.wall(), Wall::Both);
    assert_eq!(both.time(), 0.4);
}

#[test]
fn body_heading_inward_needs_no_reflection() {
    let region = Region::from_origin(10.0);
    let a = disc([9.5, 5.0], [-2.0, 0.0], 1.0, 1.0);

    assert!(a.collides_with_boundary(&region));
    assert_eq!(a.time_to_boundary_collision(&region), None);
}

// ==================================================================================
// Resolution pass tests
// ==================================================================================

#[test]
fn earliest_event_prefers_longest_rewind() {
    let region = Region::new(0.0, 0.0, 100.0);
    let bodies = vec![
        disc([0.0, 0.0], [0.0, 0.0], 1.0, 1.0),
        disc([1.9, 0.0], [-1.0, 0.0], 1.0, 1.0), // touched 0.1 ago
        disc([0.0, 1.5], [0.0, -1.0], 1.0, 1.0), // touched 0.5 ago
    ];

    match earliest_event(&bodies, 0, &region) {
        Some(CollisionEvent::Body { other, time }) => {
            assert_eq!(other, 2);
            assert!((time - 0.5).abs() < 1e-12);
        }
        other => panic!("expected a body event, got {:?}", other),
    }

    // body 2 has no later partner and sits inside the box
    assert_eq!(earliest_event(&bodies, 2, &region), None);
}

#[test]
fn earliest_event_can_be_the_wall() {
    let region = Region::from_origin(10.0);
    let bodies = vec![
        disc([10.0, 5.0], [4.0, 0.0], 1.0, 1.0), // wall touched 0.25 ago
        disc([8.1, 5.0], [6.0, 0.0], 1.0, 1.0), // catching up, touched 0.05 ago
    ];

    match earliest_event(&bodies, 0, &region) {
        Some(CollisionEvent::Boundary(hit)) => assert_eq!(hit.wall(), Wall::Vertical),
        other => panic!("expected a boundary event, got {:?}", other),
    }
}

#[test]
fn resolve_pass_bounces_pairs_and_walls() {
    let region = Region::new(0.0, 0.0, 20.0);
    let mut bodies = vec![
        disc([0.0, 0.0], [1.0, 0.0], 1.0, 1.0),
        disc([1.8, 0.0], [-1.0, 0.0], 1.0, 1.0),
        disc([5.0, 9.5], [0.0, 2.0], 1.0, 1.0),
        disc([-5.0, -5.0], [0.0, 0.0], 1.0, 1.0),
    ];
    let e0: f64 = bodies.iter().map(Body::kinetic_energy).sum();

    let resolved = resolve_collisions(&mut bodies, &region);

    assert_eq!(resolved, 2);
    assert_eq!(bodies[0].v, NVec2::new(-1.0, 0.0));
    assert_eq!(bodies[1].v, NVec2::new(1.0, 0.0));
    assert_eq!(bodies[2].v, NVec2::new(0.0, -2.0));
    assert_eq!(bodies[3].v, NVec2::zeros());

    // after rewind and replay the pair ends up apart
    assert!(bodies[0].distance_to(&bodies[1]) > 2.0);

    let e1: f64 = bodies.iter().map(Body::kinetic_energy).sum();
    assert!((e1 - e0).abs() < 1e-12);
}
