//! Swept collision properties.
//! A moving box must never end a tick overlapping level geometry, however
//! fast it travels or however thin the geometry is.
use approx::assert_relative_eq;
use flipside::body::{KinematicBody, WallContact};
use flipside::resolver::move_and_collide;
use flipside::{Aabb, CollisionWorld, GravityDirection, PlatformStyle, SurfaceTag};
use glam::{DVec2, IVec2};
use rstest::rstest;

fn world_with(collider: Aabb) -> CollisionWorld {
    CollisionWorld::new(
        Aabb::new(-2000, -2000, 6000, 6000),
        40,
        [(collider, SurfaceTag::Normal, PlatformStyle::Gray)],
    )
}

fn assert_clear(body: &KinematicBody, world: &CollisionWorld) {
    assert!(
        !world.any_overlap(&body.aabb()),
        "body {:?} overlaps level geometry",
        body.aabb()
    );
}

#[rstest]
fn vertical_sweep_never_tunnels(
    #[values(1, 4, 40)] thickness: i32,
    #[values(5.0, 29.0, 30.0, 31.0, 75.0, 400.0)] speed: f64,
    #[values(GravityDirection::Down, GravityDirection::Up)] gravity: GravityDirection,
) {
    let world = world_with(Aabb::new(-100, 0, 300, thickness));
    let sign = gravity.sign();
    let start_y = if sign > 0.0 { -32 } else { thickness + 2 };
    let mut body = KinematicBody::new(IVec2::new(0, start_y), IVec2::new(30, 30));
    body.velocity = DVec2::new(0.0, speed * sign);

    let outcome = move_and_collide(&mut body, &world, gravity);

    assert_clear(&body, &world);
    assert!(outcome.vertical.collided());
    assert!(body.grounded);
    assert_eq!(body.velocity.y, 0.0);
}

#[rstest]
fn horizontal_sweep_never_tunnels(
    #[values(1, 4, 40)] thickness: i32,
    #[values(5.0, 29.0, 75.0, 400.0)] speed: f64,
    #[values((1.0, WallContact::Right), (-1.0, WallContact::Left))] travel: (f64, WallContact),
) {
    let (direction, contact) = travel;
    let world = world_with(Aabb::new(0, -100, thickness, 300));
    let start_x = if direction > 0.0 { -32 } else { thickness + 2 };
    let mut body = KinematicBody::new(IVec2::new(start_x, 0), IVec2::new(30, 30));
    body.velocity = DVec2::new(speed * direction, 0.0);

    let outcome = move_and_collide(&mut body, &world, GravityDirection::Down);

    assert_clear(&body, &world);
    assert!(outcome.horizontal.collided());
    assert_eq!(body.wall_contact, contact);
}

#[rstest]
#[case::diagonal(DVec2::new(17.3, 23.9))]
#[case::steep(DVec2::new(-3.2, 58.0))]
#[case::shallow(DVec2::new(44.0, 2.5))]
fn diagonal_motion_stays_clear(#[case] velocity: DVec2) {
    let world = CollisionWorld::new(
        Aabb::new(-2000, -2000, 6000, 6000),
        40,
        [
            (Aabb::new(-200, 80, 600, 40), SurfaceTag::Normal, PlatformStyle::Gray),
            (Aabb::new(60, -200, 40, 280), SurfaceTag::Normal, PlatformStyle::Gray),
            (Aabb::new(-120, -200, 40, 280), SurfaceTag::Normal, PlatformStyle::Gray),
        ],
    );
    let mut body = KinematicBody::new(IVec2::new(0, 0), IVec2::new(30, 30));
    body.velocity = velocity;
    for _ in 0..20 {
        body.velocity.y += 0.4;
        move_and_collide(&mut body, &world, GravityDirection::Down);
        assert_clear(&body, &world);
    }
    assert!(body.grounded);
}

#[test]
fn box_tracks_rounded_true_position() {
    let world = CollisionWorld::new(Aabb::new(0, 0, 400, 400), 40, []);
    let mut body = KinematicBody::new(IVec2::new(10, 10), IVec2::new(30, 30));
    body.velocity = DVec2::new(2.5, -1.49);
    move_and_collide(&mut body, &world, GravityDirection::Down);
    assert_eq!(body.box_position, IVec2::new(13, 9));
    assert_relative_eq!(body.true_position.x, 12.5);
    assert_relative_eq!(body.true_position.y, 8.51);
}
