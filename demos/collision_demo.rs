use convex2d::math::vec2;
use convex2d::shape::polygon;
use convex2d::{collide, NarrowPhaseConfig, Shape, Transform, TransformArena};

// Bodies falling on a static floor, pushed back out along the MTV.
fn main() {
    let config = NarrowPhaseConfig::default();

    let floor = Shape::polygon(Transform::at(vec2(0.0, -1.0)), &polygon::rect(40.0, 2.0));

    // a crate made of two boxes sharing a parent transform
    let mut arena = TransformArena::new();
    let body = arena.insert(Transform::at(vec2(-5.0, 6.0)));
    let mut parts = vec![
        Shape::polygon(Transform::at(vec2(-0.5, 0.0)), &polygon::square(1.0)),
        Shape::polygon(Transform::at(vec2(0.5, 0.0)), &polygon::rect(1.0, 2.0)),
    ];
    for p in &mut parts {
        if let Err(e) = p.set_parent(&arena, Some(body)) {
            eprintln!("cannot attach part: {}", e);
            return;
        }
    }

    let mut bodies = vec![
        Shape::circle(Transform::at(vec2(0.0, 4.0)), 1.0),
        Shape::polygon(
            Transform::new(vec2(4.0, 8.0), 0.4, vec2(1.0, 1.0)),
            &polygon::ngon(1.0, 5),
        ),
    ];

    for step in 0..40 {
        for b in &mut bodies {
            b.translate(vec2(0.0, -0.25));
            if let Some(m) = collide(b, &floor, &config) {
                println!(
                    "step {:2}: {} hits the floor, depth {:.3}, {} contact(s)",
                    step,
                    kind_name(b),
                    m.mtv.depth(),
                    m.contacts.len()
                );
                b.translate(-m.mtv.vector());
            }
        }

        if let Some(t) = arena.get_mut(body) {
            t.position.y -= 0.25;
        }
        let mut push = vec2(0.0, 0.0);
        for p in &mut parts {
            if p.sync_parent(&arena).is_err() {
                return;
            }
            if let Some(m) = collide(p, &floor, &config) {
                for c in &m.contacts {
                    println!(
                        "step {:2}: crate part touches the floor at ({:.2}, {:.2})",
                        step, c.point_b.x, c.point_b.y
                    );
                }
                if m.mtv.depth() > push.length() {
                    push = m.mtv.vector();
                }
            }
        }
        if let Some(t) = arena.get_mut(body) {
            t.position -= push;
        }
    }

    for b in &bodies {
        println!("{} rests at {:?}", kind_name(b), b.centroid());
    }
}

fn kind_name(shape: &Shape) -> &'static str {
    if shape.radius().is_some() {
        "circle"
    } else {
        "polygon"
    }
}
