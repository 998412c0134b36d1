use super::*;

const RED: Color = Color::rgb(255, 0, 0);

fn buffer(w: u32, h: u32) -> FrameBuffer {
    FrameBuffer::new(Canvas::new(w, h).unwrap())
}

fn painted(fb: &FrameBuffer) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for y in 0..i64::from(fb.height()) {
        for x in 0..i64::from(fb.width()) {
            if fb.pixel(x, y).unwrap() != Color::TRANSPARENT {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn new_buffer_is_transparent() {
    let fb = buffer(3, 2);
    assert!(fb.pixels().iter().all(|p| *p == Color::TRANSPARENT));
    assert_eq!(fb.pixels().len(), 6);
}

#[test]
fn addressed_access_outside_fails() {
    let mut fb = buffer(4, 4);
    assert!(matches!(
        fb.pixel(4, 0),
        Err(PixelatorError::OutOfBounds { x: 4, y: 0, .. })
    ));
    assert!(fb.set_pixel(-1, 2, RED).is_err());
    assert!(fb.fill_row(4, RED).is_err());

    fb.set_pixel(3, 3, RED).unwrap();
    assert_eq!(fb.pixel(3, 3).unwrap(), RED);
}

#[test]
fn fill_row_sets_every_column() {
    let mut fb = buffer(5, 3);
    fb.fill_row(1, RED).unwrap();
    for x in 0..5 {
        assert_eq!(fb.pixel(x, 1).unwrap(), RED);
        assert_eq!(fb.pixel(x, 0).unwrap(), Color::TRANSPARENT);
    }
}

#[test]
fn draw_line_horizontal_is_inclusive() {
    let mut fb = buffer(8, 6);
    fb.draw_line(1, 3, 5, 3, RED);
    for x in 1..=5 {
        assert_eq!(fb.pixel(x, 3).unwrap(), RED);
    }
    assert_eq!(painted(&fb).len(), 5);
}

#[test]
fn draw_line_reverse_diagonal_and_steep() {
    let mut fb = buffer(7, 7);
    fb.draw_line(5, 5, 1, 1, RED);
    assert_eq!(painted(&fb), (1..=5).map(|i| (i, i)).collect::<Vec<_>>());

    let mut fb = buffer(7, 7);
    fb.draw_line(2, 6, 3, 0, RED);
    let px = painted(&fb);
    assert_eq!(px.len(), 7);
    assert!(px.contains(&(2, 6)));
    assert!(px.contains(&(3, 0)));
}

#[test]
fn draw_line_single_point_and_clipping() {
    let mut fb = buffer(5, 3);
    fb.draw_line(2, 1, 2, 1, RED);
    assert_eq!(painted(&fb), vec![(2, 1)]);

    let mut fb = buffer(5, 3);
    fb.draw_line(-3, 1, 10, 1, RED);
    assert_eq!(painted(&fb).len(), 5);
}

#[test]
fn filled_circle_spans_columns() {
    let mut fb = buffer(9, 9);
    fb.draw_circle_filled(4, 4, 2, RED);
    // dx = -2 -> h = 0, dx = -1 -> h = 1, dx = 0 -> h = 2, dx = 1 -> h = 1.
    assert_eq!(fb.pixel(2, 4).unwrap(), RED);
    assert_eq!(fb.pixel(2, 3).unwrap(), Color::TRANSPARENT);
    assert_eq!(fb.pixel(4, 2).unwrap(), RED);
    assert_eq!(fb.pixel(4, 6).unwrap(), RED);
    assert_eq!(fb.pixel(5, 5).unwrap(), RED);
    assert_eq!(fb.pixel(6, 4).unwrap(), Color::TRANSPARENT);
    assert_eq!(painted(&fb).len(), 1 + 3 + 5 + 3);
}

#[test]
fn filled_circle_clips_at_edges() {
    let mut fb = buffer(4, 4);
    fb.draw_circle_filled(0, 0, 3, RED);
    assert_eq!(fb.pixel(0, 0).unwrap(), RED);
    assert_eq!(fb.pixel(2, 2).unwrap(), RED);
}

#[test]
fn triangle_flat_bottom_covers_interior() {
    let mut fb = buffer(9, 6);
    fb.fill_triangle(
        Point::new(4.0, 0.0),
        Point::new(0.0, 4.0),
        Point::new(8.0, 4.0),
        RED,
    );
    for x in 0..=8 {
        assert_eq!(fb.pixel(x, 4).unwrap(), RED);
    }
    assert_eq!(fb.pixel(4, 0).unwrap(), RED);
    assert_eq!(fb.pixel(3, 0).unwrap(), Color::TRANSPARENT);
    assert_eq!(fb.pixel(4, 5).unwrap(), Color::TRANSPARENT);
}

#[test]
fn triangle_flat_top_and_general_cases() {
    let mut fb = buffer(9, 6);
    fb.fill_triangle(
        Point::new(0.0, 0.0),
        Point::new(8.0, 0.0),
        Point::new(4.0, 4.0),
        RED,
    );
    for x in 0..=8 {
        assert_eq!(fb.pixel(x, 0).unwrap(), RED);
    }
    assert_eq!(fb.pixel(4, 4).unwrap(), RED);
    assert_eq!(fb.pixel(0, 4).unwrap(), Color::TRANSPARENT);

    let mut fb = buffer(10, 10);
    fb.fill_triangle(
        Point::new(1.0, 1.0),
        Point::new(8.0, 4.0),
        Point::new(3.0, 8.0),
        RED,
    );
    for p in [(1, 1), (8, 4), (3, 8), (4, 4)] {
        assert_eq!(fb.pixel(p.0, p.1).unwrap(), RED, "{p:?}");
    }
    assert_eq!(fb.pixel(8, 8).unwrap(), Color::TRANSPARENT);
}

#[test]
fn degenerate_triangles_fill_at_most_points_or_line() {
    let mut fb = buffer(8, 8);
    let p = Point::new(3.0, 3.0);
    fb.fill_triangle(p, p, p, RED);
    assert_eq!(painted(&fb), vec![(3, 3)]);

    let mut fb = buffer(8, 8);
    fb.fill_triangle(
        Point::new(2.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(6.0, 6.0),
        RED,
    );
    assert_eq!(painted(&fb), (2..=6).map(|i| (i, i)).collect::<Vec<_>>());

    let mut fb = buffer(8, 8);
    fb.fill_triangle(
        Point::new(3.0, 0.0),
        Point::new(3.0, 2.0),
        Point::new(3.0, 5.0),
        RED,
    );
    assert_eq!(painted(&fb), (0..=5).map(|y| (3, y)).collect::<Vec<_>>());
}

#[test]
fn triangle_partially_outside_is_clipped() {
    let mut fb = buffer(4, 4);
    fb.fill_triangle(
        Point::new(-10.0, -10.0),
        Point::new(20.0, -10.0),
        Point::new(2.0, 10.0),
        RED,
    );
    assert_eq!(fb.pixel(2, 3).unwrap(), RED);
}

#[test]
fn to_rgba_is_row_major_bytes() {
    let mut fb = buffer(2, 1);
    fb.set_pixel(1, 0, Color::rgba(1, 2, 3, 4)).unwrap();
    let frame = fb.to_rgba();
    assert_eq!(frame.width, 2);
    assert_eq!(frame.height, 1);
    assert_eq!(frame.data, vec![0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn oversized_circles_only_walk_the_buffer() {
    for radius in [60_000, 3_500_000_000] {
        let mut fb = buffer(8, 8);
        fb.draw_circle_filled(4, 4, radius, RED);
        assert_eq!(painted(&fb).len(), 64, "radius {radius}");
    }

    let mut fb = buffer(8, 8);
    fb.draw_circle_filled(i64::MIN, i64::MAX, u32::MAX, RED);
    assert!(painted(&fb).is_empty());
}

#[test]
fn lines_with_extreme_endpoints_are_clipped() {
    let mut fb = buffer(8, 8);
    fb.draw_line(i64::MIN, 2, i64::MAX, 2, RED);
    assert_eq!(painted(&fb), (0..8).map(|x| (x, 2)).collect::<Vec<_>>());

    let mut fb = buffer(8, 8);
    fb.draw_line(4, 0, -6_000_000_000_000_000_000, 7, RED);
    assert_eq!(painted(&fb), (0..=4).map(|x| (x, 0)).collect::<Vec<_>>());

    let mut fb = buffer(8, 8);
    fb.draw_line(3, i64::MAX, 3, i64::MIN, RED);
    assert_eq!(painted(&fb), (0..8).map(|y| (3, y)).collect::<Vec<_>>());
}

#[test]
fn clipped_line_matches_unclipped_pixels() {
    let mut full = buffer(40, 40);
    full.draw_line(1, 3, 37, 20, RED);
    let mut window = buffer(12, 40);
    window.draw_line(1, 3, 37, 20, RED);
    let expected: Vec<(i64, i64)> = painted(&full).into_iter().filter(|p| p.0 < 12).collect();
    assert_eq!(painted(&window), expected);

    let mut full = buffer(40, 40);
    full.draw_line(30, 2, 5, 39, RED);
    let mut window = buffer(40, 10);
    window.draw_line(30, 2, 5, 39, RED);
    let expected: Vec<(i64, i64)> = painted(&full).into_iter().filter(|p| p.1 < 10).collect();
    assert_eq!(painted(&window), expected);
}

#[test]
fn far_off_triangle_fills_visible_rows() {
    let mut fb = buffer(8, 8);
    fb.fill_triangle(
        Point::new(4.0, 0.0),
        Point::new(-6e18, 7.0),
        Point::new(6e18, 7.0),
        RED,
    );
    assert_eq!(fb.pixel(4, 0).unwrap(), RED);
    assert_eq!(fb.pixel(3, 0).unwrap(), Color::TRANSPARENT);
    for x in 0..8 {
        assert_eq!(fb.pixel(x, 7).unwrap(), RED);
    }

    let mut fb = buffer(8, 8);
    fb.fill_triangle(
        Point::new(0.0, -1e300),
        Point::new(7.0, 1e300),
        Point::new(f64::NAN, 3.0),
        RED,
    );
    assert!(painted(&fb).is_empty());
}

#[test]
fn fill_rect_clips_near_integer_limits() {
    let mut fb = buffer(4, 4);
    fb.fill_rect(i64::MAX - 1, i64::MAX - 1, 5, 5, RED);
    fb.fill_rect(i64::MIN, i64::MIN, u32::MAX, u32::MAX, RED);
    assert!(painted(&fb).is_empty());

    fb.fill_rect(-1, 2, 3, u32::MAX, RED);
    assert_eq!(painted(&fb), vec![(0, 2), (1, 2), (0, 3), (1, 3)]);
}
