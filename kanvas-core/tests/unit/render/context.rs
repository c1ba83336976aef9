use super::*;

fn approx_rect(a: Rect, b: Rect) -> bool {
    (a.x0 - b.x0).abs() < 1e-9
        && (a.y0 - b.y0).abs() < 1e-9
        && (a.x1 - b.x1).abs() < 1e-9
        && (a.y1 - b.y1).abs() < 1e-9
}

#[test]
fn view_maps_canvas_to_component_and_back() {
    let ctx = TransformContext::from_view(
        Rect::new(0.0, 0.0, 800.0, 600.0),
        Vec2::new(100.0, 50.0),
        2.0,
    );
    let bbox = Rect::new(0.0, 0.0, 10.0, 20.0);
    assert_eq!(ctx.to_component(bbox), Rect::new(100.0, 50.0, 120.0, 90.0));
    assert!(approx_rect(ctx.to_canvas(ctx.to_component(bbox)), bbox));
    assert_eq!(ctx.zoom(), 2.0);
    assert!(approx_rect(
        ctx.visible_canvas(),
        Rect::new(-50.0, -25.0, 350.0, 275.0)
    ));
}

#[test]
fn translation_is_applied_in_canvas_units() {
    let ctx = TransformContext::from_view(Rect::new(0.0, 0.0, 100.0, 100.0), Vec2::ZERO, 3.0)
        .translated(Vec2::new(5.0, 1.0));
    assert_eq!(ctx.to_component_point(Point::ZERO), Point::new(15.0, 3.0));
    let back = ctx.to_canvas_point(Point::new(15.0, 3.0));
    assert!(back.distance(Point::ZERO) < 1e-9);
}

#[test]
fn cache_context_sees_exactly_the_bounding_box() {
    let bbox = Rect::new(10.0, 20.0, 110.0, 70.0);
    let ctx = TransformContext::for_cache(bbox, 2.0);
    assert_eq!(ctx.to_component_point(Point::new(10.0, 20.0)), Point::ZERO);
    assert_eq!(
        ctx.to_component_point(Point::new(110.0, 70.0)),
        Point::new(200.0, 100.0)
    );
    assert_eq!(ctx.visible_component(), Rect::new(0.0, 0.0, 200.0, 100.0));
    assert!(approx_rect(ctx.visible_canvas(), bbox));
}
