use super::*;

#[test]
fn raster_rejects_mismatched_byte_length() {
    assert!(Raster::new(2, 2, vec![0; 15]).is_err());
    assert!(Raster::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn raster_pixel_lookup_is_row_major() {
    let mut data = vec![0u8; 2 * 2 * 4];
    data[8..12].copy_from_slice(&[10, 20, 30, 255]);
    let r = Raster::new(2, 2, data).unwrap();
    assert_eq!(
        r.pixel(0, 1),
        Some(Rgba8Premul {
            r: 10,
            g: 20,
            b: 30,
            a: 255
        })
    );
    assert_eq!(r.pixel(2, 0), None);
}

#[test]
fn straight_export_unpremultiplies() {
    let r = Raster::new(1, 1, vec![64, 0, 0, 128]).unwrap();
    assert_eq!(r.to_straight_rgba8(), vec![128, 0, 0, 128]);
}

#[test]
fn provided_translate_and_scale_compose_on_the_right() {
    let mut s = recording::RecordingSurface::new();
    s.translate(Vec2::new(10.0, 0.0));
    s.scale(2.0);
    s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba8Premul::transparent());
    let (_, t) = s.fills()[0];
    assert_eq!(t * kurbo::Point::new(1.0, 1.0), kurbo::Point::new(12.0, 2.0));
}
