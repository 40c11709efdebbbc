//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;
use crate::render::DrawList;
use crate::sim::Aabb;

/// Two triangles covering `rect` rotated clockwise by `rotation_deg` around its centre
///
/// Coordinates stay in pixel space (y down).
pub fn rect(rect: &Aabb, rotation_deg: f32, color: [f32; 4]) -> [Vertex; 6] {
    let center = rect.center();
    let half = rect.size * 0.5;
    let rot = Vec2::from_angle(rotation_deg.to_radians());

    let corner = |offset: Vec2| {
        let p = center + rot.rotate(offset);
        Vertex::new(p.x, p.y, color)
    };

    let tl = corner(Vec2::new(-half.x, -half.y));
    let tr = corner(Vec2::new(half.x, -half.y));
    let br = corner(Vec2::new(half.x, half.y));
    let bl = corner(Vec2::new(-half.x, half.y));

    [tl, bl, tr, tr, bl, br]
}

/// Vertices for every rectangle in a draw list, in draw order
pub fn draw_list_vertices(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.commands.len() * 6);
    for (r, rotation_deg, color) in list.rects() {
        vertices.extend_from_slice(&rect(r, rotation_deg, color));
    }
    vertices
}
