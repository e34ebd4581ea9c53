use std::path::Path;

use itertools::Itertools;
use log::{info, warn};
use svg::Document;
use svg::node::element::{Group, Polygon as SvgPolygon, Rectangle, Title};

use crate::entities::{Item, Room};
use crate::geometry::primitives::Point;

/// Renders a room to an SVG document: the container outline, doors in gray, items
/// semi-transparent with their clearance envelopes dashed. Diagnostic output only.
pub fn room_to_svg(room: &Room, title: &str) -> Document {
    let margin = f64::min(room.width, room.height) * 0.05;
    let stroke_width = f64::min(room.width, room.height) * 0.005;

    let container = Rectangle::new()
        .set("x", 0.0)
        .set("y", 0.0)
        .set("width", room.width)
        .set("height", room.height)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", 2.0 * stroke_width);

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                -margin,
                -margin,
                room.width + 2.0 * margin,
                room.height + 2.0 * margin,
            ),
        )
        // flip the y-axis so the room's y-up coordinates render upright
        .set("transform", "scale(1,-1)")
        .add(Title::new(title))
        .add(container);

    for door in room.doors() {
        document = document.add(
            item_group(door, stroke_width)
                .set("fill", "#AAAAAA")
                .set("fill-opacity", "0.8"),
        );
    }

    for item in room.items() {
        let fill = match (item.collided, item.out_of_bounds) {
            (false, false) => "#7D96A8",
            _ => "#D76254",
        };
        let clearance = SvgPolygon::new()
            .set("points", points_attr(&item.footprint.clearance))
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-opacity", "0.3")
            .set("stroke-width", 0.5 * stroke_width)
            .set(
                "stroke-dasharray",
                format!("{} {}", stroke_width, 2.0 * stroke_width),
            );
        document = document.add(
            item_group(item, stroke_width)
                .set("fill", fill)
                .set("fill-opacity", "0.6")
                .add(clearance),
        );
    }

    document
}

/// Writes an SVG document with the same best-effort contract as
/// [`write_layout`](crate::io::export::write_layout): failures are logged and swallowed.
pub fn write_svg(document: &Document, path: &Path) {
    match svg::save(path, document) {
        Ok(()) => info!("svg written to {path:?}"),
        Err(e) => warn!("could not write svg to {path:?}: {e:#}"),
    }
}

fn item_group(item: &Item, stroke_width: f64) -> Group {
    let outline = SvgPolygon::new()
        .set("points", points_attr(&item.footprint.vertices))
        .set("stroke", "black")
        .set("stroke-width", stroke_width);

    Group::new()
        .set("id", format!("item_{}", item.id))
        .add(Title::new(format!(
            "{}, id: {}, zone: {}, rotation: {}",
            item.name, item.id, item.zone, item.footprint.rotation
        )))
        .add(outline)
}

fn points_attr(vertices: &[Point; 4]) -> String {
    vertices
        .iter()
        .map(|Point(x, y)| format!("{x:.3},{y:.3}"))
        .join(" ")
}
