use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::entities::{Item, Room};
use crate::geometry::primitives::Point;

/// Reserved id of the synthetic container-boundary record in exported layouts.
/// Item factories hand out ids starting at 1 to keep this id free.
pub const CONTAINER_EXPORT_ID: usize = 0;

/// Serializable record of a single placed polygon, as consumed by external visualizers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPolygon {
    pub id: usize,
    pub width: f64,
    pub height: f64,
    pub center: [f64; 2],
    pub vertices: [[f64; 2]; 4],
    pub zone: String,
}

impl From<&Item> for JsonPolygon {
    fn from(item: &Item) -> Self {
        JsonPolygon {
            id: item.id,
            width: item.width(),
            height: item.height(),
            center: [item.center().x(), item.center().y()],
            vertices: item.footprint.vertices.map(|Point(x, y)| [x, y]),
            zone: item.zone.clone(),
        }
    }
}

/// Composes the exportable form of a room: one record per door and item, preceded by a
/// synthetic record describing the container boundary (id [`CONTAINER_EXPORT_ID`]).
pub fn compose_layout(room: &Room) -> Vec<JsonPolygon> {
    let boundary = JsonPolygon {
        id: CONTAINER_EXPORT_ID,
        width: room.width,
        height: room.height,
        center: [room.width / 2.0, room.height / 2.0],
        vertices: [
            [0.0, 0.0],
            [room.width, 0.0],
            [room.width, room.height],
            [0.0, room.height],
        ],
        zone: String::new(),
    };

    std::iter::once(boundary)
        .chain(room.doors().iter().map(JsonPolygon::from))
        .chain(room.items().iter().map(JsonPolygon::from))
        .collect_vec()
}

/// Writes the layout of `room` to `path` as JSON.
///
/// Best-effort diagnostics side channel: a failed write is logged at `warn` and swallowed,
/// so an optimization run is never blocked or aborted by export I/O errors.
pub fn write_layout(room: &Room, path: &Path) {
    match try_write_layout(room, path) {
        Ok(()) => info!("layout written to {path:?}"),
        Err(e) => warn!("could not write layout to {path:?}: {e:#}"),
    }
}

fn try_write_layout(room: &Room, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("could not create {path:?}"))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &compose_layout(room))
        .with_context(|| format!("could not serialize layout to {path:?}"))?;
    Ok(())
}
