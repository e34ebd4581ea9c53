use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;

use furnish_rs::entities::Item;
use furnish_rs::io::CONTAINER_EXPORT_ID;

/// A source of preconfigured items with fixed archetype dimensions, zone and clearance.
/// The engine only consumes the returned [`Item`]; where the presets come from is the
/// factory's business.
pub trait ItemFactory {
    fn get_item(&self) -> Result<Item>;
}

// ids start right after the reserved container-boundary id
static NEXT_ID: AtomicUsize = AtomicUsize::new(CONTAINER_EXPORT_ID + 1);

fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

pub struct BedFactory;

impl ItemFactory for BedFactory {
    fn get_item(&self) -> Result<Item> {
        Ok(Item::try_new(next_id(), "bed", 40.0, 32.0, "bedroom", 10.0, 10.0)?
            .with_accessibility())
    }
}

pub struct TableFactory;

impl ItemFactory for TableFactory {
    fn get_item(&self) -> Result<Item> {
        Item::try_new(next_id(), "table", 40.0, 40.0, "kitchen", 12.0, 12.0)
    }
}

pub struct ChairFactory;

impl ItemFactory for ChairFactory {
    fn get_item(&self) -> Result<Item> {
        Item::try_new(next_id(), "chair", 8.0, 8.0, "kitchen", 4.0, 4.0)
    }
}

pub struct PouffeFactory;

impl ItemFactory for PouffeFactory {
    fn get_item(&self) -> Result<Item> {
        Item::try_new(next_id(), "pouffe", 10.0, 10.0, "livingRoom", 0.0, 0.0)
    }
}

pub struct ArmchairFactory;

impl ItemFactory for ArmchairFactory {
    fn get_item(&self) -> Result<Item> {
        Ok(
            Item::try_new(next_id(), "armchair", 16.0, 14.0, "livingRoom", 6.0, 8.0)?
                .with_accessibility(),
        )
    }
}

/// Cupboards sit against a wall and do not mind windows behind them.
pub struct CupboardFactory;

impl ItemFactory for CupboardFactory {
    fn get_item(&self) -> Result<Item> {
        Ok(
            Item::try_new(next_id(), "cupboard", 24.0, 12.0, "bedroom", 0.0, 8.0)?
                .with_near_wall(0)
                .with_ignore_windows(),
        )
    }
}

pub struct DeskFactory;

impl ItemFactory for DeskFactory {
    fn get_item(&self) -> Result<Item> {
        Ok(Item::try_new(next_id(), "desk", 28.0, 14.0, "bedroom", 0.0, 10.0)?
            .with_accessibility())
    }
}

/// Doors are fixed obstacles: same shape model as furniture, but never mutated by the
/// search. Callers position them along a wall before handing them to the room.
pub struct DoorFactory;

impl ItemFactory for DoorFactory {
    fn get_item(&self) -> Result<Item> {
        Item::try_new(next_id(), "door", 15.0, 5.0, "room", 0.0, 0.0)
    }
}
