mod item;
mod room;

#[doc(inline)]
pub use item::Item;
#[doc(inline)]
pub use room::{Mutation, MutationConfig, PenaltyWeights, Room, RoomSnapshot};
