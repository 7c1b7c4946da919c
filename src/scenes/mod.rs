//! Ready-made scene descriptions.

mod living_room;

pub use living_room::living_room;
