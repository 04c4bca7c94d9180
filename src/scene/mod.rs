/// Scene module
///
/// Turns the gallery's artwork collection into positioned entries:
/// - `layout.rs` - index to wall slot mapping
/// - `composer.rs` - snapshot to renderable entries

pub mod composer;
pub mod layout;

pub use composer::{EntryContent, PositionedEntry, SceneComposer};
pub use layout::{Slot, SlotLayout};
