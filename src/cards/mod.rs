//! Card entities.
//!
//! ## Key Types
//!
//! - `Card`: Runtime card state plus the effects it binds per event category
//! - `CardKind`: Unit, spell or landmark
//! - `Zone`: Where the card currently sits
//!
//! Card data definition and loading live outside this crate; sessions build
//! `Card` values directly and hand them to the game state.

pub mod card;

pub use card::{Card, CardKind, Zone};
