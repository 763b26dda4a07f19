pub mod keyboard;
pub mod pointer;

pub use keyboard::{command_for_key, KeyCommand};
pub use pointer::{client_to_ndc, DragState, Interaction, PointerState, PokeState};
