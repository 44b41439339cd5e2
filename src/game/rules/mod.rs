//! Game rules for N-in-a-row.
//!
//! Pure functions evaluating a board. Rules are separated from board storage
//! and from the turn loop, so they can be called after every placement.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::check_winner;
