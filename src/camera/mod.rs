//! Virtual camera state and its per-frame update model.

mod state;
mod tuning;

pub use state::CameraState;
pub use tuning::Tuning;
