//! Audio container handling: PCM format metadata, the WAV codec and level
//! measurements.

pub mod format;
pub mod inspect;
pub mod level;
pub mod wav;

pub use format::AudioFormat;
pub use inspect::{Inspection, inspect};
pub use level::{calculate_rms, duration_secs};
pub use wav::{decode, encode};
