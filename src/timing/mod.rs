//! Frame timing: interpolation of sentence start/end times from inline
//! markers, and linear resynchronization between two subtitle tracks.

pub mod interpolate;
pub mod sync;

pub use interpolate::interpolate;
pub use sync::{apply_transform, fit_line, fit_line_many};
