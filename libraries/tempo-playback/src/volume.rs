//! Volume helpers
//!
//! Volume is a linear gain in `[0, 1]` handed straight to the engine. Mute
//! is tracked separately so the stored volume survives a mute/unmute cycle.

/// Clamp a requested volume into `[0, 1]`; NaN counts as silence
pub fn clamp(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Gain actually applied to the output
pub fn output_gain(volume: f32, muted: bool) -> f32 {
    if muted {
        0.0
    } else {
        clamp(volume)
    }
}
