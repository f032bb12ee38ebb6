use crate::foundation::error::{ScenecastError, ScenecastResult};

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ScenecastResult<Self> {
        if den == 0 {
            return Err(ScenecastError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ScenecastError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Whole-number FPS, e.g. `Fps::whole(30)`.
    pub fn whole(num: u32) -> ScenecastResult<Self> {
        Self::new(num, 1)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: i64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a signed offset in seconds to frames, rounding half away from zero.
    ///
    /// Non-finite input maps to 0.
    pub fn secs_to_frames_round(self, secs: f64) -> i64 {
        let v = secs * self.as_f64();
        if v.is_finite() { v.round() as i64 } else { 0 }
    }

    /// Convert a clip length in seconds to a frame count using ceil semantics, at least 1.
    pub fn secs_to_frames_ceil_min1(self, secs: f64) -> u64 {
        let v = secs * self.as_f64();
        if !v.is_finite() || v <= 1.0 {
            return 1;
        }
        v.ceil() as u64
    }
}
