use serde::{Deserialize, Serialize};

/// A coordinate `(r, theta)` in the polar parameter domain of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterPoint {
    pub r: f64,
    pub theta: f64,
}

impl ParameterPoint {
    pub fn new(r: f64, theta: f64) -> Self {
        Self { r, theta }
    }
}
