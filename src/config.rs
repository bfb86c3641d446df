/// How contact points are generated for a polygon–polygon pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactStrategy {
    /// Clip the incident edge against the reference edge, up to two points.
    #[default]
    Clipping,
    /// One point pair picked from the support points along the MTV.
    SupportPoint,
}

/// Tunables of the narrow phase.
///
/// ```rust
/// use convex2d::NarrowPhaseConfig;
///
/// let config = NarrowPhaseConfig {
///     epa_threshold: 1.0e-4,
///     ..Default::default()
/// };
/// assert_eq!(config.epa_max_iterations, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrowPhaseConfig {
    /// EPA stops once a new support point improves the distance by at most this much.
    pub epa_threshold: f32,
    /// Hard cap on EPA expansions. Reaching it means "no MTV".
    pub epa_max_iterations: usize,
    /// Hard cap on GJK support evaluations. Reaching it means "no overlap".
    pub gjk_max_iterations: usize,
    pub contact_strategy: ContactStrategy,
}

impl Default for NarrowPhaseConfig {
    fn default() -> Self {
        Self {
            epa_threshold: 1.0e-3,
            epa_max_iterations: 64,
            gjk_max_iterations: 64,
            contact_strategy: ContactStrategy::Clipping,
        }
    }
}
