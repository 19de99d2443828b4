//! Numeric tolerances used by the solvers.

/// Tolerances used by the solvers.
///
/// Use [`SolverConfigBuilder`] to change individual values:
///
/// ```
/// use algebrist::config::SolverConfigBuilder;
///
/// let config = SolverConfigBuilder::new()
///     .root_tolerance(1e-6)
///     .build();
/// assert_eq!(config.root_tolerance, 1e-6);
/// assert_eq!(config.zero_tolerance, 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Values with a smaller magnitude than this are treated as zero: a discriminant this small
    /// gives a double root, and a non-strict inequality includes an endpoint where `f` is this
    /// small.
    pub zero_tolerance: f64,

    /// The largest residual `|f(root)|` accepted when verifying a root.
    pub root_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: 1e-12,
            root_tolerance: 1e-9,
        }
    }
}

impl SolverConfig {
    /// Wraps the given [`SolverConfig`] into a builder for further customization.
    pub fn into_builder(self) -> SolverConfigBuilder {
        SolverConfigBuilder(self)
    }
}

/// A builder for [`SolverConfig`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SolverConfigBuilder(SolverConfig);

impl SolverConfigBuilder {
    /// Creates a new builder with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tolerance for zero tests. See [`SolverConfig::zero_tolerance`].
    pub fn zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.0.zero_tolerance = zero_tolerance;
        self
    }

    /// Sets the tolerance for root verification. See [`SolverConfig::root_tolerance`].
    pub fn root_tolerance(mut self, root_tolerance: f64) -> Self {
        self.0.root_tolerance = root_tolerance;
        self
    }

    /// Builds the [`SolverConfig`].
    pub fn build(self) -> SolverConfig {
        self.0
    }
}
