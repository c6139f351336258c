use std::fmt;

use validator::{Validate, ValidationError};

/// Slack added to the upper end of a concentration range so that a sweep such
/// as `0.1..=0.9 step 0.1` still reaches `0.9` despite rounding.
pub const CONCENTRATION_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrystalType {
    Sc,
    Bcc,
    Fcc,
}

impl CrystalType {
    pub const ALL: [CrystalType; 3] = [Self::Sc, Self::Bcc, Self::Fcc];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Sc => "SC",
            Self::Bcc => "BCC",
            Self::Fcc => "FCC",
        }
    }

    /// Coordination number under periodic boundaries.
    pub fn n_neighbors(&self) -> usize {
        match self {
            Self::Sc => 6,
            Self::Bcc => 8,
            Self::Fcc => 12,
        }
    }
}

impl fmt::Display for CrystalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl TryFrom<&str> for CrystalType {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_ascii_uppercase().as_str() {
            "SC" => Ok(Self::Sc),
            "BCC" => Ok(Self::Bcc),
            "FCC" => Ok(Self::Fcc),
            _ => Err(format!(
                "unknown crystal type '{s}', expected 'SC', 'BCC' or 'FCC'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Edge sites lose the neighbors that would fall outside the box.
    Open,
    /// Coordinates wrap; every site keeps the full coordination number.
    Periodic,
}

impl TryFrom<&str> for BoundaryMode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "open" | "hard" => Ok(Self::Open),
            "periodic" => Ok(Self::Periodic),
            _ => Err(format!(
                "unknown boundary mode '{s}', expected 'open' (or 'hard') or 'periodic'"
            )),
        }
    }
}

/// How [`SpinField::initialize`](crate::spins::SpinField::initialize) fills the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitPolicy {
    /// Every site starts at +1.
    #[default]
    AllUp,
    /// Every site is independently +1 or −1 with probability ½.
    Random,
}

impl TryFrom<&str> for InitPolicy {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "up" | "all_up" => Ok(Self::AllUp),
            "random" => Ok(Self::Random),
            _ => Err(format!(
                "unknown init policy '{s}', expected 'up' or 'random'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Self::X, Self::Y, Self::Z];

    pub fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Axes along which a spanning cluster counts as percolating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercolationAxes(pub [bool; 3]);

impl PercolationAxes {
    pub fn contains(&self, axis: Axis) -> bool {
        self.0[axis.index()]
    }
}

impl Default for PercolationAxes {
    fn default() -> Self {
        Self([true; 3])
    }
}

impl TryFrom<&str> for PercolationAxes {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s == "any" {
            return Ok(Self::default());
        }
        let mut axes = [false; 3];
        for c in s.chars() {
            let axis = match c {
                'x' => Axis::X,
                'y' => Axis::Y,
                'z' => Axis::Z,
                _ => {
                    return Err(format!(
                        "invalid percolation axes '{s}', expected 'any' or a combination of 'x', 'y', 'z'"
                    ))
                }
            };
            axes[axis.index()] = true;
        }
        if !axes.iter().any(|&a| a) {
            return Err("percolation axes must name at least one axis".to_string());
        }
        Ok(Self(axes))
    }
}

fn validate_lattice_config(cfg: &LatticeConfig) -> Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("lattice size must be >= 1"));
    }
    if cfg.layers < 1 {
        return Err(ValidationError::new("lattice layers must be >= 1"));
    }
    let volume = cfg
        .size
        .checked_mul(cfg.size)
        .and_then(|a| a.checked_mul(cfg.layers));
    if !volume.is_some_and(|v| v <= u32::MAX as usize) {
        return Err(ValidationError::new(
            "lattice volume must fit in a 32-bit site index",
        ));
    }
    Ok(())
}

/// Static lattice geometry. Immutable for the lifetime of a [`Lattice`](crate::geometry::Lattice).
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_lattice_config"))]
pub struct LatticeConfig {
    /// In-plane extent `L` (x and y).
    pub size: usize,
    /// Number of layers `n` (z).
    pub layers: usize,
    pub crystal: CrystalType,
    pub boundary: BoundaryMode,
}

impl LatticeConfig {
    pub fn volume(&self) -> usize {
        self.size * self.size * self.layers
    }
}

fn validate_concentration_range(r: &ConcentrationRange) -> Result<(), ValidationError> {
    if !(r.start.is_finite() && r.end.is_finite() && r.step.is_finite()) {
        return Err(ValidationError::new("concentration range must be finite"));
    }
    if r.start < 0.0 || r.end > 1.0 {
        return Err(ValidationError::new(
            "concentrations must lie within [0, 1]",
        ));
    }
    if r.start > r.end {
        return Err(ValidationError::new(
            "initial concentration must be <= final concentration",
        ));
    }
    if r.step <= 0.0 {
        return Err(ValidationError::new("concentration step must be > 0"));
    }
    Ok(())
}

/// Magnetic-site concentrations to sweep, `start + k * step` up to `end`.
#[derive(Debug, Clone, Copy, Validate)]
#[validate(schema(function = "validate_concentration_range"))]
pub struct ConcentrationRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl ConcentrationRange {
    /// A range holding only `c`.
    pub fn single(c: f64) -> Self {
        Self {
            start: c,
            end: c,
            step: 1.0,
        }
    }

    /// Every concentration in the sweep, computed by index to avoid drift.
    pub fn values(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let mut k = 0usize;
        loop {
            let c = self.start + k as f64 * self.step;
            if c > self.end + CONCENTRATION_TOLERANCE {
                break;
            }
            out.push(c.min(1.0));
            k += 1;
        }
        out
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.n_configurations < 1 {
        return Err(ValidationError::new("n_configurations must be >= 1"));
    }
    if cfg.temperature.is_nan() || cfg.temperature <= 0.0 {
        return Err(ValidationError::new("temperature must be > 0"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    Ok(())
}

/// Everything one concentration sweep needs. Built once by the caller and
/// passed by reference; nothing in the engine reads global settings.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    #[validate]
    pub lattice: LatticeConfig,
    #[validate]
    pub concentration: ConcentrationRange,
    /// Independent dilution realizations per concentration point.
    pub n_configurations: usize,
    /// Wolff steps applied to each realization before clusters are counted.
    pub mc_steps: usize,
    /// Temperature in units of `J / k_B`.
    pub temperature: f64,
    /// Ferromagnetic exchange `J`.
    pub coupling: f64,
    pub init_policy: InitPolicy,
    pub percolation_axes: PercolationAxes,
    pub seed: u64,
}
