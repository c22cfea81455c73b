use crate::error::{Result, StormctlError};

/// Largest valid setting gene. Settings are encoded in tenths of
/// fully-open (orifices, weirs) or fully-on (pumps): 0 is closed/off,
/// 10 is wide open / full speed.
pub const SETTING_MAX: u8 = 10;

/// Inclusive range every gene is drawn from.
pub const SETTING_RANGE: std::ops::RangeInclusive<u8> = 0..=SETTING_MAX;

/// One candidate control policy: the flat time series of settings for
/// every control structure over the planning horizon.
///
/// Genetic operators want a simple linear structure: crossover is array
/// slicing, mutation is per-gene replacement, and any vector of in-range
/// genes is a valid policy. Sub-blocks appear in the same order as the
/// control structures that own them.
///
/// # Example
///
/// ```text
/// ["ORIFICE R1", "PUMP P1"], horizon 2
/// [o, o, o, o, o, o, p, p]
///  \-- R1: 3 genes x 2 steps --/  \ P1: 1 gene x 2 steps
/// ```
pub type Policy = Vec<u8>;

/// A candidate policy together with its simulation cost, when known.
/// Lower cost is better; `None` means not yet evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub policy: Policy,
    pub fitness: Option<f64>,
}

impl Individual {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            fitness: None,
        }
    }

    pub fn evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Forget the cost after the genes changed.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }
}

/// Physical actuator type, which fixes how many genes one control time
/// step takes in the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Orifice,
    Weir,
    Pump,
}

impl ControlKind {
    /// Orifices and weirs take a 3-gene setting per control step, pumps a
    /// single gene.
    pub fn genes_per_step(&self) -> usize {
        match self {
            ControlKind::Orifice | ControlKind::Weir => 3,
            ControlKind::Pump => 1,
        }
    }
}

/// One controllable structure in the network, identified the way the
/// simulation model names it, e.g. `"ORIFICE R1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlStructure {
    pub kind: ControlKind,
    pub id: String,
}

impl ControlStructure {
    /// Parse an identifier whose first whitespace-delimited token names
    /// the structure type. Unknown types are rejected rather than
    /// silently contributing nothing to the encoding.
    pub fn parse(raw: &str) -> Result<Self> {
        let kind = match raw.split_whitespace().next() {
            Some("ORIFICE") => ControlKind::Orifice,
            Some("WEIR") => ControlKind::Weir,
            Some("PUMP") => ControlKind::Pump,
            Some(other) => {
                return Err(StormctlError::Configuration(format!(
                    "unknown control structure type '{}' in '{}'",
                    other, raw
                )))
            }
            None => {
                return Err(StormctlError::Configuration(
                    "empty control structure identifier".to_string(),
                ))
            }
        };
        Ok(Self {
            kind,
            id: raw.to_string(),
        })
    }

    pub fn parse_all(raw_ids: &[String]) -> Result<Vec<ControlStructure>> {
        raw_ids.iter().map(|raw| Self::parse(raw)).collect()
    }
}
