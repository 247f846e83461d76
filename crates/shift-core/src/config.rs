//! Configuration loading and typed config structures for System Shift.
//!
//! The canonical configuration lives in `shift-config.yaml` at the project
//! root. Every field has a default, so a partial file (or no file at all)
//! yields the canonical 0-100 constant set.

use std::path::Path;

use serde::Deserialize;
use shift_types::{RunSeed, Tracks};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is unusable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShiftConfig {
    /// Run length, seed, and content location.
    #[serde(default)]
    pub run: RunConfig,

    /// Capital, plays, and hand sizing.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Starting track values.
    #[serde(default)]
    pub tracks: TrackConfig,

    /// Pressure reveal, drift, and resistance thresholds.
    #[serde(default)]
    pub pressure: PressureConfig,

    /// Entropy resolution parameters.
    #[serde(default)]
    pub entropy: EntropyConfig,

    /// Emergency sub-state parameters.
    #[serde(default)]
    pub emergency: EmergencyConfig,

    /// Structural spawn and parasite parameters.
    #[serde(default)]
    pub spawns: SpawnConfig,

    /// Diagnostic logging and log export.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShiftConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SHIFT_SEED` overrides `run.seed`
    /// - `SHIFT_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SHIFT_SEED` and `SHIFT_LOG_LEVEL` from the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SHIFT_SEED") {
            self.run.seed = RunSeed::Text(val);
        }
        if let Ok(val) = std::env::var("SHIFT_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run.max_rounds == 0 {
            return Err(invalid("run.max_rounds", "must be at least 1"));
        }
        let eco = &self.economy;
        if eco.capital_max_floor > eco.capital_max_ceiling {
            return Err(invalid(
                "economy.capital_max_floor",
                "must not exceed economy.capital_max_ceiling",
            ));
        }
        if eco.min_hand_size > eco.max_hand_size {
            return Err(invalid(
                "economy.min_hand_size",
                "must not exceed economy.max_hand_size",
            ));
        }
        if eco.base_max_plays == 0 {
            return Err(invalid("economy.base_max_plays", "must be at least 1"));
        }
        if self.pressure.surface_watermark == 0 {
            return Err(invalid("pressure.surface_watermark", "must be at least 1"));
        }
        if self.entropy.imbalance_low > self.entropy.imbalance_high {
            return Err(invalid(
                "entropy.imbalance_low",
                "must not exceed entropy.imbalance_high",
            ));
        }
        if self.entropy.tension_low > self.entropy.tension_high {
            return Err(invalid(
                "entropy.tension_low",
                "must not exceed entropy.tension_high",
            ));
        }
        if self.entropy.reduction_percent > 100 {
            return Err(invalid("entropy.reduction_percent", "must be 0..=100"));
        }
        if self.emergency.duration_rounds == 0 {
            return Err(invalid("emergency.duration_rounds", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

/// Run-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Seed for the run; a number or arbitrary text.
    #[serde(default = "default_seed")]
    pub seed: RunSeed,

    /// Last playable round.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Optional YAML deck file replacing the built-in deck.
    #[serde(default)]
    pub deck_path: Option<String>,

    /// Version string stamped into exported run logs.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_rounds: default_max_rounds(),
            deck_path: None,
            version: default_version(),
        }
    }
}

/// Economy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Capital at run start.
    #[serde(default = "default_starting_capital")]
    pub starting_capital: u32,

    /// Capital cap at neutral optimism.
    #[serde(default = "default_base_capital_max")]
    pub base_capital_max: u32,

    /// Lowest capital cap optimism can produce.
    #[serde(default = "default_capital_max_floor")]
    pub capital_max_floor: u32,

    /// Highest capital cap optimism can produce.
    #[serde(default = "default_capital_max_ceiling")]
    pub capital_max_ceiling: u32,

    /// Capital recovered per round before adjustments.
    #[serde(default = "default_recovery_base")]
    pub recovery_base: u32,

    /// Recovery never drops below this.
    #[serde(default = "default_recovery_min")]
    pub recovery_min: u32,

    /// Community at or above this adds 1 to recovery.
    #[serde(default = "default_recovery_community_bonus")]
    pub recovery_community_bonus: i32,

    /// Tension at or above this takes 1 from recovery.
    #[serde(default = "default_recovery_tension_penalty")]
    pub recovery_tension_penalty: i32,

    /// Structural pressure at or above this takes 1 from recovery.
    #[serde(default = "default_recovery_structural_penalty")]
    pub recovery_structural_penalty: u32,

    /// Wealth below this at round end counts as a debt round.
    #[serde(default = "default_debt_wealth_floor")]
    pub debt_wealth_floor: i32,

    /// Plays per round before modifiers.
    #[serde(default = "default_base_max_plays")]
    pub base_max_plays: u32,

    /// Hand size before capital and modifier adjustments.
    #[serde(default = "default_base_hand_size")]
    pub base_hand_size: u32,

    /// Smallest dynamic hand.
    #[serde(default = "default_min_hand_size")]
    pub min_hand_size: u32,

    /// Largest dynamic hand.
    #[serde(default = "default_max_hand_size")]
    pub max_hand_size: u32,

    /// Capital cost of removing an institutional modifier.
    #[serde(default = "default_removal_cost")]
    pub removal_cost: u32,

    /// Tension added by a removal.
    #[serde(default = "default_removal_tension")]
    pub removal_tension: i32,

    /// Parasite level shed by a removal.
    #[serde(default = "default_removal_parasite_relief")]
    pub removal_parasite_relief: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_capital: default_starting_capital(),
            base_capital_max: default_base_capital_max(),
            capital_max_floor: default_capital_max_floor(),
            capital_max_ceiling: default_capital_max_ceiling(),
            recovery_base: default_recovery_base(),
            recovery_min: default_recovery_min(),
            recovery_community_bonus: default_recovery_community_bonus(),
            recovery_tension_penalty: default_recovery_tension_penalty(),
            recovery_structural_penalty: default_recovery_structural_penalty(),
            debt_wealth_floor: default_debt_wealth_floor(),
            base_max_plays: default_base_max_plays(),
            base_hand_size: default_base_hand_size(),
            min_hand_size: default_min_hand_size(),
            max_hand_size: default_max_hand_size(),
            removal_cost: default_removal_cost(),
            removal_tension: default_removal_tension(),
            removal_parasite_relief: default_removal_parasite_relief(),
        }
    }
}

/// Starting track values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TrackConfig {
    /// Starting wellbeing.
    #[serde(default = "default_societal_track")]
    pub wellbeing: i32,
    /// Starting planet.
    #[serde(default = "default_societal_track")]
    pub planet: i32,
    /// Starting community.
    #[serde(default = "default_societal_track")]
    pub community: i32,
    /// Starting power.
    #[serde(default = "default_societal_track")]
    pub power: i32,
    /// Starting wealth.
    #[serde(default = "default_societal_track")]
    pub wealth: i32,
    /// Starting tension.
    #[serde(default = "default_tension_track")]
    pub tension: i32,
}

impl TrackConfig {
    /// The configured values as a [`Tracks`] record.
    pub const fn to_tracks(self) -> Tracks {
        Tracks {
            wellbeing: self.wellbeing,
            planet: self.planet,
            community: self.community,
            power: self.power,
            wealth: self.wealth,
            tension: self.tension,
        }
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            wellbeing: default_societal_track(),
            planet: default_societal_track(),
            community: default_societal_track(),
            power: default_societal_track(),
            wealth: default_societal_track(),
            tension: default_tension_track(),
        }
    }
}

/// Pressure state machine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PressureConfig {
    /// Earliest round pressure can be revealed.
    #[serde(default = "default_reveal_round")]
    pub reveal_round: u32,

    /// Tension at or above this reveals pressure.
    #[serde(default = "default_reveal_tension")]
    pub reveal_tension: i32,

    /// Power at or above this reveals pressure.
    #[serde(default = "default_reveal_power")]
    pub reveal_power: i32,

    /// Wealth at or below this reveals pressure.
    #[serde(default = "default_reveal_wealth_floor")]
    pub reveal_wealth_floor: i32,

    /// Pressure value that activates resistance.
    #[serde(default = "default_resistance_threshold")]
    pub resistance_threshold: u32,

    /// Structural pressure added when resistance activates.
    #[serde(default = "default_resistance_structural_bump")]
    pub resistance_structural_bump: u32,

    /// Tension at or above this feeds pressure each round.
    #[serde(default = "default_tension_watermark")]
    pub tension_watermark: i32,

    /// Surface pressure converts to structural in chunks of this size.
    #[serde(default = "default_surface_watermark")]
    pub surface_watermark: u32,

    /// Structural pressure gained per converted chunk.
    #[serde(default = "default_structural_per_chunk")]
    pub structural_per_chunk: u32,

    /// Wealth at or above this signals wealth concentration.
    #[serde(default = "default_wealth_concentration")]
    pub wealth_concentration: i32,

    /// Planet at or below this signals ecological stress.
    #[serde(default = "default_ecological_stress")]
    pub ecological_stress: i32,

    /// Power at or above this signals power centralization.
    #[serde(default = "default_power_centralization")]
    pub power_centralization: i32,

    /// Wellbeing at or below this signals social breakdown.
    #[serde(default = "default_social_breakdown")]
    pub social_breakdown: i32,

    /// Community at or below this signals community fragmentation.
    #[serde(default = "default_community_fragmentation")]
    pub community_fragmentation: i32,

    /// Momentum at or above this provokes a security crackdown once
    /// resistance is active.
    #[serde(default = "default_crackdown_momentum")]
    pub crackdown_momentum: u32,

    /// Structural pressure at or above this provokes a bureaucratic slowdown.
    #[serde(default = "default_slowdown_structural")]
    pub slowdown_structural: u32,

    /// Wealth at or above this entrenches elite consolidation again.
    #[serde(default = "default_entrenchment_wealth")]
    pub entrenchment_wealth: i32,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            reveal_round: default_reveal_round(),
            reveal_tension: default_reveal_tension(),
            reveal_power: default_reveal_power(),
            reveal_wealth_floor: default_reveal_wealth_floor(),
            resistance_threshold: default_resistance_threshold(),
            resistance_structural_bump: default_resistance_structural_bump(),
            tension_watermark: default_tension_watermark(),
            surface_watermark: default_surface_watermark(),
            structural_per_chunk: default_structural_per_chunk(),
            wealth_concentration: default_wealth_concentration(),
            ecological_stress: default_ecological_stress(),
            power_centralization: default_power_centralization(),
            social_breakdown: default_social_breakdown(),
            community_fragmentation: default_community_fragmentation(),
            crackdown_momentum: default_crackdown_momentum(),
            slowdown_structural: default_slowdown_structural(),
            entrenchment_wealth: default_entrenchment_wealth(),
        }
    }
}

/// Entropy engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntropyConfig {
    /// Entropy below this is left alone by the resolution step.
    #[serde(default = "default_resolution_threshold")]
    pub resolution_threshold: u32,

    /// Reform strength above this halves entropy.
    #[serde(default = "default_reform_threshold")]
    pub reform_threshold: i32,

    /// Share of entropy removed by a reform resolution.
    #[serde(default = "default_reduction_percent")]
    pub reduction_percent: u32,

    /// Unresolved entropy above this leaves a structural scar.
    #[serde(default = "default_scar_threshold")]
    pub scar_threshold: u32,

    /// Imbalance above this adds 1 entropy per round.
    #[serde(default = "default_imbalance_low")]
    pub imbalance_low: i32,

    /// Imbalance above this adds 2 instead.
    #[serde(default = "default_imbalance_high")]
    pub imbalance_high: i32,

    /// Tension above this adds 1 entropy per round.
    #[serde(default = "default_entropy_tension_low")]
    pub tension_low: i32,

    /// Tension above this adds 2 instead.
    #[serde(default = "default_entropy_tension_high")]
    pub tension_high: i32,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            resolution_threshold: default_resolution_threshold(),
            reform_threshold: default_reform_threshold(),
            reduction_percent: default_reduction_percent(),
            scar_threshold: default_scar_threshold(),
            imbalance_low: default_imbalance_low(),
            imbalance_high: default_imbalance_high(),
            tension_low: default_entropy_tension_low(),
            tension_high: default_entropy_tension_high(),
        }
    }
}

/// Emergency sub-state configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmergencyConfig {
    /// Planet below this triggers an emergency.
    #[serde(default = "default_emergency_floor")]
    pub planet_floor: i32,

    /// Wellbeing below this triggers an emergency.
    #[serde(default = "default_emergency_floor")]
    pub wellbeing_floor: i32,

    /// Tension above this triggers an emergency.
    #[serde(default = "default_tension_ceiling")]
    pub tension_ceiling: i32,

    /// Round ends an emergency lasts before resolving.
    #[serde(default = "default_duration_rounds")]
    pub duration_rounds: u32,

    /// Wellbeing and community above this score recovery points.
    #[serde(default = "default_recovery_threshold")]
    pub recovery_threshold: i32,

    /// Score needed for a successful resolution.
    #[serde(default = "default_success_score")]
    pub success_score: u32,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            planet_floor: default_emergency_floor(),
            wellbeing_floor: default_emergency_floor(),
            tension_ceiling: default_tension_ceiling(),
            duration_rounds: default_duration_rounds(),
            recovery_threshold: default_recovery_threshold(),
            success_score: default_success_score(),
        }
    }
}

/// Structural spawn configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpawnConfig {
    /// Upper bound on parasite level.
    #[serde(default = "default_parasite_cap")]
    pub parasite_cap: u32,

    /// Wealth at or above this (with power over community and tension) spawns elite capture.
    #[serde(default = "default_capture_wealth")]
    pub capture_wealth: i32,

    /// Structural pressure at or above this spawns media distortion.
    #[serde(default = "default_distortion_structural")]
    pub distortion_structural: u32,

    /// Tension at or above this (with low momentum) spawns social unrest.
    #[serde(default = "default_unrest_tension")]
    pub unrest_tension: i32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            parasite_cap: default_parasite_cap(),
            capture_wealth: default_capture_wealth(),
            distortion_structural: default_distortion_structural(),
            unrest_tension: default_unrest_tension(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit diagnostic logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,

    /// Where the binary writes the JSON run log, if anywhere.
    #[serde(default)]
    pub run_log_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            run_log_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_seed() -> RunSeed {
    RunSeed::Number(42)
}

const fn default_max_rounds() -> u32 {
    10
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}

const fn default_starting_capital() -> u32 {
    10
}

const fn default_base_capital_max() -> u32 {
    15
}

const fn default_capital_max_floor() -> u32 {
    10
}

const fn default_capital_max_ceiling() -> u32 {
    20
}

const fn default_recovery_base() -> u32 {
    5
}

const fn default_recovery_min() -> u32 {
    1
}

const fn default_recovery_community_bonus() -> i32 {
    60
}

const fn default_recovery_tension_penalty() -> i32 {
    60
}

const fn default_recovery_structural_penalty() -> u32 {
    10
}

const fn default_debt_wealth_floor() -> i32 {
    30
}

const fn default_base_max_plays() -> u32 {
    3
}

const fn default_base_hand_size() -> u32 {
    5
}

const fn default_min_hand_size() -> u32 {
    3
}

const fn default_max_hand_size() -> u32 {
    7
}

const fn default_removal_cost() -> u32 {
    5
}

const fn default_removal_tension() -> i32 {
    3
}

const fn default_removal_parasite_relief() -> u32 {
    3
}

const fn default_societal_track() -> i32 {
    50
}

const fn default_tension_track() -> i32 {
    20
}

const fn default_reveal_round() -> u32 {
    4
}

const fn default_reveal_tension() -> i32 {
    75
}

const fn default_reveal_power() -> i32 {
    60
}

const fn default_reveal_wealth_floor() -> i32 {
    60
}

const fn default_resistance_threshold() -> u32 {
    40
}

const fn default_resistance_structural_bump() -> u32 {
    3
}

const fn default_tension_watermark() -> i32 {
    30
}

const fn default_surface_watermark() -> u32 {
    5
}

const fn default_structural_per_chunk() -> u32 {
    2
}

const fn default_wealth_concentration() -> i32 {
    90
}

const fn default_ecological_stress() -> i32 {
    25
}

const fn default_power_centralization() -> i32 {
    60
}

const fn default_social_breakdown() -> i32 {
    20
}

const fn default_community_fragmentation() -> i32 {
    15
}

const fn default_crackdown_momentum() -> u32 {
    8
}

const fn default_slowdown_structural() -> u32 {
    10
}

const fn default_entrenchment_wealth() -> i32 {
    100
}

const fn default_resolution_threshold() -> u32 {
    10
}

const fn default_reform_threshold() -> i32 {
    160
}

const fn default_reduction_percent() -> u32 {
    50
}

const fn default_scar_threshold() -> u32 {
    20
}

const fn default_imbalance_low() -> i32 {
    25
}

const fn default_imbalance_high() -> i32 {
    40
}

const fn default_entropy_tension_low() -> i32 {
    40
}

const fn default_entropy_tension_high() -> i32 {
    60
}

const fn default_emergency_floor() -> i32 {
    20
}

const fn default_tension_ceiling() -> i32 {
    80
}

const fn default_duration_rounds() -> u32 {
    3
}

const fn default_recovery_threshold() -> i32 {
    50
}

const fn default_success_score() -> u32 {
    4
}

const fn default_parasite_cap() -> u32 {
    50
}

const fn default_capture_wealth() -> i32 {
    85
}

const fn default_distortion_structural() -> u32 {
    12
}

const fn default_unrest_tension() -> i32 {
    70
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_canonical() {
        let config = ShiftConfig::default();
        assert_eq!(config.run.max_rounds, 10);
        assert_eq!(config.run.seed, RunSeed::Number(42));
        assert_eq!(config.economy.starting_capital, 10);
        assert_eq!(config.economy.base_capital_max, 15);
        assert_eq!(config.tracks.tension, 20);
        assert_eq!(config.tracks.to_tracks().wealth, 50);
        assert_eq!(config.pressure.resistance_threshold, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let yaml = r#"
run:
  seed: "spring-1848"
  max_rounds: 12
economy:
  starting_capital: 8
tracks:
  planet: 35
logging:
  run_log_path: "runs/latest.json"
"#;
        let config = ShiftConfig::parse(yaml).unwrap();
        assert_eq!(config.run.seed, RunSeed::from("spring-1848"));
        assert_eq!(config.run.max_rounds, 12);
        assert_eq!(config.economy.starting_capital, 8);
        assert_eq!(config.economy.recovery_base, 5);
        assert_eq!(config.tracks.planet, 35);
        assert_eq!(config.tracks.wellbeing, 50);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.run_log_path.as_deref(), Some("runs/latest.json"));
    }

    #[test]
    fn numeric_seed_parses_as_number() {
        let config = ShiftConfig::parse("run:\n  seed: 7\n").unwrap();
        assert_eq!(config.run.seed, RunSeed::Number(7));
    }

    #[test]
    fn empty_yaml_yields_defaults() {
        let config = ShiftConfig::parse("{}").unwrap();
        assert_eq!(config, ShiftConfig::default());
    }

    #[test]
    fn zero_rounds_rejected() {
        let result = ShiftConfig::parse("run:\n  max_rounds: 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "run.max_rounds",
                ..
            })
        ));
    }

    #[test]
    fn inverted_hand_bounds_rejected() {
        let yaml = "economy:\n  min_hand_size: 8\n  max_hand_size: 4\n";
        assert!(ShiftConfig::parse(yaml).is_err());
    }

    #[test]
    fn tunable_thresholds_default_and_override() {
        let config = ShiftConfig::default();
        assert_eq!(config.pressure.wealth_concentration, 90);
        assert_eq!(config.pressure.crackdown_momentum, 8);
        assert_eq!(config.entropy.imbalance_high, 40);
        assert_eq!(config.economy.debt_wealth_floor, 30);

        let yaml = "pressure:\n  power_centralization: 70\nentropy:\n  tension_low: 50\n";
        let config = ShiftConfig::parse(yaml).unwrap();
        assert_eq!(config.pressure.power_centralization, 70);
        assert_eq!(config.entropy.tension_low, 50);
        assert_eq!(config.entropy.tension_high, 60);
    }

    #[test]
    fn inverted_entropy_tiers_rejected() {
        let yaml = "entropy:\n  imbalance_low: 50\n  imbalance_high: 30\n";
        assert!(matches!(
            ShiftConfig::parse(yaml),
            Err(ConfigError::Invalid {
                field: "entropy.imbalance_low",
                ..
            })
        ));
    }

    #[test]
    fn shipped_config_file_matches_defaults() {
        let shipped = ShiftConfig::parse(include_str!("../../../shift-config.yaml")).unwrap();
        assert_eq!(shipped, ShiftConfig::default());
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = ShiftConfig::parse("run: [unterminated");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
