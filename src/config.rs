//! Game configuration: the rule variant plus the board shape.
//!
//! A configuration can be built in code from a [`Variant`]'s defaults or
//! loaded from a TOML file:
//!
//! ```toml
//! variant = "congklak"
//! pits_per_side = 6
//! stones_per_pit = 7
//! sweep_on_finish = false
//! relay_limit = 1024
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Layout;
use crate::constants::{
    BAO_PITS, BAO_STONES, CLASSIC_PITS, CLASSIC_STONES, CONGKLAK_PITS, CONGKLAK_STONES,
    MAX_PITS, MAX_STONES, RELAY_LIMIT,
};
use crate::error::ConfigError;

/// Rule set governing adjacency, captures and relay sowing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single sow, extra turn when the last stone lands in the mover's store.
    Classic,
    /// Relay sowing; a last stone in an empty own pit captures the opposite pit.
    Congklak,
    /// Two rows per side; inner-row landings capture both facing pits.
    Bao,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Classic, Variant::Congklak, Variant::Bao];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Congklak => "congklak",
            Variant::Bao => "bao",
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Variant::Classic | Variant::Congklak => Layout::Ring,
            Variant::Bao => Layout::TwoRow,
        }
    }

    pub fn default_pits(self) -> usize {
        match self {
            Variant::Classic => CLASSIC_PITS,
            Variant::Congklak => CONGKLAK_PITS,
            Variant::Bao => BAO_PITS,
        }
    }

    pub fn default_stones(self) -> usize {
        match self {
            Variant::Classic => CLASSIC_STONES,
            Variant::Congklak => CONGKLAK_STONES,
            Variant::Bao => BAO_STONES,
        }
    }

    /// How to play, as shown to a human player.
    pub fn rules(self) -> &'static str {
        match self {
            Variant::Classic => CLASSIC_RULES,
            Variant::Congklak => CONGKLAK_RULES,
            Variant::Bao => BAO_RULES,
        }
    }
}

const CLASSIC_RULES: &str = "\
Each side owns a row of pits and the store at its right-hand end.
On your turn, pick up every stone in one of your pits and sow them one by one
into the following pits, counter-clockwise. Your own store gets a stone as you
pass it; your opponent's store is skipped.
If the last stone lands in your store, you move again. Otherwise the turn passes.
The game ends as soon as either row is empty. The side with more stones in its
store wins.";

const CONGKLAK_RULES: &str = "\
Sow as in classic mancala: pick up a pit of your own, drop one stone per pit,
counter-clockwise, into your own store but never your opponent's.
Where the last stone lands decides what happens next:
- your store: the turn ends, and you move again;
- an empty pit on your side: you capture that stone and everything in the pit
  directly across, and the turn passes;
- a pit that already held stones: pick them all up and keep sowing from there;
- an empty pit on your opponent's side: the turn passes.
The game ends as soon as either row is empty. The side with more stones in its
store wins.";

const BAO_RULES: &str = "\
Each side owns two rows of pits: an outer row and an inner row facing the
opponent. Sowing circles your own two rows and never passes a store.
Pick up a pit of your own and drop one stone per pit. If the last stone lands
in your inner row and both facing opponent pits hold stones, the landing pit
and both facing pits go into your store. Otherwise, if the landing pit already
held stones, pick them all up and keep sowing; if it was empty, the turn passes.
The game ends as soon as either side's pits are empty. The side with more
stones in its store wins.";

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}

/// Everything needed to set up a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    pub pits_per_side: usize,
    pub stones_per_pit: usize,
    /// Move each side's remaining row stones into its own store when the game
    /// ends, before the winner is decided.
    pub sweep_on_finish: bool,
    /// Maximum sows in one turn before relay sowing stops.
    pub relay_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::for_variant(Variant::Classic)
    }
}

/// On-disk form of [`GameConfig`]; omitted fields fall back to the variant's
/// defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    variant: Variant,
    pits_per_side: Option<usize>,
    stones_per_pit: Option<usize>,
    #[serde(default)]
    sweep_on_finish: bool,
    relay_limit: Option<usize>,
}

impl GameConfig {
    /// The default board for a variant.
    pub fn for_variant(variant: Variant) -> Self {
        GameConfig {
            variant,
            pits_per_side: variant.default_pits(),
            stones_per_pit: variant.default_stones(),
            sweep_on_finish: false,
            relay_limit: RELAY_LIMIT,
        }
    }

    pub fn with_board(mut self, pits_per_side: usize, stones_per_pit: usize) -> Self {
        self.pits_per_side = pits_per_side;
        self.stones_per_pit = stones_per_pit;
        self
    }

    pub fn with_sweep_on_finish(mut self, sweep: bool) -> Self {
        self.sweep_on_finish = sweep;
        self
    }

    pub fn with_relay_limit(mut self, limit: usize) -> Self {
        self.relay_limit = limit;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        let defaults = GameConfig::for_variant(file.variant);
        let config = GameConfig {
            variant: file.variant,
            pits_per_side: file.pits_per_side.unwrap_or(defaults.pits_per_side),
            stones_per_pit: file.stones_per_pit.unwrap_or(defaults.stones_per_pit),
            sweep_on_finish: file.sweep_on_finish,
            relay_limit: file.relay_limit.unwrap_or(defaults.relay_limit),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pits_per_side == 0 {
            return Err(ConfigError::Validation("pits_per_side must be > 0".into()));
        }
        if self.stones_per_pit == 0 {
            return Err(ConfigError::Validation("stones_per_pit must be > 0".into()));
        }
        if self.relay_limit == 0 {
            return Err(ConfigError::Validation("relay_limit must be > 0".into()));
        }
        if self.variant == Variant::Bao && self.pits_per_side % 2 != 0 {
            return Err(ConfigError::Validation(format!(
                "bao needs two equal rows per side, got {} pits",
                self.pits_per_side
            )));
        }
        if self.pits_per_side > MAX_PITS {
            return Err(ConfigError::Validation(format!(
                "pits_per_side must be <= {MAX_PITS}, got {}",
                self.pits_per_side
            )));
        }
        if self.stones_per_pit > MAX_STONES {
            return Err(ConfigError::Validation(format!(
                "stones_per_pit must be <= {MAX_STONES}, got {}",
                self.stones_per_pit
            )));
        }
        let total = self
            .pits_per_side
            .checked_mul(self.stones_per_pit)
            .and_then(|n| n.checked_mul(2))
            .filter(|&n| u32::try_from(n).is_ok());
        if total.is_none() {
            return Err(ConfigError::Validation(
                "stone count does not fit in a stone id".into(),
            ));
        }
        Ok(())
    }

    /// Total stones on the board for this configuration.
    pub fn total_stones(&self) -> usize {
        self.pits_per_side
            .saturating_mul(self.stones_per_pit)
            .saturating_mul(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_defaults() {
        let classic = GameConfig::for_variant(Variant::Classic);
        assert_eq!((classic.pits_per_side, classic.stones_per_pit), (6, 4));
        let congklak = GameConfig::for_variant(Variant::Congklak);
        assert_eq!((congklak.pits_per_side, congklak.stones_per_pit), (6, 7));
        let bao = GameConfig::for_variant(Variant::Bao);
        assert_eq!((bao.pits_per_side, bao.stones_per_pit), (16, 1));
        for variant in Variant::ALL {
            assert!(GameConfig::for_variant(variant).validate().is_ok());
        }
    }

    #[test]
    fn test_every_variant_has_rules() {
        assert!(Variant::Classic.rules().contains("move again"));
        assert!(Variant::Congklak.rules().contains("directly across"));
        assert!(Variant::Bao.rules().contains("inner row"));
        for variant in Variant::ALL {
            assert!(!variant.rules().starts_with('\n'));
            let others = Variant::ALL.into_iter().filter(|&v| v != variant);
            for other in others {
                assert_ne!(variant.rules(), other.rules());
            }
        }
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Congklak".parse::<Variant>().unwrap(), Variant::Congklak);
        assert_eq!("bao".parse::<Variant>().unwrap(), Variant::Bao);
        assert!(matches!(
            "oware".parse::<Variant>(),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_validation_rejects_empty_boards() {
        let config = GameConfig::for_variant(Variant::Classic).with_board(0, 4);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Classic).with_board(6, 0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Bao).with_board(15, 1);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Congklak).with_relay_limit(0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let config = GameConfig::from_toml("variant = \"congklak\"\n").unwrap();
        assert_eq!(config, GameConfig::for_variant(Variant::Congklak));

        let config = GameConfig::from_toml(
            "variant = \"classic\"\npits_per_side = 4\nstones_per_pit = 3\nsweep_on_finish = true\n",
        )
        .unwrap();
        assert_eq!(config.pits_per_side, 4);
        assert_eq!(config.stones_per_pit, 3);
        assert!(config.sweep_on_finish);
        assert_eq!(config.relay_limit, RELAY_LIMIT);
    }

    #[test]
    fn test_from_toml_errors() {
        assert!(matches!(
            GameConfig::from_toml("variant = \"chess\"\n"),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(matches!(
            GameConfig::from_toml("variant = \"bao\"\npits_per_side = 9\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            GameConfig::from_toml("variant = \"bao\"\nseeds = 9\n"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_validation_rejects_oversized_boards() {
        let config = GameConfig::from_toml(
            "variant = \"classic\"\npits_per_side = 4611686018427387904\nstones_per_pit = 4\n",
        );
        assert!(matches!(config, Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Classic).with_board(usize::MAX, usize::MAX);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        assert_eq!(config.total_stones(), usize::MAX);

        let config = GameConfig::for_variant(Variant::Congklak).with_board(MAX_PITS + 1, 1);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Congklak).with_board(6, MAX_STONES + 1);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = GameConfig::for_variant(Variant::Bao).with_board(MAX_PITS, MAX_STONES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
