use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const BASE_URL: &str = "https://www.vlr.gg";

const DEFAULT_MATCHES_URL: &str =
    "https://www.vlr.gg/event/matches/2004/champions-tour-2024-americas-stage-1/?series_id=3836";
const OVERVIEW_SUFFIX: &str = "/?game=all&tab=overview";
const PERFORMANCE_SUFFIX: &str = "/?game=all&tab=performance";

const DEFAULT_TEAMS: &[&str] = &[
    "MIBR", "LEV", "SEN", "NRG", "FUR", "100T", "LOUD", "EG", "G2", "C9", "KRÜ",
];

// (display name as rendered next to the team tag, canonical player name)
const DEFAULT_NAME_MAP: &[(&str, &str)] = &[
    ("Apoth EG", "Apoth"),
    ("artzin MIBR", "artzin"),
    ("aspas LEV", "aspas"),
    ("Asuna 100T", "Asuna"),
    ("bang 100T", "bang"),
    ("Boostio 100T", "Boostio"),
    ("C0M LEV", "C0M"),
    ("cauanzin LOUD", "cauanzin"),
    ("crashies NRG", "crashies"),
    ("Cryocells 100T", "Cryocells"),
    ("Derrek EG", "Derrek"),
    ("eeiu 100T", "eeiu"),
    ("Ethan NRG", "Ethan"),
    ("FiNESSE NRG", "FiNESSE"),
    ("havoc FUR", "havoc"),
    ("heat KRÜ", "heat"),
    ("icy G2", "icy"),
    ("jawgemo EG", "jawgemo"),
    ("johnqt SEN", "johnqt"),
    ("JonahP G2", "JonahP"),
    ("keznit KRÜ", "keznit"),
    ("Khalil FUR", "Khalil"),
    ("kiNgg LEV", "kiNgg"),
    ("Klaus KRÜ", "Klaus"),
    ("leaf G2", "leaf"),
    ("Less LOUD", "Less"),
    ("liazzi MIBR", "liazzi"),
    ("mazin MIBR", "mazin"),
    ("Mazino LEV", "Mazino"),
    ("Melser KRÜ", "Melser"),
    ("moose C9", "moose"),
    ("mta KRÜ", "mta"),
    ("mwzera FUR", "mwzera"),
    ("NaturE EG", "NaturE"),
    ("nzr FUR", "nzr"),
    ("OXY C9", "OXY"),
    ("Pa1nt MIBR", "Pa1nt"),
    ("Palla MIBR", "Palla"),
    ("pANcada LOUD", "pANcada"),
    ("rich MIBR", "rich"),
    ("runi C9", "runi"),
    ("s0m NRG", "s0m"),
    ("saadhak LOUD", "saadhak"),
    ("Sacy SEN", "Sacy"),
    ("ShahZaM MIBR", "ShahZaM"),
    ("Shyy KRÜ", "Shyy"),
    ("supamen EG", "supamen"),
    ("TenZ SEN", "TenZ"),
    ("tex LEV", "tex"),
    ("trent G2", "trent"),
    ("tuyz LOUD", "tuyz"),
    ("valyn G2", "valyn"),
    ("vanity C9", "vanity"),
    ("Victor NRG", "Victor"),
    ("xand FUR", "xand"),
    ("Xeppaa C9", "Xeppaa"),
    ("zekken SEN", "zekken"),
    ("Zellsis SEN", "Zellsis"),
    ("Quick LOUD", "Quick"),
];

/// One display name → canonical name entry, as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMapping {
    pub display: String,
    pub canonical: String,
}

/// Display name (as shown on the stats table) → canonical player name.
///
/// Stored as a list of entries in config files so keys keep their case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<NameMapping>")]
pub struct NameMap(HashMap<String, String>);

impl NameMap {
    /// Canonical name for `display`, or `display` itself when unmapped.
    pub fn resolve<'a>(&'a self, display: &'a str) -> &'a str {
        self.0.get(display).map(String::as_str).unwrap_or(display)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<NameMapping>> for NameMap {
    fn from(entries: Vec<NameMapping>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|e| (e.display, e.canonical))
                .collect(),
        )
    }
}

impl<D: Into<String>, C: Into<String>> FromIterator<(D, C)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (D, C)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(d, c)| (d.into(), c.into())).collect())
    }
}

/// How the assembler treats the redundant summary block vlr.gg renders
/// among a match's map tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPolicy {
    /// Remove the second combined table of every match that has more than one.
    #[default]
    DropSecond,
    KeepAll,
}

/// Everything the scraping half needs to know about one event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub matches_url: String,
    pub overview_suffix: String,
    pub performance_suffix: String,
    /// Team tags expected as the trailing token of display names.
    pub teams: Vec<String>,
    pub name_map: NameMap,
    pub summary_policy: SummaryPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            matches_url: DEFAULT_MATCHES_URL.to_string(),
            overview_suffix: OVERVIEW_SUFFIX.to_string(),
            performance_suffix: PERFORMANCE_SUFFIX.to_string(),
            teams: DEFAULT_TEAMS.iter().map(|t| t.to_string()).collect(),
            name_map: DEFAULT_NAME_MAP.iter().copied().collect(),
            summary_policy: SummaryPolicy::default(),
        }
    }
}

impl ScrapeConfig {
    /// Load a config file (format picked from its extension); fields it
    /// leaves out keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Where the importer finds its CSV extracts and the store it writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportSettings {
    pub data_dir: PathBuf,
    pub database_url: String,
}

impl ImportSettings {
    /// Read `VLR_DATA_DIR` and `VLR_DATABASE_URL`; the data directory
    /// defaults to `Data`.
    pub fn from_env() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("data_dir", "Data")?
            .add_source(::config::Environment::with_prefix("VLR"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn games_csv(&self) -> PathBuf {
        self.data_dir.join("scores_data.csv")
    }

    pub fn players_csv(&self) -> PathBuf {
        self.data_dir.join("player_data.csv")
    }

    pub fn stats_csv(&self) -> PathBuf {
        self.data_dir.join("all_stats.csv")
    }
}
