use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::analysis::config::{MAX_KEYWORDS, MAX_RECOMMENDATIONS};
use crate::analysis::{AnalysisConfig, Lexicon, TextAnalyzer};

/// Replacement word lists; `None` keeps the built-in list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LexiconSettings {
    pub positive_words: Option<Vec<String>>,
    pub negative_words: Option<Vec<String>>,
    pub stop_words: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    pub keyword_limit: usize,
    pub recommendation_limit: usize,
    pub sentiment_threshold: f64,
    pub words_per_minute: u32,
    pub default_window_days: u32,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            keyword_limit: config.keyword_limit,
            recommendation_limit: config.recommendation_limit,
            sentiment_threshold: config.sentiment_threshold,
            words_per_minute: config.words_per_minute,
            default_window_days: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub lexicon: LexiconSettings,
    pub analysis: AnalysisSettings,
}

impl UserSettings {
    /// Rejects limits beyond what analysis results may hold.
    pub fn validate(&self) -> Result<()> {
        let analysis = &self.analysis;
        if analysis.keyword_limit > MAX_KEYWORDS {
            bail!("keywordLimit must be at most {MAX_KEYWORDS}");
        }
        if analysis.recommendation_limit > MAX_RECOMMENDATIONS {
            bail!("recommendationLimit must be at most {MAX_RECOMMENDATIONS}");
        }
        if !(0.0..=1.0).contains(&analysis.sentiment_threshold) {
            bail!("sentimentThreshold must be between 0 and 1");
        }
        Ok(())
    }

    /// Analyzer built from the built-in lexicon with these overrides applied.
    pub fn analyzer(&self) -> TextAnalyzer {
        let lexicon = Lexicon::default().with_overrides(
            self.lexicon.positive_words.as_deref(),
            self.lexicon.negative_words.as_deref(),
            self.lexicon.stop_words.as_deref(),
        );
        let config = AnalysisConfig {
            keyword_limit: self.analysis.keyword_limit.min(MAX_KEYWORDS),
            recommendation_limit: self.analysis.recommendation_limit.min(MAX_RECOMMENDATIONS),
            sentiment_threshold: self.analysis.sentiment_threshold,
            words_per_minute: self.analysis.words_per_minute,
            ..AnalysisConfig::default()
        };
        TextAnalyzer::new(lexicon, config)
    }
}

/// JSON settings file. A missing file means defaults.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data: UserSettings = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings in {}", path.display()))?
        } else {
            UserSettings::default()
        };
        data.validate()
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn settings(&self) -> UserSettings {
        self.read().clone()
    }

    pub fn analyzer(&self) -> TextAnalyzer {
        self.read().analyzer()
    }

    pub fn default_window_days(&self) -> u32 {
        self.read().analysis.default_window_days
    }

    pub fn update(&self, settings: UserSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.write();
        *guard = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory {}", parent.display())
                })?;
            }
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
