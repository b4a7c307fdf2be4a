use crate::analysis::config::AnalysisConfig;
use crate::models::{KeywordSet, MoodLabel, Recommendation, RecommendationKind, TextSentiment};

/// Inputs visible to every rule.
pub struct RuleContext<'a> {
    pub sentiment: &'a TextSentiment,
    pub keywords: &'a KeywordSet,
    /// Not read by any built-in rule yet.
    pub mood: Option<MoodLabel>,
    pub sentiment_threshold: f64,
}

/// Fixed copy emitted when a rule fires.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationTemplate {
    pub kind: RecommendationKind,
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

/// One predicate → recommendation pair. The predicate returns the confidence
/// when the rule fires.
#[derive(Clone, Copy)]
pub struct RecommendationRule {
    pub name: &'static str,
    pub predicate: fn(&RuleContext<'_>) -> Option<f64>,
    pub template: RecommendationTemplate,
}

impl RecommendationRule {
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Recommendation> {
        (self.predicate)(ctx).map(|confidence| Recommendation {
            kind: self.template.kind,
            title: self.template.title.to_string(),
            description: self.template.description.to_string(),
            link: self.template.link.to_string(),
            confidence,
        })
    }
}

impl std::fmt::Debug for RecommendationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationRule")
            .field("name", &self.name)
            .field("template", &self.template)
            .finish()
    }
}

fn upbeat(ctx: &RuleContext<'_>) -> Option<f64> {
    (ctx.sentiment.positive > ctx.sentiment_threshold).then_some(ctx.sentiment.positive)
}

// Only when the upbeat rule did not fire.
fn calming(ctx: &RuleContext<'_>) -> Option<f64> {
    let s = ctx.sentiment;
    (s.positive <= ctx.sentiment_threshold && s.negative > ctx.sentiment_threshold)
        .then_some(s.negative)
}

fn breathing(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.keywords
        .contains_any(&["stress", "anxious", "worried"])
        .then_some(0.8)
}

fn light_exercise(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.keywords
        .contains_any(&["sad", "depressed", "down"])
        .then_some(0.7)
}

fn mindfulness(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.keywords
        .contains_any(&["overwhelmed", "busy", "tired"])
        .then_some(0.9)
}

fn social(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.keywords
        .contains_any(&["lonely", "isolated"])
        .then_some(0.8)
}

fn sleep_hygiene(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.keywords
        .contains_any(&["sleep", "tired", "insomnia"])
        .then_some(0.9)
}

/// Built-in rules in evaluation order. Truncation keeps the earliest.
pub const DEFAULT_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        name: "upbeat-playlist",
        predicate: upbeat,
        template: RecommendationTemplate {
            kind: RecommendationKind::Song,
            title: "Upbeat Playlist",
            description: "Enjoy some uplifting music to match your positive mood",
            link: "https://open.spotify.com/playlist/upbeat",
        },
    },
    RecommendationRule {
        name: "calming-music",
        predicate: calming,
        template: RecommendationTemplate {
            kind: RecommendationKind::Song,
            title: "Calming Music",
            description: "Gentle music to help soothe your emotions",
            link: "https://open.spotify.com/playlist/calming",
        },
    },
    RecommendationRule {
        name: "breathing-exercise",
        predicate: breathing,
        template: RecommendationTemplate {
            kind: RecommendationKind::Exercise,
            title: "Breathing Exercise",
            description: "Try the 4-7-8 breathing technique to reduce stress",
            link: "/meditation/breathing",
        },
    },
    RecommendationRule {
        name: "light-exercise",
        predicate: light_exercise,
        template: RecommendationTemplate {
            kind: RecommendationKind::Exercise,
            title: "Light Exercise",
            description: "A gentle walk or light stretching can help improve your mood",
            link: "/meditation/exercise",
        },
    },
    RecommendationRule {
        name: "mindfulness-meditation",
        predicate: mindfulness,
        template: RecommendationTemplate {
            kind: RecommendationKind::Meditation,
            title: "Mindfulness Meditation",
            description: "Take 10 minutes to practice mindfulness and recenter yourself",
            link: "/meditation/mindfulness",
        },
    },
    RecommendationRule {
        name: "social-connection",
        predicate: social,
        template: RecommendationTemplate {
            kind: RecommendationKind::Activity,
            title: "Social Connection",
            description: "Consider reaching out to a friend or joining our community",
            link: "/community",
        },
    },
    RecommendationRule {
        name: "sleep-hygiene",
        predicate: sleep_hygiene,
        template: RecommendationTemplate {
            kind: RecommendationKind::Article,
            title: "Sleep Hygiene Tips",
            description: "Learn about healthy sleep habits and routines",
            link: "/resources/sleep",
        },
    },
];

/// Evaluate every rule in order, then keep the first `recommendation_limit` hits.
pub fn recommend(
    sentiment: &TextSentiment,
    keywords: &KeywordSet,
    mood: Option<MoodLabel>,
    rules: &[RecommendationRule],
    config: &AnalysisConfig,
) -> Vec<Recommendation> {
    let ctx = RuleContext {
        sentiment,
        keywords,
        mood,
        sentiment_threshold: config.sentiment_threshold,
    };

    let mut recommendations: Vec<Recommendation> =
        rules.iter().filter_map(|rule| rule.evaluate(&ctx)).collect();
    recommendations.truncate(config.recommendation_limit);
    recommendations
}
