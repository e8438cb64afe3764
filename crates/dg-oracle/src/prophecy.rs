//! Prophecies from the Delphi oracle.
//!
//! A prophecy is a template sentence with `{token}` placeholders. Tokens
//! resolve to a word-list pick, a stat label chosen from the subject, or a
//! field of the subject's sheet. Each token resolves once per prophecy, so a
//! token used twice reads the same both times. Tokens with no meaning are
//! left as written.
//!
//! Recently used templates are tracked in a [`ProphecyHistory`] that the
//! caller owns and passes back in. The generator never keeps state of its
//! own.

use std::collections::{BTreeMap, HashMap, VecDeque};

use dg_core::{Attribute, CharacterSheet};
use dg_mechanics::RandomSource;
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

/// Most template indices a history remembers.
pub const HISTORY_CAPACITY: usize = 15;

/// How many recent entries survive a reset once every template is used.
pub const HISTORY_KEEP_ON_RESET: usize = 5;

/// Patron named when the sheet names none.
pub const FALLBACK_GOD: &str = "Zeus";

/// Connection percentage used when the subject has none.
pub const FALLBACK_CONNECTION: u32 = 50;

/// The stats a prophecy may mention, in tie-break order.
pub const PROPHECY_STATS: [Attribute; 7] = [
    Attribute::Strength,
    Attribute::Dexterity,
    Attribute::Intelligence,
    Attribute::Charisma,
    Attribute::Magic,
    Attribute::Health,
    Attribute::Sanity,
];

const STANDARD_TEMPLATES: &[&str] = &[
    "When your {attribute} is tested, {god} will be watching closely...",
    "The child of {god} will meet {challenge} on the road ahead...",
    "Beware when your {lowStat} is challenged, for {consequence}...",
    "Your strength in {highStat} will be the key to {opportunity}...",
    "The winds whisper that {god} has plans for you...",
    "When the stars align, your {skill} will prove crucial...",
    "The oracle foresees that {prediction} in dark times...",
    "Your divine connection of {connection}% shows that {divineMessage}...",
    "The Fates weave that {fate} when you least expect it...",
    "Beware those who underestimate your {strength}, for {warning}...",
    "{god} looks away for a single breath, and in that breath you will face {challenge}...",
    "Trust your {highStat}, child of {god}, and you may {opportunity}...",
    "A shadow falls across your {lowStat}; when it lifts, {fate}...",
    "Smoke rises from the tripod: {prediction}, and {consequence}...",
    "At {connection}% the blood of {god} stirs. {divineMessage}...",
    "Do not lean on your {lowStat} alone, for {warning}...",
    "Before the next full moon your {skill} will meet {challenge}...",
    "The Pythia speaks your name beside {god}'s. In time you will {opportunity}...",
    "{god} remembers every oath. Guard your {attribute}, for {consequence}...",
    "Your {strength} is a gift from {god}. Know that {divineMessage}, and {prediction}...",
];

const CHALLENGES: &[&str] = &[
    "a great betrayal",
    "a moral dilemma",
    "a mythical creature",
    "an angry god",
    "a dark prophecy",
    "a magical labyrinth",
    "an impossible choice",
    "a necessary sacrifice",
];

const CONSEQUENCES: &[&str] = &[
    "it will be your downfall",
    "it will also be your salvation",
    "the gods will intervene",
    "an ally will reveal themselves as an enemy",
    "a hidden truth will emerge",
    "destiny will change its course",
    "a new power will awaken",
];

const OPPORTUNITIES: &[&str] = &[
    "save Olympus",
    "discover your true origin",
    "forge a legend",
    "unite the demigods",
    "restore the balance",
    "awaken hidden powers",
    "earn the recognition of the gods",
    "protect the mortals",
];

const PREDICTIONS: &[&str] = &[
    "you will find your true love",
    "an old enemy will return",
    "a family secret will be revealed",
    "you will lead a great battle",
    "an epic journey awaits you",
    "an ancestral power will awaken",
    "you will save the one you least expect",
    "the impossible will become possible",
];

const DIVINE_MESSAGES: &[&str] = &[
    "you are on the right path",
    "greater challenges are coming",
    "your inner strength is growing",
    "the gods are proud",
    "you must trust your instincts",
    "great responsibilities await you",
    "your loyalty will be tested",
    "true power lies within you",
];

const FATES: &[&str] = &[
    "victory will come from where you least expect it",
    "a sacrifice will change everything",
    "the past will return to be resolved",
    "a new alliance will form",
    "the impossible will become your specialty",
    "you will break an ancient curse",
];

const WARNINGS: &[&str] = &[
    "your vengeance will be terrible",
    "they will awaken divine wrath",
    "fate will punish them severely",
    "you will prove your worth",
    "the gods will show their power through you",
    "divine justice will prevail",
];

/// Templates plus the word lists their tokens draw from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProphecyCatalog {
    templates: Vec<String>,
    word_lists: BTreeMap<String, Vec<String>>,
}

impl ProphecyCatalog {
    /// Build a catalog. Word lists are keyed by the token that draws from
    /// them, e.g. `challenge` for `{challenge}`.
    pub fn new(
        templates: Vec<String>,
        word_lists: BTreeMap<String, Vec<String>>,
    ) -> OracleResult<Self> {
        if templates.is_empty() {
            return Err(OracleError::EmptyCatalog);
        }
        if let Some((name, _)) = word_lists.iter().find(|(_, words)| words.is_empty()) {
            return Err(OracleError::EmptyWordList(name.clone()));
        }
        Ok(Self {
            templates,
            word_lists,
        })
    }

    /// The built-in catalog of twenty templates.
    pub fn standard() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        let word_lists = BTreeMap::from([
            ("challenge".to_string(), owned(CHALLENGES)),
            ("consequence".to_string(), owned(CONSEQUENCES)),
            ("opportunity".to_string(), owned(OPPORTUNITIES)),
            ("prediction".to_string(), owned(PREDICTIONS)),
            ("divineMessage".to_string(), owned(DIVINE_MESSAGES)),
            ("fate".to_string(), owned(FATES)),
            ("warning".to_string(), owned(WARNINGS)),
        ]);
        Self {
            templates: owned(STANDARD_TEMPLATES),
            word_lists,
        }
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always false; a catalog holds at least one template.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template text by index.
    pub fn template(&self, index: usize) -> Option<&str> {
        self.templates.get(index).map(String::as_str)
    }

    /// Entries of the word list drawn by `token`.
    pub fn word_list(&self, token: &str) -> Option<&[String]> {
        self.word_lists.get(token).map(Vec::as_slice)
    }
}

impl Default for ProphecyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The parts of a character a prophecy can speak about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProphecySubject {
    /// Stat values in [`PROPHECY_STATS`] order.
    pub stats: Vec<(Attribute, u32)>,
    /// Name of the divine parent, if known.
    pub god_name: Option<String>,
    /// Divine connection percentage; `None` when unset (zero on a sheet).
    pub connection_level: Option<u32>,
}

impl ProphecySubject {
    /// Read the subject from a sheet.
    pub fn from_sheet(sheet: &CharacterSheet) -> Self {
        let god_name = Some(sheet.god_name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Self {
            stats: PROPHECY_STATS.iter().map(|&a| (a, sheet.get(a))).collect(),
            god_name,
            connection_level: Some(sheet.connection_level).filter(|&level| level > 0),
        }
    }

    /// The highest stat; ties go to the earliest in order.
    pub fn highest_stat(&self) -> Option<Attribute> {
        let mut best: Option<(Attribute, u32)> = None;
        for &(attribute, value) in &self.stats {
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((attribute, value));
            }
        }
        best.map(|(attribute, _)| attribute)
    }

    /// The lowest stat; ties go to the earliest in order.
    pub fn lowest_stat(&self) -> Option<Attribute> {
        let mut worst: Option<(Attribute, u32)> = None;
        for &(attribute, value) in &self.stats {
            if worst.is_none_or(|(_, bottom)| value < bottom) {
                worst = Some((attribute, value));
            }
        }
        worst.map(|(attribute, _)| attribute)
    }
}

/// Template indices used recently, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProphecyHistory {
    recent: VecDeque<usize>,
}

impl ProphecyHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `index` was used recently.
    pub fn contains(&self, index: usize) -> bool {
        self.recent.contains(&index)
    }

    /// Number of remembered entries.
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    /// Whether nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Remembered indices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.recent.iter().copied()
    }

    fn record(&mut self, index: usize) {
        self.recent.push_back(index);
        while self.recent.len() > HISTORY_CAPACITY {
            self.recent.pop_front();
        }
    }

    fn keep_last(&mut self, count: usize) {
        while self.recent.len() > count {
            self.recent.pop_front();
        }
    }
}

/// A generated prophecy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prophecy {
    /// Index of the template it came from.
    pub template_index: usize,
    /// The finished sentence.
    pub text: String,
}

impl std::fmt::Display for Prophecy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Generate a prophecy and the history that follows it.
///
/// Templates in `history` are skipped. When every template is in the history
/// it is cut back to its last five entries first; if that still leaves
/// nothing eligible the history is cleared.
pub fn generate_prophecy(
    rng: &mut impl RandomSource,
    catalog: &ProphecyCatalog,
    subject: &ProphecySubject,
    history: &ProphecyHistory,
) -> OracleResult<(Prophecy, ProphecyHistory)> {
    if catalog.is_empty() {
        return Err(OracleError::EmptyCatalog);
    }

    let mut history = history.clone();
    let eligible = |h: &ProphecyHistory| -> Vec<usize> {
        (0..catalog.len()).filter(|i| !h.contains(*i)).collect()
    };

    let mut candidates = eligible(&history);
    if candidates.is_empty() {
        history.keep_last(HISTORY_KEEP_ON_RESET);
        candidates = eligible(&history);
        if candidates.is_empty() {
            history = ProphecyHistory::new();
            candidates = eligible(&history);
        }
        tracing::debug!(
            kept = history.len(),
            "every prophecy template used recently, history reset"
        );
    }

    let template_index = candidates[rng.pick(candidates.len())];
    history.record(template_index);

    let template = catalog.template(template_index).unwrap_or_default();
    let mut resolved: HashMap<String, Option<String>> = HashMap::new();
    let text = fill_template(template, |token| {
        resolved
            .entry(token.to_string())
            .or_insert_with(|| resolve_token(&mut *rng, catalog, subject, token))
            .clone()
    });

    Ok((
        Prophecy {
            template_index,
            text,
        },
        history,
    ))
}

fn resolve_token(
    rng: &mut impl RandomSource,
    catalog: &ProphecyCatalog,
    subject: &ProphecySubject,
    token: &str,
) -> Option<String> {
    let label = |attribute: Option<Attribute>| attribute.map(|a| a.label().to_string());
    match token {
        "god" => Some(
            subject
                .god_name
                .clone()
                .unwrap_or_else(|| FALLBACK_GOD.to_string()),
        ),
        "connection" => Some(
            subject
                .connection_level
                .unwrap_or(FALLBACK_CONNECTION)
                .to_string(),
        ),
        "highStat" | "strength" => label(subject.highest_stat()),
        "lowStat" => label(subject.lowest_stat()),
        "attribute" | "skill" => {
            if subject.stats.is_empty() {
                return None;
            }
            let (attribute, _) = subject.stats[rng.pick(subject.stats.len())];
            Some(attribute.label().to_string())
        }
        _ => {
            let words = catalog.word_list(token)?;
            Some(words[rng.pick(words.len())].clone())
        }
    }
}

/// Replace every `{token}` for which `resolve` returns a value.
fn fill_template(template: &str, mut resolve: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let token = &after[..close];
        let is_token = !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric());
        match is_token.then(|| resolve(token)).flatten() {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
