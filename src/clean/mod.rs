use once_cell::sync::Lazy;
use regex::Regex;
use titlecase::titlecase;

mod rules;
pub use rules::*;

// Structural rules shared by the pipelines. Compiled once.
static DASH: Lazy<Rule> = Lazy::new(|| Rule::new(r" - ", " ", false).unwrap());
static KEEP_TO: Lazy<Rule> = Lazy::new(|| Rule::new(r"^.*\s+to\s+", "", true).unwrap());
static LEADING_TO: Lazy<Rule> = Lazy::new(|| Rule::new(r"^to\s+", "", true).unwrap());
static VIA_TAIL: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s+via\s+.*$", "", true).unwrap());
static VIA_HEAD: Lazy<Rule> = Lazy::new(|| Rule::new(r"^via\s+", "", true).unwrap());
static BOUNDS: Lazy<Rule> =
    Lazy::new(|| Rule::new(r"^(?:east|west|north|south)bound\b[\s:-]*", "", true).unwrap());
static LEADING_ROUTE: Lazy<Rule> = Lazy::new(|| Rule::new(r"^\d+[a-z]?\s+", "", true).unwrap());
static AND: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s+and\s+", " & ", true).unwrap());
static AT: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s+at\s+", " @ ", true).unwrap());
static SLASHES: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s*/\s*", "/", false).unwrap());
static PAREN_OPEN: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s*\(\s*", " (", false).unwrap());
static PAREN_CLOSE: Lazy<Rule> = Lazy::new(|| Rule::new(r"\s*\)\s*", ") ", false).unwrap());

static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d+)(st|nd|rd|th)\b").unwrap());

static STREET_TYPES: Lazy<Vec<Rule>> = Lazy::new(|| {
    [
        ("avenue", "Ave"),
        ("boulevard", "Blvd"),
        ("centre", "Ctr"),
        ("center", "Ctr"),
        ("court", "Crt"),
        ("crescent", "Cres"),
        ("drive", "Dr"),
        ("heights", "Hts"),
        ("highway", "Hwy"),
        ("mountain", "Mtn"),
        ("parkway", "Pkwy"),
        ("place", "Pl"),
        ("road", "Rd"),
        ("station", "Sta"),
        ("street", "St"),
        ("terrace", "Terr"),
    ]
    .iter()
    .map(|(word, abbr)| Rule::new(&format!(r"\b{word}\b"), abbr, true).unwrap())
    .collect()
});

/// Strips a leading directional word ("Eastbound Douglas St" -> "Douglas St").
pub fn clean_bounds(input: &str) -> String {
    BOUNDS.apply(input).into_owned()
}

/// Abbreviates street-type words to their canonical short form.
pub fn clean_street_types(input: &str) -> String {
    let mut value = input.to_string();
    for rule in STREET_TYPES.iter() {
        value = rule.apply(&value).into_owned();
    }
    value
}

/// Lowercases ordinal suffixes on bare numbers ("5Th" -> "5th").
pub fn clean_numbers(input: &str) -> String {
    ORDINAL
        .replace_all(input, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}

/// The final label pass: normalizes slashes and parenthesis bounds,
/// collapses whitespace, and re-cases the label.
pub fn clean_label(input: &str) -> String {
    let value = SLASHES.apply(input);
    let value = PAREN_OPEN.apply(&value);
    let value = PAREN_CLOSE.apply(&value);
    let value = collapse_whitespace(&value);
    capitalize(&value)
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Title-casing treats a slash as part of the word, so each segment is
// re-cased on its own.
fn capitalize(input: &str) -> String {
    input
        .split('/')
        .map(|segment| titlecase(&segment.to_lowercase()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Agency rules injected around the generic passes of one pipeline.
/// Early rules see the raw text, late rules see the cleaned label.
#[derive(Debug, Clone, Default)]
pub struct CleanRules {
    pub early: RuleSet,
    pub late: RuleSet,
}

#[derive(Debug, Clone, Default)]
pub struct CleanOverrides {
    pub route_long_name: CleanRules,
    pub stop_name: CleanRules,
    pub trip_headsign: CleanRules,
}

/// The three label-cleaning pipelines. All of them are pure and idempotent:
/// re-running a pipeline on its own output is a no-op.
#[derive(Debug, Clone, Default)]
pub struct LabelCleaner {
    overrides: CleanOverrides,
}

impl LabelCleaner {
    pub fn new(overrides: CleanOverrides) -> Self {
        Self { overrides }
    }

    pub fn clean_route_long_name(&self, raw: &str) -> String {
        let value = self.overrides.route_long_name.early.apply(raw.trim());
        let value = clean_street_types(&value);
        let value = clean_label(&value);
        let value = clean_numbers(&value);
        self.overrides.route_long_name.late.apply(&value)
    }

    pub fn clean_stop_name(&self, raw: &str) -> String {
        let value = self.overrides.stop_name.early.apply(raw.trim());
        let value = clean_bounds(&value);
        let value = AND.apply(&value);
        let value = AT.apply(&value);
        let value = clean_street_types(&value);
        let value = clean_label(&value);
        let value = clean_numbers(&value);
        self.overrides.stop_name.late.apply(&value)
    }

    pub fn clean_trip_headsign(&self, raw: &str) -> String {
        let value = self.overrides.trip_headsign.early.apply(raw.trim());
        let value = DASH.apply(&value);
        let value = KEEP_TO.apply(&value);
        let value = LEADING_TO.apply(&value);
        let value = VIA_TAIL.apply(&value);
        let value = VIA_HEAD.apply(&value);
        let value = clean_bounds(&value);
        let value = LEADING_ROUTE.apply(&value);
        let value = AND.apply(&value);
        let value = clean_street_types(&value);
        let value = clean_label(&value);
        let value = clean_numbers(&value);
        self.overrides.trip_headsign.late.apply(&value)
    }
}

#[test]
fn bounds_strip_is_leading_only() {
    assert_eq!(clean_bounds("Eastbound Douglas St"), "Douglas St");
    assert_eq!(clean_bounds("Douglas St Eastbound"), "Douglas St Eastbound");
}

#[test]
fn street_types_abbreviate() {
    assert_eq!(clean_street_types("Pine Centre"), "Pine Ctr");
    assert_eq!(clean_street_types("College Heights"), "College Hts");
}

#[test]
fn numbers_lowercase_ordinals() {
    assert_eq!(clean_numbers("5Th & Ospika"), "5th & Ospika");
    assert_eq!(clean_numbers("21ST"), "21st");
}

#[test]
fn label_collapses_and_recases() {
    assert_eq!(clean_label("  westgate   MALL "), "Westgate Mall");
    assert_eq!(clean_label("unbc / college hts"), "Unbc/College Hts");
}

#[test]
fn label_normalizes_parens() {
    assert_eq!(clean_label("Spruceland( Plaza )"), "Spruceland (Plaza)");
}
