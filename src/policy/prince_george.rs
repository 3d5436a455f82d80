use once_cell::sync::Lazy;

use crate::{
    clean::{CleanOverrides, CleanRules, Rule, RuleSet},
    engine::{ColorTable, EquivalenceTable},
    policy::{AgencyPolicy, ServiceWindow},
};

// BC Transit publishes one multi-agency feed; Prince George is agency 9.
const AGENCY_ID: &str = "9";

// Route 1 prefixes both of its headsigns with the route name.
static HERITAGE: Lazy<Rule> = Lazy::new(|| Rule::new(r"^heritage\s*(?:-\s*)?", "", true).unwrap());
static EXCHANGE: Lazy<Rule> = Lazy::new(|| Rule::new(r"\bexchange\b", "Exch", true).unwrap());
static UNBC: Lazy<Rule> = Lazy::new(|| Rule::new(r"\bunbc\b", "UNBC", true).unwrap());
static KRSS: Lazy<Rule> = Lazy::new(|| Rule::new(r"\bkrss\b", "KRSS", true).unwrap());

/// The Prince George Transit System configuration, matching the colors and
/// headsign drift of the live BC Transit feed.
pub fn prince_george(window: ServiceWindow) -> AgencyPolicy {
    AgencyPolicy::new(AGENCY_ID, window)
        .with_colors(colors())
        .with_equivalences(equivalences())
        .with_overrides(overrides())
}

fn colors() -> ColorTable {
    ColorTable::new([
        (1, "004B8D"),
        (5, "F8931E"),
        (10, "8CC640"),
        (11, "8CC63F"),
        (12, "49176D"),
        (15, "EC1D8D"),
        (16, "00B9BF"),
        (17, "B3AA7E"),
        (18, "B3AA7E"),
        (46, "8D0B3A"),
        (47, "00AA4F"),
        (55, "00AEEF"),
        (88, "FFC10E"),
        (89, "0073AE"),
        (91, "BF83B9"),
        (96, "B5BB19"),
        (97, "367D0F"),
    ])
}

fn equivalences() -> EquivalenceTable {
    EquivalenceTable::new()
        .class(12, &["Westgate", "Parkridge"], "Parkridge")
        .class(
            16,
            &["UNBC", "College Hgts", "UNBC/College Hts"],
            "UNBC/College Hts",
        )
        .class(46, &["Pine Ctr", "Downtown"], "Downtown")
        .class(88, &["Westgate", "Westgate Mall"], "Westgate Mall")
        .class(89, &["Hart", "Hart Ctr"], "Hart Ctr")
}

fn overrides() -> CleanOverrides {
    CleanOverrides {
        route_long_name: CleanRules::default(),
        stop_name: CleanRules {
            early: RuleSet::new().with(EXCHANGE.clone()),
            late: RuleSet::new().with(UNBC.clone()).with(KRSS.clone()),
        },
        trip_headsign: CleanRules {
            early: RuleSet::new()
                .with(HERITAGE.clone())
                .with(EXCHANGE.clone()),
            late: RuleSet::new().with(UNBC.clone()).with(KRSS.clone()),
        },
    }
}
