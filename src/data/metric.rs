//! Display formatting for sensor and issue metrics.
//!
//! Units are inferred from the metric name. The rule table is checked in
//! order and the first match wins, so its order decides overlapping names:
//! `output_bottles_per_min` has to hit the bottles/min rule before the
//! generic `min` and `bottles` rules see it.

use greenmind_types::Issue;

/// How a metric name is matched against a rule.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// Name contains at least one of the needles.
    Any(&'static [&'static str]),
    /// Name contains every needle.
    All(&'static [&'static str]),
}

impl Pattern {
    fn matches(&self, key: &str) -> bool {
        match self {
            Pattern::Any(needles) => needles.iter().any(|n| key.contains(n)),
            Pattern::All(needles) => needles.iter().all(|n| key.contains(n)),
        }
    }
}

/// Display unit for a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Kilowatts,
    Percent,
    BottlesPerMinute,
    Minutes,
    Bottles,
    Bar,
    MillimetersPerSecond,
    Score,
    Seconds,
    Plain,
}

impl Unit {
    /// Decimal places shown for this unit.
    pub fn precision(&self) -> usize {
        match self {
            Unit::BottlesPerMinute | Unit::Minutes | Unit::Bottles => 0,
            _ => 1,
        }
    }

    /// Text appended after the number, including any separating space.
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Kilowatts => " kW",
            Unit::Percent => "%",
            Unit::BottlesPerMinute => " bottles/min",
            Unit::Minutes => " min",
            Unit::Bottles => " bottles",
            Unit::Bar => " bar",
            Unit::MillimetersPerSecond => " mm/s",
            Unit::Seconds => " sec",
            Unit::Score | Unit::Plain => "",
        }
    }
}

/// Unit rules, in priority order.
const UNIT_RULES: &[(Pattern, Unit)] = &[
    (Pattern::Any(&["temp"]), Unit::Celsius),
    (Pattern::Any(&["power", "kwh", "kw"]), Unit::Kilowatts),
    (Pattern::Any(&["efficiency", "accuracy", "rate"]), Unit::Percent),
    (Pattern::All(&["output", "min"]), Unit::BottlesPerMinute),
    (Pattern::Any(&["downtime", "min"]), Unit::Minutes),
    (Pattern::Any(&["bottles"]), Unit::Bottles),
    (Pattern::Any(&["pressure"]), Unit::Bar),
    (Pattern::Any(&["vibration"]), Unit::MillimetersPerSecond),
    (Pattern::Any(&["score"]), Unit::Score),
    (Pattern::All(&["time", "sec"]), Unit::Seconds),
];

/// Infer the unit of a metric from its name.
pub fn unit_for(key: &str) -> Unit {
    let key = key.to_lowercase();
    UNIT_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(&key))
        .map(|(_, unit)| *unit)
        .unwrap_or(Unit::Plain)
}

/// Format a metric value with the unit inferred from its name.
///
/// `("motor_temperature", 72.34)` renders as `72.3°C`; names matching no
/// rule render with one decimal and no unit.
pub fn format_metric_value(key: &str, value: f64) -> String {
    let unit = unit_for(key);
    format!("{}{}", to_fixed(value, unit.precision()), unit.suffix())
}

/// Digits printed past the requested precision to spot an exact tie.
const TIE_DIGITS: usize = 30;

/// Fixed-point formatting where exact ties round away from zero.
///
/// `format!` rounds ties to even, so `12.5` would print as `12`; this
/// prints `13`. Values that only look like ties (`1.45` is stored as
/// `1.4499...`) still round by their exact value.
pub fn to_fixed(value: f64, precision: usize) -> String {
    let nearest = format!("{:.*}", precision, value);
    if !value.is_finite() {
        return nearest;
    }

    let exact = format!("{:.*}", precision + TIE_DIGITS, value);
    let tail = &exact[exact.len() - TIE_DIGITS..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return nearest;
    }

    // An exact tie is n + 0.5 at this scale, so the product is exact.
    let scaled = (value.abs() * 10f64.powi(precision as i32)).round();
    let digits = format!("{:0>width$.0}", scaled, width = precision + 1);
    let (int, frac) = digits.split_at(digits.len() - precision);
    let sign = if value < 0.0 { "-" } else { "" };
    if precision == 0 {
        format!("{sign}{int}")
    } else {
        format!("{sign}{int}.{frac}")
    }
}

/// Turn a `snake_case` or `camelCase` metric name into a title.
///
/// `motor_temperature` becomes `Motor temperature`, `avgEnergyKwh` becomes
/// `Avg Energy Kwh`.
pub fn format_metric_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        match c {
            '_' => spaced.push(' '),
            c if c.is_ascii_uppercase() => {
                spaced.push(' ');
                spaced.push(c);
            }
            c => spaced.push(c),
        }
    }

    let mut chars = spaced.chars();
    let titled = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    titled.trim().to_string()
}

/// Savings badges for an issue.
///
/// A saving is shown only when it is present and positive; zero or negative
/// estimates are dropped silently.
pub fn savings_labels(issue: &Issue) -> Vec<String> {
    let mut labels = Vec::new();
    if let Some(kwh) = issue.estimated_savings_kwh.filter(|v| *v > 0.0) {
        labels.push(format!("{} kWh", to_fixed(kwh, 1)));
    }
    if let Some(usd) = issue.estimated_savings_usd.filter(|v| *v > 0.0) {
        labels.push(format!("${}", usd));
    }
    labels
}

/// Formatted `(label, value)` pairs for an issue's metrics, in name order.
pub fn issue_metric_rows(issue: &Issue) -> Vec<(String, String)> {
    issue
        .metrics
        .iter()
        .flatten()
        .map(|(key, value)| (format_metric_label(key), format_metric_value(key, *value)))
        .collect()
}
