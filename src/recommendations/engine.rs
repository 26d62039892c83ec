//! Recommendation engine
//!
//! Scores every available transport mode on cost, time and emissions and
//! picks the best trade-off for the shipment.

use super::types::{
    ModeComparison, ModeMetrics, ModeProfile, RecommendationResult, RecommendedMode,
    ShipmentRequest, TransportMode,
};

/// Scoring policy constants
mod policy {
    /// Lower bound of the ton-equivalent load factor
    pub const MIN_TON_EQUIVALENT: f64 = 0.001;
    /// Volume (m³) to weight (kg) conversion used for the load factor
    pub const VOLUME_WEIGHT_FACTOR: f64 = 0.2;
    /// Cost scaling applied to the ton-equivalent
    pub const COST_LOAD_SCALE: f64 = 100.0;
    /// Tons to kilograms for emission totals
    pub const CO2_LOAD_SCALE: f64 = 1000.0;

    /// Score weight of the estimated cost
    pub const COST_WEIGHT: f64 = 0.6;
    /// Score weight of the travel time
    pub const TIME_WEIGHT: f64 = 0.3;
    /// Score weight of the emissions
    pub const CO2_WEIGHT: f64 = 0.1;
    /// Time (hours) to score-units scaling
    pub const TIME_SCALE: f64 = 100.0;

    /// Per-step reduction of the priority factor
    pub const PRIORITY_STEP: f64 = 0.12;
    /// Floor of the priority factor
    pub const MIN_PRIORITY_FACTOR: f64 = 0.5;
    /// Priorities at or above this go by air whenever air is available
    pub const AIR_OVERRIDE_PRIORITY: i64 = 4;
}

const NO_MODE_MESSAGE: &str = "No transport mode is available (all availability flags are false).";

/// Recommend a transport mode for the shipment
pub fn recommend(request: &ShipmentRequest) -> RecommendationResult {
    let available = request.available_modes();

    if available.is_empty() {
        tracing::debug!("No transport mode available for shipment");
        return RecommendationResult {
            recommended_mode: RecommendedMode::None,
            justification: vec![NO_MODE_MESSAGE.to_string()],
            comparison: ModeComparison::new(),
        };
    }

    let load = ton_equivalent(request.weight, request.volume);

    let mut comparison = ModeComparison::new();
    for mode in &available {
        comparison.insert(*mode, estimate_mode(mode.profile(), request.distance, load));
    }

    let factor = priority_factor(request.priority);
    let recommended = if request.priority >= policy::AIR_OVERRIDE_PRIORITY
        && available.contains(&TransportMode::Air)
    {
        TransportMode::Air
    } else {
        lowest_score(&comparison, factor).unwrap_or(available[0])
    };

    tracing::debug!(
        mode = %recommended,
        priority = request.priority,
        candidates = available.len(),
        "Transport mode recommended"
    );

    let mut justification: Vec<String> = comparison
        .iter()
        .map(|(mode, metrics)| describe_mode(*mode, metrics))
        .collect();
    justification.push(format!(
        "Final choice → {}. Selected because it gives the best weighted trade-off \
        (cost/time/emissions) for the provided inputs; priority={} and availability={} considered.",
        recommended,
        request.priority,
        format_mode_list(&available)
    ));

    RecommendationResult {
        recommended_mode: RecommendedMode::Mode(recommended),
        justification,
        comparison,
    }
}

/// Combine weight and volume into a rough load factor in tons
pub fn ton_equivalent(weight: i64, volume: i64) -> f64 {
    let tons = (weight as f64 + volume as f64 * policy::VOLUME_WEIGHT_FACTOR) / 1000.0;
    tons.max(policy::MIN_TON_EQUIVALENT)
}

/// Damping factor in [0.5, 1.0]; higher priority makes time weigh more
pub fn priority_factor(priority: i64) -> f64 {
    (1.0 - (priority as f64 - 1.0) * policy::PRIORITY_STEP).max(policy::MIN_PRIORITY_FACTOR)
}

/// Estimate cost, time and emissions for one mode
pub fn estimate_mode(profile: &ModeProfile, distance: i64, ton_equivalent: f64) -> ModeMetrics {
    let distance = distance as f64;

    let estimated_cost = profile.cost_per_km * distance * (ton_equivalent * policy::COST_LOAD_SCALE);
    let time_hours = if profile.avg_speed_kmph > 0.0 {
        distance / profile.avg_speed_kmph
    } else {
        f64::INFINITY
    };
    let co2_kg = profile.co2_per_km_per_ton * distance * ton_equivalent * policy::CO2_LOAD_SCALE;

    ModeMetrics {
        estimated_cost: round2(estimated_cost),
        time_hours: round2(time_hours),
        co2_kg: round2(co2_kg),
    }
}

/// Weighted score of a mode estimate (lower is better)
pub fn score(metrics: &ModeMetrics, priority_factor: f64) -> f64 {
    metrics.estimated_cost * policy::COST_WEIGHT
        + (metrics.time_hours * policy::TIME_SCALE) * policy::TIME_WEIGHT * (1.0 / priority_factor)
        + metrics.co2_kg * policy::CO2_WEIGHT
}

/// Mode with the lowest score; the earliest mode wins a tie
fn lowest_score(comparison: &ModeComparison, priority_factor: f64) -> Option<TransportMode> {
    let mut best: Option<(TransportMode, f64)> = None;
    for (mode, metrics) in comparison.iter() {
        let s = score(metrics, priority_factor);
        match best {
            Some((_, best_score)) if s >= best_score => {}
            _ => best = Some((*mode, s)),
        }
    }
    best.map(|(mode, _)| mode)
}

fn describe_mode(mode: TransportMode, metrics: &ModeMetrics) -> String {
    format!(
        "{}: cost ≈ {} units, time ≈ {} hrs, CO₂ ≈ {} kg.",
        mode,
        format_number(metrics.estimated_cost),
        format_number(metrics.time_hours),
        format_number(metrics.co2_kg)
    )
}

/// Render a mode list as `['Road', 'Rail']`
fn format_mode_list(modes: &[TransportMode]) -> String {
    let quoted: Vec<String> = modes.iter().map(|m| format!("'{}'", m)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Render a float keeping at least one decimal digit (`1500.0`, `6.67`)
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        value.to_string()
    }
}

/// Round to 2 decimal places, half to even on the exact binary value
///
/// `2.675` is stored slightly below the tie and rounds to `2.67`, while an
/// exact tie such as `0.125` goes to the even neighbour `0.12`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    // Already a whole number
    if exponent >= 0 {
        return value;
    }

    // value * 100 = scaled / 2^shift, exactly
    let scaled = u128::from(mantissa) * 100;
    let shift = exponent.unsigned_abs();
    let hundredths = if shift >= 128 {
        0
    } else {
        let quotient = scaled >> shift;
        let remainder = scaled - (quotient << shift);
        let half = 1u128 << (shift - 1);
        if remainder > half || (remainder == half && quotient & 1 == 1) {
            quotient + 1
        } else {
            quotient
        }
    };

    let magnitude = format!("{}.{:02}", hundredths / 100, hundredths % 100)
        .parse::<f64>()
        .unwrap_or(hundredths as f64 / 100.0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
