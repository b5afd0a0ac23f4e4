use impact_core::{ImpactError, ImpactResults};
use std::fmt::Display;

// Status line texts
pub const CALCULATING: &str = "Calculating simulation...";
pub const COMPLETED: &str = "Simulation completed.";
pub const NO_SITE: &str = "Please select an impact point on the map.";

#[inline]
pub fn error_status(err: &dyn Display) -> String {
    format!("Error: {err}")
}

/// Status line for a failed animation request.
pub fn failure_status(err: &ImpactError) -> String {
    match err {
        ImpactError::NoSiteSelected => NO_SITE.to_string(),
        other => error_status(other),
    }
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Label/value rows of the results table, in display order.
pub fn results_rows(results: &ImpactResults) -> [(&'static str, String); 7] {
    let fixed = |value: f64| format!("{value:.2}");
    let population = format_thousands(results.population_density);
    [
        ("Diameter (m)", fixed(results.diameter_m)),
        ("Crater diameter (km)", fixed(results.crater_diameter_km)),
        ("Shockwave radius (km)", fixed(results.shockwave_radius_km)),
        ("Thermal radius (km)", fixed(results.thermal_radius_km)),
        ("Earthquake magnitude", fixed(results.earthquake_magnitude)),
        ("Energy (Mt)", fixed(results.energy_megatons)),
        ("Population affected", population),
    ]
}

pub fn render_table(results: &ImpactResults) -> String {
    let rows = results_rows(results);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
