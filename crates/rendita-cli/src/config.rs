use std::path::Path;

use rendita_core::TaxRegime;

use crate::input;

/// Load the tax regime from `path`, or the built-in one when no path is given.
/// `.yaml`/`.yml` files are read as YAML, anything else as JSON. Missing
/// keys keep their built-in value.
pub fn load_regime(path: Option<&str>) -> Result<TaxRegime, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(TaxRegime::default());
    };

    let contents = input::file::read_text(path)?;
    let regime = parse_regime(path, &contents)?;
    regime.validate()?;

    log::info!(
        "tax regime from {}: tax {} duty {} commission {} basis {}",
        path,
        regime.tax_rate,
        regime.stamp_duty_rate,
        regime.default_commission_rate,
        regime.day_count_basis
    );
    Ok(regime)
}

fn parse_regime(path: &str, contents: &str) -> Result<TaxRegime, Box<dyn std::error::Error>> {
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let regime = if is_yaml {
        serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?
    } else {
        serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path, e))?
    };
    Ok(regime)
}
