//! Rendering of command results

use clap::ValueEnum;
use pricer_pricing::engine::PriceOutcome;
use serde::Serialize;

use crate::Result;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines, 4 decimals
    #[default]
    Text,
    /// One JSON object
    Json,
}

/// Result of one command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Instrument family or `implied_volatility`
    pub instrument: &'static str,
    /// Price, or volatility for the solver
    pub value: f64,
    /// Monte Carlo standard error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_error: Option<f64>,
    /// 95% confidence interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<(f64, f64)>,
    /// Simulated paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_paths: Option<usize>,
    /// KIKO spot delta
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
}

impl Report {
    /// Report of a single value
    pub fn value(instrument: &'static str, value: f64) -> Self {
        Self {
            instrument,
            value,
            std_error: None,
            confidence_interval: None,
            n_paths: None,
            delta: None,
        }
    }

    /// Report of an engine outcome
    pub fn from_outcome(instrument: &'static str, outcome: &PriceOutcome) -> Self {
        let mut report = Self::value(instrument, outcome.value());
        report.confidence_interval = outcome.confidence_interval();
        if let PriceOutcome::Estimate(estimate) = outcome {
            report.std_error = Some(estimate.std_error);
            report.n_paths = Some(estimate.n_paths);
        }
        report
    }

    /// Attach a delta
    pub fn with_delta(self, delta: f64) -> Self {
        Self {
            delta: Some(delta),
            ..self
        }
    }

    /// Render in `format`
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let label = if self.instrument == "implied_volatility" {
            "implied volatility"
        } else {
            "price"
        };
        let mut lines = vec![format!("{}: {:.4}", label, self.value)];
        if let Some(std_error) = self.std_error {
            lines.push(format!("std error: {:.4}", std_error));
        }
        if let Some((low, high)) = self.confidence_interval {
            lines.push(format!("95% CI: [{:.4}, {:.4}]", low, high));
        }
        if let Some(n_paths) = self.n_paths {
            lines.push(format!("paths: {}", n_paths));
        }
        if let Some(delta) = self.delta {
            lines.push(format!("delta: {:.4}", delta));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_pricing::mc::McEstimate;

    #[test]
    fn test_text_value() {
        let report = Report::value("european", 10.450583572185565);
        assert_eq!(report.render(OutputFormat::Text).unwrap(), "price: 10.4506");
    }

    #[test]
    fn test_text_estimate() {
        let outcome = PriceOutcome::Estimate(McEstimate::from_moments(5.0, 1.0, 100));
        let text = Report::from_outcome("arithmetic_asian", &outcome)
            .render(OutputFormat::Text)
            .unwrap();
        assert_eq!(
            text,
            "price: 5.0000\nstd error: 0.1000\n95% CI: [4.8040, 5.1960]\npaths: 100"
        );
    }

    #[test]
    fn test_json_skips_missing_fields() {
        let report = Report::value("implied_volatility", 0.3311).with_delta(-0.5);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["instrument"], "implied_volatility");
        assert_eq!(json["delta"], -0.5);
        assert!(json.get("std_error").is_none());
        assert!(json.get("confidence_interval").is_none());
    }
}
