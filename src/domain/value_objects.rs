//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use std::fmt;

/// Fully resolved upstream pressure endpoint.
///
/// Built once at startup by the target resolver and reused for every
/// scrape. The inner string may carry the upstream token, so use
/// [`TargetUrl::redacted`] whenever the address is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address with the `token` query value masked.
    pub fn redacted(&self) -> String {
        let Some((base, query)) = self.0.split_once('?') else {
            return self.0.clone();
        };
        let pairs: Vec<String> = query
            .split('&')
            .map(|pair| match pair.split_once('=') {
                Some(("token", _)) => "token=***".to_string(),
                _ => pair.to_string(),
            })
            .collect();
        format!("{}?{}", base, pairs.join("&"))
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// A percentage truncated (floored) to two decimal places.
///
/// Only constructible from a non-zero denominator, so a rendered
/// utilization is always finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Utilization(f64);

impl Utilization {
    /// `floor(numerator * 100 / denominator, 2dp)`, or `None` when the
    /// denominator is absent or zero.
    ///
    /// # Examples
    /// ```
    /// use browser_pressure_exporter::domain::value_objects::Utilization;
    ///
    /// assert_eq!(Utilization::from_ratio(3, Some(10)).unwrap().value(), 30.0);
    /// assert_eq!(Utilization::from_ratio(1, Some(3)).unwrap().value(), 33.33);
    /// assert!(Utilization::from_ratio(1, Some(0)).is_none());
    /// ```
    pub fn from_ratio(numerator: u64, denominator: Option<u64>) -> Option<Self> {
        let denominator = denominator.filter(|d| *d > 0)?;
        // Integer hundredths of a percent, so flooring is exact.
        let hundredths = u128::from(numerator) * 10_000 / u128::from(denominator);
        Some(Self(hundredths as f64 / 100.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
