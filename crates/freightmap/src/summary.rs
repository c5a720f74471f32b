use crate::model::Comparison;
use crate::normalize::ViewModel;

/// Human-readable digest of the current route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryView {
    pub distance_km: f64,
    pub fuel_cost: f64,
    /// Number of distinct consecutive pairs in the path.
    pub legs: usize,
    pub expanded: u64,
    pub notes: Option<String>,
    pub comparison: Option<Comparison>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RouteSummaryView {
    /// `None` when the view model holds no route (e.g. after a failed fetch).
    pub fn from_view_model(view: &ViewModel) -> Option<Self> {
        let route = view.route.as_ref()?;
        let legs = route.path.windows(2).filter(|w| w[0] != w[1]).count();

        Some(Self {
            distance_km: route.summary.distance_km,
            fuel_cost: route.summary.fuel_cost,
            legs,
            expanded: route.expanded,
            notes: route.notes.clone(),
            comparison: view.comparison,
            start: route.path.first().cloned(),
            end: route.path.last().cloned(),
        })
    }

    pub fn headline(&self) -> String {
        format!(
            "{} · {} · {}",
            format_distance(self.distance_km),
            format_cost(self.fuel_cost),
            format_legs(self.legs)
        )
    }

    pub fn comparison_line(&self) -> Option<String> {
        self.comparison.as_ref().map(comparison_line)
    }
}

pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

pub fn format_cost(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}

pub fn format_legs(legs: usize) -> String {
    match legs {
        1 => "1 leg".to_string(),
        n => format!("{n} legs"),
    }
}

/// One-line savings statement relative to the shortest-distance baseline.
pub fn comparison_line(c: &Comparison) -> String {
    if c.savings_amount > 0.0 {
        format!(
            "Saves {} ({:.1}%) vs shortest-distance baseline",
            format_cost(c.savings_amount),
            c.savings_percent
        )
    } else if c.savings_amount < 0.0 {
        format!(
            "Costs {} more ({:.1}%) than shortest-distance baseline",
            format_cost(-c.savings_amount),
            -c.savings_percent
        )
    } else {
        "Same fuel cost as shortest-distance baseline".to_string()
    }
}
