use anyhow::{Context, Result};
use colored::Colorize;
use std::time::Duration;

use crate::cli::QueryArgs;
use crate::client::RouteQuery;
use crate::config::Config;
use crate::normalize::{EndpointSelection, ViewModel};
use crate::orchestrator::FetchOrchestrator;
use crate::render::RenderState;
use crate::summary::{self, RouteSummaryView};

/// How long the CLI waits for the routing service.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Run the route command.
pub fn run(args: &QueryArgs, pick: bool) -> Result<()> {
    let config = Config::load_or_default();
    let mut query = args.to_query(&config);
    let mut orchestrator = FetchOrchestrator::new(args.source(&config)).with_selection(
        EndpointSelection::new(query.start.clone(), query.goal.clone()),
    );

    fetch(&mut orchestrator, query.clone())?;

    if pick {
        let ids: Vec<String> = orchestrator
            .view()
            .location_ids()
            .map(String::from)
            .collect();
        if ids.is_empty() {
            anyhow::bail!("The route service returned no locations to pick from.");
        }

        let selection = orchestrator.selection().clone();
        let start = pick_location("Start location:", &ids, selection.from.as_deref())?;
        let goal = pick_location("Goal location:", &ids, selection.to.as_deref())?;

        query.start = Some(start.clone());
        query.goal = Some(goal.clone());
        *orchestrator.selection_mut() = EndpointSelection::new(Some(start), Some(goal));
        fetch(&mut orchestrator, query.clone())?;
    }

    print_report(orchestrator.view(), &query);
    Ok(())
}

fn fetch(orchestrator: &mut FetchOrchestrator, query: RouteQuery) -> Result<()> {
    let source = orchestrator.source_description();
    orchestrator.submit(query);
    if !orchestrator.wait(FETCH_TIMEOUT) {
        anyhow::bail!(
            "Timed out after {}s waiting for {source}",
            FETCH_TIMEOUT.as_secs()
        );
    }
    if let Some(message) = orchestrator.error() {
        anyhow::bail!("{message} ({source})");
    }
    Ok(())
}

fn pick_location(prompt: &str, ids: &[String], current: Option<&str>) -> Result<String> {
    let cursor = current
        .and_then(|c| ids.iter().position(|id| id == c))
        .unwrap_or(0);
    inquire::Select::new(prompt, ids.to_vec())
        .with_starting_cursor(cursor)
        .prompt()
        .context("Location selection cancelled")
}

fn print_report(view: &ViewModel, query: &RouteQuery) {
    let Some(summary) = RouteSummaryView::from_view_model(view) else {
        println!("{}", "No route available.".yellow());
        return;
    };

    println!(
        "{} {} (seed {})",
        "Route".bold(),
        query.algorithm.display_name(),
        query.seed
    );
    println!("  {}", summary.headline().green().bold());

    if let Some(line) = summary.comparison_line() {
        let saved = view.comparison.is_some_and(|c| c.savings_amount >= 0.0);
        if saved {
            println!("  {}", line.green());
        } else {
            println!("  {}", line.red());
        }
    }

    for line in report_lines(view, &summary) {
        println!("  {line}");
    }
}

/// Plain-text detail lines below the headline.
fn report_lines(view: &ViewModel, summary: &RouteSummaryView) -> Vec<String> {
    let mut lines = Vec::new();

    if !view.path().is_empty() {
        lines.push(format!("Path: {}", view.path().join(" → ")));
    }
    if !view.baseline_path.is_empty() {
        lines.push(format!("Baseline: {}", view.baseline_path.join(" → ")));
    }
    lines.push(format!("Nodes expanded: {}", summary.expanded));
    if let Some(notes) = &summary.notes {
        lines.push(format!("Notes: {notes}"));
    }
    if let Some(c) = &view.comparison {
        lines.push(format!(
            "Fuel cost: optimized {} / baseline {}",
            summary::format_cost(c.optimized_fuel_cost),
            summary::format_cost(c.baseline_fuel_cost)
        ));
    }

    let state = RenderState::derive(view);
    for (i, segment) in state.optimized.iter().enumerate() {
        let shape = if segment.from_index {
            format!("{} points", segment.positions.len())
        } else {
            "straight line".to_string()
        };
        lines.push(format!(
            "{:>2}. {} → {} ({shape})",
            i + 1,
            segment.from,
            segment.to
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comparison, Connection, Location, RawRoute, RawRouteResponse};
    use crate::normalize::normalize;

    fn loc(id: &str, lon: f64, lat: f64) -> Location {
        Location {
            id: id.to_string(),
            x: lon,
            y: lat,
            fuel_price: Some(3.5),
        }
    }

    #[test]
    fn test_report_lines() {
        let view = normalize(RawRouteResponse {
            nodes: vec![loc("A", 0.0, 0.0), loc("B", 1.0, 0.0), loc("C", 2.0, 0.0)],
            edges: vec![Connection {
                from: "B".to_string(),
                to: "A".to_string(),
                distance: 1.0,
                geometry: Some(vec![[1.0, 0.0], [0.5, 0.1], [0.0, 0.0]]),
            }],
            route: RawRoute {
                path: vec!["A".into(), "B".into(), "C".into()],
                expanded: Some(6),
                notes: Some("Refueled at B".to_string()),
                ..Default::default()
            },
            baseline_path: Some(vec!["A".into(), "C".into()]),
            comparison: Some(Comparison {
                baseline_fuel_cost: 12.0,
                optimized_fuel_cost: 10.0,
                savings_amount: 2.0,
                savings_percent: 16.67,
            }),
            ..Default::default()
        });
        let summary = RouteSummaryView::from_view_model(&view).unwrap();
        let lines = report_lines(&view, &summary);
        assert_eq!(
            lines,
            vec![
                "Path: A → B → C".to_string(),
                "Baseline: A → C".to_string(),
                "Nodes expanded: 6".to_string(),
                "Notes: Refueled at B".to_string(),
                "Fuel cost: optimized $10.00 / baseline $12.00".to_string(),
                " 1. A → B (3 points)".to_string(),
                " 2. B → C (straight line)".to_string(),
            ]
        );
    }
}
