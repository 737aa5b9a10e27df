//! Text rendering for route cards, the emissions chart, suggestions and the dashboard

use std::fmt;

use ecoroute::{
    format_duration, Place, RouteResult, SearchOutcome, TravelMode, TripHistory, MIN_QUERY_CHARS,
};

/// Width of the longest bar in the emissions chart
const CHART_WIDTH: usize = 30;

/// One card per mode, the eco choice marked, followed by the chart and savings line
pub fn route(result: &RouteResult) -> String {
    RouteCards(result).to_string()
}

/// Horizontal bar chart of emissions per mode, scaled to the largest value
pub fn chart(result: &RouteResult) -> String {
    EmissionsChart(result).to_string()
}

/// Suggestion list, including the offline note or the service error
///
/// Queries too short to search render nothing.
pub fn suggestions(query: &str, outcome: &SearchOutcome) -> String {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        return String::new();
    }
    Suggestions { query, outcome }.to_string()
}

/// Dashboard: totals plus the recent trips table
pub fn dashboard(history: &TripHistory) -> String {
    Dashboard(history).to_string()
}

struct RouteCards<'a>(&'a RouteResult);

impl fmt::Display for RouteCards<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "🧭 {} → {}", result.source, result.destination)?;
        writeln!(f)?;

        for estimate in &result.modes {
            let marker = if estimate.mode == result.eco_friendly {
                "🌱 Eco choice"
            } else {
                ""
            };
            writeln!(
                f,
                "{:<17} {:>9.1} km  {:>10}  {:>8.2} kg CO₂  {}",
                estimate.mode.display_name(),
                estimate.distance_km,
                format_duration(estimate.duration_min),
                estimate.emissions_kg,
                marker
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", EmissionsChart(result))?;

        let saved = result.co2_saved_vs_car_kg();
        if saved > 0.0 {
            writeln!(f)?;
            writeln!(
                f,
                "♻️  Choosing {} over {} saves {saved:.2} kg CO₂",
                result.eco_friendly.display_name(),
                TravelMode::Car.display_name()
            )?;
        }
        Ok(())
    }
}

struct EmissionsChart<'a>(&'a RouteResult);

impl fmt::Display for EmissionsChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modes = &self.0.modes;
        let max = modes.iter().map(|m| m.emissions_kg).fold(0.0_f64, f64::max);

        writeln!(f, "Emissions (kg CO₂)")?;
        for estimate in modes {
            let width = if max > 0.0 {
                ((estimate.emissions_kg / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            writeln!(
                f,
                "  {:<17} {:<width$} {:.2}",
                estimate.mode.display_name(),
                "█".repeat(width),
                estimate.emissions_kg,
                width = CHART_WIDTH
            )?;
        }
        Ok(())
    }
}

struct Suggestions<'a> {
    query: &'a str,
    outcome: &'a SearchOutcome,
}

fn write_places(f: &mut fmt::Formatter<'_>, places: &[Place]) -> fmt::Result {
    for place in places {
        writeln!(f, "📍 {} ({})", place.display, place.kind)?;
    }
    Ok(())
}

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            SearchOutcome::Found(places) => write_places(f, places),
            SearchOutcome::Empty => writeln!(
                f,
                "No locations found for \"{}\". Try a different spelling or nearby city.",
                self.query
            ),
            SearchOutcome::ServiceError { reason, fallback } if fallback.is_empty() => {
                writeln!(f, "⚠️  {reason}")
            }
            SearchOutcome::ServiceError { fallback, .. } => {
                writeln!(f, "⚠️  API unavailable - showing saved locations")?;
                write_places(f, fallback)
            }
        }
    }
}

struct Dashboard<'a>(&'a TripHistory);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.0;
        writeln!(f, "📊 Your EcoRoute Dashboard")?;
        writeln!(f, "Total trips: {}", history.total_trips())?;
        writeln!(f, "CO₂ saved: {:.2} kg", history.co2_saved_kg())?;
        writeln!(f)?;

        if history.is_empty() {
            return writeln!(
                f,
                "No trips yet - start your journey toward a smaller footprint."
            );
        }

        writeln!(f, "Recent eco-friendly trips:")?;
        for trip in history.trips() {
            writeln!(
                f,
                "  {}  {} → {}  {}  {:.1} km  {:.2} kg CO₂",
                trip.date, trip.source, trip.destination, trip.mode, trip.distance_km, trip.emissions_kg
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute::{Coordinate, NewTrip};

    fn delhi_mumbai() -> RouteResult {
        RouteResult::between(
            "Delhi",
            Coordinate::new(28.6139, 77.2090),
            "Mumbai",
            Coordinate::new(19.0760, 72.8777),
        )
    }

    #[test]
    fn test_route_marks_eco_choice() {
        let text = route(&delhi_mumbai());
        let bike_line = text.lines().find(|l| l.starts_with("Bicycle")).unwrap();
        assert!(bike_line.contains("Eco choice"));
        assert!(!text.lines().find(|l| l.starts_with("Walking")).unwrap().contains("Eco"));
        assert!(text.contains("137.77"));
        assert!(text.contains("30h 37m"));
        assert!(text.contains("saves 137.77 kg"));
    }

    #[test]
    fn test_chart_scales_to_largest_value() {
        let text = chart(&delhi_mumbai());
        let car_line = text.lines().find(|l| l.trim_start().starts_with("Car")).unwrap();
        assert_eq!(car_line.matches('█').count(), CHART_WIDTH);
        let walk_line = text.lines().find(|l| l.trim_start().starts_with("Walking")).unwrap();
        assert_eq!(walk_line.matches('█').count(), 0);
    }

    #[test]
    fn test_chart_handles_all_zero() {
        let same = Coordinate::new(1.0, 1.0);
        let text = chart(&RouteResult::between("A", same, "A", same));
        assert!(!text.contains('█'));
    }

    #[test]
    fn test_suggestions_variants() {
        assert!(suggestions("zz", &SearchOutcome::Empty).contains("No locations found for \"zz\""));

        let offline = SearchOutcome::ServiceError {
            reason: "Invalid API key. Please check your Mapbox token.".to_string(),
            fallback: ecoroute::search_fallback("pune"),
        };
        let text = suggestions("pune", &offline);
        assert!(text.contains("API unavailable"));
        assert!(text.contains("Pune, Maharashtra, India"));

        let failed = SearchOutcome::ServiceError {
            reason: "Invalid API key. Please check your Mapbox token.".to_string(),
            fallback: Vec::<Place>::new(),
        };
        assert!(suggestions("xyz", &failed).contains("Invalid API key"));
    }

    #[test]
    fn test_short_queries_render_nothing() {
        assert_eq!(suggestions("d", &SearchOutcome::Empty), "");
        assert_eq!(suggestions("  d ", &SearchOutcome::Empty), "");
        assert!(suggestions("de", &SearchOutcome::Empty).contains("No locations found"));
    }

    #[test]
    fn test_dashboard() {
        let mut history = TripHistory::new();
        assert!(dashboard(&history).contains("No trips yet"));

        history.record(NewTrip::from_result(&delhi_mumbai()).unwrap());
        let text = dashboard(&history);
        assert!(text.contains("Total trips: 1"));
        assert!(text.contains("Delhi → Mumbai"));
        assert!(text.contains("Bicycle"));
    }
}
