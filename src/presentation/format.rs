use crate::domain::geo::haversine_km;
use crate::domain::model::{time_of_day, SearchResponse};
use crate::presentation::theme::Theme;
use std::fmt::Write;

/// Render a response as a numbered list with distance from the query point.
pub fn format_response(
    title: &str,
    response: &SearchResponse,
    origin: (f64, f64),
    theme: &Theme,
) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "{} ({})",
        (theme.title)(title),
        response.restaurants.len()
    )
    .ok();

    if response.restaurants.is_empty() {
        writeln!(output, "  {}", (theme.meta)("No restaurants found")).ok();
        return output;
    }

    let cutoff = "⸺".repeat(40);
    writeln!(output, "  {}", (theme.line)(&cutoff)).ok();

    for (i, r) in response.restaurants.iter().enumerate() {
        let distance = haversine_km(origin.0, origin.1, r.latitude, r.longitude);
        let hours = format!(
            "{}-{}",
            time_of_day::format(&r.opens_at),
            time_of_day::format(&r.closes_at)
        );
        writeln!(
            output,
            "  {}. {}  {}  {}",
            (theme.idx)(&(i + 1).to_string()),
            (theme.name)(&r.name),
            (theme.meta)(&format!("{:.2} km", distance)),
            (theme.hours)(&hours)
        )
        .ok();

        let mut details = Vec::new();
        if !r.city.is_empty() {
            details.push(r.city.clone());
        }
        if !r.attributes.is_empty() {
            details.push(r.attributes.join(", "));
        }
        if !details.is_empty() {
            writeln!(output, "     {}", (theme.tag)(&details.join(" · "))).ok();
        }
    }

    output
}
