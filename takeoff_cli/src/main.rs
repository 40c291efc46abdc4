//! # Steel Takeoff CLI
//!
//! ```text
//! takeoff_cli                     interactive, one building
//! takeoff_cli <project.mce.json>  report every variant of a project
//! takeoff_cli --json <project>    same, JSON only
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr.

mod report;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use takeoff_core::params::{BuildingUse, ColumnSpacing, CraneDuty, TrussFamily};
use takeoff_core::{compute, load_project, BuildingParameters, CalcError, SpanParameters};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

/// Read a number, falling back to `default` on empty or unparsable input
fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Largest span count accepted at the prompt
const MAX_SPANS: usize = 20;

/// Span count from user text; anything outside `1..=MAX_SPANS` falls back to one span
fn parse_span_count(input: &str) -> usize {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_SPANS).contains(n))
        .unwrap_or(1)
}

fn prompt_bool(prompt: &str, default: bool) -> bool {
    match prompt_line(prompt).as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("y") | Some("yes") => true,
        Some("n") | Some("no") => false,
        _ => default,
    }
}

/// Pick one of `options` by 1-based number
fn prompt_choice<T: Copy + std::fmt::Display>(title: &str, options: &[T], default: T) -> T {
    println!("{title}:");
    for (i, option) in options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
    }
    prompt_line(&format!("Choice [{default}]: "))
        .and_then(|s| s.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied())
        .unwrap_or(default)
}

fn prompt_building() -> BuildingParameters {
    let d = BuildingParameters::default();
    let number = |label: &str, default: f64| prompt_f64(&format!("{label} [{default}]: "), default);

    println!("Building");
    println!("--------");
    let building_length_m = number("Building length (m)", d.building_length_m);
    let truss_spacing_m = number("Truss spacing (m)", d.truss_spacing_m);
    let column_spacing_m = prompt_choice("Column spacing", &ColumnSpacing::ALL, d.column_spacing_m);
    let rail_elevation_m = number("Rail elevation (m)", d.rail_elevation_m);
    let column_height_override_m = Some(number("Column height, 0 = computed (m)", 0.0)).filter(|h| *h > 0.0);
    let snow_load = number("Snow load (kN/m²)", d.snow_load);
    let dust_load = number("Dust load (kN/m²)", d.dust_load);
    let roof_load = number("Roof load (kN/m²)", d.roof_load);
    let purlin_load = number("Purlin self-weight (kN/m²)", d.purlin_load);
    let tech_load = number("Technological load (kN/m²)", d.tech_load);
    let importance_factor = number("Importance factor", d.importance_factor);
    let has_framing_post = prompt_bool("Intermediate framing posts (y/n) [n]: ", d.has_framing_post);
    let rigid_beam_load_kn = number("Framing rigid-beam load (kN)", d.rigid_beam_load_kn);
    let building_use = prompt_choice("Building use", &BuildingUse::ALL, d.building_use);

    BuildingParameters {
        building_length_m,
        truss_spacing_m,
        column_spacing_m,
        rail_elevation_m,
        column_height_override_m,
        snow_load,
        dust_load,
        roof_load,
        purlin_load,
        tech_load,
        importance_factor,
        has_framing_post,
        rigid_beam_load_kn,
        building_use,
    }
}

fn prompt_span(index: usize) -> SpanParameters {
    let d = SpanParameters::default();
    println!();
    println!("Span {}", index + 1);
    println!("------");
    SpanParameters {
        span_m: prompt_f64(&format!("Span (m) [{}]: ", d.span_m), d.span_m),
        truss_family: prompt_choice("Truss family", &TrussFamily::ALL, d.truss_family),
        crane_capacity_t: prompt_f64(&format!("Crane capacity (t) [{}]: ", d.crane_capacity_t), d.crane_capacity_t),
        crane_count: if prompt_bool("Two cranes (y/n) [n]: ", false) { 2 } else { 1 },
        with_passage: prompt_bool("Walkway along the rail (y/n) [y]: ", d.with_passage),
        crane_duty: prompt_choice("Crane duty", &CraneDuty::ALL, d.crane_duty),
    }
}

fn run_interactive() -> Result<(), CalcError> {
    println!("Steel Takeoff - industrial building steel estimate");
    println!("==================================================");
    println!();

    let building = prompt_building();
    println!();
    let span_count = prompt_line(&format!("Number of spans, 1-{MAX_SPANS} [1]: "))
        .map(|s| parse_span_count(&s))
        .unwrap_or(1);
    let spans: Vec<SpanParameters> = (0..span_count).map(prompt_span).collect();

    building.validate()?;
    for span in &spans {
        span.validate()?;
    }

    let result = compute(&building, &spans)?;
    tracing::debug!(warnings = result.warnings.len(), "interactive estimate done");
    println!();
    print!("{}", report::render("interactive", &result));
    println!();
    println!("JSON Output:");
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_project(path: &Path, json_only: bool) -> Result<(), CalcError> {
    let project = load_project(path)?;
    tracing::info!(path = %path.display(), variants = project.variant_count(), "loaded project");
    let estimates = project.estimate_all();

    if json_only {
        println!("{}", serde_json::to_string_pretty(&estimates)?);
        return Ok(());
    }

    println!(
        "Project {} for {} ({}), {} variant(s)",
        project.meta.job_id,
        project.meta.client,
        project.meta.engineer,
        project.variant_count()
    );
    println!();
    for estimate in &estimates {
        match &estimate.result {
            Ok(result) => print!("{}", report::render(&estimate.label, result)),
            Err(e) => println!("{}: not estimated ({})", estimate.label, e),
        }
        println!();
    }
    Ok(())
}

fn print_usage() {
    eprintln!("usage: takeoff_cli [--json] [PROJECT.mce.json]");
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.as_slice() {
        [] => run_interactive(),
        [flag] if flag == "-h" || flag == "--help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        [flag, path] if flag == "--json" => run_project(Path::new(path), true),
        [path] if !path.starts_with('-') => run_project(Path::new(path), false),
        _ => {
            print_usage();
            return ExitCode::from(2);
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_count_in_range() {
        assert_eq!(parse_span_count("3"), 3);
        assert_eq!(parse_span_count(" 20\n"), 20);
    }

    #[test]
    fn test_span_count_falls_back_to_one() {
        for input in ["", "0", "21", "-2", "2.5", "inf", "1e12", "NaN", "18446744073709551616", "two"] {
            assert_eq!(parse_span_count(input), 1, "input {input:?}");
        }
    }
}
