//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::InlineDesign;
use crate::api::{self, AppState, log_diagnostics};
use crate::client::SolverClient;
use crate::config::Config;
use kumihimo_core::{
    ColorCode, Design, Diagram, DiagramBuilder, DiagramElement, KumihimoError, Palette, Slot,
    SolveResponse, StrandCount, knots_in_row, parse_color_row,
    primitives::{MAX_PATTERN_ROWS, RowParity},
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum size for design and reply files (1 MB).
const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

/// Canonicalize the path and require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, KumihimoError> {
    let canonical = path.canonicalize().map_err(|e| {
        KumihimoError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(KumihimoError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and decode a JSON file, bounded by `MAX_INPUT_FILE_SIZE`.
fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, KumihimoError> {
    let path = validate_file_path(path)?;

    let metadata = std::fs::metadata(&path)
        .map_err(|e| KumihimoError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(KumihimoError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    let text = std::fs::read_to_string(&path)
        .map_err(|e| KumihimoError::IoError(format!("Cannot read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| {
        KumihimoError::SerializationError(format!("Invalid JSON in {}: {}", path.display(), e))
    })
}

/// Load a design from a JSON file, or from color letters on the command line.
fn load_design(file: Option<&Path>, inline: &InlineDesign) -> Result<Design, KumihimoError> {
    if let Some(file) = file {
        return read_json_file(file);
    }

    let start = inline.start.as_deref().ok_or_else(|| {
        KumihimoError::InvalidEdit("Provide a design with --file or --start".to_string())
    })?;
    let start_state = parse_color_row(start)?;
    let target_pattern = inline
        .rows
        .iter()
        .map(|row| parse_color_row(row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Design {
        strand_count: inline.strands.unwrap_or(start_state.len()),
        start_state,
        target_pattern,
    })
}

fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), KumihimoError> {
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);
    let solver = SolverClient::new(&config.solver)?;

    println!("Kumihimo Pattern Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:    {}", host);
    println!("  Port:    {}", port);
    println!("  Solver:  {}", solver.base_url());
    println!("  Timeout: {}s", config.solver.timeout_secs);
    println!();
    println!("Endpoints:");
    println!("  GET  /health   - Health check");
    println!("  GET  /palette  - List palette colors");
    println!("  POST /validate - Validate a design");
    println!("  POST /diagram  - Build a diagram from a solver reply");
    println!("  POST /design   - Validate, solve and build a diagram");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    if !solver.health().await {
        tracing::warn!("Solver at {} is not answering yet", solver.base_url());
    }

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, AppState::new(solver)).await
}

// =============================================================================
// PALETTE COMMAND
// =============================================================================

/// List the palette.
pub fn cmd_palette(json_mode: bool) -> Result<(), KumihimoError> {
    if json_mode {
        let colors: Vec<_> = Palette::entries()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "code": e.code,
                    "label": e.label,
                    "displayColor": e.color
                })
            })
            .collect();
        print_json(&serde_json::json!({ "colors": colors }));
        return Ok(());
    }

    println!("Kumihimo Palette");
    println!("================");
    for entry in Palette::entries() {
        println!("  {}  {:<8} {}", entry.code, entry.label, entry.color);
    }
    Ok(())
}

// =============================================================================
// LAYOUT COMMAND
// =============================================================================

/// Show the knot count of each row for a strand count.
pub fn cmd_layout(strands: usize, rows: usize, json_mode: bool) -> Result<(), KumihimoError> {
    let strand_count = StrandCount::new(strands)?;
    if rows > MAX_PATTERN_ROWS {
        return Err(KumihimoError::InvalidEdit(format!(
            "At most {} rows can be shown",
            MAX_PATTERN_ROWS
        )));
    }

    let layout: Vec<(usize, RowParity, usize)> = (0..rows)
        .map(|row| {
            (
                row,
                RowParity::of(row),
                knots_in_row(strand_count.get(), row),
            )
        })
        .collect();

    if json_mode {
        let rows: Vec<_> = layout
            .iter()
            .map(|(row, parity, knots)| {
                serde_json::json!({
                    "row": row + 1,
                    "parity": if parity.is_odd() { "odd" } else { "even" },
                    "knots": knots
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "strandCount": strand_count.get(),
            "rows": rows
        }));
        return Ok(());
    }

    println!("Layout for {} strands", strand_count);
    println!("=====================");
    for (row, parity, knots) in &layout {
        let kind = if parity.is_odd() { "odd " } else { "even" };
        println!("  Row {:>3} ({}): {} knots", row + 1, kind, knots);
    }
    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a design.
pub fn cmd_validate(
    file: Option<&Path>,
    inline: &InlineDesign,
    json_mode: bool,
) -> Result<(), KumihimoError> {
    let design = load_design(file, inline)?;
    let result = design.validate();

    if json_mode {
        let output = match &result {
            Ok(_) => serde_json::json!({ "valid": true }),
            Err(e) => serde_json::json!({ "valid": false, "error": e.to_string() }),
        };
        print_json(&output);
    } else if let Ok(request) = &result {
        println!(
            "Design is valid: {} strands, {} rows",
            design.strand_count,
            design.target_pattern.len()
        );
        let labels: Vec<&str> = request
            .start_state
            .iter()
            .map(|&c| Palette::label_of(c))
            .collect();
        println!("Start colors: {}", labels.join(", "));
    }

    result.map(|_| ()).map_err(KumihimoError::from)
}

// =============================================================================
// SOLVE COMMAND
// =============================================================================

/// Validate a design, submit it and print the diagram.
pub async fn cmd_solve(
    config: &Config,
    file: Option<&Path>,
    inline: &InlineDesign,
    json_mode: bool,
) -> Result<(), KumihimoError> {
    let design = load_design(file, inline)?;
    let request = design.validate()?;

    let solver = SolverClient::new(&config.solver)?;
    tracing::info!("Submitting design to {}", solver.base_url());
    let response = solver.solve(&request).await?;

    let diagram = DiagramBuilder::from_response(&response, &request.target_pattern);
    log_diagnostics(&diagram);
    print_diagram(&diagram, Some(&response), json_mode);
    Ok(())
}

// =============================================================================
// RENDER COMMAND
// =============================================================================

/// Build a diagram from a saved reply without contacting the solver.
///
/// The design does not have to pass validation; unassigned knots are drawn
/// with the fallback color.
pub fn cmd_render(file: &Path, design: &Path, json_mode: bool) -> Result<(), KumihimoError> {
    let response: SolveResponse = read_json_file(file)?;
    let design: Design = read_json_file(design)?;

    let target_pattern: Vec<Vec<ColorCode>> = design
        .target_pattern
        .iter()
        .map(|row| {
            row.iter()
                .map(|c| c.unwrap_or(ColorCode::Unrecognized))
                .collect()
        })
        .collect();

    let diagram = DiagramBuilder::from_response(&response, &target_pattern);
    log_diagnostics(&diagram);
    print_diagram(&diagram, None, json_mode);
    Ok(())
}

// =============================================================================
// DIAGRAM OUTPUT
// =============================================================================

fn print_diagram(diagram: &Diagram, solution: Option<&SolveResponse>, json_mode: bool) {
    if json_mode {
        let diagnostics: Vec<String> = diagram.diagnostics.iter().map(|d| d.to_string()).collect();
        let mut output = serde_json::json!({
            "diagram": diagram.elements,
            "diagnostics": diagnostics
        });
        if let (Some(solution), Some(map)) = (solution, output.as_object_mut()) {
            map.insert(
                "solution".to_string(),
                serde_json::to_value(solution).unwrap_or_default(),
            );
        }
        print_json(&output);
        return;
    }

    if let Some(total) = solution.and_then(|s| s.total_solutions) {
        println!("Solutions found: {}", total);
    }
    println!(
        "Diagram: {} states, {} knot steps",
        diagram.state_count(),
        diagram.step_count()
    );
    println!();
    print!("{}", render_text(diagram));
    for diagnostic in &diagram.diagnostics {
        println!("note: {}", diagnostic);
    }
}

/// Plain-text rendering: one line per element.
///
/// States list their display colors; knot steps list one cell per slot,
/// `|` for a passthrough and the move glyph for a knot.
pub fn render_text(diagram: &Diagram) -> String {
    let mut out = String::new();
    for element in &diagram.elements {
        match element {
            DiagramElement::State {
                state_index,
                colors,
            } => {
                let cells: Vec<String> = colors.iter().map(ToString::to_string).collect();
                out.push_str(&format!("State {:>3}  {}\n", state_index, cells.join(" ")));
            }
            DiagramElement::KnotStep { step_index, slots } => {
                let cells: Vec<String> = slots
                    .iter()
                    .map(|slot| match slot {
                        Slot::Knot { glyph, color } => format!("{} {}", glyph, color),
                        Slot::Passthrough => "|".to_string(),
                    })
                    .collect();
                out.push_str(&format!("Step  {:>3}  {}\n", step_index, cells.join("  ")));
            }
        }
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
