use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use studyos_core::{Pipeline, ResultBundle, StudentProfile};

/// Read a student profile from a `.toml` or JSON file.
pub fn load_profile(path: &Path) -> Result<StudentProfile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile at {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let profile = if is_toml {
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse TOML profile at {}", path.display()))?
    } else {
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON profile at {}", path.display()))?
    };
    Ok(profile)
}

/// Execute `studyos plan`: run the pipeline once and print the result.
pub async fn run_plan(pipeline: &Pipeline, path: &Path, json: bool) -> Result<()> {
    let profile = load_profile(path)?;
    let bundle = pipeline.run(&profile).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render_bundle(&bundle));
    }

    if bundle.has_failures() {
        eprintln!("warning: one or more stages failed; see the error text above");
    }
    Ok(())
}

/// Human-readable rendering of a bundle.
pub fn render_bundle(bundle: &ResultBundle) -> String {
    let mut out = String::new();
    let sections = [
        ("World model", &bundle.world_model),
        ("Strategy", &bundle.strategy),
        ("Today's tasks", &bundle.tasks),
    ];
    for (title, output) in sections {
        let _ = writeln!(out, "== {title} ==");
        let _ = writeln!(out, "{}", output.as_text().trim_end());
        out.push('\n');
    }

    out.push_str("== Activity ==\n");
    for entry in &bundle.logs {
        let _ = writeln!(
            out,
            "  {}  {:<15} {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.stage,
            entry.message
        );
    }
    out
}
