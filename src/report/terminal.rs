use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use deptree::models::{ExtractionResult, GoModuleNode, ManifestDetail, Resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Direct,
    Transitive,
}

#[derive(Debug, PartialEq, Eq)]
struct Row {
    package: String,
    version: String,
    kind: Kind,
    /// Go only: the version exactly as written in the graph.
    given: Option<String>,
}

impl Row {
    fn new(package: &str, version: &str, kind: Kind) -> Self {
        Self {
            package: package.to_string(),
            version: version.to_string(),
            kind,
            given: None,
        }
    }
}

/// Render a colored terminal report.
pub fn render(result: &ExtractionResult, verbose: bool, quiet: bool) -> Result<()> {
    let details: Vec<&ManifestDetail> = result.details().collect();
    let (direct, transitive) = details
        .iter()
        .flat_map(|d| rows(&d.resolved, true))
        .fold((0, 0), |(d, t), row| match row.kind {
            Kind::Direct => (d + 1, t),
            Kind::Transitive => (d, t + 1),
        });

    if quiet {
        println!(
            "Manifests: {}  Direct: {}  Transitive: {}",
            details.len(),
            direct.to_string().green(),
            transitive.to_string().cyan(),
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "deptree".bold(), env!("CARGO_PKG_VERSION"));

    for detail in details {
        println!(
            " {} {} ({})\n",
            "→".cyan(),
            detail.manifest_file_path.bold(),
            detail.ecosystem
        );

        if let Resolved::Raw(value) = &detail.resolved {
            println!("{}\n", serde_json::to_string_pretty(value)?);
            continue;
        }

        let table_rows = rows(&detail.resolved, verbose);
        if table_rows.is_empty() {
            println!("   {}\n", "no dependencies".dimmed());
            continue;
        }
        println!("{}\n", render_table(&table_rows));
    }

    println!(
        " {} direct, {} transitive across {} manifest(s)",
        direct.to_string().green().bold(),
        transitive.to_string().cyan().bold(),
        result.details().count()
    );

    Ok(())
}

fn render_table(rows: &[Row]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Given").add_attribute(Attribute::Bold),
            Cell::new("Kind").add_attribute(Attribute::Bold),
        ]);

    for row in rows {
        let (kind, color) = match row.kind {
            Kind::Direct => ("direct", Color::Green),
            Kind::Transitive => ("transitive", Color::DarkGrey),
        };
        let package = match row.kind {
            Kind::Direct => row.package.clone(),
            Kind::Transitive => format!("  └ {}", row.package),
        };
        table.add_row(vec![
            Cell::new(package),
            Cell::new(&row.version),
            Cell::new(row.given.as_deref().unwrap_or("")),
            Cell::new(kind).fg(color),
        ]);
    }

    table
}

/// Flatten a resolved payload into table rows, transitives after their parent.
fn rows(resolved: &Resolved, with_transitive: bool) -> Vec<Row> {
    let mut out = Vec::new();
    match resolved {
        Resolved::Tree(nodes) => {
            for node in nodes {
                out.push(Row::new(&node.package, &node.version, Kind::Direct));
                if with_transitive {
                    out.extend(
                        node.deps
                            .iter()
                            .map(|dep| Row::new(&dep.package, &dep.version, Kind::Transitive)),
                    );
                }
            }
        }
        Resolved::Modules(modules) => {
            let go_row = |m: &GoModuleNode, kind| Row {
                given: Some(m.coordinate.given_version.clone()),
                ..Row::new(&m.coordinate.package, &m.coordinate.version, kind)
            };
            for module in modules {
                out.push(go_row(module, Kind::Direct));
                if with_transitive {
                    out.extend(module.deps.iter().map(|dep| go_row(dep, Kind::Transitive)));
                }
            }
        }
        Resolved::Raw(_) => {}
    }
    out
}
