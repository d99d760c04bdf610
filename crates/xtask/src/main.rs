use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

/// Crates that must stay free of transport and runtime dependencies.
const PURE_CRATES: [(&str, &str); 2] = [
    ("tradeassoc-domain", "crates/domain"),
    ("tradeassoc-shared", "crates/shared"),
];

const FORBIDDEN_DEPS: [&str; 5] = ["reqwest", "tokio", "axum", "tradeassoc-review", "dotenvy"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    #[serde(default)]
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages: BTreeMap<&str, &Package> = metadata
        .packages
        .iter()
        .map(|p| (p.name.as_str(), p))
        .collect();

    let mut violations = Vec::new();
    for (name, dir) in PURE_CRATES {
        let package = packages
            .get(name)
            .with_context(|| format!("package {name} not found in workspace"))?;

        for dep in &package.dependencies {
            // dev-dependencies may use a runtime for tests
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if FORBIDDEN_DEPS.contains(&dep.name.as_str()) {
                violations.push(format!("{name} depends on {}", dep.name));
            }
        }

        scan_sources(&metadata.workspace_root.join(dir).join("src"), name, &mut violations)?;
    }

    if violations.is_empty() {
        println!("arch-check: ok");
        Ok(())
    } else {
        for violation in &violations {
            eprintln!("arch-check: {violation}");
        }
        anyhow::bail!("arch-check found {} violation(s)", violations.len())
    }
}

fn scan_sources(dir: &Path, crate_name: &str, violations: &mut Vec<String>) -> anyhow::Result<()> {
    let pattern = Regex::new(r"\b(tokio|reqwest|axum)::").context("compiling import pattern")?;

    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let source = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                for (line_no, line) in source.lines().enumerate() {
                    if let Some(found) = pattern.find(line) {
                        violations.push(format!(
                            "{crate_name}: {}:{} uses {}",
                            path.display(),
                            line_no + 1,
                            found.as_str().trim_end_matches("::")
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}
