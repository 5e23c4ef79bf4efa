use anyhow::Context;
use serde::Deserialize;

/// Crates that must stay free of transport and runtime dependencies.
const PURE_CRATES: &[&str] = &["eventhub-domain", "eventhub-shared"];

/// Dependencies the pure crates are not allowed to pull in.
const FORBIDDEN_DEPS: &[&str] = &["eventhub-client", "reqwest", "tokio", "dashmap", "axum"];

#[derive(Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
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
    let violations = find_violations(&metadata);

    if violations.is_empty() {
        println!("arch-check: ok");
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} layering violation(s)", violations.len())
}

fn find_violations(metadata: &Metadata) -> Vec<String> {
    metadata
        .packages
        .iter()
        .filter(|p| PURE_CRATES.contains(&p.name.as_str()))
        .flat_map(|p| {
            p.dependencies
                .iter()
                // dev-dependencies only affect tests
                .filter(|d| d.kind.as_deref() != Some("dev"))
                .filter(|d| FORBIDDEN_DEPS.contains(&d.name.as_str()))
                .map(move |d| format!("{} must not depend on {}", p.name, d.name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_transport_deps_in_pure_crates_only() {
        let metadata: Metadata = serde_json::from_str(
            r#"{ "packages": [
                { "name": "eventhub-domain", "dependencies": [
                    { "name": "serde", "kind": null },
                    { "name": "tokio", "kind": "dev" }
                ] },
                { "name": "eventhub-shared", "dependencies": [
                    { "name": "reqwest", "kind": null }
                ] },
                { "name": "eventhub-client", "dependencies": [
                    { "name": "reqwest", "kind": null }
                ] }
            ] }"#,
        )
        .expect("valid metadata");

        assert_eq!(
            find_violations(&metadata),
            vec!["eventhub-shared must not depend on reqwest".to_string()]
        );
    }
}
