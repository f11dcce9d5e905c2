//! `transys check` — structural diagnostics for a transition system.

use std::io::Write;

use anyhow::{bail, Result};
use transys_core::TransitionSystemError;

use super::{build_system, ArcSpec};

/// Write counts, validate incidence sets, and report acyclicity.
pub fn run(arcs: &[ArcSpec], out: &mut impl Write) -> Result<()> {
    let ts = build_system(arcs);

    writeln!(out, "=== Transition System ===")?;
    writeln!(out, "  States:      {}", ts.state_count())?;
    writeln!(out, "  Transitions: {}", ts.transition_count())?;

    if let Err(errors) = ts.validate() {
        for err in &errors {
            writeln!(out, "  invalid: {err}")?;
        }
        bail!("{} incidence error(s)", errors.len());
    }
    writeln!(out, "  Incidence:   consistent")?;

    match ts.topological_order() {
        Ok(_) => writeln!(out, "  Acyclic:     yes (reducible)")?,
        Err(TransitionSystemError::CyclicGraph(state)) => {
            let name = ts.state(&state).map(|s| s.name.as_str()).unwrap_or("?");
            writeln!(out, "  Acyclic:     no (cycle through {name})")?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_to_string(list: &[&str]) -> String {
        let arcs: Vec<ArcSpec> = list.iter().map(|s| s.parse().unwrap()).collect();
        let mut out = Vec::new();
        run(&arcs, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn check_reports_cycle_state() {
        let output = check_to_string(&["ab:A:B", "bc:B:C", "cb:C:B"]);
        assert_eq!(
            output,
            "=== Transition System ===\n\
             \x20 States:      3\n\
             \x20 Transitions: 3\n\
             \x20 Incidence:   consistent\n\
             \x20 Acyclic:     no (cycle through B)\n"
        );
    }

    #[test]
    fn check_acyclic() {
        let output = check_to_string(&["ab:A:B", "ab:A:B"]);
        assert!(output.contains("  Transitions: 2\n"));
        assert!(output.ends_with("  Acyclic:     yes (reducible)\n"));
    }

    #[test]
    fn check_empty() {
        let output = check_to_string(&[]);
        assert!(output.contains("  States:      0\n"));
        assert!(output.contains("  Acyclic:     yes (reducible)\n"));
    }
}
