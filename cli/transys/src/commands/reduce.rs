//! `transys reduce` — transitive reduction of a transition system.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use transys_core::ReductionConfig;

use super::{build_system, render_arcs, ArcSpec};

/// Reduce the system described by `arcs` and write the surviving arcs to `out`.
pub fn run(arcs: &[ArcSpec], config: &ReductionConfig, out: &mut impl Write) -> Result<()> {
    let mut ts = build_system(arcs);
    info!(
        states = ts.state_count(),
        transitions = ts.transition_count(),
        max_depth = config.max_depth,
        "reducing"
    );

    let report = ts
        .transitive_reduction_with(config)
        .context("transitive reduction failed")?;

    for line in render_arcs(&ts) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "removed {} of {} arcs ({} kept)",
        report.removed,
        report.removed + ts.transition_count(),
        ts.transition_count()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(list: &[&str]) -> Vec<ArcSpec> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn reduce_to_string(arcs: &[ArcSpec], config: &ReductionConfig) -> Result<String> {
        let mut out = Vec::new();
        run(arcs, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn reduce_five_state_fixture() {
        let arcs = specs(&[
            "AB:A:B", "AC:A:C", "AD:A:D", "AE:A:E", "BD:B:D", "CD:C:D", "CE:C:E", "DE:D:E",
        ]);
        let output = reduce_to_string(&arcs, &ReductionConfig::default()).unwrap();
        assert_eq!(
            output,
            "A -> B [AB]\n\
             A -> C [AC]\n\
             B -> D [BD]\n\
             C -> D [CD]\n\
             D -> E [DE]\n\
             \n\
             removed 3 of 8 arcs (5 kept)\n"
        );
    }

    #[test]
    fn reduce_without_arcs() {
        let output = reduce_to_string(&[], &ReductionConfig::default()).unwrap();
        assert_eq!(output, "\nremoved 0 of 0 arcs (0 kept)\n");
    }

    #[test]
    fn reduce_cyclic_fails() {
        let arcs = specs(&["ab:A:B", "ba:B:A"]);
        let err = reduce_to_string(&arcs, &ReductionConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("cycle detected"));
    }

    #[test]
    fn reduce_respects_depth_limit() {
        let arcs = specs(&["x:A:B", "x:B:C", "x:C:D"]);
        let config = ReductionConfig { max_depth: 1 };
        let err = reduce_to_string(&arcs, &config).unwrap_err();
        assert!(format!("{err:#}").contains("depth limit of 1"));
    }
}
