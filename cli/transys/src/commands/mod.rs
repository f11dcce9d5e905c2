//! CLI command implementations.

pub mod check;
pub mod reduce;

use anyhow::{bail, Result};
use transys_core::{StateId, TransitionSystem, TransitionSystemBuilder};

/// An arc given on the command line as `NAME:FROM:TO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcSpec {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl std::str::FromStr for ArcSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [name, from, to] = parts.as_slice() else {
            bail!("invalid arc `{s}`: expected NAME:FROM:TO");
        };
        if from.is_empty() || to.is_empty() {
            bail!("invalid arc `{s}`: state names must not be empty");
        }
        Ok(Self {
            name: name.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

/// Build a transition system from arc specs.
pub fn build_system(arcs: &[ArcSpec]) -> TransitionSystem {
    let mut builder = TransitionSystemBuilder::new();
    for arc in arcs {
        builder.arc(&arc.name, &arc.from, &arc.to);
    }
    builder.build()
}

/// Render every arc as `FROM -> TO [NAME]`, sorted.
pub fn render_arcs(ts: &TransitionSystem) -> Vec<String> {
    let name_of = |id: &StateId| ts.state(id).map(|s| s.name.as_str()).unwrap_or("?");
    let mut lines: Vec<String> = ts
        .transitions()
        .map(|t| format!("{} -> {} [{}]", name_of(&t.source), name_of(&t.target), t.name))
        .collect();
    lines.sort();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arc_spec() {
        let arc: ArcSpec = "AB:A:B".parse().unwrap();
        assert_eq!(arc.name, "AB");
        assert_eq!(arc.from, "A");
        assert_eq!(arc.to, "B");
    }

    #[test]
    fn empty_arc_name_allowed() {
        let arc: ArcSpec = ":A:B".parse().unwrap();
        assert_eq!(arc.name, "");
    }

    #[test]
    fn malformed_arc_specs_rejected() {
        assert!("A:B".parse::<ArcSpec>().is_err());
        assert!("x:A:B:C".parse::<ArcSpec>().is_err());
        assert!("x::B".parse::<ArcSpec>().is_err());
    }

    #[test]
    fn arcs_rendered_sorted() {
        let arcs: Vec<ArcSpec> = ["b:B:C", "a:A:B"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let ts = build_system(&arcs);
        assert_eq!(render_arcs(&ts), vec!["A -> B [a]", "B -> C [b]"]);
    }
}
