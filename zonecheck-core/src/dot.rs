//! GraphViz `dot` and plain `raw` rendering of explored states and
//! transitions (§6 "Output"), against a system's process/clock/intvar/label
//! name tables.

use crate::model::System;
use crate::state::{State, Transition};

/// Render targets selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// GraphViz node/edge attribute lines.
    Dot,
    /// One line per state/transition, no GraphViz quoting.
    Raw,
}

/// Per-state algorithm annotations rendered as extra `dot` attributes
/// (§6: "algorithm flags (`initial`, `final`, colors)").
#[derive(Debug, Clone, Default)]
pub struct StateFlags {
    pub initial: bool,
    pub accepting: bool,
    pub color: Option<String>,
}

fn vloc_label<B>(model: &System<B>, state: &State) -> String {
    let mut parts = Vec::new();
    for (pid, loc) in state.vloc().iter() {
        let def = model.location(pid as u32, loc);
        parts.push(format!("{}.{}", model.process_name(pid as u32), def.name));
    }
    parts.join(",")
}

/// Renders one node line for `state`, named `node_name`.
pub fn format_state<B>(format: Format, node_name: &str, model: &System<B>, state: &State, flags: &StateFlags) -> String {
    let vloc = vloc_label(model, state);
    let intval = state.intval().to_string();
    let zone = state.zone().to_string_with_names(&model.clock_names());
    let labels = crate::labels::format_with_names(state.labels(), model.label_names());

    match format {
        Format::Dot => {
            let mut attrs = vec![
                format!("vloc=\"{vloc}\""),
                format!("intval=\"{intval}\""),
                format!("zone=\"{zone}\""),
                format!("labels=\"{labels}\""),
            ];
            if flags.initial {
                attrs.push("initial=\"true\"".to_string());
            }
            if flags.accepting {
                attrs.push("final=\"true\"".to_string());
            }
            if let Some(color) = &flags.color {
                attrs.push(format!("color=\"{color}\""));
            }
            format!("{node_name} [{}]", attrs.join(", "))
        }
        Format::Raw => {
            format!("{node_name}: vloc={vloc} intval={intval} zone={zone} labels={labels}")
        }
    }
}

/// Renders one edge line from `src_name` to `tgt_name` via `transition`.
pub fn format_transition<B>(
    format: Format,
    src_name: &str,
    tgt_name: &str,
    model: &System<B>,
    transition: &Transition,
) -> String {
    let names = model.clock_names();
    let vedge = transition
        .vedge()
        .map(|v| {
            v.iter()
                .map(|(pid, eid)| {
                    let edge = &model.edges()[eid as usize];
                    format!("{}:{}", model.process_name(pid), edge.event)
                })
                .collect::<Vec<_>>()
                .join("+")
        })
        .unwrap_or_default();
    let guard = format_constraints(transition.guard(), &names);
    let reset = format_resets(transition.reset(), &names);

    match format {
        Format::Dot => format!(
            "{src_name} -> {tgt_name} [vedge=\"{vedge}\", guard=\"{guard}\", reset=\"{reset}\"]"
        ),
        Format::Raw => format!("{src_name} -> {tgt_name}: vedge={vedge} guard={guard} reset={reset}"),
    }
}

fn format_constraints(constraints: &[crate::dbm::Constraint], names: &[String]) -> String {
    constraints
        .iter()
        .map(|c| {
            let lhs = if c.i == 0 {
                format!("-{}", names[c.j])
            } else if c.j == 0 {
                names[c.i].clone()
            } else {
                format!("{}-{}", names[c.i], names[c.j])
            };
            format!("{lhs}{}", c.bound)
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

fn format_resets(resets: &crate::dbm::ResetContainer, names: &[String]) -> String {
    resets
        .iter()
        .map(|r| {
            if r.source == 0 {
                format!("{}:={}", names[r.target], r.shift)
            } else if r.shift == 0 {
                format!("{}:={}", names[r.target], names[r.source])
            } else {
                format!("{}:={}+{}", names[r.target], names[r.source], r.shift)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelSet;
    use crate::model::{ClockDecl, LocationDef};
    use crate::pool::Pool;
    use crate::state::{Intval, Vloc};
    use crate::zone::Zone;
    use smallvec::SmallVec;

    fn tiny_model() -> System<()> {
        System::new(
            vec!["P".to_string()],
            vec![LocationDef {
                process: 0,
                name: "l0".to_string(),
                initial: true,
                committed: false,
                urgent: false,
                invariant: (),
                labels: SmallVec::new(),
            }],
            vec![],
            vec![],
            vec![ClockDecl {
                name: "x".to_string(),
                count: 1,
            }],
            vec![],
            vec![],
        )
    }

    #[test]
    fn dot_node_line_carries_every_core_attribute() {
        let model = tiny_model();
        let vp = Pool::new(4);
        let ip = Pool::new(4);
        let zp = Pool::new(4);
        let vloc = vp.construct(Vloc::new([0]));
        let intval = ip.construct(Intval::new([]));
        let zone = zp.construct(Zone::zero(2));
        let state = State::new(vloc, intval, zone, LabelSet::empty(0));

        let line = format_state(
            Format::Dot,
            "n0",
            &model,
            &state,
            &StateFlags {
                initial: true,
                accepting: false,
                color: None,
            },
        );
        assert!(line.starts_with("n0 ["));
        assert!(line.contains("vloc=\"P.l0\""));
        assert!(line.contains("initial=\"true\""));
    }

    #[test]
    fn raw_node_line_has_no_graphviz_quoting() {
        let model = tiny_model();
        let vp = Pool::new(4);
        let ip = Pool::new(4);
        let zp = Pool::new(4);
        let vloc = vp.construct(Vloc::new([0]));
        let intval = ip.construct(Intval::new([]));
        let zone = zp.construct(Zone::zero(2));
        let state = State::new(vloc, intval, zone, LabelSet::empty(0));

        let line = format_state(Format::Raw, "n0", &model, &state, &StateFlags::default());
        assert!(line.starts_with("n0: vloc=P.l0"));
    }
}
