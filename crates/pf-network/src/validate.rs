//! Layout validation logic.

use std::collections::HashSet;

use crate::layout::NetworkLayout;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub fn validate_layout(layout: &NetworkLayout) -> Result<(), LayoutError> {
    if !layout.default_pressure_psi.is_finite() {
        return Err(invalid(
            "default_pressure_psi",
            layout.default_pressure_psi,
            "must be finite",
        ));
    }

    let mut node_names = HashSet::new();
    for node in &layout.nodes {
        if !node_names.insert(node.name.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: node.name.clone(),
                context: "nodes".to_string(),
            });
        }
        if let Some(p) = node.pressure_psi {
            if !p.is_finite() {
                return Err(invalid(
                    &format!("nodes.{}.pressure_psi", node.name),
                    p,
                    "must be finite",
                ));
            }
        }
    }

    let mut pipe_names = HashSet::new();
    for pipe in &layout.pipes {
        if !pipe_names.insert(pipe.name.as_str()) {
            return Err(LayoutError::DuplicateId {
                id: pipe.name.clone(),
                context: "pipes".to_string(),
            });
        }

        for endpoint in [&pipe.start, &pipe.end] {
            if !node_names.contains(endpoint.as_str()) {
                return Err(LayoutError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("pipe {} endpoint", pipe.name),
                });
            }
        }

        if pipe.start == pipe.end {
            return Err(LayoutError::InvalidValue {
                field: format!("pipes.{}.end", pipe.name),
                value: pipe.end.clone(),
                reason: "pipe cannot start and end at the same node".to_string(),
            });
        }

        if !(pipe.diameter_in.is_finite() && pipe.diameter_in > 0.0) {
            return Err(invalid(
                &format!("pipes.{}.diameter_in", pipe.name),
                pipe.diameter_in,
                "must be positive and finite",
            ));
        }
        if !(pipe.length_in.is_finite() && pipe.length_in > 0.0) {
            return Err(invalid(
                &format!("pipes.{}.length_in", pipe.name),
                pipe.length_in,
                "must be positive and finite",
            ));
        }
        if !(pipe.roughness_ft.is_finite() && pipe.roughness_ft >= 0.0) {
            return Err(invalid(
                &format!("pipes.{}.roughness_ft", pipe.name),
                pipe.roughness_ft,
                "must be non-negative and finite",
            ));
        }
    }

    for (i, edge) in layout.loop_check.iter().enumerate() {
        for endpoint in [&edge.from, &edge.to] {
            if !node_names.contains(endpoint.as_str()) {
                return Err(LayoutError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("loop connection {i}"),
                });
            }
        }
    }

    Ok(())
}

fn invalid(field: &str, value: f64, reason: &str) -> LayoutError {
    LayoutError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LoopEdgeDef, NodeDef, PipeDef};

    fn small() -> NetworkLayout {
        NetworkLayout {
            name: "small".into(),
            default_pressure_psi: 80.0,
            nodes: vec![
                NodeDef {
                    name: "x".into(),
                    pressure_psi: None,
                },
                NodeDef {
                    name: "y".into(),
                    pressure_psi: Some(60.0),
                },
            ],
            pipes: vec![PipeDef {
                name: "x-y".into(),
                start: "x".into(),
                end: "y".into(),
                diameter_in: 12.0,
                length_in: 100.0,
                roughness_ft: 0.0,
            }],
            loop_check: vec![LoopEdgeDef {
                from: "x".into(),
                to: "y".into(),
            }],
        }
    }

    #[test]
    fn accepts_valid_layout() {
        assert_eq!(validate_layout(&small()), Ok(()));
    }

    #[test]
    fn rejects_duplicate_node() {
        let mut layout = small();
        layout.nodes.push(NodeDef {
            name: "x".into(),
            pressure_psi: None,
        });
        assert!(matches!(
            validate_layout(&layout),
            Err(LayoutError::DuplicateId { ref context, .. }) if context == "nodes"
        ));
    }

    #[test]
    fn rejects_duplicate_pipe() {
        let mut layout = small();
        let dup = layout.pipes[0].clone();
        layout.pipes.push(dup);
        assert!(matches!(
            validate_layout(&layout),
            Err(LayoutError::DuplicateId { ref context, .. }) if context == "pipes"
        ));
    }

    #[test]
    fn rejects_unknown_endpoint() {
        let mut layout = small();
        layout.pipes[0].end = "q".into();
        assert!(matches!(
            validate_layout(&layout),
            Err(LayoutError::MissingReference { ref id, .. }) if id == "q"
        ));
    }

    #[test]
    fn rejects_self_loop() {
        let mut layout = small();
        layout.pipes[0].end = "x".into();
        assert!(matches!(
            validate_layout(&layout),
            Err(LayoutError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut layout = small();
        layout.pipes[0].diameter_in = 0.0;
        assert!(validate_layout(&layout).is_err());

        let mut layout = small();
        layout.pipes[0].length_in = f64::NAN;
        assert!(validate_layout(&layout).is_err());

        let mut layout = small();
        layout.pipes[0].roughness_ft = -1e-4;
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn rejects_non_finite_pressure() {
        let mut layout = small();
        layout.nodes[1].pressure_psi = Some(f64::INFINITY);
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn rejects_unknown_loop_node() {
        let mut layout = small();
        layout.loop_check[0].to = "z".into();
        assert!(matches!(
            validate_layout(&layout),
            Err(LayoutError::MissingReference { ref context, .. }) if context == "loop connection 0"
        ));
    }
}
