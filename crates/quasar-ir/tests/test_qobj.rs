//! Tests for the job wire format and register layout.

use proptest::prelude::*;
use quasar_ir::{
    BitLabel, ClassicalCondition, Operation, Program, Qobj, RegisterMap, SnapshotSlot,
};

const QOBJ: &str = r#"{
    "qobj_id": "teleport-1",
    "config": {"shots": 512, "seed": 7},
    "experiments": [
        {
            "header": {
                "name": "teleport",
                "qubit_labels": [["q", 0], ["q", 1], ["q", 2]],
                "clbit_labels": [["c0", 0], ["c1", 0], ["c2", 0]]
            },
            "config": {"shots": 100},
            "instructions": [
                {"name": "u3", "qubits": [0], "params": [0.3, 0.2, 0.1]},
                {"name": "h", "qubits": [1]},
                {"name": "cx", "qubits": [1, 2]},
                {"name": "barrier", "qubits": [0, 1, 2]},
                {"name": "measure", "qubits": [0], "clbits": [0]},
                {"name": "measure", "qubits": [1], "clbits": [1]},
                {"name": "u1", "qubits": [2], "params": [3.14159], "conditional": {"mask": "0x1", "val": "0x1"}},
                {"name": "snapshot", "params": ["after"]},
                {"name": "measure", "qubits": [2], "clbits": [2]}
            ]
        }
    ]
}"#;

#[test]
fn parses_full_job() {
    let qobj = Qobj::from_json(QOBJ).unwrap();
    assert_eq!(qobj.qobj_id, "teleport-1");
    assert_eq!(qobj.config.shots, 512);
    assert_eq!(qobj.config.seed, Some(7));

    let circuit = &qobj.experiments[0];
    assert_eq!(circuit.name(), "teleport");
    assert_eq!(circuit.shots(), Some(100));
    assert_eq!(circuit.seed(), None);
    assert_eq!(circuit.num_qubits(), 3);
    assert_eq!(circuit.cregs().len(), 3);
    assert_eq!(
        circuit.instructions[6].conditional,
        Some(ClassicalCondition::new(1, 1))
    );
}

#[test]
fn compiles_full_job() {
    let qobj = Qobj::from_json(QOBJ).unwrap();
    let program = Program::compile(&qobj.experiments[0]).unwrap();
    assert_eq!(program.ops.len(), 9);
    assert_eq!(program.ops[3].operation, Operation::Barrier);
    assert_eq!(
        program.ops[7].operation,
        Operation::Snapshot {
            slot: SnapshotSlot::Label("after".into())
        }
    );
}

#[test]
fn job_config_defaults() {
    let qobj = Qobj::from_json(r#"{"experiments": []}"#).unwrap();
    assert_eq!(qobj.config.shots, 1024);
    assert!(qobj.config.seed.is_none());
    assert!(qobj.qobj_id.is_empty());
}

#[test]
fn partial_config_keeps_default_shots() {
    let qobj = Qobj::from_json(r#"{"config": {"seed": 5}, "experiments": []}"#).unwrap();
    assert_eq!(qobj.config.shots, 1024);
    assert_eq!(qobj.config.seed, Some(5));
}

#[test]
fn json_round_trip_preserves_job() {
    let qobj = Qobj::from_json(QOBJ).unwrap();
    let again = Qobj::from_json(&qobj.to_json().unwrap()).unwrap();
    assert_eq!(qobj, again);
}

proptest! {
    #[test]
    fn register_offsets_are_contiguous(sizes in proptest::collection::vec(1u32..8, 0..6)) {
        let labels: Vec<BitLabel> = sizes
            .iter()
            .enumerate()
            .flat_map(|(r, &size)| (0..size).map(move |i| BitLabel::new(format!("r{r}"), i)))
            .collect();
        let map = RegisterMap::from_labels(&labels);

        prop_assert_eq!(map.len(), sizes.len());
        let mut expected_offset = 0;
        for (register, &size) in map.iter().zip(&sizes) {
            prop_assert_eq!(register.offset, expected_offset);
            prop_assert_eq!(register.size, size);
            expected_offset += size;
        }
        prop_assert_eq!(map.num_bits(), sizes.iter().sum::<u32>());
    }
}
