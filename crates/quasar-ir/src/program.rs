//! Compilation of a circuit into an executable program.
//!
//! A [`Program`] is built once per circuit and stays immutable for the whole
//! shot loop: register layouts are resolved, instruction names are mapped
//! onto the closed [`Operation`] set, and operands are range-checked.

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::layout::RegisterMap;
use crate::operation::{Op, Operation, SnapshotSlot};
use crate::qubit::{ClbitId, QubitId};

/// Widest classical register the packed classical state can hold.
pub const MAX_CLBITS: u32 = 64;

/// A circuit ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Circuit name.
    pub name: String,
    /// Quantum register layout.
    pub qregs: RegisterMap,
    /// Classical register layout.
    pub cregs: RegisterMap,
    /// Operations in execution order.
    pub ops: Vec<Op>,
}

impl Program {
    /// Compile a circuit.
    pub fn compile(circuit: &Circuit) -> IrResult<Self> {
        let qregs = circuit.qregs();
        let cregs = circuit.cregs();
        if cregs.num_bits() > MAX_CLBITS {
            return Err(IrError::ClassicalWidthExceeded(cregs.num_bits()));
        }

        let operands = Operands {
            num_qubits: qregs.num_bits(),
            num_clbits: cregs.num_bits(),
        };
        let ops = circuit
            .instructions
            .iter()
            .map(|inst| {
                Ok(Op {
                    operation: operands.lower(inst)?,
                    condition: inst.conditional,
                })
            })
            .collect::<IrResult<Vec<_>>>()?;

        Ok(Self {
            name: circuit.name().to_string(),
            qregs,
            cregs,
            ops,
        })
    }

    /// Size of the flattened quantum register.
    pub fn num_qubits(&self) -> u32 {
        self.qregs.num_bits()
    }

    /// Size of the flattened classical register.
    pub fn num_clbits(&self) -> u32 {
        self.cregs.num_bits()
    }

    /// Append an operation after the circuit's own instructions.
    pub fn push(&mut self, op: impl Into<Op>) {
        self.ops.push(op.into());
    }

    /// Check whether any operation measures a qubit.
    pub fn has_measurements(&self) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op.operation, Operation::Measure { .. }))
    }
}

struct Operands {
    num_qubits: u32,
    num_clbits: u32,
}

impl Operands {
    fn lower(&self, inst: &Instruction) -> IrResult<Operation> {
        let op = match inst.name.as_str() {
            "U" | "u3" => {
                let [theta, phi, lambda] = angles::<3>(inst)?;
                Operation::U3 {
                    qubit: self.qubit(inst, 0)?,
                    theta,
                    phi,
                    lambda,
                }
            }
            "u1" => {
                let [lambda] = angles::<1>(inst)?;
                Operation::U1 {
                    qubit: self.qubit(inst, 0)?,
                    lambda,
                }
            }
            "u2" => {
                let [phi, lambda] = angles::<2>(inst)?;
                Operation::U2 {
                    qubit: self.qubit(inst, 0)?,
                    phi,
                    lambda,
                }
            }
            "t" => Operation::T {
                qubit: self.qubit(inst, 0)?,
            },
            "h" => Operation::H {
                qubit: self.qubit(inst, 0)?,
            },
            "s" => Operation::S {
                qubit: self.qubit(inst, 0)?,
            },
            "CX" | "cx" => Operation::Cx {
                control: self.qubit(inst, 0)?,
                target: self.qubit(inst, 1)?,
            },
            "id" | "u0" => Operation::Id,
            "measure" => Operation::Measure {
                qubit: self.qubit(inst, 0)?,
                clbit: self.clbit(inst, 0)?,
            },
            // Operands are checked even though execution rejects reset outright.
            "reset" => Operation::Reset {
                qubit: self.qubit(inst, 0)?,
            },
            "snapshot" => {
                let label = inst.params.first().ok_or_else(|| IrError::MissingParameter {
                    operation: inst.name.clone(),
                    expected: 1,
                    got: 0,
                })?;
                Operation::Snapshot {
                    slot: SnapshotSlot::Label(label.to_string()),
                }
            }
            "barrier" => Operation::Barrier,
            other => Operation::Unrecognized {
                name: other.to_string(),
            },
        };
        Ok(op)
    }

    fn qubit(&self, inst: &Instruction, pos: usize) -> IrResult<QubitId> {
        let qubit = *inst.qubits.get(pos).ok_or_else(|| IrError::MissingOperand {
            operation: inst.name.clone(),
            kind: "qubit",
            expected: pos + 1,
            got: inst.qubits.len(),
        })?;
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                operation: inst.name.clone(),
                qubit: qubit.0,
                num_qubits: self.num_qubits,
            });
        }
        Ok(qubit)
    }

    fn clbit(&self, inst: &Instruction, pos: usize) -> IrResult<ClbitId> {
        let clbit = *inst.clbits.get(pos).ok_or_else(|| IrError::MissingOperand {
            operation: inst.name.clone(),
            kind: "clbit",
            expected: pos + 1,
            got: inst.clbits.len(),
        })?;
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                operation: inst.name.clone(),
                clbit: clbit.0,
                num_clbits: self.num_clbits,
            });
        }
        Ok(clbit)
    }
}

/// The first `N` parameters of an instruction as angles.
fn angles<const N: usize>(inst: &Instruction) -> IrResult<[f64; N]> {
    if inst.params.len() < N {
        return Err(IrError::MissingParameter {
            operation: inst.name.clone(),
            expected: N,
            got: inst.params.len(),
        });
    }
    let mut out = [0.0; N];
    for (index, (slot, param)) in out.iter_mut().zip(&inst.params).enumerate() {
        *slot = param.as_f64().ok_or_else(|| IrError::NonNumericParameter {
            operation: inst.name.clone(),
            index,
        })?;
    }
    Ok(out)
}
