//! A narrow stack-machine bytecode: the concrete `B` parameter the core
//! leaves opaque, satisfying `zonecheck_core::vm::Vm<Program>` (§6 "the VM is
//! described only through its contract"). Invariants, guards, and updates are
//! each one [`Program`], run against an integer-variable stack with a handful
//! of clock-side-effect opcodes.

use serde::{Deserialize, Serialize};
use zonecheck_core::dbm::{Bound, Constraint, Reset, ResetContainer};
use zonecheck_core::state::Intval;
use zonecheck_core::vm::Vm;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Cmp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// One stack-machine instruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Instr {
    /// Pushes a literal.
    PushConst(i32),
    /// Pushes the current value of integer variable `id`.
    PushIntVar(usize),
    /// Pops a value and stores it into integer variable `id`.
    StoreIntVar(usize),
    /// Pops `b`, `a`; pushes `a op b`.
    BinOp(BinOp),
    /// Pops `b`, `a`; pushes `1` if `a cmp b` holds, else `0`.
    Cmp(Cmp),
    /// Pops the top of stack; if zero, the program fails immediately.
    AssertNonZero,
    /// Pops a bound `c`; emits `clock <= c` (or `<` if `strict`).
    ClockLe { clock: usize, strict: bool },
    /// Pops a bound `c`; emits `clock >= c` (or `>` if `strict`).
    ClockGe { clock: usize, strict: bool },
    /// Pops a constant `k`; emits `target := k`.
    ResetToConst { target: usize },
    /// Emits `target := source`.
    ResetToClock { target: usize, source: usize },
    /// Pops a shift `k`; emits `target := source + k`.
    ResetToClockPlus { target: usize, source: usize },
}

/// A sequence of instructions run top-to-bottom; empty programs always
/// succeed with no side effects (the identity invariant/guard/update).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    instrs: Vec<Instr>,
}

impl Program {
    /// Builds a program from its instructions.
    pub fn new(instrs: impl IntoIterator<Item = Instr>) -> Program {
        Program {
            instrs: instrs.into_iter().collect(),
        }
    }

    /// The empty program: no effect, never fails.
    pub fn empty() -> Program {
        Program::default()
    }
}

/// The interpreter for [`Program`]s.
pub struct StackVm;

impl Vm<Program> for StackVm {
    fn run(
        &self,
        bytecode: &Program,
        intval: &mut Intval,
        clock_constraints: &mut Vec<Constraint>,
        clock_resets: &mut ResetContainer,
    ) -> bool {
        let mut stack: Vec<i32> = Vec::new();
        for instr in &bytecode.instrs {
            match *instr {
                Instr::PushConst(v) => stack.push(v),
                Instr::PushIntVar(id) => stack.push(intval.get(id)),
                Instr::StoreIntVar(id) => {
                    let v = stack.pop().expect("stack underflow: StoreIntVar");
                    *intval.as_mut_slice().get_mut(id).expect("intvar id out of range") = v;
                }
                Instr::BinOp(op) => {
                    let b = stack.pop().expect("stack underflow: BinOp rhs");
                    let a = stack.pop().expect("stack underflow: BinOp lhs");
                    stack.push(match op {
                        BinOp::Add => a + b,
                        BinOp::Sub => a - b,
                        BinOp::Mul => a * b,
                    });
                }
                Instr::Cmp(cmp) => {
                    let b = stack.pop().expect("stack underflow: Cmp rhs");
                    let a = stack.pop().expect("stack underflow: Cmp lhs");
                    let holds = match cmp {
                        Cmp::Lt => a < b,
                        Cmp::Le => a <= b,
                        Cmp::Gt => a > b,
                        Cmp::Ge => a >= b,
                        Cmp::Eq => a == b,
                        Cmp::Ne => a != b,
                    };
                    stack.push(holds as i32);
                }
                Instr::AssertNonZero => {
                    let v = stack.pop().expect("stack underflow: AssertNonZero");
                    if v == 0 {
                        return false;
                    }
                }
                Instr::ClockLe { clock, strict } => {
                    let bound = stack.pop().expect("stack underflow: ClockLe");
                    let b = if strict { Bound::lt(bound) } else { Bound::le(bound) };
                    clock_constraints.push(Constraint { i: clock, j: 0, bound: b });
                }
                Instr::ClockGe { clock, strict } => {
                    let bound = stack.pop().expect("stack underflow: ClockGe");
                    let b = if strict { Bound::lt(-bound) } else { Bound::le(-bound) };
                    clock_constraints.push(Constraint { i: 0, j: clock, bound: b });
                }
                Instr::ResetToConst { target } => {
                    let k = stack.pop().expect("stack underflow: ResetToConst");
                    clock_resets.push(Reset {
                        target,
                        source: 0,
                        shift: k,
                    });
                }
                Instr::ResetToClock { target, source } => {
                    clock_resets.push(Reset { target, source, shift: 0 });
                }
                Instr::ResetToClockPlus { target, source } => {
                    let k = stack.pop().expect("stack underflow: ResetToClockPlus");
                    clock_resets.push(Reset { target, source, shift: k });
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program_always_succeeds() {
        let vm = StackVm;
        let mut intval = Intval::new([]);
        let mut constraints = Vec::new();
        let mut resets = ResetContainer::new();
        assert!(vm.run(&Program::empty(), &mut intval, &mut constraints, &mut resets));
        assert!(constraints.is_empty());
    }

    #[test]
    fn assert_nonzero_fails_the_program_on_zero() {
        let vm = StackVm;
        let mut intval = Intval::new([0]);
        let mut constraints = Vec::new();
        let mut resets = ResetContainer::new();
        let program = Program::new([Instr::PushIntVar(0), Instr::AssertNonZero]);
        assert!(!vm.run(&program, &mut intval, &mut constraints, &mut resets));
    }

    #[test]
    fn clock_le_emits_an_upper_bound_constraint() {
        let vm = StackVm;
        let mut intval = Intval::new([]);
        let mut constraints = Vec::new();
        let mut resets = ResetContainer::new();
        let program = Program::new([
            Instr::PushConst(5),
            Instr::ClockLe { clock: 1, strict: false },
        ]);
        assert!(vm.run(&program, &mut intval, &mut constraints, &mut resets));
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].i, 1);
        assert_eq!(constraints[0].j, 0);
    }

    #[test]
    fn reset_to_clock_plus_emits_a_shifted_reset() {
        let vm = StackVm;
        let mut intval = Intval::new([]);
        let mut constraints = Vec::new();
        let mut resets = ResetContainer::new();
        let program = Program::new([
            Instr::PushConst(2),
            Instr::ResetToClockPlus { target: 2, source: 1 },
        ]);
        assert!(vm.run(&program, &mut intval, &mut constraints, &mut resets));
        let collected: Vec<_> = resets.iter().collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].target, 2);
        assert_eq!(collected[0].source, 1);
        assert_eq!(collected[0].shift, 2);
    }
}
