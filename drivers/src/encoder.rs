/*++

Licensed under the Apache-2.0 license.

File Name:

    encoder.rs

Abstract:

    File contains the instruction encoder for the coprocessor micro-sequencer.

--*/

use borg_registers::InstructionWord;

/// First source register; holds operand0.
pub const SRC1_REG: u32 = 0;

/// Second source register; holds operand1.
pub const SRC2_REG: u32 = 1;

/// Destination register; read back as the result.
pub const DEST_REG: u32 = 2;

/// Operations understood by the coprocessor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BorgOp {
    /// Single precision floating point addition
    FAdd,
}

impl BorgOp {
    fn funct7(self) -> u32 {
        match self {
            BorgOp::FAdd => InstructionWord::FUNCT7_FADD_S,
        }
    }
}

/// Encode `op` over the fixed register assignment `rd = r2, rs1 = r0, rs2 = r1`.
pub fn encode(op: BorgOp) -> InstructionWord {
    let mut word = InstructionWord::from(0);
    word.set_opcode(InstructionWord::OPCODE_OP_FP);
    word.set_rd(DEST_REG);
    word.set_funct3(0);
    word.set_rs1(SRC1_REG);
    word.set_rs2(SRC2_REG);
    word.set_funct7(op.funct7());
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_fadd() {
        assert_eq!(encode(BorgOp::FAdd).bits(), 0x0010_0153);
    }

    #[test]
    fn test_halt_is_zero() {
        assert_eq!(InstructionWord::HALT.bits(), 0);
        assert!(!encode(BorgOp::FAdd).is_halt());
    }
}
