//! # Opcode tables
//!
//! Two fixed 256-entry tables of decode metadata: the primary table indexed
//! by the first instruction byte, and the extended table indexed by the byte
//! following a `0xCB` prefix. Both are built once, on first use, and never
//! change afterwards.
//!
//! A descriptor carries everything the dispatcher needs to execute an
//! instruction without looking at the opcode bits again: the operation tag,
//! the operand roles, the byte length and the base cycle cost (plus the
//! extra cost charged when a conditional branch is taken).
//!
//! Undefined primary bytes are present with the [`Op::Illegal`] tag.

use std::fmt;

use lazy_static::lazy_static;

use crate::cpu::{Reg16, Reg8};

mod table;

/// Operation tag. One variant per distinct handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    Nop,
    Ld,
    Ldh,
    Inc,
    Dec,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,
    Jr,
    Jp,
    Call,
    Ret,
    Reti,
    Rst,
    Push,
    Pop,
    Di,
    Ei,
    Halt,
    Stop,
    /// The `0xCB` prefix byte; the real instruction is in the extended table.
    Prefix,
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
    Bit,
    Res,
    Set,
    Illegal,
}

impl Op {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Nop => "NOP",
            Op::Ld => "LD",
            Op::Ldh => "LDH",
            Op::Inc => "INC",
            Op::Dec => "DEC",
            Op::Add => "ADD",
            Op::Adc => "ADC",
            Op::Sub => "SUB",
            Op::Sbc => "SBC",
            Op::And => "AND",
            Op::Xor => "XOR",
            Op::Or => "OR",
            Op::Cp => "CP",
            Op::Rlca => "RLCA",
            Op::Rrca => "RRCA",
            Op::Rla => "RLA",
            Op::Rra => "RRA",
            Op::Daa => "DAA",
            Op::Cpl => "CPL",
            Op::Scf => "SCF",
            Op::Ccf => "CCF",
            Op::Jr => "JR",
            Op::Jp => "JP",
            Op::Call => "CALL",
            Op::Ret => "RET",
            Op::Reti => "RETI",
            Op::Rst => "RST",
            Op::Push => "PUSH",
            Op::Pop => "POP",
            Op::Di => "DI",
            Op::Ei => "EI",
            Op::Halt => "HALT",
            Op::Stop => "STOP",
            Op::Prefix => "PREFIX",
            Op::Rlc => "RLC",
            Op::Rrc => "RRC",
            Op::Rl => "RL",
            Op::Rr => "RR",
            Op::Sla => "SLA",
            Op::Sra => "SRA",
            Op::Swap => "SWAP",
            Op::Srl => "SRL",
            Op::Bit => "BIT",
            Op::Res => "RES",
            Op::Set => "SET",
            Op::Illegal => "ILLEGAL",
        }
    }

    /// Instructions whose handler may set the program counter itself.
    pub const fn is_control_flow(self) -> bool {
        matches!(
            self,
            Op::Jr | Op::Jp | Op::Call | Op::Ret | Op::Reti | Op::Rst
        )
    }
}

/// Branch condition, tested against the Z and C flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

/// Role of one operand of an instruction.
///
/// Immediate roles (`Imm8`, `Imm16`, `Offset`, `Direct`, `HighImm`,
/// `SpOffset`) read their data from the bytes following the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// 8-bit register.
    Reg(Reg8),
    /// 16-bit register pair (or SP).
    Pair(Reg16),
    /// Memory addressed by a pair: `(BC)`, `(DE)`, `(HL)`.
    Indirect(Reg16),
    /// `(HL+)`: memory at HL, HL incremented after the access.
    IndirectInc,
    /// `(HL-)`: memory at HL, HL decremented after the access.
    IndirectDec,
    /// 8-bit immediate.
    Imm8,
    /// 16-bit immediate, low byte first.
    Imm16,
    /// Signed 8-bit displacement.
    Offset,
    /// Memory at a 16-bit immediate address.
    Direct,
    /// Memory at `0xFF00 + imm8`.
    HighImm,
    /// Memory at `0xFF00 + C`.
    HighC,
    /// `SP + e8`.
    SpOffset,
    Cond(Cond),
    /// Fixed reset vector.
    Vector(u8),
    /// Bit index for the extended bit operations.
    Bit(u8),
}

impl Operand {
    /// Whether the operand is a 16-bit quantity.
    pub const fn is_wide(self) -> bool {
        matches!(self, Operand::Pair(_) | Operand::Imm16 | Operand::SpOffset)
    }

    /// Bytes the operand occupies after the opcode.
    pub const fn immediate_len(self) -> u8 {
        match self {
            Operand::Imm8 | Operand::Offset | Operand::HighImm | Operand::SpOffset => 1,
            Operand::Imm16 | Operand::Direct => 2,
            _ => 0,
        }
    }
}

/// Addressing-mode family of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddrMode {
    Implied,
    Register,
    Immediate,
    Indirect,
    IndirectInc,
    IndirectDec,
    Direct,
    HighPage,
    Stack,
    Relative,
    Absolute,
    RegisterJump,
    Vector,
    Prefix,
    Illegal,
}

/// Static decode metadata for one instruction byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeDescriptor {
    pub value: u8,
    /// Whether this entry lives in the extended (`0xCB`) table.
    pub prefixed: bool,
    pub mnemonic: &'static str,
    pub op: Op,
    /// Total instruction length in bytes, prefix included.
    pub length: u8,
    pub mode: AddrMode,
    pub operands: [Option<Operand>; 4],
    /// Base cost in cycles (branch not taken).
    pub cycles: u8,
    /// Extra cost when a conditional branch is taken.
    pub taken_cycles: u8,
}

impl OpcodeDescriptor {
    pub fn operands(&self) -> impl Iterator<Item = Operand> + '_ {
        self.operands.iter().flatten().copied()
    }

    /// First operand that is not a branch condition.
    pub fn target(&self) -> Option<Operand> {
        self.operands()
            .find(|operand| !matches!(operand, Operand::Cond(_)))
    }

    /// Last operand; the data source for two-operand forms.
    pub fn source(&self) -> Option<Operand> {
        self.operands().last()
    }

    pub fn condition(&self) -> Option<Cond> {
        match self.operands[0] {
            Some(Operand::Cond(cond)) => Some(cond),
            _ => None,
        }
    }

    pub fn is_illegal(&self) -> bool {
        self.op == Op::Illegal
    }

    /// Assembler text with immediates filled in from `bytes`, the raw
    /// instruction starting at its opcode (prefix included). Relative
    /// jumps show their destination computed from `pc`. Missing bytes
    /// read as zero.
    pub fn render(&self, pc: u16, bytes: &[u8]) -> String {
        let byte = |i: usize| bytes.get(i).copied().unwrap_or(0);
        let imm8 = byte(1);
        let imm16 = u16::from_le_bytes([byte(1), byte(2)]);
        let offset = imm8 as i8;

        let mut text = String::from(self.mnemonic);
        for (i, operand) in self.operands().enumerate() {
            text.push_str(if i == 0 { " " } else { "," });
            let rendered = match operand {
                Operand::Imm8 => format!("${imm8:02X}"),
                Operand::Imm16 => format!("${imm16:04X}"),
                Operand::Direct => format!("(${imm16:04X})"),
                Operand::HighImm => format!("($FF{imm8:02X})"),
                Operand::Offset if self.op == Op::Jr => {
                    let dest = pc.wrapping_add(self.length as u16).wrapping_add_signed(offset as i16);
                    format!("${dest:04X}")
                }
                Operand::Offset => format!("{offset:+}"),
                Operand::SpOffset => format!("SP{offset:+}"),
                other => other.to_string(),
            };
            text.push_str(&rendered);
        }
        text
    }
}

lazy_static! {
    static ref PRIMARY: [OpcodeDescriptor; 256] = table::build_primary();
    static ref EXTENDED: [OpcodeDescriptor; 256] = table::build_extended();
}

/// Descriptor for a primary opcode byte.
pub fn decode(opcode: u8) -> &'static OpcodeDescriptor {
    &PRIMARY[opcode as usize]
}

/// Descriptor for the byte following a `0xCB` prefix.
pub fn decode_prefixed(opcode: u8) -> &'static OpcodeDescriptor {
    &EXTENDED[opcode as usize]
}

pub fn primary_table() -> &'static [OpcodeDescriptor; 256] {
    &PRIMARY
}

pub fn extended_table() -> &'static [OpcodeDescriptor; 256] {
    &EXTENDED
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{reg:?}"),
            Operand::Pair(pair) => write!(f, "{pair:?}"),
            Operand::Indirect(pair) => write!(f, "({pair:?})"),
            Operand::IndirectInc => f.write_str("(HL+)"),
            Operand::IndirectDec => f.write_str("(HL-)"),
            Operand::Imm8 => f.write_str("d8"),
            Operand::Imm16 => f.write_str("d16"),
            Operand::Offset => f.write_str("e8"),
            Operand::Direct => f.write_str("(a16)"),
            Operand::HighImm => f.write_str("(a8)"),
            Operand::HighC => f.write_str("(C)"),
            Operand::SpOffset => f.write_str("SP+e8"),
            Operand::Cond(cond) => write!(f, "{cond}"),
            Operand::Vector(vector) => write!(f, "{vector:02X}H"),
            Operand::Bit(bit) => write!(f, "{bit}"),
        }
    }
}

impl fmt::Display for OpcodeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic)?;
        for (i, operand) in self.operands().enumerate() {
            f.write_str(if i == 0 { " " } else { "," })?;
            write!(f, "{operand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_primary_byte_has_exactly_one_descriptor() {
        for (i, desc) in primary_table().iter().enumerate() {
            assert_eq!(desc.value as usize, i);
            assert!(!desc.prefixed);
            assert_eq!(decode(i as u8), desc);
        }
        for (i, desc) in extended_table().iter().enumerate() {
            assert_eq!(desc.value as usize, i);
            assert!(desc.prefixed);
            assert_eq!(desc.length, 2);
            assert!(!desc.is_illegal());
        }
    }

    #[test]
    fn decoding_is_stable() {
        for byte in 0..=255u8 {
            assert_eq!(*decode(byte), *decode(byte));
            assert_eq!(*decode_prefixed(byte), *decode_prefixed(byte));
        }
    }

    #[test]
    fn undefined_bytes_are_tagged_illegal() {
        let holes = [
            0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
        ];
        let illegal: Vec<u8> = primary_table()
            .iter()
            .filter(|desc| desc.is_illegal())
            .map(|desc| desc.value)
            .collect();
        assert_eq!(illegal, holes);
    }

    #[test]
    fn lengths_cover_immediate_operands() {
        for desc in primary_table().iter().filter(|d| !d.is_illegal()) {
            let immediates: u8 = desc.operands().map(Operand::immediate_len).sum();
            let expected = match desc.op {
                // STOP carries a padding byte.
                Op::Stop => 2,
                _ => 1 + immediates,
            };
            assert_eq!(desc.length, expected, "{desc} (0x{:02X})", desc.value);
        }
    }

    #[test]
    fn only_conditional_branches_have_a_taken_cost() {
        for desc in primary_table().iter() {
            if desc.condition().is_some() {
                assert!(desc.op.is_control_flow());
                assert!(desc.taken_cycles > 0, "{desc}");
            } else {
                assert_eq!(desc.taken_cycles, 0, "{desc}");
            }
        }
    }

    #[test]
    fn branch_families_have_fixed_costs() {
        let cost = |byte: u8| (decode(byte).cycles, decode(byte).taken_cycles);
        assert_eq!(cost(0x20), (8, 4)); // JR NZ
        assert_eq!(cost(0xC2), (12, 4)); // JP NZ
        assert_eq!(cost(0xC4), (12, 12)); // CALL NZ
        assert_eq!(cost(0xC0), (8, 12)); // RET NZ
        assert_eq!(cost(0x18), (12, 0)); // JR
        assert_eq!(cost(0xCD), (24, 0)); // CALL
    }

    #[test]
    fn descriptors_render_as_assembly() {
        assert_eq!(decode(0x3E).to_string(), "LD A,d8");
        assert_eq!(decode(0x22).to_string(), "LD (HL+),A");
        assert_eq!(decode(0xE0).to_string(), "LDH (a8),A");
        assert_eq!(decode(0x20).to_string(), "JR NZ,e8");
        assert_eq!(decode(0xFF).to_string(), "RST 38H");
        assert_eq!(decode(0xF8).to_string(), "LD HL,SP+e8");
        assert_eq!(decode_prefixed(0x5E).to_string(), "BIT 3,(HL)");
        assert_eq!(decode_prefixed(0x37).to_string(), "SWAP A");
    }

    #[test]
    fn render_fills_in_operand_bytes() {
        assert_eq!(decode(0x3E).render(0x0100, &[0x3E, 0x42]), "LD A,$42");
        assert_eq!(decode(0xC3).render(0x0100, &[0xC3, 0x50, 0x01]), "JP $0150");
        assert_eq!(decode(0xEA).render(0, &[0xEA, 0x00, 0xC0]), "LD ($C000),A");
        assert_eq!(decode(0xE0).render(0, &[0xE0, 0x44]), "LDH ($FF44),A");
        // JR NZ,-2 at 0x0200 loops onto itself.
        assert_eq!(decode(0x20).render(0x0200, &[0x20, 0xFE]), "JR NZ,$0200");
        assert_eq!(decode(0xE8).render(0, &[0xE8, 0xFF]), "ADD SP,-1");
        assert_eq!(decode(0xF8).render(0, &[0xF8, 0x05]), "LD HL,SP+5");
        assert_eq!(decode_prefixed(0x7C).render(0, &[0xCB, 0x7C]), "BIT 7,H");
    }

    #[test]
    fn extended_costs_depend_on_memory_operand() {
        assert_eq!(decode_prefixed(0x00).cycles, 8); // RLC B
        assert_eq!(decode_prefixed(0x06).cycles, 16); // RLC (HL)
        assert_eq!(decode_prefixed(0x46).cycles, 12); // BIT 0,(HL)
        assert_eq!(decode_prefixed(0xC6).cycles, 16); // SET 0,(HL)
        assert_eq!(decode_prefixed(0x46).mode, AddrMode::Indirect);
    }
}
