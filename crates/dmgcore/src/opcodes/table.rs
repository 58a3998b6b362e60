use crate::cpu::{Reg16, Reg8};

use super::{AddrMode, Cond, Op, OpcodeDescriptor, Operand};

const A: Operand = Operand::Reg(Reg8::A);
const B: Operand = Operand::Reg(Reg8::B);
const C: Operand = Operand::Reg(Reg8::C);
const D: Operand = Operand::Reg(Reg8::D);
const E: Operand = Operand::Reg(Reg8::E);
const H: Operand = Operand::Reg(Reg8::H);
const L: Operand = Operand::Reg(Reg8::L);

const AF: Operand = Operand::Pair(Reg16::AF);
const BC: Operand = Operand::Pair(Reg16::BC);
const DE: Operand = Operand::Pair(Reg16::DE);
const HL: Operand = Operand::Pair(Reg16::HL);
const SP: Operand = Operand::Pair(Reg16::SP);

const IND_BC: Operand = Operand::Indirect(Reg16::BC);
const IND_DE: Operand = Operand::Indirect(Reg16::DE);
const IND_HL: Operand = Operand::Indirect(Reg16::HL);
const HL_INC: Operand = Operand::IndirectInc;
const HL_DEC: Operand = Operand::IndirectDec;

const D8: Operand = Operand::Imm8;
const D16: Operand = Operand::Imm16;
const E8: Operand = Operand::Offset;
const A16: Operand = Operand::Direct;
const A8: Operand = Operand::HighImm;
const IND_C: Operand = Operand::HighC;
const SP_E8: Operand = Operand::SpOffset;

const NZ: Operand = Operand::Cond(Cond::NZ);
const Z: Operand = Operand::Cond(Cond::Z);
const NC: Operand = Operand::Cond(Cond::NC);
const CY: Operand = Operand::Cond(Cond::C);

/// Register order used by the 3-bit selectors in opcode bits:
/// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
const REG_SELECT: [Operand; 8] = [B, C, D, E, H, L, IND_HL, A];

const ALU_OPS: [Op; 8] = [
    Op::Add,
    Op::Adc,
    Op::Sub,
    Op::Sbc,
    Op::And,
    Op::Xor,
    Op::Or,
    Op::Cp,
];

const SHIFT_OPS: [Op; 8] = [
    Op::Rlc,
    Op::Rrc,
    Op::Rl,
    Op::Rr,
    Op::Sla,
    Op::Sra,
    Op::Swap,
    Op::Srl,
];

fn entry(
    value: u8,
    op: Op,
    length: u8,
    cycles: u8,
    mode: AddrMode,
    operands: &[Operand],
) -> OpcodeDescriptor {
    debug_assert!(operands.len() <= 4);
    let mut slots = [None; 4];
    for (slot, operand) in slots.iter_mut().zip(operands) {
        *slot = Some(*operand);
    }
    OpcodeDescriptor {
        value,
        prefixed: false,
        mnemonic: op.mnemonic(),
        op,
        length,
        mode,
        operands: slots,
        cycles,
        taken_cycles: 0,
    }
}

fn branch(
    value: u8,
    op: Op,
    length: u8,
    cycles: u8,
    taken: u8,
    mode: AddrMode,
    operands: &[Operand],
) -> OpcodeDescriptor {
    OpcodeDescriptor {
        taken_cycles: taken,
        ..entry(value, op, length, cycles, mode, operands)
    }
}

fn illegal(value: u8) -> OpcodeDescriptor {
    entry(value, Op::Illegal, 1, 0, AddrMode::Illegal, &[])
}

fn reg_mode(operand: Operand) -> AddrMode {
    if operand == IND_HL {
        AddrMode::Indirect
    } else {
        AddrMode::Register
    }
}

pub(super) fn build_primary() -> [OpcodeDescriptor; 256] {
    use AddrMode::*;

    let mut table: [OpcodeDescriptor; 256] = std::array::from_fn(|i| illegal(i as u8));
    let mut put = |desc: OpcodeDescriptor| table[desc.value as usize] = desc;

    // Column-regular rows 0x00..0x3F: INC r, DEC r, LD r,d8.
    for (y, &reg) in REG_SELECT.iter().enumerate() {
        let base = (y as u8) << 3;
        let mem = reg == IND_HL;
        put(entry(base | 0x04, Op::Inc, 1, if mem { 12 } else { 4 }, reg_mode(reg), &[reg]));
        put(entry(base | 0x05, Op::Dec, 1, if mem { 12 } else { 4 }, reg_mode(reg), &[reg]));
        let mode = if mem { Indirect } else { Immediate };
        put(entry(base | 0x06, Op::Ld, 2, if mem { 12 } else { 8 }, mode, &[reg, D8]));
    }

    // 16-bit pair rows.
    for (p, &pair) in [BC, DE, HL, SP].iter().enumerate() {
        let base = (p as u8) << 4;
        put(entry(base | 0x01, Op::Ld, 3, 12, Immediate, &[pair, D16]));
        put(entry(base | 0x03, Op::Inc, 1, 8, Register, &[pair]));
        put(entry(base | 0x09, Op::Add, 1, 8, Register, &[HL, pair]));
        put(entry(base | 0x0B, Op::Dec, 1, 8, Register, &[pair]));
    }
    for (p, &pair) in [BC, DE, HL, AF].iter().enumerate() {
        let base = 0xC0 | ((p as u8) << 4);
        put(entry(base | 0x01, Op::Pop, 1, 12, Stack, &[pair]));
        put(entry(base | 0x05, Op::Push, 1, 16, Stack, &[pair]));
    }

    put(entry(0x00, Op::Nop, 1, 4, Implied, &[]));
    put(entry(0x02, Op::Ld, 1, 8, Indirect, &[IND_BC, A]));
    put(entry(0x07, Op::Rlca, 1, 4, Implied, &[]));
    put(entry(0x08, Op::Ld, 3, 20, Direct, &[A16, SP]));
    put(entry(0x0A, Op::Ld, 1, 8, Indirect, &[A, IND_BC]));
    put(entry(0x0F, Op::Rrca, 1, 4, Implied, &[]));

    put(entry(0x10, Op::Stop, 2, 4, Implied, &[]));
    put(entry(0x12, Op::Ld, 1, 8, Indirect, &[IND_DE, A]));
    put(entry(0x17, Op::Rla, 1, 4, Implied, &[]));
    put(entry(0x18, Op::Jr, 2, 12, Relative, &[E8]));
    put(entry(0x1A, Op::Ld, 1, 8, Indirect, &[A, IND_DE]));
    put(entry(0x1F, Op::Rra, 1, 4, Implied, &[]));

    put(branch(0x20, Op::Jr, 2, 8, 4, Relative, &[NZ, E8]));
    put(entry(0x22, Op::Ld, 1, 8, IndirectInc, &[HL_INC, A]));
    put(entry(0x27, Op::Daa, 1, 4, Implied, &[]));
    put(branch(0x28, Op::Jr, 2, 8, 4, Relative, &[Z, E8]));
    put(entry(0x2A, Op::Ld, 1, 8, IndirectInc, &[A, HL_INC]));
    put(entry(0x2F, Op::Cpl, 1, 4, Implied, &[]));

    put(branch(0x30, Op::Jr, 2, 8, 4, Relative, &[NC, E8]));
    put(entry(0x32, Op::Ld, 1, 8, IndirectDec, &[HL_DEC, A]));
    put(entry(0x37, Op::Scf, 1, 4, Implied, &[]));
    put(branch(0x38, Op::Jr, 2, 8, 4, Relative, &[CY, E8]));
    put(entry(0x3A, Op::Ld, 1, 8, IndirectDec, &[A, HL_DEC]));
    put(entry(0x3F, Op::Ccf, 1, 4, Implied, &[]));

    // 0x40..0x7F: LD r,r' (0x76 is HALT).
    for (y, &dst) in REG_SELECT.iter().enumerate() {
        for (z, &src) in REG_SELECT.iter().enumerate() {
            let value = 0x40 | ((y as u8) << 3) | z as u8;
            let mem = dst == IND_HL || src == IND_HL;
            let mode = if mem { Indirect } else { Register };
            put(entry(value, Op::Ld, 1, if mem { 8 } else { 4 }, mode, &[dst, src]));
        }
    }
    put(entry(0x76, Op::Halt, 1, 4, Implied, &[]));

    // 0x80..0xBF: 8-bit ALU on A, and the matching d8 forms at 0xC6 + 8*y.
    for (y, &op) in ALU_OPS.iter().enumerate() {
        let with_a = matches!(op, Op::Add | Op::Adc | Op::Sbc);
        for (z, &src) in REG_SELECT.iter().enumerate() {
            let value = 0x80 | ((y as u8) << 3) | z as u8;
            let cycles = if src == IND_HL { 8 } else { 4 };
            let operands = [A, src];
            let operands = if with_a { &operands[..] } else { &operands[1..] };
            put(entry(value, op, 1, cycles, reg_mode(src), operands));
        }
        let operands = [A, D8];
        let operands = if with_a { &operands[..] } else { &operands[1..] };
        put(entry(0xC6 | ((y as u8) << 3), op, 2, 8, Immediate, operands));
    }

    // Control flow.
    for (i, &cond) in [NZ, Z, NC, CY].iter().enumerate() {
        let base = 0xC0 | ((i as u8) << 3);
        put(branch(base, Op::Ret, 1, 8, 12, Stack, &[cond]));
        put(branch(base | 0x02, Op::Jp, 3, 12, 4, Absolute, &[cond, D16]));
        put(branch(base | 0x04, Op::Call, 3, 12, 12, Absolute, &[cond, D16]));
    }
    for y in 0..8u8 {
        let vector = y << 3;
        put(entry(0xC7 | vector, Op::Rst, 1, 16, Vector, &[Operand::Vector(vector)]));
    }
    put(entry(0xC3, Op::Jp, 3, 16, Absolute, &[D16]));
    put(entry(0xC9, Op::Ret, 1, 16, Stack, &[]));
    put(entry(0xCB, Op::Prefix, 1, 4, Prefix, &[]));
    put(entry(0xCD, Op::Call, 3, 24, Absolute, &[D16]));
    put(entry(0xD9, Op::Reti, 1, 16, Stack, &[]));
    put(entry(0xE9, Op::Jp, 1, 4, RegisterJump, &[HL]));

    // High page, direct and SP arithmetic.
    put(entry(0xE0, Op::Ldh, 2, 12, HighPage, &[A8, A]));
    put(entry(0xE2, Op::Ld, 1, 8, HighPage, &[IND_C, A]));
    put(entry(0xE8, Op::Add, 2, 16, Immediate, &[SP, E8]));
    put(entry(0xEA, Op::Ld, 3, 16, Direct, &[A16, A]));
    put(entry(0xF0, Op::Ldh, 2, 12, HighPage, &[A, A8]));
    put(entry(0xF2, Op::Ld, 1, 8, HighPage, &[A, IND_C]));
    put(entry(0xF3, Op::Di, 1, 4, Implied, &[]));
    put(entry(0xF8, Op::Ld, 2, 12, Immediate, &[HL, SP_E8]));
    put(entry(0xF9, Op::Ld, 1, 8, Register, &[SP, HL]));
    put(entry(0xFA, Op::Ld, 3, 16, Direct, &[A, A16]));
    put(entry(0xFB, Op::Ei, 1, 4, Implied, &[]));

    table
}

pub(super) fn build_extended() -> [OpcodeDescriptor; 256] {
    std::array::from_fn(|i| {
        let value = i as u8;
        let x = value >> 6;
        let y = (value >> 3) & 0x07;
        let target = REG_SELECT[(value & 0x07) as usize];
        let mem = target == IND_HL;
        let mode = reg_mode(target);

        let desc = match x {
            0 => entry(value, SHIFT_OPS[y as usize], 2, if mem { 16 } else { 8 }, mode, &[target]),
            1 => entry(value, Op::Bit, 2, if mem { 12 } else { 8 }, mode, &[Operand::Bit(y), target]),
            2 => entry(value, Op::Res, 2, if mem { 16 } else { 8 }, mode, &[Operand::Bit(y), target]),
            _ => entry(value, Op::Set, 2, if mem { 16 } else { 8 }, mode, &[Operand::Bit(y), target]),
        };
        OpcodeDescriptor {
            prefixed: true,
            ..desc
        }
    })
}
