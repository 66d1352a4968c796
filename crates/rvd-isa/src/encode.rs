//! Field extraction and immediate reassembly helpers for RV32 instruction words.

/// Extract opcode field (bits [6:0]).
#[inline]
#[must_use]
pub const fn decode_opcode(instr: u32) -> u8 {
    (instr & 0x7F) as u8
}

/// Extract rd field (bits [11:7]).
#[inline]
#[must_use]
pub const fn decode_rd(instr: u32) -> u8 {
    ((instr >> 7) & 0x1F) as u8
}

/// Extract rs1 field (bits [19:15]).
#[inline]
#[must_use]
pub const fn decode_rs1(instr: u32) -> u8 {
    ((instr >> 15) & 0x1F) as u8
}

/// Extract rs2 field (bits [24:20]).
#[inline]
#[must_use]
pub const fn decode_rs2(instr: u32) -> u8 {
    ((instr >> 20) & 0x1F) as u8
}

/// Extract funct3 field (bits [14:12]).
#[inline]
#[must_use]
pub const fn decode_funct3(instr: u32) -> u8 {
    ((instr >> 12) & 0x7) as u8
}

/// Extract funct7 field (bits [31:25]).
#[inline]
#[must_use]
pub const fn decode_funct7(instr: u32) -> u8 {
    ((instr >> 25) & 0x7F) as u8
}

/// Extract the raw I-type immediate field (bits [31:20]), not sign-extended.
#[inline]
#[must_use]
pub const fn decode_i_field(instr: u32) -> u16 {
    ((instr >> 20) & 0xFFF) as u16
}

/// Extract the raw 20-bit upper field (bits [31:12]) shared by U and UJ layouts.
#[inline]
#[must_use]
pub const fn decode_upper_field(instr: u32) -> u32 {
    instr >> 12
}

/// Interpret the low `n` bits of `field` as an `n`-bit two's-complement value.
///
/// Bits above `n` are ignored. `n` must be in `1..=32`.
#[inline]
#[must_use]
pub const fn sign_extend_number(field: u32, n: u32) -> i32 {
    debug_assert!(n >= 1 && n <= 32);
    let shift = 32 - n;
    (field << shift).cast_signed() >> shift
}

/// Reassemble an S-type offset from its `imm[4:0]` and `imm[11:5]` groups.
#[inline]
#[must_use]
pub const fn store_offset(imm5: u8, imm7: u8) -> i32 {
    let imm = ((imm7 as u32) << 5) | (imm5 as u32 & 0x1F);
    sign_extend_number(imm, 12)
}

/// Reassemble an SB-type offset.
///
/// `imm5` holds `imm[4:1|11]` (word bits [11:7]) and `imm7` holds
/// `imm[12|10:5]` (word bits [31:25]). Bit 0 of the offset is always zero.
#[inline]
#[must_use]
pub const fn branch_offset(imm5: u8, imm7: u8) -> i32 {
    let lo = imm5 as u32;
    let hi = imm7 as u32;
    let imm12 = (hi >> 6) & 0x1;
    let imm11 = lo & 0x1;
    let imm10_5 = hi & 0x3F;
    let imm4_1 = (lo >> 1) & 0xF;
    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    sign_extend_number(imm, 13)
}

/// Reassemble a UJ-type offset from the 20-bit field `imm[20|10:1|11|19:12]`.
///
/// Bit 0 of the offset is always zero.
#[inline]
#[must_use]
pub const fn jump_offset(imm20: u32) -> i32 {
    let imm20_bit = (imm20 >> 19) & 0x1;
    let imm10_1 = (imm20 >> 9) & 0x3FF;
    let imm11 = (imm20 >> 8) & 0x1;
    let imm19_12 = imm20 & 0xFF;
    let imm = (imm20_bit << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    sign_extend_number(imm, 21)
}
