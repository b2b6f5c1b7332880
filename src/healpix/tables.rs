//! Lookup tables shared by every index
//!
//! The Morton tables do not depend on the resolution, so they are built once
//! for the whole process on first use and shared by all `HealpixIndex`
//! instances.

use lazy_static::lazy_static;

/// Ring coordinate (in units of nside) of the southern corner of each base face
pub const JRLL: [i64; 12] = [2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4];

/// Longitude coordinate (in units of nside/2) of the southern corner of each base face
pub const JPLL: [i64; 12] = [1, 3, 5, 7, 0, 2, 4, 6, 1, 3, 5, 7];

lazy_static! {
    /// Compaction table: the even bits of a byte go to bits 0-3, the odd bits to bits 8-11
    static ref CTAB: [u64; 256] = {
        log::debug!("building Morton compaction table");
        let mut table = [0u64; 256];
        for (m, entry) in table.iter_mut().enumerate() {
            let m = m as u64;
            *entry = (m & 0x1)
                | ((m & 0x2) << 7)
                | ((m & 0x4) >> 1)
                | ((m & 0x8) << 6)
                | ((m & 0x10) >> 2)
                | ((m & 0x20) << 5)
                | ((m & 0x40) >> 3)
                | ((m & 0x80) << 4);
        }
        table
    };

    /// Spreading table: bit `i` of a byte goes to bit `2i`
    static ref UTAB: [u64; 256] = {
        log::debug!("building Morton spreading table");
        let mut table = [0u64; 256];
        for (m, entry) in table.iter_mut().enumerate() {
            let m = m as u64;
            *entry = (m & 0x1)
                | ((m & 0x2) << 1)
                | ((m & 0x4) << 2)
                | ((m & 0x8) << 3)
                | ((m & 0x10) << 4)
                | ((m & 0x20) << 5)
                | ((m & 0x40) << 6)
                | ((m & 0x80) << 7);
        }
        table
    };
}

/// Spreads the bits of a 32-bit coordinate onto the even bit positions of a u64
pub fn spread_bits(v: u32) -> u64 {
    let v = v as u64;
    UTAB[(v & 0xff) as usize]
        | (UTAB[((v >> 8) & 0xff) as usize] << 16)
        | (UTAB[((v >> 16) & 0xff) as usize] << 32)
        | (UTAB[((v >> 24) & 0xff) as usize] << 48)
}

/// Gathers the even bits of a u64 back into a 32-bit coordinate
///
/// Inverse of [`spread_bits`]; odd bits are ignored.
pub fn compact_bits(v: u64) -> u32 {
    // Fold the four 16-bit groups so that each byte of `raw` holds the even
    // bits of one input byte interleaved with those of the byte 2 groups up.
    let raw = (v & 0x5555)
        | ((v & 0x5555_0000) >> 15)
        | ((v & 0x5555_0000_0000) >> 16)
        | ((v & 0x5555_0000_0000_0000) >> 31);
    let compact = CTAB[(raw & 0xff) as usize]
        | (CTAB[((raw >> 8) & 0xff) as usize] << 4)
        | (CTAB[((raw >> 16) & 0xff) as usize] << 16)
        | (CTAB[((raw >> 24) & 0xff) as usize] << 20);
    compact as u32
}

/// Morton code of `(ix, iy)`: bits of `ix` on even positions, bits of `iy` on odd positions
pub fn interleave(ix: u32, iy: u32) -> u64 {
    spread_bits(ix) | (spread_bits(iy) << 1)
}

/// Splits a Morton code back into `(ix, iy)`
pub fn deinterleave(code: u64) -> (u32, u32) {
    (compact_bits(code), compact_bits(code >> 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_entries() {
        assert_eq!(UTAB[0], 0);
        assert_eq!(UTAB[0xff], 0x5555);
        assert_eq!(UTAB[0b101], 0b10001);
        assert_eq!(CTAB[0x55], 0xf);
        assert_eq!(CTAB[0xaa], 0xf00);
    }

    #[test]
    fn test_spread_compact_inverse() {
        for v in [0u32, 1, 2, 3, 0xff, 0x100, 0x1234, 0xbeef, 0x3fff, 0x12_3456, 0xdead_beef] {
            assert_eq!(compact_bits(spread_bits(v)), v, "value {:#x}", v);
        }
    }

    #[test]
    fn test_interleave_small_values() {
        assert_eq!(interleave(0, 0), 0);
        assert_eq!(interleave(1, 0), 1);
        assert_eq!(interleave(0, 1), 2);
        assert_eq!(interleave(1, 1), 3);
        assert_eq!(interleave(2, 0), 4);
        assert_eq!(interleave(3, 3), 15);
        assert_eq!(deinterleave(15), (3, 3));
        assert_eq!(deinterleave(6), (2, 1));
    }

    #[test]
    fn test_interleave_full_width() {
        let (ix, iy) = (0x3fff_u32, 0x2aaa_u32);
        assert_eq!(deinterleave(interleave(ix, iy)), (ix, iy));
        assert_eq!(interleave(u32::MAX, 0), 0x5555_5555_5555_5555);
        assert_eq!(interleave(0, u32::MAX), 0xaaaa_aaaa_aaaa_aaaa);
    }

    #[test]
    fn test_face_constants() {
        assert_eq!(JRLL.len(), 12);
        assert_eq!(JPLL.len(), 12);
        assert!(JRLL.iter().all(|&r| (2..=4).contains(&r)));
    }
}
