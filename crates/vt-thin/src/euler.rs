//! Local Euler-characteristic invariance test [Lee94].

use vt_core::Neighborhood;

/// Euler characteristic change per octant configuration, indexed by the
/// 8-bit code built in [`octant_code`]. Even codes never occur because bit 0
/// is always set.
#[rustfmt::skip]
pub const EULER_LUT: [i8; 256] = [
    0, 1, 0, -1, 0, -1, 0, 1, 0, -3, 0, -1, 0, -1, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, -3, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, -3, 0, 3, 0, -1, 0, 1, 0, 1, 0, 3, 0, -1, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, 1, 0, 3, 0, 3, 0, 1, 0, 5, 0, 3, 0, 3, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, -7, 0, -1, 0, -1, 0, 1, 0, -3, 0, -1, 0, -1, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, -3, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, -3, 0, 3, 0, -1, 0, 1, 0, 1, 0, 3, 0, -1, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
    0, 1, 0, 3, 0, 3, 0, 1, 0, 5, 0, 3, 0, 3, 0, 1,
    0, -1, 0, 1, 0, 1, 0, -1, 0, 3, 0, 1, 0, 1, 0, -1,
];

/// Neighborhood slots feeding bits 7 down to 1 of each octant code.
///
/// Octants are named by their y half (N/S), x half (W/E) and z half
/// (B = z-1, U = z+1).
pub const OCTANT_SLOTS: [[usize; 7]; 8] = [
    [24, 25, 15, 16, 21, 22, 12], // SWU
    [26, 23, 17, 14, 25, 22, 16], // SEU
    [18, 21, 9, 12, 19, 22, 10],  // NWU
    [20, 23, 19, 22, 11, 14, 10], // NEU
    [6, 15, 7, 16, 3, 12, 4],     // SWB
    [8, 7, 17, 16, 5, 4, 14],     // SEB
    [0, 9, 3, 12, 1, 10, 4],      // NWB
    [2, 1, 11, 10, 5, 4, 14],     // NEB
];

/// Builds the lookup code of one octant. Bit 0 stands for the center and is
/// always set.
pub fn octant_code(n: &Neighborhood, octant: usize) -> u8 {
    let mut code = 1u8;
    for (k, &slot) in OCTANT_SLOTS[octant].iter().enumerate() {
        if n.get(slot) {
            code |= 0x80 >> k;
        }
    }
    code
}

/// Sum of the eight octant contributions.
pub fn euler_delta(n: &Neighborhood) -> i32 {
    (0..OCTANT_SLOTS.len())
        .map(|o| i32::from(EULER_LUT[octant_code(n, o) as usize]))
        .sum()
}

/// Removing the center leaves the local Euler characteristic unchanged.
pub fn is_euler_invariant(n: &Neighborhood) -> bool {
    euler_delta(n) == 0
}
