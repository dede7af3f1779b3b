//! Simple-point test: octree labeling of the 26-neighborhood [Lee94].
//!
//! The 26 non-center slots are relabeled into a compact "cube" index
//! (slots `0..13` keep their index, slots `14..27` shift down by one). Each
//! of the eight 2x2x2 octants around the center owns seven cube cells.
//! Labeling starts in an octant containing the seed cell and spreads to the
//! octants sharing each newly labeled cell. All cells of one octant are
//! mutually 26-adjacent, so the result equals a 26-connected component count
//! over the neighbors with the center removed.

use vt_core::{CENTER, Neighborhood};

const INACTIVE: u8 = 0;
const ACTIVE: u8 = 1;
const FIRST_LABEL: u8 = 2;

#[derive(Debug, Clone, Copy)]
struct Link {
    cell: u8,
    /// Octants (bit per octant) that also contain `cell`.
    next: u8,
}

const fn link(cell: u8, next: u8) -> Link {
    Link { cell, next }
}

/// Cells of each octant and the octants to continue into when a cell gets
/// labeled.
#[rustfmt::skip]
const OCTANT_LINKS: [[Link; 7]; 8] = [
    [link(0, 0b00000000), link(1, 0b00000010), link(3, 0b00000100), link(4, 0b00001110), link(9, 0b00010000), link(10, 0b00110010), link(12, 0b01010100)],
    [link(1, 0b00000001), link(4, 0b00001101), link(10, 0b00110001), link(2, 0b00000000), link(5, 0b00001000), link(11, 0b00100000), link(13, 0b10101000)],
    [link(3, 0b00000001), link(4, 0b00001011), link(12, 0b01010001), link(6, 0b00000000), link(7, 0b00001000), link(14, 0b01000000), link(15, 0b11001000)],
    [link(4, 0b00000111), link(5, 0b00000010), link(13, 0b10100010), link(7, 0b00000100), link(15, 0b11000100), link(8, 0b00000000), link(16, 0b10000000)],
    [link(9, 0b00000001), link(10, 0b00100011), link(12, 0b01000101), link(17, 0b00000000), link(18, 0b00100000), link(20, 0b01000000), link(21, 0b11100000)],
    [link(10, 0b00010011), link(11, 0b00000010), link(13, 0b10001010), link(18, 0b00010000), link(21, 0b11010000), link(19, 0b00000000), link(22, 0b10000000)],
    [link(12, 0b00010101), link(14, 0b00000100), link(15, 0b10001100), link(20, 0b00010000), link(21, 0b10110000), link(23, 0b00000000), link(24, 0b10000000)],
    [link(13, 0b00101010), link(15, 0b01001100), link(16, 0b00001000), link(21, 0b01110000), link(22, 0b00100000), link(24, 0b01000000), link(25, 0b00000000)],
];

/// Octant used to start labeling from each cube cell.
const SEED_OCTANT: [u8; 26] = [
    0, 0, 1, 0, 0, 1, 2, 2, 3, 0, 0, 1, 0, 1, 2, 2, 3, 4, 4, 5, 4, 4, 5, 6, 6, 7,
];

fn load_cube(n: &Neighborhood) -> [u8; 26] {
    let mut cube = [INACTIVE; 26];
    for (slot, &v) in n.as_array().iter().enumerate() {
        if slot == CENTER || !v {
            continue;
        }
        let cell = if slot < CENTER { slot } else { slot - 1 };
        cube[cell] = ACTIVE;
    }
    cube
}

fn flood(cube: &mut [u8; 26], seed: usize, label: u8) {
    let mut pending = 1u8 << SEED_OCTANT[seed];
    while pending != 0 {
        let octant = pending.trailing_zeros() as usize;
        pending &= pending - 1;

        for l in &OCTANT_LINKS[octant] {
            let cell = &mut cube[l.cell as usize];
            if *cell == ACTIVE {
                *cell = label;
                pending |= l.next;
            }
        }
    }
}

/// Labels components until `limit` of them have been found.
fn label_components(n: &Neighborhood, limit: usize) -> usize {
    let mut cube = load_cube(n);
    let mut found = 0;
    for seed in 0..cube.len() {
        if cube[seed] != ACTIVE {
            continue;
        }
        flood(&mut cube, seed, FIRST_LABEL + found as u8);
        found += 1;
        if found >= limit {
            break;
        }
    }
    found
}

/// Number of 26-connected foreground components among the neighbors once
/// the center is removed.
pub fn count_components(n: &Neighborhood) -> usize {
    label_components(n, usize::MAX)
}

/// Removing the center does not split its neighbors into two or more
/// components. A voxel without foreground neighbors counts as simple.
pub fn is_simple_point(n: &Neighborhood) -> bool {
    label_components(n, 2) < 2
}

#[cfg(test)]
mod tests {
    use vt_core::{CENTER, Neighborhood, OFFSETS};

    use super::{OCTANT_LINKS, SEED_OCTANT, count_components, is_simple_point};

    fn brute_force_components(n: &Neighborhood) -> usize {
        let active: Vec<usize> = (0..27).filter(|&i| i != CENTER && n.get(i)).collect();
        let mut comp = vec![usize::MAX; 27];
        let mut count = 0;
        for &start in &active {
            if comp[start] != usize::MAX {
                continue;
            }
            comp[start] = count;
            let mut stack = vec![start];
            while let Some(a) = stack.pop() {
                for &b in &active {
                    let touching = (0..3).all(|k| (OFFSETS[a][k] - OFFSETS[b][k]).abs() <= 1);
                    if comp[b] == usize::MAX && touching {
                        comp[b] = count;
                        stack.push(b);
                    }
                }
            }
            count += 1;
        }
        count
    }

    fn cube_to_slot(cell: usize) -> usize {
        if cell < CENTER { cell } else { cell + 1 }
    }

    #[test]
    fn octants_are_2x2x2_blocks_around_center() {
        for links in OCTANT_LINKS {
            let slots: Vec<usize> = links.iter().map(|l| cube_to_slot(l.cell as usize)).collect();
            for axis in 0..3 {
                let signs: Vec<isize> = slots.iter().map(|&s| OFFSETS[s][axis]).collect();
                assert!(
                    signs.iter().all(|&d| d <= 0) || signs.iter().all(|&d| d >= 0),
                    "octant crosses axis {axis}: {slots:?}"
                );
            }
        }
    }

    #[test]
    fn seed_octant_contains_its_cell() {
        for (cell, &octant) in SEED_OCTANT.iter().enumerate() {
            assert!(
                OCTANT_LINKS[octant as usize]
                    .iter()
                    .any(|l| l.cell as usize == cell),
                "cell {cell} not in octant {octant}"
            );
        }
    }

    #[test]
    fn links_point_at_every_other_owner() {
        for (octant, links) in OCTANT_LINKS.iter().enumerate() {
            for l in links {
                let owners = OCTANT_LINKS
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| other.iter().any(|m| m.cell == l.cell))
                    .fold(0u8, |acc, (o, _)| acc | (1 << o));
                assert_eq!(l.next, owners & !(1 << octant), "octant {octant} cell {}", l.cell);
            }
        }
    }

    #[test]
    fn no_neighbors_is_simple() {
        let n = Neighborhood::from_indices(&[CENTER]);
        assert_eq!(count_components(&n), 0);
        assert!(is_simple_point(&n));
    }

    #[test]
    fn single_neighbor_is_simple() {
        for slot in (0..27).filter(|&s| s != CENTER) {
            let n = Neighborhood::from_indices(&[CENTER, slot]);
            assert!(is_simple_point(&n), "slot {slot}");
        }
    }

    #[test]
    fn opposite_faces_are_not_simple() {
        for (a, b) in [(12, 14), (10, 16), (4, 22)] {
            let n = Neighborhood::from_indices(&[a, CENTER, b]);
            assert_eq!(count_components(&n), 2);
            assert!(!is_simple_point(&n));
        }
    }

    #[test]
    fn all_corners_are_separate_components() {
        let n = Neighborhood::from_indices(&[0, 2, 6, 8, 18, 20, 24, 26]);
        assert_eq!(count_components(&n), 8);
        assert!(!is_simple_point(&n));
    }

    #[test]
    fn diagonal_touch_joins_components() {
        // (-1, 0, 0) and (0, 1, 0) touch along a diagonal.
        let n = Neighborhood::from_indices(&[12, CENTER, 16]);
        assert_eq!(count_components(&n), 1);
        assert!(is_simple_point(&n));
    }

    #[test]
    fn full_cube_is_simple() {
        let n = Neighborhood::from_array([true; 27]);
        assert_eq!(count_components(&n), 1);
        assert!(is_simple_point(&n));
    }

    #[test]
    fn every_planar_configuration_matches_brute_force() {
        let plane: Vec<usize> = (9..18).filter(|&s| s != CENTER).collect();
        for mask in 0u32..256 {
            let mut on = vec![CENTER];
            for (bit, &slot) in plane.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    on.push(slot);
                }
            }
            let n = Neighborhood::from_indices(&on);
            let expected = brute_force_components(&n);
            assert_eq!(count_components(&n), expected, "mask {mask:#010b}");
            assert_eq!(is_simple_point(&n), expected <= 1, "mask {mask:#010b}");
        }
    }

    #[test]
    fn sampled_volumetric_configurations_match_brute_force() {
        // xorshift keeps the sweep deterministic
        let mut state = 0x2545_f491_4f6c_dd1du64;
        for _ in 0..20_000 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let mut values = [false; 27];
            for (i, v) in values.iter_mut().enumerate() {
                *v = (state >> i) & 1 == 1;
            }
            let n = Neighborhood::from_array(values);
            assert_eq!(count_components(&n), brute_force_components(&n));
        }
    }
}
