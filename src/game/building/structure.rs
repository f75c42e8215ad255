//! Structure Generation
//!
//! Places randomly typed, oriented and colored blocks on integer positions.
//! Two layouts are supported:
//! - Lattice: one block per cell of a box, then the whole box is centered
//! - Random walk: a chain of blocks, each one step along +X, +Y or +Z from
//!   the previous one

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use super::dna::{DnaRecord, DnaSequence};
use super::palette::{PALETTE_SIZE, ROTATION_COUNT};
use crate::game::error::GenerationError;
use crate::game::types::HexColor;
use crate::random::{Axis, RandomField};

/// Upper bound on the number of cells a lattice may fill.
pub const MAX_LATTICE_CELLS: u64 = 1 << 20;

/// How blocks are laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureLayout {
    /// Fill a box of `size` cells, x outermost and z innermost
    Lattice { size: [u32; 3] },
    /// Walk `count` blocks from the origin
    RandomWalk { count: u32 },
}

impl Default for StructureLayout {
    fn default() -> Self {
        StructureLayout::RandomWalk { count: 12 }
    }
}

fn lattice_cells(size: [u32; 3]) -> Option<u64> {
    size.iter()
        .try_fold(1u64, |cells, &axis| cells.checked_mul(u64::from(axis)))
}

impl StructureLayout {
    pub fn validate(&self) -> Result<(), GenerationError> {
        match *self {
            StructureLayout::Lattice { size } if size.contains(&0) => Err(GenerationError::EmptyLattice),
            StructureLayout::Lattice { size } => match lattice_cells(size) {
                Some(cells) if cells <= MAX_LATTICE_CELLS => Ok(()),
                _ => Err(GenerationError::LatticeTooLarge {
                    size,
                    max: MAX_LATTICE_CELLS,
                }),
            },
            StructureLayout::RandomWalk { count: 0 } => Err(GenerationError::EmptyWalk),
            _ => Ok(()),
        }
    }
}

/// Structure generation parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParams {
    /// Whether a structure is generated next to the island
    pub enabled: bool,
    pub layout: StructureLayout,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            enabled: true,
            layout: StructureLayout::default(),
        }
    }
}

/// Generator output: records in generation order and the placement offset.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedStructure {
    pub records: Vec<DnaRecord>,
    /// Added to every block position when the structure is placed
    pub offset: Vec3,
}

impl GeneratedStructure {
    pub fn into_sequence(self, seed: Option<u64>) -> DnaSequence {
        DnaSequence {
            seed,
            offset: self.offset,
            blocks: self.records,
        }
    }
}

/// Generate a structure with the configured layout.
pub fn generate_structure(
    params: &StructureParams,
    rng: &mut RandomField,
) -> Result<GeneratedStructure, GenerationError> {
    params.layout.validate()?;

    let structure = match params.layout {
        StructureLayout::Lattice { size } => lattice(size, rng)?,
        StructureLayout::RandomWalk { count } => random_walk(count, rng),
    };

    tracing::debug!(
        seed = rng.seed(),
        blocks = structure.records.len(),
        layout = ?params.layout,
        "Generated structure"
    );

    Ok(structure)
}

fn lattice(size: [u32; 3], rng: &mut RandomField) -> Result<GeneratedStructure, GenerationError> {
    let too_large = GenerationError::LatticeTooLarge {
        size,
        max: MAX_LATTICE_CELLS,
    };
    let cells = lattice_cells(size).ok_or_else(|| too_large.clone())?;
    let [sx, sy, sz] = size.map(i32::try_from);
    let (Ok(sx), Ok(sy), Ok(sz), Ok(capacity)) = (sx, sy, sz, usize::try_from(cells)) else {
        return Err(too_large);
    };
    let mut records = Vec::with_capacity(capacity);
    let mut last = IVec3::ZERO;

    for x in 0..sx {
        for y in 0..sy {
            for z in 0..sz {
                last = IVec3::new(x, y, z);
                records.push(random_record(last, rng));
            }
        }
    }

    Ok(GeneratedStructure {
        records,
        offset: -last.as_vec3() / 2.0,
    })
}

fn random_walk(count: u32, rng: &mut RandomField) -> GeneratedStructure {
    let mut records = Vec::with_capacity(count as usize);
    let mut position = IVec3::ZERO;

    for _ in 0..count {
        records.push(random_record(position, rng));
        match rng.axis() {
            Axis::X => position.x += 1,
            Axis::Y => position.y += 1,
            Axis::Z => position.z += 1,
        }
    }

    GeneratedStructure {
        records,
        offset: Vec3::ZERO,
    }
}

/// Draw order is fixed: type, rotation, color bytes, then material values.
fn random_record(position: IVec3, rng: &mut RandomField) -> DnaRecord {
    let type_code = rng.code(PALETTE_SIZE - 1);
    let rotation_code = rng.code(ROTATION_COUNT - 1);
    let color = HexColor::new(rng.byte(), rng.byte(), rng.byte());
    let emissive_intensity = rng.unit();
    let roughness = rng.unit();
    let metalness = rng.unit();

    DnaRecord::new(
        position.as_vec3(),
        type_code,
        rotation_code,
        color,
        emissive_intensity,
        roughness,
        metalness,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(count: u32) -> StructureParams {
        StructureParams {
            enabled: true,
            layout: StructureLayout::RandomWalk { count },
        }
    }

    #[test]
    fn test_lattice_order_and_centering() {
        let params = StructureParams {
            enabled: true,
            layout: StructureLayout::Lattice { size: [2, 3, 4] },
        };
        let mut rng = RandomField::seeded(1);
        let structure = generate_structure(&params, &mut rng).unwrap();
        assert_eq!(structure.records.len(), 24);
        assert_eq!(structure.records[0].position(), Vec3::ZERO);
        assert_eq!(structure.records[1].position(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(structure.records[4].position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(structure.records[12].position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(structure.offset, Vec3::new(-0.5, -1.0, -1.5));
    }

    #[test]
    fn test_walk_steps_one_axis_at_a_time() {
        let mut rng = RandomField::seeded(2);
        let structure = generate_structure(&walk(30), &mut rng).unwrap();
        assert_eq!(structure.records[0].position(), Vec3::ZERO);
        for pair in structure.records.windows(2) {
            let step = pair[1].position() - pair[0].position();
            assert_eq!(step.x + step.y + step.z, 1.0);
            assert!(step.cmpge(Vec3::ZERO).all());
        }
        assert_eq!(structure.offset, Vec3::ZERO);
    }

    #[test]
    fn test_codes_stay_in_palette() {
        let mut rng = RandomField::seeded(3);
        let structure = generate_structure(&walk(200), &mut rng).unwrap();
        for record in &structure.records {
            assert!((0..PALETTE_SIZE).contains(&record.type_code()));
            assert!((0..ROTATION_COUNT).contains(&record.rotation_code()));
            assert!((0.0..=1.0).contains(&record.roughness()));
        }
    }

    #[test]
    fn test_empty_layouts_rejected() {
        let mut rng = RandomField::seeded(4);
        assert_eq!(generate_structure(&walk(0), &mut rng), Err(GenerationError::EmptyWalk));
        let params = StructureParams {
            enabled: true,
            layout: StructureLayout::Lattice { size: [3, 0, 3] },
        };
        assert_eq!(generate_structure(&params, &mut rng), Err(GenerationError::EmptyLattice));
    }

    #[test]
    fn test_oversized_lattice_rejected() {
        let huge = StructureLayout::Lattice {
            size: [2000, 2000, 2000],
        };
        assert!(matches!(huge.validate(), Err(GenerationError::LatticeTooLarge { .. })));

        let overflowing = StructureParams {
            enabled: true,
            layout: StructureLayout::Lattice {
                size: [u32::MAX, u32::MAX, 2],
            },
        };
        let mut rng = RandomField::seeded(5);
        assert!(matches!(
            generate_structure(&overflowing, &mut rng),
            Err(GenerationError::LatticeTooLarge { .. })
        ));

        let at_cap = StructureLayout::Lattice { size: [128, 128, 64] };
        assert_eq!(at_cap.validate(), Ok(()));
    }

    #[test]
    fn test_layout_json() {
        let layout: StructureLayout = serde_json::from_str(r#"{"kind": "lattice", "size": [5, 5, 5]}"#).unwrap();
        assert_eq!(layout, StructureLayout::Lattice { size: [5, 5, 5] });
        let layout: StructureLayout = serde_json::from_str(r#"{"kind": "random_walk", "count": 3}"#).unwrap();
        assert_eq!(layout, StructureLayout::RandomWalk { count: 3 });
    }
}
