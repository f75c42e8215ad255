//! Generation Tests - Terrain Rings, Structures and DNA
//!
//! Properties of the generators that hold for any seed.

use glam::Vec3;
use island_forge_engine::game::building::{
    BlockShape, PALETTE_SIZE, ROTATION_COUNT, resolve_rotation, resolve_shape,
};
use island_forge_engine::game::terrain::build_ring;
use island_forge_engine::game::terrain::ring::validate_step;
use island_forge_engine::game::{
    DnaSequence, GenerationError, IslandParams, SceneConfig, StructureLayout, StructureParams,
    build_nested_rings, generate_structure, generate_terrain,
};
use island_forge_engine::random::RandomField;

// ============================================================================
// Ring Tests
// ============================================================================

#[test]
fn test_ring_sample_count_for_dividing_steps() {
    for step in [1, 2, 3, 5, 10, 15, 30, 45, 90, 120, 180, 360] {
        let mut rng = RandomField::seeded(step as u64);
        let ring = build_ring(|_| 10.0, 2.0, step, &mut rng).unwrap();
        assert_eq!(ring.len(), (360 / step) as usize, "step {step}");
    }
}

#[test]
fn test_ring_rejects_non_dividing_steps() {
    let mut rng = RandomField::seeded(0);
    for step in [0, 7, 11, 25, 361] {
        assert_eq!(
            build_ring(|_| 10.0, 2.0, step, &mut rng),
            Err(GenerationError::InvalidAngleStep(step))
        );
    }
    assert!(validate_step(360).is_ok());
}

#[test]
fn test_ring_radius_range() {
    for seed in 0..20 {
        let mut rng = RandomField::seeded(seed);
        let ring = build_ring(|_| 12.0, 1.5, 15, &mut rng).unwrap();
        for (point, radius) in ring.points().iter().zip(ring.radii()) {
            assert!((12.0..=12.0 + 1.5).contains(radius), "radius {radius}");
            assert!((point.length() - radius).abs() < 1e-4);
        }
    }
}

#[test]
fn test_first_sample_lies_on_positive_y() {
    let mut rng = RandomField::seeded(3);
    let ring = build_ring(|_| 5.0, 0.0, 90, &mut rng).unwrap();
    let p = ring.points();
    assert!((p[0].x).abs() < 1e-5 && (p[0].y - 5.0).abs() < 1e-5);
    assert!((p[1].x - 5.0).abs() < 1e-5 && p[1].y.abs() < 1e-5);
}

// ============================================================================
// Island Tests
// ============================================================================

#[test]
fn test_nested_rings_never_cross() {
    let params = IslandParams::default();
    for seed in 0..20 {
        let mut rng = RandomField::seeded(seed);
        let [grass, dirt, stone] = build_nested_rings(&params, &mut rng).unwrap();
        for i in 0..grass.len() {
            assert!(dirt.radii()[i] >= grass.radii()[i] + params.dirt.offset);
            assert!(stone.radii()[i] >= dirt.radii()[i] + params.stone.offset);
        }
    }
}

#[test]
fn test_layers_stack_downward() {
    let mut rng = RandomField::seeded(11);
    let layers = generate_terrain(&IslandParams::default(), &mut rng).unwrap();
    assert_eq!(layers.len(), 3);
    assert!(layers[0].vertical_offset > layers[1].vertical_offset);
    assert!(layers[1].vertical_offset > layers[2].vertical_offset);
    for layer in &layers {
        assert!(!layer.mesh().is_empty(), "{} mesh is empty", layer.kind.name());
    }
}

#[test]
fn test_invalid_island_params_are_rejected() {
    let mut params = IslandParams::default();
    params.grass.radius = -1.0;
    let mut rng = RandomField::seeded(0);
    assert!(matches!(
        generate_terrain(&params, &mut rng),
        Err(GenerationError::NegativeRadius { .. })
    ));
}

// ============================================================================
// Palette Tests
// ============================================================================

#[test]
fn test_resolve_shape_is_total() {
    for code in -50..50 {
        let shape = resolve_shape(code);
        let in_palette = (0..PALETTE_SIZE).contains(&code);
        assert_eq!(shape.is_placeholder(), !in_palette, "code {code}");
    }
    assert_eq!(resolve_shape(0), BlockShape::Cube);
}

#[test]
fn test_resolve_rotation_is_total() {
    let known: Vec<_> = (0..ROTATION_COUNT).map(resolve_rotation).collect();
    for code in [-1, ROTATION_COUNT, 1000] {
        assert!(known.contains(&resolve_rotation(code)));
    }
}

// ============================================================================
// Structure Tests
// ============================================================================

#[test]
fn test_default_walk_has_twelve_growing_blocks() {
    for seed in 0..10 {
        let mut rng = RandomField::seeded(seed);
        let structure = generate_structure(&StructureParams::default(), &mut rng).unwrap();
        assert_eq!(structure.records.len(), 12);
        for pair in structure.records.windows(2) {
            assert!(pair[1].position().length() > pair[0].position().length());
        }
    }
}

#[test]
fn test_empty_layouts_are_rejected() {
    let mut rng = RandomField::seeded(0);
    let lattice = StructureParams {
        enabled: true,
        layout: StructureLayout::Lattice { size: [3, 0, 3] },
    };
    assert_eq!(
        generate_structure(&lattice, &mut rng),
        Err(GenerationError::EmptyLattice)
    );
    let walk = StructureParams {
        enabled: true,
        layout: StructureLayout::RandomWalk { count: 0 },
    };
    assert_eq!(generate_structure(&walk, &mut rng), Err(GenerationError::EmptyWalk));
}

#[test]
fn test_oversized_lattice_fails_validation() {
    let mut config = SceneConfig::default();
    config.structure.layout = StructureLayout::Lattice {
        size: [2000, 2000, 2000],
    };
    assert!(matches!(
        config.validate(),
        Err(GenerationError::LatticeTooLarge { .. })
    ));

    let mut rng = RandomField::seeded(0);
    assert!(matches!(
        generate_structure(&config.structure, &mut rng),
        Err(GenerationError::LatticeTooLarge { .. })
    ));
}

#[test]
fn test_lattice_is_centered() {
    let params = StructureParams {
        enabled: true,
        layout: StructureLayout::Lattice { size: [3, 3, 3] },
    };
    let mut rng = RandomField::seeded(4);
    let structure = generate_structure(&params, &mut rng).unwrap();
    assert_eq!(structure.records.len(), 27);
    let sum: Vec3 = structure
        .records
        .iter()
        .map(|r| r.position() + structure.offset)
        .sum();
    assert!(sum.length() < 1e-4);
}

// ============================================================================
// DNA Tests
// ============================================================================

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[test]
fn test_dna_colors_are_lowercase_hex() {
    let mut rng = RandomField::seeded(21);
    let dna = generate_structure(&StructureParams::default(), &mut rng)
        .unwrap()
        .into_sequence(Some(21));
    let json: serde_json::Value = serde_json::from_str(&dna.to_json().unwrap()).unwrap();
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 12);
    for block in blocks {
        let color = block["color"].as_str().unwrap();
        assert!(is_hex_color(color), "bad color {color}");
    }
}

#[test]
fn test_loaded_dna_material_stays_in_unit_range() {
    let path = std::env::temp_dir().join(format!("island_forge_wild_dna_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r##"{"blocks": [{"position": [1, 2, 3], "type_code": 2, "rotation_code": 4,
            "color": "#00ff7f", "emissive_intensity": 7.5, "roughness": -3.0, "metalness": 42.0}]}"##,
    )
    .unwrap();
    let loaded = DnaSequence::load(&path);
    let _ = std::fs::remove_file(&path);

    let block = loaded.unwrap().blocks[0];
    assert_eq!(block.emissive_intensity(), 1.0);
    assert_eq!(block.roughness(), 0.0);
    assert_eq!(block.metalness(), 1.0);
    assert_eq!(block.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_dna_round_trips_through_file() {
    let mut rng = RandomField::seeded(8);
    let dna = generate_structure(&StructureParams::default(), &mut rng)
        .unwrap()
        .into_sequence(Some(8));
    let path = std::env::temp_dir().join(format!("island_forge_dna_{}.json", std::process::id()));
    dna.save(&path).unwrap();
    let loaded = DnaSequence::load(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded.unwrap(), dna);
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let generate = |seed| {
        let mut rng = RandomField::seeded(seed);
        let layers = generate_terrain(&IslandParams::default(), &mut rng).unwrap();
        let dna = generate_structure(&StructureParams::default(), &mut rng)
            .unwrap()
            .into_sequence(Some(seed));
        (layers, dna.to_json().unwrap())
    };
    let (layers_a, json_a) = generate(99);
    let (layers_b, json_b) = generate(99);
    assert_eq!(layers_a, layers_b);
    assert_eq!(json_a, json_b);

    let (_, json_c) = generate(100);
    assert_ne!(json_a, json_c);
}
