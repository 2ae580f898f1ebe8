//! # Generation Tests
//!
//! Whole-chunk properties every strategy must hold, run through the
//! public registry the way a host selects generators.

use rand::Rng;
use stratum_core::{ChunkShape, ContentRegistry, VoxelGrid};
use stratum_procedural::{
    chunk_rng, CubicGenerator, DebrisGenerator, DefaultGenerator, FlatGenerator, GenerationError,
    GeneratorRegistry, SpaceGenerator, TropicalGenerator, WorldGenerator, WorldSeed,
};

fn generate(generator: &dyn WorldGenerator, shape: ChunkShape, cx: i32, cz: i32, seed: u64) -> VoxelGrid {
    let mut grid = VoxelGrid::new(shape);
    generator.generate(&mut grid, cx, cz, WorldSeed::new(seed)).unwrap();
    grid
}

/// Test: Two runs with the same inputs produce byte-identical buffers.
#[test]
fn test_every_generator_is_deterministic() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();

    for key in registry.keys() {
        let generator = registry.create_generator(key, &content).unwrap();
        for (cx, cz, seed) in [(0, 0, 1), (-3, 7, 42), (100, -100, u64::MAX)] {
            let a = generate(generator.as_ref(), ChunkShape::STANDARD, cx, cz, seed);
            let b = generate(generator.as_ref(), ChunkShape::STANDARD, cx, cz, seed);
            assert_eq!(a.voxels(), b.voxels(), "{key} differs at ({cx}, {cz}) seed {seed}");
            assert_eq!(a.encode_compressed(), b.encode_compressed());
        }
    }
}

/// Test: A fresh generator instance reproduces the same chunk.
#[test]
fn test_rebuilt_generator_matches() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();
    for key in registry.keys() {
        let first = registry.create_generator(key, &content).unwrap();
        let second = registry.create_generator(key, &content).unwrap();
        assert_eq!(
            generate(first.as_ref(), ChunkShape::STANDARD, 5, 5, 9),
            generate(second.as_ref(), ChunkShape::STANDARD, 5, 5, 9),
            "{key}"
        );
    }
}

/// Test: Seeds change the output of every seeded strategy.
#[test]
fn test_seed_changes_output() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();
    for key in registry.keys().into_iter().filter(|k| *k != FlatGenerator::KEY) {
        let generator = registry.create_generator(key, &content).unwrap();
        assert_ne!(
            generate(generator.as_ref(), ChunkShape::STANDARD, 0, 0, 1),
            generate(generator.as_ref(), ChunkShape::STANDARD, 0, 0, 2),
            "{key} ignores the seed"
        );
    }
}

/// Test: Only registered ids are written, and states stay cleared.
#[test]
fn test_generated_ids_are_registered() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();
    for key in registry.keys() {
        let generator = registry.create_generator(key, &content).unwrap();
        let grid = generate(generator.as_ref(), ChunkShape::STANDARD, 2, -1, 77);
        for voxel in grid.voxels() {
            assert!(content.contains_id(voxel.id), "{key} wrote id {}", voxel.id);
            assert_eq!(voxel.states, 0, "{key} wrote state bits");
        }
    }
}

/// Test: Strategies fill non-standard shapes without reading outside their windows.
#[test]
fn test_custom_shapes() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();
    for shape in [ChunkShape::new(8, 8, 128), ChunkShape::new(32, 4, 256)] {
        for key in registry.keys() {
            let generator = registry.create_generator(key, &content).unwrap();
            let mut grid = VoxelGrid::new(shape);
            assert_eq!(generator.generate(&mut grid, -1, 1, WorldSeed::new(3)), Ok(()), "{key}");
        }
    }
}

/// Test: Flat at height 40 over 16x16x128 has exactly 40 * 256 solid cells for any seed.
#[test]
fn test_flat_scenario() {
    let content = ContentRegistry::with_base_content();
    let generator = FlatGenerator::with_height(&content, 40).unwrap();
    let shape = ChunkShape::new(16, 16, 128);

    for seed in [0, 1, 42, 0xDEAD_BEEF, u64::MAX] {
        let grid = generate(&generator, shape, 0, 0, seed);
        let air = grid.voxels().iter().filter(|v| v.is_air()).count();
        assert_eq!(shape.volume() - air, 40 * 256);
        assert_eq!(air, (128 - 40) * 256);
    }
}

/// Reproduces the per-column heights a column-random strategy draws.
fn drawn_heights(seed: u64, cx: i32, cz: i32, max_height: i32) -> Vec<i32> {
    let mut rng = chunk_rng(WorldSeed::new(seed), cx, cz);
    (0..256).map(|_| rng.gen_range(1..=max_height)).collect()
}

/// Test: Below the local height nothing is air; above it nothing is ground.
///
/// Bedrock fills the bottom three layers even under a shorter column.
#[test]
fn test_sea_level_monotonicity() {
    let content = ContentRegistry::with_base_content();
    let water = content.require_block("base:water").unwrap();

    let cubic = CubicGenerator::new(&content).unwrap();
    let debris = DebrisGenerator::new(&content).unwrap();
    let flat = FlatGenerator::new(&content).unwrap();

    let cases: [(&dyn WorldGenerator, Option<i32>); 3] = [
        (&cubic, Some(CubicGenerator::MAX_HEIGHT)),
        (&debris, Some(DebrisGenerator::MAX_HEIGHT)),
        (&flat, None),
    ];
    for (generator, max_height) in cases {
        for (cx, cz, seed) in [(0, 0, 5), (-4, 11, 1234)] {
            let grid = generate(generator, ChunkShape::STANDARD, cx, cz, seed);
            let heights = match max_height {
                Some(max) => drawn_heights(seed, cx, cz, max),
                None => vec![FlatGenerator::DEFAULT_HEIGHT; 256],
            };
            for z in 0..16 {
                for x in 0..16 {
                    let height = heights[z * 16 + x] as usize;
                    for y in 0..256 {
                        let voxel = grid.get(x, y, z).unwrap();
                        if y < height {
                            assert!(!voxel.is_air(), "{} air below ground at ({x}, {y}, {z})", generator.key());
                        } else if y > height && y > 2 {
                            assert!(
                                voxel.is_air() || voxel.id == water,
                                "{} ground above height at ({x}, {y}, {z})",
                                generator.key()
                            );
                        }
                    }
                }
            }
        }
    }
}

/// Test: Chunks at the edge of the i32 world report overflow instead of panicking.
#[test]
fn test_extreme_chunk_coordinates() {
    let content = ContentRegistry::with_base_content();
    let registry = GeneratorRegistry::with_builtin();
    let edge = i32::MAX / 16;
    let windowed = [DefaultGenerator::KEY, TropicalGenerator::KEY, SpaceGenerator::KEY];

    for key in registry.keys() {
        let generator = registry.create_generator(key, &content).unwrap();
        for (cx, cz) in [
            (edge, 0),
            (edge + 1, 0),
            (0, edge + 1),
            (-edge, i32::MIN / 16),
            (i32::MIN, i32::MAX),
        ] {
            let mut grid = VoxelGrid::new(ChunkShape::STANDARD);
            let result = generator.generate(&mut grid, cx, cz, WorldSeed::new(5));
            if windowed.contains(&key) {
                assert_eq!(
                    result,
                    Err(GenerationError::CoordinateOverflow { chunk_x: cx, chunk_z: cz }),
                    "{key} at ({cx}, {cz})"
                );
            } else {
                assert_eq!(result, Ok(()), "{key} at ({cx}, {cz})");
            }
        }

        // The outermost chunks whose padded windows still fit.
        let grid = generate(generator.as_ref(), ChunkShape::STANDARD, edge - 1, 1 - edge, 5);
        assert!(grid.voxels().iter().all(|v| content.contains_id(v.id)), "{key}");
    }
}

/// Test: Registry failures are reported, not panics.
#[test]
fn test_registry_errors() {
    let content = ContentRegistry::with_base_content();
    let mut registry = GeneratorRegistry::with_builtin();

    assert_eq!(
        registry.create_generator("core:nether", &content).err(),
        Some(GenerationError::UnknownGenerator("core:nether".to_string()))
    );
    assert!(matches!(
        registry.add_generator("core:default", |c| Ok(Box::new(FlatGenerator::new(c)?))),
        Err(GenerationError::DuplicateGenerator(_))
    ));

    let empty = ContentRegistry::new();
    for key in registry.keys() {
        assert!(matches!(
            registry.create_generator(key, &empty),
            Err(GenerationError::Content(_))
        ));
    }
}
