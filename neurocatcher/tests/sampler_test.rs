use anyhow::Result;
use approx::assert_abs_diff_eq;
use ndarray::{s, Array3};
use neurocatcher::{
    rasterize, sample_batch, AugmentConfig, AugmentParams, BatchSamplerInit, Error, GrayRange,
    ImageVolume, SamplerConfig, TrainingPool, TruthMask,
};
use rand::{rngs::StdRng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

lazy_static::lazy_static! {
    static ref CONFIG_DIR: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("cfg");
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Synthetic microscopy-like volumes with a few neurons each.
fn synthetic_dataset() -> (Vec<ImageVolume>, Vec<Vec<Vec<[usize; 2]>>>) {
    let shapes = [(40, 52), (33, 33), (64, 28)];
    let volumes: Vec<_> = shapes
        .iter()
        .enumerate()
        .map(|(index, &(height, width))| {
            Array3::from_shape_fn((height, width, 3), |(r, c, ch)| {
                ((r * 13 + c * 7 + ch * 31 + index * 5) % 256) as f32
            })
        })
        .collect();
    let annotations = shapes
        .iter()
        .map(|&(height, width)| {
            (0..6)
                .map(|neuron| {
                    let row = (neuron * 11) % (height - 1);
                    let col = (neuron * 17) % (width - 1);
                    vec![[row, col], [row + 1, col], [row, col + 1]]
                })
                .collect()
        })
        .collect();
    (volumes, annotations)
}

#[test]
fn batch_shape_invariant() -> Result<()> {
    init_tracing();
    let (volumes, annotations) = synthetic_dataset();
    let pool = TrainingPool::from_annotations(&volumes, &annotations)?;
    let mut rng = StdRng::seed_from_u64(2021);

    for &(batch_size, in_dims, out_dims) in &[(10, 20, 14), (1, 28, 28), (7, 15, 4), (3, 1, 1)] {
        let batch = sample_batch(
            &pool,
            batch_size,
            in_dims,
            out_dims,
            GrayRange::default(),
            AugmentConfig::default(),
            &mut rng,
        )?;
        assert_eq!(batch.inputs().dim(), (batch_size, in_dims, in_dims, 3));
        assert_eq!(batch.truths().dim(), (batch_size, out_dims, out_dims, 1));
        assert_eq!(batch.len(), batch_size);
        assert!(batch.inputs().iter().all(|&v| (0.0..=255.0).contains(&v)));
        assert!(batch.truths().iter().all(|&v| v == 0.0 || v == 1.0));
    }

    Ok(())
}

#[test]
fn disabled_augmentation_is_a_pure_center_crop() -> Result<()> {
    let (volumes, annotations) = synthetic_dataset();
    let pool = TrainingPool::from_annotations(&volumes, &annotations)?;
    let mut rng = StdRng::seed_from_u64(7);
    let (in_dims, out_dims) = (20, 14);
    let crop_start = 3;

    let batch = sample_batch(
        &pool,
        32,
        in_dims,
        out_dims,
        GrayRange::default(),
        AugmentConfig::disabled(),
        &mut rng,
    )?;

    for (slot, record) in batch.records().iter().enumerate() {
        assert_eq!(record.params, AugmentParams::identity());
        let [row, col] = record.origin;
        let mask = &pool.masks()[record.volume_index];
        let expect_truth = mask.slice(s![
            row + crop_start..row + crop_start + out_dims,
            col + crop_start..col + crop_start + out_dims,
            ..
        ]);
        let expect_input =
            volumes[record.volume_index].slice(s![row..row + in_dims, col..col + in_dims, ..]);

        let (input, truth) = batch.pair(slot).unwrap();
        assert_eq!(truth, expect_truth);
        input
            .iter()
            .zip(expect_input.iter())
            .for_each(|(&lhs, &rhs)| assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-3));
    }

    Ok(())
}

#[test]
fn augmented_truth_follows_input_geometry() -> Result<()> {
    // every pixel carries its own coordinates, so the truth marker must stay
    // where the input marker is after flips and rotations
    let size = 24;
    let mut volume = ImageVolume::zeros((size, size, 1));
    volume[[9, 15, 0]] = 1.0;
    let mask = rasterize([size, size], &[vec![[9, 15]]])?;
    let pool = vec![(volume, mask)];

    let config = AugmentConfig {
        brighten: false,
        contrast: false,
        ..AugmentConfig::default()
    };
    let gray_range = GrayRange::new(0.0, 1.0)?;
    let mut rng = StdRng::seed_from_u64(99);
    let batch = sample_batch(&pool, 64, size, size, gray_range, config, &mut rng)?;

    let rotations: std::collections::HashSet<_> = batch
        .records()
        .iter()
        .map(|record| record.params.rotation_steps())
        .collect();
    assert_eq!(rotations.len(), 4);

    for slot in 0..batch.len() {
        let (input, truth) = batch.pair(slot).unwrap();
        assert_eq!(input.mapv(|value| (value > 0.5) as u8 as f32), truth);
        assert_eq!(truth.sum(), 1.0);
    }

    Ok(())
}

#[test]
fn precondition_failures() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0);
    let gray_range = GrayRange::new(0.0, 255.0)?;
    let config = AugmentConfig::default();

    let empty: Vec<(ImageVolume, TruthMask)> = vec![];
    assert_eq!(
        sample_batch(&empty, 10, 20, 20, gray_range, config, &mut rng).unwrap_err(),
        Error::EmptyPool
    );

    let pool = vec![(
        ImageVolume::zeros((30, 30, 1)),
        TruthMask::zeros((30, 30, 1)),
    )];
    assert!(matches!(
        sample_batch(&pool, 10, 20, 25, gray_range, config, &mut rng),
        Err(Error::InvalidDims(_))
    ));

    let small = vec![
        (ImageVolume::zeros((30, 30, 1)), TruthMask::zeros((30, 30, 1))),
        (ImageVolume::zeros((19, 40, 1)), TruthMask::zeros((19, 40, 1))),
    ];
    assert_eq!(
        sample_batch(&small, 10, 20, 14, gray_range, config, &mut rng).unwrap_err(),
        Error::InsufficientExtent {
            index: 1,
            height: 19,
            width: 40,
            in_dims: 20,
        }
    );

    Ok(())
}

#[test]
fn sampler_from_config_file() -> Result<()> {
    init_tracing();
    let config = SamplerConfig::open(CONFIG_DIR.join("sampler.json5"))?;
    let (volumes, annotations) = synthetic_dataset();
    let pool = TrainingPool::from_annotations(&volumes, &annotations)?;

    let sampler = config.build(&pool)?;
    assert_eq!(sampler.in_dims(), 20);
    assert_eq!(sampler.out_dims(), 14);
    assert_eq!((sampler.crop().start(), sampler.crop().end()), (3, 17));

    let batch = sampler.sample(&pool, &mut StdRng::seed_from_u64(1))?;
    assert_eq!(batch.inputs().dim(), (10, 20, 20, 3));
    assert_eq!(batch.truths().dim(), (10, 14, 14, 1));

    Ok(())
}

#[test]
fn config_without_gray_range_observes_pool() -> Result<()> {
    let config = SamplerConfig::open(CONFIG_DIR.join("sampler-no-augment.json5"))?;
    let (volumes, annotations) = synthetic_dataset();
    let pool = TrainingPool::from_annotations(&volumes, &annotations)?;

    let sampler = config.build(&pool)?;
    assert_eq!(sampler.gray_range(), GrayRange::new(0.0, 255.0)?);
    assert_eq!(sampler.augment(), AugmentConfig::disabled());

    let init = BatchSamplerInit {
        batch_size: 4,
        in_dims: 16,
        out_dims: 9,
        gray_range: sampler.gray_range(),
        augment: AugmentConfig::disabled(),
    };
    let expect = init.build()?.sample(&pool, &mut StdRng::seed_from_u64(5))?;
    let batch = sampler.sample(&pool, &mut StdRng::seed_from_u64(5))?;
    assert_eq!(batch, expect);

    Ok(())
}

#[test]
fn missing_config_file_reports_path() {
    let err = SamplerConfig::open(CONFIG_DIR.join("missing.json5")).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.json5"));
}
