use super::*;
use crate::synth::stream::run_stream;

#[test]
fn peak_centers_concentrate_in_configured_band() {
    let config = Configuration::default();
    let mut rng = run_stream(2024);
    let mut centers = Vec::new();
    while centers.len() < 1500 {
        let p = RowProfile::draw(&config, &mut rng);
        centers.extend(p.peaks.iter().map(|pk| pk.center));
    }
    let band = config.shape.peak_center;
    let outside = centers.iter().filter(|c| !band.contains(**c)).count();
    assert_eq!(outside, 0);

    // Draws should actually spread over the band rather than collapse to one value.
    let lo = centers.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = centers.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(lo < 0.32 && hi > 0.68, "lo={lo} hi={hi}");
}

#[test]
fn classic_profile_respects_counts_and_bands() {
    let config = Configuration::default();
    let mut rng = run_stream(5);
    for _ in 0..200 {
        let p = RowProfile::draw(&config, &mut rng);
        assert!((4..=9).contains(&p.peaks.len()));
        assert_eq!(p.waves.len(), 3);
        for pk in &p.peaks {
            assert!((0.01..=0.05).contains(&pk.width));
            assert!(pk.amplitude >= 0.3 * 40.0 && pk.amplitude <= 40.0);
        }
        for w in &p.waves {
            assert!((1.0..=4.0).contains(&w.frequency));
            assert!((0.0..=TAU).contains(&w.phase));
            assert!((0.5..=2.0).contains(&w.amplitude));
        }
    }
}

#[test]
fn sigma_scales_peak_widths() {
    let base = Configuration::default();
    let sharp = Configuration {
        sigma: 50.0,
        ..base.clone()
    };
    let a = RowProfile::draw(&base, &mut run_stream(11));
    let b = RowProfile::draw(&sharp, &mut run_stream(11));
    assert_eq!(a.peaks.len(), b.peaks.len());
    for (pa, pb) in a.peaks.iter().zip(&b.peaks) {
        assert_eq!(pa.center, pb.center);
        assert!((pb.width - pa.width * 0.5).abs() < 1e-15);
    }
}

#[test]
fn same_stream_position_gives_same_profile() {
    let config = Configuration::default();
    let a = RowProfile::draw(&config, &mut run_stream(77));
    let b = RowProfile::draw(&config, &mut run_stream(77));
    assert_eq!(a, b);
}

#[test]
fn fixed_count_range_is_honored() {
    let mut config = Configuration::default();
    config.shape.peak_count = CountRange::new(6, 6);
    config.shape.wave_count = 2;
    let p = RowProfile::draw(&config, &mut run_stream(3));
    assert_eq!(p.peaks.len(), 6);
    assert_eq!(p.waves.len(), 2);
}

#[test]
fn layered_profile_stacks_three_layers() {
    let config = Configuration {
        waves: WaveStyle::Layered {
            base_frequency: 2.0,
        },
        ..Configuration::default()
    };
    let mut rng = run_stream(8);
    for _ in 0..100 {
        let p = RowProfile::draw(&config, &mut rng);
        assert!((7..=11).contains(&p.waves.len()), "{}", p.waves.len());
        // The primary layer always leads with base-scaled low frequencies.
        assert!(p.waves[0].frequency >= 1.4 && p.waves[0].frequency <= 2.6);
        // The tertiary layer always ends the list with fine detail.
        let last = p.waves.last().unwrap();
        assert!((15.0..=30.0).contains(&last.frequency));
        assert!(last.amplitude <= 0.5 * 0.3 + 1e-12);
    }
}

#[test]
fn layered_tertiary_vanishes_without_noise() {
    let config = Configuration {
        noise_level: 0.0,
        waves: WaveStyle::Layered {
            base_frequency: 1.0,
        },
        ..Configuration::default()
    };
    let p = RowProfile::draw(&config, &mut run_stream(4));
    let fine: Vec<&Wave> = p.waves.iter().filter(|w| w.frequency >= 15.0).collect();
    assert!(fine.len() >= 3);
    assert!(fine.iter().all(|w| w.amplitude == 0.0));
}

#[test]
fn offset_sums_waves_and_peaks() {
    let p = RowProfile {
        peaks: vec![Peak {
            center: 0.5,
            width: 0.02,
            amplitude: 10.0,
        }],
        waves: vec![Wave {
            frequency: 1.0,
            phase: 0.0,
            amplitude: 2.0,
        }],
    };
    // sin(π) ≈ 0 at the center, so the peak dominates.
    assert!((p.offset(0.5) - 10.0).abs() < 1e-9);
    // A quarter period in, the wave is at its crest and the peak is negligible.
    assert!((p.offset(0.25) - 2.0).abs() < 1e-9);
}

#[test]
fn draw_order_is_count_then_peaks_then_waves() {
    let config = Configuration::default();
    let shape = config.shape;
    let drawn = RowProfile::draw(&config, &mut run_stream(42));

    let mut rng = run_stream(42);
    let count = rng.random_range(shape.peak_count.min..=shape.peak_count.max);
    assert_eq!(drawn.peaks.len() as u32, count);
    for pk in &drawn.peaks {
        assert_eq!(pk.center, shape.peak_center.lerp(unit(&mut rng)));
        assert_eq!(pk.width, shape.peak_width.lerp(unit(&mut rng)));
        assert_eq!(
            pk.amplitude,
            shape.peak_amplitude.lerp(unit(&mut rng)) * config.max_amplitude
        );
    }
    for w in &drawn.waves {
        assert_eq!(w.frequency, shape.wave_frequency.lerp(unit(&mut rng)));
        assert_eq!(w.phase, PHASE.lerp(unit(&mut rng)));
        assert_eq!(w.amplitude, shape.wave_amplitude.lerp(unit(&mut rng)));
    }
}

#[test]
fn seed_42_first_row_profile_is_pinned() {
    let p = RowProfile::draw(&Configuration::default(), &mut run_stream(42));
    let close = |a: f64, b: f64| (a - b).abs() < 1e-12;

    assert_eq!(p.peaks.len(), 5);
    assert!(close(p.peaks[0].center, 0.35855449518951543));
    assert!(close(p.peaks[0].width, 0.040892533184497384));
    assert!(close(p.peaks[0].amplitude, 21.63457185122428));
    assert!(close(p.peaks[1].center, 0.5948624298560768));
    assert!(close(p.peaks[1].width, 0.03568207411364274));
    assert!(close(p.peaks[1].amplitude, 20.80771006369005));

    assert_eq!(p.waves.len(), 3);
    assert!(close(p.waves[0].frequency, 3.9777141156460645));
    assert!(close(p.waves[0].phase, 0.6548685656946307));
    assert!(close(p.waves[0].amplitude, 0.7970461544482137));
}
