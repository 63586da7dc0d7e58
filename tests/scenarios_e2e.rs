use bb84_sim::errors::SimulationError;
use bb84_sim::protocols::bb84;
use bb84_sim::{
    Basis, Bit, Polarization, RngEntropy, Sampler, ScriptedEntropy, Simulator, Verdict,
    run_simulation,
};

#[test]
fn matching_bases_without_interceptor_agree() {
    let mut entropy = ScriptedEntropy::new()
        .with_bases([Basis::Rectilinear, Basis::Rectilinear])
        .with_bits([Bit::One]);

    let result = bb84::run(1, false, &mut entropy).unwrap();

    assert_eq!(result.receiver()[0].bit, Bit::One);
    assert_eq!(result.reconciliation()[0].verdict, Verdict::Match);
    assert!(result.reconciliation()[0].basis_match);
    assert!(!result.channel_compromised());
    assert!(result.interceptor().is_none());
    assert_eq!(result.sifted_key(), vec![Bit::One]);
}

#[test]
fn interceptor_in_wrong_basis_is_detected() {
    let mut entropy = ScriptedEntropy::new()
        .with_bases([Basis::Rectilinear, Basis::Diagonal, Basis::Rectilinear])
        .with_bits([Bit::One])
        .with_flips([Bit::Zero, Bit::Zero]);

    let result = Simulator::new(1)
        .unwrap()
        .with_interceptor(true)
        .run_with(&mut entropy)
        .unwrap();

    let intercepted = result.interceptor().unwrap();
    assert_eq!(intercepted[0].basis, Basis::Diagonal);
    assert_eq!(intercepted[0].bit, Bit::Zero);
    assert_eq!(intercepted[0].polarization, Polarization::AntiDiagonal);

    assert_eq!(result.transmitter()[0].bit, Bit::One);
    assert_eq!(result.receiver()[0].bit, Bit::Zero);
    assert!(result.reconciliation()[0].basis_match);
    assert_eq!(result.reconciliation()[0].verdict, Verdict::MismatchDetected);
    assert!(result.channel_compromised());
    assert_eq!(result.errors(), 1);
    assert_eq!(result.qber(), 1.0);
    assert_eq!(entropy.remaining(), (0, 0, 0));
}

#[test]
fn basis_mismatch_is_discarded_regardless_of_bits() {
    for flip in [Bit::Zero, Bit::One] {
        let mut entropy = ScriptedEntropy::new()
            .with_bases([Basis::Rectilinear, Basis::Diagonal])
            .with_bits([Bit::One])
            .with_flips([flip]);

        let result = bb84::run(1, false, &mut entropy).unwrap();

        assert!(!result.reconciliation()[0].basis_match);
        assert_eq!(result.reconciliation()[0].verdict, Verdict::BasisMismatch);
        assert!(!result.channel_compromised());
        assert_eq!(result.sifted_length(), 0);
        assert_eq!(result.qber(), 0.0);
    }
}

#[test]
fn scripted_runs_are_reproducible() {
    let script = ScriptedEntropy::new()
        .with_bases([
            Basis::Diagonal,
            Basis::Rectilinear,
            Basis::Rectilinear,
            Basis::Rectilinear,
            Basis::Diagonal,
            Basis::Rectilinear,
        ])
        .with_bits([Bit::Zero, Bit::One])
        .with_flips([Bit::One, Bit::Zero, Bit::One, Bit::One]);

    let first = bb84::run(2, true, &mut script.clone()).unwrap();
    let second = bb84::run(2, true, &mut script.clone()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn every_sequence_has_one_record_per_slot() {
    let result = Simulator::new(14).unwrap().with_seed(5).run().unwrap();

    assert_eq!(result.slots(), 14);
    let sequences = [
        result.transmitter().iter().map(|r| r.slot).collect::<Vec<_>>(),
        result.interceptor().unwrap().iter().map(|r| r.slot).collect(),
        result.receiver().iter().map(|r| r.slot).collect(),
        result.reconciliation().iter().map(|r| r.slot).collect(),
    ];
    let expected: Vec<usize> = (1..=14).collect();
    for slots in sequences {
        assert_eq!(slots, expected);
    }
}

#[test]
fn run_simulation_rejects_zero_slots() {
    assert!(matches!(
        run_simulation(0),
        Err(SimulationError::InvalidConfiguration(_))
    ));
}

#[test]
fn run_simulation_includes_interceptor() {
    let result = run_simulation(14).unwrap();

    assert_eq!(result.interceptor().map(|r| r.len()), Some(14));
    assert_eq!(result.receiver().len(), 14);
}

#[test]
fn projection_serializes_for_display() {
    let mut entropy = ScriptedEntropy::new()
        .with_bases([Basis::Rectilinear, Basis::Diagonal, Basis::Rectilinear])
        .with_bits([Bit::One])
        .with_flips([Bit::Zero, Bit::Zero]);
    let result = bb84::run(1, true, &mut entropy).unwrap();

    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["channel_compromised"], true);
    assert_eq!(value["transmitter"][0]["basis"], "rectilinear");
    assert_eq!(value["transmitter"][0]["bit"], 1);
    assert_eq!(value["transmitter"][0]["polarization"], "vertical");
    assert_eq!(value["interceptor"][0]["polarization"], "anti_diagonal");
    assert!(value["receiver"][0].get("polarization").is_none());
    assert_eq!(value["reconciliation"][0]["verdict"], "mismatch-detected");
}

#[test]
fn projection_omits_absent_interceptor() {
    let result = Simulator::new(4)
        .unwrap()
        .with_interceptor(false)
        .with_seed(1)
        .run()
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();

    assert!(value.get("interceptor").is_none());
}

#[test]
fn display_markers_match_verdicts() {
    assert_eq!(Verdict::Match.glyph(), "☑");
    assert_eq!(Verdict::BasisMismatch.glyph(), "-");
    assert_eq!(Polarization::Vertical.glyph(), '↑');
    assert_eq!(Basis::Diagonal.to_string(), "×");
}

#[test]
fn sampling_with_interceptor_shows_quarter_error_rate() {
    let sampler = Sampler::new(Simulator::new(14).unwrap());

    let stats = sampler.run(&mut RngEntropy::seeded(2024), 500).unwrap();

    assert_eq!(stats.runs, 500);
    assert!(stats.detection_rate() > 0.7, "{stats:?}");
    assert!(
        (0.18..0.32).contains(&stats.mean_qber()),
        "qber {}",
        stats.mean_qber()
    );
}

#[test]
fn sampling_without_interceptor_never_detects() {
    let sampler = Sampler::new(Simulator::new(14).unwrap().with_interceptor(false));

    let stats = sampler.run(&mut RngEntropy::seeded(77), 200).unwrap();

    assert_eq!(stats.compromised_runs, 0);
    assert_eq!(stats.errors, 0);
    assert!(stats.sifted_bits > 0);
}
