use pretty_assertions::assert_eq;
use rstest::rstest;
use twolevel::*;
use twolevel::bits::*;
use twolevel::logic::HashMode;

fn build(kind: PredictorKind) -> Box<dyn BranchPredictor + Send> {
    PredictorConfig::new(kind).build().unwrap()
}

/// Predict, then resolve, returning the prediction.
fn run(p: &mut dyn BranchPredictor, pc: usize, outcome: Outcome) -> Outcome {
    let inst = BranchInstruction::from_pc(pc, 8);
    let res = p.predict(&inst).unwrap();
    p.update(&inst, outcome).unwrap();
    res
}

#[rstest]
#[case(PredictorKind::GAg)]
#[case(PredictorKind::GAs)]
#[case(PredictorKind::PAg)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAg)]
#[case(PredictorKind::SAp)]
#[case(PredictorKind::SAs)]
fn fresh_predictor_predicts_not_taken(#[case] kind: PredictorKind) {
    let mut p = build(kind);
    assert_eq!(p.name(), kind.name());
    for pc in [0x00, 0x5a, 0xff] {
        assert_eq!(run(p.as_mut(), pc, Outcome::T), Outcome::N);
    }
}

#[rstest]
#[case(PredictorKind::GAg)]
#[case(PredictorKind::GAs)]
#[case(PredictorKind::PAg)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAg)]
#[case(PredictorKind::SAp)]
#[case(PredictorKind::SAs)]
fn update_must_follow_matching_predict(#[case] kind: PredictorKind) {
    let mut p = build(kind);
    let a = BranchInstruction::from_pc(0x12, 8);
    let b = BranchInstruction::from_pc(0x34, 8);

    assert_eq!(p.update(&a, Outcome::T), Err(Error::UnmatchedUpdate));

    p.predict(&a).unwrap();
    assert_eq!(p.update(&b, Outcome::T), Err(Error::UnmatchedUpdate));
    // The rejected update leaves the pending prediction in place
    assert_eq!(p.update(&a, Outcome::T), Ok(()));
    assert_eq!(p.update(&a, Outcome::T), Err(Error::UnmatchedUpdate));
}

#[rstest]
#[case(PredictorKind::GAg)]
#[case(PredictorKind::GAs)]
#[case(PredictorKind::PAg)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAg)]
#[case(PredictorKind::SAp)]
#[case(PredictorKind::SAs)]
fn learns_always_taken(#[case] kind: PredictorKind) {
    let mut p = build(kind);
    let res: Vec<Outcome> = (0..8).map(|_| run(p.as_mut(), 0x42, Outcome::T)).collect();
    // Four steps to fill a 4-bit history, two more to flip the counter
    assert_eq!(res, vec![
        Outcome::N, Outcome::N, Outcome::N, Outcome::N,
        Outcome::N, Outcome::N, Outcome::T, Outcome::T,
    ]);
}

#[rstest]
#[case(PredictorKind::GAs)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAp)]
#[case(PredictorKind::SAs)]
fn counters_are_private_to_an_address(#[case] kind: PredictorKind) {
    let mut p = build(kind);
    // 0x10 and 0x02 fall into different sets (0001 and 0010)
    for _ in 0..10 {
        run(p.as_mut(), 0x10, Outcome::T);
    }
    assert_eq!(run(p.as_mut(), 0x10, Outcome::T), Outcome::T);
    assert_eq!(run(p.as_mut(), 0x02, Outcome::T), Outcome::N);
}

#[rstest]
#[case(PredictorKind::GAg)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAs)]
fn monitor_names_every_part(#[case] kind: PredictorKind) {
    let mut p = build(kind);
    run(p.as_mut(), 0x01, Outcome::T);
    let text = p.monitor();
    assert!(text.starts_with(&format!("{} predictor snapshot:", kind)));
    assert!(text.contains("SC: "));
    assert!(text.contains("PHT"));
}

#[test]
fn pag_with_one_branch_is_gag() {
    let mut gag = GAg::new(4, 2).unwrap();
    let mut pag = PAg::new(4, 2, 8).unwrap();
    let pattern = [Outcome::T, Outcome::T, Outcome::N, Outcome::T, Outcome::N];

    for i in 0..40 {
        let outcome = pattern[i % pattern.len()];
        assert_eq!(
            run(&mut gag, 0x77, outcome),
            run(&mut pag, 0x77, outcome),
            "diverged at step {}", i
        );
    }
    assert_eq!(
        pag.bank().peek(&from_usize(0x77, 8)),
        Some(gag.bhr())
    );
}

#[test]
fn per_address_history_is_independent() {
    let mut p = PAg::new(3, 2, 8).unwrap();
    run(&mut p, 0x01, Outcome::T);
    run(&mut p, 0x01, Outcome::T);
    run(&mut p, 0x02, Outcome::N);

    assert_eq!(p.bank().len(), 2);
    assert_eq!(p.bank().peek(&from_usize(0x01, 8)), Some(parse("011").unwrap().as_bitslice()));
    assert_eq!(p.bank().peek(&from_usize(0x02, 8)), Some(parse("000").unwrap().as_bitslice()));
}

/// Drive branch 0x02 once, then 0x10 five times, and check the register
/// behind `b_key` still holds 0x02's history.
fn check_history_isolation<P: BranchPredictor>(
    mut p: P,
    bank: fn(&P) -> &RegisterBank,
    a_key: BitVector,
    b_key: BitVector,
) {
    run(&mut p, 0x02, Outcome::N);
    let before = bank(&p).peek(&b_key).map(|b| b.to_bitvec());
    assert_eq!(before, Some(parse("0000").unwrap()));

    for _ in 0..5 {
        run(&mut p, 0x10, Outcome::T);
    }
    assert_eq!(bank(&p).peek(&b_key).map(|b| b.to_bitvec()), before);
    assert_eq!(bank(&p).peek(&a_key), Some(parse("1111").unwrap().as_bitslice()));
    assert_eq!(bank(&p).len(), 2);
}

#[rstest]
#[case(PredictorKind::PAg)]
#[case(PredictorKind::PAp)]
#[case(PredictorKind::SAg)]
#[case(PredictorKind::SAp)]
#[case(PredictorKind::SAs)]
fn history_is_private_to_a_key(#[case] kind: PredictorKind) {
    let addr = |pc| from_usize(pc, 8);
    // 0x10 and 0x02 fold into sets 0001 and 0010
    let set = |s: &str| parse(s).unwrap();
    match kind {
        PredictorKind::PAg => check_history_isolation(
            PAg::new(4, 2, 8).unwrap(), PAg::bank, addr(0x10), addr(0x02)
        ),
        PredictorKind::PAp => check_history_isolation(
            PAp::new(4, 2, 8).unwrap(), PAp::bank, addr(0x10), addr(0x02)
        ),
        PredictorKind::SAg => check_history_isolation(
            SAg::new(4, 2, 8, 4, HashMode::Xor).unwrap(), SAg::bank,
            set("0001"), set("0010")
        ),
        PredictorKind::SAp => check_history_isolation(
            SAp::new(4, 2, 8, 4, HashMode::Xor).unwrap(), SAp::bank,
            set("0001"), set("0010")
        ),
        PredictorKind::SAs => check_history_isolation(
            SAs::new(4, 2, 8, 4, HashMode::Xor).unwrap(), SAs::bank,
            set("0001"), set("0010")
        ),
        _ => unreachable!(),
    }
}

#[test]
fn sets_share_history_across_aliases() {
    let mut p = SAs::new(2, 2, 8, 4, HashMode::Xor).unwrap();
    // 0x12 and 0x21 both fold to 0011
    run(&mut p, 0x12, Outcome::T);
    run(&mut p, 0x21, Outcome::N);
    assert_eq!(p.bank().len(), 1);
    assert_eq!(p.bank().peek(&parse("0011").unwrap()), Some(parse("10").unwrap().as_bitslice()));
}

#[test]
fn load_counter_history_needs_matching_widths() {
    assert!(matches!(
        GAg::with_history(3, 2, GAgHistory::LoadCounter),
        Err(Error::InvalidConfig(_))
    ));
    assert!(GAg::with_history(2, 2, GAgHistory::LoadCounter).is_ok());
}

#[test]
fn pht_put_if_absent_keeps_first_value() {
    let mut pht = PatternHistoryTable::new("PHT", 2, 2);
    let idx = parse("10").unwrap();
    pht.put_if_absent(&idx, parse("11").unwrap()).unwrap();
    pht.put_if_absent(&idx, parse("00").unwrap()).unwrap();
    assert_eq!(pht.get(&idx).unwrap(), Some(&parse("11").unwrap()));
    assert_eq!(pht.size(), 1);

    assert_eq!(
        pht.put(&parse("1").unwrap(), parse("00").unwrap()),
        Err(Error::WidthMismatch { what: "PHT index", expected: 2, found: 1 })
    );
    assert_eq!(
        pht.put(&idx, parse("000").unwrap()),
        Err(Error::WidthMismatch { what: "PHT block", expected: 2, found: 3 })
    );
}

#[test]
fn synthetic_trace_end_to_end() {
    let trace = Trace::synthetic(3, 8, 2000, 8).unwrap();
    for kind in PredictorKind::ALL {
        let mut p = build(kind);
        let stats = twolevel::sim::evaluate(p.as_mut(), &trace, 8).unwrap();
        assert_eq!(stats.global_brns(), 2000);
        assert!(stats.num_unique_branches() <= 8);
    }
}

#[rstest]
#[case(include_str!("../configs/sas.toml"), PredictorKind::SAs)]
#[case(include_str!("../configs/gag_load_counter.toml"), PredictorKind::GAg)]
fn shipped_configs_build(#[case] text: &str, #[case] kind: PredictorKind) {
    let cfg = PredictorConfig::from_toml(text).unwrap();
    assert_eq!(cfg.kind, kind);
    let mut p = cfg.build().unwrap();
    let inst = BranchInstruction::from_pc(0x1234, cfg.branch_instruction_size);
    assert_eq!(p.predict(&inst), Ok(Outcome::N));
}
