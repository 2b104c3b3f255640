//! Benchmarks for rule transformation.
//!
//! Measures both transformation directions over growing rule lists.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use policy_gate::{
    from_wire, to_wire, Abi, Action, Criterion as PolicyCriterion, EthValueCriterion,
    EvmAddressCriterion, EvmDataCondition, EvmDataConditionParam, EvmDataCriterion,
    EvmDataParameterCondition, KnownAbiType, MembershipOperator, Operation, OrderedOperator, Rule,
    ValueOperator,
};

fn sample_rules(count: usize) -> Vec<Rule> {
    let address = format!("0x{}", "ab".repeat(20));
    (0..count)
        .map(|i| {
            let criteria = vec![
                PolicyCriterion::EthValue(
                    EthValueCriterion::new(format!("{}", 1_000_000 + i), ValueOperator::GreaterThan)
                        .unwrap(),
                ),
                PolicyCriterion::EvmAddress(
                    EvmAddressCriterion::new(vec![address.clone()], MembershipOperator::In)
                        .unwrap(),
                ),
                PolicyCriterion::EvmData(EvmDataCriterion {
                    abi: Abi::Known(KnownAbiType::Erc20),
                    conditions: vec![EvmDataCondition {
                        function: "transfer".to_owned(),
                        params: Some(vec![EvmDataConditionParam::Single(
                            EvmDataParameterCondition {
                                name: "value".to_owned(),
                                operator: OrderedOperator::LessThanOrEqual,
                                value: "1000".to_owned(),
                            },
                        )]),
                    }],
                }),
            ];
            Rule::new(Action::Reject, Operation::SendEvmTransaction, criteria).unwrap()
        })
        .collect()
}

/// Benchmark user rules to wire format.
fn bench_to_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_wire");

    for count in [1, 10, 100].iter() {
        let rules = sample_rules(*count);
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &rules, |b, rules| {
            b.iter(|| black_box(to_wire(rules).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark wire rules back to the user format.
fn bench_from_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_wire");

    for count in [1, 10, 100].iter() {
        let wire = to_wire(&sample_rules(*count)).unwrap();
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &wire, |b, wire| {
            b.iter(|| black_box(from_wire(wire).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_to_wire, bench_from_wire);
criterion_main!(benches);
