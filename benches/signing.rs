// Signing & verification benchmarks for the Zebra protocol core.
//
// Covers key generation, ring signing and verification at various ring
// sizes, and the full envelope round trip (format + parse + verify).

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use zebra_protocol::{generate_key, verify_envelope, Identity, PrivateKey, PublicKey, Ring, SignedMessage};

fn member(i: usize) -> (PrivateKey, PublicKey) {
    generate_key(Identity::new(&format!("Member {i}"), &format!("m{i}@example.org")).unwrap())
}

fn bench_key_generation(c: &mut Criterion) {
    let holder = Identity::new("Bench", "bench@example.org").unwrap();
    c.bench_function("keys/generate", |b| {
        b.iter(|| PrivateKey::generate(holder.clone()));
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/sign");

    for size in [2, 4, 8, 16] {
        let members: Vec<_> = (0..size).map(member).collect();
        let ring = Ring::new(members.iter().map(|(_, p)| p.clone()).collect()).unwrap();
        let signer = &members[size / 2].0;

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ring, |b, ring| {
            b.iter(|| {
                SignedMessage::sign("the meeting is at noon", ring.clone(), signer, size / 2)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring/verify");

    for size in [2, 4, 8, 16] {
        let members: Vec<_> = (0..size).map(member).collect();
        let ring = Ring::new(members.iter().map(|(_, p)| p.clone()).collect()).unwrap();
        let signed =
            SignedMessage::sign("the meeting is at noon", ring, &members[0].0, 0).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &signed, |b, signed| {
            b.iter(|| signed.verify());
        });
    }

    group.finish();
}

fn bench_envelope_roundtrip(c: &mut Criterion) {
    let members: Vec<_> = (0..4).map(member).collect();
    let ring = Ring::new(members.iter().map(|(_, p)| p.clone()).collect()).unwrap();
    let signed = SignedMessage::sign("the meeting is at noon", ring, &members[1].0, 1).unwrap();
    let text = signed.to_string();

    c.bench_function("envelope/verify_envelope", |b| {
        b.iter(|| verify_envelope(&text).unwrap());
    });
}

criterion_group!(
    benches,
    bench_key_generation,
    bench_sign,
    bench_verify,
    bench_envelope_roundtrip,
);
criterion_main!(benches);
