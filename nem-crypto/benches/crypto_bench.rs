//! Criterion benchmarks for NEM crypto: keygen, public key, address, cipher, KDF.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nem_core::{KdfParams, NetworkVersion, Salt};
use nem_crypto::{
    derive_address, derive_key, generate_iv, generate_keypair, generate_public_key,
    SymmetricCipher,
};

fn bench_keygen(c: &mut Criterion) {
    let mut g = c.benchmark_group("keygen");
    g.throughput(Throughput::Elements(1));
    g.bench_function("generate_keypair", |b| {
        b.iter(|| black_box(generate_keypair()).unwrap());
    });
    g.finish();
}

fn bench_public_key(c: &mut Criterion) {
    let keypair = generate_keypair().unwrap();
    let mut g = c.benchmark_group("public_key");
    g.throughput(Throughput::Elements(1));
    g.bench_function("generate_public_key", |b| {
        b.iter(|| black_box(generate_public_key(&keypair.private)));
    });
    g.finish();
}

fn bench_address(c: &mut Criterion) {
    let keypair = generate_keypair().unwrap();
    let mut g = c.benchmark_group("address");
    g.throughput(Throughput::Elements(1));
    g.bench_function("derive_address", |b| {
        b.iter(|| black_box(derive_address(&keypair.public, NetworkVersion::Mainnet)));
    });
    g.finish();
}

fn bench_cipher(c: &mut Criterion) {
    let key = [0x42u8; 32];
    let iv = generate_iv().unwrap();
    let cipher = SymmetricCipher::new(&key, &iv).unwrap();
    let plaintext = [0x5Au8; 32];
    let ciphertext = cipher.encrypt(&plaintext);

    let mut g = c.benchmark_group("cipher");
    g.throughput(Throughput::Bytes(plaintext.len() as u64));
    g.bench_function("encrypt_private_key", |b| {
        b.iter(|| black_box(cipher.encrypt(&plaintext)));
    });
    g.bench_function("decrypt_private_key", |b| {
        b.iter(|| black_box(cipher.decrypt(&ciphertext)).unwrap());
    });
    g.finish();
}

fn bench_kdf(c: &mut Criterion) {
    let salt = Salt::new(vec![0x23; 32]);
    let params = KdfParams::default();

    let mut g = c.benchmark_group("kdf");
    g.sample_size(20);
    g.bench_function("derive_key_2000_rounds", |b| {
        b.iter(|| black_box(derive_key("123123", &salt, &params)).unwrap());
    });
    g.finish();
}

criterion_group!(
    benches,
    bench_keygen,
    bench_public_key,
    bench_address,
    bench_cipher,
    bench_kdf
);
criterion_main!(benches);
