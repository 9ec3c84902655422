use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use huffpack::config::HuffConfig;
use huffpack::pipeline;
use rand::{Rng, SeedableRng};

fn text_like(len: usize) -> Vec<u8> {
	let alphabet = b"eeeeetttaaoinshrdlu \n";
	let mut rng = rand::rngs::StdRng::seed_from_u64(42);
	(0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

fn bench_compress(c: &mut Criterion) {
	let data = text_like(8 * 1024 * 1024);
	let config = HuffConfig::default();
	let mut group = c.benchmark_group("compression");
	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("compress_text", |b| {
		b.iter(|| {
			let _ = pipeline::compress_buffer(&data, &config).unwrap();
		});
	});

	let (container, _) = pipeline::compress_buffer(&data, &config).unwrap();
	group.bench_function("decompress_text", |b| {
		b.iter(|| {
			let _ = pipeline::decompress_buffer(&container).unwrap();
		});
	});
	group.finish();
}

criterion_group!(benches, bench_compress);
criterion_main!(benches);
