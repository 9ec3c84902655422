use huffpack::config::HuffConfig;
use huffpack::pipeline;

fn main() {
	let data = b"hello hello hello hello".to_vec();
	let mut input = std::io::Cursor::new(data);
	let mut compressed = Vec::new();
	let cfg = HuffConfig::default();
	let stats = pipeline::compress(&mut input, &mut compressed, &cfg).unwrap();
	println!(
		"compressed {} -> {} bytes ({:.2}% of bits saved)",
		stats.original_size, stats.compressed_size, stats.space_saved
	);

	let mut comp_cur = std::io::Cursor::new(compressed);
	let mut restored = Vec::new();
	pipeline::decompress(&mut comp_cur, &mut restored).unwrap();
	println!("restored {} bytes", restored.len());
}
