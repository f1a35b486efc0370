//! Criterion benchmarks for normalization, aggregation and zip extraction

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::io::{Cursor, Write};
use tunefacts::services::{normalize_history, Aggregator, ArchiveExtractor};
use tunefacts::types::{Extras, FileBag};
use zip::write::SimpleFileOptions;

const ARTISTS: usize = 200;
const TRACKS_PER_ARTIST: usize = 25;

/// One standard-history file with `n` synthetic plays
fn synthetic_history(n: usize) -> String {
    let records: Vec<String> = (0..n)
        .map(|i| {
            let artist = i % ARTISTS;
            let track = (i / ARTISTS) % TRACKS_PER_ARTIST;
            format!(
                r#"{{"endTime":"2024-{:02}-{:02} {:02}:{:02}","artistName":"Artist {}","trackName":"Track {}-{}","msPlayed":{}}}"#,
                1 + i % 12,
                1 + i % 28,
                i % 24,
                i % 60,
                artist,
                artist,
                track,
                30_000 + (i % 200) * 1_000
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

fn history_bag(n: usize) -> FileBag {
    [("StreamingHistory_music_0.json", synthetic_history(n))]
        .into_iter()
        .collect()
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for n in [1_000, 10_000, 100_000] {
        let bag = history_bag(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &bag, |b, bag| {
            b.iter(|| normalize_history(black_box(bag)));
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let extras = Extras::default();

    for n in [1_000, 10_000, 100_000] {
        let events = match normalize_history(&history_bag(n)) {
            Ok(history) => history.events,
            Err(e) => {
                eprintln!("Skipping aggregate/{}: {}", n, e);
                continue;
            }
        };
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &events, |b, events| {
            b.iter(|| Aggregator::process(black_box(events), false, &extras));
        });
    }

    group.finish();
}

fn bench_extract_zip(c: &mut Criterion) {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for part in 0..8 {
        let name = format!("Spotify Account Data/StreamingHistory_music_{}.json", part);
        if writer.start_file(name, SimpleFileOptions::default()).is_err()
            || writer.write_all(synthetic_history(10_000).as_bytes()).is_err()
        {
            eprintln!("Skipping extract_zip: could not build archive");
            return;
        }
    }
    let bytes = match writer.finish() {
        Ok(cursor) => cursor.into_inner(),
        Err(e) => {
            eprintln!("Skipping extract_zip: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("archive");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.sample_size(20);
    group.bench_function("extract_zip", |b| {
        b.iter(|| {
            let mut extractor = ArchiveExtractor::new();
            extractor.add_zip("my_spotify_data.zip", black_box(&bytes));
            extractor.finish()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_aggregate, bench_extract_zip);
criterion_main!(benches);
