use std::env;
use std::fs::File;
use std::io::{BufWriter, Read, Write};

use nmea_wind::{Sentence, SentenceDecoder, TransducerKind};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <capture_file> <output_csv>", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let output_path = &args[2];

    let mut file = File::open(path).expect("Failed to open file");
    let mut data = Vec::new();
    file.read_to_end(&mut data).expect("Failed to read file");

    println!("Read {} bytes from {}", data.len(), path);

    let mut decoder = SentenceDecoder::new();
    let sentences: Vec<Sentence> = data.iter().filter_map(|&b| decoder.feed(b)).collect();

    let stats = decoder.stats();
    println!(
        "Decoded {} sentences, {} checksum failures, {} unrecognized",
        stats.accepted, stats.checksum_failures, stats.unrecognized
    );

    // Write CSV with buffered I/O
    let file = File::create(output_path).expect("Failed to create output file");
    let mut out = BufWriter::new(file);

    // Header - speed converted to m/s, transducer values as reported
    writeln!(
        out,
        "type,angle_deg,speed_mps,status,pressure,temperature,angle"
    )
    .unwrap();

    for sentence in &sentences {
        match sentence {
            Sentence::Wind(report) => {
                let angle = report
                    .angle_deg
                    .map(|a| format!("{a:.1}"))
                    .unwrap_or_default();
                let speed = report
                    .speed_mps()
                    .map(|s| format!("{s:.3}"))
                    .unwrap_or_default();
                let status = if report.is_valid() { "A" } else { "V" };
                writeln!(out, "wind,{angle},{speed},{status},,,").unwrap();
            }
            Sentence::Transducer(report) => {
                let slot = |kind: TransducerKind| {
                    report
                        .reading(kind)
                        .map(|r| format!("{:.3}", r.value))
                        .unwrap_or_default()
                };
                let pressure = slot(TransducerKind::Pressure);
                let temperature = slot(TransducerKind::Temperature);
                let angle = slot(TransducerKind::Angle);
                writeln!(out, "transducer,,,,{pressure},{temperature},{angle}").unwrap();
            }
        }
    }

    println!("Wrote {output_path}");
}
