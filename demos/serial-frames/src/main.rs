use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ringframe::{FrameSplitter, SplitterConfig};
use tracing_subscriber::EnvFilter;

/// Simulates a serial port delivering NMEA-like sentences in random chunks
/// and prints every frame the splitter extracts.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Bytes held for the frame being assembled
    #[clap(short, long, default_value_t = 128)]
    capacity: usize,

    /// Frame delimiter (escapes \r \n \0 are understood)
    #[clap(short, long, default_value = "\\r\\n")]
    delimiter: String,

    /// Keep the delimiter at the end of each frame
    #[clap(short, long)]
    include_separator: bool,

    /// Number of sentences to generate
    #[clap(short, long, default_value_t = 20)]
    sentences: usize,

    #[clap(long, default_value_t = 1)]
    seed: u64,
}

fn unescape(input: &str) -> Vec<u8> {
    input
        .replace("\\r", "\r")
        .replace("\\n", "\n")
        .replace("\\0", "\0")
        .into_bytes()
}

fn generate_stream(rng: &mut StdRng, sentences: usize, delimiter: &[u8]) -> Vec<u8> {
    let talkers = ["GPGGA", "GPRMC", "GPGSV", "GPVTG"];
    let mut stream = Vec::new();
    for i in 0..sentences {
        let talker = talkers[rng.gen_range(0..talkers.len())];
        let sentence = format!("${},{},{:.4}", talker, i, rng.gen_range(0.0..90.0));
        stream.extend_from_slice(sentence.as_bytes());
        stream.extend_from_slice(delimiter);
    }
    stream
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let delimiter = unescape(&args.delimiter);
    let config = SplitterConfig::default()
        .with_capacity(args.capacity)
        .with_delimiters([delimiter.clone()])
        .with_include_separator(args.include_separator);

    let mut splitter = match FrameSplitter::new(config) {
        Ok(splitter) => splitter,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let stream = generate_stream(&mut rng, args.sentences, &delimiter);
    tracing::info!(bytes = stream.len(), sentences = args.sentences, "stream generated");

    let mut rest = stream.as_slice();
    while !rest.is_empty() {
        let take = rng.gen_range(1..=rest.len().min(16));
        let (chunk, tail) = rest.split_at(take);
        splitter.feed(chunk, |frame| {
            println!("frame : {:?}", String::from_utf8_lossy(&frame));
        });
        rest = tail;
    }

    tracing::info!(
        frames = splitter.frames_emitted(),
        pending = splitter.pending().len(),
        "stream consumed"
    );
}
