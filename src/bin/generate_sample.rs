/// Minimal deterministic PRNG (64-bit LCG) so the sample file is stable
/// across runs.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn below(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 33) % bound
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const LABELS: &[&str] = &[
    "Happy ", "happy", "Joy", "Excitement", " Gratitude", "Contentment",
    "Sadness", "Grief ", "loneliness", "Despair",
    "Anger", "Frustration", " hate", "Disgust",
    "Fear", "Anxiety", "overwhelmed",
    "Shame", "Regret",
    "Neutral", "Curiosity", "Nostalgia ", "Surprise",
    // Labels the mapping table does not know, to exercise the fallback.
    "Quixotic", "Meh",
];

const PLATFORMS: &[&str] = &["Twitter", " Twitter ", "Instagram", "Facebook "];

const COUNTRIES: &[&str] = &["USA", "UK ", " Canada", "India", "Australia", "Germany"];

const OPENERS: &[&str] = &[
    "Just finished", "Can't believe", "Thinking about", "So done with",
    "Absolutely loving", "Never again with", "Finally tried", "Still processing",
];

const TOPICS: &[&str] = &[
    "the new coffee place downtown", "my final exams", "this morning's run",
    "the season finale", "our weekend road trip", "the team meeting",
    "that concert last night", "the weather today",
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_posts.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Unnamed: 0", "Text", "Sentiment", "Timestamp", "Platform", "Country",
            "Retweets", "Likes",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    let mut previous: Option<Vec<String>> = None;

    for i in 0..240u64 {
        // Every 17th row repeats the previous one verbatim so the cleaner
        // has duplicates to drop.
        if i % 17 == 16 {
            if let Some(prev) = &previous {
                writer.write_record(prev).expect("Failed to write row");
                rows += 1;
                continue;
            }
        }

        let text = if i % 23 == 22 {
            // Seed missing post bodies.
            String::new()
        } else {
            format!("{} {}!", rng.pick(OPENERS), rng.pick(TOPICS))
        };

        let month = 1 + rng.below(12);
        let day = 1 + rng.below(28);
        let hour = rng.below(24);
        let timestamp = format!("2023-{month:02}-{day:02} {hour:02}:00:00");

        let retweets = rng.below(500).to_string();
        let likes = if i % 31 == 30 {
            // Junk engagement value; coercion turns it into a missing cell.
            "n/a".to_string()
        } else {
            rng.below(5000).to_string()
        };

        let row: Vec<String> = vec![
            i.to_string(),
            text,
            rng.pick(LABELS).to_string(),
            timestamp,
            rng.pick(PLATFORMS).to_string(),
            rng.pick(COUNTRIES).to_string(),
            retweets,
            likes,
        ];
        writer.write_record(&row).expect("Failed to write row");
        previous = Some(row);
        rows += 1;
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} posts to {output_path}");
}
