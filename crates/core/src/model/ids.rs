//! Node id generation: `<kind>_<source-tag>_<counter>_<8 hex>`.

/// Per-call id source. Counters start at 1 for every new generator.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    source_tag: String,
    counter: u64,
    suffixes: SuffixSource,
}

#[derive(Debug, Clone)]
enum SuffixSource {
    /// splitmix64 state
    Seeded(u64),
    Random,
}

impl IdGenerator {
    pub fn new(source_tag: &str, seed: Option<u64>) -> Self {
        Self {
            source_tag: source_tag.to_string(),
            counter: 0,
            suffixes: match seed {
                Some(seed) => SuffixSource::Seeded(seed),
                None => SuffixSource::Random,
            },
        }
    }

    /// A fresh id for a node of the given kind (`section`, `row`, `heading`, ...).
    pub fn next(&mut self, kind: &str) -> String {
        self.counter += 1;
        let suffix = self.suffix();
        format!("{kind}_{}_{}_{suffix}", self.source_tag, self.counter)
    }

    /// How many ids were handed out.
    pub fn issued(&self) -> u64 {
        self.counter
    }

    fn suffix(&mut self) -> String {
        match &mut self.suffixes {
            SuffixSource::Seeded(state) => {
                let value = splitmix64(state);
                format!("{:08x}", value >> 32)
            }
            SuffixSource::Random => {
                let mut hex = uuid::Uuid::new_v4().simple().to_string();
                hex.truncate(8);
                hex
            }
        }
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
