//! Randomized blog-post fixtures.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use quill_core::domain::{AuthorName, BlogPost, NewPost};
use quill_core::error::StoreError;
use quill_core::ports::PostStore;

const FIRST_NAMES: &[&str] = &["Stanley", "Miriam", "Kyle", "Priya", "Julie"];
const LAST_NAMES: &[&str] = &["Okafor", "Delgado", "Nilsson", "Haynes", "Tanaka"];

const TITLES: &[&str] = &[
    "Indoor Mountaineering",
    "Notes From the Night Shift",
    "The Time I Went Outside",
    "A Field Guide to Lost Socks",
    "On Refusing to Own a Toaster",
];

const CONTENTS: &[&str] = &[
    "I ate a thing.",
    "I saw a thing.",
    "I did a thing.",
    "I heard a thing.",
    "I wrote a thing about the thing.",
];

/// Produces schema-valid posts from an explicit random source.
///
/// Two invocations may collide on any field; nothing downstream is allowed
/// to depend on fixture uniqueness.
pub struct FixtureGenerator {
    rng: StdRng,
}

impl FixtureGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fully reproducible generator: equal seeds yield equal sequences.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A plausible structured author name.
    pub fn author(&mut self) -> AuthorName {
        AuthorName::new(self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    /// One complete record with all fields populated and `created` in the
    /// past.
    pub fn post(&mut self) -> NewPost {
        NewPost {
            author: self.author(),
            content: self.pick(CONTENTS).to_string(),
            title: self.pick(TITLES).to_string(),
            created: self.past_date(),
        }
    }

    fn pick(&mut self, pool: &[&'static str]) -> &'static str {
        pool.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn past_date(&mut self) -> DateTime<Utc> {
        let hours_ago: i64 = self.rng.gen_range(1..24 * 365);
        Utc::now() - Duration::hours(hours_ago)
    }
}

impl Default for FixtureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate `n` records and persist them in bulk before a test group runs.
///
/// A seeding failure means the group cannot run on trusted state, so the
/// error is propagated for the caller to fail on.
pub async fn seed(
    store: &dyn PostStore,
    generator: &mut FixtureGenerator,
    n: usize,
) -> Result<Vec<BlogPost>, StoreError> {
    tracing::info!(count = n, "seeding blog post fixtures");

    let posts = (0..n).map(|_| generator.post()).collect();
    store.insert_many(posts).await
}
