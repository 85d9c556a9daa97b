use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rowforge_core::{ColumnSpec, ProviderFormats};
use rowforge_dict::Dictionary;

use crate::errors::GenerationError;
use crate::strategy;
use crate::synth::Synthesizer;

/// Row-assembly facade over the dictionary and a provider's formats.
///
/// Holds no per-call state beyond the base seed and a call counter, so one
/// instance can be shared across threads and reused for whole batches. Each
/// call draws from its own RNG derived from the base seed, keeping concurrent
/// synthesis free of shared mutable generator state.
#[derive(Debug)]
pub struct Generator {
    dict: Dictionary,
    formats: ProviderFormats,
    seed: u64,
    calls: AtomicU64,
}

impl Generator {
    /// Facade with a base seed drawn from the thread-local entropy source.
    pub fn new(dict: Dictionary, formats: ProviderFormats) -> Self {
        Self::with_seed(dict, formats, rand::rng().random())
    }

    /// Facade with a fixed base seed; per-call output becomes reproducible.
    pub fn with_seed(dict: Dictionary, formats: ProviderFormats, seed: u64) -> Self {
        Self {
            dict,
            formats,
            seed,
            calls: AtomicU64::new(0),
        }
    }

    /// Synthesize one row for `table` as a complete `INSERT` statement.
    ///
    /// Columns are emitted in ascending `order`; excluded columns are skipped
    /// entirely. Batch generation is simply repeated invocation.
    pub fn query(
        &self,
        table: &str,
        specs: &HashMap<String, ColumnSpec>,
    ) -> Result<String, GenerationError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed);
        let mut rng = ChaCha8Rng::seed_from_u64(hash_seed(self.seed, call));
        self.query_with_rng(table, specs, &mut rng)
    }

    /// As [`Generator::query`], drawing from a caller-supplied RNG.
    pub fn query_with_rng(
        &self,
        table: &str,
        specs: &HashMap<String, ColumnSpec>,
        rng: &mut impl Rng,
    ) -> Result<String, GenerationError> {
        let mut columns: Vec<&ColumnSpec> = specs.values().filter(|spec| spec.include).collect();
        columns.sort_by(|a, b| {
            (a.order, a.name.as_str()).cmp(&(b.order, b.name.as_str()))
        });

        let synthesizer = Synthesizer::new(&self.dict, &self.formats);
        let mut names = Vec::with_capacity(columns.len());
        let mut literals = Vec::with_capacity(columns.len());
        for spec in columns {
            let resolved = strategy::resolve(spec);
            let value = synthesizer.synthesize(spec, &resolved, rng)?;
            names.push(spec.name.as_str());
            literals.push(value.to_sql());
        }

        debug!(table, columns = names.len(), "row assembled");
        Ok(format!(
            "INSERT INTO {table} ({}) VALUES ({});",
            names.join(", "),
            literals.join(", ")
        ))
    }

}

// FNV-style mix so consecutive calls land on unrelated RNG streams.
fn hash_seed(seed: u64, call: u64) -> u64 {
    let mut hash = seed ^ 0xcbf2_9ce4_8422_2325;
    for byte in call.to_le_bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
