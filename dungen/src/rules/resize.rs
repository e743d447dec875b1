use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::config::ConfigError;
use crate::math::FreeVector;
use crate::{GenContext, GenError, Rule, RuleSettings};

/// Configuration of a [`Resize`] rule.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[expect(clippy::exhaustive_structs)]
pub struct ResizeConfig {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    #[serde(flatten)]
    pub settings: RuleSettings,
    /// Chunks having any of these categories are resized.
    /// If empty, or if any entry is blank, every chunk is.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Sizes to choose from.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<FreeVector>,
}

fn default_sizes() -> Vec<FreeVector> {
    vec![FreeVector::new(10.0, 5.0, 10.0)]
}

impl ResizeConfig {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: RuleSettings::default(),
            categories: Vec::new(),
            sizes: default_sizes(),
        }
    }
}

/// Gives chunks random sizes, then spaces every chunk out evenly.
///
/// After resizing, every chunk is positioned as if it had the largest size of any chunk,
/// so that no two chunks overlap. This requires the graph to be connected.
#[derive(Debug)]
pub struct Resize {
    config: ResizeConfig,
    rng: Xoshiro256Plus,
}

impl Resize {
    #[allow(missing_docs)]
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            config,
            rng: Xoshiro256Plus::seed_from_u64(0),
        }
    }
}

impl Rule for Resize {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn settings(&self) -> RuleSettings {
        self.config.settings
    }

    fn initialize(&mut self, ctx: &mut GenContext<'_>) {
        self.rng = ctx.rng();
    }

    fn generate(&mut self, ctx: &mut GenContext<'_>) -> Result<(), GenError> {
        let sizes = &self.config.sizes;
        if sizes.is_empty() {
            return Err(ConfigError::NoSizes.into());
        }

        let dungeon = ctx.dungeon_mut();
        for coord in dungeon.chunks_with_categories(self.config.categories.as_slice()) {
            let size = sizes[self.rng.random_range(0..sizes.len())];
            dungeon.resize_chunk(coord, size);
        }

        if dungeon.graph().node_count() == 0 {
            return Ok(());
        }
        let reached = dungeon.graph().bfs_at_index(0);
        let total = dungeon.graph().node_count();
        if reached.len() < total {
            return Err(GenError::DisconnectedGraph {
                reached: reached.len(),
                total,
            });
        }

        let layout_size = dungeon
            .chunks()
            .map(|chunk| chunk.size())
            .reduce(FreeVector::max)
            .unwrap_or(dungeon.config().chunk_size);
        for coord in reached {
            dungeon.lay_out_chunk(coord, layout_size);
        }
        Ok(())
    }
}
