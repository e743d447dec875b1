//! [`Pipeline`], which runs [`Rule`]s in order against a shared [`Dungeon`].

use std::fmt;

use hashbrown::HashSet;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use crate::config::{ConfigError, PipelineConfig};
use crate::rule::PathRegistry;
use crate::{Dungeon, GenContext, GenError, Rule};

/// Name reported for failures that belong to the pipeline rather than any rule.
const PIPELINE_NAME: &str = "pipeline";

/// An ordered list of [`Rule`]s and the [`Dungeon`] they build.
///
/// Each call to [`Pipeline::generate()`] discards the previous dungeon and builds a new one
/// from scratch. With a fixed seed, repeated runs produce identical dungeons.
#[derive(Debug)]
pub struct Pipeline {
    seed: u64,
    randomize_seed: bool,
    rules: Vec<Box<dyn Rule>>,
    dungeon: Dungeon,
    paths: PathRegistry,
    /// Source of seeds when `randomize_seed` is set; created on first use.
    seed_source: Option<Xoshiro256Plus>,
}

impl Pipeline {
    /// Constructs a pipeline with the rules listed in `config`.
    ///
    /// Rule names are not checked; see [`Pipeline::from_config()`].
    pub fn new(config: PipelineConfig) -> Self {
        let PipelineConfig {
            dungeon,
            seed,
            randomize_seed,
            rules,
        } = config;
        Self {
            seed,
            randomize_seed,
            rules: rules.into_iter().map(|rule| rule.into_rule()).collect(),
            dungeon: Dungeon::new(dungeon),
            paths: PathRegistry::new(),
            seed_source: None,
        }
    }

    /// Constructs a pipeline with the rules listed in `config`, after checking that no two
    /// rules share a name.
    pub fn from_config(config: PipelineConfig) -> Result<Self, ConfigError> {
        {
            let mut names = HashSet::new();
            for rule in &config.rules {
                if !names.insert(rule.name()) {
                    return Err(ConfigError::DuplicateRuleName(rule.name().to_owned()));
                }
            }
        }
        Ok(Self::new(config))
    }

    /// Appends a rule to run after all existing rules.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// The rules, in the order they run, including muted ones.
    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.iter().map(|rule| &**rule)
    }

    /// Sets the seed for later runs, and stops randomizing it.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.randomize_seed = false;
    }

    /// Makes every later run use a freshly drawn seed.
    pub fn randomize_seed(&mut self) {
        self.randomize_seed = true;
    }

    /// The dungeon built by the most recent run, or an empty one before the first run.
    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// Discards the current dungeon and runs every non-muted rule to build a new one.
    ///
    /// Failures do not panic or return early: each one is logged and recorded as a
    /// [`Diagnostic`] in the returned report. A failure of a rule whose
    /// [`stop_on_error`](crate::RuleSettings::stop_on_error) is set ends the run there.
    pub fn generate(&mut self) -> GenerationReport {
        let mut report = GenerationReport {
            seed: self.seed,
            diagnostics: Vec::new(),
            stopped: false,
        };
        self.dungeon.clear(self.seed);
        self.paths.clear();

        let chunk_size = self.dungeon.config().chunk_size;
        let usable = |length: f64| length > 0.0 && length.is_finite();
        if !(usable(chunk_size.x) && usable(chunk_size.y) && usable(chunk_size.z)) {
            report.record(Diagnostic {
                rule: PIPELINE_NAME.to_owned(),
                error: ConfigError::NonPositiveChunkSize(chunk_size).into(),
                fatal: true,
            });
            return report;
        }

        let seed = self.resolve_seed();
        report.seed = seed;
        self.dungeon.clear(seed);

        let Self {
            rules,
            dungeon,
            paths,
            ..
        } = self;
        let mut active: Vec<&mut Box<dyn Rule>> =
            rules.iter_mut().filter(|rule| !rule.settings().muted).collect();
        let mut ctx = GenContext::new(dungeon, seed, paths);

        for rule in active.iter_mut() {
            rule.initialize(&mut ctx);
        }

        for index in 0..active.len() {
            let rule = &mut active[index];
            log::debug!("[{}] generating", rule.name());
            let result = rule.generate(&mut ctx);
            deliver_changes(&mut active, &mut ctx);

            let rule = &active[index];
            match result {
                Ok(()) => log::debug!("[{}] done", rule.name()),
                Err(error) => {
                    let fatal = rule.settings().stop_on_error;
                    report.record(Diagnostic {
                        rule: rule.name().to_owned(),
                        error,
                        fatal,
                    });
                    if fatal {
                        break;
                    }
                }
            }
        }

        report
    }

    fn resolve_seed(&mut self) -> u64 {
        if self.randomize_seed {
            self.seed_source
                .get_or_insert_with(Xoshiro256Plus::from_os_rng)
                .random()
        } else {
            self.seed
        }
    }
}

/// Delivers queued category changes to every active rule, including changes caused by
/// the deliveries themselves, until none remain.
fn deliver_changes(rules: &mut [&mut Box<dyn Rule>], ctx: &mut GenContext<'_>) {
    loop {
        let changes = ctx.dungeon_mut().take_pending_changes();
        if changes.is_empty() {
            break;
        }
        for change in &changes {
            for rule in rules.iter_mut() {
                rule.on_category_changed(ctx, change);
            }
        }
    }
}

/// A failure reported during a [`Pipeline`] run.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Diagnostic {
    /// Name of the rule which failed.
    pub rule: String,
    /// What went wrong.
    pub error: GenError,
    /// Whether the failure ended the run.
    pub fatal: bool,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { rule, error, fatal } = self;
        write!(f, "[{rule}]: {error}")?;
        if *fatal {
            write!(f, " - [Generation stopped]")?;
        }
        Ok(())
    }
}

/// Outcome of [`Pipeline::generate()`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct GenerationReport {
    /// The seed the run used. When seeds are randomized, this is the seed that will
    /// reproduce the run.
    pub seed: u64,
    /// Every failure, in the order it happened.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether a fatal failure ended the run before every rule had run.
    pub stopped: bool,
}

impl GenerationReport {
    /// Returns true if nothing failed.
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.stopped |= diagnostic.fatal;
        self.diagnostics.push(diagnostic);
    }
}
