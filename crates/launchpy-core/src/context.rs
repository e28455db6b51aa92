use crate::config::{Config, GlobalOptions};
use crate::effects::{Effects, ProcessRunner, SharedEffects};

pub struct CommandContext<'a> {
    pub global: &'a GlobalOptions,
    config: Config,
    effects: SharedEffects,
}

impl<'a> CommandContext<'a> {
    /// Creates a context from the current process environment.
    pub fn new(global: &'a GlobalOptions, effects: SharedEffects) -> Self {
        Self::with_config(global, Config::from_env(), effects)
    }

    pub(crate) fn with_config(
        global: &'a GlobalOptions,
        config: Config,
        effects: SharedEffects,
    ) -> Self {
        Self {
            global,
            config,
            effects,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn effects(&self) -> &dyn Effects {
        self.effects.as_ref()
    }

    pub fn process(&self) -> &dyn ProcessRunner {
        self.effects.process()
    }
}
