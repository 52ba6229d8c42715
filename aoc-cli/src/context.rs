//! Per-invocation state shared by the commands

use crate::cli::{Args, PuzzleArgs};
use crate::config::{self, Config, SESSION_ENV};
use crate::error::CliError;
use aoc_http_client::AocClient;
use aoc_puzzle::{Ambient, PuzzleRef, resolve};
use tracing::debug;
use zeroize::Zeroizing;

pub struct Context {
    pub config: Config,
    pub ambient: Ambient,
    pub client: AocClient,
    session_flag: Option<Zeroizing<String>>,
}

impl Context {
    /// Read the environment: clock, working directory and config files
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let ambient = Ambient::current()?;
        let cwd = std::env::current_dir()?;
        let home = dirs::home_dir();
        let config = Config::discover(home.as_deref(), &cwd, args.config.as_deref())?;

        Ok(Self {
            config,
            ambient,
            client: AocClient::new()?,
            session_flag: args.session.clone().map(Zeroizing::new),
        })
    }

    /// Resolve and validate the puzzle a command operates on
    ///
    /// The config file's year counts as explicit when no `--year` is given.
    pub fn puzzle(&self, args: PuzzleArgs) -> Result<PuzzleRef, CliError> {
        let explicit_year = args.year.or(self.config.year);
        let (year, day) = resolve(explicit_year, args.day, &self.ambient);
        debug!(year, day, "resolved puzzle");
        Ok(PuzzleRef::new(year, day)?)
    }

    /// Session from flag, environment or config, if any
    pub fn session(&self) -> Option<Zeroizing<String>> {
        let env = std::env::var(SESSION_ENV).ok().map(Zeroizing::new);
        config::resolve_session(
            self.session_flag.as_deref().map(String::as_str),
            env.as_deref().map(String::as_str),
            &self.config,
        )
    }

    /// Session from any source, prompting when none is configured
    pub fn require_session(&self, reason: &'static str) -> Result<Zeroizing<String>, CliError> {
        match self.session() {
            Some(session) => Ok(session),
            None => config::prompt_session(reason),
        }
    }
}
