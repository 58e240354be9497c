//! Flag declaration, registration and command-line parsing
//!
//! A [`FlagSet`] owns every flag declared on it. Each flag is bound under its
//! short and long alias to the same [`Value`], so either spelling updates one
//! destination, and is recorded once in declaration order for usage output.

use crate::{
    config::{ErrorHandling, FlagSetConfig, Spacing},
    core::{
        coerce::Flaggable,
        value::{Destination, FlagValue, Usager, Value},
    },
    error::{FlagError, Result},
    usage::{Colorer, DefaultColorer, UsageRenderer},
};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::{debug, instrument, warn};

/// A set of flags, their parse state and usage settings
pub struct FlagSet {
    config: FlagSetConfig,
    /// Alias name to value; both aliases of a flag share one entry
    formal: HashMap<String, Rc<dyn Value>>,
    /// One entry per declared flag, in declaration order
    registered: Vec<Rc<dyn Usager>>,
    /// Aliases set by parsing or by `set`
    actual: BTreeSet<String>,
    args: Vec<String>,
    parsed: bool,
    colorer: Box<dyn Colorer>,
    output: Box<dyn Write>,
}

impl FlagSet {
    /// Create an empty flag set for a named program
    pub fn new(program_name: impl Into<String>, error_handling: ErrorHandling) -> Self {
        Self::with_config(FlagSetConfig::new(program_name, error_handling))
    }

    /// Create an empty flag set from configuration
    pub fn with_config(config: FlagSetConfig) -> Self {
        Self {
            config,
            formal: HashMap::new(),
            registered: Vec::new(),
            actual: BTreeSet::new(),
            args: Vec::new(),
            parsed: false,
            colorer: Box::new(DefaultColorer),
            output: Box::new(io::stderr()),
        }
    }

    /// Flag set for the process command line, exiting on parse errors
    pub fn command_line() -> Self {
        Self::with_config(FlagSetConfig::command_line())
    }

    pub fn name(&self) -> &str {
        &self.config.program_name
    }

    pub fn config(&self) -> &FlagSetConfig {
        &self.config
    }

    /// Declare a flag with both a short and a long alias
    ///
    /// Returns the destination, initialised to `value`, that parsing writes into.
    pub fn flag<T: Flaggable>(
        &mut self,
        short: char,
        long: &str,
        value: T,
        usage: &str,
    ) -> Result<Destination<T>> {
        self.declare(&short.to_string(), long, value, usage)
    }

    /// Declare a flag reachable only as `--long`
    pub fn long_flag<T: Flaggable>(
        &mut self,
        long: &str,
        value: T,
        usage: &str,
    ) -> Result<Destination<T>> {
        self.declare("", long, value, usage)
    }

    /// Declare a flag reachable only as `-s`
    pub fn short_flag<T: Flaggable>(
        &mut self,
        short: char,
        value: T,
        usage: &str,
    ) -> Result<Destination<T>> {
        self.declare(&short.to_string(), "", value, usage)
    }

    /// Declare a flag writing into caller-owned storage
    ///
    /// Either alias may be empty. The destination is left as it is until a
    /// parse sets it; `value` is only the default shown in usage.
    pub fn flag_var<T: Flaggable>(
        &mut self,
        destination: &Destination<T>,
        short: &str,
        long: &str,
        value: T,
        usage: &str,
    ) -> Result<()> {
        let flag = Rc::new(FlagValue::new(short, long, value, usage, destination.clone()));
        self.register(flag)
    }

    fn declare<T: Flaggable>(
        &mut self,
        short: &str,
        long: &str,
        value: T,
        usage: &str,
    ) -> Result<Destination<T>> {
        let destination = Destination::new(value.clone());
        self.flag_var(&destination, short, long, value, usage)?;
        Ok(destination)
    }

    fn register<T: Flaggable>(&mut self, flag: Rc<FlagValue<T>>) -> Result<()> {
        let aliases: Vec<&str> = [flag.short(), flag.long()]
            .into_iter()
            .filter(|alias| !alias.is_empty())
            .collect();

        if let [short, long] = aliases.as_slice() {
            if short == long {
                return Err(FlagError::redefined(*short));
            }
        }
        if let Some(taken) = aliases.iter().find(|alias| self.formal.contains_key(**alias)) {
            return Err(FlagError::redefined(*taken));
        }
        if aliases.is_empty() {
            warn!("flag {:?} has no alias and cannot be set from the command line", flag.usage());
        }

        for alias in &aliases {
            let value: Rc<dyn Value> = flag.clone();
            self.formal.insert((*alias).to_string(), value);
        }
        debug!(
            "Registered flag short={:?} long={:?} type={}",
            flag.short(),
            flag.long(),
            T::TYPE_NAME
        );
        self.registered.push(flag);
        Ok(())
    }

    /// Replace the colorer used by later usage renders
    pub fn use_colorer(&mut self, colorer: impl Colorer + 'static) {
        self.colorer = Box::new(colorer);
    }

    /// Put a blank line between usage entries
    pub fn use_spaced_out_usage(&mut self) {
        self.config.spacing = Spacing::SpacedOut;
    }

    /// Redirect usage and error messages; stderr by default
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    /// Flags in declaration order
    pub fn registered(&self) -> &[Rc<dyn Usager>] {
        &self.registered
    }

    /// The usage listing as text
    pub fn render_usage(&self) -> String {
        UsageRenderer::new(self.colorer.as_ref(), self.config.spacing)
            .render(&self.config.program_name, &self.registered)
    }

    /// Write the usage listing to `writer`
    pub fn write_usage(&self, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(self.render_usage().as_bytes())?;
        Ok(())
    }

    /// Print the usage listing to the output stream
    pub fn usage(&mut self) -> Result<()> {
        let text = self.render_usage();
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Parse command-line arguments, excluding the program name
    ///
    /// Stops at the first non-flag argument, a lone `-`, or after `--`.
    #[instrument(skip(self, arguments), fields(program = %self.config.program_name))]
    pub fn parse<I, S>(&mut self, arguments: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed = true;
        self.args = arguments.into_iter().map(Into::into).collect();
        loop {
            match self.parse_one() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => return self.fail(err),
            }
        }
        debug!(
            "Parsed {} flag(s), {} argument(s) remaining",
            self.actual.len(),
            self.args.len()
        );
        Ok(())
    }

    /// Parse the arguments of the running process
    pub fn parse_env_args(&mut self) -> Result<()> {
        self.parse(std::env::args().skip(1))
    }

    /// Consume one flag from the front of `args`; false once flags end
    fn parse_one(&mut self) -> Result<bool> {
        let Some(arg) = self.args.first().cloned() else {
            return Ok(false);
        };
        let Some(body) = arg.strip_prefix('-') else {
            return Ok(false);
        };
        if body.is_empty() {
            return Ok(false);
        }
        let name = match body.strip_prefix('-') {
            Some("") => {
                self.args.remove(0);
                return Ok(false);
            }
            Some(rest) => rest,
            None => body,
        };
        if name.starts_with('-') || name.starts_with('=') {
            return Err(FlagError::bad_syntax(arg.as_str()));
        }
        self.args.remove(0);

        let (name, inline) = match name.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (name, None),
        };

        let Some(flag) = self.formal.get(name).cloned() else {
            if name == "help" || name == "h" {
                if let Err(e) = self.usage() {
                    warn!("Failed to print usage: {}", e);
                }
                return Err(FlagError::Help);
            }
            return Err(FlagError::unknown_flag(name));
        };

        let text = match inline {
            Some(text) => text.to_string(),
            None if flag.is_bool_flag() => "true".to_string(),
            None if self.args.is_empty() => return Err(FlagError::missing_value(name)),
            None => self.args.remove(0),
        };
        flag.set(&text)
            .map_err(|e| FlagError::invalid_value(name, text.as_str(), e))?;

        self.actual.insert(name.to_string());
        Ok(true)
    }

    /// Report a parse error and apply the error handling policy
    ///
    /// Output failures are logged; the policy always sees the parse error.
    fn fail(&mut self, err: FlagError) -> Result<()> {
        if !matches!(err, FlagError::Help) {
            let reported = writeln!(self.output, "{err}")
                .map_err(FlagError::from)
                .and_then(|()| self.usage());
            if let Err(e) = reported {
                warn!("Failed to report parse error: {}", e);
            }
        }
        match self.config.error_handling {
            ErrorHandling::Continue => Err(err),
            ErrorHandling::Exit => {
                let code = if matches!(err, FlagError::Help) { 0 } else { 2 };
                std::process::exit(code)
            }
        }
    }

    /// Whether `parse` has been called
    pub fn parsed(&self) -> bool {
        self.parsed
    }

    /// Arguments left after the flags
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The `i`th remaining argument
    pub fn arg(&self, i: usize) -> Option<&str> {
        self.args.get(i).map(String::as_str)
    }

    /// Number of arguments left after the flags
    pub fn narg(&self) -> usize {
        self.args.len()
    }

    /// Number of aliases that have been set
    pub fn nflag(&self) -> usize {
        self.actual.len()
    }

    /// The value bound to an alias
    pub fn lookup(&self, name: &str) -> Option<&dyn Value> {
        self.formal.get(name).map(|value| value.as_ref())
    }

    /// Set a flag by alias as if it appeared on the command line
    pub fn set(&mut self, name: &str, text: &str) -> Result<()> {
        let flag = self
            .formal
            .get(name)
            .ok_or_else(|| FlagError::unknown_flag(name))?;
        flag.set(text)
            .map_err(|e| FlagError::invalid_value(name, text, e))?;
        self.actual.insert(name.to_string());
        Ok(())
    }

    /// Visit every bound alias in lexicographic order
    pub fn visit_all(&self, mut f: impl FnMut(&str, &dyn Value)) {
        let mut names: Vec<&String> = self.formal.keys().collect();
        names.sort();
        for name in names {
            f(name, self.formal[name].as_ref());
        }
    }

    /// Visit the aliases that have been set, in lexicographic order
    pub fn visit(&self, mut f: impl FnMut(&str, &dyn Value)) {
        for name in &self.actual {
            if let Some(value) = self.formal.get(name) {
                f(name, value.as_ref());
            }
        }
    }
}

impl fmt::Debug for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: Vec<(&str, &str)> = self
            .registered
            .iter()
            .map(|flag| (flag.short(), flag.long()))
            .collect();
        f.debug_struct("FlagSet")
            .field("config", &self.config)
            .field("flags", &flags)
            .field("args", &self.args)
            .field("parsed", &self.parsed)
            .finish_non_exhaustive()
    }
}
