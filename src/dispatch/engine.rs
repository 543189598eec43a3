//! The dispatcher: owns the registry and applies commands one at a time.

use log::{debug, error, info, warn};
use std::io::{self, Write};
use std::path::Path;

use super::{Command, Notice, NoticeSink};
use crate::error::{Rejection, RuleResult};
use crate::registry::{Collection, Registry};
use crate::report::{render_occupancy, Transcript};
use crate::rules::{CommandTag, EvaluateSubject, GradeSheet, RuleChain};
use crate::script::{Script, ScriptLine};
use crate::store::Persist;

/// Result of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Committed (possibly with rejected grading rows) or reported.
    Applied,
    /// Aborted; the registry is unchanged.
    Rejected,
}

/// Counters for a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Applies commands to a registry, reporting failures as notices and
/// persisting each mutated collection.
#[derive(Debug)]
pub struct Dispatcher<N, P, W = io::Stdout> {
    registry: Registry,
    notices: N,
    store: P,
    report: W,
}

impl<N: NoticeSink, P: Persist> Dispatcher<N, P> {
    /// Dispatcher printing occupancy reports to stdout.
    pub fn new(registry: Registry, notices: N, store: P) -> Self {
        Self::with_report(registry, notices, store, io::stdout())
    }
}

impl<N: NoticeSink, P: Persist, W: Write> Dispatcher<N, P, W> {
    /// Dispatcher printing occupancy reports to `report`.
    pub fn with_report(registry: Registry, notices: N, store: P, report: W) -> Self {
        Self {
            registry,
            notices,
            store,
            report,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn notices(&self) -> &N {
        &self.notices
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn report(&self) -> &W {
        &self.report
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Runs every line of a script in order.
    pub fn run_script(&mut self, script: &Script) -> RunSummary {
        let mut summary = RunSummary::default();
        for line in &script.lines {
            match self.dispatch_line(line) {
                Outcome::Applied => summary.applied += 1,
                Outcome::Rejected => summary.rejected += 1,
            }
        }
        info!(
            "script done: {} applied, {} rejected",
            summary.applied, summary.rejected
        );
        summary
    }

    /// Parses and executes one script line.
    pub fn dispatch_line(&mut self, line: &ScriptLine) -> Outcome {
        let tag = line.tokens.first().and_then(|name| CommandTag::from_command(name));
        let Some(tag) = tag else {
            self.reject(None, Rejection::UnknownCommand(line.text.clone()));
            return Outcome::Rejected;
        };
        match Command::parse(tag, &line.tokens[1..]) {
            Ok(command) => self.execute(&command),
            Err(rejection) => {
                self.reject(Some(tag), rejection);
                Outcome::Rejected
            }
        }
    }

    /// Executes a parsed command.
    pub fn execute(&mut self, command: &Command) -> Outcome {
        let tag = command.tag();
        debug!("{tag}: {command:?}");
        let result = match command {
            Command::InsertPerson(chain) => self.apply(chain),
            Command::AssignGroup(chain) => self.apply(chain),
            Command::Enroll(chain) => self.apply(chain),
            Command::CreateGroup(chain) => self.apply(chain),
            Command::Evaluate {
                subject,
                theory,
                practice,
            } => self.evaluate(subject, theory, practice),
            Command::Transcript { student, output } => {
                Transcript::build(&self.registry, student).and_then(|t| t.write_to(output))
            }
            Command::Occupancy { classroom } => {
                render_occupancy(&self.registry, classroom, &mut self.report)
            }
        };
        match result {
            Ok(()) => Outcome::Applied,
            Err(rejection) => {
                self.reject(Some(tag), rejection);
                Outcome::Rejected
            }
        }
    }

    fn apply<C: RuleChain>(&mut self, chain: &C) -> RuleResult {
        let collection = chain.run(&mut self.registry)?;
        self.persist(chain.tag(), collection);
        Ok(())
    }

    fn evaluate(&mut self, subject: &str, theory: &Path, practice: &Path) -> RuleResult {
        EvaluateSubject::precheck(&self.registry, subject)?;
        let theory = GradeSheet::load(theory)?;
        let practice = GradeSheet::load(practice)?;
        let chain = EvaluateSubject::new(subject, theory, practice);
        let report = chain.run_batch(&mut self.registry)?;
        info!(
            "{subject}: {} graded, {} passed, {} rows rejected",
            report.graded,
            report.passed,
            report.rejected.len()
        );
        for row in &report.rejected {
            warn!("{} -- {row}", chain.tag());
            self.notices.notify(Notice::new(Some(chain.tag()), row.to_string()));
        }
        self.persist(chain.tag(), Collection::Students);
        Ok(())
    }

    /// A failed write is reported but the in-memory change stays.
    fn persist(&mut self, tag: CommandTag, collection: Collection) {
        match self.store.persist(&self.registry, collection) {
            Ok(()) => info!("persisted {collection}"),
            Err(e) => {
                error!("cannot persist {collection}: {e}");
                self.notices.notify(Notice::new(
                    Some(tag),
                    Rejection::Unwritable {
                        path: collection.to_string(),
                        reason: e.to_string(),
                    }
                    .to_string(),
                ));
            }
        }
    }

    fn reject(&mut self, tag: Option<CommandTag>, rejection: Rejection) {
        let notice = Notice::new(tag, rejection.to_string());
        warn!("{notice} ({:?})", rejection.kind());
        self.notices.notify(notice);
    }
}
