//! Scaffold Service - the pipeline orchestrator.
//!
//! Runs the five stages in a fixed total order:
//! 1. Create the project structure (root + one project per layer)
//! 2. Create the solution and register every layer in it
//! 3. Wire inter-layer references
//! 4. Emit the container support files
//! 5. Restore packages
//!
//! Every stage receives the [`RollbackLedger`] explicitly. The first failure
//! stops the pipeline and the ledger is unwound exactly once.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, RollbackLedger, RollbackOutcome, RollbackReport,
        ports::{Filesystem, NullProgress, ProgressSink, ScaffoldEvent, Stage, Toolchain},
    },
    domain::{ScaffoldPlan, ScaffoldRequest},
    error::{StrataError, StrataResult},
};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldOutcome {
    pub run_id: Uuid,
    pub project: String,
    pub root: PathBuf,
    pub solution: PathBuf,
    pub layers: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    toolchain: Box<dyn Toolchain>,
    filesystem: Box<dyn Filesystem>,
    progress: Box<dyn ProgressSink>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// Progress events are discarded until [`Self::with_progress`] is used.
    pub fn new(toolchain: Box<dyn Toolchain>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            toolchain,
            filesystem,
            progress: Box::new(NullProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Scaffold a new solution.
    ///
    /// On failure the returned error is [`StrataError::ScaffoldFailed`],
    /// carrying both the cause and the rollback report.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name(),
            root = %request.root_path().display(),
            run_id = tracing::field::Empty,
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> StrataResult<ScaffoldOutcome> {
        let run_id = Uuid::new_v4();
        Span::current().record("run_id", tracing::field::display(run_id));

        let plan = ScaffoldPlan::for_request(request)?;
        let mut ledger = RollbackLedger::new();

        match self.run(&plan, &mut ledger) {
            Ok(files) => {
                info!("Scaffold completed successfully");
                Ok(ScaffoldOutcome {
                    run_id,
                    project: plan.project_name.to_string(),
                    root: plan.root.clone(),
                    solution: plan.solution.clone(),
                    layers: plan.layers.iter().map(|l| l.name.clone()).collect(),
                    files,
                })
            }
            Err(err) => {
                info!(error = %err, "Pipeline failed, rolling back");
                let rollback = self.unwind(ledger);
                Err(StrataError::ScaffoldFailed {
                    source: Box::new(err),
                    rollback,
                })
            }
        }
    }

    fn run(&self, plan: &ScaffoldPlan, ledger: &mut RollbackLedger) -> StrataResult<Vec<PathBuf>> {
        self.create_structure(plan, ledger)?;
        self.assemble_solution(plan, ledger)?;
        self.wire_references(plan)?;
        let files = self.emit_support_files(plan, ledger)?;
        self.restore(plan)?;
        Ok(files)
    }

    /// Stage 1: create the root directory and generate every layer.
    ///
    /// A layer directory is recorded as soon as its creation command has been
    /// issued, whether or not the command succeeded.
    #[instrument(skip_all)]
    pub fn create_structure(
        &self,
        plan: &ScaffoldPlan,
        ledger: &mut RollbackLedger,
    ) -> StrataResult<PathBuf> {
        self.emit(ScaffoldEvent::StageStarted(Stage::Structure));

        let root = plan.root.clone();
        if self.filesystem.exists(&root) {
            return Err(ApplicationError::ProjectExists { path: root }.into());
        }

        self.filesystem.create_dir_all(&root)?;
        ledger.record(root.clone());

        for layer in &plan.layers {
            let dir = layer.dir(&root);
            debug!(layer = %layer.name, template = %layer.template, "Creating layer");

            let issued = self.toolchain.new_project(layer.template, &layer.name, &dir);
            ledger.record(dir);
            issued?;

            self.emit(ScaffoldEvent::LayerCreated {
                name: layer.name.clone(),
                template: layer.template,
            });
        }

        Ok(root)
    }

    /// Stage 2: create the solution and register each layer in table order.
    #[instrument(skip_all)]
    pub fn assemble_solution(
        &self,
        plan: &ScaffoldPlan,
        ledger: &mut RollbackLedger,
    ) -> StrataResult<PathBuf> {
        self.emit(ScaffoldEvent::StageStarted(Stage::Solution));

        let issued = self
            .toolchain
            .new_solution(plan.project_name.as_str(), &plan.root);
        ledger.record(plan.solution.clone());
        issued?;

        self.emit(ScaffoldEvent::SolutionCreated {
            path: plan.solution.clone(),
        });

        for layer in &plan.layers {
            self.toolchain
                .add_to_solution(&plan.solution, &layer.project_file(&plan.root))?;
            self.emit(ScaffoldEvent::LayerRegistered {
                name: layer.name.clone(),
            });
        }

        Ok(plan.solution.clone())
    }

    /// Stage 3: one "add reference" call per source layer.
    ///
    /// Records nothing; references live inside already-recorded projects.
    #[instrument(skip_all)]
    pub fn wire_references(&self, plan: &ScaffoldPlan) -> StrataResult<()> {
        self.emit(ScaffoldEvent::StageStarted(Stage::References));

        for edge in &plan.references {
            debug!(from = %edge.from.name, targets = edge.to.len(), "Adding references");
            self.toolchain
                .add_references(&edge.source_project(&plan.root), &edge.target_projects(&plan.root))?;

            self.emit(ScaffoldEvent::ReferencesAdded {
                from: edge.from.name.clone(),
                to: edge.to.iter().map(|t| t.name.clone()).collect(),
            });
        }

        Ok(())
    }

    /// Stage 4: render and write the support files.
    ///
    /// Each file is recorded right after it is written, so a failure on the
    /// second file still unwinds the first.
    #[instrument(skip_all)]
    pub fn emit_support_files(
        &self,
        plan: &ScaffoldPlan,
        ledger: &mut RollbackLedger,
    ) -> StrataResult<Vec<PathBuf>> {
        self.emit(ScaffoldEvent::StageStarted(Stage::SupportFiles));

        let ctx = plan.render_context();
        let mut written = Vec::with_capacity(plan.support_files.len());

        for file in &plan.support_files {
            let body = file.kind.render(&ctx);
            self.filesystem.write_file(&file.path, &body)?;
            ledger.record(file.path.clone());

            self.emit(ScaffoldEvent::SupportFileWritten {
                path: file.path.clone(),
            });
            written.push(file.path.clone());
        }

        Ok(written)
    }

    /// Stage 5: resolve dependencies for the whole solution.
    #[instrument(skip_all)]
    pub fn restore(&self, plan: &ScaffoldPlan) -> StrataResult<()> {
        self.emit(ScaffoldEvent::StageStarted(Stage::Restore));
        self.toolchain.restore(&plan.solution)?;
        self.emit(ScaffoldEvent::RestoreCompleted);
        Ok(())
    }

    fn unwind(&self, ledger: RollbackLedger) -> RollbackReport {
        self.emit(ScaffoldEvent::RollbackStarted {
            entries: ledger.len(),
        });

        let report = ledger.rollback(self.filesystem.as_ref());

        for entry in &report.entries {
            match &entry.outcome {
                RollbackOutcome::Removed => self.emit(ScaffoldEvent::RollbackRemoved {
                    path: entry.path.clone(),
                }),
                RollbackOutcome::Failed { reason } => self.emit(ScaffoldEvent::RollbackFailed {
                    path: entry.path.clone(),
                    reason: reason.clone(),
                }),
                RollbackOutcome::AlreadyAbsent => {}
            }
        }

        self.emit(ScaffoldEvent::RollbackCompleted);
        report
    }

    fn emit(&self, event: ScaffoldEvent) {
        self.progress.on_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::MockToolchain;
    use crate::application::testing::{FakeFilesystem, RecordingProgress};
    use crate::domain::ProjectName;

    type CallLog = Arc<Mutex<Vec<String>>>;

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    fn request() -> ScaffoldRequest {
        ScaffoldRequest::new(ProjectName::parse("Acme").unwrap(), "/tmp/work")
    }

    fn tool_failure(command: &str) -> StrataError {
        ApplicationError::ExternalTool {
            command: command.into(),
            status: Some(1),
            stderr: String::new(),
        }
        .into()
    }

    /// A toolchain that succeeds everywhere, materialises projects and the
    /// solution in `fs`, and logs every call.
    fn working_toolchain(fs: &FakeFilesystem, log: &CallLog) -> MockToolchain {
        let mut tc = MockToolchain::new();

        let (f, l) = (fs.clone(), log.clone());
        tc.expect_new_project().returning(move |kind, name, dir| {
            l.lock().unwrap().push(format!("new {kind} {name}"));
            f.create_dir_all(dir)
        });

        let (f, l) = (fs.clone(), log.clone());
        tc.expect_new_solution().returning(move |name, dir| {
            l.lock().unwrap().push("new sln".into());
            f.write_file(&dir.join(format!("{name}.sln")), "")
        });

        let l = log.clone();
        tc.expect_add_to_solution().returning(move |_, project| {
            l.lock().unwrap().push(format!("sln add {}", file_name(project)));
            Ok(())
        });

        let l = log.clone();
        tc.expect_add_references().returning(move |project, targets| {
            let targets: Vec<_> = targets.iter().map(|t| file_name(t)).collect();
            l.lock()
                .unwrap()
                .push(format!("ref {} -> {}", file_name(project), targets.join(",")));
            Ok(())
        });

        let l = log.clone();
        tc.expect_restore().returning(move |solution| {
            l.lock().unwrap().push(format!("restore {}", file_name(solution)));
            Ok(())
        });

        tc
    }

    #[test]
    fn full_run_builds_every_artifact() {
        let fs = FakeFilesystem::new();
        let log = CallLog::default();
        let service = ScaffoldService::new(
            Box::new(working_toolchain(&fs, &log)),
            Box::new(fs.clone()),
        );

        let outcome = service.scaffold(&request()).unwrap();

        assert_eq!(outcome.root, Path::new("/tmp/work/Acme"));
        assert_eq!(outcome.solution, Path::new("/tmp/work/Acme/Acme.sln"));
        assert_eq!(outcome.layers.len(), 6);
        for layer in &outcome.layers {
            assert!(fs.exists(&outcome.root.join(layer)), "{layer} missing");
        }

        let compose = fs
            .read(Path::new("/tmp/work/Acme/docker-compose.yml"))
            .unwrap();
        assert!(compose.contains("  acme:\n"));
        assert!(compose.contains("container_name: acme-container"));
        assert!(compose.contains("\"8000:80\""));

        let dockerfile = fs.read(Path::new("/tmp/work/Acme/Dockerfile")).unwrap();
        assert!(dockerfile.contains("Acme.API.dll"));
    }

    #[test]
    fn stages_run_in_total_order() {
        let fs = FakeFilesystem::new();
        let log = CallLog::default();
        let service = ScaffoldService::new(
            Box::new(working_toolchain(&fs, &log)),
            Box::new(fs.clone()),
        );

        service.scaffold(&request()).unwrap();

        let calls = log.lock().unwrap().clone();
        assert_eq!(
            calls,
            [
                "new webapi Acme.API",
                "new classlib Acme.Domain",
                "new classlib Acme.Application",
                "new classlib Acme.Infrastructure",
                "new classlib Acme.Shared",
                "new xunit Acme.Tests",
                "new sln",
                "sln add Acme.API.csproj",
                "sln add Acme.Domain.csproj",
                "sln add Acme.Application.csproj",
                "sln add Acme.Infrastructure.csproj",
                "sln add Acme.Shared.csproj",
                "sln add Acme.Tests.csproj",
                "ref Acme.API.csproj -> Acme.Domain.csproj,Acme.Application.csproj,Acme.Infrastructure.csproj",
                "ref Acme.Application.csproj -> Acme.Domain.csproj",
                "ref Acme.Infrastructure.csproj -> Acme.Domain.csproj",
                "restore Acme.sln",
            ]
        );
    }

    #[test]
    fn reference_edges_never_touch_shared_or_tests() {
        let fs = FakeFilesystem::new();
        let log = CallLog::default();
        let service = ScaffoldService::new(
            Box::new(working_toolchain(&fs, &log)),
            Box::new(fs.clone()),
        );

        service.scaffold(&request()).unwrap();

        let refs: HashSet<_> = log
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with("ref "))
            .cloned()
            .collect();
        assert_eq!(refs.len(), 3);
        assert!(refs.iter().all(|r| !r.contains("Shared") && !r.contains("Tests")));
    }

    #[test]
    fn reference_failure_unwinds_everything_recorded() {
        let fs = FakeFilesystem::new();
        let mut tc = MockToolchain::new();

        // Only the first three layers ever materialise.
        let created = Arc::new(Mutex::new(0usize));
        let f = fs.clone();
        tc.expect_new_project().times(6).returning(move |_, _, dir| {
            let mut n = created.lock().unwrap();
            *n += 1;
            if *n <= 3 { f.create_dir_all(dir) } else { Ok(()) }
        });
        let f = fs.clone();
        tc.expect_new_solution()
            .times(1)
            .returning(move |name, dir| f.write_file(&dir.join(format!("{name}.sln")), ""));
        tc.expect_add_to_solution().times(6).returning(|_, _| Ok(()));
        tc.expect_add_references()
            .times(1)
            .returning(|_, _| Err(tool_failure("dotnet add reference")));
        tc.expect_restore().never();

        let service = ScaffoldService::new(Box::new(tc), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        let StrataError::ScaffoldFailed { source, rollback } = err else {
            panic!("expected ScaffoldFailed");
        };
        assert!(matches!(
            *source,
            StrataError::Application(ApplicationError::ExternalTool { .. })
        ));

        let root = Path::new("/tmp/work/Acme");
        let order: Vec<_> = rollback.entries.iter().map(|e| e.path.clone()).collect();
        let mut expected = vec![root.to_path_buf()];
        for layer in ["API", "Domain", "Application", "Infrastructure", "Shared", "Tests"] {
            expected.push(root.join(format!("Acme.{layer}")));
        }
        expected.push(root.join("Acme.sln"));
        assert_eq!(order, expected);

        assert_eq!(rollback.entries[0].outcome, RollbackOutcome::Removed);
        assert!(rollback.is_clean());
        assert!(fs.is_empty_under(root));
    }

    #[test]
    fn existing_root_is_never_touched() {
        let fs = FakeFilesystem::new();
        fs.create_dir_all(Path::new("/tmp/work/Acme")).unwrap();

        // No expectations: any toolchain call panics.
        let service = ScaffoldService::new(Box::new(MockToolchain::new()), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        assert!(err.rollback().unwrap().entries.is_empty());
        assert!(err.to_string().contains("already exists"));
        assert!(fs.exists(Path::new("/tmp/work/Acme")));
        assert!(fs.removals().is_empty());
    }

    #[test]
    fn root_creation_failure_records_nothing() {
        let fs = FakeFilesystem::new();
        fs.deny_create("/tmp/work/Acme");

        // No expectations: any toolchain call panics.
        let service = ScaffoldService::new(Box::new(MockToolchain::new()), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        assert_eq!(err.category(), crate::error::ErrorCategory::Filesystem);
        assert!(err.rollback().unwrap().entries.is_empty());
        assert!(fs.removals().is_empty());
        assert!(
            !err.suggestions()
                .iter()
                .any(|s| s.contains("All generated files were removed"))
        );
    }

    #[test]
    fn failed_layer_is_still_recorded() {
        let fs = FakeFilesystem::new();
        let mut tc = MockToolchain::new();
        let calls = Arc::new(Mutex::new(0usize));
        tc.expect_new_project().times(2).returning(move |_, _, _| {
            let mut n = calls.lock().unwrap();
            *n += 1;
            if *n == 2 { Err(tool_failure("dotnet new classlib")) } else { Ok(()) }
        });

        let service = ScaffoldService::new(Box::new(tc), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        let paths: Vec<_> = err
            .rollback()
            .unwrap()
            .entries
            .iter()
            .map(|e| file_name(&e.path))
            .collect();
        assert_eq!(paths, ["Acme", "Acme.API", "Acme.Domain"]);
    }

    #[test]
    fn second_support_file_failure_unwinds_first() {
        let fs = FakeFilesystem::new();
        fs.deny_write("/tmp/work/Acme/Dockerfile");
        let log = CallLog::default();
        let tc = working_toolchain(&fs, &log);

        let service = ScaffoldService::new(Box::new(tc), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        assert!(!log.lock().unwrap().iter().any(|c| c.starts_with("restore")));

        let entries = &err.rollback().unwrap().entries;
        let last = entries.last().unwrap();
        assert_eq!(last.path, Path::new("/tmp/work/Acme/docker-compose.yml"));
        assert!(!entries.iter().any(|e| e.path.ends_with("Dockerfile")));
        assert!(fs.is_empty_under(Path::new("/tmp/work/Acme")));
    }

    #[test]
    fn restore_failure_unwinds_everything() {
        let fs = FakeFilesystem::new();
        let mut tc = MockToolchain::new();
        let f = fs.clone();
        tc.expect_new_project()
            .returning(move |_, _, dir| f.create_dir_all(dir));
        tc.expect_new_solution().returning(|_, _| Ok(()));
        tc.expect_add_to_solution().returning(|_, _| Ok(()));
        tc.expect_add_references().returning(|_, _| Ok(()));
        tc.expect_restore()
            .times(1)
            .returning(|_| Err(tool_failure("dotnet restore")));

        let service = ScaffoldService::new(Box::new(tc), Box::new(fs.clone()));
        let err = service.scaffold(&request()).unwrap_err();

        assert_eq!(err.rollback().unwrap().entries.len(), 10);
        assert!(fs.is_empty_under(Path::new("/tmp/work/Acme")));
    }

    #[test]
    fn progress_narrates_success() {
        let fs = FakeFilesystem::new();
        let log = CallLog::default();
        let progress = RecordingProgress::default();
        let service = ScaffoldService::new(
            Box::new(working_toolchain(&fs, &log)),
            Box::new(fs.clone()),
        )
        .with_progress(Box::new(progress.clone()));

        service.scaffold(&request()).unwrap();

        let events = progress.events();
        assert_eq!(events.first(), Some(&ScaffoldEvent::StageStarted(Stage::Structure)));
        assert_eq!(events.last(), Some(&ScaffoldEvent::RestoreCompleted));
        let stages: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ScaffoldEvent::StageStarted(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            [Stage::Structure, Stage::Solution, Stage::References, Stage::SupportFiles, Stage::Restore]
        );
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, ScaffoldEvent::LayerCreated { .. }))
                .count(),
            6
        );
    }

    #[test]
    fn progress_narrates_rollback() {
        let fs = FakeFilesystem::new();
        let mut tc = MockToolchain::new();
        let f = fs.clone();
        tc.expect_new_project()
            .returning(move |_, _, dir| f.create_dir_all(dir));
        tc.expect_new_solution()
            .returning(|_, _| Err(tool_failure("dotnet new sln")));

        let progress = RecordingProgress::default();
        let service = ScaffoldService::new(Box::new(tc), Box::new(fs.clone()))
            .with_progress(Box::new(progress.clone()));
        service.scaffold(&request()).unwrap_err();

        let events = progress.events();
        assert!(events.contains(&ScaffoldEvent::RollbackStarted { entries: 8 }));
        assert!(events.contains(&ScaffoldEvent::RollbackRemoved {
            path: PathBuf::from("/tmp/work/Acme"),
        }));
        assert_eq!(events.last(), Some(&ScaffoldEvent::RollbackCompleted));
    }
}
