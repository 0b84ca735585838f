//! End-to-end pipeline runs against a scripted Ghostscript.

use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::{tempdir, TempDir};

use pdfpipe_core::command::EngineCommand;
use pdfpipe_core::document::load_document;
use pdfpipe_core::logging::{JobLogger, LogConfig};
use pdfpipe_core::models::{
    ArchiveStage, CompressStage, CompressionLevel, MergeInputItem, MergeStage, PipelineConfig,
    StageKind,
};
use pdfpipe_core::orchestrator::{
    create_standard_pipeline, plan_commands, Context, PipelineError, RunState, StageStatus,
    StepError,
};
use pdfpipe_core::picker::StaticFilePicker;
use pdfpipe_core::runner::{CommandExecutor, EngineError, ProcessOutput, ProcessRunner};

/// Executor that records every command and replays scripted results.
#[derive(Clone, Default)]
struct ScriptedExecutor {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    responses: Arc<Mutex<Vec<io::Result<ProcessOutput>>>>,
}

impl ScriptedExecutor {
    fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next call. Unscripted calls exit 0.
    fn then(self, response: io::Result<ProcessOutput>) -> Self {
        self.responses.lock().push(response);
        self
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(&self, command: &EngineCommand) -> io::Result<ProcessOutput> {
        self.calls.lock().push(command.argv());
        let mut responses = self.responses.lock();
        if responses.is_empty() {
            Ok(ProcessOutput::new(0, "", ""))
        } else {
            responses.remove(0)
        }
    }
}

/// `<root>/gs/bin/gs` with `<root>/lib/PDFA_def.ps`.
struct FakeInstall {
    dir: TempDir,
}

impl FakeInstall {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("gs/bin")).unwrap();
        fs::create_dir_all(dir.path().join("lib")).unwrap();
        fs::write(dir.path().join("gs/bin/gs"), "").unwrap();
        fs::write(dir.path().join("lib/PDFA_def.ps"), "%!PS").unwrap();
        Self { dir }
    }

    fn without_definition() -> Self {
        let install = Self::new();
        fs::remove_file(install.definition()).unwrap();
        install
    }

    fn engine(&self) -> PathBuf {
        self.dir.path().join("gs/bin/gs")
    }

    fn definition(&self) -> PathBuf {
        self.dir.path().join("lib/PDFA_def.ps")
    }

    fn logs(&self) -> PathBuf {
        self.dir.path().join("logs")
    }
}

fn page(n: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(n)
}

fn merge_config(install: &FakeInstall) -> PipelineConfig {
    PipelineConfig {
        engine_path: Some(install.engine()),
        merge: MergeStage {
            enabled: true,
            inputs: vec![
                MergeInputItem::ranged("a.pdf", page(2), page(4)),
                MergeInputItem::Path(PathBuf::from("b.pdf")),
            ],
            output: Some(PathBuf::from("merged.pdf")),
        },
        ..Default::default()
    }
}

fn full_config(install: &FakeInstall) -> PipelineConfig {
    PipelineConfig {
        compress: CompressStage {
            enabled: true,
            output: Some(PathBuf::from("small.pdf")),
        },
        archive: ArchiveStage {
            enabled: true,
            output: Some(PathBuf::from("final.pdf")),
            ..Default::default()
        },
        compression_level: CompressionLevel::Screen,
        ..merge_config(install)
    }
}

fn context(config: PipelineConfig, logs: &Path, executor: &ScriptedExecutor) -> Context {
    let logger = Arc::new(JobLogger::new(logs, LogConfig::default(), None).unwrap());
    Context::new(config, logger).with_runner(ProcessRunner::new(executor.clone()))
}

fn strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn all_stages_disabled_runs_nothing() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let config = PipelineConfig {
        engine_path: Some(install.engine()),
        ..Default::default()
    };

    let ctx = context(config, &install.logs(), &executor);
    let mut state = RunState::new();
    let report = create_standard_pipeline().run(&ctx, &mut state).unwrap();

    assert!(report.messages.is_empty());
    assert_eq!(report.artifact, None);
    assert!(executor.calls().is_empty());
    for kind in StageKind::ALL {
        assert_eq!(state.status(kind), StageStatus::Skipped);
    }
}

#[test]
fn missing_definition_file_invokes_nothing() {
    let install = FakeInstall::without_definition();
    let executor = ScriptedExecutor::new();

    let ctx = context(full_config(&install), &install.logs(), &executor);
    let err = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap_err();

    assert!(matches!(err, PipelineError::Preflight { .. }));
    assert!(executor.calls().is_empty());
}

#[test]
fn compress_without_merge_has_no_input() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let mut config = full_config(&install);
    config.merge.enabled = false;

    let ctx = context(config, &install.logs(), &executor);
    let mut state = RunState::new();
    let err = create_standard_pipeline().run(&ctx, &mut state).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::StageFailed {
            stage: StageKind::Compress,
            source: StepError::NoInput(_)
        }
    ));
    assert!(executor.calls().is_empty());
    assert_eq!(state.status(StageKind::Archive), StageStatus::Pending);
}

#[test]
fn merge_with_page_range() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();

    let ctx = context(merge_config(&install), &install.logs(), &executor);
    let report = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    assert_eq!(report.messages, vec!["Merge OK → merged.pdf".to_string()]);
    assert_eq!(report.artifact, Some(PathBuf::from("merged.pdf")));

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let argv = &calls[0];
    assert_eq!(argv[0], install.engine().to_string_lossy());
    assert_eq!(
        argv[1..5].to_vec(),
        strings(&["-dBATCH", "-dNOPAUSE", "-sDEVICE=pdfwrite", "-sOutputFile=merged.pdf"])
    );
    assert!(argv.ends_with(&strings(&["-dFirstPage=2", "-dLastPage=4", "a.pdf", "b.pdf"])));
}

#[test]
fn three_stages_chain_the_artifact() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();

    let ctx = context(full_config(&install), &install.logs(), &executor);
    let mut state = RunState::new();
    let report = create_standard_pipeline().run(&ctx, &mut state).unwrap();

    assert_eq!(
        report.messages,
        strings(&[
            "Merge OK → merged.pdf",
            "Compress OK → small.pdf",
            "PDF/A OK → final.pdf",
        ])
    );
    assert_eq!(report.artifact, Some(PathBuf::from("final.pdf")));

    let calls = executor.calls();
    assert_eq!(calls.len(), 3);

    let compress = &calls[1];
    assert!(compress.contains(&"-dPDFSETTINGS=/screen".to_string()));
    assert!(compress.ends_with(&strings(&["-sOutputFile=small.pdf", "merged.pdf"])));

    let archive = &calls[2];
    let definition = install.definition().to_string_lossy().to_string();
    assert_eq!(archive[1], "-dPDFA=2");
    assert!(archive.ends_with(&[definition, "small.pdf".to_string()]));

    for kind in StageKind::ALL {
        let record = state.record(kind).unwrap();
        assert_eq!(record.status, StageStatus::Succeeded);
        assert!(record.result.as_ref().unwrap().success);
    }
    assert_eq!(state.record(StageKind::Compress).unwrap().command.as_ref(), Some(compress));
}

#[test]
fn engine_failure_stops_the_run() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new()
        .then(Ok(ProcessOutput::new(0, "", "")))
        .then(Ok(ProcessOutput::new(1, "", "disk full")));

    let ctx = context(full_config(&install), &install.logs(), &executor);
    let mut state = RunState::new();
    let err = create_standard_pipeline().run(&ctx, &mut state).unwrap_err();

    assert_eq!(err.stage(), Some(StageKind::Compress));
    assert!(err.to_string().contains("disk full"));
    assert_eq!(executor.calls().len(), 2);

    assert_eq!(state.messages, strings(&["Merge OK → merged.pdf"]));
    assert_eq!(state.artifact, Some(PathBuf::from("merged.pdf")));

    let compress = state.record(StageKind::Compress).unwrap();
    assert_eq!(compress.status, StageStatus::Failed);
    let result = compress.result.as_ref().unwrap();
    assert!(!result.success);
    assert_eq!(result.error_detail.as_deref(), Some("disk full"));
    assert_eq!(state.status(StageKind::Archive), StageStatus::Pending);
}

#[test]
fn archive_profile_only_changes_the_log() {
    let install = FakeInstall::new();
    let default_profile = ScriptedExecutor::new();
    let other_profile = ScriptedExecutor::new();

    let ctx = context(full_config(&install), &install.logs(), &default_profile);
    create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    let mut config = full_config(&install);
    config.archive.profile = "PDF/A-3b".to_string();
    let logs = install.dir.path().join("logs-3b");
    let ctx = context(config, &logs, &other_profile);
    let report = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    assert_eq!(report.messages[2], "PDF/A OK → final.pdf");
    let archive = &other_profile.calls()[2];
    assert_eq!(archive, &default_profile.calls()[2]);
    assert_eq!(archive[1], "-dPDFA=2");
    assert!(!archive.iter().any(|token| token.contains("3b")));

    let log = fs::read_to_string(ctx.logger.log_path()).unwrap();
    assert!(log.contains("PDF/A profile: PDF/A-3b"));
}

#[test]
fn spawn_failure_is_an_engine_error() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new().then(Err(io::Error::new(
        io::ErrorKind::NotFound,
        "No such file or directory",
    )));

    let ctx = context(merge_config(&install), &install.logs(), &executor);
    let err = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::StageFailed {
            source: StepError::Engine(EngineError::Spawn { .. }),
            ..
        }
    ));
}

#[test]
fn identical_configs_give_identical_commands() {
    let install = FakeInstall::new();
    let first = ScriptedExecutor::new();
    let second = ScriptedExecutor::new();

    for executor in [&first, &second] {
        let ctx = context(full_config(&install), &install.logs(), executor);
        create_standard_pipeline()
            .run(&ctx, &mut RunState::new())
            .unwrap();
    }

    assert_eq!(first.calls(), second.calls());
}

#[test]
fn plan_matches_the_run() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let config = full_config(&install);

    let plan = plan_commands(&config, &install.definition()).unwrap();

    let ctx = context(config, &install.logs(), &executor);
    create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    let planned: Vec<Vec<String>> = plan.into_iter().map(|p| p.argv).collect();
    assert_eq!(planned, executor.calls());
}

#[test]
fn empty_merge_list_uses_the_file_picker() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let mut config = merge_config(&install);
    config.merge.inputs.clear();

    let ctx = context(config, &install.logs(), &executor)
        .with_file_picker(StaticFilePicker::new(["x.pdf", "y.pdf"]));
    create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    let calls = executor.calls();
    assert!(calls[0].ends_with(&strings(&["-sOutputFile=merged.pdf", "x.pdf", "y.pdf"])));
}

#[test]
fn empty_merge_list_without_picker_fails() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let mut config = merge_config(&install);
    config.merge.inputs.clear();

    let ctx = context(config, &install.logs(), &executor);
    let err = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::StageFailed {
            stage: StageKind::Merge,
            source: StepError::NoInput(_)
        }
    ));
    assert!(executor.calls().is_empty());
}

#[test]
fn output_overwriting_input_is_rejected() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let mut config = full_config(&install);
    config.compress.output = Some(PathBuf::from("./merged.pdf"));

    let ctx = context(config, &install.logs(), &executor);
    let err = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::StageFailed {
            stage: StageKind::Compress,
            source: StepError::Configuration(_)
        }
    ));
    assert_eq!(executor.calls().len(), 1);
}

#[test]
fn unrecognized_items_are_skipped() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();
    let mut config = merge_config(&install);
    config
        .merge
        .inputs
        .insert(1, MergeInputItem::Unrecognized("42".to_string()));

    let ctx = context(config, &install.logs(), &executor);
    create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    assert!(executor.calls()[0].ends_with(&strings(&[
        "-dFirstPage=2",
        "-dLastPage=4",
        "a.pdf",
        "b.pdf"
    ])));
    let log = fs::read_to_string(ctx.logger.log_path()).unwrap();
    assert!(log.contains("[WARNING] Unrecognized entry in merge inputs: 42"));
}

#[test]
fn log_records_command_then_output() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new().then(Ok(ProcessOutput::new(
        0,
        "Processing pages 1 through 3.",
        "",
    )));

    let ctx = context(merge_config(&install), &install.logs(), &executor);
    create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    let log = fs::read_to_string(ctx.logger.log_path()).unwrap();
    let command = log.find("$ ").unwrap();
    let output = log.find("Processing pages 1 through 3.").unwrap();
    let success = log.find("[SUCCESS] Merge OK → merged.pdf").unwrap();
    assert!(command < output && output < success);
    assert!(log.contains("=== Process Finished ==="));
}

#[test]
fn portuguese_document_runs_end_to_end() {
    let install = FakeInstall::new();
    let executor = ScriptedExecutor::new();

    let document = install.dir.path().join("pipeline.yaml");
    let yaml = format!(
        "caminhos:\n  ghostscript: \"{}\"\n\
         juntar:\n  ativado: true\n  arquivos:\n    - arquivo: a.pdf\n      pagina_inicial: 2\n      pagina_final: 4\n    - b.pdf\n  saida: merged.pdf\n\
         compactar:\n  ativado: true\n  saida: small.pdf\n\
         parametros:\n  compactacao: screen\n\
         pdfa:\n  ativado: true\n  saida: final.pdf\n",
        install.engine().display()
    );
    fs::write(&document, yaml).unwrap();

    let loaded = load_document(&document).unwrap();
    assert_eq!(loaded.config, full_config(&install));

    let ctx = context(loaded.config, &install.logs(), &executor);
    let report = create_standard_pipeline()
        .run(&ctx, &mut RunState::new())
        .unwrap();

    assert_eq!(report.messages.len(), 3);
    assert_eq!(executor.calls().len(), 3);
}
