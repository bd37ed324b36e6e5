use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use patent_report::report::{ReportKind, ReportStructurer};
use tracing::{info, warn};

use crate::cli::BatchArgs;
use crate::model::{BatchEntry, BatchManifest};
use crate::util::{
    decode_lossy, ensure_directory, now_utc_string, sha256_hex, utc_compact_string,
    write_json_pretty,
};

const INPUT_EXTENSIONS: &[&str] = &["txt", "md"];
const MANIFEST_FILENAME: &str = "batch_manifest.json";

pub fn run(args: BatchArgs) -> Result<()> {
    let structurer = ReportStructurer::new(args.tuning.to_options())?;
    let kind = ReportKind::from(args.report_type);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("reports"));

    info!(
        input_dir = %args.input_dir.display(),
        output_dir = %output_dir.display(),
        report_type = kind.as_str(),
        "starting batch"
    );

    let manifest = build_manifest(&structurer, kind, &args.input_dir, &output_dir, args.dry_run)?;

    if args.dry_run {
        info!(
            file_count = manifest.file_count,
            degraded = manifest.degraded_count,
            "batch dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = output_dir.join(MANIFEST_FILENAME);
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote batch manifest");
    info!(
        file_count = manifest.file_count,
        degraded = manifest.degraded_count,
        "batch completed"
    );

    Ok(())
}

pub fn build_manifest(
    structurer: &ReportStructurer,
    kind: ReportKind,
    input_dir: &Path,
    output_dir: &Path,
    dry_run: bool,
) -> Result<BatchManifest> {
    let started = Utc::now();

    let mut input_paths = discover_inputs(input_dir)?;
    input_paths.sort();

    if input_paths.is_empty() {
        bail!("no .txt or .md files found in {}", input_dir.display());
    }

    if !dry_run {
        ensure_directory(output_dir)?;
    }

    let mut files = Vec::with_capacity(input_paths.len());
    for path in input_paths {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))?;

        let bytes =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let text = decode_lossy(&bytes);
        let result = structurer.structure(&text, kind);

        if let Some(diagnostic) = &result.diagnostic {
            warn!(
                file = %filename,
                kind = diagnostic.kind.as_str(),
                "structuring degraded"
            );
        }

        let output_path = if dry_run {
            None
        } else {
            let output_path = output_dir.join(report_filename(&path));
            write_json_pretty(&output_path, &result)?;
            Some(output_path.display().to_string())
        };

        files.push(BatchEntry {
            filename,
            sha256: sha256_hex(&bytes),
            input_chars: text.chars().count(),
            output_path,
            section_count: result.quality_metrics.section_count,
            total_content_length: result.quality_metrics.total_content_length,
            strategy: result.quality_metrics.strategy.as_str().to_string(),
            advisory_appended: result.quality_metrics.advisory_appended,
            diagnostic: result.diagnostic_kind().map(|value| value.as_str().to_string()),
        });
    }

    let degraded_count = files
        .iter()
        .filter(|entry| entry.diagnostic.is_some())
        .count();

    Ok(BatchManifest {
        manifest_version: 1,
        run_id: format!("batch-{}", utc_compact_string(started)),
        generated_at: now_utc_string(),
        source_directory: input_dir.display().to_string(),
        output_directory: output_dir.display().to_string(),
        report_type: kind.as_str().to_string(),
        file_count: files.len(),
        degraded_count,
        files,
    })
}

fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    let entries = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read {}", input_dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", input_dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let is_input = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                INPUT_EXTENSIONS
                    .iter()
                    .any(|candidate| ext.eq_ignore_ascii_case(candidate))
            })
            .unwrap_or(false);

        if is_input {
            inputs.push(path);
        }
    }

    Ok(inputs)
}

fn report_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    format!("{stem}.report.json")
}

#[cfg(test)]
mod tests {
    use patent_report::report::StructureOptions;

    use super::*;

    fn structurer() -> ReportStructurer {
        ReportStructurer::new(StructureOptions::default()).expect("default rules should compile")
    }

    #[test]
    fn build_manifest_structures_each_text_file() {
        let input = tempfile::tempdir().expect("tempdir should be created");
        let output = input.path().join("reports");
        fs::write(
            input.path().join("a.txt"),
            "## 개요\n이 특허는 배터리 셀의 전압 편차를 보정합니다.",
        )
        .expect("fixture should be written");
        fs::write(input.path().join("b.md"), "").expect("fixture should be written");
        fs::write(input.path().join("ignored.json"), "{}").expect("fixture should be written");

        let manifest = build_manifest(
            &structurer(),
            ReportKind::MarketAnalysis,
            input.path(),
            &output,
            false,
        )
        .expect("batch should succeed");

        assert_eq!(manifest.file_count, 2);
        assert_eq!(manifest.degraded_count, 1);
        assert_eq!(manifest.report_type, "market_analysis");
        assert_eq!(manifest.files[0].filename, "a.txt");
        assert_eq!(manifest.files[0].strategy, "headings");
        assert_eq!(manifest.files[1].filename, "b.md");
        assert_eq!(manifest.files[1].diagnostic.as_deref(), Some("EMPTY_INPUT"));
        assert_eq!(manifest.files[1].sha256.len(), 64);

        let raw = fs::read_to_string(output.join("a.report.json")).expect("report should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("report should be json");
        assert_eq!(value["sections"][0]["title"], "개요");
        assert!(output.join("b.report.json").exists());
    }

    #[test]
    fn build_manifest_dry_run_writes_nothing() {
        let input = tempfile::tempdir().expect("tempdir should be created");
        let output = input.path().join("reports");
        fs::write(input.path().join("a.txt"), "본문").expect("fixture should be written");

        let manifest = build_manifest(
            &structurer(),
            ReportKind::Unspecified,
            input.path(),
            &output,
            true,
        )
        .expect("dry run should succeed");

        assert_eq!(manifest.file_count, 1);
        assert!(manifest.files[0].output_path.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn build_manifest_rejects_directories_without_inputs() {
        let input = tempfile::tempdir().expect("tempdir should be created");
        let error = build_manifest(
            &structurer(),
            ReportKind::Unspecified,
            input.path(),
            &input.path().join("reports"),
            true,
        )
        .expect_err("empty directory should fail");

        assert!(error.to_string().contains("no .txt or .md files"));
    }
}
