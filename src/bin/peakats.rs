//! Command-line front end for the recruiter and client dashboards.
//!
//! Usage:
//!
//! ```text
//! peakats [--database-url URL] [--client-registry DIRS] <command> [args]
//! ```
//!
//! Commands read from the candidate store configured through
//! `SUPABASE_DB_URL`. Log verbosity follows `RUST_LOG`.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr, bail};
use mockable::{Clock, DefaultClock};
use peakats::candidate::{
    adapters::{
        postgres::{PostgresCandidateStore, build_pool},
        registry_file::FileClientRegistry,
    },
    domain::{
        CandidateDomainError, CandidateFilter, CandidateId, CandidateRecord, ClientId,
        EditedRow, FormCompletion, FormKind, FormToggles, ParsePipelineStatusError,
        PipelineStatus, ScoreRange, SnapshotScope, StatusField, StatusToken, export_csv,
        export_file_name, format_average,
    },
    ports::CandidateStore,
    services::{ClientDashboard, RecruiterDashboard, ReconciliationService, ViewState},
};
use peakats::config::{RegistryConfig, StoreConfig};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Store = PostgresCandidateStore;
type Service = ReconciliationService<Store, DefaultClock>;

#[derive(Parser, Debug)]
#[command(name = "peakats")]
#[command(about = "Candidate reconciliation and filtering for recruiting dashboards")]
struct Cli {
    #[command(flatten)]
    store: StoreConfig,

    #[command(flatten)]
    registry: RegistryConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show recruiter summary figures and the filtered candidates
    Summary {
        #[command(flatten)]
        filter: FilterArgs,

        /// Open this candidate in the detail view
        #[arg(long)]
        select: Option<i64>,
    },
    /// Write the filtered candidates as CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Directory to write the export file into; stdout when omitted
        #[arg(long)]
        output_dir: Option<Utf8PathBuf>,
    },
    /// Show the dashboard for one client
    Client {
        /// Client identifier from the client registry
        #[arg(long)]
        client: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write the editable rows as JSON, the base for a later `reconcile`
    Snapshot {
        /// File to write the rows to; stdout when omitted
        #[arg(long)]
        output: Option<Utf8PathBuf>,
    },
    /// Apply bulk edits, diffed against the rows the editor started from
    Reconcile {
        /// File written by `snapshot` when editing began
        #[arg(long)]
        base: Utf8PathBuf,
        /// File holding the edited rows
        edits: Utf8PathBuf,
    },
    /// Clear the vendor change flag on a candidate
    MarkReviewed {
        /// Candidate identifier
        id: i64,
    },
    /// Set a candidate's pipeline status
    SetStatus {
        /// Candidate identifier
        id: i64,
        /// New, contacted, scheduled, hired, or rejected
        #[arg(value_parser = parse_pipeline_status)]
        status: PipelineStatus,
    },
    /// Mark a compliance form as uploaded or missing
    SetForm {
        /// Candidate identifier
        id: i64,
        /// Form kind: gcic (g) or mec (m)
        #[arg(value_parser = parse_form_kind)]
        form: FormKind,
        /// Whether the form is uploaded
        #[arg(action = clap::ArgAction::Set)]
        uploaded: bool,
    },
    /// Save recruiter notes, clearing the vendor change flag
    SaveNotes {
        /// Candidate identifier
        id: i64,
        /// Note text
        notes: String,
    },
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Case-insensitive search across name, email, phone, and client
    #[arg(long)]
    search: Option<String>,

    /// Restrict to one client
    #[arg(long = "filter-client")]
    client: Option<String>,

    /// Lowest score shown
    #[arg(long, default_value_t = ScoreRange::SLIDER_MIN)]
    min_score: f64,

    /// Highest score shown
    #[arg(long, default_value_t = ScoreRange::SLIDER_MAX)]
    max_score: f64,

    /// Pipeline status
    #[arg(long, value_parser = parse_pipeline_status)]
    status: Option<PipelineStatus>,

    /// Exact profile status
    #[arg(long)]
    profile_status: Option<String>,

    /// Exact background status
    #[arg(long)]
    background_status: Option<String>,

    /// Exact drug test status
    #[arg(long)]
    drug_test_status: Option<String>,

    /// Exact legacy order status
    #[arg(long)]
    order_status: Option<String>,

    /// Only candidates with an unreviewed vendor change
    #[arg(long)]
    flagged_only: bool,

    /// Enabled form toggles
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = FormToggleArg::ALL
    )]
    forms: Vec<FormToggleArg>,

    /// Required combination of uploaded forms
    #[arg(long, value_enum, default_value_t = CompletionArg::Any)]
    completion: CompletionArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormToggleArg {
    HasGcic,
    MissingGcic,
    HasMec,
    MissingMec,
}

impl FormToggleArg {
    const ALL: [Self; 4] = [
        Self::HasGcic,
        Self::MissingGcic,
        Self::HasMec,
        Self::MissingMec,
    ];
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum CompletionArg {
    #[default]
    Any,
    Both,
    GcicOnly,
    MecOnly,
    Neither,
}

impl From<CompletionArg> for FormCompletion {
    fn from(value: CompletionArg) -> Self {
        match value {
            CompletionArg::Any => Self::Any,
            CompletionArg::Both => Self::Both,
            CompletionArg::GcicOnly => Self::GcicOnly,
            CompletionArg::MecOnly => Self::MecOnly,
            CompletionArg::Neither => Self::Neither,
        }
    }
}

impl FilterArgs {
    fn to_filter(&self) -> Result<CandidateFilter> {
        let mut filter = CandidateFilter::new()
            .with_score_range(ScoreRange::new(self.min_score, self.max_score)?)
            .with_form_toggles(FormToggles {
                has_gcic: self.forms.contains(&FormToggleArg::HasGcic),
                missing_gcic: self.forms.contains(&FormToggleArg::MissingGcic),
                has_mec: self.forms.contains(&FormToggleArg::HasMec),
                missing_mec: self.forms.contains(&FormToggleArg::MissingMec),
            })
            .with_form_completion(self.completion.into());
        if let Some(search) = &self.search {
            filter = filter.with_search(search);
        }
        if let Some(client) = &self.client {
            filter = filter.with_client(ClientId::new(client.as_str())?);
        }
        if let Some(status) = self.status {
            filter = filter.with_pipeline_status(status);
        }
        for (field, value) in [
            (StatusField::Profile, &self.profile_status),
            (StatusField::Background, &self.background_status),
            (StatusField::DrugTest, &self.drug_test_status),
            (StatusField::Order, &self.order_status),
        ] {
            if let Some(token) = value {
                filter = filter.with_status(field, StatusToken::new(token));
            }
        }
        if self.flagged_only {
            filter = filter.flagged_only();
        }
        Ok(filter)
    }
}

fn parse_pipeline_status(raw: &str) -> Result<PipelineStatus, ParsePipelineStatusError> {
    PipelineStatus::try_from(raw)
}

fn parse_form_kind(raw: &str) -> Result<FormKind, CandidateDomainError> {
    FormKind::try_from(raw)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "peakats=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    cli.store.validate()?;
    let store = Arc::new(PostgresCandidateStore::new(build_pool(&cli.store)?));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;
    runtime.block_on(run(cli.command, &cli.registry, store))
}

async fn run(command: Command, registry: &RegistryConfig, store: Arc<Store>) -> Result<()> {
    let service: Service = ReconciliationService::new(Arc::clone(&store), Arc::new(DefaultClock));
    let mut out = io::stdout().lock();

    match command {
        Command::Summary { filter, select } => {
            let state = select.map_or_else(ViewState::default, |id| {
                ViewState::default().select(CandidateId::new(id))
            });
            let view = RecruiterDashboard::new(store)
                .render(&filter.to_filter()?, state)
                .await;
            if let Some(err) = &view.unavailable {
                writeln!(out, "store unavailable: {err}")?;
            }
            writeln!(
                out,
                "total={} showing={} average_score={} flagged={}",
                view.summary.total,
                view.summary.showing,
                format_average(view.summary.average_score),
                view.summary.flagged
            )?;
            write_records(&mut out, &view.visible)?;
            if let Some(detail) = &view.detail {
                write_detail(&mut out, detail)?;
            }
        }
        Command::Export { filter, output_dir } => {
            let view = RecruiterDashboard::new(store)
                .render(&filter.to_filter()?, ViewState::default())
                .await;
            if let Some(err) = view.unavailable {
                bail!("cannot export: {err}");
            }
            let csv = export_csv(&view.visible);
            match output_dir {
                Some(dir_path) => {
                    let file_name = export_file_name(&DefaultClock.local());
                    let dir = Dir::open_ambient_dir(&dir_path, ambient_authority())
                        .wrap_err_with(|| format!("failed to open {dir_path}"))?;
                    dir.write(&file_name, csv)
                        .wrap_err_with(|| format!("failed to write {file_name}"))?;
                    info!(
                        path = %dir_path.join(&file_name),
                        rows = view.visible.len(),
                        "wrote export"
                    );
                    writeln!(out, "{}", dir_path.join(&file_name))?;
                }
                None => out.write_all(csv.as_bytes())?,
            }
        }
        Command::Client { client, filter } => {
            let client_registry = Arc::new(FileClientRegistry::load(&registry.search_dirs));
            let report = ClientDashboard::new(store, client_registry)
                .open(client.as_deref(), &filter.to_filter()?)
                .await
                .into_report()?;
            writeln!(out, "{}", report.title)?;
            if let Some(err) = &report.unavailable {
                writeln!(out, "store unavailable: {err}")?;
            }
            writeln!(
                out,
                "total={} background_cleared={} drug_passed={} forms_complete={}",
                report.summary.total,
                report.summary.background_cleared,
                report.summary.drug_passed,
                report.summary.forms_complete
            )?;
            write_records(&mut out, &report.visible)?;
        }
        Command::Snapshot { output } => {
            let snapshot = store.load_snapshot(&SnapshotScope::All).await?;
            let rows: Vec<EditedRow> = snapshot.iter().map(EditedRow::from_record).collect();
            let json = serde_json::to_string_pretty(&rows)?;
            match output {
                Some(path) => {
                    let (dir, file_name) = open_parent(&path)?;
                    dir.write(file_name, json)
                        .wrap_err_with(|| format!("failed to write {path}"))?;
                    info!(path = %path, rows = rows.len(), "wrote editable snapshot");
                }
                None => writeln!(out, "{json}")?,
            }
        }
        Command::Reconcile { base, edits } => {
            let base_rows = read_rows(&base)?;
            let edited = read_rows(&edits)?;
            let report = service.reconcile_rows(&base_rows, &edited).await;
            writeln!(out, "{} changes applied", report.changes_applied())?;
            for failure in &report.failed {
                writeln!(out, "failed: {failure}")?;
            }
            if !report.is_complete() {
                bail!("{} field writes failed", report.failed.len());
            }
        }
        Command::MarkReviewed { id } => {
            let snapshot = service
                .mark_reviewed(CandidateId::new(id), &SnapshotScope::All)
                .await?;
            write_reloaded(&mut out, CandidateId::new(id), &snapshot)?;
        }
        Command::SetStatus { id, status } => {
            let snapshot = service
                .update_status(CandidateId::new(id), status, &SnapshotScope::All)
                .await?;
            write_reloaded(&mut out, CandidateId::new(id), &snapshot)?;
        }
        Command::SetForm { id, form, uploaded } => {
            let snapshot = service
                .set_form(CandidateId::new(id), form, uploaded, &SnapshotScope::All)
                .await?;
            write_reloaded(&mut out, CandidateId::new(id), &snapshot)?;
        }
        Command::SaveNotes { id, notes } => {
            let snapshot = service
                .save_notes(CandidateId::new(id), &notes, &SnapshotScope::All)
                .await?;
            write_reloaded(&mut out, CandidateId::new(id), &snapshot)?;
        }
    }
    Ok(())
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str)> {
    let Some(file_name) = path.file_name() else {
        bail!("{path} does not name a file");
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("failed to open {parent}"))?;
    Ok((dir, file_name))
}

fn read_rows(path: &Utf8Path) -> Result<Vec<EditedRow>> {
    let (dir, file_name) = open_parent(path)?;
    let contents = dir
        .read_to_string(file_name)
        .wrap_err_with(|| format!("failed to read {path}"))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("malformed edited rows in {path}"))
}

fn write_records(out: &mut impl Write, records: &[CandidateRecord]) -> io::Result<()> {
    for record in records {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}{}{}",
            record.id(),
            record.client_id().as_str(),
            record.profile().full_name(),
            record.assessment().score,
            record.statuses().pipeline,
            form_marker(record, FormKind::Gcic),
            form_marker(record, FormKind::Mec),
            if record.fadv().is_flagged() { "\tFLAGGED" } else { "" },
        )?;
    }
    Ok(())
}

fn write_detail(out: &mut impl Write, record: &CandidateRecord) -> io::Result<()> {
    let statuses = record.statuses();
    writeln!(out, "--- {} ({})", record.profile().full_name(), record.id())?;
    writeln!(out, "email: {}", record.profile().email)?;
    writeln!(out, "phone: {}", record.profile().phone)?;
    writeln!(out, "profile: {}", statuses.profile)?;
    writeln!(out, "background: {} {}", statuses.background, statuses.background_id)?;
    writeln!(out, "drug test: {} {}", statuses.drug_test, statuses.drug_test_id)?;
    writeln!(out, "notes: {}", record.recruiter_notes())?;
    if record.fadv().is_flagged() {
        let reported = record
            .fadv()
            .last_updated()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        writeln!(out, "vendor change: {} {reported}", record.fadv().details())?;
    }
    Ok(())
}

fn write_reloaded(
    out: &mut impl Write,
    id: CandidateId,
    snapshot: &[CandidateRecord],
) -> io::Result<()> {
    match snapshot.iter().find(|record| record.id() == id) {
        Some(record) => write_detail(out, record),
        None => writeln!(out, "candidate {id} not in reloaded snapshot"),
    }
}

fn form_marker(record: &CandidateRecord, kind: FormKind) -> &'static str {
    if record.forms().get(kind).is_uploaded() {
        kind.short_label()
    } else {
        "-"
    }
}
