use crate::infra::readiness_service;
use chrono::{DateTime, Local};
use clap::{ArgGroup, Args};
use council_readiness::config::AppConfig;
use council_readiness::error::AppError;
use council_readiness::readiness::{
    DepartmentMetric, ReadinessReport, ScoreRequest, ScoreWeights,
};
use council_readiness::roster::RosterImporter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["roster", "metrics"])))]
pub(crate) struct ReportArgs {
    /// Delegate roster CSV export
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Department metrics JSON (an array, or an object with `departments` and `weights`)
    #[arg(long)]
    pub(crate) metrics: Option<PathBuf>,
    /// Department registry CSV, so departments without registrations still appear
    #[arg(long)]
    pub(crate) departments: Option<PathBuf>,
    /// Eligibility rules YAML or JSON (overrides ELIGIBILITY_RULES_PATH)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Weight on the normalized minimum-gap sum
    #[arg(long)]
    pub(crate) w_min: Option<f64>,
    /// Weight on the normalized gender-gap sum
    #[arg(long)]
    pub(crate) w_gender: Option<f64>,
    /// Weight on the normalized buffer sum
    #[arg(long)]
    pub(crate) w_buffer: Option<f64>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl ReportArgs {
    fn apply_weights(&self, base: ScoreWeights) -> ScoreWeights {
        ScoreWeights::new(
            self.w_min.unwrap_or(base.w_min),
            self.w_gender.unwrap_or(base.w_gender),
            self.w_buffer.unwrap_or(base.w_buffer),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetricsFile {
    Departments(Vec<DepartmentMetric>),
    Request(ScoreRequest),
}

impl MetricsFile {
    fn into_parts(self) -> (Vec<DepartmentMetric>, Option<ScoreWeights>) {
        match self {
            MetricsFile::Departments(departments) => (departments, None),
            MetricsFile::Request(request) => (request.departments, request.weights),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReportSource {
    Roster,
    Metrics,
}

impl ReportSource {
    const fn label(self) -> &'static str {
        match self {
            Self::Roster => "delegate roster",
            Self::Metrics => "department metrics",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportOutput {
    pub(crate) generated_at: DateTime<Local>,
    pub(crate) source: ReportSource,
    #[serde(flatten)]
    pub(crate) report: ReadinessReport,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = readiness_service(&config.readiness, args.rules.as_deref())?;
    let default_weights = service.scorer().policy().weights();

    let (report, source) = match (&args.roster, &args.metrics) {
        (Some(path), _) => {
            let delegates = RosterImporter::delegates_from_path(path)?;
            let departments = match &args.departments {
                Some(path) => RosterImporter::departments_from_path(path)?,
                None => Vec::new(),
            };
            let weights = args.apply_weights(default_weights);
            let report = service.roster_report(&delegates, &departments, Some(weights))?;
            (report, ReportSource::Roster)
        }
        (None, Some(path)) => {
            let raw = std::fs::read_to_string(path)?;
            let (departments, file_weights) =
                serde_json::from_str::<MetricsFile>(&raw)?.into_parts();
            let weights = args.apply_weights(file_weights.unwrap_or(default_weights));
            let report = service.report(&departments, Some(weights))?;
            (report, ReportSource::Metrics)
        }
        (None, None) => {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "either --roster or --metrics is required",
            )))
        }
    };

    let output = ReportOutput {
        generated_at: Local::now(),
        source,
        report,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{output}");
    }

    Ok(())
}

impl fmt::Display for ReportOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = &self.report;
        let summary = &report.summary;

        writeln!(f, "Council readiness report")?;
        writeln!(
            f,
            "Generated {} from {}",
            self.generated_at.format("%Y-%m-%d %H:%M"),
            self.source.label()
        )?;
        writeln!(
            f,
            "Readiness score: {:.1} ({})",
            report.score.score, summary.band_label
        )?;
        let weights = report.score.components.weights;
        writeln!(
            f,
            "Weights: min gap {:.2} | gender gap {:.2} | buffer {:.2}",
            weights.w_min, weights.w_gender, weights.w_buffer
        )?;

        writeln!(f, "\nDepartments")?;
        for status in &report.departments {
            let labels: Vec<&str> = status.labels.iter().map(|label| label.label()).collect();
            writeln!(
                f,
                "- {} ({}): {}/{} qualified of {} registered | {:.0}% female | {}",
                status.metric.department_name,
                status.metric.department_code,
                status.metric.qualified,
                status.metric.target_min,
                status.metric.total_candidates,
                status.gender_ratio_female * 100.0,
                labels.join(", ")
            )?;
        }

        writeln!(
            f,
            "\nSummary: {} critical, {} at risk, {} meeting minimum, {} with gender gap",
            summary.critical_departments,
            summary.at_risk_departments,
            summary.strong_departments,
            summary.departments_with_gender_gap
        )?;

        let insights = &report.insights;
        if let Some(focus) = &insights.focus_department {
            writeln!(f, "Focus department: {focus}")?;
        }

        let actions = insights
            .critical_actions
            .iter()
            .chain(&insights.at_risk_watch)
            .chain(&insights.gender_actions);
        let mut actions = actions.peekable();
        if actions.peek().is_none() {
            writeln!(f, "\nActions: none")?;
        } else {
            writeln!(f, "\nActions")?;
            for action in actions {
                writeln!(f, "- {action}")?;
            }
        }

        for observation in &insights.observations {
            writeln!(f, "* {observation}")?;
        }

        Ok(())
    }
}
