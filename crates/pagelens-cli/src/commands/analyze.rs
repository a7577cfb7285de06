use crate::OutputFormat;
use crate::orchestrator::run_analysis;
use anyhow::{Result, bail};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use pagelens_browser::{
    AuditConfig, Backend, BrowserSession, LocalScreenshotStore, SessionConfig, Viewport, auditor_for,
};
use pagelens_core::analysis::{Impact, Status};
use pagelens_core::priority::DEFAULT_TOP_FIXES;
use pagelens_core::screenshot::ScreenshotStore;
use pagelens_core::{AnalysisReport, AnalysisRequest, AnalysisResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Page to analyze (http or https)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Number of priority fixes to list
    #[arg(long, default_value_t = DEFAULT_TOP_FIXES)]
    pub top: usize,

    /// Browser viewport as WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    pub viewport: Viewport,

    /// Navigation timeout in seconds (clamped to 30-60)
    #[arg(long, value_name = "SECS", default_value_t = 45)]
    pub timeout: u64,

    /// Performance audit timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub audit_timeout: u64,

    /// Path to a Chrome or Chromium binary
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Path to the lighthouse binary used for local audits
    #[arg(long, env = "LIGHTHOUSE_PATH")]
    pub lighthouse_path: Option<PathBuf>,

    /// Deployment environment; "production" enables the remote browser
    #[arg(long, env = "PAGELENS_ENV")]
    pub environment: Option<String>,

    /// Token for the remote browser service
    #[arg(long, env = "BROWSERLESS_TOKEN", hide_env_values = true)]
    pub browserless_token: Option<String>,

    /// Base URL of the remote browser service
    #[arg(long, env = "BROWSERLESS_ENDPOINT")]
    pub browserless_endpoint: Option<String>,

    /// Save a viewport screenshot into this directory
    #[arg(long, value_name = "DIR")]
    pub screenshot: Option<PathBuf>,

    /// Show the browser window (local backend only)
    #[arg(long)]
    pub headful: bool,
}

impl AnalyzeArgs {
    pub fn backend(&self) -> Backend {
        Backend::select(
            self.environment.as_deref(),
            self.browserless_token.as_deref(),
            self.browserless_endpoint.as_deref(),
        )
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            viewport: self.viewport,
            backend: self.backend(),
            chrome_path: self.chrome_path.clone(),
            headless: !self.headful,
            ..SessionConfig::default()
        }
        .with_navigation_timeout(Duration::from_secs(self.timeout))
    }

    pub fn audit_config(&self) -> AuditConfig {
        AuditConfig {
            timeout: Duration::from_secs(self.audit_timeout),
            backend: self.backend(),
            viewport: self.viewport,
            lighthouse_path: self.lighthouse_path.clone(),
            chrome_path: self.chrome_path.clone(),
        }
    }
}

pub async fn execute(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let request = AnalysisRequest::parse(&args.url)?;
    tracing::info!("Analyzing {}", request);

    let spinner = spinner(format, &format!("Analyzing {}", request));
    let result = analyze(&request, &args).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = AnalysisReport::build(&request, result, args.top);
    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report),
    }

    if report.result.status == Status::Failed {
        bail!(
            "Analysis failed: {}",
            report.result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

/// Run the whole request; session and navigation failures fail the result
pub async fn analyze(request: &AnalysisRequest, args: &AnalyzeArgs) -> AnalysisResult {
    let auditor = match auditor_for(&args.audit_config()) {
        Ok(auditor) => auditor,
        Err(e) => {
            tracing::warn!("{}", e);
            std::sync::Arc::new(UnavailableAuditor(e.to_string()))
        }
    };

    let mut session = match BrowserSession::open(args.session_config()).await {
        Ok(session) => session,
        Err(e) => return AnalysisResult::failed(e.to_string()),
    };

    if let Err(e) = session.navigate(request.as_str()).await {
        // Navigation failure is fatal, but the browser still goes away
        log_close(session.close().await);
        return AnalysisResult::failed(e.to_string());
    }

    let page = session.page();
    let result = run_analysis(request, &page, auditor).await;

    if let Some(dir) = &args.screenshot {
        capture_screenshot(&session, request, dir).await;
    }

    log_close(session.close().await);
    result
}

/// Log an unclean shutdown; returns whether the browser closed cleanly
fn log_close(outcome: pagelens_browser::Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Browser did not close cleanly: {}", e);
            false
        }
    }
}

async fn capture_screenshot(session: &BrowserSession, request: &AnalysisRequest, dir: &Path) {
    let png = match session.screenshot().await {
        Ok(png) => png,
        Err(e) => {
            tracing::warn!("Screenshot capture failed: {}", e);
            return;
        }
    };

    match LocalScreenshotStore::new(dir).store(request.as_str(), png).await {
        Ok(record) => tracing::info!("Screenshot: {} ({} bytes)", record.blob_url, record.size),
        Err(e) => tracing::warn!("Screenshot not saved: {}", e),
    }
}

/// Stands in when no audit runner could be set up
struct UnavailableAuditor(String);

#[async_trait::async_trait]
impl pagelens_core::audit::PerformanceAuditor for UnavailableAuditor {
    async fn audit(&self, _url: &str) -> pagelens_core::Result<pagelens_core::audit::AuditReport> {
        Err(pagelens_core::Error::Audit(self.0.clone()))
    }
}

fn spinner(format: OutputFormat, message: &str) -> Option<ProgressBar> {
    if format != OutputFormat::Pretty || !console::Term::stderr().is_term() {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn score_style(score: u8) -> console::StyledObject<String> {
    let text = format!("{:>3}", score);
    match score {
        0..=49 => style(text).red().bold(),
        50..=69 => style(text).yellow().bold(),
        70..=84 => style(text).cyan(),
        _ => style(text).green(),
    }
}

fn impact_label(impact: Impact) -> console::StyledObject<&'static str> {
    match impact {
        Impact::High => style("HIGH").red(),
        Impact::Medium => style("MED ").yellow(),
        Impact::Low => style("LOW ").dim(),
    }
}

fn output_pretty(report: &AnalysisReport) {
    println!("\n{}", style("Page Analysis Report").bold().cyan());
    println!("{}", style("====================").cyan());
    println!("\n  URL:     {}", report.url);

    if report.result.status == Status::Failed {
        println!(
            "  Status:  {}",
            style(report.result.error.as_deref().unwrap_or("failed")).red()
        );
        println!();
        return;
    }

    println!("  Overall: {}/100", score_style(report.result.overall_score));

    if let Some(priority) = &report.priority {
        println!("\n{}", style("Priority:").bold());
        println!(
            "  {} {} ({}, {})",
            priority.icon,
            style(&priority.name).bold(),
            priority.score,
            priority.impact.as_str()
        );
        println!("  {}", priority.text);
    }

    for section in &report.sections {
        println!(
            "\n{} {} {}/100",
            section.section.icon(),
            style(&section.name).bold(),
            score_style(section.score)
        );

        for pair in &section.issue_fixes {
            match (&pair.issue, &pair.fix) {
                (Some(issue), Some(fix)) => {
                    println!("  {} {}", impact_label(pair.impact), issue);
                    println!("       {} {}", style("->").dim(), fix);
                }
                (Some(issue), None) => println!("  {} {}", impact_label(pair.impact), issue),
                (None, Some(fix)) => println!("  {} {}", style("TIP ").dim(), fix),
                (None, None) => {}
            }
        }

        for recommendation in section.recommendations.iter().take(3) {
            println!("  {} {}", style("  * ").dim(), recommendation.text);
        }
    }

    if !report.top_fixes.is_empty() {
        println!("\n{}", style("Top Fixes:").bold());
        for (i, fix) in report.top_fixes.iter().enumerate() {
            println!(
                "  {}. [{}] {}: {}",
                i + 1,
                fix.impact.as_str(),
                fix.name,
                fix.fix
            );
        }
    }

    println!();
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) {
    println!("Section,Score,Issues,Recommendations");
    for (section, result) in report.result.sections() {
        println!(
            "{},{},{},{}",
            section.key(),
            result.score,
            result.issues.len(),
            report
                .section(section)
                .map(|s| s.recommendations.len())
                .unwrap_or(0)
        );
    }
    println!("Overall,{},,", report.result.overall_score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: AnalyzeArgs,
    }

    fn parse(argv: &[&str]) -> AnalyzeArgs {
        let mut full = vec!["pagelens"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["https://example.com"]);
        assert_eq!(args.top, 3);
        assert_eq!(args.viewport, Viewport { width: 1920, height: 1080 });

        let session = args.session_config();
        assert_eq!(session.navigation_timeout, Duration::from_secs(45));
        assert!(session.headless);
        assert_eq!(args.audit_config().timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_timeout_clamped_and_viewport_parsed() {
        let args = parse(&["https://example.com", "--timeout", "120", "--viewport", "1280x720"]);
        assert_eq!(args.session_config().navigation_timeout, Duration::from_secs(60));
        assert_eq!(args.session_config().viewport, Viewport { width: 1280, height: 720 });
    }

    #[test]
    fn test_close_errors_are_reported() {
        assert!(log_close(Ok(())));
        assert!(!log_close(Err(pagelens_browser::Error::Browser(
            "connection reset".to_string()
        ))));
    }

    #[test]
    fn test_backend_from_flags() {
        let args = parse(&[
            "https://example.com",
            "--environment",
            "production",
            "--browserless-token",
            "tok",
        ]);
        assert!(args.backend().is_remote());

        let args = parse(&["https://example.com", "--environment", "staging", "--browserless-token", "tok"]);
        assert_eq!(args.backend(), Backend::Local);
    }
}
