use std::path::Path;

use resume_matcher::core::models::{DocumentKind, JobMatch, ParsedResume};
use resume_matcher::core::service::CoreService;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HarnessOutput {
    resume: ParsedResume,
    job_matches: Vec<JobMatch>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: match_harness <path-to-resume.pdf|docx> [job-id]");
        std::process::exit(1);
    }

    let path = &args[1];
    if !Path::new(path).exists() {
        eprintln!("File not found: {path}");
        std::process::exit(2);
    }

    let file_name = Path::new(path)
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("resume.pdf")
        .to_string();
    let content_type = DocumentKind::from_file_name(&file_name)
        .map(|kind| kind.content_type().to_string())
        .unwrap_or_default();

    let bytes = tokio::fs::read(path).await?;

    let core = CoreService::new().await?;
    let resume = core.parse_resume(file_name, content_type, bytes).await?;

    let skills: Vec<&str> = resume.profile.skills.iter().map(String::as_str).collect();
    let jobs = core.templates();
    let job_matches = core.suggest_matches(&skills, &jobs, args.get(2).map(String::as_str))?;

    let output = HarnessOutput {
        resume,
        job_matches,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
