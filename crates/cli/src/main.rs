use anyhow::{Context, Result};
use catalog::{
    INTEREST_QUESTION_COUNT, QuestionId, SubjectCatalog, interest_question, load_subject_catalog,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::CareerRecommendation;
use serde_json::{Value, json};
use server::RecommendationService;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CareerRecs - Career Recommendation Engine
#[derive(Parser)]
#[command(name = "career-recs")]
#[command(about = "Career recommendation engine backed by a trained classifier", long_about = None)]
struct Cli {
    /// Address of the career scoring service
    #[arg(long, default_value = "http://localhost:50051")]
    scorer_addr: String,

    /// Path to a subject catalog file (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get career recommendations for a student
    Recommend {
        /// JSON payload file with `subjects` and `interests`
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Subject name (repeatable); used when no payload file is given
        #[arg(long = "subject")]
        subjects: Vec<String>,

        /// Question id answered "yes" (repeatable); used when no payload file is given
        #[arg(long = "yes")]
        yes: Vec<QuestionId>,
    },

    /// List the known subject catalog
    Subjects,

    /// Show the interest survey questions
    Questions,

    /// Show the schema the classifier declares
    Schema {
        /// Emit the raw schema as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the subject catalog (built-in unless a file is given)
    let catalog = match &cli.catalog {
        Some(path) => Arc::new(
            load_subject_catalog(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        ),
        None => Arc::new(SubjectCatalog::default()),
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            payload,
            subjects,
            yes,
        } => handle_recommend(catalog, &cli.scorer_addr, payload, subjects, yes).await?,
        Commands::Subjects => handle_subjects(&catalog),
        Commands::Questions => handle_questions(),
        Commands::Schema { json } => handle_schema(catalog, &cli.scorer_addr, json).await?,
        Commands::Benchmark { requests } => {
            handle_benchmark(catalog, &cli.scorer_addr, requests).await?
        }
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<SubjectCatalog>,
    scorer_addr: &str,
    payload_path: Option<PathBuf>,
    subjects: Vec<String>,
    yes: Vec<QuestionId>,
) -> Result<()> {
    // Build the payload from a file or from the flags
    let payload: Value = match payload_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read payload from {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Payload {} is not valid JSON", path.display()))?
        }
        None => {
            let interests: serde_json::Map<String, Value> = yes
                .iter()
                .map(|id| (id.to_string(), Value::from("yes")))
                .collect();
            json!({ "subjects": subjects, "interests": interests })
        }
    };

    let service = RecommendationService::connect(catalog, scorer_addr).await?;
    let response = service.handle(&payload).await;

    if response.success {
        print_recommendations(&response.recommendations);
    } else {
        let message = response.error.unwrap_or_else(|| "Unknown error".to_string());
        println!("{} {}", "✗".red(), message.red());
    }
    Ok(())
}

/// Handle the 'subjects' command
fn handle_subjects(catalog: &SubjectCatalog) {
    println!(
        "{}",
        format!("Known subjects ({}):", catalog.len()).bold().blue()
    );
    for subject in catalog.subjects() {
        println!("{}{}", "• ".green(), subject);
    }
}

/// Handle the 'questions' command
fn handle_questions() {
    println!("{}", "Interest survey questions:".bold().blue());
    for id in 1..=INTEREST_QUESTION_COUNT {
        if let Some(text) = interest_question(id) {
            println!("{:>3}. {}", id.to_string().green(), text);
        }
    }
}

/// Handle the 'schema' command
async fn handle_schema(
    catalog: Arc<SubjectCatalog>,
    scorer_addr: &str,
    as_json: bool,
) -> Result<()> {
    let service = RecommendationService::connect(catalog, scorer_addr).await?;
    let schema = service.schema();

    if as_json {
        println!("{}", serde_json::to_string_pretty(schema)?);
        return Ok(());
    }

    println!("{}", "Model schema:".bold().blue());
    println!(
        "{}Feature columns: {}",
        "• ".cyan(),
        schema.num_features()
    );
    println!("{}Career classes: {}", "• ".cyan(), schema.num_classes());
    for class in schema.classes() {
        println!("    - {}", class);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog: Arc<SubjectCatalog>,
    scorer_addr: &str,
    requests: usize,
) -> Result<()> {
    let service = RecommendationService::connect(catalog.clone(), scorer_addr).await?;

    // Generate randomized payloads up front so only request handling is timed
    let payloads: Vec<Value> = (0..requests)
        .map(|_| {
            let subjects: Vec<&String> = catalog
                .subjects()
                .iter()
                .filter(|_| rand::random::<f32>() < 0.2)
                .collect();
            let interests: serde_json::Map<String, Value> = (1..=INTEREST_QUESTION_COUNT)
                .filter(|_| rand::random::<f32>() < 0.5)
                .map(|id| (id.to_string(), Value::from("yes")))
                .collect();
            json!({ "subjects": subjects, "interests": interests })
        })
        .collect();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for payload in payloads {
        let service = service.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            service.recommend(&payload).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    // Calculate and display statistics
    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[CareerRecommendation]) {
    println!("{}", "Your Top Career Matches:".bold().blue());
    for (rank, recommendation) in recommendations.iter().enumerate() {
        let percent = (recommendation.confidence * 100.0).round() as u32;
        println!(
            "{}. {} - {}% match (confidence {:.3})",
            (rank + 1).to_string().green(),
            format_career_name(&recommendation.career).bold(),
            percent,
            recommendation.confidence
        );
    }
}

/// Title-case a career label for display ("software engineer" -> "Software Engineer")
fn format_career_name(career: &str) -> String {
    career
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
