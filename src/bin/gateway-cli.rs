use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use course_gateway::model::{CourseInfoQuery, RagQuery, RecommendQuery, UserPreference};
use course_gateway::preference::SESSION_HEADER;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the course gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Use a private preference slot instead of the shared one.
    #[arg(short, long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness check
    Health,
    /// Check that the planner and RAG services answer
    Ready,
    /// Submit a scheduling preference
    Prefs {
        #[arg(long, default_value_t = 0)]
        x: i64,
        #[arg(long, default_value_t = 0)]
        y: i64,
        #[arg(long, default_value_t = 0)]
        z: i64,
        #[arg(long, default_value_t = 0)]
        min_credits: i64,
        #[arg(long, default_value_t = 0)]
        max_credits: i64,
        /// Blacklisted periods as DAY:P1,P2 (repeatable), e.g. --block M:1,2
        #[arg(long = "block", value_parser = parse_block)]
        blocks: Vec<(String, Vec<i64>)>,
    },
    /// Solve the submitted preference
    Solve,
    /// Ask the course assistant a question
    Ask {
        question: String,
        #[arg(long)]
        max_results: Option<i64>,
    },
    /// Look up a course by code
    Course { code: String },
    /// Recommend courses
    Recommend {
        #[arg(long = "completed")]
        completed_courses: Vec<String>,
        #[arg(long = "interest")]
        interests: Vec<String>,
        #[arg(long)]
        max_credits: Option<i64>,
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        level: Option<String>,
    },
}

fn parse_block(raw: &str) -> Result<(String, Vec<i64>), String> {
    let (day, periods) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected DAY:P1,P2, got '{raw}'"))?;
    let periods = periods
        .split(',')
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.trim().parse::<i64>().map_err(|e| format!("bad period '{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((day.trim().to_string(), periods))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(session) = &cli.session {
        headers.insert(SESSION_HEADER, HeaderValue::from_str(session)?);
    }

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/health", cli.url)).send().await?,
        Commands::Ready => client.get(format!("{}/health/ready", cli.url)).send().await?,
        Commands::Prefs {
            x,
            y,
            z,
            min_credits,
            max_credits,
            blocks,
        } => {
            let mut blacklisted_periods = BTreeMap::new();
            for (day, periods) in blocks {
                blacklisted_periods
                    .entry(day)
                    .or_insert_with(Vec::new)
                    .extend(periods);
            }
            let pref = UserPreference {
                x,
                y,
                z,
                min_credits,
                max_credits,
                blacklisted_periods,
            };
            client
                .post(format!("{}/api/userpreference/", cli.url))
                .headers(headers)
                .json(&pref)
                .send()
                .await?
        }
        Commands::Solve => {
            client
                .post(format!("{}/api/solve/", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Ask {
            question,
            max_results,
        } => {
            client
                .post(format!("{}/api/rag/query/", cli.url))
                .json(&RagQuery {
                    question,
                    max_results,
                })
                .send()
                .await?
        }
        Commands::Course { code } => {
            client
                .post(format!("{}/api/rag/course/", cli.url))
                .json(&CourseInfoQuery { course_code: code })
                .send()
                .await?
        }
        Commands::Recommend {
            completed_courses,
            interests,
            max_credits,
            term,
            level,
        } => {
            client
                .post(format!("{}/api/rag/recommend/", cli.url))
                .json(&RecommendQuery {
                    completed_courses,
                    interests,
                    max_credits,
                    term,
                    level,
                })
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
    }
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text.trim_end()),
    }
    Ok(())
}
