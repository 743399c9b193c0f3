use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{AvailabilityStatus, Candidate, EmploymentType, Stage, WorkPermitStatus};
use rand::Rng;
use recruitment::Transition;
use search::{CandidateQuery, FilterCriteria, JobQuery};
use server::{InMemoryActor, MarketplaceService, SearchHit};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// classmatch - teacher recruitment marketplace
#[derive(Parser)]
#[command(name = "classmatch")]
#[command(
    about = "Search teachers, manage talent pools and run hiring pipelines",
    long_about = None
)]
struct Cli {
    /// Path to the marketplace snapshot directory
    #[arg(short, long, default_value = "data/sample")]
    data_dir: PathBuf,

    /// Do not write changes back to the snapshot
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank visible teachers against search criteria
    Search {
        /// Subjects, any of which must be taught (repeat or comma-separate)
        #[arg(long = "subject", value_delimiter = ',')]
        subjects: Vec<String>,

        /// Grade levels, any of which must be covered
        #[arg(long = "grade", value_delimiter = ',')]
        grades: Vec<String>,

        /// Minimum years of experience
        #[arg(long, default_value = "0")]
        min_experience: u32,

        #[arg(long)]
        work_permit: Option<WorkPermitStatus>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        availability: Option<AvailabilityStatus>,

        #[arg(long)]
        employment_type: Option<EmploymentType>,

        /// Number of results to return
        #[arg(long)]
        limit: Option<usize>,

        /// Show the matched/total criteria behind each score
        #[arg(long)]
        explain: bool,
    },

    /// Browse the candidate database (hidden profiles included)
    Candidates {
        /// Text matched against name, subjects and country
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        status: Option<AvailabilityStatus>,

        #[arg(long)]
        country: Option<String>,
    },

    /// Show one teacher profile
    Candidate {
        #[arg(long)]
        id: String,
    },

    /// Browse the job board
    Jobs {
        /// Text matched against title, overview and subjects
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        subject: Option<String>,
    },

    /// List talent pools, or the members of one pool
    Pools {
        #[arg(long)]
        id: Option<String>,
    },

    /// Show the pipeline board
    Pipeline {
        /// Job id, or part of a job title
        #[arg(long)]
        job: Option<String>,
    },

    /// Move a pipeline entry to the next stage
    Advance {
        #[arg(long)]
        entry: String,
    },

    /// Move a pipeline entry back one stage
    Regress {
        #[arg(long)]
        entry: String,
    },

    /// Reject a pipeline entry
    Reject {
        #[arg(long)]
        entry: String,
    },

    /// Add a teacher to a job's pipeline
    AddToPipeline {
        #[arg(long)]
        candidate: String,

        #[arg(long)]
        job: String,
    },

    /// Change a teacher's availability status
    SetAvailability {
        #[arg(long)]
        candidate: String,

        #[arg(long)]
        status: AvailabilityStatus,
    },

    /// Roster analytics
    Stats,

    /// Run random searches to test performance
    Benchmark {
        /// Number of searches to run
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent searches
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

type Service = MarketplaceService<InMemoryActor>;

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

    println!("Loading marketplace snapshot from {}...", cli.data_dir.display());
    let start = Instant::now();
    let actor = Arc::new(
        InMemoryActor::load(&cli.data_dir).context("Failed to load marketplace snapshot")?,
    );
    println!("{} Loaded snapshot in {:?}", "✓".green(), start.elapsed());

    let service = MarketplaceService::new(actor.clone());

    // Dispatch to appropriate command handler
    let changed = match cli.command {
        Commands::Search {
            subjects,
            grades,
            min_experience,
            work_permit,
            country,
            availability,
            employment_type,
            limit,
            explain,
        } => {
            let criteria = FilterCriteria {
                subjects: subjects.into_iter().collect(),
                grades: grades.into_iter().collect(),
                min_experience,
                work_permit,
                country,
                availability,
                employment_type,
            };
            handle_search(&service, criteria, limit, explain).await?;
            false
        }
        Commands::Candidates {
            query,
            status,
            country,
        } => {
            let query = CandidateQuery {
                text: query,
                availability: status,
                country,
            };
            handle_candidates(&service, &query).await?;
            false
        }
        Commands::Candidate { id } => {
            print_profile(&service.candidate(&id).await?);
            false
        }
        Commands::Jobs {
            query,
            country,
            subject,
        } => {
            let query = JobQuery {
                text: query,
                country,
                subject,
            };
            handle_jobs(&service, &query).await?;
            false
        }
        Commands::Pools { id } => {
            handle_pools(&service, id.as_deref()).await?;
            false
        }
        Commands::Pipeline { job } => {
            handle_pipeline(&service, job.as_deref()).await?;
            false
        }
        Commands::Advance { entry } => {
            report_transition(&entry, "advance", service.advance(&entry).await?)
        }
        Commands::Regress { entry } => {
            report_transition(&entry, "regress", service.regress(&entry).await?)
        }
        Commands::Reject { entry } => {
            report_transition(&entry, "reject", service.reject(&entry).await?)
        }
        Commands::AddToPipeline { candidate, job } => {
            let entry = service.add_to_pipeline(&candidate, &job).await?;
            println!(
                "{} Added {} to {} as {} ({})",
                "✓".green(),
                candidate,
                job,
                entry.id.bold(),
                entry.stage
            );
            true
        }
        Commands::SetAvailability { candidate, status } => {
            service.set_availability(&candidate, status).await?;
            println!("{} {} is now {}", "✓".green(), candidate, status_label(status));
            true
        }
        Commands::Stats => {
            handle_stats(&service).await?;
            false
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            handle_benchmark(&service, requests, concurrent).await?;
            false
        }
    };

    if changed {
        save_snapshot(&actor, &cli.data_dir, cli.dry_run).await?;
    }

    Ok(())
}

async fn save_snapshot(actor: &InMemoryActor, data_dir: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        println!("{}", "Dry run: snapshot left unchanged".yellow());
        return Ok(());
    }
    actor
        .save(data_dir)
        .await
        .context("Failed to save marketplace snapshot")?;
    info!("Snapshot saved to {}", data_dir.display());
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(
    service: &Service,
    criteria: FilterCriteria,
    limit: Option<usize>,
    explain: bool,
) -> Result<()> {
    let active = criteria.active_filter_count();
    let criteria_unconstrained = criteria.is_unconstrained();
    let hits = service.search_candidates(criteria, limit).await?;

    println!(
        "{}",
        format!("{} matching teachers ({} active filters):", hits.len(), active)
            .bold()
            .blue()
    );
    if criteria_unconstrained {
        println!("{}", "No filters set: every visible teacher scores 100".dimmed());
    }
    print_hits(&hits, explain);
    Ok(())
}

/// Handle the 'candidates' command
async fn handle_candidates(service: &Service, query: &CandidateQuery) -> Result<()> {
    let candidates = service.find_candidates(query).await?;

    println!("{}", format!("{} candidates:", candidates.len()).bold().blue());
    for candidate in &candidates {
        let hidden = if candidate.profile_visible {
            String::new()
        } else {
            format!(" {}", "[hidden]".dimmed())
        };
        println!(
            "{}: {} - {} | {} | {}{}",
            candidate.id,
            candidate.name.bold(),
            candidate.subjects.join(", "),
            candidate.country,
            status_label(candidate.availability_status),
            hidden
        );
    }
    Ok(())
}

/// Handle the 'jobs' command
async fn handle_jobs(service: &Service, query: &JobQuery) -> Result<()> {
    let jobs = service.find_jobs(query).await?;

    println!("{}", format!("{} jobs:", jobs.len()).bold().blue());
    for job in &jobs {
        println!(
            "{}: {} [{}] {}, {} - {}",
            job.id,
            job.title.bold(),
            job.status,
            job.region,
            job.country,
            job.subjects_needed.join(", ")
        );
        if !job.role_overview.is_empty() {
            println!("   {}", job.role_overview.dimmed());
        }
    }
    Ok(())
}

/// Handle the 'pools' command
async fn handle_pools(service: &Service, pool_id: Option<&str>) -> Result<()> {
    match pool_id {
        Some(id) => {
            let (pool, members) = service.pool_members(id).await?;
            println!(
                "{}",
                format!("{} ({} members)", pool.name, members.len()).bold().blue()
            );
            if !pool.description.is_empty() {
                println!("{}", pool.description.dimmed());
            }
            for member in &members {
                println!(
                    "  {}: {} - {} | {}",
                    member.id,
                    member.name,
                    member.subjects.join(", "),
                    status_label(member.availability_status)
                );
            }
        }
        None => {
            println!("{}", "Talent pools:".bold().blue());
            for (pool, size) in service.pool_sizes().await? {
                println!(
                    "{}: {} ({} teachers)",
                    pool.id,
                    pool.name.bold(),
                    size.to_string().green()
                );
            }
        }
    }
    Ok(())
}

/// Handle the 'pipeline' command
async fn handle_pipeline(service: &Service, job: Option<&str>) -> Result<()> {
    let board = service.pipeline_board(job).await?;

    match job {
        Some(job) => println!("{}", format!("Pipeline for '{}':", job).bold().blue()),
        None => println!("{}", "Pipeline:".bold().blue()),
    }
    for (stage, cards) in &board.columns {
        println!("{} ({})", stage_label(*stage), cards.len());
        for card in cards {
            println!(
                "  {}: {} → {}",
                card.entry.id, card.candidate_name, card.job_title
            );
        }
    }
    if job.is_none() && !board.job_titles.is_empty() {
        println!("Jobs: {}", board.job_titles.join(" | ").dimmed());
    }
    Ok(())
}

/// Handle the 'stats' command
async fn handle_stats(service: &Service) -> Result<()> {
    let summary = service.roster_summary().await?;
    let board = service.pipeline_board(None).await?;

    println!(
        "{}",
        format!(
            "{} teachers ({} visible)",
            summary.total_candidates, summary.visible_candidates
        )
        .bold()
        .blue()
    );

    println!("Availability:");
    for (status, count) in &summary.availability {
        println!("  {:<14} {}", status_label(*status), count);
    }

    println!("Subject supply:");
    for (subject, count) in &summary.subject_supply {
        println!("  {:<24} {}", subject, "■".repeat(*count).cyan());
    }

    println!("Countries:");
    for (country, count) in &summary.countries {
        println!("  {:<24} {}", country, count);
    }

    println!("Pipeline funnel:");
    for (stage, count) in board.stage_counts() {
        println!("  {:<14} {}", stage_label(stage), count);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(service: &Service, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("Benchmark needs at least one request");
    }

    let snapshot = service.actor().snapshot().await;
    let subjects = unique_values(snapshot.candidates(), |c| &c.subjects);
    let grades = unique_values(snapshot.candidates(), |c| &c.grades);

    // Random criteria built from labels that exist in the roster
    let criteria = random_criteria(requests, &subjects, &grades);

    // Use tokio::spawn to make concurrent requests
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for criteria in criteria {
        let service = service.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            service.search_candidates(criteria, None).await?;
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
    let wall_time = wall_clock.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} searches/second", throughput);

    Ok(())
}

fn random_criteria(requests: usize, subjects: &[String], grades: &[String]) -> Vec<FilterCriteria> {
    let mut rng = rand::rng();
    (0..requests)
        .map(|_| {
            let mut criteria = FilterCriteria::new();
            for _ in 0..rng.random_range(0..=3) {
                if !subjects.is_empty() {
                    criteria
                        .subjects
                        .insert(subjects[rng.random_range(0..subjects.len())].clone());
                }
            }
            if !grades.is_empty() && rng.random_bool(0.5) {
                criteria
                    .grades
                    .insert(grades[rng.random_range(0..grades.len())].clone());
            }
            if rng.random_bool(0.3) {
                criteria.min_experience = rng.random_range(1..=10);
            }
            if rng.random_bool(0.3) {
                criteria.availability = Some(AvailabilityStatus::Available);
            }
            criteria
        })
        .collect()
}

fn unique_values<'a>(
    candidates: &'a [Candidate],
    field: impl Fn(&'a Candidate) -> &'a Vec<String>,
) -> Vec<String> {
    let mut values: Vec<String> = candidates
        .iter()
        .flat_map(|c| field(c).iter().cloned())
        .collect();
    values.sort();
    values.dedup();
    values
}

/// Print a stage move, returning whether anything changed
fn report_transition(entry_id: &str, action: &str, transition: Transition) -> bool {
    if let Transition::Moved { from, to } = transition {
        println!(
            "{} {}: {} → {}",
            "✓".green(),
            entry_id,
            stage_label(from),
            stage_label(to)
        );
    } else {
        println!(
            "{} Cannot {} {} from {}; nothing changed",
            "!".yellow(),
            action,
            entry_id,
            stage_label(transition.stage())
        );
    }
    transition.is_moved()
}

/// Helper function to format and print search results
fn print_hits(hits: &[SearchHit], explain: bool) {
    for (rank, hit) in hits.iter().enumerate() {
        let candidate = &hit.candidate;
        println!(
            "{}. {} ({}) - {} | {} yrs | {} | {}%",
            (rank + 1).to_string().green(),
            candidate.name.bold(),
            candidate.id,
            candidate.subjects.join(", "),
            candidate.years_experience,
            candidate.country,
            score_label(hit.score)
        );
        if explain {
            let full = if hit.breakdown.is_full_match() {
                format!(" {}", "(full match)".green())
            } else {
                String::new()
            };
            println!(
                "   Matched {} of {} criteria{}: grades {} | {} | {}",
                hit.breakdown.matched,
                hit.breakdown.total,
                full,
                candidate.grades.join(", "),
                candidate.work_permit_status,
                candidate.employment_type
            );
        }
    }
}

fn print_profile(candidate: &Candidate) {
    println!("{}", format!("{} ({})", candidate.name, candidate.id).bold().blue());
    println!("{}Subjects: {}", "• ".green(), candidate.subjects.join(", "));
    println!("{}Grades: {}", "• ".green(), candidate.grades.join(", "));
    println!("{}Experience: {} years", "• ".green(), candidate.years_experience);
    if !candidate.qualifications.is_empty() {
        println!("{}Qualifications: {}", "• ".green(), candidate.qualifications.join(", "));
    }
    if !candidate.certifications.is_empty() {
        println!("{}Certifications: {}", "• ".green(), candidate.certifications.join(", "));
    }
    println!("{}Country: {}", "• ".cyan(), candidate.country);
    if !candidate.nationality.is_empty() {
        println!("{}Nationality: {}", "• ".cyan(), candidate.nationality);
    }
    println!("{}Work permit: {}", "• ".cyan(), candidate.work_permit_status);
    println!("{}Employment: {}", "• ".cyan(), candidate.employment_type);
    println!(
        "{}Availability: {}",
        "• ".cyan(),
        status_label(candidate.availability_status)
    );
    println!(
        "{}Profile: {}",
        "• ".cyan(),
        if candidate.profile_visible { "visible" } else { "hidden" }
    );
}

fn score_label(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    match score {
        80..=100 => text.green(),
        50..=79 => text.yellow(),
        _ => text.red(),
    }
}

fn status_label(status: AvailabilityStatus) -> colored::ColoredString {
    match status {
        AvailabilityStatus::Available => status.label().green(),
        AvailabilityStatus::Interviewing => status.label().yellow(),
        AvailabilityStatus::Placed => status.label().blue(),
        AvailabilityStatus::Inactive => status.label().dimmed(),
    }
}

fn stage_label(stage: Stage) -> colored::ColoredString {
    match stage {
        Stage::Placed => stage.label().green().bold(),
        Stage::Rejected => stage.label().red(),
        Stage::Offer => stage.label().magenta(),
        _ => stage.label().bold(),
    }
}
